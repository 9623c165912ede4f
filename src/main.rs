//! Bootstrap binary: initializes the database, seeds reference data and logs a
//! financial snapshot per project.

use dotenvy::dotenv;
use obra_ledger::config;
use obra_ledger::core::{dashboard, report};
use obra_ledger::entities::Project;
use obra_ledger::errors::Result;
use sea_orm::EntityTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Connect and make sure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 4. Seed segment tables when a config file is available
    match config::segments::load_default_config() {
        Ok(segments) => {
            config::segments::seed_segments(&db, &segments).await?;
        }
        Err(e) => warn!("Segment seeding skipped: {e}"),
    }

    // 5. Log a financial snapshot per registered project
    let projects = Project::find().all(&db).await?;
    if projects.is_empty() {
        info!("No projects registered yet.");
        return Ok(());
    }

    for project in projects {
        let metrics = dashboard::get_dashboard_metrics(&db, project.id).await?;
        info!(
            project = %project.name,
            revenue = %report::format_brl(metrics.total_revenue),
            rental = %report::format_brl(metrics.rental_revenue),
            construction = %report::format_brl(metrics.construction_revenue),
            costs = %report::format_brl(metrics.total_costs),
            "Project snapshot"
        );
        for health in metrics.equipment_health.iter().take(5) {
            info!(
                equipment = %health.internal_code,
                revenue = %report::format_brl(health.revenue),
                cost = %report::format_brl(health.cost),
                margin = %report::format_brl(health.margin),
                "Equipment health"
            );
        }
    }

    Ok(())
}
