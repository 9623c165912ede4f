//! Database configuration module for `ObraLedger`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all
//! necessary tables based on the entity definitions. Table creation uses
//! `Schema::create_table_from_entity` so the database schema always matches the
//! Rust struct definitions without requiring manual SQL.

use crate::entities::{
    BulletinItem, Company, ContractIndex, Equipment, EquipmentCost, IndexRevision,
    MeasurementBulletin, MonthlyPlan, PlanEquipment, PlanItem, Project, ProjectSegment, Rdo,
    RdoImpact, RdoItem,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/obra_ledger.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database.
///
/// Uses [`get_database_url`] to resolve the target, so a `DATABASE_URL`
/// environment variable overrides the default local file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Idempotent: every statement carries `IF NOT EXISTS`, so calling this on
/// every startup is safe. Tables carry no foreign keys (see `entities` module
/// docs), so creation order does not matter.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut tables = [
        schema.create_table_from_entity(Project),
        schema.create_table_from_entity(Company),
        schema.create_table_from_entity(ContractIndex),
        schema.create_table_from_entity(IndexRevision),
        schema.create_table_from_entity(Equipment),
        schema.create_table_from_entity(EquipmentCost),
        schema.create_table_from_entity(ProjectSegment),
        schema.create_table_from_entity(Rdo),
        schema.create_table_from_entity(RdoItem),
        schema.create_table_from_entity(RdoImpact),
        schema.create_table_from_entity(MonthlyPlan),
        schema.create_table_from_entity(PlanItem),
        schema.create_table_from_entity(PlanEquipment),
        schema.create_table_from_entity(MeasurementBulletin),
        schema.create_table_from_entity(BulletinItem),
    ];

    for table in &mut tables {
        table.if_not_exists();
        db.execute(builder.build(&*table)).await?;
    }

    Ok(())
}
