//! Monthly planning baseline business logic.
//!
//! A plan is the month's production and fleet baseline for one project,
//! keyed by (project, month, year). Requesting a month with no saved plan
//! borrows the previous month's fleet roster as an unsaved draft (statuses
//! reset to `ATIVO`, items cleared); only an explicit [`save_plan`] persists
//! anything. Item totals are priced from the contract index at save time and
//! frozen into the plan — the same pattern the RDO ledger applies per entry.

use crate::entities::{
    ContractIndex, FleetStatus, MonthlyPlan, PlanEquipment, PlanItem, monthly_plan,
    plan_equipment, plan_item,
};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Planned quantity for one contract index.
#[derive(Debug, Clone)]
pub struct PlanItemEntry {
    /// Contract index being planned
    pub index_id: i64,
    /// Planned quantity for the month
    pub planned_quantity: f64,
    /// `planned_quantity * index price`; filled by [`save_plan`]
    pub total_value: f64,
}

/// One fleet asset in the month's roster.
#[derive(Debug, Clone)]
pub struct PlanEquipmentEntry {
    /// Fleet asset planned for the month
    pub equipment_id: i64,
    /// Mobilization state
    pub status: FleetStatus,
    /// Productive revenue target, operator-entered
    pub target_productive: f64,
    /// Unproductive revenue target, operator-entered
    pub target_unproductive: f64,
    /// Estimated operating cost, operator-entered
    pub estimated_cost: f64,
}

/// A monthly plan as handled by callers: persisted (`id` set) or draft.
#[derive(Debug, Clone)]
pub struct PlanData {
    /// Database id; `None` for an unsaved draft (e.g. a carry-forward)
    pub id: Option<i64>,
    /// Project the baseline belongs to
    pub project_id: i64,
    /// Reference month (1-12)
    pub month: i32,
    /// Reference year
    pub year: i32,
    /// Planned contract items
    pub items: Vec<PlanItemEntry>,
    /// Planned fleet roster
    pub fleet: Vec<PlanEquipmentEntry>,
    /// Sum of item totals, frozen at save time
    pub total_value: f64,
}

/// The calendar month immediately before (month, year), rolling over the year
/// at January.
#[must_use]
pub fn previous_month(month: i32, year: i32) -> (i32, i32) {
    if month == 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

fn validate_reference(month: i32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::Validation {
            message: format!("Reference month out of range: {month}"),
        });
    }
    Ok(())
}

async fn find_plan<C>(
    db: &C,
    project_id: i64,
    month: i32,
    year: i32,
) -> Result<Option<monthly_plan::Model>>
where
    C: ConnectionTrait,
{
    MonthlyPlan::find()
        .filter(monthly_plan::Column::ProjectId.eq(project_id))
        .filter(monthly_plan::Column::Month.eq(month))
        .filter(monthly_plan::Column::Year.eq(year))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn load_fleet(db: &DatabaseConnection, plan_id: i64) -> Result<Vec<plan_equipment::Model>> {
    PlanEquipment::find()
        .filter(plan_equipment::Column::PlanId.eq(plan_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the plan for (project, month, year).
///
/// Exact match first. On a miss, the immediately preceding month is consulted:
/// if it has a plan, an UNSAVED draft is returned carrying only that plan's
/// fleet roster with every status reset to `ATIVO` and an empty item list.
/// Returns `None` when neither month has a plan.
pub async fn get_plan(
    db: &DatabaseConnection,
    project_id: i64,
    month: i32,
    year: i32,
) -> Result<Option<PlanData>> {
    validate_reference(month)?;

    if let Some(plan) = find_plan(db, project_id, month, year).await? {
        let items = PlanItem::find()
            .filter(plan_item::Column::PlanId.eq(plan.id))
            .all(db)
            .await?
            .into_iter()
            .map(|item| PlanItemEntry {
                index_id: item.index_id,
                planned_quantity: item.planned_quantity,
                total_value: item.total_value,
            })
            .collect();

        let fleet = load_fleet(db, plan.id)
            .await?
            .into_iter()
            .map(|entry| PlanEquipmentEntry {
                equipment_id: entry.equipment_id,
                status: entry.status,
                target_productive: entry.target_productive,
                target_unproductive: entry.target_unproductive,
                estimated_cost: entry.estimated_cost,
            })
            .collect();

        return Ok(Some(PlanData {
            id: Some(plan.id),
            project_id,
            month,
            year,
            items,
            fleet,
            total_value: plan.total_value,
        }));
    }

    // Carry-forward: borrow the previous month's fleet roster as a draft
    let (prev_month, prev_year) = previous_month(month, year);
    let Some(previous) = find_plan(db, project_id, prev_month, prev_year).await? else {
        return Ok(None);
    };

    let fleet: Vec<PlanEquipmentEntry> = load_fleet(db, previous.id)
        .await?
        .into_iter()
        .map(|entry| PlanEquipmentEntry {
            equipment_id: entry.equipment_id,
            // Whatever was mobilizing or demobilizing last month is simply
            // active in the new month until the planner says otherwise
            status: FleetStatus::Ativo,
            target_productive: entry.target_productive,
            target_unproductive: entry.target_unproductive,
            estimated_cost: entry.estimated_cost,
        })
        .collect();

    info!(
        project_id,
        month, year, "No plan saved; carrying the previous month's fleet roster forward as a draft"
    );

    Ok(Some(PlanData {
        id: None,
        project_id,
        month,
        year,
        items: Vec::new(),
        fleet,
        total_value: 0.0,
    }))
}

/// Persists a plan, replacing any existing record for (project, month, year).
///
/// Items with a positive planned quantity are priced `quantity * current index
/// price` at this moment and the plan total stored as their sum; the prices
/// are thereby frozen into the plan. Fleet targets are stored verbatim.
/// Returns the persisted header.
pub async fn save_plan(db: &DatabaseConnection, plan: &PlanData) -> Result<monthly_plan::Model> {
    validate_reference(plan.month)?;
    if plan.project_id <= 0 {
        return Err(Error::Validation {
            message: "No project selected for the plan".to_string(),
        });
    }

    let txn = db.begin().await?;

    // Price the items against the indices in force right now
    let mut priced_items = Vec::new();
    let mut total_value = 0.0;
    for item in &plan.items {
        if item.planned_quantity <= 0.0 {
            continue;
        }
        if !item.planned_quantity.is_finite() {
            return Err(Error::InvalidAmount {
                amount: item.planned_quantity,
            });
        }
        let index = ContractIndex::find_by_id(item.index_id)
            .one(&txn)
            .await?
            .ok_or(Error::IndexNotFound { id: item.index_id })?;
        let value = item.planned_quantity * index.current_price;
        total_value += value;
        priced_items.push((item.index_id, item.planned_quantity, value));
    }

    // Upsert the header on the (project, month, year) business key
    let header = match find_plan(&txn, plan.project_id, plan.month, plan.year).await? {
        Some(existing) => {
            let existing_id = existing.id;
            let mut active_model: monthly_plan::ActiveModel = existing.into();
            active_model.total_value = Set(total_value);
            let updated = active_model.update(&txn).await?;

            PlanItem::delete_many()
                .filter(plan_item::Column::PlanId.eq(existing_id))
                .exec(&txn)
                .await?;
            PlanEquipment::delete_many()
                .filter(plan_equipment::Column::PlanId.eq(existing_id))
                .exec(&txn)
                .await?;

            updated
        }
        None => {
            monthly_plan::ActiveModel {
                project_id: Set(plan.project_id),
                month: Set(plan.month),
                year: Set(plan.year),
                total_value: Set(total_value),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };

    for (index_id, planned_quantity, value) in priced_items {
        let row = plan_item::ActiveModel {
            plan_id: Set(header.id),
            index_id: Set(index_id),
            planned_quantity: Set(planned_quantity),
            total_value: Set(value),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    for entry in &plan.fleet {
        let row = plan_equipment::ActiveModel {
            plan_id: Set(header.id),
            equipment_id: Set(entry.equipment_id),
            status: Set(entry.status),
            target_productive: Set(entry.target_productive),
            target_unproductive: Set(entry.target_unproductive),
            estimated_cost: Set(entry.estimated_cost),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    txn.commit().await?;

    info!(
        plan_id = header.id,
        project_id = header.project_id,
        month = header.month,
        year = header.year,
        total = header.total_value,
        "Saved monthly plan"
    );

    Ok(header)
}
