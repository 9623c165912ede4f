//! Planned-vs-real monthly analytics aggregation.
//!
//! Read-only join of the monthly plan, the month's daily reports, the month's
//! equipment costs and the contract index registry. Nothing here writes back,
//! so repeated invocation is always safe and returns the same answer for the
//! same stored data.

use crate::entities::{
    ContractIndex, Equipment, EquipmentCost, IndexType, MonthlyPlan, PlanEquipment, PlanItem, Rdo,
    RdoItem, contract_index, equipment, equipment_cost, monthly_plan, plan_equipment, plan_item,
    rdo, rdo_item,
};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, prelude::*};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Planned vs real figures for one contract index.
#[derive(Debug, Clone)]
pub struct ItemAnalytics {
    /// Contract index the row describes
    pub index_id: i64,
    /// SAP billing code
    pub code_sap: String,
    /// Description of the contracted service
    pub description: String,
    /// Unit of measure
    pub unit: String,
    /// Billing type
    pub index_type: IndexType,
    /// Planned quantity from the monthly plan (0 when unplanned)
    pub planned_quantity: f64,
    /// Planned value from the monthly plan (0 when unplanned)
    pub planned_value: f64,
    /// Realized quantity from the month's reports
    pub real_quantity: f64,
    /// Realized value from the month's reports
    pub real_value: f64,
    /// `real_value - planned_value`
    pub delta_value: f64,
    /// `real / planned * 100`, or 0 when nothing was planned
    pub performance: f64,
}

/// Planned vs real figures for one fleet asset.
#[derive(Debug, Clone)]
pub struct FleetAnalytics {
    /// Fleet asset the row describes
    pub equipment_id: i64,
    /// Internal fleet code
    pub internal_code: String,
    /// Asset name
    pub name: String,
    /// Planned revenue (productive + unproductive targets)
    pub planned_revenue: f64,
    /// Planned operating cost
    pub planned_cost: f64,
    /// Realized revenue attributed through the month's reports
    pub real_revenue: f64,
    /// Realized cost from the month's ledger entries
    pub real_cost: f64,
    /// `real_revenue - real_cost`
    pub real_margin: f64,
}

/// The full planned-vs-real summary for one (project, month, year).
#[derive(Debug, Clone)]
pub struct AnalyticsSummary {
    /// Per contract index rows, sorted by planned value descending
    pub items: Vec<ItemAnalytics>,
    /// Per fleet asset rows, assets with no activity filtered out
    pub fleet: Vec<FleetAnalytics>,
    /// The plan's stored total (0 when no plan exists for the month)
    pub total_planned_revenue: f64,
    /// Sum of the month's report totals
    pub total_real_revenue: f64,
    /// Sum of the planned fleet costs
    pub total_planned_cost: f64,
    /// Sum of the month's ledger costs
    pub total_real_cost: f64,
    /// `real / planned * 100`, exactly 0 when nothing was planned
    pub revenue_compliance: f64,
}

/// First and last day of a calendar month.
pub fn month_bounds(month: i32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let m = u32::try_from(month).ok().filter(|m| (1..=12).contains(m)).ok_or_else(|| {
        Error::Validation {
            message: format!("Reference month out of range: {month}"),
        }
    })?;

    let start = NaiveDate::from_ymd_opt(year, m, 1).ok_or_else(|| Error::Validation {
        message: format!("Invalid reference month: {month}/{year}"),
    })?;
    let next_month_start = if m == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, m + 1, 1)
    };
    let end = next_month_start
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| Error::Validation {
            message: format!("Invalid reference month: {month}/{year}"),
        })?;

    Ok((start, end))
}

/// Month-filtered cost rows across the whole ledger.
///
/// The cost ledger carries no project column, so this filter is by date only:
/// when several projects share a calendar month, their costs land in every
/// project's summary. Kept as the documented behavior of the source system;
/// scoping, if ever confirmed, is a one-line change here.
pub async fn load_monthly_costs_unscoped(
    db: &DatabaseConnection,
    month: i32,
    year: i32,
) -> Result<Vec<equipment_cost::Model>> {
    let (start, end) = month_bounds(month, year)?;
    EquipmentCost::find()
        .filter(equipment_cost::Column::Date.between(start, end))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Computes the planned-vs-real summary for one (project, month, year).
///
/// The plan lookup is exact — unlike `core::planning::get_plan`, analytics
/// never borrows a prior month's plan. Orphaned references (items pointing at
/// deleted indices or equipment) are aggregated as unknown and never fail the
/// computation.
pub async fn get_analytics_summary(
    db: &DatabaseConnection,
    project_id: i64,
    month: i32,
    year: i32,
) -> Result<AnalyticsSummary> {
    let (start, end) = month_bounds(month, year)?;

    // 1. The plan for the exact key, if any
    let plan = MonthlyPlan::find()
        .filter(monthly_plan::Column::ProjectId.eq(project_id))
        .filter(monthly_plan::Column::Month.eq(month))
        .filter(monthly_plan::Column::Year.eq(year))
        .one(db)
        .await?;

    let mut planned_by_index: HashMap<i64, (f64, f64)> = HashMap::new();
    let mut planned_fleet: HashMap<i64, plan_equipment::Model> = HashMap::new();
    let mut total_planned_revenue = 0.0;
    let mut total_planned_cost = 0.0;

    if let Some(ref plan) = plan {
        total_planned_revenue = plan.total_value;

        let items = PlanItem::find()
            .filter(plan_item::Column::PlanId.eq(plan.id))
            .all(db)
            .await?;
        for item in items {
            planned_by_index.insert(item.index_id, (item.planned_quantity, item.total_value));
        }

        let fleet = PlanEquipment::find()
            .filter(plan_equipment::Column::PlanId.eq(plan.id))
            .all(db)
            .await?;
        for entry in fleet {
            total_planned_cost += entry.estimated_cost;
            planned_fleet.insert(entry.equipment_id, entry);
        }
    }

    // 2. The month's reports: total revenue plus per-index and per-equipment folds
    let rdos = Rdo::find()
        .filter(rdo::Column::ProjectId.eq(project_id))
        .filter(rdo::Column::Date.between(start, end))
        .all(db)
        .await?;

    let total_real_revenue: f64 = rdos.iter().map(|r| r.total_daily_value).sum();

    let rdo_ids: Vec<i64> = rdos.iter().map(|r| r.id).collect();
    let report_items: Vec<rdo_item::Model> = if rdo_ids.is_empty() {
        Vec::new()
    } else {
        RdoItem::find()
            .filter(rdo_item::Column::RdoId.is_in(rdo_ids))
            .all(db)
            .await?
    };

    let mut real_by_index: HashMap<i64, (f64, f64)> = HashMap::new();
    let mut revenue_by_equipment: HashMap<i64, f64> = HashMap::new();
    for item in &report_items {
        let entry = real_by_index.entry(item.index_id).or_insert((0.0, 0.0));
        entry.0 += item.quantity;
        entry.1 += item.total_value;

        if let Some(equipment_id) = item.equipment_id {
            *revenue_by_equipment.entry(equipment_id).or_insert(0.0) += item.total_value;
        }
    }

    // 3. The month's costs (date filter only — see load_monthly_costs_unscoped)
    let costs = load_monthly_costs_unscoped(db, month, year).await?;
    let mut cost_by_equipment: HashMap<i64, f64> = HashMap::new();
    let mut total_real_cost = 0.0;
    for cost in &costs {
        *cost_by_equipment.entry(cost.equipment_id).or_insert(0.0) += cost.value;
        total_real_cost += cost.value;
    }

    // 4. One row per contract index of the project
    let indices = ContractIndex::find()
        .filter(contract_index::Column::ProjectId.eq(project_id))
        .all(db)
        .await?;

    let mut items: Vec<ItemAnalytics> = indices
        .into_iter()
        .map(|index| {
            let (planned_quantity, planned_value) =
                planned_by_index.get(&index.id).copied().unwrap_or((0.0, 0.0));
            let (real_quantity, real_value) =
                real_by_index.get(&index.id).copied().unwrap_or((0.0, 0.0));

            let performance = if planned_value > 0.0 {
                real_value / planned_value * 100.0
            } else {
                0.0
            };

            ItemAnalytics {
                index_id: index.id,
                code_sap: index.code_sap,
                description: index.description,
                unit: index.unit,
                index_type: index.index_type,
                planned_quantity,
                planned_value,
                real_quantity,
                real_value,
                delta_value: real_value - planned_value,
                performance,
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.planned_value
            .partial_cmp(&a.planned_value)
            .unwrap_or(Ordering::Equal)
    });

    // 5. One row per fleet asset, dropping assets idle in this period
    let fleet_assets = Equipment::find()
        .order_by_asc(equipment::Column::InternalCode)
        .all(db)
        .await?;

    let fleet: Vec<FleetAnalytics> = fleet_assets
        .into_iter()
        .filter_map(|asset| {
            let planned = planned_fleet.get(&asset.id);
            let planned_revenue = planned
                .map(|p| p.target_productive + p.target_unproductive)
                .unwrap_or(0.0);
            let planned_cost = planned.map(|p| p.estimated_cost).unwrap_or(0.0);
            let real_revenue = revenue_by_equipment.get(&asset.id).copied().unwrap_or(0.0);
            let real_cost = cost_by_equipment.get(&asset.id).copied().unwrap_or(0.0);

            if planned_revenue == 0.0 && real_revenue == 0.0 && real_cost == 0.0 {
                return None;
            }

            Some(FleetAnalytics {
                equipment_id: asset.id,
                internal_code: asset.internal_code,
                name: asset.name,
                planned_revenue,
                planned_cost,
                real_revenue,
                real_cost,
                real_margin: real_revenue - real_cost,
            })
        })
        .collect();

    // 6. Portfolio totals with the divide-by-zero guard
    let revenue_compliance = if total_planned_revenue > 0.0 {
        total_real_revenue / total_planned_revenue * 100.0
    } else {
        0.0
    };

    Ok(AnalyticsSummary {
        items,
        fleet,
        total_planned_revenue,
        total_real_revenue,
        total_planned_cost,
        total_real_cost,
        revenue_compliance,
    })
}
