//! Project-level dashboard metrics.
//!
//! All-time revenue and cost health for one project: revenue split between
//! rental and construction lines, per-asset revenue attribution and the
//! equipment health table. Like analytics, this is a read-only fold that
//! tolerates orphaned references — a line whose index was deleted still counts
//! toward total revenue, it just cannot be classified by type anymore.

use crate::core::equipment::get_all_costs;
use crate::entities::{
    ContractIndex, Equipment, IndexType, Rdo, RdoItem, contract_index, equipment, rdo, rdo_item,
};
use crate::errors::Result;
use sea_orm::{QueryOrder, prelude::*};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Revenue, cost and margin of one fleet asset.
#[derive(Debug, Clone)]
pub struct EquipmentHealth {
    /// Fleet asset the row describes
    pub equipment_id: i64,
    /// Internal fleet code
    pub internal_code: String,
    /// Asset name
    pub name: String,
    /// Revenue attributed through daily reports
    pub revenue: f64,
    /// Cost from the expense ledger
    pub cost: f64,
    /// `revenue - cost`
    pub margin: f64,
}

/// All-time financial snapshot of one project.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    /// Sum of all daily report totals
    pub total_revenue: f64,
    /// Share of revenue billed on rental lines
    pub rental_revenue: f64,
    /// Share of revenue billed on construction lines
    pub construction_revenue: f64,
    /// Sum of every ledger cost (the ledger is project-agnostic)
    pub total_costs: f64,
    /// Per-asset health rows, sorted by revenue descending
    pub equipment_health: Vec<EquipmentHealth>,
}

/// Computes the all-time dashboard metrics for a project.
pub async fn get_dashboard_metrics(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<DashboardMetrics> {
    let reports = Rdo::find()
        .filter(rdo::Column::ProjectId.eq(project_id))
        .all(db)
        .await?;

    let indices = ContractIndex::find()
        .filter(contract_index::Column::ProjectId.eq(project_id))
        .all(db)
        .await?;
    let type_by_index: HashMap<i64, IndexType> =
        indices.iter().map(|i| (i.id, i.index_type)).collect();

    let total_revenue: f64 = reports.iter().map(|r| r.total_daily_value).sum();

    let report_ids: Vec<i64> = reports.iter().map(|r| r.id).collect();
    let items: Vec<rdo_item::Model> = if report_ids.is_empty() {
        Vec::new()
    } else {
        RdoItem::find()
            .filter(rdo_item::Column::RdoId.is_in(report_ids))
            .all(db)
            .await?
    };

    let mut rental_revenue = 0.0;
    let mut construction_revenue = 0.0;
    let mut revenue_by_equipment: HashMap<i64, f64> = HashMap::new();
    for item in &items {
        // A deleted index cannot be classified; the line still counted toward
        // the report total above
        match type_by_index.get(&item.index_id) {
            Some(IndexType::Rental) => rental_revenue += item.total_value,
            Some(IndexType::Construtora) => construction_revenue += item.total_value,
            None => {}
        }

        if let Some(equipment_id) = item.equipment_id {
            *revenue_by_equipment.entry(equipment_id).or_insert(0.0) += item.total_value;
        }
    }

    // The cost ledger is project-agnostic: every entry counts here
    let mut cost_by_equipment: HashMap<i64, f64> = HashMap::new();
    let mut total_costs = 0.0;
    for cost in get_all_costs(db).await? {
        *cost_by_equipment.entry(cost.equipment_id).or_insert(0.0) += cost.value;
        total_costs += cost.value;
    }

    // Health rows cover the registered fleet; costs against deleted assets
    // stay in the total above and out of the named table
    let fleet = Equipment::find()
        .order_by_asc(equipment::Column::InternalCode)
        .all(db)
        .await?;

    let mut equipment_health: Vec<EquipmentHealth> = fleet
        .into_iter()
        .map(|asset| {
            let revenue = revenue_by_equipment.get(&asset.id).copied().unwrap_or(0.0);
            let cost = cost_by_equipment.get(&asset.id).copied().unwrap_or(0.0);
            EquipmentHealth {
                equipment_id: asset.id,
                internal_code: asset.internal_code,
                name: asset.name,
                revenue,
                cost,
                margin: revenue - cost,
            }
        })
        .collect();

    equipment_health.sort_by(|a, b| {
        b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal)
    });

    Ok(DashboardMetrics {
        total_revenue,
        rental_revenue,
        construction_revenue,
        total_costs,
        equipment_health,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::equipment::{create_cost, delete_equipment};
    use crate::core::index::delete_index;
    use crate::core::rdo::{RdoDraft, price_item_from_index, save_rdo, set_item_quantity};
    use crate::entities::CostType;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_revenue_split_by_index_type() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;
        let rental =
            create_custom_index(&db, project.id, "R-1001", IndexType::Rental, 250.0, 1_000.0)
                .await?;
        let construction =
            create_custom_index(&db, project.id, "C-5001", IndexType::Construtora, 45.0, 50_000.0)
                .await?;

        let mut draft = RdoDraft::new(project.id, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        draft.add_item();
        price_item_from_index(&db, &mut draft.items[0], rental.id).await?;
        set_item_quantity(&mut draft.items[0], 8.0)?;
        draft.add_item();
        price_item_from_index(&db, &mut draft.items[1], construction.id).await?;
        set_item_quantity(&mut draft.items[1], 200.0)?;
        save_rdo(&db, &draft).await?;

        let metrics = get_dashboard_metrics(&db, project.id).await?;
        assert_eq!(metrics.rental_revenue, 2_000.0);
        assert_eq!(metrics.construction_revenue, 9_000.0);
        assert_eq!(metrics.total_revenue, 11_000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_health_table_sorted_by_revenue() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;
        let index = create_test_index(&db, project.id, "R-1001", 250.0, 1_000.0).await?;
        let low = create_test_equipment(&db, "EQ-001", "Caminhão Basculante").await?;
        let high = create_test_equipment(&db, "EQ-002", "Escavadeira CAT 320").await?;

        for (equipment_id, hours) in [(low.id, 2.0), (high.id, 8.0)] {
            let mut draft =
                RdoDraft::new(project.id, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
            let item = draft.add_item();
            item.equipment_id = Some(equipment_id);
            price_item_from_index(&db, &mut draft.items[0], index.id).await?;
            set_item_quantity(&mut draft.items[0], hours)?;
            save_rdo(&db, &draft).await?;
        }

        let metrics = get_dashboard_metrics(&db, project.id).await?;
        assert_eq!(metrics.equipment_health.len(), 2);
        assert_eq!(metrics.equipment_health[0].equipment_id, high.id);
        assert_eq!(metrics.equipment_health[0].revenue, 2_000.0);
        assert_eq!(metrics.equipment_health[1].revenue, 500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_orphaned_cost_counts_in_total_only() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;
        let asset = create_test_equipment(&db, "EQ-001", "Gerador 500kVA").await?;

        create_cost(
            &db,
            asset.id,
            CostType::Ipva,
            3_200.0,
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            "IPVA 2023".to_string(),
        )
        .await?;
        delete_equipment(&db, asset.id).await?;

        // The fold must not crash and the cost stays in the portfolio total
        let metrics = get_dashboard_metrics(&db, project.id).await?;
        assert_eq!(metrics.total_costs, 3_200.0);
        assert!(metrics.equipment_health.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_index_drops_out_of_the_split() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;
        let index = create_test_index(&db, project.id, "C-5001", 45.0, 50_000.0).await?;

        let mut draft = RdoDraft::new(project.id, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        draft.add_item();
        price_item_from_index(&db, &mut draft.items[0], index.id).await?;
        set_item_quantity(&mut draft.items[0], 100.0)?;
        save_rdo(&db, &draft).await?;

        delete_index(&db, index.id).await?;

        let metrics = get_dashboard_metrics(&db, project.id).await?;
        // The day's total is untouched; the split no longer sees the line
        assert_eq!(metrics.total_revenue, 4_500.0);
        assert_eq!(metrics.construction_revenue, 0.0);
        assert_eq!(metrics.rental_revenue, 0.0);

        Ok(())
    }
}
