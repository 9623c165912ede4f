//! Fleet asset and equipment cost ledger business logic.
//!
//! Standard CRUD with one deliberate rule: deleting an asset never cascades to
//! its cost entries. The ledger keeps the dangling `equipment_id` so the
//! expense history stays complete, and every aggregation treats the failed
//! lookup as an unknown asset instead of an error.

use crate::entities::{
    CostType, Equipment, EquipmentCost, EquipmentOwner, equipment, equipment_cost,
};
use crate::errors::{Error, Result};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::warn;

/// Retrieves the whole fleet, ordered by internal code.
pub async fn get_all_equipment(db: &DatabaseConnection) -> Result<Vec<equipment::Model>> {
    Equipment::find()
        .order_by_asc(equipment::Column::InternalCode)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a fleet asset by its unique ID.
pub async fn get_equipment_by_id(
    db: &DatabaseConnection,
    equipment_id: i64,
) -> Result<Option<equipment::Model>> {
    Equipment::find_by_id(equipment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a new fleet asset.
pub async fn create_equipment(
    db: &DatabaseConnection,
    internal_code: String,
    name: String,
    category: String,
    owner: EquipmentOwner,
    responsible_company_id: i64,
) -> Result<equipment::Model> {
    if internal_code.trim().is_empty() || name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Equipment needs an internal code and a name".to_string(),
        });
    }

    let asset = equipment::ActiveModel {
        internal_code: Set(internal_code.trim().to_string()),
        name: Set(name.trim().to_string()),
        category: Set(category),
        owner: Set(owner),
        responsible_company_id: Set(responsible_company_id),
        ..Default::default()
    };

    let result = asset.insert(db).await?;
    Ok(result)
}

/// Updates an existing fleet asset's registration fields.
pub async fn update_equipment(
    db: &DatabaseConnection,
    equipment_id: i64,
    internal_code: String,
    name: String,
    category: String,
    owner: EquipmentOwner,
    responsible_company_id: i64,
) -> Result<equipment::Model> {
    if internal_code.trim().is_empty() || name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Equipment needs an internal code and a name".to_string(),
        });
    }

    let asset = Equipment::find_by_id(equipment_id)
        .one(db)
        .await?
        .ok_or(Error::EquipmentNotFound { id: equipment_id })?;

    let mut active_model: equipment::ActiveModel = asset.into();
    active_model.internal_code = Set(internal_code.trim().to_string());
    active_model.name = Set(name.trim().to_string());
    active_model.category = Set(category);
    active_model.owner = Set(owner);
    active_model.responsible_company_id = Set(responsible_company_id);
    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a fleet asset. Cost rows are NOT cascaded: they keep the now
/// dangling `equipment_id` so the expense history survives the asset.
pub async fn delete_equipment(db: &DatabaseConnection, equipment_id: i64) -> Result<()> {
    let asset = Equipment::find_by_id(equipment_id)
        .one(db)
        .await?
        .ok_or(Error::EquipmentNotFound { id: equipment_id })?;

    let remaining_costs = EquipmentCost::find()
        .filter(equipment_cost::Column::EquipmentId.eq(equipment_id))
        .count(db)
        .await?;

    asset.delete(db).await?;

    if remaining_costs > 0 {
        warn!(
            equipment_id,
            remaining_costs, "Equipment deleted; its cost entries keep the dangling reference"
        );
    }

    Ok(())
}

/// Records a dated expense against a fleet asset.
///
/// The asset must exist at entry time; it may be deleted later without
/// affecting the row. Value must be positive and finite.
pub async fn create_cost(
    db: &DatabaseConnection,
    equipment_id: i64,
    cost_type: CostType,
    value: f64,
    date: Date,
    description: String,
) -> Result<equipment_cost::Model> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidAmount { amount: value });
    }

    Equipment::find_by_id(equipment_id)
        .one(db)
        .await?
        .ok_or(Error::EquipmentNotFound { id: equipment_id })?;

    let cost = equipment_cost::ActiveModel {
        equipment_id: Set(equipment_id),
        cost_type: Set(cost_type),
        value: Set(value),
        date: Set(date),
        description: Set(description),
        ..Default::default()
    };

    let result = cost.insert(db).await?;
    Ok(result)
}

/// Retrieves every cost entry in the ledger, newest first.
pub async fn get_all_costs(db: &DatabaseConnection) -> Result<Vec<equipment_cost::Model>> {
    EquipmentCost::find()
        .order_by_desc(equipment_cost::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the cost entries of one asset, newest first. Works for deleted
/// assets too — the rows outlive the equipment.
pub async fn get_costs_for_equipment(
    db: &DatabaseConnection,
    equipment_id: i64,
) -> Result<Vec<equipment_cost::Model>> {
    EquipmentCost::find()
        .filter(equipment_cost::Column::EquipmentId.eq(equipment_id))
        .order_by_desc(equipment_cost::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates an existing cost entry.
pub async fn update_cost(
    db: &DatabaseConnection,
    cost_id: i64,
    cost_type: CostType,
    value: f64,
    date: Date,
    description: String,
) -> Result<equipment_cost::Model> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidAmount { amount: value });
    }

    let cost = EquipmentCost::find_by_id(cost_id)
        .one(db)
        .await?
        .ok_or(Error::CostNotFound { id: cost_id })?;

    let mut active_model: equipment_cost::ActiveModel = cost.into();
    active_model.cost_type = Set(cost_type);
    active_model.value = Set(value);
    active_model.date = Set(date);
    active_model.description = Set(description);
    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a cost entry.
pub async fn delete_cost(db: &DatabaseConnection, cost_id: i64) -> Result<()> {
    let cost = EquipmentCost::find_by_id(cost_id)
        .one(db)
        .await?
        .ok_or(Error::CostNotFound { id: cost_id })?;

    cost.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_create_equipment_rejects_blank_name() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "DR Locações").await?;

        let result = create_equipment(
            &db,
            "EQ-001".to_string(),
            "  ".to_string(),
            "Linha Amarela".to_string(),
            EquipmentOwner::GrupoDr,
            company.id,
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_cost_requires_existing_equipment() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_cost(
            &db,
            999,
            CostType::Manutencao,
            5_000.0,
            NaiveDate::from_ymd_opt(2023, 5, 10).unwrap(),
            "Troca de óleo".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::EquipmentNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_cost_rejects_non_positive_value() -> Result<()> {
        let db = setup_test_db().await?;
        let asset = create_test_equipment(&db, "EQ-001", "Escavadeira CAT 320").await?;

        let result = create_cost(
            &db,
            asset.id,
            CostType::Seguro,
            0.0,
            NaiveDate::from_ymd_opt(2023, 5, 10).unwrap(),
            "Apólice".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: 0.0 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_equipment_keeps_cost_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let asset = create_test_equipment(&db, "EQ-001", "Escavadeira CAT 320").await?;

        let cost = create_cost(
            &db,
            asset.id,
            CostType::Manutencao,
            5_000.0,
            NaiveDate::from_ymd_opt(2023, 5, 10).unwrap(),
            "Troca de óleo e filtros".to_string(),
        )
        .await?;

        delete_equipment(&db, asset.id).await?;

        // The asset is gone but the expense survives with the dangling reference
        assert!(get_equipment_by_id(&db, asset.id).await?.is_none());
        let orphaned = get_costs_for_equipment(&db, asset.id).await?;
        assert_eq!(orphaned.len(), 1);
        assert_eq!(orphaned[0].id, cost.id);
        assert_eq!(orphaned[0].equipment_id, asset.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_cost() -> Result<()> {
        let db = setup_test_db().await?;
        let asset = create_test_equipment(&db, "EQ-001", "Escavadeira CAT 320").await?;
        let cost = create_cost(
            &db,
            asset.id,
            CostType::Manutencao,
            5_000.0,
            NaiveDate::from_ymd_opt(2023, 5, 10).unwrap(),
            "Troca de óleo".to_string(),
        )
        .await?;

        let updated = update_cost(
            &db,
            cost.id,
            CostType::LocacaoExterna,
            7_500.0,
            NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
            "Locação de guindaste".to_string(),
        )
        .await?;
        assert_eq!(updated.value, 7_500.0);
        assert_eq!(updated.cost_type, CostType::LocacaoExterna);

        delete_cost(&db, cost.id).await?;
        assert!(get_costs_for_equipment(&db, asset.id).await?.is_empty());

        Ok(())
    }
}
