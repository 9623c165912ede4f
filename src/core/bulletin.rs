//! Measurement bulletin store business logic.
//!
//! A bulletin is the client's official measurement document for a period,
//! imported as already-structured line items — spreadsheet parsing is the
//! importer collaborator's job, never this module's. The store is append-only
//! reference data: metadata (date/period/type) can be edited, line items and
//! the import-time total cannot. Bulletins live alongside RDO-based analytics
//! without being joined into them.

use crate::entities::{
    BulletinItem, IndexType, MeasurementBulletin, bulletin_item, measurement_bulletin,
};
use crate::errors::{Error, Result};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// One already-parsed line of a client measurement document.
#[derive(Debug, Clone)]
pub struct BulletinLine {
    /// SAP billing code of the measured service
    pub code_sap: String,
    /// Description as printed in the client document
    pub description: String,
    /// Unit of measure
    pub unit: String,
    /// Unit price used by the client
    pub unit_price: f64,
    /// Contracted quantity per the client document
    pub planned_quantity: f64,
    /// Quantity accumulated before this period
    pub accumulated_previous_qty: f64,
    /// Quantity measured in this period
    pub measured_quantity: f64,
    /// Total accumulated quantity including this period
    pub total_accumulated_qty: f64,
    /// Value accumulated before this period
    pub accumulated_previous_value: f64,
    /// Value measured in this period
    pub measured_value: f64,
    /// Total accumulated value including this period
    pub total_accumulated_value: f64,
    /// Total contract value of the line
    pub total_contract_value: f64,
    /// Remaining balance value of the line
    pub balance_value: f64,
    /// Execution percentage per the client document
    pub execution_percentage: f64,
}

/// Imports a parsed measurement document as a new bulletin.
///
/// Rejects an empty line set. The bulletin total is the sum of the lines'
/// measured values, computed here once and never recomputed afterwards.
pub async fn import_bulletin(
    db: &DatabaseConnection,
    project_id: i64,
    reference_date: Date,
    period: String,
    bulletin_type: IndexType,
    file_name: String,
    lines: Vec<BulletinLine>,
) -> Result<measurement_bulletin::Model> {
    if lines.is_empty() {
        return Err(Error::Validation {
            message: "A measurement bulletin needs at least one line".to_string(),
        });
    }

    let total_value: f64 = lines.iter().map(|line| line.measured_value).sum();

    let txn = db.begin().await?;

    let bulletin = measurement_bulletin::ActiveModel {
        project_id: Set(project_id),
        reference_date: Set(reference_date),
        period: Set(period),
        bulletin_type: Set(bulletin_type),
        file_name: Set(file_name),
        total_value: Set(total_value),
        uploaded_at: Set(Utc::now()),
        ..Default::default()
    };
    let bulletin = bulletin.insert(&txn).await?;

    for line in lines {
        let row = bulletin_item::ActiveModel {
            bulletin_id: Set(bulletin.id),
            code_sap: Set(line.code_sap),
            description: Set(line.description),
            unit: Set(line.unit),
            unit_price: Set(line.unit_price),
            planned_quantity: Set(line.planned_quantity),
            accumulated_previous_qty: Set(line.accumulated_previous_qty),
            measured_quantity: Set(line.measured_quantity),
            total_accumulated_qty: Set(line.total_accumulated_qty),
            accumulated_previous_value: Set(line.accumulated_previous_value),
            measured_value: Set(line.measured_value),
            total_accumulated_value: Set(line.total_accumulated_value),
            total_contract_value: Set(line.total_contract_value),
            balance_value: Set(line.balance_value),
            execution_percentage: Set(line.execution_percentage),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    txn.commit().await?;

    info!(
        bulletin_id = bulletin.id,
        project_id,
        total = bulletin.total_value,
        "Imported measurement bulletin"
    );

    Ok(bulletin)
}

/// Retrieves a project's bulletins, newest reference date first.
pub async fn get_bulletins_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<measurement_bulletin::Model>> {
    MeasurementBulletin::find()
        .filter(measurement_bulletin::Column::ProjectId.eq(project_id))
        .order_by_desc(measurement_bulletin::Column::ReferenceDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the stored lines of one bulletin.
pub async fn get_bulletin_items(
    db: &DatabaseConnection,
    bulletin_id: i64,
) -> Result<Vec<bulletin_item::Model>> {
    BulletinItem::find()
        .filter(bulletin_item::Column::BulletinId.eq(bulletin_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Edits a bulletin's metadata: reference date, period label and type.
///
/// Line items and the import-time total are untouched — the document itself
/// is the client's and is never restated here.
pub async fn update_bulletin_metadata(
    db: &DatabaseConnection,
    bulletin_id: i64,
    reference_date: Date,
    period: String,
    bulletin_type: IndexType,
) -> Result<measurement_bulletin::Model> {
    let bulletin = MeasurementBulletin::find_by_id(bulletin_id)
        .one(db)
        .await?
        .ok_or(Error::BulletinNotFound { id: bulletin_id })?;

    let mut active_model: measurement_bulletin::ActiveModel = bulletin.into();
    active_model.reference_date = Set(reference_date);
    active_model.period = Set(period);
    active_model.bulletin_type = Set(bulletin_type);
    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a bulletin together with all of its lines.
pub async fn delete_bulletin(db: &DatabaseConnection, bulletin_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let bulletin = MeasurementBulletin::find_by_id(bulletin_id)
        .one(&txn)
        .await?
        .ok_or(Error::BulletinNotFound { id: bulletin_id })?;

    BulletinItem::delete_many()
        .filter(bulletin_item::Column::BulletinId.eq(bulletin_id))
        .exec(&txn)
        .await?;
    bulletin.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    fn line(code_sap: &str, measured_quantity: f64, unit_price: f64) -> BulletinLine {
        let measured_value = measured_quantity * unit_price;
        BulletinLine {
            code_sap: code_sap.to_string(),
            description: "Escavação de Solo 1ª Cat".to_string(),
            unit: "m3".to_string(),
            unit_price,
            planned_quantity: 50_000.0,
            accumulated_previous_qty: 1_000.0,
            measured_quantity,
            total_accumulated_qty: 1_000.0 + measured_quantity,
            accumulated_previous_value: 45_000.0,
            measured_value,
            total_accumulated_value: 45_000.0 + measured_value,
            total_contract_value: 2_250_000.0,
            balance_value: 2_205_000.0 - measured_value,
            execution_percentage: 2.0,
        }
    }

    #[tokio::test]
    async fn test_import_sums_measured_values() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;

        let bulletin = import_bulletin(
            &db,
            project.id,
            NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
            "Outubro/2023".to_string(),
            IndexType::Construtora,
            "medicao_out_2023.xlsx".to_string(),
            vec![line("C-5001", 200.0, 45.0), line("C-5002", 100.0, 65.5)],
        )
        .await?;

        assert_eq!(bulletin.total_value, 200.0 * 45.0 + 100.0 * 65.5);

        let items = get_bulletin_items(&db, bulletin.id).await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].code_sap, "C-5001");

        Ok(())
    }

    #[tokio::test]
    async fn test_import_rejects_empty_document() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;

        let result = import_bulletin(
            &db,
            project.id,
            NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
            "Outubro/2023".to_string(),
            IndexType::Construtora,
            "vazio.xlsx".to_string(),
            Vec::new(),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_metadata_edit_leaves_totals_and_lines_alone() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;

        let bulletin = import_bulletin(
            &db,
            project.id,
            NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
            "Outubro/2023".to_string(),
            IndexType::Construtora,
            "medicao.xlsx".to_string(),
            vec![line("C-5001", 200.0, 45.0)],
        )
        .await?;

        let updated = update_bulletin_metadata(
            &db,
            bulletin.id,
            NaiveDate::from_ymd_opt(2023, 11, 5).unwrap(),
            "Outubro/2023 (retificado)".to_string(),
            IndexType::Rental,
        )
        .await?;

        assert_eq!(updated.period, "Outubro/2023 (retificado)");
        assert_eq!(updated.bulletin_type, IndexType::Rental);
        assert_eq!(updated.total_value, bulletin.total_value);
        assert_eq!(get_bulletin_items(&db, bulletin.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_document_and_lines() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;

        let bulletin = import_bulletin(
            &db,
            project.id,
            NaiveDate::from_ymd_opt(2023, 10, 31).unwrap(),
            "Outubro/2023".to_string(),
            IndexType::Construtora,
            "medicao.xlsx".to_string(),
            vec![line("C-5001", 200.0, 45.0)],
        )
        .await?;

        delete_bulletin(&db, bulletin.id).await?;

        assert!(get_bulletins_for_project(&db, project.id).await?.is_empty());
        assert!(get_bulletin_items(&db, bulletin.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_bulletins_listed_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;

        for (month, label) in [(9, "Setembro/2023"), (10, "Outubro/2023")] {
            import_bulletin(
                &db,
                project.id,
                NaiveDate::from_ymd_opt(2023, month, 30).unwrap(),
                label.to_string(),
                IndexType::Construtora,
                format!("medicao_{month}.xlsx"),
                vec![line("C-5001", 10.0, 45.0)],
            )
            .await?;
        }

        let bulletins = get_bulletins_for_project(&db, project.id).await?;
        assert_eq!(bulletins.len(), 2);
        assert_eq!(bulletins[0].period, "Outubro/2023");

        Ok(())
    }
}
