//! Shared test utilities for `ObraLedger`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::core::{equipment as equipment_core, index as index_core, segment as segment_core};
use crate::entities::{EquipmentOwner, IndexType, company, equipment, project, project_segment};
use crate::errors::Result;
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test project with sensible defaults.
pub async fn create_test_project(db: &DatabaseConnection, name: &str) -> Result<project::Model> {
    let row = project::ActiveModel {
        name: Set(name.to_string()),
        location: Set("São Paulo".to_string()),
        contract_value: Set(15_000_000.0),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Creates a test company.
pub async fn create_test_company(db: &DatabaseConnection, name: &str) -> Result<company::Model> {
    let row = company::ActiveModel {
        name: Set(name.to_string()),
        is_group_member: Set(true),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Creates a test fleet asset with its own responsible company.
///
/// # Defaults
/// * `category`: "Linha Amarela"
/// * `owner`: `GRUPO_DR`
pub async fn create_test_equipment(
    db: &DatabaseConnection,
    internal_code: &str,
    name: &str,
) -> Result<equipment::Model> {
    let owner_company = create_test_company(db, "DR Locações").await?;
    equipment_core::create_equipment(
        db,
        internal_code.to_string(),
        name.to_string(),
        "Linha Amarela".to_string(),
        EquipmentOwner::GrupoDr,
        owner_company.id,
    )
    .await
}

/// Creates a test construction contract index.
///
/// # Defaults
/// * `index_type`: `CONSTRUTORA`
/// * `start_date`: 2023-01-01
pub async fn create_test_index(
    db: &DatabaseConnection,
    project_id: i64,
    code_sap: &str,
    price: f64,
    quantity: f64,
) -> Result<crate::entities::contract_index::Model> {
    create_custom_index(db, project_id, code_sap, IndexType::Construtora, price, quantity).await
}

/// Creates a test contract index with an explicit billing type.
/// Use this when a test needs rental vs construction classification.
pub async fn create_custom_index(
    db: &DatabaseConnection,
    project_id: i64,
    code_sap: &str,
    index_type: IndexType,
    price: f64,
    quantity: f64,
) -> Result<crate::entities::contract_index::Model> {
    index_core::create_index(
        db,
        index_core::NewContractIndex {
            project_id,
            item_code: code_sap.to_string(),
            code_sap: code_sap.to_string(),
            description: format!("Serviço {code_sap}"),
            unit: "m3".to_string(),
            index_type,
            price,
            quantity,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        },
    )
    .await
}

/// Adds a kilometer range to a project's segment table.
pub async fn create_test_segment(
    db: &DatabaseConnection,
    project_id: i64,
    start_km: f64,
    end_km: f64,
    city: &str,
    segment_name: &str,
) -> Result<project_segment::Model> {
    segment_core::create_segment(
        db,
        project_id,
        start_km,
        end_km,
        city.to_string(),
        segment_name.to_string(),
    )
    .await
}
