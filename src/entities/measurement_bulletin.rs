//! Measurement bulletin entity - the client's official measurement document.
//!
//! One row per import event; the parsed line items live in
//! [`super::bulletin_item`]. Append-only reference data: metadata
//! (date/period/type) is editable, `total_value` is computed once at import.

use super::enums::IndexType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Measurement bulletin database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measurement_bulletins")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project the measurement covers
    pub project_id: i64,
    /// Reference date of the measurement period
    pub reference_date: Date,
    /// Free-text period label (e.g., "Outubro/2023")
    pub period: String,
    /// Whether the document measures rental or construction lines
    pub bulletin_type: IndexType,
    /// Name of the uploaded spreadsheet file
    pub file_name: String,
    /// Sum of the imported measured values, computed at import time
    pub total_value: f64,
    /// When the document was imported
    pub uploaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
