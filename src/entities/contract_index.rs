//! Contract index entity - one billable unit-price line of a construction contract.
//!
//! `item_code` groups Rental/Construction twin entries under one logical item;
//! `code_sap` is the billing code. The current price/quantity snapshot changes
//! only through the revision flow in `core::index` (plus description-only edits);
//! every change is retained as an [`super::index_revision`] row.

use super::enums::IndexType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract index database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contract_indices")]
pub struct Model {
    /// Unique identifier for the contract index
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project this index belongs to
    pub project_id: i64,
    /// Logical item code grouping Rental/Construction twin entries
    pub item_code: String,
    /// SAP billing code
    pub code_sap: String,
    /// Description of the contracted service
    pub description: String,
    /// Unit of measure (e.g., "m3", "H")
    pub unit: String,
    /// Billing type (`RENTAL` or `CONSTRUTORA`)
    pub index_type: IndexType,
    /// Unit price currently in force
    pub current_price: f64,
    /// Contracted quantity currently in force
    pub total_quantity: f64,
    /// `current_price * total_quantity`, kept consistent by the revision flow
    pub total_value: f64,
    /// Monotonically incrementing revision counter
    pub revision: i32,
    /// Effective date of the most recent revision
    pub last_revision_date: Date,
}

/// RDO items and plan items reference this entity by plain id; deleting an
/// index leaves them in place with their frozen values
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
