//! Bulletin item entity - one structured line of an imported measurement bulletin.
//!
//! Lines arrive already parsed from the spreadsheet importer; the core stores
//! them verbatim and never edits them individually.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bulletin item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bulletin_items")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Bulletin this line belongs to
    pub bulletin_id: i64,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
