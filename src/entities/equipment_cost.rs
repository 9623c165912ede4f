//! Equipment cost entity - one dated expense against a fleet asset.
//!
//! The cost ledger carries no project column: expenses belong to the asset,
//! not to a contract. Analytics month-filters these rows globally.

use super::enums::CostType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Equipment cost database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment_costs")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Asset the expense was incurred for; may outlive the asset itself
    pub equipment_id: i64,
    /// Expense category
    pub cost_type: CostType,
    /// Expense amount in reais
    pub value: f64,
    /// Date the expense was incurred
    pub date: Date,
    /// Free-text details of the service or charge
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
