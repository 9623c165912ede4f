//! Plan item entity - planned quantity for one contract index in a month.
//!
//! `total_value` is `planned_quantity` times the index price in force at the
//! moment the plan was saved — frozen at plan granularity, the same pattern
//! RDO items apply at entry granularity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plan item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plan_items")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Plan this item belongs to
    pub plan_id: i64,
    /// Contract index being planned; may outlive the index itself
    pub index_id: i64,
    /// Planned quantity for the month
    pub planned_quantity: f64,
    /// `planned_quantity * index price at save time`
    pub total_value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
