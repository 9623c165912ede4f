//! RDO entity - the daily field production report header.
//!
//! One per project and execution date. Holds the day's total and the workflow
//! status; line items and occurrences live in [`super::rdo_item`] and
//! [`super::rdo_impact`].

use super::enums::RdoStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// RDO database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rdos")]
pub struct Model {
    /// Unique identifier for the report
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project the day's production belongs to
    pub project_id: i64,
    /// Execution date
    pub date: Date,
    /// Workflow status (saved reports are `APPROVED`; `DRAFT` reserved)
    pub status: RdoStatus,
    /// Sum of all item totals for the day
    pub total_daily_value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
