//! Plan equipment entity - one fleet asset mobilized in a monthly baseline.
//!
//! Revenue and cost targets are operator-entered estimates, stored verbatim
//! and only ever summed for totals.

use super::enums::FleetStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plan equipment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plan_equipment")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Plan this roster entry belongs to
    pub plan_id: i64,
    /// Fleet asset planned for the month
    pub equipment_id: i64,
    /// Mobilization state for the month
    pub status: FleetStatus,
    /// Productive revenue target in reais
    pub target_productive: f64,
    /// Unproductive revenue target in reais
    pub target_unproductive: f64,
    /// Estimated operating cost in reais
    pub estimated_cost: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
