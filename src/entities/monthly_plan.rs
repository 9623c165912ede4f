//! Monthly plan entity - the production/fleet baseline for one month.
//!
//! Business key is (project, month, year); `core::planning::save_plan` keeps
//! it unique by replacing in place. `total_value` is the sum of the plan's
//! item totals, priced at save time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_plans")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project the baseline belongs to
    pub project_id: i64,
    /// Reference month (1-12)
    pub month: i32,
    /// Reference year
    pub year: i32,
    /// Sum of planned item values, frozen at save time
    pub total_value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
