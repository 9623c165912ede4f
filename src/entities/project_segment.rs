//! Project segment entity - a named kilometer range (trecho) of a project.
//!
//! Static reference data used to attribute production to a location. Ranges
//! are expected non-overlapping and are queried ordered by `start_km`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project segment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_segments")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project whose geography this range subdivides
    pub project_id: i64,
    /// Inclusive start kilometer marker
    pub start_km: f64,
    /// Inclusive end kilometer marker (may equal `start_km` for a point)
    pub end_km: f64,
    /// City the range runs through
    pub city: String,
    /// Name of the segment (e.g., "Trecho Norte")
    pub segment_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
