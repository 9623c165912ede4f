//! RDO impact entity - an occurrence recorded against a daily report.

use super::enums::ImpactType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// RDO impact database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rdo_impacts")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Report the occurrence was recorded on
    pub rdo_id: i64,
    /// Kind of occurrence (weather, breakdown, material shortage, ...)
    pub impact_type: ImpactType,
    /// Free-text description
    pub description: String,
    /// Duration of the impact in hours
    pub duration_hours: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
