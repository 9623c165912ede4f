//! Project entity - one construction contract (obra) being tracked.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Unique identifier for the project
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Contract/site name (e.g., "Obra Rodovia SP-300")
    pub name: String,
    /// Geographic location of the site
    pub location: String,
    /// Total contracted value in reais
    pub contract_value: f64,
}

/// Cross-entity references are plain id columns; no foreign keys are declared
/// because deletes never cascade and historical rows may outlive their targets
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
