//! Equipment entity - one fleet asset (machine, truck, generator).

use super::enums::EquipmentOwner;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Equipment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Internal fleet code (e.g., "EQ-001")
    pub internal_code: String,
    /// Name / model (e.g., "Escavadeira CAT 320")
    pub name: String,
    /// Fleet category (e.g., "Linha Amarela", "Transporte")
    pub category: String,
    /// Ownership (`GRUPO_DR` or `TERCEIRO`)
    pub owner: EquipmentOwner,
    /// Company responsible for the asset
    pub responsible_company_id: i64,
}

/// Cost rows and RDO items reference equipment by plain id; deleting an asset
/// leaves them dangling on purpose
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
