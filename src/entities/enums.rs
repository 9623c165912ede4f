//! Shared string-valued active enums used across entities.
//!
//! Stored values match the contract-administration vocabulary used on site
//! (`RENTAL`/`CONSTRUTORA`, `GRUPO_DR`/`TERCEIRO`, `PRODUTIVO`/`IMPRODUTIVO`, ...)
//! so exported data stays readable to the back office.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Billing type of a contract index
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum IndexType {
    /// Equipment rental line
    #[sea_orm(string_value = "RENTAL")]
    Rental,
    /// Construction services line
    #[sea_orm(string_value = "CONSTRUTORA")]
    Construtora,
}

/// Ownership of a fleet asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EquipmentOwner {
    /// Owned by the group
    #[sea_orm(string_value = "GRUPO_DR")]
    GrupoDr,
    /// Third-party asset
    #[sea_orm(string_value = "TERCEIRO")]
    Terceiro,
}

/// Category of an equipment expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CostType {
    /// Maintenance
    #[sea_orm(string_value = "MANUTENCAO")]
    Manutencao,
    /// Insurance
    #[sea_orm(string_value = "SEGURO")]
    Seguro,
    /// Vehicle tax
    #[sea_orm(string_value = "IPVA")]
    Ipva,
    /// External rental of the asset
    #[sea_orm(string_value = "LOCACAO_EXTERNA")]
    LocacaoExterna,
}

/// Workflow state of a daily production report.
///
/// Reports are currently saved directly as `APPROVED`; `DRAFT` is reserved for
/// a future approval gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RdoStatus {
    /// Being edited, not yet official
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    /// Official record of the day
    #[sea_orm(string_value = "APPROVED")]
    Approved,
}

/// Whether a production line counts as productive or unproductive time
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MeasurementType {
    /// Productive measurement
    #[sea_orm(string_value = "PRODUTIVO")]
    Produtivo,
    /// Unproductive measurement (standby, idle hours)
    #[sea_orm(string_value = "IMPRODUTIVO")]
    Improdutivo,
}

/// Kind of occurrence recorded against a daily report
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ImpactType {
    /// Weather
    #[sea_orm(string_value = "CLIMA")]
    Clima,
    /// Equipment breakdown
    #[sea_orm(string_value = "QUEBRA")]
    Quebra,
    /// Material shortage
    #[sea_orm(string_value = "FALTA_MATERIAL")]
    FaltaMaterial,
    /// Third-party interference
    #[sea_orm(string_value = "INTERFERENCIA")]
    Interferencia,
    /// Anything else
    #[sea_orm(string_value = "OUTRO")]
    Outro,
}

/// Mobilization state of a planned fleet asset for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum FleetStatus {
    /// Active on site
    #[sea_orm(string_value = "ATIVO")]
    Ativo,
    /// Being mobilized into the site
    #[sea_orm(string_value = "MOBILIZACAO")]
    Mobilizacao,
    /// Being demobilized out of the site
    #[sea_orm(string_value = "DESMOBILIZACAO")]
    Desmobilizacao,
}
