//! RDO item entity - one production line of a daily report.
//!
//! This is the immutable financial fact of the system. `frozen_price` is the
//! contract index's unit price copied at the moment the index was selected for
//! the line; later index revisions never touch it, and no code path re-reads a
//! price into a saved item. `city`/`segment` are denormalized from the
//! kilometer marker at entry time and are likewise never re-resolved.

use super::enums::MeasurementType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// RDO item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rdo_items")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Report this line belongs to
    pub rdo_id: i64,
    /// Contract index billed by this line; may outlive the index itself
    pub index_id: i64,
    /// Optional equipment the production is attributed to
    pub equipment_id: Option<i64>,
    /// Optional kilometer marker where the work happened
    pub km: Option<f64>,
    /// City resolved from `km` at entry time
    pub city: Option<String>,
    /// Segment name resolved from `km` at entry time
    pub segment: Option<String>,
    /// Productive or unproductive measurement
    pub measurement_type: MeasurementType,
    /// Measured quantity in the index's unit
    pub quantity: f64,
    /// Unit price frozen when the index was selected; never updated afterwards
    pub frozen_price: f64,
    /// `quantity * frozen_price`
    pub total_value: f64,
    /// Optional field note
    pub observation: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
