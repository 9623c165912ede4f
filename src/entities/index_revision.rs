//! Index revision entity - one dated change to a contract index's price/quantity.
//!
//! Append-only history. Creating a revision always updates the parent index's
//! current snapshot and increments its revision counter (see `core::index`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Index revision database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "index_revisions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Contract index this revision belongs to
    pub index_id: i64,
    /// Unit price introduced by this revision
    pub price: f64,
    /// Contracted quantity introduced by this revision
    pub quantity: f64,
    /// Date the revision takes contractual effect (display ordering only)
    pub effective_date: Date,
    /// Justification recorded by the contract administrator
    pub reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
