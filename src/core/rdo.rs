//! Daily production ledger (RDO) business logic.
//!
//! A report is assembled in memory as a draft and persisted atomically. The
//! price-immutability rule lives here: [`price_item_from_index`] copies the
//! contract index's current price into the draft line exactly once, at the
//! moment the index is selected, and the save path writes whatever the draft
//! holds — it never re-reads a price. A later index revision therefore cannot
//! alter any saved report.

use crate::core::segment;
use crate::entities::{
    ContractIndex, ImpactType, MeasurementType, Rdo, RdoImpact, RdoItem, RdoStatus, rdo,
    rdo_impact, rdo_item,
};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// One production line being assembled for a daily report.
///
/// The value object that captures "price at time T": `frozen_price` is filled
/// by [`price_item_from_index`] and carried verbatim into the database.
#[derive(Debug, Clone)]
pub struct RdoItemDraft {
    /// Selected contract index, if any yet
    pub index_id: Option<i64>,
    /// Optional equipment the production is attributed to
    pub equipment_id: Option<i64>,
    /// Optional kilometer marker
    pub km: Option<f64>,
    /// City denormalized from `km`
    pub city: Option<String>,
    /// Segment name denormalized from `km`
    pub segment: Option<String>,
    /// Productive or unproductive measurement
    pub measurement_type: MeasurementType,
    /// Measured quantity
    pub quantity: f64,
    /// Unit price frozen at index selection; 0.0 until an index is selected
    pub frozen_price: f64,
    /// `quantity * frozen_price`
    pub total_value: f64,
    /// Optional field note
    pub observation: Option<String>,
}

impl RdoItemDraft {
    /// An empty line: no index selected, zero quantity, zero frozen price.
    #[must_use]
    pub fn shell() -> Self {
        Self {
            index_id: None,
            equipment_id: None,
            km: None,
            city: None,
            segment: None,
            measurement_type: MeasurementType::Produtivo,
            quantity: 0.0,
            frozen_price: 0.0,
            total_value: 0.0,
            observation: None,
        }
    }
}

/// An occurrence (weather, breakdown, ...) recorded on a draft report.
#[derive(Debug, Clone)]
pub struct RdoImpactDraft {
    /// Kind of occurrence
    pub impact_type: ImpactType,
    /// Free-text description
    pub description: String,
    /// Duration in hours
    pub duration_hours: f64,
}

/// A daily report being assembled before it is persisted.
#[derive(Debug, Clone)]
pub struct RdoDraft {
    /// Project the day's production belongs to
    pub project_id: i64,
    /// Execution date
    pub date: Date,
    /// Workflow status; reports are currently saved directly as `APPROVED`
    pub status: RdoStatus,
    /// Production lines
    pub items: Vec<RdoItemDraft>,
    /// Occurrences of the day
    pub impacts: Vec<RdoImpactDraft>,
}

impl RdoDraft {
    /// Starts an empty report for a project and date.
    #[must_use]
    pub fn new(project_id: i64, date: Date) -> Self {
        Self {
            project_id,
            date,
            status: RdoStatus::Approved,
            items: Vec::new(),
            impacts: Vec::new(),
        }
    }

    /// Appends an empty production line and returns it for editing.
    pub fn add_item(&mut self) -> &mut RdoItemDraft {
        self.items.push(RdoItemDraft::shell());
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Removes the production line at `position`, ignoring an out-of-range index.
    pub fn remove_item(&mut self, position: usize) {
        if position < self.items.len() {
            self.items.remove(position);
        }
    }

    /// Records an occurrence on the report.
    pub fn add_impact(&mut self, impact_type: ImpactType, description: String, duration_hours: f64) {
        self.impacts.push(RdoImpactDraft {
            impact_type,
            description,
            duration_hours,
        });
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total_daily_value(&self) -> f64 {
        self.items.iter().map(|item| item.total_value).sum()
    }
}

/// Selects a contract index for a draft line, freezing its price.
///
/// This is the freeze point: the index's `current_price` is copied into the
/// line here and never read again for this line. Re-selecting an index on the
/// same line re-freezes at whatever the price is at that later instant.
pub async fn price_item_from_index(
    db: &DatabaseConnection,
    item: &mut RdoItemDraft,
    index_id: i64,
) -> Result<()> {
    let index = ContractIndex::find_by_id(index_id)
        .one(db)
        .await?
        .ok_or(Error::IndexNotFound { id: index_id })?;

    item.index_id = Some(index.id);
    item.frozen_price = index.current_price;
    item.total_value = item.quantity * item.frozen_price;
    Ok(())
}

/// Updates a draft line's quantity, recomputing the total from the price
/// already frozen on the line. The price itself is never touched here.
pub fn set_item_quantity(item: &mut RdoItemDraft, quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(Error::InvalidAmount { amount: quantity });
    }

    item.quantity = quantity;
    item.total_value = quantity * item.frozen_price;
    Ok(())
}

/// Stamps a kilometer marker on a draft line, denormalizing the resolved
/// city/segment onto it. Saved lines keep whatever was resolved at entry time
/// even if the segment table changes later.
pub async fn set_item_km(
    db: &DatabaseConnection,
    project_id: i64,
    item: &mut RdoItemDraft,
    km: f64,
) -> Result<()> {
    let location = segment::resolve_segment(db, project_id, km).await?;
    item.km = Some(km);
    item.city = Some(location.city);
    item.segment = Some(location.segment);
    Ok(())
}

fn validate_draft(draft: &RdoDraft) -> Result<()> {
    if draft.project_id <= 0 {
        return Err(Error::Validation {
            message: "No project selected for the report".to_string(),
        });
    }
    if draft.items.is_empty() {
        return Err(Error::Validation {
            message: "A report needs at least one production line".to_string(),
        });
    }
    for item in &draft.items {
        if item.index_id.is_none() {
            return Err(Error::Validation {
                message: "Every production line must reference a contract index".to_string(),
            });
        }
        if !item.quantity.is_finite() || item.quantity < 0.0 {
            return Err(Error::InvalidAmount {
                amount: item.quantity,
            });
        }
    }
    Ok(())
}

async fn insert_lines<C>(db: &C, rdo_id: i64, draft: &RdoDraft) -> Result<()>
where
    C: ConnectionTrait,
{
    for item in &draft.items {
        let index_id = item.index_id.ok_or_else(|| Error::Validation {
            message: "Every production line must reference a contract index".to_string(),
        })?;

        let line = rdo_item::ActiveModel {
            rdo_id: Set(rdo_id),
            index_id: Set(index_id),
            equipment_id: Set(item.equipment_id),
            km: Set(item.km),
            city: Set(item.city.clone()),
            segment: Set(item.segment.clone()),
            measurement_type: Set(item.measurement_type),
            quantity: Set(item.quantity),
            frozen_price: Set(item.frozen_price),
            total_value: Set(item.total_value),
            observation: Set(item.observation.clone()),
            ..Default::default()
        };
        line.insert(db).await?;
    }

    for impact in &draft.impacts {
        let row = rdo_impact::ActiveModel {
            rdo_id: Set(rdo_id),
            impact_type: Set(impact.impact_type),
            description: Set(impact.description.clone()),
            duration_hours: Set(impact.duration_hours),
            ..Default::default()
        };
        row.insert(db).await?;
    }

    Ok(())
}

/// Persists a draft report as a new RDO.
///
/// Rejects drafts with no project, no lines, or lines without a selected
/// index. Lines are written verbatim — frozen prices are NOT recomputed on
/// save, which is the core financial-integrity guarantee of the ledger.
pub async fn save_rdo(db: &DatabaseConnection, draft: &RdoDraft) -> Result<rdo::Model> {
    validate_draft(draft)?;

    let txn = db.begin().await?;

    let header = rdo::ActiveModel {
        project_id: Set(draft.project_id),
        date: Set(draft.date),
        status: Set(draft.status),
        total_daily_value: Set(draft.total_daily_value()),
        ..Default::default()
    };
    let header = header.insert(&txn).await?;

    insert_lines(&txn, header.id, draft).await?;

    txn.commit().await?;

    info!(
        rdo_id = header.id,
        project_id = header.project_id,
        items = draft.items.len(),
        total = header.total_daily_value,
        "Saved daily production report"
    );

    Ok(header)
}

/// Replaces an existing RDO's header, lines and occurrences with the draft's.
///
/// Same validations as [`save_rdo`]; the draft's frozen prices are again
/// written verbatim.
pub async fn update_rdo(db: &DatabaseConnection, rdo_id: i64, draft: &RdoDraft) -> Result<rdo::Model> {
    validate_draft(draft)?;

    let txn = db.begin().await?;

    let existing = Rdo::find_by_id(rdo_id)
        .one(&txn)
        .await?
        .ok_or(Error::RdoNotFound { id: rdo_id })?;

    let mut active_model: rdo::ActiveModel = existing.into();
    active_model.project_id = Set(draft.project_id);
    active_model.date = Set(draft.date);
    active_model.status = Set(draft.status);
    active_model.total_daily_value = Set(draft.total_daily_value());
    let header = active_model.update(&txn).await?;

    RdoItem::delete_many()
        .filter(rdo_item::Column::RdoId.eq(rdo_id))
        .exec(&txn)
        .await?;
    RdoImpact::delete_many()
        .filter(rdo_impact::Column::RdoId.eq(rdo_id))
        .exec(&txn)
        .await?;
    insert_lines(&txn, rdo_id, draft).await?;

    txn.commit().await?;

    Ok(header)
}

/// Deletes an RDO together with its lines and occurrences.
pub async fn delete_rdo(db: &DatabaseConnection, rdo_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Rdo::find_by_id(rdo_id)
        .one(&txn)
        .await?
        .ok_or(Error::RdoNotFound { id: rdo_id })?;

    RdoItem::delete_many()
        .filter(rdo_item::Column::RdoId.eq(rdo_id))
        .exec(&txn)
        .await?;
    RdoImpact::delete_many()
        .filter(rdo_impact::Column::RdoId.eq(rdo_id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Retrieves a project's reports, newest execution date first.
pub async fn get_rdos_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<rdo::Model>> {
    Rdo::find()
        .filter(rdo::Column::ProjectId.eq(project_id))
        .order_by_desc(rdo::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every report across all projects, newest first.
pub async fn get_all_rdos(db: &DatabaseConnection) -> Result<Vec<rdo::Model>> {
    Rdo::find()
        .order_by_desc(rdo::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the production lines of one report.
pub async fn get_items_for_rdo(
    db: &DatabaseConnection,
    rdo_id: i64,
) -> Result<Vec<rdo_item::Model>> {
    RdoItem::find()
        .filter(rdo_item::Column::RdoId.eq(rdo_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// A persisted report with its lines and occurrences.
#[derive(Debug, Clone)]
pub struct RdoDetail {
    /// Report header
    pub rdo: rdo::Model,
    /// Production lines
    pub items: Vec<rdo_item::Model>,
    /// Recorded occurrences
    pub impacts: Vec<rdo_impact::Model>,
}

/// Loads a report with all of its lines and occurrences, or `None` when the
/// id is unknown. Lines referencing deleted indices/equipment load normally —
/// they carry their own frozen values.
pub async fn get_rdo_detail(db: &DatabaseConnection, rdo_id: i64) -> Result<Option<RdoDetail>> {
    let Some(header) = Rdo::find_by_id(rdo_id).one(db).await? else {
        return Ok(None);
    };

    let items = get_items_for_rdo(db, rdo_id).await?;
    let impacts = RdoImpact::find()
        .filter(rdo_impact::Column::RdoId.eq(rdo_id))
        .all(db)
        .await?;

    Ok(Some(RdoDetail {
        rdo: header,
        items,
        impacts,
    }))
}
