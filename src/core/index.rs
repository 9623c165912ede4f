//! Contract index registry business logic.
//!
//! A contract index is the priced, billable line of a construction contract.
//! Its current price/quantity snapshot changes through exactly one path,
//! [`revise_index`], which appends an immutable revision record and updates the
//! snapshot in the same database transaction. Daily production items copy the
//! price at entry time (see `core::rdo`), so nothing here ever rewrites a
//! historical report.

use crate::entities::{ContractIndex, IndexRevision, IndexType, contract_index, index_revision};
use crate::errors::{Error, Result};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Field set for creating a contract index.
#[derive(Debug, Clone)]
pub struct NewContractIndex {
    /// Project the index belongs to
    pub project_id: i64,
    /// Logical item code grouping Rental/Construction twin entries
    pub item_code: String,
    /// SAP billing code
    pub code_sap: String,
    /// Description of the contracted service
    pub description: String,
    /// Unit of measure
    pub unit: String,
    /// Billing type
    pub index_type: IndexType,
    /// Initial unit price
    pub price: f64,
    /// Initial contracted quantity
    pub quantity: f64,
    /// Contractual start date, recorded as the first revision date
    pub start_date: Date,
}

/// Retrieves all contract indices of a project, ordered by SAP code.
pub async fn get_indices_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<contract_index::Model>> {
    ContractIndex::find()
        .filter(contract_index::Column::ProjectId.eq(project_id))
        .order_by_asc(contract_index::Column::CodeSap)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a contract index by its unique ID.
pub async fn get_index_by_id(
    db: &DatabaseConnection,
    index_id: i64,
) -> Result<Option<contract_index::Model>> {
    ContractIndex::find_by_id(index_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new contract index at revision zero.
///
/// Validates the billing code and description are non-empty and that price and
/// quantity are finite and non-negative. `total_value` starts consistent with
/// `price * quantity`.
pub async fn create_index(
    db: &DatabaseConnection,
    new: NewContractIndex,
) -> Result<contract_index::Model> {
    if new.code_sap.trim().is_empty() || new.description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Contract index needs a billing code and a description".to_string(),
        });
    }
    if !new.price.is_finite() || new.price < 0.0 {
        return Err(Error::InvalidAmount { amount: new.price });
    }
    if !new.quantity.is_finite() || new.quantity < 0.0 {
        return Err(Error::InvalidAmount { amount: new.quantity });
    }

    let index = contract_index::ActiveModel {
        project_id: Set(new.project_id),
        item_code: Set(new.item_code.trim().to_string()),
        code_sap: Set(new.code_sap.trim().to_string()),
        description: Set(new.description.trim().to_string()),
        unit: Set(new.unit),
        index_type: Set(new.index_type),
        current_price: Set(new.price),
        total_quantity: Set(new.quantity),
        total_value: Set(new.price * new.quantity),
        revision: Set(0),
        last_revision_date: Set(new.start_date),
        ..Default::default()
    };

    let result = index.insert(db).await?;
    Ok(result)
}

/// Updates the description of a contract index.
///
/// This is the only direct edit allowed outside the revision flow; pricing
/// fields are untouched.
pub async fn update_index_description(
    db: &DatabaseConnection,
    index_id: i64,
    description: String,
) -> Result<contract_index::Model> {
    if description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Description cannot be empty".to_string(),
        });
    }

    let index = ContractIndex::find_by_id(index_id)
        .one(db)
        .await?
        .ok_or(Error::IndexNotFound { id: index_id })?;

    let mut active_model: contract_index::ActiveModel = index.into();
    active_model.description = Set(description.trim().to_string());
    active_model.update(db).await.map_err(Into::into)
}

/// Applies a price/quantity revision to a contract index.
///
/// Appends an immutable [`index_revision`] record, then updates the parent's
/// current snapshot (`current_price`, `total_quantity`, `total_value =
/// price * quantity`), increments the revision counter and stamps
/// `last_revision_date` — all in one database transaction. This is the ONLY
/// path that changes current pricing.
///
/// Revisions apply in call order: a backdated `effective_date` is accepted and
/// only affects the display sort of the history, never which revision "wins".
/// Previously frozen RDO item prices are not touched.
pub async fn revise_index(
    db: &DatabaseConnection,
    index_id: i64,
    new_price: f64,
    new_quantity: f64,
    effective_date: Date,
    reason: String,
) -> Result<contract_index::Model> {
    if !new_price.is_finite() || new_price < 0.0 {
        return Err(Error::InvalidAmount { amount: new_price });
    }
    if !new_quantity.is_finite() || new_quantity < 0.0 {
        return Err(Error::InvalidAmount { amount: new_quantity });
    }

    let txn = db.begin().await?;

    let index = ContractIndex::find_by_id(index_id)
        .one(&txn)
        .await?
        .ok_or(Error::IndexNotFound { id: index_id })?;

    let revision_record = index_revision::ActiveModel {
        index_id: Set(index_id),
        price: Set(new_price),
        quantity: Set(new_quantity),
        effective_date: Set(effective_date),
        reason: Set(reason),
        ..Default::default()
    };
    revision_record.insert(&txn).await?;

    let next_revision = index.revision + 1;
    let mut active_model: contract_index::ActiveModel = index.into();
    active_model.current_price = Set(new_price);
    active_model.total_quantity = Set(new_quantity);
    active_model.total_value = Set(new_price * new_quantity);
    active_model.revision = Set(next_revision);
    active_model.last_revision_date = Set(effective_date);
    let updated = active_model.update(&txn).await?;

    txn.commit().await?;

    info!(
        index_id,
        revision = updated.revision,
        price = updated.current_price,
        "Applied contract index revision"
    );

    Ok(updated)
}

/// Retrieves the revision history of an index, newest effective date first.
pub async fn get_revisions_for_index(
    db: &DatabaseConnection,
    index_id: i64,
) -> Result<Vec<index_revision::Model>> {
    IndexRevision::find()
        .filter(index_revision::Column::IndexId.eq(index_id))
        .order_by_desc(index_revision::Column::EffectiveDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a contract index together with its revision history.
///
/// Historical RDO items and plan items that reference the index by id are left
/// in place with their frozen values; display and aggregation code must treat
/// the failed lookup as unknown.
pub async fn delete_index(db: &DatabaseConnection, index_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let index = ContractIndex::find_by_id(index_id)
        .one(&txn)
        .await?
        .ok_or(Error::IndexNotFound { id: index_id })?;

    IndexRevision::delete_many()
        .filter(index_revision::Column::IndexId.eq(index_id))
        .exec(&txn)
        .await?;
    index.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
