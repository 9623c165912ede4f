//! Unified error types and result handling for `ObraLedger`.
//!
//! All core operations return [`Result`] with this crate's [`Error`] enum.
//! Validation rejections are guarded no-ops for the caller to re-render;
//! dangling references (an RDO item pointing at a deleted contract index, a
//! cost row pointing at a deleted equipment) are never errors — aggregation
//! code treats the failed lookup as unknown/zero.

use thiserror::Error;

/// Unified error type for all `ObraLedger` operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required precondition on operation input was not met
    #[error("Validation failed: {message}")]
    Validation {
        /// The unmet precondition
        message: String,
    },

    /// A monetary amount or quantity was zero where forbidden, negative, or non-finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// Project lookup by id failed for an operation that requires it
    #[error("Project not found: {id}")]
    ProjectNotFound {
        /// The missing project id
        id: i64,
    },

    /// Contract index lookup by id failed for an operation that requires it
    #[error("Contract index not found: {id}")]
    IndexNotFound {
        /// The missing index id
        id: i64,
    },

    /// Equipment lookup by id failed for an operation that requires it
    #[error("Equipment not found: {id}")]
    EquipmentNotFound {
        /// The missing equipment id
        id: i64,
    },

    /// Equipment cost lookup by id failed
    #[error("Equipment cost not found: {id}")]
    CostNotFound {
        /// The missing cost id
        id: i64,
    },

    /// RDO lookup by id failed
    #[error("RDO not found: {id}")]
    RdoNotFound {
        /// The missing RDO id
        id: i64,
    },

    /// Measurement bulletin lookup by id failed
    #[error("Measurement bulletin not found: {id}")]
    BulletinNotFound {
        /// The missing bulletin id
        id: i64,
    },

    /// Database error from the `SeaORM` layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
