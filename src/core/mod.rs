//! Core business logic - framework-agnostic contract, production, planning and
//! analytics operations. All store-touching functions are async, take a
//! `DatabaseConnection`, and return this crate's `Result`.

/// Planned-vs-real monthly analytics aggregation
pub mod analytics;
/// Measurement bulletin store (client's official measurement documents)
pub mod bulletin;
/// Project-level dashboard metrics
pub mod dashboard;
/// Fleet assets and the equipment cost ledger
pub mod equipment;
/// Contract index registry and the price revision flow
pub mod index;
/// Monthly planning baselines with carry-forward
pub mod planning;
/// Daily production ledger (RDO) and the price-freeze rule
pub mod rdo;
/// Daily production summaries and display formatting
pub mod report;
/// Kilometer-marker to city/segment resolution
pub mod segment;
