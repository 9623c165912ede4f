/// Database configuration and connection management
pub mod database;

/// Geographic segment seeding from segments.toml
pub mod segments;
