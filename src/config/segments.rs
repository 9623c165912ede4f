//! Geographic segment seeding from segments.toml
//!
//! Segment tables are static reference data maintained by the contract
//! administrator, not by field operators, so they ship as a TOML file and are
//! seeded into the database on startup. A project that already has segments is
//! left untouched.

use crate::entities::{ProjectSegment, project_segment};
use crate::errors::{Error, Result};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire segments.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of kilometer ranges to seed
    pub segments: Vec<SegmentConfig>,
}

/// Configuration for a single kilometer range
#[derive(Debug, Deserialize, Clone)]
pub struct SegmentConfig {
    /// Project the range belongs to
    pub project_id: i64,
    /// Inclusive start kilometer marker
    pub start_km: f64,
    /// Inclusive end kilometer marker
    pub end_km: f64,
    /// City the range runs through
    pub city: String,
    /// Name of the segment
    pub segment_name: String,
}

/// Loads segment configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read segments file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse segments.toml: {e}"),
    })
}

/// Loads segment configuration from the default location.
///
/// The path is taken from the `SEGMENTS_CONFIG` environment variable and falls
/// back to `./config/segments.toml`.
pub fn load_default_config() -> Result<Config> {
    let path =
        std::env::var("SEGMENTS_CONFIG").unwrap_or_else(|_| "config/segments.toml".to_string());
    load_config(path)
}

/// Seeds the configured kilometer ranges into the database.
///
/// Projects that already have at least one segment row are skipped, so
/// re-running the seed on every startup is harmless. Returns the number of
/// rows inserted.
pub async fn seed_segments(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut inserted = 0;

    // Decide per project BEFORE inserting anything, so a multi-segment
    // project seeds completely in one run
    let mut preexisting = HashSet::new();
    let mut checked = HashSet::new();
    for segment in &config.segments {
        if checked.insert(segment.project_id) {
            let existing = ProjectSegment::find()
                .filter(project_segment::Column::ProjectId.eq(segment.project_id))
                .count(db)
                .await?;
            if existing > 0 {
                preexisting.insert(segment.project_id);
            }
        }
    }

    for segment in &config.segments {
        if preexisting.contains(&segment.project_id) {
            continue;
        }

        let row = project_segment::ActiveModel {
            project_id: Set(segment.project_id),
            start_km: Set(segment.start_km),
            end_km: Set(segment.end_km),
            city: Set(segment.city.clone()),
            segment_name: Set(segment.segment_name.clone()),
            ..Default::default()
        };
        row.insert(db).await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!(inserted, "Seeded project segments from configuration");
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_parse_segment_config() {
        let toml_str = r#"
            [[segments]]
            project_id = 1
            start_km = 0.0
            end_km = 12.5
            city = "Botucatu"
            segment_name = "Trecho Norte"

            [[segments]]
            project_id = 1
            start_km = 12.501
            end_km = 30.0
            city = "Itatinga"
            segment_name = "Trecho Sul"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.segments.len(), 2);
        assert_eq!(config.segments[0].city, "Botucatu");
        assert_eq!(config.segments[0].end_km, 12.5);
        assert_eq!(config.segments[1].segment_name, "Trecho Sul");
    }

    #[tokio::test]
    async fn test_seed_segments_skips_existing_project() -> Result<()> {
        let db = setup_test_db().await?;

        let config = Config {
            segments: vec![
                SegmentConfig {
                    project_id: 1,
                    start_km: 0.0,
                    end_km: 10.0,
                    city: "Botucatu".to_string(),
                    segment_name: "Trecho Norte".to_string(),
                },
                SegmentConfig {
                    project_id: 1,
                    start_km: 10.001,
                    end_km: 25.0,
                    city: "Itatinga".to_string(),
                    segment_name: "Trecho Sul".to_string(),
                },
            ],
        };

        // Both ranges of the project land in one run
        let first = seed_segments(&db, &config).await?;
        assert_eq!(first, 2);

        // A second run must not duplicate the ranges
        let second = seed_segments(&db, &config).await?;
        assert_eq!(second, 0);

        let total = ProjectSegment::find().count(&db).await?;
        assert_eq!(total, 2);

        Ok(())
    }
}
