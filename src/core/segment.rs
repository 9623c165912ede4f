//! Kilometer-marker to city/segment resolution.
//!
//! A project's geography is subdivided into named kilometer ranges (trechos).
//! Resolution is a pure first-match scan over the ranges ordered by start
//! kilometer; markers outside every range resolve to the `"N/A"` sentinel.

use crate::entities::{ProjectSegment, project_segment};
use crate::errors::{Error, Result};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Sentinel used when a kilometer marker matches no configured range.
pub const UNMATCHED: &str = "N/A";

/// City/segment pair resolved from a kilometer marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentLocation {
    /// City the marker falls in
    pub city: String,
    /// Name of the segment the marker falls in
    pub segment: String,
}

impl SegmentLocation {
    /// The sentinel pair returned for unmatched or unusable markers.
    #[must_use]
    pub fn unmatched() -> Self {
        Self {
            city: UNMATCHED.to_string(),
            segment: UNMATCHED.to_string(),
        }
    }

    /// True when this location is the sentinel.
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        self.city == UNMATCHED && self.segment == UNMATCHED
    }
}

/// Resolves a kilometer marker against an ordered range table.
///
/// Pure function: the first range with `start_km <= km <= end_km` wins, so
/// single-point ranges (`start_km == end_km`) match exactly their marker.
/// Non-finite markers resolve to the sentinel.
#[must_use]
pub fn locate_km(segments: &[project_segment::Model], km: f64) -> SegmentLocation {
    if !km.is_finite() {
        return SegmentLocation::unmatched();
    }

    segments
        .iter()
        .find(|s| km >= s.start_km && km <= s.end_km)
        .map_or_else(SegmentLocation::unmatched, |s| SegmentLocation {
            city: s.city.clone(),
            segment: s.segment_name.clone(),
        })
}

/// Retrieves a project's kilometer ranges ordered by start kilometer.
pub async fn get_segments_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<project_segment::Model>> {
    ProjectSegment::find()
        .filter(project_segment::Column::ProjectId.eq(project_id))
        .order_by_asc(project_segment::Column::StartKm)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Resolves a kilometer marker to its city/segment for a project.
pub async fn resolve_segment(
    db: &DatabaseConnection,
    project_id: i64,
    km: f64,
) -> Result<SegmentLocation> {
    let segments = get_segments_for_project(db, project_id).await?;
    Ok(locate_km(&segments, km))
}

/// Adds a kilometer range to a project's segment table.
pub async fn create_segment(
    db: &DatabaseConnection,
    project_id: i64,
    start_km: f64,
    end_km: f64,
    city: String,
    segment_name: String,
) -> Result<project_segment::Model> {
    if !start_km.is_finite() || !end_km.is_finite() || start_km > end_km {
        return Err(Error::Validation {
            message: format!("Invalid kilometer range: {start_km} - {end_km}"),
        });
    }

    let segment = project_segment::ActiveModel {
        project_id: Set(project_id),
        start_km: Set(start_km),
        end_km: Set(end_km),
        city: Set(city),
        segment_name: Set(segment_name),
        ..Default::default()
    };

    let result = segment.insert(db).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn range(start_km: f64, end_km: f64, city: &str, name: &str) -> project_segment::Model {
        project_segment::Model {
            id: 0,
            project_id: 1,
            start_km,
            end_km,
            city: city.to_string(),
            segment_name: name.to_string(),
        }
    }

    #[test]
    fn test_locate_km_is_deterministic() {
        let segments = vec![
            range(0.0, 12.5, "Botucatu", "Trecho Norte"),
            range(12.501, 30.0, "Itatinga", "Trecho Sul"),
        ];

        let first = locate_km(&segments, 7.345);
        let second = locate_km(&segments, 7.345);
        assert_eq!(first, second);
        assert_eq!(first.city, "Botucatu");
        assert_eq!(first.segment, "Trecho Norte");
    }

    #[test]
    fn test_locate_km_boundaries_are_inclusive() {
        let segments = vec![
            range(0.0, 12.5, "Botucatu", "Trecho Norte"),
            range(12.501, 30.0, "Itatinga", "Trecho Sul"),
        ];

        assert_eq!(locate_km(&segments, 0.0).segment, "Trecho Norte");
        assert_eq!(locate_km(&segments, 12.5).segment, "Trecho Norte");
        assert_eq!(locate_km(&segments, 12.501).segment, "Trecho Sul");
        assert_eq!(locate_km(&segments, 30.0).segment, "Trecho Sul");
    }

    #[test]
    fn test_locate_km_outside_ranges_yields_sentinel() {
        let segments = vec![range(5.0, 10.0, "Botucatu", "Trecho Norte")];

        assert!(locate_km(&segments, 4.999).is_unmatched());
        assert!(locate_km(&segments, 10.001).is_unmatched());
        assert!(locate_km(&[], 7.0).is_unmatched());
    }

    #[test]
    fn test_locate_km_single_point_range() {
        let segments = vec![range(18.2, 18.2, "Pardinho", "Ponte Rio Claro")];

        assert_eq!(locate_km(&segments, 18.2).city, "Pardinho");
        assert!(locate_km(&segments, 18.199).is_unmatched());
        assert!(locate_km(&segments, 18.201).is_unmatched());
    }

    #[test]
    fn test_locate_km_first_match_wins() {
        // Overlap is not expected, but if it happens the earlier range wins
        let segments = vec![
            range(0.0, 20.0, "Botucatu", "Trecho Norte"),
            range(10.0, 30.0, "Itatinga", "Trecho Sul"),
        ];

        assert_eq!(locate_km(&segments, 15.0).segment, "Trecho Norte");
    }

    #[test]
    fn test_locate_km_non_finite_marker() {
        let segments = vec![range(0.0, 10.0, "Botucatu", "Trecho Norte")];

        assert!(locate_km(&segments, f64::NAN).is_unmatched());
        assert!(locate_km(&segments, f64::INFINITY).is_unmatched());
    }

    #[tokio::test]
    async fn test_resolve_segment_reads_project_table() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra Rodovia SP-300").await?;
        create_test_segment(&db, project.id, 0.0, 12.5, "Botucatu", "Trecho Norte").await?;
        create_test_segment(&db, project.id, 12.501, 30.0, "Itatinga", "Trecho Sul").await?;

        let location = resolve_segment(&db, project.id, 14.75).await?;
        assert_eq!(location.city, "Itatinga");

        // Another project sees only its own (empty) table
        let other = create_test_project(&db, "Ampliação Galpão Industrial").await?;
        let location = resolve_segment(&db, other.id, 14.75).await?;
        assert!(location.is_unmatched());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_segment_rejects_inverted_range() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Obra").await?;

        let result = create_segment(
            &db,
            project.id,
            10.0,
            5.0,
            "Botucatu".to_string(),
            "Trecho Norte".to_string(),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }
}
