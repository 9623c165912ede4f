//! Daily production summaries and display formatting.
//!
//! This module provides the per-day summary view used by site engineers:
//! production lines grouped by segment, then by (equipment, city) within the
//! segment, with productive and unproductive totals. All functions are pure
//! and return structured data for the presentation layer to render.

use crate::core::segment::UNMATCHED;
use crate::entities::{MeasurementType, rdo_item};
use std::collections::BTreeMap;

/// Production attributed to one (equipment, city) pair within a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentProductionLine {
    /// Equipment the production was attributed to, if any
    pub equipment_id: Option<i64>,
    /// City the production happened in
    pub city: String,
    /// Sum of productive line totals
    pub productive_value: f64,
    /// Sum of unproductive line totals
    pub unproductive_value: f64,
}

/// One segment's share of a day's production.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentProductionSummary {
    /// Segment name, or the `"N/A"` sentinel for unlocated lines
    pub segment: String,
    /// Per-(equipment, city) breakdown
    pub lines: Vec<EquipmentProductionLine>,
    /// Segment total of productive values
    pub productive_total: f64,
    /// Segment total of unproductive values
    pub unproductive_total: f64,
}

/// Groups a report's lines by segment, then by (equipment, city).
///
/// Lines without a resolved segment or city land in the `"N/A"` bucket.
/// Output ordering is deterministic: segments alphabetically, lines by
/// equipment id then city.
#[must_use]
pub fn summarize_daily_production(items: &[rdo_item::Model]) -> Vec<SegmentProductionSummary> {
    // segment -> (equipment, city) -> (productive, unproductive)
    let mut grouped: BTreeMap<String, BTreeMap<(Option<i64>, String), (f64, f64)>> =
        BTreeMap::new();

    for item in items {
        let segment = item
            .segment
            .clone()
            .unwrap_or_else(|| UNMATCHED.to_string());
        let city = item.city.clone().unwrap_or_else(|| UNMATCHED.to_string());

        let bucket = grouped
            .entry(segment)
            .or_default()
            .entry((item.equipment_id, city))
            .or_insert((0.0, 0.0));

        match item.measurement_type {
            MeasurementType::Produtivo => bucket.0 += item.total_value,
            MeasurementType::Improdutivo => bucket.1 += item.total_value,
        }
    }

    grouped
        .into_iter()
        .map(|(segment, lines)| {
            let lines: Vec<EquipmentProductionLine> = lines
                .into_iter()
                .map(
                    |((equipment_id, city), (productive, unproductive))| EquipmentProductionLine {
                        equipment_id,
                        city,
                        productive_value: productive,
                        unproductive_value: unproductive,
                    },
                )
                .collect();

            let productive_total = lines.iter().map(|l| l.productive_value).sum();
            let unproductive_total = lines.iter().map(|l| l.unproductive_value).sum();

            SegmentProductionSummary {
                segment,
                lines,
                productive_total,
                unproductive_total,
            }
        })
        .collect()
}

/// Formats an amount as Brazilian currency, e.g. `R$ 1.234,56`.
#[must_use]
pub fn format_brl(amount: f64) -> String {
    let negative = amount < -0.005;
    // Cast safety: currency values round well inside u64 range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, ch) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Renders a compliance percentage as a text bar like `[████████░░] 80.0%`.
#[must_use]
pub fn format_compliance_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(0.0, 100.0);

    // Cast safety: clamped ∈ [0, 100] and length is small, so the product is
    // mathematically in [0, length]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent:.1}%", "█".repeat(filled), "░".repeat(empty))
}
