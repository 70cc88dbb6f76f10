//! Post-hoc overlap classification for drag-and-drop feedback.
//!
//! These checks never decide final placement (that always requires zero
//! overlap). They tell the shell whether a drop should be warned about or
//! silently rejected and recomputed.

use crate::config::PlacementConfig;
use crate::geometry::{overlap_percentage, Footprint, Rect};

/// A block intersecting the candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapOffender {
    /// Index into the slice that was classified.
    pub index: usize,
    pub id: Option<String>,
    /// Share of the candidate's area covered by this block.
    pub percentage: f64,
}

/// Result of [`classify_overlap`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlapReport {
    /// True if the candidate overlaps something, and every overlap is below the threshold.
    pub is_small: bool,
    /// Blocks overlapping by more than 0% and less than the threshold.
    pub offenders: Vec<OverlapOffender>,
}

/// Flags blocks whose overlap with `candidate` is above 0% and below `threshold_pct`
/// of the candidate's area.
pub fn classify_overlap<F: Footprint>(
    candidate: &Rect,
    existing: &[F],
    threshold_pct: f64,
) -> OverlapReport {
    let mut offenders = Vec::new();
    let mut any_large = false;

    for (index, block) in existing.iter().enumerate() {
        let percentage = overlap_percentage(candidate, &block.rect());
        if percentage <= 0.0 {
            continue;
        }
        if percentage < threshold_pct {
            offenders.push(OverlapOffender {
                index,
                id: block.id().map(str::to_string),
                percentage,
            });
        } else {
            any_large = true;
        }
    }

    OverlapReport {
        is_small: !offenders.is_empty() && !any_large,
        offenders,
    }
}

/// Returns true if `b` covers more than `threshold_pct` of `a`'s area.
pub fn has_significant_overlap(a: &Rect, b: &Rect, threshold_pct: f64) -> bool {
    overlap_percentage(a, b) > threshold_pct
}

/// Coarse verdict combining both thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapSeverity {
    /// No intersection at all.
    None,
    /// Only small intersections; the shell warns.
    Small,
    /// Intersections between the two thresholds.
    Moderate,
    /// At least one intersection above the significant threshold; the shell rejects.
    Significant,
}

/// Classifies `candidate` against `existing` using the thresholds in `config`.
pub fn overlap_severity<F: Footprint>(
    candidate: &Rect,
    existing: &[F],
    config: &PlacementConfig,
) -> OverlapSeverity {
    let rects: Vec<Rect> = existing.iter().map(|b| b.rect()).collect();

    if rects
        .iter()
        .any(|r| has_significant_overlap(candidate, r, config.significant_overlap_threshold))
    {
        return OverlapSeverity::Significant;
    }
    if !rects.iter().any(|r| candidate.overlaps(r)) {
        return OverlapSeverity::None;
    }
    if classify_overlap(candidate, &rects, config.small_overlap_threshold).is_small {
        OverlapSeverity::Small
    } else {
        OverlapSeverity::Moderate
    }
}
