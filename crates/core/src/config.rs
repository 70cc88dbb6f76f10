//! Placement configuration.

use crate::model::{max_template_size, BlockTemplate};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound on `nearby_radius / nearby_step`; the nearby search tests
/// roughly the square of this many offsets.
pub const MAX_NEARBY_STEPS: f64 = 500.0;

/// Tunable parameters shared by the validator, generators and orchestrator.
///
/// Every search cap lives here so interactive latency stays bounded and tests
/// can vary the template catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Horizontal overflow tolerance on either side of the wall.
    /// Normally the widest template width.
    pub max_block_width: f64,

    /// Vertical overflow tolerance above the wall's top edge.
    /// Normally the tallest template height.
    pub max_block_height: f64,

    /// Grid size for snap-to-grid.
    pub grid_size: f64,

    /// Maximum distance from the drop target for edge snapping.
    pub snap_distance: f64,

    /// Scan step for the scored within-wall grid while the wall is sparse.
    pub fine_scan_step: f64,

    /// Scan step for the scored within-wall grid once the wall is dense.
    pub coarse_scan_step: f64,

    /// Block count above which the coarse scan step is used.
    pub coarse_scan_threshold: usize,

    /// Number of top-scored grid candidates tested.
    pub max_scored_candidates: usize,

    /// Score for candidates touching a wall edge.
    pub edge_score: i32,

    /// Score per adjacent block.
    pub adjacency_score: i32,

    /// Extra score when at least one adjacent block exists.
    pub adjacency_bonus: i32,

    /// Step for the row-major overflow scans.
    pub overflow_scan_step: f64,

    /// Block count above which random sampling switches to a shuffled grid.
    pub dense_layout_threshold: usize,

    /// Uniform random attempts on sparse walls.
    pub random_attempts: usize,

    /// Shuffled grid positions tested on dense walls.
    pub shuffled_grid_attempts: usize,

    /// Search radius around the drop target for the nearby search.
    pub nearby_radius: f64,

    /// Step of the nearby search.
    pub nearby_step: f64,

    /// Overlap percentage below which an intersection is a "small" warning.
    pub small_overlap_threshold: f64,

    /// Overlap percentage above which an intersection is "significant".
    pub significant_overlap_threshold: f64,

    /// Layout attempts per requested block.
    pub max_attempts_multiplier: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_block_width: 60.0,
            max_block_height: 30.0,
            grid_size: 15.0,
            snap_distance: 10.0,
            fine_scan_step: 2.0,
            coarse_scan_step: 4.0,
            coarse_scan_threshold: 30,
            max_scored_candidates: 200,
            edge_score: 8,
            adjacency_score: 12,
            adjacency_bonus: 5,
            overflow_scan_step: 5.0,
            dense_layout_threshold: 50,
            random_attempts: 150,
            shuffled_grid_attempts: 100,
            nearby_radius: 20.0,
            nearby_step: 2.0,
            small_overlap_threshold: 25.0,
            significant_overlap_threshold: 25.0,
            max_attempts_multiplier: 3,
        }
    }
}

impl PlacementConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration whose overflow tolerances come from a template catalog.
    ///
    /// Falls back to the defaults when the catalog is empty.
    pub fn for_templates(templates: &[BlockTemplate]) -> Self {
        let config = Self::default();
        match max_template_size(templates) {
            Some(size) => config.with_max_block_size(size.width, size.height),
            None => config,
        }
    }

    /// Sets the overflow tolerances.
    pub fn with_max_block_size(mut self, width: f64, height: f64) -> Self {
        self.max_block_width = width;
        self.max_block_height = height;
        self
    }

    /// Sets the snap grid size.
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Sets the edge snap distance.
    pub fn with_snap_distance(mut self, distance: f64) -> Self {
        self.snap_distance = distance;
        self
    }

    /// Sets the cap on tested scored candidates.
    pub fn with_max_scored_candidates(mut self, count: usize) -> Self {
        self.max_scored_candidates = count;
        self
    }

    /// Sets the random sampling attempt caps.
    pub fn with_random_attempts(mut self, uniform: usize, shuffled_grid: usize) -> Self {
        self.random_attempts = uniform;
        self.shuffled_grid_attempts = shuffled_grid;
        self
    }

    /// Sets the nearby search radius and step.
    pub fn with_nearby_search(mut self, radius: f64, step: f64) -> Self {
        self.nearby_radius = radius;
        self.nearby_step = step;
        self
    }

    /// Sets the small-overlap warning threshold (percent).
    pub fn with_small_overlap_threshold(mut self, pct: f64) -> Self {
        self.small_overlap_threshold = pct.clamp(0.0, 100.0);
        self
    }

    /// Sets the significant-overlap threshold (percent).
    pub fn with_significant_overlap_threshold(mut self, pct: f64) -> Self {
        self.significant_overlap_threshold = pct.clamp(0.0, 100.0);
        self
    }

    /// Sets the layout attempt multiplier.
    pub fn with_max_attempts_multiplier(mut self, multiplier: usize) -> Self {
        self.max_attempts_multiplier = multiplier;
        self
    }

    /// Scan step for the scored grid given the number of placed blocks.
    pub fn scan_step_for(&self, placed: usize) -> f64 {
        if placed <= self.coarse_scan_threshold {
            self.fine_scan_step
        } else {
            self.coarse_scan_step
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("max_block_width", self.max_block_width),
            ("max_block_height", self.max_block_height),
            ("snap_distance", self.snap_distance),
            ("nearby_radius", self.nearby_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("grid_size", self.grid_size),
            ("fine_scan_step", self.fine_scan_step),
            ("coarse_scan_step", self.coarse_scan_step),
            ("overflow_scan_step", self.overflow_scan_step),
            ("nearby_step", self.nearby_step),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("small_overlap_threshold", self.small_overlap_threshold),
            ("significant_overlap_threshold", self.significant_overlap_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within 0..=100, got {}",
                    name, value
                )));
            }
        }

        if self.nearby_radius / self.nearby_step > MAX_NEARBY_STEPS {
            return Err(Error::InvalidConfig(format!(
                "nearby_radius {} is more than {} steps of {}",
                self.nearby_radius, MAX_NEARBY_STEPS, self.nearby_step
            )));
        }

        Ok(())
    }
}
