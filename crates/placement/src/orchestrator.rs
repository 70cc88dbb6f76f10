//! Drop resolution.
//!
//! [`Placer::resolve_drop`] chains the generators from cheapest and most
//! "sticky" to most exhaustive, so a dragged block stays near the cursor when
//! it can and still lands somewhere sensible when it cannot.

use wallpack_core::geometry::{Footprint, Position, Rect, Size};
use wallpack_core::{BoundsPolicy, PlacementConfig, PlacementContext, Result, Wall};

use crate::adjacent::{find_adjacent_to_target, find_valid_position};
use crate::grid_scan::find_position_within_wall;
use crate::nearby::find_nearby_position;
use crate::snap::{snap_to_adjacent_edges, snap_to_grid};

/// Which stage of the fallback chain produced a drop position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStage {
    /// The target snapped to the grid.
    GridSnap,
    /// Snapped flush to a neighbouring block, fully inside the wall.
    EdgeSnap,
    /// Best-scored position inside the wall.
    WithinWall,
    /// Snapped flush to a neighbouring block, overflowing within tolerance.
    EdgeSnapOverflow,
    /// Closest valid position around the target.
    Nearby,
    /// Adjacent-to-blocks search with overflow scan.
    AdjacentFallback,
    /// Nothing found; the target is returned unchanged.
    Unresolved,
}

/// Outcome of [`Placer::resolve_drop`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropResolution {
    pub position: Position,
    pub stage: PlacementStage,
}

impl DropResolution {
    /// Returns true unless the chain fell through to the original target.
    pub fn is_resolved(&self) -> bool {
        self.stage != PlacementStage::Unresolved
    }
}

/// Placement engine bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct Placer {
    config: PlacementConfig,
}

impl Placer {
    /// Creates a placer with the given configuration.
    ///
    /// The configuration is trusted as is. Search costs grow with the step
    /// and radius values, so configs from outside the program should go
    /// through [`Self::try_new`].
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Creates a placer after [`PlacementConfig::validate`] accepts `config`.
    pub fn try_new(config: PlacementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Creates a placer with default configuration.
    pub fn default_config() -> Self {
        Self::new(PlacementConfig::default())
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    fn context<'a, F: Footprint>(
        &'a self,
        wall: &'a Wall,
        existing: &'a [F],
        exclude: Option<&'a str>,
    ) -> PlacementContext<'a, F> {
        PlacementContext::new(wall, existing, exclude, &self.config)
    }

    /// See [`wallpack_core::can_place_block`].
    pub fn can_place<F: Footprint>(
        &self,
        rect: &Rect,
        existing: &[F],
        wall: &Wall,
        exclude: Option<&str>,
    ) -> bool {
        self.context(wall, existing, exclude).can_place(rect)
    }

    /// Resolves where a block of `size` dropped at `target` should land.
    ///
    /// Stages, each tried only when the previous found nothing:
    /// 1. the target snapped to the grid;
    /// 2. an edge snap fully inside the wall;
    /// 3. the best-scored position inside the wall;
    /// 4. the edge snap from step 2 if it was only valid with overflow;
    /// 5. the nearest valid position around the target;
    /// 6. the adjacent-to-blocks search with its overflow scan.
    ///
    /// If all fail the target is returned unchanged; the caller decides whether
    /// to reject the drop. No randomness is involved, so identical inputs give
    /// identical results.
    pub fn resolve_drop<F: Footprint>(
        &self,
        target: Position,
        size: Size,
        existing: &[F],
        wall: &Wall,
        exclude: Option<&str>,
    ) -> DropResolution {
        let unresolved = DropResolution {
            position: target,
            stage: PlacementStage::Unresolved,
        };
        if !size.is_valid() || !target.x.is_finite() || !target.y.is_finite() {
            log::warn!(
                "Rejecting drop of {}x{} at ({}, {}): invalid input",
                size.width,
                size.height,
                target.x,
                target.y
            );
            return unresolved;
        }

        let ctx = self.context(wall, existing, exclude);
        let resolved = |position: Position, stage: PlacementStage| {
            log::debug!("Drop resolved at ({}, {}) via {:?}", position.x, position.y, stage);
            DropResolution { position, stage }
        };

        let snapped = snap_to_grid(target, self.config.grid_size);
        if ctx.can_place_with(&size.at(snapped), BoundsPolicy::Tolerant) {
            return resolved(snapped, PlacementStage::GridSnap);
        }

        let edge = snap_to_adjacent_edges(target, size, &ctx);
        if let Some(candidate) = edge.filter(|c| c.in_bounds) {
            return resolved(candidate.position, PlacementStage::EdgeSnap);
        }

        if let Some(position) = find_position_within_wall(size, &ctx) {
            return resolved(position, PlacementStage::WithinWall);
        }

        if let Some(candidate) = edge {
            return resolved(candidate.position, PlacementStage::EdgeSnapOverflow);
        }

        if let Some(position) = find_nearby_position(target, size, &ctx) {
            return resolved(position, PlacementStage::Nearby);
        }

        if let Some(position) = find_valid_position(size, &ctx) {
            return resolved(position, PlacementStage::AdjacentFallback);
        }

        log::warn!(
            "No valid position for {}x{} near ({}, {}); keeping target",
            size.width,
            size.height,
            target.x,
            target.y
        );
        unresolved
    }

    /// Position of the drop only; see [`Self::resolve_drop`].
    pub fn resolve_drop_position<F: Footprint>(
        &self,
        target: Position,
        size: Size,
        existing: &[F],
        wall: &Wall,
        exclude: Option<&str>,
    ) -> Position {
        self.resolve_drop(target, size, existing, wall, exclude).position
    }

    /// Best-scored position fully inside the wall.
    pub fn find_position_within_wall<F: Footprint>(
        &self,
        size: Size,
        existing: &[F],
        wall: &Wall,
        exclude: Option<&str>,
    ) -> Option<Position> {
        find_position_within_wall(size, &self.context(wall, existing, exclude))
    }

    /// Position touching `target_block`, nearest to the drag pointer first.
    pub fn find_adjacent_position<F: Footprint>(
        &self,
        size: Size,
        target_block: &Rect,
        existing: &[F],
        wall: &Wall,
        drag: Position,
        exclude: Option<&str>,
    ) -> Option<Position> {
        find_adjacent_to_target(size, target_block, drag, &self.context(wall, existing, exclude))
    }

    /// General search: adjacent to blocks, then the overflow scan.
    pub fn find_valid_position<F: Footprint>(
        &self,
        size: Size,
        existing: &[F],
        wall: &Wall,
        exclude: Option<&str>,
    ) -> Option<Position> {
        find_valid_position(size, &self.context(wall, existing, exclude))
    }
}
