//! Placement validity.
//!
//! [`can_place_block`] is the single predicate every generator goes through.
//! It enforces size, the tolerant vertical bound and collisions, and leaves the
//! horizontal bound to callers: some call sites let blocks drift freely past
//! the side edges while the floor and ceiling must always hold.

use crate::bounds::{self, BoundsPolicy};
use crate::config::PlacementConfig;
use crate::geometry::{Footprint, Rect, Size};
use crate::model::Wall;

/// Read-only view of a placement query.
///
/// Bundles the wall, the already-placed blocks, the id of the block being moved
/// (omitted from its own collision set) and the configuration.
#[derive(Debug)]
pub struct PlacementContext<'a, F> {
    pub wall: &'a Wall,
    pub blocks: &'a [F],
    pub exclude: Option<&'a str>,
    pub config: &'a PlacementConfig,
}

impl<F> Clone for PlacementContext<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for PlacementContext<'_, F> {}

impl<'a, F: Footprint> PlacementContext<'a, F> {
    /// Creates a context.
    pub fn new(
        wall: &'a Wall,
        blocks: &'a [F],
        exclude: Option<&'a str>,
        config: &'a PlacementConfig,
    ) -> Self {
        Self {
            wall,
            blocks,
            exclude,
            config,
        }
    }

    /// Blocks that count as obstacles (everything but the excluded block).
    pub fn obstacles(&self) -> impl Iterator<Item = Rect> + '_ {
        self.blocks
            .iter()
            .filter(move |b| !self.is_excluded(*b))
            .map(|b| b.rect())
    }

    /// Number of obstacles.
    pub fn obstacle_count(&self) -> usize {
        self.blocks.iter().filter(|b| !self.is_excluded(*b)).count()
    }

    fn is_excluded(&self, block: &F) -> bool {
        match (self.exclude, block.id()) {
            (Some(excluded), Some(id)) => excluded == id,
            _ => false,
        }
    }

    /// Returns true if `size` could ever be placed on this wall.
    pub fn accepts_size(&self, size: Size) -> bool {
        self.wall.fits(size)
    }

    /// Returns true if `rect` collides with any obstacle.
    pub fn collides(&self, rect: &Rect) -> bool {
        self.obstacles().any(|other| rect.overlaps(&other))
    }

    /// The core predicate; see [`can_place_block`].
    pub fn can_place(&self, rect: &Rect) -> bool {
        if rect.validate().is_err() || !self.accepts_size(rect.size()) {
            return false;
        }
        if !bounds::is_valid_vertical_position(rect, self.wall, self.config.max_block_height) {
            return false;
        }
        !self.collides(rect)
    }

    /// [`Self::can_place`] plus the horizontal bound selected by `policy`.
    pub fn can_place_with(&self, rect: &Rect, policy: BoundsPolicy) -> bool {
        policy.accepts(rect, self.wall, self.config) && self.can_place(rect)
    }
}

/// Returns true if `candidate` may occupy its position.
///
/// Fails when the candidate has a non-positive size or is larger than the wall,
/// breaks the tolerant vertical bound, or overlaps any block in `existing`
/// other than the one whose id equals `exclude_block_id`. Horizontal overflow
/// is not checked.
pub fn can_place_block<F: Footprint>(
    candidate: &Rect,
    existing: &[F],
    wall: &Wall,
    exclude_block_id: Option<&str>,
    config: &PlacementConfig,
) -> bool {
    PlacementContext::new(wall, existing, exclude_block_id, config).can_place(candidate)
}

/// [`can_place_block`] restricted to positions fully inside the wall.
pub fn can_place_within_wall<F: Footprint>(
    candidate: &Rect,
    existing: &[F],
    wall: &Wall,
    exclude_block_id: Option<&str>,
    config: &PlacementConfig,
) -> bool {
    PlacementContext::new(wall, existing, exclude_block_id, config)
        .can_place_with(candidate, BoundsPolicy::Strict)
}

/// [`can_place_block`] plus the tolerant horizontal bound.
pub fn can_place_tolerant<F: Footprint>(
    candidate: &Rect,
    existing: &[F],
    wall: &Wall,
    exclude_block_id: Option<&str>,
    config: &PlacementConfig,
) -> bool {
    PlacementContext::new(wall, existing, exclude_block_id, config)
        .can_place_with(candidate, BoundsPolicy::Tolerant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn wall() -> Wall {
        Wall::new(200.0, 100.0)
    }

    #[test]
    fn test_exact_overlap_rejected() {
        let config = PlacementConfig::default();
        let first = Block::new("a", Rect::new(10.0, 10.0, 60.0, 30.0), "#fff");
        let second = Rect::new(10.0, 10.0, 60.0, 30.0);
        assert!(!can_place_block(&second, &[first], &wall(), None, &config));
    }

    #[test]
    fn test_excluded_block_ignored() {
        let config = PlacementConfig::default();
        let blocks = vec![Block::new("moving", Rect::new(10.0, 10.0, 60.0, 30.0), "#fff")];
        let nudged = Rect::new(15.0, 10.0, 60.0, 30.0);
        assert!(!can_place_block(&nudged, &blocks, &wall(), None, &config));
        assert!(can_place_block(&nudged, &blocks, &wall(), Some("moving"), &config));
        assert!(!can_place_block(&nudged, &blocks, &wall(), Some("other"), &config));
    }

    #[test]
    fn test_horizontal_overflow_not_checked() {
        let config = PlacementConfig::default();
        let none: [Rect; 0] = [];
        // Far past the right edge, beyond even the tolerant bound.
        let far_right = Rect::new(500.0, 0.0, 60.0, 30.0);
        assert!(can_place_block(&far_right, &none, &wall(), None, &config));
        assert!(!can_place_tolerant(&far_right, &none, &wall(), None, &config));
        assert!(!can_place_within_wall(&far_right, &none, &wall(), None, &config));
    }

    #[test]
    fn test_vertical_bound_enforced() {
        let config = PlacementConfig::default();
        let none: [Rect; 0] = [];
        assert!(can_place_block(&Rect::new(0.0, -30.0, 60.0, 30.0), &none, &wall(), None, &config));
        assert!(!can_place_block(&Rect::new(0.0, -31.0, 60.0, 30.0), &none, &wall(), None, &config));
        assert!(!can_place_block(&Rect::new(0.0, 71.0, 60.0, 30.0), &none, &wall(), None, &config));
    }

    #[test]
    fn test_larger_than_wall_rejected() {
        let config = PlacementConfig::default();
        let none: [Rect; 0] = [];
        assert!(!can_place_block(&Rect::new(0.0, 0.0, 201.0, 30.0), &none, &wall(), None, &config));
        assert!(!can_place_block(&Rect::new(0.0, 0.0, 60.0, 101.0), &none, &wall(), None, &config));
        assert!(can_place_block(&Rect::new(0.0, 0.0, 200.0, 100.0), &none, &wall(), None, &config));
    }

    #[test]
    fn test_degenerate_size_rejected() {
        let config = PlacementConfig::default();
        let none: [Rect; 0] = [];
        assert!(!can_place_block(&Rect::new(0.0, 0.0, 0.0, 30.0), &none, &wall(), None, &config));
        assert!(!can_place_block(&Rect::new(0.0, 0.0, 60.0, -3.0), &none, &wall(), None, &config));
    }

    #[test]
    fn test_touching_blocks_allowed() {
        let config = PlacementConfig::default();
        let blocks = vec![Rect::new(0.0, 0.0, 60.0, 30.0)];
        assert!(can_place_block(&Rect::new(60.0, 0.0, 60.0, 30.0), &blocks, &wall(), None, &config));
        assert!(can_place_block(&Rect::new(0.0, 30.0, 60.0, 30.0), &blocks, &wall(), None, &config));
    }

    #[test]
    fn test_context_obstacles_skip_excluded() {
        let config = PlacementConfig::default();
        let w = wall();
        let blocks = vec![
            Block::new("a", Rect::new(0.0, 0.0, 60.0, 30.0), "#fff"),
            Block::new("b", Rect::new(60.0, 0.0, 60.0, 30.0), "#fff"),
        ];
        let ctx = PlacementContext::new(&w, &blocks, Some("a"), &config);
        assert_eq!(ctx.obstacle_count(), 1);
        assert!(!ctx.collides(&Rect::new(0.0, 0.0, 60.0, 30.0)));
    }
}
