//! Wall boundary and overflow predicates.
//!
//! Two families live here. The strict `is_*_overflowing` tests drive the
//! `is_overflow` display flag. The tolerant `is_valid_*_position` tests decide
//! placement acceptance: blocks may hang past the left and right edges by up to
//! the widest template, and past the top edge by up to the tallest template,
//! but never below the floor.

use crate::config::PlacementConfig;
use crate::geometry::{Rect, EPSILON};
use crate::model::Wall;

/// Returns true if `rect` lies entirely inside the wall.
pub fn is_within_wall(rect: &Rect, wall: &Wall) -> bool {
    rect.x >= -EPSILON
        && rect.y >= -EPSILON
        && rect.right() <= wall.width + EPSILON
        && rect.bottom() <= wall.height + EPSILON
}

/// Returns true if `rect` extends past the left or right wall edge.
pub fn is_horizontally_overflowing(rect: &Rect, wall: &Wall) -> bool {
    rect.x < -EPSILON || rect.right() > wall.width + EPSILON
}

/// Returns true if `rect` extends past the top or bottom wall edge.
pub fn is_vertically_overflowing(rect: &Rect, wall: &Wall) -> bool {
    rect.y < -EPSILON || rect.bottom() > wall.height + EPSILON
}

/// Tolerant horizontal bound: up to `max_block_width` past either side.
pub fn is_valid_horizontal_position(rect: &Rect, wall: &Wall, max_block_width: f64) -> bool {
    rect.x >= -max_block_width - EPSILON && rect.right() <= wall.width + max_block_width + EPSILON
}

/// Tolerant vertical bound: up to `max_block_height` above the top, nothing below the floor.
pub fn is_valid_vertical_position(rect: &Rect, wall: &Wall, max_block_height: f64) -> bool {
    rect.y >= -max_block_height - EPSILON && rect.bottom() <= wall.height + EPSILON
}

/// Which horizontal bound a generator enforces on top of the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// The block must lie fully inside the wall.
    Strict,
    /// The block may overflow within the configured tolerances.
    #[default]
    Tolerant,
}

impl BoundsPolicy {
    /// Returns true if `rect` satisfies this policy's bound.
    pub fn accepts(&self, rect: &Rect, wall: &Wall, config: &PlacementConfig) -> bool {
        match self {
            Self::Strict => is_within_wall(rect, wall),
            Self::Tolerant => is_valid_horizontal_position(rect, wall, config.max_block_width),
        }
    }
}
