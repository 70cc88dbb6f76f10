//! # wallpack placement
//!
//! Candidate generators, drop resolution and automatic layout for wallpack walls.
//!
//! Every generator answers the same question (where can a block of a given
//! size go?) and every answer is checked by
//! [`wallpack_core::can_place_block`]. The generators differ in what they
//! prefer:
//!
//! - [`snap`]: the drop target snapped to the grid or flush to a neighbour
//! - [`adjacent`]: touching an existing block, by side priority
//! - [`grid_scan`]: scored scan inside the wall, and a scan into the overflow margins
//! - [`nearby`]: the closest free position around a target
//! - [`random`]: uniform or shuffled-grid sampling
//!
//! [`Placer`] chains them for interactive drops; [`LayoutGenerator`] uses them
//! to fill a wall automatically.
//!
//! ## Example
//!
//! ```rust
//! use wallpack_core::{PlacementConfig, Position, Rect, Size, Wall};
//! use wallpack_placement::{resolve_drop_position, LayoutGenerator};
//!
//! let wall = Wall::new(300.0, 150.0);
//! let placed = [Rect::new(0.0, 0.0, 60.0, 30.0)];
//! let config = PlacementConfig::default();
//!
//! let position = resolve_drop_position(
//!     Position::new(20.0, 10.0),
//!     Size::new(60.0, 30.0),
//!     &placed,
//!     &wall,
//!     None,
//!     &config,
//! );
//! assert!(!Rect::new(position.x, position.y, 60.0, 30.0).overlaps(&placed[0]));
//!
//! let layout = LayoutGenerator::with_seed(42).generate(&wall, &[Size::new(60.0, 30.0)], 10);
//! assert_eq!(layout.placed_count(), 10);
//! ```

pub mod adjacent;
pub mod grid_scan;
pub mod layout;
pub mod nearby;
pub mod orchestrator;
pub mod random;
pub mod snap;

use wallpack_core::geometry::{Footprint, Position, Rect, Size};
use wallpack_core::{PlacementConfig, Wall};

// Re-exports
pub use adjacent::{AdjacentCandidate, Side};
pub use layout::{random_color, LayoutBlock, LayoutGenerator, LayoutResult};
pub use orchestrator::{DropResolution, PlacementStage, Placer};
pub use snap::{snap_to_grid, SnapCandidate};

/// Resolves where a block dropped at `target` should land.
///
/// Shorthand for [`Placer::resolve_drop_position`].
pub fn resolve_drop_position<F: Footprint>(
    target: Position,
    size: Size,
    existing: &[F],
    wall: &Wall,
    exclude_block_id: Option<&str>,
    config: &PlacementConfig,
) -> Position {
    Placer::new(config.clone()).resolve_drop_position(target, size, existing, wall, exclude_block_id)
}

/// Best-scored position fully inside the wall.
pub fn find_position_within_wall<F: Footprint>(
    size: Size,
    existing: &[F],
    wall: &Wall,
    exclude_block_id: Option<&str>,
    config: &PlacementConfig,
) -> Option<Position> {
    let ctx = wallpack_core::PlacementContext::new(wall, existing, exclude_block_id, config);
    grid_scan::find_position_within_wall(size, &ctx)
}

/// Position touching `target_block`, closest to `drag_position` first.
pub fn find_adjacent_position<F: Footprint>(
    size: Size,
    target_block: &Rect,
    existing: &[F],
    wall: &Wall,
    drag_position: Position,
    exclude_block_id: Option<&str>,
    config: &PlacementConfig,
) -> Option<Position> {
    let ctx = wallpack_core::PlacementContext::new(wall, existing, exclude_block_id, config);
    adjacent::find_adjacent_to_target(size, target_block, drag_position, &ctx)
}
