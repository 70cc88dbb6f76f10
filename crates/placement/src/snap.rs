//! Snapping a drop target to the grid or to neighbouring block edges.

use wallpack_core::geometry::{Footprint, Position, Size, EPSILON};
use wallpack_core::{is_within_wall, BoundsPolicy, PlacementContext};

/// Rounds `position` to the nearest multiple of `grid_size`.
///
/// A non-positive grid size leaves the position unchanged.
pub fn snap_to_grid(position: Position, grid_size: f64) -> Position {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return position;
    }
    Position::new(
        (position.x / grid_size).round() * grid_size,
        (position.y / grid_size).round() * grid_size,
    )
}

/// An edge-snapped position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub position: Position,
    /// True if the snapped block lies fully inside the wall.
    pub in_bounds: bool,
    /// Distance from the original target.
    pub distance: f64,
}

impl SnapCandidate {
    fn beats(&self, other: &SnapCandidate) -> bool {
        if self.in_bounds != other.in_bounds {
            return self.in_bounds;
        }
        self.distance < other.distance - EPSILON
    }
}

/// Positions aligned with `anchor`'s edges that a block of `size` could snap to.
///
/// Edge-aligned proposals touch one side and keep the target's other
/// coordinate; corner-aligned proposals touch one side and line up with the
/// anchor's top/bottom (or left/right) edge as well.
fn proposals(anchor: &wallpack_core::Rect, size: Size, target: Position) -> Vec<Position> {
    let touch_x = [anchor.right(), anchor.x - size.width];
    let align_x = [anchor.x, anchor.right() - size.width];
    let touch_y = [anchor.bottom(), anchor.y - size.height];
    let align_y = [anchor.y, anchor.bottom() - size.height];

    let mut out = Vec::with_capacity(12);
    for &x in &touch_x {
        out.push(Position::new(x, target.y));
        out.extend(align_y.iter().map(|&y| Position::new(x, y)));
    }
    for &y in &touch_y {
        out.push(Position::new(target.x, y));
        out.extend(align_x.iter().map(|&x| Position::new(x, y)));
    }
    out
}

/// Best edge-snapped position within `snap_distance` of `target`.
///
/// Candidates must pass the validator under tolerant bounds. In-bounds
/// candidates beat overflowing ones; otherwise the closer one wins, and the
/// first proposal wins exact ties.
pub fn snap_to_adjacent_edges<F: Footprint>(
    target: Position,
    size: Size,
    ctx: &PlacementContext<'_, F>,
) -> Option<SnapCandidate> {
    if !ctx.accepts_size(size) {
        return None;
    }
    let snap_distance = ctx.config.snap_distance;
    let mut best: Option<SnapCandidate> = None;

    for anchor in ctx.obstacles() {
        for position in proposals(&anchor, size, target) {
            let distance = position.distance_to(&target);
            if distance > snap_distance + EPSILON {
                continue;
            }
            let rect = size.at(position);
            if !ctx.can_place_with(&rect, BoundsPolicy::Tolerant) {
                continue;
            }
            let candidate = SnapCandidate {
                position,
                in_bounds: is_within_wall(&rect, ctx.wall),
                distance,
            };
            if best.map_or(true, |b| candidate.beats(&b)) {
                best = Some(candidate);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallpack_core::{PlacementConfig, Rect, Wall};

    const BRICK: Size = Size::new(60.0, 30.0);

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(Position::new(7.0, 8.0), 15.0), Position::new(0.0, 15.0));
        assert_eq!(snap_to_grid(Position::new(22.0, 23.0), 15.0), Position::new(15.0, 30.0));
        assert_eq!(snap_to_grid(Position::new(-8.0, 0.0), 15.0), Position::new(-15.0, 0.0));
        assert_eq!(snap_to_grid(Position::new(3.3, 4.4), 0.0), Position::new(3.3, 4.4));
    }

    #[test]
    fn test_snaps_flush_right() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let blocks = [Rect::new(40.0, 40.0, 60.0, 30.0)];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let snap = snap_to_adjacent_edges(Position::new(104.0, 40.0), BRICK, &ctx).unwrap();
        assert_eq!(snap.position, Position::new(100.0, 40.0));
        assert!(snap.in_bounds);
    }

    #[test]
    fn test_nothing_within_snap_distance() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let blocks = [Rect::new(40.0, 40.0, 60.0, 30.0)];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        assert!(snap_to_adjacent_edges(Position::new(200.0, 110.0), BRICK, &ctx).is_none());
    }

    #[test]
    fn test_prefers_in_bounds_over_closer_overflow() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default().with_snap_distance(60.0);
        // Block on the right edge: snapping right overflows, snapping below does not.
        let blocks = [Rect::new(240.0, 0.0, 60.0, 30.0)];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let snap = snap_to_adjacent_edges(Position::new(290.0, 20.0), BRICK, &ctx).unwrap();
        assert!(snap.in_bounds);
        assert!(is_within_wall(&BRICK.at(snap.position), &wall));
    }

    #[test]
    fn test_overflow_only_candidate_flagged() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let blocks = [Rect::new(240.0, 0.0, 60.0, 30.0)];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let snap = snap_to_adjacent_edges(Position::new(303.0, 0.0), BRICK, &ctx).unwrap();
        assert_eq!(snap.position, Position::new(300.0, 0.0));
        assert!(!snap.in_bounds);
    }
}
