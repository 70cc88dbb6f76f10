//! Systematic grid scans.
//!
//! [`find_position_within_wall`] is the scored scan used when snapping fails:
//! it prefers positions that hug a wall edge or an existing block, so the
//! result looks deliberate rather than arbitrary. [`scan_with_overflow`] is
//! the plain row-major fallback that also searches the overflow margins.

use wallpack_core::geometry::{Footprint, Position, Rect, Size, EPSILON};
use wallpack_core::{BoundsPolicy, PlacementConfig, PlacementContext, Wall};

/// Coordinates from `start` to `end` (inclusive) at `step`.
///
/// `end` itself is always included so the last row and column flush with the
/// wall edge are reachable regardless of the step.
pub(crate) fn axis_steps(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !start.is_finite() || !end.is_finite() || !step.is_finite() {
        return Vec::new();
    }
    if end < start - EPSILON || step <= 0.0 {
        return Vec::new();
    }
    let count = ((end - start) / step).floor() as usize;
    let mut values: Vec<f64> = (0..=count).map(|i| start + i as f64 * step).collect();
    if let Some(&last) = values.last() {
        if end - last > EPSILON {
            values.push(end);
        }
    }
    values
}

/// Merges block-edge coordinates into a grid axis so flush positions next to
/// off-grid blocks are candidates too.
fn with_edges(mut axis: Vec<f64>, edges: impl Iterator<Item = f64>, start: f64, end: f64) -> Vec<f64> {
    axis.extend(edges.filter(|v| *v >= start - EPSILON && *v <= end + EPSILON));
    axis.sort_by(|a, b| a.total_cmp(b));
    axis.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
    axis
}

/// Aesthetic score of a candidate: wall-edge contact and block adjacency.
pub fn score_candidate(rect: &Rect, wall: &Wall, obstacles: &[Rect], config: &PlacementConfig) -> i32 {
    let mut score = 0;

    let on_edge = rect.x.abs() < EPSILON
        || rect.y.abs() < EPSILON
        || (rect.right() - wall.width).abs() < EPSILON
        || (rect.bottom() - wall.height).abs() < EPSILON;
    if on_edge {
        score += config.edge_score;
    }

    let adjacent = obstacles.iter().filter(|o| rect.is_adjacent_to(o)).count() as i32;
    score += adjacent * config.adjacency_score;
    if adjacent > 0 {
        score += config.adjacency_bonus;
    }

    score
}

/// Best-scored position fully inside the wall, or `None`.
///
/// Candidates cover the wall interior at an adaptive step (fine while the wall
/// is sparse, coarse once it is dense), are sorted by score (ties keep
/// row-major order), and only the top `max_scored_candidates` are validated.
pub fn find_position_within_wall<F: Footprint>(
    size: Size,
    ctx: &PlacementContext<'_, F>,
) -> Option<Position> {
    if !ctx.accepts_size(size) {
        return None;
    }
    let wall = ctx.wall;
    let config = ctx.config;
    let obstacles: Vec<Rect> = ctx.obstacles().collect();
    let step = config.scan_step_for(obstacles.len());

    let max_x = wall.width - size.width;
    let max_y = wall.height - size.height;
    let xs = with_edges(
        axis_steps(0.0, max_x, step),
        obstacles.iter().flat_map(|o| [o.right(), o.x - size.width]),
        0.0,
        max_x,
    );
    let ys = with_edges(
        axis_steps(0.0, max_y, step),
        obstacles.iter().flat_map(|o| [o.bottom(), o.y - size.height]),
        0.0,
        max_y,
    );

    let mut scored: Vec<(i32, Position)> = Vec::with_capacity(xs.len() * ys.len());
    for &y in &ys {
        for &x in &xs {
            let position = Position::new(x, y);
            let score = score_candidate(&size.at(position), wall, &obstacles, config);
            scored.push((score, position));
        }
    }
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let found = scored
        .into_iter()
        .take(config.max_scored_candidates)
        .map(|(_, p)| p)
        .find(|p| ctx.can_place_with(&size.at(*p), BoundsPolicy::Strict));

    if found.is_none() {
        log::debug!(
            "No in-wall position for {}x{} among top {} candidates",
            size.width,
            size.height,
            config.max_scored_candidates
        );
    }
    found
}

/// Row-major scan that also searches the overflow margins.
///
/// Phase one starts rows above the wall (by up to `max_block_height`) with
/// columns inside the wall; phase two extends columns past the right edge by
/// up to `max_block_width`. The first position valid under the tolerant
/// bounds wins.
pub fn scan_with_overflow<F: Footprint>(size: Size, ctx: &PlacementContext<'_, F>) -> Option<Position> {
    if !ctx.accepts_size(size) {
        return None;
    }
    let wall = ctx.wall;
    let config = ctx.config;
    let step = config.overflow_scan_step;

    let ys = axis_steps(-config.max_block_height, wall.height - size.height, step);
    let inner_max_x = wall.width - size.width;
    let inner_xs = axis_steps(0.0, inner_max_x, step);

    let accepts = |p: &Position| ctx.can_place_with(&size.at(*p), BoundsPolicy::Tolerant);

    for &y in &ys {
        for &x in &inner_xs {
            let p = Position::new(x, y);
            if accepts(&p) {
                log::debug!("Overflow scan phase 1 placed at ({}, {})", x, y);
                return Some(p);
            }
        }
    }

    let outer_xs: Vec<f64> = axis_steps(0.0, wall.width + config.max_block_width - size.width, step)
        .into_iter()
        .filter(|x| *x > inner_max_x + EPSILON)
        .collect();
    for &y in &ys {
        for &x in &outer_xs {
            let p = Position::new(x, y);
            if accepts(&p) {
                log::debug!("Overflow scan phase 2 placed at ({}, {})", x, y);
                return Some(p);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRICK: Size = Size::new(60.0, 30.0);

    #[test]
    fn test_axis_steps_includes_end() {
        assert_eq!(axis_steps(0.0, 10.0, 4.0), vec![0.0, 4.0, 8.0, 10.0]);
        assert_eq!(axis_steps(0.0, 8.0, 4.0), vec![0.0, 4.0, 8.0]);
        assert_eq!(axis_steps(0.0, 0.0, 4.0), vec![0.0]);
        assert!(axis_steps(0.0, -1.0, 4.0).is_empty());
    }

    #[test]
    fn test_empty_wall_top_left() {
        let wall = Wall::new(200.0, 100.0);
        let config = PlacementConfig::default();
        let blocks: [Rect; 0] = [];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);
        assert_eq!(find_position_within_wall(BRICK, &ctx), Some(Position::new(0.0, 0.0)));
    }

    #[test]
    fn test_prefers_adjacent_position() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let blocks = [Rect::new(0.0, 0.0, 60.0, 30.0)];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let p = find_position_within_wall(BRICK, &ctx).unwrap();
        let rect = BRICK.at(p);
        assert!(rect.is_adjacent_to(&blocks[0]));
        assert!(ctx.can_place(&rect));
    }

    #[test]
    fn test_off_grid_block_still_gets_neighbour() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let blocks = [Rect::new(61.0, 47.0, 60.0, 30.0)];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let p = find_position_within_wall(BRICK, &ctx).unwrap();
        assert!(BRICK.at(p).is_adjacent_to(&blocks[0]));
    }

    #[test]
    fn test_full_wall_has_no_position() {
        let wall = Wall::new(120.0, 60.0);
        let config = PlacementConfig::default();
        let blocks = [
            Rect::new(0.0, 0.0, 60.0, 30.0),
            Rect::new(60.0, 0.0, 60.0, 30.0),
            Rect::new(0.0, 30.0, 60.0, 30.0),
            Rect::new(60.0, 30.0, 60.0, 30.0),
        ];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);
        assert_eq!(find_position_within_wall(BRICK, &ctx), None);
    }

    #[test]
    fn test_non_finite_wall_has_no_position() {
        let config = PlacementConfig::default();
        let blocks: [Rect; 0] = [];
        for wall in [Wall::new(f64::INFINITY, 100.0), Wall::new(200.0, f64::NAN)] {
            let ctx = PlacementContext::new(&wall, &blocks, None, &config);
            assert_eq!(find_position_within_wall(BRICK, &ctx), None);
            assert_eq!(scan_with_overflow(BRICK, &ctx), None);
        }
        assert!(axis_steps(0.0, f64::INFINITY, 2.0).is_empty());
    }

    #[test]
    fn test_scored_candidates_are_capped() {
        // Edge contact is the only score, so the origin ranks first; it is
        // taken, and with one candidate tested the scan gives up.
        let wall = Wall::new(300.0, 150.0);
        let blocks = [Rect::new(0.0, 0.0, 60.0, 30.0)];
        let edge_only = PlacementConfig {
            adjacency_score: 0,
            adjacency_bonus: 0,
            ..PlacementConfig::default()
        };

        let capped = edge_only.clone().with_max_scored_candidates(1);
        let ctx = PlacementContext::new(&wall, &blocks, None, &capped);
        assert_eq!(find_position_within_wall(BRICK, &ctx), None);

        let ctx = PlacementContext::new(&wall, &blocks, None, &edge_only);
        assert!(find_position_within_wall(BRICK, &ctx).is_some());
    }

    #[test]
    fn test_wall_sized_block_only_at_origin() {
        let wall = Wall::new(200.0, 100.0);
        let config = PlacementConfig::default();
        let blocks: [Rect; 0] = [];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);
        assert_eq!(
            find_position_within_wall(Size::new(200.0, 100.0), &ctx),
            Some(Position::new(0.0, 0.0))
        );
        assert_eq!(find_position_within_wall(Size::new(201.0, 100.0), &ctx), None);
    }

    #[test]
    fn test_overflow_scan_uses_top_margin() {
        let wall = Wall::new(120.0, 60.0);
        let config = PlacementConfig::default();
        let blocks = [
            Rect::new(0.0, 0.0, 60.0, 30.0),
            Rect::new(60.0, 0.0, 60.0, 30.0),
            Rect::new(0.0, 30.0, 60.0, 30.0),
            Rect::new(60.0, 30.0, 60.0, 30.0),
        ];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let p = scan_with_overflow(BRICK, &ctx).unwrap();
        assert_eq!(p, Position::new(0.0, -30.0));
    }

    #[test]
    fn test_overflow_scan_extends_right() {
        // Full-height wall: nothing fits above, so only the right margin remains.
        let wall = Wall::new(120.0, 30.0);
        let config = PlacementConfig::default().with_max_block_size(60.0, 0.0);
        let blocks = [
            Rect::new(0.0, 0.0, 60.0, 30.0),
            Rect::new(60.0, 0.0, 60.0, 30.0),
        ];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let p = scan_with_overflow(BRICK, &ctx).unwrap();
        assert_eq!(p, Position::new(120.0, 0.0));
    }

    #[test]
    fn test_score_candidate() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let obstacles = [Rect::new(0.0, 0.0, 60.0, 30.0)];

        // Touches the top edge and the block.
        assert_eq!(score_candidate(&Rect::new(60.0, 0.0, 60.0, 30.0), &wall, &obstacles, &config), 8 + 12 + 5);
        // Floating in the middle.
        assert_eq!(score_candidate(&Rect::new(100.0, 60.0, 60.0, 30.0), &wall, &obstacles, &config), 0);
    }
}
