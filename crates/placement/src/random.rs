//! Randomized sampling inside the wall.

use rand::seq::SliceRandom;
use rand::Rng;
use wallpack_core::geometry::{Footprint, Position, Size};
use wallpack_core::{BoundsPolicy, PlacementContext};

use crate::grid_scan::axis_steps;

/// Random position fully inside the wall, or `None`.
///
/// Sparse walls (at most `dense_layout_threshold` blocks) get up to
/// `random_attempts` uniform integer positions. Dense walls get a regular grid
/// with step `min(width, height) / 2`, shuffled, of which the first
/// `shuffled_grid_attempts` are tested. No overflow is tolerated.
pub fn find_random_position<F, R>(
    size: Size,
    ctx: &PlacementContext<'_, F>,
    rng: &mut R,
) -> Option<Position>
where
    F: Footprint,
    R: Rng + ?Sized,
{
    if !ctx.accepts_size(size) {
        return None;
    }
    let config = ctx.config;
    let max_x = ctx.wall.width - size.width;
    let max_y = ctx.wall.height - size.height;
    let accepts = |p: &Position| ctx.can_place_with(&size.at(*p), BoundsPolicy::Strict);

    if ctx.obstacle_count() <= config.dense_layout_threshold {
        for _ in 0..config.random_attempts {
            let x = rng.gen_range(0.0..=max_x).floor();
            let y = rng.gen_range(0.0..=max_y).floor();
            let p = Position::new(x, y);
            if accepts(&p) {
                return Some(p);
            }
        }
        return None;
    }

    let step = (size.width.min(size.height) / 2.0).max(1.0);
    let mut grid: Vec<Position> = axis_steps(0.0, max_y, step)
        .into_iter()
        .flat_map(|y| {
            axis_steps(0.0, max_x, step)
                .into_iter()
                .map(move |x| Position::new(x, y))
        })
        .collect();
    grid.shuffle(rng);
    grid.into_iter()
        .take(config.shuffled_grid_attempts)
        .find(|p| accepts(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use wallpack_core::{is_within_wall, PlacementConfig, Rect, Wall};

    const BRICK: Size = Size::new(60.0, 30.0);

    #[test]
    fn test_sparse_sampling_within_wall() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let blocks = [Rect::new(100.0, 50.0, 60.0, 30.0)];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let p = find_random_position(BRICK, &ctx, &mut rng).unwrap();
            let rect = BRICK.at(p);
            assert!(is_within_wall(&rect, &wall));
            assert!(ctx.can_place(&rect));
            assert_eq!(p.x, p.x.floor());
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let wall = Wall::new(300.0, 150.0);
        let config = PlacementConfig::default();
        let blocks: [Rect; 0] = [];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);

        let a = find_random_position(BRICK, &ctx, &mut StdRng::seed_from_u64(7));
        let b = find_random_position(BRICK, &ctx, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_dense_uses_shuffled_grid() {
        let wall = Wall::new(600.0, 300.0);
        let config = PlacementConfig::default();
        // 51 small blocks along the top rows, leaving the bottom free.
        let blocks: Vec<Rect> = (0..51)
            .map(|i| Rect::new((i % 30) as f64 * 20.0, (i / 30) as f64 * 10.0, 20.0, 10.0))
            .collect();
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);
        let mut rng = StdRng::seed_from_u64(1);

        let p = find_random_position(BRICK, &ctx, &mut rng).unwrap();
        let rect = BRICK.at(p);
        assert!(is_within_wall(&rect, &wall));
        assert!(ctx.can_place(&rect));
        // Grid step is 15.
        assert_eq!(p.x % 15.0, 0.0);
        assert_eq!(p.y % 15.0, 0.0);
    }

    #[test]
    fn test_attempt_caps_bound_sampling() {
        let wall = Wall::new(600.0, 300.0);
        let config = PlacementConfig::default().with_random_attempts(0, 0);
        let mut rng = StdRng::seed_from_u64(5);

        let sparse: [Rect; 0] = [];
        let ctx = PlacementContext::new(&wall, &sparse, None, &config);
        assert_eq!(find_random_position(BRICK, &ctx, &mut rng), None);

        let dense: Vec<Rect> = (0..51)
            .map(|i| Rect::new((i % 30) as f64 * 20.0, (i / 30) as f64 * 10.0, 20.0, 10.0))
            .collect();
        let ctx = PlacementContext::new(&wall, &dense, None, &config);
        assert_eq!(find_random_position(BRICK, &ctx, &mut rng), None);
    }

    #[test]
    fn test_oversized_block_rejected() {
        let wall = Wall::new(50.0, 20.0);
        let config = PlacementConfig::default();
        let blocks: [Rect; 0] = [];
        let ctx = PlacementContext::new(&wall, &blocks, None, &config);
        assert_eq!(find_random_position(BRICK, &ctx, &mut StdRng::seed_from_u64(3)), None);
    }
}
