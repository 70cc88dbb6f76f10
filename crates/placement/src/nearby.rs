//! Fine search around the drop target.

use wallpack_core::geometry::{Footprint, Position, Size};
use wallpack_core::{BoundsPolicy, PlacementContext};

/// Offsets inside a disc of `radius` at `step`, nearest first.
///
/// Equal distances keep row-major order, so the sequence is deterministic.
pub fn nearby_offsets(radius: f64, step: f64) -> Vec<(f64, f64)> {
    if !(step > 0.0 && step.is_finite() && radius >= 0.0 && radius.is_finite()) {
        return vec![(0.0, 0.0)];
    }
    let n = (radius / step).floor() as i64;
    let mut offsets: Vec<(f64, f64)> = (-n..=n)
        .flat_map(|j| (-n..=n).map(move |i| (i as f64 * step, j as f64 * step)))
        .filter(|(dx, dy)| dx * dx + dy * dy <= radius * radius)
        .collect();
    offsets.sort_by(|a, b| (a.0.hypot(a.1)).total_cmp(&b.0.hypot(b.1)));
    offsets
}

/// Closest valid position within `nearby_radius` of `target`, tolerant bounds.
pub fn find_nearby_position<F: Footprint>(
    target: Position,
    size: Size,
    ctx: &PlacementContext<'_, F>,
) -> Option<Position> {
    if !ctx.accepts_size(size) {
        return None;
    }
    nearby_offsets(ctx.config.nearby_radius, ctx.config.nearby_step)
        .into_iter()
        .map(|(dx, dy)| Position::new(target.x + dx, target.y + dy))
        .find(|p| ctx.can_place_with(&size.at(*p), BoundsPolicy::Tolerant))
}
