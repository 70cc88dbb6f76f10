//! Adjacency-driven candidates.
//!
//! Every placed block offers eight touching positions for a new block: one per
//! side and one per corner. Ranking them puts new blocks to the right of
//! existing ones first, then left, below, above, and finally on the corners.

use wallpack_core::geometry::{Footprint, Position, Rect, Size};
use wallpack_core::{BoundsPolicy, PlacementContext};

use crate::grid_scan;

/// Where a candidate touches its anchor block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Right,
    Left,
    Below,
    Above,
    BelowRight,
    BelowLeft,
    AboveRight,
    AboveLeft,
}

impl Side {
    /// All sides in proposal order.
    pub const ALL: [Side; 8] = [
        Side::Right,
        Side::Left,
        Side::Below,
        Side::Above,
        Side::BelowRight,
        Side::BelowLeft,
        Side::AboveRight,
        Side::AboveLeft,
    ];

    /// Priority rank, lower is tried first.
    pub fn rank(self) -> u8 {
        match self {
            Side::Right => 1,
            Side::Left => 2,
            Side::Below => 3,
            Side::Above => 4,
            Side::BelowRight | Side::BelowLeft => 5,
            Side::AboveRight | Side::AboveLeft => 6,
        }
    }

    /// Top-left position of a block of `size` touching `anchor` on this side.
    pub fn position(self, anchor: &Rect, size: Size) -> Position {
        let left = anchor.x - size.width;
        let above = anchor.y - size.height;
        match self {
            Side::Right => Position::new(anchor.right(), anchor.y),
            Side::Left => Position::new(left, anchor.y),
            Side::Below => Position::new(anchor.x, anchor.bottom()),
            Side::Above => Position::new(anchor.x, above),
            Side::BelowRight => Position::new(anchor.right(), anchor.bottom()),
            Side::BelowLeft => Position::new(left, anchor.bottom()),
            Side::AboveRight => Position::new(anchor.right(), above),
            Side::AboveLeft => Position::new(left, above),
        }
    }
}

/// A position proposed next to an anchor block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacentCandidate {
    pub position: Position,
    pub side: Side,
    /// Index of the anchor among the context's obstacles.
    pub anchor: usize,
}

/// The eight touching positions around `anchor`, in proposal order.
pub fn adjacent_candidates(anchor: &Rect, size: Size) -> [(Side, Position); 8] {
    Side::ALL.map(|side| (side, side.position(anchor, size)))
}

/// Ranked candidates around every obstacle in `ctx`.
///
/// Sorting is stable: equal ranks keep obstacle order.
pub fn ranked_candidates<F: Footprint>(size: Size, ctx: &PlacementContext<'_, F>) -> Vec<AdjacentCandidate> {
    let mut candidates: Vec<AdjacentCandidate> = ctx
        .obstacles()
        .enumerate()
        .flat_map(|(anchor, rect)| {
            adjacent_candidates(&rect, size)
                .into_iter()
                .map(move |(side, position)| AdjacentCandidate {
                    position,
                    side,
                    anchor,
                })
        })
        .collect();
    candidates.sort_by_key(|c| c.side.rank());
    candidates
}

/// First ranked position next to any placed block that passes validation under `policy`.
pub fn find_adjacent_to_blocks<F: Footprint>(
    size: Size,
    ctx: &PlacementContext<'_, F>,
    policy: BoundsPolicy,
) -> Option<Position> {
    if !ctx.accepts_size(size) {
        return None;
    }
    ranked_candidates(size, ctx)
        .into_iter()
        .map(|c| c.position)
        .find(|&p| ctx.can_place_with(&size.at(p), policy))
}

/// Drag-aware variant: positions around one `target` block, nearest to `drag` first.
///
/// `drag` is where the dragged block's top-left corner currently is. The first
/// candidate passing the tolerant bounds wins.
pub fn find_adjacent_to_target<F: Footprint>(
    size: Size,
    target: &Rect,
    drag: Position,
    ctx: &PlacementContext<'_, F>,
) -> Option<Position> {
    if !ctx.accepts_size(size) {
        return None;
    }
    let mut candidates = adjacent_candidates(target, size);
    candidates.sort_by(|a, b| a.1.distance_to(&drag).total_cmp(&b.1.distance_to(&drag)));
    candidates
        .into_iter()
        .map(|(_, p)| p)
        .find(|&p| ctx.can_place_with(&size.at(p), BoundsPolicy::Tolerant))
}

/// General-purpose search used as the last resort for drops and by layout generation.
///
/// An empty wall starts at the best in-wall grid position. Otherwise the block
/// goes next to an existing one, and failing that the multi-phase overflow
/// scan runs.
pub fn find_valid_position<F: Footprint>(size: Size, ctx: &PlacementContext<'_, F>) -> Option<Position> {
    if !ctx.accepts_size(size) {
        return None;
    }
    if ctx.obstacle_count() == 0 {
        if let Some(p) = grid_scan::find_position_within_wall(size, ctx) {
            return Some(p);
        }
    }
    find_adjacent_to_blocks(size, ctx, BoundsPolicy::Tolerant)
        .or_else(|| grid_scan::scan_with_overflow(size, ctx))
}
