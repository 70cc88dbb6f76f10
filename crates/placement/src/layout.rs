//! Automatic layout generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use wallpack_core::geometry::{Footprint, Position, Rect, Size};
use wallpack_core::{Block, BoundsPolicy, PlacementConfig, PlacementContext, Wall, BLOCK_PALETTE};

use crate::adjacent::find_adjacent_to_blocks;
use crate::grid_scan::{find_position_within_wall, scan_with_overflow};
use crate::random::find_random_position;

/// A block placed by the generator, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBlock {
    pub rect: Rect,
    pub color: String,
}

impl Footprint for LayoutBlock {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// Output of [`LayoutGenerator::generate`].
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    /// Placed blocks in placement order.
    pub blocks: Vec<LayoutBlock>,
    /// Number of attempts made, successful or not.
    pub attempts: usize,
    /// Number of blocks asked for.
    pub requested: usize,
}

impl LayoutResult {
    pub fn placed_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if every requested block was placed.
    pub fn is_complete(&self) -> bool {
        self.blocks.len() >= self.requested
    }

    /// Converts the layout into [`Block`]s, drawing ids from `next_id`.
    pub fn into_blocks(self, mut next_id: impl FnMut() -> String) -> Vec<Block> {
        self.blocks
            .into_iter()
            .map(|b| Block::new(next_id(), b.rect, b.color))
            .collect()
    }
}

/// Random layout generator.
///
/// Each attempt picks a size uniformly from the catalog and places it with the
/// first generator that succeeds: adjacent to an existing block (or the scored
/// in-wall scan while the wall is empty), then random sampling, then the
/// overflow scan. Generation stops once `max_blocks` are placed or
/// `max_blocks * max_attempts_multiplier` attempts are spent.
pub struct LayoutGenerator {
    config: PlacementConfig,
    rng: StdRng,
}

impl LayoutGenerator {
    /// Creates a generator seeded from system entropy.
    pub fn new() -> Self {
        Self {
            config: PlacementConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed seed for reproducible layouts.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: PlacementConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replaces the placement configuration. The config is not validated.
    pub fn with_config(mut self, config: PlacementConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the placement configuration once it passes validation.
    pub fn try_with_config(self, config: PlacementConfig) -> wallpack_core::Result<Self> {
        config.validate()?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Generates up to `max_blocks` non-overlapping blocks on `wall`.
    ///
    /// Catalog sizes that are invalid or larger than the wall are ignored. An
    /// invalid wall or an empty usable catalog yields an empty result.
    pub fn generate(&mut self, wall: &Wall, catalog: &[Size], max_blocks: usize) -> LayoutResult {
        let mut result = LayoutResult {
            requested: max_blocks,
            ..Default::default()
        };

        if let Err(e) = wall.validate() {
            log::warn!("Skipping layout generation: {}", e);
            return result;
        }
        let sizes: Vec<Size> = catalog.iter().copied().filter(|s| wall.fits(*s)).collect();
        if sizes.is_empty() {
            log::warn!("Skipping layout generation: no block size fits the wall");
            return result;
        }

        let max_attempts = max_blocks.saturating_mul(self.config.max_attempts_multiplier);
        while result.blocks.len() < max_blocks && result.attempts < max_attempts {
            result.attempts += 1;
            let Some(&size) = sizes.choose(&mut self.rng) else {
                break;
            };
            if let Some(position) = self.place(size, wall, &result.blocks) {
                let color = random_color(&mut self.rng);
                result.blocks.push(LayoutBlock {
                    rect: size.at(position),
                    color,
                });
            }
        }

        log::info!(
            "Generated layout: {}/{} blocks in {} attempts",
            result.blocks.len(),
            max_blocks,
            result.attempts
        );
        result
    }

    fn place(&mut self, size: Size, wall: &Wall, placed: &[LayoutBlock]) -> Option<Position> {
        let ctx = PlacementContext::new(wall, placed, None, &self.config);

        let first = if placed.is_empty() {
            find_position_within_wall(size, &ctx)
        } else {
            find_adjacent_to_blocks(size, &ctx, BoundsPolicy::Strict)
        };

        first
            .or_else(|| find_random_position(size, &ctx, &mut self.rng))
            .or_else(|| scan_with_overflow(size, &ctx))
    }
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks a color from [`BLOCK_PALETTE`].
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let index = rng.gen_range(0..BLOCK_PALETTE.len());
    BLOCK_PALETTE[index].to_string()
}
