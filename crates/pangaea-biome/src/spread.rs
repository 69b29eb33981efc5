//! Spread engine: grows every biome outward in synchronized steps until the
//! whole grid is claimed.
//!
//! Each step reads from a frozen snapshot of the grid and writes into the live
//! grid, so every frontier tile sees the same pre-step state regardless of
//! the order biomes and tiles are visited in.

use hashbrown::HashMap;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::{Biome, BiomeId, Coord, GenerationError, Grid, MAX_STRENGTH};

/// Cap factor applied to `width + height` when no explicit cap is given.
const STEP_CAP_PER_EDGE: u32 = 16;

/// Lower bound for the derived cap, so tiny grids still get room to converge.
const MIN_STEP_CAP: u32 = 64;

/// Lowest roll for the strength of a freshly claimed tile, as a percentage of the source.
const CLAIM_ROLL_MIN: u32 = 80;

/// Counters for a single spread step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Successful claims, contested ones included.
    pub claimed: usize,
    /// Tiles whose strength grew through reinforcement.
    pub reinforced: usize,
    /// Total frontier size after the step.
    pub frontier: usize,
}

impl StepStats {
    /// `true` if the step left the grid exactly as it found it.
    pub fn is_idle(&self) -> bool {
        self.claimed == 0 && self.reinforced == 0
    }
}

/// Outcome of a completed [`SpreadEngine::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpreadReport {
    /// Number of synchronized steps executed.
    pub steps: u32,
    /// Claimed tiles at the end; equals the grid area.
    pub claimed: usize,
}

/// Result of one claim-or-reinforce attempt on a neighbor.
enum Attempt {
    Claimed,
    Reinforced,
    Missed,
}

/// Drives synchronized spread steps with an iteration cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpreadEngine {
    max_steps: u32,
}

impl SpreadEngine {
    pub fn new(max_steps: u32) -> Self {
        Self { max_steps }
    }

    /// Engine with the default cap for a `width x height` grid.
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self::new(Self::default_max_steps(width, height))
    }

    /// `16 * (width + height)`, never below 64.
    pub fn default_max_steps(width: usize, height: usize) -> u32 {
        let edges = u32::try_from(width.saturating_add(height)).unwrap_or(u32::MAX);
        edges.saturating_mul(STEP_CAP_PER_EDGE).max(MIN_STEP_CAP)
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Advances every biome by one synchronized step.
    ///
    /// Frontiers are recomputed against the committed grid before returning.
    pub fn step<R: Rng>(&self, grid: &mut Grid, biomes: &mut [Biome], rng: &mut R) -> StepStats {
        let snapshot = grid.clone();
        let mut stats = StepStats::default();
        let mut ties = HashMap::new();

        for biome in biomes.iter_mut() {
            let id = biome.id();
            let mut fresh = Vec::new();
            for &source in biome.frontier() {
                let strength = snapshot.cell(source).strength;
                for target in snapshot.neighbors(source) {
                    match attempt(&snapshot, grid, &mut ties, id, strength, target, rng) {
                        Attempt::Claimed => {
                            fresh.push(target);
                            stats.claimed += 1;
                        }
                        Attempt::Reinforced => stats.reinforced += 1,
                        Attempt::Missed => {}
                    }
                }
            }
            biome.extend_frontier(fresh);
        }

        for biome in biomes.iter_mut() {
            biome.refresh_frontier(grid);
            stats.frontier += biome.frontier().len();
        }
        stats
    }

    /// Steps until every tile is claimed.
    ///
    /// Zero steps run if the grid is already full.
    ///
    /// # Errors
    ///
    /// [`GenerationError::NonTerminatingSpread`] when the step cap is reached
    /// or when no frontier tile can ever claim another tile.
    pub fn run<R: Rng>(
        &self,
        grid: &mut Grid,
        biomes: &mut [Biome],
        rng: &mut R,
    ) -> Result<SpreadReport, GenerationError> {
        // Placement may have stamped over tiles listed in older frontiers.
        for biome in biomes.iter_mut() {
            biome.refresh_frontier(grid);
        }

        let total = grid.area();
        let mut steps = 0;
        loop {
            let claimed = grid.claimed_count();
            if claimed == total {
                info!(steps, tiles = total, "spread complete");
                return Ok(SpreadReport { steps, claimed });
            }
            if steps >= self.max_steps {
                warn!(steps, claimed, total, "spread hit step cap");
                return Err(GenerationError::NonTerminatingSpread {
                    steps,
                    claimed,
                    total,
                });
            }

            let stats = self.step(grid, biomes, rng);
            steps += 1;
            debug!(
                step = steps,
                claimed = stats.claimed,
                reinforced = stats.reinforced,
                frontier = stats.frontier,
                "spread step"
            );

            if stats.is_idle() && !can_claim(grid, biomes) {
                let claimed = grid.claimed_count();
                warn!(steps, claimed, total, "spread stalled");
                return Err(GenerationError::NonTerminatingSpread {
                    steps,
                    claimed,
                    total,
                });
            }
        }
    }
}

/// Applies one spread attempt from a source of `strength` onto `target`.
///
/// Ownership checks read `snapshot`; writes go to `grid`.
fn attempt<R: Rng>(
    snapshot: &Grid,
    grid: &mut Grid,
    ties: &mut HashMap<Coord, u32>,
    id: BiomeId,
    strength: u8,
    target: Coord,
    rng: &mut R,
) -> Attempt {
    let before = snapshot.cell(target);
    match before.owner {
        None => {
            let draw: u8 = rng.random_range(1..=100);
            if draw >= strength {
                return Attempt::Missed;
            }
            let roll: u32 = rng.random_range(CLAIM_ROLL_MIN..=100);
            if commit_claim(grid, ties, target, id, claim_strength(strength, roll), rng) {
                Attempt::Claimed
            } else {
                Attempt::Missed
            }
        }
        Some(owner) if owner == id && before.strength < MAX_STRENGTH => {
            let cell = grid.cell_mut(target);
            let boosted = cell
                .strength
                .saturating_add(reinforcement(strength))
                .min(MAX_STRENGTH);
            if boosted > cell.strength {
                cell.strength = boosted;
                Attempt::Reinforced
            } else {
                Attempt::Missed
            }
        }
        Some(_) => Attempt::Missed,
    }
}

/// Writes a claim into a tile that was unclaimed at the start of the step.
///
/// Several biomes may reach the same tile in one step. The strongest claim
/// stands. Equal claims are settled by reservoir sampling, so each of `k` tied
/// claimants keeps the tile with probability `1/k` whatever the biome order.
/// `ties` counts the claimants at the current top strength of contested tiles.
/// Returns whether this claim holds the tile for now.
fn commit_claim<R: Rng>(
    grid: &mut Grid,
    ties: &mut HashMap<Coord, u32>,
    target: Coord,
    id: BiomeId,
    strength: u8,
    rng: &mut R,
) -> bool {
    let cell = grid.cell_mut(target);
    if cell.is_claimed() {
        if strength < cell.strength {
            return false;
        }
        if strength == cell.strength {
            let count = ties.entry(target).or_insert(1);
            *count += 1;
            if rng.random_range(0..*count) != 0 {
                return false;
            }
        } else {
            ties.remove(&target);
        }
    }
    cell.owner = Some(id);
    cell.strength = strength;
    true
}

/// Strength of a newly claimed tile: `roll` percent of the source strength.
fn claim_strength(source: u8, roll: u32) -> u8 {
    (u32::from(source) * roll / 100) as u8
}

/// Reinforcement bonus: `source * 10 / 100`, rounded half to even.
fn reinforcement(source: u8) -> u8 {
    let (quotient, remainder) = (source / 10, source % 10);
    if remainder > 5 || (remainder == 5 && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// `true` if some frontier tile borders an unclaimed tile with a non-zero
/// chance of claiming it. A draw in `[1, 100]` must be below the source
/// strength, so strength 1 never succeeds.
fn can_claim(grid: &Grid, biomes: &[Biome]) -> bool {
    biomes.iter().flat_map(Biome::frontier).any(|&coord| {
        grid.cell(coord).strength > 1 && grid.neighbors(coord).any(|n| !grid.cell(n).is_claimed())
    })
}
