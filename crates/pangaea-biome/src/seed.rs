//! Deterministic seeded generation utilities.
//!
//! Provides the world RNG derived from a `u64` seed and a content hash of the
//! grid for determinism verification.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::Grid;

/// Derive the generation RNG for a world seed.
///
/// The returned RNG produces an identical sequence for the same seed
/// regardless of thread or platform.
pub fn world_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Hash the dimensions and every cell of `grid` for determinism comparison.
pub fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.width().hash(&mut hasher);
    grid.height().hash(&mut hasher);
    grid.cells().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BiomeId, Cell, Coord};
    use rand::RngCore;

    #[test]
    fn test_world_rng_deterministic() {
        let mut rng_a = world_rng(42);
        let mut rng_b = world_rng(42);
        for _ in 0..1000 {
            assert_eq!(
                rng_a.next_u64(),
                rng_b.next_u64(),
                "ChaCha8Rng sequences must match for same seed"
            );
        }
    }

    #[test]
    fn test_hash_grid_tracks_content() {
        let a = Grid::new(4, 4);
        let mut b = Grid::new(4, 4);
        assert_eq!(hash_grid(&a), hash_grid(&b));

        b.set(Coord::new(1, 2), Cell::owned(BiomeId(0), 80));
        assert_ne!(hash_grid(&a), hash_grid(&b));
    }

    #[test]
    fn test_hash_grid_includes_shape() {
        assert_ne!(hash_grid(&Grid::new(2, 8)), hash_grid(&Grid::new(8, 2)));
    }
}
