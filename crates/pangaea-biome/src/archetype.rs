//! Biome archetype: the immutable template shared by every seed of one category.

/// Side length of an influence pattern.
pub const PATTERN_SIZE: usize = 5;

/// Spawn-time stamp strengths, row-major, centered on the seed tile.
/// A value of `0` leaves the grid tile untouched.
pub type InfluencePattern = [[u8; PATTERN_SIZE]; PATTERN_SIZE];

/// Single full-strength tile at the pattern center.
pub const DEFAULT_PATTERN: InfluencePattern = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 100, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
];

/// Exclusion radius used when an archetype does not set one.
const DEFAULT_EXCLUSION_RADIUS: u32 = 5;

/// Index of an archetype inside its [`Catalog`](crate::Catalog).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchetypeId(pub u16);

/// Full descriptor for one biome category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeArchetype {
    /// Display name, unique within a catalog (e.g. "Forest").
    pub name: String,
    /// Movement difficulty for units crossing this biome. Always positive.
    pub crossing_cost: u32,
    /// Relative likelihood of being picked for a new seed. `0` disables it.
    pub spawn_weight: u32,
    /// Stamp applied around the seed center.
    pub influence_pattern: InfluencePattern,
    /// Reserved. Every built-in archetype uses `100`.
    pub spreading_chance: u8,
    /// Half-width of the square around the seed in which other seeds are discouraged.
    pub exclusion_radius: u32,
    /// RGB display color for renderers.
    pub color: [u8; 3],
}

impl BiomeArchetype {
    /// Creates an archetype with the single-tile default pattern.
    pub fn new(name: impl Into<String>, crossing_cost: u32, spawn_weight: u32, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            crossing_cost,
            spawn_weight,
            influence_pattern: DEFAULT_PATTERN,
            spreading_chance: 100,
            exclusion_radius: DEFAULT_EXCLUSION_RADIUS,
            color,
        }
    }

    pub fn with_pattern(mut self, pattern: InfluencePattern) -> Self {
        self.influence_pattern = pattern;
        self
    }

    pub fn with_exclusion_radius(mut self, radius: u32) -> Self {
        self.exclusion_radius = radius;
        self
    }

    /// Non-zero pattern entries as `(row_offset, col_offset, strength)` relative
    /// to the pattern center, in row-major order.
    pub fn stamp_offsets(&self) -> impl Iterator<Item = (isize, isize, u8)> + '_ {
        let mid = (PATTERN_SIZE / 2) as isize;
        self.influence_pattern
            .iter()
            .enumerate()
            .flat_map(move |(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, v)| **v > 0)
                    .map(move |(c, v)| (r as isize - mid, c as isize - mid, *v))
            })
    }

    /// Largest value in the influence pattern.
    pub fn max_influence(&self) -> u8 {
        self.influence_pattern
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern_single_center_offset() {
        let arch = BiomeArchetype::new("Plain", 1, 10, [0, 0, 0]);
        let offsets: Vec<_> = arch.stamp_offsets().collect();
        assert_eq!(offsets, vec![(0, 0, 100)]);
        assert_eq!(arch.spreading_chance, 100);
        assert_eq!(arch.exclusion_radius, 5);
    }

    #[test]
    fn test_stamp_offsets_skip_zero_entries() {
        let arch = BiomeArchetype::new("Ridge", 3, 40, [0, 0, 0]).with_pattern([
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [100, 100, 100, 100, 100],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
        ]);
        let offsets: Vec<_> = arch.stamp_offsets().collect();
        assert_eq!(offsets.len(), 5);
        assert_eq!(offsets[0], (0, -2, 100));
        assert_eq!(offsets[4], (0, 2, 100));
    }

    #[test]
    fn test_corner_offsets() {
        let arch = BiomeArchetype::new("Ponds", 3, 30, [0, 0, 0]).with_pattern([
            [40, 0, 0, 0, 40],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [40, 0, 0, 0, 40],
        ]);
        let offsets: Vec<_> = arch.stamp_offsets().collect();
        assert_eq!(
            offsets,
            vec![(-2, -2, 40), (-2, 2, 40), (2, -2, 40), (2, 2, 40)]
        );
        assert_eq!(arch.max_influence(), 40);
    }
}
