//! Biome catalog: maps [`ArchetypeId`] to [`BiomeArchetype`] with name-based
//! lookup and seeded archetype selection.

use hashbrown::HashMap;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::{ArchetypeId, BiomeArchetype, MAX_STRENGTH};

/// Errors that can occur when registering archetypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// An archetype with this name is already registered.
    #[error("duplicate archetype name: {0}")]
    DuplicateName(String),

    /// An influence pattern entry is above 100.
    #[error("archetype {name}: influence value {value} exceeds 100")]
    PatternOutOfRange { name: String, value: u8 },

    /// Crossing costs must be positive.
    #[error("archetype {0}: crossing cost must be positive")]
    ZeroCrossingCost(String),
}

/// How [`Catalog::select`] picks an archetype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Proportional to `spawn_weight`. Zero-weight archetypes are never picked.
    #[default]
    Weighted,
    /// Every archetype is equally likely; weights are ignored.
    Uniform,
}

/// Stores all registered archetypes with O(1) lookup by ID.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    archetypes: Vec<BiomeArchetype>,
    name_to_id: HashMap<String, ArchetypeId>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new archetype, returning its assigned [`ArchetypeId`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if the name is taken,
    /// [`CatalogError::PatternOutOfRange`] for pattern values above 100 and
    /// [`CatalogError::ZeroCrossingCost`] for a zero crossing cost.
    pub fn register(&mut self, archetype: BiomeArchetype) -> Result<ArchetypeId, CatalogError> {
        if self.name_to_id.contains_key(&archetype.name) {
            return Err(CatalogError::DuplicateName(archetype.name));
        }
        let peak = archetype.max_influence();
        if peak > MAX_STRENGTH {
            return Err(CatalogError::PatternOutOfRange {
                name: archetype.name,
                value: peak,
            });
        }
        if archetype.crossing_cost == 0 {
            return Err(CatalogError::ZeroCrossingCost(archetype.name));
        }
        let id = ArchetypeId(self.archetypes.len() as u16);
        self.name_to_id.insert(archetype.name.clone(), id);
        self.archetypes.push(archetype);
        Ok(id)
    }

    /// Returns the archetype for the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn get(&self, id: ArchetypeId) -> &BiomeArchetype {
        &self.archetypes[id.0 as usize]
    }

    /// Looks up an archetype ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<ArchetypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the number of registered archetypes.
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Returns `true` if no archetypes are registered.
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Iterates archetypes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ArchetypeId, &BiomeArchetype)> {
        self.archetypes
            .iter()
            .enumerate()
            .map(|(i, a)| (ArchetypeId(i as u16), a))
    }

    /// Picks an archetype. Returns `None` when nothing is selectable: an empty
    /// catalog, or in [`SelectionMode::Weighted`] every weight being zero.
    pub fn select<R: Rng>(&self, rng: &mut R, mode: SelectionMode) -> Option<ArchetypeId> {
        match mode {
            SelectionMode::Weighted => {
                let weights = self.archetypes.iter().map(|a| u64::from(a.spawn_weight));
                let dist = WeightedIndex::new(weights).ok()?;
                Some(ArchetypeId(dist.sample(rng) as u16))
            }
            SelectionMode::Uniform => {
                if self.archetypes.is_empty() {
                    return None;
                }
                Some(ArchetypeId(rng.random_range(0..self.archetypes.len()) as u16))
            }
        }
    }

    /// Returns the same catalog with every exclusion radius set to zero.
    pub fn without_exclusion(mut self) -> Self {
        for archetype in &mut self.archetypes {
            archetype.exclusion_radius = 0;
        }
        self
    }

    /// The six built-in biome categories.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for archetype in builtin_archetypes() {
            let id = ArchetypeId(catalog.archetypes.len() as u16);
            catalog.name_to_id.insert(archetype.name.clone(), id);
            catalog.archetypes.push(archetype);
        }
        catalog
    }
}

fn builtin_archetypes() -> [BiomeArchetype; 6] {
    [
        BiomeArchetype::new("Forest", 2, 60, [6, 137, 6])
            .with_pattern([
                [100, 80, 70, 80, 100],
                [80, 100, 100, 100, 80],
                [70, 100, 100, 100, 70],
                [80, 100, 100, 100, 80],
                [100, 80, 70, 80, 100],
            ])
            .with_exclusion_radius(8),
        BiomeArchetype::new("Volcano", 4, 15, [255, 81, 0])
            .with_pattern([
                [0, 0, 0, 0, 0],
                [0, 50, 100, 50, 0],
                [0, 100, 100, 100, 0],
                [0, 50, 100, 50, 0],
                [0, 0, 0, 0, 0],
            ])
            .with_exclusion_radius(4),
        BiomeArchetype::new("Desert", 4, 30, [255, 220, 0])
            .with_pattern([
                [100, 60, 50, 60, 100],
                [60, 100, 100, 100, 60],
                [50, 100, 100, 100, 50],
                [60, 100, 100, 100, 60],
                [100, 60, 50, 60, 100],
            ])
            .with_exclusion_radius(4),
        BiomeArchetype::new("Pond", 3, 30, [12, 72, 14])
            .with_pattern([
                [40, 0, 0, 0, 40],
                [0, 100, 100, 100, 0],
                [0, 100, 100, 100, 0],
                [0, 100, 100, 100, 0],
                [40, 0, 0, 0, 40],
            ])
            .with_exclusion_radius(3),
        BiomeArchetype::new("Field", 1, 100, [99, 210, 0])
            .with_pattern([[100; 5]; 5])
            .with_exclusion_radius(9),
        BiomeArchetype::new("Mountains", 3, 40, [108, 108, 108])
            .with_pattern([
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
                [100, 100, 100, 100, 100],
                [0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0],
            ])
            .with_exclusion_radius(3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_archetypes(weight_a: u32, weight_b: u32) -> (Catalog, ArchetypeId, ArchetypeId) {
        let mut catalog = Catalog::new();
        let a = catalog
            .register(BiomeArchetype::new("a", 1, weight_a, [0, 0, 0]))
            .unwrap();
        let b = catalog
            .register(BiomeArchetype::new("b", 1, weight_b, [0, 0, 0]))
            .unwrap();
        (catalog, a, b)
    }

    #[test]
    fn test_builtin_contains_all_expected() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);
        for name in ["Forest", "Volcano", "Desert", "Pond", "Field", "Mountains"] {
            assert!(catalog.lookup_by_name(name).is_some(), "missing {name}");
        }
        let field = catalog.get(catalog.lookup_by_name("Field").unwrap());
        assert_eq!(field.crossing_cost, 1);
        assert_eq!(field.spawn_weight, 100);
        assert_eq!(field.exclusion_radius, 9);
    }

    #[test]
    fn test_builtin_archetypes_pass_validation() {
        let mut catalog = Catalog::new();
        for archetype in builtin_archetypes() {
            let name = archetype.name.clone();
            assert!(catalog.register(archetype).is_ok(), "{name} rejected");
        }
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = Catalog::new();
        catalog
            .register(BiomeArchetype::new("Desert", 4, 30, [0, 0, 0]))
            .unwrap();
        let result = catalog.register(BiomeArchetype::new("Desert", 2, 10, [1, 1, 1]));
        assert_eq!(result, Err(CatalogError::DuplicateName("Desert".into())));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_pattern_out_of_range_rejected() {
        let mut catalog = Catalog::new();
        let result =
            catalog.register(BiomeArchetype::new("Hot", 1, 1, [0, 0, 0]).with_pattern([[101; 5]; 5]));
        assert!(matches!(
            result,
            Err(CatalogError::PatternOutOfRange { value: 101, .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_zero_crossing_cost_rejected() {
        let mut catalog = Catalog::new();
        let result = catalog.register(BiomeArchetype::new("Free", 0, 1, [0, 0, 0]));
        assert_eq!(result, Err(CatalogError::ZeroCrossingCost("Free".into())));
    }

    #[test]
    fn test_weighted_never_picks_zero_weight() {
        let (catalog, a, _b) = two_archetypes(100, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..2_000 {
            assert_eq!(catalog.select(&mut rng, SelectionMode::Weighted), Some(a));
        }
    }

    #[test]
    fn test_all_zero_weights_unselectable() {
        let (catalog, _, _) = two_archetypes(0, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(catalog.select(&mut rng, SelectionMode::Weighted), None);
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let mut catalog = Catalog::new();
        for name in ["Left", "Right"] {
            catalog
                .register(BiomeArchetype::new(name, 1, u32::MAX, [0, 0, 0]))
                .unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let picks: Vec<_> = (0..64)
            .map(|_| catalog.select(&mut rng, SelectionMode::Weighted).unwrap())
            .collect();
        assert!(picks.contains(&ArchetypeId(0)));
        assert!(picks.contains(&ArchetypeId(1)));
    }

    #[test]
    fn test_empty_catalog_unselectable() {
        let catalog = Catalog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(catalog.select(&mut rng, SelectionMode::Weighted), None);
        assert_eq!(catalog.select(&mut rng, SelectionMode::Uniform), None);
    }

    #[test]
    fn test_uniform_ignores_weights() {
        let (catalog, _a, b) = two_archetypes(100, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let picked_b = (0..500)
            .filter(|_| catalog.select(&mut rng, SelectionMode::Uniform) == Some(b))
            .count();
        assert!(
            picked_b > 150 && picked_b < 350,
            "uniform selection picked zero-weight archetype {picked_b}/500 times"
        );
    }

    #[test]
    fn test_weighted_selection_deterministic() {
        let catalog = Catalog::builtin();
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(
                catalog.select(&mut rng_a, SelectionMode::Weighted),
                catalog.select(&mut rng_b, SelectionMode::Weighted)
            );
        }
    }

    #[test]
    fn test_without_exclusion_zeroes_radii() {
        let catalog = Catalog::builtin().without_exclusion();
        assert!(catalog.iter().all(|(_, a)| a.exclusion_radius == 0));
        assert_eq!(catalog.len(), 6);
    }
}
