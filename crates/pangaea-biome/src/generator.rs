//! World generator: validates settings, places seeds, and runs the spread
//! engine to full coverage.

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use crate::{
    Aborted, ArchetypeId, Biome, BiomeArchetype, BiomeId, Catalog, Coord, GenerationError, Grid,
    SelectionMode, SpreadEngine, SpreadReport, placement,
};

/// Parameters for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Grid width in tiles.
    pub width: usize,
    /// Grid height in tiles.
    pub height: usize,
    /// Number of seeds to place before spreading.
    pub seed_count: usize,
    /// How archetypes are picked for each seed.
    pub selection: SelectionMode,
    /// Spread step cap. `None` derives one from the grid size.
    pub max_steps: Option<u32>,
}

impl GeneratorSettings {
    pub fn new(width: usize, height: usize, seed_count: usize) -> Self {
        Self {
            width,
            height,
            seed_count,
            selection: SelectionMode::Weighted,
            max_steps: None,
        }
    }

    fn validate(&self) -> Result<(), GenerationError> {
        if self.width == 0 || self.height == 0 {
            return Err(GenerationError::InvalidConfiguration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        let area = self.width.checked_mul(self.height).ok_or_else(|| {
            GenerationError::InvalidConfiguration(format!(
                "grid {}x{} is too large",
                self.width, self.height
            ))
        })?;
        if self.seed_count > area {
            return Err(GenerationError::InvalidConfiguration(format!(
                "{} seeds do not fit in {area} tiles",
                self.seed_count
            )));
        }
        if u32::try_from(self.seed_count).is_err() {
            return Err(GenerationError::InvalidConfiguration(format!(
                "{} seeds exceed the biome id range",
                self.seed_count
            )));
        }
        Ok(())
    }
}

/// Generates biome maps from validated settings and a shared catalog.
#[derive(Clone, Debug)]
pub struct WorldGenerator {
    settings: GeneratorSettings,
    catalog: Arc<Catalog>,
    engine: SpreadEngine,
}

impl WorldGenerator {
    /// Validates `settings` before any grid is allocated.
    ///
    /// # Errors
    ///
    /// [`GenerationError::InvalidConfiguration`] for a zero dimension or more
    /// seeds than tiles.
    pub fn new(settings: GeneratorSettings, catalog: impl Into<Arc<Catalog>>) -> Result<Self, GenerationError> {
        settings.validate()?;
        let engine = match settings.max_steps {
            Some(cap) => SpreadEngine::new(cap),
            None => SpreadEngine::for_grid(settings.width, settings.height),
        };
        Ok(Self {
            settings,
            catalog: catalog.into(),
            engine,
        })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Runs one full generation with randomness drawn from `rng`.
    ///
    /// Seeding stops early, without error, once no placement is available.
    ///
    /// # Errors
    ///
    /// [`Aborted`] when the spread cannot cover the grid. It carries the
    /// partial world.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<World, Aborted> {
        let settings = &self.settings;
        info!(
            width = settings.width,
            height = settings.height,
            seeds = settings.seed_count,
            "generating world"
        );

        let mut grid = Grid::new(settings.width, settings.height);
        let mut biomes: Vec<Biome> = Vec::with_capacity(settings.seed_count);
        for id in (0..).take(settings.seed_count).map(BiomeId) {
            let result = placement::place_seed(
                &mut grid,
                &mut biomes,
                &self.catalog,
                settings.selection,
                id,
                rng,
            );
            match result {
                Ok(biome) => biomes.push(biome),
                Err(e) => {
                    warn!(placed = biomes.len(), requested = settings.seed_count, "stopped seeding: {e}");
                    break;
                }
            }
        }
        let seeds_placed = biomes.len();

        let outcome = self.engine.run(&mut grid, &mut biomes, rng);
        for biome in &mut biomes {
            biome.collect_tiles(&grid);
        }
        let world = World {
            grid,
            biomes,
            catalog: Arc::clone(&self.catalog),
            seeds_placed,
            spread: outcome.as_ref().ok().copied(),
        };

        match outcome {
            Ok(report) => {
                info!(biomes = world.biomes.len(), steps = report.steps, "world generated");
                Ok(world)
            }
            Err(error) => Err(Aborted {
                error,
                partial: world,
            }),
        }
    }
}

/// A generated biome map: the final grid plus every biome that grew on it.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    biomes: Vec<Biome>,
    catalog: Arc<Catalog>,
    seeds_placed: usize,
    spread: Option<SpreadReport>,
}

impl World {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Biomes in placement order; a biome's [`BiomeId`] is its index here.
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the biome with the given ID, if it exists.
    pub fn biome(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(id.0 as usize)
    }

    /// Seeds actually placed. May be below the requested count.
    pub fn seeds_placed(&self) -> usize {
        self.seeds_placed
    }

    /// Spread statistics, or `None` if the spread was aborted.
    pub fn spread_report(&self) -> Option<SpreadReport> {
        self.spread
    }

    /// `true` if every tile has an owner.
    pub fn is_complete(&self) -> bool {
        self.grid.is_fully_claimed()
    }

    /// Biome owning `coord`, if any.
    pub fn biome_at(&self, coord: Coord) -> Option<&Biome> {
        let owner = self.grid.get(coord)?.owner?;
        self.biome(owner)
    }

    /// Archetype of the biome owning `coord`, if any.
    pub fn archetype_at(&self, coord: Coord) -> Option<&BiomeArchetype> {
        self.biome_at(coord)
            .map(|biome| self.catalog.get(biome.archetype()))
    }

    /// Movement cost for crossing `coord`. `None` for unclaimed or out-of-bounds tiles.
    pub fn crossing_cost_at(&self, coord: Coord) -> Option<u32> {
        self.archetype_at(coord).map(|a| a.crossing_cost)
    }

    /// Total owned area per archetype, in catalog order. Archetypes with no
    /// tiles are included with zero area.
    pub fn area_by_archetype(&self) -> Vec<(ArchetypeId, usize)> {
        let mut areas: Vec<(ArchetypeId, usize)> =
            self.catalog.iter().map(|(id, _)| (id, 0)).collect();
        for biome in &self.biomes {
            areas[biome.archetype().0 as usize].1 += biome.area();
        }
        areas
    }
}
