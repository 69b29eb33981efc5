//! Seeded biome spreading: weighted seed placement, pattern stamping, and
//! synchronized territory growth over a fixed-size 2D grid.
//!
//! A [`WorldGenerator`] places seeds drawn from a [`Catalog`] of
//! [`BiomeArchetype`]s, then drives the [`SpreadEngine`] until every grid
//! cell belongs to some [`Biome`].

mod archetype;
mod biome;
mod catalog;
mod error;
mod generator;
mod grid;
mod placement;
mod spread;

pub mod seed;

pub use archetype::{ArchetypeId, BiomeArchetype, DEFAULT_PATTERN, InfluencePattern, PATTERN_SIZE};
pub use biome::{Biome, BiomeId};
pub use catalog::{Catalog, CatalogError, SelectionMode};
pub use error::{Aborted, GenerationError};
pub use generator::{GeneratorSettings, World, WorldGenerator};
pub use grid::{Cell, Coord, Grid, MAX_STRENGTH};
pub use placement::{apply_exclusion, choose_archetype, choose_center, place_seed, spawn};
pub use spread::{SpreadEngine, SpreadReport, StepStats};
