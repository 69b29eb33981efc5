//! Per-archetype summary of a generated world.

use std::fmt::Write;

use pangaea_biome::World;

/// Aggregated figures for one archetype.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeSummary {
    pub name: String,
    /// Biome instances of this archetype.
    pub seeds: usize,
    /// Owned tiles across those instances.
    pub area: usize,
    /// Fraction of the grid, in `[0.0, 1.0]`.
    pub share: f64,
    pub crossing_cost: u32,
}

/// One row per archetype that received at least one seed, in catalog order.
pub fn summarize(world: &World) -> Vec<BiomeSummary> {
    let total = world.grid().area().max(1) as f64;
    world
        .area_by_archetype()
        .into_iter()
        .filter_map(|(id, area)| {
            let seeds = world
                .biomes()
                .iter()
                .filter(|b| b.archetype() == id)
                .count();
            if seeds == 0 {
                return None;
            }
            let archetype = world.catalog().get(id);
            Some(BiomeSummary {
                name: archetype.name.clone(),
                seeds,
                area,
                share: area as f64 / total,
                crossing_cost: archetype.crossing_cost,
            })
        })
        .collect()
}

/// Fixed-width text table of `rows`.
pub fn render_table(rows: &[BiomeSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>6} {:>8} {:>7} {:>5}",
        "biome", "seeds", "tiles", "share", "cost"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>8} {:>6.1}% {:>5}",
            row.name,
            row.seeds,
            row.area,
            row.share * 100.0,
            row.crossing_cost
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pangaea_biome::{BiomeArchetype, Catalog, GeneratorSettings, WorldGenerator, seed};

    fn two_kind_world() -> World {
        let mut catalog = Catalog::new();
        catalog
            .register(BiomeArchetype::new("Field", 1, 100, [0, 0, 0]).with_exclusion_radius(0))
            .unwrap();
        catalog
            .register(BiomeArchetype::new("Unused", 5, 0, [0, 0, 0]))
            .unwrap();
        WorldGenerator::new(GeneratorSettings::new(8, 8, 2), catalog)
            .unwrap()
            .generate(&mut seed::world_rng(17))
            .unwrap()
    }

    #[test]
    fn test_summary_skips_unseeded_archetypes() {
        let rows = summarize(&two_kind_world());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Field");
        assert_eq!(rows[0].seeds, 2);
        assert_eq!(rows[0].area, 64);
        assert!((rows[0].share - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let table = render_table(&summarize(&two_kind_world()));
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("biome"));
        assert!(lines[1].starts_with("Field"));
        assert!(lines[1].contains("100.0%"));
    }
}
