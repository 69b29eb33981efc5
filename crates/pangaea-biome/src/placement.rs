//! Seed placement: archetype and center selection, pattern stamping, and
//! exclusion zones.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use tracing::debug;

use crate::{
    ArchetypeId, Biome, BiomeArchetype, BiomeId, Catalog, Cell, Coord, GenerationError, Grid,
    SelectionMode,
};

/// Picks the archetype for the next seed.
///
/// # Errors
///
/// [`GenerationError::NoPlacementAvailable`] if no archetype is selectable.
pub fn choose_archetype<R: Rng>(
    catalog: &Catalog,
    mode: SelectionMode,
    rng: &mut R,
) -> Result<ArchetypeId, GenerationError> {
    catalog
        .select(rng, mode)
        .ok_or(GenerationError::NoPlacementAvailable)
}

/// Picks a seed center among unclaimed tiles, weighted by their openness.
///
/// Tiles inside an exclusion zone have openness 0 and are never chosen.
///
/// # Errors
///
/// [`GenerationError::NoPlacementAvailable`] if there is no unclaimed tile or
/// every unclaimed tile has openness 0.
pub fn choose_center<R: Rng>(grid: &Grid, rng: &mut R) -> Result<Coord, GenerationError> {
    let candidates: Vec<(Coord, u8)> = grid
        .unclaimed()
        .map(|(coord, cell)| (coord, cell.strength))
        .collect();
    let dist = WeightedIndex::new(candidates.iter().map(|(_, openness)| u64::from(*openness)))
        .map_err(|_| GenerationError::NoPlacementAvailable)?;
    Ok(candidates[dist.sample(rng)].0)
}

/// Creates biome `id` at `center`: stamps the archetype's influence pattern,
/// then closes the exclusion zone around it.
///
/// Every in-bounds tile under a non-zero pattern entry becomes owned by the
/// new biome with the pattern value as strength and joins its frontier.
/// Stamped tiles previously held by a biome in `placed` are removed from that
/// biome's frontier.
pub fn spawn(
    grid: &mut Grid,
    placed: &mut [Biome],
    id: BiomeId,
    archetype_id: ArchetypeId,
    archetype: &BiomeArchetype,
    center: Coord,
) -> Biome {
    let mut biome = Biome::new(id, archetype_id);
    let mut displaced: Vec<BiomeId> = Vec::new();
    for (d_row, d_col, strength) in archetype.stamp_offsets() {
        let Some(coord) = center.offset(d_row, d_col) else {
            continue;
        };
        let Some(previous) = grid.get(coord).map(|cell| cell.owner) else {
            continue;
        };
        if let Some(owner) = previous
            && owner != id
            && !displaced.contains(&owner)
        {
            displaced.push(owner);
        }
        *grid.cell_mut(coord) = Cell::owned(id, strength);
        biome.add_frontier(coord);
    }
    for other in placed.iter_mut().filter(|b| displaced.contains(&b.id())) {
        other.drop_lost_frontier(grid);
    }
    apply_exclusion(grid, center, archetype.exclusion_radius);
    biome
}

/// Sets openness to 0 on every unclaimed tile in the square of half-width
/// `radius` around `center`, bounds inclusive. Returns the number of tiles closed.
pub fn apply_exclusion(grid: &mut Grid, center: Coord, radius: u32) -> usize {
    if grid.area() == 0 {
        return 0;
    }
    let radius = radius as usize;
    let last_row = center.row.saturating_add(radius).min(grid.height() - 1);
    let last_col = center.col.saturating_add(radius).min(grid.width() - 1);
    let rows = center.row.saturating_sub(radius)..=last_row;
    let cols = center.col.saturating_sub(radius)..=last_col;

    let mut closed = 0;
    for row in rows {
        for col in cols.clone() {
            let cell = grid.cell_mut(Coord::new(row, col));
            if !cell.is_claimed() && cell.strength > 0 {
                cell.strength = 0;
                closed += 1;
            }
        }
    }
    closed
}

/// Places one seed: selects an archetype and a center, then [`spawn`]s it
/// over the biomes in `placed`.
///
/// # Errors
///
/// [`GenerationError::NoPlacementAvailable`] if either selection fails. The
/// grid is left untouched in that case.
pub fn place_seed<R: Rng>(
    grid: &mut Grid,
    placed: &mut [Biome],
    catalog: &Catalog,
    mode: SelectionMode,
    id: BiomeId,
    rng: &mut R,
) -> Result<Biome, GenerationError> {
    let archetype_id = choose_archetype(catalog, mode, rng)?;
    let center = choose_center(grid, rng)?;
    let archetype = catalog.get(archetype_id);
    let biome = spawn(grid, placed, id, archetype_id, archetype, center);
    debug!(
        biome = id.0,
        archetype = %archetype.name,
        row = center.row,
        col = center.col,
        stamped = biome.frontier().len(),
        "placed seed"
    );
    Ok(biome)
}
