//! Biome instance: one placed seed and the territory it has grown.

use crate::{ArchetypeId, Coord, Grid, MAX_STRENGTH};

/// Identifier of a placed biome. Equal to its index in the generated world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BiomeId(pub u32);

/// A biome grown from a single seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Biome {
    id: BiomeId,
    archetype: ArchetypeId,
    /// Owned tiles that may still affect a neighbor. Sorted row-major, no duplicates.
    frontier: Vec<Coord>,
    /// Every owned tile. Filled from the grid once generation stops.
    tiles: Vec<Coord>,
}

impl Biome {
    pub(crate) fn new(id: BiomeId, archetype: ArchetypeId) -> Self {
        Self {
            id,
            archetype,
            frontier: Vec::new(),
            tiles: Vec::new(),
        }
    }

    pub fn id(&self) -> BiomeId {
        self.id
    }

    pub fn archetype(&self) -> ArchetypeId {
        self.archetype
    }

    /// Tiles that will attempt to spread on the next step.
    pub fn frontier(&self) -> &[Coord] {
        &self.frontier
    }

    /// Owned tiles in row-major order, as of the last [`Biome::collect_tiles`].
    pub fn tiles(&self) -> &[Coord] {
        &self.tiles
    }

    /// Number of owned tiles.
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    pub(crate) fn add_frontier(&mut self, coord: Coord) {
        self.frontier.push(coord);
    }

    pub(crate) fn extend_frontier(&mut self, coords: impl IntoIterator<Item = Coord>) {
        self.frontier.extend(coords);
    }

    /// Drops frontier tiles this biome no longer owns and tiles that can no
    /// longer change anything, then restores sorted order.
    pub(crate) fn refresh_frontier(&mut self, grid: &Grid) {
        let id = self.id;
        self.frontier.sort_unstable();
        self.frontier.dedup();
        self.frontier
            .retain(|&coord| grid.cell(coord).owner == Some(id) && !is_inert(grid, id, coord));
    }

    /// Drops frontier tiles another biome has taken over. Order is kept.
    pub(crate) fn drop_lost_frontier(&mut self, grid: &Grid) {
        let id = self.id;
        self.frontier.retain(|&coord| grid.cell(coord).owner == Some(id));
    }

    /// Rebuilds the owned-tile list by scanning `grid`.
    pub(crate) fn collect_tiles(&mut self, grid: &Grid) {
        self.tiles = grid.owned_by(self.id).collect();
    }
}

/// A tile is inert when every neighbor is either owned by another biome or
/// owned by `id` at full strength. Such tiles never draw randomness and never
/// modify the grid again, since ownership is never revoked after a step and
/// owned strengths never decrease.
fn is_inert(grid: &Grid, id: BiomeId, coord: Coord) -> bool {
    grid.neighbors(coord).all(|n| {
        let cell = grid.cell(n);
        match cell.owner {
            Some(owner) if owner == id => cell.strength >= MAX_STRENGTH,
            Some(_) => true,
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn test_refresh_drops_lost_tiles() {
        let mut grid = Grid::new(3, 1);
        let id = BiomeId(0);
        grid.set(Coord::new(0, 0), Cell::owned(id, 90));
        grid.set(Coord::new(0, 1), Cell::owned(BiomeId(1), 90));

        let mut biome = Biome::new(id, ArchetypeId(0));
        biome.add_frontier(Coord::new(0, 1));
        biome.add_frontier(Coord::new(0, 0));
        biome.refresh_frontier(&grid);

        assert_eq!(biome.frontier(), &[Coord::new(0, 0)][..]);
    }

    #[test]
    fn test_refresh_sorts_and_dedups() {
        let mut grid = Grid::new(4, 1);
        let id = BiomeId(2);
        for col in 0..2 {
            grid.set(Coord::new(0, col), Cell::owned(id, 50));
        }
        let mut biome = Biome::new(id, ArchetypeId(0));
        biome.extend_frontier([Coord::new(0, 1), Coord::new(0, 0), Coord::new(0, 1)]);
        biome.refresh_frontier(&grid);
        assert_eq!(biome.frontier(), &[Coord::new(0, 0), Coord::new(0, 1)][..]);
    }

    #[test]
    fn test_saturated_tile_pruned() {
        let mut grid = Grid::new(2, 1);
        let id = BiomeId(0);
        grid.set(Coord::new(0, 0), Cell::owned(id, 100));
        grid.set(Coord::new(0, 1), Cell::owned(id, 100));

        let mut biome = Biome::new(id, ArchetypeId(0));
        biome.extend_frontier([Coord::new(0, 0), Coord::new(0, 1)]);
        biome.refresh_frontier(&grid);
        assert!(biome.frontier().is_empty());
    }

    #[test]
    fn test_tile_next_to_weak_own_tile_kept() {
        let mut grid = Grid::new(2, 1);
        let id = BiomeId(0);
        grid.set(Coord::new(0, 0), Cell::owned(id, 100));
        grid.set(Coord::new(0, 1), Cell::owned(id, 60));

        let mut biome = Biome::new(id, ArchetypeId(0));
        biome.extend_frontier([Coord::new(0, 0), Coord::new(0, 1)]);
        biome.refresh_frontier(&grid);
        // (0,0) can still reinforce (0,1); (0,1) only borders a saturated tile.
        assert_eq!(biome.frontier(), &[Coord::new(0, 0)][..]);
    }

    #[test]
    fn test_collect_tiles_counts_non_frontier() {
        let mut grid = Grid::new(2, 2);
        let id = BiomeId(0);
        for coord in grid.coords().collect::<Vec<_>>() {
            grid.set(coord, Cell::owned(id, 100));
        }
        let mut biome = Biome::new(id, ArchetypeId(0));
        biome.refresh_frontier(&grid);
        biome.collect_tiles(&grid);
        assert!(biome.frontier().is_empty());
        assert_eq!(biome.area(), 4);
    }
}
