//! Greedy downhill river carving.

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::fields::ScalarField;
use crate::grid::Grid;
use crate::map_generator::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiverSettings {
    /// Number of random source cells tried per map.
    pub attempts: usize,
    /// Maximum number of downhill steps per river.
    pub max_length: usize,
    /// Sources at or below this elevation are discarded.
    pub source_elevation: f64,
}

impl Default for RiverSettings {
    fn default() -> Self {
        RiverSettings {
            attempts: 8,
            max_length: 50,
            source_elevation: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverEnd {
    /// No neighbor was strictly lower.
    LocalMinimum,
    /// The river stepped onto water.
    ReachedWater,
    /// The step limit was hit.
    MaxLength,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiverPath {
    pub source: (usize, usize),
    /// Cells stepped onto after leaving the source, in order.
    pub cells: Vec<(usize, usize)>,
    pub end: RiverEnd,
}

impl RiverPath {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The strictly lowest Moore neighbor below `(x, y)`. Ties go to the first
/// neighbor in scan order, so the result depends on grid orientation.
pub fn lowest_neighbor(elevation: &ScalarField, x: usize, y: usize) -> Option<(usize, usize)> {
    let mut lowest = elevation[(x, y)];
    let mut best = None;

    for (nx, ny) in elevation.moore_neighbors(x, y) {
        let candidate = elevation[(nx, ny)];
        if candidate < lowest {
            lowest = candidate;
            best = Some((nx, ny));
        }
    }

    best
}

/// Walks downhill from `source`, painting river over every tile whose biome
/// doesn't block rivers.
pub fn trace_river(
    tiles: &mut Grid<Tile>,
    elevation: &ScalarField,
    source: (usize, usize),
    max_length: usize,
) -> RiverPath {
    let mut cells = Vec::new();
    let mut current = source;

    while cells.len() < max_length {
        let Some(next) = lowest_neighbor(elevation, current.0, current.1) else {
            return RiverPath {
                source,
                cells,
                end: RiverEnd::LocalMinimum,
            };
        };

        current = next;
        cells.push(current);

        let tile = &mut tiles[current];
        if !tile.biome().blocks_rivers() {
            tile.set_biome(Biome::River);
        }

        if tile.biome() == Biome::Water {
            return RiverPath {
                source,
                cells,
                end: RiverEnd::ReachedWater,
            };
        }
    }

    RiverPath {
        source,
        cells,
        end: RiverEnd::MaxLength,
    }
}

/// Tries `settings.attempts` random sources and carves a river from each one
/// that lies above the source elevation. Rivers may cross or merge.
pub fn carve_rivers<R: Rng>(
    tiles: &mut Grid<Tile>,
    elevation: &ScalarField,
    settings: &RiverSettings,
    rng: &mut R,
) -> Vec<RiverPath> {
    let mut rivers = Vec::new();

    for attempt in 0..settings.attempts {
        let x = rng.gen_range(0..elevation.width());
        let y = rng.gen_range(0..elevation.height());

        if elevation[(x, y)] <= settings.source_elevation {
            trace!("River attempt {} at ({}, {}) too low, skipped", attempt, x, y);
            continue;
        }

        let river = trace_river(tiles, elevation, (x, y), settings.max_length);
        debug!(
            "River {} from ({}, {}): {} steps, {:?}",
            attempt,
            x,
            y,
            river.len(),
            river.end
        );
        rivers.push(river);
    }

    rivers
}
