use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::biome::{classify, Biome};
use crate::error::MapError;
use crate::fields::{ClimateFields, FieldSeeds};
use crate::grid::Grid;
use crate::rivers::{carve_rivers, RiverPath, RiverSettings};

/// A biome and its display color. The color is always the biome's own; the
/// only way to change either is [`Tile::set_biome`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    biome: Biome,
    color: [f32; 3],
}

impl Tile {
    pub fn new(biome: Biome) -> Self {
        Tile {
            biome,
            color: biome.color(),
        }
    }

    pub fn set_biome(&mut self, biome: Biome) {
        *self = Tile::new(biome);
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Grid<Tile>,
}

impl Map {
    pub fn new(width: usize, height: usize) -> Self {
        Map {
            width,
            height,
            tiles: Grid::new_with(width, height, Tile::new(Biome::Plains)),
        }
    }

    pub fn get_tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.get(x, y)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.rows()
    }

    /// Coordinates of the first entrance tile, row-major.
    pub fn entrance(&self) -> Option<(usize, usize)> {
        self.tiles
            .cells()
            .find(|(_, _, tile)| tile.biome() == Biome::Entrance)
            .map(|(x, y, _)| (x, y))
    }

    pub fn count(&self, biome: Biome) -> usize {
        self.tiles.iter().filter(|t| t.biome() == biome).count()
    }
}

/// Per-biome tile counts for a finished map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiomeStats {
    counts: [usize; Biome::COUNT],
    total: usize,
}

impl BiomeStats {
    pub fn from_map(map: &Map) -> Self {
        let mut counts = [0; Biome::COUNT];
        for tile in map.tiles.iter() {
            counts[tile.biome().index()] += 1;
        }
        BiomeStats {
            counts,
            total: map.tiles.len(),
        }
    }

    pub fn count(&self, biome: Biome) -> usize {
        self.counts[biome.index()]
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn mountains_and_snow(&self) -> usize {
        self.count(Biome::Mountains) + self.count(Biome::Snow)
    }

    /// Whole percent of the map, rounded down.
    pub fn percent(&self, count: usize) -> usize {
        if self.total == 0 {
            0
        } else {
            count * 100 / self.total
        }
    }

    pub fn log_distribution(&self) {
        info!("Biome distribution:");
        let rows = [
            ("Mountains/Snow", self.mountains_and_snow()),
            ("Forest", self.count(Biome::Forest)),
            ("Plains", self.count(Biome::Plains)),
            ("Desert", self.count(Biome::Desert)),
        ];
        for (label, count) in rows {
            info!("{}: {} ({}%)", label, count, self.percent(count));
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default)]
    pub river: RiverSettings,
}

/// Everything a generation run produced, including the intermediates that
/// don't make it into the [`Map`].
#[derive(Debug, Clone)]
pub struct Generation {
    pub map: Map,
    pub fields: ClimateFields,
    pub rivers: Vec<RiverPath>,
    pub stats: BiomeStats,
}

#[derive(Debug, Clone, Default)]
pub struct MapGenerator {
    settings: GenerationSettings,
}

impl MapGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        MapGenerator { settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GenerationSettings) {
        self.settings = settings;
    }

    pub fn generate<R: Rng>(&self, width: usize, height: usize, rng: &mut R) -> Result<Map, MapError> {
        self.generate_detailed(width, height, rng).map(|run| run.map)
    }

    pub fn generate_with_stats<R: Rng>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<(Map, BiomeStats), MapError> {
        self.generate_detailed(width, height, rng)
            .map(|run| (run.map, run.stats))
    }

    /// Runs the full pipeline: climate fields, biomes, rivers, then a single
    /// entrance placed at a random cell regardless of what was there.
    pub fn generate_detailed<R: Rng>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Generation, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }

        let seeds = FieldSeeds::draw(rng);
        let fields = ClimateFields::synthesize(width, height, seeds);

        info!("Determining biomes...");
        let mut tiles = Grid::from_fn(width, height, |x, y| {
            let (elevation, moisture, temperature) = fields.at(x, y);
            Tile::new(classify(elevation, moisture, temperature))
        });

        info!("Adding rivers...");
        let rivers = carve_rivers(&mut tiles, &fields.elevation, &self.settings.river, rng);

        let entrance_x = rng.gen_range(0..width);
        let entrance_y = rng.gen_range(0..height);
        tiles[(entrance_x, entrance_y)].set_biome(Biome::Entrance);

        info!("Map generation complete ({}x{})", width, height);

        let map = Map {
            width,
            height,
            tiles,
        };
        let stats = BiomeStats::from_map(&map);
        stats.log_distribution();

        Ok(Generation {
            map,
            fields,
            rivers,
            stats,
        })
    }
}

/// Generates a `width` x `height` map with default settings.
pub fn generate_map<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<Map, MapError> {
    MapGenerator::default().generate(width, height, rng)
}
