//! Procedural tile-map generation: lattice noise, climate fields, biome
//! classification and river carving.

pub mod biome;
pub mod error;
pub mod fields;
pub mod grid;
pub mod lattice_noise;
pub mod map_generator;
pub mod rivers;
pub mod session;
pub mod terrain_renderer;

pub use biome::Biome;
pub use error::MapError;
pub use map_generator::{generate_map, BiomeStats, GenerationSettings, Map, MapGenerator, Tile};
