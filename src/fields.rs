//! Elevation, moisture and temperature fields built from lattice noise.

use ::noise::NoiseFn;
use log::info;
use rand::Rng;

use crate::grid::Grid;
use crate::lattice_noise::FractalNoise;

/// One `f64` per tile, clamped to `[0, 1]`.
pub type ScalarField = Grid<f64>;

/// Independent seeds that decorrelate the three noise passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSeeds {
    pub elevation: i32,
    pub moisture: i32,
    pub temperature: i32,
}

impl FieldSeeds {
    /// Draws elevation, moisture and temperature seeds in that order.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        FieldSeeds {
            elevation: rng.gen_range(0..=i32::MAX),
            moisture: rng.gen_range(0..=i32::MAX),
            temperature: rng.gen_range(0..=i32::MAX),
        }
    }
}

fn sample(layer: &FractalNoise, x: usize, y: usize) -> f64 {
    layer.get([x as f64, y as f64])
}

/// Fine terrain plus broad, low-octave ridgelines at reduced weight.
pub fn elevation_field(width: usize, height: usize, seed: i32) -> ScalarField {
    let base = FractalNoise::new(6, 0.5, 20.0, seed);
    let ridges = FractalNoise::new(3, 0.7, 40.0, seed.wrapping_add(100));

    Grid::from_fn(width, height, |x, y| {
        let elevation = (sample(&base, x, y) + sample(&ridges, x, y) * 0.3 + 1.0) * 0.5;
        elevation.clamp(0.0, 1.0)
    })
}

/// Lower ground holds more moisture.
pub fn moisture_field(elevation: &ScalarField, seed: i32) -> ScalarField {
    let base = FractalNoise::new(4, 0.6, 25.0, seed);

    Grid::from_fn(elevation.width(), elevation.height(), |x, y| {
        let elevation_factor = 1.0 - elevation[(x, y)] * 0.5;
        let moisture = (sample(&base, x, y) + 1.0) * 0.5 * elevation_factor;
        moisture.clamp(0.0, 1.0)
    })
}

/// Warmest along the middle row, cooling towards the top and bottom edges
/// and with altitude.
pub fn temperature_field(elevation: &ScalarField, seed: i32) -> ScalarField {
    let variation = FractalNoise::new(3, 0.4, 30.0, seed);
    let half_height = elevation.height() as f64 / 2.0;

    Grid::from_fn(elevation.width(), elevation.height(), |x, y| {
        let latitude_factor = 1.0 - (y as f64 - half_height).abs() / half_height;
        let elevation_factor = 1.0 - elevation[(x, y)] * 0.8;
        let temperature = latitude_factor * elevation_factor + sample(&variation, x, y) * 0.2;
        temperature.clamp(0.0, 1.0)
    })
}

/// The three climate fields for one generation run.
#[derive(Debug, Clone)]
pub struct ClimateFields {
    pub elevation: ScalarField,
    pub moisture: ScalarField,
    pub temperature: ScalarField,
}

impl ClimateFields {
    /// Runs the elevation, moisture and temperature passes in order; each
    /// pass covers the full grid before the next one starts.
    pub fn synthesize(width: usize, height: usize, seeds: FieldSeeds) -> Self {
        info!("Generating elevation map...");
        let elevation = elevation_field(width, height, seeds.elevation);

        info!("Generating moisture map...");
        let moisture = moisture_field(&elevation, seeds.moisture);

        info!("Generating temperature map...");
        let temperature = temperature_field(&elevation, seeds.temperature);

        ClimateFields {
            elevation,
            moisture,
            temperature,
        }
    }

    /// `(elevation, moisture, temperature)` at a cell.
    pub fn at(&self, x: usize, y: usize) -> (f64, f64, f64) {
        (
            self.elevation[(x, y)],
            self.moisture[(x, y)],
            self.temperature[(x, y)],
        )
    }
}
