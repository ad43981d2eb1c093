//! Hash-based lattice noise with bilinear smoothing and octave summation.
//!
//! All functions are pure: the same coordinates and seed always produce the
//! same value, which is what lets [`smooth_noise`] sample the four lattice
//! corners around a point and interpolate between them consistently.

use ::noise::NoiseFn;

/// Pseudo-random value in `(-1.0, 1.0]` for an integer lattice point.
///
/// Integer arithmetic wraps, so every seed is valid.
pub fn noise(x: i32, y: i32, seed: i32) -> f64 {
    let n = x
        .wrapping_add(y.wrapping_mul(57))
        .wrapping_add(seed.wrapping_mul(131));
    let n = n.wrapping_shl(13) ^ n;
    let hashed = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15_731).wrapping_add(789_221))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff;
    1.0 - f64::from(hashed) / 1_073_741_824.0
}

/// Bilinear interpolation of [`noise`] at the four lattice points around
/// `(x, y)`, weighted by the fractional part of each coordinate.
pub fn smooth_noise(x: f64, y: f64, seed: i32) -> f64 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (ix, iy) = (x0 as i32, y0 as i32);

    let a = noise(ix, iy, seed);
    let b = noise(ix.wrapping_add(1), iy, seed);
    let c = noise(ix, iy.wrapping_add(1), seed);
    let d = noise(ix.wrapping_add(1), iy.wrapping_add(1), seed);

    let top = a + fx * (b - a);
    let bottom = c + fx * (d - c);
    top + fy * (bottom - top)
}

/// Sums `octaves` layers of [`smooth_noise`] sampled at `(x, y) / scale`.
///
/// Each octave doubles the frequency, multiplies the amplitude by
/// `persistence` and uses `seed + octave`. The result is not normalized;
/// its range is roughly the sum of the octave amplitudes.
pub fn fractal_noise(x: f64, y: f64, octaves: u32, persistence: f64, scale: f64, seed: i32) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0 / scale;

    for octave in 0..octaves {
        let octave_seed = seed.wrapping_add(octave as i32);
        value += smooth_noise(x * frequency, y * frequency, octave_seed) * amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }

    value
}

/// A configured fractal noise layer, usable anywhere a [`NoiseFn`] is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalNoise {
    pub octaves: u32,
    pub persistence: f64,
    pub scale: f64,
    pub seed: i32,
}

impl FractalNoise {
    pub const fn new(octaves: u32, persistence: f64, scale: f64, seed: i32) -> Self {
        FractalNoise {
            octaves,
            persistence,
            scale,
            seed,
        }
    }

    /// Sum of the per-octave amplitudes, the bound on `|get(p)|`.
    pub fn amplitude_sum(&self) -> f64 {
        (0..self.octaves).map(|i| self.persistence.powi(i as i32)).sum()
    }
}

impl NoiseFn<f64, 2> for FractalNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        fractal_noise(point[0], point[1], self.octaves, self.persistence, self.scale, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_pure() {
        for &(x, y, seed) in &[(0, 0, 0), (3, -7, 42), (1000, 250, 1_234_567), (-5, 9, i32::MAX)] {
            assert_eq!(noise(x, y, seed), noise(x, y, seed));
        }
    }

    #[test]
    fn test_noise_range() {
        for seed in [0, 1, 17, 99_999] {
            for y in -20..20 {
                for x in -20..20 {
                    let value = noise(x, y, seed);
                    assert!((-1.0..=1.0).contains(&value), "noise({x}, {y}, {seed}) = {value}");
                }
            }
        }
    }

    #[test]
    fn test_noise_varies_with_seed() {
        let differs = (0..32).any(|x| noise(x, 5, 1) != noise(x, 5, 2));
        assert!(differs, "different seeds should decorrelate the lattice");
    }

    #[test]
    fn test_smooth_noise_hits_lattice_values() {
        assert_eq!(smooth_noise(4.0, 9.0, 11), noise(4, 9, 11));
        assert_eq!(smooth_noise(-2.0, 3.0, 11), noise(-2, 3, 11));
    }

    #[test]
    fn test_smooth_noise_interpolates_between_corners() {
        let seed = 5;
        let midpoint = smooth_noise(2.5, 7.0, seed);
        let expected = (noise(2, 7, seed) + noise(3, 7, seed)) / 2.0;
        assert!((midpoint - expected).abs() < 1e-12);

        let corners = [noise(2, 7, seed), noise(3, 7, seed), noise(2, 8, seed), noise(3, 8, seed)];
        let lo = corners.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = corners.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let inside = smooth_noise(2.3, 7.6, seed);
        assert!(inside >= lo - 1e-12 && inside <= hi + 1e-12);
    }

    #[test]
    fn test_single_octave_matches_smooth_noise() {
        let value = fractal_noise(30.0, 10.0, 1, 0.5, 20.0, 8);
        assert!((value - smooth_noise(1.5, 0.5, 8)).abs() < 1e-12);
    }

    #[test]
    fn test_octaves_use_offset_seeds() {
        let two = fractal_noise(13.0, 4.0, 2, 0.5, 10.0, 3);
        let expected = smooth_noise(1.3, 0.4, 3) + smooth_noise(2.6, 0.8, 4) * 0.5;
        assert!((two - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fractal_noise_bounded_by_amplitude_sum() {
        let layer = FractalNoise::new(6, 0.5, 20.0, 77);
        let bound = layer.amplitude_sum();
        assert!((bound - 1.96875).abs() < 1e-12);
        for y in 0..40 {
            for x in 0..40 {
                let value = layer.get([x as f64, y as f64]);
                assert!(value.abs() <= bound + 1e-9);
            }
        }
    }

    #[test]
    fn test_noise_fn_matches_free_function() {
        let layer = FractalNoise::new(3, 0.7, 40.0, 100);
        assert_eq!(layer.get([12.0, 34.0]), fractal_noise(12.0, 34.0, 3, 0.7, 40.0, 100));
    }
}
