//! Multi-octave fractal Brownian motion (fBm) noise normalised to `[-1, 1]`.
//!
//! Composites several octaves of Perlin noise; each successive octave
//! multiplies frequency by `lacunarity` and amplitude by `persistence`.

use noise::{NoiseFn, Perlin};

/// A 2D scalar field sampled once per terrain column.
///
/// Implementations must be deterministic and should return values in `[-1, 1]`.
pub trait NoiseSource {
    /// Sample the field at `(x, z)`.
    fn sample(&self, x: f64, z: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn sample(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

/// Configuration for the fBm noise field.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// Seed of the underlying Perlin permutation table.
    pub seed: u32,
    /// Number of octaves to composite. Default: 5.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Perlin fBm noise with output normalised to `[-1, 1]`.
pub struct NoiseField {
    noise: Perlin,
    params: NoiseParams,
    max_amplitude: f64,
}

impl NoiseField {
    /// Create a new field with the given parameters.
    pub fn new(params: NoiseParams) -> Self {
        let mut max_amplitude = 0.0;
        let mut amp = 1.0;
        for _ in 0..params.octaves {
            max_amplitude += amp;
            amp *= params.persistence;
        }

        Self {
            noise: Perlin::new(params.seed),
            params,
            max_amplitude,
        }
    }

    /// Create a field with default parameters and the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(NoiseParams {
            seed,
            ..Default::default()
        })
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(NoiseParams::default())
    }
}

impl NoiseSource for NoiseField {
    fn sample(&self, x: f64, z: f64) -> f64 {
        if self.max_amplitude == 0.0 {
            return 0.0;
        }

        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        (total / self.max_amplitude).clamp(-1.0, 1.0)
    }
}

/// A field that returns the same value everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }
}
