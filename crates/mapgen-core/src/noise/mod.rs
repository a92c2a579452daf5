//! Configurable continuous noise fields.
//!
//! A [`NoiseField`] is a pure function of `(x, y)` returning a value in
//! [-1, 1]. The sampling algorithm comes from the `noise` crate and is picked
//! by [`NoiseFieldConfig`]; callers never see which backend is behind a field.

pub mod cellular;
pub mod params;
pub mod white;

use std::fmt;

use ::noise::{
    Billow, Fbm, MultiFractal, NoiseFn, Perlin, RidgedMulti, Seedable, Simplex, SuperSimplex,
    Value,
};

use crate::error::ConfigError;
pub use params::{FractalKind, InterpolationKind, NoiseFieldConfig, NoiseKind};
pub use cellular::CellularNoise;
pub use white::WhiteNoise;

type Sampler = Box<dyn NoiseFn<f64, 2> + Send + Sync>;

/// Read-only noise sampler, safe to share across worker threads.
pub struct NoiseField {
    config: Option<NoiseFieldConfig>,
    frequency: f64,
    source: Sampler,
}

impl NoiseField {
    /// Build the sampler described by `config`.
    ///
    /// Kind mapping onto the `noise` crate: Value → `Value`, Perlin →
    /// `Perlin`, Simplex → `Simplex`, Cellular → [`CellularNoise`] (the
    /// crate's Worley kernel), Cubic → `SuperSimplex`, White →
    /// [`WhiteNoise`]. `*Fractal` kinds wrap their base in `Fbm`, `Billow` or
    /// `RidgedMulti`. The interpolation kind is carried in the config; these
    /// backends use their own fixed smoothing.
    pub fn new(config: NoiseFieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed as u32;
        let source: Sampler = match config.noise_kind {
            NoiseKind::Value => Box::new(Value::new(seed)),
            NoiseKind::ValueFractal => fractal::<Value>(&config),
            NoiseKind::Perlin => Box::new(Perlin::new(seed)),
            NoiseKind::PerlinFractal => fractal::<Perlin>(&config),
            NoiseKind::Simplex => Box::new(Simplex::new(seed)),
            NoiseKind::SimplexFractal => fractal::<Simplex>(&config),
            NoiseKind::Cellular => Box::new(CellularNoise::new(seed)),
            NoiseKind::White => Box::new(WhiteNoise::new(seed)),
            NoiseKind::Cubic => Box::new(SuperSimplex::new(seed)),
            NoiseKind::CubicFractal => fractal::<SuperSimplex>(&config),
        };
        log::trace!(
            "noise field: {} / {} seed={} octaves={} frequency={}",
            config.noise_kind,
            config.fractal_kind,
            config.seed,
            config.octaves,
            config.frequency
        );
        Ok(Self { config: Some(config), frequency: f64::from(config.frequency), source })
    }

    /// Unit-frequency white noise, used for per-pixel scatter.
    pub fn white(seed: i32) -> Self {
        let config = NoiseFieldConfig {
            noise_kind: NoiseKind::White,
            seed,
            frequency: 1.0,
            ..NoiseFieldConfig::default()
        };
        Self { config: Some(config), frequency: 1.0, source: Box::new(WhiteNoise::new(seed as u32)) }
    }

    /// Wrap an arbitrary sampler. Coordinates are passed through unscaled.
    pub fn from_source<S>(source: S) -> Self
    where
        S: NoiseFn<f64, 2> + Send + Sync + 'static,
    {
        Self { config: None, frequency: 1.0, source: Box::new(source) }
    }

    /// The config this field was built from; `None` for [`Self::from_source`].
    pub fn config(&self) -> Option<&NoiseFieldConfig> {
        self.config.as_ref()
    }

    /// Sample at `(x, y)`. Always in [-1, 1].
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let v = self.source.get([x * self.frequency, y * self.frequency]);
        v.clamp(-1.0, 1.0)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("config", &self.config)
            .field("frequency", &self.frequency)
            .finish_non_exhaustive()
    }
}

fn fractal<T>(config: &NoiseFieldConfig) -> Sampler
where
    T: Default + Seedable + NoiseFn<f64, 2> + Send + Sync + 'static,
{
    let seed = config.seed as u32;
    let octaves = config.octaves as usize;
    let gain = f64::from(config.gain);
    let lacunarity = f64::from(config.lacunarity);
    match config.fractal_kind {
        FractalKind::Fbm => Box::new(
            Fbm::<T>::new(seed)
                .set_octaves(octaves)
                .set_persistence(gain)
                .set_lacunarity(lacunarity),
        ),
        FractalKind::Billow => Box::new(
            Billow::<T>::new(seed)
                .set_octaves(octaves)
                .set_persistence(gain)
                .set_lacunarity(lacunarity),
        ),
        FractalKind::RigidMulti => Box::new(
            RidgedMulti::<T>::new(seed)
                .set_octaves(octaves)
                .set_persistence(gain)
                .set_lacunarity(lacunarity),
        ),
    }
}
