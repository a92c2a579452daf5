//! Error taxonomy for configuration loading and region generation.
//!
//! Configuration problems are reported when parameters are loaded; once a
//! generator holds valid parameters, generation can only fail on caller
//! preconditions (a region outside the canvas or the supplied view).

use thiserror::Error;

use crate::region::{Canvas, Region};

/// Invalid or incomplete configuration. Surfaced at load time; generation
/// never proceeds with a configuration that produced one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown {kind} tag `{tag}`")]
    UnknownTag { kind: &'static str, tag: String },

    #[error("invalid noise configuration: {0}")]
    InvalidNoise(String),

    #[error("missing parameter `{0}`")]
    MissingParameter(String),

    #[error("parameter `{name}` should be a {expected}")]
    WrongType { name: String, expected: &'static str },

    #[error("parameter `{name}` is invalid: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("scale must be positive and finite, got {0}")]
    NonPositiveScale(f32),

    #[error("{name} thresholds must be ordered descending, got {values:?}")]
    ThresholdOrder { name: &'static str, values: [f32; 3] },

    #[error("no generator named `{0}`")]
    UnknownGenerator(String),

    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Caller precondition violations detected before any pixel is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("region {region:?} lies outside the {}×{} canvas", canvas.width, canvas.height)]
    RegionOutOfBounds { region: Region, canvas: Canvas },

    #[error("region {region:?} is not covered by the view over rows {rows_start}..{rows_end}")]
    RegionOutsideView { region: Region, rows_start: usize, rows_end: usize },

    #[error("generator writes {expected} layers but the output set has {found}")]
    LayerCount { expected: usize, found: usize },
}
