//! `conversion_core` — Unbiased conversion of polar radar measurements into
//! Cartesian position + covariance.
//!
//! # Module layout
//! - [`types`]     — Value types (polar input, Cartesian output, batches)
//! - [`unbiased`]  — The conversion kernel (Mo et al., IEEE TAES 1998)
//! - [`converter`] — Configurable scalar / batched front-end
//! - [`config`]    — Conversion configuration and validation policy
//! - [`error`]     — Error type
//! - [`sensor`]    — Polar noise description of a sensor

pub mod config;
pub mod converter;
pub mod error;
pub mod sensor;
pub mod types;
pub mod unbiased;

pub use config::{ConversionConfig, ValidationPolicy};
pub use converter::{convert_unbiased_batch, UnbiasedConverter};
pub use error::ConversionError;
pub use sensor::SensorNoise;
pub use types::{
    CartesianMeasurement, ConvertedBatch, Cov2, Mean2, PolarBatch, PolarField, PolarMeasurement,
};
pub use unbiased::{convert_naive, convert_unbiased, ConversionFactors};
