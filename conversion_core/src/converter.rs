//! Configurable front-end around the conversion kernel.
//!
//! # Processing per batch
//! 1. Check the four input lengths agree (always)
//! 2. Apply the validation policy to every element
//! 3. Convert elementwise: sequentially, or on the rayon pool once the batch
//!    reaches `parallel_threshold`
//!
//! Output order always matches input order.

use crate::{
    config::ConversionConfig,
    error::ConversionError,
    types::{CartesianMeasurement, ConvertedBatch, Cov2, Mean2, PolarBatch, PolarMeasurement},
};
use rayon::prelude::*;

/// Unbiased polar → Cartesian converter.
#[derive(Clone, Debug, Default)]
pub struct UnbiasedConverter {
    pub config: ConversionConfig,
}

impl UnbiasedConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Convert one measurement, applying the validation policy.
    pub fn convert(&self, m: &PolarMeasurement) -> Result<CartesianMeasurement, ConversionError> {
        self.check(0, m)?;
        Ok(m.to_cartesian())
    }

    /// Convert four equal-length slices elementwise.
    pub fn convert_slices(
        &self,
        range: &[f64],
        bearing: &[f64],
        range_sd: &[f64],
        bearing_sd: &[f64],
    ) -> Result<ConvertedBatch, ConversionError> {
        let batch = PolarBatch::new(range, bearing, range_sd, bearing_sd).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected polar batch");
        })?;
        self.convert_batch(&batch)
    }

    /// Convert a struct-of-slices batch.
    pub fn convert_batch(&self, batch: &PolarBatch<'_>) -> Result<ConvertedBatch, ConversionError> {
        for (i, m) in batch.iter().enumerate() {
            self.check(i, &m)?;
        }

        let n = batch.len();
        let parallel = n >= self.config.parallel_threshold;
        tracing::debug!(n, parallel, "converting polar batch");

        let (means, covariances) = if parallel {
            (0..n)
                .into_par_iter()
                .map(|i| split(batch.get(i).to_cartesian()))
                .unzip()
        } else {
            batch.iter().map(|m| split(m.to_cartesian())).unzip()
        };
        Ok(ConvertedBatch { means, covariances })
    }

    /// Convert a slice of measurements.
    pub fn convert_measurements(
        &self,
        measurements: &[PolarMeasurement],
    ) -> Result<ConvertedBatch, ConversionError> {
        for (i, m) in measurements.iter().enumerate() {
            self.check(i, m)?;
        }

        let n = measurements.len();
        let parallel = n >= self.config.parallel_threshold;
        tracing::debug!(n, parallel, "converting polar measurements");

        let (means, covariances) = if parallel {
            measurements
                .par_iter()
                .map(|m| split(m.to_cartesian()))
                .unzip()
        } else {
            measurements.iter().map(|m| split(m.to_cartesian())).unzip()
        };
        Ok(ConvertedBatch { means, covariances })
    }

    fn check(&self, index: usize, m: &PolarMeasurement) -> Result<(), ConversionError> {
        match self.config.validation.violation(m) {
            None => Ok(()),
            Some(field) => {
                let value = m.field(field);
                tracing::warn!(index, %field, value, "polar measurement rejected");
                Err(ConversionError::InvalidMeasurement {
                    index,
                    field,
                    value,
                })
            }
        }
    }
}

fn split(m: CartesianMeasurement) -> (Mean2, Cov2) {
    (m.mean, m.cov)
}

/// Convenience: convert four equal-length slices with the default config.
pub fn convert_unbiased_batch(
    range: &[f64],
    bearing: &[f64],
    range_sd: &[f64],
    bearing_sd: &[f64],
) -> Result<ConvertedBatch, ConversionError> {
    UnbiasedConverter::default().convert_slices(range, bearing, range_sd, bearing_sd)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
