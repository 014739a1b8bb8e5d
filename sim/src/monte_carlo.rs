//! Monte Carlo consistency check for converted measurements.
//!
//! Per sample:
//! 1. Draw r ~ N(r₀, σr²), β ~ N(β₀, σβ²)
//! 2. Convert (r, β) with the unbiased converter and with the naive projection
//! 3. Record the errors against the true position and eᵀ R⁻¹ e (NEES)
//!
//! A consistent converter has zero mean error and mean NEES ≈ 2.

use crate::scenarios::ConversionScenario;
use conversion_core::{convert_naive, Cov2, Mean2, PolarField, PolarMeasurement, ValidationPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, NormalError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Monte Carlo run needs at least one sample")]
    NoSamples,
    #[error("invalid scenario: {field} = {value}")]
    InvalidScenario { field: PolarField, value: f64 },
    #[error("invalid sensor noise: {0}")]
    InvalidNoise(#[from] NormalError),
    #[error("converted covariance is singular at sample {sample}")]
    SingularCovariance { sample: usize },
}

/// Statistics of one Monte Carlo run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub scenario: String,
    pub samples: usize,
    /// Mean of (unbiased estimate − truth)
    pub mean_error: Mean2,
    /// Mean of (naive projection − truth)
    pub naive_mean_error: Mean2,
    /// Standard error of `mean_error`, per axis
    pub standard_error: Mean2,
    /// Empirical covariance of the unbiased errors
    pub sample_cov: Cov2,
    /// Average of the converter's covariances
    pub mean_predicted_cov: Cov2,
    /// Average eᵀ R⁻¹ e over all samples
    pub mean_nees: f64,
}

impl ConsistencyReport {
    /// True if every axis of the mean error lies within `k` standard errors of zero.
    pub fn is_unbiased_within(&self, k: f64) -> bool {
        self.mean_error
            .iter()
            .zip(self.standard_error.iter())
            .all(|(e, se)| e.abs() <= k * se)
    }
}

/// Seeded Monte Carlo runner. Same seed ⇒ same reports.
pub struct MonteCarlo {
    rng: ChaCha8Rng,
}

impl MonteCarlo {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn run(
        &mut self,
        scenario: &ConversionScenario,
        samples: usize,
    ) -> Result<ConsistencyReport, SimError> {
        if samples == 0 {
            return Err(SimError::NoSamples);
        }
        // Normal::new accepts a negative std_dev
        let template = scenario.noise.measurement(scenario.range, scenario.bearing);
        if let Some(field) = ValidationPolicy::Strict.violation(&template) {
            return Err(SimError::InvalidScenario {
                field,
                value: template.field(field),
            });
        }
        let range_dist = Normal::new(scenario.range, scenario.noise.range_noise_std)?;
        let bearing_dist = Normal::new(scenario.bearing, scenario.noise.bearing_noise_std)?;
        let truth = scenario.truth();

        let mut errors = Vec::with_capacity(samples);
        let mut naive_sum = Mean2::zeros();
        let mut predicted_sum = Cov2::zeros();
        let mut nees_sum = 0.0;

        for sample in 0..samples {
            let r = range_dist.sample(&mut self.rng);
            let b = bearing_dist.sample(&mut self.rng);

            let converted = scenario.noise.measurement(r, b).to_cartesian();
            let err = converted.mean - truth;
            let r_inv = converted
                .cov
                .try_inverse()
                .ok_or(SimError::SingularCovariance { sample })?;

            nees_sum += err.dot(&(r_inv * err));
            predicted_sum += converted.cov;
            naive_sum += convert_naive(r, b) - truth;
            errors.push(err);
        }

        let n = samples as f64;
        let mean_error = errors.iter().sum::<Mean2>() / n;
        let sample_cov = errors
            .iter()
            .map(|e| {
                let d = e - mean_error;
                d * d.transpose()
            })
            .sum::<Cov2>()
            / n;
        let standard_error = Mean2::new(
            (sample_cov[(0, 0)] / n).sqrt(),
            (sample_cov[(1, 1)] / n).sqrt(),
        );

        let report = ConsistencyReport {
            scenario: scenario.name.clone(),
            samples,
            mean_error,
            naive_mean_error: naive_sum / n,
            standard_error,
            sample_cov,
            mean_predicted_cov: predicted_sum / n,
            mean_nees: nees_sum / n,
        };
        tracing::trace!(
            scenario = %report.scenario,
            samples,
            mean_nees = report.mean_nees,
            "monte carlo run finished"
        );
        Ok(report)
    }

    /// Convenience: run against a fixed polar measurement template.
    pub fn run_measurement(
        &mut self,
        truth: &PolarMeasurement,
        samples: usize,
    ) -> Result<ConsistencyReport, SimError> {
        let scenario = ConversionScenario {
            name: format!("r={} b={}", truth.range, truth.bearing),
            range: truth.range,
            bearing: truth.bearing,
            noise: conversion_core::SensorNoise::new(truth.range_sd, truth.bearing_sd),
        };
        self.run(&scenario, samples)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
