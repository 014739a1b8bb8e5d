//! Polar measurement noise of a sensor.

use crate::types::{CartesianMeasurement, PolarMeasurement};
use serde::{Deserialize, Serialize};

/// Noise standard deviations of a polar (range + bearing) sensor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorNoise {
    /// Range standard deviation (meters)
    pub range_noise_std: f64,
    /// Bearing standard deviation (radians)
    pub bearing_noise_std: f64,
}

impl Default for SensorNoise {
    fn default() -> Self {
        Self {
            range_noise_std: 50.0,   // 50 m
            bearing_noise_std: 0.01, // ~0.6°
        }
    }
}

impl SensorNoise {
    pub fn new(range_noise_std: f64, bearing_noise_std: f64) -> Self {
        Self {
            range_noise_std,
            bearing_noise_std,
        }
    }

    /// Attach this sensor's noise to a raw (range, bearing) detection.
    pub fn measurement(&self, range: f64, bearing: f64) -> PolarMeasurement {
        PolarMeasurement::new(range, bearing, self.range_noise_std, self.bearing_noise_std)
    }

    /// Unbiased Cartesian conversion of a raw detection from this sensor.
    pub fn convert(&self, range: f64, bearing: f64) -> CartesianMeasurement {
        self.measurement(range, bearing).to_cartesian()
    }
}
