//! Fundamental value types: polar measurements in, Cartesian measurements out.

use crate::error::ConversionError;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Scalar type: f64 throughout; the decay factors are close to 1 and the
// covariance terms cancel, so single precision is not enough.
// ---------------------------------------------------------------------------

/// Converted Cartesian position [x, y]
pub type Mean2 = Vector2<f64>;

/// 2×2 converted-measurement covariance [[R11, R12], [R12, R22]]
pub type Cov2 = Matrix2<f64>;

// ---------------------------------------------------------------------------
// Polar input
// ---------------------------------------------------------------------------

/// A single polar measurement with its noise standard deviations.
///
/// Caller contract: `range >= 0` and both standard deviations finite and
/// non-negative. Nothing here checks it; see [`crate::ValidationPolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarMeasurement {
    /// Radial distance to the target (meters)
    pub range: f64,
    /// Bearing from the reference axis (radians, not wrapped)
    pub bearing: f64,
    /// Range noise standard deviation (meters)
    pub range_sd: f64,
    /// Bearing noise standard deviation (radians)
    pub bearing_sd: f64,
}

impl PolarMeasurement {
    pub fn new(range: f64, bearing: f64, range_sd: f64, bearing_sd: f64) -> Self {
        Self {
            range,
            bearing,
            range_sd,
            bearing_sd,
        }
    }

    /// Unbiased Cartesian conversion of this measurement.
    pub fn to_cartesian(&self) -> CartesianMeasurement {
        crate::unbiased::convert_unbiased(self.range, self.bearing, self.range_sd, self.bearing_sd)
    }

    /// Value of one field, used when reporting validation failures.
    pub fn field(&self, field: PolarField) -> f64 {
        match field {
            PolarField::Range => self.range,
            PolarField::Bearing => self.bearing,
            PolarField::RangeSd => self.range_sd,
            PolarField::BearingSd => self.bearing_sd,
        }
    }
}

/// Names the four components of a [`PolarMeasurement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolarField {
    Range,
    Bearing,
    RangeSd,
    BearingSd,
}

impl PolarField {
    pub const ALL: [PolarField; 4] = [
        PolarField::Range,
        PolarField::Bearing,
        PolarField::RangeSd,
        PolarField::BearingSd,
    ];
}

impl fmt::Display for PolarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolarField::Range => "range",
            PolarField::Bearing => "bearing",
            PolarField::RangeSd => "range_sd",
            PolarField::BearingSd => "bearing_sd",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Cartesian output
// ---------------------------------------------------------------------------

/// Converted position and its error covariance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartesianMeasurement {
    pub mean: Mean2,
    /// Symmetric by construction
    pub cov: Cov2,
}

impl CartesianMeasurement {
    pub fn x(&self) -> f64 {
        self.mean[0]
    }

    pub fn y(&self) -> f64 {
        self.mean[1]
    }

    /// Covariance flattened row-major, the layout measurement records use
    /// for their noise covariance.
    pub fn noise_cov_row_major(&self) -> [f64; 4] {
        [
            self.cov[(0, 0)],
            self.cov[(0, 1)],
            self.cov[(1, 0)],
            self.cov[(1, 1)],
        ]
    }
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Struct-of-slices batch input. All four slices have the same length.
#[derive(Clone, Copy, Debug)]
pub struct PolarBatch<'a> {
    range: &'a [f64],
    bearing: &'a [f64],
    range_sd: &'a [f64],
    bearing_sd: &'a [f64],
}

impl<'a> PolarBatch<'a> {
    /// Fails with [`ConversionError::ShapeMismatch`] unless all four slices
    /// have the same length.
    pub fn new(
        range: &'a [f64],
        bearing: &'a [f64],
        range_sd: &'a [f64],
        bearing_sd: &'a [f64],
    ) -> Result<Self, ConversionError> {
        let n = range.len();
        if bearing.len() != n || range_sd.len() != n || bearing_sd.len() != n {
            return Err(ConversionError::ShapeMismatch {
                range: n,
                bearing: bearing.len(),
                range_sd: range_sd.len(),
                bearing_sd: bearing_sd.len(),
            });
        }
        Ok(Self {
            range,
            bearing,
            range_sd,
            bearing_sd,
        })
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Element `i` as a measurement. Panics if `i >= len()`, like slice indexing.
    pub fn get(&self, i: usize) -> PolarMeasurement {
        PolarMeasurement::new(
            self.range[i],
            self.bearing[i],
            self.range_sd[i],
            self.bearing_sd[i],
        )
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = PolarMeasurement> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

/// Batched conversion output, index-aligned with the input batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertedBatch {
    pub means: Vec<Mean2>,
    pub covariances: Vec<Cov2>,
}

impl ConvertedBatch {
    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<CartesianMeasurement> {
        Some(CartesianMeasurement {
            mean: *self.means.get(i)?,
            cov: *self.covariances.get(i)?,
        })
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = CartesianMeasurement> + '_ {
        self.means
            .iter()
            .zip(&self.covariances)
            .map(|(mean, cov)| CartesianMeasurement {
                mean: *mean,
                cov: *cov,
            })
    }
}

impl FromIterator<CartesianMeasurement> for ConvertedBatch {
    fn from_iter<I: IntoIterator<Item = CartesianMeasurement>>(iter: I) -> Self {
        let (means, covariances) = iter.into_iter().map(|m| (m.mean, m.cov)).unzip();
        Self { means, covariances }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_rejects_mismatched_lengths() {
        let err = PolarBatch::new(&[1.0, 2.0], &[0.0, 0.0], &[1.0], &[0.1, 0.1]).unwrap_err();
        assert_eq!(
            err,
            ConversionError::ShapeMismatch {
                range: 2,
                bearing: 2,
                range_sd: 1,
                bearing_sd: 2,
            }
        );
    }

    #[test]
    fn batch_yields_elements_in_order() {
        let batch = PolarBatch::new(&[10.0, 20.0], &[0.1, 0.2], &[1.0, 2.0], &[0.01, 0.02]).unwrap();
        let items: Vec<_> = batch.iter().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], PolarMeasurement::new(20.0, 0.2, 2.0, 0.02));
    }

    #[test]
    fn empty_batch_is_valid() {
        let batch = PolarBatch::new(&[], &[], &[], &[]).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn converted_batch_collects_aligned() {
        let out: ConvertedBatch = [
            PolarMeasurement::new(10.0, 0.0, 1.0, 0.01),
            PolarMeasurement::new(20.0, 1.0, 1.0, 0.01),
        ]
        .iter()
        .map(PolarMeasurement::to_cartesian)
        .collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out.means.len(), out.covariances.len());
        assert!(out.get(2).is_none());
        assert_eq!(out.iter().count(), 2);
    }

    #[test]
    fn row_major_layout_repeats_cross_term() {
        let m = PolarMeasurement::new(500.0, 0.7, 3.0, 0.02).to_cartesian();
        let flat = m.noise_cov_row_major();
        assert_eq!(flat[1], flat[2]);
        assert_eq!(flat[0], m.cov[(0, 0)]);
        assert_eq!(flat[3], m.cov[(1, 1)]);
    }

    #[test]
    fn field_names_display() {
        let names: Vec<String> = PolarField::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["range", "bearing", "range_sd", "bearing_sd"]);
    }
}
