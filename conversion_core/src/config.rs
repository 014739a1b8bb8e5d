//! Conversion configuration.

use crate::types::{PolarField, PolarMeasurement};
use serde::{Deserialize, Serialize};

/// How strictly inputs are checked before conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Caller contract only. Negative or non-finite inputs flow through into
    /// degenerate output.
    #[default]
    Unchecked,
    /// Reject non-finite fields, negative range and negative standard
    /// deviations.
    Strict,
}

impl ValidationPolicy {
    /// First field of `m` that the policy rejects, if any.
    pub fn violation(&self, m: &PolarMeasurement) -> Option<PolarField> {
        match self {
            ValidationPolicy::Unchecked => None,
            ValidationPolicy::Strict => PolarField::ALL.into_iter().find(|&field| {
                let v = m.field(field);
                // bearing may be any real value
                !v.is_finite() || (field != PolarField::Bearing && v < 0.0)
            }),
        }
    }
}

/// Configuration for [`crate::UnbiasedConverter`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Input validation policy. Default: `Unchecked`.
    pub validation: ValidationPolicy,
    /// Batches at least this long are converted on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Unchecked,
            parallel_threshold: 1024,
        }
    }
}

impl ConversionConfig {
    pub fn strict() -> Self {
        Self {
            validation: ValidationPolicy::Strict,
            ..Default::default()
        }
    }
}
