//! Errors raised by the conversion front-end.
//!
//! The kernel itself ([`crate::unbiased::convert_unbiased`]) never fails;
//! these only come from batch shape checks and the strict validation policy.

use crate::types::PolarField;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConversionError {
    /// The four batch inputs do not have the same length.
    #[error(
        "shape mismatch: range has {range} elements, bearing {bearing}, \
         range_sd {range_sd}, bearing_sd {bearing_sd}"
    )]
    ShapeMismatch {
        range: usize,
        bearing: usize,
        range_sd: usize,
        bearing_sd: usize,
    },

    /// A field broke the caller contract (strict policy only).
    #[error("invalid measurement at index {index}: {field} = {value}")]
    InvalidMeasurement {
        index: usize,
        field: PolarField,
        value: f64,
    },
}
