//! Unbiased polar → Cartesian conversion.
//!
//! Reference: L. Mo, X. Song, Y. Zhou, Z. K. Sun, Y. Bar-Shalom,
//! "Unbiased converted measurements for tracking",
//! IEEE Trans. AES 34(3), July 1998, pp. 1023–1027.
//!
//! ## Why
//! Projecting a noisy (r, β) straight to (r·cos β, r·sin β) is biased:
//! E[cos(β + w)] = λ·cos β with λ = exp(−σβ²/2) < 1, so the naive estimate is
//! pulled toward the sensor. Dividing by λ removes the bias.
//!
//! ## Decay factors
//! λ  = exp(−σβ² / 2)
//! λ′ = λ⁴
//!
//! ## Mean (eq. 5)
//! x = λ⁻¹ · r · cos β
//! y = λ⁻¹ · r · sin β
//!
//! ## Covariance (eq. 7a–7c)
//! with g = λ⁻² − 2 and q = ½(r² + σr²):
//! R11 = g·r²·cos²β   + q·(1 + λ′·cos 2β)
//! R22 = g·r²·sin²β   + q·(1 − λ′·cos 2β)
//! R12 = g·r²·cosβ·sinβ + q·λ′·sin 2β

use crate::types::{CartesianMeasurement, Cov2, Mean2};

/// Decay factors derived from the bearing standard deviation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConversionFactors {
    /// λ = exp(−σβ²/2), in (0, 1] for finite σβ
    pub lambda: f64,
    /// λ′ = λ⁴
    pub lambda_prime: f64,
    /// 1/λ ≥ 1
    pub inv_lambda: f64,
}

impl ConversionFactors {
    pub fn new(bearing_sd: f64) -> Self {
        let lambda = (-0.5 * bearing_sd * bearing_sd).exp();
        Self {
            lambda,
            lambda_prime: lambda.powi(4),
            inv_lambda: lambda.recip(),
        }
    }

    /// g = λ⁻² − 2, the factor shared by all three covariance terms.
    pub fn covariance_gain(&self) -> f64 {
        self.inv_lambda * self.inv_lambda - 2.0
    }
}

/// Unbiased conversion of one polar measurement.
///
/// `range_sd` and `bearing_sd` are standard deviations, `bearing` and
/// `bearing_sd` are in radians. No input is validated: negative or
/// non-finite values produce degenerate (possibly non-finite) output rather
/// than an error.
pub fn convert_unbiased(
    range: f64,
    bearing: f64,
    range_sd: f64,
    bearing_sd: f64,
) -> CartesianMeasurement {
    let factors = ConversionFactors::new(bearing_sd);
    let (sin_b, cos_b) = bearing.sin_cos();
    let (sin_2b, cos_2b) = (2.0 * bearing).sin_cos();

    let mean = Mean2::new(
        factors.inv_lambda * range * cos_b,
        factors.inv_lambda * range * sin_b,
    );

    let r2 = range * range;
    let bias_term = factors.covariance_gain() * r2;
    let spread_term = 0.5 * (r2 + range_sd * range_sd);
    let angular = factors.lambda_prime;

    let r11 = bias_term * cos_b * cos_b + spread_term * (1.0 + angular * cos_2b);
    let r22 = bias_term * sin_b * sin_b + spread_term * (1.0 - angular * cos_2b);
    let r12 = bias_term * cos_b * sin_b + spread_term * angular * sin_2b;

    CartesianMeasurement {
        mean,
        cov: Cov2::new(r11, r12, r12, r22),
    }
}

/// Plain projection (r·cos β, r·sin β), biased under bearing noise.
pub fn convert_naive(range: f64, bearing: f64) -> Mean2 {
    let (sin_b, cos_b) = bearing.sin_cos();
    Mean2::new(range * cos_b, range * sin_b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn reference_scenario_at_zero_bearing() {
        let f = ConversionFactors::new(0.1);
        assert_abs_diff_eq!(f.lambda, (-0.005f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(f.lambda, 0.995_012_479, epsilon = 1e-9);
        assert_abs_diff_eq!(f.inv_lambda, 1.005_012_521, epsilon = 1e-9);

        let m = convert_unbiased(100.0, 0.0, 5.0, 0.1);
        assert_abs_diff_eq!(m.x(), 100.501_252_086, epsilon = 1e-8);
        assert_eq!(m.y(), 0.0);
        assert_eq!(m.cov[(0, 1)], 0.0);
        assert_relative_eq!(m.cov[(0, 0)], 26.247_520_79, max_relative = 1e-8);
        assert_relative_eq!(m.cov[(1, 1)], 99.254_150_05, max_relative = 1e-8);
    }

    #[test]
    fn diagonal_swaps_at_right_angle() {
        let east = convert_unbiased(100.0, 0.0, 5.0, 0.1);
        let north = convert_unbiased(100.0, FRAC_PI_2, 5.0, 0.1);
        assert_relative_eq!(north.cov[(0, 0)], east.cov[(1, 1)], max_relative = 1e-12);
        assert_relative_eq!(north.cov[(1, 1)], east.cov[(0, 0)], max_relative = 1e-12);
        assert_abs_diff_eq!(north.cov[(0, 1)], 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(north.y(), east.x(), epsilon = 1e-12);
    }

    #[test]
    fn covariance_is_exactly_symmetric() {
        for &bearing in &[-3.0, -1.2, 0.3, 0.8, 2.5, 7.0] {
            let m = convert_unbiased(2500.0, bearing, 20.0, 0.03);
            assert_eq!(m.cov[(0, 1)], m.cov[(1, 0)]);
        }
    }

    #[test]
    fn zero_range_depends_only_on_range_noise() {
        let (bearing, sd_r, sd_b) = (1.0, 5.0, 0.1);
        let m = convert_unbiased(0.0, bearing, sd_r, sd_b);
        assert_eq!(m.mean, Mean2::zeros());

        let lp = ConversionFactors::new(sd_b).lambda_prime;
        let q = 0.5 * sd_r * sd_r;
        assert_relative_eq!(m.cov[(0, 0)], q * (1.0 + lp * (2.0 * bearing).cos()), max_relative = 1e-12);
        assert_relative_eq!(m.cov[(1, 1)], q * (1.0 - lp * (2.0 * bearing).cos()), max_relative = 1e-12);
        assert_relative_eq!(m.cov[(0, 1)], q * lp * (2.0 * bearing).sin(), max_relative = 1e-12);
    }

    #[test]
    fn no_bearing_noise_matches_naive_projection() {
        let m = convert_unbiased(1234.5, 0.77, 10.0, 0.0);
        let naive = convert_naive(1234.5, 0.77);
        assert_eq!(m.mean, naive);
    }

    #[test]
    fn small_bearing_noise_converges_to_naive() {
        let naive = convert_naive(10_000.0, -2.1);
        let mut prev = f64::INFINITY;
        for &sd in &[1e-1, 1e-2, 1e-3, 1e-4] {
            let gap = (convert_unbiased(10_000.0, -2.1, 1.0, sd).mean - naive).norm();
            assert!(gap < prev, "gap must shrink as bearing noise shrinks");
            prev = gap;
        }
        assert!(prev < 1e-3);
    }

    #[test]
    fn unbiased_mean_is_pushed_outward() {
        let naive = convert_naive(800.0, 0.4);
        let m = convert_unbiased(800.0, 0.4, 4.0, 0.2);
        assert!(m.mean.norm() > naive.norm());
        // Same direction
        assert_abs_diff_eq!(m.y().atan2(m.x()), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn bearing_is_not_wrapped() {
        let a = convert_unbiased(300.0, 0.5, 2.0, 0.05);
        let b = convert_unbiased(300.0, 0.5 + 2.0 * PI, 2.0, 0.05);
        assert_abs_diff_eq!(a.x(), b.x(), epsilon = 1e-9);
        assert_abs_diff_eq!(a.y(), b.y(), epsilon = 1e-9);
        assert_abs_diff_eq!(a.cov[(0, 1)], b.cov[(0, 1)], epsilon = 1e-7);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let a = convert_unbiased(4321.0, -0.9, 7.5, 0.012);
        let b = convert_unbiased(4321.0, -0.9, 7.5, 0.012);
        assert_eq!(a.mean.map(f64::to_bits), b.mean.map(f64::to_bits));
        assert_eq!(a.cov.map(f64::to_bits), b.cov.map(f64::to_bits));
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        let m = convert_unbiased(f64::NAN, 0.0, 1.0, 0.1);
        assert!(m.x().is_nan());
        let m = convert_unbiased(100.0, 0.0, 1.0, f64::INFINITY);
        assert!(!m.x().is_finite());
        let m = convert_unbiased(-100.0, 0.0, -1.0, -0.1);
        assert!(m.x() < 0.0);
    }

    #[test]
    fn covariance_gain_is_shared_factor() {
        let f = ConversionFactors::new(0.2);
        assert_relative_eq!(f.covariance_gain(), (0.04f64).exp() - 2.0, max_relative = 1e-12);
        assert_relative_eq!(f.lambda_prime, (-0.08f64).exp(), max_relative = 1e-12);
    }
}
