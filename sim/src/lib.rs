//! `sim` — Monte Carlo harness: draws noisy polar detections of a known
//! target and measures how well the converted measurements and their
//! covariances describe the actual errors.

pub mod monte_carlo;
pub mod scenarios;

pub use monte_carlo::{ConsistencyReport, MonteCarlo, SimError};
pub use scenarios::{ConversionScenario, ScenarioKind};
