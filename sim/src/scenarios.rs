//! Scenario definitions.
//!
//! Each scenario is one true target position seen by one polar sensor.
//! Geometry is in the sensor frame; no platform transforms are applied.

use conversion_core::SensorNoise;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Which pre-defined scenario to load.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScenarioKind {
    /// 200 m, very coarse bearing (0.4 rad): strongest naive bias
    NearField,
    /// 5 km, fine bearing (0.05 rad), coarse range
    LongRange,
    /// 1 km, 0.2 rad bearing noise
    WideBearing,
    /// 1 km straight along +y, 0.3 rad bearing noise
    Broadside,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::NearField,
        ScenarioKind::LongRange,
        ScenarioKind::WideBearing,
        ScenarioKind::Broadside,
    ];
}

/// True target geometry plus the sensor noise used to corrupt it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionScenario {
    pub name: String,
    /// True range (meters)
    pub range: f64,
    /// True bearing (radians)
    pub bearing: f64,
    pub noise: SensorNoise,
}

impl ConversionScenario {
    pub fn build(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::NearField => scenario("near_field", 200.0, 1.2, 2.0, 0.4),
            ScenarioKind::LongRange => scenario("long_range", 5_000.0, -2.0, 50.0, 0.05),
            ScenarioKind::WideBearing => scenario("wide_bearing", 1_000.0, 0.6, 10.0, 0.2),
            ScenarioKind::Broadside => scenario("broadside", 1_000.0, FRAC_PI_2, 10.0, 0.3),
        }
    }

    /// True Cartesian position of the target.
    pub fn truth(&self) -> conversion_core::Mean2 {
        conversion_core::convert_naive(self.range, self.bearing)
    }
}

fn scenario(name: &str, range: f64, bearing: f64, range_std: f64, bearing_std: f64) -> ConversionScenario {
    ConversionScenario {
        name: name.to_string(),
        range,
        bearing,
        noise: SensorNoise::new(range_std, bearing_std),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scenarios_have_distinct_names() {
        let names: std::collections::HashSet<String> = ScenarioKind::ALL
            .iter()
            .map(|&k| ConversionScenario::build(k).name)
            .collect();
        assert_eq!(names.len(), ScenarioKind::ALL.len());
    }

    #[test]
    fn broadside_truth_is_on_y_axis() {
        let s = ConversionScenario::build(ScenarioKind::Broadside);
        let truth = s.truth();
        assert_abs_diff_eq!(truth[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(truth[1], 1_000.0, epsilon = 1e-9);
    }
}
