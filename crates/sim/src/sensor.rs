//! Sensor variants. Every read is independent of earlier cycles.

use factory_core::{fields, Position, Reading};
use rand::RngCore;

use crate::random::{pick, uniform};

pub const QC_OUTCOMES: [&str; 2] = ["PASS", "FAIL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Spindle temperature in °C, 45–100, two decimals.
    SpindleTemp,
    /// Vibration amplitude, 0.2–4.0, two decimals.
    Vibration,
    /// Power draw in watts, 200–450, one decimal.
    PowerDraw,
    /// X/Y in 0–100 and Z in 0–50, one decimal each.
    PositionEncoder,
    /// Vision quality control, PASS or FAIL.
    VisionQc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
    name: String,
    kind: SensorKind,
}

impl Sensor {
    pub fn new(name: impl Into<String>, kind: SensorKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read(&self, rng: &mut dyn RngCore) -> Reading {
        match self.kind {
            SensorKind::SpindleTemp => Reading::Scalar(uniform(rng, 45.0, 100.0, 2)),
            SensorKind::Vibration => Reading::Scalar(uniform(rng, 0.2, 4.0, 2)),
            SensorKind::PowerDraw => Reading::Scalar(uniform(rng, 200.0, 450.0, 1)),
            SensorKind::PositionEncoder => Reading::Position(Position::new(
                uniform(rng, 0.0, 100.0, 1),
                uniform(rng, 0.0, 100.0, 1),
                uniform(rng, 0.0, 50.0, 1),
            )),
            SensorKind::VisionQc => Reading::Label(pick(rng, &QC_OUTCOMES).to_string()),
        }
    }
}

/// The production sensor set, named after the fields the classifier reads.
pub fn default_sensors() -> Vec<Sensor> {
    vec![
        Sensor::new(fields::SPINDLE_TEMP, SensorKind::SpindleTemp),
        Sensor::new(fields::VIBRATION, SensorKind::Vibration),
        Sensor::new(fields::POWER_DRAW, SensorKind::PowerDraw),
        Sensor::new(fields::POSITION, SensorKind::PositionEncoder),
        Sensor::new(fields::INSPECTION, SensorKind::VisionQc),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use factory_core::round_to;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 2_000;

    fn assert_scalar_range(kind: SensorKind, min: f64, max: f64, decimals: u32) {
        let sensor = Sensor::new("s", kind);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..SAMPLES {
            let v = sensor.read(&mut rng).as_scalar().unwrap();
            assert!(v >= min && v <= max, "{kind:?} reading {v} outside [{min}, {max}]");
            assert_eq!(round_to(v, decimals), v, "{kind:?} reading {v} not rounded");
        }
    }

    #[test]
    fn spindle_temp_range_and_rounding() {
        assert_scalar_range(SensorKind::SpindleTemp, 45.0, 100.0, 2);
    }

    #[test]
    fn vibration_range_and_rounding() {
        assert_scalar_range(SensorKind::Vibration, 0.2, 4.0, 2);
    }

    #[test]
    fn power_draw_range_and_rounding() {
        assert_scalar_range(SensorKind::PowerDraw, 200.0, 450.0, 1);
    }

    #[test]
    fn position_axes_in_range() {
        let sensor = Sensor::new(fields::POSITION, SensorKind::PositionEncoder);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..SAMPLES {
            let reading = sensor.read(&mut rng);
            let p = reading.as_position().unwrap();
            for (axis, max) in [(p.x, 100.0), (p.y, 100.0), (p.z, 50.0)] {
                assert!((0.0..=max).contains(&axis));
                assert_eq!(round_to(axis, 1), axis);
            }
        }
    }

    #[test]
    fn vision_qc_produces_both_outcomes() {
        let sensor = Sensor::new(fields::INSPECTION, SensorKind::VisionQc);
        let mut rng = StdRng::seed_from_u64(3);
        let outcomes: Vec<String> = (0..200)
            .map(|_| sensor.read(&mut rng).as_label().unwrap().to_string())
            .collect();
        assert!(outcomes.iter().all(|o| QC_OUTCOMES.contains(&o.as_str())));
        assert!(outcomes.iter().any(|o| o == "PASS"));
        assert!(outcomes.iter().any(|o| o == "FAIL"));
    }

    #[test]
    fn same_seed_same_readings() {
        let sensors = default_sensors();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for sensor in &sensors {
            assert_eq!(sensor.read(&mut a), sensor.read(&mut b));
        }
    }

    #[test]
    fn default_sensor_names_are_unique() {
        let sensors = default_sensors();
        let mut names: Vec<&str> = sensors.iter().map(Sensor::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), sensors.len());
    }
}
