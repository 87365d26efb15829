//! Per-cycle choice between simulated sensors and the substitute reading set.

use factory_core::{fields, DataMode, Position, Reading, SensorReadings};

/// Decides, once per cycle, where sensor readings come from.
pub trait DataSourceSelector: Send {
    fn select(&self) -> DataMode;
}

/// Re-reads `MODE` (profile-aware) on every cycle, so the mode can be flipped
/// while a run is in progress.
#[derive(Debug, Clone)]
pub struct EnvSelector {
    profile: String,
}

impl EnvSelector {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }
}

impl DataSourceSelector for EnvSelector {
    fn select(&self) -> DataMode {
        DataMode::from_env_profiled(&self.profile)
    }
}

/// Always returns the same mode.
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub DataMode);

impl DataSourceSelector for FixedSelector {
    fn select(&self) -> DataMode {
        self.0
    }
}

/// Fixed reading set used in place of the sensors when the mode is `REAL`.
pub fn substitute_readings() -> SensorReadings {
    let mut readings = SensorReadings::new();
    readings.insert(fields::SPINDLE_TEMP.into(), Reading::Scalar(82.5));
    readings.insert(fields::VIBRATION.into(), Reading::Scalar(1.1));
    readings.insert(fields::POWER_DRAW.into(), Reading::Scalar(310.2));
    readings.insert(
        fields::POSITION.into(),
        Reading::Position(Position::new(50.0, 30.0, 10.0)),
    );
    readings.insert(fields::INSPECTION.into(), Reading::Label("PASS".into()));
    readings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_selector_follows_mode_variable() {
        let selector = EnvSelector::new("SRCTEST");
        std::env::remove_var("SRCTEST_MODE");
        assert_eq!(selector.select(), DataMode::Simulate);

        std::env::set_var("SRCTEST_MODE", "REAL");
        assert_eq!(selector.select(), DataMode::Real);

        std::env::set_var("SRCTEST_MODE", "real");
        assert_eq!(selector.select(), DataMode::Simulate);

        std::env::set_var("SRCTEST_MODE", "anything");
        assert_eq!(selector.select(), DataMode::Simulate);
        std::env::remove_var("SRCTEST_MODE");
    }

    #[test]
    fn substitute_set_covers_sensor_fields() {
        let readings = substitute_readings();
        let keys: Vec<&str> = readings.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                fields::SPINDLE_TEMP,
                fields::VIBRATION,
                fields::POWER_DRAW,
                fields::POSITION,
                fields::INSPECTION
            ]
        );
        assert_eq!(readings[fields::POWER_DRAW].as_scalar(), Some(310.2));
    }
}
