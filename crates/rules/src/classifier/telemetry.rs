//! Typed, lazily-checked access to one cycle's telemetry.
//!
//! The cascade only asks for a field when it reaches the rule that needs it,
//! so a field made irrelevant by an earlier match is never required.

use factory_core::{fields, FactoryError, MachineData, Position, Result, SensorReadings};

pub(super) struct TelemetryView<'a> {
    sensors: &'a SensorReadings,
    machine: &'a MachineData,
}

impl<'a> TelemetryView<'a> {
    pub(super) fn new(sensors: &'a SensorReadings, machine: &'a MachineData) -> Self {
        Self { sensors, machine }
    }

    pub(super) fn scalar(&self, field: &str) -> Result<f64> {
        self.sensors
            .get(field)
            .ok_or_else(|| FactoryError::missing_sensor(field))?
            .as_scalar()
            .ok_or_else(|| FactoryError::InvalidField {
                field: field.to_string(),
                expected: "a scalar reading",
            })
    }

    pub(super) fn position(&self, field: &str) -> Result<&'a Position> {
        self.sensors
            .get(field)
            .ok_or_else(|| FactoryError::missing_sensor(field))?
            .as_position()
            .ok_or_else(|| FactoryError::InvalidField {
                field: field.to_string(),
                expected: "an X/Y/Z position",
            })
    }

    pub(super) fn label(&self, field: &str) -> Result<&'a str> {
        self.sensors
            .get(field)
            .ok_or_else(|| FactoryError::missing_sensor(field))?
            .as_label()
            .ok_or_else(|| FactoryError::InvalidField {
                field: field.to_string(),
                expected: "a categorical reading",
            })
    }

    /// Mounted tool, if the machine data carries one. `0` counts as absent.
    pub(super) fn tool_id(&self) -> Result<Option<i64>> {
        match self.machine.get(fields::TOOL_ID) {
            None => Ok(None),
            Some(value) => match value.as_i64() {
                Some(0) => Ok(None),
                Some(id) => Ok(Some(id)),
                None => Err(FactoryError::InvalidField {
                    field: fields::TOOL_ID.to_string(),
                    expected: "an integer tool id",
                }),
            },
        }
    }
}
