//! Ordered decision cascade mapping one cycle's telemetry to a label.
//!
//! Rules are evaluated top to bottom and the first match wins:
//!
//! 1. spindle temperature in the warning band → possible overheating
//! 2. spindle temperature above critical → glitch/firmware by power draw, else overheat
//! 3. vibration in the warning band → possible sabotage
//! 4. vibration above critical → likely sabotage
//! 5. power draw in the warning band → elevated load
//! 6. power draw at or above critical → high consumption
//! 7. position drift from the expected point → minor drift / major change
//! 8. unapproved tool mounted → tool change
//! 9. vision inspection failed → inspection fail
//! 10. otherwise → operation normal
//!
//! The rules overlap on purpose: their order is the priority.

mod telemetry;

use factory_core::{fields, MachineData, Result, SensorReadings};

use crate::classification::Classification;
use crate::thresholds::CascadeThresholds;

use telemetry::TelemetryView;

/// Classifies telemetry with a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: CascadeThresholds,
}

impl Classifier {
    pub fn new(thresholds: CascadeThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify one cycle.
    ///
    /// Fails with `MissingField` / `InvalidField` only when a rule that is
    /// actually reached needs a field that is absent or mis-shaped.
    pub fn classify(
        &self,
        sensors: &SensorReadings,
        machine: &MachineData,
    ) -> Result<Classification> {
        let view = TelemetryView::new(sensors, machine);
        let t = &self.thresholds;

        let temp = view.scalar(fields::SPINDLE_TEMP)?;
        if temp > t.spindle_temp.warning && temp <= t.spindle_temp.critical {
            return Ok(Classification::PossibleOverheating);
        }
        if temp > t.spindle_temp.critical {
            let power = view.scalar(fields::POWER_DRAW)?;
            return Ok(if power > t.power_draw.warning && power < t.power_draw.critical {
                Classification::PossibleGlitchFirmware
            } else if power >= t.power_draw.critical {
                Classification::LikelyGlitchFirmware
            } else {
                Classification::SpindleOverheat
            });
        }

        let vibration = view.scalar(fields::VIBRATION)?;
        if vibration > t.vibration.warning && vibration <= t.vibration.critical {
            return Ok(Classification::PossibleVibrationSabotage);
        }
        if vibration > t.vibration.critical {
            return Ok(Classification::LikelyVibrationSabotage);
        }

        let power = view.scalar(fields::POWER_DRAW)?;
        if power >= t.power_draw.warning && power < t.power_draw.critical {
            return Ok(Classification::PossibleElevatedLoad);
        }
        if power >= t.power_draw.critical {
            return Ok(Classification::HighPowerConsumption);
        }

        let max_dev = view
            .position(fields::POSITION)?
            .max_deviation(&t.position.expected);
        if max_dev > t.position.warning && max_dev <= t.position.critical {
            return Ok(Classification::MinorPositionDrift);
        }
        if max_dev > t.position.critical {
            return Ok(Classification::MajorPositionChange);
        }

        if let Some(tool) = view.tool_id()? {
            if !t.approved_tools.contains(&tool) {
                return Ok(Classification::ToolChange);
            }
        }

        if view.label(fields::INSPECTION)? == "FAIL" {
            return Ok(Classification::InspectionFail);
        }

        Ok(Classification::OperationNormal)
    }
}

/// Classify with the default thresholds.
pub fn classify(sensors: &SensorReadings, machine: &MachineData) -> Result<Classification> {
    Classifier::default().classify(sensors, machine)
}

// ── Tests ───────────────────────────────────────────────────────────
