use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Merged per-cycle machine fields, in machine order.
pub type MachineData = IndexMap<String, FieldValue>;

/// Per-cycle sensor readings keyed by sensor name, in sensor order.
pub type SensorReadings = IndexMap<String, Reading>;

/// Well-known field names shared by the simulator and the classifier.
pub mod fields {
    pub const SPINDLE_TEMP: &str = "spindle_temp";
    pub const VIBRATION: &str = "vibration";
    pub const POWER_DRAW: &str = "power_draw";
    pub const POSITION: &str = "position";
    pub const INSPECTION: &str = "inspection";

    pub const OPERATION: &str = "operation";
    pub const TOOL_ID: &str = "tool_id";
    pub const ROBOTIC_ARM_TASK: &str = "robotic_arm_task";
    pub const CONVEYOR_POSITION: &str = "conveyor_position";
    pub const PART_ID: &str = "part_id";
    pub const INSPECTION_RESULT: &str = "inspection_result";
    pub const INSPECTION_CONFIDENCE: &str = "inspection_confidence";
}

/// Value of a single machine field. Serialized as the bare JSON value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

/// Three-axis position as reported by the position encoder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Largest absolute per-axis deviation from `other`.
    pub fn max_deviation(&self, other: &Position) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

/// One sensor reading. Lives for a single cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Reading {
    Scalar(f64),
    Position(Position),
    Label(String),
}

impl Reading {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Reading::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_position(&self) -> Option<&Position> {
        match self {
            Reading::Position(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Reading::Label(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_serialize_as_bare_values() {
        let mut readings = SensorReadings::new();
        readings.insert(fields::SPINDLE_TEMP.into(), Reading::Scalar(82.5));
        readings.insert(
            fields::POSITION.into(),
            Reading::Position(Position::new(50.0, 30.0, 10.0)),
        );
        readings.insert(fields::INSPECTION.into(), Reading::Label("PASS".into()));

        let json = serde_json::to_string(&readings).unwrap();
        assert_eq!(
            json,
            r#"{"spindle_temp":82.5,"position":{"X":50.0,"Y":30.0,"Z":10.0},"inspection":"PASS"}"#
        );
    }

    #[test]
    fn field_values_serialize_as_bare_values() {
        let mut data = MachineData::new();
        data.insert(fields::OPERATION.into(), "cutting".into());
        data.insert(fields::TOOL_ID.into(), 3i64.into());
        data.insert(fields::INSPECTION_CONFIDENCE.into(), 0.91.into());

        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(
            json,
            r#"{"operation":"cutting","tool_id":3,"inspection_confidence":0.91}"#
        );
    }

    #[test]
    fn untagged_reading_parses_each_shape() {
        let r: Reading = serde_json::from_str("1.25").unwrap();
        assert_eq!(r.as_scalar(), Some(1.25));

        let r: Reading = serde_json::from_str(r#"{"X":1.0,"Y":2.0,"Z":3.0}"#).unwrap();
        assert_eq!(r.as_position(), Some(&Position::new(1.0, 2.0, 3.0)));

        let r: Reading = serde_json::from_str(r#""FAIL""#).unwrap();
        assert_eq!(r.as_label(), Some("FAIL"));
    }

    #[test]
    fn max_deviation_picks_largest_axis() {
        let expected = Position::new(50.0, 30.0, 10.0);
        assert_eq!(Position::new(61.0, 30.0, 10.0).max_deviation(&expected), 11.0);
        assert_eq!(Position::new(50.0, 24.0, 12.0).max_deviation(&expected), 6.0);
        assert_eq!(expected.max_deviation(&expected), 0.0);
    }

    #[test]
    fn round_to_decimals() {
        assert_eq!(round_to(45.678, 2), 45.68);
        assert_eq!(round_to(212.34, 1), 212.3);
        assert_eq!(round_to(0.705, 0), 1.0);
    }
}
