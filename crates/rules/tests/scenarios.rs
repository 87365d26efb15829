//! End-to-end classification scenarios for whole telemetry snapshots.

use factory_core::{fields, FieldValue, KgCategory, MachineData, Position, Reading, SensorReadings};
use factory_rules::{classify, Classification};

fn snapshot(
    temp: f64,
    vibration: f64,
    power: f64,
    position: (f64, f64, f64),
    inspection: &str,
    tool: i64,
) -> (SensorReadings, MachineData) {
    let mut sensors = SensorReadings::new();
    sensors.insert(fields::SPINDLE_TEMP.into(), Reading::Scalar(temp));
    sensors.insert(fields::VIBRATION.into(), Reading::Scalar(vibration));
    sensors.insert(fields::POWER_DRAW.into(), Reading::Scalar(power));
    sensors.insert(
        fields::POSITION.into(),
        Reading::Position(Position::new(position.0, position.1, position.2)),
    );
    sensors.insert(fields::INSPECTION.into(), Reading::Label(inspection.into()));

    let mut machine = MachineData::new();
    machine.insert(fields::OPERATION.into(), "drilling".into());
    machine.insert(fields::TOOL_ID.into(), FieldValue::Integer(tool));
    machine.insert(fields::ROBOTIC_ARM_TASK.into(), "idle".into());
    machine.insert(fields::CONVEYOR_POSITION.into(), "Station A".into());
    machine.insert(fields::PART_ID.into(), "PART-1001".into());
    machine.insert(fields::INSPECTION_RESULT.into(), "PASS".into());
    machine.insert(fields::INSPECTION_CONFIDENCE.into(), FieldValue::Float(0.93));
    (sensors, machine)
}

const EXPECTED: (f64, f64, f64) = (50.0, 30.0, 10.0);

#[test]
fn overheated_spindle_with_high_power_is_likely_glitch() {
    let (s, m) = snapshot(95.0, 1.0, 410.0, EXPECTED, "PASS", 2);
    let c = classify(&s, &m).unwrap();
    assert_eq!(c.label(), "Cyberattack_KG:Likely_Glitch/Firmware");
    assert_eq!(c.category(), KgCategory::Cyberattack);
}

#[test]
fn just_above_critical_temperature_with_power_at_boundary() {
    let (s, m) = snapshot(90.01, 1.0, 400.0, EXPECTED, "PASS", 1);
    assert_eq!(
        classify(&s, &m).unwrap(),
        Classification::LikelyGlitchFirmware
    );
}

#[test]
fn temperature_of_exactly_ninety_stays_in_the_warning_band() {
    let (s, m) = snapshot(90.0, 1.0, 410.0, EXPECTED, "PASS", 1);
    assert_eq!(
        classify(&s, &m).unwrap(),
        Classification::PossibleOverheating
    );
}

#[test]
fn vibration_at_lower_bound_falls_through() {
    let (s, m) = snapshot(60.0, 1.5, 250.0, EXPECTED, "PASS", 1);
    assert_eq!(classify(&s, &m).unwrap(), Classification::OperationNormal);
}

#[test]
fn large_x_deviation_is_major_position_change() {
    let (s, m) = snapshot(70.0, 1.0, 300.0, (61.0, 30.0, 10.0), "PASS", 1);
    assert_eq!(
        classify(&s, &m).unwrap().label(),
        "Cyberattack_KG:Major_Position_Change"
    );
}

#[test]
fn unapproved_tool_is_tool_change() {
    let (s, m) = snapshot(60.0, 0.5, 250.0, EXPECTED, "PASS", 4);
    assert_eq!(classify(&s, &m).unwrap().label(), "Maintenance_KG:Tool_Change");
}

#[test]
fn failed_vision_inspection_on_nominal_cycle() {
    let (s, m) = snapshot(60.0, 0.5, 250.0, EXPECTED, "FAIL", 1);
    assert_eq!(classify(&s, &m).unwrap().label(), "Normal_KG:Inspection_Fail");
}

#[test]
fn substitute_reading_set_is_possible_overheating() {
    // The fixed bundle used when MODE=REAL: 82.5 °C lands in the warning band.
    let (s, m) = snapshot(82.5, 1.1, 310.2, EXPECTED, "PASS", 2);
    assert_eq!(
        classify(&s, &m).unwrap(),
        Classification::PossibleOverheating
    );
}

#[test]
fn machine_inspection_result_does_not_drive_the_inspection_rule() {
    let (s, mut m) = snapshot(60.0, 0.5, 250.0, EXPECTED, "PASS", 1);
    m.insert(fields::INSPECTION_RESULT.into(), "FAIL".into());
    assert_eq!(classify(&s, &m).unwrap(), Classification::OperationNormal);
}
