//! Classification labels produced by the cascade.

use std::fmt;
use std::str::FromStr;

use factory_core::KgCategory;
use serde::{Serialize, Serializer};

/// One of the labels the cascade can produce. Serialized as its label string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    PossibleOverheating,
    PossibleGlitchFirmware,
    LikelyGlitchFirmware,
    SpindleOverheat,
    PossibleVibrationSabotage,
    LikelyVibrationSabotage,
    PossibleElevatedLoad,
    HighPowerConsumption,
    MinorPositionDrift,
    MajorPositionChange,
    ToolChange,
    InspectionFail,
    OperationNormal,
}

impl Classification {
    /// Every label, in cascade order.
    pub const ALL: [Classification; 13] = [
        Classification::PossibleOverheating,
        Classification::PossibleGlitchFirmware,
        Classification::LikelyGlitchFirmware,
        Classification::SpindleOverheat,
        Classification::PossibleVibrationSabotage,
        Classification::LikelyVibrationSabotage,
        Classification::PossibleElevatedLoad,
        Classification::HighPowerConsumption,
        Classification::MinorPositionDrift,
        Classification::MajorPositionChange,
        Classification::ToolChange,
        Classification::InspectionFail,
        Classification::OperationNormal,
    ];

    /// Full label, e.g. `Maintenance_KG:Tool_Change`. Also the KG source entity.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::PossibleOverheating => "Maintenance_KG:Possible_Overheating",
            Classification::PossibleGlitchFirmware => "Cyberattack_KG:Possible_Glitch/Firmware",
            Classification::LikelyGlitchFirmware => "Cyberattack_KG:Likely_Glitch/Firmware",
            Classification::SpindleOverheat => "Maintenance_KG:Spindle_Overheat",
            Classification::PossibleVibrationSabotage => {
                "Cyberattack_KG:Possible_Vibration_Sabotage"
            }
            Classification::LikelyVibrationSabotage => "Cyberattack_KG:Likely_Vibration_Sabotage",
            Classification::PossibleElevatedLoad => "PowerDraw_KG:Possible_Elevated_Load",
            Classification::HighPowerConsumption => "PowerDraw_KG:High_Power_Consumption",
            Classification::MinorPositionDrift => "Maintenance_KG:Minor_Position_Drift",
            Classification::MajorPositionChange => "Cyberattack_KG:Major_Position_Change",
            Classification::ToolChange => "Maintenance_KG:Tool_Change",
            Classification::InspectionFail => "Normal_KG:Inspection_Fail",
            Classification::OperationNormal => "Normal_KG:Operation_Normal",
        }
    }

    pub fn category(&self) -> KgCategory {
        match self {
            Classification::PossibleOverheating
            | Classification::SpindleOverheat
            | Classification::MinorPositionDrift
            | Classification::ToolChange => KgCategory::Maintenance,
            Classification::PossibleGlitchFirmware
            | Classification::LikelyGlitchFirmware
            | Classification::PossibleVibrationSabotage
            | Classification::LikelyVibrationSabotage
            | Classification::MajorPositionChange => KgCategory::Cyberattack,
            Classification::PossibleElevatedLoad | Classification::HighPowerConsumption => {
                KgCategory::PowerDraw
            }
            Classification::InspectionFail | Classification::OperationNormal => KgCategory::Normal,
        }
    }

    /// The part after the category prefix, e.g. `Tool_Change`.
    pub fn reason(&self) -> &'static str {
        let label = self.label();
        label.split_once(':').map(|(_, r)| r).unwrap_or(label)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classification::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown classification: '{}'", s))
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
