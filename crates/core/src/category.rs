use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level knowledge-graph category a cycle is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KgCategory {
    #[serde(rename = "Maintenance_KG")]
    Maintenance,
    #[serde(rename = "Cyberattack_KG")]
    Cyberattack,
    #[serde(rename = "Normal_KG")]
    Normal,
    #[serde(rename = "PowerDraw_KG")]
    PowerDraw,
}

impl KgCategory {
    pub const ALL: [KgCategory; 4] = [
        KgCategory::Maintenance,
        KgCategory::Cyberattack,
        KgCategory::Normal,
        KgCategory::PowerDraw,
    ];

    /// Label prefix, e.g. `Maintenance_KG`.
    pub fn as_str(&self) -> &'static str {
        match self {
            KgCategory::Maintenance => "Maintenance_KG",
            KgCategory::Cyberattack => "Cyberattack_KG",
            KgCategory::Normal => "Normal_KG",
            KgCategory::PowerDraw => "PowerDraw_KG",
        }
    }

    /// Default reference table file name for this category.
    pub fn default_table_file(&self) -> &'static str {
        match self {
            KgCategory::Maintenance => "maintenance-kg.csv",
            KgCategory::Cyberattack => "cyberattack-kg.csv",
            KgCategory::Normal => "normal-kg.csv",
            KgCategory::PowerDraw => "powerdraw-kg.csv",
        }
    }
}

impl fmt::Display for KgCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KgCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Maintenance_KG" => Ok(KgCategory::Maintenance),
            "Cyberattack_KG" => Ok(KgCategory::Cyberattack),
            "Normal_KG" => Ok(KgCategory::Normal),
            "PowerDraw_KG" => Ok(KgCategory::PowerDraw),
            other => Err(format!("unknown KG category: '{}'", other)),
        }
    }
}
