//! Cascade thresholds: the numeric boundaries of every classification rule.
//!
//! The defaults are the production boundaries. A YAML document of kind
//! `CascadeThresholds` may override any subset of them; omitted sections keep
//! their defaults.

use std::path::Path;

use factory_core::{FactoryError, Position, Result};
use serde::{Deserialize, Serialize};

pub const THRESHOLDS_KIND: &str = "CascadeThresholds";

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level thresholds document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdsDocument {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: ThresholdsMetadata,
    #[serde(default)]
    pub spec: CascadeThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdsMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// All boundaries the cascade compares against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CascadeThresholds {
    pub spindle_temp: Band,
    /// Shared by the glitch sub-rules of an overheating spindle and the
    /// standalone power-draw rules; the comparisons differ per rule.
    pub power_draw: Band,
    pub vibration: Band,
    pub position: PositionTolerance,
    /// Tools that may be mounted without raising a tool-change event.
    pub approved_tools: Vec<i64>,
}

/// Two ascending boundaries splitting a reading into nominal / warning / critical.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Band {
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PositionTolerance {
    pub expected: Position,
    pub warning: f64,
    pub critical: f64,
}

impl Default for CascadeThresholds {
    fn default() -> Self {
        Self {
            spindle_temp: Band {
                warning: 75.0,
                critical: 90.0,
            },
            power_draw: Band {
                warning: 350.0,
                critical: 400.0,
            },
            vibration: Band {
                warning: 1.5,
                critical: 3.5,
            },
            position: PositionTolerance {
                expected: Position::new(50.0, 30.0, 10.0),
                warning: 5.0,
                critical: 10.0,
            },
            approved_tools: vec![1, 2, 3],
        }
    }
}

impl CascadeThresholds {
    /// Reject bands whose boundaries are not ascending or tolerances below zero.
    pub fn validate(&self) -> Result<()> {
        let bands = [
            ("spindle_temp", self.spindle_temp.warning, self.spindle_temp.critical),
            ("power_draw", self.power_draw.warning, self.power_draw.critical),
            ("vibration", self.vibration.warning, self.vibration.critical),
            ("position", self.position.warning, self.position.critical),
        ];
        for (name, warning, critical) in bands {
            if warning.is_nan() || critical.is_nan() || warning >= critical {
                return Err(FactoryError::Config(format!(
                    "{} warning ({}) must be below critical ({})",
                    name, warning, critical
                )));
            }
        }
        if self.position.warning < 0.0 {
            return Err(FactoryError::Config(
                "position tolerances must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse and validate a thresholds document.
pub fn parse_thresholds(yaml: &str) -> Result<CascadeThresholds> {
    let doc: ThresholdsDocument = serde_yaml::from_str(yaml)?;
    if doc.kind != THRESHOLDS_KIND {
        return Err(FactoryError::Config(format!(
            "expected kind {}, found {}",
            THRESHOLDS_KIND, doc.kind
        )));
    }
    doc.spec.validate()?;
    Ok(doc.spec)
}

/// Load and validate a thresholds document from disk.
pub fn load_thresholds(path: &Path) -> Result<CascadeThresholds> {
    let yaml = std::fs::read_to_string(path)?;
    let thresholds = parse_thresholds(&yaml)?;
    tracing::info!(path = %path.display(), "loaded cascade thresholds");
    Ok(thresholds)
}
