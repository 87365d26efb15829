use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::category::KgCategory;
use crate::error::FactoryError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    match profiled_env_opt(profile, key) {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, default, "invalid integer, using default");
            default
        }),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub simulation: SimulationConfig,
    pub kg: KgConfig,
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `FACTORY_PROFILE`. When set (e.g. `LINE2`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> crate::Result<Self> {
        let profile = env_or("FACTORY_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    ///
    /// Fails with `FactoryError::Config` when `ATC_TOOLS` or `SIM_SEED` is set
    /// but unparsable.
    pub fn for_profile(profile: &str) -> crate::Result<Self> {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Ok(Self {
            profile: p.to_string(),
            simulation: SimulationConfig::from_env_profiled(p)?,
            kg: KgConfig::from_env_profiled(p),
            classifier: ClassifierConfig::from_env_profiled(p),
        })
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  simulation:  cycles={}, delay_ms={}, mode={}, seed={}",
            self.simulation.cycles,
            self.simulation.cycle_delay_ms,
            self.simulation.mode,
            self.simulation
                .seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "(entropy)".to_string()),
        );
        tracing::info!("  tools:       {:?}", self.simulation.tools);
        tracing::info!("  kg:          dir={}", self.kg.dir.display());
        tracing::info!(
            "  classifier:  thresholds={}",
            self.classifier
                .thresholds_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string()),
        );
    }
}

// ── Data mode ─────────────────────────────────────────────────

/// Where a cycle's sensor readings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataMode {
    /// Read the simulated sensors.
    #[default]
    Simulate,
    /// Use the fixed substitute reading set in place of the sensors.
    Real,
}

impl DataMode {
    /// Exactly `REAL` selects the substitute set; anything else simulates.
    pub fn parse(value: &str) -> Self {
        if value == "REAL" {
            DataMode::Real
        } else {
            DataMode::Simulate
        }
    }

    /// Resolve the `MODE` variable for a profile, defaulting to `SIM`.
    pub fn from_env_profiled(profile: &str) -> Self {
        Self::parse(&profiled_env_or(profile, "MODE", "SIM"))
    }
}

impl std::fmt::Display for DataMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataMode::Simulate => write!(f, "SIM"),
            DataMode::Real => write!(f, "REAL"),
        }
    }
}

// ── Simulation ────────────────────────────────────────────────

pub const DEFAULT_TOOLS: [i64; 5] = [1, 2, 3, 4, 5];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub cycles: u64,
    pub cycle_delay_ms: u64,
    /// Seed for the simulation RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Tool ids loaded in the automatic tool changer.
    pub tools: Vec<i64>,
    /// Mode at startup. The engine re-reads `MODE` every cycle unless overridden.
    pub mode: DataMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycles: 5,
            cycle_delay_ms: 1000,
            seed: None,
            tools: DEFAULT_TOOLS.to_vec(),
            mode: DataMode::Simulate,
        }
    }
}

impl SimulationConfig {
    fn from_env_profiled(p: &str) -> crate::Result<Self> {
        let defaults = Self::default();
        let seed = profiled_env_opt(p, "SIM_SEED")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map_err(|e| FactoryError::Config(format!("invalid SIM_SEED '{}': {}", v, e)))
            })
            .transpose()?;
        let tools = match profiled_env_opt(p, "ATC_TOOLS") {
            Some(v) => parse_tool_list(&v)
                .map_err(|e| FactoryError::Config(format!("invalid ATC_TOOLS '{}': {}", v, e)))?,
            None => defaults.tools,
        };
        Ok(Self {
            cycles: profiled_env_u64(p, "NUM_CYCLES", defaults.cycles),
            cycle_delay_ms: profiled_env_u64(p, "CYCLE_DELAY_MS", defaults.cycle_delay_ms),
            seed,
            tools,
            mode: DataMode::from_env_profiled(p),
        })
    }
}

/// Parse a comma-separated tool id list such as `1,2,3,4,5`.
pub fn parse_tool_list(value: &str) -> Result<Vec<i64>, String> {
    let tools = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().map_err(|e| format!("'{}': {}", s, e)))
        .collect::<Result<Vec<_>, _>>()?;
    if tools.is_empty() {
        return Err("tool list is empty".to_string());
    }
    Ok(tools)
}

// ── KG reference tables ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KgConfig {
    /// Directory the default table file names are resolved against.
    pub dir: PathBuf,
    pub maintenance_csv: Option<PathBuf>,
    pub normal_csv: Option<PathBuf>,
    pub cyberattack_csv: Option<PathBuf>,
    pub powerdraw_csv: Option<PathBuf>,
}

impl Default for KgConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/kg"),
            maintenance_csv: None,
            normal_csv: None,
            cyberattack_csv: None,
            powerdraw_csv: None,
        }
    }
}

impl KgConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            dir: PathBuf::from(profiled_env_or(p, "KG_DIR", "data/kg")),
            maintenance_csv: profiled_env_opt(p, "KG_MAINTENANCE_CSV").map(PathBuf::from),
            normal_csv: profiled_env_opt(p, "KG_NORMAL_CSV").map(PathBuf::from),
            cyberattack_csv: profiled_env_opt(p, "KG_CYBERATTACK_CSV").map(PathBuf::from),
            powerdraw_csv: profiled_env_opt(p, "KG_POWERDRAW_CSV").map(PathBuf::from),
        }
    }

    /// Resolve the table path for a category: explicit override, else `dir/<default file>`.
    pub fn table_path(&self, category: KgCategory) -> PathBuf {
        let explicit = match category {
            KgCategory::Maintenance => &self.maintenance_csv,
            KgCategory::Normal => &self.normal_csv,
            KgCategory::Cyberattack => &self.cyberattack_csv,
            KgCategory::PowerDraw => &self.powerdraw_csv,
        };
        explicit
            .clone()
            .unwrap_or_else(|| self.dir.join(category.default_table_file()))
    }
}

// ── Classifier ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Optional YAML file overriding the built-in cascade thresholds.
    pub thresholds_path: Option<PathBuf>,
}

impl ClassifierConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            thresholds_path: profiled_env_opt(p, "CLASSIFIER_THRESHOLDS").map(PathBuf::from),
        }
    }
}
