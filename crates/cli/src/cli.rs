use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use factory_core::{Config, DataMode, Result};

/// Factory telemetry simulator.
///
/// Runs production cycles, classifies each one against the knowledge-graph
/// cascade and writes one JSON record per cycle. Flags override the
/// environment configuration (`NUM_CYCLES`, `CYCLE_DELAY_MS`, `KG_DIR`, ...).
#[derive(Parser, Debug)]
#[command(name = "factory-sim", version, about)]
pub struct Cli {
    /// Configuration profile; keys are looked up as `{PROFILE}_{KEY}` first.
    #[arg(long, env = "FACTORY_PROFILE")]
    pub profile: Option<String>,

    /// Number of cycles to run.
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Delay between cycles in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Directory holding the per-category KG tables.
    #[arg(long)]
    pub kg_dir: Option<PathBuf>,

    /// YAML file overriding the cascade thresholds.
    #[arg(long)]
    pub thresholds: Option<PathBuf>,

    /// Seed for the simulation RNG.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fix the data source for the whole run instead of reading `MODE` every cycle.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Write JSON lines to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log failed cycles and keep going instead of stopping the run.
    #[arg(long)]
    pub continue_on_error: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Sim,
    Real,
}

impl From<ModeArg> for DataMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sim => DataMode::Simulate,
            ModeArg::Real => DataMode::Real,
        }
    }
}

impl Cli {
    /// Resolve the environment config for the selected profile, then apply flags.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.profile {
            Some(profile) => Config::for_profile(profile)?,
            None => Config::from_env()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(cycles) = self.cycles {
            config.simulation.cycles = cycles;
        }
        if let Some(delay) = self.delay_ms {
            config.simulation.cycle_delay_ms = delay;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(mode) = self.mode {
            config.simulation.mode = mode.into();
        }
        if let Some(dir) = &self.kg_dir {
            config.kg.dir = dir.clone();
        }
        if let Some(path) = &self.thresholds {
            config.classifier.thresholds_path = Some(path.clone());
        }
    }
}
