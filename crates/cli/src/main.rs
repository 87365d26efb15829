//! factory-sim: runs the telemetry simulator and writes annotated JSON lines.
//!
//! Records go to stdout (or `--output`); logs go to stderr so the record
//! stream stays clean.

mod cli;

use std::fs::File;
use std::io::BufWriter;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use factory_core::config::load_dotenv;
use factory_graph::{KgTables, LoadStatus};
use factory_rules::{load_thresholds, CascadeThresholds, Classifier};
use factory_sim::{
    run, CycleEngine, DataSourceSelector, Emitter, EnvSelector, FixedSelector, JsonLinesEmitter,
    RunOptions, StopSignal,
};

use crate::cli::Cli;

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let config = cli
        .resolve_config()
        .context("invalid configuration")?;
    config.log_summary();

    let (tables, loads) = KgTables::load(&config.kg);
    let degraded = loads
        .iter()
        .filter(|l| !matches!(l.status, LoadStatus::Loaded { .. }))
        .count();
    let stats = tables.stats();
    info!(
        tables = stats.table_count,
        triples = stats.triple_count,
        degraded,
        "KG tables ready"
    );

    let thresholds = match &config.classifier.thresholds_path {
        Some(path) => load_thresholds(path)
            .with_context(|| format!("failed to load thresholds from {}", path.display()))?,
        None => CascadeThresholds::default(),
    };

    let selector: Box<dyn DataSourceSelector> = match cli.mode {
        Some(mode) => Box::new(FixedSelector(mode.into())),
        None => Box::new(EnvSelector::new(config.profile.clone())),
    };
    let mut engine =
        CycleEngine::from_config(&config.simulation, selector, Classifier::new(thresholds))
            .context("failed to build cycle engine")?;

    let options = RunOptions {
        cycles: config.simulation.cycles,
        delay: Duration::from_millis(config.simulation.cycle_delay_ms),
        continue_on_error: cli.continue_on_error,
        ..RunOptions::default()
    };

    let stop = StopSignal::new();
    tokio::spawn({
        let stop = stop.clone();
        async move {
            shutdown_signal().await;
            info!("shutdown requested, stopping after the current cycle");
            stop.stop();
        }
    });

    let output = cli.output.clone();
    let summary = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        let mut emitter: Box<dyn Emitter> = match &output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                Box::new(JsonLinesEmitter::new(BufWriter::new(file)))
            }
            None => Box::new(JsonLinesEmitter::stdout()),
        };
        let summary = run(&mut engine, &tables, emitter.as_mut(), &options, &stop)
            .context("simulation run failed")?;
        Ok(summary)
    })
    .await
    .context("simulation task panicked")??;

    summary.log_summary();
    Ok(())
}

/// Wait for SIGINT or SIGTERM. Never resolves if no handler can be installed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl_c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to register SIGTERM handler");
                ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
    }
}
