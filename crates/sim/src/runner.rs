//! Paced run loop.
//!
//! Cycles run strictly in sequence. Between cycles the loop waits on a
//! [`StopSignal`], so a stop request cuts the delay short instead of waiting
//! it out.

use std::collections::BTreeMap;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use factory_core::Result;
use factory_graph::KgTables;
use serde::Serialize;
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

use crate::emitter::{annotate, Emitter};
use crate::engine::CycleEngine;

/// Cross-thread stop flag with an interruptible wait.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait up to `timeout`. Returns `true` if a stop was requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        while !*stopped {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            stopped = cvar
                .wait_timeout(stopped, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        *stopped
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub cycles: u64,
    /// Pause between consecutive cycles.
    pub delay: Duration,
    /// Log and count a failed cycle, then carry on with the next id.
    pub continue_on_error: bool,
    pub first_cycle_id: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            cycles: 5,
            delay: Duration::from_millis(1000),
            continue_on_error: false,
            first_cycle_id: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    pub triples_attached: u64,
    pub label_counts: BTreeMap<String, u64>,
    pub stopped_early: bool,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            cycles_completed: 0,
            cycles_failed: 0,
            triples_attached: 0,
            label_counts: BTreeMap::new(),
            stopped_early: false,
        }
    }

    pub fn log_summary(&self) {
        info!(
            run_id = %self.run_id,
            completed = self.cycles_completed,
            failed = self.cycles_failed,
            triples = self.triples_attached,
            stopped_early = self.stopped_early,
            "run finished"
        );
        for (label, count) in &self.label_counts {
            info!(label = %label, count, "classification count");
        }
    }
}

/// Run `options.cycles` cycles, emitting one annotated record per cycle.
///
/// A failed cycle ends the run with its error unless `continue_on_error` is
/// set. Emitter failures always end the run.
pub fn run(
    engine: &mut CycleEngine,
    tables: &KgTables,
    emitter: &mut dyn Emitter,
    options: &RunOptions,
    stop: &StopSignal,
) -> Result<RunSummary> {
    let mut summary = RunSummary::new();
    let span = info_span!("run", run_id = %summary.run_id);
    let _enter = span.enter();
    info!(cycles = options.cycles, delay_ms = options.delay.as_millis() as u64, "run starting");

    for i in 0..options.cycles {
        if stop.is_stopped() {
            summary.stopped_early = true;
            break;
        }
        let cycle_id = options.first_cycle_id + i;

        match engine.run_cycle(cycle_id) {
            Ok((event, classification)) => {
                let record = annotate(&event, classification, tables);
                emitter.emit(&record)?;
                if record.kg_triple.is_some() {
                    summary.triples_attached += 1;
                }
                summary.cycles_completed += 1;
                *summary
                    .label_counts
                    .entry(classification.label().to_string())
                    .or_insert(0) += 1;
                debug!(cycle_id, kg_node = %classification, source = %event.source(), "cycle emitted");
            }
            Err(e) => {
                summary.cycles_failed += 1;
                error!(cycle_id, error = %e, "cycle failed");
                if !options.continue_on_error {
                    return Err(e);
                }
            }
        }

        let last = i + 1 == options.cycles;
        if !last && stop.wait_timeout(options.delay) {
            summary.stopped_early = true;
            break;
        }
    }

    if summary.stopped_early {
        info!("stop requested, ending run early");
    }
    Ok(summary)
}
