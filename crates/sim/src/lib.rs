//! Factory telemetry simulator.
//!
//! This crate provides:
//! - Sensor and machine variants producing per-cycle readings and operations
//! - The automatic tool changer, the only stateful machine component
//! - The cycle engine assembling and classifying one event per cycle
//! - Annotated-record emission and the paced run loop with a stop signal

pub mod emitter;
pub mod engine;
pub mod machine;
mod random;
pub mod runner;
pub mod sensor;
pub mod source;
pub mod tool_changer;

pub use emitter::{annotate, AnnotatedRecord, Emitter, JsonLinesEmitter, MemoryEmitter};
pub use engine::{CycleEngine, CycleEvent};
pub use machine::{default_machines, Machine, OperationResult};
pub use runner::{run, RunOptions, RunSummary, StopSignal};
pub use sensor::{default_sensors, Sensor, SensorKind};
pub use source::{substitute_readings, DataSourceSelector, EnvSelector, FixedSelector};
pub use tool_changer::ToolChanger;
