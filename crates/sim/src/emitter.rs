//! Annotated records and the sinks they are written to.
//!
//! A record is one flat JSON object per cycle with the keys, in order:
//! `cycle_id`, `timestamp`, the machine fields, the sensor fields, `kg_node`
//! and `kg_triple`.

use std::io::{self, Write};

use factory_core::{MachineData, Result, SensorReadings};
use factory_graph::{KgTables, KgTriple};
use factory_rules::Classification;
use serde::Serialize;

use crate::engine::CycleEvent;

#[derive(Debug, Serialize)]
pub struct AnnotatedRecord<'a> {
    pub cycle_id: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    #[serde(flatten)]
    pub machine_data: &'a MachineData,
    #[serde(flatten)]
    pub sensor_readings: &'a SensorReadings,
    pub kg_node: Classification,
    pub kg_triple: Option<&'a KgTriple>,
}

/// Attach the classification and its KG triple (if the table has one) to an event.
pub fn annotate<'a>(
    event: &'a CycleEvent,
    classification: Classification,
    tables: &'a KgTables,
) -> AnnotatedRecord<'a> {
    AnnotatedRecord {
        cycle_id: event.cycle_id(),
        timestamp: event.timestamp().timestamp_micros() as f64 / 1_000_000.0,
        machine_data: event.machine_data(),
        sensor_readings: event.sensor_readings(),
        kg_node: classification,
        kg_triple: tables.lookup(classification.category(), classification.label()),
    }
}

/// Destination for annotated records.
pub trait Emitter {
    fn emit(&mut self, record: &AnnotatedRecord<'_>) -> Result<()>;
}

/// Writes one JSON object per line and flushes after each record.
pub struct JsonLinesEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesEmitter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Emitter for JsonLinesEmitter<W> {
    fn emit(&mut self, record: &AnnotatedRecord<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps records as JSON values in memory.
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    records: Vec<serde_json::Value>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[serde_json::Value] {
        &self.records
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, record: &AnnotatedRecord<'_>) -> Result<()> {
        self.records.push(serde_json::to_value(record)?);
        Ok(())
    }
}
