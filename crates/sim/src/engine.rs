//! Cycle engine: runs every machine, reads sensors (or the substitute set),
//! stamps the event and classifies it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use factory_core::{
    DataMode, FactoryError, MachineData, Result, SensorReadings, SimulationConfig,
};
use factory_rules::{Classification, Classifier};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::machine::{default_machines, Machine};
use crate::sensor::{default_sensors, Sensor};
use crate::source::{substitute_readings, DataSourceSelector};

/// Keys the emitted record reserves for itself.
pub const RESERVED_FIELDS: [&str; 4] = ["cycle_id", "timestamp", "kg_node", "kg_triple"];

/// Everything observed in one production cycle. Immutable once built.
#[derive(Debug, Clone)]
pub struct CycleEvent {
    cycle_id: u64,
    timestamp: DateTime<Utc>,
    machine_data: MachineData,
    sensor_readings: SensorReadings,
    source: DataMode,
}

impl CycleEvent {
    pub fn cycle_id(&self) -> u64 {
        self.cycle_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn machine_data(&self) -> &MachineData {
        &self.machine_data
    }

    pub fn sensor_readings(&self) -> &SensorReadings {
        &self.sensor_readings
    }

    /// Whether the readings came from the sensors or the substitute set.
    pub fn source(&self) -> DataMode {
        self.source
    }
}

pub struct CycleEngine {
    machines: Vec<Machine>,
    sensors: Vec<Sensor>,
    selector: Box<dyn DataSourceSelector>,
    classifier: Classifier,
    rng: StdRng,
    last_cycle_id: Option<u64>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl CycleEngine {
    /// Build an engine after checking that no two machines report the same
    /// field and that sensor names do not shadow machine or record fields.
    pub fn new(
        machines: Vec<Machine>,
        sensors: Vec<Sensor>,
        selector: Box<dyn DataSourceSelector>,
        classifier: Classifier,
        rng: StdRng,
    ) -> Result<Self> {
        let mut machine_fields: HashSet<&str> = HashSet::new();
        for machine in &machines {
            for &field in machine.field_names() {
                if !machine_fields.insert(field) || RESERVED_FIELDS.contains(&field) {
                    return Err(FactoryError::FieldCollision {
                        field: field.to_string(),
                        machine: machine.name().to_string(),
                    });
                }
            }
        }

        let mut sensor_names: HashSet<&str> = HashSet::new();
        for sensor in &sensors {
            let name = sensor.name();
            if !sensor_names.insert(name)
                || machine_fields.contains(name)
                || RESERVED_FIELDS.contains(&name)
            {
                return Err(FactoryError::Config(format!(
                    "sensor name `{}` collides with another record field",
                    name
                )));
            }
        }

        Ok(Self {
            machines,
            sensors,
            selector,
            classifier,
            rng,
            last_cycle_id: None,
            last_timestamp: None,
        })
    }

    /// The production line and sensor set, seeded from `SIM_SEED` when set.
    pub fn from_config(
        config: &SimulationConfig,
        selector: Box<dyn DataSourceSelector>,
        classifier: Classifier,
    ) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(
            default_machines(config.tools.clone())?,
            default_sensors(),
            selector,
            classifier,
            rng,
        )
    }

    pub fn last_cycle_id(&self) -> Option<u64> {
        self.last_cycle_id
    }

    /// Run one cycle. Ids must be positive and strictly increasing; an id is
    /// consumed even if the cycle later fails.
    pub fn run_cycle(&mut self, cycle_id: u64) -> Result<(CycleEvent, Classification)> {
        if cycle_id == 0 {
            return Err(FactoryError::InvalidCycleId);
        }
        if let Some(previous) = self.last_cycle_id {
            if cycle_id <= previous {
                return Err(FactoryError::CycleOrder {
                    previous,
                    requested: cycle_id,
                });
            }
        }
        self.last_cycle_id = Some(cycle_id);

        let mut machine_data = MachineData::new();
        for machine in &mut self.machines {
            for (field, value) in machine.perform_operation(cycle_id, &mut self.rng) {
                if machine_data.contains_key(&field) {
                    return Err(FactoryError::FieldCollision {
                        field,
                        machine: machine.name().to_string(),
                    });
                }
                machine_data.insert(field, value);
            }
        }

        let source = self.selector.select();
        let sensor_readings = match source {
            DataMode::Real => {
                debug!(cycle_id, "using substitute sensor readings");
                substitute_readings()
            }
            DataMode::Simulate => self
                .sensors
                .iter()
                .map(|s| (s.name().to_string(), s.read(&mut self.rng)))
                .collect(),
        };

        let timestamp = self.next_timestamp();
        let event = CycleEvent {
            cycle_id,
            timestamp,
            machine_data,
            sensor_readings,
            source,
        };

        let classification = self
            .classifier
            .classify(&event.sensor_readings, &event.machine_data)?;
        Ok((event, classification))
    }

    /// Wall-clock time, never earlier than the previous cycle's timestamp.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let timestamp = match self.last_timestamp {
            Some(last) if now < last => {
                warn!(%now, %last, "clock moved backwards, reusing last timestamp");
                last
            }
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }
}
