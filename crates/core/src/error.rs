use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field the classifier needs is absent from the cycle's telemetry.
    #[error("missing field `{field}` in {source_map}")]
    MissingField {
        field: String,
        source_map: &'static str,
    },

    /// A field is present but does not have the expected shape.
    #[error("field `{field}` is not {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("field `{field}` produced by {machine} collides with an earlier machine")]
    FieldCollision { field: String, machine: String },

    #[error("cycle id must be positive")]
    InvalidCycleId,

    #[error("cycle id {requested} does not follow {previous}")]
    CycleOrder { previous: u64, requested: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FactoryError {
    pub fn missing_sensor(field: &str) -> Self {
        FactoryError::MissingField {
            field: field.to_string(),
            source_map: "sensor_readings",
        }
    }

    pub fn missing_machine(field: &str) -> Self {
        FactoryError::MissingField {
            field: field.to_string(),
            source_map: "machine_data",
        }
    }
}

pub type Result<T> = std::result::Result<T, FactoryError>;
