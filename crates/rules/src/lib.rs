//! Threshold-rule classification of factory telemetry into KG categories.
//!
//! This crate provides:
//! - The closed set of classification labels (`<Category>:<Reason>`)
//! - YAML-loadable cascade thresholds whose defaults are the production boundaries
//! - The ordered decision cascade mapping one cycle's telemetry to a label

pub mod classification;
pub mod classifier;
pub mod thresholds;

pub use classification::Classification;
pub use classifier::{classify, Classifier};
pub use thresholds::{load_thresholds, CascadeThresholds};
