//! Knowledge-graph reference tables.
//!
//! Each KG category has one table mapping a classification label (the
//! triple's source entity) to its relationship and target entity. Tables
//! are loaded once at startup from CSV files and are read-only afterwards.

pub mod loader;
pub mod store;

pub use loader::{load_table, read_table, LoadStatus, TableLoad, TableLoadError};
pub use store::{KgStats, KgTables, KgTriple, KgTripleTable};
