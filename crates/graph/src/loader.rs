//! CSV loader for KG reference tables.
//!
//! Expected header columns: `Source entity`, `relationship`, `target entity`.
//! Extra columns are ignored; cell values are trimmed. A missing or unreadable
//! file never fails startup: it yields an empty table and a warning.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use factory_core::KgCategory;
use tracing::{debug, warn};

use crate::store::{KgTriple, KgTripleTable};

pub const SOURCE_COLUMN: &str = "Source entity";
pub const RELATIONSHIP_COLUMN: &str = "relationship";
pub const TARGET_COLUMN: &str = "target entity";

#[derive(Debug, thiserror::Error)]
pub enum TableLoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Outcome of loading one category's table.
#[derive(Debug)]
pub struct TableLoad {
    pub category: KgCategory,
    pub path: PathBuf,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Table was read; `skipped` rows were malformed and ignored.
    Loaded { rows: usize, skipped: usize },
    /// The file does not exist.
    Missing,
    /// The file exists but could not be read as a KG table.
    Failed { error: String },
}

/// Load a table from `path`, degrading to an empty table on any failure.
pub fn load_table(path: &Path) -> (KgTripleTable, LoadStatus) {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "KG file not found, using empty table");
            return (KgTripleTable::new(), LoadStatus::Missing);
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "KG file unreadable, using empty table");
            return (
                KgTripleTable::new(),
                LoadStatus::Failed {
                    error: e.to_string(),
                },
            );
        }
    };

    match read_table(file) {
        Ok((table, skipped)) => {
            let rows = table.len();
            (table, LoadStatus::Loaded { rows, skipped })
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "KG file malformed, using empty table");
            (
                KgTripleTable::new(),
                LoadStatus::Failed {
                    error: e.to_string(),
                },
            )
        }
    }
}

/// Parse a table from any reader. Returns the table and the number of
/// skipped rows (incomplete or undecodable). Only an unreadable header fails.
pub fn read_table<R: Read>(reader: R) -> Result<(KgTripleTable, usize), TableLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| normalize_header(h) == name)
            .ok_or(TableLoadError::MissingColumn(name))
    };
    let source_idx = column(SOURCE_COLUMN)?;
    let relationship_idx = column(RELATIONSHIP_COLUMN)?;
    let target_idx = column(TARGET_COLUMN)?;

    let mut table = KgTripleTable::new();
    let mut skipped = 0;

    for (line, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = line + 1, error = %e, "skipping malformed KG row");
                skipped += 1;
                continue;
            }
        };
        let cell = |idx: usize| record.get(idx).map(str::trim).filter(|s| !s.is_empty());

        let (Some(source), Some(relationship), Some(target)) =
            (cell(source_idx), cell(relationship_idx), cell(target_idx))
        else {
            warn!(row = line + 1, "skipping incomplete KG row");
            skipped += 1;
            continue;
        };

        let triple = KgTriple {
            relationship: relationship.to_string(),
            target_entity: target.to_string(),
        };
        if table.insert(source, triple).is_some() {
            debug!(source, "duplicate KG source entity, keeping last row");
        }
    }

    Ok((table, skipped))
}

/// Header names may carry a UTF-8 BOM and stray whitespace.
fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}
