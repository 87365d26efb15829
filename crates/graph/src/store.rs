use std::collections::HashMap;

use factory_core::config::KgConfig;
use factory_core::KgCategory;
use serde::Serialize;
use tracing::info;

use crate::loader::{load_table, LoadStatus, TableLoad};

/// Relationship and target of a KG triple. The source entity is the
/// classification label the triple is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KgTriple {
    pub relationship: String,
    pub target_entity: String,
}

/// Label → triple lookup for one KG category.
#[derive(Debug, Clone, Default)]
pub struct KgTripleTable {
    rows: HashMap<String, KgTriple>,
}

impl KgTripleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. A repeated source entity replaces the earlier row.
    pub fn insert(&mut self, source_entity: &str, triple: KgTriple) -> Option<KgTriple> {
        self.rows.insert(source_entity.to_string(), triple)
    }

    /// Look up the triple for an exact label. A miss is not an error.
    pub fn get(&self, label: &str) -> Option<&KgTriple> {
        self.rows.get(label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct KgStats {
    pub table_count: usize,
    pub triple_count: usize,
    pub triples_by_category: HashMap<String, usize>,
}

/// One reference table per KG category.
///
/// Built once by [`KgTables::load`] and then shared immutably; categories
/// without a table behave like empty tables.
#[derive(Debug, Clone, Default)]
pub struct KgTables {
    tables: HashMap<KgCategory, KgTripleTable>,
}

impl KgTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every category's table from the paths configured in `config`.
    ///
    /// Missing or unreadable sources degrade to empty tables; the per-file
    /// outcomes are returned alongside for reporting.
    pub fn load(config: &KgConfig) -> (Self, Vec<TableLoad>) {
        let mut tables = Self::new();
        let mut results = Vec::with_capacity(KgCategory::ALL.len());

        for category in KgCategory::ALL {
            let path = config.table_path(category);
            let (table, status) = load_table(&path);
            if let LoadStatus::Loaded { rows, .. } = &status {
                info!(category = %category, rows, path = %path.display(), "loaded KG table");
            }
            tables.insert(category, table);
            results.push(TableLoad {
                category,
                path,
                status,
            });
        }

        (tables, results)
    }

    pub fn insert(&mut self, category: KgCategory, table: KgTripleTable) {
        self.tables.insert(category, table);
    }

    /// Triple for `label` in `category`'s table, if any.
    pub fn lookup(&self, category: KgCategory, label: &str) -> Option<&KgTriple> {
        self.tables.get(&category).and_then(|t| t.get(label))
    }

    pub fn stats(&self) -> KgStats {
        let mut triples_by_category = HashMap::new();
        for (category, table) in &self.tables {
            triples_by_category.insert(category.to_string(), table.len());
        }

        KgStats {
            table_count: self.tables.len(),
            triple_count: self.tables.values().map(KgTripleTable::len).sum(),
            triples_by_category,
        }
    }
}
