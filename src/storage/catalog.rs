use super::Table;
use crate::core::{Result, Table2JsonError};
use std::collections::HashMap;

/// Tables discovered during one generation run.
///
/// Registration consumes the catalog and returns the extended one, so a
/// catalog handed to the compiler is never mutated behind its back.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    pub fn with_table(self, table: Table) -> Result<Self> {
        let name = table.name().to_string();
        if self.tables.contains_key(&name) {
            return Err(Table2JsonError::Configuration(format!(
                "table '{}' registered twice",
                name
            )));
        }

        let mut tables = self.tables;
        tables.insert(name, table);
        Ok(Self { tables })
    }

    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Table2JsonError::Configuration(format!("table '{}' not found", name)))
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in sorted order.
    pub fn list_tables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
