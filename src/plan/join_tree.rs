use crate::core::{Result, Table2JsonError};
use crate::json_sql::{
    DEFAULT_GROUP_CONCAT_MAX_LEN, build_query, collection_join, nested_array, nested_object,
    session_preamble, singleton_join,
};
use crate::storage::{Catalog, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info_span};

/// How a related table shows up in the parent object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    /// The one related row's keys are spliced into the parent object.
    Inline,
    /// The one related row becomes `"key":{...}`.
    Object,
    /// All related rows become `"key":[{...},...]`.
    Array,
}

/// One child table hung off the root table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub kind: JoinKind,
    /// JSON key for `object` and `array` joins.
    #[serde(default)]
    pub key: Option<String>,
    pub table: String,
    /// Column of `table` matched against `outer_key`.
    pub join_field: String,
    /// SQL expression on the parent row, e.g. `p.id`.
    pub outer_key: String,
    /// Overrides the tree-wide order list for `array` joins.
    #[serde(default)]
    pub order: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl JoinSpec {
    fn new(
        kind: JoinKind,
        key: Option<String>,
        table: &str,
        join_field: &str,
        outer_key: &str,
    ) -> Self {
        Self {
            kind,
            key,
            table: table.to_string(),
            join_field: join_field.to_string(),
            outer_key: outer_key.to_string(),
            order: None,
            exclude: Vec::new(),
        }
    }

    pub fn inline(table: &str, join_field: &str, outer_key: &str) -> Self {
        Self::new(JoinKind::Inline, None, table, join_field, outer_key)
    }

    pub fn object(key: &str, table: &str, join_field: &str, outer_key: &str) -> Self {
        Self::new(JoinKind::Object, Some(key.to_string()), table, join_field, outer_key)
    }

    pub fn array(key: &str, table: &str, join_field: &str, outer_key: &str) -> Self {
        Self::new(JoinKind::Array, Some(key.to_string()), table, join_field, outer_key)
    }

    pub fn order(mut self, fields: &[&str]) -> Self {
        self.order = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn exclude(mut self, fields: &[&str]) -> Self {
        self.exclude = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    fn json_key(&self) -> Result<&str> {
        self.key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            Table2JsonError::Configuration(format!(
                "{:?} join on table '{}' needs a key",
                self.kind, self.table
            ))
        })
    }
}

fn default_group_concat_max_len() -> Option<u64> {
    Some(DEFAULT_GROUP_CONCAT_MAX_LEN)
}

/// Output shape for one root table: which related tables are nested, how
/// they are keyed and ordered, and which rows of the root are selected.
///
/// Unknown keys in the JSON file are ignored, so the tree can live next to
/// connection settings in one task file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTree {
    pub root: String,
    #[serde(default)]
    pub alias: Option<String>,
    /// Condition for the root rows, without the `WHERE` keyword.
    #[serde(default)]
    pub predicate: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Default order list for every `array` join.
    #[serde(default)]
    pub order: Vec<String>,
    /// `null` suppresses the session preamble.
    #[serde(default = "default_group_concat_max_len")]
    pub group_concat_max_len: Option<u64>,
    #[serde(default)]
    pub joins: Vec<JoinSpec>,
}

impl JoinTree {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            alias: None,
            predicate: None,
            exclude: Vec::new(),
            order: Vec::new(),
            group_concat_max_len: default_group_concat_max_len(),
            joins: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn predicate(mut self, predicate: &str) -> Self {
        self.predicate = Some(predicate.to_string());
        self
    }

    pub fn exclude(mut self, fields: &[&str]) -> Self {
        self.exclude = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn order(mut self, fields: &[&str]) -> Self {
        self.order = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn group_concat_max_len(mut self, max_len: Option<u64>) -> Self {
        self.group_concat_max_len = max_len;
        self
    }

    pub fn join(mut self, join: JoinSpec) -> Self {
        self.joins.push(join);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Compiles the tree against `catalog`.
    ///
    /// Fails with `Configuration` when the tree names a table, join field
    /// or excluded field the catalog does not have. Order fields are the
    /// exception: unknown ones are skipped.
    pub fn compile(&self, catalog: &Catalog) -> Result<CompiledQuery> {
        let span = info_span!("compile_join_tree", root = %self.root);
        let _enter = span.enter();

        let root = catalog.get_table(&self.root)?;
        let root_exclude = checked_exclusions(root, &self.exclude)?;

        let mut nested = Vec::with_capacity(self.joins.len());
        for join in &self.joins {
            let child = catalog.get_table(&join.table)?;
            let exclude = checked_exclusions(child, &join.exclude)?;
            let fragment = match join.kind {
                JoinKind::Inline => {
                    singleton_join(child, &join.join_field, &join.outer_key, &exclude)?
                }
                JoinKind::Object => nested_object(
                    join.json_key()?,
                    &singleton_join(child, &join.join_field, &join.outer_key, &exclude)?,
                ),
                JoinKind::Array => {
                    let order: Vec<&str> = join
                        .order
                        .as_ref()
                        .unwrap_or(&self.order)
                        .iter()
                        .map(String::as_str)
                        .collect();
                    nested_array(
                        join.json_key()?,
                        &collection_join(
                            child,
                            &join.join_field,
                            &join.outer_key,
                            &order,
                            &exclude,
                        )?,
                    )
                }
            };
            debug!(table = %join.table, kind = ?join.kind, "compiled join");
            nested.push(fragment);
        }

        let tail = self.select_tail();
        let statement = build_query(root, &nested, &root_exclude, tail.as_deref());
        Ok(CompiledQuery {
            preamble: self.group_concat_max_len.map(session_preamble),
            statement,
        })
    }

    fn select_tail(&self) -> Option<String> {
        let predicate = self
            .predicate
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        match (self.alias.as_deref(), predicate) {
            (Some(alias), Some(predicate)) => Some(format!("{} WHERE {}", alias, predicate)),
            (Some(alias), None) => Some(alias.to_string()),
            (None, Some(predicate)) => Some(format!("WHERE {}", predicate)),
            (None, None) => None,
        }
    }
}

fn checked_exclusions<'a>(table: &Table, exclude: &'a [String]) -> Result<Vec<&'a str>> {
    exclude
        .iter()
        .map(|name| {
            if table.has_field(name) {
                Ok(name.as_str())
            } else {
                Err(Table2JsonError::Configuration(format!(
                    "excluded field '{}' not found in table '{}'",
                    name,
                    table.name()
                )))
            }
        })
        .collect()
}

/// Generated SQL, ready to hand to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub preamble: Option<String>,
    pub statement: String,
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(preamble) = &self.preamble {
            writeln!(f, "{}", preamble)?;
        }
        write!(f, "{};", self.statement)
    }
}
