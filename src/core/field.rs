use super::{ColumnOptions, DefaultValue, SemanticType};
use std::fmt;

/// One column of a table as read from its definition line.
///
/// Fields are immutable. The owning table and ordinal position are bound
/// once, when the field is appended through a `TableBuilder`, which hands
/// back a new value rather than mutating the parsed one.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    sql_type: String,
    semantic_type: SemanticType,
    nullable: bool,
    default: Option<DefaultValue>,
    length: Option<u32>,
    decimals: Option<u32>,
    options: ColumnOptions,
    position: Option<usize>,
    table: Option<String>,
}

impl Field {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        sql_type: String,
        semantic_type: SemanticType,
        nullable: bool,
        default: Option<DefaultValue>,
        length: Option<u32>,
        decimals: Option<u32>,
        options: ColumnOptions,
    ) -> Self {
        Self {
            name,
            sql_type,
            semantic_type,
            nullable,
            default,
            length,
            decimals,
            options,
            position: None,
            table: None,
        }
    }

    pub(crate) fn bound_to(&self, table: &str, position: usize) -> Self {
        Self {
            position: Some(position),
            table: Some(table.to_string()),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type exactly as written, e.g. `decimal(10,2)`.
    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }

    pub fn decimals(&self) -> Option<u32> {
        self.decimals
    }

    pub fn options(&self) -> &ColumnOptions {
        &self.options
    }

    /// Zero-based ordinal, `None` until the field is appended to a table.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Name of the owning table, `None` until the field is appended.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.sql_type, self.semantic_type)?;
        if let Some(length) = self.length {
            match self.decimals {
                Some(decimals) => write!(f, " length={},{}", length, decimals)?,
                None => write!(f, " length={}", length)?,
            }
        }
        if !self.nullable {
            f.write_str(" NOT NULL")?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {}", default)?;
        }
        if let Some(position) = self.position {
            write!(f, " #{}", position)?;
        }
        Ok(())
    }
}
