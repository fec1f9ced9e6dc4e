use crate::core::Field;
use std::collections::HashMap;
use std::fmt;

/// Accumulates parsed fields for one table in declaration order.
///
/// Declaration order is the key order of every JSON object generated for
/// the table, so fields must be appended in the order they were declared.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Binds the next ordinal position and this table to `field` and
    /// stores the bound copy.
    ///
    /// A repeated name shadows the earlier field in name lookups; both
    /// stay in the positional sequence.
    pub fn append(&mut self, field: Field) -> &Field {
        let position = self.fields.len();
        let bound = field.bound_to(&self.name, position);
        self.by_name.insert(bound.name().to_string(), position);
        self.fields.push(bound);
        &self.fields[position]
    }

    pub fn build(self) -> Table {
        Table {
            name: self.name,
            fields: self.fields,
            by_name: self.by_name,
        }
    }
}

/// Read-only schema snapshot of one table.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
}

impl Table {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, position: usize) -> Option<&Field> {
        self.fields.get(position)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "=== {} ===", self.name)?;
        for field in &self.fields {
            write!(f, "\n  {}", field)?;
        }
        Ok(())
    }
}
