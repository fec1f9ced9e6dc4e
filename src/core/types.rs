use std::fmt;

/// Four-way classification of a column's declared SQL type.
///
/// Drives how a value is rendered into JSON by the expression compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Boolean,
    Integer,
    Number,
    String,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "boolean",
            SemanticType::Integer => "integer",
            SemanticType::Number => "number",
            SemanticType::String => "string",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column default, typed after the column's semantic type has been decided.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    /// Unsigned defaults above `i64::MAX` (`bigint unsigned`).
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Boolean(b) => write!(f, "{}", b),
            DefaultValue::Integer(i) => write!(f, "{}", i),
            DefaultValue::Unsigned(u) => write!(f, "{}", u),
            DefaultValue::Float(x) => write!(f, "{}", x),
            DefaultValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// Column options recognized in a definition line, other than nullability
/// and the default literal.
///
/// Value-carrying options keep the last occurrence when repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOptions {
    pub unsigned: bool,
    pub zerofill: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub comment: Option<String>,
    pub references: Option<String>,
}
