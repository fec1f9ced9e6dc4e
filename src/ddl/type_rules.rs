use crate::core::{Result, SemanticType, Table2JsonError};
use regex::Regex;

lazy_static::lazy_static! {
    /// Classification rules, evaluated top to bottom; the first match wins.
    /// Boolean must stay ahead of integer, integer ahead of number, number
    /// ahead of string.
    static ref TYPE_RULES: Vec<(Regex, SemanticType)> = vec![
        (Regex::new(r"bit|boolean").expect("boolean rule"), SemanticType::Boolean),
        (Regex::new(r"int(eger)?$").expect("integer rule"), SemanticType::Integer),
        (
            Regex::new(r"real|double|float|decimal|numeric").expect("number rule"),
            SemanticType::Number,
        ),
        (
            Regex::new(r"date|time|text|char|enum|set|blob|binary").expect("string rule"),
            SemanticType::String,
        ),
    ];

    static ref ONE_BIT_TINYINT: Regex =
        Regex::new(r"(?i)tinyint\(\s*1\s*\)").expect("tinyint(1) pattern");
}

/// Declared type split into base name and the numbers inside its parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub base: String,
    pub length: Option<u32>,
    pub decimals: Option<u32>,
}

/// `tinyint(1)` is how MySQL spells a boolean column.
pub fn is_one_bit_tinyint(sql_type: &str) -> bool {
    ONE_BIT_TINYINT.is_match(sql_type)
}

/// Splits `decimal(10,2)` into `decimal`, 10 and 2.
///
/// Parts of the parenthesized spec that are not integers (enum members,
/// for instance) leave the corresponding slot empty.
pub fn split_type_spec(sql_type: &str) -> TypeSpec {
    let Some((base, rest)) = sql_type.split_once('(') else {
        return TypeSpec {
            base: sql_type.to_string(),
            length: None,
            decimals: None,
        };
    };

    let inner = rest.strip_suffix(')').unwrap_or(rest);
    let mut parts = inner.split(',');
    let length = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let decimals = parts.next().and_then(|p| p.trim().parse::<u32>().ok());

    TypeSpec {
        base: base.to_string(),
        length,
        decimals,
    }
}

/// Classifies a base type name (`varchar`, `bigint`, ...).
///
/// `raw_type` is the full declared type and is what the error reports.
pub fn classify_sql_type(base: &str, raw_type: &str) -> Result<SemanticType> {
    let base = base.trim().to_ascii_lowercase();
    TYPE_RULES
        .iter()
        .find(|(rule, _)| rule.is_match(&base))
        .map(|(_, semantic)| *semantic)
        .ok_or_else(|| Table2JsonError::UnknownSqlType(raw_type.to_string()))
}
