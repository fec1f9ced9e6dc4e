use crate::core::{Field, SemanticType};

/// Backquotes a column or table name for MySQL, doubling embedded
/// backquotes, so reserved words and names with blanks stay usable.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// SQL expression that evaluates to `"name":value` for a non-NULL value
/// and to the empty string for NULL, so absent values vanish from the
/// object instead of showing up as `"name":null`.
///
/// String values are wrapped in double quotes as-is. Embedded quotes,
/// backslashes and control characters are NOT escaped, so such values
/// produce invalid JSON.
pub fn field_fragment(field: &Field) -> String {
    let key = field.name();
    let column = quote_ident(key);
    match field.semantic_type() {
        SemanticType::String => {
            format!("IFNULL(CONCAT('\"{key}\":\"',{column},'\"'),'')")
        }
        SemanticType::Boolean => format!(
            "IF({column} IS NULL,'',CONCAT('\"{key}\":',IF({column}=0,'false','true')))"
        ),
        SemanticType::Integer | SemanticType::Number => {
            format!("IFNULL(CONCAT('\"{key}\":',{column}),'')")
        }
    }
}

/// Comma-joined key/value text for one object, without the braces.
///
/// Fields named in `exclude` are skipped; `extra` fragments (nested
/// objects and arrays) follow the fields. Every part goes through
/// `NULLIF(part,'')` because `CONCAT_WS` only drops NULL arguments, which
/// keeps empty parts from leaving stray separators behind.
pub fn row_fragments(fields: &[Field], exclude: &[&str], extra: &[String]) -> String {
    let parts: Vec<String> = fields
        .iter()
        .filter(|field| !exclude.contains(&field.name()))
        .map(field_fragment)
        .chain(extra.iter().cloned())
        .map(|part| format!("NULLIF({},'')", part))
        .collect();

    if parts.is_empty() {
        return "''".to_string();
    }
    format!("CONCAT_WS(',',{})", parts.join(","))
}
