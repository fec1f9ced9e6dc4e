use super::type_rules::{classify_sql_type, is_one_bit_tinyint, split_type_spec};
use crate::core::{ColumnOptions, DefaultValue, Field, Result, SemanticType, Table2JsonError};
use log::{trace, warn};
use regex::Regex;

lazy_static::lazy_static! {
    static ref COLUMN_OPTION: Regex = Regex::new(concat!(
        r"(?i)UNSIGNED|ZEROFILL|(?:NOT )?NULL|DEFAULT (?:'[^']*'|[^ ]*)|AUTO_INCREMENT",
        r"|(?:UNIQUE|PRIMARY)(?: KEY)?|COMMENT '[^']*'|REFERENCES (?:.*)",
    ))
    .expect("column option pattern");
}

/// Options read off a definition line before type inference runs.
///
/// The default literal is kept as raw text here; it gets its final type
/// once the semantic type is known.
#[derive(Debug, Default)]
struct ScannedOptions {
    nullable: bool,
    default: Option<String>,
    column: ColumnOptions,
}

/// Parses one column declaration, e.g.
/// `` `amount` decimal(10,2) DEFAULT '0.00' COMMENT 'gross' ``.
///
/// Fails with `DdlParse` when the name/type/options structure cannot be
/// split and with `UnknownSqlType` when the declared type has no
/// classification rule.
pub fn parse_field(line: &str) -> Result<Field> {
    let (name, sql_type, raw_options) = split_declaration(line)?;
    let scanned = scan_options(raw_options);

    let (semantic_type, default, length, decimals) = if is_one_bit_tinyint(sql_type) {
        let default = scanned.default.map(|raw| match raw.as_str() {
            "0" => DefaultValue::Boolean(false),
            "1" => DefaultValue::Boolean(true),
            // neither 0 nor 1: passed through untouched
            _ => DefaultValue::Text(raw),
        });
        (SemanticType::Boolean, default, None, None)
    } else {
        let spec = split_type_spec(sql_type);
        let semantic_type = classify_sql_type(&spec.base, sql_type)?;
        let default = scanned
            .default
            .map(|raw| coerce_default(name, semantic_type, raw));
        (semantic_type, default, spec.length, spec.decimals)
    };

    let field = Field::new(
        name.to_string(),
        sql_type.to_string(),
        semantic_type,
        scanned.nullable,
        default,
        length,
        decimals,
        scanned.column,
    );
    trace!("parsed field: {}", field);
    Ok(field)
}

fn coerce_default(name: &str, semantic_type: SemanticType, raw: String) -> DefaultValue {
    let literal = raw.trim();
    match semantic_type {
        SemanticType::Integer => {
            if let Ok(value) = literal.parse::<i64>() {
                DefaultValue::Integer(value)
            } else if let Ok(value) = literal.parse::<u64>() {
                DefaultValue::Unsigned(value)
            } else {
                warn!("default '{}' of integer column '{}' is not an integer", raw, name);
                DefaultValue::Text(raw)
            }
        }
        // NaN would make re-parsed fields compare unequal
        SemanticType::Number => match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => DefaultValue::Float(value),
            _ => {
                warn!("default '{}' of numeric column '{}' is not a finite number", raw, name);
                DefaultValue::Text(raw)
            }
        },
        SemanticType::Boolean | SemanticType::String => DefaultValue::Text(raw),
    }
}

/// Splits a declaration into unquoted name, type token and option text.
///
/// The type token ends at the first blank outside parentheses and quotes,
/// so `enum('on hold','done')` stays in one piece.
fn split_declaration(line: &str) -> Result<(&str, &str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Table2JsonError::ddl(line, "empty column definition"));
    }

    let (name, rest) = if let Some(quoted) = line.strip_prefix('`') {
        let end = quoted
            .find('`')
            .ok_or_else(|| Table2JsonError::ddl(line, "unterminated quoted column name"))?;
        (&quoted[..end], &quoted[end + 1..])
    } else {
        match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name.trim_matches('"'), rest),
            None => return Err(Table2JsonError::ddl(line, "missing column type")),
        }
    };

    if name.is_empty() {
        return Err(Table2JsonError::ddl(line, "empty column name"));
    }

    let rest = rest.trim_start();
    if rest.is_empty() {
        return Err(Table2JsonError::ddl(line, "missing column type"));
    }

    let mut depth = 0usize;
    let mut in_quote = false;
    let mut type_end = rest.len();
    for (idx, ch) in rest.char_indices() {
        match ch {
            '\'' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Table2JsonError::ddl(line, "unbalanced ')' in column type"))?;
            }
            c if c.is_whitespace() && depth == 0 && !in_quote => {
                type_end = idx;
                break;
            }
            _ => {}
        }
    }
    if depth != 0 || in_quote {
        return Err(Table2JsonError::ddl(line, "unterminated column type"));
    }

    let (sql_type, options) = rest.split_at(type_end);
    Ok((name, sql_type, options.trim()))
}

fn scan_options(raw_options: &str) -> ScannedOptions {
    let mut scanned = ScannedOptions {
        nullable: true,
        ..Default::default()
    };

    for token in COLUMN_OPTION.find_iter(raw_options).map(|m| m.as_str()) {
        let (keyword, arg) = match token.split_once(' ') {
            Some((keyword, arg)) => (keyword.to_ascii_uppercase(), Some(arg)),
            None => (token.to_ascii_uppercase(), None),
        };

        match (keyword.as_str(), arg) {
            ("NOT", _) => scanned.nullable = false,
            ("NULL", _) => scanned.nullable = true,
            ("DEFAULT", Some(arg)) => {
                let value = unquote(arg);
                scanned.default = (value != "NULL").then(|| value.to_string());
            }
            ("COMMENT", Some(arg)) => scanned.column.comment = Some(unquote(arg).to_string()),
            ("REFERENCES", Some(arg)) => {
                scanned.column.references = Some(arg.trim().to_string())
            }
            ("UNSIGNED", _) => scanned.column.unsigned = true,
            ("ZEROFILL", _) => scanned.column.zerofill = true,
            ("AUTO_INCREMENT", _) => scanned.column.auto_increment = true,
            ("UNIQUE", _) => scanned.column.unique = true,
            ("PRIMARY", _) => scanned.column.primary_key = true,
            _ => {}
        }
    }

    scanned
}

/// Strips one leading and one trailing quote character.
fn unquote(value: &str) -> &str {
    let value = value
        .strip_prefix('\'')
        .or_else(|| value.strip_prefix('"'))
        .unwrap_or(value);
    value
        .strip_suffix('\'')
        .or_else(|| value.strip_suffix('"'))
        .unwrap_or(value)
}
