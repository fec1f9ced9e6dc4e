use super::parse_field;
use crate::core::{Result, Table2JsonError};
use crate::storage::{Table, TableBuilder};
use log::debug;

/// Builds a table from "show create table" output, reading the table name
/// from the `CREATE TABLE` header.
pub fn parse_create_table(definition: &str) -> Result<Table> {
    let name = definition
        .lines()
        .find_map(header_table_name)
        .ok_or_else(|| {
            Table2JsonError::ddl(
                definition.lines().next().unwrap_or_default(),
                "missing CREATE TABLE header",
            )
        })?;
    parse_table(name, definition)
}

/// Builds table `name` from its definition text.
///
/// Only lines whose first non-blank character is a backquote declare
/// columns; keys, constraints and table options are skipped. The first
/// bad column aborts the whole table.
pub fn parse_table(name: impl Into<String>, definition: &str) -> Result<Table> {
    let mut builder = TableBuilder::new(name);

    for line in column_lines(definition) {
        builder.append(parse_field(line)?);
    }

    let table = builder.build();
    debug!("parsed table '{}' with {} fields", table.name(), table.field_count());
    Ok(table)
}

/// Column declaration lines, trimmed and without their trailing comma.
pub fn column_lines(definition: &str) -> impl Iterator<Item = &str> {
    definition
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('`'))
        .map(|line| line.strip_suffix(',').unwrap_or(line))
}

fn header_table_name(line: &str) -> Option<&str> {
    let line = line.trim();
    let upper = line.to_ascii_uppercase();
    let rest = line[upper.find("CREATE TABLE")? + "CREATE TABLE".len()..].trim_start();
    let rest = match rest.get(..13) {
        Some(prefix) if prefix.eq_ignore_ascii_case("IF NOT EXISTS") => rest[13..].trim_start(),
        _ => rest,
    };

    let name = match rest.strip_prefix('`') {
        Some(quoted) => &quoted[..quoted.find('`')?],
        None => rest
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default(),
    };
    (!name.is_empty()).then_some(name)
}
