use super::{quote_ident, row_fragments};
use crate::core::{Field, Result, Table2JsonError};
use crate::storage::Table;
use log::warn;

fn join_field<'a>(child: &'a Table, join_field_name: &str) -> Result<&'a Field> {
    child.field_by_name(join_field_name).ok_or_else(|| {
        Table2JsonError::Configuration(format!(
            "join field '{}' not found in table '{}'",
            join_field_name,
            child.name()
        ))
    })
}

fn with_join_field<'a>(exclude: &[&'a str], join: &'a str) -> Vec<&'a str> {
    let mut exclude = exclude.to_vec();
    if !exclude.contains(&join) {
        exclude.push(join);
    }
    exclude
}

/// Correlated subquery yielding the row fragment (no braces) of the one
/// `child` row whose `join_field_name` equals `outer_key_sql`.
///
/// The join field is always left out of the object. More than one
/// matching row is a runtime error in the database.
pub fn singleton_join(
    child: &Table,
    join_field_name: &str,
    outer_key_sql: &str,
    exclude: &[&str],
) -> Result<String> {
    let join = join_field(child, join_field_name)?.name();
    let fields_sql = row_fragments(child.fields(), &with_join_field(exclude, join), &[]);
    Ok(format!(
        "(SELECT {} FROM {} WHERE {} = {})",
        fields_sql,
        quote_ident(child.name()),
        quote_ident(join),
        outer_key_sql
    ))
}

/// Correlated subquery aggregating every matching `child` row as a
/// brace-wrapped object, comma-joined (array contents without brackets).
/// Yields NULL when nothing matches.
///
/// Names in `order` that exist on `child` order the aggregation, in the
/// table's declaration order; unknown names are ignored.
pub fn collection_join(
    child: &Table,
    join_field_name: &str,
    outer_key_sql: &str,
    order: &[&str],
    exclude: &[&str],
) -> Result<String> {
    let join = join_field(child, join_field_name)?.name();
    let fields_sql = row_fragments(child.fields(), &with_join_field(exclude, join), &[]);

    for name in order.iter().filter(|name| !child.has_field(name)) {
        warn!("ignoring unknown order field '{}' for table '{}'", name, child.name());
    }
    let ordered: Vec<String> = child
        .fields()
        .iter()
        .map(|field| field.name())
        .filter(|name| order.contains(name))
        .map(quote_ident)
        .collect();
    let order_sql = if ordered.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", ordered.join(","))
    };

    Ok(format!(
        "(SELECT GROUP_CONCAT(CONCAT('{{',{},'}}'){} SEPARATOR ',') FROM {} WHERE {} = {})",
        fields_sql,
        order_sql,
        quote_ident(child.name()),
        quote_ident(join),
        outer_key_sql
    ))
}

/// Wraps a singleton subquery as `"key":{...}`; empty when no row matched.
pub fn nested_object(key: &str, singleton_sql: &str) -> String {
    format!("IFNULL(CONCAT('\"{key}\":{{',{singleton_sql},'}}'),'')")
}

/// Wraps a collection subquery as `"key":[...]`; `[]` when no row matched.
pub fn nested_array(key: &str, collection_sql: &str) -> String {
    format!("CONCAT('\"{key}\":[',IFNULL({collection_sql},''),']')")
}
