use super::{quote_ident, row_fragments};
use crate::storage::Table;
use log::debug;

/// Default for `group_concat_max_len`; MySQL's own default (1024) truncates
/// aggregated arrays of any real size.
pub const DEFAULT_GROUP_CONCAT_MAX_LEN: u64 = 65000;

/// Top-level statement yielding one JSON object per `root` row.
///
/// `extra` holds nested fragments (`nested_object`, `nested_array`, or a
/// raw `singleton_join` to splice a related row's keys inline).
/// `predicate_sql` is appended verbatim after the table name, so it may
/// open with an alias: `p WHERE p.product_type_id = 22`.
pub fn build_query(
    root: &Table,
    extra: &[String],
    exclude: &[&str],
    predicate_sql: Option<&str>,
) -> String {
    let fields_sql = row_fragments(root.fields(), exclude, extra);
    let mut sql = format!(
        "SELECT CONCAT('{{',{},'}}') FROM {}",
        fields_sql,
        quote_ident(root.name())
    );
    if let Some(predicate) = predicate_sql.map(str::trim).filter(|p| !p.is_empty()) {
        sql.push(' ');
        sql.push_str(predicate);
    }
    debug!("built query for '{}' ({} bytes)", root.name(), sql.len());
    sql
}

/// Session statement to run before the query so that aggregated arrays
/// are not cut off at the server's default length.
pub fn session_preamble(group_concat_max_len: u64) -> String {
    format!("SET group_concat_max_len = {};", group_concat_max_len)
}
