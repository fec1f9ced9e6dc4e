//! Compiles table schemas into SQL that makes the database itself emit
//! JSON text. Everything here only builds strings.

mod fragment;
mod nested;
mod query;

pub use fragment::{field_fragment, quote_ident, row_fragments};
pub use nested::{collection_join, nested_array, nested_object, singleton_join};
pub use query::{DEFAULT_GROUP_CONCAT_MAX_LEN, build_query, session_preamble};
