//! Column-definition parsing: definition lines to typed `Field`s, and
//! "show create table" output to a `Table`.

mod create_table;
mod parser;
mod type_rules;

pub use create_table::{column_lines, parse_create_table, parse_table};
pub use parser::parse_field;
pub use type_rules::{TypeSpec, classify_sql_type, is_one_bit_tinyint, split_type_spec};
