// ============================================================================
// table2json Library
// ============================================================================

//! Turns a table's column definitions ("show create table" output) into a
//! SQL statement that makes the source database return one JSON document
//! per row, with related tables nested as objects or arrays.
//!
//! The crate never talks to a database: it parses definition text and
//! emits SQL text.
//!
//! # Examples
//!
//! ```
//! use table2json::{Catalog, JoinSpec, JoinTree, parse_table};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let orders = parse_table("orders", "`id` int(11) NOT NULL\n`total` decimal(10,2)")?;
//! let items = parse_table("items", "`order_id` int(11) NOT NULL\n`sku` varchar(32)")?;
//! let catalog = Catalog::new().with_table(orders)?.with_table(items)?;
//!
//! let query = JoinTree::new("orders")
//!     .alias("o")
//!     .join(JoinSpec::array("items", "items", "order_id", "o.id"))
//!     .compile(&catalog)?;
//! assert!(query.statement.starts_with("SELECT CONCAT('{'"));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod ddl;
pub mod json_sql;
pub mod plan;
pub mod storage;

pub use crate::core::{ColumnOptions, DefaultValue, Field, Result, SemanticType, Table2JsonError};
pub use crate::ddl::{parse_create_table, parse_field, parse_table};
pub use crate::plan::{CompiledQuery, JoinKind, JoinSpec, JoinTree};
pub use crate::storage::{Catalog, Table, TableBuilder, load_catalog};
