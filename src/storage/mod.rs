pub mod catalog;
pub mod loader;
pub mod table;

pub use catalog::Catalog;
pub use loader::{load_catalog, schema_files};
pub use table::{Table, TableBuilder};
