pub mod error;
pub mod field;
pub mod types;

pub use error::{Result, Table2JsonError};
pub use field::Field;
pub use types::{ColumnOptions, DefaultValue, SemanticType};
