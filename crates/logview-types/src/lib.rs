pub mod error;
pub mod table;
pub mod value;
pub mod view;

pub use error::{Error, Result};
pub use table::Table;
pub use value::{Record, Row, Scalar};
pub use view::{ColumnConfig, ComputedColumn, RowConfig, SortConfig, SortDirection, ViewConfig};
