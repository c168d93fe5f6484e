pub mod column;
pub mod dataset;
pub mod error;
pub mod gateway;
pub mod query;
pub mod row;

pub use column::{Choice, ColumnSpec, InputKind};
pub use dataset::{DatasetSpec, LookupSpec};
pub use error::{GatewayError, Result};
pub use gateway::Gateway;
pub use query::{FilterState, SortKey, SortState};
pub use row::{FieldMap, Row, RowId, RowSet};
