use crate::error::Result;
use crate::query::{FilterState, SortState};
use crate::row::{FieldMap, Row, RowId};

/// The remote data boundary: pure pass-through I/O against one service.
///
/// Implementations perform no local validation and no retries; the remote
/// service is the sole authority on acceptance. Sorting and filtering are
/// translated into the request, never applied on top of the response.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Fetch a collection, with sort/filter state rendered into the query.
    async fn list(
        &self,
        resource: &str,
        sort: &SortState,
        filter: &FilterState,
    ) -> Result<Vec<Row>>;

    /// Create an entity; the server assigns identity.
    async fn create(&self, resource: &str, fields: &FieldMap) -> Result<Row>;

    /// Patch the entity's listed fields. The returned row is the server
    /// echo; when the server replies with no body it holds just the
    /// patched fields, and callers merge it over their prior copy.
    async fn update(&self, resource: &str, id: &RowId, fields: &FieldMap) -> Result<Row>;

    /// Delete an entity. Safe to repeat from the caller's perspective.
    async fn delete(&self, resource: &str, id: &RowId) -> Result<()>;
}
