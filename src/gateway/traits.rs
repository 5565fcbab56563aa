use crate::error::Result;
use crate::gateway::types::{
    CreateParams, DeleteParams, FetchParams, FetchResponse, FieldSelection, MutationResponse, Table,
};
use crate::models::RecordId;
use async_trait::async_trait;
use serde_json::Value;

/// Record operations of the hosted backend.
/// Implemented by the HTTP client and by the in-memory store used offline.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Query rows of a table
    async fn fetch_records(&self, table: Table, params: &FetchParams) -> Result<FetchResponse>;

    /// Insert rows; one result per record
    async fn create_record(&self, table: Table, params: &CreateParams) -> Result<MutationResponse>;

    /// Delete rows by id; one result per id
    async fn delete_record(&self, table: Table, params: &DeleteParams) -> Result<MutationResponse>;

    /// Load a single row
    async fn get_record_by_id(
        &self,
        table: Table,
        id: RecordId,
        params: &FieldSelection,
    ) -> Result<FetchResponse<Value>>;

    /// Name of the backend, for logs
    fn backend_name(&self) -> &'static str;
}
