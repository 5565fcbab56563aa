pub mod apper;
pub mod memory;
pub mod traits;
pub mod types;

pub use apper::ApperClient;
pub use memory::MemoryGateway;
pub use traits::Gateway;
pub use types::{
    CreateParams, DeleteParams, FetchParams, FetchResponse, FieldSelection, MutationResponse, Operator,
    PagingInfo, RecordResult, Table, WhereCondition,
};
