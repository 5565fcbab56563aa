pub mod favorite;
pub mod property;
pub mod subscription;
pub mod visit;

pub use favorite::FavoriteService;
pub use property::PropertyService;
pub use subscription::SubscriptionService;
pub use visit::VisitService;

use crate::error::{Error, Result};
use crate::gateway::MutationResponse;
use serde::de::DeserializeOwned;

/// Decode the record created by a single-record `createRecord` call
pub(crate) fn created_record<T: DeserializeOwned>(response: MutationResponse, fallback: &str) -> Result<T> {
    match response.first_success() {
        Ok(Some(data)) => Ok(serde_json::from_value(data)?),
        Ok(None) => Err(Error::Rejected(format!("{fallback}: gateway returned no record"))),
        Err(message) => Err(Error::Rejected(message.unwrap_or_else(|| fallback.to_string()))),
    }
}

pub(crate) fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(message.to_string()));
    }
    Ok(())
}
