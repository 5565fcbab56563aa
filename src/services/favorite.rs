use crate::error::{Error, Result};
use crate::gateway::{CreateParams, DeleteParams, FetchParams, Gateway, Operator, Table, WhereCondition};
use crate::models::{Favorite, RecordId};
use crate::services::{created_record, require};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Bookmarks linking a user email to a listing
#[derive(Clone)]
pub struct FavoriteService {
    gateway: Arc<dyn Gateway>,
}

impl FavoriteService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// All favorites of a user. An empty email has none and skips the gateway.
    pub async fn fetch_user_favorites(&self, email: &str) -> Result<Vec<Favorite>> {
        if email.trim().is_empty() {
            return Ok(Vec::new());
        }

        let params = FetchParams {
            fields: Table::UserFavorite.fields(),
            conditions: Some(vec![WhereCondition::new("user_email", Operator::ExactMatch, email)]),
            paging_info: None,
        };

        let response = self.gateway.fetch_records(Table::UserFavorite, &params).await?;
        if !response.success {
            return Err(Error::Rejected(
                response.message.unwrap_or_else(|| "Failed to fetch favorites".into()),
            ));
        }

        let favorites = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Favorite>, _>>()?;
        debug!("{} has {} favorites", email, favorites.len());
        Ok(favorites)
    }

    /// Bookmark a listing; `label` names the favorite record
    pub async fn add_favorite(&self, email: &str, property_id: RecordId, label: &str) -> Result<Favorite> {
        require(email, "Email and property ID are required")?;
        if property_id <= 0 {
            return Err(Error::Validation("Email and property ID are required".into()));
        }

        let params = CreateParams {
            records: vec![json!({
                "Name": format!("Favorite: {label}"),
                "user_email": email,
                "property_id": property_id,
            })],
        };

        let response = self.gateway.create_record(Table::UserFavorite, &params).await?;
        created_record(response, "Failed to add favorite")
    }

    pub async fn remove_favorite(&self, favorite_id: RecordId) -> Result<()> {
        if favorite_id <= 0 {
            return Err(Error::Validation("Favorite ID is required".into()));
        }

        let params = DeleteParams { record_ids: vec![favorite_id] };
        let response = self.gateway.delete_record(Table::UserFavorite, &params).await?;
        if response.success {
            Ok(())
        } else {
            Err(Error::Rejected(
                response
                    .results
                    .into_iter()
                    .find_map(|r| r.message)
                    .or(response.message)
                    .unwrap_or_else(|| "Failed to remove favorite".into()),
            ))
        }
    }
}
