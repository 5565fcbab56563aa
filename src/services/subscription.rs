use crate::error::Result;
use crate::gateway::{CreateParams, Gateway, Table};
use crate::models::Subscription;
use crate::services::{created_record, require};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Newsletter sign-ups; create-only
#[derive(Clone)]
pub struct SubscriptionService {
    gateway: Arc<dyn Gateway>,
}

impl SubscriptionService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn subscribe(&self, email: &str) -> Result<Subscription> {
        require(email, "Email is required")?;

        let params = CreateParams {
            records: vec![json!({
                "Name": format!("Subscription for {email}"),
                "email": email,
                "subscribed_at": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            })],
        };

        let response = self.gateway.create_record(Table::Subscription, &params).await?;
        let subscription: Subscription = created_record(response, "Failed to subscribe")?;
        info!("Subscribed {} to property alerts", subscription.email);
        Ok(subscription)
    }
}
