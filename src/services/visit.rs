use crate::error::{Error, Result};
use crate::gateway::{CreateParams, Gateway, Table};
use crate::models::{ScheduledVisit, VisitRequest};
use crate::services::created_record;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Visit scheduling; create-only
#[derive(Clone)]
pub struct VisitService {
    gateway: Arc<dyn Gateway>,
}

impl VisitService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn schedule_visit(&self, request: &VisitRequest) -> Result<ScheduledVisit> {
        let property_id = request
            .property_id
            .filter(|id| *id > 0)
            .filter(|_| [&request.date, &request.time, &request.email].iter().all(|s| !s.trim().is_empty()))
            .ok_or_else(|| Error::Validation("Missing required visit information".into()))?;

        let params = CreateParams {
            records: vec![json!({
                "Name": format!("Visit on {} at {}", request.date, request.time),
                "property_id": property_id,
                "date": request.date,
                "time": request.time,
                "email": request.email,
                "phone": request.phone.as_deref().unwrap_or(""),
            })],
        };

        let response = self.gateway.create_record(Table::PropertyVisit, &params).await?;
        let visit: ScheduledVisit = created_record(response, "Failed to schedule visit")?;
        info!("Scheduled visit {} for property {}", visit.id, visit.property_id);
        Ok(visit)
    }
}
