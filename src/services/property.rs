use crate::error::{Error, Result};
use crate::filters::FilterSpec;
use crate::gateway::{FetchParams, FieldSelection, Gateway, Operator, PagingInfo, Table, WhereCondition};
use crate::models::{Property, RecordId};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_LIMIT: u32 = 20;

/// Reads listings from the `property` table
#[derive(Clone)]
pub struct PropertyService {
    gateway: Arc<dyn Gateway>,
}

impl PropertyService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Fetch one page of listings, optionally narrowed on the server.
    pub async fn fetch_properties(
        &self,
        filter: Option<&FilterSpec>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Property>> {
        let conditions = filter.map(where_conditions).unwrap_or_default();
        let params = FetchParams {
            fields: Table::Property.fields(),
            conditions: (!conditions.is_empty()).then_some(conditions),
            paging_info: Some(PagingInfo { limit, offset }),
        };

        let response = self.gateway.fetch_records(Table::Property, &params).await?;
        if !response.success {
            return Err(Error::Rejected(
                response.message.unwrap_or_else(|| "Failed to fetch properties".into()),
            ));
        }

        let properties = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Property>, _>>()?;

        debug!("Fetched {} properties from {}", properties.len(), self.gateway.backend_name());
        Ok(properties)
    }

    /// Load a single listing; `None` if the gateway has no such record
    pub async fn get_property(&self, id: RecordId) -> Result<Option<Property>> {
        let params = FieldSelection { fields: Table::Property.fields() };
        let response = self.gateway.get_record_by_id(Table::Property, id, &params).await?;
        if !response.success {
            return Err(Error::Rejected(
                response.message.unwrap_or_else(|| format!("Failed to fetch property {id}")),
            ));
        }

        match response.data {
            Some(serde_json::Value::Null) | None => Ok(None),
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
        }
    }
}

/// Translate set filter fields into the gateway's comparison vocabulary
pub fn where_conditions(filter: &FilterSpec) -> Vec<WhereCondition> {
    let mut conditions = Vec::new();

    if let Some(min) = filter.price_min {
        conditions.push(WhereCondition::new("price", Operator::GreaterThanOrEqualTo, min));
    }
    if let Some(max) = filter.price_max {
        conditions.push(WhereCondition::new("price", Operator::LessThanOrEqualTo, max));
    }
    if let Some(bedrooms) = filter.bedrooms {
        conditions.push(WhereCondition::new("bedrooms", Operator::GreaterThanOrEqualTo, bedrooms));
    }
    if let Some(property_type) = filter.property_type {
        conditions.push(WhereCondition::new("type", Operator::ExactMatch, property_type.as_str()));
    }
    if let Some(status) = filter.status {
        conditions.push(WhereCondition::new("status", Operator::ExactMatch, status.as_str()));
    }

    conditions
}
