use crate::error::{Error, Result};
use crate::gateway::traits::Gateway;
use crate::gateway::types::{
    CreateParams, DeleteParams, FetchParams, FetchResponse, FieldSelection, MutationResponse, Operator,
    RecordResult, Table, WhereCondition,
};
use crate::models::{AuditFields, ListingStatus, Property, PropertyType, RecordId};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info};

/// One call received by a [`MemoryGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Fetch(Table, FetchParams),
    Create(Table, CreateParams),
    Delete(Table, DeleteParams),
    GetById(Table, RecordId),
}

#[derive(Default)]
struct Store {
    tables: HashMap<&'static str, Vec<Value>>,
    next_id: RecordId,
    calls: Vec<GatewayCall>,
    failure: Option<String>,
    rejection: Option<String>,
}

/// In-process gateway holding every table in memory.
///
/// Evaluates `where` conditions and paging the way the hosted backend does,
/// and keeps a log of every call it served.
#[derive(Default)]
pub struct MemoryGateway {
    store: Mutex<Store>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose `property` table holds the sample listings
    pub fn with_sample_listings() -> Self {
        let gateway = Self::new();
        for property in sample_properties() {
            // Property serializes from plain data; this cannot fail.
            if let Ok(row) = serde_json::to_value(&property) {
                gateway.insert(Table::Property, row);
            }
        }
        info!("📋 Seeded {} sample listings", gateway.count(Table::Property));
        gateway
    }

    /// Store a row as-is, assigning an `Id` when it has none
    pub fn insert(&self, table: Table, mut row: Value) -> RecordId {
        let mut store = self.lock();
        let id = match row.get("Id").and_then(Value::as_i64) {
            Some(id) => id,
            None => store.next_id + 1,
        };
        store.next_id = store.next_id.max(id);
        if let Value::Object(map) = &mut row {
            map.insert("Id".into(), json!(id));
        }
        store.tables.entry(table.as_str()).or_default().push(row);
        id
    }

    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.lock().tables.get(table.as_str()).cloned().unwrap_or_default()
    }

    pub fn count(&self, table: Table) -> usize {
        self.lock().tables.get(table.as_str()).map_or(0, Vec::len)
    }

    /// Every call served so far, oldest first
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    /// Make every following call fail as a transport error
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    /// Answer every following call with a `success: false` envelope
    pub fn reject_with(&self, message: impl Into<String>) {
        self.lock().rejection = Some(message.into());
    }

    /// Undo [`fail_with`](Self::fail_with) and [`reject_with`](Self::reject_with)
    pub fn recover(&self) {
        let mut store = self.lock();
        store.failure = None;
        store.rejection = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, call: GatewayCall) -> Result<std::sync::MutexGuard<'_, Store>> {
        debug!("Memory gateway call: {:?}", call);
        let mut store = self.lock();
        store.calls.push(call);
        match &store.failure {
            Some(message) => Err(Error::Transport(message.clone())),
            None => Ok(store),
        }
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn fetch_records(&self, table: Table, params: &FetchParams) -> Result<FetchResponse> {
        let store = self.begin(GatewayCall::Fetch(table, params.clone()))?;
        if let Some(message) = &store.rejection {
            return Ok(FetchResponse { success: false, data: None, message: Some(message.clone()) });
        }
        let conditions = params.conditions.as_deref().unwrap_or_default();

        let matching = store
            .tables
            .get(table.as_str())
            .into_iter()
            .flatten()
            .filter(|row| conditions.iter().all(|c| condition_holds(c, row)));

        let data: Vec<Value> = match params.paging_info {
            Some(paging) => matching
                .skip(paging.offset as usize)
                .take(paging.limit as usize)
                .map(|row| select_fields(row, &params.fields))
                .collect(),
            None => matching.map(|row| select_fields(row, &params.fields)).collect(),
        };

        Ok(FetchResponse {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    async fn create_record(&self, table: Table, params: &CreateParams) -> Result<MutationResponse> {
        let mut store = self.begin(GatewayCall::Create(table, params.clone()))?;
        if let Some(message) = &store.rejection {
            return Ok(MutationResponse { success: false, results: Vec::new(), message: Some(message.clone()) });
        }

        let mut results = Vec::with_capacity(params.records.len());
        for record in &params.records {
            let Value::Object(fields) = record else {
                results.push(RecordResult {
                    success: false,
                    data: None,
                    message: Some("Record must be an object".into()),
                });
                continue;
            };
            store.next_id += 1;
            let mut row = fields.clone();
            row.insert("Id".into(), json!(store.next_id));
            let row = Value::Object(row);
            store.tables.entry(table.as_str()).or_default().push(row.clone());
            results.push(RecordResult {
                success: true,
                data: Some(row),
                message: None,
            });
        }

        Ok(MutationResponse {
            success: results.iter().all(|r| r.success),
            results,
            message: None,
        })
    }

    async fn delete_record(&self, table: Table, params: &DeleteParams) -> Result<MutationResponse> {
        let mut store = self.begin(GatewayCall::Delete(table, params.clone()))?;
        if let Some(message) = &store.rejection {
            return Ok(MutationResponse { success: false, results: Vec::new(), message: Some(message.clone()) });
        }
        let rows = store.tables.entry(table.as_str()).or_default();

        let results: Vec<RecordResult> = params
            .record_ids
            .iter()
            .map(|id| {
                let before = rows.len();
                rows.retain(|row| row.get("Id").and_then(Value::as_i64) != Some(*id));
                if rows.len() < before {
                    RecordResult { success: true, data: None, message: None }
                } else {
                    RecordResult {
                        success: false,
                        data: None,
                        message: Some(format!("Record {id} not found")),
                    }
                }
            })
            .collect();

        Ok(MutationResponse {
            success: results.iter().all(|r| r.success),
            results,
            message: None,
        })
    }

    async fn get_record_by_id(
        &self,
        table: Table,
        id: RecordId,
        params: &FieldSelection,
    ) -> Result<FetchResponse<Value>> {
        let store = self.begin(GatewayCall::GetById(table, id))?;
        if let Some(message) = &store.rejection {
            return Ok(FetchResponse { success: false, data: None, message: Some(message.clone()) });
        }
        let data = store
            .tables
            .get(table.as_str())
            .and_then(|rows| rows.iter().find(|row| row.get("Id").and_then(Value::as_i64) == Some(id)))
            .map(|row| select_fields(row, &params.fields));

        Ok(FetchResponse {
            success: true,
            data,
            message: None,
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

fn condition_holds(condition: &WhereCondition, row: &Value) -> bool {
    let Some(actual) = row.get(&condition.field_name) else {
        return false;
    };
    condition.values.iter().any(|expected| match condition.operator {
        Operator::ExactMatch => compare(actual, expected) == Some(Ordering::Equal),
        Operator::GreaterThanOrEqualTo => {
            matches!(compare(actual, expected), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LessThanOrEqualTo => {
            matches!(compare(actual, expected), Some(Ordering::Less | Ordering::Equal))
        }
    })
}

/// Numbers compare numerically, strings lexically, anything else only for equality
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ if a == b => Some(Ordering::Equal),
        _ => None,
    }
}

fn select_fields(row: &Value, fields: &[String]) -> Value {
    let Value::Object(map) = row else {
        return row.clone();
    };
    if fields.is_empty() {
        return row.clone();
    }
    let mut out = Map::new();
    if let Some(id) = map.get("Id") {
        out.insert("Id".into(), id.clone());
    }
    for field in fields {
        if let Some(value) = map.get(field) {
            out.insert(field.clone(), value.clone());
        }
    }
    Value::Object(out)
}

/// The six featured listings shown before a backend is connected
pub fn sample_properties() -> Vec<Property> {
    let listing = |id: RecordId,
                   title: &str,
                   price: i64,
                   bedrooms: u32,
                   bathrooms: f32,
                   area: i32,
                   address: &str,
                   property_type: PropertyType,
                   status: ListingStatus,
                   image: &str| Property {
        id,
        title: title.to_string(),
        price,
        bedrooms,
        bathrooms,
        area,
        address: address.to_string(),
        property_type,
        status,
        image: format!("https://images.unsplash.com/{image}?auto=format&fit=crop&w=1000&q=80"),
        description: String::new(),
        audit: AuditFields {
            name: Some(title.to_string()),
            ..AuditFields::default()
        },
    };

    vec![
        listing(
            1,
            "Modern Downtown Apartment",
            320_000,
            2,
            2.0,
            1200,
            "123 Urban St, Downtown, City",
            PropertyType::Apartment,
            ListingStatus::ForSale,
            "photo-1545324418-cc1a3fa10c00",
        ),
        listing(
            2,
            "Suburban Family Home",
            450_000,
            4,
            3.0,
            2400,
            "456 Family Dr, Suburbia, County",
            PropertyType::House,
            ListingStatus::ForSale,
            "photo-1568605114967-8130f3a36994",
        ),
        listing(
            3,
            "Luxury Beachfront Condo",
            780_000,
            3,
            2.0,
            1800,
            "789 Shore Blvd, Beachside, State",
            PropertyType::Condo,
            ListingStatus::ForSale,
            "photo-1512917774080-9991f1c4c750",
        ),
        listing(
            4,
            "City Center Studio",
            1500,
            0,
            1.0,
            600,
            "101 Center Ave, Downtown, City",
            PropertyType::Apartment,
            ListingStatus::ForRent,
            "photo-1522708323590-d24dbb6b0267",
        ),
        listing(
            5,
            "Countryside Cottage",
            320_000,
            2,
            1.0,
            1100,
            "202 Rural Route, Countryside, Region",
            PropertyType::House,
            ListingStatus::ForSale,
            "photo-1575517111839-3a3843ee7f5d",
        ),
        listing(
            6,
            "Spacious Townhouse",
            2200,
            3,
            2.5,
            1600,
            "303 Town Lane, Neighborhood, City",
            PropertyType::Townhouse,
            ListingStatus::ForRent,
            "photo-1571055107559-3e67626fa8be",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::types::PagingInfo;

    fn fetch(conditions: Vec<WhereCondition>, paging: Option<PagingInfo>) -> FetchParams {
        FetchParams {
            fields: Table::Property.fields(),
            conditions: Some(conditions),
            paging_info: paging,
        }
    }

    fn ids(response: FetchResponse) -> Vec<i64> {
        response
            .data
            .unwrap_or_default()
            .iter()
            .filter_map(|row| row.get("Id").and_then(Value::as_i64))
            .collect()
    }

    #[tokio::test]
    async fn evaluates_where_conditions() {
        let gateway = MemoryGateway::with_sample_listings();

        let response = gateway
            .fetch_records(
                Table::Property,
                &fetch(
                    vec![
                        WhereCondition::new("price", Operator::GreaterThanOrEqualTo, 1500),
                        WhereCondition::new("price", Operator::LessThanOrEqualTo, 450000),
                        WhereCondition::new("status", Operator::ExactMatch, "for sale"),
                    ],
                    None,
                ),
            )
            .await
            .unwrap();

        assert_eq!(ids(response), vec![1, 2, 5]);
    }

    #[tokio::test]
    async fn applies_paging_after_filtering() {
        let gateway = MemoryGateway::with_sample_listings();

        let response = gateway
            .fetch_records(Table::Property, &fetch(vec![], Some(PagingInfo { limit: 2, offset: 3 })))
            .await
            .unwrap();

        assert_eq!(ids(response), vec![4, 5]);
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_delete_removes() {
        let gateway = MemoryGateway::with_sample_listings();

        let created = gateway
            .create_record(
                Table::UserFavorite,
                &CreateParams { records: vec![json!({"user_email": "a@b.co", "property_id": 2})] },
            )
            .await
            .unwrap();
        let row = created.first_success().unwrap().unwrap();
        assert_eq!(row["Id"], json!(7));
        assert_eq!(gateway.count(Table::UserFavorite), 1);

        let deleted = gateway
            .delete_record(Table::UserFavorite, &DeleteParams { record_ids: vec![7] })
            .await
            .unwrap();
        assert!(deleted.success);
        assert_eq!(gateway.count(Table::UserFavorite), 0);

        let missing = gateway
            .delete_record(Table::UserFavorite, &DeleteParams { record_ids: vec![7] })
            .await
            .unwrap();
        assert!(!missing.success);
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_missing_rows() {
        let gateway = MemoryGateway::with_sample_listings();
        let fields = FieldSelection { fields: vec!["title".into()] };

        let found = gateway.get_record_by_id(Table::Property, 3, &fields).await.unwrap();
        assert_eq!(found.data, Some(json!({"Id": 3, "title": "Luxury Beachfront Condo"})));

        let missing = gateway.get_record_by_id(Table::Property, 99, &fields).await.unwrap();
        assert_eq!(missing.data, None);
    }

    #[tokio::test]
    async fn injected_failure_is_transport_error_and_still_logged() {
        let gateway = MemoryGateway::new();
        gateway.fail_with("connection reset");

        let err = gateway
            .fetch_records(Table::Subscription, &FetchParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(ref m) if m == "connection reset"));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn injected_rejection_answers_with_unsuccessful_envelope() {
        let gateway = MemoryGateway::with_sample_listings();
        gateway.reject_with("Table is locked");

        let fetched = gateway.fetch_records(Table::Property, &FetchParams::default()).await.unwrap();
        assert!(!fetched.success);
        assert_eq!(fetched.data, None);
        assert_eq!(fetched.message.as_deref(), Some("Table is locked"));

        let created = gateway
            .create_record(Table::Subscription, &CreateParams { records: vec![json!({"email": "a@b.co"})] })
            .await
            .unwrap();
        assert!(!created.success);
        assert_eq!(gateway.count(Table::Subscription), 0);

        gateway.recover();
        let fetched = gateway.fetch_records(Table::Property, &FetchParams::default()).await.unwrap();
        assert_eq!(ids(fetched).len(), 6);
    }
}
