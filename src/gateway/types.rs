use crate::models::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Tables the application reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Property,
    UserFavorite,
    Subscription,
    PropertyVisit,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::UserFavorite => "user_favorite",
            Self::Subscription => "subscription",
            Self::PropertyVisit => "property_visit",
        }
    }

    /// Every column of the table, audit columns first
    pub fn fields(&self) -> Vec<String> {
        let own: &[&str] = match self {
            Self::Property => &[
                "title", "price", "bedrooms", "bathrooms", "area", "address", "type", "status", "image",
                "description",
            ],
            Self::UserFavorite => &["user_email", "property_id"],
            Self::Subscription => &["email", "subscribed_at"],
            Self::PropertyVisit => &["property_id", "date", "time", "email", "phone"],
        };
        AUDIT_FIELDS.iter().chain(own).map(|f| f.to_string()).collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const AUDIT_FIELDS: [&str; 7] = ["Name", "Tags", "Owner", "CreatedOn", "CreatedBy", "ModifiedOn", "ModifiedBy"];

/// Comparison vocabulary understood by `where` conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    ExactMatch,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereCondition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

impl WhereCondition {
    pub fn new(field_name: &str, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field_name: field_name.to_string(),
            operator,
            values: vec![value.into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

/// Parameters of `fetchRecords`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub fields: Vec<String>,
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<WhereCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

/// Parameters of `getRecordById`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub fields: Vec<String>,
}

/// Parameters of `createRecord`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateParams {
    pub records: Vec<Value>,
}

/// Parameters of `deleteRecord`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<RecordId>,
}

/// Envelope returned by `fetchRecords` and `getRecordById`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse<T = Vec<Value>> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope returned by `createRecord` and `deleteRecord`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<RecordResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    /// Payload of the first result, if the whole call and that result succeeded.
    /// Otherwise the gateway's message, when it gave one.
    pub fn first_success(self) -> Result<Option<Value>, Option<String>> {
        let message = self.message;
        let mut results = self.results.into_iter();
        match results.next() {
            Some(first) if self.success && first.success => Ok(first.data),
            Some(first) => Err(first.message.or(message)),
            None => Err(message),
        }
    }
}

fn default_success() -> bool {
    true
}
