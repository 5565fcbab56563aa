use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Record identifier assigned by the gateway
pub type RecordId = i64;

/// Kind of dwelling a listing describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
    Townhouse,
    /// Anything the gateway stores outside the four known kinds
    #[serde(other)]
    Unknown,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Condo,
        PropertyType::Townhouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Condo => "condo",
            Self::Townhouse => "townhouse",
            Self::Unknown => "unknown",
        }
    }

    /// Exact, case-sensitive lookup of a known kind
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ListingStatus {
    #[serde(rename = "for sale")]
    ForSale,
    #[serde(rename = "for rent")]
    ForRent,
    #[serde(other)]
    Unknown,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 2] = [ListingStatus::ForSale, ListingStatus::ForRent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForSale => "for sale",
            Self::ForRent => "for rent",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core property data model, as stored in the `property` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub title: String,
    pub price: i64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub area: i32,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl Property {
    /// Price as shown on a listing card: `$320,000` or `$1,500/month`
    pub fn display_price(&self) -> String {
        let amount = format!("${}", group_thousands(self.price));
        match self.status {
            ListingStatus::ForRent => format!("{amount}/month"),
            _ => amount,
        }
    }

    /// Label used when the listing is bookmarked
    pub fn label(&self) -> &str {
        &self.title
    }
}

/// Bookkeeping columns every gateway table carries
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditFields {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Tags", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(rename = "Owner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<serde_json::Value>,
    #[serde(rename = "CreatedOn", default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(rename = "CreatedBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<serde_json::Value>,
    #[serde(rename = "ModifiedOn", default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
    #[serde(rename = "ModifiedBy", default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<serde_json::Value>,
}

/// A user-to-property bookmark from the `user_favorite` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub user_email: String,
    pub property_id: RecordId,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A request to view a property in person
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisitRequest {
    pub property_id: Option<RecordId>,
    pub date: String,
    pub time: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Row created in `property_visit` for a scheduled visit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledVisit {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub property_id: RecordId,
    pub date: String,
    pub time: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
}

/// Newsletter subscription from the `subscription` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

/// User object handed over by the authentication widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "email")]
    pub email_address: String,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email_address: email.into(),
            user_id: None,
            first_name: None,
            last_name: None,
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email_address.clone(),
        }
    }
}

/// Text columns come back as `null` when left empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
