use crate::error::{Error, Result};
use crate::models::{ListingStatus, Property, PropertyType};
use serde::{Deserialize, Serialize};

/// Constraints narrowing the listing grid. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Lowest acceptable price, inclusive
    pub price_min: Option<i64>,
    /// Highest acceptable price, inclusive
    pub price_max: Option<i64>,
    /// Minimum number of bedrooms
    pub bedrooms: Option<u32>,
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Does a single property satisfy every set constraint?
    pub fn matches(&self, property: &Property) -> bool {
        self.price_min.map_or(true, |min| property.price >= min)
            && self.price_max.map_or(true, |max| property.price <= max)
            && self.bedrooms.map_or(true, |min| property.bedrooms >= min)
            && self.property_type.map_or(true, |t| property.property_type == t)
            && self.status.map_or(true, |s| property.status == s)
    }

    /// Keep the properties matching all constraints, in their original order
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        properties.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Filter fields exactly as typed into the filter panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterForm {
    pub price_min: String,
    pub price_max: String,
    pub bedrooms: String,
    pub property_type: String,
    pub status: String,
}

/// One input of the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    PriceMin,
    PriceMax,
    Bedrooms,
    PropertyType,
    Status,
}

impl FilterForm {
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::PriceMin => &mut self.price_min,
            FilterField::PriceMax => &mut self.price_max,
            FilterField::Bedrooms => &mut self.bedrooms,
            FilterField::PropertyType => &mut self.property_type,
            FilterField::Status => &mut self.status,
        };
        *slot = value.into();
    }

    /// Parse the text inputs.
    ///
    /// Numbers that are empty or not integers count as unset. Type and
    /// status must be spelled exactly as one of their known values.
    pub fn to_spec(&self) -> Result<FilterSpec> {
        Ok(FilterSpec {
            price_min: parse_number(&self.price_min),
            price_max: parse_number(&self.price_max),
            bedrooms: parse_number(&self.bedrooms),
            property_type: parse_choice(&self.property_type, "property type", PropertyType::parse)?,
            status: parse_choice(&self.status, "status", ListingStatus::parse)?,
        })
    }
}

/// Filter a property list by a text form in one step
pub fn filter_properties(properties: &[Property], form: &FilterForm) -> Result<Vec<Property>> {
    Ok(form.to_spec()?.apply(properties))
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Option<T> {
    text.trim().parse().ok()
}

fn parse_choice<T>(text: &str, what: &str, parse: fn(&str) -> Option<T>) -> Result<Option<T>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse(text)
        .map(Some)
        .ok_or_else(|| Error::Validation(format!("Unknown {what} \"{text}\"")))
}
