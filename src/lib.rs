//! NestQuest: browse, filter, favorite and schedule visits for property
//! listings stored in a hosted Apper backend.

pub mod app;
pub mod config;
pub mod error;
pub mod filters;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use filters::{FilterField, FilterForm, FilterSpec};
pub use models::{Favorite, ListingStatus, Property, PropertyType, UserProfile, VisitRequest};
