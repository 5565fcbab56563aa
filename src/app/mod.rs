//! Controllers holding the state of each screen element.
//!
//! Every controller owns a clone of [`AppContext`], runs at most one gateway
//! call at a time (methods take `&mut self`), reports outcomes through the
//! notifier and never lets an error escape: failures are logged, shown as a
//! toast, and the controller returns to its previous state.

pub mod listing;
pub mod search;
pub mod subscribe;
pub mod validate;
pub mod visit;

pub use listing::ListingBoard;
pub use search::SearchBar;
pub use subscribe::SubscribeForm;
pub use visit::{VisitForm, VisitScheduler};

use crate::config::Config;
use crate::error::Result;
use crate::gateway::{ApperClient, Gateway, MemoryGateway};
use crate::notify::{Notifier, Toasts};
use crate::services::{FavoriteService, PropertyService, SubscriptionService, VisitService};
use crate::session::Session;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a controller may touch, passed explicitly
#[derive(Clone)]
pub struct AppContext {
    pub properties: PropertyService,
    pub favorites: FavoriteService,
    pub subscriptions: SubscriptionService,
    pub visits: VisitService,
    pub session: Session,
    pub notifier: Notifier,
    pub page_size: u32,
}

impl AppContext {
    pub fn new(gateway: Arc<dyn Gateway>, page_size: u32) -> (Self, Toasts) {
        let (notifier, toasts) = Notifier::channel();
        let ctx = Self {
            properties: PropertyService::new(gateway.clone()),
            favorites: FavoriteService::new(gateway.clone()),
            subscriptions: SubscriptionService::new(gateway.clone()),
            visits: VisitService::new(gateway),
            session: Session::new(),
            notifier,
            page_size,
        };
        (ctx, toasts)
    }

    /// Connect to the configured project, or to the sample listings when offline
    pub fn from_config(config: &Config) -> Result<(Self, Toasts)> {
        let gateway: Arc<dyn Gateway> = match &config.credentials {
            Some(credentials) => {
                info!("Connecting to Apper project {}", credentials.project_id);
                Arc::new(ApperClient::new(config, credentials.clone())?)
            }
            None => {
                warn!("No Apper credentials configured, using sample listings");
                Arc::new(MemoryGateway::with_sample_listings())
            }
        };
        Ok(Self::new(gateway, config.page_size))
    }
}
