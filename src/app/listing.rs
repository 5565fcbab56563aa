use crate::app::AppContext;
use crate::error::Error;
use crate::filters::{FilterField, FilterForm, FilterSpec};
use crate::models::{Favorite, Property, RecordId};
use crate::session::SessionState;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// The listing grid: fetched properties, the filter panel, and the
/// current user's favorites.
pub struct ListingBoard {
    ctx: AppContext,
    properties: Vec<Property>,
    form: FilterForm,
    spec: FilterSpec,
    filtered: Vec<Property>,
    favorites: Vec<Favorite>,
    session_rx: watch::Receiver<SessionState>,
    /// Set while the filter panel holds text no listing can match
    rejected: bool,
    loading: bool,
}

impl ListingBoard {
    pub fn new(ctx: AppContext) -> Self {
        let session_rx = ctx.session.subscribe();
        Self {
            ctx,
            properties: Vec::new(),
            form: FilterForm::default(),
            spec: FilterSpec::default(),
            filtered: Vec::new(),
            favorites: Vec::new(),
            session_rx,
            rejected: false,
            loading: false,
        }
    }

    /// Fetch the first page of listings and filter them locally
    pub async fn load(&mut self) {
        self.fetch(None).await;
    }

    /// Fetch the first page with the current filters applied by the gateway
    pub async fn load_server_filtered(&mut self) {
        let spec = self.spec.clone();
        self.fetch(Some(spec)).await;
    }

    async fn fetch(&mut self, spec: Option<FilterSpec>) {
        self.loading = true;
        let result = self
            .ctx
            .properties
            .fetch_properties(spec.as_ref(), self.ctx.page_size, 0)
            .await;
        self.loading = false;

        match result {
            Ok(properties) => {
                info!("Loaded {} properties", properties.len());
                self.properties = properties;
                self.refilter();
                self.sync_favorites().await;
            }
            Err(err) => {
                error!("Error fetching properties: {}", err);
                self.ctx.notifier.error(format!("Failed to load properties: {err}"));
            }
        }
    }

    /// Update one filter field and refilter the grid.
    ///
    /// Type or status text that names no known kind empties the grid until
    /// it is corrected or the filters are reset.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.form.set(field, value);
        match self.form.to_spec() {
            Ok(spec) => {
                self.spec = spec;
                self.rejected = false;
            }
            Err(err) => {
                warn!("Rejected filter input: {}", err);
                self.ctx.notifier.error(err.to_string());
                self.rejected = true;
            }
        }
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.form = FilterForm::default();
        self.spec = FilterSpec::default();
        self.rejected = false;
        self.refilter();
        self.ctx.notifier.info("Filters have been reset");
    }

    fn refilter(&mut self) {
        self.filtered = if self.rejected {
            Vec::new()
        } else {
            self.spec.apply(&self.properties)
        };
        debug!("{} of {} properties match filters", self.filtered.len(), self.properties.len());
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// What the grid shows
    pub fn filtered(&self) -> &[Property] {
        &self.filtered
    }

    pub fn filter_form(&self) -> &FilterForm {
        &self.form
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn is_favorite(&self, property_id: RecordId) -> bool {
        self.favorite_for(property_id).is_some()
    }

    fn favorite_for(&self, property_id: RecordId) -> Option<&Favorite> {
        self.favorites.iter().find(|f| f.property_id == property_id)
    }

    /// Reload the user's favorites from the gateway, or clear them when logged out
    pub async fn sync_favorites(&mut self) {
        drop(self.session_rx.borrow_and_update());
        let Some(email) = self.ctx.session.user_email() else {
            self.favorites.clear();
            return;
        };

        match self.ctx.favorites.fetch_user_favorites(&email).await {
            Ok(favorites) => self.favorites = favorites,
            Err(err) => error!("Error fetching user favorites: {}", err),
        }
    }

    /// Resync favorites if someone logged in or out since the last sync
    pub async fn on_session_change(&mut self) -> bool {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.sync_favorites().await;
        true
    }

    /// Email of the logged-in user; otherwise warns that `action` needs a login
    pub fn signed_in_email(&self, action: &'static str) -> Option<String> {
        let email = self.ctx.session.user_email();
        if email.is_none() {
            self.ctx.notifier.warning(Error::Unauthenticated(action).to_string());
        }
        email
    }

    /// Add or remove a listing from the user's favorites.
    ///
    /// Requires a logged-in user. Local favorites are re-fetched afterwards
    /// instead of being patched in place.
    pub async fn toggle_favorite(&mut self, property_id: RecordId) {
        let Some(email) = self.signed_in_email("save favorites") else {
            return;
        };

        let label = match self.properties.iter().find(|p| p.id == property_id) {
            Some(property) => property.label().to_string(),
            None => {
                self.ctx.notifier.error(format!("Property {property_id} is not listed"));
                return;
            }
        };

        self.loading = true;
        let existing = self.favorite_for(property_id).map(|f| f.id);
        let result = match existing {
            Some(favorite_id) => self
                .ctx
                .favorites
                .remove_favorite(favorite_id)
                .await
                .map(|_| "Property removed from favorites"),
            None => self
                .ctx
                .favorites
                .add_favorite(&email, property_id, &label)
                .await
                .map(|_| "Property added to favorites"),
        };
        self.loading = false;

        match result {
            Ok(message) => self.ctx.notifier.success(message),
            Err(err) => {
                error!("Error updating favorites: {}", err);
                self.ctx.notifier.error(format!("Failed to update favorites: {err}"));
            }
        }

        self.sync_favorites().await;
    }

    /// Listing shown in the details view; falls back to the gateway for
    /// properties outside the loaded page
    pub async fn property_details(&mut self, property_id: RecordId) -> Option<Property> {
        if let Some(property) = self.properties.iter().find(|p| p.id == property_id) {
            return Some(property.clone());
        }

        self.loading = true;
        let result = self.ctx.properties.get_property(property_id).await;
        self.loading = false;

        match result {
            Ok(Some(property)) => Some(property),
            Ok(None) => {
                self.ctx.notifier.error(format!("Property {property_id} not found"));
                None
            }
            Err(err) => {
                error!("Error fetching property {}: {}", property_id, err);
                self.ctx.notifier.error(format!("Failed to load property: {err}"));
                None
            }
        }
    }
}
