use crate::models::UserProfile;
use crate::session::Session;
use reqwest::Url;
use tracing::warn;

/// Where the hosted login widget mounts and where it sends the user afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthWidgetConfig {
    pub target: String,
    pub redirect: Option<String>,
}

impl AuthWidgetConfig {
    pub fn new(target: impl Into<String>, current_url: &str) -> Self {
        Self {
            target: target.into(),
            redirect: redirect_target(current_url),
        }
    }
}

/// Apply the widget's success callback: a user means login, nothing means logout.
pub fn on_auth_callback(session: &Session, user: Option<UserProfile>) {
    match user {
        Some(user) => session.set_user(user),
        None => session.clear_user(),
    }
}

/// The `redirect` query parameter of `url`, if present and non-empty.
pub fn redirect_target(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Ignoring unparsable URL {}: {}", url, err);
            return None;
        }
    };
    parsed
        .query_pairs()
        .find(|(key, _)| key == "redirect")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
