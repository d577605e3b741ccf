use std::sync::Arc;

use crate::config::AppConfig;
use crate::remote::RemoteClient;
use crate::session::SessionKeys;

/// Application state shared across handlers: the two remote handles plus the
/// session signing material. Built once in `main`, immutable afterwards, and
/// passed explicitly via `State` extraction rather than held globally.
#[derive(Clone)]
pub struct AppState {
    /// Row-level-security-bound handle for user-initiated reads.
    pub restricted: Arc<RemoteClient>,
    /// Policy-bypassing handle for server-trusted writes and the
    /// categories-with-counts view.
    pub elevated: Arc<RemoteClient>,
    pub session: Arc<SessionKeys>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            restricted: Arc::new(RemoteClient::new(
                config.supabase_url.clone(),
                config.anon_key.clone(),
            )),
            elevated: Arc::new(RemoteClient::new(
                config.supabase_url.clone(),
                config.service_key.clone(),
            )),
            session: Arc::new(SessionKeys::new(
                &config.session_secret,
                config.session_expiry_hours,
            )),
        }
    }
}
