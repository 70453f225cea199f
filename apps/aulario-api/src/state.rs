//! Shared application state injected into every handler.

use std::sync::Arc;

use aulario_academics::AcademicsService;
use aulario_sync::UserSyncService;

/// Application state for all routes.
#[derive(Clone)]
pub struct AppState {
    /// User synchronization service (provision / update / delete / webhooks).
    pub sync: Arc<UserSyncService>,

    /// Academic entity services (students through grades).
    pub academics: Arc<AcademicsService>,

    /// Shared secret for webhook signature verification.
    pub webhook_secret: Arc<str>,
}

impl AppState {
    pub fn new(
        sync: Arc<UserSyncService>,
        academics: Arc<AcademicsService>,
        webhook_secret: &str,
    ) -> Self {
        Self {
            sync,
            academics,
            webhook_secret: Arc::from(webhook_secret),
        }
    }
}
