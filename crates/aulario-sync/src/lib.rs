//! User Synchronization Service.
//!
//! Keeps one Record Store user per external identity consistent with the
//! Identity Provider across provision / update / delete / block, and ingests
//! the provider's lifecycle webhooks idempotently.
//!
//! Two stores, no transaction: every multi-step write runs external store
//! first, then local store, so the Record Store never references an identity
//! the provider does not know. Partial failures are compensated once, never
//! retried silently; what cannot be compensated is surfaced.

pub mod error;
pub mod locks;
pub mod models;
pub mod notify;
pub mod service;
pub mod validation;

pub use error::{SyncError, SyncResult};
pub use locks::IdLocks;
pub use models::{ProvisionedUser, UpdateOutcome, UserField, UserPatch, WebhookOutcome};
pub use notify::{HttpNotifier, Notifier, NotifyError, WelcomeMessage};
pub use service::UserSyncService;
