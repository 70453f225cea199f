//! Identity Provider adapter.
//!
//! Wraps the external authentication service that owns credentials and the
//! primary email of record. Exposes:
//!
//! - [`IdentityProvider`] - the async trait the sync service is written
//!   against
//! - [`HttpIdentityProvider`] - reqwest implementation speaking the
//!   provider's REST API
//! - [`webhook`] - inbound event model and signature verification
//!
//! Provider error shapes are parsed exactly once, at this boundary, into
//! the shared taxonomy; nothing above this crate sees a raw provider error.

pub mod error;
pub mod http;
pub mod models;
pub mod provider;
pub mod webhook;

pub use error::{IdentityError, IdentityResult};
pub use http::HttpIdentityProvider;
pub use models::{EmailAddress, IdentityUser, NewIdentityUser};
pub use provider::IdentityProvider;
pub use webhook::{SignatureError, SignatureHeaders, WebhookEvent, WebhookUserData};

// Re-export async_trait for provider implementors.
pub use async_trait::async_trait;
