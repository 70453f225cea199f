//! The Identity Provider trait.
//!
//! The seam between the sync service and the external authentication
//! service. [`crate::HttpIdentityProvider`] is the production
//! implementation; service tests substitute their own.

use async_trait::async_trait;

use crate::error::IdentityResult;
use crate::models::{EmailAddress, IdentityUser, NewIdentityUser};

/// Operations the external authentication service exposes.
///
/// Every method is a blocking remote call from the caller's perspective and
/// is bounded by the implementation's request timeout.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new identity with an initial password and email.
    async fn create_user(&self, new_user: NewIdentityUser) -> IdentityResult<IdentityUser>;

    /// Fetch one identity by id.
    async fn get_user(&self, identity_id: &str) -> IdentityResult<IdentityUser>;

    /// All identities carrying the given address (any position, not just
    /// primary). Used for uniqueness checks before create and email change.
    async fn list_users_by_email(&self, email: &str) -> IdentityResult<Vec<IdentityUser>>;

    /// Update the first/display name.
    async fn update_name(&self, identity_id: &str, first_name: &str) -> IdentityResult<()>;

    /// Replace the password.
    async fn update_password(&self, identity_id: &str, password: &str) -> IdentityResult<()>;

    /// Attach a new (unverified, non-primary) address to the identity.
    async fn create_email_address(
        &self,
        identity_id: &str,
        email: &str,
    ) -> IdentityResult<EmailAddress>;

    /// Mark an attached address verified and primary.
    async fn promote_email_address(&self, email_address_id: &str) -> IdentityResult<()>;

    /// Remove an attached address.
    async fn delete_email_address(&self, email_address_id: &str) -> IdentityResult<()>;

    /// Mirror the blocked flag into `public_metadata.blocked`.
    async fn set_blocked(&self, identity_id: &str, blocked: bool) -> IdentityResult<()>;

    /// Delete the identity.
    async fn delete_user(&self, identity_id: &str) -> IdentityResult<()>;
}
