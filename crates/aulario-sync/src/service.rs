//! The user synchronization service.
//!
//! Owns the create/update/delete/block workflow across the Identity
//! Provider and the Record Store, and the webhook ingestion path. Sub-steps
//! always run external store first, then local store: the Record Store must
//! never reference an identity the provider does not have.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{SyncError, SyncResult};
use crate::locks::IdLocks;
use crate::models::{ProvisionedUser, UpdateOutcome, UserField, UserPatch, WebhookOutcome};
use crate::notify::{Notifier, WelcomeMessage};
use crate::validation::{derive_username, validate_email, validate_password};
use aulario_core::{AularioError, UserId};
use aulario_identity::webhook::WebhookEvent;
use aulario_identity::{IdentityProvider, NewIdentityUser};
use aulario_store::{AccountState, Role, User, UserRecordPatch, UserStore};

/// Webhook event types this service processes.
const EVENT_USER_CREATED: &str = "user.created";
const EVENT_USER_UPDATED: &str = "user.updated";
const EVENT_USER_DELETED: &str = "user.deleted";

/// Reconciles user records between the Identity Provider and the Record
/// Store.
///
/// One instance per process; every collaborator is injected at construction
/// time. Mutations for the same identity id are serialized through
/// [`IdLocks`].
pub struct UserSyncService {
    store: Arc<dyn UserStore>,
    provider: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    login_url: String,
    locks: IdLocks,
}

impl UserSyncService {
    /// Create a new service.
    pub fn new(
        store: Arc<dyn UserStore>,
        provider: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            provider,
            notifier,
            login_url: login_url.into(),
            locks: IdLocks::new(),
        }
    }

    /// Create the identity in the provider, then the Record Store user.
    ///
    /// Validation runs before any external call. A store failure after the
    /// identity exists triggers exactly one compensating delete; if that
    /// delete fails too, both failures are surfaced. A welcome-mail failure
    /// degrades the result to success-with-warning.
    pub async fn provision_user(
        &self,
        name: &str,
        email: &str,
        role: Role,
        password: &str,
    ) -> SyncResult<ProvisionedUser> {
        validate_email(email)?;
        validate_password(password)?;

        let existing = self.provider.list_users_by_email(email).await?;
        if !existing.is_empty() {
            return Err(AularioError::conflict(
                "identity",
                format!("email already registered with the identity provider: {email}"),
            )
            .into());
        }

        let identity = self
            .provider
            .create_user(NewIdentityUser {
                first_name: name.to_string(),
                username: derive_username(name),
                email_address: vec![email.to_string()],
                password: password.to_string(),
            })
            .await?;
        info!(identity_id = %identity.id, "Identity created");

        let _guard = self.locks.acquire(&identity.id).await;

        let now = chrono::Utc::now();
        let record = User {
            id: UserId::new(),
            identity_id: identity.id.clone(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            state: AccountState::Active,
            created_at: now,
            updated_at: now,
        };

        let user = match self.store.insert_user(record).await {
            Ok(user) => user,
            Err(store_err) => {
                warn!(
                    identity_id = %identity.id,
                    error = %store_err,
                    "Record Store insert failed, compensating provider create"
                );
                return match self.provider.delete_user(&identity.id).await {
                    Ok(()) => Err(SyncError::from(store_err)),
                    Err(compensate_err) if compensate_err.is_not_found() => {
                        Err(SyncError::from(store_err))
                    }
                    Err(compensate_err) => {
                        warn!(
                            identity_id = %identity.id,
                            error = %compensate_err,
                            "Compensating delete failed, identity is orphaned"
                        );
                        Err(SyncError::OrphanedIdentity {
                            identity_id: identity.id.clone(),
                            store_error: store_err.to_string(),
                            compensate_error: compensate_err.to_string(),
                        })
                    }
                };
            }
        };

        let warning = match self
            .notifier
            .send_welcome(&WelcomeMessage {
                to: email.to_string(),
                name: name.to_string(),
                password: password.to_string(),
                login_url: self.login_url.clone(),
            })
            .await
        {
            Ok(()) => None,
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "Welcome mail failed");
                Some(format!("welcome mail not sent: {err}"))
            }
        };

        info!(user_id = %user.id, identity_id = %user.identity_id, "User provisioned");
        Ok(ProvisionedUser {
            id: user.id,
            identity_id: user.identity_id,
            warning,
        })
    }

    /// Apply a partial update, pushing each changed field to the provider
    /// before the Record Store sees it.
    ///
    /// Stops at the first failing field: earlier fields stay applied, the
    /// failing one is not, and the error reports both sets.
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> SyncResult<UpdateOutcome> {
        let user = self
            .store
            .get_user(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("User", id))?;

        let _guard = self.locks.acquire(&user.identity_id).await;

        let mut applied: Vec<UserField> = Vec::new();
        let mut store_patch = UserRecordPatch::default();

        if let Some(name) = &patch.name {
            if name != &user.name {
                if let Err(err) = self.provider.update_name(&user.identity_id, name).await {
                    return self
                        .stop_update(id, store_patch, applied, UserField::Name, err.into())
                        .await;
                }
                store_patch.name = Some(name.clone());
                applied.push(UserField::Name);
            }
        }

        if let Some(email) = &patch.email {
            if !email.eq_ignore_ascii_case(&user.email) {
                if let Err(err) = self.change_primary_email(&user.identity_id, email).await {
                    return self
                        .stop_update(id, store_patch, applied, UserField::Email, err)
                        .await;
                }
                store_patch.email = Some(email.clone());
                applied.push(UserField::Email);
            }
        }

        if let Some(password) = &patch.password {
            let pushed = match validate_password(password) {
                Ok(()) => self
                    .provider
                    .update_password(&user.identity_id, password)
                    .await
                    .map_err(SyncError::from),
                Err(err) => Err(err.into()),
            };
            if let Err(err) = pushed {
                return self
                    .stop_update(id, store_patch, applied, UserField::Password, err)
                    .await;
            }
            applied.push(UserField::Password);
        }

        if let Some(state) = patch.state {
            if state != user.state {
                let blocked = state == AccountState::Blocked;
                if let Err(err) = self.provider.set_blocked(&user.identity_id, blocked).await {
                    return self
                        .stop_update(id, store_patch, applied, UserField::State, err.into())
                        .await;
                }
                store_patch.state = Some(state);
                applied.push(UserField::State);
            }
        }

        if let Some(role) = patch.role {
            if role != user.role {
                // Role is a Record Store concept; no provider call involved.
                store_patch.role = Some(role);
                applied.push(UserField::Role);
            }
        }

        if !store_patch.is_empty() {
            self.store.update_user(id, store_patch).await?;
        }

        info!(user_id = %id, fields = ?applied, "User updated");
        Ok(UpdateOutcome {
            updated_fields: applied,
        })
    }

    /// Persist what already went through, then report the stopped update.
    async fn stop_update(
        &self,
        id: UserId,
        store_patch: UserRecordPatch,
        applied: Vec<UserField>,
        failed: UserField,
        source: SyncError,
    ) -> SyncResult<UpdateOutcome> {
        if !store_patch.is_empty() {
            if let Err(err) = self.store.update_user(id, store_patch).await {
                warn!(user_id = %id, error = %err, "Failed to persist fields applied before the stop");
            }
        }
        let source = match source {
            SyncError::Shared(inner) => inner,
            other => AularioError::from(other),
        };
        warn!(user_id = %id, field = %failed, error = %source, "Update stopped mid-sequence");
        Err(SyncError::PartialUpdate {
            applied,
            failed,
            source,
        })
    }

    /// Make `email` the verified primary address of the identity.
    ///
    /// Promotes an already-attached address instead of duplicating it; the
    /// previous primary is removed only after the new one is confirmed.
    async fn change_primary_email(&self, identity_id: &str, email: &str) -> Result<(), SyncError> {
        validate_email(email)?;

        let holders = self.provider.list_users_by_email(email).await?;
        if holders.iter().any(|u| u.id != identity_id) {
            return Err(AularioError::conflict(
                "identity",
                format!("email already in use by another identity: {email}"),
            )
            .into());
        }

        let identity = self.provider.get_user(identity_id).await?;
        let previous_primary = identity.primary_email().cloned();

        let target_id = match identity.find_email(email) {
            Some(address) => address.id.clone(),
            None => {
                self.provider
                    .create_email_address(identity_id, email)
                    .await?
                    .id
            }
        };
        self.provider.promote_email_address(&target_id).await?;

        if let Some(previous) = previous_primary {
            if previous.id != target_id {
                // The new primary is confirmed; a leftover secondary address
                // is harmless, so cleanup failure does not fail the change.
                if let Err(err) = self.provider.delete_email_address(&previous.id).await {
                    warn!(
                        identity_id,
                        address_id = %previous.id,
                        error = %err,
                        "Could not remove previous primary address"
                    );
                }
            }
        }
        Ok(())
    }

    /// Delete from the provider, then from the Record Store.
    ///
    /// A provider-side "not found" means the identity is already gone and
    /// the local deletion still proceeds.
    pub async fn delete_user(&self, id: UserId) -> SyncResult<()> {
        let user = self
            .store
            .get_user(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("User", id))?;

        let _guard = self.locks.acquire(&user.identity_id).await;

        match self.provider.delete_user(&user.identity_id).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                info!(identity_id = %user.identity_id, "Identity already gone, continuing");
            }
            Err(err) => return Err(err.into()),
        }

        self.store.delete_user(id).await?;
        info!(user_id = %id, identity_id = %user.identity_id, "User deleted from both stores");
        Ok(())
    }

    /// Reflect a provider lifecycle event into the Record Store.
    ///
    /// Idempotent per event type: replaying a delivery leaves the end state
    /// unchanged and still reports success.
    pub async fn handle_webhook_event(&self, event: &WebhookEvent) -> SyncResult<WebhookOutcome> {
        match event.event_type.as_str() {
            EVENT_USER_CREATED => self.webhook_created(event).await,
            EVENT_USER_UPDATED => self.webhook_updated(event).await,
            EVENT_USER_DELETED => self.webhook_deleted(event).await,
            other => {
                info!(event_type = other, "Webhook event type not processed");
                Ok(WebhookOutcome::Unhandled)
            }
        }
    }

    async fn webhook_created(&self, event: &WebhookEvent) -> SyncResult<WebhookOutcome> {
        let data = &event.data;
        let _guard = self.locks.acquire(&data.id).await;

        if self.store.find_user_by_identity(&data.id).await?.is_some() {
            info!(identity_id = %data.id, "Webhook replay: user already recorded");
            return Ok(WebhookOutcome::AlreadyExists);
        }

        let now = chrono::Utc::now();
        let record = User {
            id: UserId::new(),
            identity_id: data.id.clone(),
            name: data.first_name.clone().unwrap_or_default(),
            email: data.primary_email().unwrap_or_default().to_string(),
            role: Role::User,
            state: AccountState::Active,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_user(record).await?;
        info!(identity_id = %data.id, "User recorded from webhook");
        Ok(WebhookOutcome::Created)
    }

    async fn webhook_updated(&self, event: &WebhookEvent) -> SyncResult<WebhookOutcome> {
        let data = &event.data;
        let _guard = self.locks.acquire(&data.id).await;

        let user = self
            .store
            .find_user_by_identity(&data.id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("User", &data.id))?;

        let mut patch = UserRecordPatch::default();
        let mut fields = Vec::new();

        if let Some(name) = &data.first_name {
            if !name.is_empty() && name != &user.name {
                patch.name = Some(name.clone());
                fields.push(UserField::Name);
            }
        }
        if let Some(email) = data.primary_email() {
            if !email.is_empty() && !email.eq_ignore_ascii_case(&user.email) {
                patch.email = Some(email.to_string());
                fields.push(UserField::Email);
            }
        }
        let state = if data.is_blocked() {
            AccountState::Blocked
        } else {
            AccountState::Active
        };
        if state != user.state {
            patch.state = Some(state);
            fields.push(UserField::State);
        }

        if patch.is_empty() {
            info!(identity_id = %data.id, "Webhook update: nothing differed");
            return Ok(WebhookOutcome::NoChanges);
        }

        self.store.update_user(user.id, patch).await?;
        info!(identity_id = %data.id, fields = ?fields, "User updated from webhook");
        Ok(WebhookOutcome::Updated(fields))
    }

    async fn webhook_deleted(&self, event: &WebhookEvent) -> SyncResult<WebhookOutcome> {
        let data = &event.data;
        let _guard = self.locks.acquire(&data.id).await;

        match self.store.find_user_by_identity(&data.id).await? {
            Some(user) => {
                self.store.delete_user(user.id).await?;
                info!(identity_id = %data.id, "User deleted from webhook");
                Ok(WebhookOutcome::Deleted)
            }
            None => {
                info!(identity_id = %data.id, "Webhook replay: user already absent");
                Ok(WebhookOutcome::AlreadyAbsent)
            }
        }
    }

    /// Fetch one user by Record Store id.
    pub async fn get_user(&self, id: UserId) -> SyncResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("User", id).into())
    }

    /// Fetch one user by provider identity id.
    pub async fn get_user_by_identity(&self, identity_id: &str) -> SyncResult<User> {
        self.store
            .find_user_by_identity(identity_id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("User", identity_id).into())
    }

    /// Fetch one user by email.
    pub async fn get_user_by_email(&self, email: &str) -> SyncResult<User> {
        self.store
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AularioError::not_found_id("User", email).into())
    }

    /// List users, optionally filtered by a case-insensitive search over
    /// name/email and by account state.
    pub async fn list_users(
        &self,
        search: Option<&str>,
        state: Option<AccountState>,
    ) -> SyncResult<Vec<User>> {
        let mut users = self.store.list_users().await?;
        if let Some(needle) = search {
            let needle = needle.to_lowercase();
            users.retain(|u| {
                u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            });
        }
        if let Some(state) = state {
            users.retain(|u| u.state == state);
        }
        Ok(users)
    }
}
