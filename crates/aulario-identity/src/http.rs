//! HTTP implementation of [`IdentityProvider`] (reqwest-based).

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::error::{IdentityError, IdentityResult};
use crate::models::{EmailAddress, IdentityUser, NewIdentityUser};
use crate::provider::IdentityProvider;

/// Identity Provider client over its REST API.
///
/// Authenticates with the provider secret key as a bearer token. Every
/// request is bounded by the configured timeout; a timeout surfaces as
/// `IdentityError::Transport`.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    base_url: String,
    secret_key: String,
    client: Client,
}

impl HttpIdentityProvider {
    /// Create a new client.
    ///
    /// `base_url` is the provider API root without a trailing slash, e.g.
    /// `https://api.identity.example.com/v1`.
    pub fn new(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> IdentityResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a provider response into `T`, or parse the error body.
    async fn expect_json<T: DeserializeOwned>(
        response: Response,
        identity_id: &str,
    ) -> IdentityResult<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(IdentityError::from_response(status.as_u16(), &body, identity_id))
        }
    }

    /// Discard the body of a response, keeping only the outcome.
    async fn expect_ok(response: Response, identity_id: &str) -> IdentityResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(IdentityError::from_response(status.as_u16(), &body, identity_id))
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_user(&self, new_user: NewIdentityUser) -> IdentityResult<IdentityUser> {
        debug!(username = %new_user.username, "Creating identity");
        let response = self
            .client
            .post(self.url("/users"))
            .bearer_auth(&self.secret_key)
            .json(&new_user)
            .send()
            .await?;
        Self::expect_json(response, "").await
    }

    async fn get_user(&self, identity_id: &str) -> IdentityResult<IdentityUser> {
        let response = self
            .client
            .get(self.url(&format!("/users/{identity_id}")))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        Self::expect_json(response, identity_id).await
    }

    async fn list_users_by_email(&self, email: &str) -> IdentityResult<Vec<IdentityUser>> {
        let response = self
            .client
            .get(self.url("/users"))
            .bearer_auth(&self.secret_key)
            .query(&[("email_address", email)])
            .send()
            .await?;
        Self::expect_json(response, "").await
    }

    async fn update_name(&self, identity_id: &str, first_name: &str) -> IdentityResult<()> {
        let response = self
            .client
            .patch(self.url(&format!("/users/{identity_id}")))
            .bearer_auth(&self.secret_key)
            .json(&json!({ "first_name": first_name }))
            .send()
            .await?;
        Self::expect_ok(response, identity_id).await
    }

    async fn update_password(&self, identity_id: &str, password: &str) -> IdentityResult<()> {
        let response = self
            .client
            .patch(self.url(&format!("/users/{identity_id}")))
            .bearer_auth(&self.secret_key)
            .json(&json!({ "password": password }))
            .send()
            .await?;
        Self::expect_ok(response, identity_id).await
    }

    async fn create_email_address(
        &self,
        identity_id: &str,
        email: &str,
    ) -> IdentityResult<EmailAddress> {
        let response = self
            .client
            .post(self.url("/email_addresses"))
            .bearer_auth(&self.secret_key)
            .json(&json!({ "user_id": identity_id, "email_address": email }))
            .send()
            .await?;
        Self::expect_json(response, identity_id).await
    }

    async fn promote_email_address(&self, email_address_id: &str) -> IdentityResult<()> {
        let response = self
            .client
            .patch(self.url(&format!("/email_addresses/{email_address_id}")))
            .bearer_auth(&self.secret_key)
            .json(&json!({ "verified": true, "primary": true }))
            .send()
            .await?;
        Self::expect_ok(response, "").await
    }

    async fn delete_email_address(&self, email_address_id: &str) -> IdentityResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/email_addresses/{email_address_id}")))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        Self::expect_ok(response, "").await
    }

    async fn set_blocked(&self, identity_id: &str, blocked: bool) -> IdentityResult<()> {
        debug!(identity_id, blocked, "Mirroring blocked flag to provider");
        let response = self
            .client
            .patch(self.url(&format!("/users/{identity_id}/metadata")))
            .bearer_auth(&self.secret_key)
            .json(&json!({ "public_metadata": { "blocked": blocked } }))
            .send()
            .await?;
        Self::expect_ok(response, identity_id).await
    }

    async fn delete_user(&self, identity_id: &str) -> IdentityResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/users/{identity_id}")))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;
        Self::expect_ok(response, identity_id).await
    }
}
