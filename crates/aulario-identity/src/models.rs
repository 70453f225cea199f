//! Wire models for the Identity Provider API.

use serde::{Deserialize, Serialize};

/// An email address attached to an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Provider-assigned id of the address object.
    pub id: String,
    /// The address itself.
    pub email_address: String,
}

/// A user account as the provider reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Provider-assigned identity id.
    pub id: String,

    /// First/display name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Login username.
    #[serde(default)]
    pub username: Option<String>,

    /// All addresses attached to the identity.
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,

    /// Id of the primary address within `email_addresses`.
    #[serde(default)]
    pub primary_email_address_id: Option<String>,

    /// Free-form provider metadata. The blocked flag travels here.
    #[serde(default)]
    pub public_metadata: serde_json::Value,
}

impl IdentityUser {
    /// The primary email address, when one is designated.
    #[must_use]
    pub fn primary_email(&self) -> Option<&EmailAddress> {
        let primary_id = self.primary_email_address_id.as_deref()?;
        self.email_addresses.iter().find(|e| e.id == primary_id)
    }

    /// The address object matching `email`, primary or not.
    #[must_use]
    pub fn find_email(&self, email: &str) -> Option<&EmailAddress> {
        self.email_addresses
            .iter()
            .find(|e| e.email_address.eq_ignore_ascii_case(email))
    }

    /// Whether `public_metadata.blocked` is set true.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.public_metadata
            .get("blocked")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

/// Fields required to create an identity.
#[derive(Debug, Clone, Serialize)]
pub struct NewIdentityUser {
    /// First/display name.
    pub first_name: String,
    /// Login username; the provider requires one.
    pub username: String,
    /// Initial (and only) email address.
    pub email_address: Vec<String>,
    /// Plaintext initial password; the provider stores the hash.
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> IdentityUser {
        serde_json::from_value(json!({
            "id": "idn_abc",
            "first_name": "Ana",
            "email_addresses": [
                {"id": "ema_1", "email_address": "old@example.com"},
                {"id": "ema_2", "email_address": "ana@example.com"}
            ],
            "primary_email_address_id": "ema_2",
            "public_metadata": {"blocked": true}
        }))
        .unwrap()
    }

    #[test]
    fn primary_email_resolves_by_id() {
        let user = sample();
        assert_eq!(user.primary_email().unwrap().email_address, "ana@example.com");
    }

    #[test]
    fn find_email_is_case_insensitive() {
        let user = sample();
        assert_eq!(user.find_email("ANA@example.com").unwrap().id, "ema_2");
        assert!(user.find_email("missing@example.com").is_none());
    }

    #[test]
    fn blocked_flag_from_metadata() {
        let user = sample();
        assert!(user.is_blocked());

        let unblocked: IdentityUser =
            serde_json::from_value(json!({"id": "idn_x"})).unwrap();
        assert!(!unblocked.is_blocked());
    }
}
