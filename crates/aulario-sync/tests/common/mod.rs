//! Shared test doubles for sync service tests.
//!
//! `MockProvider` keeps provider-side identities in memory, records every
//! call by name, and can be told to fail named operations. `MockNotifier`
//! records welcome messages and can be flipped into failure mode.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use aulario_identity::{
    async_trait, EmailAddress, IdentityError, IdentityProvider, IdentityResult, IdentityUser,
    NewIdentityUser,
};
use aulario_sync::{Notifier, NotifyError, WelcomeMessage};

#[derive(Default)]
pub struct MockProvider {
    users: Mutex<HashMap<String, IdentityUser>>,
    calls: Mutex<Vec<String>>,
    fail_on: Mutex<HashSet<&'static str>>,
    counter: AtomicU32,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the named operation fail with a generic provider error.
    pub fn fail_on(&self, op: &'static str) {
        self.fail_on.lock().unwrap().insert(op);
    }

    /// Every call made so far, by operation name.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has_identity(&self, identity_id: &str) -> bool {
        self.users.lock().unwrap().contains_key(identity_id)
    }

    pub fn identity(&self, identity_id: &str) -> Option<IdentityUser> {
        self.users.lock().unwrap().get(identity_id).cloned()
    }

    /// Drop an identity without recording a `delete_user` call, to set up
    /// drift between the provider and the Record Store.
    pub fn remove_identity(&self, identity_id: &str) {
        self.users.lock().unwrap().remove(identity_id);
    }

    /// Seed an identity, optionally with extra secondary addresses.
    pub fn seed_identity(&self, name: &str, emails: &[&str]) -> IdentityUser {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let addresses: Vec<EmailAddress> = emails
            .iter()
            .enumerate()
            .map(|(i, email)| EmailAddress {
                id: format!("ema_{n}_{i}"),
                email_address: (*email).to_string(),
            })
            .collect();
        let user = IdentityUser {
            id: format!("idn_{n}"),
            first_name: Some(name.to_string()),
            username: None,
            primary_email_address_id: addresses.first().map(|a| a.id.clone()),
            email_addresses: addresses,
            public_metadata: serde_json::Value::Null,
        };
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        user
    }

    fn record(&self, op: &'static str) -> IdentityResult<()> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.fail_on.lock().unwrap().contains(op) {
            return Err(IdentityError::Provider {
                status: 503,
                code: Some("mock_failure".to_string()),
                message: format!("mock failure in {op}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn create_user(&self, new_user: NewIdentityUser) -> IdentityResult<IdentityUser> {
        self.record("create_user")?;
        let email = new_user.email_address.first().cloned().unwrap_or_default();
        let user = self.seed_identity(&new_user.first_name, &[&email]);
        Ok(user)
    }

    async fn get_user(&self, identity_id: &str) -> IdentityResult<IdentityUser> {
        self.record("get_user")?;
        self.users
            .lock()
            .unwrap()
            .get(identity_id)
            .cloned()
            .ok_or_else(|| IdentityError::NotFound {
                identity_id: identity_id.to_string(),
            })
    }

    async fn list_users_by_email(&self, email: &str) -> IdentityResult<Vec<IdentityUser>> {
        self.record("list_users_by_email")?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.find_email(email).is_some())
            .cloned()
            .collect())
    }

    async fn update_name(&self, identity_id: &str, first_name: &str) -> IdentityResult<()> {
        self.record("update_name")?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(identity_id)
            .ok_or_else(|| IdentityError::NotFound {
                identity_id: identity_id.to_string(),
            })?;
        user.first_name = Some(first_name.to_string());
        Ok(())
    }

    async fn update_password(&self, identity_id: &str, _password: &str) -> IdentityResult<()> {
        self.record("update_password")?;
        if !self.users.lock().unwrap().contains_key(identity_id) {
            return Err(IdentityError::NotFound {
                identity_id: identity_id.to_string(),
            });
        }
        Ok(())
    }

    async fn create_email_address(
        &self,
        identity_id: &str,
        email: &str,
    ) -> IdentityResult<EmailAddress> {
        self.record("create_email_address")?;
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let address = EmailAddress {
            id: format!("ema_new_{n}"),
            email_address: email.to_string(),
        };
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(identity_id)
            .ok_or_else(|| IdentityError::NotFound {
                identity_id: identity_id.to_string(),
            })?;
        user.email_addresses.push(address.clone());
        Ok(address)
    }

    async fn promote_email_address(&self, email_address_id: &str) -> IdentityResult<()> {
        self.record("promote_email_address")?;
        let mut users = self.users.lock().unwrap();
        for user in users.values_mut() {
            if user.email_addresses.iter().any(|a| a.id == email_address_id) {
                user.primary_email_address_id = Some(email_address_id.to_string());
                return Ok(());
            }
        }
        Err(IdentityError::NotFound {
            identity_id: email_address_id.to_string(),
        })
    }

    async fn delete_email_address(&self, email_address_id: &str) -> IdentityResult<()> {
        self.record("delete_email_address")?;
        let mut users = self.users.lock().unwrap();
        for user in users.values_mut() {
            let before = user.email_addresses.len();
            user.email_addresses.retain(|a| a.id != email_address_id);
            if user.email_addresses.len() != before {
                return Ok(());
            }
        }
        Err(IdentityError::NotFound {
            identity_id: email_address_id.to_string(),
        })
    }

    async fn set_blocked(&self, identity_id: &str, blocked: bool) -> IdentityResult<()> {
        self.record("set_blocked")?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(identity_id)
            .ok_or_else(|| IdentityError::NotFound {
                identity_id: identity_id.to_string(),
            })?;
        user.public_metadata = serde_json::json!({ "blocked": blocked });
        Ok(())
    }

    async fn delete_user(&self, identity_id: &str) -> IdentityResult<()> {
        self.record("delete_user")?;
        if self.users.lock().unwrap().remove(identity_id).is_none() {
            return Err(IdentityError::NotFound {
                identity_id: identity_id.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<WelcomeMessage>>,
    fail: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<WelcomeMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<(), NotifyError> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(NotifyError::Rejected {
                status: 500,
                message: "mock mail outage".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
