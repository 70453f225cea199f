//! Identity Provider error type and the provider-code parse step.
//!
//! The provider reports failures as an HTTP status plus a JSON body of
//! `{"errors": [{"code": "...", "message": "...", "long_message": "..."}]}`.
//! [`IdentityError::from_response`] maps known codes exhaustively into the
//! local kinds; anything unrecognized falls back to `Provider`, which keeps
//! the raw code for passthrough.

use aulario_core::AularioError;
use serde::Deserialize;
use thiserror::Error;

/// Error type for Identity Provider operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The value already exists on the provider side (duplicate email).
    #[error("Identity conflict ({code}): {message}")]
    Conflict {
        /// Provider error code (e.g. `form_identifier_exists`).
        code: String,
        /// Provider-supplied description.
        message: String,
    },

    /// The provider rejected an input value.
    #[error("Identity validation failed ({code}): {message}")]
    Validation {
        /// Provider error code (e.g. `form_password_pwned`).
        code: String,
        /// Provider-supplied description.
        message: String,
    },

    /// The identity does not exist on the provider side.
    #[error("Identity not found: {identity_id}")]
    NotFound {
        /// The identity id the lookup ran against.
        identity_id: String,
    },

    /// The provider returned an error this adapter has no mapping for.
    #[error("Identity provider error {status}{}: {message}", code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
    Provider {
        /// HTTP status the provider answered with.
        status: u16,
        /// Provider error code, when the body carried one.
        code: Option<String>,
        /// Provider-supplied or synthesized description.
        message: String,
    },

    /// The request never produced a provider response (connect, timeout).
    #[error("Identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Type alias for Results using [`IdentityError`].
pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

/// One entry of the provider's error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorEntry {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub long_message: Option<String>,
}

/// The provider's error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorBody {
    #[serde(default)]
    pub errors: Vec<ProviderErrorEntry>,
}

impl IdentityError {
    /// Parse a non-success provider response into a local error kind.
    ///
    /// `identity_id` is used for the `NotFound` mapping when the status is
    /// 404 and may be empty for collection-level requests.
    pub(crate) fn from_response(status: u16, body: &str, identity_id: &str) -> Self {
        if status == 404 {
            return Self::NotFound {
                identity_id: identity_id.to_string(),
            };
        }

        let parsed: Option<ProviderErrorBody> = serde_json::from_str(body).ok();
        let entry = parsed.and_then(|b| b.errors.into_iter().next());

        match entry {
            Some(entry) => {
                let message = entry.long_message.unwrap_or(entry.message);
                match entry.code.as_str() {
                    "form_identifier_exists" | "email_address_exists" => Self::Conflict {
                        code: entry.code,
                        message,
                    },
                    "form_password_pwned"
                    | "form_password_length_too_short"
                    | "form_password_validation_failed"
                    | "form_param_format_invalid" => Self::Validation {
                        code: entry.code,
                        message,
                    },
                    "resource_not_found" => Self::NotFound {
                        identity_id: identity_id.to_string(),
                    },
                    _ => Self::Provider {
                        status,
                        code: Some(entry.code),
                        message,
                    },
                }
            }
            None => Self::Provider {
                status,
                code: None,
                message: format!("unexpected provider response (status {status})"),
            },
        }
    }

    /// True if this is the provider-side not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True if this is a provider-side duplicate condition.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<IdentityError> for AularioError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Conflict { code, message } => AularioError::Conflict {
                resource: "identity".to_string(),
                message: format!("{message} ({code})"),
            },
            IdentityError::Validation { code, message } => {
                let field = if code.contains("password") {
                    "password"
                } else {
                    "email"
                };
                AularioError::validation(field, message)
            }
            IdentityError::NotFound { identity_id } => {
                AularioError::not_found_id("identity", identity_id)
            }
            IdentityError::Provider {
                status,
                code,
                message,
            } => AularioError::ExternalService {
                code,
                message: format!("{message} (status {status})"),
            },
            IdentityError::Transport(err) => AularioError::ExternalService {
                code: None,
                message: err.to_string(),
            },
        }
    }
}
