//! Welcome notification collaborator.
//!
//! Best effort: the sync service reports a notification failure as a
//! warning on an otherwise successful provisioning, never as an operation
//! failure. Template rendering lives with the mail provider; this side only
//! carries structured fields.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Error type for notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The mail API rejected the request.
    #[error("Mail API rejected the message (status {status}): {message}")]
    Rejected {
        /// HTTP status of the rejection.
        status: u16,
        /// Response body, for the warning surfaced to the caller.
        message: String,
    },

    /// The request never reached the mail API.
    #[error("Mail API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One-time welcome message with the initial credentials.
#[derive(Debug, Clone)]
pub struct WelcomeMessage {
    /// Recipient address.
    pub to: String,
    /// Recipient display name.
    pub name: String,
    /// Plaintext one-time password, as created on the provider.
    pub password: String,
    /// Sign-in URL for the platform.
    pub login_url: String,
}

/// Transactional-mail sender.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the welcome message. Errors are reported, not retried.
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<(), NotifyError>;
}

/// Notifier over a transactional-mail HTTP API.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    base_url: String,
    api_key: String,
    from: String,
    client: Client,
}

impl HttpNotifier {
    /// Create a new sender. `base_url` is the mail API root, `from` the
    /// sending address the API key is authorized for.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            from: from.into(),
            client,
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_welcome(&self, message: &WelcomeMessage) -> Result<(), NotifyError> {
        debug!(to = %message.to, "Sending welcome mail");
        let body = json!({
            "from": self.from,
            "to": message.to,
            "subject": "¡Bienvenido! Tus credenciales de acceso a la plataforma",
            "html": format!(
                "<h1>Hola, {}!</h1>\
                 <p>Tus credenciales de acceso son:</p>\
                 <p><strong>Correo:</strong> {}</p>\
                 <p><strong>Contraseña temporal:</strong> <code>{}</code></p>\
                 <p>Inicia sesión en <a href=\"{}\">{}</a> y cámbiala en tu perfil.</p>",
                message.name, message.to, message.password, message.login_url, message.login_url
            ),
        });

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn message() -> WelcomeMessage {
        WelcomeMessage {
            to: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            password: "Passw0rd".to_string(),
            login_url: "https://aulario.example.com/sign-in".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_credentials_to_mail_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test_key"))
            .respond_with(|req: &Request| {
                let body: Value = serde_json::from_slice(&req.body).unwrap();
                assert_eq!(body["to"], "ana@example.com");
                assert!(body["html"].as_str().unwrap().contains("Passw0rd"));
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "eml_1"}))
            })
            .expect(1)
            .mount(&server)
            .await;

        let notifier = HttpNotifier::new(
            server.uri(),
            "re_test_key",
            "noreply@aulario.example.com",
            Duration::from_secs(2),
        )
        .unwrap();
        notifier.send_welcome(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn rejection_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid from address"))
            .mount(&server)
            .await;

        let notifier = HttpNotifier::new(
            server.uri(),
            "re_test_key",
            "bad-from",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = notifier.send_welcome(&message()).await.unwrap_err();
        match err {
            NotifyError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("invalid from"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
