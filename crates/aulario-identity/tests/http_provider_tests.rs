//! Integration tests for the HTTP Identity Provider client using wiremock.
//!
//! Cover create/lookup/update/delete against a mock provider, the error
//! parse step (provider codes to local kinds), and the not-found path.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aulario_identity::{HttpIdentityProvider, IdentityError, IdentityProvider, NewIdentityUser};

const SECRET_KEY: &str = "sk_test_abc123";

async fn provider_for(server: &MockServer) -> HttpIdentityProvider {
    HttpIdentityProvider::new(server.uri(), SECRET_KEY, Duration::from_secs(2)).unwrap()
}

fn new_user() -> NewIdentityUser {
    NewIdentityUser {
        first_name: "Ana Ruiz".to_string(),
        username: "anaruiz42".to_string(),
        email_address: vec!["ana@example.com".to_string()],
        password: "Passw0rd".to_string(),
    }
}

#[tokio::test]
async fn create_user_sends_bearer_auth_and_parses_identity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("authorization", format!("Bearer {SECRET_KEY}")))
        .and(body_partial_json(json!({"username": "anaruiz42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "idn_1",
            "first_name": "Ana Ruiz",
            "email_addresses": [{"id": "ema_1", "email_address": "ana@example.com"}],
            "primary_email_address_id": "ema_1"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let user = provider.create_user(new_user()).await.unwrap();

    assert_eq!(user.id, "idn_1");
    assert_eq!(user.primary_email().unwrap().email_address, "ana@example.com");
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": [{
                "code": "form_identifier_exists",
                "message": "That email address is taken."
            }]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.create_user(new_user()).await.unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");
}

#[tokio::test]
async fn weak_password_maps_to_validation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{
                "code": "form_password_pwned",
                "message": "Password found in breach data."
            }]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.create_user(new_user()).await.unwrap_err();
    assert!(matches!(err, IdentityError::Validation { .. }));
}

#[tokio::test]
async fn list_users_by_email_queries_the_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("email_address", "ana@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "idn_1", "first_name": "Ana"}
        ])))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let users = provider.list_users_by_email("ana@example.com").await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "idn_1");
}

#[tokio::test]
async fn get_missing_user_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/idn_gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"code": "resource_not_found", "message": "not found"}]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.get_user("idn_gone").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn set_blocked_patches_public_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/users/idn_1/metadata"))
        .and(body_partial_json(json!({"public_metadata": {"blocked": true}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "idn_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    provider.set_blocked("idn_1", true).await.unwrap();
}

#[tokio::test]
async fn email_promotion_marks_verified_and_primary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/email_addresses"))
        .and(body_partial_json(json!({
            "user_id": "idn_1",
            "email_address": "nueva@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ema_2",
            "email_address": "nueva@example.com"
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/email_addresses/ema_2"))
        .and(body_partial_json(json!({"verified": true, "primary": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ema_2"})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let created = provider
        .create_email_address("idn_1", "nueva@example.com")
        .await
        .unwrap();
    assert_eq!(created.id, "ema_2");
    provider.promote_email_address("ema_2").await.unwrap();
}

#[tokio::test]
async fn delete_user_succeeds_on_2xx() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/idn_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "idn_1", "deleted": true
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    provider.delete_user("idn_1").await.unwrap();
}

#[tokio::test]
async fn server_error_keeps_provider_status() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/idn_1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.delete_user("idn_1").await.unwrap_err();
    match err {
        IdentityError::Provider { status, .. } => assert_eq!(status, 503),
        other => panic!("expected Provider, got {other:?}"),
    }
}
