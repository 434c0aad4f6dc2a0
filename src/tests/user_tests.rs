use crate::core::errors::FinanceError;
use crate::core::models::refresh_token::RefreshToken;
use crate::infrastructure::google::GoogleIdentity;
use crate::infrastructure::storage::Storage;
use crate::tests::{
    FakeGoogle, PASSWORD, create_test_service, create_test_service_with, register_user, registration,
    test_integrations,
};
use chrono::{TimeDelta, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

fn google_identity(sub: &str, email: &str, names: bool) -> GoogleIdentity {
    GoogleIdentity {
        sub: Some(sub.to_string()),
        email: Some(email.to_string()),
        given_name: names.then(|| "Grace".to_string()),
        family_name: names.then(|| "Hopper".to_string()),
        aud: None,
        iss: Some("accounts.google.com".to_string()),
    }
}

#[tokio::test]
async fn test_register_user() {
    let service = create_test_service();
    let user = service.register(registration("  Ada@Example.com ")).await.unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.balance, Decimal::from(100));
    assert_eq!(user.opening_balance, Decimal::from(100));
    assert!(user.hashed_password.is_some());
    assert_ne!(user.hashed_password.as_deref(), Some(PASSWORD));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let service = create_test_service();
    register_user(&service, "ada@example.com").await;
    let result = service.register(registration("ADA@example.com")).await;
    assert!(matches!(result, Err(FinanceError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_register_invalid_input() {
    let service = create_test_service();

    for email in ["invalid", "@example.com", "ada@", "ada@@example.com", "ada lovelace@example.com"] {
        let result = service.register(registration(email)).await;
        assert!(matches!(result, Err(FinanceError::InvalidEmail(_))), "{email} was accepted");
    }

    let mut rich = registration("ada@example.com");
    rich.initial_balance = Some(Decimal::from_str("50000000000000000000000000000").unwrap());
    let result = service.register(rich).await;
    assert!(matches!(result, Err(FinanceError::InvalidInput(field, _)) if field == "initial_balance"));

    let mut no_password = registration("ada@example.com");
    no_password.password = String::new();
    assert!(matches!(service.register(no_password).await, Err(FinanceError::BadRequest(_))));

    let mut no_name = registration("ada@example.com");
    no_name.last_name = "   ".to_string();
    assert!(matches!(service.register(no_name).await, Err(FinanceError::BadRequest(_))));
}

#[tokio::test]
async fn test_login_issues_tokens() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;

    let tokens = service.login("ADA@example.com", PASSWORD).await.unwrap();
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(tokens.refresh_token.len(), 86);

    let authenticated = service.authenticate(&tokens.access_token).await.unwrap();
    assert_eq!(authenticated.id, user.id);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let service = create_test_service();
    register_user(&service, "ada@example.com").await;

    let result = service.login("ada@example.com", "wrong-password").await;
    assert!(matches!(result, Err(FinanceError::InvalidCredentials)));
    let result = service.login("nobody@example.com", PASSWORD).await;
    assert!(matches!(result, Err(FinanceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let service = create_test_service();
    register_user(&service, "ada@example.com").await;
    let tokens = service.login("ada@example.com", PASSWORD).await.unwrap();

    let rotated = service.refresh(&tokens.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, tokens.refresh_token);

    let reused = service.refresh(&tokens.refresh_token).await;
    assert!(matches!(reused, Err(FinanceError::Unauthorized(msg)) if msg == "Invalid refresh token"));
    assert!(service.refresh(&rotated.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_refresh_expired_token_is_deleted() {
    let (service, storage) = create_test_service_with(test_integrations());
    let user = register_user(&service, "ada@example.com").await;
    let now = Utc::now();
    storage
        .save_refresh_token(RefreshToken {
            id: "rt1".to_string(),
            user_id: user.id.clone(),
            token: "stale".to_string(),
            created_at: now - TimeDelta::days(10),
            expires_at: now - TimeDelta::days(3),
        })
        .await
        .unwrap();

    let result = service.refresh("stale").await;
    assert!(matches!(result, Err(FinanceError::Unauthorized(msg)) if msg == "Refresh token expired"));
    assert!(storage.get_refresh_token("stale").await.unwrap().is_none());
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let service = create_test_service();
    let result = service.refresh("").await;
    assert!(matches!(result, Err(FinanceError::BadRequest(msg)) if msg == "Refresh token required"));
}

#[tokio::test]
async fn test_logout_and_logout_all() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;
    let first = service.login("ada@example.com", PASSWORD).await.unwrap();
    let second = service.login("ada@example.com", PASSWORD).await.unwrap();
    let third = service.login("ada@example.com", PASSWORD).await.unwrap();

    service.logout(&first.refresh_token).await.unwrap();
    assert!(service.refresh(&first.refresh_token).await.is_err());

    assert_eq!(service.logout_all(&user.id).await.unwrap(), 2);
    assert!(service.refresh(&second.refresh_token).await.is_err());
    assert!(service.refresh(&third.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_logout_rejects_unknown_token() {
    let service = create_test_service();
    register_user(&service, "ada@example.com").await;
    let tokens = service.login("ada@example.com", PASSWORD).await.unwrap();

    let unknown = service.logout("not-a-real-token").await;
    assert!(matches!(unknown, Err(FinanceError::Unauthorized(msg)) if msg == "Invalid refresh token"));

    service.logout(&tokens.refresh_token).await.unwrap();
    let again = service.logout(&tokens.refresh_token).await;
    assert!(matches!(again, Err(FinanceError::Unauthorized(msg)) if msg == "Invalid refresh token"));
}

#[tokio::test]
async fn test_logout_expired_token_is_deleted() {
    let (service, storage) = create_test_service_with(test_integrations());
    let user = register_user(&service, "ada@example.com").await;
    let now = Utc::now();
    storage
        .save_refresh_token(RefreshToken {
            id: "rt2".to_string(),
            user_id: user.id.clone(),
            token: "stale".to_string(),
            created_at: now - TimeDelta::days(10),
            expires_at: now - TimeDelta::days(3),
        })
        .await
        .unwrap();

    let result = service.logout("stale").await;
    assert!(matches!(result, Err(FinanceError::Unauthorized(msg)) if msg == "Refresh token expired"));
    assert!(storage.get_refresh_token("stale").await.unwrap().is_none());
}

#[tokio::test]
async fn test_authenticate_rejects_deleted_user() {
    let service = create_test_service();
    let user = register_user(&service, "ada@example.com").await;
    let tokens = service.login("ada@example.com", PASSWORD).await.unwrap();
    service.delete_account(&user).await.unwrap();

    let result = service.authenticate(&tokens.access_token).await;
    assert!(matches!(result, Err(FinanceError::Unauthorized(msg)) if msg == "User not found"));
}

#[tokio::test]
async fn test_google_login_creates_and_reuses_user() {
    let mut google = FakeGoogle::default();
    google
        .identities
        .insert("good".to_string(), google_identity("g-1", "Grace@Example.com", true));
    let mut integrations = test_integrations();
    integrations.google = Arc::new(google);
    let (service, storage) = create_test_service_with(integrations);

    let tokens = service.google_login("good").await.unwrap();
    let user = service.authenticate(&tokens.access_token).await.unwrap();
    assert_eq!(user.email, "grace@example.com");
    assert_eq!(user.google_id.as_deref(), Some("g-1"));
    assert!(user.hashed_password.is_none());

    let again = service.google_login("good").await.unwrap();
    assert_eq!(service.authenticate(&again.access_token).await.unwrap().id, user.id);
    assert!(storage.get_user_by_google_id("g-1").await.unwrap().is_some());

    // no password to log in with
    let result = service.login("grace@example.com", PASSWORD).await;
    assert!(matches!(result, Err(FinanceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_google_login_errors() {
    let identities = HashMap::from([
        ("nameless".to_string(), google_identity("g-2", "new@example.com", false)),
        ("taken".to_string(), google_identity("g-3", "ada@example.com", true)),
        (
            "no-email".to_string(),
            GoogleIdentity {
                email: None,
                ..google_identity("g-4", "x@example.com", true)
            },
        ),
    ]);
    let mut integrations = test_integrations();
    integrations.google = Arc::new(FakeGoogle { identities });
    let (service, _) = create_test_service_with(integrations);
    register_user(&service, "ada@example.com").await;

    assert!(matches!(service.google_login(" ").await, Err(FinanceError::BadRequest(msg)) if msg == "id_token required"));
    assert!(matches!(service.google_login("forged").await, Err(FinanceError::Unauthorized(_))));
    assert!(matches!(service.google_login("no-email").await, Err(FinanceError::BadRequest(_))));
    assert!(matches!(service.google_login("taken").await, Err(FinanceError::Conflict(_))));
    assert!(matches!(
        service.google_login("nameless").await,
        Err(FinanceError::BadRequest(msg)) if msg == "Google profile must include first and last name"
    ));
}
