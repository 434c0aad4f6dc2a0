use super::{FinanceService, clean};
use crate::auth::jwt::generate_refresh_token;
use crate::core::errors::FinanceError;
use crate::core::models::refresh_token::{RefreshToken, TokenResponse};
use crate::core::models::user::{Registration, User};
use crate::core::money::{MAX_AMOUNT, max_amount};
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

const NAME_MAX_LENGTH: usize = 100;

impl<S: Storage> FinanceService<S> {
    pub async fn register(&self, registration: Registration) -> Result<User, FinanceError> {
        let email = registration.email.trim().to_lowercase();
        self.validate_email(&email)?;
        if registration.password.is_empty() {
            return Err(FinanceError::BadRequest("Password cannot be empty".to_string()));
        }
        let first_name = registration.first_name.trim().to_string();
        let last_name = registration.last_name.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(FinanceError::BadRequest("First and last name are required".to_string()));
        }
        self.validate_string_input("first_name", &first_name, NAME_MAX_LENGTH)?;
        self.validate_string_input("last_name", &last_name, NAME_MAX_LENGTH)?;

        if self.storage.get_user_by_email(&email).await?.is_some() {
            return Err(FinanceError::EmailAlreadyRegistered(email));
        }

        let opening_balance = registration.initial_balance.unwrap_or(Decimal::ZERO);
        if opening_balance.abs() > max_amount() {
            return Err(FinanceError::invalid_input(
                "initial_balance",
                format!("initial_balance cannot exceed {} in magnitude", MAX_AMOUNT),
            ));
        }
        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            first_name,
            last_name,
            birth_date: registration.birth_date,
            hashed_password: Some(self.hasher.hash(&registration.password)?),
            google_id: None,
            created_at: Utc::now(),
            opening_balance,
            balance: opening_balance,
        };
        self.storage.create_user(user.clone()).await?;
        tracing::info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, FinanceError> {
        let email = email.trim().to_lowercase();
        let user = self
            .storage
            .get_user_by_email(&email)
            .await?
            .ok_or(FinanceError::InvalidCredentials)?;

        // Google-only accounts have no password to match
        let hashed = user.hashed_password.as_deref().ok_or(FinanceError::InvalidCredentials)?;
        if !self.hasher.verify(password, hashed) {
            tracing::warn!("Failed login attempt for {}", email);
            return Err(FinanceError::InvalidCredentials);
        }
        tracing::info!("User {} logged in", user.id);
        self.issue_tokens(&user.id).await
    }

    pub async fn google_login(&self, id_token: &str) -> Result<TokenResponse, FinanceError> {
        if id_token.trim().is_empty() {
            return Err(FinanceError::BadRequest("id_token required".to_string()));
        }
        let identity = self.integrations.google.verify(id_token).await?;
        let (Some(email), Some(google_id)) = (clean(identity.email), clean(identity.sub)) else {
            return Err(FinanceError::BadRequest(
                "Invalid Google token: missing required fields (email or sub).".to_string(),
            ));
        };
        let email = email.to_lowercase();

        let user = match self.storage.get_user_by_google_id(&google_id).await? {
            Some(user) => user,
            None => match self.storage.get_user_by_email(&email).await? {
                Some(user) if user.google_id.is_none() => {
                    return Err(FinanceError::Conflict(
                        "User with this email already exists. Use email/password login.".to_string(),
                    ));
                }
                Some(mut user) => {
                    user.google_id = Some(google_id);
                    self.storage.update_user(user.clone()).await?;
                    user
                }
                None => {
                    let (Some(first_name), Some(last_name)) = (clean(identity.given_name), clean(identity.family_name))
                    else {
                        return Err(FinanceError::BadRequest(
                            "Google profile must include first and last name".to_string(),
                        ));
                    };
                    let user = User {
                        id: Uuid::new_v4().to_string(),
                        email,
                        first_name,
                        last_name,
                        birth_date: None,
                        hashed_password: None,
                        google_id: Some(google_id),
                        created_at: Utc::now(),
                        opening_balance: Decimal::ZERO,
                        balance: Decimal::ZERO,
                    };
                    self.storage.create_user(user.clone()).await?;
                    tracing::info!("Registered Google user {} ({})", user.id, user.email);
                    user
                }
            },
        };
        self.issue_tokens(&user.id).await
    }

    /// Rotates a refresh token: the presented token is consumed and a new
    /// access/refresh pair is issued.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, FinanceError> {
        let stored = self.consume_refresh_token(refresh_token).await?;
        self.issue_tokens(&stored.user_id).await
    }

    /// Looks up and deletes a refresh token. Expired tokens are deleted too
    /// but reported as unauthorized.
    async fn consume_refresh_token(&self, refresh_token: &str) -> Result<RefreshToken, FinanceError> {
        if refresh_token.is_empty() {
            return Err(FinanceError::BadRequest("Refresh token required".to_string()));
        }
        let stored = self
            .storage
            .get_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| FinanceError::Unauthorized("Invalid refresh token".to_string()))?;

        self.storage.delete_refresh_token(refresh_token).await?;
        if stored.is_expired(Utc::now()) {
            tracing::debug!("Expired refresh token presented by user {}", stored.user_id);
            return Err(FinanceError::Unauthorized("Refresh token expired".to_string()));
        }
        Ok(stored)
    }

    /// Revokes a single refresh token. Unknown and expired tokens are
    /// rejected the same way `refresh` rejects them.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), FinanceError> {
        let stored = self.consume_refresh_token(refresh_token).await?;
        tracing::info!("Refresh token of user {} revoked", stored.user_id);
        Ok(())
    }

    pub async fn logout_all(&self, user_id: &str) -> Result<usize, FinanceError> {
        let removed = self.storage.delete_user_refresh_tokens(user_id).await?;
        tracing::info!("Revoked {} refresh tokens of user {}", removed, user_id);
        Ok(removed)
    }

    /// Resolves a bearer access token to its user.
    pub async fn authenticate(&self, access_token: &str) -> Result<User, FinanceError> {
        let claims = self.validate_token(access_token)?;
        self.storage
            .get_user(&claims.sub)
            .await?
            .ok_or_else(|| FinanceError::Unauthorized("User not found".to_string()))
    }

    async fn issue_tokens(&self, user_id: &str) -> Result<TokenResponse, FinanceError> {
        let access_token = self.jwt_service.generate_token(user_id)?;
        let now = Utc::now();
        let refresh = RefreshToken {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            token: generate_refresh_token(),
            created_at: now,
            expires_at: now + self.jwt_service.refresh_ttl(),
        };
        let refresh_token = refresh.token.clone();
        self.storage.save_refresh_token(refresh).await?;
        Ok(TokenResponse {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        })
    }
}
