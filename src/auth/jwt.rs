use crate::core::errors::FinanceError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const REFRESH_TOKEN_BYTES: usize = 64;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: usize,  // Expiration timestamp
}

pub struct JwtService {
    secret: String,
    algorithm: Algorithm,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        JwtService {
            secret,
            algorithm: Algorithm::HS256,
            access_ttl: TimeDelta::minutes(30),
            refresh_ttl: TimeDelta::days(7),
        }
    }

    /// Selects the signing algorithm by name. Only the HMAC family works with
    /// a shared secret; anything else falls back to HS256.
    pub fn with_algorithm(mut self, name: &str) -> Self {
        self.algorithm = match Algorithm::from_str(name) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => {
                tracing::warn!("Unsupported JWT algorithm {}, using HS256", name);
                Algorithm::HS256
            }
        };
        self
    }

    pub fn with_ttls(mut self, access_minutes: i64, refresh_days: i64) -> Self {
        self.access_ttl = TimeDelta::minutes(access_minutes);
        self.refresh_ttl = TimeDelta::days(refresh_days);
        self
    }

    pub fn refresh_ttl(&self) -> TimeDelta {
        self.refresh_ttl
    }

    pub fn generate_token(&self, user_id: &str) -> Result<String, FinanceError> {
        let expiration = (Utc::now() + self.access_ttl).timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: usize::try_from(expiration)
                .map_err(|e| FinanceError::InternalServerError(format!("Time error: {}", e)))?,
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| FinanceError::InternalServerError(format!("JWT encoding error: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, FinanceError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(self.algorithm),
        )
        .map_err(|e| {
            tracing::debug!("Rejected access token: {}", e);
            FinanceError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(token_data.claims)
    }
}

/// Opaque URL-safe refresh token with 64 bytes of entropy.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
