use crate::core::errors::FinanceError;
use async_trait::async_trait;
use serde::Deserialize;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Claims of a verified Google ID token.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GoogleIdentity {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub aud: Option<String>,
    pub iss: Option<String>,
}

#[async_trait]
pub trait GoogleTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, FinanceError>;
}

pub struct GoogleTokenInfoClient {
    http: reqwest::Client,
    client_id: Option<String>,
}

impl GoogleTokenInfoClient {
    pub fn new(http: reqwest::Client, client_id: Option<String>) -> Self {
        Self { http, client_id }
    }

    fn check_claims(&self, identity: &GoogleIdentity) -> Result<(), FinanceError> {
        if !identity.iss.as_deref().is_some_and(|iss| ISSUERS.contains(&iss)) {
            return Err(invalid_token());
        }
        if let Some(client_id) = &self.client_id {
            if identity.aud.as_deref() != Some(client_id.as_str()) {
                return Err(invalid_token());
            }
        }
        Ok(())
    }
}

fn invalid_token() -> FinanceError {
    FinanceError::Unauthorized("Invalid or expired Google ID token.".to_string())
}

#[async_trait]
impl GoogleTokenVerifier for GoogleTokenInfoClient {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, FinanceError> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| FinanceError::ServiceUnavailable(format!("Google token verification failed: {}", e)))?;

        // tokeninfo answers 400 for malformed, expired or forged tokens
        if !response.status().is_success() {
            tracing::debug!("Google rejected ID token with status {}", response.status());
            return Err(invalid_token());
        }

        let identity = response.json::<GoogleIdentity>().await.map_err(|_| invalid_token())?;
        self.check_claims(&identity)?;
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(aud: &str, iss: &str) -> GoogleIdentity {
        GoogleIdentity {
            sub: Some("123".to_string()),
            email: Some("a@example.com".to_string()),
            aud: Some(aud.to_string()),
            iss: Some(iss.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn audience_checked_when_configured() {
        let client = GoogleTokenInfoClient::new(reqwest::Client::new(), Some("my-app".to_string()));
        assert!(client.check_claims(&identity("my-app", "accounts.google.com")).is_ok());
        assert!(client.check_claims(&identity("other-app", "accounts.google.com")).is_err());
    }

    #[test]
    fn issuer_must_be_google() {
        let client = GoogleTokenInfoClient::new(reqwest::Client::new(), None);
        assert!(client.check_claims(&identity("x", "https://accounts.google.com")).is_ok());
        assert!(client.check_claims(&identity("x", "evil.example.com")).is_err());
    }
}
