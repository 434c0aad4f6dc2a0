use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub secret_key: String,
    pub jwt_algorithm: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
    pub bcrypt_cost: u32,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub plaid_client_id: String,
    pub plaid_secret: String,
    /// `sandbox`, `development` or `production`
    pub plaid_env: String,
    pub google_client_id: Option<String>,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("secret_key", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("refresh_token_expire_days", &self.refresh_token_expire_days)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_model", &self.openai_model)
            .field("plaid_client_id", &"<redacted>")
            .field("plaid_secret", &"<redacted>")
            .field("plaid_env", &self.plaid_env)
            .field("google_client_id", &self.google_client_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: parsed_or("PORT", 3000),
            log_level: var_or("LOG_LEVEL", "info"),
            secret_key: var_or("SECRET_KEY", "secret"), // Use a secure secret in production
            jwt_algorithm: var_or("JWT_ALGORITHM", "HS256"),
            access_token_expire_minutes: parsed_or("ACCESS_TOKEN_EXPIRE_MINUTES", 30),
            refresh_token_expire_days: parsed_or("REFRESH_TOKEN_EXPIRE_DAYS", 7),
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_model: var_or("OPENAI_MODEL", "gpt-4-turbo"),
            plaid_client_id: var_or("PLAID_CLIENT_ID", ""),
            plaid_secret: var_or("PLAID_SECRET", ""),
            plaid_env: var_or("PLAID_ENV", "sandbox"),
            google_client_id: optional("GOOGLE_CLIENT_ID"),
            request_timeout_secs: parsed_or("REQUEST_TIMEOUT_SECS", 30),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
