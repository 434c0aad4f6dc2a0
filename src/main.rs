use axum::Router;
use expense_tracker::api::{api_routes, openapi::ApiDoc};
use expense_tracker::auth::{jwt::JwtService, password::PasswordHasher};
use expense_tracker::config::CONFIG;
use expense_tracker::core::services::{FinanceService, Integrations};
use expense_tracker::infrastructure::{
    google::GoogleTokenInfoClient,
    http::http_client,
    openai::{AdviceProvider, OpenAiClient},
    plaid::client::{PlaidClient, PlaidEnvironment},
    storage::in_memory::InMemoryStorage,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&CONFIG.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!("Loaded configuration: {:?}", *CONFIG);

    // Outbound integrations share one HTTP client
    let http = http_client(CONFIG.request_timeout_secs)?;
    let plaid = PlaidClient::new(
        http.clone(),
        PlaidEnvironment::from_name(&CONFIG.plaid_env),
        CONFIG.plaid_client_id.clone(),
        CONFIG.plaid_secret.clone(),
    );
    let advice: Option<Arc<dyn AdviceProvider>> = match &CONFIG.openai_api_key {
        Some(key) => Some(Arc::new(OpenAiClient::new(
            http.clone(),
            key.clone(),
            CONFIG.openai_model.clone(),
        )?)),
        None => {
            tracing::warn!("OPENAI_API_KEY not set, /ai/tips will answer 503");
            None
        }
    };
    let google = GoogleTokenInfoClient::new(http, CONFIG.google_client_id.clone());

    let integrations = Integrations {
        bank: Arc::new(plaid),
        advice,
        google: Arc::new(google),
    };
    let jwt_service = JwtService::new(CONFIG.secret_key.clone())
        .with_algorithm(&CONFIG.jwt_algorithm)
        .with_ttls(CONFIG.access_token_expire_minutes, CONFIG.refresh_token_expire_days);
    let hasher = PasswordHasher::new(CONFIG.bcrypt_cost);

    let service = Arc::new(FinanceService::new(
        InMemoryStorage::new(),
        jwt_service,
        hasher,
        integrations,
    ));
    service.seed_default_categories().await?;

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes(service))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
