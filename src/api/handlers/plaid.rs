use crate::api::SharedService;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::models::{
    AccountTypeQuery, ApiError, ErrorResponse, ExchangeTokenRequest, LinkTokenResponse, MessageResponse,
};
use crate::core::models::bank::{BankAccount, BankTransaction};
use crate::core::models::user::User;
use crate::core::services::bank::{ConnectionResponse, SyncResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;

#[utoipa::path(
    post,
    path = "/plaid/link-token",
    responses(
        (status = 200, description = "Link token for the client widget", body = LinkTokenResponse),
        (status = 500, description = "Plaid API error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_link_token(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<LinkTokenResponse>, ApiError> {
    let link_token = service.create_link_token(&user.id).await?;
    Ok(Json(LinkTokenResponse { link_token }))
}

#[utoipa::path(
    post,
    path = "/plaid/exchange-public-token",
    request_body = ExchangeTokenRequest,
    responses(
        (status = 200, description = "Bank connected", body = ConnectionResponse),
        (status = 400, description = "public_token required", body = ErrorResponse),
        (status = 500, description = "Plaid API error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn exchange_public_token(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiJson(req): ApiJson<ExchangeTokenRequest>,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let connection = service.connect_bank(&user.id, &req.public_token).await?;
    Ok(Json(connection))
}

#[utoipa::path(
    get,
    path = "/plaid/accounts",
    responses(
        (status = 200, description = "Newly stored bank accounts", body = Vec<BankAccount>),
        (status = 404, description = "No bank connections found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn sync_accounts(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<BankAccount>>, ApiError> {
    Ok(Json(service.sync_bank_accounts(&user.id).await?))
}

#[utoipa::path(
    get,
    path = "/plaid/transactions",
    params(AccountTypeQuery),
    responses(
        (status = 200, description = "Transactions imported from the last 30 days", body = Vec<BankTransaction>),
        (status = 400, description = "Connection missing, reconnect", body = ErrorResponse),
        (status = 404, description = "No bank accounts found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn import_transactions(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<AccountTypeQuery>,
) -> Result<Json<Vec<BankTransaction>>, ApiError> {
    let imported = service
        .import_bank_transactions(&user.id, query.account_type.as_deref(), Utc::now())
        .await?;
    Ok(Json(imported))
}

#[utoipa::path(
    get,
    path = "/plaid/transactions/sync-latest",
    responses(
        (status = 200, description = "Transactions imported from the last 3 days", body = SyncResponse),
        (status = 404, description = "No bank accounts found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn sync_latest(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<SyncResponse>, ApiError> {
    Ok(Json(service.sync_latest_transactions(&user.id, Utc::now()).await?))
}

#[utoipa::path(
    delete,
    path = "/plaid/connection/{connection_id}",
    params(
        ("connection_id" = String, Path, description = "ID of the bank connection")
    ),
    responses(
        (status = 200, description = "Connection, accounts and transactions deleted", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Bank connection not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_connection(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(connection_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_bank_connection(&user.id, &connection_id).await?;
    Ok(MessageResponse::new("Bank connection and related data deleted"))
}
