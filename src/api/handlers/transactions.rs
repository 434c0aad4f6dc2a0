use crate::api::SharedService;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::models::{ApiError, ErrorResponse, MessageResponse, TransactionListQuery};
use crate::core::models::transaction::{PaginatedTransactions, Transaction, TransactionInput};
use crate::core::models::user::User;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/transactions",
    request_body = TransactionInput,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 422, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_transaction(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiJson(req): ApiJson<TransactionInput>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = service.create_transaction(&user.id, req).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/transactions/all",
    params(TransactionListQuery),
    responses(
        (status = 200, description = "Page of manual and bank transactions", body = PaginatedTransactions),
        (status = 422, description = "Invalid paging", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_transactions(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<TransactionListQuery>,
) -> Result<Json<PaginatedTransactions>, ApiError> {
    let page = service
        .list_transactions(
            &user.id,
            query.source_filter,
            query.transaction_type,
            query.limit,
            query.offset,
        )
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}",
    params(
        ("transaction_id" = String, Path, description = "ID of the transaction")
    ),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_transaction(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = service.get_transaction(&user.id, &transaction_id).await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    put,
    path = "/transactions/{transaction_id}",
    request_body = TransactionInput,
    params(
        ("transaction_id" = String, Path, description = "ID of the transaction")
    ),
    responses(
        (status = 200, description = "Transaction replaced", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_transaction(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<String>,
    ApiJson(req): ApiJson<TransactionInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.update_transaction(&user.id, &transaction_id, req).await?;
    Ok(MessageResponse::new("Transaction updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/transactions/{transaction_id}",
    params(
        ("transaction_id" = String, Path, description = "ID of the transaction")
    ),
    responses(
        (status = 200, description = "Transaction deleted", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_transaction(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_transaction(&user.id, &transaction_id).await?;
    Ok(MessageResponse::new("Transaction deleted successfully"))
}
