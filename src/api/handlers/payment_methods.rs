use crate::api::SharedService;
use crate::api::extract::ApiJson;
use crate::api::models::{ApiError, DetailResponse, ErrorResponse};
use crate::core::models::payment_method::{PaymentMethod, PaymentMethodInput, PaymentMethodUpdate};
use crate::core::models::user::User;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/payment-methods",
    responses(
        (status = 200, description = "Payment methods of the user", body = Vec<PaymentMethod>)
    ),
    security(("Bearer" = []))
)]
pub async fn list_payment_methods(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<PaymentMethod>>, ApiError> {
    Ok(Json(service.list_payment_methods(&user.id).await?))
}

#[utoipa::path(
    post,
    path = "/payment-methods",
    request_body = PaymentMethodInput,
    responses(
        (status = 201, description = "Payment method created", body = PaymentMethod),
        (status = 400, description = "Duplicate name", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_payment_method(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiJson(req): ApiJson<PaymentMethodInput>,
) -> Result<(StatusCode, Json<PaymentMethod>), ApiError> {
    let method = service.create_payment_method(&user.id, req).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

#[utoipa::path(
    get,
    path = "/payment-methods/{method_id}",
    params(
        ("method_id" = String, Path, description = "ID of the payment method")
    ),
    responses(
        (status = 200, description = "Payment method", body = PaymentMethod),
        (status = 404, description = "Payment method not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_payment_method(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(method_id): Path<String>,
) -> Result<Json<PaymentMethod>, ApiError> {
    Ok(Json(service.get_payment_method(&user.id, &method_id).await?))
}

#[utoipa::path(
    put,
    path = "/payment-methods/{method_id}",
    request_body = PaymentMethodUpdate,
    params(
        ("method_id" = String, Path, description = "ID of the payment method")
    ),
    responses(
        (status = 200, description = "Payment method updated", body = PaymentMethod),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Payment method not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_payment_method(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(method_id): Path<String>,
    ApiJson(req): ApiJson<PaymentMethodUpdate>,
) -> Result<Json<PaymentMethod>, ApiError> {
    let method = service.update_payment_method(&user.id, &method_id, req).await?;
    Ok(Json(method))
}

#[utoipa::path(
    delete,
    path = "/payment-methods/{method_id}",
    params(
        ("method_id" = String, Path, description = "ID of the payment method")
    ),
    responses(
        (status = 200, description = "Payment method deleted", body = DetailResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Payment method not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_payment_method(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(method_id): Path<String>,
) -> Result<Json<DetailResponse>, ApiError> {
    service.delete_payment_method(&user.id, &method_id).await?;
    Ok(DetailResponse::new("Payment method deleted"))
}
