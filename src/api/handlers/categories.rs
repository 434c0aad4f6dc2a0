use crate::api::SharedService;
use crate::api::extract::ApiJson;
use crate::api::models::{ApiError, DetailResponse, ErrorResponse};
use crate::core::models::category::{Category, CategoryInput, CategoryUpdate};
use crate::core::models::user::User;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Default and user categories", body = Vec<Category>)
    ),
    security(("Bearer" = []))
)]
pub async fn list_categories(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = service.list_categories(&user.id).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Duplicate name", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_category(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiJson(req): ApiJson<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = service.create_category(&user.id, req).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/categories/{category_id}",
    params(
        ("category_id" = String, Path, description = "ID of the category")
    ),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_category(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(category_id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let category = service.get_category(&user.id, &category_id).await?;
    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/categories/{category_id}",
    request_body = CategoryUpdate,
    params(
        ("category_id" = String, Path, description = "ID of the category")
    ),
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_category(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(category_id): Path<String>,
    ApiJson(req): ApiJson<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    let category = service.update_category(&user.id, &category_id, req).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/categories/{category_id}",
    params(
        ("category_id" = String, Path, description = "ID of the category")
    ),
    responses(
        (status = 200, description = "Category deleted, transactions moved to Uncategorized", body = DetailResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_category(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(category_id): Path<String>,
) -> Result<Json<DetailResponse>, ApiError> {
    service.delete_category(&user.id, &category_id).await?;
    Ok(DetailResponse::new("Category deleted successfully"))
}
