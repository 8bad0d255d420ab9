//! Category HTTP handlers.

use super::{ApiJson, ApiResponse};
use crate::auth::AuthUser;
use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use techforum_core::config::parse_env_flag;
use techforum_core::listing::{ListingParams, ListingQuery};
use techforum_core::models::category::{
    CategoryDetail, CategoryListQuery, CreateCategoryRequest, UpdateCategoryRequest,
};
use techforum_core::models::question::QuestionSummary;
use techforum_core::models::Category;
use techforum_core::pagination::Paginated;
use techforum_core::text::normalize_optional_nonempty;
use techforum_core::validation::{validate_create_category, validate_update_category};

/// List categories; inactive ones only with `includeInactive=true`.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<ApiResponse<Vec<Category>>>, HttpError> {
    let include_inactive = query
        .include_inactive
        .as_deref()
        .and_then(parse_env_flag)
        .unwrap_or(false);
    let categories = state.db.categories.list(include_inactive)?;
    Ok(Json(ApiResponse::data(categories)))
}

/// A category with its five most recent questions.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryDetail>>, HttpError> {
    let detail = state
        .db
        .categories
        .detail(&id)?
        .ok_or(AppError::NotFound("Category"))?;
    Ok(Json(ApiResponse::data(detail)))
}

/// Create a category (admin only).
///
/// # Returns
/// `201 Created` with the stored category.
///
/// # Errors
/// - 403 for non-admins.
/// - 400 for invalid fields, a duplicate name or an unknown parent.
pub async fn create_category(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), HttpError> {
    actor.require_admin()?;
    validate_create_category(&req)?;

    let parent_id = normalize_optional_nonempty(req.parent_id);
    if let Some(parent_id) = parent_id.as_deref() {
        if state.db.categories.get(parent_id)?.is_none() {
            return Err(AppError::BadRequest("Invalid parent category".to_string()).into());
        }
    }

    let mut category = Category::new(
        req.name.trim().to_string(),
        req.description.trim().to_string(),
        req.color,
        req.icon,
    );
    category.parent_id = parent_id;
    let category = state.db.categories.create(category)?;
    tracing::info!("Category '{}' created by {}", category.name, actor.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Category created successfully",
            category,
        )),
    ))
}

/// Update a category (admin only).
pub async fn update_category(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, HttpError> {
    actor.require_admin()?;
    validate_update_category(&req)?;
    let category = state
        .db
        .categories
        .update(&id, &req)?
        .ok_or(AppError::NotFound("Category"))?;
    Ok(Json(ApiResponse::with_message(
        "Category updated successfully",
        category,
    )))
}

/// Delete an empty category (admin only).
pub async fn delete_category(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, HttpError> {
    actor.require_admin()?;
    if !state.db.categories.delete(&id)? {
        return Err(AppError::NotFound("Category").into());
    }
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}

/// The question listing scoped to one category.
///
/// # Errors
/// Returns 404 when the category does not exist.
pub async fn category_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ApiResponse<Vec<QuestionSummary>>>, HttpError> {
    if state.db.categories.get(&id)?.is_none() {
        return Err(AppError::NotFound("Category").into());
    }
    let query = ListingQuery::build(&params).with_category(id);
    let page = params.page_request();
    let (rows, total) = state.db.questions.listing(&query, &page)?;
    Ok(Json(ApiResponse::page(Paginated::new(
        rows,
        page.page_for(total),
    ))))
}
