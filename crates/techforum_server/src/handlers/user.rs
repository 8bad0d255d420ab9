//! Per-user activity and question and answer listings.

use super::ApiResponse;
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use techforum_core::listing::ListingQuery;
use techforum_core::models::activity::UserActivity;
use techforum_core::models::question::QuestionSummary;
use techforum_core::models::Answer;
use techforum_core::pagination::{PageParams, Paginated};

/// Contribution counts plus the five newest questions and answers.
pub async fn user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserActivity>>, HttpError> {
    let activity = state.db.user_activity(&user_id)?;
    Ok(Json(ApiResponse::data(activity)))
}

/// Questions asked by a user, newest first.
pub async fn user_questions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<ApiResponse<Vec<QuestionSummary>>>, HttpError> {
    let page = params.to_request();
    let (rows, total) = state
        .db
        .questions
        .listing(&ListingQuery::by_author(user_id), &page)?;
    Ok(Json(ApiResponse::page(Paginated::new(
        rows,
        page.page_for(total),
    ))))
}

/// Answers written by a user, newest first.
pub async fn user_answers(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<ApiResponse<Vec<Answer>>>, HttpError> {
    let page = params.to_request();
    let (rows, total) = state.db.answers.list_by_author(&user_id, &page)?;
    Ok(Json(ApiResponse::page(Paginated::new(
        rows,
        page.page_for(total),
    ))))
}
