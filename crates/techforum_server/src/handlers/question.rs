//! Question HTTP handlers.

use super::{ApiJson, ApiResponse, VoteRequest};
use crate::auth::{AuthUser, OptionalUser};
use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use techforum_core::db::TransactionOps;
use techforum_core::listing::{ListingParams, ListingQuery};
use techforum_core::models::question::{
    CreateQuestionRequest, QuestionDetail, QuestionSummary, UpdateQuestionRequest,
};
use techforum_core::models::{Question, VoteType};
use techforum_core::pagination::Paginated;
use techforum_core::validation::{validate_create_question, validate_update_question};
use techforum_core::voting::VoteOutcome;

/// List questions with search, filters, sorting and paging.
///
/// # Returns
/// One page of questions with answer counts and category briefs.
///
/// # Errors
/// Returns an error if storage access fails.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ApiResponse<Vec<QuestionSummary>>>, HttpError> {
    let query = ListingQuery::build(&params);
    let page = params.page_request();
    let (rows, total) = state.db.questions.listing(&query, &page)?;
    Ok(Json(ApiResponse::page(Paginated::new(
        rows,
        page.page_for(total),
    ))))
}

/// Fetch one question with its answers, counting the view.
///
/// # Errors
/// Returns 404 when the question does not exist.
pub async fn get_question(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<QuestionDetail>>, HttpError> {
    let viewer_id = viewer.as_ref().map(|actor| actor.id.as_str());
    let detail = state
        .db
        .questions
        .view(&id, viewer_id)?
        .ok_or(AppError::NotFound("Question"))?;
    Ok(Json(ApiResponse::data(detail)))
}

/// Ask a question.
///
/// # Returns
/// `201 Created` with the stored question.
///
/// # Errors
/// Returns 400 on invalid fields or an unknown category.
pub async fn create_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(req): ApiJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Question>>), HttpError> {
    validate_create_question(&req)?;
    let question = Question::new(
        req.title.trim().to_string(),
        req.content,
        actor.id,
        req.category_id.trim().to_string(),
        req.tags,
    );
    TransactionOps::create_question(&state.db, &question)?;
    tracing::info!("Question {} created by {}", question.id, question.user_id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Question created successfully",
            question,
        )),
    ))
}

/// Edit a question (owner or staff; pin/lock staff only).
///
/// # Errors
/// Returns 400/403/404 as the checks fail.
pub async fn update_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateQuestionRequest>,
) -> Result<Json<ApiResponse<Question>>, HttpError> {
    validate_update_question(&req)?;
    let question = TransactionOps::update_question(&state.db, &actor, &id, &req)?;
    Ok(Json(ApiResponse::with_message(
        "Question updated successfully",
        question,
    )))
}

/// Delete a question and all of its answers.
pub async fn delete_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, HttpError> {
    TransactionOps::delete_question(&state.db, &actor, &id)?;
    Ok(Json(ApiResponse::message("Question deleted successfully")))
}

/// Toggle the caller's vote on a question.
///
/// # Errors
/// - 400 for a vote type other than `upvote`/`downvote`.
/// - 403 when voting on one's own question.
/// - 404 when the question does not exist.
pub async fn vote_question(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<VoteRequest>,
) -> Result<Json<ApiResponse<VoteOutcome>>, HttpError> {
    let vote_type: VoteType = req.vote_type.parse()?;
    let outcome = state.db.questions.vote(&id, &actor.id, vote_type)?;
    Ok(Json(ApiResponse::with_message(
        "Vote recorded successfully",
        outcome,
    )))
}
