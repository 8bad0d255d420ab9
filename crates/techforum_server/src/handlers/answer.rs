//! Answer HTTP handlers.

use super::{ApiJson, ApiResponse, VoteRequest};
use crate::auth::AuthUser;
use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use techforum_core::accept::AcceptOutcome;
use techforum_core::db::TransactionOps;
use techforum_core::models::answer::{CreateAnswerRequest, UpdateAnswerRequest};
use techforum_core::models::{Answer, VoteType};
use techforum_core::validation::{validate_create_answer, validate_update_answer};
use techforum_core::voting::VoteOutcome;

pub async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Answer>>, HttpError> {
    let answer = state
        .db
        .answers
        .get(&id)?
        .ok_or(AppError::NotFound("Answer"))?;
    Ok(Json(ApiResponse::data(answer)))
}

/// Answer a question.
///
/// # Returns
/// `201 Created` with the stored answer.
///
/// # Errors
/// - 400 for short content or a locked question.
/// - 404 when the question does not exist.
pub async fn create_answer(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(req): ApiJson<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Answer>>), HttpError> {
    validate_create_answer(&req)?;
    let answer = Answer::new(req.content, req.question_id.trim().to_string(), actor.id);
    TransactionOps::create_answer(&state.db, &answer)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Answer created successfully", answer)),
    ))
}

pub async fn update_answer(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateAnswerRequest>,
) -> Result<Json<ApiResponse<Answer>>, HttpError> {
    validate_update_answer(&req)?;
    let answer = TransactionOps::update_answer(&state.db, &actor, &id, &req.content)?;
    Ok(Json(ApiResponse::with_message(
        "Answer updated successfully",
        answer,
    )))
}

pub async fn delete_answer(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, HttpError> {
    TransactionOps::delete_answer(&state.db, &actor, &id)?;
    Ok(Json(ApiResponse::message("Answer deleted successfully")))
}

/// Toggle the caller's vote on an answer.
pub async fn vote_answer(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<VoteRequest>,
) -> Result<Json<ApiResponse<VoteOutcome>>, HttpError> {
    let vote_type: VoteType = req.vote_type.parse()?;
    let outcome = state.db.answers.vote(&id, &actor.id, vote_type)?;
    Ok(Json(ApiResponse::with_message(
        "Vote recorded successfully",
        outcome,
    )))
}

/// Toggle whether this answer is the accepted one for its question.
///
/// # Errors
/// Returns 403 unless the caller owns the question or is staff.
pub async fn accept_answer(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AcceptOutcome>>, HttpError> {
    let outcome = TransactionOps::toggle_accept(&state.db, &actor, &id)?;
    let message = if outcome.is_accepted {
        "Answer accepted successfully"
    } else {
        "Answer unaccepted successfully"
    };
    Ok(Json(ApiResponse::with_message(message, outcome)))
}
