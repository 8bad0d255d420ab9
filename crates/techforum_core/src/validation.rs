//! Field rules for question, answer and category payloads.

use crate::error::AppError;
use crate::models::answer::{CreateAnswerRequest, UpdateAnswerRequest};
use crate::models::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::models::question::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::text::char_len;

const TITLE_MIN: usize = 10;
const TITLE_MAX: usize = 200;
const QUESTION_CONTENT_MIN: usize = 20;
const TAGS_MAX: usize = 5;
const TAG_LEN_MAX: usize = 20;
const ANSWER_CONTENT_MIN: usize = 10;
const CATEGORY_NAME_MIN: usize = 2;
const CATEGORY_NAME_MAX: usize = 50;
const CATEGORY_DESCRIPTION_MIN: usize = 10;
const CATEGORY_DESCRIPTION_MAX: usize = 200;

fn bad(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

fn check_len(value: &str, min: usize, max: usize, message: &str) -> Result<(), AppError> {
    let len = char_len(value.trim());
    if len < min || len > max {
        return Err(bad(message));
    }
    Ok(())
}

fn check_title(title: &str) -> Result<(), AppError> {
    check_len(
        title,
        TITLE_MIN,
        TITLE_MAX,
        "Title must be between 10 and 200 characters",
    )
}

fn check_question_content(content: &str) -> Result<(), AppError> {
    check_len(
        content,
        QUESTION_CONTENT_MIN,
        usize::MAX,
        "Question content must be at least 20 characters long",
    )
}

fn check_tags(tags: &[String]) -> Result<(), AppError> {
    let present = tags.iter().filter(|tag| !tag.trim().is_empty()).count();
    if present == 0 || tags.len() > TAGS_MAX {
        return Err(bad("Must provide 1-5 tags"));
    }
    if tags.iter().any(|tag| char_len(tag.trim()) > TAG_LEN_MAX) {
        return Err(bad("Each tag must be a string with maximum 20 characters"));
    }
    Ok(())
}

/// `#RRGGBB`, either case.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn validate_create_question(request: &CreateQuestionRequest) -> Result<(), AppError> {
    check_title(&request.title)?;
    check_question_content(&request.content)?;
    if request.category_id.trim().is_empty() {
        return Err(bad("Category is required"));
    }
    check_tags(&request.tags)
}

/// Only the provided fields are checked.
pub fn validate_update_question(request: &UpdateQuestionRequest) -> Result<(), AppError> {
    if let Some(title) = &request.title {
        check_title(title)?;
    }
    if let Some(content) = &request.content {
        check_question_content(content)?;
    }
    if let Some(category_id) = &request.category_id {
        if category_id.trim().is_empty() {
            return Err(bad("Category is required"));
        }
    }
    if let Some(tags) = &request.tags {
        check_tags(tags)?;
    }
    Ok(())
}

pub fn validate_answer_content(content: &str) -> Result<(), AppError> {
    check_len(
        content,
        ANSWER_CONTENT_MIN,
        usize::MAX,
        "Answer content must be at least 10 characters long",
    )
}

pub fn validate_create_answer(request: &CreateAnswerRequest) -> Result<(), AppError> {
    if request.question_id.trim().is_empty() {
        return Err(bad("Question is required"));
    }
    validate_answer_content(&request.content)
}

pub fn validate_update_answer(request: &UpdateAnswerRequest) -> Result<(), AppError> {
    validate_answer_content(&request.content)
}

fn check_category_name(name: &str) -> Result<(), AppError> {
    check_len(
        name,
        CATEGORY_NAME_MIN,
        CATEGORY_NAME_MAX,
        "Category name must be between 2 and 50 characters",
    )
}

fn check_category_description(description: &str) -> Result<(), AppError> {
    check_len(
        description,
        CATEGORY_DESCRIPTION_MIN,
        CATEGORY_DESCRIPTION_MAX,
        "Description must be between 10 and 200 characters",
    )
}

fn check_color(color: &str) -> Result<(), AppError> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(bad("Color must be a valid hex color code"))
    }
}

pub fn validate_create_category(request: &CreateCategoryRequest) -> Result<(), AppError> {
    check_category_name(&request.name)?;
    check_category_description(&request.description)?;
    check_color(&request.color)
}

pub fn validate_update_category(request: &UpdateCategoryRequest) -> Result<(), AppError> {
    if let Some(name) = &request.name {
        check_category_name(name)?;
    }
    if let Some(description) = &request.description {
        check_category_description(description)?;
    }
    if let Some(color) = &request.color {
        check_color(color)?;
    }
    Ok(())
}
