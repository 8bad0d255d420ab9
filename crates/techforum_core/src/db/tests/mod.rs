//! Database integration tests.

use super::*;
use crate::error::AppError;
use crate::models::question::UpdateQuestionRequest;
use crate::models::*;
use crate::test_support::setup_temp_db;
use std::sync::{Arc, Barrier};
use std::thread;

fn setup_test_db() -> (Database, tempfile::TempDir) {
    setup_temp_db()
}

fn member(id: &str) -> Actor {
    Actor::new(id, Role::User)
}

fn make_category(db: &Database, name: &str) -> Category {
    db.categories
        .create(Category::new(
            name.to_string(),
            format!("Questions about {}", name),
            "#336791".to_string(),
            None,
        ))
        .unwrap()
}

fn make_question(db: &Database, owner: &str, category_id: &str, title: &str) -> Question {
    let question = Question::new(
        title.to_string(),
        "A sufficiently long body for a forum question.".to_string(),
        owner.to_string(),
        category_id.to_string(),
        vec!["rust".to_string()],
    );
    TransactionOps::create_question(db, &question).unwrap();
    question
}

fn make_answer(db: &Database, owner: &str, question_id: &str) -> Answer {
    let answer = Answer::new(
        "Here is an answer that is long enough.".to_string(),
        question_id.to_string(),
        owner.to_string(),
    );
    TransactionOps::create_answer(db, &answer).unwrap();
    answer
}

fn question_count(db: &Database, category_id: &str) -> u64 {
    db.categories.get(category_id).unwrap().unwrap().question_count
}

mod basic_ops;
mod listing;
