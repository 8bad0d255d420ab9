//! CRUD and counter bookkeeping.

use super::*;

#[test]
fn create_question_bumps_category_count() {
    let (db, _temp) = setup_test_db();
    let category = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &category.id, "How do lifetimes work?");

    assert_eq!(question_count(&db, &category.id), 1);
    let stored = db.questions.get(&question.id).unwrap().unwrap();
    assert_eq!(stored, question);
}

#[test]
fn create_question_with_unknown_category_is_rejected() {
    let (db, _temp) = setup_test_db();
    let question = Question::new(
        "Orphaned question title".to_string(),
        "Body that should never reach the table.".to_string(),
        "alice".to_string(),
        "cat_missing".to_string(),
        vec!["rust".to_string()],
    );
    let err = TransactionOps::create_question(&db, &question).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid category"));
    assert!(db.questions.get(&question.id).unwrap().is_none());
}

#[test]
fn duplicate_ids_are_rejected_without_touching_counts() {
    let (db, _temp) = setup_test_db();
    let category = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &category.id, "Asked exactly once");

    let err = TransactionOps::create_question(&db, &question).unwrap_err();
    assert!(matches!(err, AppError::StorageMessage(_)));
    assert_eq!(question_count(&db, &category.id), 1);

    let answer = make_answer(&db, "bob", &question.id);
    let err = TransactionOps::create_answer(&db, &answer).unwrap_err();
    assert!(matches!(err, AppError::StorageMessage(_)));
    let stored = db.questions.get(&question.id).unwrap().unwrap();
    assert_eq!(stored.answers, vec![answer.id]);
}

#[test]
fn moving_category_moves_count() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let go = make_category(&db, "Go");
    let question = make_question(&db, "alice", &rust.id, "Which runtime should I use?");

    let update = UpdateQuestionRequest {
        category_id: Some(go.id.clone()),
        title: Some("Which async runtime should I use?".to_string()),
        ..UpdateQuestionRequest::default()
    };
    let updated = TransactionOps::update_question(&db, &member("alice"), &question.id, &update)
        .unwrap();

    assert_eq!(updated.category_id, go.id);
    assert_eq!(updated.title, "Which async runtime should I use?");
    assert_eq!(question_count(&db, &rust.id), 0);
    assert_eq!(question_count(&db, &go.id), 1);
}

#[test]
fn failed_move_leaves_counts_untouched() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &rust.id, "Which runtime should I use?");

    let update = UpdateQuestionRequest {
        category_id: Some("cat_missing".to_string()),
        ..UpdateQuestionRequest::default()
    };
    let err = TransactionOps::update_question(&db, &member("alice"), &question.id, &update)
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(question_count(&db, &rust.id), 1);
}

#[test]
fn only_staff_may_pin_or_lock() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &rust.id, "Pinned question candidate");
    let update = UpdateQuestionRequest {
        is_pinned: Some(true),
        ..UpdateQuestionRequest::default()
    };

    let err = TransactionOps::update_question(&db, &member("alice"), &question.id, &update)
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let moderator = Actor::new("mod", Role::Moderator);
    let pinned = TransactionOps::update_question(&db, &moderator, &question.id, &update).unwrap();
    assert!(pinned.is_pinned);
}

#[test]
fn strangers_cannot_edit_or_delete() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &rust.id, "Someone else's question");
    let answer = make_answer(&db, "bob", &question.id);

    let err = TransactionOps::delete_question(&db, &member("mallory"), &question.id).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let err = TransactionOps::update_answer(&db, &member("mallory"), &answer.id, "Hijacked content")
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(db.questions.get(&question.id).unwrap().is_some());
}

#[test]
fn delete_question_cascades_answers_and_count() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &rust.id, "Question with answers");
    let first = make_answer(&db, "bob", &question.id);
    let second = make_answer(&db, "carol", &question.id);
    let other = make_question(&db, "alice", &rust.id, "Unrelated question");
    let kept = make_answer(&db, "bob", &other.id);

    let removed = TransactionOps::delete_question(&db, &member("alice"), &question.id).unwrap();
    assert_eq!(removed, 2);
    assert!(db.questions.get(&question.id).unwrap().is_none());
    assert!(db.answers.get(&first.id).unwrap().is_none());
    assert!(db.answers.get(&second.id).unwrap().is_none());
    assert!(db.answers.get(&kept.id).unwrap().is_some());
    assert_eq!(question_count(&db, &rust.id), 1);
}

#[test]
fn create_answer_appends_and_respects_lock() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &rust.id, "Question to be locked");
    let answer = make_answer(&db, "bob", &question.id);

    let stored = db.questions.get(&question.id).unwrap().unwrap();
    assert_eq!(stored.answers, vec![answer.id.clone()]);
    assert!(stored.updated_at >= question.updated_at);

    let lock = UpdateQuestionRequest {
        is_locked: Some(true),
        ..UpdateQuestionRequest::default()
    };
    TransactionOps::update_question(&db, &Actor::new("admin", Role::Admin), &question.id, &lock)
        .unwrap();
    let late = Answer::new(
        "Too late to answer this one.".to_string(),
        question.id.clone(),
        "carol".to_string(),
    );
    let err = TransactionOps::create_answer(&db, &late).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("locked")));
}

#[test]
fn create_answer_for_missing_question_is_not_found() {
    let (db, _temp) = setup_test_db();
    let answer = Answer::new(
        "Answer to nothing at all.".to_string(),
        "q_missing".to_string(),
        "bob".to_string(),
    );
    let err = TransactionOps::create_answer(&db, &answer).unwrap_err();
    assert!(matches!(err, AppError::NotFound("Question")));
}

#[test]
fn delete_answer_detaches_from_question() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &rust.id, "Question with one answer");
    let answer = make_answer(&db, "bob", &question.id);

    TransactionOps::delete_answer(&db, &member("bob"), &answer.id).unwrap();
    let stored = db.questions.get(&question.id).unwrap().unwrap();
    assert!(stored.answers.is_empty());
    assert!(db.answers.get(&answer.id).unwrap().is_none());
}

#[test]
fn view_counts_everyone_but_the_owner() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let question = make_question(&db, "alice", &rust.id, "Question to be viewed");

    db.questions.view(&question.id, None).unwrap().unwrap();
    db.questions.view(&question.id, Some("bob")).unwrap().unwrap();
    let detail = db.questions.view(&question.id, Some("alice")).unwrap().unwrap();
    assert_eq!(detail.question.views, 2);
    assert!(db.questions.view("q_missing", None).unwrap().is_none());
}

#[test]
fn category_names_are_unique_and_order_appends() {
    let (db, _temp) = setup_test_db();
    let first = make_category(&db, "Rust");
    let second = make_category(&db, "Go");
    assert_eq!(first.order, 1);
    assert_eq!(second.order, 2);

    let err = db
        .categories
        .create(Category::new(
            "rust".to_string(),
            "Duplicate category by name".to_string(),
            "#000000".to_string(),
            None,
        ))
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[test]
fn category_name_clash_ignores_non_ascii_case() {
    let (db, _temp) = setup_test_db();
    let original = make_category(&db, "Élixir");

    let err = db
        .categories
        .create(Category::new(
            "éLIXIR".to_string(),
            "Same name with different casing".to_string(),
            "#000000".to_string(),
            None,
        ))
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref m) if m == "Category name already exists"));

    let other = make_category(&db, "Straße");
    let rename = crate::models::category::UpdateCategoryRequest {
        name: Some(" ÉLIXIR ".to_string()),
        ..crate::models::category::UpdateCategoryRequest::default()
    };
    assert!(db.categories.update(&other.id, &rename).is_err());
    assert!(db.categories.update(&original.id, &rename).unwrap().is_some());
}

#[test]
fn category_delete_refuses_non_empty() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let empty = make_category(&db, "Empty");
    make_question(&db, "alice", &rust.id, "Keeps the category alive");

    let err = db.categories.delete(&rust.id).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(db.categories.delete(&empty.id).unwrap());
    assert!(!db.categories.delete(&empty.id).unwrap());
}

#[test]
fn inactive_categories_are_hidden_by_default() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    make_category(&db, "Go");
    let update = crate::models::category::UpdateCategoryRequest {
        is_active: Some(false),
        ..Default::default()
    };
    db.categories.update(&rust.id, &update).unwrap().unwrap();

    assert_eq!(db.categories.list(false).unwrap().len(), 1);
    assert_eq!(db.categories.list(true).unwrap().len(), 2);
}

#[test]
fn share_sees_the_same_rows() {
    let (db, _temp) = setup_test_db();
    let rust = make_category(&db, "Rust");
    let shared = db.share().unwrap();
    assert_eq!(shared.categories.get(&rust.id).unwrap().unwrap().name, "Rust");
}
