//! Listing queries against stored questions.

use super::*;
use crate::listing::{ListingParams, ListingQuery};
use crate::pagination::PageRequest;

#[test]
fn query_filters_by_tag_case_insensitively_and_counts_total() {
    let (db, _temp) = setup_test_db();
    let web = make_category(&db, "Web");
    let tagged = Question::new(
        "How do React hooks work?".to_string(),
        "Trying to understand useEffect dependencies.".to_string(),
        "alice".to_string(),
        web.id.clone(),
        vec!["React".to_string()],
    );
    TransactionOps::create_question(&db, &tagged).unwrap();
    make_question(&db, "bob", &web.id, "Unrelated question title");

    let query = ListingQuery::build(&ListingParams {
        tags: Some("REACT".to_string()),
        ..ListingParams::default()
    });
    let (rows, total) = db.questions.listing(&query, &PageRequest::default()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].question.id, tagged.id);
    assert_eq!(rows[0].question.tags, vec!["react"]);
    let category = rows[0].category.as_ref().unwrap();
    assert_eq!((category.id.as_str(), category.name.as_str()), (web.id.as_str(), "Web"));
}

#[test]
fn query_pages_by_votes() {
    let (db, _temp) = setup_test_db();
    let web = make_category(&db, "Web");
    let mut ids = Vec::new();
    for i in 0..5 {
        let question = make_question(&db, "alice", &web.id, &format!("Question number {}", i));
        for voter in 0..i {
            db.questions
                .vote(&question.id, &format!("voter-{}", voter), VoteType::Upvote)
                .unwrap();
        }
        ids.push(question.id);
    }

    let query = ListingQuery::build(&ListingParams {
        sort_by: Some("votes".to_string()),
        ..ListingParams::default()
    });
    let (rows, total) = db
        .questions
        .listing(&query, &PageRequest::new(Some(1), Some(2)))
        .unwrap();
    assert_eq!(total, 5);
    let votes: Vec<_> = rows.iter().map(|row| row.question.votes).collect();
    assert_eq!(votes, vec![4, 3]);
    assert_eq!(rows[0].question.id, ids[4]);
}

#[test]
fn category_detail_embeds_recent_questions() {
    let (db, _temp) = setup_test_db();
    let web = make_category(&db, "Web");
    let other = make_category(&db, "Other");
    for i in 0..7 {
        make_question(&db, "alice", &web.id, &format!("Web question number {}", i));
    }
    make_question(&db, "alice", &other.id, "Question in another category");

    let detail = db.categories.detail(&web.id).unwrap().unwrap();
    assert_eq!(detail.category.question_count, 7);
    assert_eq!(detail.recent_questions.len(), 5);
    assert!(db.categories.detail("cat_missing").unwrap().is_none());
}

#[test]
fn author_listings() {
    let (db, _temp) = setup_test_db();
    let web = make_category(&db, "Web");
    let mine = make_question(&db, "alice", &web.id, "Alice asks a question");
    make_question(&db, "bob", &web.id, "Bob asks a question too");
    make_answer(&db, "alice", &mine.id);
    let (rows, total) = db
        .questions
        .listing(&ListingQuery::by_author("alice"), &PageRequest::default())
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].question.id, mine.id);
    assert_eq!(rows[0].answer_count, 1);

    let (answers, total) = db
        .answers
        .list_by_author("alice", &PageRequest::default())
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(answers[0].question_id, mine.id);
}

#[test]
fn user_activity_counts_everything_but_lists_five() {
    let (db, _temp) = setup_test_db();
    let web = make_category(&db, "Web");
    let mut last = None;
    for i in 0..7 {
        last = Some(make_question(&db, "alice", &web.id, &format!("Alice question {}", i)));
    }
    let question = last.unwrap();
    make_answer(&db, "alice", &question.id);
    make_answer(&db, "bob", &question.id);

    let activity = db.user_activity("alice").unwrap();
    assert_eq!(activity.stats.questions_asked, 7);
    assert_eq!(activity.stats.answers_given, 1);
    assert_eq!(activity.recent_activity.questions.len(), 5);
    assert_eq!(activity.recent_activity.questions[0].question.id, question.id);
    assert_eq!(activity.recent_activity.questions[0].answer_count, 2);
    assert_eq!(activity.recent_activity.answers.len(), 1);

    let nobody = db.user_activity("nobody").unwrap();
    assert_eq!(nobody.stats.questions_asked, 0);
    assert!(nobody.recent_activity.answers.is_empty());
}
