//! Question listing: filter predicate and deterministic ordering built from
//! raw query parameters.

use crate::models::Question;
use crate::pagination::PageRequest;
use crate::text::{contains_case_insensitive, normalize_optional_nonempty, normalize_tag};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Raw listing query parameters as received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListingParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Supported `sortBy` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Votes,
    Answers,
    Views,
    Updated,
}

impl SortKey {
    /// Parse a `sortBy` value; anything unrecognized sorts newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => SortKey::Oldest,
            Some("votes") => SortKey::Votes,
            Some("answers") => SortKey::Answers,
            Some("views") => SortKey::Views,
            Some("updated") => SortKey::Updated,
            _ => SortKey::Newest,
        }
    }

    fn compare(self, a: &Question, b: &Question) -> Ordering {
        let newest = || b.created_at.cmp(&a.created_at);
        match self {
            SortKey::Newest => newest(),
            SortKey::Oldest => a.created_at.cmp(&b.created_at),
            SortKey::Votes => b.votes.cmp(&a.votes).then_with(newest),
            SortKey::Answers => b
                .answer_count()
                .cmp(&a.answer_count())
                .then_with(newest),
            SortKey::Views => b.views.cmp(&a.views).then_with(newest),
            SortKey::Updated => b.updated_at.cmp(&a.updated_at),
        }
    }
}

/// Split a comma-separated tag list into lowercased, non-blank tags.
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(normalize_tag)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Conjunction of the active filters. `None` means the clause is off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPredicate {
    /// Lowercased search needle.
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub author_id: Option<String>,
    pub tags: Option<BTreeSet<String>>,
}

impl QuestionPredicate {
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(category_id) = &self.category_id {
            if &question.category_id != category_id {
                return false;
            }
        }
        if let Some(author_id) = &self.author_id {
            if &question.user_id != author_id {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !question.tags.iter().any(|tag| tags.contains(tag)) {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let hit = contains_case_insensitive(&question.title, needle)
                || contains_case_insensitive(&question.content, needle)
                || question
                    .tags
                    .iter()
                    .any(|tag| contains_case_insensitive(tag, needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Predicate plus ordering for one listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub predicate: QuestionPredicate,
    pub sort: SortKey,
}

impl ListingQuery {
    /// Translate raw parameters. Blank values are treated as absent.
    pub fn build(params: &ListingParams) -> Self {
        let tags = params
            .tags
            .as_deref()
            .map(parse_tags)
            .filter(|tags| !tags.is_empty());
        Self {
            predicate: QuestionPredicate {
                search: normalize_optional_nonempty(params.search.clone())
                    .map(|needle| needle.to_lowercase()),
                category_id: normalize_optional_nonempty(params.category_id.clone()),
                author_id: None,
                tags,
            },
            sort: SortKey::parse(params.sort_by.as_deref()),
        }
    }

    /// Newest questions by one author.
    pub fn by_author(author_id: impl Into<String>) -> Self {
        Self {
            predicate: QuestionPredicate {
                author_id: Some(author_id.into()),
                ..QuestionPredicate::default()
            },
            sort: SortKey::Newest,
        }
    }

    /// Scope to one category, overriding any `categoryId` parameter.
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.predicate.category_id = Some(category_id.into());
        self
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.predicate.matches(question)
    }

    /// Total order: the sort key, then id ascending.
    pub fn compare(&self, a: &Question, b: &Question) -> Ordering {
        self.sort.compare(a, b).then_with(|| a.id.cmp(&b.id))
    }

    /// Filter, sort and cut one page out of `rows`.
    ///
    /// # Returns
    /// The page of rows and the number of rows matching the predicate.
    pub fn run(
        &self,
        rows: impl IntoIterator<Item = Question>,
        page: &PageRequest,
    ) -> (Vec<Question>, u64) {
        let mut matched: Vec<Question> = rows.into_iter().filter(|q| self.matches(q)).collect();
        let total = matched.len() as u64;
        matched.sort_by(|a, b| self.compare(a, b));
        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        let rows = matched.into_iter().skip(skip).take(limit).collect();
        (rows, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn question(id: &str, title: &str, tags: &[&str], minutes_ago: i64) -> Question {
        let mut q = Question::new(
            title.to_string(),
            "Body text that is long enough to pass validation.".to_string(),
            "author".to_string(),
            "cat_js".to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        q.id = id.to_string();
        q.created_at = Utc::now() - Duration::minutes(minutes_ago);
        q.updated_at = q.created_at;
        q
    }

    fn params() -> ListingParams {
        ListingParams::default()
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        assert_eq!(SortKey::parse(Some("popularity")), SortKey::Newest);
        assert_eq!(SortKey::parse(None), SortKey::Newest);
        assert_eq!(SortKey::parse(Some("views")), SortKey::Views);
    }

    #[test]
    fn parse_tags_trims_lowercases_and_drops_blanks() {
        let tags = parse_tags(" React, ,NODE ,,");
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["node".to_string(), "react".to_string()]
        );
    }

    #[test]
    fn blank_params_build_an_open_predicate() {
        let query = ListingQuery::build(&ListingParams {
            search: Some("   ".to_string()),
            tags: Some(" , ".to_string()),
            category_id: Some(String::new()),
            ..params()
        });
        assert_eq!(query.predicate, QuestionPredicate::default());
    }

    #[test]
    fn search_matches_title_content_or_tag_case_insensitively() {
        let query = ListingQuery::build(&ListingParams {
            search: Some("HOOKS".to_string()),
            ..params()
        });
        assert!(query.matches(&question("q1", "How do React hooks work?", &["react"], 1)));
        assert!(query.matches(&question("q2", "State management question", &["hooks"], 1)));
        assert!(!query.matches(&question("q3", "Vue lifecycle question", &["vue"], 1)));
    }

    #[test]
    fn search_is_literal_not_a_pattern() {
        let query = ListingQuery::build(&ListingParams {
            search: Some("c++".to_string()),
            ..params()
        });
        assert!(query.matches(&question("q1", "Templates in C++ explained", &["cpp"], 1)));
        assert!(!query.matches(&question("q2", "Cool closures in Rust", &["rust"], 1)));
    }

    #[test]
    fn clauses_are_conjunctive() {
        let query = ListingQuery::build(&ListingParams {
            tags: Some("react".to_string()),
            category_id: Some("cat_other".to_string()),
            ..params()
        });
        assert!(!query.matches(&question("q1", "React question title", &["react"], 1)));
    }

    #[test]
    fn votes_sort_breaks_ties_by_newest_then_id() {
        let mut a = question("q_a", "Alpha question title", &["x"], 10);
        let mut b = question("q_b", "Bravo question title", &["x"], 5);
        let mut c = question("q_c", "Charlie question title", &["x"], 5);
        a.votes = 7;
        b.votes = 2;
        c.votes = 2;
        c.created_at = b.created_at;
        let query = ListingQuery::build(&ListingParams {
            sort_by: Some("votes".to_string()),
            ..params()
        });
        let (rows, total) = query.run(vec![c, b, a], &PageRequest::default());
        assert_eq!(total, 3);
        let ids: Vec<_> = rows.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q_a", "q_b", "q_c"]);
    }

    #[test]
    fn run_pages_after_sorting() {
        let rows: Vec<Question> = (0..7)
            .map(|i| question(&format!("q_{i}"), "Question title here", &["x"], i))
            .collect();
        let query = ListingQuery::build(&ListingParams {
            sort_by: Some("oldest".to_string()),
            ..params()
        });
        let (page, total) = query.run(rows, &PageRequest::new(Some(2), Some(3)));
        assert_eq!(total, 7);
        let ids: Vec<_> = page.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q_3", "q_2", "q_1"]);
    }

    #[test]
    fn category_scope_overrides_parameter() {
        let query = ListingQuery::build(&ListingParams {
            category_id: Some("cat_other".to_string()),
            ..params()
        })
        .with_category("cat_js");
        assert!(query.matches(&question("q1", "Scoped question title", &["x"], 1)));
    }

    #[test]
    fn by_author_filters_on_owner() {
        let query = ListingQuery::by_author("someone-else");
        assert!(!query.matches(&question("q1", "Somebody's question", &["x"], 1)));
        assert!(ListingQuery::by_author("author")
            .matches(&question("q2", "Author's own question", &["x"], 1)));
    }

    fn sorted_ids(sort_by: Option<&str>, rows: Vec<Question>) -> Vec<String> {
        let query = ListingQuery::build(&ListingParams {
            sort_by: sort_by.map(ToString::to_string),
            ..params()
        });
        let (rows, _) = query.run(rows, &PageRequest::default());
        rows.into_iter().map(|q| q.id).collect()
    }

    #[test]
    fn newest_is_the_explicit_and_implicit_default() {
        let rows = || {
            vec![
                question("q_old", "Oldest question title", &["x"], 30),
                question("q_new", "Newest question title", &["x"], 1),
                question("q_mid", "Middle question title", &["x"], 10),
            ]
        };
        let expected = vec!["q_new", "q_mid", "q_old"];
        assert_eq!(sorted_ids(Some("newest"), rows()), expected);
        assert_eq!(sorted_ids(None, rows()), expected);
    }

    #[test]
    fn answers_sort_breaks_ties_by_newest() {
        let mut busy = question("q_busy", "Busy question title", &["x"], 30);
        busy.answers = vec!["a_1".to_string(), "a_2".to_string()];
        let mut old = question("q_old", "Older one-answer question", &["x"], 20);
        old.answers = vec!["a_3".to_string()];
        let mut new = question("q_new", "Newer one-answer question", &["x"], 2);
        new.answers = vec!["a_4".to_string()];
        let quiet = question("q_quiet", "Unanswered question title", &["x"], 1);

        assert_eq!(
            sorted_ids(Some("answers"), vec![quiet, old, new, busy]),
            vec!["q_busy", "q_new", "q_old", "q_quiet"]
        );
    }

    #[test]
    fn views_sort_breaks_ties_by_newest() {
        let mut popular = question("q_popular", "Popular question title", &["x"], 40);
        popular.views = 90;
        let mut old = question("q_old", "Older viewed question", &["x"], 20);
        old.views = 5;
        let mut new = question("q_new", "Newer viewed question", &["x"], 3);
        new.views = 5;

        assert_eq!(
            sorted_ids(Some("views"), vec![old, new, popular]),
            vec!["q_popular", "q_new", "q_old"]
        );
    }

    #[test]
    fn updated_sort_ignores_creation_time() {
        let mut revived = question("q_revived", "Old question edited today", &["x"], 600);
        revived.updated_at = Utc::now();
        let fresh = question("q_fresh", "Recent untouched question", &["x"], 5);
        let mut tied_b = question("q_tied_b", "Tied question bravo", &["x"], 1);
        let mut tied_a = question("q_tied_a", "Tied question alpha", &["x"], 300);
        let stamp = Utc::now() - Duration::minutes(60);
        tied_a.updated_at = stamp;
        tied_b.updated_at = stamp;

        assert_eq!(
            sorted_ids(Some("updated"), vec![tied_b, fresh, tied_a, revived]),
            vec!["q_revived", "q_fresh", "q_tied_a", "q_tied_b"]
        );
    }
}
