//! Category rows and API payloads.

use super::new_id;
use super::question::QuestionBrief;
use crate::constants::DEFAULT_CATEGORY_ICON;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Category stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of questions filed under this category.
    pub question_count: u64,
    pub is_active: bool,
    pub parent_id: Option<String>,
    pub order: i64,
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: Option<String>,
    pub parent_id: Option<String>,
}

/// Request payload for editing a category. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

/// Query parameters for listing categories.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub include_inactive: Option<String>,
}

/// Category fields embedded in question listing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBrief {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl From<&Category> for CategoryBrief {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            color: value.color.clone(),
        }
    }
}

/// Detail view: the category plus its most recent questions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub recent_questions: Vec<QuestionBrief>,
}

impl Category {
    pub fn new(name: String, description: String, color: String, icon: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: new_id("cat"),
            name,
            description,
            color,
            icon: icon
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
            created_at: now,
            updated_at: now,
            question_count: 0,
            is_active: true,
            parent_id: None,
            order: 0,
        }
    }
}

/// Display order: `order` ascending, then name.
pub fn display_order(a: &Category, b: &Category) -> Ordering {
    a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name))
}

pub(crate) fn apply_update(category: &mut Category, update: &UpdateCategoryRequest) {
    if let Some(name) = &update.name {
        category.name = name.trim().to_string();
    }
    if let Some(description) = &update.description {
        category.description = description.trim().to_string();
    }
    if let Some(color) = &update.color {
        category.color = color.clone();
    }
    if let Some(icon) = &update.icon {
        category.icon = icon.clone();
    }
    if let Some(is_active) = update.is_active {
        category.is_active = is_active;
    }
    if let Some(order) = update.order {
        category.order = order;
    }
    category.updated_at = Utc::now();
}
