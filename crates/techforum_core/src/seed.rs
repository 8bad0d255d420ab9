//! Default categories for a fresh forum.

use crate::db::Database;
use crate::error::AppError;
use crate::models::Category;

const DEFAULT_CATEGORIES: [(&str, &str, &str, &str); 5] = [
    (
        "JavaScript",
        "Frontend and backend JavaScript questions",
        "#f7df1e",
        "js",
    ),
    (
        "React",
        "React.js framework discussions and best practices",
        "#61dafb",
        "react",
    ),
    (
        "Node.js",
        "Server-side JavaScript and backend development",
        "#339933",
        "nodejs",
    ),
    (
        "Database",
        "Database design, queries, and optimization",
        "#336791",
        "database",
    ),
    (
        "DevOps",
        "Deployment, CI/CD, and infrastructure topics",
        "#ff6b35",
        "devops",
    ),
];

/// Insert the default categories when the store has none.
///
/// # Returns
/// The number of categories inserted (zero when any already exist).
///
/// # Errors
/// Returns an error when storage access fails.
pub fn seed_default_categories(db: &Database) -> Result<usize, AppError> {
    if db.categories.count()? > 0 {
        tracing::info!("Categories already present; skipping seed");
        return Ok(0);
    }
    for (name, description, color, icon) in DEFAULT_CATEGORIES {
        db.categories.create(Category::new(
            name.to_string(),
            description.to_string(),
            color.to_string(),
            Some(icon.to_string()),
        ))?;
    }
    tracing::info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
    Ok(DEFAULT_CATEGORIES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_temp_db;

    #[test]
    fn seeds_once() {
        let (db, _temp) = setup_temp_db();
        assert_eq!(seed_default_categories(&db).unwrap(), 5);
        assert_eq!(seed_default_categories(&db).unwrap(), 0);

        let names: Vec<_> = db
            .categories
            .list(false)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            names,
            vec!["JavaScript", "React", "Node.js", "Database", "DevOps"]
        );
    }
}
