//! Shared constants used across TechForum crates.

/// Default API port for TechForum.
pub const DEFAULT_PORT: u16 = 5000;

/// Default maximum request body size accepted by the API layer.
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Default browser origin allowed by CORS when none are configured.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Page size used when a listing request does not specify one.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Upper bound for any listing page size.
pub const MAX_PAGE_LIMIT: u64 = 50;

/// Number of recent questions embedded in a category detail response.
pub const CATEGORY_RECENT_QUESTIONS: usize = 5;
/// Number of questions and of answers in a user's recent activity.
pub const RECENT_ACTIVITY_LIMIT: i64 = 5;

/// Header carrying the authenticated user id from the credential service.
pub const USER_ID_HEADER: &str = "x-forum-user-id";
/// Header carrying the authenticated user role from the credential service.
pub const USER_ROLE_HEADER: &str = "x-forum-user-role";

/// Icon assigned to categories created without one.
pub const DEFAULT_CATEGORY_ICON: &str = "category";
