//! Core domain library for TechForum (config, storage, models, voting, listing).

/// Accept/unaccept rules for answers.
pub mod accept;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across TechForum crates.
pub mod constants;
/// Database access layer and transactions.
pub mod db;
/// Application error types (storage/domain).
pub mod error;
/// Question listing filters and ordering.
pub mod listing;
/// Data models for API requests and persistence.
pub mod models;
/// Page bookkeeping for listing endpoints.
pub mod pagination;
/// Default data for fresh databases.
pub mod seed;
/// Text normalization helpers.
pub mod text;
/// Request payload validation.
pub mod validation;
/// Vote state machine shared by questions and answers.
pub mod voting;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use db::Database;
pub use error::AppError;
