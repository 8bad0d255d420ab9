//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_CORS_ORIGIN, DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for TechForum.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_body_size: usize,
    pub auto_backup: bool,
    pub allow_public_access: bool,
    /// Raw `BIND` override; validated by the server when binding.
    pub bind: Option<String>,
    pub cors_origins: Vec<String>,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde<F>(path: String, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir(lookup) {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Some(home) = non_blank("HOME") {
        return Some(PathBuf::from(home));
    }

    // Windows USERPROFILE (standard)
    if let Some(profile) = non_blank("USERPROFILE") {
        return Some(PathBuf::from(profile));
    }

    // Fallback to current directory if available
    env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn flag_enabled<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => parse_env_flag(&value).unwrap_or_else(|| {
            tracing::warn!("Ignoring unrecognized value '{}' for {}", value, name);
            false
        }),
        None => false,
    }
}

/// Split a comma-separated origin list, dropping blank entries.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Arguments
    /// - `lookup`: Returns the raw value for a variable name, if set.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup("DB_PATH") {
            Some(path) if !path.trim().is_empty() => expand_tilde(path, &lookup),
            _ => {
                let home = resolve_home_dir(&lookup).unwrap_or_else(|| PathBuf::from("."));
                let cache_dir = home.join(".cache").join("techforum");
                cache_dir.join("db").to_string_lossy().to_string()
            }
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| parse_origin_list(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        Self {
            db_path,
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            max_body_size: lookup("MAX_BODY_SIZE")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),
            auto_backup: flag_enabled(&lookup, "AUTO_BACKUP"),
            allow_public_access: flag_enabled(&lookup, "ALLOW_PUBLIC_ACCESS"),
            bind: lookup("BIND").filter(|value| !value.trim().is_empty()),
            cors_origins,
        }
    }
}
