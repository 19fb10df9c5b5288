// src/github/models.rs
// =============================================================================
// Shapes of the GitHub REST payloads the gallery reads.
//
// Every field has a default so that an error body such as
// `{"message": "Not Found"}` still decodes. The page then shows placeholders
// for whatever is missing instead of failing.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Profile block from `GET /users/{username}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub avatar_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Absent when the profile request failed
    pub public_repos: Option<u32>,
}

/// One entry of `GET /users/{username}/repos`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepositorySummary {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

// Raw `GET /repos/{owner}/{repo}` payload. Only the fields we display plus
// the languages link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RepositoryPayload {
    pub name: String,
    pub description: Option<String>,
    pub default_branch: String,
    pub html_url: String,
    pub languages_url: Option<String>,
}

/// A repository ready for the detail view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryDetail {
    pub name: String,
    pub description: Option<String>,
    pub default_branch: String,
    pub html_url: String,
    /// Language names in the order GitHub listed them (by bytes, usually)
    pub languages: Vec<String>,
}

impl RepositoryDetail {
    pub(crate) fn from_payload(payload: RepositoryPayload, languages: Vec<String>) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            default_branch: payload.default_branch,
            html_url: payload.html_url,
            languages,
        }
    }
}
