// src/github/mod.rs
// =============================================================================
// This module handles everything that comes from the GitHub REST API.
//
// - fetch: the HTTP client and the three fetch operations
// - models: the payload types they decode into
// =============================================================================

mod fetch;
mod models;

pub use fetch::GitHubClient;
pub use models::{RepositoryDetail, RepositorySummary, UserProfile};
