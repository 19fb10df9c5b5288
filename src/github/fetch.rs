// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Endpoints used (all GET, no authentication):
// - /users/{username}                      -> profile for the overview
// - /users/{username}/repos?sort=updated&direction=desc&per_page=100
//                                          -> repository list (one page only)
// - /repos/{username}/{repo}               -> one repository
// - {languages_url} from the repository    -> language name -> byte count
//
// Status policy:
// - A non-2xx status is logged with the endpoint and the body is decoded
//   anyway. The models default every field, so the page degrades to
//   placeholders instead of breaking.
// - Transport failures and bodies of the wrong shape come back as errors
//   for the caller to show.
//
// Rust concepts:
// - async functions: For network I/O
// - Generics with trait bounds: one decoding helper for every payload type
// - Clone: the client is shared with spawned tasks
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::models::{RepositoryDetail, RepositoryPayload, RepositorySummary, UserProfile};
use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};

// Repositories requested in the single list page
const REPOS_PER_PAGE: &str = "100";

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
    username: String,
}

impl GitHubClient {
    // Builds a client for the configured user and API host
    //
    // Fails only when the API base is not a URL that can take path segments,
    // or when reqwest cannot set up its TLS backend.
    pub fn new(config: &GalleryConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base).map_err(|source| GalleryError::InvalidUrl {
            url: config.api_base.clone(),
            source,
        })?;
        if api_base.cannot_be_a_base() {
            return Err(GalleryError::NotABase(config.api_base.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-gallery/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(GalleryError::Client)?;

        Ok(Self {
            http,
            api_base,
            username: config.username.clone(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    // GET /users/{username}
    pub async fn fetch_user(&self) -> Result<UserProfile> {
        let url = self.endpoint(&["users", &self.username])?;
        self.get_json(url, "fetch user").await
    }

    // GET /users/{username}/repos, most recently updated first
    pub async fn fetch_repository_list(&self) -> Result<Vec<RepositorySummary>> {
        let mut url = self.endpoint(&["users", &self.username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("direction", "desc")
            .append_pair("per_page", REPOS_PER_PAGE);
        self.get_json(url, "fetch repos list").await
    }

    // GET /repos/{username}/{name}, then GET its languages_url
    //
    // The two requests run one after the other: the languages link is only
    // known once the repository itself has arrived.
    pub async fn fetch_repository_detail(&self, name: &str) -> Result<RepositoryDetail> {
        let url = self.endpoint(&["repos", &self.username, name])?;
        let context = format!("fetch {} repo", name);
        let mut payload: RepositoryPayload = self.get_json(url, &context).await?;

        // An error body carries no name; keep the one that was asked for
        if payload.name.is_empty() {
            payload.name = name.to_string();
        }

        let languages = match payload.languages_url.as_deref() {
            Some(languages_url) => self.fetch_languages(name, languages_url).await?,
            None => {
                tracing::debug!(repo = name, "no languages_url in repository payload");
                Vec::new()
            }
        };

        Ok(RepositoryDetail::from_payload(payload, languages))
    }

    // The languages endpoint maps language name -> byte count. Only the
    // names are kept, in the order the object lists them. An error body is
    // not a language map, so a failed request yields no languages.
    async fn fetch_languages(&self, repo: &str, languages_url: &str) -> Result<Vec<String>> {
        let url = Url::parse(languages_url).map_err(|source| GalleryError::InvalidUrl {
            url: languages_url.to_string(),
            source,
        })?;
        let context = format!("fetch {} languages", repo);
        let (status, body) = self.get(url, &context).await?;
        if !status.is_success() {
            return Ok(Vec::new());
        }

        let languages: serde_json::Map<String, serde_json::Value> = decode(&body, &context)?;
        Ok(languages.into_iter().map(|(name, _bytes)| name).collect())
    }

    // Appends path segments to the API base
    //
    // Segments are percent-encoded by `url`, so a repository name can never
    // escape its path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| GalleryError::NotABase(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // Sends a GET and decodes the body, whatever the status
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T> {
        let (_status, body) = self.get(url, context).await?;
        decode(&body, context)
    }

    // Sends a GET and reads the whole body. A non-2xx status is logged, not
    // treated as an error.
    async fn get(&self, url: Url, context: &str) -> Result<(StatusCode, Vec<u8>)> {
        tracing::debug!(%url, "{}", context);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| GalleryError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                %url,
                "{}: request failed with status={}",
                context,
                status.as_u16()
            );
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| GalleryError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok((status, body.to_vec()))
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], context: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| GalleryError::Decode {
        context: context.to_string(),
        source,
    })
}
