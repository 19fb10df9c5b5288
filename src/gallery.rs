// src/gallery.rs
// =============================================================================
// The gallery: one page plus the state that goes with it.
//
// What happens here:
// 1. load(): fetch the profile, render the overview, fetch the repository
//    list, render it
// 2. filter(): narrow the list as the search text changes
// 3. open_repository(): fetch one repository and its languages, show detail
// 4. back(): return to the list
//
// Detail requests carry a ticket. Every new request bumps a generation
// counter; a result whose ticket is older than the latest request is dropped,
// so when two opens race the last one asked for wins.
//
// Failures never abort the page. They are logged and shown as a notice at the
// top, and whatever was already rendered stays.
// =============================================================================

use crate::config::GalleryConfig;
use crate::error::Result;
use crate::github::{GitHubClient, RepositoryDetail};
use crate::page::{self, Page, ViewMode};

/// Identifies one detail request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    name: String,
}

impl DetailTicket {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub struct Gallery {
    config: GalleryConfig,
    page: Page,
    mode: ViewMode,
    current: Option<RepositoryDetail>,
    generation: u64,
}

impl Gallery {
    pub fn new(config: GalleryConfig) -> Self {
        let page = Page::new(&format!("{}'s GitHub Repos", config.username));
        Self {
            config,
            page,
            mode: ViewMode::default(),
            current: None,
            generation: 0,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The repository shown in detail mode
    pub fn current_detail(&self) -> Option<&RepositoryDetail> {
        self.current.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.page.has_error()
    }

    /// Names of the rendered list items, in list order
    pub fn repository_names(&self) -> Vec<String> {
        self.page
            .repo_list
            .elements()
            .filter(|e| e.has_class(page::REPO_ITEM))
            .map(|e| e.text_content())
            .collect()
    }

    // Fetches and renders the overview, then the repository list.
    //
    // A failed profile fetch still lets the list load. A failed list fetch
    // leaves the overview in place and the list empty. Either failure stays
    // on the page whatever is opened later.
    pub async fn load(&mut self, client: &GitHubClient) {
        tracing::info!(username = client.username(), "loading gallery");

        self.page.show_loading("profile");
        match client.fetch_user().await {
            Ok(profile) => page::render_overview(&mut self.page.overview, &profile),
            Err(e) => self.report_load("profile", &e),
        }

        self.page.show_loading("repositories");
        match client.fetch_repository_list().await {
            Ok(repos) => {
                let rendered = page::render_repository_list(
                    &mut self.page.filter_input,
                    &mut self.page.repo_list,
                    &repos,
                    self.config.exclusion(),
                );
                tracing::info!(rendered, "repository list ready");
            }
            Err(e) => self.report_load("repositories", &e),
        }
        self.page.clear_status();
    }

    /// Applies the search text to the list; returns how many items remain
    pub fn filter(&mut self, search: &str) -> usize {
        page::apply_filter(&mut self.page.filter_input, &mut self.page.repo_list, search)
    }

    // Starts a detail request: shows a loading notice and hands back the
    // ticket the result must be delivered with.
    pub fn begin_detail(&mut self, name: &str) -> DetailTicket {
        self.generation += 1;
        self.page.show_loading(name);
        DetailTicket {
            generation: self.generation,
            name: name.to_string(),
        }
    }

    // Delivers a detail result. Returns false when the ticket is stale and the
    // result was dropped.
    pub fn finish_detail(
        &mut self,
        ticket: DetailTicket,
        result: Result<RepositoryDetail>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(repo = %ticket.name, "dropping stale repository detail");
            return false;
        }

        match result {
            Ok(detail) => {
                self.page.clear_status();
                page::render_repository_detail(&mut self.page.repo_data, &detail);
                page::show_detail(
                    &mut self.page.repos_section,
                    &mut self.page.repo_data,
                    &mut self.page.back_button,
                );
                self.current = Some(detail);
                self.mode = ViewMode::Detail;
            }
            Err(e) => {
                tracing::error!(error = %e, repo = %ticket.name, "failed to load repository");
                self.page.show_error(&e.to_string());
            }
        }
        true
    }

    /// Fetches one repository and switches to the detail view
    pub async fn open_repository(&mut self, client: &GitHubClient, name: &str) -> bool {
        let ticket = self.begin_detail(name);
        let result = client.fetch_repository_detail(name).await;
        self.finish_detail(ticket, result)
    }

    // Back to the list. Any detail request still in flight is invalidated.
    pub fn back(&mut self) {
        self.generation += 1;
        self.current = None;
        self.mode = ViewMode::List;
        page::show_list(
            &mut self.page.repos_section,
            &mut self.page.repo_data,
            &mut self.page.back_button,
        );
        self.page.clear_status();
    }

    pub fn to_html(&self) -> String {
        self.page.to_html()
    }

    fn report_load(&mut self, what: &str, error: &crate::error::GalleryError) {
        tracing::error!(error = %error, "failed to load {}", what);
        self.page.add_load_error(&error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use scraper::{Html, Selector};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // A local address with nothing listening on it
    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }

    fn config_for(server: &MockServer) -> GalleryConfig {
        GalleryConfig {
            api_base: server.uri(),
            ..GalleryConfig::default()
        }
    }

    fn texts(html: &str, selector: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(selector).unwrap();
        document
            .select(&selector)
            .map(|e| e.text().collect::<String>())
            .collect()
    }

    async fn mock_user(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/users/bgiobbe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mock_repos(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/users/bgiobbe/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "github-repo-gallery", "created_at": "2022-10-01T00:00:00Z"},
                {"name": "Guess-The-Word", "created_at": "2022-09-15T00:00:00Z"},
                {"name": "old-portfolio", "created_at": "2019-02-03T00:00:00Z"}
            ])))
            .mount(server)
            .await;
    }

    async fn mock_detail(server: &MockServer, name: &str, languages: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/bgiobbe/{}", name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": name,
                "description": format!("About {}", name),
                "default_branch": "main",
                "html_url": format!("https://github.com/bgiobbe/{}", name),
                "languages_url": format!("{}/repos/bgiobbe/{}/languages", server.uri(), name)
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/repos/bgiobbe/{}/languages", name)))
            .respond_with(ResponseTemplate::new(200).set_body_string(languages.to_string()))
            .mount(server)
            .await;
    }

    async fn loaded(config: GalleryConfig) -> (Gallery, GitHubClient) {
        let client = GitHubClient::new(&config).unwrap();
        let mut gallery = Gallery::new(config);
        gallery.load(&client).await;
        (gallery, client)
    }

    #[tokio::test]
    async fn test_load_renders_overview_and_list() {
        let server = MockServer::start().await;
        mock_user(
            &server,
            json!({"avatar_url": "https://a/1.png", "name": "B", "bio": null, "public_repos": 3}),
        )
        .await;
        mock_repos(&server).await;

        let (gallery, _) = loaded(config_for(&server)).await;
        let html = gallery.to_html();

        assert!(!gallery.has_error());
        assert_eq!(
            texts(&html, "ul.repo-list li.repo h3"),
            vec!["github-repo-gallery", "Guess-The-Word", "old-portfolio"]
        );
        assert_eq!(texts(&html, ".overview .user-info").len(), 1);
        assert!(html.contains("<strong>Bio:</strong> Not provided"));
        assert_eq!(gallery.mode(), ViewMode::List);
    }

    #[tokio::test]
    async fn test_load_with_exclusion() {
        let server = MockServer::start().await;
        mock_user(&server, json!({})).await;
        mock_repos(&server).await;

        let config = GalleryConfig {
            exclude_before_cutoff: true,
            ..config_for(&server)
        };
        let (gallery, _) = loaded(config).await;
        assert_eq!(
            gallery.repository_names(),
            vec!["github-repo-gallery", "Guess-The-Word"]
        );
    }

    #[tokio::test]
    async fn test_failed_list_keeps_overview() {
        let server = MockServer::start().await;
        mock_user(&server, json!({"name": "B"})).await;
        Mock::given(method("GET"))
            .and(path("/users/bgiobbe/repos"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let (gallery, _) = loaded(config_for(&server)).await;
        let html = gallery.to_html();

        assert!(gallery.has_error());
        assert!(gallery.repository_names().is_empty());
        assert!(html.contains("<strong>Name:</strong> B"));
        assert_eq!(texts(&html, ".status p.error").len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_api_shows_error() {
        let config = GalleryConfig {
            api_base: closed_port_url(),
            ..GalleryConfig::default()
        };

        let client = GitHubClient::new(&config).unwrap();
        let mut gallery = Gallery::new(config);
        gallery.load(&client).await;

        assert!(gallery.has_error());
        assert!(gallery.page().has_load_error());
        assert!(gallery
            .page()
            .visible_text()
            .contains("Could not load data: request to"));
    }

    #[tokio::test]
    async fn test_load_error_outlives_detail_and_back() {
        let server = MockServer::start().await;
        mock_user(&server, json!({})).await;
        Mock::given(method("GET"))
            .and(path("/users/bgiobbe/repos"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;
        mock_detail(&server, "x", r#"{"Rust": 1}"#).await;

        let (mut gallery, client) = loaded(config_for(&server)).await;
        assert!(gallery.open_repository(&client, "x").await);
        assert_eq!(gallery.mode(), ViewMode::Detail);
        assert!(gallery.has_error());

        gallery.back();
        let html = gallery.to_html();
        assert!(gallery.has_error());
        assert!(gallery.repository_names().is_empty());
        assert_eq!(texts(&html, ".load-errors p.error").len(), 1);
    }

    #[tokio::test]
    async fn test_filter_then_open_then_back_preserves_filter() {
        let server = MockServer::start().await;
        mock_user(&server, json!({})).await;
        mock_repos(&server).await;
        mock_detail(&server, "Guess-The-Word", r#"{"JavaScript": 10, "CSS": 5, "HTML": 2}"#).await;

        let (mut gallery, client) = loaded(config_for(&server)).await;

        assert_eq!(gallery.filter("guess"), 1);
        assert!(gallery.open_repository(&client, "Guess-The-Word").await);
        assert_eq!(gallery.mode(), ViewMode::Detail);

        let html = gallery.to_html();
        assert_eq!(texts(&html, "section.repos.hide").len(), 1);
        assert_eq!(texts(&html, "section.repo-data:not(.hide) h3"), vec!["Name: Guess-The-Word"]);
        assert!(texts(&html, "section.repo-data p").contains(&"Languages: JavaScript, CSS, HTML".to_string()));
        assert_eq!(texts(&html, "button.view-repos:not(.hide)").len(), 1);
        assert_eq!(
            gallery.current_detail().map(|d| d.default_branch.as_str()),
            Some("main")
        );

        gallery.back();
        let html = gallery.to_html();
        assert_eq!(gallery.mode(), ViewMode::List);
        assert!(gallery.current_detail().is_none());
        assert_eq!(texts(&html, "section.repo-data.hide").len(), 1);
        assert!(texts(&html, "section.repo-data *").is_empty());
        assert_eq!(texts(&html, "li.repo:not(.hide) h3"), vec!["Guess-The-Word"]);
        assert_eq!(gallery.page().filter_input.attr("value"), Some("guess"));
    }

    #[tokio::test]
    async fn test_opening_another_repo_replaces_detail() {
        let server = MockServer::start().await;
        mock_user(&server, json!({})).await;
        mock_repos(&server).await;
        mock_detail(&server, "Guess-The-Word", r#"{"JavaScript": 10}"#).await;
        mock_detail(&server, "github-repo-gallery", r#"{"HTML": 10}"#).await;

        let (mut gallery, client) = loaded(config_for(&server)).await;
        gallery.open_repository(&client, "Guess-The-Word").await;
        gallery.open_repository(&client, "github-repo-gallery").await;

        let html = gallery.to_html();
        assert_eq!(texts(&html, "section.repo-data h3"), vec!["Name: github-repo-gallery"]);
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        let first = gallery.begin_detail("first");
        let second = gallery.begin_detail("second");

        let detail = |name: &str| RepositoryDetail {
            name: name.to_string(),
            ..RepositoryDetail::default()
        };

        assert!(gallery.finish_detail(second, Ok(detail("second"))));
        assert!(!gallery.finish_detail(first, Ok(detail("first"))));
        assert_eq!(gallery.current_detail().map(|d| d.name.as_str()), Some("second"));
    }

    #[test]
    fn test_back_invalidates_pending_ticket() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        let ticket = gallery.begin_detail("slow");
        gallery.back();

        let late = RepositoryDetail {
            name: "slow".to_string(),
            ..RepositoryDetail::default()
        };
        assert!(!gallery.finish_detail(ticket, Ok(late)));
        assert_eq!(gallery.mode(), ViewMode::List);
    }

    #[test]
    fn test_failed_detail_stays_in_list() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        let ticket = gallery.begin_detail("broken");
        let error = GalleryError::NotABase("x".to_string());

        assert!(gallery.finish_detail(ticket, Err(error)));
        assert_eq!(gallery.mode(), ViewMode::List);
        assert!(gallery.has_error());
    }

    #[test]
    fn test_filter_on_empty_gallery() {
        let mut gallery = Gallery::new(GalleryConfig::default());
        assert_eq!(gallery.filter("x"), 0);
        assert_eq!(gallery.filter(""), 0);
        assert!(gallery.repository_names().is_empty());
    }
}
