// src/page/mod.rs
// =============================================================================
// The gallery page and the operations that change it.
//
// Submodules:
// - element: the small element tree the page is built from
// - render: overview, list and detail fragments
// - filter: search-box filtering of the list
// - navigation: list <-> detail switching
//
// The page keeps each container as its own field so that render, filter and
// navigation functions can be handed exactly the containers they touch.
// `to_html` stitches them together into one document.
// =============================================================================

mod element;
mod filter;
mod navigation;
mod render;

pub use element::{Element, HIDE};
pub use filter::{apply_filter, REPO_ITEM};
pub use navigation::{show_detail, show_list, ViewMode};
pub use render::{render_overview, render_repository_detail, render_repository_list};

const ERROR: &str = "error";

fn error_notice(message: &str) -> Element {
    Element::new("p")
        .with_class(ERROR)
        .with_text(&format!("Could not load data: {}", message))
}

const STYLESHEET: &str = "\
.hide { display: none; }
.user-info { display: flex; gap: 1em; }
.user-info img { width: 120px; border-radius: 50%; }
.repo-list { list-style: none; padding: 0; }
.repo h3 { cursor: pointer; }
.status .error { color: #b00020; }
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    title: String,
    /// Errors from loading the profile and the list
    pub load_errors: Element,
    /// Loading notice, or the error of the last detail request
    pub status: Element,
    /// Profile summary (`div.overview`)
    pub overview: Element,
    /// List section (`section.repos`), holds the filter box and the list
    pub repos_section: Element,
    pub filter_input: Element,
    pub repo_list: Element,
    /// Detail section (`section.repo-data`)
    pub repo_data: Element,
    /// "Back to Repo Gallery" control
    pub back_button: Element,
}

impl Page {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            load_errors: Element::new("div").with_class("status").with_class("load-errors"),
            status: Element::new("div").with_class("status"),
            overview: Element::new("div").with_class("overview"),
            repos_section: Element::new("section").with_class("repos"),
            filter_input: Element::new("input")
                .with_class("filter-repos")
                .with_attr("type", "text")
                .with_attr("name", "search")
                .with_attr("placeholder", "Search by name")
                .with_attr("value", ""),
            repo_list: Element::new("ul").with_class("repo-list"),
            repo_data: Element::new("section").with_class("repo-data").with_class(HIDE),
            back_button: Element::new("button")
                .with_class("view-repos")
                .with_class(HIDE)
                .with_text("Back to Repo Gallery"),
        }
    }

    // Loading and detail notices replace each other: at most one is shown at
    // a time. Load errors sit in their own container and stay for the life
    // of the page.

    pub fn show_loading(&mut self, what: &str) {
        self.status.clear();
        self.status.append_child(
            Element::new("p")
                .with_class("loading")
                .with_text(&format!("Loading {}...", what)),
        );
    }

    pub fn show_error(&mut self, message: &str) {
        self.status.clear();
        self.status.append_child(error_notice(message));
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    // Records a failed profile or list fetch
    pub fn add_load_error(&mut self, message: &str) {
        self.load_errors.append_child(error_notice(message));
    }

    pub fn has_load_error(&self) -> bool {
        !self.load_errors.is_empty()
    }

    /// Any error on the page, from loading or from the last detail request
    pub fn has_error(&self) -> bool {
        self.has_load_error() || self.status.elements().any(|e| e.has_class(ERROR))
    }

    // The page body with every container in its place
    pub fn body(&self) -> Element {
        let intro = Element::new("section")
            .with_class("intro")
            .with_child(Element::new("h1").with_text(&self.title))
            .with_child(self.overview.clone());

        let repos = self
            .repos_section
            .clone()
            .with_child(Element::new("h2").with_text("Repos"))
            .with_child(self.filter_input.clone())
            .with_child(self.repo_list.clone());

        Element::new("body").with_child(
            Element::new("main")
                .with_child(self.load_errors.clone())
                .with_child(self.status.clone())
                .with_child(intro)
                .with_child(repos)
                .with_child(self.repo_data.clone())
                .with_child(self.back_button.clone()),
        )
    }

    pub fn to_html(&self) -> String {
        let head = Element::new("head")
            .with_child(Element::new("meta").with_attr("charset", "utf-8"))
            .with_child(Element::new("title").with_text(&self.title))
            .with_child(Element::new("style").with_text(STYLESHEET));
        let html = Element::new("html")
            .with_attr("lang", "en")
            .with_child(head)
            .with_child(self.body());

        format!("<!DOCTYPE html>\n{}\n", html.to_html())
    }

    pub fn visible_text(&self) -> String {
        self.body().visible_text()
    }
}
