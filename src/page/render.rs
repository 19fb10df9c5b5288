// src/page/render.rs
// =============================================================================
// Turns fetched GitHub data into page fragments.
//
// Three views:
// - overview: the profile block (avatar, name, bio, location, repo count)
// - repository list: one `li.repo > h3` per repository
// - repository detail: name, description, branch, languages and a link out
//
// Each function is handed the container it writes into; nothing here knows
// about the rest of the page.
// =============================================================================

use chrono::{DateTime, Utc};

use super::element::Element;
use super::filter::REPO_ITEM;
use crate::github::{RepositoryDetail, RepositorySummary, UserProfile};

/// Shown in place of a field the API did not provide
pub const PLACEHOLDER: &str = "Not provided";

// Appends one profile block to the overview container.
//
// Calling it twice appends a second block; the gallery only calls it once per
// load.
pub fn render_overview(overview: &mut Element, profile: &UserProfile) {
    let mut user_info = Element::new("div").with_class("user-info");

    if !profile.avatar_url.is_empty() {
        user_info.append_child(
            Element::new("figure").with_child(
                Element::new("img")
                    .with_attr("alt", "user avatar")
                    .with_attr("src", &profile.avatar_url),
            ),
        );
    }

    let public_repos = profile.public_repos.map(|count| count.to_string());
    let details = Element::new("div")
        .with_child(labelled("Name:", profile.name.as_deref()))
        .with_child(labelled("Bio:", profile.bio.as_deref()))
        .with_child(labelled("Location:", profile.location.as_deref()))
        .with_child(labelled("Number of public repos:", public_repos.as_deref()));
    user_info.append_child(details);

    overview.append_child(user_info);
}

// `<p><strong>{label}</strong> {value}</p>`, with the placeholder for
// missing or blank values
fn labelled(label: &str, value: Option<&str>) -> Element {
    let value = value.filter(|v| !v.trim().is_empty()).unwrap_or(PLACEHOLDER);
    Element::new("p")
        .with_child(Element::new("strong").with_text(label))
        .with_text(&format!(" {}", value))
}

// Clears the filter box and appends the repositories to the list, in the
// order given.
//
// With `exclude_before` set, only repositories created strictly after that
// instant are added; a repository without a creation time cannot be shown to
// be after it and is left out. Returns how many items were added.
pub fn render_repository_list(
    filter_input: &mut Element,
    repo_list: &mut Element,
    repos: &[RepositorySummary],
    exclude_before: Option<DateTime<Utc>>,
) -> usize {
    filter_input.set_attr("value", "");

    let mut rendered = 0;
    for repo in repos {
        let keep = match exclude_before {
            None => true,
            Some(cutoff) => repo.created_at.is_some_and(|created| created > cutoff),
        };
        if keep {
            repo_list.append_child(list_item(&repo.name));
            rendered += 1;
        }
    }

    tracing::debug!(total = repos.len(), rendered, "rendered repository list");
    rendered
}

fn list_item(name: &str) -> Element {
    Element::new("li")
        .with_class(REPO_ITEM)
        .with_child(Element::new("h3").with_text(name))
}

// Replaces whatever the detail container holds with this repository
pub fn render_repository_detail(repo_data: &mut Element, detail: &RepositoryDetail) {
    repo_data.clear();

    let description = detail
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(PLACEHOLDER);
    let branch = if detail.default_branch.is_empty() {
        PLACEHOLDER
    } else {
        detail.default_branch.as_str()
    };

    let mut div = Element::new("div")
        .with_child(Element::new("h3").with_text(&format!("Name: {}", detail.name)))
        .with_child(Element::new("p").with_text(&format!("Description: {}", description)))
        .with_child(Element::new("p").with_text(&format!("Default Branch: {}", branch)))
        .with_child(
            Element::new("p").with_text(&format!("Languages: {}", detail.languages.join(", "))),
        );

    if !detail.html_url.is_empty() {
        div.append_child(
            Element::new("a")
                .with_class("visit")
                .with_attr("href", &detail.html_url)
                .with_attr("target", "_blank")
                .with_attr("rel", "noreferrer noopener")
                .with_text("View Repo on GitHub!"),
        );
    }

    repo_data.append_child(div);
}
