// src/page/filter.rs
// Search-box filtering of the rendered repository list.

use super::element::{Element, HIDE};

/// Class carried by every repository list item
pub const REPO_ITEM: &str = "repo";

// Stores `search` in the filter input and hides every `.repo` item whose text
// does not contain it, ignoring case. An empty search shows everything.
//
// Only the `hide` class changes; the items themselves stay in place.
// Returns the number of items left visible.
pub fn apply_filter(filter_input: &mut Element, repo_list: &mut Element, search: &str) -> usize {
    filter_input.set_attr("value", search);
    let needle = search.to_lowercase();

    let mut visible = 0;
    for item in repo_list.elements_mut().filter(|e| e.has_class(REPO_ITEM)) {
        let matches = item.text_content().to_lowercase().contains(&needle);
        item.set_class(HIDE, !matches);
        if matches {
            visible += 1;
        }
    }
    visible
}
