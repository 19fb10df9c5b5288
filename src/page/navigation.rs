// src/page/navigation.rs
// =============================================================================
// Switching between the repository list and the repository detail view.
//
// Only two moves exist:
// - show_detail: hide the list section, reveal the detail section and the
//   back button
// - show_list: the reverse, discarding the rendered detail
//
// There is no history; "back" always means "back to the list". The filter box
// and the hidden/visible state of list items are left as they were.
// =============================================================================

use super::element::{Element, HIDE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Detail,
}

pub fn show_detail(repos_section: &mut Element, repo_data: &mut Element, back_button: &mut Element) {
    repo_data.remove_class(HIDE);
    back_button.remove_class(HIDE);
    repos_section.add_class(HIDE);
}

pub fn show_list(repos_section: &mut Element, repo_data: &mut Element, back_button: &mut Element) {
    repo_data.add_class(HIDE);
    repo_data.clear();
    back_button.add_class(HIDE);
    repos_section.remove_class(HIDE);
}
