//! Navigation state: current page, sidebar flag, expanded menu groups.

use std::collections::HashSet;

use super::menu::MenuItem;
use super::page::Page;

/// What activating a menu entry did to the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// A leaf entry selected a page.
    PageSelected(Page),
    /// A group entry was expanded or collapsed.
    GroupToggled { expanded: bool },
}

/// Mutable state of the navigational shell.
///
/// Created when the shell mounts (a session exists) and discarded when it
/// unmounts; never persisted. Independent of the session itself: toggling
/// the sidebar or expanding a group neither reads nor writes identity
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_page: Page,
    sidebar_collapsed: bool,
    expanded_groups: HashSet<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        // The patients group starts expanded, matching the initial shell.
        let mut expanded_groups = HashSet::new();
        expanded_groups.insert("patients".to_string());

        Self {
            current_page: Page::default(),
            sidebar_collapsed: false,
            expanded_groups,
        }
    }
}

impl NavigationState {
    /// Creates the state a freshly mounted shell starts with.
    pub fn new() -> Self {
        Self::default()
    }

    /// The page currently selected for rendering.
    pub fn current_page(&self) -> Page {
        self.current_page
    }

    /// Selects `page` as the current page. Total over the enum; unknown
    /// identifier strings are rejected earlier, by [`Page::parse`].
    pub fn set_current_page(&mut self, page: Page) {
        self.current_page = page;
    }

    /// Whether the sidebar is collapsed to its narrow form.
    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    /// Flips the sidebar-collapsed flag.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }

    /// Whether the menu group `id` is expanded.
    pub fn is_group_expanded(&self, id: &str) -> bool {
        self.expanded_groups.contains(id)
    }

    /// Adds/removes `id` from the expanded-group set and returns the new
    /// membership. The toggle is its own inverse; ids that match no menu
    /// group are tolerated.
    pub fn toggle_group(&mut self, id: &str) -> bool {
        if self.expanded_groups.remove(id) {
            false
        } else {
            self.expanded_groups.insert(id.to_string());
            true
        }
    }

    /// Applies the sidebar click behavior for `item`.
    ///
    /// Leaves select their page. Groups toggle their expansion - except
    /// when the sidebar is collapsed, in which case activating a group
    /// first expands the sidebar and then makes sure the group is open.
    pub fn activate(&mut self, item: &MenuItem) -> MenuOutcome {
        if !item.is_group() {
            let page = item.page.unwrap_or_default();
            self.set_current_page(page);
            return MenuOutcome::PageSelected(page);
        }

        if self.sidebar_collapsed {
            self.sidebar_collapsed = false;
            if !self.is_group_expanded(item.id) {
                self.toggle_group(item.id);
            }
            MenuOutcome::GroupToggled { expanded: true }
        } else {
            let expanded = self.toggle_group(item.id);
            MenuOutcome::GroupToggled { expanded }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::menu::main_menu;

    fn item(id: &str) -> MenuItem {
        main_menu().into_iter().find(|m| m.id == id).unwrap()
    }

    #[test]
    fn test_defaults() {
        let nav = NavigationState::new();
        assert_eq!(nav.current_page(), Page::Dashboard);
        assert!(!nav.is_sidebar_collapsed());
        assert!(nav.is_group_expanded("patients"));
    }

    #[test]
    fn test_toggle_sidebar_flips() {
        let mut nav = NavigationState::new();
        assert!(nav.toggle_sidebar());
        assert!(nav.is_sidebar_collapsed());
        assert!(!nav.toggle_sidebar());
        assert!(!nav.is_sidebar_collapsed());
    }

    #[test]
    fn test_toggle_group_is_its_own_inverse() {
        let mut nav = NavigationState::new();
        let before = nav.clone();

        nav.toggle_group("patients");
        assert!(!nav.is_group_expanded("patients"));
        nav.toggle_group("patients");

        assert_eq!(nav, before);
    }

    #[test]
    fn test_toggle_unknown_group_is_tolerated() {
        let mut nav = NavigationState::new();
        assert!(nav.toggle_group("no-such-group"));
        assert!(!nav.toggle_group("no-such-group"));
    }

    #[test]
    fn test_activate_leaf_selects_page() {
        let mut nav = NavigationState::new();
        let outcome = nav.activate(&item("diagnosis"));

        assert_eq!(outcome, MenuOutcome::PageSelected(Page::Diagnosis));
        assert_eq!(nav.current_page(), Page::Diagnosis);
    }

    #[test]
    fn test_activate_group_toggles_expansion() {
        let mut nav = NavigationState::new();
        let patients = item("patients");

        assert_eq!(
            nav.activate(&patients),
            MenuOutcome::GroupToggled { expanded: false }
        );
        assert_eq!(
            nav.activate(&patients),
            MenuOutcome::GroupToggled { expanded: true }
        );
        // Group activation never changes the current page.
        assert_eq!(nav.current_page(), Page::Dashboard);
    }

    #[test]
    fn test_activate_group_while_collapsed_expands_sidebar() {
        let mut nav = NavigationState::new();
        nav.toggle_sidebar();
        nav.toggle_group("patients"); // close it first

        let outcome = nav.activate(&item("patients"));

        assert_eq!(outcome, MenuOutcome::GroupToggled { expanded: true });
        assert!(!nav.is_sidebar_collapsed());
        assert!(nav.is_group_expanded("patients"));
    }
}
