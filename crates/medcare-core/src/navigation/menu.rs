//! Sidebar menu model.
//!
//! The menu is a fixed two-level tree: top-level entries either select a
//! page directly or group a set of sub-entries ("Patients"). Grouping is
//! purely presentational; group ids live in the navigation state's
//! expanded set and never become the current page.

use super::page::Page;

/// One entry in the sidebar menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Stable identifier (page id for leaves, group id otherwise)
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// The page this entry selects; `None` for groups
    pub page: Option<Page>,
    /// Sub-entries; empty for leaves
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    fn leaf(id: &'static str, label: &'static str, page: Page) -> Self {
        Self {
            id,
            label,
            page: Some(page),
            children: Vec::new(),
        }
    }

    fn group(id: &'static str, label: &'static str, children: Vec<MenuItem>) -> Self {
        Self {
            id,
            label,
            page: None,
            children,
        }
    }

    /// Whether this entry groups sub-entries instead of selecting a page.
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this entry, or one of its sub-entries, selects `page`.
    ///
    /// Used to highlight a collapsed group as active when the current page
    /// lives inside it.
    pub fn contains_page(&self, page: Page) -> bool {
        self.page == Some(page) || self.children.iter().any(|child| child.page == Some(page))
    }
}

/// The fixed main menu shown in the sidebar.
pub fn main_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("dashboard", "Dashboard", Page::Dashboard),
        MenuItem::group(
            "patients",
            "Patients",
            vec![
                MenuItem::leaf("existing-patients", "Existing Patients", Page::ExistingPatients),
                MenuItem::leaf("enroll-patients", "Enroll Patients", Page::EnrollPatients),
            ],
        ),
        MenuItem::leaf("diagnosis", "Previous Diagnosis", Page::Diagnosis),
        MenuItem::leaf("flagged", "Flagged for Review", Page::Flagged),
        MenuItem::leaf("config", "Configurations", Page::Config),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_shape() {
        let menu = main_menu();
        assert_eq!(menu.len(), 5);

        let patients = menu.iter().find(|item| item.id == "patients").unwrap();
        assert!(patients.is_group());
        assert!(patients.page.is_none());
        assert_eq!(patients.children.len(), 2);
    }

    #[test]
    fn test_contains_page() {
        let menu = main_menu();
        let patients = menu.iter().find(|item| item.id == "patients").unwrap();

        assert!(patients.contains_page(Page::ExistingPatients));
        assert!(patients.contains_page(Page::EnrollPatients));
        assert!(!patients.contains_page(Page::Dashboard));
    }

    #[test]
    fn test_leaf_ids_match_page_identifiers() {
        for item in main_menu() {
            if let Some(page) = item.page {
                assert_eq!(item.id, page.to_string());
            }
            for child in &item.children {
                assert_eq!(child.id, child.page.unwrap().to_string());
            }
        }
    }
}
