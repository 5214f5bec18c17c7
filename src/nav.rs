//! Navigation affordance state.
//!
//! The view-model side of the previous/next/jump controls: which
//! affordances are operable (and should be exposed as such to
//! assistive technology) and what the page indicator reads.

use serde::{Deserialize, Serialize};

use crate::model::Document;

/// Snapshot of the navigation controls for a document position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    /// Current page, 1-based as shown to the reader.
    pub current_page: usize,

    /// Total pages.
    pub page_count: usize,

    /// Whether the previous affordance is operable.
    pub prev_enabled: bool,

    /// Whether the next affordance is operable.
    pub next_enabled: bool,
}

impl NavState {
    /// Derive the navigation state from a document.
    pub fn of(doc: &Document) -> Self {
        Self {
            current_page: doc.current_index() + 1,
            page_count: doc.page_count(),
            prev_enabled: !doc.at_first(),
            next_enabled: !doc.at_last(),
        }
    }

    /// Page indicator text.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.page_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayFormat, Page};

    fn doc(pages: usize) -> Document {
        let pages = (0..pages).map(|i| Page::new(i, format!("p{i}"))).collect();
        Document::new(pages, DisplayFormat::Standard).unwrap()
    }

    #[test]
    fn test_nav_state_first_page() {
        let nav = NavState::of(&doc(3));
        assert_eq!(nav.current_page, 1);
        assert_eq!(nav.page_count, 3);
        assert!(!nav.prev_enabled);
        assert!(nav.next_enabled);
        assert_eq!(nav.label(), "Page 1 of 3");
    }

    #[test]
    fn test_nav_state_last_page() {
        let mut d = doc(3);
        d.go_to(2);
        let nav = NavState::of(&d);
        assert!(nav.prev_enabled);
        assert!(!nav.next_enabled);
        assert_eq!(nav.label(), "Page 3 of 3");
    }

    #[test]
    fn test_nav_state_middle() {
        let mut d = doc(3);
        d.go_to(1);
        let nav = NavState::of(&d);
        assert!(nav.prev_enabled);
        assert!(nav.next_enabled);
    }

    #[test]
    fn test_nav_state_single_page_disables_both() {
        let nav = NavState::of(&doc(1));
        assert!(!nav.prev_enabled);
        assert!(!nav.next_enabled);
    }
}
