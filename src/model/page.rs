//! Page-level types.

use serde::{Deserialize, Serialize};

/// One unit of paginated text content with a stable index.
///
/// Pages are created during extraction and never change afterwards;
/// the set of pages for a document is fixed once extraction completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Position in the document (0-based).
    pub index: usize,

    /// Extracted text content.
    pub text: String,
}

impl Page {
    /// Create a new page.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Check if the page has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of whitespace-separated words on the page.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
