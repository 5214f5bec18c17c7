//! Document-level types and navigation operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Page;
use crate::error::{Error, Result};

/// A purely presentational transform applied to page text at render time.
///
/// Changing the format never re-extracts or mutates text; it only
/// selects the container the renderer wraps the page in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Regular reading view.
    #[default]
    Standard,
    /// Dyslexic-friendly typeface and spacing.
    Dyslexic,
    /// Large print.
    Large,
    /// High contrast.
    Contrast,
}

impl DisplayFormat {
    /// All formats, in selection-menu order.
    pub const ALL: [DisplayFormat; 4] = [
        DisplayFormat::Standard,
        DisplayFormat::Dyslexic,
        DisplayFormat::Large,
        DisplayFormat::Contrast,
    ];

    /// Human-readable name for notifications and menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            DisplayFormat::Standard => "Standard",
            DisplayFormat::Dyslexic => "Dyslexic-Friendly",
            DisplayFormat::Large => "Large Print",
            DisplayFormat::Contrast => "High Contrast",
        }
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DisplayFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(DisplayFormat::Standard),
            "dyslexic" => Ok(DisplayFormat::Dyslexic),
            "large" => Ok(DisplayFormat::Large),
            "contrast" => Ok(DisplayFormat::Contrast),
            other => Err(Error::Other(format!("unknown display format: {other}"))),
        }
    }
}

/// The in-memory model of an extracted document.
///
/// Owns its pages exclusively. `current_index` is always a valid index
/// into `pages`; construction fails rather than produce a document the
/// invariant cannot hold for. A new upload replaces the whole value,
/// it never mutates pages in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pages: Vec<Page>,
    current_index: usize,
    display_format: DisplayFormat,
}

impl Document {
    /// Create a document positioned at its first page.
    ///
    /// Returns [`Error::InvalidDocument`] for an empty page list.
    pub fn new(pages: Vec<Page>, display_format: DisplayFormat) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::InvalidDocument(
                "a document must have at least one page".into(),
            ));
        }
        Ok(Self {
            pages,
            current_index: 0,
            display_format,
        })
    }

    /// Wrap a single text blob as a one-page document.
    pub fn single_page(text: impl Into<String>, display_format: DisplayFormat) -> Self {
        Self {
            pages: vec![Page::new(0, text)],
            current_index: 0,
            display_format,
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages, in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The page the reader is currently on.
    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_index]
    }

    /// Current position (0-based).
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The display transform applied at render time.
    pub fn display_format(&self) -> DisplayFormat {
        self.display_format
    }

    /// Whether the reader is on the first page.
    pub fn at_first(&self) -> bool {
        self.current_index == 0
    }

    /// Whether the reader is on the last page.
    pub fn at_last(&self) -> bool {
        self.current_index == self.pages.len() - 1
    }

    /// Move to an absolute 0-based index.
    ///
    /// Out-of-range requests are rejected without mutating state;
    /// returns whether the position changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Move by a signed page delta (typically ±1).
    pub fn step(&mut self, delta: isize) -> bool {
        match self.current_index.checked_add_signed(delta) {
            Some(target) => self.go_to(target),
            None => false,
        }
    }

    /// Jump to a 1-based page number, as shown in navigation controls.
    pub fn jump_to(&mut self, page_number: usize) -> bool {
        if page_number == 0 {
            return false;
        }
        self.go_to(page_number - 1)
    }

    /// Replace the display format, leaving the position untouched.
    pub fn set_format(&mut self, format: DisplayFormat) {
        self.display_format = format;
    }

    /// Full text of the document, pages joined by blank lines.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
