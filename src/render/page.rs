//! Paginated page rendering.
//!
//! Projects the current page of a document through its display-format
//! transform and writes the result to a display surface. The transform
//! is purely presentational: the container class changes, the text
//! never does.

use log::debug;

use crate::model::{DisplayFormat, Document};

use super::{DisplaySurface, RenderFrame, Transition};

/// Container class for a display format.
pub fn container_class(format: DisplayFormat) -> &'static str {
    match format {
        DisplayFormat::Standard => "text-standard",
        DisplayFormat::Dyslexic => "text-dyslexic",
        DisplayFormat::Large => "text-large",
        DisplayFormat::Contrast => "text-contrast",
    }
}

/// Build the frame for a document's current page.
///
/// Pure with respect to the document; the side effect lives in
/// [`render`].
pub fn frame_for(doc: &Document) -> RenderFrame {
    RenderFrame {
        container_class: container_class(doc.display_format()),
        text: doc.current_page().text.clone(),
        transition: Transition::default(),
        region: None,
    }
}

/// Render the document's current page to the surface.
pub fn render(doc: &Document, surface: &mut dyn DisplaySurface) {
    debug!(
        "rendering page {} of {} ({})",
        doc.current_index() + 1,
        doc.page_count(),
        doc.display_format()
    );
    surface.replace(frame_for(doc));
}
