//! The display surface seam.
//!
//! A display surface is the single addressable region the paginated
//! renderer and the EPUB capability both write into, mutually
//! exclusively per document. The trait keeps renderers unit-testable
//! without a markup engine behind them.

/// How a content replacement is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Swap content with no effect.
    Immediate,
    /// Fade out, replace, fade back in over the given duration.
    Fade {
        /// Fade duration in milliseconds.
        millis: u32,
    },
}

impl Default for Transition {
    fn default() -> Self {
        Transition::Fade { millis: 300 }
    }
}

/// Percentage-based sizing for a delegated render region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSize {
    /// CSS-style width (e.g. `"100%"`).
    pub width: String,
    /// CSS-style height.
    pub height: String,
}

impl Default for RegionSize {
    fn default() -> Self {
        Self {
            width: "100%".into(),
            height: "100%".into(),
        }
    }
}

/// A fully-resolved unit of content for the display surface.
///
/// The frame is a declarative view model: the surface decides how the
/// container class and transition map onto its own medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// Container class keyed by the display format (or `epub-view` for
    /// delegated content).
    pub container_class: &'static str,

    /// The text content, unmodified by the presentational wrapper.
    pub text: String,

    /// Presentation of the swap.
    pub transition: Transition,

    /// Region sizing for delegated content; `None` for paged frames.
    pub region: Option<RegionSize>,
}

/// A single addressable region content is written into.
pub trait DisplaySurface {
    /// Replace the surface content with a new frame.
    fn replace(&mut self, frame: RenderFrame);

    /// Replace the surface content with an error message.
    fn show_error(&mut self, title: &str, message: &str);
}

/// In-memory display surface.
///
/// Records the most recent frame or error; what the CLI prints from
/// and what the tests assert against.
#[derive(Debug, Default)]
pub struct BufferSurface {
    last_frame: Option<RenderFrame>,
    last_error: Option<(String, String)>,
}

impl BufferSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered frame, if the last write was content.
    pub fn frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    /// The most recently shown error as `(title, message)`, if the last
    /// write was an error.
    pub fn error(&self) -> Option<(&str, &str)> {
        self.last_error
            .as_ref()
            .map(|(t, m)| (t.as_str(), m.as_str()))
    }

    /// Whether anything has been written yet.
    pub fn is_empty(&self) -> bool {
        self.last_frame.is_none() && self.last_error.is_none()
    }
}

impl DisplaySurface for BufferSurface {
    fn replace(&mut self, frame: RenderFrame) {
        self.last_error = None;
        self.last_frame = Some(frame);
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.last_frame = None;
        self.last_error = Some((title.to_string(), message.to_string()));
    }
}
