//! The upload session: lifecycle state machine for one display surface.
//!
//! A session owns the single mutable "active document" resource and
//! drives one upload at a time through
//! `Idle → Validating → Extracting → (FormatSelection | Ready)` with
//! `Error` reachable from the validating and extracting states. A new
//! upload restarts the machine and invalidates the previous upload's
//! cancellation token, so a stale extraction can never clobber a newer
//! document.

use log::{info, warn};

use crate::detect::{classify, SourceFormat};
use crate::error::{Error, Result};
use crate::extract::{
    CancelToken, Extraction, ExtractorRegistry, ProgressSink, UploadedFile,
};
use crate::model::{DisplayFormat, Document};
use crate::nav::NavState;
use crate::render::{self, DisplaySurface, RegionSize};

/// Lifecycle state of the current upload attempt.
///
/// `Error` and `Ready` are terminal for the attempt; the next upload
/// restarts from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    /// No upload has happened yet.
    Idle,
    /// Classifying the uploaded file.
    Validating,
    /// An extractor is running.
    Extracting,
    /// A paginated document is staged, awaiting a display format (PDF path).
    FormatSelection,
    /// Content is on the display surface.
    Ready,
    /// The attempt failed; the surface shows the error.
    Error,
}

/// What a successful upload produced.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// A paginated document is staged; call
    /// [`ReaderSession::select_format`] to render it.
    AwaitingFormat {
        /// Number of pages in the staged document.
        page_count: usize,
    },
    /// The document is rendered and navigable.
    Ready {
        /// Success notification for the user.
        notice: String,
        /// Navigation affordance state.
        nav: NavState,
    },
    /// Content was rendered by an external capability (EPUB path);
    /// page navigation is unavailable.
    Delegated {
        /// Success notification for the user.
        notice: String,
    },
}

/// Owner of the active document and the display surface.
pub struct ReaderSession<S: DisplaySurface> {
    registry: ExtractorRegistry,
    surface: S,
    state: UploadState,
    document: Option<Document>,
    file_name: String,
    cancel: Option<CancelToken>,
    epub_region: RegionSize,
}

impl<S: DisplaySurface> ReaderSession<S> {
    /// Create a session with the default extractors.
    pub fn new(surface: S) -> Self {
        Self::with_registry(surface, ExtractorRegistry::with_defaults())
    }

    /// Create a session with a custom extractor registry.
    pub fn with_registry(surface: S, registry: ExtractorRegistry) -> Self {
        Self {
            registry,
            surface,
            state: UploadState::Idle,
            document: None,
            file_name: String::new(),
            cancel: None,
            epub_region: RegionSize::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> UploadState {
        self.state
    }

    /// The active paginated document, if one is loaded.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Cancellation handle for the in-flight extraction, if any.
    pub fn cancel_handle(&self) -> Option<CancelToken> {
        self.cancel.clone()
    }

    /// Region size handed to the EPUB capability.
    pub fn set_epub_region(&mut self, region: RegionSize) {
        self.epub_region = region;
    }

    /// Run one upload through the pipeline.
    ///
    /// On failure the surface shows the error and the previously
    /// loaded document value, if any, is left untouched; only a
    /// successful upload replaces it.
    pub fn upload(
        &mut self,
        file: UploadedFile,
        progress: &mut dyn ProgressSink,
    ) -> Result<UploadOutcome> {
        self.state = UploadState::Validating;

        let Some(format) = classify(&file.mime, &file.name) else {
            let err = Error::UnsupportedFormat {
                mime: file.mime.clone(),
                filename: file.name.clone(),
            };
            self.surface
                .show_error(err.title(), "Please upload a PDF, EPUB, or TXT file.");
            self.state = UploadState::Error;
            return Err(err);
        };

        // Invalidate any extraction still in flight from a previous upload.
        if let Some(stale) = self.cancel.take() {
            stale.cancel();
        }
        let token = CancelToken::new();
        self.cancel = Some(token.clone());

        let Some(extractor) = self.registry.get(format) else {
            let err = Error::Other(format!("no extractor registered for {format}"));
            return Err(self.fail(err));
        };

        info!("extracting {} as {format}", file.name);
        self.state = UploadState::Extracting;

        match extractor.extract(&file, progress, &token) {
            Ok(Extraction::Pages(pages)) => {
                let doc = match Document::new(pages, DisplayFormat::default()) {
                    Ok(doc) => doc,
                    Err(e) => return Err(self.fail(e)),
                };
                let page_count = doc.page_count();
                self.document = Some(doc);
                self.file_name = file.name;

                if format == SourceFormat::Pdf {
                    // The PDF path lets the reader pick a display
                    // transform before anything is rendered.
                    self.state = UploadState::FormatSelection;
                    Ok(UploadOutcome::AwaitingFormat { page_count })
                } else {
                    self.state = UploadState::Ready;
                    let nav = self.render_current();
                    Ok(UploadOutcome::Ready {
                        notice: format!("{} loaded successfully!", self.file_name),
                        nav,
                    })
                }
            }
            Ok(Extraction::Delegated(mut book)) => {
                if let Err(e) = book.render_into(&mut self.surface, &self.epub_region) {
                    return Err(self.fail(e));
                }
                self.document = None;
                self.file_name = file.name;
                self.state = UploadState::Ready;
                Ok(UploadOutcome::Delegated {
                    notice: format!("EPUB loaded: {}", self.file_name),
                })
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Pick the display transform for a staged PDF document and render
    /// its first page.
    pub fn select_format(&mut self, format: DisplayFormat) -> Result<UploadOutcome> {
        if self.state != UploadState::FormatSelection {
            return Err(Error::Other("no format selection is pending".into()));
        }
        let Some(doc) = self.document.as_mut() else {
            return Err(Error::Other("no format selection is pending".into()));
        };

        doc.set_format(format);
        self.state = UploadState::Ready;
        let nav = self.render_current();
        Ok(UploadOutcome::Ready {
            notice: format!(
                "{} loaded with {} format!",
                self.file_name,
                format.display_name()
            ),
            nav,
        })
    }

    /// Change the display transform of the active document and re-render.
    pub fn set_format(&mut self, format: DisplayFormat) -> Result<NavState> {
        self.navigate(|doc| {
            doc.set_format(format);
            true
        })
    }

    /// Move to the next page; no-op at the last page.
    pub fn next(&mut self) -> Result<NavState> {
        self.navigate(|doc| doc.step(1))
    }

    /// Move to the previous page; no-op at the first page.
    pub fn previous(&mut self) -> Result<NavState> {
        self.navigate(|doc| doc.step(-1))
    }

    /// Jump to a 1-based page number; out-of-range requests are
    /// rejected without mutating state.
    pub fn jump_to(&mut self, page_number: usize) -> Result<NavState> {
        self.navigate(|doc| doc.jump_to(page_number))
    }

    /// Apply a navigation operation; exactly one render per successful
    /// move, none for a boundary no-op.
    fn navigate(&mut self, op: impl FnOnce(&mut Document) -> bool) -> Result<NavState> {
        if self.state != UploadState::Ready {
            return Err(Error::Other("no document is ready".into()));
        }
        let Some(doc) = self.document.as_mut() else {
            return Err(Error::Other(
                "the current content has no page navigation".into(),
            ));
        };

        if op(doc) {
            render::render(doc, &mut self.surface);
        }
        Ok(NavState::of(doc))
    }

    /// Render the current page and return the refreshed nav state.
    ///
    /// Only called with a document present; falls back to a degenerate
    /// state rather than panicking if that ever breaks.
    fn render_current(&mut self) -> NavState {
        match self.document.as_ref() {
            Some(doc) => {
                render::render(doc, &mut self.surface);
                NavState::of(doc)
            }
            None => NavState {
                current_page: 0,
                page_count: 0,
                prev_enabled: false,
                next_enabled: false,
            },
        }
    }

    /// Record a failed attempt: show the error and enter the terminal
    /// `Error` state. A cancelled extraction is stale by definition and
    /// must not overwrite whatever the newer upload has displayed.
    fn fail(&mut self, err: Error) -> Error {
        warn!("upload failed: {err}");
        if !matches!(err, Error::Cancelled) {
            self.surface.show_error(err.title(), &err.to_string());
            self.state = UploadState::Error;
        }
        err
    }
}
