//! Format-specific extraction.
//!
//! Each supported format has one extractor behind a common contract:
//! raw uploaded bytes in, either a page sequence or a delegated render
//! handle out, with incremental progress along the way. The registry
//! dispatches on the classified [`SourceFormat`].

mod epub;
mod pdf;
mod txt;

pub use epub::{EpubBook, EpubCapability, EpubExtractor, EpubReaderCapability, EPUB_CONTAINER_CLASS};
pub use pdf::{LopdfCapability, PdfCapability, PdfExtractor, PdfPages};
pub use txt::TxtExtractor;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::detect::{mime_for_path, SourceFormat};
use crate::error::{Error, Result};
use crate::model::Page;

/// An uploaded file awaiting extraction.
///
/// Transient: consumed by exactly one extractor and discarded once
/// extraction completes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as chosen by the uploader.
    pub name: String,
    /// Declared MIME type.
    pub mime: String,
    /// Raw bytes.
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload from its parts.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// Read a file from disk, inferring the declared MIME type from
    /// its extension (the CLI stand-in for a browser upload).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime: mime_for_path(path).to_string(),
            name,
            data,
        })
    }
}

/// A single progress tick during extraction.
///
/// Ephemeral: overwritten on every tick, never persisted. Percent is
/// monotonically non-decreasing within one extraction and reaches 100
/// immediately before success.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionProgress {
    /// Completion percentage in `[0, 100]`.
    pub percent: f32,
    /// Human-readable status line.
    pub message: String,
}

impl ExtractionProgress {
    /// Create a progress tick.
    pub fn new(percent: f32, message: impl Into<String>) -> Self {
        Self {
            percent,
            message: message.into(),
        }
    }
}

/// Receiver for extraction progress ticks.
pub trait ProgressSink {
    /// Called zero or more times before an extraction resolves.
    fn update(&mut self, progress: &ExtractionProgress);
}

impl<F: FnMut(&ExtractionProgress)> ProgressSink for F {
    fn update(&mut self, progress: &ExtractionProgress) {
        self(progress)
    }
}

/// Sink that discards all ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&mut self, _progress: &ExtractionProgress) {}
}

/// Cooperative cancellation signal for an in-flight extraction.
///
/// A new upload cancels the previous token so a stale extraction can
/// never clobber a newer document. Extractors poll between steps.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Return [`Error::Cancelled`] if the token has been cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// The outcome of a successful extraction.
pub enum Extraction {
    /// An ordered page sequence for the document model.
    Pages(Vec<Page>),
    /// Content handled by an external rendering capability (EPUB path);
    /// the handle renders itself into the display surface.
    Delegated(Box<dyn EpubBook>),
}

/// Common contract for format extractors.
pub trait Extractor: Send + Sync {
    /// The source format this extractor handles.
    fn format(&self) -> SourceFormat;

    /// Extract the uploaded file.
    ///
    /// On failure nothing partial is exposed; the whole extraction is
    /// discarded.
    fn extract(
        &self,
        file: &UploadedFile,
        progress: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Extraction>;
}

/// Registry mapping source formats to their extractors.
pub struct ExtractorRegistry {
    extractors: HashMap<SourceFormat, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Registry with the default extractors for all supported formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TxtExtractor::new()));
        registry.register(Arc::new(PdfExtractor::new(Arc::new(LopdfCapability))));
        registry.register(Arc::new(EpubExtractor::new(Arc::new(
            EpubReaderCapability::new(),
        ))));
        registry
    }

    /// Register an extractor under the format it reports.
    pub fn register(&mut self, extractor: Arc<dyn Extractor>) {
        self.extractors.insert(extractor.format(), extractor);
    }

    /// Look up the extractor for a format.
    pub fn get(&self, format: SourceFormat) -> Option<Arc<dyn Extractor>> {
        self.extractors.get(&format).cloned()
    }

    /// Whether a format has a registered extractor.
    pub fn supports(&self, format: SourceFormat) -> bool {
        self.extractors.contains_key(&format)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_defaults_cover_all_formats() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports(SourceFormat::Pdf));
        assert!(registry.supports(SourceFormat::Epub));
        assert!(registry.supports(SourceFormat::Txt));
    }

    #[test]
    fn test_registry_empty() {
        let registry = ExtractorRegistry::new();
        assert!(!registry.supports(SourceFormat::Txt));
        assert!(registry.get(SourceFormat::Pdf).is_none());
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());

        let handle = token.clone();
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(Error::Cancelled)));
    }

    #[test]
    fn test_uploaded_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.txt");
        fs::write(&path, "once upon a time").unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "story.txt");
        assert_eq!(file.mime, "text/plain");
        assert_eq!(file.data, b"once upon a time");
    }

    #[test]
    fn test_progress_sink_closure() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: &ExtractionProgress| seen.push(p.percent);
            let tick = ExtractionProgress::new(20.0, "Loading PDF...");
            ProgressSink::update(&mut sink, &tick);
        }
        assert_eq!(seen, vec![20.0]);
    }
}
