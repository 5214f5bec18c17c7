//! # bookflow
//!
//! Document ingestion and paginated display pipeline for e-reader
//! frontends.
//!
//! A file arrives (PDF, EPUB, or TXT), is classified by MIME type and
//! filename, extracted by the matching format extractor with
//! incremental progress, and lands in an in-memory document model of
//! ordered pages. A paginated renderer projects the current page
//! through a presentational display format onto a display surface, and
//! navigation operations move through the pages one render at a time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bookflow::{NullProgress, ReaderSession, UploadedFile};
//! use bookflow::render::BufferSurface;
//!
//! fn main() -> bookflow::Result<()> {
//!     let mut session = ReaderSession::new(BufferSurface::new());
//!
//!     let file = UploadedFile::from_path("story.txt")?;
//!     session.upload(file, &mut NullProgress)?;
//!
//!     let nav = session.next()?;
//!     println!("{}", nav.label());
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Capability seams**: PDF and EPUB parsing sit behind traits
//!   ([`PdfCapability`], [`EpubCapability`]) with concrete `lopdf` and
//!   `epub`-crate implementations, so the pipeline is testable without
//!   real documents.
//! - **EPUB asymmetry**: EPUB owns its own pagination and renders
//!   directly into the display surface instead of producing pages;
//!   this is a deliberate seam.
//! - **Cancellation**: each upload invalidates the previous upload's
//!   token, so a stale extraction can never clobber a newer document.

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod nav;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use detect::{classify, is_supported, mime_for_path, SourceFormat};
pub use error::{Error, Result};
pub use extract::{
    CancelToken, EpubBook, EpubCapability, Extraction, ExtractionProgress, Extractor,
    ExtractorRegistry, NullProgress, PdfCapability, PdfPages, ProgressSink, UploadedFile,
};
pub use model::{DisplayFormat, Document, Page};
pub use nav::NavState;
pub use render::{BufferSurface, DisplaySurface, RegionSize, RenderFrame, Transition};
pub use session::{ReaderSession, UploadOutcome, UploadState};

use std::path::Path;

/// Extract a file into a paginated document, outside any session.
///
/// Convenience for tooling that wants the document model without a
/// display surface: classification and extraction run exactly as in a
/// session, but EPUBs are rejected since they only render delegated.
///
/// # Example
///
/// ```no_run
/// use bookflow::extract_document;
///
/// let doc = extract_document("book.pdf").unwrap();
/// println!("{} pages", doc.page_count());
/// ```
pub fn extract_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = UploadedFile::from_path(path)?;
    let format = classify(&file.mime, &file.name).ok_or_else(|| Error::UnsupportedFormat {
        mime: file.mime.clone(),
        filename: file.name.clone(),
    })?;

    let registry = ExtractorRegistry::with_defaults();
    let extractor = registry
        .get(format)
        .ok_or_else(|| Error::Other(format!("no extractor registered for {format}")))?;

    match extractor.extract(&file, &mut NullProgress, &CancelToken::new())? {
        Extraction::Pages(pages) => Document::new(pages, DisplayFormat::default()),
        Extraction::Delegated(_) => Err(Error::Other(
            "EPUB content renders delegated and has no page model".into(),
        )),
    }
}

/// Extract the full plain text of a file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = extract_document(path)?;
    Ok(doc.plain_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_document_txt() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "hello from disk").unwrap();

        let doc = extract_document(file.path()).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.plain_text(), "hello from disk");
    }

    #[test]
    fn test_extract_document_unsupported() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let result = extract_document(file.path());
        assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_extract_text_empty_file() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let result = extract_text(file.path());
        assert!(matches!(result, Err(Error::EmptyContent)));
    }
}
