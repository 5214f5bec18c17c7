//! PDF extraction behind a capability seam.
//!
//! PDF pagination is the source of truth for page boundaries, so the
//! extractor walks physical pages in order and emits one [`Page`] per
//! page. The concrete document access sits behind [`PdfCapability`],
//! isolating `lopdf` from the pipeline logic.

use std::sync::Arc;

use log::{debug, warn};

use crate::detect::SourceFormat;
use crate::error::{Error, Result};
use crate::model::Page;

use super::{
    CancelToken, Extraction, ExtractionProgress, Extractor, ProgressSink, UploadedFile,
};

/// Abstract interface for PDF document access.
///
/// Implementations open raw bytes into a page-addressable handle
/// without exposing any concrete PDF library types.
pub trait PdfCapability: Send + Sync {
    /// Open a document from raw bytes.
    fn open(&self, data: &[u8]) -> Result<Box<dyn PdfPages>>;
}

/// An opened PDF document: a page count and per-page text access.
pub trait PdfPages {
    /// Total number of physical pages.
    fn page_count(&self) -> usize;

    /// Text content of a page (1-based page number).
    fn page_text(&self, number: usize) -> Result<String>;
}

// Progress ramp: document load lands at 20%, per-page extraction fills
// 20..=90, finish pushes to 100.
const LOAD_PERCENT: f32 = 20.0;
const PAGE_SPAN_PERCENT: f32 = 70.0;

/// Extractor for PDF uploads.
pub struct PdfExtractor {
    capability: Arc<dyn PdfCapability>,
}

impl PdfExtractor {
    /// Create a PDF extractor over the given capability.
    pub fn new(capability: Arc<dyn PdfCapability>) -> Self {
        Self { capability }
    }
}

impl Extractor for PdfExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Pdf
    }

    fn extract(
        &self,
        file: &UploadedFile,
        progress: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Extraction> {
        cancel.check()?;
        progress.update(&ExtractionProgress::new(LOAD_PERCENT, "Loading PDF..."));

        let doc = self
            .capability
            .open(&file.data)
            .map_err(|e| match e {
                Error::PdfLoad(_) => e,
                other => Error::PdfLoad(other.to_string()),
            })?;

        let num_pages = doc.page_count();
        if num_pages == 0 {
            return Err(Error::EmptyContent);
        }

        let mut pages = Vec::with_capacity(num_pages);
        for page_num in 1..=num_pages {
            cancel.check()?;

            let text = doc.page_text(page_num)?;
            pages.push(Page::new(page_num - 1, text.trim()));

            let percent = LOAD_PERCENT + (page_num as f32 / num_pages as f32) * PAGE_SPAN_PERCENT;
            progress.update(&ExtractionProgress::new(
                percent,
                format!("Processing page {page_num} of {num_pages}..."),
            ));
        }

        if pages.iter().all(|p| p.is_blank()) {
            warn!("pdf {} has {} pages but no extractable text", file.name, num_pages);
            return Err(Error::EmptyContent);
        }

        debug!("pdf extraction: {} pages from {}", pages.len(), file.name);
        progress.update(&ExtractionProgress::new(100.0, "Complete!"));
        Ok(Extraction::Pages(pages))
    }
}

// ---------------------------------------------------------------------------
// LopdfCapability — concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfCapability`] backed by [`lopdf::Document`].
#[derive(Debug, Default)]
pub struct LopdfCapability;

struct LopdfPages {
    doc: lopdf::Document,
    // Physical page numbers in document order; lopdf keys pages by
    // number already, the vec just pins the ordering.
    numbers: Vec<u32>,
}

impl PdfCapability for LopdfCapability {
    fn open(&self, data: &[u8]) -> Result<Box<dyn PdfPages>> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::PdfLoad(e.to_string()))?;
        let numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        Ok(Box::new(LopdfPages { doc, numbers }))
    }
}

impl PdfPages for LopdfPages {
    fn page_count(&self) -> usize {
        self.numbers.len()
    }

    fn page_text(&self, number: usize) -> Result<String> {
        let page = self
            .numbers
            .get(number - 1)
            .copied()
            .ok_or_else(|| Error::PdfLoad(format!("page {number} out of range")))?;
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::PdfLoad(format!("page {number}: {e}")))
    }
}
