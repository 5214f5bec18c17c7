//! Plain-text extraction.

use log::debug;

use crate::detect::SourceFormat;
use crate::error::{Error, Result};
use crate::model::Page;

use super::{
    CancelToken, Extraction, ExtractionProgress, Extractor, ProgressSink, UploadedFile,
};

/// Extractor for `text/*` uploads.
///
/// Plain text has no native pagination, so the whole blob becomes a
/// single page. The text is stored raw; emptiness is judged on the
/// trimmed content.
#[derive(Debug, Default)]
pub struct TxtExtractor;

impl TxtExtractor {
    /// Create a TXT extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for TxtExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Txt
    }

    fn extract(
        &self,
        file: &UploadedFile,
        progress: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Extraction> {
        cancel.check()?;
        progress.update(&ExtractionProgress::new(30.0, "Reading text file..."));

        let text = String::from_utf8_lossy(&file.data).into_owned();
        if text.trim().is_empty() {
            return Err(Error::EmptyContent);
        }

        debug!("txt extraction: {} bytes from {}", text.len(), file.name);
        progress.update(&ExtractionProgress::new(100.0, "Complete!"));
        Ok(Extraction::Pages(vec![Page::new(0, text)]))
    }
}
