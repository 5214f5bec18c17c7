//! EPUB extraction behind a capability seam.
//!
//! EPUB owns its own internal pagination, which is incompatible with
//! the flat page-sequence model. Extraction therefore opens and
//! validates the container, then hands back an [`EpubBook`] that
//! renders itself directly into the display surface. This is a
//! deliberate architectural seam, not an oversight.

use std::io::Cursor;
use std::sync::Arc;

use log::{debug, warn};

use epub::doc::EpubDoc;

use crate::detect::SourceFormat;
use crate::error::{Error, Result};
use crate::render::{DisplaySurface, RegionSize, RenderFrame, Transition};

use super::{
    CancelToken, Extraction, ExtractionProgress, Extractor, ProgressSink, UploadedFile,
};

/// Container class the delegated renderer writes under.
pub const EPUB_CONTAINER_CLASS: &str = "epub-view";

/// Abstract interface for EPUB container access.
pub trait EpubCapability: Send + Sync {
    /// Open and validate a container from raw bytes.
    fn open(&self, data: &[u8]) -> Result<Box<dyn EpubBook>>;
}

/// An opened EPUB, able to render itself into a display region.
pub trait EpubBook {
    /// Title from the container metadata, if present.
    fn title(&self) -> Option<String>;

    /// Render the book's content into the surface at the given size.
    fn render_into(&mut self, surface: &mut dyn DisplaySurface, size: &RegionSize) -> Result<()>;
}

/// Extractor for EPUB uploads.
pub struct EpubExtractor {
    capability: Arc<dyn EpubCapability>,
}

impl EpubExtractor {
    /// Create an EPUB extractor over the given capability.
    pub fn new(capability: Arc<dyn EpubCapability>) -> Self {
        Self { capability }
    }
}

impl Extractor for EpubExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Epub
    }

    fn extract(
        &self,
        file: &UploadedFile,
        progress: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Extraction> {
        cancel.check()?;
        progress.update(&ExtractionProgress::new(50.0, "Loading EPUB..."));

        let book = self.capability.open(&file.data).map_err(|e| match e {
            Error::EpubLoad(_) => e,
            other => Error::EpubLoad(other.to_string()),
        })?;

        debug!(
            "epub container opened: {} ({:?})",
            file.name,
            book.title()
        );
        progress.update(&ExtractionProgress::new(100.0, "Complete!"));
        Ok(Extraction::Delegated(book))
    }
}

// ---------------------------------------------------------------------------
// EpubReaderCapability — concrete implementation backed by the epub crate
// ---------------------------------------------------------------------------

/// Concrete [`EpubCapability`] backed by [`epub::doc::EpubDoc`].
///
/// Renders by walking the spine, stripping markup with `html2text`,
/// and writing the joined chapters to the surface in one frame.
#[derive(Debug, Default)]
pub struct EpubReaderCapability;

impl EpubReaderCapability {
    /// Create the default EPUB capability.
    pub fn new() -> Self {
        Self
    }
}

struct EpubReaderBook {
    doc: EpubDoc<Cursor<Vec<u8>>>,
}

impl EpubCapability for EpubReaderCapability {
    fn open(&self, data: &[u8]) -> Result<Box<dyn EpubBook>> {
        let doc = EpubDoc::from_reader(Cursor::new(data.to_vec()))
            .map_err(|e| Error::EpubLoad(e.to_string()))?;
        Ok(Box::new(EpubReaderBook { doc }))
    }
}

impl EpubBook for EpubReaderBook {
    fn title(&self) -> Option<String> {
        self.doc.mdata("title")
    }

    fn render_into(&mut self, surface: &mut dyn DisplaySurface, size: &RegionSize) -> Result<()> {
        let mut combined = String::new();
        let mut chapter = 0usize;

        loop {
            if let Some((content, _mime)) = self.doc.get_current_str() {
                chapter += 1;
                if !combined.is_empty() {
                    combined.push_str("\n\n");
                }
                // Very large width: wrapping belongs to the surface,
                // not the markup stripper.
                match html2text::from_read(content.as_bytes(), 10_000) {
                    Ok(plain) => combined.push_str(plain.trim_end()),
                    Err(e) => {
                        warn!("chapter {chapter}: html2text failed: {e}");
                        combined.push_str(&content);
                    }
                }
            }
            if !self.doc.go_next() {
                break;
            }
        }

        if combined.trim().is_empty() {
            return Err(Error::EpubLoad("container has no readable content".into()));
        }

        debug!("epub rendered: {chapter} chapters, {} chars", combined.len());
        surface.replace(RenderFrame {
            container_class: EPUB_CONTAINER_CLASS,
            text: combined,
            transition: Transition::default(),
            region: Some(size.clone()),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::NullProgress;
    use crate::render::BufferSurface;

    /// Capability whose books render a fixed string.
    struct FakeCapability {
        content: &'static str,
        fail_open: bool,
    }

    struct FakeBook {
        content: &'static str,
    }

    impl EpubCapability for FakeCapability {
        fn open(&self, _data: &[u8]) -> Result<Box<dyn EpubBook>> {
            if self.fail_open {
                return Err(Error::EpubLoad("malformed container".into()));
            }
            Ok(Box::new(FakeBook {
                content: self.content,
            }))
        }
    }

    impl EpubBook for FakeBook {
        fn title(&self) -> Option<String> {
            Some("Fake Book".into())
        }

        fn render_into(
            &mut self,
            surface: &mut dyn DisplaySurface,
            size: &RegionSize,
        ) -> Result<()> {
            surface.replace(RenderFrame {
                container_class: EPUB_CONTAINER_CLASS,
                text: self.content.to_string(),
                transition: Transition::default(),
                region: Some(size.clone()),
            });
            Ok(())
        }
    }

    fn upload() -> UploadedFile {
        UploadedFile::new("book.epub", "application/epub+zip", b"PK".to_vec())
    }

    #[test]
    fn test_epub_extraction_delegates() {
        let extractor = EpubExtractor::new(Arc::new(FakeCapability {
            content: "chapter text",
            fail_open: false,
        }));
        let result = extractor
            .extract(&upload(), &mut NullProgress, &CancelToken::new())
            .unwrap();

        let mut book = match result {
            Extraction::Delegated(book) => book,
            Extraction::Pages(_) => panic!("epub extraction must delegate"),
        };

        let mut surface = BufferSurface::new();
        book.render_into(&mut surface, &RegionSize::default()).unwrap();

        let frame = surface.frame().unwrap();
        assert_eq!(frame.container_class, EPUB_CONTAINER_CLASS);
        assert_eq!(frame.text, "chapter text");
        let region = frame.region.as_ref().unwrap();
        assert_eq!(region.width, "100%");
        assert_eq!(region.height, "100%");
    }

    #[test]
    fn test_epub_open_failure() {
        let extractor = EpubExtractor::new(Arc::new(FakeCapability {
            content: "",
            fail_open: true,
        }));
        let result = extractor.extract(&upload(), &mut NullProgress, &CancelToken::new());
        assert!(matches!(result, Err(Error::EpubLoad(_))));
    }

    #[test]
    fn test_epub_progress_reaches_100() {
        let extractor = EpubExtractor::new(Arc::new(FakeCapability {
            content: "x",
            fail_open: false,
        }));
        let mut percents = Vec::new();
        let mut sink = |p: &ExtractionProgress| percents.push(p.percent);
        extractor
            .extract(&upload(), &mut sink, &CancelToken::new())
            .unwrap();

        assert_eq!(percents, vec![50.0, 100.0]);
    }

    #[test]
    fn test_reader_capability_rejects_garbage() {
        let result = EpubReaderCapability::new().open(b"definitely not a zip");
        assert!(matches!(result, Err(Error::EpubLoad(_))));
    }
}
