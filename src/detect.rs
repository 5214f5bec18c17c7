//! Upload format detection.
//!
//! Classification runs synchronously before any extraction begins. An
//! unsupported file short-circuits the pipeline to the error path
//! without touching the document model.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A supported source format for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Portable Document Format; paginated by the source itself.
    Pdf,
    /// EPUB container; paginated by its own rendering capability.
    Epub,
    /// Plain text; treated as a single page.
    Txt,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Pdf => write!(f, "PDF"),
            SourceFormat::Epub => write!(f, "EPUB"),
            SourceFormat::Txt => write!(f, "TXT"),
        }
    }
}

const MIME_PDF: &str = "application/pdf";
const MIME_EPUB: &str = "application/epub+zip";
const MIME_TXT: &str = "text/plain";

/// Classify an upload by its declared MIME type and filename.
///
/// Accepts a file when the MIME type is exactly one of the supported
/// set, the filename ends with `.epub` (case-insensitive), or the MIME
/// type has a `text/` prefix. Returns `None` for everything else.
///
/// # Example
/// ```
/// use bookflow::detect::{classify, SourceFormat};
///
/// assert_eq!(classify("application/pdf", "book.pdf"), Some(SourceFormat::Pdf));
/// assert_eq!(classify("application/octet-stream", "notes.docx"), None);
/// ```
pub fn classify(mime: &str, filename: &str) -> Option<SourceFormat> {
    match mime {
        MIME_PDF => return Some(SourceFormat::Pdf),
        MIME_EPUB => return Some(SourceFormat::Epub),
        MIME_TXT => return Some(SourceFormat::Txt),
        _ => {}
    }

    if has_epub_extension(filename) {
        return Some(SourceFormat::Epub);
    }

    // Any text/* subtype is readable as plain text.
    if mime.starts_with("text/") {
        return Some(SourceFormat::Txt);
    }

    None
}

/// Check whether a file would be accepted by [`classify`].
pub fn is_supported(mime: &str, filename: &str) -> bool {
    classify(mime, filename).is_some()
}

fn has_epub_extension(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".epub")
}

/// Infer a declared MIME type from a path's extension.
///
/// The CLI upload affordance has no browser to declare a MIME type, so
/// the extension stands in for it. Unknown extensions map to
/// `application/octet-stream` and are rejected by [`classify`].
pub fn mime_for_path<P: AsRef<Path>>(path: P) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => MIME_PDF,
        Some("epub") => MIME_EPUB,
        Some("txt") => MIME_TXT,
        Some("md") | Some("markdown") => "text/markdown",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_mime_types() {
        assert_eq!(
            classify("application/pdf", "book.pdf"),
            Some(SourceFormat::Pdf)
        );
        assert_eq!(
            classify("application/epub+zip", "book.epub"),
            Some(SourceFormat::Epub)
        );
        assert_eq!(classify("text/plain", "book.txt"), Some(SourceFormat::Txt));
    }

    #[test]
    fn test_classify_epub_by_extension() {
        // Browsers frequently report EPUBs with a generic MIME type.
        assert_eq!(
            classify("application/octet-stream", "book.epub"),
            Some(SourceFormat::Epub)
        );
        assert_eq!(classify("", "BOOK.EPUB"), Some(SourceFormat::Epub));
        assert_eq!(classify("", "book.Epub"), Some(SourceFormat::Epub));
    }

    #[test]
    fn test_classify_text_prefix() {
        assert_eq!(classify("text/markdown", "notes.md"), Some(SourceFormat::Txt));
        assert_eq!(classify("text/csv", "data.csv"), Some(SourceFormat::Txt));
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(classify("application/octet-stream", "notes.docx"), None);
        assert_eq!(classify("application/zip", "archive.zip"), None);
        assert_eq!(classify("image/png", "photo.png"), None);
        assert_eq!(classify("", ""), None);
    }

    #[test]
    fn test_classify_epub_extension_is_suffix_only() {
        // ".epub" must terminate the filename; it is not an infix match.
        assert_eq!(classify("application/x-thing", "book.epub.bak"), None);
        assert_eq!(classify("application/x-thing", "epub"), None);
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("application/pdf", "a.pdf"));
        assert!(is_supported("", "a.epub"));
        assert!(!is_supported("application/msword", "a.doc"));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path("a.pdf"), "application/pdf");
        assert_eq!(mime_for_path("a.EPUB"), "application/epub+zip");
        assert_eq!(mime_for_path("a.txt"), "text/plain");
        assert_eq!(mime_for_path("a.docx"), "application/octet-stream");
        assert_eq!(mime_for_path("noext"), "application/octet-stream");
    }
}
