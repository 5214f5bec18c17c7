//! Page navigation and display-format behavior on a loaded session.

use std::sync::Arc;

use bookflow::extract::{PdfExtractor, TxtExtractor};
use bookflow::{
    BufferSurface, DisplayFormat, ExtractorRegistry, NullProgress, PdfCapability, PdfPages,
    ReaderSession, Result, UploadedFile,
};

struct FixedPdf {
    pages: Vec<&'static str>,
}

struct FixedPages {
    pages: Vec<&'static str>,
}

impl PdfCapability for FixedPdf {
    fn open(&self, _data: &[u8]) -> Result<Box<dyn PdfPages>> {
        Ok(Box::new(FixedPages {
            pages: self.pages.clone(),
        }))
    }
}

impl PdfPages for FixedPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, number: usize) -> Result<String> {
        Ok(self.pages[number - 1].to_string())
    }
}

/// Session holding a rendered three-page document.
fn loaded_session() -> ReaderSession<BufferSurface> {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(TxtExtractor::new()));
    registry.register(Arc::new(PdfExtractor::new(Arc::new(FixedPdf {
        pages: vec!["alpha", "beta", "gamma"],
    }))));
    let mut session = ReaderSession::with_registry(BufferSurface::new(), registry);

    let file = UploadedFile::new("trilogy.pdf", "application/pdf", b"%PDF-1.7".to_vec());
    session.upload(file, &mut NullProgress).unwrap();
    session.select_format(DisplayFormat::Standard).unwrap();
    session
}

#[test]
fn test_stepping_through_pages() {
    let mut session = loaded_session();
    assert_eq!(session.surface().frame().unwrap().text, "alpha");

    let nav = session.next().unwrap();
    assert_eq!(nav.current_page, 2);
    assert!(nav.prev_enabled);
    assert!(nav.next_enabled);
    assert_eq!(session.surface().frame().unwrap().text, "beta");

    let nav = session.next().unwrap();
    assert_eq!(nav.current_page, 3);
    assert_eq!(nav.label(), "Page 3 of 3");
    assert!(!nav.next_enabled);
    assert_eq!(session.surface().frame().unwrap().text, "gamma");

    let nav = session.jump_to(1).unwrap();
    assert_eq!(nav.current_page, 1);
    assert_eq!(session.surface().frame().unwrap().text, "alpha");
}

#[test]
fn test_next_is_a_no_op_at_the_last_page() {
    let mut session = loaded_session();
    session.jump_to(3).unwrap();

    let nav = session.next().unwrap();
    assert_eq!(nav.current_page, 3);
    assert!(!nav.next_enabled);
    assert_eq!(session.surface().frame().unwrap().text, "gamma");
}

#[test]
fn test_previous_is_a_no_op_at_the_first_page() {
    let mut session = loaded_session();

    let nav = session.previous().unwrap();
    assert_eq!(nav.current_page, 1);
    assert!(!nav.prev_enabled);
    assert_eq!(session.surface().frame().unwrap().text, "alpha");
}

#[test]
fn test_jump_to_out_of_range_is_rejected() {
    let mut session = loaded_session();
    session.next().unwrap();

    // Neither 0 nor past-the-end moves the current page.
    let nav = session.jump_to(0).unwrap();
    assert_eq!(nav.current_page, 2);
    let nav = session.jump_to(4).unwrap();
    assert_eq!(nav.current_page, 2);
    assert_eq!(session.surface().frame().unwrap().text, "beta");
}

#[test]
fn test_jump_to_is_one_based() {
    let mut session = loaded_session();
    let nav = session.jump_to(2).unwrap();
    assert_eq!(nav.current_page, 2);
    assert_eq!(session.document().unwrap().current_index(), 1);
}

#[test]
fn test_format_change_preserves_text_and_position() {
    let mut session = loaded_session();
    session.jump_to(2).unwrap();

    let nav = session.set_format(DisplayFormat::Contrast).unwrap();
    assert_eq!(nav.current_page, 2);

    let frame = session.surface().frame().unwrap();
    assert_eq!(frame.container_class, "text-contrast");
    assert_eq!(frame.text, "beta");
}

#[test]
fn test_single_page_document_disables_both_directions() {
    let mut session = ReaderSession::new(BufferSurface::new());
    let file = UploadedFile::new("note.txt", "text/plain", b"only page".to_vec());
    session.upload(file, &mut NullProgress).unwrap();

    let nav = session.next().unwrap();
    assert!(!nav.prev_enabled);
    assert!(!nav.next_enabled);
    assert_eq!(nav.label(), "Page 1 of 1");
}

#[test]
fn test_navigation_unavailable_before_any_upload() {
    let mut session: ReaderSession<BufferSurface> = ReaderSession::new(BufferSurface::new());
    assert!(session.next().is_err());
    assert!(session.previous().is_err());
    assert!(session.jump_to(1).is_err());
    assert!(session.set_format(DisplayFormat::Large).is_err());
}
