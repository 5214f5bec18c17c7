//! Error types for the bookflow library.

use std::io;
use thiserror::Error;

/// Result type alias for bookflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during ingestion and display.
///
/// None of these are fatal to the process; every failure is contained
/// to the upload attempt that produced it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the uploaded file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not one of the supported formats.
    #[error("Unsupported file type: {mime:?} ({filename})")]
    UnsupportedFormat {
        /// Declared MIME type of the rejected file.
        mime: String,
        /// Filename of the rejected file.
        filename: String,
    },

    /// The file contained no extractable text.
    #[error("No content found: the file appears to be empty")]
    EmptyContent,

    /// The PDF capability is unavailable or the document cannot be opened.
    #[error("Error loading PDF: {0}")]
    PdfLoad(String),

    /// The EPUB capability is unavailable or the container is malformed.
    #[error("Error loading EPUB: {0}")]
    EpubLoad(String),

    /// The underlying byte read failed mid-extraction.
    #[error("Error reading file: {0}")]
    Read(String),

    /// The extraction was cancelled by a newer upload.
    #[error("Extraction cancelled")]
    Cancelled,

    /// A document value would violate its own invariants.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::PdfLoad(err.to_string())
    }
}

impl Error {
    /// Short error title suitable for a display surface headline.
    pub fn title(&self) -> &'static str {
        match self {
            Error::Io(_) | Error::Read(_) => "Error reading file",
            Error::UnsupportedFormat { .. } => "Invalid file type",
            Error::EmptyContent => "No content found",
            Error::PdfLoad(_) => "Error loading PDF",
            Error::EpubLoad(_) => "Error loading EPUB",
            Error::Cancelled => "Upload cancelled",
            Error::InvalidDocument(_) | Error::Other(_) => "Error",
        }
    }
}
