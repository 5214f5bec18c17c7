//! In-memory document model: pages, position, display format.

mod document;
mod page;

pub use document::{DisplayFormat, Document};
pub use page::Page;
