//! Rendering module: display surface seam and the paginated renderer.

mod page;
mod surface;

pub use page::{container_class, frame_for, render};
pub use surface::{BufferSurface, DisplaySurface, RegionSize, RenderFrame, Transition};
