mod blob;
pub mod html;
pub mod text;

pub use blob::{BlobRenderer, RenderedView};
