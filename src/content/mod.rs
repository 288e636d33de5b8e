//! Content module - discovery, slug mapping, rendering, and page resolution

pub mod discovery;
pub mod frontmatter;
pub mod links;
pub mod markdown;
pub mod resolver;
pub mod slug;

pub use discovery::FileDiscovery;
pub use frontmatter::FrontMatter;
pub use links::LinkRewriter;
pub use markdown::{MarkdownRenderer, RenderedPage};
pub use resolver::{PagePayload, PageResolver};

use thiserror::Error;

/// Errors from rendering a single markdown file.
///
/// `NotFound` is recoverable: callers translate it into a not-found
/// response. Discovery-level I/O errors stay on `anyhow` and remain fatal.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("markdown file not found: {0}")]
    NotFound(String),

    #[error("malformed front-matter in {path}: {message}")]
    FrontMatter { path: String, message: String },
}
