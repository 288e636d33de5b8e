//! Page resolution
//!
//! Two entry points: `routes` enumerates the build-time route set, and
//! `resolve` turns one requested slug into a page payload. Every resolution
//! is independent and stateless; files are re-read on each call.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::slug::{path_to_slug, slug_to_path};
use super::{FileDiscovery, LinkRewriter, MarkdownRenderer, RenderError};
use crate::config::SiteConfig;

/// The payload for a single resolved page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    /// Rendered HTML with internal links rewritten to routes
    pub content: String,
    /// JSON-safe front-matter object
    pub frontmatter: serde_json::Value,
    /// Content-root-relative source path
    pub file_path: String,
}

/// Resolves slugs to rendered pages over a content root
pub struct PageResolver {
    content_dir: PathBuf,
    index_file: String,
    excluded: Vec<String>,
    renderer: MarkdownRenderer,
    links: LinkRewriter,
}

impl PageResolver {
    pub fn new(config: &SiteConfig, content_dir: &Path) -> Self {
        Self {
            content_dir: content_dir.to_path_buf(),
            index_file: config.index_file.clone(),
            excluded: config.exclude.clone(),
            renderer: MarkdownRenderer::new(),
            links: LinkRewriter::new(&config.index_file),
        }
    }

    /// Enumerate the route set: one slug per discovered file, with the root
    /// document left out (it is served at `/`). Discovery failures are
    /// fatal here, unlike per-page render failures.
    pub fn routes(&self) -> Result<Vec<Vec<String>>> {
        let discovery = FileDiscovery::new(&self.content_dir, &self.excluded);
        let files = discovery.discover()?;

        Ok(files
            .into_iter()
            .filter(|file| file != &self.index_file)
            .map(|file| path_to_slug(&file, &self.index_file))
            .collect())
    }

    /// Resolve one slug to a page payload. The empty slug is the root
    /// document. A slug with no backing file is a `NotFound`, never a panic.
    pub fn resolve(&self, slug: &[String]) -> Result<PagePayload, RenderError> {
        if !slug.iter().all(|segment| is_safe_segment(segment)) {
            return Err(RenderError::NotFound(slug.join("/")));
        }

        let file_path = slug_to_path(slug, &self.index_file);
        let page = self.renderer.render_file(&self.content_dir, &file_path)?;

        Ok(PagePayload {
            content: self.links.rewrite(&page.content_html),
            frontmatter: page.front_matter.to_json(),
            file_path: page.file_path,
        })
    }

    /// Source file backing a slug, without rendering it
    pub fn source_path(&self, slug: &[String]) -> String {
        slug_to_path(slug, &self.index_file)
    }
}

/// Reject traversal-style segments coming in from request paths
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
}
