//! Markdown rendering with syntax highlighting
//!
//! Inline HTML in the source passes through untouched; content is trusted
//! and self-authored, so nothing is sanitized.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::fs;
use std::path::Path;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::{FrontMatter, RenderError};

/// A markdown file rendered to HTML, with its front-matter split off
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Content-root-relative source path, `/`-separated
    pub file_path: String,
    pub front_matter: FrontMatter,
    pub content_html: String,
}

/// Markdown renderer with syntax highlighting for fenced code blocks
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "InspiredGitHub".to_string(),
        }
    }

    /// Render a single markdown file relative to the content root.
    ///
    /// Re-reads and re-parses on every call; there is no cache. A missing
    /// or unreadable file is a `NotFound`, which callers translate into a
    /// not-found response rather than a crash.
    pub fn render_file(
        &self,
        content_root: &Path,
        file_path: &str,
    ) -> Result<RenderedPage, RenderError> {
        let full_path = content_root.join(file_path);
        let raw = fs::read_to_string(&full_path)
            .map_err(|_| RenderError::NotFound(file_path.to_string()))?;

        let (front_matter, body) =
            FrontMatter::parse(&raw).map_err(|e| RenderError::FrontMatter {
                path: file_path.to_string(),
                message: e.to_string(),
            })?;

        Ok(RenderedPage {
            file_path: file_path.to_string(),
            front_matter,
            content_html: self.render(body),
        })
    }

    /// Render a markdown string to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                            Some(lang.to_string())
                        }
                        _ => None,
                    };
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted = self.highlight_code(&code_buf, code_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_buf.push_str(&text);
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a fenced code block, falling back to an escaped `<pre>`
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(_) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Before\n\n<div class=\"note\">kept as-is</div>\n\nAfter");
        assert!(html.contains("<div class=\"note\">kept as-is</div>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_render_file_splits_frontmatter() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("page.md"),
            "---\ntitle: A Page\n---\n\n# Heading\n",
        )
        .unwrap();

        let renderer = MarkdownRenderer::new();
        let page = renderer.render_file(dir.path(), "page.md").unwrap();
        assert_eq!(page.file_path, "page.md");
        assert_eq!(page.front_matter.title(), Some("A Page"));
        assert!(page.content_html.contains("<h1>Heading</h1>"));
        assert!(!page.content_html.contains("title:"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let renderer = MarkdownRenderer::new();
        let err = renderer.render_file(dir.path(), "missing.md").unwrap_err();
        assert!(matches!(err, RenderError::NotFound(p) if p == "missing.md"));
    }

    #[test]
    fn test_malformed_frontmatter_is_a_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("bad.md"),
            "---\ntitle: [unterminated\n---\nBody\n",
        )
        .unwrap();

        let renderer = MarkdownRenderer::new();
        let err = renderer.render_file(dir.path(), "bad.md").unwrap_err();
        assert!(matches!(err, RenderError::FrontMatter { path, .. } if path == "bad.md"));
    }
}
