//! Internal link rewriting
//!
//! A textual pass over rendered HTML that rewrites anchor targets pointing
//! at markdown files into site routes. Content is trusted and self-authored,
//! so a regex over `href` attributes is enough; nothing else in the HTML is
//! touched.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref HREF_RE: Regex = Regex::new(r#"href="([^"]+)""#).unwrap();
}

/// Rewrites internal `href` targets to site routes
pub struct LinkRewriter {
    index_stem: String,
}

impl LinkRewriter {
    /// `index_file` is the directory-index document name ("README.md");
    /// its stem is what trailing-slash links resolve to.
    pub fn new(index_file: &str) -> Self {
        let index_stem = index_file
            .strip_suffix(".md")
            .unwrap_or(index_file)
            .to_string();
        Self { index_stem }
    }

    /// Rewrite every matching `href` in the HTML.
    ///
    /// - external (`http://`, `https://`) and fragment (`#...`) targets
    ///   pass through unchanged
    /// - `page.md` style targets lose the suffix and gain a leading slash
    /// - `dir/` style targets point at the directory's index document
    /// - everything else is left byte-identical
    pub fn rewrite(&self, html: &str) -> String {
        HREF_RE
            .replace_all(html, |caps: &Captures| match self.route_for(&caps[1]) {
                Some(route) => format!(r#"href="{}""#, route),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    fn route_for(&self, link: &str) -> Option<String> {
        if link.starts_with("http://") || link.starts_with("https://") || link.starts_with('#') {
            return None;
        }

        let link = link.strip_prefix("./").unwrap_or(link);

        if let Some(stripped) = link.strip_suffix(".md") {
            Some(absolute(stripped))
        } else if let Some(dir) = link.strip_suffix('/') {
            Some(absolute(&format!("{}/{}", dir, self.index_stem)))
        } else {
            None
        }
    }
}

fn absolute(route: &str) -> String {
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{}", route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> LinkRewriter {
        LinkRewriter::new("README.md")
    }

    #[test]
    fn test_external_links_unchanged() {
        let html = r#"<a href="https://x.com/a.md">a</a> <a href="http://y.org/">b</a>"#;
        assert_eq!(rewriter().rewrite(html), html);
    }

    #[test]
    fn test_fragment_links_unchanged() {
        let html = r##"<a href="#section">jump</a>"##;
        assert_eq!(rewriter().rewrite(html), html);
    }

    #[test]
    fn test_markdown_link_becomes_route() {
        let html = r#"<a href="sub/page.md">p</a>"#;
        assert_eq!(rewriter().rewrite(html), r#"<a href="/sub/page">p</a>"#);
    }

    #[test]
    fn test_dot_slash_prefix_normalized() {
        let html = r#"<a href="./guides/setup.md">s</a>"#;
        assert_eq!(rewriter().rewrite(html), r#"<a href="/guides/setup">s</a>"#);
    }

    #[test]
    fn test_absolute_markdown_link() {
        let html = r#"<a href="/guides/setup.md">s</a>"#;
        assert_eq!(rewriter().rewrite(html), r#"<a href="/guides/setup">s</a>"#);
    }

    #[test]
    fn test_trailing_slash_points_at_index() {
        let html = r#"<a href="sub/">dir</a>"#;
        assert_eq!(rewriter().rewrite(html), r#"<a href="/sub/README">dir</a>"#);
    }

    #[test]
    fn test_index_stem_is_configurable() {
        let rewriter = LinkRewriter::new("index.md");
        let html = r#"<a href="sub/">dir</a>"#;
        assert_eq!(rewriter.rewrite(html), r#"<a href="/sub/index">dir</a>"#);
    }

    #[test]
    fn test_other_hrefs_untouched() {
        for html in [
            r#"<a href="mailto:docs@example.com">mail</a>"#,
            r#"<link href="style.css">"#,
            r#"<a href="archive.tar.gz">tarball</a>"#,
        ] {
            assert_eq!(rewriter().rewrite(html), html, "should not touch {html}");
        }
    }

    #[test]
    fn test_multiple_links_in_one_document() {
        let html = concat!(
            r#"<a href="a.md">a</a> "#,
            r#"<a href="https://x.com">x</a> "#,
            r#"<a href="b/">b</a>"#
        );
        let expected = concat!(
            r#"<a href="/a">a</a> "#,
            r#"<a href="https://x.com">x</a> "#,
            r#"<a href="/b/README">b</a>"#
        );
        assert_eq!(rewriter().rewrite(html), expected);
    }
}
