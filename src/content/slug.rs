//! Path <-> slug mapping
//!
//! A slug is the ordered list of URL segments for a markdown file, derived
//! from its content-root-relative path. The configured index file maps to
//! the empty slug (the site root); everything else is the path with the
//! `.md` suffix stripped, split on `/`.

/// Convert a relative markdown file path to a URL slug.
///
/// # Examples
/// ```ignore
/// path_to_slug("guides/setup.md", "README.md") // -> ["guides", "setup"]
/// path_to_slug("README.md", "README.md")       // -> []
/// ```
pub fn path_to_slug(path: &str, index_file: &str) -> Vec<String> {
    if path == index_file {
        return Vec::new();
    }

    path.strip_suffix(".md")
        .unwrap_or(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert a URL slug back to a relative markdown file path.
///
/// The empty slug yields the index file.
pub fn slug_to_path(slug: &[String], index_file: &str) -> String {
    if slug.is_empty() {
        return index_file.to_string();
    }

    format!("{}.md", slug.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "README.md";

    fn slug(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_root_document_maps_to_empty_slug() {
        assert!(path_to_slug("README.md", INDEX).is_empty());
        assert_eq!(slug_to_path(&[], INDEX), "README.md");
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(
            path_to_slug("guides/setup.md", INDEX),
            slug(&["guides", "setup"])
        );
        assert_eq!(slug_to_path(&slug(&["guides", "setup"]), INDEX), "guides/setup.md");
    }

    #[test]
    fn test_round_trip() {
        for path in ["README.md", "INDEX.md", "a/b/c.md", "guides/README.md"] {
            let s = path_to_slug(path, INDEX);
            assert_eq!(slug_to_path(&s, INDEX), path, "round trip for {path}");
        }
    }

    #[test]
    fn test_empty_segments_dropped() {
        assert_eq!(path_to_slug("a//b.md", INDEX), slug(&["a", "b"]));
    }

    #[test]
    fn test_custom_index_file() {
        assert!(path_to_slug("index.md", "index.md").is_empty());
        assert_eq!(slug_to_path(&[], "index.md"), "index.md");
        // A README is just a regular page under a custom index file
        assert_eq!(path_to_slug("README.md", "index.md"), slug(&["README"]));
    }
}
