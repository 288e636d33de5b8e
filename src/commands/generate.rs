//! Generate static files

use anyhow::{bail, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::RenderError;
use crate::Site;

/// Generate the static site into the output directory.
///
/// Each route becomes `<out>/<segments>/index.html`; the root document
/// becomes `<out>/index.html`. Discovery failures abort. Per-page failures
/// follow the `strict` policy: abort when set, warn and skip otherwise.
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    fs::create_dir_all(&site.output_dir)?;

    let resolver = site.resolver();
    let routes = resolver.routes()?;

    let mut rendered = 0usize;
    let mut skipped = 0usize;

    // Root document first
    match resolver.resolve(&[]) {
        Ok(payload) => {
            fs::write(site.output_dir.join("index.html"), &payload.content)?;
            rendered += 1;
        }
        Err(e) => handle_page_error(site, &site.config.index_file, e, &mut skipped)?,
    }

    for route in &routes {
        match resolver.resolve(route) {
            Ok(payload) => {
                let page_dir = site.output_dir.join(route.join("/"));
                fs::create_dir_all(&page_dir)?;
                fs::write(page_dir.join("index.html"), &payload.content)?;
                rendered += 1;
            }
            Err(e) => {
                let source = resolver.source_path(route);
                handle_page_error(site, &source, e, &mut skipped)?;
            }
        }
    }

    copy_assets(site)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages ({} skipped) in {:.2}s",
        rendered,
        skipped,
        duration.as_secs_f64()
    );

    Ok(())
}

fn handle_page_error(
    site: &Site,
    source: &str,
    error: RenderError,
    skipped: &mut usize,
) -> Result<()> {
    if site.config.strict {
        bail!("failed to render {}: {}", source, error);
    }
    tracing::warn!("Skipping {}: {}", source, error);
    *skipped += 1;
    Ok(())
}

/// Copy non-markdown files (images, stylesheets) into the output directory,
/// honoring the same directory exclusions as discovery
fn copy_assets(site: &Site) -> Result<()> {
    let excluded: HashSet<&str> = site.config.exclude.iter().map(String::as_str).collect();

    let walker = WalkDir::new(&site.content_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map(|name| !excluded.contains(name))
                .unwrap_or(true)
        });

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.starts_with(&site.output_dir) {
            continue;
        }
        if is_markdown(path) || is_site_config(path, &site.base_dir) {
            continue;
        }

        let relative = path.strip_prefix(&site.content_dir).unwrap_or(path);
        let target = site.output_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;
    }

    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}

fn is_site_config(path: &Path, base_dir: &Path) -> bool {
    path == base_dir.join("_config.yml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_generate_writes_route_tree() {
        let dir = tempdir().unwrap();
        write(dir.path(), "README.md", "# Home\n\nSee [setup](guides/setup.md).\n");
        write(dir.path(), "guides/setup.md", "# Setup\n");
        write(dir.path(), "img/logo.png", "not really a png");

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        let root = fs::read_to_string(site.output_dir.join("index.html")).unwrap();
        assert!(root.contains("<h1>Home</h1>"));
        assert!(root.contains(r#"href="/guides/setup""#));

        let setup =
            fs::read_to_string(site.output_dir.join("guides/setup/index.html")).unwrap();
        assert!(setup.contains("<h1>Setup</h1>"));

        assert!(site.output_dir.join("img/logo.png").exists());
    }

    #[test]
    fn test_malformed_page_skipped_by_default() {
        let dir = tempdir().unwrap();
        write(dir.path(), "README.md", "# Home\n");
        write(dir.path(), "bad.md", "---\ntitle: [unterminated\n---\nBody\n");

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        assert!(site.output_dir.join("index.html").exists());
        assert!(!site.output_dir.join("bad/index.html").exists());
    }

    #[test]
    fn test_malformed_page_fatal_in_strict_mode() {
        let dir = tempdir().unwrap();
        write(dir.path(), "_config.yml", "strict: true\n");
        write(dir.path(), "README.md", "# Home\n");
        write(dir.path(), "bad.md", "---\ntitle: [unterminated\n---\nBody\n");

        let site = Site::new(dir.path()).unwrap();
        assert!(run(&site).is_err());
    }

    #[test]
    fn test_output_dir_not_copied_into_itself() {
        let dir = tempdir().unwrap();
        write(dir.path(), "README.md", "# Home\n");

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();
        // Second run must not recurse into the first run's output
        run(&site).unwrap();

        assert!(!site.output_dir.join("public").exists());
        assert!(!site.output_dir.join("index.html/index.html").exists());
    }
}
