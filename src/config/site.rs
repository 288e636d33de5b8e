//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // Directory
    pub content_dir: String,
    pub output_dir: String,

    /// The markdown file served at the site root (and at `<dir>/` routes)
    pub index_file: String,

    /// Directory names skipped during discovery, at any depth
    pub exclude: Vec<String>,

    /// Abort generation on a malformed page instead of skipping it
    pub strict: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
            description: String::new(),

            content_dir: ".".to_string(),
            output_dir: "public".to_string(),

            index_file: "README.md".to_string(),

            exclude: vec![
                ".git".to_string(),
                ".github".to_string(),
                ".vscode".to_string(),
                ".idea".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
                "public".to_string(),
            ],

            strict: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Stem of the index file, used as the directory-index route segment
    /// ("README" for "README.md")
    pub fn index_stem(&self) -> &str {
        self.index_file
            .strip_suffix(".md")
            .unwrap_or(&self.index_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.index_file, "README.md");
        assert_eq!(config.index_stem(), "README");
        assert!(config.exclude.iter().any(|d| d == "node_modules"));
        assert!(!config.strict);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = "title: My Docs\nindex_file: index.md\nstrict: true\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Docs");
        assert_eq!(config.index_stem(), "index");
        assert!(config.strict);
        // Untouched fields keep their defaults
        assert_eq!(config.output_dir, "public");
    }
}
