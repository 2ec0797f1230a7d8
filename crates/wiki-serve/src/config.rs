//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Directory holding one `<title>.txt` file per page.
    pub data_dir: PathBuf,

    /// Directory with `view.html` and `edit.html` overriding the built-in
    /// templates. `None` uses the compiled-in set.
    pub template_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `WIKI_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `WIKI_DATA_DIR`: Page directory (default: "data")
    /// - `WIKI_TEMPLATE_DIR`: Template directory (default: built-in templates)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("WIKI_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let data_dir = std::env::var("WIKI_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));

        let template_dir = std::env::var("WIKI_TEMPLATE_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        if let Some(dir) = &template_dir
            && !dir.is_dir()
        {
            anyhow::bail!("WIKI_TEMPLATE_DIR {} is not a directory", dir.display());
        }

        tracing::info!(
            bind_addr = %bind_addr,
            data_dir = %data_dir.display(),
            template_dir = ?template_dir,
            "wiki configuration loaded"
        );

        Ok(Self {
            bind_addr,
            data_dir,
            template_dir,
        })
    }
}
