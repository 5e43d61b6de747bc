//! Plugin configuration and the production-mode environment signal.
//!
//! All options are optional with sensible defaults, so a host can attach
//! the plugin with `ComponentsConfig::default()` and get a working setup:
//! components discovered under `components/**/*.md`, assets bundled into
//! `assets/css` and `assets/js`, and the collection exposed as
//! `components`.
//!
//! Configuration is deserializable from the host's TOML config:
//!
//! ```toml
//! [components]
//! component_glob = "src/components/**/*.md"
//! collection_name = "components"
//! css_output = "dist/assets/css"
//! js_output = "dist/assets/js"
//! default_dialect = "tera"
//! enable_rendering = true
//! enable_assets = true
//! exclude_in_production = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted by [`Environment::detect`].
pub const PRODUCTION_ENV_VAR: &str = "SITE_ENV";

/// Plugin configuration.
///
/// Every field has a serde default, so partial TOML tables and
/// `ComponentsConfig::default()` both yield a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentsConfig {
    /// Glob pattern, relative to the site root, selecting component source
    /// files.
    #[serde(default = "default_component_glob")]
    pub component_glob: String,

    /// Name under which the loaded definitions collection is exposed to
    /// the host.
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Output directory for the combined CSS bundle, relative to the site
    /// root.
    #[serde(default = "default_css_output")]
    pub css_output: PathBuf,

    /// Output directory for the combined JS bundle, relative to the site
    /// root.
    #[serde(default = "default_js_output")]
    pub js_output: PathBuf,

    /// Template dialect used when a render call does not name one.
    #[serde(default = "default_dialect")]
    pub default_dialect: String,

    /// Whether the render delegate integration is active. When disabled,
    /// `render_component` returns an empty string unconditionally.
    #[serde(default = "default_true")]
    pub enable_rendering: bool,

    /// Whether CSS/JS fragments are collected and bundled.
    #[serde(default = "default_true")]
    pub enable_assets: bool,

    /// Whether component source files are excluded from the host's
    /// output-generating file set in production builds.
    #[serde(default)]
    pub exclude_in_production: bool,
}

fn default_component_glob() -> String {
    "components/**/*.md".to_string()
}

fn default_collection_name() -> String {
    "components".to_string()
}

fn default_css_output() -> PathBuf {
    PathBuf::from("assets/css")
}

fn default_js_output() -> PathBuf {
    PathBuf::from("assets/js")
}

fn default_dialect() -> String {
    "tera".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            component_glob: default_component_glob(),
            collection_name: default_collection_name(),
            css_output: default_css_output(),
            js_output: default_js_output(),
            default_dialect: default_dialect(),
            enable_rendering: true,
            enable_assets: true,
            exclude_in_production: false,
        }
    }
}

impl ComponentsConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in config file: {}", path.display()))?;
        tracing::debug!(
            "Loaded component config from {}: glob='{}', collection='{}'",
            path.display(),
            config.component_glob,
            config.collection_name
        );
        Ok(config)
    }
}

/// Build environment, as signalled by the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local or preview builds. Components render and are emitted
    /// normally.
    Development,
    /// Production builds. Combined with
    /// [`ComponentsConfig::exclude_in_production`], component sources are
    /// excluded from the host's output-generating file set.
    Production,
}

impl Environment {
    /// Detect the environment from `SITE_ENV`.
    ///
    /// Any value other than `production` (case-insensitive) is treated as
    /// development; so is an unset variable.
    pub fn detect() -> Self {
        match std::env::var(PRODUCTION_ENV_VAR) {
            Ok(value) if value.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    /// Whether this is a production build.
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = ComponentsConfig::default();
        assert_eq!(config.component_glob, "components/**/*.md");
        assert_eq!(config.collection_name, "components");
        assert_eq!(config.css_output, PathBuf::from("assets/css"));
        assert_eq!(config.js_output, PathBuf::from("assets/js"));
        assert_eq!(config.default_dialect, "tera");
        assert!(config.enable_rendering);
        assert!(config.enable_assets);
        assert!(!config.exclude_in_production);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: ComponentsConfig =
            toml::from_str(r#"component_glob = "widgets/**/*.html""#).unwrap();
        assert_eq!(config.component_glob, "widgets/**/*.html");
        assert_eq!(config.collection_name, "components");
        assert!(config.enable_assets);
    }

    #[test]
    fn test_full_toml_round_trip() {
        let config: ComponentsConfig = toml::from_str(
            r#"
            component_glob = "src/components/**/*.md"
            collection_name = "widgets"
            css_output = "dist/css"
            js_output = "dist/js"
            default_dialect = "html"
            enable_rendering = false
            enable_assets = false
            exclude_in_production = true
            "#,
        )
        .unwrap();
        assert_eq!(config.collection_name, "widgets");
        assert_eq!(config.default_dialect, "html");
        assert!(!config.enable_rendering);
        assert!(!config.enable_assets);
        assert!(config.exclude_in_production);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, r#"collection_name = "blocks""#).unwrap();

        let config = ComponentsConfig::load(&path).await.unwrap();
        assert_eq!(config.collection_name, "blocks");
    }

    #[tokio::test]
    async fn test_load_missing_file_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = ComponentsConfig::load(&dir.path().join("absent.toml")).await;
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_environment_detect() {
        // SAFETY: serialized with other env-mutating tests via #[serial].
        unsafe {
            std::env::remove_var(PRODUCTION_ENV_VAR);
        }
        assert_eq!(Environment::detect(), Environment::Development);

        unsafe {
            std::env::set_var(PRODUCTION_ENV_VAR, "production");
        }
        assert_eq!(Environment::detect(), Environment::Production);
        assert!(Environment::detect().is_production());

        unsafe {
            std::env::set_var(PRODUCTION_ENV_VAR, "staging");
        }
        assert_eq!(Environment::detect(), Environment::Development);

        unsafe {
            std::env::remove_var(PRODUCTION_ENV_VAR);
        }
    }
}
