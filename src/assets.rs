//! CSS/JS asset accumulation and bundle emission.
//!
//! Component definitions may declare `css:` and `js:` fragments in their
//! metadata block. During loading those fragments are pushed into two
//! accumulation buckets, one per asset kind, in discovery order. Emission
//! concatenates each non-empty bucket into a single combined artifact
//! (`components.css` / `components.js`) under the configured output
//! directory.
//!
//! The buckets apply no ordering policy of their own beyond discovery
//! order, no deduplication, and no minification; anything smarter belongs
//! to the host's bundling pipeline.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ComponentsConfig;

/// The two asset kinds components may contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Stylesheet fragments, bundled into `components.css`.
    Css,
    /// Script fragments, bundled into `components.js`.
    Js,
}

impl AssetKind {
    /// File name of the combined artifact for this kind.
    pub fn bundle_file_name(self) -> &'static str {
        match self {
            Self::Css => "components.css",
            Self::Js => "components.js",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css => write!(f, "css"),
            Self::Js => write!(f, "js"),
        }
    }
}

/// One fragment contributed by a component definition.
#[derive(Debug, Clone)]
pub struct AssetFragment {
    /// Display name of the contributing component.
    pub component: String,
    /// Raw fragment source, exactly as declared.
    pub source: String,
}

/// Accumulation buckets for component-contributed assets.
#[derive(Debug, Default)]
pub struct AssetBuckets {
    css: Vec<AssetFragment>,
    js: Vec<AssetFragment>,
}

impl AssetBuckets {
    /// Create empty buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to the bucket for `kind`, preserving insertion
    /// order.
    pub fn add(&mut self, kind: AssetKind, component: impl Into<String>, source: impl Into<String>) {
        let fragment = AssetFragment {
            component: component.into(),
            source: source.into(),
        };
        tracing::debug!(
            "Collected {} fragment from component '{}' ({} bytes)",
            kind,
            fragment.component,
            fragment.source.len()
        );
        match kind {
            AssetKind::Css => self.css.push(fragment),
            AssetKind::Js => self.js.push(fragment),
        }
    }

    /// Fragments collected for `kind`, in insertion order.
    pub fn fragments(&self, kind: AssetKind) -> &[AssetFragment] {
        match kind {
            AssetKind::Css => &self.css,
            AssetKind::Js => &self.js,
        }
    }

    /// Whether both buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.js.is_empty()
    }

    /// Concatenate the fragments of `kind` into the combined artifact
    /// text. Fragments are joined with a single newline; a trailing
    /// newline is appended so the artifact ends cleanly.
    pub fn combined(&self, kind: AssetKind) -> String {
        let fragments = self.fragments(kind);
        let mut out = String::new();
        for (i, fragment) in fragments.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(fragment.source.trim_end_matches('\n'));
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Write one combined artifact per non-empty bucket.
    ///
    /// Output directories are created as needed. Returns the paths of the
    /// artifacts actually written; empty buckets produce no file.
    ///
    /// # Errors
    ///
    /// Returns an error if an output directory cannot be created or an
    /// artifact cannot be written.
    pub async fn write_bundles(
        &self,
        site_root: &Path,
        config: &ComponentsConfig,
    ) -> Result<Vec<PathBuf>> {
        let targets = [
            (AssetKind::Css, &config.css_output),
            (AssetKind::Js, &config.js_output),
        ];

        let mut written = Vec::new();
        for (kind, output_dir) in targets {
            if self.fragments(kind).is_empty() {
                continue;
            }

            let dir = site_root.join(output_dir);
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("Failed to create asset output directory: {}", dir.display()))?;

            let path = dir.join(kind.bundle_file_name());
            tokio::fs::write(&path, self.combined(kind))
                .await
                .with_context(|| format!("Failed to write asset bundle: {}", path.display()))?;

            tracing::debug!(
                "Wrote {} bundle with {} fragment(s): {}",
                kind,
                self.fragments(kind).len(),
                path.display()
            );
            written.push(path);
        }

        Ok(written)
    }
}
