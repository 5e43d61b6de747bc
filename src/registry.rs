//! Component discovery, parsing, and the definitions collection.
//!
//! Component source files are discovered under the site root by a glob
//! pattern and parsed into [`ComponentDefinition`]s. Each file's leading
//! YAML metadata block supplies the display name, default field values,
//! and optional CSS/JS fragments; the remainder of the file is the raw
//! template source.
//!
//! ```markdown
//! ---
//! name: Callout
//! defaults:
//!   heading: "Default heading"
//! css: |
//!   .callout { border-left: 4px solid; }
//! ---
//! <aside class="callout"><h3>{{ heading }}</h3></aside>
//! ```
//!
//! The loaded [`ComponentSet`] is ordered by discovery order and read-only
//! for the rest of the build. Lookup is a linear scan comparing
//! precomputed slugs; when two definitions normalize to the same slug the
//! first one found wins.

use anyhow::{Context, Result};
use glob::Pattern;
use gray_matter::{Matter, engine::YAML};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::assets::{AssetBuckets, AssetKind};
use crate::config::ComponentsConfig;
use crate::slug::Slugify;

/// A named, defaulted template fragment.
///
/// Immutable once loaded; owned by the [`ComponentSet`] for the lifetime
/// of one build.
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    /// Display name, from the metadata block or the file stem.
    pub name: String,
    /// Matching key, precomputed from `name` at load time.
    pub slug: String,
    /// Default field values merged under each request item.
    pub defaults: Map<String, Value>,
    /// Raw template source (file body after the metadata block).
    pub template: String,
    /// Source file the definition was loaded from, relative to the site
    /// root.
    pub source_path: PathBuf,
}

/// The ordered collection of loaded component definitions.
#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    definitions: Vec<ComponentDefinition>,
}

impl ComponentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition, preserving discovery order.
    pub fn push(&mut self, definition: ComponentDefinition) {
        self.definitions.push(definition);
    }

    /// Number of loaded definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the set holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate definitions in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.iter()
    }

    /// Find the first definition whose slug equals `requested_slug`.
    ///
    /// The argument must already be normalized (both sides of a match go
    /// through the same [`Slugify`] implementation). An empty slug or an
    /// empty set short-circuits to `None` without scanning.
    pub fn find(&self, requested_slug: &str) -> Option<&ComponentDefinition> {
        if requested_slug.is_empty() || self.definitions.is_empty() {
            return None;
        }
        self.definitions.iter().find(|d| d.slug == requested_slug)
    }
}

/// Metadata block schema of a component source file.
///
/// Unknown keys are ignored so component authors can carry their own
/// annotations.
#[derive(Debug, Default, Deserialize)]
struct ComponentFrontmatter {
    /// Display name; falls back to the file stem when absent.
    name: Option<String>,
    /// Default field values.
    #[serde(default)]
    defaults: Map<String, Value>,
    /// Stylesheet fragment contributed to the CSS bucket.
    css: Option<String>,
    /// Script fragment contributed to the JS bucket.
    js: Option<String>,
}

/// Split a component source file into its metadata block and template
/// body.
///
/// Malformed metadata is tolerated: the error is logged and the whole
/// file is treated as a template with no name and no defaults, so one bad
/// component cannot abort the build.
fn parse_component_source(content: &str, path: &Path) -> (ComponentFrontmatter, String) {
    let matter = Matter::<YAML>::new();
    let parsed = match matter.parse::<serde_yaml::Value>(content) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(
                "Unreadable metadata block in component '{}': {}. Using raw content.",
                path.display(),
                e
            );
            return (ComponentFrontmatter::default(), content.to_string());
        }
    };

    let frontmatter = match parsed.data {
        Some(yaml) => match serde_yaml::from_value::<ComponentFrontmatter>(yaml) {
            Ok(fm) => fm,
            Err(e) => {
                tracing::warn!(
                    "Invalid metadata in component '{}': {}. Processing without metadata.",
                    path.display(),
                    e
                );
                ComponentFrontmatter::default()
            }
        },
        None => ComponentFrontmatter::default(),
    };

    (frontmatter, parsed.content)
}

/// Glob-based component discovery and loading.
///
/// The pattern is compiled once at construction. Discovery walks the site
/// root without following symlinks and returns paths relative to it,
/// sorted so that discovery order (and therefore first-match tie-breaking)
/// is deterministic across platforms.
#[derive(Debug, Clone)]
pub struct ComponentLoader {
    pattern: Pattern,
    original_pattern: String,
}

impl ComponentLoader {
    /// Compile a loader from a glob pattern string.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not valid glob syntax.
    pub fn new(pattern_str: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern_str)
            .with_context(|| format!("Invalid component glob pattern: {pattern_str}"))?;
        Ok(Self {
            pattern,
            original_pattern: pattern_str.to_string(),
        })
    }

    /// The pattern string this loader was built from.
    pub fn pattern(&self) -> &str {
        &self.original_pattern
    }

    /// Find all component source files under `site_root`.
    ///
    /// Returns paths relative to `site_root`, sorted lexicographically.
    /// A missing site root yields an empty list rather than an error so
    /// the plugin can attach to a site that has no components yet.
    pub fn discover(&self, site_root: &Path) -> Result<Vec<PathBuf>> {
        if !site_root.exists() {
            tracing::debug!("Site root {} does not exist; no components", site_root.display());
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in WalkDir::new(site_root).follow_links(false) {
            let entry = entry
                .with_context(|| format!("Failed to walk site root: {}", site_root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(site_root)
                .expect("walkdir yields paths under its root");
            if self.pattern.matches_path(relative) {
                matches.push(relative.to_path_buf());
            }
        }

        matches.sort();
        tracing::debug!(
            "Discovered {} component file(s) matching '{}'",
            matches.len(),
            self.original_pattern
        );
        Ok(matches)
    }

    /// Discover and parse all components under `site_root`.
    ///
    /// Produces the ordered [`ComponentSet`] and, when
    /// [`ComponentsConfig::enable_assets`] is set, the asset buckets
    /// populated with each definition's declared fragments.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read. Metadata
    /// problems are tolerated per [`parse_component_source`].
    pub async fn load(
        &self,
        site_root: &Path,
        config: &ComponentsConfig,
        slugifier: &dyn Slugify,
    ) -> Result<(ComponentSet, AssetBuckets)> {
        let mut components = ComponentSet::new();
        let mut assets = AssetBuckets::new();

        for relative in self.discover(site_root)? {
            let path = site_root.join(&relative);
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read component source: {}", path.display()))?;

            let (frontmatter, template) = parse_component_source(&content, &relative);
            // Outer whitespace is delimiter residue, not template content.
            let template = template.trim().to_string();

            let name = frontmatter.name.unwrap_or_else(|| {
                relative
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            let slug = slugifier.slugify(&name);
            if slug.is_empty() {
                tracing::warn!(
                    "Component '{}' has a name that normalizes to nothing; it can never match",
                    relative.display()
                );
            }
            if let Some(existing) = components.find(&slug) {
                tracing::warn!(
                    "Components '{}' and '{}' share the slug '{}'; first one wins",
                    existing.source_path.display(),
                    relative.display(),
                    slug
                );
            }

            if config.enable_assets {
                if let Some(css) = frontmatter.css {
                    assets.add(AssetKind::Css, name.clone(), css);
                }
                if let Some(js) = frontmatter.js {
                    assets.add(AssetKind::Js, name.clone(), js);
                }
            }

            tracing::debug!(
                "Loaded component '{}' (slug '{}', {} default(s)) from {}",
                name,
                slug,
                frontmatter.defaults.len(),
                relative.display()
            );

            components.push(ComponentDefinition {
                name,
                slug,
                defaults: frontmatter.defaults,
                template,
                source_path: relative,
            });
        }

        Ok((components, assets))
    }
}
