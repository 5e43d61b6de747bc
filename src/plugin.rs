//! Plugin façade: wiring discovery, rendering, and bundling to a host.
//!
//! [`ComponentsPlugin::attach`] is the build-setup entry point: it runs
//! component discovery once, loads the definitions collection, collects
//! asset fragments, and constructs the render filter. Everything it
//! returns is read-only for the rest of the build, so a host can share
//! the plugin freely across page renders.

use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::AssetBuckets;
use crate::config::{ComponentsConfig, Environment};
use crate::registry::{ComponentLoader, ComponentSet};
use crate::render::{ComponentRenderer, RenderDelegate};
use crate::slug::{DefaultSlugify, Slugify};

/// An attached component plugin.
///
/// Generic over the render delegate so hosts bring their own template
/// engine; [`TeraDelegate`](crate::render::tera::TeraDelegate) is the
/// batteries-included choice.
pub struct ComponentsPlugin<D> {
    site_root: PathBuf,
    config: ComponentsConfig,
    components: Arc<ComponentSet>,
    assets: AssetBuckets,
    renderer: Option<ComponentRenderer<D>>,
}

impl<D: RenderDelegate> ComponentsPlugin<D> {
    /// Attach the plugin to a site, using the default normalizer.
    ///
    /// # Errors
    ///
    /// Returns an error if the component glob is invalid or a discovered
    /// component file cannot be read.
    pub async fn attach(site_root: &Path, config: ComponentsConfig, delegate: D) -> Result<Self> {
        Self::attach_with(site_root, config, delegate, Arc::new(DefaultSlugify)).await
    }

    /// Attach with a host-supplied [`Slugify`] implementation.
    ///
    /// The same normalizer is applied to definition names at load time
    /// and to requested type strings at render time.
    pub async fn attach_with(
        site_root: &Path,
        config: ComponentsConfig,
        delegate: D,
        slugifier: Arc<dyn Slugify>,
    ) -> Result<Self> {
        let loader = ComponentLoader::new(&config.component_glob)?;
        let (components, assets) = loader.load(site_root, &config, slugifier.as_ref()).await?;
        let components = Arc::new(components);

        tracing::debug!(
            "Attached component plugin: {} definition(s) as collection '{}'",
            components.len(),
            config.collection_name
        );

        let renderer = config.enable_rendering.then(|| {
            ComponentRenderer::new(
                Arc::clone(&components),
                delegate,
                slugifier,
                config.default_dialect.clone(),
            )
        });

        Ok(Self {
            site_root: site_root.to_path_buf(),
            config,
            components,
            assets,
            renderer,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &ComponentsConfig {
        &self.config
    }

    /// Name under which the host should expose the collection.
    pub fn collection_name(&self) -> &str {
        &self.config.collection_name
    }

    /// The loaded definitions collection.
    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    /// The collected asset fragments.
    pub fn assets(&self) -> &AssetBuckets {
        &self.assets
    }

    /// The exposed filter: render a request item or sequence of items.
    ///
    /// When rendering is disabled by configuration the filter returns an
    /// empty string unconditionally, matching its fail-silent contract.
    pub async fn render_component(&self, input: &Value, dialect: Option<&str>) -> String {
        match &self.renderer {
            Some(renderer) => renderer.render_component(input, dialect).await,
            None => {
                tracing::debug!("Component rendering is disabled; returning empty output");
                String::new()
            }
        }
    }

    /// Emit the combined asset bundles.
    ///
    /// A no-op returning no paths when asset bundling is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if an artifact cannot be written.
    pub async fn write_asset_bundles(&self) -> Result<Vec<PathBuf>> {
        if !self.config.enable_assets {
            return Ok(Vec::new());
        }
        self.assets.write_bundles(&self.site_root, &self.config).await
    }

    /// Globs the host should exclude from its output-generating file set.
    ///
    /// Non-empty only for production builds with
    /// [`exclude_in_production`](ComponentsConfig::exclude_in_production)
    /// enabled; component sources then stop producing standalone pages
    /// while the collection and filter keep working.
    pub fn output_ignore_globs(&self, env: Environment) -> Vec<String> {
        if self.config.exclude_in_production && env.is_production() {
            vec![self.config.component_glob.clone()]
        } else {
            Vec::new()
        }
    }
}
