//! Cornice - component plugin for static site generators.
//!
//! Cornice implements a "component" abstraction on top of a host site
//! generator's existing facilities: reusable template fragments matched to
//! content data by a type identifier, rendered with default/override data
//! merging and optional multi-dialect support, plus CSS/JS asset bundling.
//! It is a thin adapter gluing a naming convention onto the host - not a
//! templating engine, not a build pipeline, not an asset minifier.
//!
//! # How it works
//!
//! 1. **Discovery** - component source files are found under the site root
//!    by a configurable glob (default `components/**/*.md`). Each file's
//!    leading YAML metadata block supplies a display name, default field
//!    values, and optional `css:`/`js:` fragments; the rest of the file is
//!    the template source.
//! 2. **Matching** - a request item's `type` field is normalized to a slug
//!    and compared against each definition's normalized name, in discovery
//!    order; first match wins.
//! 3. **Merging** - the definition's defaults and the item's fields are
//!    merged pointwise, item values winning per-field.
//! 4. **Rendering** - the merged context, the template source, and the
//!    selected dialect are handed to a render delegate. Any failure along
//!    the way yields an empty string, never an aborted build.
//!
//! # Core Modules
//!
//! - [`plugin`] - the façade a host attaches during build setup
//! - [`render`] - the matching/merge/render filter and the
//!   [`RenderDelegate`](render::RenderDelegate) seam (default Tera
//!   implementation in [`render::tera`])
//! - [`registry`] - component discovery, parsing, and the ordered
//!   definitions collection
//! - [`assets`] - CSS/JS accumulation buckets and bundle emission
//! - [`config`] - plugin configuration and the production-mode signal
//! - [`slug`] - name normalization and the [`Slugify`](slug::Slugify) seam
//! - [`error`] - the render-time error taxonomy
//!
//! # Example
//!
//! ```rust,no_run
//! use cornice::config::ComponentsConfig;
//! use cornice::plugin::ComponentsPlugin;
//! use cornice::render::tera::TeraDelegate;
//! use serde_json::json;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let plugin = ComponentsPlugin::attach(
//!     Path::new("site"),
//!     ComponentsConfig::default(),
//!     TeraDelegate::new(),
//! )
//! .await?;
//!
//! // From any host template:
//! let html = plugin
//!     .render_component(&json!({ "type": "callout", "heading": "Hi" }), None)
//!     .await;
//!
//! // During build finalization:
//! plugin.write_asset_bundles().await?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod render;
pub mod slug;
