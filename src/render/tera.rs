//! Default render delegate backed by the Tera template engine.
//!
//! The plugin is usable without any host wiring through this delegate. It
//! understands two dialects:
//!
//! - `"tera"` — the template source is rendered with [`Tera::one_off`]
//!   against the merged context. Autoescaping is off: components emit
//!   markup, and escaping their own output would corrupt it.
//! - `"html"` — the template source passes through verbatim, for static
//!   fragments that only exist to participate in matching and asset
//!   bundling.
//!
//! Any other dialect is an error, which the filter converts into an empty
//! string for the affected item. Hosts with their own template engines
//! implement [`RenderDelegate`](super::RenderDelegate) directly instead.

use anyhow::{Context as _, Result, bail};
use serde_json::{Map, Value};
use std::future::Future;
use tera::{Context as TeraContext, Tera};

use super::RenderDelegate;

/// Dialect name handled by [`Tera::one_off`].
pub const TERA_DIALECT: &str = "tera";

/// Dialect name for verbatim pass-through fragments.
pub const HTML_DIALECT: &str = "html";

/// Stateless Tera-backed delegate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraDelegate;

impl TeraDelegate {
    /// Create the delegate.
    pub fn new() -> Self {
        Self
    }

    fn render_sync(template: &str, dialect: &str, context: &Map<String, Value>) -> Result<String> {
        match dialect {
            TERA_DIALECT => {
                let ctx = TeraContext::from_serialize(Value::Object(context.clone()))
                    .context("Failed to build template context")?;
                Tera::one_off(template, &ctx, false).context("Template rendering failed")
            }
            HTML_DIALECT => Ok(template.to_string()),
            other => bail!("Unsupported template dialect '{other}'"),
        }
    }
}

impl RenderDelegate for TeraDelegate {
    fn render(
        &self,
        template: &str,
        dialect: &str,
        context: &Map<String, Value>,
    ) -> impl Future<Output = Result<String>> + Send {
        let result = Self::render_sync(template, dialect, context);
        async move { result }
    }
}
