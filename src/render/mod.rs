//! The component matching, merging, and rendering filter.
//!
//! This is the heart of the plugin: given a request item (or an ordered
//! sequence of them), look up the component definition whose slug matches
//! the item's `type` field, merge the definition's defaults with the
//! item's fields (item wins per-field), and hand the merged context to the
//! render delegate for the selected dialect.
//!
//! The filter is deliberately fail-silent: a missing item, a missing
//! `type` field, an unmatched type, an unavailable collection, or a
//! delegate failure each produce an empty string for that item, never an
//! error. Template filters run inside page generation, and one bad
//! component must not abort the whole site build. Hosts that need to
//! observe the cause use [`ComponentRenderer::try_render_item`].

pub mod tera;

use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;

use crate::error::ComponentError;
use crate::registry::ComponentSet;
use crate::slug::Slugify;

/// Field of a request item that names the desired component.
pub const TYPE_FIELD: &str = "type";

/// The external capability that turns (template text, dialect, data) into
/// output text.
///
/// Implementations may be asynchronous; multi-item render calls await
/// each item sequentially, in input order, so a delegate never sees
/// concurrent calls from a single filter invocation.
pub trait RenderDelegate: Send + Sync {
    /// Render `template` in the named `dialect` against `context`.
    ///
    /// # Errors
    ///
    /// Delegate errors are converted into
    /// [`ComponentError::Render`] and absorbed by the filter.
    fn render(
        &self,
        template: &str,
        dialect: &str,
        context: &Map<String, Value>,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Pointwise union of a definition's defaults and a request item's
/// fields.
///
/// Item values override defaults for identical field names; fields
/// present only in one side pass through unchanged (including `type`
/// itself). The merge is shallow: nested objects are replaced, not
/// recursed into.
pub fn merge_fields(defaults: &Map<String, Value>, item: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = defaults.clone();
    for (key, value) in item {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// The `render_component` filter.
///
/// Holds the read-only definitions collection (shared with the host), the
/// render delegate, the normalizer, and the fallback dialect. Cheap to
/// share across render calls; the collection is never mutated after
/// build-setup.
pub struct ComponentRenderer<D> {
    components: Arc<ComponentSet>,
    delegate: D,
    slugifier: Arc<dyn Slugify>,
    default_dialect: String,
}

impl<D: RenderDelegate> ComponentRenderer<D> {
    /// Create a renderer over a loaded collection.
    pub fn new(
        components: Arc<ComponentSet>,
        delegate: D,
        slugifier: Arc<dyn Slugify>,
        default_dialect: impl Into<String>,
    ) -> Self {
        Self {
            components,
            delegate,
            slugifier,
            default_dialect: default_dialect.into(),
        }
    }

    /// The collection this renderer matches against.
    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    /// Render a request item or an ordered sequence of request items.
    ///
    /// A JSON array is treated as a sequence: items are rendered in input
    /// order, sequentially, and their outputs joined with a single `\n`.
    /// A one-element sequence renders identically to a bare item. Any
    /// failure yields an empty string for that item (logged, never
    /// propagated).
    pub async fn render_component(&self, input: &Value, dialect: Option<&str>) -> String {
        let items: Vec<&Value> = match input {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };

        let mut outputs = Vec::with_capacity(items.len());
        for item in items {
            match self.try_render_item(item, dialect).await {
                Ok(rendered) => outputs.push(rendered),
                Err(e) => {
                    tracing::warn!("Component render produced no output: {e}");
                    outputs.push(String::new());
                }
            }
        }
        outputs.join("\n")
    }

    /// Render a single request item, surfacing the failure cause.
    ///
    /// This is the typed counterpart of [`render_component`]: same
    /// matching, merging, and delegation, but failures come back as
    /// [`ComponentError`] instead of an empty string.
    ///
    /// [`render_component`]: Self::render_component
    pub async fn try_render_item(
        &self,
        item: &Value,
        dialect: Option<&str>,
    ) -> Result<String, ComponentError> {
        let object = item.as_object().ok_or(ComponentError::InvalidItem)?;
        let requested = object
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(ComponentError::MissingType)?;

        if self.components.is_empty() {
            return Err(ComponentError::CollectionUnavailable);
        }

        let slug = self.slugifier.slugify(requested);
        let definition = self.components.find(&slug).ok_or_else(|| ComponentError::NoMatch {
            requested: requested.to_string(),
        })?;

        let context = merge_fields(&definition.defaults, object);
        let dialect = dialect.unwrap_or(&self.default_dialect);

        tracing::debug!(
            "Rendering component '{}' (dialect '{}', {} context field(s))",
            definition.name,
            dialect,
            context.len()
        );

        self.delegate
            .render(&definition.template, dialect, &context)
            .await
            .map_err(|source| ComponentError::Render {
                name: definition.name.clone(),
                dialect: dialect.to_string(),
                source,
            })
    }
}
