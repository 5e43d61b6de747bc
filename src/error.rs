//! Error types for component loading and rendering.
//!
//! The crate splits errors the same way its surrounding tooling does:
//! render-time failures are strongly typed ([`ComponentError`]) so hosts
//! and tests can observe exactly why an item produced no output, while
//! load-time failures (bad glob, unreadable file) propagate as
//! `anyhow::Result` with context.
//!
//! None of the render-time variants ever escape the
//! [`render_component`](crate::render::ComponentRenderer::render_component)
//! filter: each one is caught at the filter boundary, logged, and surfaced
//! to the calling template as an empty string. A single bad component must
//! not abort a whole site build.

use thiserror::Error;

/// Failure modes of the merge-and-render filter.
///
/// Every variant maps to the same caller-visible outcome (an empty string
/// for the affected item); the distinction exists for diagnostics and for
/// hosts using [`try_render_item`](crate::render::ComponentRenderer::try_render_item).
#[derive(Debug, Error)]
pub enum ComponentError {
    /// The request item was `null`, a scalar, or otherwise not an object.
    #[error("component request is not an object")]
    InvalidItem,

    /// The request item carried no string `type` field.
    #[error("component request has no 'type' field")]
    MissingType,

    /// The definitions collection was empty or never loaded.
    #[error("component collection is empty or unavailable")]
    CollectionUnavailable,

    /// No definition's slug matched the requested type string.
    #[error("no component matches type '{requested}'")]
    NoMatch {
        /// The requested type string, as supplied by the caller.
        requested: String,
    },

    /// The render delegate rejected or failed on the matched definition.
    #[error("failed to render component '{name}' with dialect '{dialect}'")]
    Render {
        /// Display name of the matched definition.
        name: String,
        /// Dialect the delegate was invoked with.
        dialect: String,
        /// Underlying delegate error.
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ComponentError::NoMatch {
                requested: "missing-type".to_string()
            }
            .to_string(),
            "no component matches type 'missing-type'"
        );
        assert_eq!(ComponentError::MissingType.to_string(), "component request has no 'type' field");
    }

    #[test]
    fn test_render_error_preserves_source() {
        use std::error::Error as _;

        let err = ComponentError::Render {
            name: "Callout".to_string(),
            dialect: "tera".to_string(),
            source: anyhow::anyhow!("undefined variable"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("Callout"));
    }
}
