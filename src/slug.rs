//! Name normalization for component matching.
//!
//! Component definitions are matched to request items by comparing a
//! normalized form of the definition's display name against a normalized
//! form of the requested type string. Normalization is standard
//! slugification: lowercase, non-alphanumeric runs collapsed to single
//! hyphens, leading and trailing hyphens trimmed.
//!
//! Hosts that already carry a slugify utility (most static site generators
//! do) can substitute it through the [`Slugify`] trait; the plugin defaults
//! to [`DefaultSlugify`].
//!
//! # Examples
//!
//! ```
//! use cornice::slug::slugify;
//!
//! assert_eq!(slugify("Text and Image"), "text-and-image");
//! assert_eq!(slugify("  Hero -- Banner!  "), "hero-banner");
//! ```

/// Normalization capability used to derive matching keys.
///
/// Both sides of a match (the definition's display name and the requested
/// type string) are passed through the same implementation, so any
/// normalizer that is deterministic and idempotent will produce consistent
/// matching.
pub trait Slugify: Send + Sync {
    /// Derive a matching key from a display name or requested type string.
    fn slugify(&self, name: &str) -> String;
}

/// The built-in normalizer, wrapping [`slugify`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSlugify;

impl Slugify for DefaultSlugify {
    fn slugify(&self, name: &str) -> String {
        slugify(name)
    }
}

/// Normalize a display name into a URL-safe matching key.
///
/// Lowercases the input, collapses every run of non-alphanumeric
/// characters into a single `-`, and trims leading/trailing hyphens.
/// The result is stable under repeated application.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
