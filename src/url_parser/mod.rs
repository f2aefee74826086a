//! URL normalization and decomposition.
//!
//! Normalization runs in a fixed order:
//! 1. [`url_validator`] trims the input, stubs a scheme onto protocol-relative
//!    URLs and brackets bare IPv6 addresses
//! 2. [`url_processor`] percent-decodes the first authority-like run
//! 3. [`url_validator`] decides whether a real scheme is present, otherwise a
//!    private placeholder scheme is prepended
//! 4. [`decompose`] splits the text into its structural parts
//! 5. [`parser`] decodes each part and canonicalizes the host with [`host`]

pub mod components;
pub mod decompose;
pub mod host;
pub mod parser;
pub mod query;
pub mod url_cache;
pub mod url_processor;
pub mod url_reconstructor;
pub mod url_validator;

#[cfg(test)]
mod tests;

use once_cell::sync::Lazy;

pub use components::{ComponentSelector, ComponentSet, ComponentValue, IntoSelector, Normalized};
pub use host::{detect_idn, IdnConverter, NoopPassthrough};
#[cfg(feature = "idn")]
pub use host::IdnaConverter;
pub use parser::UrlNormalizer;
pub use query::query_pairs;
pub use url_cache::NormalizeCache;

use crate::error::NormalizeError;

// Immutable after construction.
static DEFAULT_NORMALIZER: Lazy<UrlNormalizer> = Lazy::new(UrlNormalizer::new);

/// Normalizes `raw` with the build's default capabilities.
///
/// See [`UrlNormalizer::normalize`].
pub fn normalize<S: IntoSelector>(raw: &str, selector: S) -> Result<Normalized, NormalizeError> {
    DEFAULT_NORMALIZER.normalize(raw, selector)
}

/// Like [`normalize`] for input that may not be UTF-8.
pub fn normalize_bytes<S: IntoSelector>(raw: &[u8], selector: S) -> Result<Normalized, NormalizeError> {
    DEFAULT_NORMALIZER.normalize_bytes(raw, selector)
}

/// Every canonical component of `raw`.
pub fn parse(raw: &str) -> ComponentSet {
    DEFAULT_NORMALIZER.parse(raw)
}
