use std::sync::Arc;
use tracing::{instrument, trace};

use super::components::{ComponentSelector, ComponentSet, ComponentValue, IntoSelector, Normalized};
use super::decompose::{decompose, RawParts};
use super::host::{canonicalize_host, detect_idn, IdnConverter};
use super::url_processor::{decode_component, reencode_segments};
use super::url_validator::{
    has_real_scheme, inject_sentinel, prepare_input, DEFAULT_SCHEME, SENTINEL_SCHEME,
};
use crate::error::NormalizeError;
use crate::multibyte::Multibyte;

/// Turns raw, possibly malformed URL text into canonical components.
///
/// A normalizer holds no mutable state; the IDN converter and the text
/// backend are fixed when it is built, so one instance can be shared across
/// threads.
///
/// # Example
///
/// ```
/// use urlcanon::{ComponentSelector, UrlNormalizer};
///
/// let normalizer = UrlNormalizer::new();
/// let host = normalizer.normalize("HTTPS://Example.COM./a", ComponentSelector::Host)?;
/// assert_eq!(host.into_component().unwrap(), "example.com");
/// # Ok::<(), urlcanon::NormalizeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    idn: Arc<dyn IdnConverter>,
    text: Multibyte,
    default_scheme: String,
}

impl Default for UrlNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlNormalizer {
    /// Normalizer using the capabilities this build was compiled with.
    pub fn new() -> Self {
        Self {
            idn: detect_idn(),
            text: Multibyte::detect(),
            default_scheme: DEFAULT_SCHEME.to_string(),
        }
    }

    pub fn with_idn(mut self, idn: Arc<dyn IdnConverter>) -> Self {
        self.idn = idn;
        self
    }

    pub fn with_text_backend(mut self, text: Multibyte) -> Self {
        self.text = text;
        self
    }

    /// Scheme given to protocol-relative input (`//host/...`).
    pub fn with_default_scheme(mut self, scheme: &str) -> Self {
        self.default_scheme = scheme.to_ascii_lowercase();
        self
    }

    pub fn idn_available(&self) -> bool {
        self.idn.is_available()
    }

    pub fn text_backend(&self) -> Multibyte {
        self.text
    }

    pub fn default_scheme(&self) -> &str {
        &self.default_scheme
    }

    /// Normalizes `raw` and returns the component named by `selector`, or
    /// every component for [`ComponentSelector::All`].
    ///
    /// # Arguments
    /// * `raw` - URL text in any state of repair
    /// * `selector` - a [`ComponentSelector`], an integer code or a component name
    ///
    /// # Returns
    /// * `Result<Normalized, NormalizeError>` - the canonical value(s); the
    ///   only error is an unknown selector
    #[instrument(level = "trace", skip_all, fields(raw = %raw))]
    pub fn normalize<S: IntoSelector>(
        &self,
        raw: &str,
        selector: S,
    ) -> Result<Normalized, NormalizeError> {
        let selector = selector.into_selector()?;

        let prepared = prepare_input(raw, &self.text, &self.default_scheme);
        let encoded = reencode_segments(&prepared);

        let target = if selector != ComponentSelector::Scheme && !has_real_scheme(&encoded) {
            inject_sentinel(&encoded)
        } else {
            encoded
        };
        trace!("Decomposing {:?} for {}", target, selector);

        let parts = decompose(&target);
        Ok(match selector {
            ComponentSelector::All => Normalized::All(self.canonicalize(&parts)),
            single => Normalized::Component(self.canonical_component(&parts, single)),
        })
    }

    /// Same as [`UrlNormalizer::normalize`] for input that may not be UTF-8.
    /// Invalid sequences become U+FFFD.
    pub fn normalize_bytes<S: IntoSelector>(
        &self,
        raw: &[u8],
        selector: S,
    ) -> Result<Normalized, NormalizeError> {
        self.normalize(&String::from_utf8_lossy(raw), selector)
    }

    /// Every component of `raw`.
    pub fn parse(&self, raw: &str) -> ComponentSet {
        match self.normalize(raw, ComponentSelector::All) {
            Ok(Normalized::All(set)) => set,
            _ => ComponentSet::default(),
        }
    }

    fn canonicalize(&self, parts: &RawParts<'_>) -> ComponentSet {
        ComponentSet {
            scheme: self.canonical_scheme(parts.scheme),
            host: self.canonical_host(parts.host),
            port: parts.port,
            user: parts.user.map(decode_component),
            pass: parts.pass.map(decode_component),
            path: parts.path.map(decode_component),
            query: parts.query.map(decode_component),
            fragment: parts.fragment.map(decode_component),
        }
    }

    fn canonical_component(
        &self,
        parts: &RawParts<'_>,
        selector: ComponentSelector,
    ) -> Option<ComponentValue> {
        let text = match selector {
            ComponentSelector::Scheme => self.canonical_scheme(parts.scheme),
            ComponentSelector::Host => self.canonical_host(parts.host),
            ComponentSelector::Port => return parts.port.map(ComponentValue::Port),
            ComponentSelector::User => parts.user.map(decode_component),
            ComponentSelector::Pass => parts.pass.map(decode_component),
            ComponentSelector::Path => parts.path.map(decode_component),
            ComponentSelector::Query => parts.query.map(decode_component),
            ComponentSelector::Fragment => parts.fragment.map(decode_component),
            ComponentSelector::All => None,
        };
        text.map(ComponentValue::Text)
    }

    /// Schemes are never decoded. The sentinel never leaves this function.
    fn canonical_scheme(&self, scheme: Option<&str>) -> Option<String> {
        let scheme = scheme?.to_ascii_lowercase();
        (scheme != SENTINEL_SCHEME).then_some(scheme)
    }

    fn canonical_host(&self, host: Option<&str>) -> Option<String> {
        canonicalize_host(host?, self.idn.as_ref(), &self.text)
    }
}
