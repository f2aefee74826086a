use std::borrow::Cow;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Host;

use super::url_processor::decode_component;
use crate::multibyte::Multibyte;

/// Converts a single domain label to its ASCII-compatible form.
///
/// Implementations are chosen once when a normalizer is built, so both the
/// converting and the pass-through behaviour can be exercised in tests.
pub trait IdnConverter: Send + Sync + fmt::Debug {
    /// ASCII form of `label`, or `None` when the label cannot be converted.
    fn label_to_ascii(&self, label: &str) -> Option<String>;

    /// Whether this converter does any work at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// UTS #46 conversion backed by the `idna` crate.
#[cfg(feature = "idn")]
#[derive(Debug, Default, Clone, Copy)]
pub struct IdnaConverter;

#[cfg(feature = "idn")]
impl IdnConverter for IdnaConverter {
    fn label_to_ascii(&self, label: &str) -> Option<String> {
        idna::domain_to_ascii(label).ok()
    }
}

/// Used when IDN conversion is unavailable; labels are left as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPassthrough;

impl IdnConverter for NoopPassthrough {
    fn label_to_ascii(&self, _label: &str) -> Option<String> {
        None
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// The converter this build supports.
pub fn detect_idn() -> Arc<dyn IdnConverter> {
    #[cfg(feature = "idn")]
    {
        Arc::new(IdnaConverter)
    }
    #[cfg(not(feature = "idn"))]
    {
        Arc::new(NoopPassthrough)
    }
}

/// Canonical form of a raw host, or `None` if nothing is left of it.
///
/// The host is percent-decoded, converted label by label to ASCII, lowercased
/// and stripped of surrounding dots. Bracketed IP literals are validated and
/// rewritten in their canonical text form.
pub fn canonicalize_host(raw: &str, idn: &dyn IdnConverter, text: &Multibyte) -> Option<String> {
    let decoded = decode_component(raw);

    let converted = if idn.is_available() {
        decoded
            .split('.')
            .map(|label| convert_label(label, idn))
            .collect::<Vec<_>>()
            .join(".")
    } else {
        decoded
    };

    let lowered = text.strtolower(&converted);
    let trimmed = lowered.trim_matches('.');

    let host = if trimmed.starts_with('[') {
        canonical_ip_literal(trimmed)
    } else {
        trimmed.to_string()
    };
    trace!("Canonical host {:?} -> {:?}", raw, host);

    (!host.is_empty()).then_some(host)
}

fn convert_label<'a>(label: &'a str, idn: &dyn IdnConverter) -> Cow<'a, str> {
    if label.is_ascii() {
        return Cow::Borrowed(label);
    }
    match idn.label_to_ascii(label) {
        Some(ascii) if !ascii.is_empty() => Cow::Owned(ascii),
        _ => {
            debug!("Keeping label {:?} that has no ASCII form", label);
            Cow::Borrowed(label)
        }
    }
}

/// Validates a bracketed IP literal and rewrites it canonically.
///
/// Literals that are not valid IPv6 (or IPv4) addresses are returned
/// unchanged.
pub fn canonical_ip_literal(bracketed: &str) -> String {
    let interior: String = bracketed.chars().filter(|c| !matches!(c, '[' | ']')).collect();

    if let Ok(Host::Ipv6(addr)) = Host::parse(&format!("[{}]", interior)) {
        return format!("[{}]", addr);
    }
    if let Ok(addr) = interior.parse::<Ipv4Addr>() {
        return format!("[{}]", addr);
    }

    debug!("Passing through invalid IP literal {:?}", bracketed);
    bracketed.to_string()
}
