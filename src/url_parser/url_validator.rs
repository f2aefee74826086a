use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv6Addr;
use tracing::trace;

use crate::multibyte::Multibyte;

/// Placeholder scheme given to scheme-less input so that the authority is
/// recognised. It is erased before anything is returned.
pub const SENTINEL_SCHEME: &str = "x-urlcanon-sentinel";

/// Scheme used for protocol-relative input such as `//example.com`.
pub const DEFAULT_SCHEME: &str = "https";

static SCHEME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("scheme pattern compiles")
});

// `host:8080/path` looks like a scheme but is a host and port.
static PORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(?:[/?#]|$)").expect("port pattern compiles")
});

/// Trims the raw input, gives protocol-relative URLs a concrete scheme and
/// brackets a bare IPv6 address so its colons are not read as a port.
pub fn prepare_input(raw: &str, text: &Multibyte, default_scheme: &str) -> String {
    let trimmed = text.trim(raw);

    let stubbed = match trimmed
        .strip_prefix("://")
        .or_else(|| trimmed.strip_prefix("//"))
    {
        Some(rest) => {
            trace!("Protocol-relative input, using {}://", default_scheme);
            format!("{}://{}", default_scheme, rest)
        }
        None => trimmed,
    };

    if stubbed.parse::<Ipv6Addr>().is_ok() {
        trace!("Bare IPv6 address, adding brackets");
        return format!("[{}]", stubbed);
    }
    stubbed
}

/// Splits a leading `scheme:` off `input`, returning the scheme and the rest.
pub fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let scheme = SCHEME_PATTERN.captures(input)?.get(1)?.as_str();
    let rest = &input[scheme.len() + 1..];
    if PORT_PATTERN.is_match(rest) {
        return None;
    }
    Some((scheme, rest))
}

pub fn has_real_scheme(input: &str) -> bool {
    split_scheme(input).is_some()
}

pub fn inject_sentinel(input: &str) -> String {
    format!("{}://{}", SENTINEL_SCHEME, input)
}
