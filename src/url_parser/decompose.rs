use tracing::debug;

use super::url_validator::split_scheme;

/// Structural pieces of a URL before any decoding or casing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawParts<'a> {
    pub scheme: Option<&'a str>,
    pub user: Option<&'a str>,
    pub pass: Option<&'a str>,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub path: Option<&'a str>,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// Splits `input` into scheme, userinfo, host, port, path, query and fragment.
///
/// The fragment starts at the first `#` and the query at the first `?` before
/// it. An authority is only recognised after `//` and runs to the next `/`.
pub fn decompose(input: &str) -> RawParts<'_> {
    let mut parts = RawParts::default();

    let rest = match split_scheme(input) {
        Some((scheme, rest)) => {
            parts.scheme = Some(scheme);
            rest
        }
        None => input,
    };

    let rest = match rest.split_once('#') {
        Some((before, fragment)) => {
            parts.fragment = Some(fragment);
            before
        }
        None => rest,
    };

    let rest = match rest.split_once('?') {
        Some((before, query)) => {
            parts.query = Some(query);
            before
        }
        None => rest,
    };

    let path = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            let (authority, path) = after.split_at(end);
            split_authority(authority, &mut parts);
            path
        }
        None => rest,
    };
    parts.path = non_empty(path);

    parts
}

fn split_authority<'a>(authority: &'a str, parts: &mut RawParts<'a>) {
    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            match userinfo.split_once(':') {
                Some((user, pass)) => {
                    parts.user = non_empty(user);
                    parts.pass = Some(pass);
                }
                None => parts.user = non_empty(userinfo),
            }
            host_port
        }
        None => authority,
    };

    let (host, port) = split_port(host_port);
    parts.host = non_empty(host);
    parts.port = port;
}

/// Separates a trailing `:<digits>` from a host.
///
/// For a bracketed literal only a colon after the last `]` counts. An
/// unbracketed host with several colons has no port. Port text with anything
/// other than digits leaves the whole value as the host.
fn split_port(host_port: &str) -> (&str, Option<u16>) {
    let colon = match host_port.rfind(']') {
        Some(close) => host_port[close..].find(':').map(|i| close + i),
        None if host_port.matches(':').count() == 1 => host_port.find(':'),
        None => None,
    };
    let Some(colon) = colon else {
        return (host_port, None);
    };

    let (host, digits) = (&host_port[..colon], &host_port[colon + 1..]);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        debug!("Ignoring non-numeric port in {:?}", host_port);
        return (host_port, None);
    }

    let port = if digits.is_empty() {
        None
    } else {
        match digits.parse::<u16>() {
            Ok(port) => Some(port),
            Err(_) => {
                debug!("Dropping out of range port {}", digits);
                None
            }
        }
    };
    (host, port)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
