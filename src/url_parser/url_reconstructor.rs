use std::borrow::Cow;
use std::fmt::{self, Write};

use super::components::ComponentSet;

/// Characters that would end or split an authority component if written as-is.
const AUTHORITY_RESERVED: &[char] = &['%', ':', '/', '@', '?', '#', '[', ']', '&', '='];
const PATH_RESERVED: &[char] = &['%', '?', '#'];
const QUERY_RESERVED: &[char] = &['%', '#'];
const FRAGMENT_RESERVED: &[char] = &['%'];

/// Writes the set back out as a URL that normalizes to the same set.
///
/// A set without a scheme is written without a scheme prefix (`host/path`,
/// not `//host/path`), so normalizing the output again still finds no scheme.
/// Delimiters inside components are percent-encoded. The first run after the
/// scheme is decoded twice on the way back in, so it is encoded twice here.
impl fmt::Display for ComponentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }

        let has_userinfo = self.user.is_some() || self.pass.is_some();
        let has_authority = has_userinfo || self.host.is_some() || self.port.is_some();
        if has_authority {
            if self.scheme.is_some() {
                f.write_str("//")?;
            }
            if has_userinfo {
                if let Some(user) = &self.user {
                    // `user:pass@` without a scheme would read as `user:`.
                    let guard_scheme = self.scheme.is_none() && self.pass.is_some();
                    f.write_str(&escape_first_run(user, guard_scheme))?;
                }
                if let Some(pass) = &self.pass {
                    write!(f, ":{}", escape(pass, AUTHORITY_RESERVED))?;
                }
                f.write_str("@")?;
            }
            if let Some(host) = &self.host {
                if host.starts_with('[') {
                    f.write_str(host)?;
                } else if has_userinfo {
                    f.write_str(&escape(host, AUTHORITY_RESERVED))?;
                } else {
                    f.write_str(&escape_first_run(host, false))?;
                }
            }
            if let Some(port) = self.port {
                write!(f, ":{}", port)?;
            }
        }

        if let Some(path) = &self.path {
            let path = escape(path, PATH_RESERVED);
            match path.strip_prefix("//") {
                Some(rest) if !has_authority => write!(f, "/%2F{}", rest)?,
                _ => f.write_str(&path)?,
            }
        }
        if let Some(query) = &self.query {
            write!(f, "?{}", escape(query, QUERY_RESERVED))?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", escape(fragment, FRAGMENT_RESERVED))?;
        }
        Ok(())
    }
}

fn escape<'a>(text: &'a str, reserved: &[char]) -> Cow<'a, str> {
    if !text.contains(reserved) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if reserved.contains(&c) {
            let _ = write!(out, "%{:02X}", c as u32);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Encodes the leading authority component, which is percent-decoded once
/// more than the others. With `guard_scheme` a leading letter is encoded too.
fn escape_first_run(text: &str, guard_scheme: bool) -> String {
    let once = escape(text, AUTHORITY_RESERVED);
    let once = match once.chars().next() {
        Some(first) if guard_scheme && first.is_ascii_alphabetic() => {
            format!("%{:02X}{}", first as u32, &once[1..])
        }
        _ => once.into_owned(),
    };
    escape(&once, &['%']).into_owned()
}

impl ComponentSet {
    pub fn to_url_string(&self) -> String {
        self.to_string()
    }
}
