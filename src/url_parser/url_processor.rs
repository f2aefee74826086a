use std::borrow::Cow;
use tracing::{debug, trace};

/// Characters that end an authority-like run.
const BOUNDARIES: &[char] = &[':', '/', '@', '?', '&', '=', '#', '[', ']'];

/// Position of the segment scan within the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    /// Looking for an optional `scheme://` or `//` prefix.
    BeforeScheme,
    /// Inside the first userinfo-or-host-like run.
    InAuthority,
    /// Everything from the first boundary on, copied as-is.
    PastAuthority,
}

/// Single pass over the input that percent-decodes the first authority-like
/// run and leaves separators and the tail untouched.
#[derive(Debug)]
pub struct SegmentScanner<'a> {
    rest: &'a str,
    state: SegmentState,
    out: String,
}

impl<'a> SegmentScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            state: SegmentState::BeforeScheme,
            out: String::with_capacity(input.len()),
        }
    }

    pub fn state(&self) -> SegmentState {
        self.state
    }

    /// Consumes the input belonging to the current state and moves to the
    /// next one. Returns `false` once the scan is finished.
    pub fn step(&mut self) -> bool {
        match self.state {
            SegmentState::BeforeScheme => {
                let len = delimiter_prefix_len(self.rest);
                let (prefix, rest) = self.rest.split_at(len);
                self.out.push_str(prefix);
                self.rest = rest;
                self.state = SegmentState::InAuthority;
                true
            }
            SegmentState::InAuthority => {
                let end = self.rest.find(BOUNDARIES).unwrap_or(self.rest.len());
                let (run, rest) = self.rest.split_at(end);
                let decoded = percent_decode(run);
                if decoded != run {
                    trace!("Re-encoded authority run {:?} -> {:?}", run, decoded);
                }
                self.out.push_str(&decoded);
                self.rest = rest;
                self.state = SegmentState::PastAuthority;
                true
            }
            SegmentState::PastAuthority => {
                self.out.push_str(self.rest);
                self.rest = "";
                false
            }
        }
    }

    pub fn finish(mut self) -> String {
        while self.step() {}
        self.out
    }
}

/// Runs the segment scan over `input`.
pub fn reencode_segments(input: &str) -> String {
    SegmentScanner::new(input).finish()
}

/// Length of a leading `scheme://` or `//`, or zero.
fn delimiter_prefix_len(input: &str) -> usize {
    if input.starts_with("//") {
        return 2;
    }

    let bytes = input.as_bytes();
    if !bytes.first().is_some_and(u8::is_ascii_alphabetic) {
        return 0;
    }
    let token = bytes
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
        .count();

    if input[token..].starts_with("://") {
        token + 3
    } else {
        0
    }
}

/// Percent-decodes `text`. Text that would not decode to valid UTF-8 is
/// returned unchanged; `+` is left alone.
pub fn percent_decode(text: &str) -> Cow<'_, str> {
    if !text.contains('%') {
        return Cow::Borrowed(text);
    }
    match urlencoding::decode(text) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Keeping undecodable text {:?}: {}", text, e);
            Cow::Borrowed(text)
        }
    }
}

/// Decodes a structural component and writes spaces form-style as `+`.
pub fn decode_component(text: &str) -> String {
    percent_decode(text).replace(' ', "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_states() {
        let mut scanner = SegmentScanner::new("https://ex%61mple.com/a%20b");
        assert_eq!(scanner.state(), SegmentState::BeforeScheme);
        assert!(scanner.step());
        assert_eq!(scanner.state(), SegmentState::InAuthority);
        assert!(scanner.step());
        assert_eq!(scanner.state(), SegmentState::PastAuthority);
        assert!(!scanner.step());
        assert_eq!(scanner.finish(), "https://example.com/a%20b");
    }

    #[test]
    fn test_only_first_run_is_decoded() {
        assert_eq!(reencode_segments("user%40x:p%40ss@host"), "user@x:p%40ss@host");
        assert_eq!(reencode_segments("example.com%2Fa/b%2Fc"), "example.com/a/b%2Fc");
        assert_eq!(
            reencode_segments("http://h%C3%A9st/x?u=http://a%20b"),
            "http://hést/x?u=http://a%20b"
        );
    }

    #[test]
    fn test_prefix_detection() {
        assert_eq!(delimiter_prefix_len("//host"), 2);
        assert_eq!(delimiter_prefix_len("svn+ssh://host"), 10);
        assert_eq!(delimiter_prefix_len("mailto:x"), 0);
        assert_eq!(delimiter_prefix_len("9p://host"), 0);
        assert_eq!(reencode_segments("mailto:a%40b"), "mailto:a%40b");
    }

    #[test]
    fn test_separator_first_input() {
        assert_eq!(reencode_segments("[::1]:80"), "[::1]:80");
        assert_eq!(reencode_segments(""), "");
    }

    #[test]
    fn test_undecodable_run_is_kept() {
        assert_eq!(reencode_segments("bad%FFhost/x"), "bad%FFhost/x");
        assert_eq!(percent_decode("%zz%4"), "%zz%4");
    }

    #[test]
    fn test_decode_component_space_rule() {
        assert_eq!(decode_component("/a%20b c+d"), "/a+b+c+d");
        assert_eq!(decode_component("caf%C3%A9"), "café");
    }
}
