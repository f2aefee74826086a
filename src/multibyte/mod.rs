//! Multibyte-safe string helpers.
//!
//! Every offset and length in this module counts Unicode scalar values, never
//! bytes, so no operation can split a code point. Two backends provide the
//! primitive operations:
//!
//! * [`NativeText`] walks `str`/`char` iterators directly.
//! * [`ByteSafeText`] decodes the UTF-8 byte stream itself, one lead byte at a
//!   time, for builds without the `unicode` feature.
//!
//! The higher level operations on [`Multibyte`] are written once on top of
//! those primitives, so the results are the same whichever backend is active.
//!
//! # Example
//!
//! ```
//! use urlcanon::multibyte::{self, Multibyte, PadType};
//!
//! assert_eq!(multibyte::strlen("Ünïcödé"), 7);
//! assert_eq!(multibyte::strtolower("ÉCOLE"), "école");
//!
//! let mb = Multibyte::byte_safe();
//! assert_eq!(mb.str_pad("ñ", 3, "*", PadType::Both), "*ñ*");
//! ```

mod byte_safe;
mod native;

pub use byte_safe::ByteSafeText;
pub use native::NativeText;

use std::fmt;

/// Primitive operations a text backend must provide.
pub trait TextBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// The scalar values of `s`, in order.
    fn code_points(&self, s: &str) -> Vec<char>;

    /// Number of scalar values in `s`.
    fn char_len(&self, s: &str) -> usize;

    /// Full lowercase mapping of a single scalar value.
    fn lower(&self, c: char, out: &mut String);

    /// Full uppercase mapping of a single scalar value.
    fn upper(&self, c: char, out: &mut String);
}

/// Padding side for [`Multibyte::str_pad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadType {
    Left,
    Right,
    Both,
}

/// Which backend a [`Multibyte`] runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Native,
    ByteSafe,
}

impl BackendKind {
    /// Native when the build carries the `unicode` capability, byte-safe otherwise.
    pub fn detect() -> Self {
        if cfg!(feature = "unicode") {
            BackendKind::Native
        } else {
            BackendKind::ByteSafe
        }
    }
}

static NATIVE: NativeText = NativeText;
static BYTE_SAFE: ByteSafeText = ByteSafeText;

/// Multibyte string operations bound to one backend.
#[derive(Clone, Copy)]
pub struct Multibyte {
    backend: &'static dyn TextBackend,
}

impl fmt::Debug for Multibyte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multibyte")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Default for Multibyte {
    fn default() -> Self {
        Self::detect()
    }
}

impl Multibyte {
    pub fn native() -> Self {
        Self { backend: &NATIVE }
    }

    pub fn byte_safe() -> Self {
        Self { backend: &BYTE_SAFE }
    }

    pub fn with_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Native => Self::native(),
            BackendKind::ByteSafe => Self::byte_safe(),
        }
    }

    /// Picks the backend from the build's capabilities.
    pub fn detect() -> Self {
        Self::with_kind(BackendKind::detect())
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn strlen(&self, s: &str) -> usize {
        self.backend.char_len(s)
    }

    /// Substring by scalar offsets.
    ///
    /// A negative `start` counts from the end. `length` of `None` runs to the
    /// end, a negative `length` stops that many characters before the end.
    pub fn substr(&self, s: &str, start: isize, length: Option<isize>) -> String {
        let chars = self.backend.code_points(s);
        let len = chars.len() as isize;

        let from = if start < 0 { (len + start).max(0) } else { start.min(len) };
        let to = match length {
            None => len,
            Some(l) if l < 0 => (len + l).max(0),
            Some(l) => from.saturating_add(l).min(len),
        };

        if to <= from {
            return String::new();
        }
        chars[from as usize..to as usize].iter().collect()
    }

    /// Scalar index of the first `needle` at or after `offset`.
    pub fn strpos(&self, haystack: &str, needle: &str, offset: isize) -> Option<usize> {
        let hay = self.backend.code_points(haystack);
        let pin = self.backend.code_points(needle);
        let from = resolve_offset(hay.len(), offset)?;

        if pin.is_empty() {
            return Some(from);
        }
        if pin.len() > hay.len() {
            return None;
        }
        (from..=hay.len() - pin.len()).find(|&i| hay[i..i + pin.len()] == pin[..])
    }

    /// Scalar index of the last `needle`.
    ///
    /// A non-negative `offset` only considers matches starting at or after
    /// it. A negative `offset` searches backwards from that many characters
    /// before the end, so only matches starting at or before `len + offset`
    /// count.
    pub fn strrpos(&self, haystack: &str, needle: &str, offset: isize) -> Option<usize> {
        let hay = self.backend.code_points(haystack);
        let pin = self.backend.code_points(needle);
        let bound = resolve_offset(hay.len(), offset)?;

        if pin.len() > hay.len() {
            return None;
        }
        let last_fit = hay.len() - pin.len();
        let (from, to) = if offset < 0 {
            (0, bound.min(last_fit))
        } else {
            (bound, last_fit)
        };

        if pin.is_empty() {
            return Some(to);
        }
        if from > to {
            return None;
        }
        (from..=to).rev().find(|&i| hay[i..i + pin.len()] == pin[..])
    }

    /// Non-overlapping occurrences of `needle`.
    pub fn substr_count(&self, haystack: &str, needle: &str) -> usize {
        let hay = self.backend.code_points(haystack);
        let pin = self.backend.code_points(needle);
        if pin.is_empty() || pin.len() > hay.len() {
            return 0;
        }

        let mut count = 0;
        let mut i = 0;
        while i + pin.len() <= hay.len() {
            if hay[i..i + pin.len()] == pin[..] {
                count += 1;
                i += pin.len();
            } else {
                i += 1;
            }
        }
        count
    }

    pub fn strtolower(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in self.backend.code_points(s) {
            self.backend.lower(c, &mut out);
        }
        out
    }

    pub fn strtoupper(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in self.backend.code_points(s) {
            self.backend.upper(c, &mut out);
        }
        out
    }

    /// Uppercases the first character.
    pub fn ucfirst(&self, s: &str) -> String {
        let chars = self.backend.code_points(s);
        let mut out = String::with_capacity(s.len());
        if let Some((first, rest)) = chars.split_first() {
            self.backend.upper(*first, &mut out);
            out.extend(rest.iter());
        }
        out
    }

    /// Uppercases the first character of every whitespace-separated word.
    pub fn ucwords(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut at_word_start = true;
        for c in self.backend.code_points(s) {
            if at_word_start && !c.is_whitespace() {
                self.backend.upper(c, &mut out);
            } else {
                out.push(c);
            }
            at_word_start = c.is_whitespace();
        }
        out
    }

    /// Strips leading and trailing Unicode whitespace.
    pub fn trim(&self, s: &str) -> String {
        let chars = self.backend.code_points(s);
        let start = chars.iter().position(|c| !c.is_whitespace());
        let end = chars.iter().rposition(|c| !c.is_whitespace());
        match (start, end) {
            (Some(start), Some(end)) => chars[start..=end].iter().collect(),
            _ => String::new(),
        }
    }

    /// Pads `s` to `pad_length` characters with repetitions of `pad`.
    pub fn str_pad(&self, s: &str, pad_length: usize, pad: &str, pad_type: PadType) -> String {
        let len = self.backend.char_len(s);
        let pad_chars = self.backend.code_points(pad);
        if pad_length <= len || pad_chars.is_empty() {
            return s.to_string();
        }

        let missing = pad_length - len;
        let (left, right) = match pad_type {
            PadType::Left => (missing, 0),
            PadType::Right => (0, missing),
            PadType::Both => (missing / 2, missing - missing / 2),
        };

        let filler = |n: usize| -> String { pad_chars.iter().cycle().take(n).collect() };
        format!("{}{}{}", filler(left), s, filler(right))
    }

    /// Chunks of `split_length` characters; the last chunk may be shorter.
    pub fn str_split(&self, s: &str, split_length: usize) -> Vec<String> {
        let size = split_length.max(1);
        self.backend
            .code_points(s)
            .chunks(size)
            .map(|chunk| chunk.iter().collect())
            .collect()
    }

    pub fn strrev(&self, s: &str) -> String {
        self.backend.code_points(s).into_iter().rev().collect()
    }

    /// Wraps `s` at `width` characters, breaking on spaces.
    ///
    /// Words longer than `width` stay whole unless `cut` is set, in which
    /// case they are split at exactly `width` characters. Existing `brk`
    /// sequences reset the line length.
    pub fn wordwrap(&self, s: &str, width: usize, brk: &str, cut: bool) -> String {
        if s.is_empty() || brk.is_empty() || (width == 0 && !cut) {
            return s.to_string();
        }
        let width = width.max(1);

        let mut out = String::with_capacity(s.len());
        for (n, paragraph) in s.split(brk).enumerate() {
            if n > 0 {
                out.push_str(brk);
            }
            self.wrap_line(paragraph, width, brk, cut, &mut out);
        }
        out
    }

    fn wrap_line(&self, line: &str, width: usize, brk: &str, cut: bool, out: &mut String) {
        let mut current = 0usize;
        for (n, word) in line.split(' ').enumerate() {
            let mut word = self.backend.code_points(word);

            if n > 0 {
                if current + 1 + word.len() <= width {
                    out.push(' ');
                    current += 1;
                } else {
                    out.push_str(brk);
                    current = 0;
                }
            }

            while cut && word.len() > width {
                if current > 0 {
                    out.push_str(brk);
                    current = 0;
                }
                out.extend(word[..width].iter());
                word.drain(..width);
                if !word.is_empty() {
                    out.push_str(brk);
                }
            }

            out.extend(word.iter());
            current += word.len();
        }
    }
}

fn resolve_offset(len: usize, offset: isize) -> Option<usize> {
    let resolved = if offset < 0 {
        len.checked_sub(offset.unsigned_abs())?
    } else {
        offset as usize
    };
    (resolved <= len).then_some(resolved)
}

/// Character count using the detected backend.
pub fn strlen(s: &str) -> usize {
    Multibyte::detect().strlen(s)
}

pub fn substr(s: &str, start: isize, length: Option<isize>) -> String {
    Multibyte::detect().substr(s, start, length)
}

pub fn strtolower(s: &str) -> String {
    Multibyte::detect().strtolower(s)
}

pub fn strtoupper(s: &str) -> String {
    Multibyte::detect().strtoupper(s)
}

pub fn trim(s: &str) -> String {
    Multibyte::detect().trim(s)
}

pub fn str_pad(s: &str, pad_length: usize, pad: &str, pad_type: PadType) -> String {
    Multibyte::detect().str_pad(s, pad_length, pad, pad_type)
}

pub fn str_split(s: &str, split_length: usize) -> Vec<String> {
    Multibyte::detect().str_split(s, split_length)
}

pub fn strrev(s: &str) -> String {
    Multibyte::detect().strrev(s)
}

pub fn strpos(haystack: &str, needle: &str, offset: isize) -> Option<usize> {
    Multibyte::detect().strpos(haystack, needle, offset)
}

pub fn strrpos(haystack: &str, needle: &str, offset: isize) -> Option<usize> {
    Multibyte::detect().strrpos(haystack, needle, offset)
}

pub fn substr_count(haystack: &str, needle: &str) -> usize {
    Multibyte::detect().substr_count(haystack, needle)
}

pub fn ucfirst(s: &str) -> String {
    Multibyte::detect().ucfirst(s)
}

pub fn ucwords(s: &str) -> String {
    Multibyte::detect().ucwords(s)
}

pub fn wordwrap(s: &str, width: usize, brk: &str, cut: bool) -> String {
    Multibyte::detect().wordwrap(s, width, brk, cut)
}
