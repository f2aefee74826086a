use super::TextBackend;

/// Backend built on the standard library's `char` iteration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeText;

impl TextBackend for NativeText {
    fn name(&self) -> &'static str {
        "native"
    }

    fn code_points(&self, s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn char_len(&self, s: &str) -> usize {
        s.chars().count()
    }

    fn lower(&self, c: char, out: &mut String) {
        out.extend(c.to_lowercase());
    }

    fn upper(&self, c: char, out: &mut String) {
        out.extend(c.to_uppercase());
    }
}
