//! Tokens and source ranges.

use std::borrow::Cow;

use bitflags::bitflags;

/// A byte range into the original input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub const fn new(start: usize, end: usize) -> Self {
        SourceRange { start, end }
    }

    /// The smallest range covering both `self` and `other`.
    pub fn join(self, other: SourceRange) -> SourceRange {
        SourceRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Joins two optional ranges; `None` means "not from the source".
    pub fn join_opt(a: Option<SourceRange>, b: Option<SourceRange>) -> Option<SourceRange> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.join(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}

bitflags! {
    /// Expansion-control flags attached to individual tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TokenFlags: u8 {
        /// The token must not be expanded even if it names a macro.
        const NOEXPAND = 1 << 0;
        /// When the token finally reaches the parser unexpanded, it is
        /// handled as if it were `\relax`.
        const TREAT_AS_RELAX = 1 << 1;
    }
}

/// The text of the token that terminates the input stream.
pub const EOF: &str = "EOF";

/// One lexed token. `text` is either a single character, a control
/// sequence including its backslash, a collapsed whitespace run (`" "`),
/// or a whole `\verb` capture.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub text: Cow<'a, str>,
    pub range: Option<SourceRange>,
    pub flags: TokenFlags,
}

impl<'a> Token<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, range: Option<SourceRange>) -> Self {
        Token {
            text: text.into(),
            range,
            flags: TokenFlags::empty(),
        }
    }

    /// A token that did not come from the source (macro-generated).
    pub fn synthetic(text: impl Into<Cow<'a, str>>) -> Self {
        Token::new(text, None)
    }

    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }

    /// Whether this names a control sequence (starts with a backslash).
    pub fn is_control_sequence(&self) -> bool {
        self.text.starts_with('\\')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_join() {
        let a = SourceRange::new(2, 5);
        let b = SourceRange::new(4, 9);
        assert_eq!(a.join(b), SourceRange::new(2, 9));
        assert_eq!(b.join(a), SourceRange::new(2, 9));
        assert_eq!(SourceRange::join_opt(Some(a), None), Some(a));
        assert_eq!(SourceRange::join_opt(None, None), None);
    }
}
