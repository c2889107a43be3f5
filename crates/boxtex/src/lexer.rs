//! The lexer: turns the input string into a lazy stream of [`Token`]s.
//!
//! Recognized forms: control words (`\letters`), control symbols
//! (`\<non-letter>`), single characters, collapsed whitespace runs,
//! `%`-comments to end of line, and whole `\verb` captures (the closing
//! delimiter must appear before the end of the line).

use memchr::memchr;

use crate::error::{ParseError, ParseErrorKind};
use crate::token::{EOF, SourceRange, Token};

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace_run(&mut self) {
        while let Some(c) = self.peek_char() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Produces the next token. At end of input an `EOF` token is
    /// returned indefinitely.
    pub fn lex(&mut self) -> Result<Token<'a>, ParseError> {
        loop {
            let start = self.pos;
            let Some(c) = self.peek_char() else {
                return Ok(Token::new(EOF, Some(SourceRange::new(start, start))));
            };
            match c {
                '%' => {
                    // Comment to end of line; the newline itself is eaten
                    // so a trailing `%` acts as a line continuation.
                    match memchr(b'\n', self.input[self.pos..].as_bytes()) {
                        Some(off) => self.pos += off + 1,
                        None => self.pos = self.input.len(),
                    }
                }
                ' ' | '\t' | '\r' | '\n' => {
                    self.skip_whitespace_run();
                    return Ok(Token::new(" ", Some(SourceRange::new(start, self.pos))));
                }
                '\\' => return self.lex_control_sequence(start),
                c if (c as u32) < 0x20 => {
                    return Err(ParseError(
                        Some(SourceRange::new(start, self.pos + c.len_utf8())),
                        ParseErrorKind::UnexpectedCharacter(c),
                    ));
                }
                c => {
                    self.pos += c.len_utf8();
                    return Ok(Token::new(
                        &self.input[start..self.pos],
                        Some(SourceRange::new(start, self.pos)),
                    ));
                }
            }
        }
    }

    fn lex_control_sequence(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        self.pos += 1; // the backslash
        let Some(c) = self.peek_char() else {
            return Err(ParseError(
                Some(SourceRange::new(start, self.pos)),
                ParseErrorKind::UnexpectedCharacter('\\'),
            ));
        };
        if c.is_ascii_alphabetic() || c == '@' {
            while let Some(c) = self.peek_char() {
                if c.is_ascii_alphabetic() || c == '@' {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            let word_end = self.pos;
            if &self.input[start..word_end] == "\\verb" {
                return self.lex_verb(start);
            }
            // TeX eats whitespace after a control word.
            self.skip_whitespace_run();
            Ok(Token::new(
                &self.input[start..word_end],
                Some(SourceRange::new(start, word_end)),
            ))
        } else {
            self.pos += c.len_utf8();
            Ok(Token::new(
                &self.input[start..self.pos],
                Some(SourceRange::new(start, self.pos)),
            ))
        }
    }

    /// Captures a whole `\verb⟨delim⟩...⟨delim⟩` (or `\verb*`) run as a
    /// single token; the parser peels it apart.
    fn lex_verb(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        if self.peek_char() == Some('*') {
            self.pos += 1;
        }
        let Some(delim) = self.bump() else {
            return Err(ParseError(
                Some(SourceRange::new(start, self.pos)),
                ParseErrorKind::UnterminatedVerb,
            ));
        };
        if delim == ' ' || delim == '\n' || delim.is_ascii_alphabetic() {
            return Err(ParseError(
                Some(SourceRange::new(start, self.pos)),
                ParseErrorKind::UnterminatedVerb,
            ));
        }
        loop {
            match self.bump() {
                Some(c) if c == delim => break,
                Some('\n') | None => {
                    return Err(ParseError(
                        Some(SourceRange::new(start, self.pos)),
                        ParseErrorKind::UnterminatedVerb,
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(Token::new(
            &self.input[start..self.pos],
            Some(SourceRange::new(start, self.pos)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(input: &str) -> Vec<String> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.lex().unwrap();
            if tok.is(EOF) {
                break;
            }
            out.push(tok.text.into_owned());
        }
        out
    }

    #[test]
    fn basic_tokens() {
        assert_eq!(lex_all("a+b"), ["a", "+", "b"]);
        assert_eq!(lex_all(r"\frac{1}{2}"), [r"\frac", "{", "1", "}", "{", "2", "}"]);
        assert_eq!(lex_all(r"\%"), [r"\%"]);
        assert_eq!(lex_all(r"\pi\alpha"), [r"\pi", r"\alpha"]);
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(lex_all("a  \t\n b"), ["a", " ", "b"]);
    }

    #[test]
    fn control_word_eats_trailing_whitespace() {
        assert_eq!(lex_all("\\alpha  x"), [r"\alpha", "x"]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(lex_all("a%comment\nb"), ["a", "b"]);
        assert_eq!(lex_all("a%comment"), ["a"]);
    }

    #[test]
    fn verb_is_one_token() {
        assert_eq!(lex_all(r"\verb|x+y| z"), [r"\verb|x+y|", " ", "z"]);
        assert_eq!(lex_all(r"\verb*!a b!"), [r"\verb*!a b!"]);
    }

    #[test]
    fn verb_must_close_on_same_line() {
        let mut lexer = Lexer::new("\\verb|x\ny|");
        let err = lexer.lex().unwrap_err();
        assert_eq!(err.1, ParseErrorKind::UnterminatedVerb);
    }

    #[test]
    fn control_chars_rejected() {
        let mut lexer = Lexer::new("a\u{0007}");
        assert!(lexer.lex().is_ok());
        let err = lexer.lex().unwrap_err();
        assert_eq!(err.1, ParseErrorKind::UnexpectedCharacter('\u{0007}'));
    }

    #[test]
    fn ranges_point_into_source() {
        let mut lexer = Lexer::new(r"ab\sqrt c");
        assert_eq!(lexer.lex().unwrap().range, Some(SourceRange::new(0, 1)));
        assert_eq!(lexer.lex().unwrap().range, Some(SourceRange::new(1, 2)));
        assert_eq!(lexer.lex().unwrap().range, Some(SourceRange::new(2, 7)));
        assert_eq!(lexer.lex().unwrap().range, Some(SourceRange::new(8, 9)));
    }
}
