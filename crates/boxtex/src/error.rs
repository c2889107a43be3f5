//! The single error type surfaced by the crate.

use std::fmt;

use strum_macros::IntoStaticStr;

use crate::token::SourceRange;
use crate::types::Mode;

/// An error produced while lexing, expanding, parsing, or building.
///
/// The range, when present, points into the original input string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(pub Option<SourceRange>, pub ParseErrorKind);

impl ParseError {
    pub fn new(kind: ParseErrorKind, range: Option<SourceRange>) -> Self {
        ParseError(range, kind)
    }

    pub fn without_range(kind: ParseErrorKind) -> Self {
        ParseError(None, kind)
    }

    pub fn range(&self) -> Option<SourceRange> {
        self.0
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A character the lexer refuses outright (C0 controls, lone `\` at
    /// end of input).
    UnexpectedCharacter(char),
    /// `\verb` ran into end of line or input before its closing delimiter.
    UnterminatedVerb,
    UndefinedControlSequence(String),
    TooManyExpansions,
    UnexpectedToken {
        expected: &'static str,
        got: String,
    },
    UnexpectedEndOfInput,
    /// `^`, `_`, `\hat`, ... without a following group.
    ExpectedGroup {
        after: String,
    },
    DoubleSuperscript,
    DoubleSubscript,
    LimitControlsWithoutOperator,
    MiddleWithoutLeft,
    InvalidDelimiter {
        got: String,
        context: &'static str,
    },
    InvalidDelimiterType {
        context: &'static str,
    },
    UnknownEnvironment(String),
    MismatchedEnvironment {
        expected: String,
        got: String,
    },
    NotAllowedInMode {
        name: String,
        mode: Mode,
    },
    FunctionAsArgument {
        name: String,
    },
    ExpectedColor(String),
    ExpectedSize(String),
    InvalidSize(String),
    InvalidUnit(String),
    InvalidColumnSpec(char),
    MultipleInfix,
    TagOnlyInDisplayMode,
    InvalidMacroName(String),
    ExpectedControlSequence(String),
    InvalidParameterNumber,
    /// A fatal violation reported under `strict = "error"`.
    Strict {
        code: &'static str,
        message: String,
    },
    /// Generic message escape hatch for one-off conditions.
    Message(String),
}

/// Where a construct would have been legal; used by error messages only.
#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum Place {
    #[strum(serialize = r"inside \left ... \right")]
    InsideLeftRight,
}

impl ParseErrorKind {
    /// Returns the error message as a string.
    ///
    /// This serves the same purpose as a `Display` implementation but
    /// keeps the formatting logic in one place.
    pub fn string(&self) -> String {
        match self {
            ParseErrorKind::UnexpectedCharacter(c) => {
                let mut s = "Unexpected character: '".to_string();
                s.push(*c);
                s += "'.";
                s
            }
            ParseErrorKind::UnterminatedVerb => {
                r"\verb ended by end of line instead of matching delimiter.".to_string()
            }
            ParseErrorKind::UndefinedControlSequence(name) => {
                "Undefined control sequence: ".to_string() + name + "."
            }
            ParseErrorKind::TooManyExpansions => {
                "Too many expansions: infinite loop or need to increase maxExpand setting."
                    .to_string()
            }
            ParseErrorKind::UnexpectedToken { expected, got } => {
                "Expected '".to_string() + expected + "', got '" + got + "'."
            }
            ParseErrorKind::UnexpectedEndOfInput => "Unexpected end of input.".to_string(),
            ParseErrorKind::ExpectedGroup { after } => {
                "Expected group after '".to_string() + after + "'."
            }
            ParseErrorKind::DoubleSuperscript => "Double superscript.".to_string(),
            ParseErrorKind::DoubleSubscript => "Double subscript.".to_string(),
            ParseErrorKind::LimitControlsWithoutOperator => {
                "Limit controls must follow a math operator.".to_string()
            }
            ParseErrorKind::MiddleWithoutLeft => {
                let mut s = r"\middle without preceding \left".to_string();
                s += " ";
                s += <&str>::from(Place::InsideLeftRight);
                s += ".";
                s
            }
            ParseErrorKind::InvalidDelimiter { got, context } => {
                "Invalid delimiter: '".to_string() + got + "' after '" + context + "'."
            }
            ParseErrorKind::InvalidDelimiterType { context } => {
                "Invalid delimiter type after '".to_string() + context + "'."
            }
            ParseErrorKind::UnknownEnvironment(env) => {
                "No such environment: ".to_string() + env + "."
            }
            ParseErrorKind::MismatchedEnvironment { expected, got } => {
                "Mismatched environments: \\begin{".to_string()
                    + expected
                    + "} ended by \\end{"
                    + got
                    + "}."
            }
            ParseErrorKind::NotAllowedInMode { name, mode } => {
                "Can't use function '".to_string()
                    + name
                    + "' in "
                    + <&str>::from(mode)
                    + " mode."
            }
            ParseErrorKind::FunctionAsArgument { name } => {
                "Got function '".to_string() + name + "' with no arguments as argument."
            }
            ParseErrorKind::ExpectedColor(got) => {
                "Invalid color: '".to_string() + got + "'."
            }
            ParseErrorKind::ExpectedSize(got) => {
                "Invalid size: '".to_string() + got + "'."
            }
            ParseErrorKind::InvalidSize(got) => {
                "Invalid size specification: '".to_string() + got + "'."
            }
            ParseErrorKind::InvalidUnit(unit) => {
                "Invalid unit: '".to_string() + unit + "'."
            }
            ParseErrorKind::InvalidColumnSpec(c) => {
                let mut s = "Unknown column alignment: '".to_string();
                s.push(*c);
                s += "'.";
                s
            }
            ParseErrorKind::MultipleInfix => {
                "Only one infix operator per group is allowed.".to_string()
            }
            ParseErrorKind::TagOnlyInDisplayMode => {
                r"\tag works only in display equations.".to_string()
            }
            ParseErrorKind::InvalidMacroName(name) => {
                "Invalid macro name: '".to_string() + name + "'."
            }
            ParseErrorKind::ExpectedControlSequence(got) => {
                "Expected a control sequence, got '".to_string() + got + "'."
            }
            ParseErrorKind::InvalidParameterNumber => {
                "Invalid parameter number; must be 1-9.".to_string()
            }
            ParseErrorKind::Strict { code, message } => {
                "LaTeX-incompatible input and strict mode is set to 'error' (".to_string()
                    + code
                    + "): "
                    + message
            }
            ParseErrorKind::Message(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(range) => write!(f, "{} (at {}..{})", self.1.string(), range.start, range.end),
            None => write!(f, "{}", self.1.string()),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wording() {
        let problems = [
            (
                ParseErrorKind::UndefinedControlSequence(r"\foo".to_string()),
                r"Undefined control sequence: \foo.",
            ),
            (
                ParseErrorKind::ExpectedGroup {
                    after: "^".to_string(),
                },
                "Expected group after '^'.",
            ),
            (
                ParseErrorKind::TagOnlyInDisplayMode,
                r"\tag works only in display equations.",
            ),
        ];
        for (kind, expected) in problems {
            assert_eq!(kind.string(), expected);
        }
    }

    #[test]
    fn display_includes_range() {
        let err = ParseError(
            Some(SourceRange::new(3, 7)),
            ParseErrorKind::DoubleSuperscript,
        );
        assert_eq!(err.to_string(), "Double superscript. (at 3..7)");
    }
}
