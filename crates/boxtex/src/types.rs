//! Small shared enums used by the lexer, parser, and builders.

use strum_macros::IntoStaticStr;

/// The two input modes. The mode of a node is fixed at creation time and
/// decides which symbol table and which function subset apply beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Math,
    Text,
}

/// How a single function argument is to be parsed.
///
/// `Original` parses a regular group in the current mode; the others each
/// have their own parsing procedure in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Color,
    Size,
    Url,
    Raw,
    Original,
    HBox,
    Primitive,
}

/// The four math styles plus their cramped variants are handled in
/// [`crate::style`]; this is the coarse display switch selected by the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OutputFormat {
    Html,
    Mathml,
    #[default]
    HtmlAndMathml,
}
