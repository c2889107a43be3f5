//! The typed heterogeneous parse tree.
//!
//! Every node carries a [`NodeInfo`] with its creation mode and source
//! range. The variant payloads are plain structs so handlers and
//! builders can construct and destructure them without ceremony.

use crate::style::Style;
use crate::token::SourceRange;
use crate::types::Mode;
use crate::unit::Measurement;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    pub mode: Mode,
    pub loc: Option<SourceRange>,
}

impl NodeInfo {
    pub fn new(mode: Mode, loc: Option<SourceRange>) -> Self {
        NodeInfo { mode, loc }
    }

    pub fn new_mode(mode: Mode) -> Self {
        NodeInfo { mode, loc: None }
    }
}

/// The six spacing-relevant atom families besides ord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomFamily {
    Bin,
    Close,
    Inner,
    Open,
    Punct,
    Rel,
}

impl AtomFamily {
    /// The box class this family contributes, e.g. `mbin`.
    pub fn as_class(self) -> &'static str {
        match self {
            AtomFamily::Bin => "mbin",
            AtomFamily::Close => "mclose",
            AtomFamily::Inner => "minner",
            AtomFamily::Open => "mopen",
            AtomFamily::Punct => "mpunct",
            AtomFamily::Rel => "mrel",
        }
    }
}

/// A single named character (mathord, textord, spacing, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct SymNode {
    pub info: NodeInfo,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtomNode {
    pub info: NodeInfo,
    pub family: AtomFamily,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerbNode {
    pub info: NodeInfo,
    pub body: String,
    pub star: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrdGroupNode {
    pub info: NodeInfo,
    pub body: Vec<ParseNode>,
    /// A `\begingroup...\endgroup` group: transparent to spacing.
    pub semisimple: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StylingNode {
    pub info: NodeInfo,
    pub style: Style,
    pub body: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizingNode {
    pub info: NodeInfo,
    /// Size level 1..=11.
    pub size: usize,
    pub body: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorNode {
    pub info: NodeInfo,
    pub color: String,
    pub body: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontNode {
    pub info: NodeInfo,
    /// A key of the font map, e.g. `mathbf`.
    pub font: String,
    pub body: Box<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MClassNode {
    pub info: NodeInfo,
    /// `mord`, `mbin`, `mrel`, ...
    pub mclass: &'static str,
    pub body: Vec<ParseNode>,
    pub is_character_box: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlMathmlNode {
    pub info: NodeInfo,
    pub html: Vec<ParseNode>,
    pub mathml: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HBoxNode {
    pub info: NodeInfo,
    pub body: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupSubNode {
    pub info: NodeInfo,
    pub base: Option<Box<ParseNode>>,
    pub sup: Option<Box<ParseNode>>,
    pub sub: Option<Box<ParseNode>>,
}

/// Which style a generalized fraction forces, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FracStyle {
    Auto,
    Display,
    Text,
    Script,
    ScriptScript,
}

impl FracStyle {
    pub fn resolve(self, current: Style) -> Style {
        match self {
            FracStyle::Auto => current,
            FracStyle::Display => crate::style::DISPLAY,
            FracStyle::Text => crate::style::TEXT,
            FracStyle::Script => crate::style::SCRIPT,
            FracStyle::ScriptScript => crate::style::SCRIPTSCRIPT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenFracNode {
    pub info: NodeInfo,
    pub continued: bool,
    pub numer: Box<ParseNode>,
    pub denom: Box<ParseNode>,
    pub has_bar_line: bool,
    pub left_delim: Option<String>,
    pub right_delim: Option<String>,
    pub size: FracStyle,
    pub bar_size: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixNode {
    pub info: NodeInfo,
    /// The function the infix rewrites to, e.g. `\\frac`.
    pub replace_with: &'static str,
    pub size: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqrtNode {
    pub info: NodeInfo,
    pub body: Box<ParseNode>,
    pub index: Option<Box<ParseNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyNode {
    pub info: NodeInfo,
    pub body: Box<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccentNode {
    pub info: NodeInfo,
    pub label: String,
    pub is_stretchy: bool,
    pub is_shifty: bool,
    pub base: Box<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizBraceNode {
    pub info: NodeInfo,
    pub label: String,
    pub is_over: bool,
    pub base: Box<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XArrowNode {
    pub info: NodeInfo,
    pub label: &'static str,
    pub body: Box<ParseNode>,
    pub below: Option<Box<ParseNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncloseNode {
    pub info: NodeInfo,
    pub label: &'static str,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub body: Box<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpNode {
    pub info: NodeInfo,
    pub limits: bool,
    pub always_handle_sup_sub: bool,
    pub suppress_base_shift: bool,
    /// True when the operator is a single large glyph like `∑`.
    pub symbol: bool,
    pub name: Option<String>,
    pub body: Option<Vec<ParseNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorNameNode {
    pub info: NodeInfo,
    pub body: Vec<ParseNode>,
    pub always_handle_sup_sub: bool,
    pub limits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterClass {
    Open,
    Close,
    Rel,
    Ord,
}

impl DelimiterClass {
    pub fn as_class(self) -> &'static str {
        match self {
            DelimiterClass::Open => "mopen",
            DelimiterClass::Close => "mclose",
            DelimiterClass::Rel => "mrel",
            DelimiterClass::Ord => "mord",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelimSizingNode {
    pub info: NodeInfo,
    /// 1..=4.
    pub size: usize,
    pub mclass: DelimiterClass,
    pub delim: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeftRightNode {
    pub info: NodeInfo,
    pub body: Vec<ParseNode>,
    pub left: String,
    pub right: String,
    pub right_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeftRightRightNode {
    pub info: NodeInfo,
    pub delim: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MiddleNode {
    pub info: NodeInfo,
    pub delim: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlignSpec {
    Separator(char),
    Align {
        align: char,
        pregap: Option<f64>,
        postgap: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColSeparationType {
    Align,
    AlignAt,
    Gather,
    Small,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    pub info: NodeInfo,
    pub cols: Vec<AlignSpec>,
    pub hskip_before_and_after: bool,
    pub add_jot: bool,
    pub arraystretch: f64,
    pub rows: Vec<Vec<ParseNode>>,
    pub row_gaps: Vec<Option<Measurement>>,
    pub h_lines_before_row: Vec<Vec<bool>>,
    pub col_separation_type: Option<ColSeparationType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KernNode {
    pub info: NodeInfo,
    pub dimension: Measurement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleNode {
    pub info: NodeInfo,
    pub shift: Option<Measurement>,
    pub width: Measurement,
    pub height: Measurement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaiseBoxNode {
    pub info: NodeInfo,
    pub dy: Measurement,
    pub body: Box<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LapNode {
    pub info: NodeInfo,
    /// `llap`, `rlap`, or `clap`.
    pub alignment: &'static str,
    pub body: Box<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmashNode {
    pub info: NodeInfo,
    pub body: Box<ParseNode>,
    pub smash_height: bool,
    pub smash_depth: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhantomNode {
    pub info: NodeInfo,
    pub body: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MathChoiceNode {
    pub info: NodeInfo,
    pub display: Vec<ParseNode>,
    pub text: Vec<ParseNode>,
    pub script: Vec<ParseNode>,
    pub scriptscript: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HrefNode {
    pub info: NodeInfo,
    pub href: String,
    pub body: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlNode {
    pub info: NodeInfo,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncludegraphicsNode {
    pub info: NodeInfo,
    pub alt: String,
    pub width: Measurement,
    pub height: Measurement,
    pub total_height: Measurement,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub info: NodeInfo,
    pub string: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeNode {
    pub info: NodeInfo,
    pub value: Measurement,
    pub is_blank: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorTokenNode {
    pub info: NodeInfo,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    pub info: NodeInfo,
    pub body: Vec<ParseNode>,
    pub tag: Vec<ParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextParseNode {
    pub info: NodeInfo,
    pub body: Vec<ParseNode>,
    pub font: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrNode {
    pub info: NodeInfo,
    pub new_line: bool,
    pub size: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode {
    pub info: NodeInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    Atom(AtomNode),
    MathOrd(SymNode),
    TextOrd(SymNode),
    Spacing(SymNode),
    AccentToken(SymNode),
    OpToken(SymNode),
    Verb(VerbNode),
    OrdGroup(OrdGroupNode),
    Styling(StylingNode),
    Sizing(SizingNode),
    Color(ColorNode),
    Font(FontNode),
    MClass(MClassNode),
    HtmlMathml(HtmlMathmlNode),
    HBox(HBoxNode),
    SupSub(SupSubNode),
    GenFrac(GenFracNode),
    Infix(InfixNode),
    Sqrt(SqrtNode),
    Overline(BodyNode),
    Underline(BodyNode),
    Accent(AccentNode),
    AccentUnder(AccentNode),
    HorizBrace(HorizBraceNode),
    XArrow(XArrowNode),
    Enclose(EncloseNode),
    Op(OpNode),
    OperatorName(OperatorNameNode),
    DelimSizing(DelimSizingNode),
    LeftRight(LeftRightNode),
    LeftRightRight(LeftRightRightNode),
    Middle(MiddleNode),
    Array(ArrayNode),
    Kern(KernNode),
    Rule(RuleNode),
    RaiseBox(RaiseBoxNode),
    Lap(LapNode),
    Smash(SmashNode),
    Phantom(PhantomNode),
    HPhantom(BodyNode),
    VPhantom(BodyNode),
    MathChoice(MathChoiceNode),
    Href(HrefNode),
    Url(UrlNode),
    Includegraphics(IncludegraphicsNode),
    Raw(RawNode),
    Size(SizeNode),
    ColorToken(ColorTokenNode),
    Tag(TagNode),
    Text(TextParseNode),
    Cr(CrNode),
    Internal(InternalNode),
}

macro_rules! with_every_variant {
    ($self:expr, $node:ident => $body:expr) => {
        match $self {
            ParseNode::Atom($node) => $body,
            ParseNode::MathOrd($node) => $body,
            ParseNode::TextOrd($node) => $body,
            ParseNode::Spacing($node) => $body,
            ParseNode::AccentToken($node) => $body,
            ParseNode::OpToken($node) => $body,
            ParseNode::Verb($node) => $body,
            ParseNode::OrdGroup($node) => $body,
            ParseNode::Styling($node) => $body,
            ParseNode::Sizing($node) => $body,
            ParseNode::Color($node) => $body,
            ParseNode::Font($node) => $body,
            ParseNode::MClass($node) => $body,
            ParseNode::HtmlMathml($node) => $body,
            ParseNode::HBox($node) => $body,
            ParseNode::SupSub($node) => $body,
            ParseNode::GenFrac($node) => $body,
            ParseNode::Infix($node) => $body,
            ParseNode::Sqrt($node) => $body,
            ParseNode::Overline($node) => $body,
            ParseNode::Underline($node) => $body,
            ParseNode::Accent($node) => $body,
            ParseNode::AccentUnder($node) => $body,
            ParseNode::HorizBrace($node) => $body,
            ParseNode::XArrow($node) => $body,
            ParseNode::Enclose($node) => $body,
            ParseNode::Op($node) => $body,
            ParseNode::OperatorName($node) => $body,
            ParseNode::DelimSizing($node) => $body,
            ParseNode::LeftRight($node) => $body,
            ParseNode::LeftRightRight($node) => $body,
            ParseNode::Middle($node) => $body,
            ParseNode::Array($node) => $body,
            ParseNode::Kern($node) => $body,
            ParseNode::Rule($node) => $body,
            ParseNode::RaiseBox($node) => $body,
            ParseNode::Lap($node) => $body,
            ParseNode::Smash($node) => $body,
            ParseNode::Phantom($node) => $body,
            ParseNode::HPhantom($node) => $body,
            ParseNode::VPhantom($node) => $body,
            ParseNode::MathChoice($node) => $body,
            ParseNode::Href($node) => $body,
            ParseNode::Url($node) => $body,
            ParseNode::Includegraphics($node) => $body,
            ParseNode::Raw($node) => $body,
            ParseNode::Size($node) => $body,
            ParseNode::ColorToken($node) => $body,
            ParseNode::Tag($node) => $body,
            ParseNode::Text($node) => $body,
            ParseNode::Cr($node) => $body,
            ParseNode::Internal($node) => $body,
        }
    };
}

impl ParseNode {
    pub fn info(&self) -> &NodeInfo {
        with_every_variant!(self, node => &node.info)
    }

    pub fn info_mut(&mut self) -> &mut NodeInfo {
        with_every_variant!(self, node => &mut node.info)
    }

    pub fn mode(&self) -> Mode {
        self.info().mode
    }

    pub fn loc(&self) -> Option<SourceRange> {
        self.info().loc
    }

    /// The character of a symbol-like node.
    pub fn text(&self) -> Option<&str> {
        match self {
            ParseNode::Atom(node) => Some(&node.text),
            ParseNode::MathOrd(node)
            | ParseNode::TextOrd(node)
            | ParseNode::Spacing(node)
            | ParseNode::AccentToken(node)
            | ParseNode::OpToken(node) => Some(&node.text),
            _ => None,
        }
    }

    /// Wraps a list in an ordgroup node.
    pub fn ord_group(body: Vec<ParseNode>, mode: Mode, loc: Option<SourceRange>) -> ParseNode {
        ParseNode::OrdGroup(OrdGroupNode {
            info: NodeInfo::new(mode, loc),
            body,
            semisimple: false,
        })
    }

    /// Strips grouping to find the innermost single node.
    pub fn base_elem(&self) -> &ParseNode {
        match self {
            ParseNode::OrdGroup(group) if group.body.len() == 1 => group.body[0].base_elem(),
            _ => self,
        }
    }

    /// Whether the node renders as a single character box, so that
    /// accents and smashes can take the character shortcut.
    pub fn is_character_box(&self) -> bool {
        matches!(
            self.base_elem(),
            ParseNode::Atom(_) | ParseNode::MathOrd(_) | ParseNode::TextOrd(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mathord(text: &str) -> ParseNode {
        ParseNode::MathOrd(SymNode {
            info: NodeInfo::new_mode(Mode::Math),
            text: text.to_string(),
        })
    }

    #[test]
    fn character_boxes() {
        let x = mathord("x");
        assert!(x.is_character_box());
        let grouped = ParseNode::ord_group(vec![mathord("x")], Mode::Math, None);
        assert!(grouped.is_character_box());
        let two = ParseNode::ord_group(vec![mathord("x"), mathord("y")], Mode::Math, None);
        assert!(!two.is_character_box());
    }

    #[test]
    fn atom_classes() {
        assert_eq!(AtomFamily::Bin.as_class(), "mbin");
        assert_eq!(AtomFamily::Inner.as_class(), "minner");
    }
}
