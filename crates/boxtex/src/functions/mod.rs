//! The function registry.
//!
//! Each submodule owns one family of control sequences: its parse-time
//! handler plus its html and mathml builders. The registry maps
//! control-sequence spellings to parse specs; the builder dispatch
//! lives in [`crate::html`] and [`crate::mathml`] as total matches
//! over the parse-node tags.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::error::ParseError;
use crate::parse_node::ParseNode;
use crate::parser::Parser;
use crate::token::SourceRange;
use crate::types::{ArgType, Mode};

pub(crate) mod accent;
pub(crate) mod accentunder;
pub(crate) mod arrow;
pub(crate) mod color;
pub(crate) mod cr;
pub(crate) mod delimsizing;
pub(crate) mod enclose;
pub(crate) mod font;
pub(crate) mod genfrac;
pub(crate) mod hbox;
pub(crate) mod horiz_brace;
pub(crate) mod href;
pub(crate) mod html_mathml;
pub(crate) mod includegraphics;
pub(crate) mod kern;
pub(crate) mod lap;
pub(crate) mod mathchoice;
pub(crate) mod mclass;
pub(crate) mod op;
pub(crate) mod operatorname;
pub(crate) mod ordgroup;
pub(crate) mod overline;
pub(crate) mod phantom;
pub(crate) mod raisebox;
pub(crate) mod rule;
pub(crate) mod sizing;
pub(crate) mod smash;
pub(crate) mod sqrt;
pub(crate) mod styling;
pub(crate) mod supsub;
pub(crate) mod symbols;
pub(crate) mod text;
pub(crate) mod underline;
pub(crate) mod verb;

/// What a handler gets to see of the parser.
pub(crate) struct FunctionContext<'ctx, 'a> {
    pub parser: &'ctx mut Parser<'a>,
    pub func_name: String,
    pub loc: Option<SourceRange>,
    /// The token the enclosing expression stops at, handed through to
    /// handlers that swallow the rest of the group.
    pub break_on_token: Option<&'static str>,
}

pub(crate) type FunctionHandler = for<'ctx, 'a> fn(
    FunctionContext<'ctx, 'a>,
    Vec<ParseNode>,
    Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError>;

#[derive(Clone, Copy)]
pub(crate) struct FunctionPropSpec {
    pub num_args: usize,
    pub num_optional_args: usize,
    pub arg_types: &'static [ArgType],
    pub allowed_in_text: bool,
    pub allowed_in_math: bool,
    /// Whether the bare function may itself be an argument, as in
    /// `\sqrt\frac12`.
    pub allowed_in_argument: bool,
    pub greediness: u8,
    pub infix: bool,
    pub primitive: bool,
    /// Parse the `original` arguments in this mode instead of the
    /// current one.
    pub consume_mode: Option<Mode>,
}

impl FunctionPropSpec {
    pub const fn with_args(num_args: usize) -> Self {
        FunctionPropSpec {
            num_args,
            num_optional_args: 0,
            arg_types: &[],
            allowed_in_text: false,
            allowed_in_math: true,
            allowed_in_argument: false,
            greediness: 1,
            infix: false,
            primitive: false,
            consume_mode: None,
        }
    }

    pub const fn in_text(mut self) -> Self {
        self.allowed_in_text = true;
        self
    }

    pub const fn with_arg_types(mut self, arg_types: &'static [ArgType]) -> Self {
        self.arg_types = arg_types;
        self
    }

    pub const fn with_optional(mut self, num_optional_args: usize) -> Self {
        self.num_optional_args = num_optional_args;
        self
    }

    pub const fn as_argument(mut self) -> Self {
        self.allowed_in_argument = true;
        self
    }

    pub const fn with_greediness(mut self, greediness: u8) -> Self {
        self.greediness = greediness;
        self
    }

    pub const fn as_primitive(mut self) -> Self {
        self.primitive = true;
        self
    }
}

#[derive(Clone, Copy)]
pub(crate) struct FunctionSpec {
    pub props: FunctionPropSpec,
    pub handler: FunctionHandler,
}

pub(crate) type FnMap = FxHashMap<&'static str, FunctionSpec>;

pub(crate) fn add_functions(
    fns: &mut FnMap,
    names: &[&'static str],
    props: FunctionPropSpec,
    handler: FunctionHandler,
) {
    for name in names {
        fns.insert(name, FunctionSpec { props, handler });
    }
}

/// Built once, read-only afterwards.
pub(crate) static FUNCTIONS: Lazy<FnMap> = Lazy::new(|| {
    let mut fns = FnMap::default();
    accent::define(&mut fns);
    accentunder::define(&mut fns);
    arrow::define(&mut fns);
    color::define(&mut fns);
    cr::define(&mut fns);
    delimsizing::define(&mut fns);
    enclose::define(&mut fns);
    font::define(&mut fns);
    genfrac::define(&mut fns);
    hbox::define(&mut fns);
    horiz_brace::define(&mut fns);
    href::define(&mut fns);
    html_mathml::define(&mut fns);
    includegraphics::define(&mut fns);
    kern::define(&mut fns);
    lap::define(&mut fns);
    mathchoice::define(&mut fns);
    mclass::define(&mut fns);
    op::define(&mut fns);
    operatorname::define(&mut fns);
    overline::define(&mut fns);
    phantom::define(&mut fns);
    raisebox::define(&mut fns);
    rule::define(&mut fns);
    sizing::define(&mut fns);
    smash::define(&mut fns);
    sqrt::define(&mut fns);
    styling::define(&mut fns);
    text::define(&mut fns);
    underline::define(&mut fns);
    crate::environments::define(&mut fns);
    fns
});

/// Unwraps an ordgroup argument into its body.
pub(crate) fn ord_argument(arg: ParseNode) -> Vec<ParseNode> {
    match arg {
        ParseNode::OrdGroup(group) => group.body,
        other => vec![other],
    }
}

/// Renders an unsupported command as error-colored text instead of
/// failing, for the non-strict paths.
pub(crate) fn format_unsupported_cmd(
    settings: &crate::settings::Settings,
    name: &str,
    mode: Mode,
    loc: Option<SourceRange>,
) -> ParseNode {
    use crate::parse_node::{ColorNode, NodeInfo, SymNode, TextParseNode};
    let info = NodeInfo::new(mode, loc);
    let chars: Vec<ParseNode> = name
        .chars()
        .map(|c| {
            ParseNode::TextOrd(SymNode {
                info: info.clone(),
                text: c.to_string(),
            })
        })
        .collect();
    let body = ParseNode::Text(TextParseNode {
        info: info.clone(),
        body: chars,
        font: None,
    });
    ParseNode::Color(ColorNode {
        info,
        color: settings.error_color.clone(),
        body: vec![body],
    })
}
