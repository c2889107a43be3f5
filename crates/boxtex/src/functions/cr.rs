//! Row breaks: `\\` outside of arrays.

use crate::build_common::make_span;
use crate::dom_tree::{CssStyle, HtmlNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{CrNode, NodeInfo, ParseNode};
use crate::types::ArgType;
use crate::unit::{calculate_size, make_em};

pub(crate) fn html_builder(group: &CrNode, options: &Options) -> HtmlNode {
    let mut span = make_span(
        vec!["mspace".to_string()],
        Vec::new(),
        Some(options),
        CssStyle::default(),
    );
    if group.new_line {
        span.node.classes.push("newline".to_string());
        if let Some(size) = &group.size {
            span.node.style.margin_top = Some(make_em(calculate_size(size, options)));
        }
    }
    HtmlNode::Span(span)
}

pub(crate) fn mathml_builder(group: &CrNode, options: &Options) -> MathmlNode {
    let mut node = MathNode::empty(MathNodeType::Mspace);
    if group.new_line {
        node.set_attribute("linebreak", "newline");
        if let Some(size) = &group.size {
            node.set_attribute("height", make_em(calculate_size(size, options)));
        }
    }
    node.into()
}

fn handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let size = match opt_args.into_iter().next().flatten() {
        Some(ParseNode::Size(size)) => Some(size.value),
        _ => None,
    };
    // Outside display math a line break is LaTeX-incompatible.
    let new_line = !context.parser.settings.display_mode
        || !context.parser.settings.use_strict_behavior(
            "newLineInDisplayMode",
            "In LaTeX, \\\\ or \\newline does nothing in display mode",
        );
    Ok(ParseNode::Cr(CrNode {
        info: NodeInfo::new(mode, context.loc),
        new_line,
        size,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\\\", "\\newline"],
        FunctionPropSpec::with_args(0)
            .in_text()
            .with_optional(1)
            .with_arg_types(&[ArgType::Size])
            .as_primitive(),
        handler,
    );
}
