//! The sizing ladder `\tiny` ... `\HUGE`.

use crate::dom_tree::{HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, ParseNode, SizingNode};

const SIZE_FUNCS: [&str; 11] = [
    "\\tiny",
    "\\sixptsize",
    "\\scriptsize",
    "\\footnotesize",
    "\\small",
    "\\normalsize",
    "\\large",
    "\\Large",
    "\\LARGE",
    "\\huge",
    "\\Huge",
];

/// Applies a size change to an already-built expression: rescales the
/// extents and attaches size-resetting classes.
pub(crate) fn sizing_group(
    body: &[ParseNode],
    options: &Options,
    base_options: &Options,
) -> Result<HtmlNode, ParseError> {
    let mut inner = build_expression(body, options, RealGroup::False, (None, None))?;
    let multiplier = options.size_multiplier() / base_options.size_multiplier();
    for node in &mut inner {
        let record = node.node_mut();
        let reset = format!("reset-size{}", options.size);
        match record.classes.iter().position(|c| c == "sizing") {
            None => record.classes.extend(options.sizing_classes(base_options)),
            Some(pos) => {
                if record.classes.get(pos + 1).map(String::as_str) == Some(reset.as_str()) {
                    // The inner size change starts from this one.
                    record.classes[pos + 1] = format!("reset-size{}", base_options.size);
                }
            }
        }
        record.height *= multiplier;
        record.depth *= multiplier;
    }
    Ok(crate::build_common::make_fragment(inner).into())
}

pub(crate) fn html_builder(
    group: &SizingNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let new_options = options.having_size(group.size);
    sizing_group(&group.body, &new_options, options)
}

pub(crate) fn mathml_builder(
    group: &SizingNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let new_options = options.having_size(group.size);
    let inner = mathml::build_expression(&group.body, &new_options)?;
    let mut node = MathNode::new(MathNodeType::Mstyle, inner);
    node.set_attribute(
        "mathsize",
        crate::unit::make_em(new_options.size_multiplier()),
    );
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let break_on_token = context.break_on_token;
    let size = SIZE_FUNCS
        .iter()
        .position(|name| *name == context.func_name)
        .expect("registered name")
        + 1;
    let mode = context.parser.mode;
    let body = context.parser.parse_expression(false, break_on_token)?;
    Ok(ParseNode::Sizing(SizingNode {
        info: NodeInfo::new(mode, context.loc),
        size,
        body,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &SIZE_FUNCS,
        FunctionPropSpec::with_args(0).in_text(),
        handler,
    );
}
