//! `\rule[shift]{width}{height}`.

use crate::build_common::make_span;
use crate::dom_tree::{CssStyle, HtmlNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, ParseNode, RuleNode};
use crate::types::ArgType;
use crate::unit::{calculate_size, make_em};

pub(crate) fn html_builder(group: &RuleNode, options: &Options) -> HtmlNode {
    let mut rule = make_span(
        vec!["mord".to_string(), "rule".to_string()],
        Vec::new(),
        Some(options),
        CssStyle::default(),
    );

    let width = calculate_size(&group.width, options);
    let height = calculate_size(&group.height, options);
    let shift = group
        .shift
        .as_ref()
        .map(|shift| calculate_size(shift, options))
        .unwrap_or(0.0);

    rule.node.style.border_right_width = Some(make_em(width));
    rule.node.style.border_top_width = Some(make_em(height));
    rule.node.style.bottom = Some(make_em(shift));

    rule.node.height = height + shift;
    rule.node.depth = -shift;
    // Rules are not fonts; keep vlists from inflating around them.
    rule.node.max_font_size = height * 1.125 * options.size_multiplier();

    HtmlNode::Span(rule)
}

pub(crate) fn mathml_builder(group: &RuleNode, options: &Options) -> MathmlNode {
    let width = calculate_size(&group.width, options);
    let height = calculate_size(&group.height, options);
    let shift = group
        .shift
        .as_ref()
        .map(|shift| calculate_size(shift, options))
        .unwrap_or(0.0);
    let color = options.color().unwrap_or("black").to_string();

    let mut rule = MathNode::empty(MathNodeType::Mspace);
    rule.set_attribute("mathbackground", color);
    rule.set_attribute("width", make_em(width));
    rule.set_attribute("height", make_em(height));

    let mut wrapper = MathNode::new(MathNodeType::Mpadded, vec![rule.into()]);
    if shift >= 0.0 {
        wrapper.set_attribute("height", format!("+{}", make_em(shift)));
    } else {
        wrapper.set_attribute("height", make_em(shift));
        wrapper.set_attribute("depth", format!("+{}", make_em(-shift)));
    }
    wrapper.set_attribute("voffset", make_em(shift));
    wrapper.into()
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let shift = match opt_args.into_iter().next().flatten() {
        Some(ParseNode::Size(size)) => Some(size.value),
        _ => None,
    };
    let mut args = args.into_iter();
    let width = match args.next() {
        Some(ParseNode::Size(size)) => size.value,
        _ => unreachable!("size argument enforced by the registry"),
    };
    let height = match args.next() {
        Some(ParseNode::Size(size)) => size.value,
        _ => unreachable!("size argument enforced by the registry"),
    };
    Ok(ParseNode::Rule(RuleNode {
        info: NodeInfo::new(mode, context.loc),
        shift,
        width,
        height,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\rule"],
        FunctionPropSpec::with_args(2)
            .in_text()
            .with_optional(1)
            .with_arg_types(&[ArgType::Size, ArgType::Size, ArgType::Size]),
        handler,
    );
}
