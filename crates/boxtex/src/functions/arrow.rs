//! Extensible arrows: `\xrightarrow[below]{above}` and family.

use crate::build_common::{VListChild, VListElem, VListParam, make_span, make_vlist};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, ParseNode, XArrowNode};
use crate::stretchy;

pub(crate) fn html_builder(
    group: &XArrowNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let style = options.style();

    // Build the label in superscript style, the lower one in subscript
    // style.
    let mut new_options = options.having_style(style.sup());
    let mut upper_group = build_group(Some(&group.body), &new_options, Some(options))?;
    upper_group
        .node_mut()
        .classes
        .push("x-arrow-pad".to_string());

    let lower_group = match &group.below {
        Some(below) => {
            new_options = options.having_style(style.sub());
            let mut built = build_group(Some(below), &new_options, Some(options))?;
            built.node_mut().classes.push("x-arrow-pad".to_string());
            Some(built)
        }
        None => None,
    };

    let arrow_body = stretchy::svg_span(&ParseNode::XArrow(group.clone()), options);

    // Vertical placement mirrors the over/under arrow constants.
    let arrow_shift = -options.font_metrics().axis_height + 0.5 * arrow_body.node.height;
    let mut upper_shift =
        -options.font_metrics().axis_height - 0.5 * arrow_body.node.height - 0.111;
    if upper_group.node().depth > 0.25 {
        upper_shift -= upper_group.node().depth;
    }

    let mut arrow_elem = VListElem::new(HtmlNode::Span(arrow_body));
    arrow_elem.wrapper_classes = vec!["svg-align".to_string()];

    let vlist = match lower_group {
        Some(lower_group) => {
            let lower_shift = -options.font_metrics().axis_height
                + lower_group.node().height
                + 0.5 * arrow_elem.elem.node().height
                + 0.111;
            make_vlist(
                VListParam::IndividualShift(vec![
                    (VListElem::new(upper_group), upper_shift),
                    (arrow_elem, arrow_shift),
                    (VListElem::new(lower_group), lower_shift),
                ]),
                options,
            )
        }
        None => make_vlist(
            VListParam::IndividualShift(vec![
                (VListElem::new(upper_group), upper_shift),
                (arrow_elem, arrow_shift),
            ]),
            options,
        ),
    };

    Ok(HtmlNode::Span(make_span(
        vec!["mrel".to_string(), "x-arrow".to_string()],
        vec![HtmlNode::Span(vlist)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &XArrowNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let arrow = stretchy::math_ml_node(group.label);
    let upper = mathml::build_group(Some(&group.body), options)?;

    let node = match &group.below {
        Some(below) => {
            let lower = mathml::build_group(Some(below), options)?;
            MathNode::new(MathNodeType::Munderover, vec![arrow.into(), lower, upper])
        }
        None => MathNode::new(MathNodeType::Mover, vec![arrow.into(), upper]),
    };
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let label: &'static str = match context.func_name.as_str() {
        "\\xleftarrow" => "\\xleftarrow",
        "\\xrightarrow" => "\\xrightarrow",
        "\\xLeftarrow" => "\\xLeftarrow",
        "\\xRightarrow" => "\\xRightarrow",
        "\\xleftrightarrow" => "\\xleftrightarrow",
        "\\xLeftrightarrow" => "\\xLeftrightarrow",
        "\\xhookleftarrow" => "\\xhookleftarrow",
        "\\xhookrightarrow" => "\\xhookrightarrow",
        "\\xmapsto" => "\\xmapsto",
        _ => "\\xrightarrow",
    };
    let body = args.into_iter().next().expect("one argument");
    let below = opt_args.into_iter().next().flatten();
    Ok(ParseNode::XArrow(XArrowNode {
        info: NodeInfo::new(mode, context.loc),
        label,
        body: Box::new(body),
        below: below.map(Box::new),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\xleftarrow",
            "\\xrightarrow",
            "\\xLeftarrow",
            "\\xRightarrow",
            "\\xleftrightarrow",
            "\\xLeftrightarrow",
            "\\xhookleftarrow",
            "\\xhookrightarrow",
            "\\xmapsto",
        ],
        FunctionPropSpec::with_args(1).with_optional(1),
        handler,
    );
}
