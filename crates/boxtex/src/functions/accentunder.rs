//! Under-accents: `\underrightarrow`, `\utilde`, and friends.

use crate::build_common::{VListChild, VListElem, VListParam, make_span, make_vlist};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{AccentNode, NodeInfo, ParseNode};
use crate::stretchy;

pub(crate) fn html_builder(
    group: &AccentNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let inner = build_group(Some(&group.base), options, None)?;
    let accent_body = stretchy::svg_span(&ParseNode::AccentUnder(group.clone()), options);
    let kern = if group.label == "\\utilde" { 0.12 } else { 0.0 };

    let mut accent_elem = VListElem::new(HtmlNode::Span(accent_body));
    accent_elem.wrapper_classes = vec!["svg-align".to_string()];
    let vlist = make_vlist(
        VListParam::Top(
            inner.node().height,
            vec![
                VListChild::Elem(accent_elem),
                VListChild::Kern(kern),
                VListChild::elem(inner),
            ],
        ),
        options,
    );

    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string(), "accentunder".to_string()],
        vec![HtmlNode::Span(vlist)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &AccentNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let accent = stretchy::math_ml_node(&group.label);
    let base = mathml::build_group(Some(&group.base), options)?;
    let mut node = MathNode::new(MathNodeType::Munder, vec![base, accent.into()]);
    node.set_attribute("accentunder", "true");
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let base = args.into_iter().next().expect("one argument");
    Ok(ParseNode::AccentUnder(AccentNode {
        info: NodeInfo::new(mode, context.loc),
        label: context.func_name.clone(),
        is_stretchy: true,
        is_shifty: false,
        base: Box::new(base),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\underleftarrow",
            "\\underrightarrow",
            "\\underleftrightarrow",
            "\\undergroup",
            "\\utilde",
        ],
        FunctionPropSpec::with_args(1),
        handler,
    );
}
