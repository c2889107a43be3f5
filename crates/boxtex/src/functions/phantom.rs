//! `\phantom`, `\hphantom`, `\vphantom`.

use crate::build_common::{
    VListChild, VListParam, make_empty_span, make_fragment, make_span, make_span_s, make_vlist,
};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression, build_group};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{BodyNode, NodeInfo, ParseNode, PhantomNode};

pub(crate) fn html_builder(
    group: &PhantomNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let elements = build_expression(
        &group.body,
        &options.with_phantom(),
        RealGroup::False,
        (None, None),
    )?;
    Ok(make_fragment(elements).into())
}

pub(crate) fn hphantom_html(group: &BodyNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let mut node = make_span_s(
        Vec::new(),
        vec![build_group(Some(&group.body), &options.with_phantom(), None)?],
    );
    node.node.height = 0.0;
    node.node.depth = 0.0;
    for child in &mut node.children {
        child.node_mut().height = 0.0;
        child.node_mut().depth = 0.0;
    }
    let stacked = make_vlist(
        VListParam::FirstBaseline(vec![VListChild::elem(HtmlNode::Span(node))]),
        options,
    );
    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string()],
        vec![HtmlNode::Span(stacked)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn vphantom_html(group: &BodyNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let inner = make_span_s(
        vec!["inner".to_string()],
        vec![build_group(Some(&group.body), &options.with_phantom(), None)?],
    );
    let fix = make_empty_span(vec!["fix".to_string()]);
    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string(), "rlap".to_string()],
        vec![HtmlNode::Span(inner), HtmlNode::Span(fix)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &PhantomNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_expression(&group.body, options)?;
    Ok(MathNode::new(MathNodeType::Mphantom, inner).into())
}

pub(crate) fn hphantom_mathml(
    group: &BodyNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_group(Some(&group.body), options)?;
    let phantom = MathNode::new(MathNodeType::Mphantom, vec![inner]);
    let mut node = MathNode::new(MathNodeType::Mpadded, vec![phantom.into()]);
    node.set_attribute("height", "0px");
    node.set_attribute("depth", "0px");
    Ok(node.into())
}

pub(crate) fn vphantom_mathml(
    group: &BodyNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_group(Some(&group.body), options)?;
    let phantom = MathNode::new(MathNodeType::Mphantom, vec![inner]);
    let mut node = MathNode::new(MathNodeType::Mpadded, vec![phantom.into()]);
    node.set_attribute("width", "0px");
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    let info = NodeInfo::new(mode, context.loc);
    Ok(match context.func_name.as_str() {
        "\\phantom" => ParseNode::Phantom(PhantomNode {
            info,
            body: ord_argument(body),
        }),
        "\\hphantom" => ParseNode::HPhantom(BodyNode {
            info,
            body: Box::new(body),
        }),
        _ => ParseNode::VPhantom(BodyNode {
            info,
            body: Box::new(body),
        }),
    })
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\phantom", "\\hphantom", "\\vphantom"],
        FunctionPropSpec::with_args(1).in_text().as_argument(),
        handler,
    );
}
