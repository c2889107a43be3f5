//! `\underline`.

use crate::build_common::{VListChild, VListParam, make_line_span, make_span, make_vlist};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::{BodyNode, NodeInfo, ParseNode};

pub(crate) fn html_builder(group: &BodyNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let inner = build_group(Some(&group.body), options, None)?;
    let line = make_line_span("underline-line", options, None);
    let rule_width = line.node.height;

    let top = inner.node().height;
    let vlist = make_vlist(
        VListParam::Top(
            top,
            vec![
                VListChild::Kern(rule_width),
                VListChild::elem(HtmlNode::Span(line)),
                VListChild::Kern(3.0 * rule_width),
                VListChild::elem(inner),
            ],
        ),
        options,
    );

    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string(), "underline".to_string()],
        vec![HtmlNode::Span(vlist)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &BodyNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let mut line = MathNode::new(
        MathNodeType::Mo,
        vec![MathmlNode::Text(TextNode::new("\u{203e}"))],
    );
    line.set_attribute("stretchy", "true");
    let inner = mathml::build_group(Some(&group.body), options)?;
    let mut node = MathNode::new(MathNodeType::Munder, vec![inner, line.into()]);
    node.set_attribute("accentunder", "true");
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    Ok(ParseNode::Underline(BodyNode {
        info: NodeInfo::new(mode, context.loc),
        body: Box::new(body),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\underline"],
        FunctionPropSpec::with_args(1),
        handler,
    );
}
