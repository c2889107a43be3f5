//! Horizontal overlap: `\mathllap`, `\mathrlap`, `\mathclap`.

use crate::build_common::{make_empty_span, make_span, make_span_s};
use crate::dom_tree::{CssStyle, HtmlNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{LapNode, NodeInfo, ParseNode};
use crate::unit::make_em;

pub(crate) fn html_builder(group: &LapNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let inner_body = build_group(Some(&group.body), options, None)?;
    let inner = if group.alignment == "clap" {
        // clap centers around an extra wrapper.
        let centered = make_span_s(Vec::new(), vec![inner_body]);
        make_span_s(vec!["inner".to_string()], vec![HtmlNode::Span(centered)])
    } else {
        make_span_s(vec!["inner".to_string()], vec![inner_body])
    };
    let fix = make_empty_span(vec!["fix".to_string()]);
    let mut node = make_span(
        vec![group.alignment.to_string()],
        vec![HtmlNode::Span(inner), HtmlNode::Span(fix)],
        Some(options),
        CssStyle::default(),
    );

    // The lap renders with zero width; a strut keeps its line height.
    let mut strut = make_empty_span(vec!["strut".to_string()]);
    strut.node.style.height = Some(make_em(node.node.height + node.node.depth));
    if node.node.depth > 0.0 {
        strut.node.style.vertical_align = Some(make_em(-node.node.depth));
    }
    node.children.insert(0, HtmlNode::Span(strut));

    let node = make_span_s(vec!["thinbox".to_string()], vec![HtmlNode::Span(node)]);
    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string(), "vbox".to_string()],
        vec![HtmlNode::Span(node)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &LapNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_group(Some(&group.body), options)?;
    let mut node = MathNode::new(MathNodeType::Mpadded, vec![inner]);
    if group.alignment != "rlap" {
        let offset = if group.alignment == "llap" { "-1" } else { "-0.5" };
        node.set_attribute("lspace", format!("{offset}width"));
    }
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
    let alignment = match context.func_name.as_str() {
        "\\mathllap" => "llap",
        "\\mathrlap" => "rlap",
        _ => "clap",
    };
    Ok(ParseNode::Lap(LapNode {
        info: NodeInfo::new(mode, context.loc),
        alignment,
        body: Box::new(body),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\mathllap", "\\mathrlap", "\\mathclap"],
        FunctionPropSpec::with_args(1).as_argument(),
        handler,
    );
}
