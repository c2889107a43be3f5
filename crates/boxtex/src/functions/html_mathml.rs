//! `\html@mathml{html}{mathml}`: different content per output tree.

use crate::build_common::make_fragment;
use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::MathmlNode;
use crate::options::Options;
use crate::parse_node::{HtmlMathmlNode, NodeInfo, ParseNode};

pub(crate) fn html_builder(
    group: &HtmlMathmlNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let elements = build_expression(&group.html, options, RealGroup::False, (None, None))?;
    Ok(make_fragment(elements).into())
}

pub(crate) fn mathml_builder(
    group: &HtmlMathmlNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    mathml::build_expression_row(&group.mathml, options)
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let html = args.next().expect("two arguments");
    let mathml = args.next().expect("two arguments");
    Ok(ParseNode::HtmlMathml(HtmlMathmlNode {
        info: NodeInfo::new(mode, context.loc),
        html: ord_argument(html),
        mathml: ord_argument(mathml),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\html@mathml"],
        FunctionPropSpec::with_args(2).in_text().as_argument(),
        handler,
    );
}
