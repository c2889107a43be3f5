//! `\hbox`: a text-mode box that layout treats as a unit.

use crate::build_common::make_fragment;
use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::MathmlNode;
use crate::options::Options;
use crate::parse_node::{HBoxNode, NodeInfo, ParseNode};
use crate::types::ArgType;

pub(crate) fn html_builder(group: &HBoxNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let elements = build_expression(&group.body, options, RealGroup::False, (None, None))?;
    Ok(make_fragment(elements).into())
}

pub(crate) fn mathml_builder(
    group: &HBoxNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    mathml::build_expression_row(&group.body, options)
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    Ok(ParseNode::HBox(HBoxNode {
        info: NodeInfo::new(mode, context.loc),
        body: ord_argument(body),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\hbox"],
        FunctionPropSpec::with_args(1)
            .in_text()
            .with_arg_types(&[ArgType::HBox])
            .as_argument()
            .as_primitive(),
        handler,
    );
}
