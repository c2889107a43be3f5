//! `\mathchoice{D}{T}{S}{SS}`.

use crate::build_common::make_fragment;
use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::MathmlNode;
use crate::options::Options;
use crate::parse_node::{MathChoiceNode, NodeInfo, ParseNode};

fn choose<'n>(group: &'n MathChoiceNode, options: &Options) -> &'n [ParseNode] {
    match options.style().size() {
        0 => &group.display,
        1 => &group.text,
        2 => &group.script,
        _ => &group.scriptscript,
    }
}

pub(crate) fn html_builder(
    group: &MathChoiceNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let body = choose(group, options);
    let elements = build_expression(body, options, RealGroup::False, (None, None))?;
    Ok(make_fragment(elements).into())
}

pub(crate) fn mathml_builder(
    group: &MathChoiceNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    mathml::build_expression_row(choose(group, options), options)
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    Ok(ParseNode::MathChoice(MathChoiceNode {
        info: NodeInfo::new(mode, context.loc),
        display: ord_argument(args.next().expect("four arguments")),
        text: ord_argument(args.next().expect("four arguments")),
        script: ord_argument(args.next().expect("four arguments")),
        scriptscript: ord_argument(args.next().expect("four arguments")),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\mathchoice"],
        FunctionPropSpec::with_args(4).as_primitive(),
        handler,
    );
}
