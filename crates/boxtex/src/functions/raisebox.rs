//! `\raisebox{dy}{text}`.

use crate::build_common::{VListChild, VListElem, VListParam, make_vlist};
use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, ParseNode, RaiseBoxNode};
use crate::types::ArgType;
use crate::unit::{calculate_size, make_em};

pub(crate) fn html_builder(
    group: &RaiseBoxNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let body = build_group(Some(&group.body), options, None)?;
    let dy = calculate_size(&group.dy, options);
    Ok(HtmlNode::Span(make_vlist(
        VListParam::Shift(-dy, vec![VListChild::Elem(VListElem::new(body))]),
        options,
    )))
}

pub(crate) fn mathml_builder(
    group: &RaiseBoxNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_group(Some(&group.body), options)?;
    let dy = calculate_size(&group.dy, options);
    let mut node = MathNode::new(MathNodeType::Mpadded, vec![inner]);
    node.set_attribute("voffset", make_em(dy));
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let dy = match args.next() {
        Some(ParseNode::Size(size)) => size.value,
        _ => unreachable!("size argument enforced by the registry"),
    };
    let body = args.next().expect("two arguments");
    Ok(ParseNode::RaiseBox(RaiseBoxNode {
        info: NodeInfo::new(mode, context.loc),
        dy,
        body: Box::new(body),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\raisebox"],
        FunctionPropSpec::with_args(2)
            .in_text()
            .with_arg_types(&[ArgType::Size, ArgType::HBox]),
        handler,
    );
}
