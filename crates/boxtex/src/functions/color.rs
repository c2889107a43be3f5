//! `\color` and `\textcolor`.

use crate::dom_tree::{HtmlNode, format_color};
use crate::error::{ParseError, ParseErrorKind};
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{ColorNode, NodeInfo, ParseNode};
use crate::types::ArgType;

pub(crate) fn html_builder(group: &ColorNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let elements = build_expression(
        &group.body,
        &options.with_color(group.color.clone()),
        RealGroup::False,
        (None, None),
    )?;
    // A fragment, so the color wrapper stays transparent to spacing.
    Ok(crate::build_common::make_fragment(elements).into())
}

pub(crate) fn mathml_builder(
    group: &ColorNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_expression(
        &group.body,
        &options.with_color(group.color.clone()),
    )?;
    let mut node = MathNode::new(MathNodeType::Mstyle, inner);
    node.set_attribute("mathcolor", group.color.clone());
    Ok(node.into())
}

fn color_from_arg(arg: ParseNode) -> Result<String, ParseError> {
    match arg {
        ParseNode::ColorToken(token) => Ok(format_color(&token.color)),
        other => Err(ParseError(
            other.loc(),
            ParseErrorKind::ExpectedColor(String::new()),
        )),
    }
}

fn textcolor_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let color = color_from_arg(args.next().expect("two arguments"))?;
    let body = args.next().expect("two arguments");
    Ok(ParseNode::Color(ColorNode {
        info: NodeInfo::new(mode, context.loc),
        color,
        body: ord_argument(body),
    }))
}

fn color_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let break_on_token = context.break_on_token;
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let color = color_from_arg(args.next().expect("one argument"))?;
    if context.parser.settings.color_is_text_color {
        // Legacy one-argument form: behave like \textcolor.
        let body = context.parser.parse_single_group("\\color")?;
        return Ok(ParseNode::Color(ColorNode {
            info: NodeInfo::new(mode, context.loc),
            color,
            body: ord_argument(body),
        }));
    }
    // \color affects the rest of the group.
    let body = context.parser.parse_expression(true, break_on_token)?;
    Ok(ParseNode::Color(ColorNode {
        info: NodeInfo::new(mode, context.loc),
        color,
        body,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\textcolor"],
        FunctionPropSpec::with_args(2)
            .in_text()
            .with_arg_types(&[ArgType::Color, ArgType::Original])
            .with_greediness(3)
            .as_argument(),
        textcolor_handler,
    );
    add_functions(
        fns,
        &["\\color"],
        FunctionPropSpec::with_args(1)
            .in_text()
            .with_arg_types(&[ArgType::Color])
            .with_greediness(3),
        color_handler,
    );
}
