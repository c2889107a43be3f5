//! Math font switches: `\mathbf`, `\mathbb`, `\boldsymbol`, the old
//! style `\rm` family, and friends.

use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::MathmlNode;
use crate::options::Options;
use crate::parse_node::{FontNode, MClassNode, NodeInfo, ParseNode};

use super::mclass::binrel_class;

pub(crate) fn html_builder(group: &FontNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let new_options = options.with_font(&group.font);
    build_group(Some(&group.body), &new_options, None)
}

pub(crate) fn mathml_builder(
    group: &FontNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let new_options = options.with_font(&group.font);
    mathml::build_group(Some(&group.body), &new_options)
}

fn font_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    let func = aliased(&context.func_name);
    Ok(ParseNode::Font(FontNode {
        info: NodeInfo::new(mode, context.loc),
        font: func[1..].to_string(),
        body: Box::new(body),
    }))
}

fn bold_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    let loc = context.loc;
    // \boldsymbol keeps the argument's bin/rel spacing.
    let mclass = binrel_class(&body);
    Ok(ParseNode::MClass(MClassNode {
        info: NodeInfo::new(mode, loc),
        mclass,
        body: vec![ParseNode::Font(FontNode {
            info: NodeInfo::new(mode, loc),
            font: "boldsymbol".to_string(),
            body: Box::new(body),
        })],
        is_character_box: false,
    }))
}

fn old_font_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let break_on_token = context.break_on_token;
    let mode = context.parser.mode;
    let font = match context.func_name.as_str() {
        "\\rm" => "mathrm",
        "\\sf" => "mathsf",
        "\\tt" => "mathtt",
        "\\bf" => "mathbf",
        "\\it" => "mathit",
        _ => "mathcal",
    };
    let loc = context.loc;
    let body = context.parser.parse_expression(true, break_on_token)?;
    Ok(ParseNode::Font(FontNode {
        info: NodeInfo::new(mode, loc),
        font: font.to_string(),
        body: Box::new(ParseNode::ord_group(body, mode, loc)),
    }))
}

fn aliased(func_name: &str) -> &str {
    match func_name {
        "\\mathbfit" => "\\boldsymbol",
        other => other,
    }
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\mathrm",
            "\\mathit",
            "\\mathbf",
            "\\mathnormal",
            "\\mathbb",
            "\\mathcal",
            "\\mathfrak",
            "\\mathscr",
            "\\mathsf",
            "\\mathtt",
        ],
        FunctionPropSpec::with_args(1).with_greediness(2).as_argument(),
        font_handler,
    );
    add_functions(
        fns,
        &["\\boldsymbol", "\\bm"],
        FunctionPropSpec::with_args(1).with_greediness(2).as_argument(),
        bold_handler,
    );
    add_functions(
        fns,
        &["\\rm", "\\sf", "\\tt", "\\bf", "\\it", "\\cal"],
        FunctionPropSpec::with_args(0).in_text(),
        old_font_handler,
    );
}
