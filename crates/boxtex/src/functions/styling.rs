//! `\displaystyle`, `\textstyle`, `\scriptstyle`, `\scriptscriptstyle`.

use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, ParseNode, StylingNode};
use crate::style::{self, Style};

use super::sizing::sizing_group;

const STYLE_FUNCS: [(&str, Style); 4] = [
    ("\\displaystyle", style::DISPLAY),
    ("\\textstyle", style::TEXT),
    ("\\scriptstyle", style::SCRIPT),
    ("\\scriptscriptstyle", style::SCRIPTSCRIPT),
];

pub(crate) fn html_builder(
    group: &StylingNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let new_options = options.having_style(group.style).with_font("");
    sizing_group(&group.body, &new_options, options)
}

pub(crate) fn mathml_builder(
    group: &StylingNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let new_options = options.having_style(group.style);
    let inner = mathml::build_expression(&group.body, &new_options)?;
    let mut node = MathNode::new(MathNodeType::Mstyle, inner);
    let (script_level, display) = match group.style.size() {
        0 => ("0", "true"),
        1 => ("0", "false"),
        2 => ("1", "false"),
        _ => ("2", "false"),
    };
    node.set_attribute("scriptlevel", script_level);
    node.set_attribute("displaystyle", display);
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let break_on_token = context.break_on_token;
    let style = STYLE_FUNCS
        .iter()
        .find(|(name, _)| *name == context.func_name)
        .expect("registered name")
        .1;
    let mode = context.parser.mode;
    // Styling changes the spacing rules for the rest of the group, so
    // the body is everything up to the group end.
    let body = context.parser.parse_expression(true, break_on_token)?;
    Ok(ParseNode::Styling(StylingNode {
        info: NodeInfo::new(mode, context.loc),
        style,
        body,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\displaystyle",
            "\\textstyle",
            "\\scriptstyle",
            "\\scriptscriptstyle",
        ],
        FunctionPropSpec::with_args(0).in_text().as_primitive(),
        handler,
    );
}
