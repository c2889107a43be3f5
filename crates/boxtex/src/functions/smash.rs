//! `\smash[tb]{...}`: hide height and/or depth from layout.

use crate::build_common::{VListChild, VListParam, make_span, make_span_s, make_vlist};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, ParseNode, SmashNode};

pub(crate) fn html_builder(group: &SmashNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let mut node = make_span_s(
        Vec::new(),
        vec![build_group(Some(&group.body), options, None)?],
    );

    if !group.smash_height && !group.smash_depth {
        return Ok(HtmlNode::Span(node));
    }
    if group.smash_height {
        node.node.height = 0.0;
        for child in &mut node.children {
            child.node_mut().height = 0.0;
        }
    }
    if group.smash_depth {
        node.node.depth = 0.0;
        for child in &mut node.children {
            child.node_mut().depth = 0.0;
        }
    }

    // Rewrap so the smashed extents stick.
    let smashed = make_vlist(
        VListParam::FirstBaseline(vec![VListChild::elem(HtmlNode::Span(node))]),
        options,
    );
    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string()],
        vec![HtmlNode::Span(smashed)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &SmashNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_group(Some(&group.body), options)?;
    let mut node = MathNode::new(MathNodeType::Mpadded, vec![inner]);
    if group.smash_height {
        node.set_attribute("height", "0px");
    }
    if group.smash_depth {
        node.set_attribute("depth", "0px");
    }
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut smash_height = false;
    let mut smash_depth = false;
    let tb = opt_args.into_iter().next().flatten();
    if let Some(tb) = tb {
        // Only \smash[t] and \smash[b] (in any combination) do
        // anything; other letters are ignored like in mathtools.
        for node in super::ord_argument(tb) {
            match node.text() {
                Some("t") => smash_height = true,
                Some("b") => smash_depth = true,
                _ => {
                    smash_height = false;
                    smash_depth = false;
                    break;
                }
            }
        }
    } else {
        smash_height = true;
        smash_depth = true;
    }
    let body = args.into_iter().next().expect("one argument");
    Ok(ParseNode::Smash(SmashNode {
        info: NodeInfo::new(mode, context.loc),
        body: Box::new(body),
        smash_height,
        smash_depth,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\smash"],
        FunctionPropSpec::with_args(1).with_optional(1).as_argument(),
        handler,
    );
}
