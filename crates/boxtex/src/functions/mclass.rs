//! Atom reclassification: `\mathbin`, `\mathrel`, ..., plus
//! `\stackrel`, `\overset`, and `\underset`.

use crate::build_common::make_span;
use crate::dom_tree::{CssStyle, HtmlNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{
    AtomFamily, MClassNode, NodeInfo, OpNode, ParseNode, SupSubNode,
};

/// The spacing class an argument contributes when re-wrapped: binary
/// and relation atoms keep their class, everything else becomes ord.
pub(crate) fn binrel_class(arg: &ParseNode) -> &'static str {
    // \binrel@ checks the atom type of the first character only.
    let atom = match arg {
        ParseNode::OrdGroup(group) if !group.body.is_empty() => &group.body[0],
        other => other,
    };
    match atom {
        ParseNode::Atom(atom) if matches!(atom.family, AtomFamily::Bin | AtomFamily::Rel) => {
            atom.family.as_class()
        }
        _ => "mord",
    }
}

pub(crate) fn html_builder(
    group: &MClassNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let children = build_expression(&group.body, options, RealGroup::True, (None, None))?;
    Ok(HtmlNode::Span(make_span(
        vec![group.mclass.to_string()],
        children,
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &MClassNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_expression(&group.body, options)?;
    let node = match group.mclass {
        "minner" => MathNode::new(MathNodeType::Mpadded, inner),
        "mord" => {
            if group.is_character_box {
                return Ok(inner.into_iter().next().unwrap_or_else(|| {
                    MathNode::empty(MathNodeType::Mrow).into()
                }));
            }
            MathNode::new(MathNodeType::Mrow, inner)
        }
        _ => {
            if group.is_character_box && inner.len() == 1 {
                // A single reclassified character renders as one mo.
                if let Some(MathmlNode::Node(node)) = inner.first()
                    && node.node_type == MathNodeType::Mi
                {
                    let mut mo =
                        MathNode::new(MathNodeType::Mo, node.children.clone());
                    if group.mclass == "mbin" {
                        mo.set_attribute("lspace", "0.22em");
                        mo.set_attribute("rspace", "0.22em");
                    }
                    return Ok(mo.into());
                }
            }
            let mut row = MathNode::new(MathNodeType::Mrow, inner);
            match group.mclass {
                "mbin" => {
                    row.set_attribute("lspace", "0.22em");
                    row.set_attribute("rspace", "0.22em");
                }
                "mpunct" => {
                    row.set_attribute("lspace", "0em");
                    row.set_attribute("rspace", "0.17em");
                }
                _ => {}
            }
            row
        }
    };
    Ok(node.into())
}

fn mclass_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    let mclass: &'static str = match context.func_name.as_str() {
        "\\mathord" => "mord",
        "\\mathbin" => "mbin",
        "\\mathrel" => "mrel",
        "\\mathopen" => "mopen",
        "\\mathclose" => "mclose",
        "\\mathpunct" => "mpunct",
        _ => "minner",
    };
    let is_character_box = body.is_character_box();
    Ok(ParseNode::MClass(MClassNode {
        info: NodeInfo::new(mode, context.loc),
        mclass,
        body: ord_argument(body),
        is_character_box,
    }))
}

fn over_under_set_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let loc = context.loc;
    let mut args = args.into_iter();
    let shifted = args.next().expect("two arguments");
    let base = args.next().expect("two arguments");
    let mclass = binrel_class(&base);

    let base_op = ParseNode::Op(OpNode {
        info: NodeInfo::new(mode, loc),
        limits: true,
        always_handle_sup_sub: true,
        suppress_base_shift: context.func_name != "\\stackrel",
        symbol: false,
        name: None,
        body: Some(ord_argument(base)),
    });

    let (sup, sub) = if context.func_name == "\\underset" {
        (None, Some(Box::new(shifted)))
    } else {
        (Some(Box::new(shifted)), None)
    };

    let supsub = ParseNode::SupSub(SupSubNode {
        info: NodeInfo::new(mode, loc),
        base: Some(Box::new(base_op)),
        sup,
        sub,
    });

    Ok(ParseNode::MClass(MClassNode {
        info: NodeInfo::new(mode, loc),
        mclass,
        body: vec![supsub],
        is_character_box: false,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\mathord",
            "\\mathbin",
            "\\mathrel",
            "\\mathopen",
            "\\mathclose",
            "\\mathpunct",
            "\\mathinner",
        ],
        FunctionPropSpec::with_args(1).as_argument(),
        mclass_handler,
    );
    add_functions(
        fns,
        &["\\stackrel", "\\overset", "\\underset"],
        FunctionPropSpec::with_args(2),
        over_under_set_handler,
    );
}
