//! `\overbrace` and `\underbrace`, with their supsub annotations.

use crate::build_common::{VListChild, VListElem, VListParam, make_span, make_vlist};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{HorizBraceNode, NodeInfo, ParseNode, SupSubNode};
use crate::stretchy;
use crate::style;

pub(crate) fn html_builder(
    group: &HorizBraceNode,
    supsub: Option<&SupSubNode>,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let style = options.style();

    // The annotation, when present, comes via the supsub delegation.
    let annotation = match supsub {
        Some(supsub) => {
            let script = if group.is_over {
                supsub.sup.as_deref()
            } else {
                supsub.sub.as_deref()
            };
            match script {
                Some(script) => {
                    let new_options = options.having_style(if group.is_over {
                        style.sup()
                    } else {
                        style.sub()
                    });
                    Some(build_group(Some(script), &new_options, Some(options))?)
                }
                None => None,
            }
        }
        None => None,
    };

    let body = build_group(
        Some(&group.base),
        &options.having_base_style(Some(style::DISPLAY)),
        None,
    )?;
    let brace_body = stretchy::svg_span(&ParseNode::HorizBrace(group.clone()), options);

    let mut brace_elem = VListElem::new(HtmlNode::Span(brace_body));
    brace_elem.wrapper_classes = vec!["svg-align".to_string()];

    let base_vlist = if group.is_over {
        make_vlist(
            VListParam::FirstBaseline(vec![
                VListChild::elem(body),
                VListChild::Kern(0.1),
                VListChild::Elem(brace_elem),
            ]),
            options,
        )
    } else {
        let brace_height = brace_elem.elem.node().height;
        let body_depth = body.node().depth;
        make_vlist(
            VListParam::Bottom(
                body_depth + 0.1 + brace_height,
                vec![
                    VListChild::Elem(brace_elem),
                    VListChild::Kern(0.1),
                    VListChild::elem(body),
                ],
            ),
            options,
        )
    };

    let vlist = match annotation {
        None => base_vlist,
        Some(annotation) => {
            let wrapped = make_span(
                vec![
                    "mord".to_string(),
                    if group.is_over {
                        "mover".to_string()
                    } else {
                        "munder".to_string()
                    },
                ],
                vec![HtmlNode::Span(base_vlist)],
                Some(options),
                CssStyle::default(),
            );
            if group.is_over {
                make_vlist(
                    VListParam::FirstBaseline(vec![
                        VListChild::elem(HtmlNode::Span(wrapped)),
                        VListChild::Kern(0.2),
                        VListChild::elem(annotation),
                    ]),
                    options,
                )
            } else {
                let depth = wrapped.node.depth + 0.2 + annotation.node().height
                    + annotation.node().depth;
                make_vlist(
                    VListParam::Bottom(
                        depth,
                        vec![
                            VListChild::elem(annotation),
                            VListChild::Kern(0.2),
                            VListChild::elem(HtmlNode::Span(wrapped)),
                        ],
                    ),
                    options,
                )
            }
        }
    };

    Ok(HtmlNode::Span(make_span(
        vec![
            "mord".to_string(),
            if group.is_over {
                "mover".to_string()
            } else {
                "munder".to_string()
            },
        ],
        vec![HtmlNode::Span(vlist)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &HorizBraceNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let brace = stretchy::math_ml_node(&group.label);
    let base = mathml::build_group(Some(&group.base), options)?;
    let node = if group.is_over {
        MathNode::new(MathNodeType::Mover, vec![base, brace.into()])
    } else {
        MathNode::new(MathNodeType::Munder, vec![base, brace.into()])
    };
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let base = args.into_iter().next().expect("one argument");
    Ok(ParseNode::HorizBrace(HorizBraceNode {
        info: NodeInfo::new(mode, context.loc),
        label: context.func_name.clone(),
        is_over: context.func_name.starts_with("\\over"),
        base: Box::new(base),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\overbrace", "\\underbrace"],
        FunctionPropSpec::with_args(1),
        handler,
    );
}
