//! `\operatorname` and `\operatorname*`.

use crate::build_common::make_span;
use crate::dom_tree::{CssStyle, HtmlNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, OperatorNameNode, ParseNode, SupSubNode, SymNode};

/// The body with mathords downgraded to upright textords.
fn upright_body(body: &[ParseNode]) -> Vec<ParseNode> {
    body.iter()
        .map(|child| match child {
            ParseNode::MathOrd(sym) => ParseNode::TextOrd(SymNode {
                info: sym.info.clone(),
                text: sym.text.clone(),
            }),
            other => other.clone(),
        })
        .collect()
}

pub(crate) fn html_builder(
    group: &OperatorNameNode,
    options: &Options,
    supsub: Option<&SupSubNode>,
) -> Result<HtmlNode, ParseError> {
    let body = upright_body(&group.body);
    let base = if body.is_empty() {
        HtmlNode::Span(make_span(
            vec!["mop".to_string()],
            Vec::new(),
            Some(options),
            CssStyle::default(),
        ))
    } else {
        let mut expression = build_expression(
            &body,
            &options.with_font("mathrm"),
            RealGroup::True,
            (None, None),
        )?;
        for child in &mut expression {
            if let HtmlNode::Symbol(symbol) = child {
                // Operator names read as text.
                symbol.text = symbol.text.replace('\u{2212}', "-").replace('\u{2217}', "*");
            }
        }
        HtmlNode::Span(make_span(
            vec!["mop".to_string()],
            expression,
            Some(options),
            CssStyle::default(),
        ))
    };

    match supsub {
        Some(supsub) => super::op::assemble_sup_sub(
            base,
            supsub.sup.as_deref(),
            supsub.sub.as_deref(),
            options,
            0.0,
            0.0,
        ),
        None => Ok(base),
    }
}

pub(crate) fn mathml_builder(
    group: &OperatorNameNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let body = upright_body(&group.body);
    let expression = mathml::build_expression(&body, &options.with_font("mathrm"))?;

    // Collapse all-text bodies into a single <mo>.
    let mut word = String::new();
    let mut all_text = true;
    for node in &expression {
        match node {
            MathmlNode::Node(node) => {
                if let Some(MathmlNode::Text(text)) = node.children.first() {
                    word.push_str(&text.text);
                } else {
                    all_text = false;
                }
            }
            MathmlNode::Text(text) => word.push_str(&text.text),
            MathmlNode::Space(_) => all_text = false,
        }
    }

    let identifier = if all_text {
        let word = word.replace('\u{2212}', "-").replace('\u{2217}', "*");
        MathNode::new(
            MathNodeType::Mo,
            vec![MathmlNode::Text(TextNode::new(word))],
        )
        .with_attribute("mathvariant", "normal")
    } else {
        MathNode::new(MathNodeType::Mo, expression)
    };

    let operator = MathNode::new(
        MathNodeType::Mo,
        vec![MathmlNode::Text(TextNode::new("\u{2061}"))],
    );
    Ok(MathNode::new(
        MathNodeType::Mrow,
        vec![identifier.into(), operator.into()],
    )
    .into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    let with_limits = context.func_name == "\\operatornamewithlimits";
    Ok(ParseNode::OperatorName(OperatorNameNode {
        info: NodeInfo::new(mode, context.loc),
        body: ord_argument(body),
        always_handle_sup_sub: with_limits,
        limits: with_limits,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\operatorname@", "\\operatornamewithlimits"],
        FunctionPropSpec::with_args(1),
        handler,
    );
}
