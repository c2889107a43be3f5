//! Operators: big symbol operators, `\mathop`, and the named text
//! operators with and without limits.

use crate::build_common::{
    VListChild, VListElem, VListParam, make_span, make_symbol, make_vlist, math_sym,
};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, OpNode, ParseNode, SupSubNode, SymNode};
use crate::style;
use crate::types::Mode;
use crate::unit::make_em;

/// Places limits above and below an operator base, with the big-op
/// spacing parameters.
pub(crate) fn assemble_sup_sub(
    base: HtmlNode,
    sup: Option<&ParseNode>,
    sub: Option<&ParseNode>,
    options: &Options,
    slant: f64,
    base_shift: f64,
) -> Result<HtmlNode, ParseError> {
    let metrics = options.font_metrics();

    let supm = sup
        .map(|sup| {
            crate::html::build_group(
                Some(sup),
                &options.having_style(options.style().sup()),
                Some(options),
            )
        })
        .transpose()?;
    let subm = sub
        .map(|sub| {
            crate::html::build_group(
                Some(sub),
                &options.having_style(options.style().sub()),
                Some(options),
            )
        })
        .transpose()?;

    let base_height = base.node().height;
    let base_depth = base.node().depth;

    let final_group = match (supm, subm) {
        (Some(supm), Some(subm)) => {
            let sup_kern = metrics
                .big_op_spacing1
                .max(metrics.big_op_spacing3 - supm.node().depth);
            let sub_kern = metrics
                .big_op_spacing2
                .max(metrics.big_op_spacing4 - subm.node().height);
            let bottom = metrics.big_op_spacing5
                + subm.node().height
                + subm.node().depth
                + sub_kern
                + base_depth
                + base_shift;
            let mut sub_elem = VListElem::new(subm);
            sub_elem.margin_left = Some(make_em(-slant));
            let mut sup_elem = VListElem::new(supm);
            sup_elem.margin_left = Some(make_em(slant));
            make_vlist(
                VListParam::Bottom(
                    bottom,
                    vec![
                        VListChild::Kern(metrics.big_op_spacing5),
                        VListChild::Elem(sub_elem),
                        VListChild::Kern(sub_kern),
                        VListChild::elem(base),
                        VListChild::Kern(sup_kern),
                        VListChild::Elem(sup_elem),
                        VListChild::Kern(metrics.big_op_spacing5),
                    ],
                ),
                options,
            )
        }
        (None, Some(subm)) => {
            let sub_kern = metrics
                .big_op_spacing2
                .max(metrics.big_op_spacing4 - subm.node().height);
            let top = base_height - base_shift;
            let mut sub_elem = VListElem::new(subm);
            sub_elem.margin_left = Some(make_em(-slant));
            make_vlist(
                VListParam::Top(
                    top,
                    vec![
                        VListChild::Kern(metrics.big_op_spacing5),
                        VListChild::Elem(sub_elem),
                        VListChild::Kern(sub_kern),
                        VListChild::elem(base),
                    ],
                ),
                options,
            )
        }
        (Some(supm), None) => {
            let sup_kern = metrics
                .big_op_spacing1
                .max(metrics.big_op_spacing3 - supm.node().depth);
            let bottom = base_depth + base_shift;
            let mut sup_elem = VListElem::new(supm);
            sup_elem.margin_left = Some(make_em(slant));
            make_vlist(
                VListParam::Bottom(
                    bottom,
                    vec![
                        VListChild::elem(base),
                        VListChild::Kern(sup_kern),
                        VListChild::Elem(sup_elem),
                        VListChild::Kern(metrics.big_op_spacing5),
                    ],
                ),
                options,
            )
        }
        (None, None) => return Ok(base),
    };

    Ok(HtmlNode::Span(make_span(
        vec!["mop".to_string(), "op-limits".to_string()],
        vec![HtmlNode::Span(final_group)],
        Some(options),
        CssStyle::default(),
    )))
}

/// Builds the bare operator box plus its axis shift and slant.
fn build_base(
    group: &OpNode,
    options: &Options,
) -> Result<(HtmlNode, f64, f64), ParseError> {
    let style = options.style();
    let mode = group.info.mode;

    if group.symbol {
        let large =
            style.size() == style::DISPLAY.size() && group.name.as_deref() != Some("\\smallint");
        let font_name = if large { "Size2-Regular" } else { "Size1-Regular" };
        let size_class = if large { "large-op" } else { "small-op" };
        let name = group.name.as_deref().unwrap_or("");
        let base = make_symbol(
            name,
            font_name,
            Mode::Math,
            Some(options),
            vec![
                "mop".to_string(),
                "op-symbol".to_string(),
                size_class.to_string(),
            ],
        );
        // Center the symbol on the axis.
        let base_shift = (base.node.height - base.node.depth) / 2.0
            - options.font_metrics().axis_height * options.size_multiplier();
        let slant = base.italic;
        Ok((base.into(), base_shift, slant))
    } else if let Some(body) = &group.body {
        let inner = build_expression(body, options, RealGroup::True, (None, None))?;
        let base = if inner.len() == 1
            && matches!(inner.first(), Some(HtmlNode::Symbol(_)))
        {
            let mut symbol = inner.into_iter().next().unwrap();
            symbol.node_mut().classes[0] = "mop".to_string();
            symbol
        } else {
            HtmlNode::Span(make_span(
                vec!["mop".to_string()],
                inner,
                Some(options),
                CssStyle::default(),
            ))
        };
        Ok((base, 0.0, 0.0))
    } else {
        // A named text operator such as \sin.
        let name = group.name.as_deref().unwrap_or("");
        let output: Vec<HtmlNode> = name
            .chars()
            .skip(1)
            .map(|c| math_sym(&c.to_string(), mode, options, Vec::new()).into())
            .collect();
        let base = HtmlNode::Span(make_span(
            vec!["mop".to_string()],
            output,
            Some(options),
            CssStyle::default(),
        ));
        Ok((base, 0.0, 0.0))
    }
}

pub(crate) fn html_builder(
    group: &OpNode,
    options: &Options,
    supsub: Option<&SupSubNode>,
) -> Result<HtmlNode, ParseError> {
    let (mut base, base_shift, slant) = build_base(group, options)?;
    let base_shift = if group.suppress_base_shift {
        0.0
    } else {
        base_shift
    };

    match supsub {
        Some(supsub) => assemble_sup_sub(
            base,
            supsub.sup.as_deref(),
            supsub.sub.as_deref(),
            options,
            slant,
            base_shift,
        ),
        None => {
            if base_shift != 0.0 {
                let node = base.node_mut();
                node.style.position = Some("relative".to_string());
                node.style.top = Some(make_em(base_shift));
                node.height -= base_shift;
                node.depth += base_shift;
            }
            Ok(base)
        }
    }
}

pub(crate) fn mathml_builder(group: &OpNode, options: &Options) -> Result<MathmlNode, ParseError> {
    if group.symbol {
        let name = group.name.as_deref().unwrap_or("");
        let mut node = MathNode::new(
            MathNodeType::Mo,
            vec![MathmlNode::Text(mathml::make_text(name, group.info.mode))],
        );
        if name == "\\smallint" {
            node.set_attribute("largeop", "false");
        }
        Ok(node.into())
    } else if let Some(body) = &group.body {
        let inner = mathml::build_expression(body, options)?;
        Ok(MathNode::new(MathNodeType::Mo, inner).into())
    } else {
        let name = group.name.as_deref().unwrap_or("");
        let mi = MathNode::new(
            MathNodeType::Mi,
            vec![MathmlNode::Text(TextNode::new(&name[1..]))],
        )
        .with_attribute("mathvariant", "normal");
        // U+2061 is the invisible function-application operator.
        let operator = MathNode::new(
            MathNodeType::Mo,
            vec![MathmlNode::Text(TextNode::new("\u{2061}"))],
        );
        Ok(MathNode::new(MathNodeType::Mrow, vec![mi.into(), operator.into()]).into())
    }
}

/// A unicode operator character parsed straight from the symbol table.
pub(crate) fn op_node_for_token(token: &SymNode) -> OpNode {
    let no_limits = matches!(token.text.as_str(), "\u{222b}" | "\u{222c}" | "\u{222d}" | "\u{222e}");
    OpNode {
        info: token.info.clone(),
        limits: !no_limits,
        always_handle_sup_sub: false,
        suppress_base_shift: false,
        symbol: true,
        name: Some(token.text.clone()),
        body: None,
    }
}

pub(crate) fn op_token_html(
    token: &SymNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    html_builder(&op_node_for_token(token), options, None)
}

pub(crate) fn op_token_mathml(token: &SymNode, _options: &Options) -> MathmlNode {
    let mut node = MathNode::new(
        MathNodeType::Mo,
        vec![MathmlNode::Text(TextNode::new(token.text.clone()))],
    );
    node.set_attribute("largeop", "true");
    node.into()
}

fn big_op_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let name = match context.func_name.as_str() {
        "\u{220f}" => "\\prod".to_string(),
        "\u{2210}" => "\\coprod".to_string(),
        "\u{2211}" => "\\sum".to_string(),
        "\u{22c0}" => "\\bigwedge".to_string(),
        "\u{22c1}" => "\\bigvee".to_string(),
        "\u{22c2}" => "\\bigcap".to_string(),
        "\u{22c3}" => "\\bigcup".to_string(),
        other => other.to_string(),
    };
    Ok(ParseNode::Op(OpNode {
        info: NodeInfo::new(mode, context.loc),
        limits: true,
        always_handle_sup_sub: false,
        suppress_base_shift: false,
        symbol: true,
        name: Some(name),
        body: None,
    }))
}

fn mathop_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    Ok(ParseNode::Op(OpNode {
        info: NodeInfo::new(mode, context.loc),
        limits: false,
        always_handle_sup_sub: false,
        suppress_base_shift: false,
        symbol: false,
        name: None,
        body: Some(ord_argument(body)),
    }))
}

fn text_op_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let limits = matches!(
        context.func_name.as_str(),
        "\\det" | "\\gcd" | "\\inf" | "\\lim" | "\\max" | "\\min" | "\\Pr" | "\\sup"
    );
    Ok(ParseNode::Op(OpNode {
        info: NodeInfo::new(mode, context.loc),
        limits,
        always_handle_sup_sub: false,
        suppress_base_shift: false,
        symbol: false,
        name: Some(context.func_name.clone()),
        body: None,
    }))
}

fn integral_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let name = match context.func_name.as_str() {
        "\u{222b}" => "\\int".to_string(),
        "\u{222c}" => "\\iint".to_string(),
        "\u{222d}" => "\\iiint".to_string(),
        "\u{222e}" => "\\oint".to_string(),
        other => other.to_string(),
    };
    Ok(ParseNode::Op(OpNode {
        info: NodeInfo::new(mode, context.loc),
        limits: false,
        always_handle_sup_sub: false,
        suppress_base_shift: false,
        symbol: true,
        name: Some(name),
        body: None,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\coprod",
            "\\bigvee",
            "\\bigwedge",
            "\\biguplus",
            "\\bigcap",
            "\\bigcup",
            "\\intop",
            "\\prod",
            "\\sum",
            "\\bigotimes",
            "\\bigoplus",
            "\\bigodot",
            "\\bigsqcup",
            "\\smallint",
            "\u{220f}",
            "\u{2210}",
            "\u{2211}",
            "\u{22c0}",
            "\u{22c1}",
            "\u{22c2}",
            "\u{22c3}",
        ],
        FunctionPropSpec::with_args(0),
        big_op_handler,
    );
    add_functions(
        fns,
        &["\\mathop"],
        FunctionPropSpec::with_args(1).as_argument(),
        mathop_handler,
    );
    add_functions(
        fns,
        &[
            "\\arcsin", "\\arccos", "\\arctan", "\\arctg", "\\arcctg", "\\arg", "\\ch",
            "\\cos", "\\cosec", "\\cosh", "\\cot", "\\cotg", "\\coth", "\\csc", "\\ctg",
            "\\cth", "\\deg", "\\dim", "\\exp", "\\hom", "\\ker", "\\lg", "\\ln", "\\log",
            "\\sec", "\\sin", "\\sinh", "\\sh", "\\tan", "\\tanh", "\\tg", "\\th", "\\det",
            "\\gcd", "\\inf", "\\lim", "\\max", "\\min", "\\Pr", "\\sup",
        ],
        FunctionPropSpec::with_args(0),
        text_op_handler,
    );
    add_functions(
        fns,
        &[
            "\\int", "\\iint", "\\iiint", "\\oint", "\u{222b}", "\u{222c}", "\u{222d}",
            "\u{222e}",
        ],
        FunctionPropSpec::with_args(0),
        integral_handler,
    );
}
