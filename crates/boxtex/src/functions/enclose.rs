//! Enclosures: `\cancel`, `\bcancel`, `\xcancel`, `\sout`, `\fbox`,
//! `\colorbox`, `\fcolorbox`.

use crate::build_common::{VListElem, VListParam, make_span, make_vlist};
use crate::dom_tree::{
    Attributes, CssStyle, HtmlNode, LineNode, SvgChildNode, SvgNode, WithHtmlDomNode,
    format_color,
};
use crate::error::{ParseError, ParseErrorKind};
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{EncloseNode, NodeInfo, ParseNode};
use crate::types::ArgType;
use crate::unit::make_em;

fn cancel_svg(inner_height: f64, label: &str) -> HtmlNode {
    let mut children = Vec::new();
    let mut line = |x1: &str, y1: &str, x2: &str, y2: &str| {
        let mut attributes = Attributes::default();
        attributes.insert("x1", x1);
        attributes.insert("y1", y1);
        attributes.insert("x2", x2);
        attributes.insert("y2", y2);
        attributes.insert("stroke-width", "0.046em");
        SvgChildNode::Line(LineNode { attributes })
    };
    if label != "bcancel" {
        children.push(line("0", "100%", "100%", "0"));
    }
    if label != "cancel" {
        children.push(line("0", "0", "100%", "100%"));
    }
    let svg = SvgNode::new(children)
        .with_attribute("width", "100%")
        .with_attribute("height", make_em(inner_height))
        .with_attribute("preserveAspectRatio", "none");
    let mut span = make_span(
        vec!["stretchy".to_string()],
        vec![HtmlNode::Svg(svg)],
        None,
        CssStyle::default(),
    );
    span.node.height = inner_height;
    span.node.style.height = Some(make_em(inner_height));
    HtmlNode::Span(span)
}

pub(crate) fn html_builder(
    group: &EncloseNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let label = group.label;
    let inner = build_group(Some(&group.body), options, None)?;

    match label {
        "sout" => {
            let mut img = make_span(
                vec!["stretchy".to_string(), "sout".to_string()],
                Vec::new(),
                None,
                CssStyle::default(),
            );
            img.node.height = options.font_metrics().default_rule_thickness;
            let shift = -0.5 * options.font_metrics().x_height;
            let vlist = make_vlist(
                VListParam::IndividualShift(vec![
                    (VListElem::new(inner), 0.0),
                    (VListElem::new(HtmlNode::Span(img)), shift),
                ]),
                options,
            );
            Ok(HtmlNode::Span(make_span(
                vec!["mord".to_string()],
                vec![HtmlNode::Span(vlist)],
                Some(options),
                CssStyle::default(),
            )))
        }
        "cancel" | "bcancel" | "xcancel" => {
            // Pad the diagonals a bit past the content.
            let vert_pad = if group.body.is_character_box() { 0.2 } else { 0.0 };
            let total = inner.node().height + inner.node().depth + 2.0 * vert_pad;
            let img = cancel_svg(total, label);
            let img_shift = inner.node().depth + vert_pad;
            let vlist = make_vlist(
                VListParam::IndividualShift(vec![
                    (VListElem::new(inner), 0.0),
                    (VListElem::new(img), img_shift),
                ]),
                options,
            );
            Ok(HtmlNode::Span(make_span(
                vec!["mord".to_string(), "cancel-lap".to_string()],
                vec![HtmlNode::Span(vlist)],
                Some(options),
                CssStyle::default(),
            )))
        }
        _ => {
            // The box labels: fbox, colorbox, fcolorbox.
            let scale = 1.0 / options.size_multiplier();
            let pad = options.font_metrics().fbox_sep * scale;
            let rule = options.font_metrics().fbox_rule * scale;

            let mut img = make_span(
                vec!["boxpad".to_string(), label.to_string()],
                Vec::new(),
                None,
                CssStyle::default(),
            );
            img.node.height = inner.node().height + pad;
            img.node.depth = inner.node().depth + pad;
            img.node.style.height =
                Some(make_em(inner.node().height + inner.node().depth + 2.0 * pad));
            if let Some(background) = &group.background_color {
                img.node.style.background_color = Some(background.clone());
            }
            if label == "fbox" || label == "fcolorbox" {
                img.node.style.border_style = Some("solid".to_string());
                img.node.style.border_width = Some(make_em(rule));
                if let Some(border) = &group.border_color {
                    img.node.style.border_color = Some(border.clone());
                } else if label == "fbox" {
                    img.node.style.border_color = options.color().map(str::to_string);
                }
            }

            let img_shift = inner.node().depth + pad;
            let vlist = make_vlist(
                VListParam::IndividualShift(vec![
                    (VListElem::new(HtmlNode::Span(img)), img_shift),
                    (VListElem::new(inner), 0.0),
                ]),
                options,
            );
            Ok(HtmlNode::Span(make_span(
                vec!["mord".to_string()],
                vec![HtmlNode::Span(vlist)],
                Some(options),
                CssStyle::default(),
            )))
        }
    }
}

pub(crate) fn mathml_builder(
    group: &EncloseNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let inner = mathml::build_group(Some(&group.body), options)?;
    let mut node = MathNode::new(MathNodeType::Menclose, vec![inner]);
    let notation = match group.label {
        "cancel" => "updiagonalstrike",
        "bcancel" => "downdiagonalstrike",
        "xcancel" => "updiagonalstrike downdiagonalstrike",
        "sout" => "horizontalstrike",
        "fbox" | "fcolorbox" => "box",
        _ => "box",
    };
    if group.label == "colorbox" {
        if let Some(background) = &group.background_color {
            node.set_attribute("mathbackground", background.clone());
        }
    } else {
        node.set_attribute("notation", notation);
        if let Some(background) = &group.background_color {
            node.set_attribute("mathbackground", background.clone());
        }
    }
    Ok(node.into())
}

fn simple_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    let label: &'static str = match context.func_name.as_str() {
        "\\cancel" => "cancel",
        "\\bcancel" => "bcancel",
        "\\xcancel" => "xcancel",
        "\\sout" => "sout",
        _ => "fbox",
    };
    Ok(ParseNode::Enclose(EncloseNode {
        info: NodeInfo::new(mode, context.loc),
        label,
        background_color: None,
        border_color: None,
        body: Box::new(body),
    }))
}

fn color_from(node: ParseNode) -> Result<String, ParseError> {
    match node {
        ParseNode::ColorToken(token) => Ok(format_color(&token.color)),
        other => Err(ParseError(
            other.loc(),
            ParseErrorKind::ExpectedColor(String::new()),
        )),
    }
}

fn colorbox_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let is_fcolorbox = context.func_name == "\\fcolorbox";
    let mut args = args.into_iter();
    let (border_color, background_color) = if is_fcolorbox {
        let border = color_from(args.next().expect("three arguments"))?;
        let background = color_from(args.next().expect("three arguments"))?;
        (Some(border), Some(background))
    } else {
        (None, Some(color_from(args.next().expect("two arguments"))?))
    };
    let body = args.next().expect("body argument");
    Ok(ParseNode::Enclose(EncloseNode {
        info: NodeInfo::new(mode, context.loc),
        label: if is_fcolorbox { "fcolorbox" } else { "colorbox" },
        background_color,
        border_color,
        body: Box::new(body),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\cancel", "\\bcancel", "\\xcancel", "\\sout"],
        FunctionPropSpec::with_args(1),
        simple_handler,
    );
    add_functions(
        fns,
        &["\\fbox"],
        FunctionPropSpec::with_args(1)
            .in_text()
            .with_arg_types(&[ArgType::HBox]),
        simple_handler,
    );
    add_functions(
        fns,
        &["\\colorbox"],
        FunctionPropSpec::with_args(2)
            .in_text()
            .with_arg_types(&[ArgType::Color, ArgType::HBox])
            .with_greediness(3),
        colorbox_handler,
    );
    add_functions(
        fns,
        &["\\fcolorbox"],
        FunctionPropSpec::with_args(3)
            .in_text()
            .with_arg_types(&[ArgType::Color, ArgType::Color, ArgType::HBox])
            .with_greediness(3),
        colorbox_handler,
    );
}
