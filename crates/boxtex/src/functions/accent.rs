//! Accents, both fixed (`\hat`) and stretchy (`\widehat`,
//! `\overrightarrow`).

use crate::build_common::{
    self, VListChild, VListElem, VListParam, make_span, make_span_s, make_vlist,
};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{AccentNode, NodeInfo, ParseNode};
use crate::stretchy;
use crate::types::Mode;
use crate::unit::make_em;

pub(crate) fn html_builder(
    group: &AccentNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    // Accented bases are cramped.
    let body = build_group(Some(&group.base), &options.having_cramped_style(), None)?;

    // The skew steers the accent towards the character's visual center.
    let skew = if group.base.is_character_box() {
        let base_char = group.base.base_elem();
        let built = build_group(Some(base_char), &options.having_cramped_style(), None)?;
        match built {
            HtmlNode::Symbol(symbol) => symbol.skew,
            _ => 0.0,
        }
    } else {
        0.0
    };

    let clearance = body.node().height.min(options.font_metrics().x_height);

    let accent_body = if !group.is_stretchy {
        let (accent, width): (HtmlNode, f64) = if group.label == "\\vec" {
            let svg = build_common::static_svg("vec", options);
            let width = 0.471;
            (HtmlNode::Span(svg), width)
        } else {
            let mut symbol = build_common::make_symbol(
                &group.label,
                "Main-Regular",
                group.info.mode,
                Some(options),
                Vec::new(),
            );
            // The accent centers itself; its own italic is irrelevant.
            symbol.italic = 0.0;
            let width = symbol.width;
            (symbol.into(), width)
        };

        let mut accent_span = make_span_s(vec!["accent-body".to_string()], vec![accent]);
        let left = skew - width / 2.0;
        accent_span.node.style.left = Some(make_em(left));

        make_vlist(
            VListParam::FirstBaseline(vec![
                VListChild::elem(body),
                VListChild::Kern(-clearance),
                VListChild::elem(HtmlNode::Span(accent_span)),
            ]),
            options,
        )
    } else {
        let accent_span = stretchy::svg_span(&ParseNode::Accent(group.clone()), options);
        let mut elem = VListElem::new(HtmlNode::Span(accent_span));
        elem.wrapper_classes = vec!["svg-align".to_string()];
        if skew > 0.0 {
            elem.wrapper_style.width = Some(format!("calc(100% - {})", make_em(2.0 * skew)));
            elem.wrapper_style.margin_left = Some(make_em(2.0 * skew));
        }
        make_vlist(
            VListParam::FirstBaseline(vec![
                VListChild::elem(body),
                VListChild::Elem(elem),
            ]),
            options,
        )
    };

    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string(), "accent".to_string()],
        vec![HtmlNode::Span(accent_body)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &AccentNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let accent_node: MathmlNode = if group.is_stretchy {
        stretchy::math_ml_node(&group.label).into()
    } else {
        let mut mo = MathNode::new(
            MathNodeType::Mo,
            vec![MathmlNode::Text(mathml::make_text(
                &group.label,
                group.info.mode,
            ))],
        );
        mo.set_attribute("stretchy", "false");
        mo.into()
    };
    let base = mathml::build_group(Some(&group.base), options)?;
    let mut node = MathNode::new(MathNodeType::Mover, vec![base, accent_node]);
    node.set_attribute("accent", "true");
    Ok(node.into())
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let base = args.into_iter().next().expect("one argument");
    let is_stretchy = !matches!(
        context.func_name.as_str(),
        "\\acute"
            | "\\grave"
            | "\\ddot"
            | "\\tilde"
            | "\\bar"
            | "\\breve"
            | "\\check"
            | "\\hat"
            | "\\vec"
            | "\\dot"
            | "\\mathring"
    );
    let is_shifty = !is_stretchy
        || matches!(
            context.func_name.as_str(),
            "\\widehat" | "\\widetilde" | "\\widecheck"
        );
    Ok(ParseNode::Accent(AccentNode {
        info: NodeInfo::new(mode, context.loc),
        label: context.func_name.clone(),
        is_stretchy,
        is_shifty,
        base: Box::new(base),
    }))
}

fn text_accent_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let base = args.into_iter().next().expect("one argument");
    if mode != Mode::Text {
        context.parser.settings.report_nonstrict(
            "mathVsTextAccents",
            &format!("LaTeX's accent {} works only in text mode", context.func_name),
            context.loc,
        )?;
    }
    let label = match context.func_name.as_str() {
        "\\'" => "\\acute",
        "\\`" => "\\grave",
        "\\^" => "\\hat",
        "\\~" => "\\tilde",
        "\\\"" => "\\ddot",
        "\\=" => "\\bar",
        "\\." => "\\dot",
        "\\u" => "\\breve",
        "\\v" => "\\check",
        "\\r" => "\\mathring",
        other => other,
    };
    Ok(ParseNode::Accent(AccentNode {
        info: NodeInfo::new(mode, context.loc),
        label: label.to_string(),
        is_stretchy: false,
        is_shifty: true,
        base: Box::new(base),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\acute",
            "\\grave",
            "\\ddot",
            "\\tilde",
            "\\bar",
            "\\breve",
            "\\check",
            "\\hat",
            "\\vec",
            "\\dot",
            "\\mathring",
            "\\widehat",
            "\\widetilde",
            "\\widecheck",
            "\\overrightarrow",
            "\\overleftarrow",
            "\\Overrightarrow",
            "\\overleftrightarrow",
            "\\overgroup",
        ],
        FunctionPropSpec::with_args(1),
        handler,
    );
    add_functions(
        fns,
        &[
            "\\'", "\\`", "\\^", "\\~", "\\\"", "\\=", "\\u", "\\.", "\\v", "\\r",
        ],
        {
            let mut props = FunctionPropSpec::with_args(1).in_text().as_argument();
            props.allowed_in_math = true;
            props
        },
        text_accent_handler,
    );
}
