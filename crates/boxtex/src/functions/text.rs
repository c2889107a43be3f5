//! Text-mode groups: `\text`, the `\text**` family, weights, shapes.

use crate::build_common::{make_span, try_combine_chars};
use crate::dom_tree::{CssStyle, HtmlNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions, ord_argument};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::MathmlNode;
use crate::options::{FontShape, FontWeight, Options};
use crate::parse_node::{NodeInfo, ParseNode, TextParseNode};
use crate::types::Mode;

fn options_with_font(group: &TextParseNode, options: &Options) -> Options {
    match group.font {
        None => options.clone(),
        Some("\\textbf") => options.with_font_weight(FontWeight::TextBf),
        Some("\\textmd") => options.with_font_weight(FontWeight::TextMd),
        Some("\\textit") => options.with_text_font_shape(FontShape::TextIt),
        Some("\\textup") => options.with_text_font_shape(FontShape::TextUp),
        Some("\\textrm") => options.with_text_font_family("textrm"),
        Some("\\textsf") => options.with_text_font_family("textsf"),
        Some("\\texttt") => options.with_text_font_family("texttt"),
        Some(_) => options.clone(),
    }
}

pub(crate) fn html_builder(
    group: &TextParseNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let new_options = options_with_font(group, options);
    let mut inner = build_expression(&group.body, &new_options, RealGroup::True, (None, None))?;
    try_combine_chars(&mut inner);
    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string(), "text".to_string()],
        inner,
        Some(&new_options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &TextParseNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let new_options = options_with_font(group, options);
    mathml::build_expression_row(&group.body, &new_options)
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let body = args.into_iter().next().expect("one argument");
    let font = match context.func_name.as_str() {
        "\\text" | "\\textnormal" => None,
        "\\textrm" => Some("\\textrm"),
        "\\textsf" => Some("\\textsf"),
        "\\texttt" => Some("\\texttt"),
        "\\textbf" => Some("\\textbf"),
        "\\textmd" => Some("\\textmd"),
        "\\textit" => Some("\\textit"),
        "\\textup" => Some("\\textup"),
        _ => None,
    };
    Ok(ParseNode::Text(TextParseNode {
        info: NodeInfo::new(mode, context.loc),
        body: ord_argument(body),
        font,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    let mut props = FunctionPropSpec::with_args(1)
        .in_text()
        .with_greediness(2)
        .as_argument();
    props.consume_mode = Some(Mode::Text);
    add_functions(
        fns,
        &[
            "\\text",
            "\\textrm",
            "\\textsf",
            "\\texttt",
            "\\textnormal",
            "\\textbf",
            "\\textmd",
            "\\textit",
            "\\textup",
        ],
        props,
        handler,
    );
}
