//! `\includegraphics[key=value,...]{src}`, gated by the trust setting.

use crate::dom_tree::{CssStyle, HtmlNode, ImgNode};
use crate::error::{ParseError, ParseErrorKind};
use crate::functions::{
    FnMap, FunctionContext, FunctionPropSpec, add_functions, format_unsupported_cmd,
};
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{IncludegraphicsNode, NodeInfo, ParseNode};
use crate::settings::{TrustContext, protocol_from_url};
use crate::types::ArgType;
use crate::unit::{Measurement, calculate_size, make_em, parse_size_text};

pub(crate) fn html_builder(
    group: &IncludegraphicsNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let height = calculate_size(&group.height, options);
    let depth = calculate_size(&group.total_height, options) - height;
    let width = calculate_size(&group.width, options);

    let mut style = CssStyle::default();
    style.height = Some(make_em(height + depth));
    if width > 0.0 {
        style.width = Some(make_em(width));
    }
    if depth > 0.0 {
        style.vertical_align = Some(make_em(-depth));
    }

    let mut img = ImgNode::new(group.src.clone(), group.alt.clone(), style);
    img.node.height = height;
    img.node.depth = depth;
    Ok(HtmlNode::Img(img))
}

pub(crate) fn mathml_builder(group: &IncludegraphicsNode, options: &Options) -> MathmlNode {
    let height = calculate_size(&group.height, options);
    let depth = calculate_size(&group.total_height, options) - height;
    let width = calculate_size(&group.width, options);

    let mut node = MathNode::empty(MathNodeType::Mglyph);
    node.set_attribute("alt", group.alt.clone());
    node.set_attribute("height", make_em(height));
    node.set_attribute("valign", make_em(-depth));
    if width > 0.0 {
        node.set_attribute("width", make_em(width));
    }
    node.set_attribute("src", group.src.clone());
    node.into()
}

fn parse_key_vals(
    raw: &str,
    loc: Option<crate::token::SourceRange>,
) -> Result<(Measurement, Measurement, Measurement, String), ParseError> {
    let mut width = Measurement::em(0.0);
    let mut height = Measurement::em(0.9);
    let mut total_height = Measurement::em(0.9);
    let mut alt = String::new();
    for attr in raw.split(',') {
        let attr = attr.trim();
        if attr.is_empty() {
            continue;
        }
        let Some((key, value)) = attr.split_once('=') else {
            return Err(ParseError(
                loc,
                ParseErrorKind::InvalidSize(attr.to_string()),
            ));
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "alt" => alt = value.to_string(),
            "width" => {
                width = parse_size_text(value).ok_or_else(|| {
                    ParseError(loc, ParseErrorKind::InvalidSize(value.to_string()))
                })?;
            }
            "height" => {
                height = parse_size_text(value).ok_or_else(|| {
                    ParseError(loc, ParseErrorKind::InvalidSize(value.to_string()))
                })?;
            }
            "totalheight" => {
                total_height = parse_size_text(value).ok_or_else(|| {
                    ParseError(loc, ParseErrorKind::InvalidSize(value.to_string()))
                })?;
            }
            _ => {
                return Err(ParseError(
                    loc,
                    ParseErrorKind::Message(format!(
                        "Invalid key: '{key}' in \\includegraphics."
                    )),
                ));
            }
        }
    }
    Ok((width, height, total_height, alt))
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let raw_attrs = match opt_args.into_iter().next().flatten() {
        Some(ParseNode::Raw(raw)) => raw.string,
        _ => String::new(),
    };
    let (width, height, total_height, mut alt) = parse_key_vals(&raw_attrs, context.loc)?;

    let src = match args.into_iter().next() {
        Some(ParseNode::Url(url)) => url.url,
        Some(ParseNode::Raw(raw)) => raw.string,
        _ => String::new(),
    };
    if alt.is_empty() {
        // Default alt text: the file name, minus path and extension.
        alt = src
            .rsplit('/')
            .next()
            .unwrap_or("")
            .split('.')
            .next()
            .unwrap_or("")
            .to_string();
    }

    let trust_context = TrustContext {
        command: "\\includegraphics",
        url: Some(&src),
        protocol: protocol_from_url(&src),
    };
    if !context.parser.settings.is_trusted(&trust_context) {
        context.parser.settings.report_nonstrict(
            "htmlExtension",
            "Trust setting doesn't allow \\includegraphics",
            context.loc,
        )?;
        return Ok(format_unsupported_cmd(
            context.parser.settings,
            "\\includegraphics",
            mode,
            context.loc,
        ));
    }

    Ok(ParseNode::Includegraphics(IncludegraphicsNode {
        info: NodeInfo::new(mode, context.loc),
        alt,
        width,
        height,
        total_height,
        src,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\includegraphics"],
        FunctionPropSpec::with_args(1)
            .with_optional(1)
            .with_arg_types(&[ArgType::Raw, ArgType::Url]),
        handler,
    );
}
