//! `\href` and `\url`, gated by the trust setting.

use crate::build_common::make_anchor;
use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{
    FnMap, FunctionContext, FunctionPropSpec, add_functions, format_unsupported_cmd, ord_argument,
};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::{
    FontNode, HrefNode, NodeInfo, ParseNode, SymNode, UrlNode,
};
use crate::settings::{TrustContext, protocol_from_url};
use crate::types::ArgType;

pub(crate) fn html_builder(group: &HrefNode, options: &Options) -> Result<HtmlNode, ParseError> {
    let elements = build_expression(&group.body, options, RealGroup::False, (None, None))?;
    Ok(HtmlNode::Anchor(make_anchor(
        group.href.clone(),
        Vec::new(),
        elements,
        options,
    )))
}

pub(crate) fn mathml_builder(
    group: &HrefNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let body = mathml::build_expression(&group.body, options)?;
    let mut row = MathNode::new(MathNodeType::Mrow, body);
    row.set_attribute("href", group.href.clone());
    Ok(row.into())
}

/// Renders the URL itself, monospaced.
fn url_body(group: &UrlNode) -> ParseNode {
    let info = NodeInfo::new(group.info.mode, group.info.loc);
    let chars: Vec<ParseNode> = group
        .url
        .chars()
        .map(|c| {
            ParseNode::TextOrd(SymNode {
                info: info.clone(),
                text: c.to_string(),
            })
        })
        .collect();
    ParseNode::Font(FontNode {
        info: info.clone(),
        font: "mathtt".to_string(),
        body: Box::new(ParseNode::ord_group(chars, group.info.mode, group.info.loc)),
    })
}

pub(crate) fn url_html_builder(
    group: &UrlNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let body = url_body(group);
    let elements = build_expression(
        std::slice::from_ref(&body),
        options,
        RealGroup::False,
        (None, None),
    )?;
    Ok(HtmlNode::Anchor(make_anchor(
        group.url.clone(),
        Vec::new(),
        elements,
        options,
    )))
}

pub(crate) fn url_mathml_builder(
    group: &UrlNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let body = url_body(group);
    let inner = mathml::build_group(Some(&body), options)?;
    let mut row = MathNode::new(MathNodeType::Mrow, vec![inner]);
    row.set_attribute("href", group.url.clone());
    Ok(row.into())
}

fn url_from_arg(arg: ParseNode) -> String {
    match arg {
        ParseNode::Url(url) => url.url,
        ParseNode::Raw(raw) => raw.string,
        other => other.text().unwrap_or("").to_string(),
    }
}

fn href_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let href = url_from_arg(args.next().expect("two arguments"));
    let body = args.next().expect("two arguments");

    let trust_context = TrustContext {
        command: "\\href",
        url: Some(&href),
        protocol: protocol_from_url(&href),
    };
    if !context.parser.settings.is_trusted(&trust_context) {
        context.parser.settings.report_nonstrict(
            "htmlExtension",
            "Trust setting doesn't allow \\href",
            context.loc,
        )?;
        return Ok(format_unsupported_cmd(
            context.parser.settings,
            "\\href",
            mode,
            context.loc,
        ));
    }

    Ok(ParseNode::Href(HrefNode {
        info: NodeInfo::new(mode, context.loc),
        href,
        body: ord_argument(body),
    }))
}

fn url_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let url = url_from_arg(args.into_iter().next().expect("one argument"));

    let trust_context = TrustContext {
        command: "\\url",
        url: Some(&url),
        protocol: protocol_from_url(&url),
    };
    if !context.parser.settings.is_trusted(&trust_context) {
        context.parser.settings.report_nonstrict(
            "htmlExtension",
            "Trust setting doesn't allow \\url",
            context.loc,
        )?;
        return Ok(format_unsupported_cmd(
            context.parser.settings,
            "\\url",
            mode,
            context.loc,
        ));
    }

    Ok(ParseNode::Url(UrlNode {
        info: NodeInfo::new(mode, context.loc),
        url,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\href"],
        FunctionPropSpec::with_args(2)
            .with_arg_types(&[ArgType::Url, ArgType::Original])
            .in_text(),
        href_handler,
    );
    add_functions(
        fns,
        &["\\url"],
        FunctionPropSpec::with_args(1)
            .with_arg_types(&[ArgType::Url])
            .in_text(),
        url_handler,
    );
}
