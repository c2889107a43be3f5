//! `{...}` groups.

use crate::dom_tree::{CssStyle, HtmlNode};
use crate::error::ParseError;
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::MathmlNode;
use crate::options::Options;
use crate::parse_node::OrdGroupNode;

pub(crate) fn html_builder(
    group: &OrdGroupNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    if group.semisimple {
        // \begingroup...\endgroup stays transparent to spacing.
        let children = build_expression(&group.body, options, RealGroup::False, (None, None))?;
        return Ok(crate::build_common::make_fragment(children).into());
    }
    let children = build_expression(&group.body, options, RealGroup::True, (None, None))?;
    Ok(HtmlNode::Span(crate::build_common::make_span(
        vec!["mord".to_string()],
        children,
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &OrdGroupNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    mathml::build_expression_row(&group.body, options)
}
