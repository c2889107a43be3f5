//! `\verb` and raw-text leaves.

use crate::build_common::{make_span, make_symbol};
use crate::dom_tree::{CssStyle, HtmlNode, SymbolNode};
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::{RawNode, VerbNode};

/// The body with spaces made visible: ordinary `\verb` gets no-break
/// spaces, starred `\verb*` gets open boxes.
fn verb_text(group: &VerbNode) -> String {
    group
        .body
        .chars()
        .map(|c| {
            if c == ' ' {
                if group.star { '\u{2423}' } else { '\u{a0}' }
            } else {
                c
            }
        })
        .collect()
}

pub(crate) fn html_builder(group: &VerbNode, options: &Options) -> HtmlNode {
    let text = verb_text(group);
    let new_options = options.having_style(options.style().text()).with_font("mathtt");
    let body: Vec<HtmlNode> = text
        .chars()
        .map(|c| {
            make_symbol(
                &c.to_string(),
                "Typewriter-Regular",
                group.info.mode,
                Some(&new_options),
                vec!["mord".to_string(), "texttt".to_string()],
            )
            .into()
        })
        .collect();
    let mut classes = vec!["mord".to_string(), "text".to_string()];
    classes.extend(new_options.sizing_classes(options));
    HtmlNode::Span(make_span(classes, body, Some(&new_options), CssStyle::default()))
}

pub(crate) fn mathml_builder(group: &VerbNode, _options: &Options) -> MathmlNode {
    let mut text = MathNode::new(
        MathNodeType::MText,
        vec![MathmlNode::Text(TextNode::new(verb_text(group)))],
    );
    text.set_attribute("mathvariant", "monospace");
    text.into()
}

/// Raw leaves surface verbatim, e.g. inside `\includegraphics` alt
/// text; on their own they render as plain text.
pub(crate) fn raw_html(node: &RawNode, _options: &Options) -> HtmlNode {
    SymbolNode::new_text(node.string.clone()).into()
}
