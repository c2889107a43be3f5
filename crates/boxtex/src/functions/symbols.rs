//! Builders for the bare symbol nodes: atoms, ords, and spacing.
//!
//! These have no control sequences of their own; the parser creates
//! them straight from the symbol table.

use crate::build_common::{self, OrdType};
use crate::dom_tree::{CssStyle, HtmlNode};
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::mathml::{get_variant, make_text};
use crate::options::Options;
use crate::parse_node::{AtomFamily, AtomNode, ParseNode, SymNode};
use crate::unit::calculate_size;

pub(crate) fn atom_html(node: &AtomNode, options: &Options) -> HtmlNode {
    build_common::math_sym(
        &node.text,
        node.info.mode,
        options,
        vec![node.family.as_class().to_string()],
    )
    .into()
}

pub(crate) fn ord_html(node: &ParseNode, options: &Options) -> HtmlNode {
    let typ = match node {
        ParseNode::MathOrd(_) => OrdType::MathOrd,
        _ => OrdType::TextOrd,
    };
    build_common::make_ord(node, options, typ)
}

/// Accent tokens and other ord-like leaves render as upright text.
pub(crate) fn ord_like_html(node: &SymNode, options: &Options) -> HtmlNode {
    let as_textord = ParseNode::TextOrd(node.clone());
    build_common::make_ord(&as_textord, options, OrdType::TextOrd)
}

/// Regular spaces become a no-break-space symbol inside an mspace span;
/// this keeps them visible to the line breaker but inert for spacing.
/// Break markers render as empty spans carrying their class.
pub(crate) fn spacing_html(node: &SymNode, options: &Options) -> HtmlNode {
    if node.text == "\\allowbreak" || node.text == "\\nobreak" {
        let mut span = build_common::make_empty_span(vec![
            "mspace".to_string(),
            node.text[1..].to_string(),
        ]);
        span.node.max_font_size = options.size_multiplier();
        return HtmlNode::Span(span);
    }
    let symbol = build_common::make_symbol(
        &node.text,
        "Main-Regular",
        node.info.mode,
        Some(options),
        vec!["mord".to_string()],
    );
    let mut span = build_common::make_span(
        vec!["mspace".to_string()],
        vec![symbol.into()],
        Some(options),
        CssStyle::default(),
    );
    if node.text == "~" || node.text == "\\nobreakspace" || node.text == "\u{a0}" {
        span.node.classes.push("nobreak".to_string());
    }
    HtmlNode::Span(span)
}

pub(crate) fn atom_mathml(node: &AtomNode, options: &Options) -> MathmlNode {
    let mut mo = MathNode::new(
        MathNodeType::Mo,
        vec![MathmlNode::Text(make_text(&node.text, node.info.mode))],
    );
    match node.family {
        AtomFamily::Punct => {
            mo.set_attribute("separator", "true");
        }
        AtomFamily::Open | AtomFamily::Close => {
            // Delimiters only stretch under \left and \right.
            mo.set_attribute("stretchy", "false");
        }
        _ => {}
    }
    if let Some(variant) = get_variant(&ParseNode::Atom(node.clone()), options) {
        mo.set_attribute("mathvariant", variant.as_str());
    }
    mo.into()
}

pub(crate) fn ord_mathml(node: &ParseNode, options: &Options) -> MathmlNode {
    let text = node.text().unwrap_or("");
    let leaf = MathmlNode::Text(make_text(text, node.mode()));
    let is_digit = text.chars().next().is_some_and(|c| c.is_ascii_digit());
    let variant = get_variant(node, options);
    if is_digit {
        let mut mn = MathNode::new(MathNodeType::Mn, vec![leaf]);
        // mn defaults to the normal variant.
        if let Some(variant) = variant
            && variant != crate::build_common::FontVariant::Normal
        {
            mn.set_attribute("mathvariant", variant.as_str());
        }
        mn.into()
    } else {
        let mut mi = MathNode::new(MathNodeType::Mi, vec![leaf]);
        match node {
            ParseNode::MathOrd(_) => {
                // mi defaults to italic; only a different variant is
                // emitted.
                if let Some(variant) = variant
                    && variant != crate::build_common::FontVariant::Italic
                {
                    mi.set_attribute("mathvariant", variant.as_str());
                }
            }
            _ => {
                let variant = variant.unwrap_or(crate::build_common::FontVariant::Normal);
                mi.set_attribute("mathvariant", variant.as_str());
            }
        }
        mi.into()
    }
}

pub(crate) fn spacing_mathml(node: &SymNode, _options: &Options) -> MathmlNode {
    if node.text == "\\allowbreak" || node.text == "\\nobreak" {
        let mut mspace = MathNode::empty(MathNodeType::Mspace);
        mspace.set_attribute(
            "linebreak",
            if node.text == "\\allowbreak" {
                "goodbreak"
            } else {
                "nobreak"
            },
        );
        return mspace.into();
    }
    MathNode::new(
        MathNodeType::MText,
        vec![MathmlNode::Text(make_text(&node.text, node.info.mode))],
    )
    .into()
}

/// Shared by the kern builders: a fixed-width spacing span.
pub(crate) fn make_space_span(width: crate::unit::Measurement, options: &Options) -> HtmlNode {
    let size = calculate_size(&width, options);
    let mut span = build_common::make_empty_span(vec!["mspace".to_string()]);
    span.node.style.margin_right = Some(crate::unit::make_em(size));
    HtmlNode::Span(span)
}
