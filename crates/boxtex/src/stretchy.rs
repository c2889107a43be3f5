//! Stretchy elements: wide accents, extensible arrows, and braces.
//!
//! Each label maps to a generated SVG whose viewBox is sliced to the
//! width of the element under it. Glyph-variant selection only matters
//! for the hat/tilde family, which switches paths by the width class of
//! its base.

use crate::build_common::make_span;
use crate::dom_tree::{CssStyle, DomSpan, HtmlNode, PathNode, SvgChildNode, SvgNode};
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::ParseNode;
use crate::unit::make_em;

struct ImageData {
    path: &'static str,
    min_width: f64,
    view_box_height: f64,
    align: &'static str,
}

fn image_data(label: &str) -> Option<ImageData> {
    let (path, min_width, view_box_height, align) = match label {
        "overrightarrow" | "underrightarrow" => ("rightarrow", 0.888, 522.0, "xMaxYMin"),
        "overleftarrow" | "underleftarrow" => ("leftarrow", 0.888, 522.0, "xMinYMin"),
        "overleftrightarrow" | "underleftrightarrow" => {
            ("leftrightarrow", 0.888, 522.0, "xMid")
        }
        "xrightarrow" => ("rightarrow", 1.469, 522.0, "xMaxYMin"),
        "xleftarrow" => ("leftarrow", 1.469, 522.0, "xMinYMin"),
        "xleftrightarrow" => ("leftrightarrow", 1.75, 522.0, "xMid"),
        "xRightarrow" | "Overrightarrow" => ("doublerightarrow", 1.526, 560.0, "xMaxYMin"),
        "xLeftarrow" => ("doubleleftarrow", 1.526, 560.0, "xMinYMin"),
        "xLeftrightarrow" => ("doubleleftrightarrow", 1.75, 560.0, "xMid"),
        "xmapsto" => ("mapsto", 1.5, 522.0, "xMaxYMin"),
        "xhookrightarrow" => ("hookrightarrow", 1.08, 522.0, "xMaxYMin"),
        "xhookleftarrow" => ("hookleftarrow", 1.08, 522.0, "xMinYMin"),
        "overbrace" => ("overbrace", 1.6, 548.0, "xMid"),
        "underbrace" => ("underbrace", 1.6, 548.0, "xMid"),
        "overgroup" => ("overgroup", 0.888, 342.0, "xMid"),
        "undergroup" => ("undergroup", 0.888, 342.0, "xMid"),
        "utilde" => ("widetilde2", 0.888, 300.0, "xMid"),
        _ => return None,
    };
    Some(ImageData {
        path,
        min_width,
        view_box_height,
        align,
    })
}

/// Counts the character boxes under a node, for hat/tilde variant
/// selection.
fn count_chars(node: &ParseNode) -> usize {
    match node {
        ParseNode::OrdGroup(group) => group.body.iter().map(count_chars).sum(),
        ParseNode::SupSub(supsub) => supsub.base.as_deref().map(count_chars).unwrap_or(0),
        _ => 1,
    }
}

fn hat_tilde_data(label: &str, base: &ParseNode) -> ImageData {
    let is_tilde = label == "widetilde";
    let num_chars = count_chars(base);
    let (index, view_box_height, height_em): (usize, f64, f64) = if num_chars > 5 {
        if is_tilde {
            (4, 312.0, 0.34)
        } else {
            (4, 420.0, 0.306)
        }
    } else {
        let img = [1usize, 1, 2, 2, 3, 3][num_chars.min(5)];
        if is_tilde {
            (img, [0.0, 200.0, 300.0, 300.0, 300.0][img], [0.0, 0.26, 0.286, 0.3, 0.3][img])
        } else {
            (img, [0.0, 239.0, 300.0, 360.0, 420.0][img], [0.0, 0.24, 0.3, 0.3, 0.306][img])
        }
    };
    let _ = height_em;
    ImageData {
        path: match (is_tilde, index) {
            (true, 1) => "widetilde1",
            (true, 2) => "widetilde2",
            (true, 3) => "widetilde3",
            (true, _) => "widetilde4",
            (false, 1) => "widehat1",
            (false, 2) => "widehat2",
            (false, 3) => "widehat3",
            (false, _) => "widehat4",
        },
        min_width: 0.0,
        view_box_height,
        align: "xMinYMin",
    }
}

/// The label of a stretchy parse node, without its backslash.
fn stretchy_label(group: &ParseNode) -> (&str, Option<&ParseNode>) {
    match group {
        ParseNode::Accent(accent) => (accent.label.trim_start_matches('\\'), Some(&accent.base)),
        ParseNode::AccentUnder(accent) => {
            (accent.label.trim_start_matches('\\'), Some(&accent.base))
        }
        ParseNode::XArrow(arrow) => (arrow.label.trim_start_matches('\\'), None),
        ParseNode::HorizBrace(brace) => (brace.label.trim_start_matches('\\'), None),
        _ => ("", None),
    }
}

/// Builds the stretchy SVG span for an accent, arrow, or brace node.
pub(crate) fn svg_span(group: &ParseNode, options: &Options) -> DomSpan {
    let (label, base) = stretchy_label(group);
    let data = match (label, base) {
        ("widehat" | "widetilde" | "widecheck", Some(base)) => hat_tilde_data(
            if label == "widecheck" { "widehat" } else { label },
            base,
        ),
        _ => image_data(label).unwrap_or_else(|| {
            log::warn!("Unknown stretchy element '{label}'");
            ImageData {
                path: "rightarrow",
                min_width: 0.888,
                view_box_height: 522.0,
                align: "xMid",
            }
        }),
    };

    let height = data.view_box_height / 1000.0;
    let svg = SvgNode::new(vec![SvgChildNode::Path(PathNode::new(data.path, None))])
        .with_attribute("width", "100%")
        .with_attribute("height", make_em(height))
        .with_attribute(
            "viewBox",
            format!("0 0 400000 {}", data.view_box_height),
        )
        .with_attribute(
            "preserveAspectRatio",
            format!("{} slice", data.align),
        );

    let mut span = make_span(
        vec!["stretchy".to_string()],
        vec![HtmlNode::Svg(svg)],
        Some(options),
        CssStyle::default(),
    );
    span.node.height = height;
    span.node.style.height = Some(make_em(height));
    if data.min_width > 0.0 {
        span.node.style.min_width = Some(make_em(data.min_width));
    }
    span
}

/// The MathML rendering of a stretchy label: a stretchy `<mo>` with the
/// corresponding character.
pub(crate) fn math_ml_node(label: &str) -> MathNode {
    let ch = match label.trim_start_matches('\\') {
        "overrightarrow" | "underrightarrow" | "xrightarrow" => '\u{2192}',
        "overleftarrow" | "underleftarrow" | "xleftarrow" => '\u{2190}',
        "overleftrightarrow" | "underleftrightarrow" | "xleftrightarrow" => '\u{2194}',
        "Overrightarrow" | "xRightarrow" => '\u{21d2}',
        "xLeftarrow" => '\u{21d0}',
        "xLeftrightarrow" => '\u{21d4}',
        "xmapsto" => '\u{21a6}',
        "xhookrightarrow" => '\u{21aa}',
        "xhookleftarrow" => '\u{21a9}',
        "overbrace" => '\u{23de}',
        "underbrace" => '\u{23df}',
        "overgroup" => '\u{23e0}',
        "undergroup" => '\u{23e1}',
        "widehat" => '\u{302}',
        "widecheck" => '\u{30c}',
        "widetilde" => '\u{303}',
        "utilde" => '\u{303}',
        other => {
            log::warn!("No stretchy MathML character for '{other}'");
            '\u{2192}'
        }
    };
    let mut mo = MathNode::new(
        MathNodeType::Mo,
        vec![MathmlNode::Text(TextNode::new(ch.to_string()))],
    );
    mo.set_attribute("stretchy", "true");
    mo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_node::{AccentNode, NodeInfo, SymNode};
    use crate::settings::Settings;
    use crate::types::Mode;

    fn accent(label: &str, base_chars: &str) -> ParseNode {
        let body: Vec<ParseNode> = base_chars
            .chars()
            .map(|c| {
                ParseNode::MathOrd(SymNode {
                    info: NodeInfo::new_mode(Mode::Math),
                    text: c.to_string(),
                })
            })
            .collect();
        ParseNode::Accent(AccentNode {
            info: NodeInfo::new_mode(Mode::Math),
            label: label.to_string(),
            is_stretchy: true,
            is_shifty: false,
            base: Box::new(ParseNode::ord_group(body, Mode::Math, None)),
        })
    }

    #[test]
    fn widehat_variant_grows_with_base() {
        let options = Options::from_settings(&Settings::default());
        let narrow = svg_span(&accent("\\widehat", "x"), &options);
        let wide = svg_span(&accent("\\widehat", "abcdefgh"), &options);
        assert!(wide.node.height > narrow.node.height);
    }

    #[test]
    fn mathml_nodes_are_stretchy() {
        let mo = math_ml_node("\\overbrace");
        assert_eq!(mo.get_attribute("stretchy"), Some("true"));
    }
}
