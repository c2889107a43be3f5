//! Delimiter selection and assembly.
//!
//! Three renderings exist: a styled glyph from the normal font
//! ("small"), a glyph from one of the Size fonts ("large"), and a
//! stack of glyph pieces from the extensible fonts. Each delimiter
//! knows which catalog it traverses; the catalogs are ordered so that
//! selection is monotone in the target extent.

use crate::build_common::{self, VListChild, make_span, make_vlist, VListParam};
use crate::dom_tree::{ClassList, CssStyle, DomSpan, HtmlNode, PathNode, SvgChildNode, SvgNode};
use crate::error::{ParseError, ParseErrorKind};
use crate::options::Options;
use crate::style::{self, Style};
use crate::types::Mode;
use crate::unit::make_em;

fn get_metrics(symbol: &str, font: &str, mode: Mode) -> (f64, f64) {
    let lookup = build_common::lookup_symbol(symbol, font, mode);
    match lookup.metrics {
        Some(m) => (m.height, m.depth),
        None => (0.0, 0.0),
    }
}

/// Puts the delimiter span in the given style, scaling its extents.
fn style_wrap(delim: HtmlNode, to_style: Style, options: &Options, classes: ClassList) -> DomSpan {
    let new_options = options.having_base_style(Some(to_style));
    let mut classes = classes;
    classes.extend(new_options.sizing_classes(options));
    let mut span = make_span(classes, vec![delim], Some(options), CssStyle::default());
    let multiplier = new_options.size_multiplier() / options.size_multiplier();
    span.node.height *= multiplier;
    span.node.depth *= multiplier;
    span.node.max_font_size = new_options.size_multiplier();
    span
}

fn center_span(span: &mut DomSpan, options: &Options, style: Style) {
    let new_options = options.having_base_style(Some(style));
    let shift =
        (1.0 - options.size_multiplier() / new_options.size_multiplier())
            * options.font_metrics().axis_height;
    span.node.classes.push("delimcenter".to_string());
    span.node.style.top = Some(make_em(shift));
    span.node.height -= shift;
    span.node.depth += shift;
}

/// A delimiter from the normal font, possibly shrunk by a style.
fn make_small_delim(
    delim: &str,
    style: Style,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: ClassList,
) -> DomSpan {
    let text = build_common::make_symbol(delim, "Main-Regular", mode, Some(options), Vec::new());
    let mut span = style_wrap(text.into(), style, options, classes);
    if center {
        center_span(&mut span, options, style);
    }
    span
}

/// A delimiter from one of the Size fonts.
fn make_large_delim(
    delim: &str,
    size: usize,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: ClassList,
) -> DomSpan {
    let font = match size {
        1 => "Size1-Regular",
        2 => "Size2-Regular",
        3 => "Size3-Regular",
        _ => "Size4-Regular",
    };
    let text = build_common::make_symbol(delim, font, mode, Some(options), Vec::new());
    let inner = make_span(
        vec!["delimsizing".to_string(), format!("size{size}")],
        vec![text.into()],
        Some(options),
        CssStyle::default(),
    );
    let mut span = style_wrap(inner.into(), style::TEXT, options, classes);
    if center {
        center_span(&mut span, options, style::TEXT);
    }
    span
}

struct StackPieces {
    top: char,
    middle: Option<char>,
    repeat: char,
    bottom: char,
    font: &'static str,
}

fn stack_pieces(delim: &str) -> StackPieces {
    let size4 = "Size4-Regular";
    let size1 = "Size1-Regular";
    match delim {
        "(" | "\\lparen" => StackPieces {
            top: '\u{239b}',
            middle: None,
            repeat: '\u{239c}',
            bottom: '\u{239d}',
            font: size4,
        },
        ")" | "\\rparen" => StackPieces {
            top: '\u{239e}',
            middle: None,
            repeat: '\u{239f}',
            bottom: '\u{23a0}',
            font: size4,
        },
        "[" | "\\lbrack" => StackPieces {
            top: '\u{23a1}',
            middle: None,
            repeat: '\u{23a2}',
            bottom: '\u{23a3}',
            font: size4,
        },
        "]" | "\\rbrack" => StackPieces {
            top: '\u{23a4}',
            middle: None,
            repeat: '\u{23a5}',
            bottom: '\u{23a6}',
            font: size4,
        },
        "{" | "\\lbrace" | "\\{" => StackPieces {
            top: '\u{23a7}',
            middle: Some('\u{23a8}'),
            repeat: '\u{23aa}',
            bottom: '\u{23a9}',
            font: size4,
        },
        "}" | "\\rbrace" | "\\}" => StackPieces {
            top: '\u{23ab}',
            middle: Some('\u{23ac}'),
            repeat: '\u{23aa}',
            bottom: '\u{23ad}',
            font: size4,
        },
        "\\lfloor" | "\u{230a}" => StackPieces {
            top: '\u{23a2}',
            middle: None,
            repeat: '\u{23a2}',
            bottom: '\u{23a3}',
            font: size4,
        },
        "\\lceil" | "\u{2308}" => StackPieces {
            top: '\u{23a1}',
            middle: None,
            repeat: '\u{23a2}',
            bottom: '\u{23a2}',
            font: size4,
        },
        "\\rfloor" | "\u{230b}" => StackPieces {
            top: '\u{23a5}',
            middle: None,
            repeat: '\u{23a5}',
            bottom: '\u{23a6}',
            font: size4,
        },
        "\\rceil" | "\u{2309}" => StackPieces {
            top: '\u{23a4}',
            middle: None,
            repeat: '\u{23a5}',
            bottom: '\u{23a5}',
            font: size4,
        },
        "\\Vert" | "\\|" | "\\lVert" | "\\rVert" => StackPieces {
            top: '\u{2225}',
            middle: None,
            repeat: '\u{2225}',
            bottom: '\u{2225}',
            font: size1,
        },
        "\\uparrow" => StackPieces {
            top: '\u{2191}',
            middle: None,
            repeat: '\u{23d0}',
            bottom: '\u{23d0}',
            font: size1,
        },
        "\\downarrow" => StackPieces {
            top: '\u{23d0}',
            middle: None,
            repeat: '\u{23d0}',
            bottom: '\u{2193}',
            font: size1,
        },
        "\\updownarrow" => StackPieces {
            top: '\u{2191}',
            middle: None,
            repeat: '\u{23d0}',
            bottom: '\u{2193}',
            font: size1,
        },
        "\\Uparrow" => StackPieces {
            top: '\u{21d1}',
            middle: None,
            repeat: '\u{2225}',
            bottom: '\u{2225}',
            font: size1,
        },
        "\\Downarrow" => StackPieces {
            top: '\u{2225}',
            middle: None,
            repeat: '\u{2225}',
            bottom: '\u{21d3}',
            font: size1,
        },
        "\\Updownarrow" => StackPieces {
            top: '\u{21d1}',
            middle: None,
            repeat: '\u{2225}',
            bottom: '\u{21d3}',
            font: size1,
        },
        _ => StackPieces {
            top: '\u{2223}',
            middle: None,
            repeat: '\u{2223}',
            bottom: '\u{2223}',
            font: size1,
        },
    }
}

fn make_glyph_span(glyph: char, font: &'static str, mode: Mode, options: &Options) -> HtmlNode {
    let size_class = if font == "Size1-Regular" {
        "delim-size1"
    } else {
        "delim-size4"
    };
    let symbol = build_common::make_symbol(
        &glyph.to_string(),
        font,
        mode,
        Some(options),
        Vec::new(),
    );
    HtmlNode::Span(make_span(
        vec!["delimsizinginner".to_string(), size_class.to_string()],
        vec![symbol.into()],
        Some(options),
        CssStyle::default(),
    ))
}

/// Assembles a delimiter from repeated glyph pieces, centered on the
/// axis when requested.
fn make_stacked_delim(
    delim: &str,
    height_total: f64,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: ClassList,
) -> DomSpan {
    let pieces = stack_pieces(delim);
    let font = pieces.font;
    let top_s = pieces.top.to_string();
    let bottom_s = pieces.bottom.to_string();
    let repeat_s = pieces.repeat.to_string();

    let (top_h, top_d) = get_metrics(&top_s, font, mode);
    let (bot_h, bot_d) = get_metrics(&bottom_s, font, mode);
    let (rep_h, rep_d) = get_metrics(&repeat_s, font, mode);
    let top_hd = top_h + top_d;
    let bottom_hd = bot_h + bot_d;
    let repeat_hd = (rep_h + rep_d).max(0.01);

    let mut middle_hd = 0.0;
    let mut middle_s = None;
    if let Some(middle) = pieces.middle {
        let s = middle.to_string();
        let (mid_h, mid_d) = get_metrics(&s, font, mode);
        middle_hd = mid_h + mid_d;
        middle_s = Some(s);
    }

    let min_height = top_hd + bottom_hd + middle_hd;
    let middle_factor = if middle_s.is_some() { 2.0 } else { 1.0 };
    let repeat_count = ((height_total - min_height) / (middle_factor * repeat_hd))
        .ceil()
        .max(0.0) as usize;
    let real_height_total = min_height + repeat_count as f64 * middle_factor * repeat_hd;

    let mut axis_height = options.font_metrics().axis_height;
    if center {
        axis_height *= options.size_multiplier();
    }
    let depth = real_height_total / 2.0 - axis_height;

    // Build from the bottom up.
    let mut children: Vec<VListChild> = Vec::new();
    children.push(VListChild::elem(make_glyph_span(
        pieces.bottom,
        font,
        mode,
        options,
    )));
    for _ in 0..repeat_count {
        children.push(VListChild::elem(make_glyph_span(
            pieces.repeat,
            font,
            mode,
            options,
        )));
    }
    if let Some(middle) = pieces.middle {
        children.push(VListChild::elem(make_glyph_span(middle, font, mode, options)));
        for _ in 0..repeat_count {
            children.push(VListChild::elem(make_glyph_span(
                pieces.repeat,
                font,
                mode,
                options,
            )));
        }
    }
    children.push(VListChild::elem(make_glyph_span(
        pieces.top,
        font,
        mode,
        options,
    )));

    let inner = make_vlist(VListParam::Bottom(depth, children), options);
    let inner_span = make_span(
        vec!["delimsizing".to_string(), "mult".to_string()],
        vec![HtmlNode::Span(inner)],
        Some(options),
        CssStyle::default(),
    );
    style_wrap(inner_span.into(), style::TEXT, options, classes)
}

const STACK_LARGE_DELIMITERS: &[&str] = &[
    "(", "\\lparen", ")", "\\rparen", "[", "\\lbrack", "]", "\\rbrack", "{", "\\{",
    "\\lbrace", "}", "\\}", "\\rbrace", "\\lfloor", "\\rfloor", "\u{230a}", "\u{230b}",
    "\\lceil", "\\rceil", "\u{2308}", "\u{2309}", "\\surd",
];

const STACK_ALWAYS_DELIMITERS: &[&str] = &[
    "\\uparrow", "\\downarrow", "\\updownarrow", "\\Uparrow", "\\Downarrow", "\\Updownarrow",
    "|", "\\|", "\\vert", "\\Vert", "\\lvert", "\\rvert", "\\lVert", "\\rVert", "\\lgroup",
    "\\rgroup", "\u{27ee}", "\u{27ef}", "\\lmoustache", "\\rmoustache", "\u{23b0}", "\u{23b1}",
];

const STACK_NEVER_DELIMITERS: &[&str] = &[
    "<", ">", "\\langle", "\\rangle", "/", "\\backslash", "\\lt", "\\gt", "\u{27e8}",
    "\u{27e9}",
];

/// Maximum height of the sized-delimiter commands `\big`..`\Bigg`.
pub const SIZE_TO_MAX_HEIGHT: [f64; 5] = [0.0, 1.2, 1.8, 2.4, 3.0];

fn normalize(delim: &str) -> &str {
    match delim {
        "<" | "\\lt" | "\u{27e8}" => "\\langle",
        ">" | "\\gt" | "\u{27e9}" => "\\rangle",
        other => other,
    }
}

/// A delimiter at one of the four fixed `\big` sizes.
pub fn sized_delim(
    delim: &str,
    size: usize,
    options: &Options,
    mode: Mode,
    classes: ClassList,
) -> Result<DomSpan, ParseError> {
    let delim = normalize(delim);
    if STACK_LARGE_DELIMITERS.contains(&delim) || STACK_NEVER_DELIMITERS.contains(&delim) {
        Ok(make_large_delim(delim, size, false, options, mode, classes))
    } else if STACK_ALWAYS_DELIMITERS.contains(&delim) {
        Ok(make_stacked_delim(
            delim,
            SIZE_TO_MAX_HEIGHT[size],
            false,
            options,
            mode,
            classes,
        ))
    } else {
        Err(ParseError::without_range(ParseErrorKind::InvalidDelimiter {
            got: delim.to_string(),
            context: "delimiter sizing",
        }))
    }
}

enum DelimVariant {
    Small(Style),
    Large(usize),
    Stack,
}

static STACK_NEVER_SEQUENCE: &[DelimVariant] = &[
    DelimVariant::Small(style::SCRIPTSCRIPT),
    DelimVariant::Small(style::SCRIPT),
    DelimVariant::Small(style::TEXT),
    DelimVariant::Large(1),
    DelimVariant::Large(2),
    DelimVariant::Large(3),
    DelimVariant::Large(4),
];

static STACK_ALWAYS_SEQUENCE: &[DelimVariant] = &[
    DelimVariant::Small(style::SCRIPTSCRIPT),
    DelimVariant::Small(style::SCRIPT),
    DelimVariant::Small(style::TEXT),
    DelimVariant::Stack,
];

static STACK_LARGE_SEQUENCE: &[DelimVariant] = &[
    DelimVariant::Small(style::SCRIPTSCRIPT),
    DelimVariant::Small(style::SCRIPT),
    DelimVariant::Small(style::TEXT),
    DelimVariant::Large(1),
    DelimVariant::Large(2),
    DelimVariant::Large(3),
    DelimVariant::Large(4),
    DelimVariant::Stack,
];

fn variant_font(variant: &DelimVariant) -> &'static str {
    match variant {
        DelimVariant::Small(_) => "Main-Regular",
        DelimVariant::Large(1) => "Size1-Regular",
        DelimVariant::Large(2) => "Size2-Regular",
        DelimVariant::Large(3) => "Size3-Regular",
        DelimVariant::Large(_) => "Size4-Regular",
        DelimVariant::Stack => "Size4-Regular",
    }
}

/// Finds the first variant in the sequence at least as tall as
/// `height`; falls back to the last entry.
fn traverse_sequence<'a>(
    delim: &str,
    height: f64,
    sequence: &'a [DelimVariant],
    options: &Options,
) -> &'a DelimVariant {
    for variant in sequence {
        if matches!(variant, DelimVariant::Stack) {
            break;
        }
        let (h, d) = get_metrics(delim, variant_font(variant), Mode::Math);
        let mut height_depth = h + d;
        if let DelimVariant::Small(style) = variant {
            let new_options = options.having_base_style(Some(*style));
            height_depth *= new_options.size_multiplier();
        }
        if height_depth > height {
            return variant;
        }
    }
    sequence.last().unwrap()
}

/// A delimiter of a given total target extent.
pub fn custom_sized_delim(
    delim: &str,
    height: f64,
    center: bool,
    options: &Options,
    mode: Mode,
    classes: ClassList,
) -> Result<DomSpan, ParseError> {
    let delim = normalize(delim);
    let sequence = if STACK_NEVER_DELIMITERS.contains(&delim) {
        STACK_NEVER_SEQUENCE
    } else if STACK_LARGE_DELIMITERS.contains(&delim) {
        STACK_LARGE_SEQUENCE
    } else if STACK_ALWAYS_DELIMITERS.contains(&delim) {
        STACK_ALWAYS_SEQUENCE
    } else {
        return Err(ParseError::without_range(ParseErrorKind::InvalidDelimiter {
            got: delim.to_string(),
            context: "delimiter sizing",
        }));
    };
    Ok(match traverse_sequence(delim, height, sequence, options) {
        DelimVariant::Small(style) => {
            make_small_delim(delim, *style, center, options, mode, classes)
        }
        DelimVariant::Large(size) => {
            make_large_delim(delim, *size, center, options, mode, classes)
        }
        DelimVariant::Stack => {
            make_stacked_delim(delim, height, center, options, mode, classes)
        }
    })
}

/// The delimiter for `\left`/`\right`/`\middle`: sized so that it
/// covers the inner extent per TeX's delimiter factor rules, centered
/// on the axis.
pub fn left_right_delim(
    delim: &str,
    height: f64,
    depth: f64,
    options: &Options,
    mode: Mode,
    classes: ClassList,
) -> Result<DomSpan, ParseError> {
    let axis_height = options.font_metrics().axis_height * options.size_multiplier();
    let delimiter_factor = 901.0;
    let delimiter_extend = 5.0 / options.font_metrics().pt_per_em;
    let max_dist_from_axis = (height - axis_height).max(depth + axis_height);
    let total_height = f64::max(
        max_dist_from_axis / 500.0 * delimiter_factor,
        2.0 * max_dist_from_axis - delimiter_extend,
    );
    custom_sized_delim(delim, total_height, true, options, mode, classes)
}

/// The result of [`sqrt_image`].
pub struct SqrtImage {
    pub span: DomSpan,
    pub advance_width: f64,
    pub rule_width: f64,
}

fn sqrt_svg(
    path_name: &str,
    span_height: f64,
    view_box_height: f64,
    extra_vinculum: f64,
    options: &Options,
) -> DomSpan {
    let path = PathNode::new(path_name, None);
    let svg = SvgNode::new(vec![SvgChildNode::Path(path)])
        .with_attribute("width", "400em")
        .with_attribute("height", make_em(span_height))
        .with_attribute(
            "viewBox",
            format!("0 0 400000 {}", view_box_height.round()),
        )
        .with_attribute("preserveAspectRatio", "xMinYMin slice");
    let mut span = make_span(
        vec!["hide-tail".to_string()],
        vec![HtmlNode::Svg(svg)],
        Some(options),
        CssStyle::default(),
    );
    span.node.style.height = Some(make_em(span_height));
    let _ = extra_vinculum;
    span
}

/// The surd for a square root, sized to cover the given height.
pub fn sqrt_image(height: f64, options: &Options) -> SqrtImage {
    let new_options = options.having_base_sizing();
    let variant = traverse_sequence(
        "\\surd",
        height * new_options.size_multiplier(),
        STACK_LARGE_SEQUENCE,
        &new_options,
    );
    let mut size_multiplier = new_options.size_multiplier() / options.size_multiplier();
    let extra_vinculum =
        (options.min_rule_thickness() - options.font_metrics().sqrt_rule_thickness).max(0.0);

    let (span, advance_width, tex_height);
    match variant {
        DelimVariant::Small(_) => {
            if height < 1.0 {
                size_multiplier = 1.0;
            } else if height < 1.4 {
                size_multiplier = 0.7;
            }
            let view_box_height = (1000.0 + 1000.0 * extra_vinculum) + 80.0;
            let span_height = (1.0 + extra_vinculum + 0.08) / size_multiplier;
            tex_height = (1.0 + extra_vinculum) / size_multiplier;
            let mut s = sqrt_svg("sqrtMain", span_height, view_box_height, extra_vinculum, options);
            s.node.style.min_width = Some("0.853em".to_string());
            span = s;
            advance_width = 0.833 / size_multiplier;
        }
        DelimVariant::Large(size) => {
            let view_box_height = (1000.0 + 1000.0 * extra_vinculum) * SIZE_TO_MAX_HEIGHT[*size]
                + 80.0;
            tex_height = (SIZE_TO_MAX_HEIGHT[*size] + extra_vinculum) / size_multiplier;
            let span_height = (SIZE_TO_MAX_HEIGHT[*size] + extra_vinculum + 0.08) / size_multiplier;
            let mut s = sqrt_svg(
                &format!("sqrtSize{size}"),
                span_height,
                view_box_height,
                extra_vinculum,
                options,
            );
            s.node.style.min_width = Some("1.02em".to_string());
            span = s;
            advance_width = 1.0 / size_multiplier;
        }
        DelimVariant::Stack => {
            size_multiplier = 1.0;
            let span_height = height + extra_vinculum + 0.08;
            tex_height = height + extra_vinculum;
            let view_box_height = (1000.0 * (height + extra_vinculum)).floor() + 80.0;
            let mut s = sqrt_svg("sqrtTall", span_height, view_box_height, extra_vinculum, options);
            s.node.style.min_width = Some("0.742em".to_string());
            span = s;
            advance_width = 1.056;
        }
    }

    let mut span = span;
    span.node.height = tex_height;
    SqrtImage {
        span,
        advance_width,
        rule_width: (options.font_metrics().sqrt_rule_thickness + extra_vinculum)
            * size_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_tree::WithHtmlDomNode;
    use crate::settings::Settings;

    fn options() -> Options {
        Options::from_settings(&Settings::default())
    }

    #[test]
    fn selection_is_monotone() {
        let options = options();
        let mut last = 0.0;
        for target in [0.5, 0.9, 1.3, 1.9, 2.5, 3.1, 4.5, 8.0] {
            let span =
                custom_sized_delim("(", target, true, &options, Mode::Math, vec![]).unwrap();
            let extent = span.node().height + span.node().depth;
            assert!(
                extent + 1e-9 >= last,
                "extent shrank from {last} to {extent} at target {target}"
            );
            last = extent;
        }
    }

    #[test]
    fn sized_delims_grow_with_size() {
        let options = options();
        let mut last = 0.0;
        for size in 1..=4 {
            let span = sized_delim("(", size, &options, Mode::Math, vec![]).unwrap();
            let extent = span.node().height + span.node().depth;
            assert!(extent > last);
            last = extent;
        }
    }

    #[test]
    fn illegal_delimiter_is_an_error() {
        let options = options();
        let err = sized_delim("x", 1, &options, Mode::Math, vec![]).unwrap_err();
        assert!(matches!(err.1, ParseErrorKind::InvalidDelimiter { .. }));
    }

    #[test]
    fn left_right_covers_inner_extent() {
        let options = options();
        // A 2em-tall inner box must get a delimiter bigger than \big.
        let span =
            left_right_delim("(", 1.2, 0.8, &options, Mode::Math, vec![]).unwrap();
        let extent = span.node().height + span.node().depth;
        assert!(extent >= 1.8);
    }
}
