//! Shared primitives for the visual builder: symbol construction, span
//! and fragment assembly, vertical lists, and glue.

use crate::dom_tree::{
    Anchor, ClassList, CssStyle, DocumentFragment, DomSpan, HtmlNode, PathNode, SvgChildNode,
    SvgNode, SymbolNode, WithHtmlDomNode,
};
use crate::font_metrics::{CharacterMetrics, get_character_metrics};
use crate::options::{FontShape, FontWeight, Options};
use crate::parse_node::ParseNode;
use crate::symbols::{self, LIGATURES};
use crate::types::Mode;
use crate::unicode_scripts::script_from_codepoint;
use crate::unit::{Measurement, calculate_size, make_em};

pub(crate) struct LookupSymbol {
    pub value: String,
    pub metrics: Option<CharacterMetrics>,
}

/// Resolves a symbol name to its replacement character and metrics.
pub(crate) fn lookup_symbol(value: &str, font: &str, mode: Mode) -> LookupSymbol {
    let value = symbols::get_symbol(mode, value)
        .and_then(|sym| sym.replace)
        .map(String::from)
        .unwrap_or_else(|| value.to_string());
    let metrics = value
        .chars()
        .next()
        .and_then(|c| get_character_metrics(c, font, mode));
    LookupSymbol { value, metrics }
}

/// Makes a Symbol box in the given font, applying the options' color,
/// tightness, and size bookkeeping.
pub(crate) fn make_symbol(
    value: &str,
    font: &str,
    mode: Mode,
    options: Option<&Options>,
    classes: ClassList,
) -> SymbolNode {
    let LookupSymbol { value, metrics } = lookup_symbol(value, font, mode);

    let mut symbol_node = if let Some(metrics) = metrics {
        let italic = if mode == Mode::Text || options.map(|o| o.font == "mathit").unwrap_or(false)
        {
            metrics.italic
        } else {
            0.0
        };
        SymbolNode::new(
            value.clone(),
            metrics.height,
            metrics.depth,
            italic,
            metrics.skew,
            metrics.width,
            classes,
            CssStyle::default(),
        )
    } else {
        log::warn!("No character metrics for '{value}' in style '{font}' and mode {mode:?}");
        SymbolNode::new_text_classes(value.clone(), classes)
    };

    if let Some(first) = value.chars().next()
        && let Some(script) = script_from_codepoint(first)
        && script != "latin"
    {
        symbol_node.node.classes.push(format!("{script}_fallback"));
    }

    if let Some(options) = options {
        symbol_node.node.max_font_size = options.size_multiplier();
        if options.style().is_tight() {
            symbol_node.node.classes.push("mtight".to_string());
        }
        if let Some(color) = options.color() {
            symbol_node.node.style.color = Some(color.to_string());
        }
    }

    symbol_node
}

/// Makes a symbol in Main-Regular or AMS-Regular. Used for rel, bin,
/// open, close, inner, and punct atoms.
pub(crate) fn math_sym(
    value: &str,
    mode: Mode,
    options: &Options,
    classes: ClassList,
) -> SymbolNode {
    if options.font == "boldsymbol"
        && lookup_symbol(value, "Main-Bold", mode).metrics.is_some()
    {
        let mut classes = classes;
        classes.push("mathbf".to_string());
        make_symbol(value, "Main-Bold", mode, Some(options), classes)
    } else if value == "\\"
        || symbols::get_symbol(mode, value).map(|s| s.font) == Some(symbols::Font::Main)
    {
        make_symbol(value, "Main-Regular", mode, Some(options), classes)
    } else {
        make_symbol(value, "AMS-Regular", mode, Some(options), classes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrdType {
    MathOrd,
    TextOrd,
}

struct BoldSymbolInfo {
    font: &'static str,
    font_class: &'static str,
}

fn bold_symbol(value: &str, mode: Mode, typ: OrdType) -> BoldSymbolInfo {
    if typ != OrdType::TextOrd
        && lookup_symbol(value, "Math-BoldItalic", mode).metrics.is_some()
    {
        BoldSymbolInfo {
            font: "Math-BoldItalic",
            font_class: "boldsymbol",
        }
    } else {
        // Some glyphs do not exist in Math-BoldItalic, so we use
        // Main-Bold for them.
        BoldSymbolInfo {
            font: "Main-Bold",
            font_class: "mathbf",
        }
    }
}

/// Makes either a mathord or a textord in the correct font and color.
pub(crate) fn make_ord(group: &ParseNode, options: &Options, typ: OrdType) -> HtmlNode {
    let mode = group.mode();
    let text = group.text().expect("make_ord requires a symbol node");

    let classes = vec!["mord".to_string()];

    let is_font = mode == Mode::Math || (mode == Mode::Text && !options.font.is_empty());
    let font_or_family = if is_font {
        &options.font
    } else {
        &options.font_family
    };

    if !font_or_family.is_empty() {
        let (font_name, font_classes): (String, Vec<String>) = if font_or_family.as_str()
            == "boldsymbol"
        {
            let font_data = bold_symbol(text, mode, typ);
            (
                font_data.font.to_string(),
                vec![font_data.font_class.to_string()],
            )
        } else if is_font {
            match font_map_lookup(font_or_family) {
                Some(data) => (data.font.to_string(), vec![font_or_family.clone()]),
                None => (String::new(), Vec::new()),
            }
        } else {
            let name =
                retrieve_text_font_name(font_or_family, options.font_weight, options.font_shape);
            (
                name,
                vec![
                    font_or_family.clone(),
                    options
                        .font_weight
                        .map(FontWeight::as_str)
                        .unwrap_or("")
                        .to_string(),
                    options
                        .font_shape
                        .map(FontShape::as_str)
                        .unwrap_or("")
                        .to_string(),
                ],
            )
        };

        if !font_name.is_empty() {
            if lookup_symbol(text, &font_name, mode).metrics.is_some() {
                let classes: ClassList = classes.iter().cloned().chain(font_classes).collect();
                return make_symbol(text, &font_name, mode, Some(options), classes).into();
            } else if LIGATURES.contains(&text) && font_name.starts_with("Typewriter") {
                // Deconstruct ligatures in monospace fonts.
                let classes: ClassList = classes.iter().cloned().chain(font_classes).collect();
                let parts: Vec<HtmlNode> = text
                    .chars()
                    .map(|c| {
                        make_symbol(
                            &c.to_string(),
                            &font_name,
                            mode,
                            Some(options),
                            classes.clone(),
                        )
                        .into()
                    })
                    .collect();
                return make_fragment(parts).into();
            }
        }
    }

    match typ {
        OrdType::MathOrd => {
            let classes: ClassList = classes
                .into_iter()
                .chain(["mathnormal".to_string()])
                .collect();
            make_symbol(text, "Math-Italic", mode, Some(options), classes).into()
        }
        OrdType::TextOrd => {
            let font = symbols::get_symbol(mode, text).map(|s| s.font);
            match font {
                Some(symbols::Font::Ams) => {
                    let font_name =
                        retrieve_text_font_name("amsrm", options.font_weight, options.font_shape);
                    let classes: ClassList = classes
                        .into_iter()
                        .chain(["amsrm".to_string()])
                        .collect();
                    make_symbol(text, &font_name, mode, Some(options), classes).into()
                }
                Some(symbols::Font::Main) | None => {
                    let font_name =
                        retrieve_text_font_name("textrm", options.font_weight, options.font_shape);
                    make_symbol(text, &font_name, mode, Some(options), classes).into()
                }
            }
        }
    }
}

fn classes_equivalent(left: &ClassList, right: &ClassList) -> bool {
    let left = left.iter().filter(|c| !c.is_empty());
    let right = right.iter().filter(|c| !c.is_empty());
    left.eq(right)
}

fn can_combine(prev: &SymbolNode, next: &SymbolNode) -> bool {
    if !classes_equivalent(&prev.node.classes, &next.node.classes)
        || prev.skew != next.skew
        || prev.node.max_font_size != next.node.max_font_size
    {
        return false;
    }
    // Keep single-class mbin/mord runs apart so spacing stays visible
    // to the later passes.
    if prev.node.classes.len() == 1 {
        let class = &prev.node.classes[0];
        if class == "mbin" || class == "mord" {
            return false;
        }
    }
    prev.node.style == next.node.style
}

/// Combines adjacent identical-styling symbol nodes into single text
/// runs to keep the output small.
pub(crate) fn try_combine_chars(chars: &mut Vec<HtmlNode>) {
    let mut i = 0;
    while i + 1 < chars.len() {
        let (left, right) = chars.split_at_mut(i + 1);
        let (HtmlNode::Symbol(prev), HtmlNode::Symbol(next)) = (&mut left[i], &right[0]) else {
            i += 1;
            continue;
        };
        if !can_combine(prev, next) {
            i += 1;
            continue;
        }
        prev.text.push_str(&next.text);
        prev.node.height = prev.node.height.max(next.node.height);
        prev.node.depth = prev.node.depth.max(next.node.depth);
        // The last character's italic correction pads the right of the
        // combined run.
        prev.italic = next.italic;
        chars.remove(i + 1);
    }
}

fn size_element_for_children<T: WithHtmlDomNode>(
    node: &mut crate::dom_tree::HtmlDomNode,
    children: &[T],
) {
    let mut height: f64 = 0.0;
    let mut depth: f64 = 0.0;
    let mut max_font_size: f64 = 0.0;
    for child in children {
        let child_node = child.node();
        height = height.max(child_node.height);
        depth = depth.max(child_node.depth);
        max_font_size = max_font_size.max(child_node.max_font_size);
    }
    node.height = height;
    node.depth = depth;
    node.max_font_size = max_font_size;
}

/// Makes a span sized to its children.
pub(crate) fn make_span(
    classes: ClassList,
    children: Vec<HtmlNode>,
    options: Option<&Options>,
    style: CssStyle,
) -> DomSpan {
    let mut span = DomSpan::new(classes, children, options, style);
    size_element_for_children(&mut span.node, &span.children);
    span
}

pub(crate) fn make_span_s(classes: ClassList, children: Vec<HtmlNode>) -> DomSpan {
    make_span(classes, children, None, CssStyle::default())
}

pub(crate) fn make_empty_span(classes: ClassList) -> DomSpan {
    DomSpan::new(classes, Vec::new(), None, CssStyle::default())
}

/// A horizontal line such as a fraction bar or overline.
pub(crate) fn make_line_span(
    class_name: &str,
    options: &Options,
    thickness: Option<f64>,
) -> DomSpan {
    let mut line = make_span(
        vec![class_name.to_string()],
        Vec::new(),
        Some(options),
        CssStyle::default(),
    );
    line.node.height = thickness
        .unwrap_or(options.font_metrics().default_rule_thickness)
        .max(options.min_rule_thickness());
    line.node.style.border_bottom_width = Some(make_em(line.node.height));
    line.node.max_font_size = 1.0;
    line
}

pub(crate) fn make_anchor(
    href: String,
    classes: ClassList,
    children: Vec<HtmlNode>,
    options: &Options,
) -> Anchor<HtmlNode> {
    let mut anchor = Anchor::new(href, classes, children, options);
    size_element_for_children(&mut anchor.node, &anchor.children);
    anchor
}

pub(crate) fn make_fragment(children: Vec<HtmlNode>) -> DocumentFragment<HtmlNode> {
    let mut fragment = DocumentFragment::new(children);
    size_element_for_children(&mut fragment.node, &fragment.children);
    fragment
}

/// The empty delimiter slot of a fraction or array.
pub(crate) fn make_null_delimiter(options: &Options, mut classes: ClassList) -> DomSpan {
    classes.push("nulldelimiter".to_string());
    classes.extend(options.base_sizing_classes());
    make_empty_span(classes)
}

#[derive(Debug, Clone)]
pub(crate) struct VListElem {
    pub elem: HtmlNode,
    pub margin_left: Option<String>,
    pub margin_right: Option<String>,
    pub wrapper_classes: ClassList,
    pub wrapper_style: CssStyle,
}

impl VListElem {
    pub fn new(elem: HtmlNode) -> VListElem {
        VListElem {
            elem,
            margin_left: None,
            margin_right: None,
            wrapper_classes: ClassList::new(),
            wrapper_style: CssStyle::default(),
        }
    }

    pub fn with_margin_left(elem: HtmlNode, margin_left: String) -> VListElem {
        VListElem {
            margin_left: Some(margin_left),
            ..VListElem::new(elem)
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum VListChild {
    Elem(VListElem),
    /// A fixed vertical gap, in em.
    Kern(f64),
}

impl VListChild {
    pub fn elem(node: HtmlNode) -> VListChild {
        VListChild::Elem(VListElem::new(node))
    }
}

/// The positioning methods for [`make_vlist`].
pub(crate) enum VListParam {
    /// Each child carries how far it is shifted *down* from the
    /// baseline.
    IndividualShift(Vec<(VListElem, f64)>),
    /// `amount` is the topmost point of the vlist.
    Top(f64, Vec<VListChild>),
    /// `amount` is the bottommost point of the vlist.
    Bottom(f64, Vec<VListChild>),
    /// The first child's baseline sits `amount` below the vlist
    /// baseline; the first child must be an element.
    Shift(f64, Vec<VListChild>),
    /// Baseline aligned with the first child, which must be an element.
    FirstBaseline(Vec<VListChild>),
}

impl VListParam {
    /// Normalizes to a child list plus the depth of the bottom edge
    /// below the baseline.
    fn into_children_and_depth(self) -> (Vec<VListChild>, f64) {
        match self {
            VListParam::IndividualShift(children) => {
                let mut out = Vec::with_capacity(children.len() * 2);
                let first_shift = children[0].1;
                let depth = -first_shift - children[0].0.elem.node().depth;
                let mut curr_pos = depth;
                let mut prev_height = 0.0;
                let mut prev_depth = 0.0;
                for (i, (elem, shift)) in children.into_iter().enumerate() {
                    let height = elem.elem.node().height;
                    let elem_depth = elem.elem.node().depth;
                    if i == 0 {
                        out.push(VListChild::Elem(elem));
                    } else {
                        let diff = -shift - curr_pos - elem_depth;
                        let size = diff - (prev_height + prev_depth);
                        curr_pos += diff;
                        out.push(VListChild::Kern(size));
                        out.push(VListChild::Elem(elem));
                    }
                    prev_height = height;
                    prev_depth = elem_depth;
                }
                (out, depth)
            }
            VListParam::Top(amount, children) => {
                let mut bottom = amount;
                for child in &children {
                    bottom -= match child {
                        VListChild::Elem(elem) => {
                            elem.elem.node().height + elem.elem.node().depth
                        }
                        VListChild::Kern(size) => *size,
                    };
                }
                (children, bottom)
            }
            VListParam::Bottom(amount, children) => (children, -amount),
            VListParam::Shift(amount, children) => {
                let first = match &children[0] {
                    VListChild::Elem(elem) => elem,
                    VListChild::Kern(_) => panic!("First child must have type 'elem'"),
                };
                let depth = -first.elem.node().depth - amount;
                (children, depth)
            }
            VListParam::FirstBaseline(children) => {
                let first = match &children[0] {
                    VListChild::Elem(elem) => elem,
                    VListChild::Kern(_) => panic!("First child must have type 'elem'"),
                };
                let depth = -first.elem.node().depth;
                (children, depth)
            }
        }
    }
}

/// Stacks boxes vertically with per-child baseline shifts.
///
/// Each child gets an invisible "pstrut" that pins its baseline inside
/// its line box; the container reports the extrema of the positioned
/// children as its height and depth.
pub(crate) fn make_vlist(params: VListParam, _options: &Options) -> DomSpan {
    let (children, depth) = params.into_children_and_depth();

    // The strut must be taller than any list item.
    let mut pstrut_size: f64 = 0.0;
    for child in &children {
        if let VListChild::Elem(elem) = child {
            let node = elem.elem.node();
            pstrut_size = pstrut_size.max(node.max_font_size).max(node.height);
        }
    }
    pstrut_size += 2.0;

    let mut pstrut = make_empty_span(vec!["pstrut".to_string()]);
    pstrut.node.style.height = Some(make_em(pstrut_size));

    let mut real_children: Vec<HtmlNode> = Vec::new();
    let mut min_pos = depth;
    let mut max_pos = depth;
    let mut curr_pos = depth;
    for child in children {
        match child {
            VListChild::Kern(size) => {
                curr_pos += size;
            }
            VListChild::Elem(elem) => {
                let VListElem {
                    elem: inner,
                    margin_left,
                    margin_right,
                    wrapper_classes,
                    wrapper_style,
                } = elem;
                let i_height = inner.node().height;
                let i_depth = inner.node().depth;

                let mut child_wrap = make_span(
                    wrapper_classes,
                    vec![HtmlNode::Span(pstrut.clone()), inner],
                    None,
                    wrapper_style,
                );
                child_wrap.node.style.top = Some(make_em(-pstrut_size - curr_pos - i_depth));
                if let Some(margin_left) = margin_left {
                    child_wrap.node.style.margin_left = Some(margin_left);
                }
                if let Some(margin_right) = margin_right {
                    child_wrap.node.style.margin_right = Some(margin_right);
                }
                real_children.push(HtmlNode::Span(child_wrap));
                curr_pos += i_height + i_depth;
            }
        }
        min_pos = min_pos.min(curr_pos);
        max_pos = max_pos.max(curr_pos);
    }

    // The vlist contents go in a table-cell with vertical-align:bottom;
    // its bottom edge determines the table's baseline.
    let mut vlist = make_span_s(vec!["vlist".to_string()], real_children);
    vlist.node.style.height = Some(make_em(max_pos));

    let rows: Vec<HtmlNode> = if min_pos < 0.0 {
        // An empty span inside the depth strut keeps contenteditable
        // renderers from giving it a text min-height.
        let empty = make_empty_span(ClassList::new());
        let mut depth_strut =
            make_span_s(vec!["vlist".to_string()], vec![HtmlNode::Span(empty)]);
        depth_strut.node.style.height = Some(make_em(-min_pos));

        // The first row needs inline content to keep the baseline on it.
        let zwspace = SymbolNode::new_text("\u{200b}".to_string());
        let top_strut = make_span_s(
            vec!["vlist-s".to_string()],
            vec![HtmlNode::Symbol(zwspace)],
        );

        vec![
            HtmlNode::Span(make_span_s(
                vec!["vlist-r".to_string()],
                vec![HtmlNode::Span(vlist), HtmlNode::Span(top_strut)],
            )),
            HtmlNode::Span(make_span_s(
                vec!["vlist-r".to_string()],
                vec![HtmlNode::Span(depth_strut)],
            )),
        ]
    } else {
        vec![HtmlNode::Span(make_span_s(
            vec!["vlist-r".to_string()],
            vec![HtmlNode::Span(vlist)],
        ))]
    };

    let two_rows = rows.len() == 2;
    let mut vtable = make_span_s(vec!["vlist-t".to_string()], rows);
    if two_rows {
        vtable.node.classes.push("vlist-t2".to_string());
    }
    vtable.node.height = max_pos;
    vtable.node.depth = -min_pos;
    vtable
}

/// A fixed horizontal space between elements.
pub(crate) fn make_glue(measurement: Measurement, options: &Options) -> DomSpan {
    let mut rule = make_span(
        vec!["mspace".to_string()],
        Vec::new(),
        Some(options),
        CssStyle::default(),
    );
    let size = calculate_size(&measurement, options);
    rule.node.style.margin_right = Some(make_em(size));
    rule
}

/// Takes text font options and returns the font lookup name.
fn retrieve_text_font_name(
    font_family: &str,
    font_weight: Option<FontWeight>,
    font_shape: Option<FontShape>,
) -> String {
    let base_font_name = match font_family {
        "amsrm" => "AMS",
        "textrm" => "Main",
        "textsf" => "SansSerif",
        "texttt" => "Typewriter",
        other => other,
    };
    let font_styles_name = if font_weight == Some(FontWeight::TextBf)
        && font_shape == Some(FontShape::TextIt)
    {
        "BoldItalic"
    } else if font_weight == Some(FontWeight::TextBf) {
        "Bold"
    } else if font_shape == Some(FontShape::TextIt) {
        "Italic"
    } else {
        "Regular"
    };
    format!("{base_font_name}-{font_styles_name}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FontVariant {
    Bold,
    BoldItalic,
    Italic,
    Normal,
    DoubleStruck,
    Fraktur,
    Script,
    SansSerif,
    Monospace,
}

impl FontVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            FontVariant::Bold => "bold",
            FontVariant::BoldItalic => "bold-italic",
            FontVariant::Italic => "italic",
            FontVariant::Normal => "normal",
            FontVariant::DoubleStruck => "double-struck",
            FontVariant::Fraktur => "fraktur",
            FontVariant::Script => "script",
            FontVariant::SansSerif => "sans-serif",
            FontVariant::Monospace => "monospace",
        }
    }
}

pub(crate) struct FontData {
    pub variant: FontVariant,
    pub font: &'static str,
}

/// Math font command to font file and MathML variant.
pub(crate) fn font_map_lookup(font: &str) -> Option<FontData> {
    Some(match font {
        "mathbf" => FontData {
            variant: FontVariant::Bold,
            font: "Main-Bold",
        },
        "mathrm" => FontData {
            variant: FontVariant::Normal,
            font: "Main-Regular",
        },
        "textit" => FontData {
            variant: FontVariant::Italic,
            font: "Main-Italic",
        },
        "mathit" => FontData {
            variant: FontVariant::Italic,
            font: "Main-Italic",
        },
        "mathnormal" => FontData {
            variant: FontVariant::Italic,
            font: "Math-Italic",
        },
        // boldsymbol requires two fonts and is special-cased in
        // make_ord.
        "mathbb" => FontData {
            variant: FontVariant::DoubleStruck,
            font: "AMS-Regular",
        },
        "mathcal" => FontData {
            variant: FontVariant::Script,
            font: "Caligraphic-Regular",
        },
        "mathfrak" => FontData {
            variant: FontVariant::Fraktur,
            font: "Fraktur-Regular",
        },
        "mathscr" => FontData {
            variant: FontVariant::Script,
            font: "Script-Regular",
        },
        "mathsf" => FontData {
            variant: FontVariant::SansSerif,
            font: "SansSerif-Regular",
        },
        "mathtt" => FontData {
            variant: FontVariant::Monospace,
            font: "Typewriter-Regular",
        },
        _ => return None,
    })
}

/// Creates an overlay span with a statically sized inline SVG, used for
/// the non-stretchy SVG accents like `\vec`.
pub(crate) fn static_svg(value: &str, options: &Options) -> DomSpan {
    let (path_name, width, height) = match value {
        "vec" => ("vec", 0.471, 0.714),
        other => {
            log::warn!("Unknown static svg '{other}'");
            ("vec", 0.471, 0.714)
        }
    };
    let width_s = make_em(width);
    let height_s = make_em(height);
    let path = PathNode::new(path_name, None);
    let svg_node = SvgNode::new(vec![SvgChildNode::Path(path)])
        .with_attribute("width", width_s.clone())
        .with_attribute("height", height_s.clone())
        // Override the stylesheet rule that makes svg fill its span.
        .with_attribute("style", format!("width:{width_s}"))
        .with_attribute(
            "viewBox",
            format!("0 0 {} {}", width * 1000.0, height * 1000.0),
        )
        .with_attribute("preserveAspectRatio", "xMinYMin");
    let mut span = make_span(
        vec!["overlay".to_string()],
        vec![HtmlNode::Svg(svg_node)],
        Some(options),
        CssStyle::default(),
    );
    span.node.height = height;
    span.node.style.height = Some(height_s);
    span.node.style.width = Some(width_s);
    span
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn options() -> Options {
        Options::from_settings(&Settings::default())
    }

    #[test]
    fn span_takes_extrema_of_children() {
        let options = options();
        let a = make_symbol("a", "Main-Regular", Mode::Math, Some(&options), vec![]);
        let y = make_symbol("y", "Main-Regular", Mode::Math, Some(&options), vec![]);
        let span = make_span_s(vec![], vec![a.into(), y.into()]);
        assert!((span.node.height - 0.43056).abs() < 1e-9);
        assert!((span.node.depth - 0.19444).abs() < 1e-9);
    }

    #[test]
    fn vlist_extents_match_positions() {
        let options = options();
        let a: HtmlNode =
            make_symbol("a", "Main-Regular", Mode::Math, Some(&options), vec![]).into();
        let b: HtmlNode =
            make_symbol("b", "Main-Regular", Mode::Math, Some(&options), vec![]).into();
        // b sits 1em above the baseline, a on the baseline.
        let vlist = make_vlist(
            VListParam::IndividualShift(vec![
                (VListElem::new(a), 0.0),
                (VListElem::new(b), -1.0),
            ]),
            &options,
        );
        assert!((vlist.node.height - (1.0 + 0.69444)).abs() < 1e-9);
        assert!((vlist.node.depth - 0.0).abs() < 1e-9);
    }

    #[test]
    fn glue_width_is_css_margin() {
        let options = options();
        let glue = make_glue(Measurement::em(0.25), &options);
        assert_eq!(glue.node.style.margin_right.as_deref(), Some("0.25em"));
        assert!(glue.node.has_class("mspace"));
    }

    #[test]
    fn combine_only_identical_runs() {
        let options = options();
        let mk = |c: &str| -> HtmlNode {
            make_symbol(
                c,
                "Main-Regular",
                Mode::Text,
                Some(&options),
                vec!["mord".to_string(), "text".to_string()],
            )
            .into()
        };
        let mut chars = vec![mk("a"), mk("b"), mk("c")];
        try_combine_chars(&mut chars);
        assert_eq!(chars.len(), 1);
        match &chars[0] {
            HtmlNode::Symbol(sym) => assert_eq!(sym.text, "abc"),
            other => panic!("expected symbol, got {other:?}"),
        }
    }
}
