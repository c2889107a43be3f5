//! The visual output tree.
//!
//! Every variant exposes the common record (classes, height, depth,
//! maxFontSize, inline style) through [`WithHtmlDomNode`]. Markup
//! serialization lives here too; it always produces valid HTML:
//! attribute values are double-quote escaped, text content is entity
//! escaped, and void elements self-close.

use std::fmt::Write;

use crate::options::Options;
use crate::unit::make_em;

pub type ClassList = Vec<String>;

/// Inline CSS, as typed properties so serialization stays in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssStyle {
    pub background_color: Option<String>,
    pub border_bottom_width: Option<String>,
    pub border_color: Option<String>,
    pub border_right_width: Option<String>,
    pub border_top_width: Option<String>,
    pub border_style: Option<String>,
    pub border_width: Option<String>,
    pub bottom: Option<String>,
    pub color: Option<String>,
    pub height: Option<String>,
    pub left: Option<String>,
    pub margin_left: Option<String>,
    pub margin_right: Option<String>,
    pub margin_top: Option<String>,
    pub min_width: Option<String>,
    pub padding_left: Option<String>,
    pub position: Option<String>,
    pub top: Option<String>,
    pub width: Option<String>,
    pub vertical_align: Option<String>,
}

impl CssStyle {
    fn props(&self) -> [(&'static str, Option<&String>); 20] {
        [
            ("background-color", self.background_color.as_ref()),
            ("border-bottom-width", self.border_bottom_width.as_ref()),
            ("border-color", self.border_color.as_ref()),
            ("border-right-width", self.border_right_width.as_ref()),
            ("border-top-width", self.border_top_width.as_ref()),
            ("border-style", self.border_style.as_ref()),
            ("border-width", self.border_width.as_ref()),
            ("bottom", self.bottom.as_ref()),
            ("color", self.color.as_ref()),
            ("height", self.height.as_ref()),
            ("left", self.left.as_ref()),
            ("margin-left", self.margin_left.as_ref()),
            ("margin-right", self.margin_right.as_ref()),
            ("margin-top", self.margin_top.as_ref()),
            ("min-width", self.min_width.as_ref()),
            ("padding-left", self.padding_left.as_ref()),
            ("position", self.position.as_ref()),
            ("top", self.top.as_ref()),
            ("width", self.width.as_ref()),
            ("vertical-align", self.vertical_align.as_ref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.props().iter().all(|(_, v)| v.is_none())
    }

    fn write_css(&self, out: &mut String) {
        for (name, value) in self.props() {
            if let Some(value) = value {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
                out.push(';');
            }
        }
    }
}

/// Escapes text content for element bodies.
pub fn escape_html_content(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Escapes text for a double-quoted attribute value.
pub fn escape_attribute(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// The record every visual node exposes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlDomNode {
    pub classes: ClassList,
    pub height: f64,
    pub depth: f64,
    pub max_font_size: f64,
    pub style: CssStyle,
}

impl HtmlDomNode {
    pub fn new(classes: ClassList, options: Option<&Options>, style: CssStyle) -> Self {
        let mut node = HtmlDomNode {
            classes,
            height: 0.0,
            depth: 0.0,
            max_font_size: 0.0,
            style,
        };
        if let Some(options) = options {
            if options.style().is_tight() {
                node.classes.push("mtight".to_string());
            }
            if let Some(color) = options.color() {
                node.style.color = Some(color.to_string());
            }
        }
        node
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn write_class_attr(&self, out: &mut String) {
        let mut first = true;
        for class in self.classes.iter().filter(|c| !c.is_empty()) {
            if first {
                out.push_str(" class=\"");
                first = false;
            } else {
                out.push(' ');
            }
            escape_attribute(out, class);
        }
        if !first {
            out.push('"');
        }
    }

    fn write_style_attr(&self, out: &mut String) {
        if self.style.is_empty() {
            return;
        }
        let mut css = String::new();
        self.style.write_css(&mut css);
        out.push_str(" style=\"");
        escape_attribute(out, &css);
        out.push('"');
    }
}

pub trait WithHtmlDomNode {
    fn node(&self) -> &HtmlDomNode;
    fn node_mut(&mut self) -> &mut HtmlDomNode;
}

/// Ordered attribute list. The `class` and `style` attributes are
/// computed from the node record and cannot be overridden here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        debug_assert!(
            key != "class" && key != "style",
            "class/style are computed attributes"
        );
        if key == "class" || key == "style" {
            return;
        }
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn write_markup(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_attribute(out, value);
            out.push('"');
        }
    }
}

/// A generic container rendered as `<span>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Span<T> {
    pub node: HtmlDomNode,
    pub children: Vec<T>,
    pub attributes: Attributes,
}

pub type DomSpan = Span<HtmlNode>;

impl<T> Span<T> {
    pub fn new(
        classes: ClassList,
        children: Vec<T>,
        options: Option<&Options>,
        style: CssStyle,
    ) -> Self {
        Span {
            node: HtmlDomNode::new(classes, options, style),
            children,
            attributes: Attributes::default(),
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key, value);
    }
}

impl<T> WithHtmlDomNode for Span<T> {
    fn node(&self) -> &HtmlDomNode {
        &self.node
    }
    fn node_mut(&mut self) -> &mut HtmlDomNode {
        &mut self.node
    }
}

/// Like [`Span`] but renders as `<a href=…>`; transparent to atom-class
/// cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor<T> {
    pub node: HtmlDomNode,
    pub children: Vec<T>,
    pub attributes: Attributes,
}

impl<T> Anchor<T> {
    pub fn new(href: String, classes: ClassList, children: Vec<T>, options: &Options) -> Self {
        let mut attributes = Attributes::default();
        attributes.insert("href", href);
        Anchor {
            node: HtmlDomNode::new(classes, Some(options), CssStyle::default()),
            children,
            attributes,
        }
    }
}

impl<T> WithHtmlDomNode for Anchor<T> {
    fn node(&self) -> &HtmlDomNode {
        &self.node
    }
    fn node_mut(&mut self) -> &mut HtmlDomNode {
        &mut self.node
    }
}

/// A single text run.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolNode {
    pub node: HtmlDomNode,
    pub text: String,
    pub italic: f64,
    pub skew: f64,
    pub width: f64,
}

impl SymbolNode {
    pub fn new(
        text: String,
        height: f64,
        depth: f64,
        italic: f64,
        skew: f64,
        width: f64,
        classes: ClassList,
        style: CssStyle,
    ) -> Self {
        let mut node = HtmlDomNode::new(classes, None, style);
        node.height = height;
        node.depth = depth;
        SymbolNode {
            node,
            text,
            italic,
            skew,
            width,
        }
    }

    pub fn new_text(text: String) -> Self {
        SymbolNode::new(
            text,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            ClassList::new(),
            CssStyle::default(),
        )
    }

    pub fn new_text_classes(text: String, classes: ClassList) -> Self {
        SymbolNode::new(text, 0.0, 0.0, 0.0, 0.0, 0.0, classes, CssStyle::default())
    }
}

impl WithHtmlDomNode for SymbolNode {
    fn node(&self) -> &HtmlDomNode {
        &self.node
    }
    fn node_mut(&mut self) -> &mut HtmlDomNode {
        &mut self.node
    }
}

/// A raster image leaf (`\includegraphics`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImgNode {
    pub node: HtmlDomNode,
    pub src: String,
    pub alt: String,
}

impl ImgNode {
    pub fn new(src: String, alt: String, style: CssStyle) -> Self {
        let mut node = HtmlDomNode::new(vec!["mord".to_string()], None, style);
        node.max_font_size = 1.0;
        ImgNode { node, src, alt }
    }
}

impl WithHtmlDomNode for ImgNode {
    fn node(&self) -> &HtmlDomNode {
        &self.node
    }
    fn node_mut(&mut self) -> &mut HtmlDomNode {
        &mut self.node
    }
}

/// An inline SVG subtree; children are SVG-only, so HTML leaves can
/// never end up inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgNode {
    pub node: HtmlDomNode,
    pub children: Vec<SvgChildNode>,
    pub attributes: Attributes,
}

impl SvgNode {
    pub fn new(children: Vec<SvgChildNode>) -> Self {
        SvgNode {
            node: HtmlDomNode::default(),
            children,
            attributes: Attributes::default(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

impl WithHtmlDomNode for SvgNode {
    fn node(&self) -> &HtmlDomNode {
        &self.node
    }
    fn node_mut(&mut self) -> &mut HtmlDomNode {
        &mut self.node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SvgChildNode {
    Path(PathNode),
    Line(LineNode),
}

/// An SVG path, either named from the geometry table or given inline.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub path_name: String,
    pub alternate: Option<String>,
}

impl PathNode {
    pub fn new(path_name: impl Into<String>, alternate: Option<String>) -> Self {
        PathNode {
            path_name: path_name.into(),
            alternate,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineNode {
    pub attributes: Attributes,
}

/// An ordered list of children with no container of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFragment<T> {
    pub node: HtmlDomNode,
    pub children: Vec<T>,
}

impl<T> DocumentFragment<T> {
    pub fn new(children: Vec<T>) -> Self {
        DocumentFragment {
            node: HtmlDomNode::default(),
            children,
        }
    }
}

impl<T> WithHtmlDomNode for DocumentFragment<T> {
    fn node(&self) -> &HtmlDomNode {
        &self.node
    }
    fn node_mut(&mut self) -> &mut HtmlDomNode {
        &mut self.node
    }
}

/// The closed set of visual nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Span(Span<HtmlNode>),
    Anchor(Anchor<HtmlNode>),
    Symbol(SymbolNode),
    Svg(SvgNode),
    Img(ImgNode),
    Fragment(DocumentFragment<HtmlNode>),
}

impl WithHtmlDomNode for HtmlNode {
    fn node(&self) -> &HtmlDomNode {
        match self {
            HtmlNode::Span(span) => span.node(),
            HtmlNode::Anchor(anchor) => anchor.node(),
            HtmlNode::Symbol(symbol) => symbol.node(),
            HtmlNode::Svg(svg) => svg.node(),
            HtmlNode::Img(img) => img.node(),
            HtmlNode::Fragment(fragment) => fragment.node(),
        }
    }

    fn node_mut(&mut self) -> &mut HtmlDomNode {
        match self {
            HtmlNode::Span(span) => span.node_mut(),
            HtmlNode::Anchor(anchor) => anchor.node_mut(),
            HtmlNode::Symbol(symbol) => symbol.node_mut(),
            HtmlNode::Svg(svg) => svg.node_mut(),
            HtmlNode::Img(img) => img.node_mut(),
            HtmlNode::Fragment(fragment) => fragment.node_mut(),
        }
    }
}

impl From<Span<HtmlNode>> for HtmlNode {
    fn from(span: Span<HtmlNode>) -> Self {
        HtmlNode::Span(span)
    }
}

impl From<Anchor<HtmlNode>> for HtmlNode {
    fn from(anchor: Anchor<HtmlNode>) -> Self {
        HtmlNode::Anchor(anchor)
    }
}

impl From<SymbolNode> for HtmlNode {
    fn from(symbol: SymbolNode) -> Self {
        HtmlNode::Symbol(symbol)
    }
}

impl From<SvgNode> for HtmlNode {
    fn from(svg: SvgNode) -> Self {
        HtmlNode::Svg(svg)
    }
}

impl From<ImgNode> for HtmlNode {
    fn from(img: ImgNode) -> Self {
        HtmlNode::Img(img)
    }
}

impl From<DocumentFragment<HtmlNode>> for HtmlNode {
    fn from(fragment: DocumentFragment<HtmlNode>) -> Self {
        HtmlNode::Fragment(fragment)
    }
}

impl HtmlNode {
    pub fn has_class(&self, class: &str) -> bool {
        self.node().has_class(class)
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    pub fn write_markup(&self, out: &mut String) {
        match self {
            HtmlNode::Span(span) => write_container_markup("span", span, out),
            HtmlNode::Anchor(anchor) => {
                out.push_str("<a");
                anchor.node.write_class_attr(out);
                anchor.node.write_style_attr(out);
                anchor.attributes.write_markup(out);
                out.push('>');
                for child in &anchor.children {
                    child.write_markup(out);
                }
                out.push_str("</a>");
            }
            HtmlNode::Symbol(symbol) => symbol.write_markup(out),
            HtmlNode::Svg(svg) => svg.write_markup(out),
            HtmlNode::Img(img) => {
                out.push_str("<img src=\"");
                escape_attribute(out, &img.src);
                out.push_str("\" alt=\"");
                escape_attribute(out, &img.alt);
                out.push('"');
                img.node.write_class_attr(out);
                img.node.write_style_attr(out);
                out.push_str("/>");
            }
            HtmlNode::Fragment(fragment) => {
                for child in &fragment.children {
                    child.write_markup(out);
                }
            }
        }
    }
}

fn write_container_markup(tag: &str, span: &Span<HtmlNode>, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    span.node.write_class_attr(out);
    span.node.write_style_attr(out);
    span.attributes.write_markup(out);
    out.push('>');
    for child in &span.children {
        child.write_markup(out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

impl SymbolNode {
    pub fn write_markup(&self, out: &mut String) {
        let mut style = self.node.style.clone();
        if self.italic > 0.0 {
            style.margin_right = Some(make_em(self.italic));
        }
        let needs_span = !self.node.classes.iter().all(|c| c.is_empty())
            || !style.is_empty();
        if needs_span {
            let shim = HtmlDomNode {
                classes: self.node.classes.clone(),
                style,
                ..HtmlDomNode::default()
            };
            out.push_str("<span");
            shim.write_class_attr(out);
            shim.write_style_attr(out);
            out.push('>');
            escape_html_content(out, &self.text);
            out.push_str("</span>");
        } else {
            escape_html_content(out, &self.text);
        }
    }
}

impl SvgNode {
    pub fn write_markup(&self, out: &mut String) {
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\"");
        self.attributes.write_markup(out);
        out.push('>');
        for child in &self.children {
            match child {
                SvgChildNode::Path(path) => path.write_markup(out),
                SvgChildNode::Line(line) => line.write_markup(out),
            }
        }
        out.push_str("</svg>");
    }
}

impl PathNode {
    pub fn write_markup(&self, out: &mut String) {
        out.push_str("<path d=\"");
        match &self.alternate {
            Some(data) => escape_attribute(out, data),
            None => {
                escape_attribute(out, crate::svg_geometry::path_data(&self.path_name));
            }
        }
        out.push_str("\"/>");
    }
}

impl LineNode {
    pub fn write_markup(&self, out: &mut String) {
        out.push_str("<line");
        self.attributes.write_markup(out);
        out.push_str("/>");
    }
}

impl<T: WithHtmlDomNode> DocumentFragment<T> {
    /// Converts children into the closed node enum.
    pub fn into_html(self) -> DocumentFragment<HtmlNode>
    where
        T: Into<HtmlNode>,
    {
        DocumentFragment {
            node: self.node,
            children: self.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Formats a color argument for CSS output. Color names pass through;
/// raw hex triples get a `#` prefix.
pub fn format_color(color: &str) -> String {
    let bytes = color.as_bytes();
    if bytes.len() == 6 && bytes.iter().all(u8::is_ascii_hexdigit) {
        let mut s = String::with_capacity(color.len() + 1);
        let _ = write!(s, "#{color}");
        s
    } else {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn img_markup_is_well_formed() {
        let img = ImgNode::new(
            "https://example.org/a.png".to_string(),
            "a \"quoted\" alt".to_string(),
            CssStyle::default(),
        );
        let markup = HtmlNode::Img(img).to_markup();
        assert_eq!(
            markup,
            "<img src=\"https://example.org/a.png\" alt=\"a &quot;quoted&quot; alt\" class=\"mord\"/>"
        );
    }

    #[test]
    fn class_attribute_cannot_be_overridden() {
        let mut span: DomSpan = Span::new(
            vec!["mord".to_string()],
            Vec::new(),
            None,
            CssStyle::default(),
        );
        span.attributes.insert("aria-hidden", "true");
        let markup = HtmlNode::Span(span).to_markup();
        assert_eq!(markup, "<span class=\"mord\" aria-hidden=\"true\"></span>");
    }

    #[test]
    fn symbol_escapes_content() {
        let symbol = SymbolNode::new_text("a<b&c".to_string());
        let markup = HtmlNode::Symbol(symbol).to_markup();
        assert_eq!(markup, "a&lt;b&amp;c");
    }

    #[test]
    fn color_formatting() {
        assert_eq!(format_color("red"), "red");
        assert_eq!(format_color("c0ffee"), "#c0ffee");
        assert_eq!(format_color("#ab12cd"), "#ab12cd");
    }
}
