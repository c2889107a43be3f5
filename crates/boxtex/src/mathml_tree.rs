//! The semantic output tree, in MathML vocabulary.

use crate::dom_tree::{ClassList, escape_attribute, escape_html_content};
use crate::unit::make_em;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathNodeType {
    Math,
    Annotation,
    Semantics,
    MText,
    Mn,
    Mo,
    Mi,
    Mspace,
    Mover,
    Munder,
    Munderover,
    Msup,
    Msub,
    Msubsup,
    Mfrac,
    Mroot,
    Msqrt,
    Mtable,
    Mtr,
    Mlabeledtr,
    Mtd,
    Mrow,
    Menclose,
    Mstyle,
    Mpadded,
    Mphantom,
    Mglyph,
}

impl MathNodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            MathNodeType::Math => "math",
            MathNodeType::Annotation => "annotation",
            MathNodeType::Semantics => "semantics",
            MathNodeType::MText => "mtext",
            MathNodeType::Mn => "mn",
            MathNodeType::Mo => "mo",
            MathNodeType::Mi => "mi",
            MathNodeType::Mspace => "mspace",
            MathNodeType::Mover => "mover",
            MathNodeType::Munder => "munder",
            MathNodeType::Munderover => "munderover",
            MathNodeType::Msup => "msup",
            MathNodeType::Msub => "msub",
            MathNodeType::Msubsup => "msubsup",
            MathNodeType::Mfrac => "mfrac",
            MathNodeType::Mroot => "mroot",
            MathNodeType::Msqrt => "msqrt",
            MathNodeType::Mtable => "mtable",
            MathNodeType::Mtr => "mtr",
            MathNodeType::Mlabeledtr => "mlabeledtr",
            MathNodeType::Mtd => "mtd",
            MathNodeType::Mrow => "mrow",
            MathNodeType::Menclose => "menclose",
            MathNodeType::Mstyle => "mstyle",
            MathNodeType::Mpadded => "mpadded",
            MathNodeType::Mphantom => "mphantom",
            MathNodeType::Mglyph => "mglyph",
        }
    }
}

/// An element node. Attribute order is insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct MathNode {
    pub node_type: MathNodeType,
    pub children: Vec<MathmlNode>,
    pub attributes: Vec<(String, String)>,
    pub classes: ClassList,
}

impl MathNode {
    pub fn new(node_type: MathNodeType, children: Vec<MathmlNode>) -> Self {
        MathNode {
            node_type,
            children,
            attributes: Vec::new(),
            classes: ClassList::new(),
        }
    }

    pub fn empty(node_type: MathNodeType) -> Self {
        MathNode::new(node_type, Vec::new())
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.node_type.as_str());
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_attribute(out, value);
            out.push('"');
        }
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            let mut first = true;
            for class in self.classes.iter().filter(|c| !c.is_empty()) {
                if !first {
                    out.push(' ');
                }
                escape_attribute(out, class);
                first = false;
            }
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_markup(out);
        }
        out.push_str("</");
        out.push_str(self.node_type.as_str());
        out.push('>');
    }
}

/// A text leaf holding a UTF-8 string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        TextNode { text: text.into() }
    }

    pub fn write_markup(&self, out: &mut String) {
        escape_html_content(out, &self.text);
    }
}

/// An explicit space of a given em width.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceNode {
    pub width: f64,
}

impl SpaceNode {
    pub fn new(width: f64) -> Self {
        SpaceNode { width }
    }

    pub fn write_markup(&self, out: &mut String) {
        // Thin and medium spaces have character equivalents; everything
        // else is an explicit mspace.
        if (self.width - 0.16667).abs() < 1e-5 {
            out.push_str("<mtext>\u{2009}</mtext>");
        } else {
            out.push_str("<mspace width=\"");
            out.push_str(&make_em(self.width));
            out.push_str("\"/>");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MathmlNode {
    Node(MathNode),
    Text(TextNode),
    Space(SpaceNode),
}

impl MathmlNode {
    pub fn write_markup(&self, out: &mut String) {
        match self {
            MathmlNode::Node(node) => node.write_markup(out),
            MathmlNode::Text(text) => text.write_markup(out),
            MathmlNode::Space(space) => space.write_markup(out),
        }
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    /// The element node, when this is one.
    pub fn as_node(&self) -> Option<&MathNode> {
        match self {
            MathmlNode::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut MathNode> {
        match self {
            MathmlNode::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<MathNode> for MathmlNode {
    fn from(node: MathNode) -> Self {
        MathmlNode::Node(node)
    }
}

impl From<TextNode> for MathmlNode {
    fn from(node: TextNode) -> Self {
        MathmlNode::Text(node)
    }
}

impl From<SpaceNode> for MathmlNode {
    fn from(node: SpaceNode) -> Self {
        MathmlNode::Space(node)
    }
}

/// Wraps a list in an mrow unless it is already a single node.
pub fn make_row(body: Vec<MathmlNode>) -> MathmlNode {
    if body.len() == 1 {
        body.into_iter().next().unwrap()
    } else {
        MathNode::new(MathNodeType::Mrow, body).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_escapes() {
        let mut mi = MathNode::new(
            MathNodeType::Mi,
            vec![TextNode::new("a<b").into()],
        );
        mi.set_attribute("mathvariant", "normal");
        assert_eq!(
            MathmlNode::from(mi).to_markup(),
            "<mi mathvariant=\"normal\">a&lt;b</mi>"
        );
    }

    #[test]
    fn row_collapses_singletons() {
        let mi = MathNode::new(MathNodeType::Mi, vec![TextNode::new("x").into()]);
        let row = make_row(vec![mi.clone().into()]);
        assert_eq!(row, mi.into());
    }
}
