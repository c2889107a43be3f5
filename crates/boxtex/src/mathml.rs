//! The MathML (semantic) builder: parse tree in, semantic tree out.

use crate::build_common::FontVariant;
use crate::error::ParseError;
use crate::functions;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode, make_row};
use crate::options::{FontShape, FontWeight, Options};
use crate::parse_node::ParseNode;
use crate::symbols;
use crate::types::Mode;

/// Makes a text leaf, applying the symbol table's replacement
/// codepoint.
pub(crate) fn make_text(text: &str, mode: Mode) -> TextNode {
    let replaced = symbols::get_symbol(mode, text)
        .and_then(|sym| sym.replace)
        .map(|c| c.to_string());
    TextNode::new(replaced.unwrap_or_else(|| text.to_string()))
}

/// The `mathvariant` for a node under the given options, when one is
/// forced by a font switch.
pub(crate) fn get_variant(group: &ParseNode, options: &Options) -> Option<FontVariant> {
    if options.font_family == "texttt" {
        return Some(FontVariant::Monospace);
    }
    if options.font_family == "textsf" {
        return Some(match (options.font_shape, options.font_weight) {
            (Some(FontShape::TextIt), Some(FontWeight::TextBf)) => FontVariant::BoldItalic,
            (Some(FontShape::TextIt), _) => FontVariant::Italic,
            (_, Some(FontWeight::TextBf)) => FontVariant::Bold,
            _ => FontVariant::SansSerif,
        });
    }
    match (options.font_shape, options.font_weight) {
        (Some(FontShape::TextIt), Some(FontWeight::TextBf)) => {
            return Some(FontVariant::BoldItalic);
        }
        (Some(FontShape::TextIt), _) => return Some(FontVariant::Italic),
        (_, Some(FontWeight::TextBf)) => return Some(FontVariant::Bold),
        _ => {}
    }
    match options.font.as_str() {
        "mathit" => Some(FontVariant::Italic),
        "boldsymbol" => {
            if matches!(group, ParseNode::TextOrd(_)) {
                Some(FontVariant::Bold)
            } else {
                Some(FontVariant::BoldItalic)
            }
        }
        "mathbf" => Some(FontVariant::Bold),
        "mathbb" => Some(FontVariant::DoubleStruck),
        "mathfrak" => Some(FontVariant::Fraktur),
        "mathscr" | "mathcal" => Some(FontVariant::Script),
        "mathsf" => Some(FontVariant::SansSerif),
        "mathtt" => Some(FontVariant::Monospace),
        "mathnormal" | "" => None,
        "mathrm" => Some(FontVariant::Normal),
        _ => None,
    }
}

/// Builds a list of parse nodes into semantic nodes.
pub(crate) fn build_expression(
    expression: &[ParseNode],
    options: &Options,
) -> Result<Vec<MathmlNode>, ParseError> {
    let mut groups = Vec::with_capacity(expression.len());
    for node in expression {
        groups.push(build_group(Some(node), options)?);
    }
    Ok(groups)
}

/// Builds a list and wraps it in an mrow unless it is a single node.
pub(crate) fn build_expression_row(
    expression: &[ParseNode],
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    Ok(make_row(build_expression(expression, options)?))
}

pub(crate) fn build_group(
    group: Option<&ParseNode>,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let Some(group) = group else {
        return Ok(MathNode::empty(MathNodeType::Mrow).into());
    };
    // Text-mode characters become mtext regardless of their ord kind.
    if group.mode() == Mode::Text && group.text().is_some() {
        if let ParseNode::MathOrd(node) | ParseNode::TextOrd(node) = group {
            let mut mtext = MathNode::new(
                crate::mathml_tree::MathNodeType::MText,
                vec![MathmlNode::Text(make_text(&node.text, Mode::Text))],
            );
            if let Some(variant) = get_variant(group, options) {
                mtext.set_attribute("mathvariant", variant.as_str());
            }
            return Ok(mtext.into());
        }
    }
    match group {
        ParseNode::Atom(node) => Ok(functions::symbols::atom_mathml(node, options)),
        ParseNode::MathOrd(_) | ParseNode::TextOrd(_) => {
            Ok(functions::symbols::ord_mathml(group, options))
        }
        ParseNode::Spacing(node) => Ok(functions::symbols::spacing_mathml(node, options)),
        ParseNode::AccentToken(node) => Ok(functions::symbols::ord_mathml(
            &ParseNode::TextOrd(node.clone()),
            options,
        )),
        ParseNode::OpToken(node) => Ok(functions::op::op_token_mathml(node, options)),
        ParseNode::Verb(node) => Ok(functions::verb::mathml_builder(node, options)),
        ParseNode::OrdGroup(node) => functions::ordgroup::mathml_builder(node, options),
        ParseNode::Styling(node) => functions::styling::mathml_builder(node, options),
        ParseNode::Sizing(node) => functions::sizing::mathml_builder(node, options),
        ParseNode::Color(node) => functions::color::mathml_builder(node, options),
        ParseNode::Font(node) => functions::font::mathml_builder(node, options),
        ParseNode::MClass(node) => functions::mclass::mathml_builder(node, options),
        ParseNode::HtmlMathml(node) => functions::html_mathml::mathml_builder(node, options),
        ParseNode::HBox(node) => functions::hbox::mathml_builder(node, options),
        ParseNode::SupSub(node) => functions::supsub::mathml_builder(node, options),
        ParseNode::GenFrac(node) => functions::genfrac::mathml_builder(node, options),
        ParseNode::Infix(node) => functions::genfrac::infix_mathml_builder(node, options),
        ParseNode::Sqrt(node) => functions::sqrt::mathml_builder(node, options),
        ParseNode::Overline(node) => functions::overline::mathml_builder(node, options),
        ParseNode::Underline(node) => functions::underline::mathml_builder(node, options),
        ParseNode::Accent(node) => functions::accent::mathml_builder(node, options),
        ParseNode::AccentUnder(node) => functions::accentunder::mathml_builder(node, options),
        ParseNode::HorizBrace(node) => functions::horiz_brace::mathml_builder(node, options),
        ParseNode::XArrow(node) => functions::arrow::mathml_builder(node, options),
        ParseNode::Enclose(node) => functions::enclose::mathml_builder(node, options),
        ParseNode::Op(node) => functions::op::mathml_builder(node, options),
        ParseNode::OperatorName(node) => functions::operatorname::mathml_builder(node, options),
        ParseNode::DelimSizing(node) => Ok(functions::delimsizing::mathml_builder(node)),
        ParseNode::LeftRight(node) => functions::delimsizing::left_right_mathml(node, options),
        ParseNode::LeftRightRight(_) => Ok(MathNode::empty(MathNodeType::Mrow).into()),
        ParseNode::Middle(node) => Ok(functions::delimsizing::middle_mathml(node, options)),
        ParseNode::Array(node) => crate::environments::array::mathml_builder(node, options),
        ParseNode::Kern(node) => Ok(functions::kern::mathml_builder(node, options)),
        ParseNode::Rule(node) => Ok(functions::rule::mathml_builder(node, options)),
        ParseNode::RaiseBox(node) => functions::raisebox::mathml_builder(node, options),
        ParseNode::Lap(node) => functions::lap::mathml_builder(node, options),
        ParseNode::Smash(node) => functions::smash::mathml_builder(node, options),
        ParseNode::Phantom(node) => functions::phantom::mathml_builder(node, options),
        ParseNode::HPhantom(node) => functions::phantom::hphantom_mathml(node, options),
        ParseNode::VPhantom(node) => functions::phantom::vphantom_mathml(node, options),
        ParseNode::MathChoice(node) => functions::mathchoice::mathml_builder(node, options),
        ParseNode::Href(node) => functions::href::mathml_builder(node, options),
        ParseNode::Url(node) => functions::href::url_mathml_builder(node, options),
        ParseNode::Includegraphics(node) => {
            Ok(functions::includegraphics::mathml_builder(node, options))
        }
        ParseNode::Raw(node) => Ok(MathmlNode::Text(TextNode::new(node.string.clone()))),
        ParseNode::Size(_) | ParseNode::ColorToken(_) | ParseNode::Internal(_) => {
            Ok(MathNode::empty(MathNodeType::Mrow).into())
        }
        ParseNode::Tag(_) => Ok(MathNode::empty(MathNodeType::Mrow).into()),
        ParseNode::Text(node) => functions::text::mathml_builder(node, options),
        ParseNode::Cr(node) => Ok(functions::cr::mathml_builder(node, options)),
    }
}

/// Builds the `<math>` root with its `semantics`/`annotation` pair
/// carrying the original input.
pub(crate) fn build_mathml(
    tree: &[ParseNode],
    tex_expression: &str,
    options: &Options,
    is_display_mode: bool,
) -> Result<MathNode, ParseError> {
    // A tag wrapper renders as its body followed by the tag text.
    let expression = match tree {
        [ParseNode::Tag(tag)] => {
            let mut body = build_expression(&tag.body, options)?;
            let mut label = MathNode::new(
                MathNodeType::Mpadded,
                build_expression(&tag.tag, options)?,
            );
            label.set_attribute("width", "0");
            body.push(label.into());
            body
        }
        other => build_expression(other, options)?,
    };

    let wrapper = if expression.len() == 1
        && matches!(
            expression[0].as_node().map(|n| n.node_type),
            Some(MathNodeType::Mrow) | Some(MathNodeType::Mtable)
        ) {
        expression.into_iter().next().unwrap()
    } else {
        MathNode::new(MathNodeType::Mrow, expression).into()
    };

    let annotation = MathNode::new(
        MathNodeType::Annotation,
        vec![MathmlNode::Text(TextNode::new(tex_expression))],
    )
    .with_attribute("encoding", "application/x-tex");

    let semantics = MathNode::new(MathNodeType::Semantics, vec![wrapper, annotation.into()]);

    let mut math = MathNode::new(MathNodeType::Math, vec![semantics.into()]);
    math.set_attribute("xmlns", "http://www.w3.org/1998/Math/MathML");
    if is_display_mode {
        math.set_attribute("display", "block");
    }
    Ok(math)
}
