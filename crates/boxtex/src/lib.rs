//! Typeset TeX math into an HTML box tree and a MathML tree.
//!
//! The input is a subset of TeX/LaTeX math syntax; the output is a pair
//! of trees: a visual one with precise box geometry (heights, depths,
//! widths, and inter-atom spacing per the classical rules) and a
//! semantic one in MathML vocabulary. Rendering the characters
//! themselves is the host's job, via the font-metric tables and CSS
//! class names this crate emits.
//!
//! # Usage
//!
//! ```rust
//! use boxtex::{Settings, render_to_markup};
//!
//! let settings = Settings::default();
//! let markup = render_to_markup(r"x = \frac{-b \pm \sqrt{b^2-4ac}}{2a}", &settings).unwrap();
//! assert!(markup.contains("katex-html"));
//! ```
//!
//! For host renderers that attach real DOM nodes, [`render`] returns
//! the trees themselves instead of markup.

mod build_common;
mod delimiter;
mod dom_tree;
mod environments;
mod error;
mod font_metrics;
mod font_metrics_data;
mod functions;
mod html;
mod lexer;
mod macro_expander;
mod macros;
mod mathml;
mod mathml_tree;
mod namespace;
mod options;
mod parse_node;
mod parser;
mod settings;
mod spacing_data;
mod stretchy;
mod style;
mod svg_geometry;
mod symbols;
mod token;
mod types;
mod unicode_scripts;
mod unit;

pub use dom_tree::{
    Anchor, Attributes, ClassList, CssStyle, DocumentFragment, DomSpan, HtmlDomNode, HtmlNode,
    ImgNode, LineNode, PathNode, Span, SvgChildNode, SvgNode, SymbolNode, WithHtmlDomNode,
};
pub use error::{ParseError, ParseErrorKind};
pub use mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
pub use options::Options;
pub use parse_node::*;
pub use settings::{Settings, StrictBehavior, StrictMode, TrustContext, TrustSetting};
pub use token::SourceRange;
pub use types::{Mode, OutputFormat};

use build_common::make_span;
use parser::Parser;

/// Parses an expression into its parse tree.
///
/// Parsing is pure: the same input and settings always produce a
/// structurally equal tree.
pub fn parse_tree(expression: &str, settings: &Settings) -> Result<Vec<ParseNode>, ParseError> {
    let mut parser = Parser::new(expression, settings);
    parser.parse()
}

/// The rendered output: the visual tree and/or the semantic tree,
/// depending on [`Settings::output`].
#[derive(Debug, Clone)]
pub struct RenderedMath {
    pub html: Option<DomSpan>,
    pub mathml: Option<MathNode>,
    display_mode: bool,
    leqno: bool,
    fleqn: bool,
}

impl RenderedMath {
    /// Serializes to markup: a `katex` span carrying the MathML tree
    /// (when built) followed by the visual tree, wrapped in a display
    /// block in display mode.
    pub fn to_markup(&self) -> String {
        let mut inner = String::new();
        if let Some(mathml) = &self.mathml {
            inner.push_str("<span class=\"katex-mathml\">");
            mathml.write_markup(&mut inner);
            inner.push_str("</span>");
        }
        if let Some(html) = &self.html {
            HtmlNode::Span(html.clone()).write_markup(&mut inner);
        }

        let mut out = String::new();
        out.push_str("<span class=\"katex\">");
        out.push_str(&inner);
        out.push_str("</span>");
        if self.display_mode {
            let mut classes = vec!["katex-display"];
            if self.leqno {
                classes.push("leqno");
            }
            if self.fleqn {
                classes.push("fleqn");
            }
            format!("<span class=\"{}\">{}</span>", classes.join(" "), out)
        } else {
            out
        }
    }
}

fn build_rendered(
    expression: &str,
    settings: &Settings,
) -> Result<RenderedMath, ParseError> {
    let tree = parse_tree(expression, settings)?;
    let options = Options::from_settings(settings);

    let html = match settings.output {
        OutputFormat::Mathml => None,
        OutputFormat::Html | OutputFormat::HtmlAndMathml => {
            Some(html::build_html(&tree, &options)?)
        }
    };
    let mathml = match settings.output {
        OutputFormat::Html => None,
        OutputFormat::Mathml | OutputFormat::HtmlAndMathml => {
            Some(mathml::build_mathml(&tree, expression, &options, settings.display_mode)?)
        }
    };

    Ok(RenderedMath {
        html,
        mathml,
        display_mode: settings.display_mode,
        leqno: settings.leqno,
        fleqn: settings.fleqn,
    })
}

/// Renders a parse failure as a single error-colored leaf carrying the
/// input verbatim, with the message in its `title`.
pub fn render_error(error: &ParseError, expression: &str, settings: &Settings) -> DomSpan {
    let symbol = SymbolNode::new_text(expression.to_string());
    let mut node = make_span(
        vec!["katex-error".to_string()],
        vec![HtmlNode::Symbol(symbol)],
        None,
        CssStyle::default(),
    );
    node.attributes.insert("title", error.to_string());
    node.node.style.color = Some(settings.error_color.clone());
    node
}

/// Typesets an expression to its output trees.
///
/// With `throw_on_error` disabled, failures come back as a rendered
/// error leaf instead of an `Err`.
pub fn render(expression: &str, settings: &Settings) -> Result<RenderedMath, ParseError> {
    match build_rendered(expression, settings) {
        Ok(rendered) => Ok(rendered),
        Err(error) if !settings.throw_on_error => Ok(RenderedMath {
            html: Some(render_error(&error, expression, settings)),
            mathml: None,
            display_mode: settings.display_mode,
            leqno: settings.leqno,
            fleqn: settings.fleqn,
        }),
        Err(error) => Err(error),
    }
}

/// Typesets an expression straight to markup.
pub fn render_to_markup(expression: &str, settings: &Settings) -> Result<String, ParseError> {
    Ok(render(expression, settings)?.to_markup())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_deterministic() {
        let settings = Settings::default();
        let first = parse_tree(r"a + \frac{1}{2}", &settings).unwrap();
        let second = parse_tree(r"a + \frac{1}{2}", &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn error_fallback_renders_input() {
        let settings = Settings {
            throw_on_error: false,
            ..Settings::default()
        };
        let rendered = render(r"\frac{1}", &settings).unwrap();
        let html = rendered.html.expect("error span");
        assert!(html.node.has_class("katex-error"));
        match &html.children[0] {
            HtmlNode::Symbol(symbol) => assert_eq!(symbol.text, r"\frac{1}"),
            other => panic!("expected symbol leaf, got {other:?}"),
        }
        assert!(html.attributes.get("title").is_some());
    }

    #[test]
    fn output_selection() {
        let settings = Settings {
            output: OutputFormat::Mathml,
            ..Settings::default()
        };
        let rendered = render("x", &settings).unwrap();
        assert!(rendered.html.is_none());
        assert!(rendered.mathml.is_some());

        let settings = Settings {
            output: OutputFormat::Html,
            ..Settings::default()
        };
        let rendered = render("x", &settings).unwrap();
        assert!(rendered.html.is_some());
        assert!(rendered.mathml.is_none());
    }
}
