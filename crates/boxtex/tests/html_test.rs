//! Visual-tree tests: atom cancellation, spacing, struts, delimiters,
//! tags, and markup well-formedness.

use boxtex::{
    DomSpan, HtmlNode, OutputFormat, Settings, StrictMode, WithHtmlDomNode, render,
};

fn html_settings() -> Settings {
    Settings {
        output: OutputFormat::Html,
        ..Settings::default()
    }
}

fn build(input: &str) -> DomSpan {
    build_with(input, &html_settings())
}

fn build_with(input: &str, settings: &Settings) -> DomSpan {
    render(input, settings)
        .unwrap_or_else(|e| panic!("{input} failed: {e}"))
        .html
        .expect("html output requested")
}

/// Depth-first list of all nodes in the tree.
fn walk(node: &HtmlNode, out: &mut Vec<HtmlNode>) {
    out.push(node.clone());
    match node {
        HtmlNode::Span(span) => {
            for child in &span.children {
                walk(child, out);
            }
        }
        HtmlNode::Anchor(anchor) => {
            for child in &anchor.children {
                walk(child, out);
            }
        }
        HtmlNode::Fragment(fragment) => {
            for child in &fragment.children {
                walk(child, out);
            }
        }
        _ => {}
    }
}

fn all_nodes(root: &DomSpan) -> Vec<HtmlNode> {
    let mut out = Vec::new();
    walk(&HtmlNode::Span(root.clone()), &mut out);
    out
}

fn symbols_of(root: &DomSpan) -> Vec<(String, Vec<String>)> {
    all_nodes(root)
        .into_iter()
        .filter_map(|node| match node {
            HtmlNode::Symbol(symbol) => {
                Some((symbol.text.clone(), symbol.node.classes.clone()))
            }
            _ => None,
        })
        .collect()
}

fn glue_widths(root: &DomSpan) -> Vec<String> {
    all_nodes(root)
        .into_iter()
        .filter_map(|node| match node {
            HtmlNode::Span(span)
                if span.node.has_class("mspace") && span.children.is_empty() =>
            {
                span.node.style.margin_right.clone()
            }
            _ => None,
        })
        .collect()
}

#[test]
fn binary_spacing_inserts_medspace() {
    // "a+b": mord, binspace, mbin, binspace, mord.
    let root = build("a+b");
    let symbols = symbols_of(&root);
    let texts: Vec<&str> = symbols.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, ["a", "+", "b"]);
    assert_eq!(symbols[1].1[0], "mbin");
    // 4mu = 4/18 em on either side of the +.
    assert_eq!(glue_widths(&root), ["0.2222em", "0.2222em"]);
}

#[test]
fn leading_bin_cancels_to_ord() {
    // "{+b}": leftmost cancels the +.
    let root = build("{+b}");
    let symbols = symbols_of(&root);
    assert_eq!(symbols[0].0, "+");
    assert_eq!(symbols[0].1[0], "mord");
    assert!(glue_widths(&root).is_empty());
}

#[test]
fn trailing_bin_cancels_to_ord() {
    let root = build("{a+}");
    let symbols = symbols_of(&root);
    assert_eq!(symbols[1].0, "+");
    assert_eq!(symbols[1].1[0], "mord");
}

#[test]
fn double_bins_cancel_the_second() {
    let root = build("a+*b");
    let symbols = symbols_of(&root);
    assert_eq!(symbols[1].1[0], "mbin");
    // The * degrades because it follows a bin.
    assert_eq!(symbols[2].1[0], "mord");
}

#[test]
fn relation_spacing_is_thick() {
    let root = build("a=b");
    // 5mu = 5/18 em.
    assert_eq!(glue_widths(&root), ["0.2778em", "0.2778em"]);
}

#[test]
fn scripts_use_tight_spacing() {
    // Inside a superscript, ord-bin glue disappears.
    let root = build("x^{a+b}");
    assert!(glue_widths(&root).is_empty());
}

#[test]
fn color_wrapper_is_transparent_to_spacing() {
    let root = build(r"\color{red}{a}+b");
    assert_eq!(glue_widths(&root), ["0.2222em", "0.2222em"]);
    // And the colored symbol keeps its color.
    let symbols = symbols_of(&root);
    assert_eq!(symbols[0].0, "a");
}

#[test]
fn every_base_starts_with_a_strut() {
    let roots = [build("a+b"), build(r"\frac{1}{2}"), build("x^2")];
    for root in &roots {
        for node in all_nodes(root) {
            let HtmlNode::Span(span) = node else { continue };
            if !span.node.has_class("base") {
                continue;
            }
            let HtmlNode::Span(strut) = &span.children[0] else {
                panic!("first child of a base span must be its strut");
            };
            assert!(strut.node.has_class("strut"));
            let height = span.node.height + span.node.depth;
            assert_eq!(
                strut.node.style.height.as_deref(),
                Some(crate_make_em(height).as_str())
            );
            if span.node.depth > 0.0 {
                assert_eq!(
                    strut.node.style.vertical_align.as_deref(),
                    Some(crate_make_em(-span.node.depth).as_str())
                );
            }
        }
    }
}

/// Mirror of the crate's em serialization, for strut checks.
fn crate_make_em(n: f64) -> String {
    let mut s = format!("{:.4}", n);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s.push_str("em");
    s
}

#[test]
fn fraction_rule_obeys_min_thickness() {
    let settings = Settings {
        min_rule_thickness: 0.08,
        ..html_settings()
    };
    let root = build_with(r"\frac{1}{2}", &settings);
    let line = all_nodes(&root)
        .into_iter()
        .find_map(|node| match node {
            HtmlNode::Span(span) if span.node.has_class("frac-line") => Some(span),
            _ => None,
        })
        .expect("a frac-line");
    assert!(line.node.height >= 0.08);
    assert_eq!(line.node.style.border_bottom_width.as_deref(), Some("0.08em"));
}

#[test]
fn left_right_wraps_in_minner_and_sizes_delims() {
    let root = build(r"\left( \frac{1}{2} \right)");
    let minner = all_nodes(&root)
        .into_iter()
        .find_map(|node| match node {
            HtmlNode::Span(span) if span.node.has_class("minner") => Some(span),
            _ => None,
        })
        .expect("a minner span");
    let first = minner.children.first().expect("left delimiter");
    let last = minner.children.last().expect("right delimiter");
    assert!(first.node().has_class("mopen"));
    assert!(last.node().has_class("mclose"));
    // The delimiters must cover the fraction's extent.
    let inner_extent: f64 = minner.children[1..minner.children.len() - 1]
        .iter()
        .map(|c| c.node().height + c.node().depth)
        .fold(0.0, f64::max);
    let delim_extent = first.node().height + first.node().depth;
    assert!(delim_extent >= inner_extent);
}

#[test]
fn middle_delimiter_is_sized_like_the_fences() {
    let root = build(r"\left( \frac{a}{b} \middle| c \right)");
    let nodes = all_nodes(&root);
    // No marker placeholders survive building.
    assert!(
        nodes
            .iter()
            .all(|node| !node.node().has_class("middle-marker"))
    );
}

#[test]
fn display_tag_lands_last() {
    let settings = Settings {
        display_mode: true,
        ..html_settings()
    };
    let root = build_with(r"a\tag{1}", &settings);
    let katex_html = all_nodes(&root)
        .into_iter()
        .find_map(|node| match node {
            HtmlNode::Span(span) if span.node.has_class("katex-html") => Some(span),
            _ => None,
        })
        .expect("katex-html root");
    let tags: Vec<&HtmlNode> = katex_html
        .children
        .iter()
        .filter(|c| c.node().has_class("tag"))
        .collect();
    assert_eq!(tags.len(), 1);
    assert!(std::ptr::eq(
        *tags.last().unwrap(),
        katex_html.children.last().unwrap()
    ));
}

#[test]
fn markup_is_balanced_and_quoted() {
    let inputs = [
        "a+b",
        r"\frac{1}{2}",
        r"\sqrt[3]{x+1}",
        r"\left(\begin{matrix}a&b\\c&d\end{matrix}\right)",
        r"x^2 + y_1' \cdot \hat{z}",
        r"\color{red}{a} \ne b",
    ];
    for input in inputs {
        let settings = Settings::default();
        let markup = boxtex::render_to_markup(input, &settings).unwrap();
        let opens = markup.matches("<span").count();
        let closes = markup.matches("</span>").count();
        assert_eq!(opens, closes, "unbalanced spans for {input}");
        // Quotes pair up inside tags.
        for tag in markup.split('<').skip(1) {
            let tag = tag.split('>').next().unwrap_or("");
            assert_eq!(
                tag.matches('"').count() % 2,
                0,
                "unbalanced quotes in <{tag}> for {input}"
            );
        }
    }
}

#[test]
fn unicode_strict_mode_flags_text_in_math() {
    let settings = Settings {
        strict: StrictMode::Error,
        ..html_settings()
    };
    assert!(render("\u{4e2d}", &settings).is_err());
    let lenient = html_settings();
    assert!(render("\u{4e2d}", &lenient).is_ok());
}
