//! Semantic-tree tests.

use boxtex::{MathNode, OutputFormat, Settings, TrustSetting, render};

fn mathml_settings() -> Settings {
    Settings {
        output: OutputFormat::Mathml,
        ..Settings::default()
    }
}

fn build(input: &str) -> MathNode {
    build_with(input, &mathml_settings())
}

fn build_with(input: &str, settings: &Settings) -> MathNode {
    render(input, settings)
        .unwrap_or_else(|e| panic!("{input} failed: {e}"))
        .mathml
        .expect("mathml output requested")
}

fn markup(input: &str) -> String {
    let mut out = String::new();
    build(input).write_markup(&mut out);
    out
}

#[test]
fn identifiers_numbers_operators() {
    assert!(markup("x").contains("<mi>x</mi>"));
    assert!(markup("2").contains("<mn>2</mn>"));
    assert!(markup("+").contains("<mo>+</mo>"));
    // Upright Greek capitals need an explicit variant.
    assert!(markup(r"\Gamma").contains("<mi mathvariant=\"normal\">\u{393}</mi>"));
    // Symbol replacement applies.
    assert!(markup(r"\alpha").contains("<mi>\u{3b1}</mi>"));
}

#[test]
fn variants_emitted_only_when_non_default() {
    let plain = markup("x");
    assert!(!plain.contains("mathvariant=\"italic\""));
    assert!(markup(r"\mathbb{R}").contains("mathvariant=\"double-struck\""));
    assert!(markup(r"\mathbf{x}").contains("mathvariant=\"bold\""));
}

#[test]
fn structures_map_to_their_elements() {
    assert!(markup(r"\sqrt{x}").contains("<msqrt>"));
    assert!(markup(r"\sqrt[3]{x}").contains("<mroot>"));
    assert!(markup(r"\frac{1}{2}").contains("<mfrac>"));
    assert!(markup("x^2").contains("<msup>"));
    assert!(markup("x_2").contains("<msub>"));
    assert!(markup("x_1^2").contains("<msubsup>"));
    assert!(markup(r"\overline{x}").contains("<mover accent=\"true\">"));
    assert!(markup(r"\begin{matrix}a\\b\end{matrix}").contains("<mtable"));
}

#[test]
fn left_right_emit_fences() {
    let out = markup(r"\left( x \right)");
    assert!(out.contains("<mo fence=\"true\">(</mo>"));
    assert!(out.contains("<mo fence=\"true\">)</mo>"));
}

#[test]
fn color_becomes_mstyle() {
    let out = markup(r"\color{red} x");
    assert!(out.contains("<mstyle mathcolor=\"red\">"));
}

#[test]
fn stretch_arrows_are_stretchy_movers() {
    let out = markup(r"\xrightarrow{f}");
    assert!(out.contains("<mover>"));
    assert!(out.contains("stretchy=\"true\""));
}

#[test]
fn root_carries_annotation_and_namespace() {
    let out = markup(r"a+b");
    assert!(out.starts_with("<math xmlns=\"http://www.w3.org/1998/Math/MathML\">"));
    assert!(out.contains("<semantics>"));
    assert!(
        out.contains("<annotation encoding=\"application/x-tex\">a+b</annotation>")
    );

    let settings = Settings {
        display_mode: true,
        ..mathml_settings()
    };
    let mut display_out = String::new();
    build_with("x", &settings).write_markup(&mut display_out);
    assert!(display_out.contains("display=\"block\""));
}

#[test]
fn href_attribute_lands_on_the_returned_node() {
    let settings = Settings {
        trust: TrustSetting::Bool(true),
        ..mathml_settings()
    };
    let mut out = String::new();
    build_with(r"\href{https://example.org/}{y}", &settings).write_markup(&mut out);
    assert!(out.contains("<mrow href=\"https://example.org/\">"));
}

#[test]
fn operators_with_limits_render_as_underover() {
    let settings = Settings {
        display_mode: true,
        ..mathml_settings()
    };
    let mut out = String::new();
    build_with(r"\sum_{i=0}^{n} i", &settings).write_markup(&mut out);
    assert!(out.contains("<munderover>"));
}

#[test]
fn text_mode_produces_mtext() {
    let out = markup(r"\text{ab}");
    assert!(out.contains("<mtext>a</mtext>") || out.contains("<mtext>ab</mtext>"));
}
