//! Failure-path tests: every kind of parse error and the non-throwing
//! fallback.

use boxtex::{
    HtmlNode, ParseErrorKind, Settings, StrictMode, TrustSetting, parse_tree, render,
};

fn err_kind(input: &str) -> ParseErrorKind {
    parse_tree(input, &Settings::default())
        .expect_err(&format!("{input} should not parse"))
        .1
}

#[test]
fn parse_errors() {
    let problems: &[(&str, &str, fn(&ParseErrorKind) -> bool)] = &[
        ("close_without_open", "}", |k| {
            matches!(k, ParseErrorKind::UnexpectedToken { expected: "EOF", .. })
        }),
        ("unknown_command", r"\asdf", |k| {
            matches!(k, ParseErrorKind::UndefinedControlSequence(name) if name == "\\asdf")
        }),
        ("missing_argument", r"\frac{1}", |k| {
            matches!(k, ParseErrorKind::ExpectedGroup { after } if after == "\\frac")
        }),
        ("missing_sup_group", "x^", |k| {
            matches!(k, ParseErrorKind::ExpectedGroup { after } if after == "^")
        }),
        ("double_superscript", "x^2^3", |k| {
            matches!(k, ParseErrorKind::DoubleSuperscript)
        }),
        ("double_subscript", "x_2_3", |k| {
            matches!(k, ParseErrorKind::DoubleSubscript)
        }),
        ("prime_after_sup", "x^2'", |k| {
            matches!(k, ParseErrorKind::DoubleSuperscript)
        }),
        ("limits_without_operator", r"x\limits_2", |k| {
            matches!(k, ParseErrorKind::LimitControlsWithoutOperator)
        }),
        ("middle_without_left", r"a \middle| b", |k| {
            matches!(k, ParseErrorKind::MiddleWithoutLeft)
        }),
        ("unclosed_group", "{x + y", |k| {
            matches!(k, ParseErrorKind::UnexpectedToken { expected: "}", .. })
        }),
        ("unclosed_left", r"\left( x", |k| {
            matches!(k, ParseErrorKind::UnexpectedToken { expected: "\\right", .. })
        }),
        ("bad_delimiter", r"\left x \right.", |k| {
            matches!(k, ParseErrorKind::InvalidDelimiter { .. })
        }),
        ("unknown_environment", r"\begin{xmatrix} 1 \end{xmatrix}", |k| {
            matches!(k, ParseErrorKind::UnknownEnvironment(name) if name == "xmatrix")
        }),
        (
            "mismatched_environment",
            r"\begin{matrix} 1 \end{bmatrix}",
            |k| {
                matches!(
                    k,
                    ParseErrorKind::MismatchedEnvironment { expected, got }
                        if expected == "matrix" && got == "bmatrix"
                )
            },
        ),
        ("unclosed_environment", r"\begin{matrix} x", |k| {
            matches!(k, ParseErrorKind::UnexpectedToken { .. })
        }),
        ("ampersand_outside_array", "x & y", |k| {
            matches!(k, ParseErrorKind::UnexpectedToken { expected: "EOF", .. })
        }),
        ("tag_in_inline_math", r"a\tag{1}", |k| {
            matches!(k, ParseErrorKind::TagOnlyInDisplayMode)
        }),
        ("frac_in_text_mode", r"\text{\frac{1}{2}}", |k| {
            matches!(k, ParseErrorKind::NotAllowedInMode { .. })
        }),
        ("bad_color", r"\textcolor{##}{x}", |k| {
            matches!(k, ParseErrorKind::ExpectedColor(_))
        }),
        ("bad_unit", r"\kern{2zz}", |k| {
            matches!(k, ParseErrorKind::InvalidUnit(unit) if unit == "zz")
        }),
        ("double_infix", r"a \over b \over c", |k| {
            matches!(k, ParseErrorKind::MultipleInfix)
        }),
        ("expansion_loop", r"\def\x{\x}\x", |k| {
            matches!(k, ParseErrorKind::TooManyExpansions)
        }),
    ];
    for (name, input, check) in problems {
        let kind = err_kind(input);
        assert!(check(&kind), "{name}: got unexpected error {kind:?}");
    }
}

#[test]
fn verb_requires_matching_delimiter() {
    let kind = err_kind("\\verb|x\ny|");
    assert_eq!(kind, ParseErrorKind::UnterminatedVerb);
}

#[test]
fn strict_error_mode_rejects_nonstrict_input() {
    let settings = Settings {
        strict: StrictMode::Error,
        ..Settings::default()
    };
    let err = parse_tree("\u{4e2d}", &settings).unwrap_err();
    assert!(matches!(err.1, ParseErrorKind::Strict { code: "unicodeTextInMathMode", .. }));
    // Default policy only warns.
    assert!(parse_tree("\u{4e2d}", &Settings::default()).is_ok());
}

#[test]
fn untrusted_href_renders_as_error_colored_text() {
    // With the default warn policy, the command renders as colored
    // text instead of a link.
    let tree = parse_tree(r"\href{https://x.test/}{y}", &Settings::default()).unwrap();
    assert!(matches!(tree[0], boxtex::ParseNode::Color(_)));

    // Under strict=error it fails outright.
    let settings = Settings {
        strict: StrictMode::Error,
        ..Settings::default()
    };
    let err = parse_tree(r"\href{https://x.test/}{y}", &settings).unwrap_err();
    assert!(matches!(err.1, ParseErrorKind::Strict { code: "htmlExtension", .. }));

    // And with trust granted it becomes a real anchor.
    let settings = Settings {
        trust: TrustSetting::Bool(true),
        ..Settings::default()
    };
    let tree = parse_tree(r"\href{https://x.test/}{y}", &settings).unwrap();
    assert!(matches!(tree[0], boxtex::ParseNode::Href(_)));
}

#[test]
fn throw_on_error_false_yields_error_leaf() {
    let settings = Settings {
        throw_on_error: false,
        ..Settings::default()
    };
    let inputs = [r"\frac{1}", "x^", r"\asdf", "}"];
    for input in inputs {
        let rendered = render(input, &settings).unwrap();
        let html = rendered.html.expect("fallback html");
        assert!(html.node.has_class("katex-error"), "{input}");
        match &html.children[0] {
            HtmlNode::Symbol(symbol) => assert_eq!(symbol.text, input),
            other => panic!("expected a symbol leaf, got {other:?}"),
        }
        assert_eq!(html.node.style.color.as_deref(), Some("#cc0000"));
    }
}

#[test]
fn max_expand_is_configurable() {
    let mut settings = Settings::default();
    settings
        .macros
        .insert("a".to_string(), "b+b".to_string());
    settings.max_expand = 1;
    let err = parse_tree(r"\a", &settings).unwrap_err();
    assert_eq!(err.1, ParseErrorKind::TooManyExpansions);
}
