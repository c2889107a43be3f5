//! User macros, runtime definitions, and the tag pipeline.

use boxtex::{ParseNode, Settings, parse_tree, render_to_markup};

#[test]
fn settings_macros_expand() {
    let mut settings = Settings::default();
    settings
        .macros
        .insert("half".to_string(), r"\frac{1}{2}".to_string());
    settings
        .macros
        .insert("withText".to_string(), r"\text{a b}".to_string());

    let tree = parse_tree(r"x = \half + \withText", &settings).unwrap();
    assert!(tree.iter().any(|n| matches!(n, ParseNode::GenFrac(_))));
    assert!(tree.iter().any(|n| matches!(n, ParseNode::Text(_))));
}

#[test]
fn settings_macros_take_arguments() {
    let mut settings = Settings::default();
    settings
        .macros
        .insert("sq".to_string(), r"{#1}^{2}".to_string());
    let tree = parse_tree(r"\sq{x+y}", &settings).unwrap();
    assert_eq!(tree.len(), 1);
    assert!(matches!(tree[0], ParseNode::SupSub(_)));
}

#[test]
fn macro_spacing_still_applies() {
    // A macro-produced relation participates in spacing like a typed
    // one.
    let mut settings = Settings::default();
    settings.macros.insert("eq".to_string(), "=".to_string());
    let markup = render_to_markup(r"x \eq 3", &settings).unwrap();
    assert!(markup.contains("0.2778em"));
}

#[test]
fn def_defines_for_the_rest_of_the_input() {
    let tree = parse_tree(r"\def\foo{ab}\foo", &Settings::default()).unwrap();
    let texts: Vec<&str> = tree.iter().filter_map(|n| n.text()).collect();
    assert_eq!(texts, ["a", "b"]);
}

#[test]
fn def_with_parameters() {
    let tree =
        parse_tree(r"\def\pair#1#2{(#1,#2)}\pair{x}{y}", &Settings::default()).unwrap();
    let texts: Vec<&str> = tree.iter().filter_map(|n| n.text()).collect();
    assert_eq!(texts, ["(", "x", ",", "y", ")"]);
}

#[test]
fn newcommand_respects_existing_definitions() {
    assert!(parse_tree(r"\newcommand\fresh{x}\fresh", &Settings::default()).is_ok());
    assert!(parse_tree(r"\newcommand\sin{x}", &Settings::default()).is_err());
    assert!(parse_tree(r"\renewcommand\sin{x}\sin", &Settings::default()).is_ok());
    assert!(parse_tree(r"\renewcommand\neverdefined{x}", &Settings::default()).is_err());
    // \providecommand keeps the existing definition.
    let tree =
        parse_tree(r"\providecommand\alpha{Q}\alpha", &Settings::default()).unwrap();
    assert_eq!(tree[0].text(), Some(r"\alpha"));
}

#[test]
fn group_scoping_of_definitions() {
    // A \def inside a group disappears with it.
    let err = parse_tree(r"{\def\foo{x}\foo}\foo", &Settings::default()).unwrap_err();
    assert!(matches!(
        err.1,
        boxtex::ParseErrorKind::UndefinedControlSequence(name) if name == "\\foo"
    ));
    // \gdef survives.
    assert!(parse_tree(r"{\gdef\foo{x}}\foo", &Settings::default()).is_ok());
}

#[test]
fn tag_wraps_the_display_equation() {
    let settings = Settings {
        display_mode: true,
        ..Settings::default()
    };
    let tree = parse_tree(r"a = b \tag{3.1}", &settings).unwrap();
    assert_eq!(tree.len(), 1);
    let ParseNode::Tag(tag) = &tree[0] else {
        panic!("expected tag wrapper, got {:?}", tree[0]);
    };
    assert!(!tag.body.is_empty());
    assert!(!tag.tag.is_empty());
}

#[test]
fn operatorname_star_takes_limits() {
    let settings = Settings {
        display_mode: true,
        ..Settings::default()
    };
    let tree = parse_tree(r"\operatorname*{ess\,sup}_{x} f", &settings).unwrap();
    let ParseNode::SupSub(supsub) = &tree[0] else {
        panic!("expected supsub, got {:?}", tree[0]);
    };
    let ParseNode::OperatorName(op) = supsub.base.as_deref().unwrap() else {
        panic!("expected operatorname base");
    };
    assert!(op.always_handle_sup_sub);
    assert!(op.limits);
}
