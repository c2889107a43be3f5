//! Parse-tree shape tests.

use boxtex::{ParseNode, Settings, parse_tree};

fn parse(input: &str) -> Vec<ParseNode> {
    parse_tree(input, &Settings::default()).unwrap()
}

#[test]
fn simple_expressions_parse() {
    let problems = [
        ("number", "4"),
        ("two_digits", "52"),
        ("binary", "9 + 12"),
        ("parens", "(42 + 9)"),
        ("group", "{4}"),
        ("fraction", r"\frac{3}{9}"),
        ("sqrt", r"\sqrt{2}"),
        ("sqrt_index", r"\sqrt[3]{2}"),
        ("operator", r"\sum_{i=0}^n i"),
        ("text", r"\text{hello world}"),
        ("matrix", r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}"),
        ("cases", r"\begin{cases} x & x > 0 \\ -x & x \le 0 \end{cases}"),
        ("aligned", r"\begin{aligned} a &= b \\ c &= d \end{aligned}"),
        ("left_right", r"\left( \frac12 \right)"),
        ("middle", r"\left( a \middle| b \right)"),
        ("accent", r"\hat x + \widehat{abc}"),
        ("color", r"\color{red} x + y"),
        ("sizing", r"{\tiny x} \Huge y"),
        ("verb", r"\verb|x_y| + 1"),
        ("phantom", r"\phantom{abc}\hphantom{x}\vphantom{y}"),
        ("enclose", r"\cancel{5}\fbox{f}\colorbox{aqua}{F}"),
        ("mathchoice", r"\mathchoice{D}{T}{S}{SS}"),
    ];
    for (name, input) in problems {
        let tree = parse_tree(input, &Settings::default());
        assert!(tree.is_ok(), "{name}: {input} failed: {:?}", tree.err());
        assert!(!tree.unwrap().is_empty(), "{name} produced an empty tree");
    }
}

#[test]
fn supsub_collapses_into_one_node() {
    let tree = parse("x^2_3");
    assert_eq!(tree.len(), 1);
    let ParseNode::SupSub(supsub) = &tree[0] else {
        panic!("expected supsub, got {:?}", tree[0]);
    };
    assert!(supsub.base.is_some());
    assert!(supsub.sup.is_some());
    assert!(supsub.sub.is_some());
}

#[test]
fn primes_become_superscripts() {
    let tree = parse("f''");
    let ParseNode::SupSub(supsub) = &tree[0] else {
        panic!("expected supsub");
    };
    let sup = supsub.sup.as_deref().unwrap();
    let ParseNode::OrdGroup(group) = sup else {
        panic!("expected prime group");
    };
    assert_eq!(group.body.len(), 2);
    assert!(group.body.iter().all(|n| n.text() == Some("\\prime")));
    assert!(supsub.sub.is_none());
}

#[test]
fn atoms_get_their_families() {
    let tree = parse("a+b=c");
    let families: Vec<&str> = tree
        .iter()
        .filter_map(|node| match node {
            ParseNode::Atom(atom) => Some(atom.family.as_class()),
            _ => None,
        })
        .collect();
    assert_eq!(families, ["mbin", "mrel"]);
}

#[test]
fn infix_over_rewrites_to_genfrac() {
    let tree = parse(r"a+1 \over b");
    assert_eq!(tree.len(), 1);
    let ParseNode::GenFrac(frac) = &tree[0] else {
        panic!("expected genfrac, got {:?}", tree[0]);
    };
    assert!(frac.has_bar_line);
    let ParseNode::OrdGroup(numer) = frac.numer.as_ref() else {
        panic!("expected numerator group");
    };
    assert_eq!(numer.body.len(), 3);
}

#[test]
fn choose_has_paren_delimiters() {
    let tree = parse(r"n \choose k");
    let ParseNode::GenFrac(frac) = &tree[0] else {
        panic!("expected genfrac");
    };
    assert!(!frac.has_bar_line);
    assert_eq!(frac.left_delim.as_deref(), Some("("));
    assert_eq!(frac.right_delim.as_deref(), Some(")"));
}

#[test]
fn left_right_records_delimiters() {
    let tree = parse(r"\left[ x \right)");
    let ParseNode::LeftRight(leftright) = &tree[0] else {
        panic!("expected leftright");
    };
    assert_eq!(leftright.left, "[");
    assert_eq!(leftright.right, ")");
    assert!(!leftright.body.is_empty());
}

#[test]
fn environment_builds_rows_and_columns() {
    let tree = parse(r"\begin{matrix} a & b \\ c & d \end{matrix}");
    let ParseNode::Array(array) = &tree[0] else {
        panic!("expected array, got {:?}", tree[0]);
    };
    assert_eq!(array.rows.len(), 2);
    assert_eq!(array.rows[0].len(), 2);
    assert_eq!(array.rows[1].len(), 2);
}

#[test]
fn limits_modifier_binds_to_operators() {
    let tree = parse(r"\sum\nolimits_i");
    let ParseNode::SupSub(supsub) = &tree[0] else {
        panic!("expected supsub");
    };
    let ParseNode::Op(op) = supsub.base.as_deref().unwrap() else {
        panic!("expected op base");
    };
    assert!(!op.limits);
    assert!(op.always_handle_sup_sub);
}

#[test]
fn text_mode_forms_ligatures() {
    let tree = parse(r"\text{a--b}");
    let ParseNode::Text(text) = &tree[0] else {
        panic!("expected text node");
    };
    let texts: Vec<&str> = text.body.iter().filter_map(|n| n.text()).collect();
    assert_eq!(texts, ["a", "\u{2013}", "b"]);
}

#[test]
fn source_ranges_cover_tokens() {
    let input = r"ab\sqrt{c}";
    let tree = parse(input);
    let sqrt = tree
        .iter()
        .find(|node| matches!(node, ParseNode::Sqrt(_)))
        .expect("a sqrt node");
    let range = sqrt.loc().expect("sqrt carries a range");
    assert_eq!(range.start, 2);
}
