//! Delimiter-sizing commands and `\left ... \middle ... \right`.

use crate::build_common::{make_null_delimiter, make_span};
use crate::delimiter;
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::{ParseError, ParseErrorKind};
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::{RealGroup, build_expression};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::{
    DelimSizingNode, DelimiterClass, LeftRightNode, LeftRightRightNode, MiddleNode, NodeInfo,
    ParseNode,
};
use crate::spacing_data::DomType;

/// Every spelling the delimiter commands accept; `.` is the empty
/// delimiter.
const DELIMITERS: &[&str] = &[
    "(", "\\lparen", ")", "\\rparen", "[", "\\lbrack", "]", "\\rbrack", "\\{", "\\lbrace",
    "\\}", "\\rbrace", "\\lfloor", "\\rfloor", "\u{230a}", "\u{230b}", "\\lceil", "\\rceil",
    "\u{2308}", "\u{2309}", "<", ">", "\\langle", "\u{27e8}", "\\rangle", "\u{27e9}", "\\lt",
    "\\gt", "\\lvert", "\\rvert", "\\lVert", "\\rVert", "\\lgroup", "\\rgroup", "\u{27ee}",
    "\u{27ef}", "\\lmoustache", "\\rmoustache", "\u{23b0}", "\u{23b1}", "/", "\\backslash",
    "|", "\\vert", "\\|", "\\Vert", "\\uparrow", "\\downarrow", "\\updownarrow", "\\Uparrow",
    "\\Downarrow", "\\Updownarrow", "\\surd", ".",
];

/// Checks that an argument is one of the delimiter symbols and returns
/// its spelling.
fn check_delimiter(node: &ParseNode, context_name: &'static str) -> Result<String, ParseError> {
    let text = match node.base_elem() {
        ParseNode::Atom(atom) => Some(atom.text.clone()),
        ParseNode::TextOrd(ord) => Some(ord.text.clone()),
        ParseNode::MathOrd(ord) => Some(ord.text.clone()),
        _ => None,
    };
    match text {
        Some(text) if DELIMITERS.contains(&text.as_str()) => Ok(text),
        Some(text) => Err(ParseError(
            node.loc(),
            ParseErrorKind::InvalidDelimiter {
                got: text,
                context: context_name,
            },
        )),
        None => Err(ParseError(
            node.loc(),
            ParseErrorKind::InvalidDelimiterType {
                context: context_name,
            },
        )),
    }
}

pub(crate) fn html_builder(
    group: &DelimSizingNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    if group.delim == "." {
        return Ok(HtmlNode::Span(make_null_delimiter(
            options,
            vec![group.mclass.as_class().to_string()],
        )));
    }
    let span = delimiter::sized_delim(
        &group.delim,
        group.size,
        options,
        group.info.mode,
        vec![group.mclass.as_class().to_string()],
    )?;
    Ok(HtmlNode::Span(span))
}

pub(crate) fn mathml_builder(group: &DelimSizingNode) -> MathmlNode {
    if group.delim == "." {
        return MathNode::empty(MathNodeType::Mo).into();
    }
    let mut mo = MathNode::new(
        MathNodeType::Mo,
        vec![MathmlNode::Text(mathml::make_text(
            &group.delim,
            group.info.mode,
        ))],
    );
    if matches!(
        group.mclass,
        DelimiterClass::Open | DelimiterClass::Close
    ) {
        mo.set_attribute("fence", "true");
    } else {
        // Sized non-fence delimiters should not act as fences.
        mo.set_attribute("fence", "false");
    }
    mo.set_attribute("stretchy", "true");
    let size = crate::unit::make_em(delimiter::SIZE_TO_MAX_HEIGHT[group.size]);
    mo.set_attribute("minsize", size.clone());
    mo.set_attribute("maxsize", size);
    mo.into()
}

pub(crate) fn left_right_html(
    group: &LeftRightNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    // Middle delimiters build as markers first; they are replaced once
    // the inner extent is known, with the very options used here.
    let mut inner = build_expression(
        &group.body,
        options,
        RealGroup::True,
        (Some(DomType::Open), Some(DomType::Close)),
    )?;

    let mut inner_height: f64 = 0.0;
    let mut inner_depth: f64 = 0.0;
    let mut had_middle = false;
    for child in &inner {
        if child.has_class("middle-marker") {
            had_middle = true;
        } else {
            inner_height = inner_height.max(child.node().height);
            inner_depth = inner_depth.max(child.node().depth);
        }
    }
    // The delimiters are in the current size, but the inner extent was
    // measured in child sizes.
    inner_height *= options.size_multiplier();
    inner_depth *= options.size_multiplier();

    let left_delim = if group.left == "." {
        HtmlNode::Span(make_null_delimiter(options, vec!["mopen".to_string()]))
    } else {
        HtmlNode::Span(delimiter::left_right_delim(
            &group.left,
            inner_height,
            inner_depth,
            options,
            group.info.mode,
            vec!["mopen".to_string()],
        )?)
    };

    if had_middle {
        for child in &mut inner {
            if child.has_class("middle-marker") {
                let delim = child
                    .node()
                    .classes
                    .iter()
                    .find_map(|c| c.strip_prefix("middle-delim-"))
                    .map(str::to_string);
                if let Some(delim) = delim {
                    let replacement = if delim == "." {
                        make_null_delimiter(options, Vec::new())
                    } else {
                        delimiter::left_right_delim(
                            &delim,
                            inner_height,
                            inner_depth,
                            options,
                            group.info.mode,
                            Vec::new(),
                        )?
                    };
                    *child = HtmlNode::Span(replacement);
                }
            }
        }
    }

    let right_delim = if group.right == "." {
        HtmlNode::Span(make_null_delimiter(options, vec!["mclose".to_string()]))
    } else {
        let right_options = match &group.right_color {
            Some(color) => options.with_color(color.clone()),
            None => options.clone(),
        };
        HtmlNode::Span(delimiter::left_right_delim(
            &group.right,
            inner_height,
            inner_depth,
            &right_options,
            group.info.mode,
            vec!["mclose".to_string()],
        )?)
    };

    let mut children = Vec::with_capacity(inner.len() + 2);
    children.push(left_delim);
    children.extend(inner);
    children.push(right_delim);

    Ok(HtmlNode::Span(make_span(
        vec!["minner".to_string()],
        children,
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn left_right_mathml(
    group: &LeftRightNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let mut children = Vec::new();
    if group.left != "." {
        let mut left = MathNode::new(
            MathNodeType::Mo,
            vec![MathmlNode::Text(mathml::make_text(
                &group.left,
                group.info.mode,
            ))],
        );
        left.set_attribute("fence", "true");
        children.push(left.into());
    }
    children.extend(mathml::build_expression(&group.body, options)?);
    if group.right != "." {
        let mut right = MathNode::new(
            MathNodeType::Mo,
            vec![MathmlNode::Text(mathml::make_text(
                &group.right,
                group.info.mode,
            ))],
        );
        right.set_attribute("fence", "true");
        if let Some(color) = &group.right_color {
            right.set_attribute("mathcolor", color.clone());
        }
        children.push(right.into());
    }
    Ok(MathNode::new(MathNodeType::Mrow, children).into())
}

/// The placeholder span a `\middle` builds inside its leftright body.
pub(crate) fn middle_marker_html(group: &MiddleNode, options: &Options) -> HtmlNode {
    let classes = vec![
        "middle-marker".to_string(),
        format!("middle-delim-{}", group.delim),
    ];
    HtmlNode::Span(make_span(
        classes,
        Vec::new(),
        Some(options),
        CssStyle::default(),
    ))
}

pub(crate) fn middle_mathml(group: &MiddleNode, _options: &Options) -> MathmlNode {
    if group.delim == "." {
        return MathNode::empty(MathNodeType::Mo).into();
    }
    let mut mo = MathNode::new(
        MathNodeType::Mo,
        vec![MathmlNode::Text(mathml::make_text(
            &group.delim,
            group.info.mode,
        ))],
    );
    mo.set_attribute("fence", "true");
    mo.set_attribute("lspace", "0.05em");
    mo.set_attribute("rspace", "0.05em");
    mo.into()
}

fn delim_class(func_name: &str) -> (usize, DelimiterClass) {
    let size = match func_name {
        "\\bigl" | "\\bigr" | "\\bigm" | "\\big" => 1,
        "\\Bigl" | "\\Bigr" | "\\Bigm" | "\\Big" => 2,
        "\\biggl" | "\\biggr" | "\\biggm" | "\\bigg" => 3,
        _ => 4,
    };
    let class = if func_name.ends_with('l') {
        DelimiterClass::Open
    } else if func_name.ends_with('r') {
        DelimiterClass::Close
    } else if func_name.ends_with('m') {
        DelimiterClass::Rel
    } else {
        DelimiterClass::Ord
    };
    (size, class)
}

fn sized_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let arg = args.into_iter().next().expect("one argument");
    let delim = check_delimiter(&arg, "delimiter sizing")?;
    let (size, mclass) = delim_class(&context.func_name);
    Ok(ParseNode::DelimSizing(DelimSizingNode {
        info: NodeInfo::new(mode, context.loc),
        size,
        mclass,
        delim,
    }))
}

fn left_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let loc = context.loc;
    let arg = args.into_iter().next().expect("one argument");
    let delim = check_delimiter(&arg, "\\left")?;

    let parser = context.parser;
    parser.leftright_depth += 1;
    let body = parser.parse_expression(false, Some("\\right"))?;
    parser.leftright_depth -= 1;

    // Consume the \right that terminated the expression.
    parser.expect("\\right", false)?;
    let right = parser.parse_function(None)?;
    let Some(ParseNode::LeftRightRight(right)) = right else {
        return Err(ParseError(
            loc,
            ParseErrorKind::Message("Failed to parse \\right".to_string()),
        ));
    };

    Ok(ParseNode::LeftRight(LeftRightNode {
        info: NodeInfo::new(mode, loc),
        body,
        left: delim,
        right: right.delim,
        right_color: right.color,
    }))
}

fn right_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let arg = args.into_iter().next().expect("one argument");
    let delim = check_delimiter(&arg, "\\right")?;
    // \textcolor wrapping the \right delimiter colors it.
    let color = context.parser.current_color();
    Ok(ParseNode::LeftRightRight(LeftRightRightNode {
        info: NodeInfo::new(mode, context.loc),
        delim,
        color,
    }))
}

fn middle_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let arg = args.into_iter().next().expect("one argument");
    let delim = check_delimiter(&arg, "\\middle")?;
    if context.parser.leftright_depth == 0 {
        return Err(ParseError(context.loc, ParseErrorKind::MiddleWithoutLeft));
    }
    Ok(ParseNode::Middle(MiddleNode {
        info: NodeInfo::new(mode, context.loc),
        delim,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\bigl", "\\Bigl", "\\biggl", "\\Biggl", "\\bigr", "\\Bigr", "\\biggr",
            "\\Biggr", "\\bigm", "\\Bigm", "\\biggm", "\\Biggm", "\\big", "\\Big", "\\bigg",
            "\\Bigg",
        ],
        FunctionPropSpec::with_args(1).with_arg_types(&[crate::types::ArgType::Primitive]),
        sized_handler,
    );
    add_functions(
        fns,
        &["\\left"],
        FunctionPropSpec::with_args(1)
            .with_arg_types(&[crate::types::ArgType::Primitive])
            .as_primitive(),
        left_handler,
    );
    add_functions(
        fns,
        &["\\right"],
        FunctionPropSpec::with_args(1)
            .with_arg_types(&[crate::types::ArgType::Primitive])
            .as_primitive(),
        right_handler,
    );
    add_functions(
        fns,
        &["\\middle"],
        FunctionPropSpec::with_args(1).with_arg_types(&[crate::types::ArgType::Primitive]),
        middle_handler,
    );
}
