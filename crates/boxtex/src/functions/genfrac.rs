//! Generalized fractions: `\frac` and friends, `\binom`, `\genfrac`,
//! and the infix forms `\over`, `\atop`, `\choose`, `\above`.

use crate::build_common::{
    VListElem, VListParam, make_line_span, make_null_delimiter, make_span, make_span_s,
    make_vlist,
};
use crate::delimiter;
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::{ParseError, ParseErrorKind};
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode, TextNode};
use crate::options::Options;
use crate::parse_node::{FracStyle, GenFracNode, InfixNode, NodeInfo, ParseNode};
use crate::style::{self, Style};
use crate::types::ArgType;
use crate::unit::{calculate_size, make_em};

fn adjusted_style(group: &GenFracNode, options: &Options) -> Style {
    match group.size {
        FracStyle::Auto => options.style(),
        FracStyle::Display => style::DISPLAY,
        FracStyle::Text => {
            if options.style().size() == style::DISPLAY.size() {
                style::TEXT
            } else {
                options.style()
            }
        }
        FracStyle::Script => style::SCRIPT,
        FracStyle::ScriptScript => style::SCRIPTSCRIPT,
    }
}

pub(crate) fn html_builder(
    group: &GenFracNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let style = adjusted_style(group, options);
    let nstyle = style.frac_num();
    let dstyle = style.frac_den();

    let num_options = options.having_style(nstyle);
    let mut numerm = build_group(Some(&group.numer), &num_options, Some(options))?;
    if group.continued {
        // \cfrac numerators get struts so rows of fractions align.
        let h_strut = 8.5 / options.font_metrics().pt_per_em;
        let l_strut = 3.5 / options.font_metrics().pt_per_em;
        let node = numerm.node_mut();
        node.height = node.height.max(h_strut);
        node.depth = node.depth.max(l_strut);
    }

    let den_options = options.having_style(dstyle);
    let denomm = build_group(Some(&group.denom), &den_options, Some(options))?;

    let (rule, rule_width, rule_spacing) = if group.has_bar_line {
        let rule = match &group.bar_size {
            Some(bar_size) => {
                let thickness = calculate_size(bar_size, options);
                make_line_span("frac-line", options, Some(thickness))
            }
            None => make_line_span("frac-line", options, None),
        };
        let width = rule.node.height;
        (Some(rule), width, width)
    } else {
        (None, 0.0, options.font_metrics().default_rule_thickness)
    };

    // Rule 15b/15d shifts.
    let metrics = options.font_metrics();
    let (mut num_shift, clearance, mut denom_shift);
    if style.size() == style::DISPLAY.size() || group.size == FracStyle::Display {
        num_shift = metrics.num1;
        clearance = if rule_width > 0.0 {
            3.0 * rule_spacing
        } else {
            7.0 * rule_spacing
        };
        denom_shift = metrics.denom1;
    } else {
        if rule_width > 0.0 {
            num_shift = metrics.num2;
            clearance = rule_spacing;
        } else {
            num_shift = metrics.num3;
            clearance = 3.0 * rule_spacing;
        }
        denom_shift = metrics.denom2;
    }

    let frac = match rule {
        None => {
            let candidate_clearance =
                (num_shift - numerm.node().depth) - (denomm.node().height - denom_shift);
            if candidate_clearance < clearance {
                num_shift += (clearance - candidate_clearance) / 2.0;
                denom_shift += (clearance - candidate_clearance) / 2.0;
            }
            make_vlist(
                VListParam::IndividualShift(vec![
                    (VListElem::new(denomm), denom_shift),
                    (VListElem::new(numerm), -num_shift),
                ]),
                options,
            )
        }
        Some(rule) => {
            let axis_height = metrics.axis_height;
            if num_shift - numerm.node().depth - (axis_height + 0.5 * rule_width) < clearance {
                num_shift +=
                    clearance - (num_shift - numerm.node().depth - (axis_height + 0.5 * rule_width));
            }
            if axis_height - 0.5 * rule_width - (denomm.node().height - denom_shift) < clearance {
                denom_shift += clearance
                    - (axis_height - 0.5 * rule_width - (denomm.node().height - denom_shift));
            }
            let mid_shift = -(axis_height - 0.5 * rule_width);
            make_vlist(
                VListParam::IndividualShift(vec![
                    (VListElem::new(denomm), denom_shift),
                    (VListElem::new(HtmlNode::Span(rule)), mid_shift),
                    (VListElem::new(numerm), -num_shift),
                ]),
                options,
            )
        }
    };

    let mut frac = frac;
    let new_options = options.having_style(style);
    frac.node.height *= new_options.size_multiplier() / options.size_multiplier();
    frac.node.depth *= new_options.size_multiplier() / options.size_multiplier();

    // Rule 15e.
    let delim_size = if style.size() == style::DISPLAY.size() {
        metrics.delim1
    } else if style.size() == style::SCRIPTSCRIPT.size() {
        options.having_style(style::SCRIPT).font_metrics().delim2
    } else {
        metrics.delim2
    };

    let left_delim = match &group.left_delim {
        None => HtmlNode::Span(make_null_delimiter(options, vec!["mopen".to_string()])),
        Some(left) => HtmlNode::Span(delimiter::custom_sized_delim(
            left,
            delim_size,
            true,
            &options.having_style(style),
            group.info.mode,
            vec!["mopen".to_string()],
        )?),
    };
    let right_delim = if group.continued {
        HtmlNode::Span(make_span_s(Vec::new(), Vec::new()))
    } else {
        match &group.right_delim {
            None => HtmlNode::Span(make_null_delimiter(options, vec!["mclose".to_string()])),
            Some(right) => HtmlNode::Span(delimiter::custom_sized_delim(
                right,
                delim_size,
                true,
                &options.having_style(style),
                group.info.mode,
                vec!["mclose".to_string()],
            )?),
        }
    };

    let mut classes = vec!["mord".to_string()];
    classes.extend(new_options.sizing_classes(options));
    Ok(HtmlNode::Span(make_span(
        classes,
        vec![
            left_delim,
            HtmlNode::Span(make_span_s(
                vec!["mfrac".to_string()],
                vec![HtmlNode::Span(frac)],
            )),
            right_delim,
        ],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &GenFracNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let numer = mathml::build_group(Some(&group.numer), options)?;
    let denom = mathml::build_group(Some(&group.denom), options)?;
    let mut node = MathNode::new(MathNodeType::Mfrac, vec![numer, denom]);
    if !group.has_bar_line {
        node.set_attribute("linethickness", "0px");
    } else if let Some(bar_size) = &group.bar_size {
        node.set_attribute("linethickness", make_em(calculate_size(bar_size, options)));
    }

    let mut wrapped: MathmlNode = node.into();

    let style = adjusted_style(group, options);
    if style.size() != options.style().size() {
        let mut mstyle = MathNode::new(MathNodeType::Mstyle, vec![wrapped]);
        let display = if style.size() == style::DISPLAY.size() {
            "true"
        } else {
            "false"
        };
        mstyle.set_attribute("displaystyle", display);
        mstyle.set_attribute("scriptlevel", "0");
        wrapped = mstyle.into();
    }

    if group.left_delim.is_some() || group.right_delim.is_some() {
        let mut children = Vec::new();
        if let Some(left) = &group.left_delim {
            let mut mo = MathNode::new(
                MathNodeType::Mo,
                vec![MathmlNode::Text(TextNode::new(left.replace("\\", "")))],
            );
            mo.set_attribute("fence", "true");
            children.push(mo.into());
        }
        children.push(wrapped);
        if let Some(right) = &group.right_delim {
            let mut mo = MathNode::new(
                MathNodeType::Mo,
                vec![MathmlNode::Text(TextNode::new(right.replace("\\", "")))],
            );
            mo.set_attribute("fence", "true");
            children.push(mo.into());
        }
        wrapped = MathNode::new(MathNodeType::Mrow, children).into();
    }

    Ok(wrapped)
}

/// Infix nodes are rewritten by the parser; none survive to building.
pub(crate) fn infix_html_builder(
    _group: &InfixNode,
    _options: &Options,
) -> Result<HtmlNode, ParseError> {
    Ok(HtmlNode::Span(make_span_s(Vec::new(), Vec::new())))
}

pub(crate) fn infix_mathml_builder(
    _group: &InfixNode,
    _options: &Options,
) -> Result<MathmlNode, ParseError> {
    Ok(MathNode::empty(MathNodeType::Mrow).into())
}

fn delim_from_value(delim: Option<&str>) -> Option<String> {
    match delim {
        None | Some(".") | Some("") => None,
        Some(other) => Some(other.to_string()),
    }
}

fn frac_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let numer = args.next().expect("two arguments");
    let denom = args.next().expect("two arguments");

    let (has_bar_line, left_delim, right_delim, size, continued) =
        match context.func_name.as_str() {
            "\\dfrac" => (true, None, None, FracStyle::Display, false),
            "\\tfrac" => (true, None, None, FracStyle::Text, false),
            "\\cfrac" => (true, None, None, FracStyle::Display, true),
            "\\dbinom" => (
                false,
                Some("(".to_string()),
                Some(")".to_string()),
                FracStyle::Display,
                false,
            ),
            "\\tbinom" => (
                false,
                Some("(".to_string()),
                Some(")".to_string()),
                FracStyle::Text,
                false,
            ),
            "\\binom" => (
                false,
                Some("(".to_string()),
                Some(")".to_string()),
                FracStyle::Auto,
                false,
            ),
            _ => (true, None, None, FracStyle::Auto, false),
        };

    Ok(ParseNode::GenFrac(GenFracNode {
        info: NodeInfo::new(mode, context.loc),
        continued,
        numer: Box::new(numer),
        denom: Box::new(denom),
        has_bar_line,
        left_delim,
        right_delim,
        size,
        bar_size: None,
    }))
}

fn infix_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let replace_with = match context.func_name.as_str() {
        "\\over" => "\\frac",
        "\\choose" => "\\binom",
        "\\atop" => "\\\\atopfrac",
        "\\brace" => "\\\\bracefrac",
        "\\brack" => "\\\\brackfrac",
        _ => "\\\\abovefrac",
    };
    let size = if context.func_name == "\\above" {
        match args.into_iter().next() {
            Some(ParseNode::Size(size)) => Some(size.value),
            _ => unreachable!("size argument enforced by the registry"),
        }
    } else {
        None
    };
    Ok(ParseNode::Infix(InfixNode {
        info: NodeInfo::new(mode, context.loc),
        replace_with,
        size,
    }))
}

fn internal_frac_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let numer = args.next().expect("two arguments");
    let denom = args.next().expect("two arguments");
    let (has_bar_line, left_delim, right_delim) = match context.func_name.as_str() {
        "\\\\atopfrac" => (false, None, None),
        "\\\\bracefrac" => (false, Some("{".to_string()), Some("}".to_string())),
        "\\\\brackfrac" => (false, Some("[".to_string()), Some("]".to_string())),
        _ => (true, None, None),
    };
    Ok(ParseNode::GenFrac(GenFracNode {
        info: NodeInfo::new(mode, context.loc),
        continued: false,
        numer: Box::new(numer),
        denom: Box::new(denom),
        has_bar_line,
        left_delim,
        right_delim,
        size: FracStyle::Auto,
        bar_size: None,
    }))
}

fn above_frac_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let numer = args.next().expect("three arguments");
    let bar_size = match args.next() {
        Some(ParseNode::Infix(infix)) => infix.size,
        _ => {
            return Err(ParseError(
                context.loc,
                ParseErrorKind::Message("Invalid \\above fraction".to_string()),
            ));
        }
    };
    let denom = args.next().expect("three arguments");
    Ok(ParseNode::GenFrac(GenFracNode {
        info: NodeInfo::new(mode, context.loc),
        continued: false,
        numer: Box::new(numer),
        denom: Box::new(denom),
        has_bar_line: bar_size.map(|s| !s.is_zero()).unwrap_or(false),
        left_delim: None,
        right_delim: None,
        size: FracStyle::Auto,
        bar_size,
    }))
}

fn genfrac_handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let mut args = args.into_iter();
    let left_arg = args.next().expect("six arguments");
    let right_arg = args.next().expect("six arguments");
    let bar_arg = args.next().expect("six arguments");
    let style_arg = args.next().expect("six arguments");
    let numer = args.next().expect("six arguments");
    let denom = args.next().expect("six arguments");

    let delim_of = |node: &ParseNode| -> Option<String> {
        match node.base_elem() {
            ParseNode::Atom(atom) => delim_from_value(Some(&atom.text)),
            ParseNode::TextOrd(ord) => delim_from_value(Some(&ord.text)),
            ParseNode::OrdGroup(group) if group.body.is_empty() => None,
            _ => None,
        }
    };
    let left_delim = delim_of(&left_arg);
    let right_delim = delim_of(&right_arg);

    let (has_bar_line, bar_size) = match bar_arg {
        ParseNode::Size(size) if size.is_blank => (true, None),
        ParseNode::Size(size) => (!size.value.is_zero(), Some(size.value)),
        _ => (true, None),
    };

    let size = match style_arg.base_elem().text() {
        Some("0") => FracStyle::Display,
        Some("1") => FracStyle::Text,
        Some("2") => FracStyle::Script,
        Some("3") => FracStyle::ScriptScript,
        _ => FracStyle::Auto,
    };

    Ok(ParseNode::GenFrac(GenFracNode {
        info: NodeInfo::new(mode, context.loc),
        continued: false,
        numer: Box::new(numer),
        denom: Box::new(denom),
        has_bar_line,
        left_delim,
        right_delim,
        size,
        bar_size,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &[
            "\\frac", "\\dfrac", "\\tfrac", "\\cfrac", "\\binom", "\\dbinom", "\\tbinom",
        ],
        FunctionPropSpec::with_args(2).with_greediness(2).as_argument(),
        frac_handler,
    );
    add_functions(
        fns,
        &["\\over", "\\choose", "\\atop", "\\brace", "\\brack"],
        {
            let mut props = FunctionPropSpec::with_args(0);
            props.infix = true;
            props
        },
        infix_handler,
    );
    add_functions(
        fns,
        &["\\above"],
        {
            let mut props =
                FunctionPropSpec::with_args(1).with_arg_types(&[ArgType::Size]);
            props.infix = true;
            props
        },
        infix_handler,
    );
    add_functions(
        fns,
        &["\\\\atopfrac", "\\\\bracefrac", "\\\\brackfrac"],
        FunctionPropSpec::with_args(2),
        internal_frac_handler,
    );
    add_functions(
        fns,
        &["\\\\abovefrac"],
        FunctionPropSpec::with_args(3),
        above_frac_handler,
    );
    add_functions(
        fns,
        &["\\genfrac"],
        FunctionPropSpec::with_args(6).with_arg_types(&[
            ArgType::Original,
            ArgType::Original,
            ArgType::Size,
            ArgType::Original,
            ArgType::Original,
            ArgType::Original,
        ]),
        genfrac_handler,
    );
}
