//! Horizontal kerns: `\kern`, `\mkern`, `\hskip`, `\mskip`, `\hspace`.

use crate::dom_tree::HtmlNode;
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{KernNode, NodeInfo, ParseNode};
use crate::types::ArgType;
use crate::unit::{Unit, calculate_size, make_em};

pub(crate) fn html_builder(group: &KernNode, options: &Options) -> HtmlNode {
    super::symbols::make_space_span(group.dimension, options)
}

pub(crate) fn mathml_builder(group: &KernNode, options: &Options) -> MathmlNode {
    let size = calculate_size(&group.dimension, options);
    let mut node = MathNode::empty(MathNodeType::Mspace);
    node.set_attribute("width", make_em(size));
    node.into()
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let size = match args.into_iter().next() {
        Some(ParseNode::Size(size)) => size,
        _ => unreachable!("size argument enforced by the registry"),
    };

    // mu units belong with the math-unit commands, and only there.
    let math_function = matches!(context.func_name.as_str(), "\\mkern" | "\\mskip");
    let is_mu = size.value.unit == Unit::Mu;
    if math_function && !is_mu {
        context.parser.settings.report_nonstrict(
            "mathVsTextUnits",
            &format!("LaTeX's {} supports only mu units, not {:?} units", context.func_name, size.value.unit),
            context.loc,
        )?;
    }
    if !math_function && is_mu {
        context.parser.settings.report_nonstrict(
            "mathVsTextUnits",
            &format!("LaTeX's {} doesn't support mu units", context.func_name),
            context.loc,
        )?;
    }

    Ok(ParseNode::Kern(KernNode {
        info: NodeInfo::new(mode, context.loc),
        dimension: size.value,
    }))
}

fn fixed_space_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let dimension = match context.func_name.as_str() {
        "\\," => crate::unit::Measurement::mu(3.0),
        "\\:" | "\\>" => crate::unit::Measurement::mu(4.0),
        "\\;" => crate::unit::Measurement::mu(5.0),
        "\\!" => crate::unit::Measurement::mu(-3.0),
        "\\enspace" => crate::unit::Measurement::em(0.5),
        "\\quad" => crate::unit::Measurement::em(1.0),
        "\\qquad" => crate::unit::Measurement::em(2.0),
        _ => crate::unit::Measurement::em(0.0),
    };
    Ok(ParseNode::Kern(KernNode {
        info: NodeInfo::new(mode, context.loc),
        dimension,
    }))
}

fn break_marker_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    Ok(ParseNode::Spacing(crate::parse_node::SymNode {
        info: NodeInfo::new(mode, context.loc),
        text: context.func_name.clone(),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\kern", "\\mkern", "\\hskip", "\\mskip", "\\hspace"],
        FunctionPropSpec::with_args(1)
            .in_text()
            .with_arg_types(&[ArgType::Size])
            .as_primitive(),
        handler,
    );
    add_functions(
        fns,
        &["\\,", "\\:", "\\>", "\\;", "\\!", "\\enspace", "\\quad", "\\qquad"],
        FunctionPropSpec::with_args(0).in_text(),
        fixed_space_handler,
    );
    add_functions(
        fns,
        &["\\allowbreak", "\\nobreak"],
        FunctionPropSpec::with_args(0).in_text(),
        break_marker_handler,
    );
}
