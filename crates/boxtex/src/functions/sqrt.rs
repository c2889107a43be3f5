//! `\sqrt` and its optional index.

use crate::build_common::{VListChild, VListElem, VListParam, make_span, make_span_s, make_vlist};
use crate::delimiter;
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::html::build_group;
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{NodeInfo, ParseNode, SqrtNode};
use crate::style;
use crate::unit::make_em;

fn wrap_fragment(node: HtmlNode) -> HtmlNode {
    match node {
        HtmlNode::Fragment(fragment) => {
            HtmlNode::Span(make_span_s(Vec::new(), fragment.children))
        }
        other => other,
    }
}

pub(crate) fn html_builder(group: &SqrtNode, options: &Options) -> Result<HtmlNode, ParseError> {
    // The radicand is built in a cramped style.
    let mut inner = wrap_fragment(build_group(
        Some(&group.body),
        &options.having_cramped_style(),
        None,
    )?);
    if inner.node().height == 0.0 {
        // An empty radicand still gets an x-height surd.
        inner.node_mut().height = options.font_metrics().x_height;
    }

    let metrics = options.font_metrics();
    let theta = metrics.default_rule_thickness;
    let phi = if options.style().id() < style::TEXT.id() {
        metrics.x_height
    } else {
        theta
    };

    // Rule 11 of appendix G.
    let mut line_clearance = theta + phi / 4.0;
    let min_delimiter_height = inner.node().height + inner.node().depth + line_clearance + theta;

    let image = delimiter::sqrt_image(min_delimiter_height, options);
    let rule_width = image.rule_width;
    let mut img = image.span;

    let delim_depth = img.node.height - rule_width;
    if delim_depth > inner.node().height + inner.node().depth + line_clearance {
        line_clearance =
            (line_clearance + delim_depth - inner.node().height - inner.node().depth) / 2.0;
    }

    let img_shift = img.node.height - inner.node().height - line_clearance - rule_width;
    inner.node_mut().style.padding_left = Some(make_em(image.advance_width));

    let inner_height = inner.node().height;
    let mut inner_elem = VListElem::new(inner);
    inner_elem.wrapper_classes = vec!["svg-align".to_string()];

    let body = make_vlist(
        VListParam::FirstBaseline(vec![
            VListChild::Elem(inner_elem),
            VListChild::Kern(-(inner_height + img_shift)),
            VListChild::elem(HtmlNode::Span(img)),
            VListChild::Kern(rule_width),
        ]),
        options,
    );

    let Some(index) = &group.index else {
        return Ok(HtmlNode::Span(make_span(
            vec!["mord".to_string(), "sqrt".to_string()],
            vec![HtmlNode::Span(body)],
            Some(options),
            CssStyle::default(),
        )));
    };

    // The index sits in scriptscript style, raised by 60% of the surd.
    let new_options = options.having_style(style::SCRIPTSCRIPT);
    let root = build_group(Some(index), &new_options, Some(options))?;
    let to_shift = 0.6 * (body.node.height - body.node.depth);
    let root_vlist = make_vlist(
        VListParam::Shift(-to_shift, vec![VListChild::elem(root)]),
        options,
    );
    let root_wrap = make_span_s(vec!["root".to_string()], vec![HtmlNode::Span(root_vlist)]);

    Ok(HtmlNode::Span(make_span(
        vec!["mord".to_string(), "sqrt".to_string()],
        vec![HtmlNode::Span(root_wrap), HtmlNode::Span(body)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &SqrtNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let body = mathml::build_group(Some(&group.body), options)?;
    Ok(match &group.index {
        Some(index) => {
            let index = mathml::build_group(Some(index), options)?;
            MathNode::new(MathNodeType::Mroot, vec![body, index]).into()
        }
        None => MathNode::new(MathNodeType::Msqrt, vec![body]).into(),
    })
}

fn handler(
    context: FunctionContext<'_, '_>,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let index = opt_args.into_iter().next().flatten();
    let body = args.into_iter().next().expect("one argument");
    Ok(ParseNode::Sqrt(SqrtNode {
        info: NodeInfo::new(mode, context.loc),
        body: Box::new(body),
        index: index.map(Box::new),
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\sqrt"],
        FunctionPropSpec::with_args(1).with_optional(1),
        handler,
    );
}
