//! Superscripts and subscripts (TeXbook appendix G, rule 18).
//!
//! The parser collapses `^` and `_` chains into one supsub node; this
//! builder positions the scripts, deferring to the op/operatorname and
//! horizontal-brace builders when the base handles its own limits.

use crate::build_common::{VListChild, VListElem, VListParam, make_span, make_vlist};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::html::{build_group, dom_type_of};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{ParseNode, SupSubNode};
use crate::style;
use crate::unit::make_em;

/// Whether the base's own builder places the scripts (as limits).
fn delegate_to_base(group: &SupSubNode, options: &Options) -> bool {
    match group.base.as_deref() {
        Some(ParseNode::Op(op)) => {
            op.limits
                && (options.style().size() == style::DISPLAY.size() || op.always_handle_sup_sub)
        }
        Some(ParseNode::OperatorName(op)) => {
            op.always_handle_sup_sub
                || (op.limits && options.style().size() == style::DISPLAY.size())
        }
        Some(ParseNode::OpToken(token)) => {
            super::op::op_node_for_token(token).limits
                && options.style().size() == style::DISPLAY.size()
        }
        Some(ParseNode::HorizBrace(brace)) => brace.is_over == group.sup.is_some(),
        _ => false,
    }
}

pub(crate) fn html_builder(
    group: &SupSubNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    if delegate_to_base(group, options) {
        match group.base.as_deref() {
            Some(ParseNode::Op(op)) => {
                return super::op::html_builder(op, options, Some(group));
            }
            Some(ParseNode::OpToken(token)) => {
                let op = super::op::op_node_for_token(token);
                return super::op::html_builder(&op, options, Some(group));
            }
            Some(ParseNode::OperatorName(op)) => {
                return super::operatorname::html_builder(op, options, Some(group));
            }
            Some(ParseNode::HorizBrace(brace)) => {
                return super::horiz_brace::html_builder(brace, Some(group), options);
            }
            _ => unreachable!("delegate_to_base covers these variants"),
        }
    }

    let base_elem = build_group(group.base.as_deref(), options, None)?;
    let metrics = options.font_metrics();
    let is_character_box = group
        .base
        .as_deref()
        .map(ParseNode::is_character_box)
        .unwrap_or(false);

    let mut supm: Option<HtmlNode> = None;
    let mut sup_shift = 0.0;
    if let Some(sup) = group.sup.as_deref() {
        let new_options = options.having_style(options.style().sup());
        let built = build_group(Some(sup), &new_options, Some(options))?;
        if !is_character_box {
            sup_shift = base_elem.node().height
                - new_options.font_metrics().sup_drop * new_options.size_multiplier()
                    / options.size_multiplier();
        }
        supm = Some(built);
    }

    let mut subm: Option<HtmlNode> = None;
    let mut sub_shift = 0.0;
    if let Some(sub) = group.sub.as_deref() {
        let new_options = options.having_style(options.style().sub());
        let built = build_group(Some(sub), &new_options, Some(options))?;
        if !is_character_box {
            sub_shift = base_elem.node().depth
                + new_options.font_metrics().sub_drop * new_options.size_multiplier()
                    / options.size_multiplier();
        }
        subm = Some(built);
    }

    let min_sup_shift = if options.style() == style::DISPLAY {
        metrics.sup1
    } else if options.style().cramped() {
        metrics.sup3
    } else {
        metrics.sup2
    };

    // Scripts get a little italic-correcting kern on the right.
    let multiplier = options.size_multiplier();
    let margin_right = make_em(0.5 / metrics.pt_per_em / multiplier);
    let margin_left = match &base_elem {
        HtmlNode::Symbol(symbol) if group.sub.is_some() => Some(make_em(-symbol.italic)),
        _ => None,
    };

    let supsub = match (supm, subm) {
        (Some(supm), Some(subm)) => {
            sup_shift = sup_shift
                .max(min_sup_shift)
                .max(supm.node().depth + 0.25 * metrics.x_height);
            sub_shift = sub_shift.max(metrics.sub2);

            let rule_width = metrics.default_rule_thickness;
            // Rule 18e.
            let max_width = 4.0 * rule_width;
            if (sup_shift - supm.node().depth) - (subm.node().height - sub_shift) < max_width {
                sub_shift = max_width - (sup_shift - supm.node().depth) + subm.node().height;
                let psi = 0.8 * metrics.x_height - (sup_shift - supm.node().depth);
                if psi > 0.0 {
                    sup_shift += psi;
                    sub_shift -= psi;
                }
            }

            let mut sub_elem = VListElem::new(subm);
            sub_elem.margin_right = Some(margin_right.clone());
            sub_elem.margin_left = margin_left;
            let mut sup_elem = VListElem::new(supm);
            sup_elem.margin_right = Some(margin_right);
            make_vlist(
                VListParam::IndividualShift(vec![(sub_elem, sub_shift), (sup_elem, -sup_shift)]),
                options,
            )
        }
        (None, Some(subm)) => {
            // Rule 18b.
            sub_shift = sub_shift
                .max(metrics.sub1)
                .max(subm.node().height - 0.8 * metrics.x_height);
            let mut sub_elem = VListElem::new(subm);
            sub_elem.margin_right = Some(margin_right);
            sub_elem.margin_left = margin_left;
            make_vlist(
                VListParam::IndividualShift(vec![(sub_elem, sub_shift)]),
                options,
            )
        }
        (Some(supm), None) => {
            // Rule 18c/d.
            sup_shift = sup_shift
                .max(min_sup_shift)
                .max(supm.node().depth + 0.25 * metrics.x_height);
            let mut sup_elem = VListElem::new(supm);
            sup_elem.margin_right = Some(margin_right);
            make_vlist(
                VListParam::IndividualShift(vec![(sup_elem, -sup_shift)]),
                options,
            )
        }
        (None, None) => unreachable!("supsub nodes carry at least one script"),
    };

    let mclass = dom_type_of(&base_elem, true)
        .map(|t| t.as_class())
        .unwrap_or("mord");
    let scripts = make_span(
        vec!["msupsub".to_string()],
        vec![HtmlNode::Span(supsub)],
        Some(options),
        CssStyle::default(),
    );
    Ok(HtmlNode::Span(make_span(
        vec![mclass.to_string()],
        vec![base_elem, HtmlNode::Span(scripts)],
        Some(options),
        CssStyle::default(),
    )))
}

pub(crate) fn mathml_builder(
    group: &SupSubNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    // Operators with limits render as under/over scripts.
    let use_under_over = match group.base.as_deref() {
        Some(ParseNode::Op(op)) => {
            op.limits && options.style() == crate::style::DISPLAY
        }
        Some(ParseNode::OpToken(token)) => {
            super::op::op_node_for_token(token).limits
                && options.style() == crate::style::DISPLAY
        }
        Some(ParseNode::OperatorName(op)) => {
            op.always_handle_sup_sub
                || (op.limits && options.style() == crate::style::DISPLAY)
        }
        Some(ParseNode::HorizBrace(brace)) => brace.is_over == group.sup.is_some(),
        _ => false,
    };

    let base = mathml::build_group(group.base.as_deref(), options)?;
    let sup = group
        .sup
        .as_deref()
        .map(|sup| mathml::build_group(Some(sup), options))
        .transpose()?;
    let sub = group
        .sub
        .as_deref()
        .map(|sub| mathml::build_group(Some(sub), options))
        .transpose()?;

    let node_type = match (&sup, &sub) {
        (Some(_), Some(_)) => {
            if use_under_over {
                MathNodeType::Munderover
            } else {
                MathNodeType::Msubsup
            }
        }
        (Some(_), None) => {
            if use_under_over {
                MathNodeType::Mover
            } else {
                MathNodeType::Msup
            }
        }
        (None, Some(_)) => {
            if use_under_over {
                MathNodeType::Munder
            } else {
                MathNodeType::Msub
            }
        }
        (None, None) => MathNodeType::Mrow,
    };

    let mut children = vec![base];
    if let Some(sub) = sub {
        children.push(sub);
    }
    if let Some(sup) = sup {
        children.push(sup);
    }
    Ok(MathNode::new(node_type, children).into())
}
