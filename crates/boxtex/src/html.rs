//! The HTML (visual) builder: parse tree in, box tree out.

use crate::build_common::{self, make_span, make_span_s, try_combine_chars};
use crate::dom_tree::{CssStyle, DomSpan, HtmlNode, WithHtmlDomNode};
use crate::error::ParseError;
use crate::functions;
use crate::options::Options;
use crate::parse_node::ParseNode;
use crate::spacing_data::{DomType, spacing, tight_spacing};
use crate::unit::make_em;

/// Whether an expression is responsible for its own spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RealGroup {
    /// A partial group; the caller handles spacing.
    False,
    True,
    /// The outermost expression; newlines reset spacing state.
    Root,
}

pub(crate) type Surrounding = (Option<DomType>, Option<DomType>);

/// Builds a single parse node, dispatching on its variant. When
/// `base_options` differs in size, the result is wrapped in a sizing
/// span and its extents rescaled.
pub(crate) fn build_group(
    group: Option<&ParseNode>,
    options: &Options,
    base_options: Option<&Options>,
) -> Result<HtmlNode, ParseError> {
    let Some(group) = group else {
        return Ok(HtmlNode::Span(make_span_s(Vec::new(), Vec::new())));
    };

    let group_node = dispatch_html(group, options)?;

    if let Some(base_options) = base_options
        && options.size != base_options.size
    {
        let mut wrap = make_span(
            options.sizing_classes(base_options),
            vec![group_node],
            Some(options),
            CssStyle::default(),
        );
        let multiplier = options.size_multiplier() / base_options.size_multiplier();
        wrap.node.height *= multiplier;
        wrap.node.depth *= multiplier;
        return Ok(HtmlNode::Span(wrap));
    }
    Ok(group_node)
}

/// The visual dispatch table, total over the closed tag set.
fn dispatch_html(group: &ParseNode, options: &Options) -> Result<HtmlNode, ParseError> {
    match group {
        ParseNode::Atom(node) => Ok(functions::symbols::atom_html(node, options)),
        ParseNode::MathOrd(_) | ParseNode::TextOrd(_) => {
            Ok(functions::symbols::ord_html(group, options))
        }
        ParseNode::Spacing(node) => Ok(functions::symbols::spacing_html(node, options)),
        ParseNode::AccentToken(node) => Ok(functions::symbols::ord_like_html(node, options)),
        ParseNode::OpToken(node) => functions::op::op_token_html(node, options),
        ParseNode::Verb(node) => Ok(functions::verb::html_builder(node, options)),
        ParseNode::OrdGroup(node) => functions::ordgroup::html_builder(node, options),
        ParseNode::Styling(node) => functions::styling::html_builder(node, options),
        ParseNode::Sizing(node) => functions::sizing::html_builder(node, options),
        ParseNode::Color(node) => functions::color::html_builder(node, options),
        ParseNode::Font(node) => functions::font::html_builder(node, options),
        ParseNode::MClass(node) => functions::mclass::html_builder(node, options),
        ParseNode::HtmlMathml(node) => functions::html_mathml::html_builder(node, options),
        ParseNode::HBox(node) => functions::hbox::html_builder(node, options),
        ParseNode::SupSub(node) => functions::supsub::html_builder(node, options),
        ParseNode::GenFrac(node) => functions::genfrac::html_builder(node, options),
        ParseNode::Infix(node) => functions::genfrac::infix_html_builder(node, options),
        ParseNode::Sqrt(node) => functions::sqrt::html_builder(node, options),
        ParseNode::Overline(node) => functions::overline::html_builder(node, options),
        ParseNode::Underline(node) => functions::underline::html_builder(node, options),
        ParseNode::Accent(node) => functions::accent::html_builder(node, options),
        ParseNode::AccentUnder(node) => functions::accentunder::html_builder(node, options),
        ParseNode::HorizBrace(node) => {
            functions::horiz_brace::html_builder(node, None, options)
        }
        ParseNode::XArrow(node) => functions::arrow::html_builder(node, options),
        ParseNode::Enclose(node) => functions::enclose::html_builder(node, options),
        ParseNode::Op(node) => functions::op::html_builder(node, options, None),
        ParseNode::OperatorName(node) => {
            functions::operatorname::html_builder(node, options, None)
        }
        ParseNode::DelimSizing(node) => functions::delimsizing::html_builder(node, options),
        ParseNode::LeftRight(node) => functions::delimsizing::left_right_html(node, options),
        ParseNode::LeftRightRight(_) => {
            // The parser folds these into their leftright parent.
            Ok(HtmlNode::Span(make_span_s(Vec::new(), Vec::new())))
        }
        ParseNode::Middle(node) => {
            // A marker; the enclosing leftright builder replaces it
            // once the inner extent is known.
            Ok(functions::delimsizing::middle_marker_html(node, options))
        }
        ParseNode::Array(node) => crate::environments::array::html_builder(node, options),
        ParseNode::Kern(node) => Ok(functions::kern::html_builder(node, options)),
        ParseNode::Rule(node) => Ok(functions::rule::html_builder(node, options)),
        ParseNode::RaiseBox(node) => functions::raisebox::html_builder(node, options),
        ParseNode::Lap(node) => functions::lap::html_builder(node, options),
        ParseNode::Smash(node) => functions::smash::html_builder(node, options),
        ParseNode::Phantom(node) => functions::phantom::html_builder(node, options),
        ParseNode::HPhantom(node) => functions::phantom::hphantom_html(node, options),
        ParseNode::VPhantom(node) => functions::phantom::vphantom_html(node, options),
        ParseNode::MathChoice(node) => functions::mathchoice::html_builder(node, options),
        ParseNode::Href(node) => functions::href::html_builder(node, options),
        ParseNode::Url(node) => functions::href::url_html_builder(node, options),
        ParseNode::Includegraphics(node) => {
            functions::includegraphics::html_builder(node, options)
        }
        ParseNode::Raw(node) => Ok(functions::verb::raw_html(node, options)),
        ParseNode::Size(_) | ParseNode::ColorToken(_) | ParseNode::Internal(_) => {
            // Argument leaves never reach the builder on their own.
            Ok(HtmlNode::Span(make_span_s(Vec::new(), Vec::new())))
        }
        ParseNode::Tag(_) => {
            // Tags are peeled off by the root assembly.
            Ok(HtmlNode::Span(make_span_s(Vec::new(), Vec::new())))
        }
        ParseNode::Text(node) => functions::text::html_builder(node, options),
        ParseNode::Cr(node) => Ok(functions::cr::html_builder(node, options)),
    }
}

const BIN_LEFT_CANCELLER: &[&str] = &["leftmost", "mbin", "mopen", "mrel", "mop", "mpunct"];
const BIN_RIGHT_CANCELLER: &[&str] = &["rightmost", "mrel", "mclose", "mpunct"];

/// A position in the (possibly nested) built list. The path descends
/// through partial groups (fragments, anchors, enclosing spans).
#[derive(Debug, Clone)]
struct Slot {
    path: Vec<usize>,
    nonspace: bool,
    newline: bool,
}

fn partial_group_children(node: &HtmlNode) -> Option<&Vec<HtmlNode>> {
    match node {
        HtmlNode::Fragment(fragment) => Some(&fragment.children),
        HtmlNode::Anchor(anchor) => Some(&anchor.children),
        HtmlNode::Span(span) if span.node.has_class("enclosing") => Some(&span.children),
        _ => None,
    }
}

fn partial_group_children_mut(node: &mut HtmlNode) -> Option<&mut Vec<HtmlNode>> {
    match node {
        HtmlNode::Fragment(fragment) => Some(&mut fragment.children),
        HtmlNode::Anchor(anchor) => Some(&mut anchor.children),
        HtmlNode::Span(span) if span.node.has_class("enclosing") => Some(&mut span.children),
        _ => None,
    }
}

fn collect_slots(nodes: &[HtmlNode], prefix: &mut Vec<usize>, out: &mut Vec<Slot>) {
    for (i, node) in nodes.iter().enumerate() {
        prefix.push(i);
        if let Some(children) = partial_group_children(node) {
            collect_slots(children, prefix, out);
        } else {
            out.push(Slot {
                path: prefix.clone(),
                nonspace: !node.has_class("mspace"),
                newline: node.has_class("newline"),
            });
        }
        prefix.pop();
    }
}

fn node_at<'a>(nodes: &'a [HtmlNode], path: &[usize]) -> &'a HtmlNode {
    let (first, rest) = path.split_first().expect("non-empty path");
    let node = &nodes[*first];
    if rest.is_empty() {
        node
    } else {
        node_at(partial_group_children(node).expect("path descends partial group"), rest)
    }
}

fn node_at_mut<'a>(nodes: &'a mut [HtmlNode], path: &[usize]) -> &'a mut HtmlNode {
    let (first, rest) = path.split_first().expect("non-empty path");
    let node = &mut nodes[*first];
    if rest.is_empty() {
        node
    } else {
        node_at_mut(
            partial_group_children_mut(node).expect("path descends partial group"),
            rest,
        )
    }
}

fn first_class(node: &HtmlNode) -> Option<&str> {
    node.node().classes.first().map(String::as_str)
}

/// Builds a list of parse nodes into a flat visual list, applying atom
/// cancellation and inter-atom spacing when the list is a real group.
pub(crate) fn build_expression(
    expression: &[ParseNode],
    options: &Options,
    real_group: RealGroup,
    surrounding: Surrounding,
) -> Result<Vec<HtmlNode>, ParseError> {
    let mut groups: Vec<HtmlNode> = Vec::new();
    for expr in expression {
        let output = build_group(Some(expr), options, None)?;
        match output {
            HtmlNode::Fragment(fragment) => groups.extend(fragment.children),
            other => groups.push(other),
        }
    }
    try_combine_chars(&mut groups);

    if real_group == RealGroup::False {
        return Ok(groups);
    }

    // If the expression is a lone sizing or styling wrapper, the glue
    // between its neighbors scales with the inner size.
    let mut glue_options = options.clone();
    if expression.len() == 1 {
        match &expression[0] {
            ParseNode::Sizing(node) => glue_options = options.having_size(node.size),
            ParseNode::Styling(node) => glue_options = options.having_style(node.style),
            _ => {}
        }
    }

    let left_sentinel = surrounding
        .0
        .map(|t| t.as_class().to_string())
        .unwrap_or_else(|| "leftmost".to_string());
    let right_sentinel = surrounding
        .1
        .map(|t| t.as_class().to_string())
        .unwrap_or_else(|| "rightmost".to_string());
    let is_root = real_group == RealGroup::Root;

    // Bin-cancellation pass (TeXbook rules 5 and 6).
    let mut slots = Vec::new();
    collect_slots(&groups, &mut Vec::new(), &mut slots);

    let mut prev_class = left_sentinel;
    let mut prev_path: Option<Vec<usize>> = None;
    for slot in &slots {
        if is_root && slot.newline {
            prev_class = "leftmost".to_string();
            prev_path = None;
            continue;
        }
        if !slot.nonspace {
            continue;
        }
        let cur_class = first_class(node_at(&groups, &slot.path))
            .unwrap_or("")
            .to_string();
        if prev_class == "mbin" && BIN_RIGHT_CANCELLER.contains(&cur_class.as_str()) {
            if let Some(path) = &prev_path {
                node_at_mut(&mut groups, path).node_mut().classes[0] = "mord".to_string();
            }
            prev_class = "mord".to_string();
        }
        if cur_class == "mbin" && BIN_LEFT_CANCELLER.contains(&prev_class.as_str()) {
            node_at_mut(&mut groups, &slot.path).node_mut().classes[0] = "mord".to_string();
            prev_class = "mord".to_string();
        } else {
            prev_class = first_class(node_at(&groups, &slot.path))
                .unwrap_or("")
                .to_string();
        }
        prev_path = Some(slot.path.clone());
    }
    if prev_class == "mbin"
        && BIN_RIGHT_CANCELLER.contains(&right_sentinel.as_str())
        && let Some(path) = &prev_path
    {
        node_at_mut(&mut groups, path).node_mut().classes[0] = "mord".to_string();
    }

    // Spacing pass. Insertions are gathered first and applied in
    // reverse so the recorded paths stay valid.
    let mut slots = Vec::new();
    collect_slots(&groups, &mut Vec::new(), &mut slots);

    let mut insertions: Vec<(Vec<usize>, DomSpan)> = Vec::new();
    let mut prev: Option<&Slot> = None;
    for slot in &slots {
        if is_root && slot.newline {
            prev = None;
            continue;
        }
        if !slot.nonspace {
            continue;
        }
        if let Some(prev_slot) = prev {
            let left = first_class(node_at(&groups, &prev_slot.path))
                .and_then(DomType::from_class);
            let cur_node = node_at(&groups, &slot.path);
            let right = first_class(cur_node).and_then(DomType::from_class);
            if let (Some(left), Some(right)) = (left, right) {
                let space = if cur_node.has_class("mtight") {
                    tight_spacing(left, right)
                } else {
                    spacing(left, right)
                };
                if let Some(space) = space {
                    // The glue goes right after the previous atom, in
                    // the previous atom's own list.
                    insertions.push((
                        prev_slot.path.clone(),
                        build_common::make_glue(space, &glue_options),
                    ));
                }
            }
        }
        prev = Some(slot);
    }

    for (path, glue) in insertions.into_iter().rev() {
        let (index, parent) = path.split_last().expect("non-empty path");
        let list = if parent.is_empty() {
            &mut groups
        } else {
            partial_group_children_mut(node_at_mut(&mut groups, parent))
                .expect("path descends partial group")
        };
        list.insert(index + 1, HtmlNode::Span(glue));
    }

    Ok(groups)
}

/// The box class of a built node, descending into partial groups from
/// the given side.
pub(crate) fn dom_type_of(node: &HtmlNode, right_side: bool) -> Option<DomType> {
    let mut node = node;
    loop {
        match partial_group_children(node) {
            Some(children) if !children.is_empty() => {
                node = if right_side {
                    children.last().unwrap()
                } else {
                    children.first().unwrap()
                };
            }
            _ => break,
        }
    }
    first_class(node).and_then(DomType::from_class)
}

/// Wraps one unbreakable chunk in a "base" span with its strut.
fn build_html_unbreakable(children: Vec<HtmlNode>, options: &Options) -> DomSpan {
    let mut body = make_span(
        vec!["base".to_string()],
        children,
        Some(options),
        CssStyle::default(),
    );
    let mut strut = build_common::make_empty_span(vec!["strut".to_string()]);
    strut.node.style.height = Some(make_em(body.node.height + body.node.depth));
    if body.node.depth > 0.0 {
        strut.node.style.vertical_align = Some(make_em(-body.node.depth));
    }
    body.children.insert(0, HtmlNode::Span(strut));
    body
}

/// Assembles the outer `katex-html` span: chunks the expression into
/// unbreakable base spans (breaks are permitted after mbin, mrel, and
/// allowbreak unless nobreak follows) and appends the tag, if any.
pub(crate) fn build_html(tree: &[ParseNode], options: &Options) -> Result<DomSpan, ParseError> {
    // Strip off an outer tag wrapper, to be rendered last.
    let (tree, tag): (&[ParseNode], Option<&crate::parse_node::TagNode>) = match tree {
        [ParseNode::Tag(tag)] => (&tag.body, Some(tag)),
        other => (other, None),
    };

    let expression = build_expression(tree, options, RealGroup::Root, (None, None))?;

    let mut children: Vec<HtmlNode> = Vec::new();
    let mut parts: Vec<HtmlNode> = Vec::new();
    let mut i = 0;
    while i < expression.len() {
        let node = expression[i].clone();
        let is_newline = node.has_class("newline");
        let breakable = node.has_class("mbin")
            || node.has_class("mrel")
            || node.has_class("allowbreak");
        parts.push(node);
        if breakable {
            // Pull trailing glue into the chunk; nobreak vetoes the
            // break opportunity.
            let mut nobreak = false;
            while i + 1 < expression.len()
                && expression[i + 1].has_class("mspace")
                && !expression[i + 1].has_class("newline")
            {
                i += 1;
                let next = expression[i].clone();
                if next.has_class("nobreak") {
                    nobreak = true;
                }
                parts.push(next);
            }
            if !nobreak {
                children.push(HtmlNode::Span(build_html_unbreakable(
                    std::mem::take(&mut parts),
                    options,
                )));
            }
        } else if is_newline {
            // The newline belongs between chunks.
            let newline = parts.pop().unwrap();
            if !parts.is_empty() {
                children.push(HtmlNode::Span(build_html_unbreakable(
                    std::mem::take(&mut parts),
                    options,
                )));
            }
            children.push(newline);
        }
        i += 1;
    }
    if !parts.is_empty() {
        children.push(HtmlNode::Span(build_html_unbreakable(parts, options)));
    }

    let tag_span = match tag {
        Some(tag_node) => {
            let tag_expression =
                build_expression(&tag_node.tag, options, RealGroup::True, (None, None))?;
            let mut span = build_html_unbreakable(tag_expression, options);
            span.node.classes = vec!["tag".to_string()];
            Some(span)
        }
        None => None,
    };

    let mut html_node = make_span_s(vec!["katex-html".to_string()], children);
    html_node.set_attribute("aria-hidden", "true");

    if let Some(mut tag_span) = tag_span {
        // The tag's strut must span the whole line so that it centers
        // on the same baseline.
        let height = html_node.node.height;
        let depth = html_node.node.depth;
        if let Some(HtmlNode::Span(strut)) = tag_span.children.first_mut() {
            strut.node.style.height = Some(make_em(height + depth));
            if depth > 0.0 {
                strut.node.style.vertical_align = Some(make_em(-depth));
            }
        }
        html_node.children.push(HtmlNode::Span(tag_span));
        let node = &mut html_node.node;
        node.height = node.height.max(height);
        node.depth = node.depth.max(depth);
    }

    Ok(html_node)
}
