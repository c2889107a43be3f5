//! The array-like environments: array, the matrix family, cases,
//! aligned, gathered, and alignedat.

use crate::build_common::{
    VListElem, VListParam, make_empty_span, make_span, make_span_s, make_vlist,
};
use crate::dom_tree::{CssStyle, HtmlNode, WithHtmlDomNode};
use crate::error::{ParseError, ParseErrorKind};
use crate::mathml;
use crate::mathml_tree::{MathNode, MathNodeType, MathmlNode};
use crate::options::Options;
use crate::parse_node::{
    AlignSpec, ArrayNode, ColSeparationType, LeftRightNode, NodeInfo, ParseNode, StylingNode,
};
use crate::parser::Parser;
use crate::style;
use crate::unit::{Measurement, calculate_size, make_em};

use super::{EnvContext, EnvMap, EnvSpec};

/// Per-environment knobs for [`parse_array`].
struct ArrayConfig {
    hskip_before_and_after: bool,
    add_jot: bool,
    cols: Vec<AlignSpec>,
    arraystretch: f64,
    col_separation_type: Option<ColSeparationType>,
    /// Maximum number of cells per row, when the environment fixes it.
    max_num_cols: Option<usize>,
    /// Cell style override (e.g. matrix bodies are text style).
    cell_style: Option<crate::style::Style>,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        ArrayConfig {
            hskip_before_and_after: false,
            add_jot: false,
            cols: Vec::new(),
            arraystretch: 1.0,
            col_separation_type: None,
            max_num_cols: None,
            cell_style: None,
        }
    }
}

/// Consumes any `\hline`/`\hdashline` before the next row; `true`
/// entries are dashed.
fn get_h_lines(parser: &mut Parser<'_>) -> Result<Vec<bool>, ParseError> {
    let mut h_lines = Vec::new();
    parser.consume_spaces()?;
    loop {
        let next = parser.fetch()?.text.clone();
        match next.as_ref() {
            "\\hline" => {
                parser.consume()?;
                h_lines.push(false);
            }
            "\\hdashline" => {
                parser.consume()?;
                h_lines.push(true);
            }
            _ => break,
        }
        parser.consume_spaces()?;
    }
    Ok(h_lines)
}

fn parse_array(
    parser: &mut Parser<'_>,
    config: ArrayConfig,
    loc: Option<crate::token::SourceRange>,
) -> Result<ArrayNode, ParseError> {
    let mode = parser.mode;
    parser.gullet.begin_group();

    let mut rows: Vec<Vec<ParseNode>> = Vec::new();
    let mut row: Vec<ParseNode> = Vec::new();
    let mut row_gaps: Vec<Option<Measurement>> = Vec::new();
    let mut h_lines_before_row: Vec<Vec<bool>> = Vec::new();

    h_lines_before_row.push(get_h_lines(parser)?);

    loop {
        let mut cell_body = parser.parse_expression(false, Some("\\\\"))?;
        parser.gullet.end_group();
        parser.gullet.begin_group();

        let mut cell = ParseNode::ord_group(std::mem::take(&mut cell_body), mode, None);
        if let Some(cell_style) = config.cell_style {
            cell = ParseNode::Styling(StylingNode {
                info: NodeInfo::new(mode, None),
                style: cell_style,
                body: vec![cell],
            });
        }
        row.push(cell);

        let next = parser.fetch()?.text.clone();
        match next.as_ref() {
            "&" => {
                if let Some(max) = config.max_num_cols
                    && row.len() == max
                {
                    return Err(ParseError(
                        loc,
                        ParseErrorKind::Message(
                            "Too many tab characters: &".to_string(),
                        ),
                    ));
                }
                parser.consume()?;
            }
            "\\end" => {
                // Arrays terminate rows with \\, so a row started just
                // before \end is an empty leftover; drop it.
                if !(row.len() == 1 && rows_last_is_empty(&row) && !rows.is_empty()) {
                    rows.push(std::mem::take(&mut row));
                }
                break;
            }
            "\\\\" => {
                parser.consume()?;
                // An optional bracket group sets extra row space.
                let size = parser.parse_optional_size_group()?;
                row_gaps.push(size);
                rows.push(std::mem::take(&mut row));
                h_lines_before_row.push(get_h_lines(parser)?);
            }
            other => {
                return Err(ParseError(
                    loc,
                    ParseErrorKind::UnexpectedToken {
                        expected: "& or \\\\ or \\end",
                        got: other.to_string(),
                    },
                ));
            }
        }
    }

    parser.gullet.end_group();
    row_gaps.resize(rows.len(), None);
    while h_lines_before_row.len() <= rows.len() {
        h_lines_before_row.push(Vec::new());
    }

    Ok(ArrayNode {
        info: NodeInfo::new(mode, loc),
        cols: config.cols,
        hskip_before_and_after: config.hskip_before_and_after,
        add_jot: config.add_jot,
        arraystretch: config.arraystretch,
        rows,
        row_gaps,
        h_lines_before_row,
        col_separation_type: config.col_separation_type,
    })
}

fn rows_last_is_empty(row: &[ParseNode]) -> bool {
    match row.last().map(ParseNode::base_elem) {
        Some(ParseNode::OrdGroup(group)) => group.body.is_empty(),
        Some(ParseNode::Styling(styling)) => styling
            .body
            .first()
            .map(|node| match node.base_elem() {
                ParseNode::OrdGroup(group) => group.body.is_empty(),
                _ => false,
            })
            .unwrap_or(true),
        _ => false,
    }
}

/// Parses an `{l|cr}`-style column specification.
fn parse_col_spec(arg: &ParseNode) -> Result<Vec<AlignSpec>, ParseError> {
    let body: Vec<&ParseNode> = match arg {
        ParseNode::OrdGroup(group) => group.body.iter().collect(),
        other => vec![other],
    };
    let mut cols = Vec::new();
    for node in body {
        let Some(text) = node.text() else { continue };
        for c in text.chars() {
            match c {
                'l' | 'c' | 'r' => cols.push(AlignSpec::Align {
                    align: c,
                    pregap: None,
                    postgap: None,
                }),
                '|' => cols.push(AlignSpec::Separator('|')),
                ':' => cols.push(AlignSpec::Separator(':')),
                ' ' => {}
                other => {
                    return Err(ParseError(
                        node.loc(),
                        ParseErrorKind::InvalidColumnSpec(other),
                    ));
                }
            }
        }
    }
    Ok(cols)
}

// Environment handlers.

fn array_env(
    context: EnvContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let cols = parse_col_spec(args.first().ok_or_else(|| {
        ParseError(context.loc, ParseErrorKind::UnexpectedEndOfInput)
    })?)?;
    let config = ArrayConfig {
        hskip_before_and_after: true,
        cols,
        cell_style: if context.env_name == "darray" {
            Some(style::DISPLAY)
        } else {
            None
        },
        ..ArrayConfig::default()
    };
    let loc = context.loc;
    Ok(ParseNode::Array(parse_array(context.parser, config, loc)?))
}

fn matrix_env(
    context: EnvContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let delimiters = match context.env_name.as_str() {
        "matrix" => None,
        "pmatrix" => Some(("(", ")")),
        "bmatrix" => Some(("[", "]")),
        "Bmatrix" => Some(("\\{", "\\}")),
        "vmatrix" => Some(("|", "|")),
        "Vmatrix" => Some(("\\Vert", "\\Vert")),
        _ => None,
    };
    let loc = context.loc;
    let mode = context.parser.mode;
    let config = ArrayConfig {
        hskip_before_and_after: false,
        cell_style: Some(style::TEXT),
        ..ArrayConfig::default()
    };
    let array = ParseNode::Array(parse_array(context.parser, config, loc)?);
    Ok(match delimiters {
        Some((left, right)) => ParseNode::LeftRight(LeftRightNode {
            info: NodeInfo::new(mode, loc),
            body: vec![array],
            left: left.to_string(),
            right: right.to_string(),
            right_color: None,
        }),
        None => array,
    })
}

fn cases_env(
    context: EnvContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let loc = context.loc;
    let mode = context.parser.mode;
    let config = ArrayConfig {
        arraystretch: 1.2,
        cols: vec![
            AlignSpec::Align {
                align: 'l',
                pregap: Some(0.0),
                postgap: Some(1.0),
            },
            AlignSpec::Align {
                align: 'l',
                pregap: Some(0.0),
                postgap: Some(0.0),
            },
        ],
        cell_style: Some(style::TEXT),
        ..ArrayConfig::default()
    };
    let array = ParseNode::Array(parse_array(context.parser, config, loc)?);
    Ok(ParseNode::LeftRight(LeftRightNode {
        info: NodeInfo::new(mode, loc),
        body: vec![array],
        left: "\\{".to_string(),
        right: ".".to_string(),
        right_color: None,
    }))
}

/// Shared by aligned and alignedat: alternating right/left columns.
fn aligned_cols(num_cols: usize, spaced: bool) -> Vec<AlignSpec> {
    let mut cols = Vec::with_capacity(num_cols);
    for i in 0..num_cols {
        if i % 2 == 0 {
            cols.push(AlignSpec::Align {
                align: 'r',
                pregap: Some(if i == 0 || !spaced { 0.0 } else { 2.0 }),
                postgap: Some(0.0),
            });
        } else {
            cols.push(AlignSpec::Align {
                align: 'l',
                pregap: Some(0.0),
                postgap: Some(0.0),
            });
        }
    }
    cols
}

fn aligned_env(
    context: EnvContext<'_, '_>,
    args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let loc = context.loc;
    let is_alignedat = context.env_name == "alignedat";
    let max_num_cols = if is_alignedat {
        let arg = args.first().ok_or_else(|| {
            ParseError(loc, ParseErrorKind::UnexpectedEndOfInput)
        })?;
        let digits: String = match arg {
            ParseNode::OrdGroup(group) => group
                .body
                .iter()
                .filter_map(|node| node.text())
                .collect(),
            other => other.text().unwrap_or("").to_string(),
        };
        let n: usize = digits.trim().parse().map_err(|_| {
            ParseError(
                loc,
                ParseErrorKind::Message(
                    "The alignedat environment requires a number".to_string(),
                ),
            )
        })?;
        Some(2 * n)
    } else {
        None
    };

    let config = ArrayConfig {
        add_jot: true,
        col_separation_type: Some(if is_alignedat {
            ColSeparationType::AlignAt
        } else {
            ColSeparationType::Align
        }),
        max_num_cols,
        ..ArrayConfig::default()
    };
    let mut array = parse_array(context.parser, config, loc)?;
    let num_cols = array.rows.iter().map(Vec::len).max().unwrap_or(0);
    array.cols = aligned_cols(max_num_cols.unwrap_or(num_cols), !is_alignedat);
    Ok(ParseNode::Array(array))
}

fn gathered_env(
    context: EnvContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let loc = context.loc;
    let config = ArrayConfig {
        add_jot: true,
        cols: vec![AlignSpec::Align {
            align: 'c',
            pregap: None,
            postgap: None,
        }],
        col_separation_type: Some(ColSeparationType::Gather),
        ..ArrayConfig::default()
    };
    Ok(ParseNode::Array(parse_array(context.parser, config, loc)?))
}

fn plain(handler: super::EnvHandler) -> EnvSpec {
    EnvSpec {
        num_args: 0,
        num_optional_args: 0,
        handler,
    }
}

pub(crate) fn define_environments(envs: &mut EnvMap) {
    envs.insert(
        "array",
        EnvSpec {
            num_args: 1,
            num_optional_args: 0,
            handler: array_env,
        },
    );
    envs.insert(
        "darray",
        EnvSpec {
            num_args: 1,
            num_optional_args: 0,
            handler: array_env,
        },
    );
    for name in ["matrix", "pmatrix", "bmatrix", "Bmatrix", "vmatrix", "Vmatrix"] {
        envs.insert(name, plain(matrix_env));
    }
    envs.insert("cases", plain(cases_env));
    envs.insert("aligned", plain(aligned_env));
    envs.insert(
        "alignedat",
        EnvSpec {
            num_args: 1,
            num_optional_args: 0,
            handler: aligned_env,
        },
    );
    envs.insert("gathered", plain(gathered_env));
}

// Builders.

struct Outrow {
    children: Vec<(usize, HtmlNode)>,
    height: f64,
    depth: f64,
    /// Baseline position below the array top.
    pos: f64,
}

pub(crate) fn html_builder(
    group: &ArrayNode,
    options: &Options,
) -> Result<HtmlNode, ParseError> {
    let nr = group.rows.len();
    let mut nc = 0usize;

    let pt = 1.0 / options.font_metrics().pt_per_em;
    let arraycolsep = 5.0 * pt;
    let baselineskip = 12.0 * pt;
    let jot = 3.0 * pt;
    let arrayskip = group.arraystretch * baselineskip;
    let arstrut_height = 0.7 * arrayskip;
    let arstrut_depth = 0.3 * arrayskip;

    let mut total_height: f64 = 0.0;
    let mut outrows: Vec<Outrow> = Vec::with_capacity(nr);

    // Vertical layout: rows with struts, gaps, jot, and hline space.
    let mut hline_positions: Vec<(f64, bool)> = Vec::new();
    let rule_thickness = options.font_metrics().default_rule_thickness;
    let record_hlines = |lines: &[bool], at: f64, out: &mut Vec<(f64, bool)>| {
        for &dashed in lines {
            out.push((at, dashed));
        }
    };
    record_hlines(
        &group.h_lines_before_row[0],
        total_height,
        &mut hline_positions,
    );

    for (r, row) in group.rows.iter().enumerate() {
        let mut height = arstrut_height;
        let mut depth = arstrut_depth;
        nc = nc.max(row.len());

        let mut children = Vec::with_capacity(row.len());
        for (c, cell) in row.iter().enumerate() {
            let elem = crate::html::build_group(Some(cell), options, None)?;
            height = height.max(elem.node().height);
            depth = depth.max(elem.node().depth);
            children.push((c, elem));
        }

        let mut gap = 0.0;
        if let Some(size) = &group.row_gaps[r] {
            gap = calculate_size(size, options);
            if gap > 0.0 {
                gap += arstrut_depth;
                depth = depth.max(gap);
                gap = 0.0;
            }
        }
        if group.add_jot {
            depth += jot;
        }

        let pos = total_height + height;
        total_height += height + depth + gap;
        outrows.push(Outrow {
            children,
            height,
            depth,
            pos,
        });
        record_hlines(
            &group.h_lines_before_row[r + 1],
            total_height,
            &mut hline_positions,
        );
    }

    let offset = total_height / 2.0 + options.font_metrics().axis_height;

    // Horizontal assembly, column by column.
    let mut cols: Vec<HtmlNode> = Vec::new();
    let col_descriptions: Vec<AlignSpec> = if group.cols.is_empty() {
        (0..nc)
            .map(|_| AlignSpec::Align {
                align: 'c',
                pregap: None,
                postgap: None,
            })
            .collect()
    } else {
        group.cols.clone()
    };

    let mut col_index = 0usize;
    let n_descriptions = col_descriptions.len();
    for (i, col_description) in col_descriptions.iter().enumerate() {
        match col_description {
            AlignSpec::Separator(separator) => {
                let mut sep = make_empty_span(vec!["vertical-separator".to_string()]);
                sep.node.style.height = Some(make_em(total_height));
                sep.node.style.border_right_width = Some(make_em(rule_thickness));
                if *separator == ':' {
                    sep.node.style.border_style = Some("dashed".to_string());
                }
                sep.node.style.vertical_align =
                    Some(make_em(-(total_height - offset)));
                cols.push(HtmlNode::Span(sep));
            }
            AlignSpec::Align {
                align,
                pregap,
                postgap,
            } => {
                if col_index >= nc {
                    continue;
                }
                // Default separation comes from arraycolsep.
                let pregap_size = (*pregap).unwrap_or(
                    if group.hskip_before_and_after || i > 0 {
                        arraycolsep
                    } else {
                        0.0
                    },
                );
                let postgap_size = (*postgap).unwrap_or(
                    if group.hskip_before_and_after && i == n_descriptions - 1 {
                        arraycolsep
                    } else {
                        0.0
                    },
                );

                let mut col_children = Vec::new();
                for outrow in &outrows {
                    if let Some((_, elem)) = outrow
                        .children
                        .iter()
                        .find(|(c, _)| *c == col_index)
                    {
                        let shift = outrow.pos - offset;
                        let mut node = elem.clone();
                        node.node_mut().height = outrow.height;
                        node.node_mut().depth = outrow.depth;
                        col_children.push((VListElem::new(node), shift));
                    }
                }
                let col = if col_children.is_empty() {
                    make_empty_span(Vec::new())
                } else {
                    make_vlist(VListParam::IndividualShift(col_children), options)
                };
                let mut col = make_span(
                    vec![format!("col-align-{align}")],
                    vec![HtmlNode::Span(col)],
                    None,
                    CssStyle::default(),
                );
                if pregap_size != 0.0 {
                    col.node.style.margin_left = Some(make_em(pregap_size));
                }
                if postgap_size != 0.0 {
                    col.node.style.margin_right = Some(make_em(postgap_size));
                }
                cols.push(HtmlNode::Span(col));
                col_index += 1;
            }
        }
    }

    let mut body = make_span(
        vec!["mtable".to_string()],
        cols,
        Some(options),
        CssStyle::default(),
    );
    body.node.height = offset;
    body.node.depth = total_height - offset;

    if hline_positions.is_empty() {
        return Ok(HtmlNode::Span(body));
    }

    // Overlay the hlines in a vlist with the table.
    let mut children = vec![(VListElem::new(HtmlNode::Span(body)), 0.0)];
    for (at, dashed) in hline_positions {
        let mut line = make_span_s(
            vec![if dashed {
                "hdashline".to_string()
            } else {
                "hline".to_string()
            }],
            Vec::new(),
        );
        line.node.height = rule_thickness;
        line.node.style.height = Some(make_em(rule_thickness));
        line.node.style.border_bottom_width = Some(make_em(rule_thickness));
        if dashed {
            line.node.style.border_style = Some("dashed".to_string());
        }
        let shift = at - offset;
        children.push((VListElem::new(HtmlNode::Span(line)), shift));
    }
    let vlist = make_vlist(VListParam::IndividualShift(children), options);
    Ok(HtmlNode::Span(make_span_s(
        vec!["mord".to_string()],
        vec![HtmlNode::Span(vlist)],
    )))
}

pub(crate) fn mathml_builder(
    group: &ArrayNode,
    options: &Options,
) -> Result<MathmlNode, ParseError> {
    let mut table_rows = Vec::with_capacity(group.rows.len());
    for row in &group.rows {
        let mut cells = Vec::with_capacity(row.len());
        for cell in row {
            let content = mathml::build_group(Some(cell), options)?;
            cells.push(MathNode::new(MathNodeType::Mtd, vec![content]).into());
        }
        table_rows.push(MathNode::new(MathNodeType::Mtr, cells).into());
    }
    let mut table = MathNode::new(MathNodeType::Mtable, table_rows);

    if group.arraystretch != 1.0 || group.add_jot {
        let gap = 0.16 * group.arraystretch + if group.add_jot { 0.09 } else { 0.0 };
        table.set_attribute("rowspacing", make_em(gap));
    }
    match group.col_separation_type {
        Some(ColSeparationType::Align) | Some(ColSeparationType::AlignAt) => {
            table.set_attribute("columnalign", "right left");
            table.set_attribute("columnspacing", "0em");
        }
        Some(ColSeparationType::Gather) => {
            table.set_attribute("columnalign", "center");
        }
        _ => {
            if !group.cols.is_empty() {
                let aligns: Vec<&str> = group
                    .cols
                    .iter()
                    .filter_map(|col| match col {
                        AlignSpec::Align { align: 'l', .. } => Some("left"),
                        AlignSpec::Align { align: 'r', .. } => Some("right"),
                        AlignSpec::Align { .. } => Some("center"),
                        AlignSpec::Separator(_) => None,
                    })
                    .collect();
                if !aligns.is_empty() {
                    table.set_attribute("columnalign", aligns.join(" "));
                }
            }
        }
    }

    let mut row_lines = Vec::with_capacity(group.h_lines_before_row.len());
    let mut any_lines = false;
    for lines in group.h_lines_before_row.iter().skip(1) {
        if lines.is_empty() {
            row_lines.push("none");
        } else {
            any_lines = true;
            row_lines.push(if lines[0] { "dashed" } else { "solid" });
        }
    }
    if any_lines {
        table.set_attribute("rowlines", row_lines.join(" "));
    }

    Ok(table.into())
}
