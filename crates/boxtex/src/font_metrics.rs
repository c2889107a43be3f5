//! Font metric lookup.
//!
//! Two kinds of data live here: the global TeX font dimensions (sigmas
//! and xis) per size-index, and per-character box metrics served from
//! the static tables in [`crate::font_metrics_data`].

use crate::font_metrics_data;
use crate::types::Mode;
use crate::unicode_scripts::supported_codepoint;

/// The TeX font dimension set for one size index, in em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub slant: f64,
    pub space: f64,
    pub stretch: f64,
    pub shrink: f64,
    pub x_height: f64,
    pub quad: f64,
    pub extra_space: f64,
    pub num1: f64,
    pub num2: f64,
    pub num3: f64,
    pub denom1: f64,
    pub denom2: f64,
    pub sup1: f64,
    pub sup2: f64,
    pub sup3: f64,
    pub sub1: f64,
    pub sub2: f64,
    pub sup_drop: f64,
    pub sub_drop: f64,
    pub delim1: f64,
    pub delim2: f64,
    pub axis_height: f64,
    pub default_rule_thickness: f64,
    pub big_op_spacing1: f64,
    pub big_op_spacing2: f64,
    pub big_op_spacing3: f64,
    pub big_op_spacing4: f64,
    pub big_op_spacing5: f64,
    pub sqrt_rule_thickness: f64,
    pub pt_per_em: f64,
    pub double_rule_sep: f64,
    pub array_rule_width: f64,
    pub fbox_sep: f64,
    pub fbox_rule: f64,
    /// Derived: `quad / 18`.
    pub css_em_per_mu: f64,
}

const fn metrics(
    x_height: f64,
    quad: f64,
    num1: f64,
    num2: f64,
    num3: f64,
    denom1: f64,
    denom2: f64,
    sup1: f64,
    sup2: f64,
    sup3: f64,
    sub1: f64,
    sub2: f64,
    sup_drop: f64,
    sub_drop: f64,
    delim1: f64,
    delim2: f64,
    default_rule_thickness: f64,
    big_op_spacing4: f64,
    big_op_spacing5: f64,
) -> FontMetrics {
    FontMetrics {
        slant: 0.25,
        space: 0.0,
        stretch: 0.0,
        shrink: 0.0,
        x_height,
        quad,
        extra_space: 0.0,
        num1,
        num2,
        num3,
        denom1,
        denom2,
        sup1,
        sup2,
        sup3,
        sub1,
        sub2,
        sup_drop,
        sub_drop,
        delim1,
        delim2,
        axis_height: 0.25,
        default_rule_thickness,
        big_op_spacing1: 0.111,
        big_op_spacing2: 0.166,
        big_op_spacing3: 0.2,
        big_op_spacing4,
        big_op_spacing5,
        sqrt_rule_thickness: 0.04,
        pt_per_em: 10.0,
        double_rule_sep: 0.05,
        array_rule_width: 0.04,
        fbox_sep: 0.3,
        fbox_rule: 0.04,
        css_em_per_mu: quad / 18.0,
    }
}

/// Index 0: text sizes, 1: script sizes, 2: scriptscript sizes.
static METRICS_BY_SIZE_INDEX: [FontMetrics; 3] = [
    metrics(
        0.431, 1.0, 0.677, 0.394, 0.444, 0.686, 0.345, 0.413, 0.363, 0.289, 0.15, 0.247, 0.386,
        0.05, 2.39, 1.01, 0.04, 0.6, 0.1,
    ),
    metrics(
        0.431, 1.171, 0.732, 0.384, 0.471, 0.752, 0.344, 0.503, 0.431, 0.286, 0.143, 0.286, 0.353,
        0.071, 1.7, 1.157, 0.049, 0.611, 0.143,
    ),
    metrics(
        0.431, 1.472, 0.925, 0.387, 0.504, 1.025, 0.532, 0.504, 0.404, 0.294, 0.2, 0.4, 0.494,
        0.1, 1.98, 1.42, 0.049, 0.611, 0.143,
    ),
];

/// Global metrics for a size level (1..=11).
pub fn get_global_metrics(size: usize) -> &'static FontMetrics {
    let index = if size >= 5 {
        0
    } else if size >= 3 {
        1
    } else {
        2
    };
    &METRICS_BY_SIZE_INDEX[index]
}

/// Metrics of a single glyph, in em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMetrics {
    pub depth: f64,
    pub height: f64,
    pub italic: f64,
    pub skew: f64,
    pub width: f64,
}

/// A few characters the tables key under an ASCII stand-in.
fn stand_in(ch: char) -> Option<char> {
    Some(match ch {
        '\u{00a0}' | '\u{2002}' | '\u{2003}' | '\u{2009}' => ' ',
        '\u{2212}' => '-', // minus sign in text mode
        '\u{2013}' | '\u{2014}' => '-',
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201c}' | '\u{201d}' => '"',
        _ => return None,
    })
}

/// Looks up the metrics of `ch` as rendered in `font`.
///
/// Text-mode characters that are renderable but not measured fall back
/// to the metrics of `M`, which keeps struts and vlists sane for
/// scripts the tables do not cover.
pub fn get_character_metrics(ch: char, font: &str, mode: Mode) -> Option<CharacterMetrics> {
    let table = font_metrics_data::metrics_for_font(font)?;
    let lookup = |c: char| {
        table
            .get(&(c as u32))
            .map(|&[depth, height, italic, skew, width]| CharacterMetrics {
                depth,
                height,
                italic,
                skew,
                width,
            })
    };
    if let Some(m) = lookup(ch) {
        return Some(m);
    }
    if let Some(sub) = stand_in(ch)
        && let Some(m) = lookup(sub)
    {
        return Some(m);
    }
    if mode == Mode::Text && supported_codepoint(ch) {
        return lookup('M');
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_index_selection() {
        assert_eq!(get_global_metrics(6).quad, 1.0);
        assert_eq!(get_global_metrics(11).quad, 1.0);
        assert_eq!(get_global_metrics(4).quad, 1.171);
        assert_eq!(get_global_metrics(1).quad, 1.472);
    }

    #[test]
    fn ascii_lookup() {
        let m = get_character_metrics('a', "Main-Regular", Mode::Math).unwrap();
        assert!(m.height > 0.0 && m.width > 0.0);
        // '=' floats above the baseline.
        let eq = get_character_metrics('=', "Main-Regular", Mode::Math).unwrap();
        assert!(eq.depth < 0.0);
    }

    #[test]
    fn text_mode_fallback() {
        // Renderable but unmeasured text characters get M's box.
        let m = get_character_metrics('\u{4e2d}', "Main-Regular", Mode::Text).unwrap();
        let reference = get_character_metrics('M', "Main-Regular", Mode::Text).unwrap();
        assert_eq!(m, reference);
        assert_eq!(
            get_character_metrics('\u{4e2d}', "Main-Regular", Mode::Math),
            None
        );
    }
}
