//! Measurements and the em arithmetic shared by the builders.

use crate::options::Options;

/// A number with a TeX unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub number: f64,
    pub unit: Unit,
}

impl Measurement {
    pub const fn new(number: f64, unit: Unit) -> Self {
        Measurement { number, unit }
    }

    pub const fn em(number: f64) -> Self {
        Measurement::new(number, Unit::Em)
    }

    pub const fn mu(number: f64) -> Self {
        Measurement::new(number, Unit::Mu)
    }

    pub fn is_zero(&self) -> bool {
        self.number == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    // Absolute units.
    Pt,
    Mm,
    Cm,
    In,
    Bp,
    Pc,
    Dd,
    Cc,
    Nd,
    Nc,
    Sp,
    Px,
    // Relative units, resolved against the current font.
    Em,
    Ex,
    Mu,
}

impl Unit {
    pub fn from_str(s: &str) -> Option<Unit> {
        Some(match s {
            "pt" => Unit::Pt,
            "mm" => Unit::Mm,
            "cm" => Unit::Cm,
            "in" => Unit::In,
            "bp" => Unit::Bp,
            "pc" => Unit::Pc,
            "dd" => Unit::Dd,
            "cc" => Unit::Cc,
            "nd" => Unit::Nd,
            "nc" => Unit::Nc,
            "sp" => Unit::Sp,
            "px" => Unit::Px,
            "em" => Unit::Em,
            "ex" => Unit::Ex,
            "mu" => Unit::Mu,
            _ => return None,
        })
    }

    /// Points per unit, for the absolute units only.
    fn pt_per_unit(self) -> Option<f64> {
        Some(match self {
            Unit::Pt => 1.0,
            Unit::Mm => 7227.0 / 2540.0,
            Unit::Cm => 7227.0 / 254.0,
            Unit::In => 72.27,
            Unit::Bp => 803.0 / 800.0,
            Unit::Pc => 12.0,
            Unit::Dd => 1238.0 / 1157.0,
            Unit::Cc => 14856.0 / 1157.0,
            Unit::Nd => 685.0 / 642.0,
            Unit::Nc => 1370.0 / 107.0,
            Unit::Sp => 1.0 / 65536.0,
            Unit::Px => 803.0 / 800.0,
            Unit::Em | Unit::Ex | Unit::Mu => return None,
        })
    }
}

/// Converts a measurement to a CSS em value in the current size.
///
/// Absolute units go through pt; `mu` scales with the math quad; `em`
/// and `ex` are measured in the enclosing *text* style so that glue in
/// scripts keeps its nominal size relative to the surrounding text.
pub fn calculate_size(measurement: &Measurement, options: &Options) -> f64 {
    let scale = if let Some(pt) = measurement.unit.pt_per_unit() {
        pt / options.font_metrics().pt_per_em / options.size_multiplier()
    } else if measurement.unit == Unit::Mu {
        options.font_metrics().css_em_per_mu
    } else if options.style().is_tight() {
        // In scripts, em and ex refer to the surrounding text style.
        let unit_options = options.having_style(options.style().text());
        let base = if measurement.unit == Unit::Ex {
            unit_options.font_metrics().x_height
        } else {
            1.0
        };
        base * unit_options.size_multiplier() / options.size_multiplier()
    } else if measurement.unit == Unit::Ex {
        options.font_metrics().x_height
    } else {
        1.0
    };
    (measurement.number * scale).min(options.max_size())
}

/// Serializes an em quantity the way the stylesheet expects: at most
/// four decimals, trailing zeros trimmed.
pub fn make_em(n: f64) -> String {
    let mut s = format!("{:.4}", n);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s.clear();
        s.push('0');
    }
    s.push_str("em");
    s
}

/// Parses `"<float><unit>"` text such as `"2.5em"` or `"-3mu"`.
/// Whitespace around the number and unit is tolerated.
pub fn parse_size_text(s: &str) -> Option<Measurement> {
    let s = s.trim();
    let unit_start = s.len().checked_sub(2)?;
    let (number_part, unit_part) = s.split_at_checked(unit_start)?;
    let unit = Unit::from_str(unit_part)?;
    let number_part = number_part.trim();
    let number: f64 = if number_part.is_empty() {
        // TeX treats a bare unit as 0; we do not.
        return None;
    } else {
        number_part.parse().ok()?
    };
    Some(Measurement::new(number, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn em_serialization() {
        assert_eq!(make_em(0.0), "0em");
        assert_eq!(make_em(1.0), "1em");
        assert_eq!(make_em(0.25), "0.25em");
        assert_eq!(make_em(-0.24), "-0.24em");
        assert_eq!(make_em(0.16666), "0.1667em");
        assert_eq!(make_em(2.0 / 3.0), "0.6667em");
        assert_eq!(make_em(-0.00001), "0em");
    }

    #[test]
    fn size_text_parsing() {
        assert_eq!(parse_size_text("2em"), Some(Measurement::em(2.0)));
        assert_eq!(parse_size_text(" -1.5 mu "), Some(Measurement::mu(-1.5)));
        assert_eq!(
            parse_size_text("3pt"),
            Some(Measurement::new(3.0, Unit::Pt))
        );
        assert_eq!(parse_size_text("2"), None);
        assert_eq!(parse_size_text("2zz"), None);
        assert_eq!(parse_size_text("em"), None);
    }
}
