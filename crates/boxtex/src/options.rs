//! The immutable value propagated through building.
//!
//! Every derivation method returns a new `Options`; nothing here
//! mutates in place, so builders can hand options down freely.

use crate::dom_tree::ClassList;
use crate::font_metrics::{FontMetrics, get_global_metrics};
use crate::settings::Settings;
use crate::style::{self, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    TextBf,
    TextMd,
}

impl FontWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            FontWeight::TextBf => "textbf",
            FontWeight::TextMd => "textmd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontShape {
    TextIt,
    TextUp,
}

impl FontShape {
    pub fn as_str(self) -> &'static str {
        match self {
            FontShape::TextIt => "textit",
            FontShape::TextUp => "textup",
        }
    }
}

const SIZE_STYLE_MAP: [[u8; 3]; 11] = [
    // Each element contains [textsize, scriptsize, scriptscriptsize].
    // The size mappings are taken from TeX with \normalsize=10pt.
    [1, 1, 1],   // size1: [5, 5, 5]              \tiny
    [2, 1, 1],   // size2: [6, 5, 5]
    [3, 1, 1],   // size3: [7, 5, 5]              \scriptsize
    [4, 2, 1],   // size4: [8, 6, 5]              \footnotesize
    [5, 2, 1],   // size5: [9, 6, 5]              \small
    [6, 3, 1],   // size6: [10, 7, 5]             \normalsize
    [7, 4, 2],   // size7: [12, 8, 6]             \large
    [8, 6, 3],   // size8: [14.4, 10, 7]          \Large
    [9, 7, 6],   // size9: [17.28, 12, 10]        \LARGE
    [10, 8, 7],  // size10: [20.74, 14.4, 12]     \huge
    [11, 10, 9], // size11: [24.88, 20.74, 17.28] \HUGE
];

const SIZE_MULTIPLIERS: [f64; 11] = [
    0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.2, 1.44, 1.728, 2.074, 2.488,
];

pub const BASE_SIZE: usize = 6;

fn size_at_style(size: usize, style: Style) -> usize {
    if style.size() < 2 {
        size
    } else {
        SIZE_STYLE_MAP[size - 1][style.size() as usize - 1] as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    style: Style,
    color: Option<String>,
    /// Current size level (1..=11).
    pub size: usize,
    /// The size level of the enclosing text style, used when a style
    /// change has shrunk `size`.
    pub text_size: usize,
    phantom: bool,
    /// Math font override, e.g. `mathbf`; empty when none.
    pub font: String,
    /// Text font family, e.g. `textrm`; empty when none.
    pub font_family: String,
    pub font_weight: Option<FontWeight>,
    pub font_shape: Option<FontShape>,
    max_size: f64,
    min_rule_thickness: f64,
}

impl Options {
    pub fn from_settings(settings: &Settings) -> Self {
        Options {
            style: if settings.display_mode {
                style::DISPLAY
            } else {
                style::TEXT
            },
            color: None,
            size: BASE_SIZE,
            text_size: BASE_SIZE,
            phantom: false,
            font: String::new(),
            font_family: String::new(),
            font_weight: None,
            font_shape: None,
            max_size: settings.max_size,
            min_rule_thickness: settings.min_rule_thickness,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    pub fn min_rule_thickness(&self) -> f64 {
        self.min_rule_thickness
    }

    pub fn size_multiplier(&self) -> f64 {
        SIZE_MULTIPLIERS[self.size - 1]
    }

    /// Returns a version with the given style, adjusting the size to it.
    pub fn having_style(&self, style: Style) -> Options {
        if self.style == style {
            self.clone()
        } else {
            Options {
                style,
                size: size_at_style(self.text_size, style),
                ..self.clone()
            }
        }
    }

    /// Returns a version with a cramped variant of the current style.
    pub fn having_cramped_style(&self) -> Options {
        self.having_style(self.style.cramp())
    }

    /// Returns a version with the given size and at least text style.
    pub fn having_size(&self, size: usize) -> Options {
        if self.size == size && self.text_size == size {
            self.clone()
        } else {
            Options {
                style: self.style.text(),
                size,
                text_size: size,
                ..self.clone()
            }
        }
    }

    /// Returns a version with the base size and the given style, or at
    /// least text style when none is given.
    pub fn having_base_style(&self, style: Option<Style>) -> Options {
        let style = style.unwrap_or_else(|| self.style.text());
        let want_size = size_at_style(BASE_SIZE, style);
        if self.size == want_size && self.text_size == BASE_SIZE && self.style == style {
            self.clone()
        } else {
            Options {
                style,
                size: want_size,
                ..self.clone()
            }
        }
    }

    /// Removes the effect of sizing changes such as `\Huge` while
    /// keeping the current style's shrinking.
    pub fn having_base_sizing(&self) -> Options {
        let size = match self.style.id() {
            // normalsize in scriptstyle
            4 | 5 => 3,
            // normalsize in scriptscriptstyle
            6 | 7 => 1,
            // normalsize in textstyle or displaystyle
            _ => 6,
        };
        Options {
            style: self.style.text(),
            size,
            ..self.clone()
        }
    }

    pub fn with_color(&self, color: String) -> Options {
        Options {
            color: Some(color),
            ..self.clone()
        }
    }

    pub fn with_phantom(&self) -> Options {
        Options {
            phantom: true,
            ..self.clone()
        }
    }

    pub fn with_font(&self, font: &str) -> Options {
        Options {
            font: font.to_string(),
            ..self.clone()
        }
    }

    pub fn with_text_font_family(&self, font_family: &str) -> Options {
        Options {
            font_family: font_family.to_string(),
            font: String::new(),
            ..self.clone()
        }
    }

    pub fn with_font_weight(&self, font_weight: FontWeight) -> Options {
        Options {
            font_weight: Some(font_weight),
            ..self.clone()
        }
    }

    pub fn with_text_font_shape(&self, font_shape: FontShape) -> Options {
        Options {
            font_shape: Some(font_shape),
            ..self.clone()
        }
    }

    /// CSS classes needed to switch from `old_options`'s size to ours.
    pub fn sizing_classes(&self, old_options: &Options) -> ClassList {
        if old_options.size != self.size {
            vec![
                "sizing".to_string(),
                format!("reset-size{}", old_options.size),
                format!("size{}", self.size),
            ]
        } else {
            ClassList::new()
        }
    }

    /// CSS classes needed to switch to the base size.
    pub fn base_sizing_classes(&self) -> ClassList {
        if self.size != BASE_SIZE {
            vec![
                "sizing".to_string(),
                format!("reset-size{}", self.size),
                format!("size{}", BASE_SIZE),
            ]
        } else {
            ClassList::new()
        }
    }

    pub fn font_metrics(&self) -> &'static FontMetrics {
        get_global_metrics(self.size)
    }

    /// The effective color; phantoms render transparent.
    pub fn color(&self) -> Option<&str> {
        if self.phantom {
            Some("transparent")
        } else {
            self.color.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DISPLAY, SCRIPT, SCRIPTSCRIPT, TEXT};

    fn base() -> Options {
        Options::from_settings(&Settings::default())
    }

    #[test]
    fn derivations_do_not_mutate() {
        let options = base();
        let scripted = options.having_style(SCRIPT);
        assert_eq!(options.style(), TEXT);
        assert_eq!(scripted.style(), SCRIPT);
        assert_eq!(scripted.size, 3);
        assert_eq!(options.size, BASE_SIZE);
    }

    #[test]
    fn script_sizes_shrink() {
        let options = base().having_style(DISPLAY);
        assert_eq!(options.size_multiplier(), 1.0);
        assert_eq!(options.having_style(SCRIPT).size_multiplier(), 0.7);
        assert_eq!(options.having_style(SCRIPTSCRIPT).size_multiplier(), 0.5);
    }

    #[test]
    fn sizing_classes_roundtrip() {
        let options = base();
        let huge = options.having_size(10);
        assert_eq!(
            huge.sizing_classes(&options),
            vec!["sizing", "reset-size6", "size10"]
        );
        assert!(options.sizing_classes(&options).is_empty());
    }

    #[test]
    fn phantom_color() {
        let options = base().with_phantom();
        assert_eq!(options.color(), Some("transparent"));
        let colored = base().with_color("red".to_string());
        assert_eq!(colored.color(), Some("red"));
    }
}
