//! The four math styles and their cramped variants.
//!
//! A style is one of D, D', T, T', S, S', SS, SS' (display, text,
//! script, scriptscript; primed = cramped). Transitions between styles
//! are table-driven; the tables are total over the eight ids.

/// One of the eight style ids. Ordered so that a smaller id means a
/// larger rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style(u8);

pub const DISPLAY: Style = Style(0);
pub const TEXT: Style = Style(2);
pub const SCRIPT: Style = Style(4);
pub const SCRIPTSCRIPT: Style = Style(6);

const SUP: [u8; 8] = [4, 5, 4, 5, 6, 7, 6, 7];
const SUB: [u8; 8] = [5, 5, 5, 5, 7, 7, 7, 7];
const FRAC_NUM: [u8; 8] = [2, 3, 4, 5, 6, 7, 6, 7];
const FRAC_DEN: [u8; 8] = [3, 3, 5, 5, 7, 7, 7, 7];
const CRAMP: [u8; 8] = [1, 1, 3, 3, 5, 5, 7, 7];
const TEXT_MAP: [u8; 8] = [0, 1, 2, 3, 2, 3, 2, 3];

impl Style {
    pub fn id(self) -> u8 {
        self.0
    }

    /// 0 = display, 1 = text, 2 = script, 3 = scriptscript.
    pub fn size(self) -> u8 {
        self.0 / 2
    }

    pub fn cramped(self) -> bool {
        self.0 % 2 == 1
    }

    /// Style for superscripts of this style.
    pub fn sup(self) -> Style {
        Style(SUP[self.0 as usize])
    }

    /// Style for subscripts of this style (always cramped).
    pub fn sub(self) -> Style {
        Style(SUB[self.0 as usize])
    }

    /// Style for fraction numerators.
    pub fn frac_num(self) -> Style {
        Style(FRAC_NUM[self.0 as usize])
    }

    /// Style for fraction denominators.
    pub fn frac_den(self) -> Style {
        Style(FRAC_DEN[self.0 as usize])
    }

    /// The cramped version of this style.
    pub fn cramp(self) -> Style {
        Style(CRAMP[self.0 as usize])
    }

    /// This style, demoted to at most text size.
    pub fn text(self) -> Style {
        Style(TEXT_MAP[self.0 as usize])
    }

    /// Script and scriptscript styles select the tight spacing table.
    pub fn is_tight(self) -> bool {
        self.size() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        assert_eq!(DISPLAY.sup(), SCRIPT);
        assert_eq!(DISPLAY.sub(), SCRIPT.cramp());
        assert_eq!(SCRIPT.sup(), SCRIPTSCRIPT);
        assert_eq!(SCRIPTSCRIPT.sup(), SCRIPTSCRIPT);
        assert_eq!(DISPLAY.frac_num(), TEXT);
        assert_eq!(TEXT.frac_num(), SCRIPT);
        assert_eq!(TEXT.frac_den(), SCRIPT.cramp());
        assert_eq!(SCRIPT.text(), TEXT);
        assert!(!TEXT.is_tight());
        assert!(SCRIPT.is_tight());
        assert!(SCRIPTSCRIPT.cramp().is_tight());
    }

    #[test]
    fn cramping_is_idempotent() {
        for id in 0..8 {
            let style = Style(id);
            assert_eq!(style.cramp().cramp(), style.cramp());
            assert!(style.cramp().cramped());
            assert_eq!(style.cramp().size(), style.size());
        }
    }
}
