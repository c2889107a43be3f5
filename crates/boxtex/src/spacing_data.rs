//! Inter-atom glue tables (TeXbook chapter 18).
//!
//! Two tables: the normal one and the tight one used in script styles.
//! Widths are in mu. The matches are total over the class pairs so a
//! new atom class cannot be added without the compiler pointing here.

use crate::unit::Measurement;

/// The eight spacing-relevant box classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomType {
    Ord,
    Op,
    Bin,
    Rel,
    Open,
    Close,
    Punct,
    Inner,
}

impl DomType {
    pub fn as_class(self) -> &'static str {
        match self {
            DomType::Ord => "mord",
            DomType::Op => "mop",
            DomType::Bin => "mbin",
            DomType::Rel => "mrel",
            DomType::Open => "mopen",
            DomType::Close => "mclose",
            DomType::Punct => "mpunct",
            DomType::Inner => "minner",
        }
    }

    pub fn from_class(class: &str) -> Option<DomType> {
        Some(match class {
            "mord" => DomType::Ord,
            "mop" => DomType::Op,
            "mbin" => DomType::Bin,
            "mrel" => DomType::Rel,
            "mopen" => DomType::Open,
            "mclose" => DomType::Close,
            "mpunct" => DomType::Punct,
            "minner" => DomType::Inner,
            _ => return None,
        })
    }
}

const THIN: Measurement = Measurement::mu(3.0);
const MED: Measurement = Measurement::mu(4.0);
const THICK: Measurement = Measurement::mu(5.0);

/// Glue between two adjacent atoms in display and text styles.
pub fn spacing(left: DomType, right: DomType) -> Option<Measurement> {
    use DomType::*;
    Some(match (left, right) {
        (Ord, Op) => THIN,
        (Ord, Bin) => MED,
        (Ord, Rel) => THICK,
        (Ord, Inner) => THIN,
        (Ord, Ord | Open | Close | Punct) => return None,

        (Op, Ord | Op) => THIN,
        (Op, Rel) => THICK,
        (Op, Inner) => THIN,
        (Op, Bin | Open | Close | Punct) => return None,

        (Bin, Ord | Op | Open | Inner) => MED,
        (Bin, Bin | Rel | Close | Punct) => return None,

        (Rel, Ord | Op | Open | Inner) => THICK,
        (Rel, Bin | Rel | Close | Punct) => return None,

        (Open, _) => return None,

        (Close, Op) => THIN,
        (Close, Bin) => MED,
        (Close, Rel) => THICK,
        (Close, Inner) => THIN,
        (Close, Ord | Open | Close | Punct) => return None,

        (Punct, Ord | Op | Open | Close | Punct | Inner) => THIN,
        (Punct, Rel) => THICK,
        (Punct, Bin) => return None,

        (Inner, Ord | Op | Open | Punct | Inner) => THIN,
        (Inner, Bin) => MED,
        (Inner, Rel) => THICK,
        (Inner, Close) => return None,
    })
}

/// Glue between two adjacent atoms in script and scriptscript styles.
pub fn tight_spacing(left: DomType, right: DomType) -> Option<Measurement> {
    use DomType::*;
    Some(match (left, right) {
        (Ord, Op) => THIN,
        (Op, Ord | Op) => THIN,
        (Close, Op) => THIN,
        (Inner, Op) => THIN,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_pairs() {
        assert_eq!(spacing(DomType::Ord, DomType::Bin), Some(Measurement::mu(4.0)));
        assert_eq!(spacing(DomType::Bin, DomType::Ord), Some(Measurement::mu(4.0)));
        assert_eq!(spacing(DomType::Ord, DomType::Rel), Some(Measurement::mu(5.0)));
        assert_eq!(spacing(DomType::Ord, DomType::Ord), None);
        assert_eq!(spacing(DomType::Open, DomType::Rel), None);
    }

    #[test]
    fn tight_drops_bin_and_rel() {
        assert_eq!(tight_spacing(DomType::Ord, DomType::Bin), None);
        assert_eq!(tight_spacing(DomType::Ord, DomType::Rel), None);
        assert_eq!(
            tight_spacing(DomType::Ord, DomType::Op),
            Some(Measurement::mu(3.0))
        );
    }

    #[test]
    fn class_roundtrip() {
        for ty in [
            DomType::Ord,
            DomType::Op,
            DomType::Bin,
            DomType::Rel,
            DomType::Open,
            DomType::Close,
            DomType::Punct,
            DomType::Inner,
        ] {
            assert_eq!(DomType::from_class(ty.as_class()), Some(ty));
        }
        assert_eq!(DomType::from_class("mspace"), None);
    }
}
