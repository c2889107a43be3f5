//! The symbol tables.
//!
//! Maps (mode, canonical spelling) to the symbol's atom group, source
//! font, and replacement codepoint. Spellings are either a single
//! character as it appears in the input or a control sequence including
//! its backslash.

use phf::{Map, phf_map};

use crate::types::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Main,
    Ams,
}

/// Which parse-node kind a symbol produces. The first six are the atom
/// families; the rest map to their own node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Bin,
    Close,
    Inner,
    Open,
    Punct,
    Rel,
    MathOrd,
    TextOrd,
    Spacing,
    AccentToken,
    OpToken,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol {
    pub font: Font,
    pub group: Group,
    pub replace: Option<char>,
}

/// Ligatures the typewriter fonts must not form.
pub const LIGATURES: &[&str] = &["--", "---", "``", "''"];

pub fn get_symbol(mode: Mode, name: &str) -> Option<&'static Symbol> {
    match mode {
        Mode::Math => MATH_SYMBOLS.get(name),
        Mode::Text => TEXT_SYMBOLS.get(name),
    }
}

const fn main_sym(group: Group, replace: char) -> Symbol {
    Symbol {
        font: Font::Main,
        group,
        replace: Some(replace),
    }
}

const fn ams_sym(group: Group, replace: char) -> Symbol {
    Symbol {
        font: Font::Ams,
        group,
        replace: Some(replace),
    }
}

const fn plain(group: Group) -> Symbol {
    Symbol {
        font: Font::Main,
        group,
        replace: None,
    }
}

use Group::*;

static MATH_SYMBOLS: Map<&'static str, Symbol> = phf_map! {
    // Single characters.
    "+" => plain(Bin),
    "-" => main_sym(Bin, '\u{2212}'),
    "*" => main_sym(Bin, '\u{2217}'),
    "/" => plain(TextOrd),
    "=" => plain(Rel),
    "<" => plain(Rel),
    ">" => plain(Rel),
    ":" => plain(Rel),
    "," => plain(Punct),
    ";" => plain(Punct),
    "." => plain(TextOrd),
    "'" => main_sym(TextOrd, '\u{2032}'),
    "(" => plain(Open),
    ")" => plain(Close),
    "[" => plain(Open),
    "]" => plain(Close),
    "?" => plain(Close),
    "!" => plain(Close),
    "|" => main_sym(TextOrd, '\u{2223}'),

    // Greek letters.
    r"\alpha" => main_sym(MathOrd, '\u{3b1}'),
    r"\beta" => main_sym(MathOrd, '\u{3b2}'),
    r"\gamma" => main_sym(MathOrd, '\u{3b3}'),
    r"\delta" => main_sym(MathOrd, '\u{3b4}'),
    r"\epsilon" => main_sym(MathOrd, '\u{3f5}'),
    r"\varepsilon" => main_sym(MathOrd, '\u{3b5}'),
    r"\zeta" => main_sym(MathOrd, '\u{3b6}'),
    r"\eta" => main_sym(MathOrd, '\u{3b7}'),
    r"\theta" => main_sym(MathOrd, '\u{3b8}'),
    r"\vartheta" => main_sym(MathOrd, '\u{3d1}'),
    r"\iota" => main_sym(MathOrd, '\u{3b9}'),
    r"\kappa" => main_sym(MathOrd, '\u{3ba}'),
    r"\lambda" => main_sym(MathOrd, '\u{3bb}'),
    r"\mu" => main_sym(MathOrd, '\u{3bc}'),
    r"\nu" => main_sym(MathOrd, '\u{3bd}'),
    r"\xi" => main_sym(MathOrd, '\u{3be}'),
    r"\omicron" => main_sym(MathOrd, 'o'),
    r"\pi" => main_sym(MathOrd, '\u{3c0}'),
    r"\varpi" => main_sym(MathOrd, '\u{3d6}'),
    r"\rho" => main_sym(MathOrd, '\u{3c1}'),
    r"\varrho" => main_sym(MathOrd, '\u{3f1}'),
    r"\sigma" => main_sym(MathOrd, '\u{3c3}'),
    r"\varsigma" => main_sym(MathOrd, '\u{3c2}'),
    r"\tau" => main_sym(MathOrd, '\u{3c4}'),
    r"\upsilon" => main_sym(MathOrd, '\u{3c5}'),
    r"\phi" => main_sym(MathOrd, '\u{3d5}'),
    r"\varphi" => main_sym(MathOrd, '\u{3c6}'),
    r"\chi" => main_sym(MathOrd, '\u{3c7}'),
    r"\psi" => main_sym(MathOrd, '\u{3c8}'),
    r"\omega" => main_sym(MathOrd, '\u{3c9}'),
    r"\Gamma" => main_sym(TextOrd, '\u{393}'),
    r"\Delta" => main_sym(TextOrd, '\u{394}'),
    r"\Theta" => main_sym(TextOrd, '\u{398}'),
    r"\Lambda" => main_sym(TextOrd, '\u{39b}'),
    r"\Xi" => main_sym(TextOrd, '\u{39e}'),
    r"\Pi" => main_sym(TextOrd, '\u{3a0}'),
    r"\Sigma" => main_sym(TextOrd, '\u{3a3}'),
    r"\Upsilon" => main_sym(TextOrd, '\u{3a5}'),
    r"\Phi" => main_sym(TextOrd, '\u{3a6}'),
    r"\Psi" => main_sym(TextOrd, '\u{3a8}'),
    r"\Omega" => main_sym(TextOrd, '\u{3a9}'),

    // Ordinary symbols.
    r"\imath" => main_sym(MathOrd, '\u{131}'),
    r"\jmath" => main_sym(MathOrd, '\u{237}'),
    r"\ell" => main_sym(MathOrd, '\u{2113}'),
    r"\wp" => main_sym(MathOrd, '\u{2118}'),
    r"\partial" => main_sym(MathOrd, '\u{2202}'),
    r"\infty" => main_sym(TextOrd, '\u{221e}'),
    r"\prime" => main_sym(MathOrd, '\u{2032}'),
    r"\aleph" => main_sym(TextOrd, '\u{2135}'),
    r"\hbar" => ams_sym(TextOrd, '\u{210f}'),
    r"\hslash" => ams_sym(TextOrd, '\u{210f}'),
    r"\emptyset" => main_sym(TextOrd, '\u{2205}'),
    r"\varnothing" => ams_sym(TextOrd, '\u{2205}'),
    r"\nabla" => main_sym(TextOrd, '\u{2207}'),
    r"\forall" => main_sym(TextOrd, '\u{2200}'),
    r"\exists" => main_sym(TextOrd, '\u{2203}'),
    r"\nexists" => ams_sym(TextOrd, '\u{2204}'),
    r"\neg" => main_sym(TextOrd, '\u{ac}'),
    r"\lnot" => main_sym(TextOrd, '\u{ac}'),
    r"\top" => main_sym(TextOrd, '\u{22a4}'),
    r"\bot" => main_sym(TextOrd, '\u{22a5}'),
    r"\angle" => main_sym(TextOrd, '\u{2220}'),
    r"\triangle" => main_sym(TextOrd, '\u{25b3}'),
    r"\Box" => ams_sym(TextOrd, '\u{25a1}'),
    r"\square" => ams_sym(TextOrd, '\u{25a1}'),
    r"\backslash" => main_sym(TextOrd, '\\'),
    r"\surd" => main_sym(TextOrd, '\u{221a}'),
    r"\vert" => main_sym(TextOrd, '\u{2223}'),
    r"\lvert" => main_sym(Open, '\u{2223}'),
    r"\rvert" => main_sym(Close, '\u{2223}'),
    r"\Vert" => main_sym(TextOrd, '\u{2225}'),
    r"\lVert" => main_sym(Open, '\u{2225}'),
    r"\rVert" => main_sym(Close, '\u{2225}'),
    r"\#" => plain(TextOrd),
    r"\&" => plain(TextOrd),
    r"\$" => plain(TextOrd),
    r"\%" => plain(TextOrd),
    r"\_" => plain(TextOrd),
    r"\{" => main_sym(Open, '{'),
    r"\}" => main_sym(Close, '}'),
    r"\lbrace" => main_sym(Open, '{'),
    r"\rbrace" => main_sym(Close, '}'),
    r"\lbrack" => main_sym(Open, '['),
    r"\rbrack" => main_sym(Close, ']'),
    r"\lparen" => main_sym(Open, '('),
    r"\rparen" => main_sym(Close, ')'),
    r"\langle" => main_sym(Open, '\u{27e8}'),
    r"\rangle" => main_sym(Close, '\u{27e9}'),
    r"\lceil" => main_sym(Open, '\u{2308}'),
    r"\rceil" => main_sym(Close, '\u{2309}'),
    r"\lfloor" => main_sym(Open, '\u{230a}'),
    r"\rfloor" => main_sym(Close, '\u{230b}'),
    r"\lgroup" => main_sym(Open, '\u{27ee}'),
    r"\rgroup" => main_sym(Close, '\u{27ef}'),
    r"\lmoustache" => main_sym(Open, '\u{23b0}'),
    r"\rmoustache" => main_sym(Close, '\u{23b1}'),
    r"\ldots" => main_sym(Inner, '\u{2026}'),
    r"\cdots" => main_sym(Inner, '\u{22ef}'),
    r"\ddots" => main_sym(Inner, '\u{22f1}'),
    r"\vdots" => main_sym(TextOrd, '\u{22ee}'),
    r"\colon" => main_sym(Punct, ':'),

    // Binary operators.
    r"\pm" => main_sym(Bin, '\u{b1}'),
    r"\mp" => main_sym(Bin, '\u{2213}'),
    r"\times" => main_sym(Bin, '\u{d7}'),
    r"\div" => main_sym(Bin, '\u{f7}'),
    r"\cdot" => main_sym(Bin, '\u{22c5}'),
    r"\cdotp" => main_sym(Punct, '\u{22c5}'),
    r"\circ" => main_sym(Bin, '\u{2218}'),
    r"\bullet" => main_sym(Bin, '\u{2219}'),
    r"\cup" => main_sym(Bin, '\u{222a}'),
    r"\cap" => main_sym(Bin, '\u{2229}'),
    r"\vee" => main_sym(Bin, '\u{2228}'),
    r"\lor" => main_sym(Bin, '\u{2228}'),
    r"\wedge" => main_sym(Bin, '\u{2227}'),
    r"\land" => main_sym(Bin, '\u{2227}'),
    r"\oplus" => main_sym(Bin, '\u{2295}'),
    r"\ominus" => main_sym(Bin, '\u{2296}'),
    r"\otimes" => main_sym(Bin, '\u{2297}'),
    r"\oslash" => main_sym(Bin, '\u{2298}'),
    r"\odot" => main_sym(Bin, '\u{2299}'),
    r"\setminus" => main_sym(Bin, '\u{2216}'),
    r"\smallsetminus" => ams_sym(Bin, '\u{2216}'),
    r"\sqcup" => main_sym(Bin, '\u{2294}'),
    r"\sqcap" => main_sym(Bin, '\u{2293}'),
    r"\uplus" => main_sym(Bin, '\u{228e}'),
    r"\star" => main_sym(Bin, '\u{22c6}'),
    r"\ast" => main_sym(Bin, '\u{2217}'),
    r"\diamond" => main_sym(Bin, '\u{22c4}'),

    // Relations.
    r"\leq" => main_sym(Rel, '\u{2264}'),
    r"\le" => main_sym(Rel, '\u{2264}'),
    r"\geq" => main_sym(Rel, '\u{2265}'),
    r"\ge" => main_sym(Rel, '\u{2265}'),
    r"\neq" => main_sym(Rel, '\u{2260}'),
    r"\ne" => main_sym(Rel, '\u{2260}'),
    r"\equiv" => main_sym(Rel, '\u{2261}'),
    r"\sim" => main_sym(Rel, '\u{223c}'),
    r"\simeq" => main_sym(Rel, '\u{2243}'),
    r"\approx" => main_sym(Rel, '\u{2248}'),
    r"\cong" => main_sym(Rel, '\u{2245}'),
    r"\propto" => main_sym(Rel, '\u{221d}'),
    r"\prec" => main_sym(Rel, '\u{227a}'),
    r"\succ" => main_sym(Rel, '\u{227b}'),
    r"\subset" => main_sym(Rel, '\u{2282}'),
    r"\supset" => main_sym(Rel, '\u{2283}'),
    r"\subseteq" => main_sym(Rel, '\u{2286}'),
    r"\supseteq" => main_sym(Rel, '\u{2287}'),
    r"\subsetneq" => ams_sym(Rel, '\u{228a}'),
    r"\supsetneq" => ams_sym(Rel, '\u{228b}'),
    r"\nsubseteq" => ams_sym(Rel, '\u{2288}'),
    r"\nsupseteq" => ams_sym(Rel, '\u{2289}'),
    r"\sqsubseteq" => main_sym(Rel, '\u{2291}'),
    r"\sqsupseteq" => main_sym(Rel, '\u{2292}'),
    r"\in" => main_sym(Rel, '\u{2208}'),
    r"\ni" => main_sym(Rel, '\u{220b}'),
    r"\owns" => main_sym(Rel, '\u{220b}'),
    r"\ll" => main_sym(Rel, '\u{226a}'),
    r"\gg" => main_sym(Rel, '\u{226b}'),
    r"\mid" => main_sym(Rel, '\u{2223}'),
    r"\parallel" => main_sym(Rel, '\u{2225}'),
    r"\perp" => main_sym(Rel, '\u{22a5}'),
    r"\vdash" => main_sym(Rel, '\u{22a2}'),
    r"\dashv" => main_sym(Rel, '\u{22a3}'),
    r"\models" => main_sym(Rel, '\u{22a8}'),
    r"\vDash" => ams_sym(Rel, '\u{22a8}'),
    r"\asymp" => main_sym(Rel, '\u{224d}'),
    r"\bowtie" => main_sym(Rel, '\u{22c8}'),
    r"\doteq" => main_sym(Rel, '\u{2250}'),
    r"\lesssim" => ams_sym(Rel, '\u{2272}'),
    r"\gtrsim" => ams_sym(Rel, '\u{2273}'),

    // Arrows.
    r"\to" => main_sym(Rel, '\u{2192}'),
    r"\rightarrow" => main_sym(Rel, '\u{2192}'),
    r"\leftarrow" => main_sym(Rel, '\u{2190}'),
    r"\gets" => main_sym(Rel, '\u{2190}'),
    r"\leftrightarrow" => main_sym(Rel, '\u{2194}'),
    r"\Rightarrow" => main_sym(Rel, '\u{21d2}'),
    r"\Leftarrow" => main_sym(Rel, '\u{21d0}'),
    r"\Leftrightarrow" => main_sym(Rel, '\u{21d4}'),
    r"\mapsto" => main_sym(Rel, '\u{21a6}'),
    r"\longleftarrow" => main_sym(Rel, '\u{27f5}'),
    r"\longrightarrow" => main_sym(Rel, '\u{27f6}'),
    r"\longleftrightarrow" => main_sym(Rel, '\u{27f7}'),
    r"\Longleftarrow" => main_sym(Rel, '\u{27f8}'),
    r"\Longrightarrow" => main_sym(Rel, '\u{27f9}'),
    r"\Longleftrightarrow" => main_sym(Rel, '\u{27fa}'),
    r"\longmapsto" => main_sym(Rel, '\u{27fc}'),
    r"\hookrightarrow" => main_sym(Rel, '\u{21aa}'),
    r"\hookleftarrow" => main_sym(Rel, '\u{21a9}'),
    r"\notin" => main_sym(Rel, '\u{2209}'),
    r"\uparrow" => main_sym(Rel, '\u{2191}'),
    r"\downarrow" => main_sym(Rel, '\u{2193}'),
    r"\updownarrow" => main_sym(Rel, '\u{2195}'),
    r"\Uparrow" => main_sym(Rel, '\u{21d1}'),
    r"\Downarrow" => main_sym(Rel, '\u{21d3}'),
    r"\Updownarrow" => main_sym(Rel, '\u{21d5}'),

    // Spacing symbols.
    r"\ " => main_sym(Spacing, '\u{a0}'),
    " " => main_sym(Spacing, '\u{a0}'),
    "~" => main_sym(Spacing, '\u{a0}'),
    r"\space" => main_sym(Spacing, '\u{a0}'),
    r"\nobreakspace" => main_sym(Spacing, '\u{a0}'),

    // Accent glyphs.
    r"\acute" => main_sym(AccentToken, '\u{b4}'),
    r"\grave" => main_sym(AccentToken, '`'),
    r"\ddot" => main_sym(AccentToken, '\u{a8}'),
    r"\tilde" => main_sym(AccentToken, '~'),
    r"\bar" => main_sym(AccentToken, '\u{af}'),
    r"\breve" => main_sym(AccentToken, '\u{2d8}'),
    r"\check" => main_sym(AccentToken, '\u{2c7}'),
    r"\hat" => main_sym(AccentToken, '^'),
    r"\vec" => main_sym(AccentToken, '\u{20d7}'),
    r"\dot" => main_sym(AccentToken, '\u{2d9}'),
    r"\mathring" => main_sym(AccentToken, '\u{2da}'),
    "\u{2c6}" => main_sym(AccentToken, '^'),
    "\u{2dc}" => main_sym(AccentToken, '~'),
    "\u{b4}" => main_sym(AccentToken, '\u{b4}'),

    // Big operators; the registry handles their limits behavior, the
    // entries here supply replacement codepoints for rendering.
    "\u{2211}" => main_sym(OpToken, '\u{2211}'),
    "\u{220f}" => main_sym(OpToken, '\u{220f}'),
    "\u{222b}" => main_sym(OpToken, '\u{222b}'),
    r"\prod" => main_sym(OpToken, '\u{220f}'),
    r"\coprod" => main_sym(OpToken, '\u{2210}'),
    r"\sum" => main_sym(OpToken, '\u{2211}'),
    r"\int" => main_sym(OpToken, '\u{222b}'),
    r"\intop" => main_sym(OpToken, '\u{222b}'),
    r"\smallint" => main_sym(OpToken, '\u{222b}'),
    r"\iint" => main_sym(OpToken, '\u{222c}'),
    r"\iiint" => main_sym(OpToken, '\u{222d}'),
    r"\oint" => main_sym(OpToken, '\u{222e}'),
    r"\bigwedge" => main_sym(OpToken, '\u{22c0}'),
    r"\bigvee" => main_sym(OpToken, '\u{22c1}'),
    r"\bigcap" => main_sym(OpToken, '\u{22c2}'),
    r"\bigcup" => main_sym(OpToken, '\u{22c3}'),
    r"\bigodot" => main_sym(OpToken, '\u{2a00}'),
    r"\bigoplus" => main_sym(OpToken, '\u{2a01}'),
    r"\bigotimes" => main_sym(OpToken, '\u{2a02}'),
    r"\biguplus" => main_sym(OpToken, '\u{2a04}'),
    r"\bigsqcup" => main_sym(OpToken, '\u{2a06}'),
};

static TEXT_SYMBOLS: Map<&'static str, Symbol> = phf_map! {
    " " => main_sym(Spacing, '\u{a0}'),
    "~" => main_sym(Spacing, '\u{a0}'),
    r"\ " => main_sym(Spacing, '\u{a0}'),
    r"\space" => main_sym(Spacing, '\u{a0}'),
    r"\nobreakspace" => main_sym(Spacing, '\u{a0}'),
    r"\#" => plain(TextOrd),
    r"\&" => plain(TextOrd),
    r"\$" => plain(TextOrd),
    r"\%" => plain(TextOrd),
    r"\_" => plain(TextOrd),
    r"\{" => main_sym(TextOrd, '{'),
    r"\}" => main_sym(TextOrd, '}'),
    r"\textbackslash" => main_sym(TextOrd, '\\'),
    r"\textbar" => main_sym(TextOrd, '|'),
    r"\textbraceleft" => main_sym(TextOrd, '{'),
    r"\textbraceright" => main_sym(TextOrd, '}'),
    r"\textunderscore" => main_sym(TextOrd, '_'),
    r"\textendash" => main_sym(TextOrd, '\u{2013}'),
    r"\textemdash" => main_sym(TextOrd, '\u{2014}'),
    r"\textquoteleft" => main_sym(TextOrd, '\u{2018}'),
    r"\textquoteright" => main_sym(TextOrd, '\u{2019}'),
    r"\textquotedblleft" => main_sym(TextOrd, '\u{201c}'),
    r"\textquotedblright" => main_sym(TextOrd, '\u{201d}'),
    r"\textdagger" => main_sym(TextOrd, '\u{2020}'),
    r"\textdaggerdbl" => main_sym(TextOrd, '\u{2021}'),
    r"\textdegree" => main_sym(TextOrd, '\u{b0}'),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_mode() {
        let alpha = get_symbol(Mode::Math, r"\alpha").unwrap();
        assert_eq!(alpha.group, Group::MathOrd);
        assert_eq!(alpha.replace, Some('\u{3b1}'));
        assert!(get_symbol(Mode::Text, r"\alpha").is_none());
        assert!(get_symbol(Mode::Text, r"\textemdash").is_some());
    }

    #[test]
    fn atom_families() {
        assert_eq!(get_symbol(Mode::Math, "+").unwrap().group, Group::Bin);
        assert_eq!(get_symbol(Mode::Math, "=").unwrap().group, Group::Rel);
        assert_eq!(get_symbol(Mode::Math, "(").unwrap().group, Group::Open);
        assert_eq!(get_symbol(Mode::Math, ",").unwrap().group, Group::Punct);
    }
}
