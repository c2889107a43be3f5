//! Static per-font character metrics.
//!
//! Each entry is `[depth, height, italic, skew, width]` in em at the
//! font's design size. The tables cover the glyph repertoire the
//! builders actually reach for; unmeasured glyphs fall back per
//! [`crate::font_metrics::get_character_metrics`].

use phf::{Map, phf_map};

pub(crate) type Entry = [f64; 5];

pub(crate) fn metrics_for_font(font: &str) -> Option<&'static Map<u32, Entry>> {
    Some(match font {
        "AMS-Regular" => &AMS_REGULAR,
        "Caligraphic-Regular" => &CALIGRAPHIC_REGULAR,
        "Fraktur-Regular" => &FRAKTUR_REGULAR,
        "Main-Bold" => &MAIN_BOLD,
        "Main-BoldItalic" => &MAIN_BOLD_ITALIC,
        "Main-Italic" => &MAIN_ITALIC,
        "Main-Regular" => &MAIN_REGULAR,
        "Math-BoldItalic" => &MATH_BOLD_ITALIC,
        "Math-Italic" => &MATH_ITALIC,
        "SansSerif-Regular" => &SANSSERIF_REGULAR,
        "Script-Regular" => &SCRIPT_REGULAR,
        "Size1-Regular" => &SIZE1_REGULAR,
        "Size2-Regular" => &SIZE2_REGULAR,
        "Size3-Regular" => &SIZE3_REGULAR,
        "Size4-Regular" => &SIZE4_REGULAR,
        "Typewriter-Regular" => &TYPEWRITER_REGULAR,
        _ => return None,
    })
}

static MAIN_REGULAR: Map<u32, Entry> = phf_map! {
    32u32 => [0.0, 0.0, 0.0, 0.0, 0.25],
    33u32 => [0.0, 0.69444, 0.0, 0.0, 0.27778],
    34u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    35u32 => [0.19444, 0.69444, 0.0, 0.0, 0.83334],
    36u32 => [0.05556, 0.75, 0.0, 0.0, 0.5],
    37u32 => [0.05556, 0.75, 0.0, 0.0, 0.83334],
    38u32 => [0.0, 0.69444, 0.0, 0.0, 0.77778],
    39u32 => [0.0, 0.69444, 0.0, 0.0, 0.27778],
    40u32 => [0.25, 0.75, 0.0, 0.0, 0.38889],
    41u32 => [0.25, 0.75, 0.0, 0.0, 0.38889],
    42u32 => [0.0, 0.75, 0.0, 0.0, 0.5],
    43u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    44u32 => [0.19444, 0.10556, 0.0, 0.0, 0.27778],
    45u32 => [0.0, 0.43056, 0.0, 0.0, 0.33333],
    46u32 => [0.0, 0.10556, 0.0, 0.0, 0.27778],
    47u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    48u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    49u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    50u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    51u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    52u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    53u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    54u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    55u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    56u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    57u32 => [0.0, 0.64444, 0.0, 0.0, 0.5],
    58u32 => [0.0, 0.43056, 0.0, 0.0, 0.27778],
    59u32 => [0.19444, 0.43056, 0.0, 0.0, 0.27778],
    60u32 => [0.0391, 0.5391, 0.0, 0.0, 0.77778],
    61u32 => [-0.13313, 0.36687, 0.0, 0.0, 0.77778],
    62u32 => [0.0391, 0.5391, 0.0, 0.0, 0.77778],
    63u32 => [0.0, 0.69444, 0.0, 0.0, 0.47222],
    64u32 => [0.0, 0.69444, 0.0, 0.0, 0.77778],
    65u32 => [0.0, 0.68333, 0.0, 0.0, 0.75],
    66u32 => [0.0, 0.68333, 0.0, 0.0, 0.70834],
    67u32 => [0.0, 0.68333, 0.0, 0.0, 0.72222],
    68u32 => [0.0, 0.68333, 0.0, 0.0, 0.76389],
    69u32 => [0.0, 0.68333, 0.0, 0.0, 0.68056],
    70u32 => [0.0, 0.68333, 0.0, 0.0, 0.65278],
    71u32 => [0.0, 0.68333, 0.0, 0.0, 0.78472],
    72u32 => [0.0, 0.68333, 0.0, 0.0, 0.75],
    73u32 => [0.0, 0.68333, 0.0, 0.0, 0.36111],
    74u32 => [0.0, 0.68333, 0.0, 0.0, 0.51389],
    75u32 => [0.0, 0.68333, 0.0, 0.0, 0.77778],
    76u32 => [0.0, 0.68333, 0.0, 0.0, 0.625],
    77u32 => [0.0, 0.68333, 0.0, 0.0, 0.91667],
    78u32 => [0.0, 0.68333, 0.0, 0.0, 0.75],
    79u32 => [0.0, 0.68333, 0.0, 0.0, 0.77778],
    80u32 => [0.0, 0.68333, 0.0, 0.0, 0.68056],
    81u32 => [0.19444, 0.68333, 0.0, 0.0, 0.77778],
    82u32 => [0.0, 0.68333, 0.0, 0.0, 0.73611],
    83u32 => [0.0, 0.68333, 0.0, 0.0, 0.55556],
    84u32 => [0.0, 0.68333, 0.0, 0.0, 0.72222],
    85u32 => [0.0, 0.68333, 0.0, 0.0, 0.75],
    86u32 => [0.0, 0.68333, 0.01389, 0.0, 0.75],
    87u32 => [0.0, 0.68333, 0.01389, 0.0, 1.02778],
    88u32 => [0.0, 0.68333, 0.0, 0.0, 0.75],
    89u32 => [0.0, 0.68333, 0.025, 0.0, 0.75],
    90u32 => [0.0, 0.68333, 0.0, 0.0, 0.61111],
    91u32 => [0.25, 0.75, 0.0, 0.0, 0.27778],
    92u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    93u32 => [0.25, 0.75, 0.0, 0.0, 0.27778],
    94u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    95u32 => [0.31, 0.12056, 0.0, 0.0, 0.5],
    96u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    97u32 => [0.0, 0.43056, 0.0, 0.0, 0.5],
    98u32 => [0.0, 0.69444, 0.0, 0.0, 0.55556],
    99u32 => [0.0, 0.43056, 0.0, 0.0, 0.44445],
    100u32 => [0.0, 0.69444, 0.0, 0.0, 0.55556],
    101u32 => [0.0, 0.43056, 0.0, 0.0, 0.44445],
    102u32 => [0.0, 0.69444, 0.07778, 0.0, 0.30556],
    103u32 => [0.19444, 0.43056, 0.01389, 0.0, 0.5],
    104u32 => [0.0, 0.69444, 0.0, 0.0, 0.55556],
    105u32 => [0.0, 0.66786, 0.0, 0.0, 0.27778],
    106u32 => [0.19444, 0.66786, 0.0, 0.0, 0.30556],
    107u32 => [0.0, 0.69444, 0.0, 0.0, 0.52778],
    108u32 => [0.0, 0.69444, 0.0, 0.0, 0.27778],
    109u32 => [0.0, 0.43056, 0.0, 0.0, 0.83334],
    110u32 => [0.0, 0.43056, 0.0, 0.0, 0.55556],
    111u32 => [0.0, 0.43056, 0.0, 0.0, 0.5],
    112u32 => [0.19444, 0.43056, 0.0, 0.0, 0.55556],
    113u32 => [0.19444, 0.43056, 0.0, 0.0, 0.52778],
    114u32 => [0.0, 0.43056, 0.0, 0.0, 0.39167],
    115u32 => [0.0, 0.43056, 0.0, 0.0, 0.39445],
    116u32 => [0.0, 0.61508, 0.0, 0.0, 0.38889],
    117u32 => [0.0, 0.43056, 0.0, 0.0, 0.55556],
    118u32 => [0.0, 0.43056, 0.01389, 0.0, 0.52778],
    119u32 => [0.0, 0.43056, 0.01389, 0.0, 0.72222],
    120u32 => [0.0, 0.43056, 0.0, 0.0, 0.52778],
    121u32 => [0.19444, 0.43056, 0.01389, 0.0, 0.52778],
    122u32 => [0.0, 0.43056, 0.0, 0.0, 0.44445],
    123u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    124u32 => [0.25, 0.75, 0.0, 0.0, 0.27778],
    125u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    126u32 => [0.0, 0.31786, 0.0, 0.0, 0.5],
    160u32 => [0.0, 0.0, 0.0, 0.0, 0.25],
    168u32 => [0.0, 0.66786, 0.0, 0.0, 0.5],
    172u32 => [0.0, 0.43056, 0.0, 0.0, 0.66667],
    175u32 => [0.0, 0.56778, 0.0, 0.0, 0.5],
    176u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    177u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    180u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    215u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    247u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    710u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    711u32 => [0.0, 0.62847, 0.0, 0.0, 0.5],
    728u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    729u32 => [0.0, 0.66786, 0.0, 0.0, 0.27778],
    730u32 => [0.0, 0.71444, 0.0, 0.0, 0.5],
    732u32 => [0.0, 0.66786, 0.0, 0.0, 0.5],
    // Greek capitals live in the upright font.
    915u32 => [0.0, 0.68333, 0.0, 0.0, 0.625],
    916u32 => [0.0, 0.68333, 0.0, 0.0, 0.83334],
    920u32 => [0.0, 0.68333, 0.0, 0.0, 0.77778],
    923u32 => [0.0, 0.68333, 0.0, 0.0, 0.69445],
    926u32 => [0.0, 0.68333, 0.0, 0.0, 0.66667],
    928u32 => [0.0, 0.68333, 0.0, 0.0, 0.75],
    931u32 => [0.0, 0.68333, 0.0, 0.0, 0.72222],
    933u32 => [0.0, 0.68333, 0.0, 0.0, 0.77778],
    934u32 => [0.0, 0.68333, 0.0, 0.0, 0.72222],
    936u32 => [0.0, 0.68333, 0.0, 0.0, 0.77778],
    937u32 => [0.0, 0.68333, 0.0, 0.0, 0.72222],
    8211u32 => [0.0, 0.43056, 0.0, 0.0, 0.5],
    8212u32 => [0.0, 0.43056, 0.0, 0.0, 1.0],
    8216u32 => [0.0, 0.69444, 0.0, 0.0, 0.27778],
    8217u32 => [0.0, 0.69444, 0.0, 0.0, 0.27778],
    8220u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    8221u32 => [0.0, 0.69444, 0.0, 0.0, 0.5],
    8224u32 => [0.19444, 0.69444, 0.0, 0.0, 0.44445],
    8225u32 => [0.19444, 0.69444, 0.0, 0.0, 0.44445],
    8230u32 => [0.0, 0.12, 0.0, 0.0, 1.172],
    8242u32 => [0.0, 0.55556, 0.01309, 0.0, 0.34444],
    8407u32 => [0.0, 0.71444, 0.15382, 0.0, 0.5],
    8592u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.0],
    8593u32 => [0.19444, 0.69444, 0.0, 0.0, 0.5],
    8594u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.0],
    8595u32 => [0.19444, 0.69444, 0.0, 0.0, 0.5],
    8596u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.0],
    8597u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    8614u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.0],
    8656u32 => [-0.04598, 0.44402, 0.0, 0.0, 1.0],
    8657u32 => [0.19444, 0.69444, 0.0, 0.0, 0.61111],
    8658u32 => [-0.04598, 0.44402, 0.0, 0.0, 1.0],
    8659u32 => [0.19444, 0.69444, 0.0, 0.0, 0.61111],
    8660u32 => [-0.04598, 0.44402, 0.0, 0.0, 1.0],
    8661u32 => [0.25, 0.75, 0.0, 0.0, 0.61111],
    8704u32 => [0.0, 0.69444, 0.0, 0.0, 0.55556],
    8707u32 => [0.0, 0.69444, 0.0, 0.0, 0.55556],
    8709u32 => [0.05556, 0.75, 0.0, 0.0, 0.5],
    8711u32 => [0.0, 0.68333, 0.0, 0.0, 0.83334],
    8712u32 => [0.0391, 0.5391, 0.0, 0.0, 0.66667],
    8715u32 => [0.0391, 0.5391, 0.0, 0.0, 0.66667],
    8722u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    8723u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    8726u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    8727u32 => [-0.03472, 0.46528, 0.0, 0.0, 0.5],
    8728u32 => [-0.05555, 0.44445, 0.0, 0.0, 0.5],
    8730u32 => [-0.00313, 0.80313, 0.0, 0.0, 0.76389],
    8733u32 => [0.0, 0.43056, 0.0, 0.0, 0.77778],
    8734u32 => [0.0, 0.43056, 0.0, 0.0, 1.0],
    8736u32 => [0.0, 0.69224, 0.0, 0.0, 0.72222],
    8739u32 => [0.25, 0.75, 0.0, 0.0, 0.27778],
    8741u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    8743u32 => [0.0, 0.55556, 0.0, 0.0, 0.66667],
    8744u32 => [0.0, 0.55556, 0.0, 0.0, 0.66667],
    8745u32 => [0.0, 0.55556, 0.0, 0.0, 0.66667],
    8746u32 => [0.0, 0.55556, 0.0, 0.0, 0.66667],
    8764u32 => [-0.13313, 0.36687, 0.0, 0.0, 0.77778],
    8768u32 => [0.19444, 0.69444, 0.0, 0.0, 0.27778],
    8771u32 => [-0.03625, 0.46375, 0.0, 0.0, 0.77778],
    8773u32 => [-0.022, 0.589, 0.0, 0.0, 0.77778],
    8776u32 => [-0.01688, 0.48312, 0.0, 0.0, 0.77778],
    8781u32 => [-0.03625, 0.46375, 0.0, 0.0, 0.77778],
    8800u32 => [0.215, 0.716, 0.0, 0.0, 0.77778],
    8801u32 => [-0.03625, 0.46375, 0.0, 0.0, 0.77778],
    8804u32 => [0.13597, 0.63597, 0.0, 0.0, 0.77778],
    8805u32 => [0.13597, 0.63597, 0.0, 0.0, 0.77778],
    8810u32 => [0.0391, 0.5391, 0.0, 0.0, 1.0],
    8811u32 => [0.0391, 0.5391, 0.0, 0.0, 1.0],
    8826u32 => [0.0391, 0.5391, 0.0, 0.0, 0.77778],
    8827u32 => [0.0391, 0.5391, 0.0, 0.0, 0.77778],
    8834u32 => [0.0391, 0.5391, 0.0, 0.0, 0.77778],
    8835u32 => [0.0391, 0.5391, 0.0, 0.0, 0.77778],
    8838u32 => [0.13597, 0.63597, 0.0, 0.0, 0.77778],
    8839u32 => [0.13597, 0.63597, 0.0, 0.0, 0.77778],
    8846u32 => [0.0, 0.55556, 0.0, 0.0, 0.66667],
    8849u32 => [0.13597, 0.63597, 0.0, 0.0, 0.77778],
    8850u32 => [0.13597, 0.63597, 0.0, 0.0, 0.77778],
    8851u32 => [0.0, 0.55556, 0.0, 0.0, 0.66667],
    8852u32 => [0.0, 0.55556, 0.0, 0.0, 0.66667],
    8853u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    8854u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    8855u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    8856u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    8857u32 => [0.08333, 0.58333, 0.0, 0.0, 0.77778],
    8729u32 => [-0.05555, 0.44445, 0.0, 0.0, 0.5],
    8784u32 => [-0.133, 0.673, 0.0, 0.0, 0.77778],
    8501u32 => [0.0, 0.69444, 0.0, 0.0, 0.61111],
    8904u32 => [0.0, 0.54986, 0.0, 0.0, 0.77778],
    8872u32 => [0.0, 0.69444, 0.0, 0.0, 0.61111],
    9651u32 => [0.0, 0.68333, 0.0, 0.0, 0.83334],
    8866u32 => [0.0, 0.69444, 0.0, 0.0, 0.61111],
    8867u32 => [0.0, 0.69444, 0.0, 0.0, 0.61111],
    8868u32 => [0.0, 0.69444, 0.0, 0.0, 0.77778],
    8869u32 => [0.0, 0.69444, 0.0, 0.0, 0.77778],
    8900u32 => [-0.05555, 0.44445, 0.0, 0.0, 0.5],
    8901u32 => [-0.05555, 0.44445, 0.0, 0.0, 0.27778],
    8902u32 => [-0.03472, 0.46528, 0.0, 0.0, 0.5],
    8942u32 => [0.03, 0.9, 0.0, 0.0, 0.27778],
    8943u32 => [-0.19, 0.31, 0.0, 0.0, 1.172],
    8945u32 => [-0.11, 0.64, 0.0, 0.0, 1.172],
    8968u32 => [0.25, 0.75, 0.0, 0.0, 0.44445],
    8969u32 => [0.25, 0.75, 0.0, 0.0, 0.44445],
    8970u32 => [0.25, 0.75, 0.0, 0.0, 0.44445],
    8971u32 => [0.25, 0.75, 0.0, 0.0, 0.44445],
    8994u32 => [-0.14236, 0.35764, 0.0, 0.0, 1.0],
    8995u32 => [-0.14236, 0.35764, 0.0, 0.0, 1.0],
    10216u32 => [0.25, 0.75, 0.0, 0.0, 0.38889],
    10217u32 => [0.25, 0.75, 0.0, 0.0, 0.38889],
    8713u32 => [0.19444, 0.69444, 0.0, 0.0, 0.66667],
    8617u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.0],
    8618u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.0],
    10229u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.63889],
    10230u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.63889],
    10231u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.85556],
    10232u32 => [-0.04598, 0.44402, 0.0, 0.0, 1.63889],
    10233u32 => [-0.04598, 0.44402, 0.0, 0.0, 1.63889],
    10234u32 => [-0.04598, 0.44402, 0.0, 0.0, 1.85556],
    10236u32 => [-0.13313, 0.36687, 0.0, 0.0, 1.63889],
    12296u32 => [0.25, 0.75, 0.0, 0.0, 0.38889],
    12297u32 => [0.25, 0.75, 0.0, 0.0, 0.38889],
};

static MATH_ITALIC: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.68333, 0.0, 0.13889, 0.75],
    66u32 => [0.0, 0.68333, 0.05017, 0.08334, 0.75851],
    67u32 => [0.0, 0.68333, 0.07153, 0.08334, 0.71559],
    68u32 => [0.0, 0.68333, 0.02778, 0.05556, 0.82813],
    69u32 => [0.0, 0.68333, 0.05764, 0.08334, 0.7382],
    70u32 => [0.0, 0.68333, 0.13889, 0.08334, 0.64306],
    71u32 => [0.0, 0.68333, 0.0, 0.08334, 0.78625],
    72u32 => [0.0, 0.68333, 0.08125, 0.05556, 0.83125],
    73u32 => [0.0, 0.68333, 0.07847, 0.11111, 0.43958],
    74u32 => [0.0, 0.68333, 0.09618, 0.16667, 0.55451],
    75u32 => [0.0, 0.68333, 0.07153, 0.05556, 0.84931],
    76u32 => [0.0, 0.68333, 0.0, 0.02778, 0.68056],
    77u32 => [0.0, 0.68333, 0.10903, 0.08334, 0.97014],
    78u32 => [0.0, 0.68333, 0.10903, 0.08334, 0.80347],
    79u32 => [0.0, 0.68333, 0.02778, 0.08334, 0.76278],
    80u32 => [0.0, 0.68333, 0.13889, 0.08334, 0.64201],
    81u32 => [0.19444, 0.68333, 0.0, 0.08334, 0.79056],
    82u32 => [0.0, 0.68333, 0.00773, 0.08334, 0.75929],
    83u32 => [0.0, 0.68333, 0.05764, 0.08334, 0.6132],
    84u32 => [0.0, 0.68333, 0.13889, 0.08334, 0.58438],
    85u32 => [0.0, 0.68333, 0.10903, 0.02778, 0.68278],
    86u32 => [0.0, 0.68333, 0.22222, 0.0, 0.58333],
    87u32 => [0.0, 0.68333, 0.13889, 0.0, 0.94445],
    88u32 => [0.0, 0.68333, 0.07847, 0.08334, 0.82847],
    89u32 => [0.0, 0.68333, 0.22222, 0.0, 0.58056],
    90u32 => [0.0, 0.68333, 0.07153, 0.08334, 0.68264],
    97u32 => [0.0, 0.43056, 0.0, 0.0, 0.52859],
    98u32 => [0.0, 0.69444, 0.0, 0.0, 0.42917],
    99u32 => [0.0, 0.43056, 0.0, 0.05556, 0.43276],
    100u32 => [0.0, 0.69444, 0.0, 0.16667, 0.52049],
    101u32 => [0.0, 0.43056, 0.0, 0.05556, 0.46563],
    102u32 => [0.19444, 0.69444, 0.10764, 0.16667, 0.48959],
    103u32 => [0.19444, 0.43056, 0.03588, 0.02778, 0.47697],
    104u32 => [0.0, 0.69444, 0.0, 0.0, 0.57616],
    105u32 => [0.0, 0.65952, 0.0, 0.0, 0.34451],
    106u32 => [0.19444, 0.65952, 0.05724, 0.0, 0.41181],
    107u32 => [0.0, 0.69444, 0.03148, 0.0, 0.5206],
    108u32 => [0.0, 0.69444, 0.01968, 0.08334, 0.29838],
    109u32 => [0.0, 0.43056, 0.0, 0.0, 0.87801],
    110u32 => [0.0, 0.43056, 0.0, 0.0, 0.60023],
    111u32 => [0.0, 0.43056, 0.0, 0.05556, 0.48472],
    112u32 => [0.19444, 0.43056, 0.0, 0.08334, 0.50313],
    113u32 => [0.19444, 0.43056, 0.03588, 0.08334, 0.44641],
    114u32 => [0.0, 0.43056, 0.02778, 0.05556, 0.45116],
    115u32 => [0.0, 0.43056, 0.0, 0.05556, 0.46875],
    116u32 => [0.0, 0.61508, 0.0, 0.08334, 0.36111],
    117u32 => [0.0, 0.43056, 0.0, 0.02778, 0.57246],
    118u32 => [0.0, 0.43056, 0.03588, 0.02778, 0.48472],
    119u32 => [0.0, 0.43056, 0.02691, 0.08334, 0.71592],
    120u32 => [0.0, 0.43056, 0.0, 0.02778, 0.57153],
    121u32 => [0.19444, 0.43056, 0.03588, 0.05556, 0.49028],
    122u32 => [0.0, 0.43056, 0.04398, 0.05556, 0.46505],
    305u32 => [0.0, 0.43056, 0.0, 0.02778, 0.35815],
    567u32 => [0.19444, 0.43056, 0.0, 0.08334, 0.36111],
    945u32 => [0.0, 0.43056, 0.0037, 0.02778, 0.6397],
    946u32 => [0.19444, 0.69444, 0.05278, 0.08334, 0.56563],
    947u32 => [0.19444, 0.43056, 0.05556, 0.0, 0.51773],
    948u32 => [0.0, 0.69444, 0.03785, 0.05556, 0.44444],
    949u32 => [0.0, 0.43056, 0.02778, 0.08334, 0.40889],
    950u32 => [0.19444, 0.69444, 0.07378, 0.08334, 0.4375],
    951u32 => [0.19444, 0.43056, 0.03588, 0.05556, 0.49653],
    952u32 => [0.0, 0.69444, 0.02778, 0.08334, 0.46944],
    953u32 => [0.0, 0.43056, 0.0, 0.05556, 0.35394],
    954u32 => [0.0, 0.43056, 0.0, 0.0, 0.57616],
    955u32 => [0.0, 0.69444, 0.0, 0.0, 0.58334],
    956u32 => [0.19444, 0.43056, 0.0, 0.02778, 0.60255],
    957u32 => [0.0, 0.43056, 0.06366, 0.02778, 0.49398],
    958u32 => [0.19444, 0.69444, 0.04601, 0.11111, 0.4375],
    960u32 => [0.0, 0.43056, 0.03588, 0.0, 0.57003],
    961u32 => [0.19444, 0.43056, 0.0, 0.08334, 0.51702],
    962u32 => [0.19444, 0.43056, 0.07153, 0.08334, 0.46318],
    963u32 => [0.0, 0.43056, 0.03588, 0.0, 0.57141],
    964u32 => [0.0, 0.43056, 0.1132, 0.02778, 0.43715],
    965u32 => [0.0, 0.43056, 0.03588, 0.02778, 0.54028],
    966u32 => [0.19444, 0.43056, 0.0, 0.08334, 0.65417],
    967u32 => [0.19444, 0.43056, 0.0, 0.05556, 0.62569],
    968u32 => [0.19444, 0.69444, 0.03588, 0.11111, 0.65139],
    969u32 => [0.0, 0.43056, 0.03588, 0.0, 0.62245],
    977u32 => [0.0, 0.69444, 0.02778, 0.08334, 0.59144],
    981u32 => [0.19444, 0.69444, 0.05556, 0.08334, 0.59583],
    982u32 => [0.0, 0.43056, 0.03588, 0.02778, 0.82813],
    1009u32 => [0.19444, 0.43056, 0.03588, 0.08334, 0.51702],
    1013u32 => [0.0, 0.43056, 0.0, 0.05556, 0.40625],
    8467u32 => [0.0, 0.69444, 0.11111, 0.0, 0.41667],
    8706u32 => [0.0, 0.69444, 0.05556, 0.08334, 0.53819],
    8472u32 => [0.19444, 0.43056, 0.0, 0.11111, 0.63646],
};

static MAIN_BOLD: Map<u32, Entry> = phf_map! {
    40u32 => [0.25, 0.75, 0.0, 0.0, 0.44722],
    41u32 => [0.25, 0.75, 0.0, 0.0, 0.44722],
    43u32 => [0.13333, 0.63333, 0.0, 0.0, 0.89444],
    45u32 => [0.0, 0.44444, 0.0, 0.0, 0.38333],
    46u32 => [0.0, 0.12, 0.0, 0.0, 0.31944],
    47u32 => [0.25, 0.75, 0.0, 0.0, 0.575],
    48u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    49u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    50u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    51u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    52u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    53u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    54u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    55u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    56u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    57u32 => [0.0, 0.64444, 0.0, 0.0, 0.575],
    61u32 => [-0.10889, 0.39111, 0.0, 0.0, 0.89444],
    65u32 => [0.0, 0.68611, 0.0, 0.0, 0.86944],
    66u32 => [0.0, 0.68611, 0.0, 0.0, 0.81805],
    67u32 => [0.0, 0.68611, 0.0, 0.0, 0.83055],
    68u32 => [0.0, 0.68611, 0.0, 0.0, 0.88194],
    69u32 => [0.0, 0.68611, 0.0, 0.0, 0.75555],
    70u32 => [0.0, 0.68611, 0.0, 0.0, 0.72361],
    71u32 => [0.0, 0.68611, 0.0, 0.0, 0.90416],
    72u32 => [0.0, 0.68611, 0.0, 0.0, 0.9],
    73u32 => [0.0, 0.68611, 0.0, 0.0, 0.43611],
    74u32 => [0.0, 0.68611, 0.0, 0.0, 0.59444],
    75u32 => [0.0, 0.68611, 0.0, 0.0, 0.90138],
    76u32 => [0.0, 0.68611, 0.0, 0.0, 0.69166],
    77u32 => [0.0, 0.68611, 0.0, 0.0, 1.09166],
    78u32 => [0.0, 0.68611, 0.0, 0.0, 0.9],
    79u32 => [0.0, 0.68611, 0.0, 0.0, 0.86388],
    80u32 => [0.0, 0.68611, 0.0, 0.0, 0.78611],
    81u32 => [0.19444, 0.68611, 0.0, 0.0, 0.86388],
    82u32 => [0.0, 0.68611, 0.0, 0.0, 0.8625],
    83u32 => [0.0, 0.68611, 0.0, 0.0, 0.63889],
    84u32 => [0.0, 0.68611, 0.0, 0.0, 0.8],
    85u32 => [0.0, 0.68611, 0.0, 0.0, 0.88472],
    86u32 => [0.0, 0.68611, 0.01597, 0.0, 0.86944],
    87u32 => [0.0, 0.68611, 0.01597, 0.0, 1.18888],
    88u32 => [0.0, 0.68611, 0.0, 0.0, 0.86944],
    89u32 => [0.0, 0.68611, 0.02875, 0.0, 0.86944],
    90u32 => [0.0, 0.68611, 0.0, 0.0, 0.70277],
    97u32 => [0.0, 0.44444, 0.0, 0.0, 0.55902],
    98u32 => [0.0, 0.69444, 0.0, 0.0, 0.63889],
    99u32 => [0.0, 0.44444, 0.0, 0.0, 0.51111],
    100u32 => [0.0, 0.69444, 0.0, 0.0, 0.63889],
    101u32 => [0.0, 0.44444, 0.0, 0.0, 0.52708],
    102u32 => [0.0, 0.69444, 0.10903, 0.0, 0.35139],
    103u32 => [0.19444, 0.44444, 0.01597, 0.0, 0.575],
    104u32 => [0.0, 0.69444, 0.0, 0.0, 0.63889],
    105u32 => [0.0, 0.69326, 0.0, 0.0, 0.31944],
    106u32 => [0.19444, 0.69326, 0.0, 0.0, 0.35139],
    107u32 => [0.0, 0.69444, 0.0, 0.0, 0.60694],
    108u32 => [0.0, 0.69444, 0.0, 0.0, 0.31944],
    109u32 => [0.0, 0.44444, 0.0, 0.0, 0.95833],
    110u32 => [0.0, 0.44444, 0.0, 0.0, 0.63889],
    111u32 => [0.0, 0.44444, 0.0, 0.0, 0.575],
    112u32 => [0.19444, 0.44444, 0.0, 0.0, 0.63889],
    113u32 => [0.19444, 0.44444, 0.0, 0.0, 0.60694],
    114u32 => [0.0, 0.44444, 0.0, 0.0, 0.47361],
    115u32 => [0.0, 0.44444, 0.0, 0.0, 0.45361],
    116u32 => [0.0, 0.63492, 0.0, 0.0, 0.44722],
    117u32 => [0.0, 0.44444, 0.0, 0.0, 0.63889],
    118u32 => [0.0, 0.44444, 0.01597, 0.0, 0.60694],
    119u32 => [0.0, 0.44444, 0.01597, 0.0, 0.83055],
    120u32 => [0.0, 0.44444, 0.0, 0.0, 0.60694],
    121u32 => [0.19444, 0.44444, 0.01597, 0.0, 0.60694],
    122u32 => [0.0, 0.44444, 0.0, 0.0, 0.51111],
};

static MAIN_ITALIC: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.68333, 0.0, 0.0, 0.74333],
    66u32 => [0.0, 0.68333, 0.05017, 0.0, 0.70389],
    67u32 => [0.0, 0.68333, 0.07153, 0.0, 0.71555],
    68u32 => [0.0, 0.68333, 0.02778, 0.0, 0.755],
    69u32 => [0.0, 0.68333, 0.05764, 0.0, 0.67833],
    70u32 => [0.0, 0.68333, 0.13889, 0.0, 0.65277],
    71u32 => [0.0, 0.68333, 0.0, 0.0, 0.77361],
    72u32 => [0.0, 0.68333, 0.08125, 0.0, 0.74333],
    73u32 => [0.0, 0.68333, 0.07847, 0.0, 0.38555],
    74u32 => [0.0, 0.68333, 0.09618, 0.0, 0.525],
    75u32 => [0.0, 0.68333, 0.07153, 0.0, 0.76944],
    76u32 => [0.0, 0.68333, 0.0, 0.0, 0.62722],
    77u32 => [0.0, 0.68333, 0.10903, 0.0, 0.89666],
    78u32 => [0.0, 0.68333, 0.10903, 0.0, 0.74333],
    79u32 => [0.0, 0.68333, 0.02778, 0.0, 0.76678],
    80u32 => [0.0, 0.68333, 0.13889, 0.0, 0.67833],
    81u32 => [0.19444, 0.68333, 0.0, 0.0, 0.76678],
    82u32 => [0.0, 0.68333, 0.00773, 0.0, 0.72944],
    83u32 => [0.0, 0.68333, 0.05764, 0.0, 0.56222],
    84u32 => [0.0, 0.68333, 0.13889, 0.0, 0.71555],
    85u32 => [0.0, 0.68333, 0.10903, 0.0, 0.74333],
    86u32 => [0.0, 0.68333, 0.22222, 0.0, 0.74333],
    87u32 => [0.0, 0.68333, 0.13889, 0.0, 0.99888],
    88u32 => [0.0, 0.68333, 0.07847, 0.0, 0.74333],
    89u32 => [0.0, 0.68333, 0.22222, 0.0, 0.74333],
    90u32 => [0.0, 0.68333, 0.07153, 0.0, 0.61333],
    97u32 => [0.0, 0.43056, 0.0, 0.0, 0.51111],
    98u32 => [0.0, 0.69444, 0.0, 0.0, 0.46],
    99u32 => [0.0, 0.43056, 0.0, 0.0, 0.46],
    100u32 => [0.0, 0.69444, 0.0, 0.0, 0.51111],
    101u32 => [0.0, 0.43056, 0.0, 0.0, 0.46],
    102u32 => [0.19444, 0.69444, 0.10764, 0.0, 0.30667],
    103u32 => [0.19444, 0.43056, 0.03588, 0.0, 0.46],
    104u32 => [0.0, 0.69444, 0.0, 0.0, 0.51111],
    105u32 => [0.0, 0.65952, 0.0, 0.0, 0.30667],
    106u32 => [0.19444, 0.65952, 0.05724, 0.0, 0.30667],
    107u32 => [0.0, 0.69444, 0.03148, 0.0, 0.46],
    108u32 => [0.0, 0.69444, 0.01968, 0.0, 0.25555],
    109u32 => [0.0, 0.43056, 0.0, 0.0, 0.81777],
    110u32 => [0.0, 0.43056, 0.0, 0.0, 0.56222],
    111u32 => [0.0, 0.43056, 0.0, 0.0, 0.51111],
    112u32 => [0.19444, 0.43056, 0.0, 0.0, 0.51111],
    113u32 => [0.19444, 0.43056, 0.03588, 0.0, 0.46],
    114u32 => [0.0, 0.43056, 0.02778, 0.0, 0.42166],
    115u32 => [0.0, 0.43056, 0.0, 0.0, 0.40889],
    116u32 => [0.0, 0.61508, 0.0, 0.0, 0.33222],
    117u32 => [0.0, 0.43056, 0.0, 0.0, 0.53666],
    118u32 => [0.0, 0.43056, 0.03588, 0.0, 0.46],
    119u32 => [0.0, 0.43056, 0.02691, 0.0, 0.66444],
    120u32 => [0.0, 0.43056, 0.0, 0.0, 0.46389],
    121u32 => [0.19444, 0.43056, 0.03588, 0.0, 0.48555],
    122u32 => [0.0, 0.43056, 0.04398, 0.0, 0.40889],
};

static MAIN_BOLD_ITALIC: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.68611, 0.0, 0.0, 0.86638],
    97u32 => [0.0, 0.44444, 0.0, 0.0, 0.59111],
    98u32 => [0.0, 0.69444, 0.0, 0.0, 0.53222],
    101u32 => [0.0, 0.44444, 0.0, 0.0, 0.53222],
    105u32 => [0.0, 0.69326, 0.0, 0.0, 0.35639],
    111u32 => [0.0, 0.44444, 0.0, 0.0, 0.59111],
    116u32 => [0.0, 0.63492, 0.0, 0.0, 0.38444],
    120u32 => [0.0, 0.44444, 0.0, 0.0, 0.53861],
    121u32 => [0.19444, 0.44444, 0.03704, 0.0, 0.56166],
};

static MATH_BOLD_ITALIC: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.68611, 0.0, 0.0, 0.86944],
    66u32 => [0.0, 0.68611, 0.04835, 0.0, 0.8664],
    67u32 => [0.0, 0.68611, 0.06979, 0.0, 0.81694],
    68u32 => [0.0, 0.68611, 0.03194, 0.0, 0.93812],
    69u32 => [0.0, 0.68611, 0.05451, 0.0, 0.81001],
    70u32 => [0.0, 0.68611, 0.15972, 0.0, 0.68903],
    71u32 => [0.0, 0.68611, 0.0, 0.0, 0.88701],
    72u32 => [0.0, 0.68611, 0.08229, 0.0, 0.98254],
    73u32 => [0.0, 0.68611, 0.07778, 0.0, 0.51142],
    74u32 => [0.0, 0.68611, 0.10069, 0.0, 0.63152],
    75u32 => [0.0, 0.68611, 0.06979, 0.0, 0.97124],
    76u32 => [0.0, 0.68611, 0.0, 0.0, 0.75583],
    77u32 => [0.0, 0.68611, 0.11424, 0.0, 1.14262],
    78u32 => [0.0, 0.68611, 0.11424, 0.0, 0.95095],
    79u32 => [0.0, 0.68611, 0.03194, 0.0, 0.83666],
    80u32 => [0.0, 0.68611, 0.15972, 0.0, 0.72309],
    81u32 => [0.19444, 0.68611, 0.0, 0.0, 0.86861],
    82u32 => [0.0, 0.68611, 0.00421, 0.0, 0.87235],
    83u32 => [0.0, 0.68611, 0.05382, 0.0, 0.69271],
    84u32 => [0.0, 0.68611, 0.15972, 0.0, 0.63663],
    85u32 => [0.0, 0.68611, 0.11424, 0.0, 0.80027],
    86u32 => [0.0, 0.68611, 0.25555, 0.0, 0.67778],
    87u32 => [0.0, 0.68611, 0.15972, 0.0, 1.09305],
    88u32 => [0.0, 0.68611, 0.07778, 0.0, 0.94722],
    89u32 => [0.0, 0.68611, 0.25555, 0.0, 0.67458],
    90u32 => [0.0, 0.68611, 0.06979, 0.0, 0.77257],
    97u32 => [0.0, 0.44444, 0.0, 0.0, 0.63287],
    98u32 => [0.0, 0.69444, 0.0, 0.0, 0.52083],
    99u32 => [0.0, 0.44444, 0.0, 0.0, 0.51342],
    100u32 => [0.0, 0.69444, 0.0, 0.0, 0.60972],
    101u32 => [0.0, 0.44444, 0.0, 0.0, 0.55361],
    102u32 => [0.19444, 0.69444, 0.11042, 0.0, 0.56806],
    103u32 => [0.19444, 0.44444, 0.03704, 0.0, 0.5449],
    104u32 => [0.0, 0.69444, 0.0, 0.0, 0.66759],
    105u32 => [0.0, 0.69326, 0.0, 0.0, 0.4048],
    106u32 => [0.19444, 0.69326, 0.0622, 0.0, 0.47083],
    107u32 => [0.0, 0.69444, 0.01852, 0.0, 0.6037],
    108u32 => [0.0, 0.69444, 0.0088, 0.0, 0.34815],
    109u32 => [0.0, 0.44444, 0.0, 0.0, 1.0324],
    110u32 => [0.0, 0.44444, 0.0, 0.0, 0.71296],
    111u32 => [0.0, 0.44444, 0.0, 0.0, 0.58472],
    112u32 => [0.19444, 0.44444, 0.0, 0.0, 0.60092],
    113u32 => [0.19444, 0.44444, 0.03704, 0.0, 0.54213],
    114u32 => [0.0, 0.44444, 0.03194, 0.0, 0.5287],
    115u32 => [0.0, 0.44444, 0.0, 0.0, 0.53125],
    116u32 => [0.0, 0.63492, 0.0, 0.0, 0.41528],
    117u32 => [0.0, 0.44444, 0.0, 0.0, 0.68102],
    118u32 => [0.0, 0.44444, 0.03704, 0.0, 0.56666],
    119u32 => [0.0, 0.44444, 0.02778, 0.0, 0.83148],
    120u32 => [0.0, 0.44444, 0.0, 0.0, 0.65903],
    121u32 => [0.19444, 0.44444, 0.03704, 0.0, 0.59028],
    122u32 => [0.0, 0.44444, 0.04213, 0.0, 0.55509],
    945u32 => [0.0, 0.44444, 0.0, 0.0, 0.76228],
    946u32 => [0.19444, 0.69444, 0.03194, 0.0, 0.65556],
    960u32 => [0.0, 0.44444, 0.03704, 0.0, 0.68241],
};

static AMS_REGULAR: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    66u32 => [0.0, 0.68889, 0.0, 0.0, 0.66667],
    67u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    68u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    69u32 => [0.0, 0.68889, 0.0, 0.0, 0.66667],
    70u32 => [0.0, 0.68889, 0.0, 0.0, 0.61111],
    71u32 => [0.0, 0.68889, 0.0, 0.0, 0.77778],
    72u32 => [0.0, 0.68889, 0.0, 0.0, 0.77778],
    73u32 => [0.0, 0.68889, 0.0, 0.0, 0.38889],
    74u32 => [0.16667, 0.68889, 0.0, 0.0, 0.5],
    75u32 => [0.0, 0.68889, 0.0, 0.0, 0.77778],
    76u32 => [0.0, 0.68889, 0.0, 0.0, 0.66667],
    77u32 => [0.0, 0.68889, 0.0, 0.0, 0.94445],
    78u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    79u32 => [0.16667, 0.68889, 0.0, 0.0, 0.77778],
    80u32 => [0.0, 0.68889, 0.0, 0.0, 0.61111],
    81u32 => [0.16667, 0.68889, 0.0, 0.0, 0.77778],
    82u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    83u32 => [0.0, 0.68889, 0.0, 0.0, 0.55556],
    84u32 => [0.0, 0.68889, 0.0, 0.0, 0.66667],
    85u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    86u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    87u32 => [0.0, 0.68889, 0.0, 0.0, 1.0],
    88u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    89u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    90u32 => [0.0, 0.68889, 0.0, 0.0, 0.66667],
    107u32 => [0.0, 0.68889, 0.0, 0.0, 0.55556],
    8463u32 => [0.0, 0.68889, 0.0, 0.0, 0.54028],
    8487u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    8498u32 => [0.0, 0.68889, 0.0, 0.0, 0.55556],
    8708u32 => [0.0, 0.69444, 0.0, 0.0, 0.55556],
    8714u32 => [0.0, 0.54986, 0.0, 0.0, 0.66667],
    8722u32 => [-0.03598, 0.46402, 0.0, 0.0, 0.5],
    8725u32 => [0.25, 0.75, 0.0, 0.0, 0.5],
    8808u32 => [0.25142, 0.75726, 0.0, 0.0, 0.77778],
    8809u32 => [0.25142, 0.75726, 0.0, 0.0, 0.77778],
    8816u32 => [0.25142, 0.75726, 0.0, 0.0, 0.77778],
    8817u32 => [0.25142, 0.75726, 0.0, 0.0, 0.77778],
    8709u32 => [0.0, 0.68889, 0.0, 0.0, 0.61111],
    8818u32 => [0.0886, 0.58778, 0.0, 0.0, 0.77778],
    8819u32 => [0.0886, 0.58778, 0.0, 0.0, 0.77778],
    8840u32 => [0.27138, 0.77138, 0.0, 0.0, 0.77778],
    8841u32 => [0.27138, 0.77138, 0.0, 0.0, 0.77778],
    8842u32 => [0.22958, 0.72958, 0.0, 0.0, 0.77778],
    8843u32 => [0.22958, 0.72958, 0.0, 0.0, 0.77778],
    8872u32 => [0.0, 0.69224, 0.0, 0.0, 0.61111],
    8901u32 => [0.0, 0.37788, 0.0, 0.0, 0.27778],
    9633u32 => [0.0, 0.68889, 0.0, 0.0, 0.77778],
    9651u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
    9661u32 => [0.0, 0.68889, 0.0, 0.0, 0.72222],
};

static CALIGRAPHIC_REGULAR: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.68333, 0.0, 0.19445, 0.79847],
    66u32 => [0.0, 0.68333, 0.03041, 0.13889, 0.65681],
    67u32 => [0.0, 0.68333, 0.05834, 0.13889, 0.52653],
    68u32 => [0.0, 0.68333, 0.02778, 0.08334, 0.77139],
    69u32 => [0.0, 0.68333, 0.08944, 0.11111, 0.52778],
    70u32 => [0.0, 0.68333, 0.09931, 0.11111, 0.71875],
    71u32 => [0.09722, 0.68333, 0.0593, 0.11111, 0.59487],
    72u32 => [0.0, 0.68333, 0.00965, 0.11111, 0.84452],
    73u32 => [0.0, 0.68333, 0.07382, 0.0, 0.54452],
    74u32 => [0.09722, 0.68333, 0.18472, 0.16667, 0.67778],
    75u32 => [0.0, 0.68333, 0.01445, 0.05556, 0.76195],
    76u32 => [0.0, 0.68333, 0.0, 0.13889, 0.68972],
    77u32 => [0.0, 0.68333, 0.0, 0.13889, 1.2009],
    78u32 => [0.0, 0.68333, 0.14736, 0.08334, 0.82049],
    79u32 => [0.0, 0.68333, 0.02778, 0.11111, 0.79611],
    80u32 => [0.0, 0.68333, 0.08222, 0.08334, 0.69556],
    81u32 => [0.09722, 0.68333, 0.0, 0.11111, 0.81667],
    82u32 => [0.0, 0.68333, 0.0, 0.08334, 0.8475],
    83u32 => [0.0, 0.68333, 0.075, 0.13889, 0.60556],
    84u32 => [0.0, 0.68333, 0.25417, 0.0, 0.54464],
    85u32 => [0.0, 0.68333, 0.09931, 0.08334, 0.62583],
    86u32 => [0.0, 0.68333, 0.08222, 0.0, 0.61278],
    87u32 => [0.0, 0.68333, 0.08222, 0.08334, 0.98778],
    88u32 => [0.0, 0.68333, 0.14643, 0.13889, 0.7133],
    89u32 => [0.09722, 0.68333, 0.08222, 0.08334, 0.66834],
    90u32 => [0.0, 0.68333, 0.07944, 0.13889, 0.72473],
};

static FRAKTUR_REGULAR: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.69141, 0.0, 0.0, 0.71875],
    66u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    67u32 => [0.0, 0.69141, 0.0, 0.0, 0.60156],
    68u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    69u32 => [0.0, 0.69141, 0.0, 0.0, 0.60156],
    70u32 => [0.12604, 0.69141, 0.0, 0.0, 0.60156],
    71u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    72u32 => [0.06302, 0.69141, 0.0, 0.0, 0.66406],
    73u32 => [0.0, 0.69141, 0.0, 0.0, 0.51563],
    74u32 => [0.12604, 0.69141, 0.0, 0.0, 0.51563],
    75u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    76u32 => [0.0, 0.69141, 0.0, 0.0, 0.53906],
    77u32 => [0.0, 0.69141, 0.0, 0.0, 1.03906],
    78u32 => [0.0, 0.69141, 0.0, 0.0, 0.78906],
    79u32 => [0.0, 0.69141, 0.0, 0.0, 0.72656],
    80u32 => [0.18906, 0.69141, 0.0, 0.0, 0.60156],
    81u32 => [0.03781, 0.69141, 0.0, 0.0, 0.72656],
    82u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    83u32 => [0.0, 0.69141, 0.0, 0.0, 0.60156],
    84u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    85u32 => [0.0, 0.69141, 0.0, 0.0, 0.72656],
    86u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    87u32 => [0.0, 0.69141, 0.0, 0.0, 1.03906],
    88u32 => [0.0, 0.69141, 0.0, 0.0, 0.66406],
    89u32 => [0.18906, 0.69141, 0.0, 0.0, 0.66406],
    90u32 => [0.12604, 0.69141, 0.0, 0.0, 0.60156],
    97u32 => [0.0, 0.47534, 0.0, 0.0, 0.5],
    98u32 => [0.0, 0.69141, 0.0, 0.0, 0.51342],
    99u32 => [0.0, 0.47534, 0.0, 0.0, 0.38907],
    100u32 => [0.0, 0.62119, 0.0, 0.0, 0.49889],
    101u32 => [0.0, 0.47534, 0.0, 0.0, 0.40165],
    102u32 => [0.18906, 0.69141, 0.0, 0.0, 0.32605],
    103u32 => [0.18906, 0.47534, 0.0, 0.0, 0.5],
    104u32 => [0.18906, 0.69141, 0.0, 0.0, 0.52083],
    105u32 => [0.0, 0.69141, 0.0, 0.0, 0.27865],
    106u32 => [0.18906, 0.69141, 0.0, 0.0, 0.27865],
    107u32 => [0.0, 0.69141, 0.0, 0.0, 0.38907],
    108u32 => [0.0, 0.69141, 0.0, 0.0, 0.27865],
    109u32 => [0.0, 0.47534, 0.0, 0.0, 0.76695],
    110u32 => [0.0, 0.47534, 0.0, 0.0, 0.52664],
    111u32 => [0.0, 0.47534, 0.0, 0.0, 0.48897],
    112u32 => [0.18906, 0.52396, 0.0, 0.0, 0.5],
    113u32 => [0.18906, 0.47534, 0.0, 0.0, 0.48897],
    114u32 => [0.0, 0.47534, 0.0, 0.0, 0.38907],
    115u32 => [0.0, 0.47534, 0.0, 0.0, 0.44314],
    116u32 => [0.0, 0.62119, 0.0, 0.0, 0.33198],
    117u32 => [0.0, 0.47534, 0.0, 0.0, 0.5172],
    118u32 => [0.0, 0.52396, 0.0, 0.0, 0.5],
    119u32 => [0.0, 0.52396, 0.0, 0.0, 0.77778],
    120u32 => [0.18906, 0.47534, 0.0, 0.0, 0.38907],
    121u32 => [0.18906, 0.47534, 0.0, 0.0, 0.48897],
    122u32 => [0.18906, 0.47534, 0.0, 0.0, 0.38907],
};

static SCRIPT_REGULAR: Map<u32, Entry> = phf_map! {
    65u32 => [0.0, 0.7, 0.22925, 0.0, 0.80253],
    66u32 => [0.0, 0.7, 0.04087, 0.0, 0.90757],
    67u32 => [0.0, 0.7, 0.1689, 0.0, 0.66278],
    68u32 => [0.0, 0.7, 0.09371, 0.0, 0.77443],
    69u32 => [0.0, 0.7, 0.18583, 0.0, 0.56266],
    70u32 => [0.0, 0.7, 0.13634, 0.0, 0.89591],
    71u32 => [0.0, 0.7, 0.17322, 0.0, 0.60968],
    72u32 => [0.0, 0.7, 0.29694, 0.0, 0.96955],
    73u32 => [0.0, 0.7, 0.19189, 0.0, 0.80884],
    74u32 => [0.27778, 0.7, 0.19189, 0.0, 1.09348],
    75u32 => [0.0, 0.7, 0.31259, 0.0, 1.01124],
    76u32 => [0.0, 0.7, 0.19189, 0.0, 0.85608],
    77u32 => [0.0, 0.7, 0.15981, 0.0, 1.45],
    78u32 => [0.0, 0.7, 0.3525, 0.0, 0.84663],
    79u32 => [0.0, 0.7, 0.08078, 0.0, 0.76302],
    80u32 => [0.0, 0.7, 0.08078, 0.0, 0.90968],
    81u32 => [0.0, 0.7, 0.03305, 0.0, 0.78601],
    82u32 => [0.0, 0.7, 0.06259, 0.0, 0.78648],
    83u32 => [0.0, 0.7, 0.19189, 0.0, 0.66099],
    84u32 => [0.0, 0.7, 0.29087, 0.0, 0.89591],
    85u32 => [0.0, 0.7, 0.25815, 0.0, 0.69827],
    86u32 => [0.0, 0.7, 0.27523, 0.0, 0.66598],
    87u32 => [0.0, 0.7, 0.27523, 0.0, 1.09844],
    88u32 => [0.0, 0.7, 0.26006, 0.0, 0.86882],
    89u32 => [0.0, 0.7, 0.2939, 0.0, 0.82874],
    90u32 => [0.0, 0.7, 0.24037, 0.0, 0.74979],
};

static SANSSERIF_REGULAR: Map<u32, Entry> = phf_map! {
    48u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    49u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    50u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    51u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    52u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    53u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    54u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    55u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    56u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    57u32 => [0.0, 0.65556, 0.0, 0.0, 0.5],
    65u32 => [0.0, 0.69444, 0.0, 0.0, 0.66667],
    66u32 => [0.0, 0.69444, 0.0, 0.0, 0.66667],
    67u32 => [0.0, 0.69444, 0.0, 0.0, 0.63889],
    68u32 => [0.0, 0.69444, 0.0, 0.0, 0.72223],
    69u32 => [0.0, 0.69444, 0.0, 0.0, 0.59722],
    70u32 => [0.0, 0.69444, 0.0, 0.0, 0.56945],
    71u32 => [0.0, 0.69444, 0.0, 0.0, 0.66667],
    72u32 => [0.0, 0.69444, 0.0, 0.0, 0.70834],
    73u32 => [0.0, 0.69444, 0.0, 0.0, 0.27778],
    74u32 => [0.0, 0.69444, 0.0, 0.0, 0.47222],
    75u32 => [0.0, 0.69444, 0.0, 0.0, 0.69445],
    76u32 => [0.0, 0.69444, 0.0, 0.0, 0.54167],
    77u32 => [0.0, 0.69444, 0.0, 0.0, 0.875],
    78u32 => [0.0, 0.69444, 0.0, 0.0, 0.70834],
    79u32 => [0.0, 0.69444, 0.0, 0.0, 0.73611],
    80u32 => [0.0, 0.69444, 0.0, 0.0, 0.63889],
    81u32 => [0.125, 0.69444, 0.0, 0.0, 0.73611],
    82u32 => [0.0, 0.69444, 0.0, 0.0, 0.64584],
    83u32 => [0.0, 0.69444, 0.0, 0.0, 0.55556],
    84u32 => [0.0, 0.69444, 0.0, 0.0, 0.68056],
    85u32 => [0.0, 0.69444, 0.0, 0.0, 0.6875],
    86u32 => [0.0, 0.69444, 0.01389, 0.0, 0.66667],
    87u32 => [0.0, 0.69444, 0.01389, 0.0, 0.94445],
    88u32 => [0.0, 0.69444, 0.0, 0.0, 0.66667],
    89u32 => [0.0, 0.69444, 0.025, 0.0, 0.66667],
    90u32 => [0.0, 0.69444, 0.0, 0.0, 0.61111],
    97u32 => [0.0, 0.44444, 0.0, 0.0, 0.48056],
    98u32 => [0.0, 0.69444, 0.0, 0.0, 0.51667],
    99u32 => [0.0, 0.44444, 0.0, 0.0, 0.44445],
    100u32 => [0.0, 0.69444, 0.0, 0.0, 0.51667],
    101u32 => [0.0, 0.44444, 0.0, 0.0, 0.44445],
    102u32 => [0.0, 0.69444, 0.06944, 0.0, 0.30556],
    103u32 => [0.19444, 0.44444, 0.01389, 0.0, 0.5],
    104u32 => [0.0, 0.69444, 0.0, 0.0, 0.51667],
    105u32 => [0.0, 0.67937, 0.0, 0.0, 0.23889],
    106u32 => [0.19444, 0.67937, 0.0, 0.0, 0.26667],
    107u32 => [0.0, 0.69444, 0.0, 0.0, 0.48889],
    108u32 => [0.0, 0.69444, 0.0, 0.0, 0.23889],
    109u32 => [0.0, 0.44444, 0.0, 0.0, 0.79445],
    110u32 => [0.0, 0.44444, 0.0, 0.0, 0.51667],
    111u32 => [0.0, 0.44444, 0.0, 0.0, 0.5],
    112u32 => [0.19444, 0.44444, 0.0, 0.0, 0.51667],
    113u32 => [0.19444, 0.44444, 0.0, 0.0, 0.51667],
    114u32 => [0.0, 0.44444, 0.01389, 0.0, 0.34167],
    115u32 => [0.0, 0.44444, 0.0, 0.0, 0.38333],
    116u32 => [0.0, 0.57143, 0.0, 0.0, 0.36111],
    117u32 => [0.0, 0.44444, 0.0, 0.0, 0.51667],
    118u32 => [0.0, 0.44444, 0.01389, 0.0, 0.46111],
    119u32 => [0.0, 0.44444, 0.01389, 0.0, 0.68334],
    120u32 => [0.0, 0.44444, 0.0, 0.0, 0.46111],
    121u32 => [0.19444, 0.44444, 0.01389, 0.0, 0.46111],
    122u32 => [0.0, 0.44444, 0.0, 0.0, 0.43472],
};

static TYPEWRITER_REGULAR: Map<u32, Entry> = phf_map! {
    32u32 => [0.0, 0.0, 0.0, 0.0, 0.525],
    33u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    40u32 => [0.08333, 0.69444, 0.0, 0.0, 0.525],
    41u32 => [0.08333, 0.69444, 0.0, 0.0, 0.525],
    43u32 => [-0.08056, 0.52778, 0.0, 0.0, 0.525],
    45u32 => [-0.08056, 0.52778, 0.0, 0.0, 0.525],
    46u32 => [0.0, 0.12, 0.0, 0.0, 0.525],
    47u32 => [0.08333, 0.69444, 0.0, 0.0, 0.525],
    48u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    49u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    50u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    51u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    52u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    53u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    54u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    55u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    56u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    57u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    61u32 => [-0.19549, 0.41285, 0.0, 0.0, 0.525],
    65u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    66u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    67u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    68u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    69u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    70u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    71u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    72u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    73u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    74u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    75u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    76u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    77u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    78u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    79u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    80u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    81u32 => [0.13889, 0.61111, 0.0, 0.0, 0.525],
    82u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    83u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    84u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    85u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    86u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    87u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    88u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    89u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    90u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    97u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    98u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    99u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    100u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    101u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    102u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    103u32 => [0.22222, 0.43056, 0.0, 0.0, 0.525],
    104u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    105u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    106u32 => [0.22222, 0.61111, 0.0, 0.0, 0.525],
    107u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    108u32 => [0.0, 0.61111, 0.0, 0.0, 0.525],
    109u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    110u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    111u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    112u32 => [0.22222, 0.43056, 0.0, 0.0, 0.525],
    113u32 => [0.22222, 0.43056, 0.0, 0.0, 0.525],
    114u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    115u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    116u32 => [0.0, 0.55358, 0.0, 0.0, 0.525],
    117u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    118u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    119u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    120u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
    121u32 => [0.22222, 0.43056, 0.0, 0.0, 0.525],
    122u32 => [0.0, 0.43056, 0.0, 0.0, 0.525],
};

static SIZE1_REGULAR: Map<u32, Entry> = phf_map! {
    40u32 => [0.35001, 0.85, 0.0, 0.0, 0.45834],
    41u32 => [0.35001, 0.85, 0.0, 0.0, 0.45834],
    47u32 => [0.35001, 0.85, 0.0, 0.0, 0.57778],
    91u32 => [0.35001, 0.85, 0.0, 0.0, 0.31945],
    92u32 => [0.35001, 0.85, 0.0, 0.0, 0.57778],
    93u32 => [0.35001, 0.85, 0.0, 0.0, 0.31945],
    123u32 => [0.35001, 0.85, 0.0, 0.0, 0.45834],
    125u32 => [0.35001, 0.85, 0.0, 0.0, 0.45834],
    8593u32 => [0.6, 0.6, 0.0, 0.0, 0.66667],
    8595u32 => [0.6, 0.6, 0.0, 0.0, 0.66667],
    8657u32 => [0.6, 0.6, 0.0, 0.0, 0.77778],
    8659u32 => [0.6, 0.6, 0.0, 0.0, 0.77778],
    9168u32 => [1e-05, 0.6, 0.0, 0.0, 0.66667],
    8719u32 => [0.25001, 0.75, 0.0, 0.0, 0.94445],
    8720u32 => [0.25001, 0.75, 0.0, 0.0, 0.94445],
    8721u32 => [0.25001, 0.75, 0.0, 0.0, 1.05556],
    8730u32 => [0.35001, 0.85, 0.0, 0.0, 1.0],
    8739u32 => [0.35001, 0.85, 0.0, 0.0, 0.30556],
    8741u32 => [0.35001, 0.85, 0.0, 0.0, 0.55556],
    8747u32 => [0.80556, 0.30556, 0.19445, 0.0, 0.47222],
    8748u32 => [0.80556, 0.30556, 0.19445, 0.0, 0.81111],
    8749u32 => [0.80556, 0.30556, 0.19445, 0.0, 1.15],
    8750u32 => [0.80556, 0.30556, 0.19445, 0.0, 0.47222],
    8896u32 => [0.25001, 0.75, 0.0, 0.0, 0.83334],
    8897u32 => [0.25001, 0.75, 0.0, 0.0, 0.83334],
    8898u32 => [0.25001, 0.75, 0.0, 0.0, 0.83334],
    8899u32 => [0.25001, 0.75, 0.0, 0.0, 0.83334],
    8968u32 => [0.35001, 0.85, 0.0, 0.0, 0.38889],
    8969u32 => [0.35001, 0.85, 0.0, 0.0, 0.38889],
    8970u32 => [0.35001, 0.85, 0.0, 0.0, 0.38889],
    8971u32 => [0.35001, 0.85, 0.0, 0.0, 0.38889],
    10216u32 => [0.35001, 0.85, 0.0, 0.0, 0.47222],
    10217u32 => [0.35001, 0.85, 0.0, 0.0, 0.47222],
    10752u32 => [0.25001, 0.75, 0.0, 0.0, 1.11111],
    10753u32 => [0.25001, 0.75, 0.0, 0.0, 1.11111],
    10754u32 => [0.25001, 0.75, 0.0, 0.0, 1.11111],
    10756u32 => [0.25001, 0.75, 0.0, 0.0, 0.83334],
    10758u32 => [0.25001, 0.75, 0.0, 0.0, 0.83334],
};

static SIZE2_REGULAR: Map<u32, Entry> = phf_map! {
    40u32 => [0.65002, 1.15, 0.0, 0.0, 0.59722],
    41u32 => [0.65002, 1.15, 0.0, 0.0, 0.59722],
    47u32 => [0.65002, 1.15, 0.0, 0.0, 0.81111],
    91u32 => [0.65002, 1.15, 0.0, 0.0, 0.41667],
    92u32 => [0.65002, 1.15, 0.0, 0.0, 0.81111],
    93u32 => [0.65002, 1.15, 0.0, 0.0, 0.41667],
    123u32 => [0.65002, 1.15, 0.0, 0.0, 0.59722],
    125u32 => [0.65002, 1.15, 0.0, 0.0, 0.59722],
    8719u32 => [0.55001, 1.05, 0.0, 0.0, 1.27778],
    8720u32 => [0.55001, 1.05, 0.0, 0.0, 1.27778],
    8721u32 => [0.55001, 1.05, 0.0, 0.0, 1.44445],
    8748u32 => [1.36003, 0.86225, 0.44445, 0.0, 0.94445],
    8749u32 => [1.36003, 0.86225, 0.44445, 0.0, 1.33334],
    10752u32 => [0.55001, 1.05, 0.0, 0.0, 1.51112],
    10753u32 => [0.55001, 1.05, 0.0, 0.0, 1.51112],
    10754u32 => [0.55001, 1.05, 0.0, 0.0, 1.51112],
    10756u32 => [0.55001, 1.05, 0.0, 0.0, 1.11111],
    10758u32 => [0.55001, 1.05, 0.0, 0.0, 1.11111],
    8730u32 => [0.65002, 1.15, 0.0, 0.0, 1.0],
    8747u32 => [1.36003, 0.86225, 0.44445, 0.0, 0.55556],
    8750u32 => [1.36003, 0.86225, 0.44445, 0.0, 0.55556],
    8896u32 => [0.55001, 1.05, 0.0, 0.0, 1.11111],
    8897u32 => [0.55001, 1.05, 0.0, 0.0, 1.11111],
    8898u32 => [0.55001, 1.05, 0.0, 0.0, 1.11111],
    8899u32 => [0.55001, 1.05, 0.0, 0.0, 1.11111],
    8968u32 => [0.65002, 1.15, 0.0, 0.0, 0.52778],
    8969u32 => [0.65002, 1.15, 0.0, 0.0, 0.52778],
    8970u32 => [0.65002, 1.15, 0.0, 0.0, 0.52778],
    8971u32 => [0.65002, 1.15, 0.0, 0.0, 0.52778],
    10216u32 => [0.65002, 1.15, 0.0, 0.0, 0.52778],
    10217u32 => [0.65002, 1.15, 0.0, 0.0, 0.52778],
};

static SIZE3_REGULAR: Map<u32, Entry> = phf_map! {
    40u32 => [0.95003, 1.45, 0.0, 0.0, 0.73611],
    41u32 => [0.95003, 1.45, 0.0, 0.0, 0.73611],
    47u32 => [0.95003, 1.45, 0.0, 0.0, 1.04445],
    91u32 => [0.95003, 1.45, 0.0, 0.0, 0.47222],
    92u32 => [0.95003, 1.45, 0.0, 0.0, 1.04445],
    93u32 => [0.95003, 1.45, 0.0, 0.0, 0.47222],
    123u32 => [0.95003, 1.45, 0.0, 0.0, 0.73611],
    125u32 => [0.95003, 1.45, 0.0, 0.0, 0.73611],
    8730u32 => [0.95003, 1.45, 0.0, 0.0, 1.0],
    8968u32 => [0.95003, 1.45, 0.0, 0.0, 0.58334],
    8969u32 => [0.95003, 1.45, 0.0, 0.0, 0.58334],
    8970u32 => [0.95003, 1.45, 0.0, 0.0, 0.58334],
    8971u32 => [0.95003, 1.45, 0.0, 0.0, 0.58334],
    10216u32 => [0.95003, 1.45, 0.0, 0.0, 0.75],
    10217u32 => [0.95003, 1.45, 0.0, 0.0, 0.75],
};

static SIZE4_REGULAR: Map<u32, Entry> = phf_map! {
    40u32 => [1.25003, 1.75, 0.0, 0.0, 0.79167],
    41u32 => [1.25003, 1.75, 0.0, 0.0, 0.79167],
    47u32 => [1.25003, 1.75, 0.0, 0.0, 1.27778],
    91u32 => [1.25003, 1.75, 0.0, 0.0, 0.58334],
    92u32 => [1.25003, 1.75, 0.0, 0.0, 1.27778],
    93u32 => [1.25003, 1.75, 0.0, 0.0, 0.58334],
    123u32 => [1.25003, 1.75, 0.0, 0.0, 0.80556],
    125u32 => [1.25003, 1.75, 0.0, 0.0, 0.80556],
    8730u32 => [1.25003, 1.75, 0.0, 0.0, 1.0],
    8968u32 => [1.25003, 1.75, 0.0, 0.0, 0.63889],
    8969u32 => [1.25003, 1.75, 0.0, 0.0, 0.63889],
    8970u32 => [1.25003, 1.75, 0.0, 0.0, 0.63889],
    8971u32 => [1.25003, 1.75, 0.0, 0.0, 0.63889],
    10216u32 => [1.25003, 1.75, 0.0, 0.0, 0.80556],
    10217u32 => [1.25003, 1.75, 0.0, 0.0, 0.80556],
    // Extensible bracket pieces.
    9115u32 => [0.64502, 1.155, 0.0, 0.0, 0.875],
    9116u32 => [1e-05, 0.6, 0.0, 0.0, 0.875],
    9117u32 => [0.64502, 1.155, 0.0, 0.0, 0.875],
    9118u32 => [0.64502, 1.155, 0.0, 0.0, 0.875],
    9119u32 => [1e-05, 0.6, 0.0, 0.0, 0.875],
    9120u32 => [0.64502, 1.155, 0.0, 0.0, 0.875],
    9121u32 => [0.64502, 1.155, 0.0, 0.0, 0.66667],
    9122u32 => [1e-05, 0.6, 0.0, 0.0, 0.66667],
    9123u32 => [0.64502, 1.155, 0.0, 0.0, 0.66667],
    9124u32 => [0.64502, 1.155, 0.0, 0.0, 0.66667],
    9125u32 => [1e-05, 0.6, 0.0, 0.0, 0.66667],
    9126u32 => [0.64502, 1.155, 0.0, 0.0, 0.66667],
    9127u32 => [1e-05, 0.9, 0.0, 0.0, 0.88889],
    9128u32 => [0.65002, 1.15, 0.0, 0.0, 0.88889],
    9129u32 => [0.90001, 0.0, 0.0, 0.0, 0.88889],
    9130u32 => [0.12, 0.63, 0.0, 0.0, 0.88889],
    9131u32 => [1e-05, 0.9, 0.0, 0.0, 0.88889],
    9132u32 => [0.65002, 1.15, 0.0, 0.0, 0.88889],
    9133u32 => [0.90001, 0.0, 0.0, 0.0, 0.88889],
    57344u32 => [-0.00499, 0.605, 0.0, 0.0, 0.88889],
    57345u32 => [-0.00499, 0.605, 0.0, 0.0, 0.88889],
};
