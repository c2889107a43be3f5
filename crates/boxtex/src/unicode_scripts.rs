//! Script classification for characters outside the measured fonts.
//!
//! Characters from these scripts are renderable by the host's fonts;
//! non-Latin ones get a `<script>_fallback` class so the stylesheet can
//! pick a suitable font stack.

struct ScriptData {
    name: &'static str,
    blocks: &'static [(u32, u32)],
}

static SCRIPT_DATA: &[ScriptData] = &[
    ScriptData {
        name: "latin",
        blocks: &[(0x0100, 0x024f), (0x1e00, 0x1eff)],
    },
    ScriptData {
        name: "cyrillic",
        blocks: &[(0x0400, 0x04ff)],
    },
    ScriptData {
        name: "armenian",
        blocks: &[(0x0530, 0x058f)],
    },
    ScriptData {
        name: "brahmic",
        blocks: &[(0x0900, 0x109f)],
    },
    ScriptData {
        name: "georgian",
        blocks: &[(0x10a0, 0x10ff)],
    },
    ScriptData {
        name: "cjk",
        blocks: &[(0x3000, 0x30ff), (0x4e00, 0x9faf), (0xff00, 0xff60)],
    },
    ScriptData {
        name: "hangul",
        blocks: &[(0xac00, 0xd7a3)],
    },
];

/// The script a codepoint belongs to, if it is one we know how to hand
/// off to the host fonts. ASCII counts as Latin.
pub fn script_from_codepoint(ch: char) -> Option<&'static str> {
    let cp = ch as u32;
    if cp < 0x80 {
        return Some("latin");
    }
    for script in SCRIPT_DATA {
        for &(lo, hi) in script.blocks {
            if (lo..=hi).contains(&cp) {
                return Some(script.name);
            }
        }
    }
    None
}

pub fn supported_codepoint(ch: char) -> bool {
    script_from_codepoint(ch).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(script_from_codepoint('a'), Some("latin"));
        assert_eq!(script_from_codepoint('\u{0144}'), Some("latin"));
        assert_eq!(script_from_codepoint('\u{0431}'), Some("cyrillic"));
        assert_eq!(script_from_codepoint('\u{4e2d}'), Some("cjk"));
        assert_eq!(script_from_codepoint('\u{ae00}'), Some("hangul"));
        assert_eq!(script_from_codepoint('\u{2603}'), None);
    }
}
