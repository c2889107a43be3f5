//! The caller-supplied settings record.

use rustc_hash::FxHashMap;

use crate::error::{ParseError, ParseErrorKind};
use crate::token::SourceRange;
use crate::types::OutputFormat;

/// Policy for LaTeX-incompatible input.
#[derive(Clone, Copy, Default)]
pub enum StrictMode {
    /// Silently accept.
    Ignore,
    /// Accept but log a warning.
    #[default]
    Warn,
    /// Fail with a [`ParseError`].
    Error,
    /// Decide per error code and message.
    Custom(fn(code: &str, message: &str) -> StrictBehavior),
}

impl std::fmt::Debug for StrictMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrictMode::Ignore => f.write_str("Ignore"),
            StrictMode::Warn => f.write_str("Warn"),
            StrictMode::Error => f.write_str("Error"),
            StrictMode::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictBehavior {
    Ignore,
    Warn,
    Error,
}

/// What a trust callback gets to look at.
#[derive(Debug, Clone)]
pub struct TrustContext<'a> {
    /// The command asking for trust, e.g. `"\\href"`.
    pub command: &'static str,
    pub url: Option<&'a str>,
    /// Lower-cased scheme of `url`, `"_relative"` when none.
    pub protocol: Option<String>,
}

/// Gate for commands that can reach outside the formula (`\href`,
/// `\url`, `\includegraphics`).
#[derive(Clone, Copy)]
pub enum TrustSetting {
    Bool(bool),
    Function(fn(&TrustContext<'_>) -> bool),
}

impl Default for TrustSetting {
    fn default() -> Self {
        TrustSetting::Bool(false)
    }
}

impl std::fmt::Debug for TrustSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustSetting::Bool(b) => write!(f, "Bool({b})"),
            TrustSetting::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Configuration for a single conversion.
///
/// ```rust
/// use boxtex::Settings;
///
/// let settings = Settings {
///     display_mode: true,
///     ..Settings::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Settings {
    /// Typeset in display style (and wrap the root in a display block).
    pub display_mode: bool,
    /// Which of the two output trees to assemble.
    pub output: OutputFormat,
    /// Place equation tags on the left.
    pub leqno: bool,
    /// Flush display equations left.
    pub fleqn: bool,
    /// If `false`, failed input renders as an error-colored leaf instead
    /// of returning `Err`.
    pub throw_on_error: bool,
    /// CSS color for the error leaf.
    pub error_color: String,
    /// User macros: name (without backslash) to replacement text.
    pub macros: FxHashMap<String, String>,
    /// Lower bound for rule thicknesses, in em.
    pub min_rule_thickness: f64,
    /// Make `\color` behave like `\textcolor` (two arguments).
    pub color_is_text_color: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub strict: StrictMode,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub trust: TrustSetting,
    /// Cap for user-specified sizes, in em.
    pub max_size: f64,
    /// Cap on macro expansions per parse.
    pub max_expand: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            display_mode: false,
            output: OutputFormat::default(),
            leqno: false,
            fleqn: false,
            throw_on_error: true,
            error_color: "#cc0000".to_string(),
            macros: FxHashMap::default(),
            min_rule_thickness: 0.0,
            color_is_text_color: false,
            strict: StrictMode::default(),
            trust: TrustSetting::default(),
            max_size: f64::INFINITY,
            max_expand: 1000,
        }
    }
}

impl Settings {
    /// Reports a LaTeX-incompatibility that the renderer can recover
    /// from. Fatal only under `strict = Error` (or a custom policy that
    /// says so).
    pub fn report_nonstrict(
        &self,
        code: &'static str,
        message: &str,
        range: Option<SourceRange>,
    ) -> Result<(), ParseError> {
        let behavior = match self.strict {
            StrictMode::Ignore => StrictBehavior::Ignore,
            StrictMode::Warn => StrictBehavior::Warn,
            StrictMode::Error => StrictBehavior::Error,
            StrictMode::Custom(f) => f(code, message),
        };
        match behavior {
            StrictBehavior::Ignore => Ok(()),
            StrictBehavior::Warn => {
                log::warn!("LaTeX-incompatible input ({code}): {message}");
                Ok(())
            }
            StrictBehavior::Error => Err(ParseError(
                range,
                ParseErrorKind::Strict {
                    code,
                    message: message.to_string(),
                },
            )),
        }
    }

    /// Like [`report_nonstrict`](Self::report_nonstrict) but for sites
    /// that choose between two behaviors rather than failing: returns
    /// `true` when the strict behavior should be used.
    pub fn use_strict_behavior(&self, code: &str, message: &str) -> bool {
        let behavior = match self.strict {
            StrictMode::Ignore => StrictBehavior::Ignore,
            StrictMode::Warn => StrictBehavior::Warn,
            StrictMode::Error => StrictBehavior::Error,
            StrictMode::Custom(f) => f(code, message),
        };
        match behavior {
            StrictBehavior::Ignore => false,
            StrictBehavior::Warn => {
                log::warn!("LaTeX-incompatible input ({code}): {message}");
                false
            }
            StrictBehavior::Error => true,
        }
    }

    pub fn is_trusted(&self, context: &TrustContext<'_>) -> bool {
        // A URL whose scheme could not be determined is never trusted.
        if context.url.is_some() && context.protocol.is_none() {
            return false;
        }
        match self.trust {
            TrustSetting::Bool(b) => b,
            TrustSetting::Function(f) => f(context),
        }
    }
}

/// Splits the scheme off a URL, yielding `"_relative"` for scheme-less
/// URLs and `None` for malformed ones.
pub fn protocol_from_url(url: &str) -> Option<String> {
    // A scheme is [a-zA-Z][a-zA-Z0-9+.-]* followed by ':'.
    let mut chars = url.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return Some("_relative".to_string()),
    }
    for (i, c) in chars {
        match c {
            ':' => return Some(url[..i].to_ascii_lowercase()),
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-') => {}
            _ => return Some("_relative".to_string()),
        }
    }
    Some("_relative".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_error_is_fatal() {
        let settings = Settings {
            strict: StrictMode::Error,
            ..Settings::default()
        };
        let err = settings
            .report_nonstrict("unknownSymbol", "whatever", None)
            .unwrap_err();
        assert!(matches!(err.1, ParseErrorKind::Strict { code: "unknownSymbol", .. }));
    }

    #[test]
    fn strict_warn_is_not_fatal() {
        let settings = Settings::default();
        assert!(settings.report_nonstrict("unknownSymbol", "x", None).is_ok());
        assert!(!settings.use_strict_behavior("unicodeTextInMathMode", "x"));
    }

    #[test]
    fn protocols() {
        assert_eq!(protocol_from_url("https://x").as_deref(), Some("https"));
        assert_eq!(protocol_from_url("HTTPS://x").as_deref(), Some("https"));
        assert_eq!(protocol_from_url("/relative/path").as_deref(), Some("_relative"));
        assert_eq!(protocol_from_url("foo bar://x").as_deref(), Some("_relative"));
    }

    #[test]
    fn trust_function_sees_protocol() {
        let settings = Settings {
            trust: TrustSetting::Function(|ctx| ctx.protocol.as_deref() == Some("https")),
            ..Settings::default()
        };
        let ctx = TrustContext {
            command: "\\url",
            url: Some("https://example.org"),
            protocol: protocol_from_url("https://example.org"),
        };
        assert!(settings.is_trusted(&ctx));
        let ctx = TrustContext {
            command: "\\url",
            url: Some("javascript:alert(1)"),
            protocol: protocol_from_url("javascript:alert(1)"),
        };
        assert!(!settings.is_trusted(&ctx));
    }
}
