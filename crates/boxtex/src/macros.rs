//! Builtin macros: a bounded expansion vocabulary plus the handful of
//! expansion-control primitives the input surface needs.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::error::{ParseError, ParseErrorKind};
use crate::macro_expander::{MacroDefinition, MacroExpander, MacroExpansion};
use crate::token::{Token, TokenFlags};

static TEXT_MACROS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        ("\\cr", "\\\\"),
        ("\\lq", "`"),
        ("\\rq", "'"),
        ("\\dots", "\\ldots"),
        ("\\dotsb", "\\cdots"),
        ("\\dotsm", "\\cdots"),
        ("\\dotsi", "\\cdots"),
        ("\\dotsc", "\\ldots"),
        ("\\dotso", "\\ldots"),
        ("\\thinspace", "\\,"),
        ("\\medspace", "\\:"),
        ("\\thickspace", "\\;"),
        ("\\negthinspace", "\\!"),
        ("\\negmedspace", "\\mkern-4mu"),
        ("\\negthickspace", "\\mkern-5mu"),
        ("\\llap", "\\mathllap{\\textrm{#1}}"),
        ("\\rlap", "\\mathrlap{\\textrm{#1}}"),
        ("\\clap", "\\mathclap{\\textrm{#1}}"),
        ("\\pod", "\\allowbreak\\mkern18mu({#1})"),
        ("\\pmod", "\\pod{\\mathrm{mod}\\mkern6mu#1}"),
        ("\\bmod", "\\mathbin{\\mathrm{mod}}"),
        ("\\mod", "\\allowbreak\\mkern18mu\\mathrm{mod}\\,\\,#1"),
        ("\\iff", "\\;\\Longleftrightarrow\\;"),
        ("\\implies", "\\;\\Longrightarrow\\;"),
        ("\\impliedby", "\\;\\Longleftarrow\\;"),
        ("\\not", "\\mathrel{\\mathrlap{/}}"),
        ("\\ngtr", "\\not>"),
        ("\\nless", "\\not<"),
        ("\\liminf", "\\operatorname*{lim\\,inf}"),
        ("\\limsup", "\\operatorname*{lim\\,sup}"),
        ("\\injlim", "\\operatorname*{inj\\,lim}"),
        ("\\projlim", "\\operatorname*{proj\\,lim}"),
    ];
    entries.iter().copied().collect()
});

/// Looks up a builtin macro by its spelling (with backslash).
pub(crate) fn get_builtin(name: &str) -> Option<MacroDefinition<'static>> {
    if let Some(text) = TEXT_MACROS.get(name) {
        return Some(MacroDefinition::Text(Cow::Borrowed(text)));
    }
    let function: crate::macro_expander::MacroFunction = match name {
        "\\noexpand" => noexpand_macro,
        "\\expandafter" => expandafter_macro,
        "\\tag" => tag_macro,
        "\\tag@literal" => tag_literal_macro,
        "\\notag" | "\\nonumber" => notag_macro,
        "\\operatorname" => operatorname_macro,
        "\\def" => def_macro,
        "\\gdef" => gdef_macro,
        "\\newcommand" => newcommand_macro,
        "\\renewcommand" => renewcommand_macro,
        "\\providecommand" => providecommand_macro,
        _ => return None,
    };
    Some(MacroDefinition::Function(function))
}

fn empty<'x>() -> MacroExpansion<'x> {
    MacroExpansion {
        tokens: Vec::new(),
        num_args: 0,
    }
}

fn text_expansion<'x>(text: &'static str) -> Result<MacroExpansion<'x>, ParseError> {
    let tokens = crate::macro_expander::tokenize(text)?;
    let num_args = tokens
        .windows(2)
        .filter_map(|pair| {
            (pair[0].is("#"))
                .then(|| pair[1].text.chars().next().and_then(|c| c.to_digit(10)))
                .flatten()
        })
        .max()
        .unwrap_or(0) as usize;
    Ok(MacroExpansion { tokens, num_args })
}

fn noexpand_macro<'x>(
    gullet: &mut MacroExpander<'x>,
) -> Result<MacroExpansion<'x>, ParseError> {
    let mut token = gullet.pop_token()?;
    if gullet.is_expandable(&token.text) {
        token.flags |= TokenFlags::NOEXPAND | TokenFlags::TREAT_AS_RELAX;
    }
    Ok(MacroExpansion {
        tokens: vec![token],
        num_args: 0,
    })
}

fn expandafter_macro<'x>(
    gullet: &mut MacroExpander<'x>,
) -> Result<MacroExpansion<'x>, ParseError> {
    let token = gullet.pop_token()?;
    // Expand the token after the saved one, once.
    gullet.expand_once(true)?;
    Ok(MacroExpansion {
        tokens: vec![token],
        num_args: 0,
    })
}

fn tag_macro<'x>(gullet: &mut MacroExpander<'x>) -> Result<MacroExpansion<'x>, ParseError> {
    let star = gullet.future()?.is("*");
    if star {
        gullet.pop_token()?;
    }
    if star {
        text_expansion("\\tag@literal{#1}")
    } else {
        text_expansion("\\tag@literal{({#1})}")
    }
}

fn tag_literal_macro<'x>(
    gullet: &mut MacroExpander<'x>,
) -> Result<MacroExpansion<'x>, ParseError> {
    if gullet.macros.has("\\df@tag") {
        return Err(ParseError::without_range(ParseErrorKind::Message(
            "multiple \\tag".to_string(),
        )));
    }
    let body = gullet.consume_arg()?;
    let mut tokens = Vec::with_capacity(body.len() + 3);
    tokens.push(Token::synthetic("\\text"));
    tokens.push(Token::synthetic("{"));
    tokens.extend(body);
    tokens.push(Token::synthetic("}"));
    gullet.macros.set(
        "\\df@tag",
        Some(MacroDefinition::Expansion(MacroExpansion {
            tokens,
            num_args: 0,
        })),
        true,
    );
    Ok(empty())
}

fn notag_macro<'x>(gullet: &mut MacroExpander<'x>) -> Result<MacroExpansion<'x>, ParseError> {
    gullet.macros.set("\\df@tag", None, true);
    Ok(empty())
}

fn operatorname_macro<'x>(
    gullet: &mut MacroExpander<'x>,
) -> Result<MacroExpansion<'x>, ParseError> {
    let star = gullet.future()?.is("*");
    if star {
        gullet.pop_token()?;
        text_expansion("\\operatornamewithlimits")
    } else {
        text_expansion("\\operatorname@")
    }
}

fn def_impl<'x>(
    gullet: &mut MacroExpander<'x>,
    global: bool,
) -> Result<MacroExpansion<'x>, ParseError> {
    let cs = gullet.pop_token()?;
    if !cs.is_control_sequence() {
        return Err(ParseError(
            cs.range,
            ParseErrorKind::ExpectedControlSequence(cs.text.into_owned()),
        ));
    }
    // Parameter text: #1#2... in order, up to the body.
    let mut num_args = 0usize;
    loop {
        if gullet.future()?.is("{") {
            break;
        }
        let token = gullet.pop_token()?;
        if token.is("#") {
            let digit_token = gullet.pop_token()?;
            let digit = digit_token
                .text
                .chars()
                .next()
                .and_then(|c| c.to_digit(10));
            match digit {
                Some(d) if d as usize == num_args + 1 => num_args += 1,
                _ => {
                    return Err(ParseError(
                        digit_token.range,
                        ParseErrorKind::InvalidParameterNumber,
                    ));
                }
            }
        } else if token.is(crate::token::EOF) {
            return Err(ParseError(token.range, ParseErrorKind::UnexpectedEndOfInput));
        } else {
            // Delimited parameters are outside the supported subset.
            return Err(ParseError(
                token.range,
                ParseErrorKind::Message(
                    "Delimited macro parameters are not supported".to_string(),
                ),
            ));
        }
    }
    let body = gullet.consume_arg()?;
    gullet.macros.set(
        &cs.text,
        Some(MacroDefinition::Expansion(MacroExpansion {
            tokens: body,
            num_args,
        })),
        global,
    );
    Ok(empty())
}

fn def_macro<'x>(gullet: &mut MacroExpander<'x>) -> Result<MacroExpansion<'x>, ParseError> {
    def_impl(gullet, false)
}

fn gdef_macro<'x>(gullet: &mut MacroExpander<'x>) -> Result<MacroExpansion<'x>, ParseError> {
    def_impl(gullet, true)
}

#[derive(PartialEq)]
enum CommandPolicy {
    New,
    Renew,
    Provide,
}

fn newcommand_impl<'x>(
    gullet: &mut MacroExpander<'x>,
    policy: CommandPolicy,
) -> Result<MacroExpansion<'x>, ParseError> {
    gullet.consume_spaces()?;
    let mut cs = gullet.pop_token()?;
    if cs.is("{") {
        cs = gullet.pop_token()?;
        let close = gullet.pop_token()?;
        if !close.is("}") {
            return Err(ParseError(
                close.range,
                ParseErrorKind::UnexpectedToken {
                    expected: "}",
                    got: close.text.into_owned(),
                },
            ));
        }
    }
    if !cs.is_control_sequence() {
        return Err(ParseError(
            cs.range,
            ParseErrorKind::ExpectedControlSequence(cs.text.into_owned()),
        ));
    }

    let exists = gullet.is_defined(&cs.text);
    if exists && policy == CommandPolicy::New {
        return Err(ParseError(
            cs.range,
            ParseErrorKind::Message(format!(
                "\\newcommand{{{}}} attempting to redefine {0}; use \\renewcommand",
                cs.text
            )),
        ));
    }
    if !exists && policy == CommandPolicy::Renew {
        return Err(ParseError(
            cs.range,
            ParseErrorKind::Message(format!(
                "\\renewcommand{{{}}} when command {0} does not yet exist; use \\newcommand",
                cs.text
            )),
        ));
    }

    let mut num_args = 0usize;
    if gullet.future()?.is("[") {
        gullet.pop_token()?;
        let digit_token = gullet.pop_token()?;
        num_args = digit_token
            .text
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or(ParseError(
                digit_token.range,
                ParseErrorKind::InvalidParameterNumber,
            ))? as usize;
        let close = gullet.pop_token()?;
        if !close.is("]") {
            return Err(ParseError(
                close.range,
                ParseErrorKind::UnexpectedToken {
                    expected: "]",
                    got: close.text.into_owned(),
                },
            ));
        }
    }

    let body = gullet.consume_arg()?;
    if !(exists && policy == CommandPolicy::Provide) {
        gullet.macros.set(
            &cs.text,
            Some(MacroDefinition::Expansion(MacroExpansion {
                tokens: body,
                num_args,
            })),
            false,
        );
    }
    Ok(empty())
}

fn newcommand_macro<'x>(
    gullet: &mut MacroExpander<'x>,
) -> Result<MacroExpansion<'x>, ParseError> {
    newcommand_impl(gullet, CommandPolicy::New)
}

fn renewcommand_macro<'x>(
    gullet: &mut MacroExpander<'x>,
) -> Result<MacroExpansion<'x>, ParseError> {
    newcommand_impl(gullet, CommandPolicy::Renew)
}

fn providecommand_macro<'x>(
    gullet: &mut MacroExpander<'x>,
) -> Result<MacroExpansion<'x>, ParseError> {
    newcommand_impl(gullet, CommandPolicy::Provide)
}
