//! The macro expander ("gullet"): sits between the lexer and the
//! parser, maintaining a stack of pending tokens and firing macro
//! expansions until an unexpandable token surfaces.

use std::borrow::Cow;

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::Lexer;
use crate::namespace::Namespace;
use crate::settings::Settings;
use crate::token::{EOF, Token, TokenFlags};
use crate::types::Mode;

/// A macro body, ready to fire.
#[derive(Debug, Clone)]
pub(crate) struct MacroExpansion<'a> {
    /// Replacement tokens in source order.
    pub tokens: Vec<Token<'a>>,
    pub num_args: usize,
}

pub(crate) type MacroFunction =
    for<'x> fn(&mut MacroExpander<'x>) -> Result<MacroExpansion<'x>, ParseError>;

#[derive(Clone)]
pub(crate) enum MacroDefinition<'a> {
    /// Untokenized replacement text; lexed on first use.
    Text(Cow<'a, str>),
    /// Pre-tokenized replacement (from `\def` and friends).
    Expansion(MacroExpansion<'a>),
    /// A builtin that computes its expansion against the expander.
    Function(MacroFunction),
}

impl std::fmt::Debug for MacroDefinition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MacroDefinition::Text(text) => write!(f, "Text({text:?})"),
            MacroDefinition::Expansion(e) => write!(f, "Expansion({} tokens)", e.tokens.len()),
            MacroDefinition::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Tokenizes a borrowed string; the tokens keep pointing into it.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex()?;
        if token.is(EOF) {
            break;
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Like [`tokenize`] but the tokens own their text, detaching them
/// from the input's lifetime.
fn tokenize_owned(input: &str) -> Result<Vec<Token<'static>>, ParseError> {
    Ok(tokenize(input)?
        .into_iter()
        .map(|token| Token {
            text: Cow::Owned(token.text.into_owned()),
            range: None,
            flags: token.flags,
        })
        .collect())
}

/// Counts `#n` parameters in a token list.
fn count_args(tokens: &[Token<'_>]) -> usize {
    let mut max = 0;
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        if token.is("#")
            && let Some(next) = iter.peek()
            && let Some(digit) = next.text.chars().next().and_then(|c| c.to_digit(10))
        {
            max = max.max(digit as usize);
        }
    }
    max
}

pub(crate) struct MacroExpander<'a> {
    pub settings: &'a Settings,
    pub mode: Mode,
    pub macros: Namespace<'a>,
    /// Pending tokens; the last element is the next token.
    stack: Vec<Token<'a>>,
    lexer: Lexer<'a>,
    expansion_count: usize,
}

impl<'a> MacroExpander<'a> {
    pub fn new(input: &'a str, settings: &'a Settings, mode: Mode) -> Self {
        MacroExpander {
            settings,
            mode,
            macros: Namespace::new(&settings.macros),
            stack: Vec::new(),
            lexer: Lexer::new(input),
            expansion_count: 0,
        }
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn begin_group(&mut self) {
        self.macros.begin_group();
    }

    pub fn end_group(&mut self) {
        self.macros.end_group();
    }

    pub fn end_groups(&mut self) {
        self.macros.end_groups();
    }

    fn count_expansion(&mut self, amount: usize) -> Result<(), ParseError> {
        self.expansion_count += amount;
        if self.expansion_count > self.settings.max_expand {
            return Err(ParseError::without_range(ParseErrorKind::TooManyExpansions));
        }
        Ok(())
    }

    /// The next unexpanded token, without consuming it.
    pub fn future(&mut self) -> Result<&Token<'a>, ParseError> {
        if self.stack.is_empty() {
            let token = self.lexer.lex()?;
            self.stack.push(token);
        }
        Ok(self.stack.last().expect("just pushed"))
    }

    /// Consumes the next unexpanded token.
    pub fn pop_token(&mut self) -> Result<Token<'a>, ParseError> {
        self.future()?;
        Ok(self.stack.pop().expect("future ensured one"))
    }

    pub fn push_token(&mut self, token: Token<'a>) {
        self.stack.push(token);
    }

    /// Pushes tokens given in source order.
    pub fn push_tokens(&mut self, tokens: Vec<Token<'a>>) {
        self.stack.extend(tokens.into_iter().rev());
    }

    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        loop {
            if self.future()?.is(" ") {
                self.stack.pop();
            } else {
                return Ok(());
            }
        }
    }

    /// Consumes one macro argument: a balanced `{...}` group or a
    /// single token. Returned in source order.
    pub fn consume_arg(&mut self) -> Result<Vec<Token<'a>>, ParseError> {
        self.consume_spaces()?;
        let first = self.pop_token()?;
        if first.is(EOF) {
            return Err(ParseError(first.range, ParseErrorKind::UnexpectedEndOfInput));
        }
        if !first.is("{") {
            return Ok(vec![first]);
        }
        let mut depth = 1usize;
        let mut tokens = Vec::new();
        loop {
            let token = self.pop_token()?;
            match token.text.as_ref() {
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                t if t == EOF => {
                    return Err(ParseError(
                        token.range,
                        ParseErrorKind::UnexpectedEndOfInput,
                    ));
                }
                _ => {}
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    pub fn consume_args(&mut self, num_args: usize) -> Result<Vec<Vec<Token<'a>>>, ParseError> {
        let mut args = Vec::with_capacity(num_args);
        for _ in 0..num_args {
            args.push(self.consume_arg()?);
        }
        Ok(args)
    }

    /// The expansion of a macro name, or `None` if it is not a macro.
    fn get_expansion(&mut self, name: &str) -> Result<Option<MacroExpansion<'a>>, ParseError> {
        let Some(definition) = self.macros.get(name) else {
            return Ok(None);
        };
        Ok(Some(match definition {
            MacroDefinition::Text(text) => {
                let tokens = match text {
                    Cow::Borrowed(text) => tokenize(text)?,
                    Cow::Owned(text) => tokenize_owned(&text)?,
                };
                let num_args = count_args(&tokens);
                MacroExpansion { tokens, num_args }
            }
            MacroDefinition::Expansion(expansion) => expansion,
            MacroDefinition::Function(function) => function(self)?,
        }))
    }

    /// Substitutes `#n` parameters in an expansion body.
    fn substitute_args(
        body: Vec<Token<'a>>,
        args: &[Vec<Token<'a>>],
    ) -> Vec<Token<'a>> {
        let mut out = Vec::with_capacity(body.len());
        let mut iter = body.into_iter().peekable();
        while let Some(token) = iter.next() {
            if token.is("#")
                && let Some(next) = iter.peek()
                && let Some(digit) = next.text.chars().next().and_then(|c| c.to_digit(10))
                && digit >= 1
            {
                iter.next();
                out.extend(args[(digit - 1) as usize].iter().cloned());
            } else {
                out.push(token);
            }
        }
        out
    }

    /// Expands the next token once. Returns `false` (leaving the token
    /// on the stack) if it is not expandable.
    pub fn expand_once(&mut self, expandable_only: bool) -> Result<bool, ParseError> {
        let top = self.pop_token()?;
        let name = top.text.clone();

        let expandable = top.is_control_sequence()
            && !top.flags.contains(TokenFlags::NOEXPAND)
            && self.macros.has(&name);

        if !expandable || (expandable_only && !self.is_expandable(&name)) {
            self.push_token(top);
            return Ok(false);
        }

        self.count_expansion(1)?;
        let Some(expansion) = self.get_expansion(&name)? else {
            self.push_token(top);
            return Ok(false);
        };

        let mut tokens = expansion.tokens;
        if expansion.num_args > 0 {
            let args = self.consume_args(expansion.num_args)?;
            tokens = Self::substitute_args(tokens, &args);
        }
        self.count_expansion(tokens.len())?;
        self.push_tokens(tokens);
        Ok(true)
    }

    /// Fully expands until the next unexpandable token, and consumes
    /// it.
    pub fn expand_next_token(&mut self) -> Result<Token<'a>, ParseError> {
        loop {
            if !self.expand_once(false)? {
                let mut token = self.pop_token()?;
                if token.flags.contains(TokenFlags::TREAT_AS_RELAX) {
                    token.text = Cow::Borrowed("\\relax");
                }
                return Ok(token);
            }
        }
    }

    /// Defined in the broad sense: macro, function, or symbol.
    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.has(name)
            || crate::functions::FUNCTIONS.contains_key(name)
            || crate::symbols::get_symbol(Mode::Math, name).is_some()
            || crate::symbols::get_symbol(Mode::Text, name).is_some()
    }

    pub fn is_expandable(&self, name: &str) -> bool {
        self.macros.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander<'a>(input: &'a str, settings: &'a Settings) -> MacroExpander<'a> {
        MacroExpander::new(input, settings, Mode::Math)
    }

    fn expand_all(input: &str, settings: &Settings) -> Result<Vec<String>, ParseError> {
        let mut gullet = expander(input, settings);
        let mut out = Vec::new();
        loop {
            let token = gullet.expand_next_token()?;
            if token.is(EOF) {
                return Ok(out);
            }
            out.push(token.text.into_owned());
        }
    }

    #[test]
    fn user_macros_expand() {
        let mut settings = Settings::default();
        settings
            .macros
            .insert("half".to_string(), r"\frac{1}{2}".to_string());
        assert_eq!(
            expand_all(r"\half", &settings).unwrap(),
            [r"\frac", "{", "1", "}", "{", "2", "}"]
        );
    }

    #[test]
    fn macro_arguments_substitute() {
        let mut settings = Settings::default();
        settings
            .macros
            .insert("sq".to_string(), r"{#1}^{2}".to_string());
        assert_eq!(
            expand_all(r"\sq{x+y}", &settings).unwrap(),
            ["{", "x", "+", "y", "}", "^", "{", "2", "}"]
        );
    }

    #[test]
    fn expansion_loops_hit_the_limit() {
        let mut settings = Settings::default();
        settings
            .macros
            .insert("loop".to_string(), r"\loop".to_string());
        let err = expand_all(r"\loop", &settings).unwrap_err();
        assert_eq!(err.1, ParseErrorKind::TooManyExpansions);
    }

    #[test]
    fn noexpand_blocks_one_expansion() {
        let mut settings = Settings::default();
        settings.macros.insert("x".to_string(), "y".to_string());
        // \noexpand\x leaves \x alone, which then parses as \relax.
        let out = expand_all(r"\noexpand\x z", &settings).unwrap();
        assert_eq!(out, [r"\relax", "z"]);
    }
}
