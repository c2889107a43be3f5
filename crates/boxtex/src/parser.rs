//! The parser: consumes tokens through the macro expander and builds
//! the parse tree.

use crate::error::{ParseError, ParseErrorKind};
use crate::functions::{FUNCTIONS, FunctionContext, FunctionPropSpec, FunctionSpec};
use crate::macro_expander::MacroExpander;
use crate::parse_node::{
    AtomFamily, AtomNode, InternalNode, NodeInfo, OrdGroupNode, ParseNode, SizeNode,
    StylingNode, SupSubNode, SymNode, TagNode, UrlNode, VerbNode,
};
use crate::settings::Settings;
use crate::symbols::{self, Group};
use crate::token::{EOF, SourceRange, Token};
use crate::types::{ArgType, Mode};
use crate::unicode_scripts::supported_codepoint;
use crate::unit::{Measurement, Unit, parse_size_text};

/// Tokens that end any expression.
const END_OF_EXPRESSION: &[&str] = &["}", "\\endgroup", "\\end", "\\right", "&"];

pub(crate) struct Parser<'a> {
    pub mode: Mode,
    pub gullet: MacroExpander<'a>,
    pub settings: &'a Settings,
    pub leftright_depth: usize,
    /// The color last applied by `\color`, for `\right` coloring.
    pub(crate) color: Option<String>,
    next_token: Option<Token<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, settings: &'a Settings) -> Self {
        Parser {
            mode: Mode::Math,
            gullet: MacroExpander::new(input, settings, Mode::Math),
            settings,
            leftright_depth: 0,
            color: None,
            next_token: None,
        }
    }

    pub(crate) fn current_color(&self) -> Option<String> {
        self.color.clone()
    }

    /// Switches modes; text-mode subtrees parse against the text
    /// symbol table.
    fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.gullet.switch_mode(mode);
    }

    /// The current token, fetching (and fully expanding) if needed.
    pub(crate) fn fetch(&mut self) -> Result<&Token<'a>, ParseError> {
        if self.next_token.is_none() {
            self.next_token = Some(self.gullet.expand_next_token()?);
        }
        Ok(self.next_token.as_ref().expect("just fetched"))
    }

    /// Discards the current token.
    pub(crate) fn consume(&mut self) -> Result<(), ParseError> {
        self.fetch()?;
        self.next_token = None;
        Ok(())
    }

    pub(crate) fn expect(&mut self, text: &'static str, consume: bool) -> Result<(), ParseError> {
        let token = self.fetch()?;
        if token.text != text {
            return Err(ParseError(
                token.range,
                ParseErrorKind::UnexpectedToken {
                    expected: text,
                    got: token.text.to_string(),
                },
            ));
        }
        if consume {
            self.consume()?;
        }
        Ok(())
    }

    pub(crate) fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.fetch()?.is(" ") {
            self.consume()?;
        }
        Ok(())
    }

    /// Parses the whole input.
    pub fn parse(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        // A group scope so macro definitions stay within this parse.
        self.gullet.begin_group();

        let tree = self.parse_expression(false, None)?;
        self.expect(EOF, false)?;

        let tree = if self.gullet.macros.has("\\df@tag") {
            if !self.settings.display_mode {
                return Err(ParseError::without_range(
                    ParseErrorKind::TagOnlyInDisplayMode,
                ));
            }
            // Re-read the stored tag through a synthetic token.
            self.gullet.push_token(Token::synthetic("\\df@tag"));
            self.next_token = None;
            let tag = self.parse_expression(false, None)?;
            vec![ParseNode::Tag(TagNode {
                info: NodeInfo::new_mode(Mode::Text),
                body: tree,
                tag,
            })]
        } else {
            tree
        };

        self.gullet.end_groups();
        Ok(tree)
    }

    /// Parses a list of atoms until the expression ends, resolving any
    /// infix operator afterwards.
    pub(crate) fn parse_expression(
        &mut self,
        break_on_infix: bool,
        break_on_token: Option<&'static str>,
    ) -> Result<Vec<ParseNode>, ParseError> {
        let mut body: Vec<ParseNode> = Vec::new();
        loop {
            if self.mode == Mode::Math {
                self.consume_spaces()?;
            }
            let lex = self.fetch()?;
            let text = lex.text.clone();
            if END_OF_EXPRESSION.contains(&text.as_ref()) || text == EOF {
                break;
            }
            if let Some(break_text) = break_on_token
                && text == break_text
            {
                break;
            }
            if break_on_infix
                && FUNCTIONS
                    .get(text.as_ref())
                    .map(|f| f.props.infix)
                    .unwrap_or(false)
            {
                break;
            }
            let atom = self.parse_atom(break_on_token)?;
            match atom {
                None => break,
                Some(ParseNode::Internal(_)) => continue,
                Some(node) => body.push(node),
            }
        }
        if self.mode == Mode::Text {
            form_ligatures(&mut body);
        }
        self.handle_infix_nodes(body)
    }

    /// Rewrites `a \over b`-style expressions into their function
    /// equivalents.
    fn handle_infix_nodes(
        &mut self,
        body: Vec<ParseNode>,
    ) -> Result<Vec<ParseNode>, ParseError> {
        let mut infix_index = None;
        for (i, node) in body.iter().enumerate() {
            if let ParseNode::Infix(infix) = node {
                if infix_index.is_some() {
                    return Err(ParseError(infix.info.loc, ParseErrorKind::MultipleInfix));
                }
                infix_index = Some(i);
            }
        }
        let Some(index) = infix_index else {
            return Ok(body);
        };

        let mode = self.mode;
        let mut body = body;
        let denom_body: Vec<ParseNode> = body.split_off(index + 1);
        let infix_node = body.pop().expect("the infix node");
        let numer_body = body;

        let (func_name, loc, numer, denom);
        match &infix_node {
            ParseNode::Infix(infix) => {
                func_name = infix.replace_with;
                loc = infix.info.loc;
            }
            _ => unreachable!("index points at an infix node"),
        }
        numer = if numer_body.len() == 1 && matches!(numer_body[0], ParseNode::OrdGroup(_)) {
            numer_body.into_iter().next().unwrap()
        } else {
            ParseNode::ord_group(numer_body, mode, None)
        };
        denom = if denom_body.len() == 1 && matches!(denom_body[0], ParseNode::OrdGroup(_)) {
            denom_body.into_iter().next().unwrap()
        } else {
            ParseNode::ord_group(denom_body, mode, None)
        };

        let args = if func_name == "\\\\abovefrac" {
            vec![numer, infix_node, denom]
        } else {
            vec![numer, denom]
        };
        let node = self.call_function(func_name, args, Vec::new(), loc, None)?;
        Ok(vec![node])
    }

    fn call_function(
        &mut self,
        name: &str,
        args: Vec<ParseNode>,
        opt_args: Vec<Option<ParseNode>>,
        loc: Option<SourceRange>,
        break_on_token: Option<&'static str>,
    ) -> Result<ParseNode, ParseError> {
        let spec = *FUNCTIONS
            .get(name)
            .unwrap_or_else(|| panic!("no function handler for {name}"));
        let context = FunctionContext {
            parser: self,
            func_name: name.to_string(),
            loc,
            break_on_token,
        };
        (spec.handler)(context, args, opt_args)
    }

    /// Parses a base group plus any trailing `^`, `_`, `'`, and limit
    /// modifiers, collapsing them into a single supsub node.
    fn parse_atom(
        &mut self,
        break_on_token: Option<&'static str>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let mut base = self.parse_group("atom", break_on_token)?;

        // Scripts do not exist in text mode.
        if self.mode == Mode::Text {
            return Ok(base);
        }

        let mut superscript: Option<Box<ParseNode>> = None;
        let mut subscript: Option<Box<ParseNode>> = None;
        loop {
            self.consume_spaces()?;
            let lex = self.fetch()?;
            match lex.text.as_ref() {
                "\\limits" | "\\nolimits" => {
                    let limits = lex.is("\\limits");
                    let loc = lex.range;
                    match &mut base {
                        Some(ParseNode::Op(op)) => {
                            op.limits = limits;
                            op.always_handle_sup_sub = true;
                        }
                        Some(ParseNode::OperatorName(op)) if op.always_handle_sup_sub => {
                            op.limits = limits;
                        }
                        Some(ParseNode::OpToken(_)) => {
                            // Convert the raw token into a full op so
                            // the modifier has somewhere to live.
                            let Some(ParseNode::OpToken(token)) = base.take() else {
                                unreachable!();
                            };
                            let mut op = crate::functions::op::op_node_for_token(&token);
                            op.limits = limits;
                            op.always_handle_sup_sub = true;
                            base = Some(ParseNode::Op(op));
                        }
                        _ => {
                            return Err(ParseError(
                                loc,
                                ParseErrorKind::LimitControlsWithoutOperator,
                            ));
                        }
                    }
                    self.consume()?;
                }
                "^" => {
                    if superscript.is_some() {
                        return Err(ParseError(lex.range, ParseErrorKind::DoubleSuperscript));
                    }
                    superscript = Some(Box::new(self.handle_sup_subscript("^")?));
                }
                "_" => {
                    if subscript.is_some() {
                        return Err(ParseError(lex.range, ParseErrorKind::DoubleSubscript));
                    }
                    subscript = Some(Box::new(self.handle_sup_subscript("_")?));
                }
                "'" => {
                    if superscript.is_some() {
                        return Err(ParseError(lex.range, ParseErrorKind::DoubleSuperscript));
                    }
                    let loc = lex.range;
                    self.consume()?;
                    // Collapse prime runs into one superscript group.
                    let prime = ParseNode::TextOrd(SymNode {
                        info: NodeInfo::new(self.mode, loc),
                        text: "\\prime".to_string(),
                    });
                    let mut primes = vec![prime.clone()];
                    while self.fetch()?.is("'") {
                        self.consume()?;
                        primes.push(prime.clone());
                    }
                    if self.fetch()?.is("^") {
                        primes.push(self.handle_sup_subscript("^")?);
                    }
                    superscript = Some(Box::new(ParseNode::ord_group(primes, self.mode, loc)));
                }
                _ => break,
            }
        }

        if superscript.is_some() || subscript.is_some() {
            Ok(Some(ParseNode::SupSub(SupSubNode {
                info: NodeInfo::new(self.mode, base.as_ref().and_then(|b| b.loc())),
                base: base.map(Box::new),
                sup: superscript,
                sub: subscript,
            })))
        } else {
            Ok(base)
        }
    }

    fn handle_sup_subscript(&mut self, name: &'static str) -> Result<ParseNode, ParseError> {
        let loc = self.fetch()?.range;
        self.consume()?;
        self.consume_spaces()?;
        let group = self.parse_group(name, None)?;
        group.ok_or_else(|| {
            ParseError(
                loc,
                ParseErrorKind::ExpectedGroup {
                    after: name.to_string(),
                },
            )
        })
    }

    /// Parses a group: `{...}`, `\begingroup...\endgroup`, a function
    /// with its arguments, or a single symbol.
    pub(crate) fn parse_group(
        &mut self,
        name: &'static str,
        break_on_token: Option<&'static str>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let token = self.fetch()?.clone();
        if token.is("{") || token.is("\\begingroup") {
            self.consume()?;
            let group_end = if token.is("{") { "}" } else { "\\endgroup" };
            self.gullet.begin_group();
            let expression = self.parse_expression(false, Some(group_end))?;
            let last_loc = self.fetch()?.range;
            self.expect(group_end, true)?;
            self.gullet.end_group();
            return Ok(Some(ParseNode::OrdGroup(OrdGroupNode {
                info: NodeInfo::new(
                    self.mode,
                    SourceRange::join_opt(token.range, last_loc),
                ),
                body: expression,
                semisimple: token.is("\\begingroup"),
            })));
        }

        let arg_name = if name == "atom" { Some("atom") } else { Some(name) };
        let result = self.parse_function_with_break(arg_name, break_on_token, 0)?;
        if result.is_some() {
            return Ok(result);
        }
        let result = self.parse_symbol()?;
        if result.is_some() {
            return Ok(result);
        }
        if token.text.starts_with('\\') && !token.is(EOF) {
            return Err(ParseError(
                token.range,
                ParseErrorKind::UndefinedControlSequence(token.text.into_owned()),
            ));
        }
        Ok(None)
    }

    /// Parses a function call and its arguments. Public within the
    /// crate: the `\left` handler re-enters here for its `\right`.
    pub(crate) fn parse_function(
        &mut self,
        name: Option<&'static str>,
    ) -> Result<Option<ParseNode>, ParseError> {
        self.parse_function_with_break(name, None, 0)
    }

    fn parse_function_with_break(
        &mut self,
        name: Option<&'static str>,
        break_on_token: Option<&'static str>,
        caller_greediness: u8,
    ) -> Result<Option<ParseNode>, ParseError> {
        let token = self.fetch()?.clone();
        let Some(spec) = FUNCTIONS.get(token.text.as_ref()).copied() else {
            return Ok(None);
        };
        self.consume()?;

        if let Some(name) = name
            && name != "atom"
            && !spec.props.allowed_in_argument
            && spec.props.greediness <= caller_greediness
        {
            return Err(ParseError(
                token.range,
                ParseErrorKind::FunctionAsArgument {
                    name: token.text.into_owned(),
                },
            ));
        }
        if self.mode == Mode::Text && !spec.props.allowed_in_text {
            return Err(ParseError(
                token.range,
                ParseErrorKind::NotAllowedInMode {
                    name: token.text.into_owned(),
                    mode: self.mode,
                },
            ));
        }
        if self.mode == Mode::Math && !spec.props.allowed_in_math {
            return Err(ParseError(
                token.range,
                ParseErrorKind::NotAllowedInMode {
                    name: token.text.into_owned(),
                    mode: self.mode,
                },
            ));
        }

        let (args, opt_args) = self.parse_arguments(&token.text, &spec.props)?;
        Ok(Some(self.call_function(
            &token.text,
            args,
            opt_args,
            token.range,
            break_on_token,
        )?))
    }

    /// Parses the declared arguments of a function.
    pub(crate) fn parse_arguments(
        &mut self,
        func_name: &str,
        props: &FunctionPropSpec,
    ) -> Result<(Vec<ParseNode>, Vec<Option<ParseNode>>), ParseError> {
        let total = props.num_args + props.num_optional_args;
        let mut args = Vec::with_capacity(props.num_args);
        let mut opt_args = Vec::with_capacity(props.num_optional_args);

        for i in 0..total {
            let arg_type = props
                .arg_types
                .get(i)
                .copied()
                .unwrap_or(ArgType::Original);
            let is_optional = i < props.num_optional_args;
            if (i > 0 && !is_optional) || (i == 0 && !is_optional && self.mode == Mode::Math) {
                self.consume_spaces()?;
            }

            let arg = self.parse_group_of_type(
                arg_type,
                is_optional,
                props.consume_mode,
                props.greediness,
            )?;
            if is_optional {
                opt_args.push(arg);
            } else {
                match arg {
                    Some(arg) => args.push(arg),
                    None => {
                        return Err(ParseError(
                            None,
                            ParseErrorKind::ExpectedGroup {
                                after: func_name.to_string(),
                            },
                        ));
                    }
                }
            }
        }
        Ok((args, opt_args))
    }

    fn parse_group_of_type(
        &mut self,
        arg_type: ArgType,
        optional: bool,
        consume_mode: Option<Mode>,
        greediness: u8,
    ) -> Result<Option<ParseNode>, ParseError> {
        match arg_type {
            ArgType::Color => self.parse_color_group(optional),
            ArgType::Size => self.parse_size_group(optional),
            ArgType::Url => self.parse_url_group(optional),
            ArgType::Raw => Ok(self.parse_string_group(optional)?.map(|(string, loc)| {
                ParseNode::Raw(crate::parse_node::RawNode {
                    info: NodeInfo::new(Mode::Text, loc),
                    string,
                })
            })),
            ArgType::HBox => {
                let group = self.parse_argument_group(optional, Some(Mode::Text), greediness)?;
                Ok(group.map(|group| {
                    let info = NodeInfo::new(group.mode(), group.loc());
                    ParseNode::Styling(StylingNode {
                        info,
                        style: crate::style::TEXT,
                        body: vec![group],
                    })
                }))
            }
            ArgType::Primitive | ArgType::Original => {
                self.parse_argument_group(optional, consume_mode, greediness)
            }
        }
    }

    /// Parses a `{...}` group, `[...]` optional group, or single item,
    /// optionally in another mode.
    fn parse_argument_group(
        &mut self,
        optional: bool,
        mode: Option<Mode>,
        greediness: u8,
    ) -> Result<Option<ParseNode>, ParseError> {
        let outer_mode = self.mode;
        if optional {
            if !self.fetch()?.is("[") {
                return Ok(None);
            }
            if let Some(mode) = mode {
                self.switch_mode(mode);
            }
            let open = self.fetch()?.clone();
            self.consume()?;
            self.gullet.begin_group();
            let expression = self.parse_expression(false, Some("]"))?;
            let last_loc = self.fetch()?.range;
            self.expect("]", true)?;
            self.gullet.end_group();
            if mode.is_some() {
                self.switch_mode(outer_mode);
            }
            return Ok(Some(ParseNode::OrdGroup(OrdGroupNode {
                info: NodeInfo::new(
                    mode.unwrap_or(outer_mode),
                    SourceRange::join_opt(open.range, last_loc),
                ),
                body: expression,
                semisimple: false,
            })));
        }

        if let Some(mode) = mode {
            self.switch_mode(mode);
        }
        let token = self.fetch()?.clone();
        let result = if token.is("{") || token.is("\\begingroup") {
            self.parse_group("argument", None)?
        } else {
            match self.parse_function_with_break(Some("argument"), None, greediness)? {
                Some(node) => Some(node),
                None => {
                    let symbol = self.parse_symbol()?;
                    if symbol.is_none() && token.text.starts_with('\\') && !token.is(EOF) {
                        return Err(ParseError(
                            token.range,
                            ParseErrorKind::UndefinedControlSequence(
                                token.text.into_owned(),
                            ),
                        ));
                    }
                    symbol
                }
            }
        };
        if mode.is_some() {
            self.switch_mode(outer_mode);
        }
        Ok(result)
    }

    /// Collects raw token text up to a matching close brace (or one
    /// bracket group when `optional`).
    fn parse_string_group(
        &mut self,
        optional: bool,
    ) -> Result<Option<(String, Option<SourceRange>)>, ParseError> {
        let (open, close) = if optional {
            if !self.fetch()?.is("[") {
                return Ok(None);
            }
            ("[", "]")
        } else {
            self.expect("{", false)?;
            ("{", "}")
        };
        let first = self.fetch()?.clone();
        debug_assert!(first.is(open));
        self.consume()?;

        let mut string = String::new();
        let mut depth = 0usize;
        let mut last_loc = first.range;
        loop {
            let token = self.fetch()?.clone();
            match token.text.as_ref() {
                t if t == EOF => {
                    return Err(ParseError(
                        token.range,
                        ParseErrorKind::UnexpectedEndOfInput,
                    ));
                }
                "{" => {
                    depth += 1;
                    string.push('{');
                }
                "}" if close == "}" && depth > 0 => {
                    depth -= 1;
                    string.push('}');
                }
                t if t == close && depth == 0 => {
                    last_loc = token.range;
                    self.consume()?;
                    break;
                }
                t => {
                    string.push_str(t);
                }
            }
            self.consume()?;
        }
        Ok(Some((
            string,
            SourceRange::join_opt(first.range, last_loc),
        )))
    }

    fn parse_color_group(&mut self, optional: bool) -> Result<Option<ParseNode>, ParseError> {
        let Some((string, loc)) = self.parse_string_group(optional)? else {
            return Ok(None);
        };
        let color = string.trim().to_string();
        let valid = {
            let bytes = color.as_bytes();
            let named = !color.is_empty() && bytes.iter().all(u8::is_ascii_alphabetic);
            let hex3 = color.len() == 4
                && bytes[0] == b'#'
                && bytes[1..].iter().all(u8::is_ascii_hexdigit);
            let hex6 = (color.len() == 7
                && bytes[0] == b'#'
                && bytes[1..].iter().all(u8::is_ascii_hexdigit))
                || (color.len() == 6 && bytes.iter().all(u8::is_ascii_hexdigit));
            named || hex3 || hex6
        };
        if !valid {
            return Err(ParseError(loc, ParseErrorKind::ExpectedColor(color)));
        }
        Ok(Some(ParseNode::ColorToken(
            crate::parse_node::ColorTokenNode {
                info: NodeInfo::new(self.mode, loc),
                color,
            },
        )))
    }

    fn parse_size_group(&mut self, optional: bool) -> Result<Option<ParseNode>, ParseError> {
        // With no braces, gather tokens that look like a size
        // specification straight from the stream (e.g. \above2pt).
        let (string, loc) = if !optional && !self.fetch()?.is("{") {
            let mut string = String::new();
            let start = self.fetch()?.range;
            let mut last = start;
            loop {
                let token = self.fetch()?.clone();
                let text = token.text.as_ref();
                let acceptable = text.len() == 1
                    && (text.as_bytes()[0].is_ascii_digit()
                        || matches!(text.as_bytes()[0], b'+' | b'-' | b'.')
                        || text.as_bytes()[0].is_ascii_lowercase());
                if !acceptable {
                    break;
                }
                string.push_str(text);
                last = token.range;
                self.consume()?;
            }
            if string.is_empty() {
                return Err(ParseError(
                    start,
                    ParseErrorKind::ExpectedSize(string),
                ));
            }
            (string, SourceRange::join_opt(start, last))
        } else {
            match self.parse_string_group(optional)? {
                None => return Ok(None),
                Some(pair) => pair,
            }
        };

        let trimmed = string.trim();
        if trimmed.is_empty() {
            // A blank size argument means "use the default".
            return Ok(Some(ParseNode::Size(SizeNode {
                info: NodeInfo::new(self.mode, loc),
                value: Measurement::new(0.0, Unit::Pt),
                is_blank: true,
            })));
        }
        let Some(value) = parse_size_text(trimmed) else {
            // Distinguish a malformed number from a bad unit.
            let unit = trimmed
                .trim_start_matches(|c: char| !c.is_ascii_alphabetic())
                .to_string();
            return Err(if unit.len() == 2 && Unit::from_str(&unit).is_none() {
                ParseError(loc, ParseErrorKind::InvalidUnit(unit))
            } else {
                ParseError(loc, ParseErrorKind::InvalidSize(trimmed.to_string()))
            });
        };
        Ok(Some(ParseNode::Size(SizeNode {
            info: NodeInfo::new(self.mode, loc),
            value,
            is_blank: false,
        })))
    }

    /// Bracket-group row-gap size, as used after `\\`.
    pub(crate) fn parse_optional_size_group(
        &mut self,
    ) -> Result<Option<Measurement>, ParseError> {
        Ok(match self.parse_size_group(true)? {
            Some(ParseNode::Size(size)) if !size.is_blank => Some(size.value),
            _ => None,
        })
    }

    fn parse_url_group(&mut self, optional: bool) -> Result<Option<ParseNode>, ParseError> {
        let Some((string, loc)) = self.parse_string_group(optional)? else {
            return Ok(None);
        };
        // Unescape the characters TeX requires escaping in URLs.
        let url = string
            .replace("\\%", "%")
            .replace("\\#", "#")
            .replace("\\&", "&")
            .replace("\\$", "$")
            .replace("\\_", "_")
            .replace('\u{a0}', "~");
        Ok(Some(ParseNode::Url(UrlNode {
            info: NodeInfo::new(self.mode, loc),
            url,
        })))
    }

    /// Reads `{name}` after `\begin` or `\end`.
    pub(crate) fn parse_environment_name(&mut self) -> Result<String, ParseError> {
        let (name, loc) = self
            .parse_string_group(false)?
            .expect("non-optional string group");
        let name = name.trim().to_string();
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'*') {
            return Err(ParseError(loc, ParseErrorKind::UnknownEnvironment(name)));
        }
        Ok(name)
    }

    /// A single body group, for the legacy one-argument `\color`.
    pub(crate) fn parse_single_group(
        &mut self,
        name: &'static str,
    ) -> Result<ParseNode, ParseError> {
        self.consume_spaces()?;
        let loc = self.fetch()?.range;
        self.parse_group(name, None)?.ok_or_else(|| {
            ParseError(
                loc,
                ParseErrorKind::ExpectedGroup {
                    after: name.to_string(),
                },
            )
        })
    }

    /// Parses a single symbol from the symbol tables, or a bare
    /// character.
    fn parse_symbol(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let token = self.fetch()?.clone();
        let text = token.text.as_ref();
        let loc = token.range;

        if let Some(rest) = text.strip_prefix("\\verb") {
            self.consume()?;
            let star = rest.starts_with('*');
            let rest = if star { &rest[1..] } else { rest };
            // Strip the delimiter pair captured by the lexer.
            let body: String = {
                let mut chars = rest.chars();
                chars.next();
                let mut s: String = chars.collect();
                s.pop();
                s
            };
            return Ok(Some(ParseNode::Verb(VerbNode {
                info: NodeInfo::new(self.mode, loc),
                body,
                star,
            })));
        }

        if text == "\\relax" {
            self.consume()?;
            return Ok(Some(ParseNode::Internal(InternalNode {
                info: NodeInfo::new(self.mode, loc),
            })));
        }

        if let Some(symbol) = symbols::get_symbol(self.mode, text) {
            self.consume()?;
            let info = NodeInfo::new(self.mode, loc);
            let text = text.to_string();
            let node = match symbol.group {
                Group::Bin => atom(info, AtomFamily::Bin, text),
                Group::Close => atom(info, AtomFamily::Close, text),
                Group::Inner => atom(info, AtomFamily::Inner, text),
                Group::Open => atom(info, AtomFamily::Open, text),
                Group::Punct => atom(info, AtomFamily::Punct, text),
                Group::Rel => atom(info, AtomFamily::Rel, text),
                Group::MathOrd => ParseNode::MathOrd(SymNode { info, text }),
                Group::TextOrd => ParseNode::TextOrd(SymNode { info, text }),
                Group::Spacing => ParseNode::Spacing(SymNode { info, text }),
                Group::AccentToken => ParseNode::AccentToken(SymNode { info, text }),
                Group::OpToken => ParseNode::OpToken(SymNode { info, text }),
            };
            return Ok(Some(node));
        }

        let mut chars = text.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Ok(None);
        };
        if ch.is_ascii_alphanumeric() || (ch as u32) >= 0x80 {
            if (ch as u32) >= 0x80 {
                if !supported_codepoint(ch) {
                    self.settings.report_nonstrict(
                        "unknownSymbol",
                        &format!("Unrecognized Unicode character \"{ch}\""),
                        loc,
                    )?;
                } else if self.mode == Mode::Math {
                    self.settings.report_nonstrict(
                        "unicodeTextInMathMode",
                        &format!("Unicode text character \"{ch}\" used in math mode"),
                        loc,
                    )?;
                }
            }
            self.consume()?;
            let info = NodeInfo::new(self.mode, loc);
            let text = ch.to_string();
            let node = if self.mode == Mode::Math && ch.is_ascii_alphabetic() {
                ParseNode::MathOrd(SymNode { info, text })
            } else {
                ParseNode::TextOrd(SymNode { info, text })
            };
            return Ok(Some(node));
        }
        Ok(None)
    }
}

fn atom(info: NodeInfo, family: AtomFamily, text: String) -> ParseNode {
    ParseNode::Atom(AtomNode { info, family, text })
}

/// In text mode, `--`, `---`, and quote pairs merge into their
/// typographic equivalents.
fn form_ligatures(body: &mut Vec<ParseNode>) {
    let text_of = |node: &ParseNode| -> Option<char> {
        match node {
            ParseNode::TextOrd(sym) if sym.text.chars().count() == 1 => sym.text.chars().next(),
            _ => None,
        }
    };
    let mut i = 0;
    while i < body.len() {
        let Some(c) = text_of(&body[i]) else {
            i += 1;
            continue;
        };
        let c2 = body.get(i + 1).and_then(text_of);
        let c3 = body.get(i + 2).and_then(text_of);
        let (replacement, span) = match (c, c2, c3) {
            ('-', Some('-'), Some('-')) => ("\u{2014}", 3),
            ('-', Some('-'), _) => ("\u{2013}", 2),
            ('`', Some('`'), _) => ("\u{201c}", 2),
            ('\'', Some('\''), _) => ("\u{201d}", 2),
            _ => {
                i += 1;
                continue;
            }
        };
        let info = body[i].info().clone();
        body.splice(
            i..i + span,
            [ParseNode::TextOrd(SymNode {
                info,
                text: replacement.to_string(),
            })],
        );
        i += 1;
    }
}
