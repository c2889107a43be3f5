//! The environment registry and the `\begin`/`\end` plumbing.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::error::{ParseError, ParseErrorKind};
use crate::functions::{FnMap, FunctionContext, FunctionPropSpec, add_functions};
use crate::parse_node::{ParseNode, RawNode};
use crate::parser::Parser;
use crate::token::SourceRange;

pub(crate) mod array;

pub(crate) struct EnvContext<'ctx, 'a> {
    pub parser: &'ctx mut Parser<'a>,
    pub env_name: String,
    pub loc: Option<SourceRange>,
}

pub(crate) type EnvHandler = for<'ctx, 'a> fn(
    EnvContext<'ctx, 'a>,
    Vec<ParseNode>,
    Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError>;

#[derive(Clone, Copy)]
pub(crate) struct EnvSpec {
    pub num_args: usize,
    pub num_optional_args: usize,
    pub handler: EnvHandler,
}

pub(crate) type EnvMap = FxHashMap<&'static str, EnvSpec>;

pub(crate) static ENVIRONMENTS: Lazy<EnvMap> = Lazy::new(|| {
    let mut envs = EnvMap::default();
    array::define_environments(&mut envs);
    envs
});

fn begin_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let loc = context.loc;
    let parser = context.parser;
    let name = parser.parse_environment_name()?;

    let Some(spec) = ENVIRONMENTS.get(name.as_str()).copied() else {
        return Err(ParseError(loc, ParseErrorKind::UnknownEnvironment(name)));
    };

    // Parse the environment's own arguments, then its body.
    let props = FunctionPropSpec {
        num_args: spec.num_args,
        num_optional_args: spec.num_optional_args,
        ..FunctionPropSpec::with_args(spec.num_args)
    };
    let (args, opt_args) = parser.parse_arguments(&format!("\\begin{{{name}}}"), &props)?;

    let result = (spec.handler)(
        EnvContext {
            parser: &mut *parser,
            env_name: name.clone(),
            loc,
        },
        args,
        opt_args,
    )?;

    parser.expect("\\end", false)?;
    let end = parser.parse_function(None)?;
    match end {
        Some(ParseNode::Raw(RawNode { string: end_name, .. })) => {
            if end_name != name {
                return Err(ParseError(
                    loc,
                    ParseErrorKind::MismatchedEnvironment {
                        expected: name,
                        got: end_name,
                    },
                ));
            }
        }
        _ => {
            return Err(ParseError(loc, ParseErrorKind::UnexpectedEndOfInput));
        }
    }
    Ok(result)
}

fn end_handler(
    context: FunctionContext<'_, '_>,
    _args: Vec<ParseNode>,
    _opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError> {
    let mode = context.parser.mode;
    let name = context.parser.parse_environment_name()?;
    Ok(ParseNode::Raw(RawNode {
        info: crate::parse_node::NodeInfo::new(mode, context.loc),
        string: name,
    }))
}

pub(crate) fn define(fns: &mut FnMap) {
    add_functions(
        fns,
        &["\\begin"],
        FunctionPropSpec::with_args(0),
        begin_handler,
    );
    add_functions(fns, &["\\end"], FunctionPropSpec::with_args(0), end_handler);
}
