// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use log::trace;

use crate::error::{grow, InputError, Result};
use crate::schema::flag_end;

/// Special argument that denotes the end of all input; all arguments
/// that follow are ignored.
pub(crate) const END_OF_INPUT: &str = "--";

const ASSIGN: char = '=';

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum InputKind {
    /// A flag name (`-a`, `--all`).
    Flag,
    /// `=` separating a flag from its value.
    Eql,
    /// A value, either assigned or positional.
    Value,
    /// End of input.
    Eoi,
}

/// A token from the command-line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct InputToken<'a> {
    pub kind: InputKind,
    pub text: &'a str,
    /// The whole argument the token came from.
    pub raw: &'a str,
    /// Index of that argument in the argument vector.
    pub arg: usize,
}

/// A flag found on the command-line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Occurrence<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

/// The command-line grouped into flags and positional values.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub(crate) struct ParsedInput<'a> {
    pub occurrences: Vec<Occurrence<'a>>,
    pub positionals: Vec<&'a str>,
}

impl<'a> InputToken<'a> {
    fn new(kind: InputKind, text: &'a str, raw: &'a str, arg: usize) -> Self {
        InputToken {
            kind,
            text,
            raw,
            arg,
        }
    }
}

/// Split the argument vector into tokens. The first element (the program
/// name) is skipped.
pub(crate) fn tokenize<S: AsRef<str>>(argv: &[S]) -> Result<Vec<InputToken<'_>>> {
    let mut tokens = Vec::new();

    for (arg, raw) in argv.iter().enumerate().skip(1) {
        let raw = raw.as_ref();

        if raw == END_OF_INPUT {
            grow(&mut tokens, InputToken::new(InputKind::Eoi, raw, raw, arg))?;

            trace!("end of input at argument {}", arg);

            return Ok(tokens);
        }

        let rest = match flag_end(raw.as_bytes(), 0) {
            Some(end) => {
                grow(
                    &mut tokens,
                    InputToken::new(InputKind::Flag, &raw[..end], raw, arg),
                )?;

                let rest = &raw[end..];

                if rest.is_empty() {
                    continue;
                }

                if !rest.starts_with(ASSIGN) {
                    return Err(InputError::AmbiguousArgument(raw.into()).into());
                }

                rest
            }
            None => raw,
        };

        match rest.strip_prefix(ASSIGN) {
            Some(value) => {
                grow(&mut tokens, InputToken::new(InputKind::Eql, rest, raw, arg))?;

                if !value.is_empty() {
                    grow(&mut tokens, InputToken::new(InputKind::Value, value, raw, arg))?;
                }
            }
            None => grow(&mut tokens, InputToken::new(InputKind::Value, raw, raw, arg))?,
        }
    }

    grow(
        &mut tokens,
        InputToken::new(InputKind::Eoi, "", "", argv.len()),
    )?;

    Ok(tokens)
}

/// Matches the next token if it is an `=` from argument `arg`.
fn attached_assign(arg: usize) -> impl Fn(&&InputToken) -> bool {
    move |t| t.kind == InputKind::Eql && t.arg == arg
}

/// Group tokens into flag occurrences and positional values.
///
/// An `=` only belongs to the flag written in the same argument: `-a=1`
/// assigns `1` to `-a`, but `-a =1` is an error. The value after that `=`
/// is the next token, so `-a= 1` also assigns `1`.
pub(crate) fn parse<'a>(tokens: &[InputToken<'a>]) -> Result<ParsedInput<'a>> {
    let mut input = ParsedInput::default();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        trace!("input token: {:?}", token);

        match token.kind {
            InputKind::Eoi => break,
            InputKind::Value => grow(&mut input.positionals, token.text)?,
            InputKind::Eql => {
                return Err(InputError::UnexpectedInput(token.text.into()).into());
            }
            InputKind::Flag => {
                let mut value = None;

                if iter.next_if(attached_assign(token.arg)).is_some() {
                    match iter.next_if(|t| t.kind == InputKind::Value) {
                        Some(v) => value = Some(v.text),
                        None => return Err(InputError::ValueExpected(token.raw.into()).into()),
                    }
                }

                let occurrence = Occurrence {
                    name: token.text,
                    value,
                };

                grow(&mut input.occurrences, occurrence)?;
            }
        }
    }

    Ok(input)
}
