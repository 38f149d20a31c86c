// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::error::{grow, Error, Result, SchemaError};

const ELLIPSIS: &str = "...";
const ALIAS_SEPARATOR: &str = "|";

/// The kinds of token found in a schema string.
///
/// The [fmt::Display] form is the name used in schema parsing diagnostics.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TokenKind {
    /// End of the schema.
    Eoi,
    /// `[`
    LBrak,
    /// `]`
    RBrak,
    /// `|`
    Pipe,
    /// `=`
    Eql,
    /// A positional argument or value name (`fname`).
    Name,
    /// A flag name (`-f`, `--flag`).
    FloatArg,
    /// `...`
    Dots,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Eoi => "EOI",
            TokenKind::LBrak => "LBRAK",
            TokenKind::RBrak => "RBRAK",
            TokenKind::Pipe => "PIPE",
            TokenKind::Eql => "EQL",
            TokenKind::Name => "NAME",
            TokenKind::FloatArg => "FLOAT_ARG",
            TokenKind::Dots => "DOTS",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
}

/// Returns the end of the name starting at `start`.
///
/// A name is `[A-Za-z][A-Za-z0-9_-]*`. The longest run is taken and it is
/// rejected outright (rather than shortened) if it ends with a dash.
pub(crate) fn name_end(bytes: &[u8], start: usize) -> Option<usize> {
    match bytes.get(start) {
        Some(c) if c.is_ascii_alphabetic() => (),
        _ => return None,
    }

    let end = start
        + 1
        + bytes[start + 1..]
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric() || **c == b'_' || **c == b'-')
            .count();

    if bytes[end - 1] == b'-' {
        return None;
    }

    Some(end)
}

/// Returns the end of the flag name (one or more dashes then a name)
/// starting at `start`.
pub(crate) fn flag_end(bytes: &[u8], start: usize) -> Option<usize> {
    let dashes = bytes[start..].iter().take_while(|c| **c == b'-').count();

    if dashes == 0 {
        return None;
    }

    name_end(bytes, start + dashes)
}

fn dots_end(bytes: &[u8], start: usize) -> Option<usize> {
    let dots = bytes[start..].iter().take_while(|c| **c == b'.').count();

    if dots != ELLIPSIS.len() {
        return None;
    }

    Some(start + dots)
}

fn skip_spaces(bytes: &[u8], start: usize) -> usize {
    start
        + bytes[start..]
            .iter()
            .take_while(|c| matches!(c, b' ' | b'\t' | b'\n' | b'\r'))
            .count()
}

/// Tokenizer for schema strings.
///
/// Holds no position: each call is handed a cursor and returns the
/// token found there along with the cursor just past it. Only ASCII bytes
/// are ever consumed so every cursor is a valid `str` boundary.
#[derive(Debug, Clone, Copy)]
struct Lexer<'a> {
    src: &'a str,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer { src }
    }

    fn next_token(&self, pos: usize) -> Result<(Token<'a>, usize)> {
        let bytes = self.src.as_bytes();
        let start = skip_spaces(bytes, pos);

        if start >= bytes.len() {
            let token = Token {
                kind: TokenKind::Eoi,
                text: "",
            };

            return Ok((token, start));
        }

        let single = match bytes[start] {
            b'[' => Some(TokenKind::LBrak),
            b']' => Some(TokenKind::RBrak),
            b'|' => Some(TokenKind::Pipe),
            b'=' => Some(TokenKind::Eql),
            _ => None,
        };

        let found = single
            .map(|kind| (kind, start + 1))
            .or_else(|| name_end(bytes, start).map(|end| (TokenKind::Name, end)))
            .or_else(|| flag_end(bytes, start).map(|end| (TokenKind::FloatArg, end)))
            .or_else(|| dots_end(bytes, start).map(|end| (TokenKind::Dots, end)));

        match found {
            Some((kind, end)) => {
                let token = Token {
                    kind,
                    text: &self.src[start..end],
                };

                trace!("schema token: {:?}", token);

                Ok((token, end))
            }
            None => Err(SchemaError::Lex {
                rest: self.src[start..].into(),
            }
            .into()),
        }
    }
}

/// A positional (non-flag) argument.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Positional {
    pub name: String,
    pub optional: bool,
}

/// A flag and all of its aliases.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub(crate) struct Group {
    /// Spellings in declaration order (never empty).
    pub aliases: Vec<String>,
    pub optional: bool,
    pub takes_value: bool,
    pub value_optional: bool,
    /// Only ever set along with `takes_value`.
    pub repeatable: bool,
    pub value_name: Option<String>,
}

impl Group {
    /// The first declared alias, used to name the group in diagnostics.
    pub fn name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or_default()
    }

    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias == name)
    }
}

/// Reference to a declaration, by index into [Schema]'s
/// positional or group list.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum DeclRef {
    Positional(usize),
    Group(usize),
}

enum Arg {
    Positional(String),
    Group(Group),
}

/// Backtracking recursive descent parser over the schema grammar:
///
/// ```text
/// synopsis: decl* DOTS? EOI
/// decl:     arg | LBRAK arg RBRAK
/// arg:      NAME | FLOAT_ARG (PIPE FLOAT_ARG)* (assign DOTS? | LBRAK assign RBRAK)?
/// assign:   EQL NAME
/// ```
///
/// Every production is given a cursor and returns `Ok(None)` when it does
/// not match, leaving the caller's cursor untouched.
struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(src),
        }
    }

    fn expect(&self, kind: TokenKind, pos: usize) -> Result<Option<(&'a str, usize)>> {
        let (token, end) = self.lexer.next_token(pos)?;

        if token.kind == kind {
            Ok(Some((token.text, end)))
        } else {
            Ok(None)
        }
    }

    /// Like [Parser::expect()], but a mismatch is a parse error.
    fn require(&self, kind: TokenKind, pos: usize) -> Result<usize> {
        let (token, end) = self.lexer.next_token(pos)?;

        if token.kind == kind {
            return Ok(end);
        }

        Err(SchemaError::Parse {
            expected: kind,
            found: token.kind,
            rest: self.lexer.src[pos..].into(),
        }
        .into())
    }

    fn assign(&self, pos: usize) -> Result<Option<(&'a str, usize)>> {
        let pos = match self.expect(TokenKind::Eql, pos)? {
            Some((_, pos)) => pos,
            None => return Ok(None),
        };

        self.expect(TokenKind::Name, pos)
    }

    fn bracketed_assign(&self, pos: usize) -> Result<Option<(&'a str, usize)>> {
        let pos = match self.expect(TokenKind::LBrak, pos)? {
            Some((_, pos)) => pos,
            None => return Ok(None),
        };

        let (name, pos) = match self.assign(pos)? {
            Some(found) => found,
            None => return Ok(None),
        };

        Ok(self
            .expect(TokenKind::RBrak, pos)?
            .map(|(_, pos)| (name, pos)))
    }

    fn arg(&self, pos: usize) -> Result<Option<(Arg, usize)>> {
        if let Some((name, pos)) = self.expect(TokenKind::Name, pos)? {
            return Ok(Some((Arg::Positional(name.into()), pos)));
        }

        let (first, mut pos) = match self.expect(TokenKind::FloatArg, pos)? {
            Some(found) => found,
            None => return Ok(None),
        };

        let mut group = Group::default();
        grow(&mut group.aliases, first.into())?;

        while let Some((_, after_pipe)) = self.expect(TokenKind::Pipe, pos)? {
            match self.expect(TokenKind::FloatArg, after_pipe)? {
                Some((alias, next)) => {
                    grow(&mut group.aliases, alias.into())?;
                    pos = next;
                }
                // A dangling '|' spoils the whole argument.
                None => return Ok(None),
            }
        }

        if let Some((value_name, next)) = self.assign(pos)? {
            group.takes_value = true;
            group.value_name = Some(value_name.into());
            pos = next;

            if let Some((_, next)) = self.expect(TokenKind::Dots, pos)? {
                group.repeatable = true;
                pos = next;
            }
        } else if let Some((value_name, next)) = self.bracketed_assign(pos)? {
            group.takes_value = true;
            group.value_optional = true;
            group.value_name = Some(value_name.into());
            pos = next;
        }

        Ok(Some((Arg::Group(group), pos)))
    }

    fn decl(&self, pos: usize) -> Result<Option<(Arg, bool, usize)>> {
        if let Some((arg, pos)) = self.arg(pos)? {
            return Ok(Some((arg, false, pos)));
        }

        let pos = match self.expect(TokenKind::LBrak, pos)? {
            Some((_, pos)) => pos,
            None => return Ok(None),
        };

        let (arg, pos) = match self.arg(pos)? {
            Some(found) => found,
            None => return Ok(None),
        };

        Ok(self
            .expect(TokenKind::RBrak, pos)?
            .map(|(_, pos)| (arg, true, pos)))
    }

    fn synopsis(&self) -> Result<Schema> {
        let mut schema = Schema::default();
        let mut pos = 0;

        while let Some((arg, optional, next)) = self.decl(pos)? {
            schema.add(arg, optional)?;
            pos = next;
        }

        if let Some((_, next)) = self.expect(TokenKind::Dots, pos)? {
            schema.variadic = true;
            pos = next;
        }

        self.require(TokenKind::Eoi, pos)?;

        Ok(schema)
    }
}

/// A compiled schema.
///
/// A schema is a compact description of the command-line a program
/// accepts, for example:
///
/// ```text
/// -f|--flag1=val [--flag2] [-f3[=val]] [-D=val...] fname lname [mname] ...
/// ```
///
/// Compiling once and then calling [Schema::matches()] avoids re-parsing
/// the schema on every call. The [fmt::Display] form is the canonical
/// synopsis, suitable for usage statements.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Schema {
    pub(crate) positionals: Vec<Positional>,
    pub(crate) groups: Vec<Group>,
    pub(crate) order: Vec<DeclRef>,
    pub(crate) variadic: bool,
}

impl Schema {
    /// Compile and validate a schema string.
    pub fn new(schema: &str) -> Result<Self> {
        let compiled = Parser::new(schema).synopsis()?;

        compiled.validate()?;

        debug!(
            "compiled schema {:?}: {} positional, {} flag groups, variadic: {}",
            schema,
            compiled.positionals.len(),
            compiled.groups.len(),
            compiled.variadic
        );

        Ok(compiled)
    }

    /// Returns `true` if the schema ends with `...`, capturing any extra
    /// positional arguments.
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Returns the number of output slots a caller must supply: one per
    /// declaration plus one if the schema is variadic.
    pub fn slot_count(&self) -> usize {
        self.order.len() + usize::from(self.variadic)
    }

    fn add(&mut self, arg: Arg, optional: bool) -> Result<()> {
        match arg {
            Arg::Positional(name) => {
                grow(&mut self.order, DeclRef::Positional(self.positionals.len()))?;
                grow(&mut self.positionals, Positional { name, optional })?;
            }
            Arg::Group(group) => {
                grow(&mut self.order, DeclRef::Group(self.groups.len()))?;
                grow(&mut self.groups, Group { optional, ..group })?;
            }
        }

        Ok(())
    }

    /// Checks the rules the grammar cannot express.
    fn validate(&self) -> Result<()> {
        let misordered = self
            .positionals
            .windows(2)
            .any(|pair| pair[0].optional && !pair[1].optional);

        if misordered {
            return Err(SchemaError::OptionalNotTrailing.into());
        }

        Ok(())
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Schema::new(s)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value_name = self.value_name.as_deref().unwrap_or_default();

        let value = match (self.takes_value, self.value_optional, self.repeatable) {
            (false, _, _) => String::new(),
            (true, true, _) => format!("[={}]", value_name),
            (true, false, true) => format!("={}{}", value_name, ELLIPSIS),
            (true, false, false) => format!("={}", value_name),
        };

        let arg = format!("{}{}", self.aliases.join(ALIAS_SEPARATOR), value);

        if self.optional {
            write!(f, "[{}]", arg)
        } else {
            write!(f, "{}", arg)
        }
    }
}

impl fmt::Display for Positional {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.optional {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts: Vec<String> = self
            .order
            .iter()
            .map(|decl| match *decl {
                DeclRef::Positional(i) => self.positionals[i].to_string(),
                DeclRef::Group(i) => self.groups[i].to_string(),
            })
            .collect();

        if self.variadic {
            parts.push(ELLIPSIS.into());
        }

        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use regex::Regex;

    fn kinds(src: &str) -> Result<Vec<TokenKind>> {
        let lexer = Lexer::new(src);
        let mut kinds = Vec::new();
        let mut pos = 0;

        loop {
            let (token, next) = lexer.next_token(pos)?;
            kinds.push(token.kind);

            if token.kind == TokenKind::Eoi {
                return Ok(kinds);
            }

            pos = next;
        }
    }

    #[test]
    fn test_name_end() {
        #[derive(Debug)]
        struct TestData<'a> {
            text: &'a str,
            end: Option<usize>,
        }

        let tests = &[
            TestData {
                text: "",
                end: None,
            },
            TestData {
                text: "a",
                end: Some(1),
            },
            TestData {
                text: "fname",
                end: Some(5),
            },
            TestData {
                text: "f_3-x=val",
                end: Some(5),
            },
            TestData {
                text: "a-",
                end: None,
            },
            TestData {
                text: "ab-]",
                end: None,
            },
            TestData {
                text: "1a",
                end: None,
            },
            TestData {
                text: "_a",
                end: None,
            },
            TestData {
                text: "a.b",
                end: Some(1),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(name_end(d.text.as_bytes(), 0), d.end, "{}", msg);
        }
    }

    #[test]
    fn test_flag_end() {
        assert_eq!(flag_end(b"-a", 0), Some(2));
        assert_eq!(flag_end(b"---flaaag", 0), Some(9));
        assert_eq!(flag_end(b"--flag=1", 0), Some(6));
        assert_eq!(flag_end(b"-", 0), None);
        assert_eq!(flag_end(b"--", 0), None);
        assert_eq!(flag_end(b"-1", 0), None);
        assert_eq!(flag_end(b"a", 0), None);
        assert_eq!(flag_end(b"-a-", 0), None);
    }

    #[test]
    fn test_lexer() {
        use TokenKind::*;

        #[derive(Debug)]
        struct TestData<'a> {
            schema: &'a str,
            result: Result<Vec<TokenKind>>,
        }

        let tests = &[
            TestData {
                schema: "",
                result: Ok(vec![Eoi]),
            },
            TestData {
                schema: " \t\r\n",
                result: Ok(vec![Eoi]),
            },
            TestData {
                schema: "[-f|--flag[=val]] ...",
                result: Ok(vec![
                    LBrak, FloatArg, Pipe, FloatArg, LBrak, Eql, Name, RBrak, RBrak, Dots, Eoi,
                ]),
            },
            TestData {
                schema: "-D=val...",
                result: Ok(vec![FloatArg, Eql, Name, Dots, Eoi]),
            },
            TestData {
                schema: "a ..",
                result: Err(SchemaError::Lex { rest: "..".into() }.into()),
            },
            TestData {
                schema: "a ....",
                result: Err(SchemaError::Lex {
                    rest: "....".into(),
                }
                .into()),
            },
            TestData {
                schema: "1a",
                result: Err(SchemaError::Lex { rest: "1a".into() }.into()),
            },
            TestData {
                schema: "a- b",
                result: Err(SchemaError::Lex {
                    rest: "a- b".into(),
                }
                .into()),
            },
            TestData {
                schema: "a,b",
                result: Err(SchemaError::Lex { rest: ",b".into() }.into()),
            },
            TestData {
                schema: "a 人",
                result: Err(SchemaError::Lex { rest: "人".into() }.into()),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let result = kinds(d.schema);

            let msg = format!("{}, result: {:?}", msg, result);

            assert_eq!(result, d.result, "{}", msg);
        }
    }

    #[test]
    fn test_schema_errors() {
        #[derive(Debug)]
        struct TestData<'a> {
            schema: &'a str,
            error: &'a str,
        }

        let tests = &[
            TestData {
                schema: "a ..",
                error: "Schema lexing error, starting from \"..\"",
            },
            TestData {
                schema: "1a",
                error: "Schema lexing error, starting from \"1a\"",
            },
            TestData {
                // The value name is lexed even though it only
                // belongs to an optional alternative.
                schema: "-a=1",
                error: "Schema lexing error, starting from \"1\"",
            },
            TestData {
                schema: "[a",
                error: "Schema parsing error. Expected EOI but received LBRAK, starting from \"[a\"",
            },
            TestData {
                schema: "a]",
                error: "Schema parsing error. Expected EOI but received RBRAK, starting from \"]\"",
            },
            TestData {
                schema: "... a",
                error: "Schema parsing error. Expected EOI but received NAME, starting from \" a\"",
            },
            TestData {
                schema: "-a=",
                error: "Schema parsing error. Expected EOI but received EQL, starting from \"=\"",
            },
            TestData {
                schema: "-a[=val...]",
                error: "Schema parsing error. Expected EOI but received LBRAK, starting from \"[=val...]\"",
            },
            TestData {
                schema: "[[-a]]",
                error: "Schema parsing error. Expected EOI but received LBRAK, starting from \"[[-a]]\"",
            },
            TestData {
                schema: "a -b|",
                error: "Schema parsing error. Expected EOI but received FLOAT_ARG, starting from \" -b|\"",
            },
            TestData {
                schema: "[a] b",
                error: "All optional non-flag arguments must be chained on the schema's right side",
            },
            TestData {
                schema: "a [b] [c] d",
                error: "All optional non-flag arguments must be chained on the schema's right side",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let result = Schema::new(d.schema);

            let msg = format!("{}, result: {:?}", msg, result);

            let err = result.unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::Schema, "{}", msg);

            assert_eq!(err.message().as_deref(), Some(d.error), "{}", msg);
        }
    }

    #[test]
    fn test_schema_error_rest() {
        let schemas = &[
            "a ..",
            "a ....",
            "1a",
            "a-",
            "-",
            "x y z $",
            "-a=1",
            "[a",
            "a]",
            "[[a]]",
            "|a",
            "a = b",
            "[-a=]",
            "-a[=b",
            "-a|",
            "a -b|",
            "a ... b",
            "-a=b ... c",
            "  [a] ]",
        ];

        let re = Regex::new(
            r#"^Schema (lexing error|parsing error\. Expected EOI but received (LBRAK|RBRAK|PIPE|EQL|NAME|FLOAT_ARG|DOTS)), starting from "(?P<rest>.+)"$"#,
        )
        .unwrap();

        for (i, schema) in schemas.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, schema);

            let result = Schema::new(schema);

            let msg = format!("{}, result: {:?}", msg, result);

            let message = result.unwrap_err().message().unwrap();

            let rest = re
                .captures(&message)
                .and_then(|c| c.name("rest"))
                .map(|m| m.as_str());

            // The reported text is always the unconsumed end of the schema.
            assert!(rest.is_some(), "{}", msg);
            assert!(schema.ends_with(rest.unwrap()), "{}", msg);
        }
    }

    #[test]
    fn test_schema_model() {
        let schema =
            Schema::new("-f|--flag1=val [--flag2] [-f3[=val]] [-D=val...] fname lname [mname] ...")
                .unwrap();

        assert!(schema.is_variadic());
        assert_eq!(schema.slot_count(), 8);

        assert_eq!(
            schema.order,
            vec![
                DeclRef::Group(0),
                DeclRef::Group(1),
                DeclRef::Group(2),
                DeclRef::Group(3),
                DeclRef::Positional(0),
                DeclRef::Positional(1),
                DeclRef::Positional(2),
            ]
        );

        assert_eq!(
            schema.groups[0],
            Group {
                aliases: vec!["-f".into(), "--flag1".into()],
                optional: false,
                takes_value: true,
                value_optional: false,
                repeatable: false,
                value_name: Some("val".into()),
            }
        );

        assert_eq!(
            schema.groups[1],
            Group {
                aliases: vec!["--flag2".into()],
                optional: true,
                ..Group::default()
            }
        );

        let f3 = &schema.groups[2];
        assert!(f3.optional && f3.takes_value && f3.value_optional && !f3.repeatable);

        let d = &schema.groups[3];
        assert!(d.optional && d.takes_value && !d.value_optional && d.repeatable);

        let names: Vec<(&str, bool)> = schema
            .positionals
            .iter()
            .map(|p| (p.name.as_str(), p.optional))
            .collect();
        assert_eq!(names, vec![("fname", false), ("lname", false), ("mname", true)]);
    }

    #[test]
    fn test_schema_accepts() {
        #[derive(Debug)]
        struct TestData<'a> {
            schema: &'a str,
            positionals: usize,
            groups: usize,
            variadic: bool,
        }

        let tests = &[
            TestData {
                schema: "",
                positionals: 0,
                groups: 0,
                variadic: false,
            },
            TestData {
                schema: "...",
                positionals: 0,
                groups: 0,
                variadic: true,
            },
            TestData {
                schema: "-h",
                positionals: 0,
                groups: 1,
                variadic: false,
            },
            TestData {
                schema: "a [b] ...",
                positionals: 2,
                groups: 0,
                variadic: true,
            },
            TestData {
                schema: "[-f|--flag|---flaaag]",
                positionals: 0,
                groups: 1,
                variadic: false,
            },
            TestData {
                schema: "\n\t-a=val\r\n-b = val [ -c [ = val ] ]",
                positionals: 0,
                groups: 3,
                variadic: false,
            },
            TestData {
                schema: "[-a[=val]]...",
                positionals: 0,
                groups: 1,
                variadic: true,
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let result = Schema::new(d.schema);

            let msg = format!("{}, result: {:?}", msg, result);

            let schema = result.unwrap();

            assert_eq!(schema.positionals.len(), d.positionals, "{}", msg);
            assert_eq!(schema.groups.len(), d.groups, "{}", msg);
            assert_eq!(schema.is_variadic(), d.variadic, "{}", msg);
        }
    }

    #[test]
    fn test_repeatable_with_space() {
        // Whitespace is insignificant, so the dots still belong to the flag.
        let schema = Schema::new("-a=val ...").unwrap();

        assert!(!schema.is_variadic());
        assert!(schema.groups[0].repeatable);
    }

    #[test]
    fn test_schema_display() {
        #[derive(Debug)]
        struct TestData<'a> {
            schema: &'a str,
            display: &'a str,
        }

        let tests = &[
            TestData {
                schema: "",
                display: "",
            },
            TestData {
                schema: "...",
                display: "...",
            },
            TestData {
                schema: "-f|--flag1=val [--flag2] [-f3[=val]] [-D=val...] fname lname [mname] ...",
                display: "-f|--flag1=val [--flag2] [-f3[=val]] [-D=val...] fname lname [mname] ...",
            },
            TestData {
                schema: "  -a | -b = file   [ c ]  ",
                display: "-a|-b=file [c]",
            },
            TestData {
                schema: "-a [ = v ]",
                display: "-a[=v]",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let schema: Schema = d.schema.parse().unwrap();

            assert_eq!(schema.to_string(), d.display, "{}", msg);
        }
    }
}
