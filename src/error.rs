// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::TryReserveError;

use thiserror::Error;

use crate::args::SlotKind;
use crate::schema::TokenKind;

/// The broad category of an [Error].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    /// Memory could not be allocated.
    Alloc,
    /// The schema string is malformed (programmer error).
    Schema,
    /// The command-line does not satisfy the schema (user error).
    Input,
}

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// Growing an internal buffer failed. The call produced no results
    /// and there is nothing to report beyond the failure itself.
    #[error("memory allocation failed")]
    Alloc,

    /// The schema (or the slots supplied for it) is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The command-line arguments do not match the schema.
    #[error(transparent)]
    Input(#[from] InputError),
}

impl Error {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Alloc => ErrorKind::Alloc,
            Error::Schema(_) => ErrorKind::Schema,
            Error::Input(_) => ErrorKind::Input,
        }
    }

    /// Returns the diagnostic message, or [None] for an allocation failure
    /// which carries no message.
    pub fn message(&self) -> Option<String> {
        match self {
            Error::Alloc => None,
            Error::Schema(e) => Some(e.to_string()),
            Error::Input(e) => Some(e.to_string()),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::Alloc
    }
}

/// Errors caused by an invalid schema.
///
/// These are programming errors in the calling code: a given schema string
/// either always fails or never fails, whatever the command-line.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SchemaError {
    //------------------------------
    // Grammar errors
    //------------------------------
    /// The schema contains text that is not a valid token.
    #[error("Schema lexing error, starting from \"{rest}\"")]
    Lex {
        /// Schema text from the offending character onwards.
        rest: String,
    },

    /// The schema tokens do not form a valid synopsis.
    #[error("Schema parsing error. Expected {expected} but received {found}, starting from \"{rest}\"")]
    Parse {
        /// Token that the grammar required.
        expected: TokenKind,
        /// Token that was actually found.
        found: TokenKind,
        /// Schema text from the failure point onwards.
        rest: String,
    },

    /// An optional positional argument is followed by a mandatory one
    /// (`"[a] b"`).
    #[error("All optional non-flag arguments must be chained on the schema's right side")]
    OptionalNotTrailing,

    //------------------------------
    // Slot contract errors
    //------------------------------
    /// The number of output slots differs from the number the schema declares.
    #[error("Schema declares {expected} output slots but {found} were supplied")]
    SlotCount {
        /// Declarations, plus one if the schema ends with `...`.
        expected: usize,
        /// Slots supplied.
        found: usize,
    },

    /// An output slot cannot hold the value of its declaration.
    #[error("Output slot {index} must be a {expected} slot, not a {found} slot")]
    SlotMismatch {
        /// Zero-based slot position.
        index: usize,
        /// Kind required by the declaration.
        expected: SlotKind,
        /// Kind supplied.
        found: SlotKind,
    },
}

/// Errors caused by command-line arguments that do not satisfy the schema.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum InputError {
    //------------------------------
    // Lexing and parsing
    //------------------------------
    /// A flag is followed by text that is neither `=` nor the end of
    /// the argument (`-a.one`).
    #[error("Ambiguous argument \"{0}\"")]
    AmbiguousArgument(String),

    /// A flag ends with `=` but has no value (`-a=`).
    #[error("A value expected \"{0}\"")]
    ValueExpected(String),

    /// An `=value` argument that does not belong to a flag.
    #[error("Unexpected input \"{0}\"")]
    UnexpectedInput(String),

    //------------------------------
    // Matching
    //------------------------------
    /// A flag that the schema does not declare.
    #[error("Ambiguous argument \"{0}\" provided")]
    UnknownArgument(String),

    /// A non-repeatable flag was given more than once.
    #[error("Same arguments provided multiple times: {0}")]
    Repeated(String),

    /// A flag requiring a value was given without one.
    #[error("\"{0}\" argument requires a value")]
    ValueRequired(String),

    /// A flag taking no value was given one.
    #[error("\"{0}\" argument does not require a value")]
    ValueNotAllowed(String),

    /// A mandatory flag was not specified.
    #[error("\"{name}\" argument {}required but not provided", alias_note(*.has_aliases))]
    Missing {
        /// First declared alias of the flag.
        name: String,
        /// Set if the flag can be spelled more than one way.
        has_aliases: bool,
    },

    /// Fewer positional arguments than the schema demands.
    #[error("Not enough positional arguments provided")]
    NotEnoughPositional,

    /// More positional arguments than the schema allows.
    #[error("Too many positional arguments provided")]
    TooManyPositional,
}

fn alias_note(has_aliases: bool) -> &'static str {
    if has_aliases {
        "(or alias) "
    } else {
        ""
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Append to a vector, reporting allocation failure as [Error::Alloc]
/// rather than aborting.
pub(crate) fn grow<T>(items: &mut Vec<T>, item: T) -> Result<()> {
    items.try_reserve(1)?;
    items.push(item);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::Alloc.kind(), ErrorKind::Alloc);
        assert_eq!(
            Error::from(SchemaError::OptionalNotTrailing).kind(),
            ErrorKind::Schema
        );
        assert_eq!(
            Error::from(InputError::TooManyPositional).kind(),
            ErrorKind::Input
        );
    }

    #[test]
    fn test_error_message() {
        #[derive(Debug)]
        struct TestData {
            error: Error,
            message: Option<&'static str>,
        }

        let tests = &[
            TestData {
                error: Error::Alloc,
                message: None,
            },
            TestData {
                error: SchemaError::Lex { rest: "1a".into() }.into(),
                message: Some("Schema lexing error, starting from \"1a\""),
            },
            TestData {
                error: SchemaError::Parse {
                    expected: TokenKind::Eoi,
                    found: TokenKind::RBrak,
                    rest: "]".into(),
                }
                .into(),
                message: Some(
                    "Schema parsing error. Expected EOI but received RBRAK, starting from \"]\"",
                ),
            },
            TestData {
                error: SchemaError::SlotMismatch {
                    index: 2,
                    expected: SlotKind::List,
                    found: SlotKind::Flag,
                }
                .into(),
                message: Some("Output slot 2 must be a list slot, not a flag slot"),
            },
            TestData {
                error: InputError::Missing {
                    name: "-a".into(),
                    has_aliases: true,
                }
                .into(),
                message: Some("\"-a\" argument (or alias) required but not provided"),
            },
            TestData {
                error: InputError::Missing {
                    name: "-a".into(),
                    has_aliases: false,
                }
                .into(),
                message: Some("\"-a\" argument required but not provided"),
            },
            TestData {
                error: InputError::Repeated("-a".into()).into(),
                message: Some("Same arguments provided multiple times: -a"),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let message = d.error.message();
            assert_eq!(message.as_deref(), d.message, "{}", msg);

            if let Some(expected) = d.message {
                assert_eq!(d.error.to_string(), expected, "{}", msg);
            }
        }
    }

    #[test]
    fn test_grow() {
        let mut v = Vec::<u8>::new();

        grow(&mut v, 1).unwrap();
        grow(&mut v, 2).unwrap();

        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn test_reserve_failure() {
        let err = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();

        let err = Error::from(err);

        assert_eq!(err, Error::Alloc);
        assert_eq!(err.kind(), ErrorKind::Alloc);
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "memory allocation failed");
    }
}
