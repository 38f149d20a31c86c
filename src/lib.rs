// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Declarative command-line argument matching.
//!
//! Describe the command-line your program accepts with a usage synopsis
//! string, and this crate checks the actual command-line against it and
//! stores the values it finds in your variables.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Schema syntax](#schema-syntax)
//! * [Details](#details)
//! * [Terminology](#terminology)
//! * [Matching rules](#matching-rules)
//! * [Errors](#errors)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! A schema such as:
//!
//! ```text
//! -f|--flag1=val [--flag2] [-f3[=val]] [-D=val...] fname lname [mname] ...
//! ```
//!
//! is compiled into a [Schema]. The command-line is then matched against it
//! and each declaration is bound to an output [Slot], in the order the
//! schema declares them.
//!
//! # Quickstart
//!
//! 1. Declare a variable for each argument in the schema.
//! 1. Call [parse()] (or [parse_env()] for the program's own command-line)
//!    with one [Slot] per declaration.
//!
//! ```rust
//! use synopsis::{parse, FlagValue, Slot};
//!
//! let argv = ["prog", "-v", "--output=out.txt", "in.txt"];
//!
//! let mut verbose = false;
//! let mut output = None;
//! let mut input = None;
//!
//! parse(
//!     &argv,
//!     "[-v|--verbose] [-o|--output=file] input",
//!     &mut [
//!         Slot::Flag(&mut verbose),
//!         Slot::Value(&mut output),
//!         Slot::Text(&mut input),
//!     ],
//! )?;
//!
//! assert!(verbose);
//! assert_eq!(output, Some(FlagValue::Value("out.txt".into())));
//! assert_eq!(input.as_deref(), Some("in.txt"));
//! # Ok::<(), synopsis::Error>(())
//! ```
//!
//! Alternatively, compile the schema once and query the [Matches]:
//!
//! ```rust
//! use synopsis::Schema;
//!
//! let schema = Schema::new("[-D=define...] [-q] ...")?;
//! let matches = schema.matches(&["cc", "-D=A", "main.c", "-D=B=1"])?;
//!
//! assert_eq!(matches.values_of("-D").unwrap(), ["A", "B=1"]);
//! assert!(!matches.is_present("-q"));
//! assert_eq!(matches.trailing().unwrap(), ["main.c"]);
//! # Ok::<(), synopsis::Error>(())
//! ```
//!
//! # Schema syntax
//!
//! | Declaration | Meaning | [Slot] |
//! |-|-|-|
//! | `name` | Mandatory positional argument. | [Slot::Text] |
//! | `[name]` | Optional positional argument. | [Slot::Text] |
//! | `-f` | Mandatory flag. | [Slot::Flag] |
//! | `[-f]` | Optional flag. | [Slot::Flag] |
//! | `-f\|--file` | Flag with aliases. | [Slot::Flag] |
//! | `-f=val` | Flag requiring a value. | [Slot::Value] |
//! | `-f[=val]` | Flag with an optional value. | [Slot::Value] |
//! | `-f=val...` | Repeatable flag requiring a value. | [Slot::List] |
//! | `...` | Any further positional arguments (last in the schema). | [Slot::List] |
//!
//! Names start with a letter, followed by letters, digits, `_` or `-`, and
//! cannot end with `-`. Flags are one or more dashes followed by a name.
//! Optional positional arguments must all come after the mandatory ones.
//!
//! # Details
//!
//! ## Terminology
//!
//! - A "flag" is an argument starting with one or more dashes followed by
//!   a name: `-v`, `--verbose`, `---x`.
//!
//! - A flag "value" is attached to the flag with an equals sign, in the same
//!   argument: `--output=out.txt`. `--output out.txt` is a flag followed by a
//!   positional argument. An attached `=` with nothing after it takes the next
//!   argument as its value, so `--output= out.txt` is also accepted.
//!
//! - A "positional argument" is any other argument. Flags and positional
//!   arguments may be intermingled.
//!
//! - The special argument `--` denotes the end of all input: it and all
//!   arguments following it are ignored.
//!
//! ## Matching rules
//!
//! - The first command-line argument (the program name) is ignored.
//! - A flag may only be specified once unless it is repeatable.
//! - Aliases of a flag count as the same flag.
//! - A flag given without its optional value is bound to
//!   [FlagValue::NoValue].
//! - Every slot is written, even for arguments that were not specified:
//!   flags become `false`, values and positional arguments become [None]
//!   and lists become empty.
//! - Use [Slot::Skip] for arguments you don't need to store. They are still
//!   validated.
//!
//! ## Errors
//!
//! All errors are returned as an [Error]. [Error::kind()] tells you whether
//! the schema (including the slots supplied for it) is wrong, the
//! command-line does not match, or memory could not be allocated.
//! [Error::message()] returns the diagnostic to show the user:
//!
//! ```rust
//! use synopsis::{parse, ErrorKind, Slot};
//!
//! let err = parse(&["prog", "-x"], "[-v]", &mut [Slot::Skip]).unwrap_err();
//!
//! assert_eq!(err.kind(), ErrorKind::Input);
//! assert_eq!(err.to_string(), "Ambiguous argument \"-x\" provided");
//! ```
//!
//! # Limitations
//!
//! - Values are always strings: the caller converts them as required.
//! - Flag values must be attached with `=`.
//! - Flag bundling is not supported: `-abc` is a single flag named `abc`.
//! - Sub-commands are not supported.

mod args;
mod error;
mod input;
mod schema;

pub use error::{Error, ErrorKind, InputError, Result, SchemaError};

pub use schema::{Schema, TokenKind};

pub use args::{
    get_args, parse, parse_env, Binding, FlagValue, Matches, Slot, SlotKind, Usage, NO_VALUE,
};
