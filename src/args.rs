// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::env;
use std::fmt;

use log::debug;

use crate::error::{grow, InputError, Result, SchemaError};
use crate::input::{self, ParsedInput};
use crate::schema::{DeclRef, Group, Schema};

/// How [FlagValue::NoValue] is displayed.
pub const NO_VALUE: &str = "(NO VALUE)";

const USAGE_PREFIX: &str = "Usage:";

/// The value of a flag declared with an optional or required value
/// (`-f[=val]`, `-f=val`).
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FlagValue {
    /// The flag was given a value (`-f=foo`).
    Value(String),
    /// The flag was given without its optional value (`-f`).
    NoValue,
}

impl FlagValue {
    /// Returns the value, or [None] if the value was omitted.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Value(value) => Some(value),
            FlagValue::NoValue => None,
        }
    }

    /// Returns `true` if the flag was specified without a value.
    pub fn is_no_value(&self) -> bool {
        *self == FlagValue::NoValue
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlagValue::Value(value) => write!(f, "{}", value),
            FlagValue::NoValue => write!(f, "{}", NO_VALUE),
        }
    }
}

/// The type of value a declaration produces (and so the type of
/// [Slot] it must be bound to).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SlotKind {
    /// A flag without a value (`-v`): [Slot::Flag].
    Flag,
    /// A positional argument (`fname`): [Slot::Text].
    Text,
    /// A flag with a value (`-f=val`, `-f[=val]`): [Slot::Value].
    Value,
    /// A repeatable flag (`-D=val...`) or the trailing `...`: [Slot::List].
    List,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SlotKind::Flag => "flag",
            SlotKind::Text => "text",
            SlotKind::Value => "value",
            SlotKind::List => "list",
        };

        write!(f, "{}", name)
    }
}

/// Destination for one declaration's value.
///
/// Slots are supplied in the order the schema declares its arguments,
/// followed by one [Slot::List] for the trailing `...` if the schema has
/// one.
#[derive(Debug)]
pub enum Slot<'a> {
    /// Don't store the value (it is still validated).
    Skip,
    /// Set to whether the flag was specified.
    Flag(&'a mut bool),
    /// Set to the positional argument, or [None] if an optional one
    /// was not specified.
    Text(&'a mut Option<String>),
    /// Set to the flag's value, or [None] if an optional flag was not
    /// specified.
    Value(&'a mut Option<FlagValue>),
    /// Set to all values given, in order (possibly none).
    List(&'a mut Vec<String>),
}

impl<'a> Slot<'a> {
    /// Returns the kind of value the slot holds ([None] for [Slot::Skip]).
    pub fn kind(&self) -> Option<SlotKind> {
        match self {
            Slot::Skip => None,
            Slot::Flag(_) => Some(SlotKind::Flag),
            Slot::Text(_) => Some(SlotKind::Text),
            Slot::Value(_) => Some(SlotKind::Value),
            Slot::List(_) => Some(SlotKind::List),
        }
    }
}

/// The value bound to one declaration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Binding {
    /// Whether a flag was specified.
    Flag(bool),
    /// A positional argument ([None] if optional and not specified).
    Text(Option<String>),
    /// A flag value ([None] if the flag is optional and not specified).
    Value(Option<FlagValue>),
    /// All values of a repeatable flag.
    List(Vec<String>),
}

impl Binding {
    /// Returns the kind of [Slot] this binding is stored in.
    pub fn kind(&self) -> SlotKind {
        match self {
            Binding::Flag(_) => SlotKind::Flag,
            Binding::Text(_) => SlotKind::Text,
            Binding::Value(_) => SlotKind::Value,
            Binding::List(_) => SlotKind::List,
        }
    }

    /// Returns `true` if the argument appeared on the command-line.
    pub fn is_present(&self) -> bool {
        match self {
            Binding::Flag(present) => *present,
            Binding::Text(value) => value.is_some(),
            Binding::Value(value) => value.is_some(),
            Binding::List(values) => !values.is_empty(),
        }
    }

    fn from_group(group: &Group, values: &[Option<&str>]) -> Result<Self> {
        if group.repeatable {
            let mut list = Vec::new();

            for value in values.iter().flatten() {
                grow(&mut list, value.to_string())?;
            }

            return Ok(Binding::List(list));
        }

        if group.takes_value {
            let value = values.first().map(|value| match value {
                Some(value) => FlagValue::Value(value.to_string()),
                None => FlagValue::NoValue,
            });

            return Ok(Binding::Value(value));
        }

        Ok(Binding::Flag(!values.is_empty()))
    }

    // Kinds are checked before anything is stored.
    fn store(self, slot: &mut Slot<'_>) {
        match (self, slot) {
            (Binding::Flag(value), Slot::Flag(dest)) => **dest = value,
            (Binding::Text(value), Slot::Text(dest)) => **dest = value,
            (Binding::Value(value), Slot::Value(dest)) => **dest = value,
            (Binding::List(value), Slot::List(dest)) => **dest = value,
            _ => (),
        }
    }
}

fn check_slots(expected: &[SlotKind], slots: &[Slot<'_>]) -> Result<()> {
    if expected.len() != slots.len() {
        return Err(SchemaError::SlotCount {
            expected: expected.len(),
            found: slots.len(),
        }
        .into());
    }

    for (index, (&expected, slot)) in expected.iter().zip(slots).enumerate() {
        match slot.kind() {
            Some(found) if found != expected => {
                return Err(SchemaError::SlotMismatch {
                    index,
                    expected,
                    found,
                }
                .into())
            }
            _ => (),
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Entry {
    /// Positional name, or every alias of a flag.
    names: Vec<String>,
    binding: Binding,
}

/// The result of matching a command-line against a [Schema].
///
/// Holds one [Binding] per declaration, in declaration order, plus the
/// trailing positional arguments if the schema ends with `...`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Matches {
    entries: Vec<Entry>,
    trailing: Option<Vec<String>>,
}

impl Matches {
    /// All bindings in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter().map(|entry| &entry.binding)
    }

    /// Returns the binding for a positional argument name or any alias of
    /// a flag. If a name is declared more than once, the first declaration
    /// wins.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries
            .iter()
            .find(|entry| entry.names.iter().any(|n| n == name))
            .map(|entry| &entry.binding)
    }

    /// Returns `true` if the named argument was specified.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).map_or(false, Binding::is_present)
    }

    /// Returns the value of a positional argument or flag. A flag given
    /// without its optional value has no value.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Binding::Text(value) => value.as_deref(),
            Binding::Value(value) => value.as_ref().and_then(FlagValue::as_str),
            _ => None,
        }
    }

    /// Returns all values of a repeatable flag.
    pub fn values_of(&self, name: &str) -> Option<&[String]> {
        match self.get(name)? {
            Binding::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Returns the positional arguments beyond those declared, or [None] if
    /// the schema does not end with `...`.
    pub fn trailing(&self) -> Option<&[String]> {
        self.trailing.as_deref()
    }

    fn slot_kinds(&self) -> Vec<SlotKind> {
        self.entries
            .iter()
            .map(|entry| entry.binding.kind())
            .chain(self.trailing.as_ref().map(|_| SlotKind::List))
            .collect()
    }

    /// Store the bindings in the caller's slots.
    ///
    /// Nothing is stored unless every slot is of the right kind.
    pub fn bind(self, slots: &mut [Slot<'_>]) -> Result<()> {
        check_slots(&self.slot_kinds(), slots)?;

        let bindings = self.entries.into_iter().map(|entry| entry.binding);
        let trailing = self.trailing.map(Binding::List);

        for (binding, slot) in bindings.chain(trailing).zip(slots.iter_mut()) {
            binding.store(slot);
        }

        Ok(())
    }
}

impl Schema {
    fn slot_kinds(&self) -> Vec<SlotKind> {
        let trailing = if self.variadic {
            Some(SlotKind::List)
        } else {
            None
        };

        self.order
            .iter()
            .map(|decl| match *decl {
                DeclRef::Positional(_) => SlotKind::Text,
                DeclRef::Group(i) if self.groups[i].repeatable => SlotKind::List,
                DeclRef::Group(i) if self.groups[i].takes_value => SlotKind::Value,
                DeclRef::Group(_) => SlotKind::Flag,
            })
            .chain(trailing)
            .collect()
    }

    /// Check that `slots` can receive this schema's values: one slot per
    /// declaration (plus one for a trailing `...`), each either
    /// [Slot::Skip] or of the [SlotKind] the declaration produces.
    pub fn check_slots(&self, slots: &[Slot<'_>]) -> Result<()> {
        check_slots(&self.slot_kinds(), slots)
    }

    /// Match a command-line against the schema.
    ///
    /// `argv` must include the program name as its first element (which
    /// is ignored), as returned by [get_args()].
    ///
    /// Checks run in a fixed order and the first failure is returned:
    ///
    /// 1. Each flag, in the order given: known, not repeated (unless
    ///    repeatable), value supplied if required, and no value if none
    ///    is taken.
    /// 2. Every mandatory flag was specified.
    /// 3. The number of positional arguments.
    pub fn matches<S: AsRef<str>>(&self, argv: &[S]) -> Result<Matches> {
        let tokens = input::tokenize(argv)?;
        let input = input::parse(&tokens)?;

        debug!(
            "parsed input: {} flags, {} positional",
            input.occurrences.len(),
            input.positionals.len()
        );

        let seen = self.check_flags(&input)?;
        self.check_required(&seen)?;
        self.check_positionals(&input)?;

        self.bind(&input, &seen)
    }

    /// Returns the index of the first group declaring `name`.
    fn find_group(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|group| group.has_alias(name))
    }

    /// Validate each flag, returning the values given to each group
    /// ([None] for a flag specified without a value).
    fn check_flags<'a>(&self, input: &ParsedInput<'a>) -> Result<Vec<Vec<Option<&'a str>>>> {
        let mut seen: Vec<Vec<Option<&str>>> = Vec::new();
        seen.try_reserve_exact(self.groups.len())?;
        seen.resize_with(self.groups.len(), Vec::new);

        for occurrence in &input.occurrences {
            let name = occurrence.name;

            let index = self
                .find_group(name)
                .ok_or_else(|| InputError::UnknownArgument(name.into()))?;

            let group = &self.groups[index];

            if !seen[index].is_empty() && !group.repeatable {
                return Err(InputError::Repeated(name.into()).into());
            }

            if group.takes_value {
                if occurrence.value.is_none() && !group.value_optional {
                    return Err(InputError::ValueRequired(name.into()).into());
                }
            } else if occurrence.value.is_some() {
                return Err(InputError::ValueNotAllowed(name.into()).into());
            }

            grow(&mut seen[index], occurrence.value)?;
        }

        Ok(seen)
    }

    fn check_required(&self, seen: &[Vec<Option<&str>>]) -> Result<()> {
        let missing = self
            .groups
            .iter()
            .zip(seen)
            .find(|(group, values)| !group.optional && values.is_empty());

        if let Some((group, _)) = missing {
            return Err(InputError::Missing {
                name: group.name().into(),
                has_aliases: group.aliases.len() > 1,
            }
            .into());
        }

        Ok(())
    }

    fn check_positionals(&self, input: &ParsedInput) -> Result<()> {
        let given = input.positionals.len();
        let mandatory = self.positionals.iter().filter(|p| !p.optional).count();

        if given < mandatory {
            return Err(InputError::NotEnoughPositional.into());
        }

        if !self.variadic && given > self.positionals.len() {
            return Err(InputError::TooManyPositional.into());
        }

        Ok(())
    }

    fn bind(&self, input: &ParsedInput, seen: &[Vec<Option<&str>>]) -> Result<Matches> {
        let mut entries = Vec::new();

        for decl in &self.order {
            let entry = match *decl {
                DeclRef::Positional(i) => {
                    let positional = &self.positionals[i];
                    let value = input.positionals.get(i).map(|v| v.to_string());

                    Entry {
                        names: vec![positional.name.clone()],
                        binding: Binding::Text(value),
                    }
                }
                DeclRef::Group(i) => {
                    let group = &self.groups[i];

                    Entry {
                        names: group.aliases.clone(),
                        binding: Binding::from_group(group, &seen[i])?,
                    }
                }
            };

            grow(&mut entries, entry)?;
        }

        let trailing = if self.variadic {
            let mut trailing = Vec::new();

            for value in input.positionals.iter().skip(self.positionals.len()) {
                grow(&mut trailing, value.to_string())?;
            }

            Some(trailing)
        } else {
            None
        };

        debug!("bound {} declarations, trailing: {:?}", entries.len(), trailing);

        Ok(Matches { entries, trailing })
    }
}

/// Get all command-line arguments specified to the program, including
/// the program name (which [Schema::matches()] skips).
pub fn get_args() -> Vec<String> {
    env::args().collect()
}

/// Compile `schema`, match `argv` against it and store the values in
/// `slots`.
///
/// The slots are checked against the schema before `argv` is examined, so
/// a wrong set of slots is reported even for a valid command-line. On error
/// no slot is modified.
///
/// # Arguments
///
/// - `argv`: the full command-line, program name first (see [get_args()]).
/// - `schema`: the schema string, for example `"[-v] -o|--output=file input ..."`.
/// - `slots`: one [Slot] per declaration in schema order, plus one
///   [Slot::List] if the schema ends with `...`.
pub fn parse<S: AsRef<str>>(argv: &[S], schema: &str, slots: &mut [Slot<'_>]) -> Result<()> {
    let schema = Schema::new(schema)?;

    schema.check_slots(slots)?;

    schema.matches(argv)?.bind(slots)
}

/// Simplest interface to the parser: [parse()] the program's own
/// command-line.
pub fn parse_env(schema: &str, slots: &mut [Slot<'_>]) -> Result<()> {
    parse(&get_args(), schema, slots)
}

/// Builds a usage statement for a [Schema].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Usage {
    name: String,
    summary: String,
    notes: String,
}

impl Usage {
    /// Create a usage statement for the named program.
    ///
    /// If `name` is empty, the program name is taken from the command-line.
    pub fn new(name: &str) -> Self {
        Usage::default().name(name)
    }

    fn name(self, name: &str) -> Self {
        Usage {
            name: name.into(),
            ..self
        }
    }

    /// Specify brief explanatory text for the program.
    pub fn summary(self, summary: &str) -> Self {
        Usage {
            summary: summary.into(),
            ..self
        }
    }

    /// Specify notes for the program.
    pub fn notes(self, notes: &str) -> Self {
        Usage {
            notes: notes.into(),
            ..self
        }
    }

    /// Generate the usage statement.
    pub fn render(&self, schema: &Schema) -> String {
        let name = if self.name.is_empty() {
            env::args().next().unwrap_or_default()
        } else {
            self.name.clone()
        };

        let mut lines = Vec::<String>::new();

        let line = format!("{} {} {}", USAGE_PREFIX, name, schema);
        lines.push(line.trim_end().into());

        if !self.summary.is_empty() {
            lines.push(format!("\n{}", self.summary.trim()));
        }

        if !self.notes.is_empty() {
            lines.push(format!("\nNOTES:\n\n{}", self.notes.trim()));
        }

        let mut final_lines = lines.join("\n");
        final_lines.push('\n');

        final_lines
    }
}
