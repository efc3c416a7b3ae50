//! Static argument declarations.
//!
//! Argument-bearing types describe themselves by implementing
//! [`ParsableArguments::fields`], returning their fields in declaration
//! order. Each field is one of three shapes:
//!
//! - [`FieldShape::Leaf`]: a flag, option or positional argument declared
//!   with an [`ArgumentDecl`] builder.
//! - [`FieldShape::Group`]: a nested argument-bearing type whose fields are
//!   flattened into the parent under this field's key.
//! - [`FieldShape::Opaque`]: plain data with no argument semantics.
//!
//! # Example
//!
//! ```
//! use command_info_parser::*;
//!
//! struct Globals;
//!
//! impl ParsableArguments for Globals {
//!     fn fields() -> Vec<FieldDecl> {
//!         vec![
//!             FieldDecl::leaf(
//!                 "verbose",
//!                 ArgumentDecl::flag()
//!                     .name(NameSpecification::short_and_long())
//!                     .help("Show extra output"),
//!             ),
//!             FieldDecl::opaque("cache"),
//!         ]
//!     }
//! }
//!
//! let fields = Globals::fields();
//! assert_eq!(fields.len(), 2);
//! assert!(matches!(fields[1].shape, FieldShape::Opaque));
//! ```

use command_info_core::ParsingStrategy;
use serde_json::Value;

use crate::definition::{
    ArgumentDefinition, ArgumentHelp, ArgumentSet, ArgumentVisibility, DefinitionKind,
    InitialValue, Update, ValueParser,
};
use crate::key::InputKey;
use crate::name::{Name, NameSpec, NameSpecification, to_kebab_case};

/// A type whose fields declare command-line arguments.
pub trait ParsableArguments {
    /// The type's fields, in declaration order.
    fn fields() -> Vec<FieldDecl>;
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Field name as declared, possibly carrying the storage prefix marker.
    pub name: &'static str,
    /// What the field declares.
    pub shape: FieldShape,
}

impl FieldDecl {
    /// A field declaring one argument.
    pub fn leaf(name: &'static str, decl: ArgumentDecl) -> Self {
        Self {
            name,
            shape: FieldShape::Leaf(decl),
        }
    }

    /// A field embedding the arguments of `T`.
    pub fn group<T: ParsableArguments>(name: &'static str) -> Self {
        Self {
            name,
            shape: FieldShape::Group(T::fields),
        }
    }

    /// A plain data field.
    pub fn opaque(name: &'static str) -> Self {
        Self {
            name,
            shape: FieldShape::Opaque,
        }
    }
}

/// Closed set of field shapes.
#[derive(Debug, Clone)]
pub enum FieldShape {
    /// One argument.
    Leaf(ArgumentDecl),
    /// Nested argument-bearing type, identified by its field registry.
    Group(fn() -> Vec<FieldDecl>),
    /// No argument semantics.
    Opaque,
}

/// How a boolean flag exposes its negative form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagInversion {
    /// `--name` / `--no-name`
    PrefixedNo,
    /// `--enable-name` / `--disable-name`
    PrefixedEnableDisable,
}

#[derive(Debug, Clone, PartialEq)]
enum DeclShape {
    Flag { inversion: Option<FlagInversion> },
    CountedFlag,
    EnumerableFlag { cases: Vec<String> },
    Option,
    Positional,
    DefaultOnly,
}

/// Builder for a single declared argument.
///
/// # Examples
///
/// ```
/// use command_info_parser::{ArgumentDecl, InputKey, NameSpecification};
///
/// let decl = ArgumentDecl::option::<String>()
///     .name(NameSpecification::short_and_long())
///     .help("Where to write the report")
///     .value_name("path");
///
/// let set = decl.argument_set(&InputKey::root("output"));
/// assert_eq!(set.len(), 1);
/// assert_eq!(decl.value_type(), "String");
/// ```
#[derive(Debug, Clone)]
pub struct ArgumentDecl {
    shape: DeclShape,
    value_type: String,
    names: NameSpecification,
    help: ArgumentHelp,
    parsing: ParsingStrategy,
    initial: InitialValue,
}

impl ArgumentDecl {
    fn new(shape: DeclShape, value_type: String) -> Self {
        Self {
            shape,
            value_type,
            names: NameSpecification::long(),
            help: ArgumentHelp::default(),
            parsing: ParsingStrategy::Default,
            initial: InitialValue::None,
        }
    }

    /// A boolean flag, `false` unless given.
    pub fn flag() -> Self {
        Self::new(DeclShape::Flag { inversion: None }, "bool".to_string())
            .default_value(false)
    }

    /// A flag counting its occurrences, starting at `0`.
    pub fn counted_flag() -> Self {
        Self::new(DeclShape::CountedFlag, "i64".to_string()).default_value(0)
    }

    /// A flag family with one `--case` flag per case of `T`.
    pub fn enumerable_flag<T>(cases: &[&str]) -> Self {
        Self::new(
            DeclShape::EnumerableFlag {
                cases: cases.iter().map(|c| c.to_string()).collect(),
            },
            short_type_name(std::any::type_name::<T>()),
        )
    }

    /// A named argument taking one value of type `T`.
    pub fn option<T>() -> Self {
        Self::new(DeclShape::Option, short_type_name(std::any::type_name::<T>()))
    }

    /// A positional argument of type `T`.
    pub fn argument<T>() -> Self {
        Self::new(
            DeclShape::Positional,
            short_type_name(std::any::type_name::<T>()),
        )
    }

    /// A property that is never read from input and only carries a default.
    pub fn default_only<T>(value: impl Into<Value>) -> Self {
        Self::new(
            DeclShape::DefaultOnly,
            short_type_name(std::any::type_name::<T>()),
        )
        .default_value(value)
    }

    /// Replaces the name specification.
    pub fn name(mut self, names: NameSpecification) -> Self {
        self.names = names;
        self
    }

    /// Appends name forms to the current specification.
    ///
    /// ```
    /// use command_info_parser::{ArgumentDecl, InputKey, NameSpec};
    ///
    /// let set = ArgumentDecl::flag()
    ///     .names([NameSpec::CustomShort('V')])
    ///     .argument_set(&InputKey::root("version"));
    /// let names: Vec<String> = set.first().unwrap().names().iter()
    ///     .map(|n| n.synopsis_string())
    ///     .collect();
    /// assert_eq!(names, vec!["--version", "-V"]);
    /// ```
    pub fn names(mut self, elements: impl IntoIterator<Item = NameSpec>) -> Self {
        for element in elements {
            self.names = self.names.with(element);
        }
        self
    }

    /// Sets the short help text.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help.abstract_ = text.into();
        self
    }

    /// Sets the long help text.
    pub fn discussion(mut self, text: impl Into<String>) -> Self {
        self.help.discussion = text.into();
        self
    }

    /// Sets the value placeholder.
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.help.value_name = name.into();
        self
    }

    /// Sets the parsing strategy.
    pub fn parsing(mut self, strategy: ParsingStrategy) -> Self {
        self.parsing = strategy;
        self
    }

    /// Sets a ready default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.initial = InitialValue::Value(value.into());
        self
    }

    /// Sets a textual default converted by `parser` when it is needed.
    pub fn default_text(mut self, text: impl Into<String>, parser: ValueParser) -> Self {
        self.initial = InitialValue::Parse {
            text: text.into(),
            parser,
        };
        self
    }

    /// Removes any default, making the argument required.
    pub fn required(mut self) -> Self {
        self.initial = InitialValue::None;
        self
    }

    /// Adds an inverted form to a boolean flag.
    ///
    /// An inverted flag has no implicit default; chain
    /// [`default_value`](Self::default_value) after this call to give one.
    pub fn inversion(mut self, inversion: FlagInversion) -> Self {
        if let DeclShape::Flag { .. } = self.shape {
            self.shape = DeclShape::Flag {
                inversion: Some(inversion),
            };
            self.initial = InitialValue::None;
        }
        self
    }

    /// Leaves the argument out of default help.
    pub fn hidden(mut self) -> Self {
        self.help.visibility = ArgumentVisibility::Hidden;
        self
    }

    /// Hides the argument everywhere.
    pub fn private(mut self) -> Self {
        self.help.visibility = ArgumentVisibility::Private;
        self
    }

    /// Declared value type, without module paths.
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    /// Materialises the definitions this declaration contributes under `key`.
    ///
    /// # Panics
    ///
    /// Panics if a named declaration resolves to no names at all.
    pub fn argument_set(&self, key: &InputKey) -> ArgumentSet {
        let definitions = match &self.shape {
            DeclShape::Flag { inversion: None } | DeclShape::CountedFlag => {
                vec![self.named(key, self.names.make_names(key), Update::Nullary)]
            }
            DeclShape::Flag {
                inversion: Some(inversion),
            } => {
                let names = self.names.make_names(key);
                let (enabled, disabled) = inverted_names(key, &names, *inversion);
                vec![
                    self.named(key, enabled, Update::Nullary),
                    self.named(key, disabled, Update::Nullary),
                ]
            }
            DeclShape::EnumerableFlag { cases } => cases
                .iter()
                .map(|case| {
                    self.named(key, vec![Name::Long(to_kebab_case(case))], Update::Nullary)
                })
                .collect(),
            DeclShape::Option => {
                vec![self.named(key, self.names.make_names(key), Update::Unary)]
            }
            DeclShape::Positional => vec![self.definition(
                key,
                DefinitionKind::Positional,
                Update::Unary,
            )],
            DeclShape::DefaultOnly => vec![self.definition(
                key,
                DefinitionKind::Default,
                Update::Nullary,
            )],
        };
        ArgumentSet::new(definitions)
    }

    fn named(&self, key: &InputKey, names: Vec<Name>, update: Update) -> ArgumentDefinition {
        self.definition(key, DefinitionKind::Named(names), update)
    }

    fn definition(
        &self,
        key: &InputKey,
        kind: DefinitionKind,
        update: Update,
    ) -> ArgumentDefinition {
        ArgumentDefinition::new(key.clone(), kind, update)
            .with_help(self.help.clone())
            .with_parsing_strategy(self.parsing)
            .with_initial(self.initial.clone())
    }
}

/// Splits a flag's names into its positive and negative forms.
///
/// Only multi-character names get an inverted form; short names stay on the
/// positive side. A flag with short names only gets its negative long form
/// from the key (`-q` pairs with `--no-quiet`).
fn inverted_names(
    key: &InputKey,
    names: &[Name],
    inversion: FlagInversion,
) -> (Vec<Name>, Vec<Name>) {
    let (on, off) = match inversion {
        FlagInversion::PrefixedNo => ("", "no-"),
        FlagInversion::PrefixedEnableDisable => ("enable-", "disable-"),
    };

    let mut enabled = Vec::with_capacity(names.len());
    let mut disabled = Vec::with_capacity(names.len());
    for name in names {
        match name {
            Name::Long(n) => {
                enabled.push(Name::Long(format!("{on}{n}")));
                disabled.push(Name::Long(format!("{off}{n}")));
            }
            Name::LongWithSingleDash(n) => {
                enabled.push(Name::LongWithSingleDash(format!("{on}{n}")));
                disabled.push(Name::LongWithSingleDash(format!("{off}{n}")));
            }
            Name::Short(_) => enabled.push(name.clone()),
        }
    }
    if disabled.is_empty() && !enabled.is_empty() {
        disabled.push(Name::Long(format!("{off}{}", to_kebab_case(key.name()))));
    }
    (enabled, disabled)
}

/// Drops module paths from a [`std::any::type_name`] string, keeping
/// generic structure.
///
/// ```
/// use command_info_parser::short_type_name;
///
/// assert_eq!(short_type_name("alloc::string::String"), "String");
/// assert_eq!(
///     short_type_name("core::option::Option<alloc::vec::Vec<std::path::PathBuf>>"),
///     "Option<Vec<PathBuf>>"
/// );
/// assert_eq!(short_type_name("(i32, &str)"), "(i32, &str)");
/// ```
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
        } else {
            out.push(c);
            if !(c.is_alphanumeric() || c == '_') {
                segment_start = out.len();
            }
        }
    }
    out
}
