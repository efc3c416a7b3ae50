//! Argument definitions and argument-sets.
//!
//! An [`ArgumentDefinition`] is one atomic rule for recognising a value or a
//! flag. Each declared property contributes an [`ArgumentSet`] of them,
//! usually a single definition, sometimes a small family (an inversion pair,
//! one definition per case of an enumerable flag).

use command_info_core::ParsingStrategy;
use serde_json::Value;

use crate::error::{ParseError, Result};
use crate::key::{InputKey, InputOrigin, InputOriginElement, ParsedValues};
use crate::name::Name;

/// Name style of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionKind {
    /// Recognised by one of these names.
    Named(Vec<Name>),
    /// Recognised by position.
    Positional,
    /// Never recognised from input; only supplies a default.
    Default,
}

/// How many tokens one occurrence consumes after the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// No value follows (`--verbose`).
    Nullary,
    /// One value follows (`--output path`).
    Unary,
}

/// Help visibility of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentVisibility {
    /// Shown in help.
    #[default]
    Default,
    /// Left out of the default help but still documented.
    Hidden,
    /// Never shown anywhere.
    Private,
}

/// Help attributes attached to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentHelp {
    /// Short help text.
    pub abstract_: String,
    /// Long help text.
    pub discussion: String,
    /// Value placeholder.
    pub value_name: String,
    /// Help visibility.
    pub visibility: ArgumentVisibility,
}

impl ArgumentHelp {
    /// Help with only a short text.
    pub fn new(abstract_: impl Into<String>) -> Self {
        Self {
            abstract_: abstract_.into(),
            ..Default::default()
        }
    }
}

/// Converts default text into a value.
pub type ValueParser = fn(&str) -> std::result::Result<Value, String>;

/// What a definition contributes when the input does not mention it.
#[derive(Debug, Clone, Default)]
pub enum InitialValue {
    /// Nothing; the argument must be supplied.
    #[default]
    None,
    /// A ready value.
    Value(Value),
    /// Text that the declared parser converts on demand.
    Parse {
        /// Default text as declared.
        text: String,
        /// Converter for the property's value type.
        parser: ValueParser,
    },
}

/// One atomic argument rule.
#[derive(Debug, Clone)]
pub struct ArgumentDefinition {
    /// Name style.
    pub kind: DefinitionKind,
    /// Arity of one occurrence.
    pub update: Update,
    /// Help attributes.
    pub help: ArgumentHelp,
    /// Token consumption strategy.
    pub parsing_strategy: ParsingStrategy,
    /// Key the parsed value is stored under.
    pub key: InputKey,
    initial: InitialValue,
}

impl ArgumentDefinition {
    /// Creates a definition with default help, strategy and no initial value.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is [`DefinitionKind::Named`] with an empty name list;
    /// a named argument must be reachable by at least one name.
    pub fn new(key: InputKey, kind: DefinitionKind, update: Update) -> Self {
        if let DefinitionKind::Named(names) = &kind {
            assert!(
                !names.is_empty(),
                "named argument `{}` must declare at least one name",
                key.full_path_string()
            );
        }
        Self {
            kind,
            update,
            help: ArgumentHelp::default(),
            parsing_strategy: ParsingStrategy::Default,
            key,
            initial: InitialValue::None,
        }
    }

    /// Sets the help attributes.
    pub fn with_help(mut self, help: ArgumentHelp) -> Self {
        self.help = help;
        self
    }

    /// Sets the parsing strategy.
    pub fn with_parsing_strategy(mut self, strategy: ParsingStrategy) -> Self {
        self.parsing_strategy = strategy;
        self
    }

    /// Sets the initial value.
    pub fn with_initial(mut self, initial: InitialValue) -> Self {
        self.initial = initial;
        self
    }

    /// Names of a named definition; empty otherwise.
    pub fn names(&self) -> &[Name] {
        match &self.kind {
            DefinitionKind::Named(names) => names,
            DefinitionKind::Positional | DefinitionKind::Default => &[],
        }
    }

    /// Returns `true` if recognised by name.
    pub fn is_named(&self) -> bool {
        matches!(self.kind, DefinitionKind::Named(_))
    }

    /// Returns `true` if recognised by position.
    pub fn is_positional(&self) -> bool {
        matches!(self.kind, DefinitionKind::Positional)
    }

    /// Returns `true` if the definition can be shown to a user: it is read
    /// from input (named or positional) and not private.
    pub fn is_classifiable(&self) -> bool {
        !matches!(self.kind, DefinitionKind::Default)
            && self.help.visibility != ArgumentVisibility::Private
    }

    /// Returns `true` if the definition consumes no value.
    pub fn is_nullary(&self) -> bool {
        self.update == Update::Nullary
    }

    /// First non-short name, falling back to the first name.
    pub fn preferred_name_for_synopsis(&self) -> Option<&Name> {
        let names = self.names();
        names.iter().find(|n| !n.is_short()).or_else(|| names.first())
    }

    /// Applies the definition's defaulting logic to `values`.
    ///
    /// Stores the initial value under [`key`](Self::key) when there is one;
    /// stores nothing when the argument has no default.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidDefault`] when textual default cannot be
    /// converted by the declared parser.
    pub fn apply_initial(&self, origin: &InputOrigin, values: &mut ParsedValues) -> Result<()> {
        let value = match &self.initial {
            InitialValue::None => return Ok(()),
            InitialValue::Value(value) => value.clone(),
            InitialValue::Parse { text, parser } => {
                parser(text).map_err(|reason| ParseError::InvalidDefault {
                    key: self.key.full_path_string(),
                    text: text.clone(),
                    reason,
                })?
            }
        };

        let mut origin = origin.clone();
        origin.insert(InputOriginElement::DefaultValue);
        values.set(&self.key, value, origin);
        Ok(())
    }
}

/// Definitions contributed by one declared property.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSet {
    definitions: Vec<ArgumentDefinition>,
}

impl ArgumentSet {
    /// Creates a set from definitions in order.
    pub fn new(definitions: Vec<ArgumentDefinition>) -> Self {
        Self { definitions }
    }

    /// Iterates the definitions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ArgumentDefinition> {
        self.definitions.iter()
    }

    /// First definition.
    pub fn first(&self) -> Option<&ArgumentDefinition> {
        self.definitions.first()
    }

    /// Classifiable definitions in order.
    ///
    /// See [`ArgumentDefinition::is_classifiable`].
    pub fn classifiable(&self) -> impl Iterator<Item = &ArgumentDefinition> {
        self.definitions.iter().filter(|d| d.is_classifiable())
    }

    /// First classifiable definition; it describes the whole set.
    pub fn first_classifiable(&self) -> Option<&ArgumentDefinition> {
        self.classifiable().next()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the set holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArgumentSet {
    type Item = &'a ArgumentDefinition;
    type IntoIter = std::slice::Iter<'a, ArgumentDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
