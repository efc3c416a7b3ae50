//! Command registration.
//!
//! A command is an argument-bearing type that also exposes a
//! [`CommandConfiguration`]: its invocation name, help text and declared
//! sub-commands. Sub-commands are referenced through type-erased
//! [`CommandDescriptor`]s so a configuration can list heterogeneous command
//! types.

use crate::declaration::{FieldDecl, ParsableArguments};
use crate::name::to_kebab_case;

/// An argument-bearing type that can be invoked as a command.
pub trait ParsableCommand: ParsableArguments {
    /// Static configuration of this command.
    fn configuration() -> CommandConfiguration {
        CommandConfiguration::default()
    }
}

/// Static, declaration-time configuration of a command.
///
/// # Examples
///
/// ```
/// use command_info_parser::*;
///
/// struct Add;
/// impl ParsableArguments for Add {
///     fn fields() -> Vec<FieldDecl> { Vec::new() }
/// }
/// impl ParsableCommand for Add {}
///
/// let config = CommandConfiguration::new()
///     .command_name("remote")
///     .with_abstract("Manage remotes")
///     .subcommand::<Add>();
///
/// assert_eq!(config.subcommands.len(), 1);
/// assert_eq!(config.subcommands[0].command_name(), "add");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandConfiguration {
    /// Invocation name; derived from the type name when absent.
    pub command_name: Option<String>,
    /// Name of an external tool this command is installed under.
    pub super_command_name: Option<String>,
    /// Alternative invocation names.
    pub aliases: Vec<String>,
    /// Short help text.
    pub abstract_: String,
    /// Long help text.
    pub discussion: String,
    /// Child commands in declaration order.
    pub subcommands: Vec<CommandDescriptor>,
}

impl CommandConfiguration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the invocation name.
    pub fn command_name(mut self, name: impl Into<String>) -> Self {
        self.command_name = Some(name.into());
        self
    }

    /// Sets the external super-command name.
    pub fn super_command_name(mut self, name: impl Into<String>) -> Self {
        self.super_command_name = Some(name.into());
        self
    }

    /// Adds an alternative invocation name.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    /// Sets the short help text.
    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_ = text.into();
        self
    }

    /// Sets the long help text.
    pub fn with_discussion(mut self, text: impl Into<String>) -> Self {
        self.discussion = text.into();
        self
    }

    /// Appends a sub-command.
    pub fn subcommand<T: ParsableCommand>(mut self) -> Self {
        self.subcommands.push(CommandDescriptor::of::<T>());
        self
    }
}

/// Type-erased handle to a [`ParsableCommand`].
#[derive(Debug, Clone, Copy)]
pub struct CommandDescriptor {
    type_name: &'static str,
    fields: fn() -> Vec<FieldDecl>,
    configuration: fn() -> CommandConfiguration,
}

impl CommandDescriptor {
    /// Creates the descriptor for `T`.
    pub fn of<T: ParsableCommand>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            fields: T::fields,
            configuration: T::configuration,
        }
    }

    /// Full type name of the command.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The command's own declared fields.
    pub fn fields(&self) -> Vec<FieldDecl> {
        (self.fields)()
    }

    /// The command's configuration.
    pub fn configuration(&self) -> CommandConfiguration {
        (self.configuration)()
    }

    /// Configured invocation name, or the kebab-cased type name
    /// (`RemoteAdd` → `remote-add`).
    pub fn command_name(&self) -> String {
        self.configuration()
            .command_name
            .unwrap_or_else(|| default_command_name(self.type_name))
    }
}

fn default_command_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let last = base.rsplit("::").next().unwrap_or(base);
    to_kebab_case(last)
}
