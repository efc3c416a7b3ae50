//! Command info builder.

use command_info_core::{CommandInfo, normalized_text};
use command_info_parser::{CommandDescriptor, ParsableCommand};
use tracing::debug;

use crate::walker::metadata_for_fields;

/// Builds the tree rooted at `T`, with no ancestors.
pub fn command_info_for<T: ParsableCommand>() -> CommandInfo {
    command_info(&[CommandDescriptor::of::<T>()])
}

/// Builds the [`CommandInfo`] tree rooted at the last command of `stack`.
///
/// `stack` runs from the outermost command to the target. Ancestors only
/// contribute their names to `super_commands` (preceded by the root's
/// declared super-command name, if any); their arguments are not repeated.
///
/// # Panics
///
/// Panics if `stack` is empty, or if a command is declared as its own
/// descendant.
pub fn command_info(stack: &[CommandDescriptor]) -> CommandInfo {
    let Some((target, ancestors)) = stack.split_last() else {
        panic!("command stack must contain at least one command");
    };
    if let Some(ancestor) = ancestors
        .iter()
        .find(|a| a.type_name() == target.type_name())
    {
        panic!(
            "command `{}` is declared as its own subcommand",
            ancestor.type_name()
        );
    }

    let configuration = target.configuration();
    let command_name = target.command_name();
    debug!(command = %command_name, depth = stack.len(), "Building command info");

    let mut super_commands: Vec<String> = ancestors
        .iter()
        .map(CommandDescriptor::command_name)
        .collect();
    if let Some(super_name) = stack
        .first()
        .and_then(|root| root.configuration().super_command_name)
    {
        super_commands.insert(0, super_name);
    }

    let subcommands = configuration
        .subcommands
        .iter()
        .map(|sub| {
            let mut extended = stack.to_vec();
            extended.push(*sub);
            command_info(&extended)
        })
        .collect();

    CommandInfo {
        super_commands,
        command_name,
        aliases: configuration.aliases,
        abstract_: normalized_text(&configuration.abstract_),
        discussion: normalized_text(&configuration.discussion),
        subcommands,
        arguments: metadata_for_fields(&target.fields(), None),
    }
}
