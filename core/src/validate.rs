//! Command tree and package validation.
//!
//! The metadata walker never fails on a malformed declaration that is still
//! walkable; these checks let a consumer find structural problems in a
//! produced tree (duplicate argument names, clashing sub-command names or
//! aliases, empty names) before rendering it.
//!
//! # Examples
//!
//! ```
//! use command_info_core::*;
//!
//! let mut info = CommandInfo::new("tool");
//! info.arguments.push(
//!     PropertyMetadata::new(".verbose", ArgumentKind::Flag)
//!         .with_names(vec![ArgumentNameInfo::long("verbose")]),
//! );
//! assert!(validate_command_info(&info).is_empty());
//!
//! // Two properties claiming `--verbose`
//! info.arguments.push(
//!     PropertyMetadata::new(".loud", ArgumentKind::Flag)
//!         .with_names(vec![ArgumentNameInfo::long("verbose")]),
//! );
//! assert!(!validate_command_info(&info).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandInfo, MetadataPackage, PropertyMetadata};

/// Command tree validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Package version string is empty.
    #[error("package version cannot be empty")]
    EmptyPackageVersion,
    /// Two roots in the same package share a command name.
    #[error("duplicate command in package: {0}")]
    DuplicateCommand(String),
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty (under `{0}`)")]
    EmptyCommandName(String),
    /// Two arguments of one command share a name form.
    #[error("duplicate argument name `{name}` in command `{command}`")]
    DuplicateArgumentName {
        /// Space-joined command path.
        command: String,
        /// Prefixed argument name, e.g. `--verbose`.
        name: String,
    },
    /// Two arguments of one command share a property id.
    #[error("duplicate property id `{id}` in command `{command}`")]
    DuplicateArgumentId {
        /// Space-joined command path.
        command: String,
        /// Leading-dot property id.
        id: String,
    },
    /// Two sub-commands in the same scope answer to the same name or alias.
    #[error("duplicate subcommand in scope: {0}")]
    DuplicateSubcommand(String),
}

/// Validates a full metadata package.
///
/// Checks for an empty version string, duplicate root command names, and
/// validates each tree individually.
pub fn validate_package(package: &MetadataPackage) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if package.version.trim().is_empty() {
        errors.push(ValidationError::EmptyPackageVersion);
        return errors;
    }

    let mut seen_commands: HashSet<&str> = HashSet::new();
    for info in &package.commands {
        let command = info.command_name.as_str();
        if !seen_commands.insert(command) {
            errors.push(ValidationError::DuplicateCommand(command.to_string()));
            return errors;
        }
        errors.extend(validate_command_info(info));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates a command tree.
///
/// Stops at the first problem found, walking the tree depth-first in
/// declaration order.
pub fn validate_command_info(info: &CommandInfo) -> Vec<ValidationError> {
    let mut path: Vec<String> = info.super_commands.clone();
    validate_node(info, &mut path)
}

fn validate_node(info: &CommandInfo, path: &mut Vec<String>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = info.command_name.trim();
    if name.is_empty() {
        errors.push(ValidationError::EmptyCommandName(path.join(" ")));
        return errors;
    }

    path.push(name.to_string());
    errors.extend(validate_arguments(&info.arguments, &path.join(" ")));
    if !errors.is_empty() {
        path.pop();
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in &info.subcommands {
        let clash = std::iter::once(sub.command_name.as_str())
            .chain(sub.aliases.iter().map(String::as_str))
            .find(|invocation| !seen.insert(*invocation));
        if let Some(invocation) = clash {
            errors.push(ValidationError::DuplicateSubcommand(invocation.to_string()));
            break;
        }
        errors.extend(validate_node(sub, path));
        if !errors.is_empty() {
            break;
        }
    }
    path.pop();

    errors
}

fn validate_arguments(arguments: &[PropertyMetadata], command: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for argument in arguments {
        if !seen_ids.insert(argument.id.as_str()) {
            errors.push(ValidationError::DuplicateArgumentId {
                command: command.to_string(),
                id: argument.id.clone(),
            });
            return errors;
        }

        // An inversion pair may repeat a form inside one property.
        let own: HashSet<String> = argument
            .names
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        for name in own {
            if !seen_names.insert(name.clone()) {
                errors.push(ValidationError::DuplicateArgumentName {
                    command: command.to_string(),
                    name,
                });
                return errors;
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::{ArgumentKind, ArgumentNameInfo};

    use super::*;

    fn flag(id: &str, long: &str) -> PropertyMetadata {
        PropertyMetadata::new(id, ArgumentKind::Flag)
            .with_names(vec![ArgumentNameInfo::long(long)])
    }

    #[test]
    fn test_validate_package_rejects_duplicate_commands() {
        let mut package = MetadataPackage::new("1.0.0", "2026-02-07T00:00:00Z");
        package.commands.push(CommandInfo::new("tool"));
        package.commands.push(CommandInfo::new("tool"));

        let errors = validate_package(&package);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateCommand("tool".to_string())]
        );
    }

    #[test]
    fn test_validate_package_rejects_empty_version() {
        let package = MetadataPackage::new(" ", "2026-02-07T00:00:00Z");
        assert_eq!(
            validate_package(&package),
            vec![ValidationError::EmptyPackageVersion]
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_argument_name() {
        let mut info = CommandInfo::new("tool");
        info.super_commands = vec!["suite".to_string()];
        info.arguments.push(flag(".verbose", "verbose"));
        info.arguments.push(flag(".loud", "verbose"));

        assert_eq!(
            validate_command_info(&info),
            vec![ValidationError::DuplicateArgumentName {
                command: "suite tool".to_string(),
                name: "--verbose".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_allows_repeated_name_within_one_property() {
        let mut info = CommandInfo::new("tool");
        info.arguments.push(
            PropertyMetadata::new(".color", ArgumentKind::Flag).with_names(vec![
                ArgumentNameInfo::long("color"),
                ArgumentNameInfo::long("color"),
            ]),
        );

        assert!(validate_command_info(&info).is_empty());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut info = CommandInfo::new("tool");
        info.arguments
            .push(PropertyMetadata::new(".path", ArgumentKind::Positional));
        info.arguments
            .push(PropertyMetadata::new(".path", ArgumentKind::Positional));

        assert!(matches!(
            validate_command_info(&info).as_slice(),
            [ValidationError::DuplicateArgumentId { .. }]
        ));
    }

    #[test]
    fn test_validate_accepts_subcommand_named_like_ancestor() {
        let mut root = CommandInfo::new("tool");
        root.super_commands = vec!["tool".to_string()];
        let mut nested = CommandInfo::new("tool");
        nested.super_commands = vec!["tool".to_string(), "tool".to_string()];
        root.subcommands.push(nested);

        assert!(validate_command_info(&root).is_empty());
    }

    #[test]
    fn test_validate_rejects_alias_clashing_with_sibling() {
        let mut root = CommandInfo::new("tool");
        root.subcommands.push(CommandInfo::new("list"));
        let mut show = CommandInfo::new("show");
        show.aliases = vec!["list".to_string()];
        root.subcommands.push(show);

        assert_eq!(
            validate_command_info(&root),
            vec![ValidationError::DuplicateSubcommand("list".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_subcommands_and_empty_names() {
        let mut root = CommandInfo::new("tool");
        root.subcommands.push(CommandInfo::new("run"));
        root.subcommands.push(CommandInfo::new("run"));
        assert_eq!(
            validate_command_info(&root),
            vec![ValidationError::DuplicateSubcommand("run".to_string())]
        );

        let mut root = CommandInfo::new("tool");
        root.subcommands.push(CommandInfo::new(""));
        assert_eq!(
            validate_command_info(&root),
            vec![ValidationError::EmptyCommandName("tool".to_string())]
        );
    }

    #[test]
    fn test_validate_accepts_valid_tree() {
        let mut root = CommandInfo::new("tool");
        root.arguments.push(flag(".verbose", "verbose"));
        let mut run = CommandInfo::new("run");
        run.arguments.push(flag(".verbose", "verbose"));
        root.subcommands.push(run);

        assert!(validate_command_info(&root).is_empty());
    }
}
