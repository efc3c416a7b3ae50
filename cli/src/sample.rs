//! Built-in sample command hierarchy.
//!
//! A small package-manager-like tool declared with the static registration
//! model. `command-info` exports its metadata so UI and documentation
//! generators have a realistic tree to develop against.

use command_info_parser::{
    ArgumentDecl, CommandConfiguration, FieldDecl, FlagInversion, NameSpec, NameSpecification,
    ParsableArguments, ParsableCommand, ParsingStrategy,
};
use serde_json::Value;

/// Root command of the sample tool.
pub struct Pkg;

impl ParsableArguments for Pkg {
    fn fields() -> Vec<FieldDecl> {
        vec![
            FieldDecl::group::<GlobalOptions>("_globals"),
            FieldDecl::leaf(
                "version",
                ArgumentDecl::flag()
                    .names([NameSpec::CustomShort('V')])
                    .help("Print the version and exit"),
            ),
        ]
    }
}

impl ParsableCommand for Pkg {
    fn configuration() -> CommandConfiguration {
        CommandConfiguration::new()
            .command_name("pkg")
            .with_abstract("A tiny package manager")
            .with_discussion("Installs, removes and tracks packages from configured remotes.")
            .subcommand::<Install>()
            .subcommand::<Remove>()
            .subcommand::<Remote>()
    }
}

struct GlobalOptions;

impl ParsableArguments for GlobalOptions {
    fn fields() -> Vec<FieldDecl> {
        vec![
            FieldDecl::leaf(
                "verbose",
                ArgumentDecl::counted_flag()
                    .name(NameSpecification::short_and_long())
                    .help("Increase output verbosity"),
            ),
            FieldDecl::leaf(
                "color",
                ArgumentDecl::flag()
                    .inversion(FlagInversion::PrefixedNo)
                    .default_value(true)
                    .help("Colorize output"),
            ),
            FieldDecl::leaf(
                "config",
                ArgumentDecl::option::<std::path::PathBuf>()
                    .name(NameSpecification::long().with(NameSpec::CustomShort('C')))
                    .value_name("path")
                    .help("Configuration file"),
            ),
            FieldDecl::leaf(
                "trace_io",
                ArgumentDecl::flag().hidden().help("Trace file system access"),
            ),
            FieldDecl::opaque("loaded_at"),
        ]
    }
}

struct Install;

impl ParsableArguments for Install {
    fn fields() -> Vec<FieldDecl> {
        vec![
            FieldDecl::leaf(
                "packages",
                ArgumentDecl::argument::<Vec<String>>()
                    .value_name("package")
                    .help("Packages to install")
                    .parsing(ParsingStrategy::UpToNextOption),
            ),
            FieldDecl::leaf(
                "jobs",
                ArgumentDecl::option::<u32>()
                    .name(NameSpecification::short_and_long())
                    .default_text("4", parse_u32)
                    .help("Parallel downloads"),
            ),
            FieldDecl::leaf(
                "registry",
                ArgumentDecl::option::<String>()
                    .value_name("url")
                    .default_value("https://registry.example.org")
                    .help("Registry to install from"),
            ),
            FieldDecl::leaf(
                "mode",
                ArgumentDecl::enumerable_flag::<InstallMode>(&["online", "offline"])
                    .default_value("online")
                    .help("Network mode"),
            ),
            FieldDecl::leaf(
                "rpath",
                ArgumentDecl::option::<String>()
                    .name(NameSpecification::new(vec![NameSpec::LongSingleDash]))
                    .help("")
                    .discussion("Extra runtime search path passed to native builds."),
            ),
            FieldDecl::leaf(
                "build_args",
                ArgumentDecl::argument::<Vec<String>>()
                    .parsing(ParsingStrategy::PostTerminator)
                    .help("Arguments forwarded to build scripts"),
            ),
        ]
    }
}

impl ParsableCommand for Install {
    fn configuration() -> CommandConfiguration {
        CommandConfiguration::new().with_abstract("Install packages")
    }
}

/// Network mode cases for `pkg install`.
enum InstallMode {}

struct Remove;

impl ParsableArguments for Remove {
    fn fields() -> Vec<FieldDecl> {
        vec![
            FieldDecl::leaf(
                "packages",
                ArgumentDecl::argument::<Vec<String>>()
                    .value_name("package")
                    .help("Packages to remove"),
            ),
            FieldDecl::leaf(
                "purge",
                ArgumentDecl::flag().help("Also delete cached archives"),
            ),
        ]
    }
}

impl ParsableCommand for Remove {
    fn configuration() -> CommandConfiguration {
        CommandConfiguration::new()
            .command_name("rm")
            .alias("remove")
            .alias("uninstall")
            .with_abstract("Remove packages")
    }
}

struct Remote;

impl ParsableArguments for Remote {
    fn fields() -> Vec<FieldDecl> {
        Vec::new()
    }
}

impl ParsableCommand for Remote {
    fn configuration() -> CommandConfiguration {
        CommandConfiguration::new()
            .with_abstract("Manage package remotes")
            .subcommand::<RemoteAdd>()
            .subcommand::<RemoteList>()
    }
}

struct RemoteAdd;

impl ParsableArguments for RemoteAdd {
    fn fields() -> Vec<FieldDecl> {
        vec![
            FieldDecl::leaf("name", ArgumentDecl::argument::<String>().help("Remote name")),
            FieldDecl::leaf("url", ArgumentDecl::argument::<String>().help("Remote URL")),
            FieldDecl::leaf(
                "priority",
                ArgumentDecl::option::<i32>()
                    .default_value(0)
                    .parsing(ParsingStrategy::Unconditional)
                    .help("Lookup priority, may be negative"),
            ),
        ]
    }
}

impl ParsableCommand for RemoteAdd {
    fn configuration() -> CommandConfiguration {
        CommandConfiguration::new()
            .command_name("add")
            .with_abstract("Register a remote")
    }
}

struct RemoteList;

impl ParsableArguments for RemoteList {
    fn fields() -> Vec<FieldDecl> {
        vec![FieldDecl::leaf(
            "r#format",
            ArgumentDecl::option::<String>()
                .default_value("table")
                .parsing(ParsingStrategy::ScanningForValue)
                .help("Output format"),
        )]
    }
}

impl ParsableCommand for RemoteList {
    fn configuration() -> CommandConfiguration {
        CommandConfiguration::new()
            .command_name("ls")
            .alias("list")
            .with_abstract("List remotes")
    }
}

fn parse_u32(text: &str) -> Result<Value, String> {
    text.parse::<u32>()
        .map(Value::from)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use command_info_core::{ArgumentKind, validate_command_info};
    use command_info_metadata::command_info_for;

    use super::*;

    #[test]
    fn test_sample_tree_is_valid() {
        let tree = command_info_for::<Pkg>();
        assert!(validate_command_info(&tree).is_empty());
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_sample_root_arguments() {
        let tree = command_info_for::<Pkg>();
        let ids: Vec<&str> = tree.arguments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                ".globals.verbose",
                ".globals.color",
                ".globals.config",
                ".globals.trace_io",
                ".version",
            ]
        );
        assert!(tree.find_argument(".globals.trace_io").unwrap().is_hidden);
        assert!(tree.find_argument(".version").unwrap().matches("-V"));
    }

    #[test]
    fn test_sample_install_initial_values() {
        let tree = command_info_for::<Pkg>();
        let install = tree.find_subcommand("install").unwrap();

        assert_eq!(
            install.find_argument(".jobs").unwrap().initial_value,
            Some(Value::from(4))
        );
        assert_eq!(
            install.find_argument(".mode").unwrap().initial_value,
            Some(Value::from("online"))
        );
        assert_eq!(install.find_argument(".packages").unwrap().initial_value, None);
        let rpath = install.find_argument(".rpath").unwrap();
        assert_eq!(rpath.kind, ArgumentKind::Option);
        assert!(rpath.abstract_.is_none());
        assert!(rpath.matches("-rpath"));
    }

    #[test]
    fn test_sample_nested_remote_commands() {
        let tree = command_info_for::<Pkg>();
        let ls = tree.descendant(&["remote", "ls"]).unwrap();
        assert_eq!(ls.super_commands, vec!["pkg", "remote"]);
        assert_eq!(ls.aliases, vec!["list"]);
        assert_eq!(tree.descendant(&["remote", "list"]), Some(ls));
        assert_eq!(ls.arguments[0].id, ".format");
    }
}
