mod config;
mod error;
mod sample;

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use command_info_core::{MetadataPackage, validate_command_info, validate_package};
use command_info_metadata::{command_info, command_info_for};
use command_info_parser::CommandDescriptor;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{DumpConfig, OutputFormat};
use crate::error::{CliError, Result};
use crate::sample::Pkg;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "COMMAND_INFO_LOG";

#[derive(Debug, Parser)]
#[command(name = "command-info")]
#[command(about = "Export argument metadata and command trees from static declarations")]
struct Cli {
    /// YAML output configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log walker decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the command tree rooted at a command.
    Dump(DumpArgs),
    /// Print the flat argument list of a single command.
    Arguments(DumpArgs),
    /// Check the command tree for duplicate names and empty commands.
    Validate,
    /// Write the full tree as a versioned metadata package.
    Bundle(BundleArgs),
    /// Write a configuration file with default settings.
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct DumpArgs {
    /// Subcommand path below the root (e.g. `remote ls`).
    #[arg(long, num_args = 1..)]
    path: Vec<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Output format (overrides the configuration file).
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
    /// Leave out arguments marked hidden.
    #[arg(long)]
    no_hidden: bool,
    /// Leave out simulated initial values.
    #[arg(long)]
    no_initial_values: bool,
}

#[derive(Debug, Args)]
struct BundleArgs {
    /// Output JSON bundle path.
    #[arg(long)]
    output: PathBuf,
    /// Optional bundle name metadata.
    #[arg(long)]
    name: Option<String>,
    /// Optional bundle description metadata.
    #[arg(long)]
    description: Option<String>,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Where to write the configuration.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Command::Dump(args) => run_dump(args, config),
        Command::Arguments(args) => run_arguments(args, config),
        Command::Validate => run_validate(),
        Command::Bundle(args) => run_bundle(args, config),
        Command::InitConfig(args) => run_init_config(args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<DumpConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading output configuration");
            DumpConfig::load(path)
        }
        None => Ok(DumpConfig::default()),
    }
}

fn apply_overrides(mut config: DumpConfig, output: &OutputArgs) -> DumpConfig {
    if let Some(format) = output.format {
        config.format = format;
    }
    if output.compact {
        config.pretty = false;
    }
    if output.no_hidden {
        config.include_hidden = false;
    }
    if output.no_initial_values {
        config.include_initial_values = false;
    }
    config
}

/// Resolves a subcommand path to the command stack root…target.
fn resolve_stack(path: &[String]) -> Result<Vec<CommandDescriptor>> {
    let mut current = CommandDescriptor::of::<Pkg>();
    let mut stack = vec![current];

    for segment in path {
        let next = current
            .configuration()
            .subcommands
            .into_iter()
            .find(|sub| {
                sub.command_name() == *segment
                    || sub.configuration().aliases.iter().any(|a| a == segment)
            })
            .ok_or_else(|| CliError::UnknownSubcommand {
                name: segment.clone(),
                parent: stack
                    .iter()
                    .map(CommandDescriptor::command_name)
                    .collect::<Vec<_>>()
                    .join(" "),
            })?;
        stack.push(next);
        current = next;
    }

    Ok(stack)
}

fn print_rendered(rendered: &str) {
    println!("{}", rendered.trim_end());
}

fn run_dump(args: DumpArgs, config: DumpConfig) -> Result<()> {
    let config = apply_overrides(config, &args.output);
    let stack = resolve_stack(&args.path)?;

    let mut tree = command_info(&stack);
    config.filter_tree(&mut tree);
    print_rendered(&config.render(&tree)?);
    Ok(())
}

fn run_arguments(args: DumpArgs, config: DumpConfig) -> Result<()> {
    let config = apply_overrides(config, &args.output);
    let stack = resolve_stack(&args.path)?;

    let mut arguments = command_info(&stack).arguments;
    config.filter_arguments(&mut arguments);
    print_rendered(&config.render(&arguments)?);
    Ok(())
}

fn run_validate() -> Result<()> {
    let tree = command_info_for::<Pkg>();
    let errors = validate_command_info(&tree);
    for err in &errors {
        eprintln!("  {err}");
    }
    if !errors.is_empty() {
        return Err(CliError::ValidationFailed(errors.len()));
    }

    println!(
        "Validated {} command(s) under '{}'.",
        tree.node_count(),
        tree.command_name
    );
    Ok(())
}

fn run_bundle(args: BundleArgs, config: DumpConfig) -> Result<()> {
    let mut tree = command_info_for::<Pkg>();
    config.filter_tree(&mut tree);

    let mut package = MetadataPackage::new(PACKAGE_VERSION, Utc::now().to_rfc3339());
    package.name = args.name;
    package.description = args.description;
    package.commands.push(tree);
    package.seal()?;

    let errors = validate_package(&package);
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  {err}");
        }
        return Err(CliError::ValidationFailed(errors.len()));
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, serde_json::to_string_pretty(&package)?)?;

    info!(path = %args.output.display(), "Wrote metadata package");
    println!(
        "Bundled {} command tree(s) into '{}'.",
        package.command_count(),
        args.output.display()
    );
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<()> {
    DumpConfig::default().save(&args.output)?;
    println!("Wrote default configuration to '{}'.", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_stack_follows_path() {
        let stack = resolve_stack(&["remote".to_string(), "add".to_string()]).unwrap();
        let names: Vec<String> = stack.iter().map(CommandDescriptor::command_name).collect();
        assert_eq!(names, vec!["pkg", "remote", "add"]);
    }

    #[test]
    fn test_resolve_stack_accepts_aliases() {
        let stack = resolve_stack(&["remote".to_string(), "list".to_string()]).unwrap();
        let names: Vec<String> = stack.iter().map(CommandDescriptor::command_name).collect();
        assert_eq!(names, vec!["pkg", "remote", "ls"]);
    }

    #[test]
    fn test_resolve_stack_reports_unknown_segment() {
        let err = resolve_stack(&["remote".to_string(), "rename".to_string()]).unwrap_err();
        match err {
            CliError::UnknownSubcommand { name, parent } => {
                assert_eq!(name, "rename");
                assert_eq!(parent, "pkg remote");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        let output = OutputArgs {
            format: Some(OutputFormat::Yaml),
            compact: true,
            no_hidden: true,
            no_initial_values: false,
        };
        let config = apply_overrides(DumpConfig::default(), &output);
        assert_eq!(config.format, OutputFormat::Yaml);
        assert!(!config.pretty);
        assert!(!config.include_hidden);
        assert!(config.include_initial_values);
    }
}
