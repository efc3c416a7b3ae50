//! Metadata type definitions for command structure snapshots.
//!
//! Everything in this module is a pure, immutable snapshot derived from a
//! command's static declaration. The types serialize with [`serde`] using the
//! camelCase field names existing consumers expect (`preferredName`,
//! `superCommands`, `initialValue`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version of the metadata contract (semver).
///
/// Embedded in every [`MetadataPackage`](crate::MetadataPackage) to track
/// compatibility between producers and consumers.
pub const METADATA_CONTRACT_VERSION: &str = "1.0.0";

/// Prefix style of a declared argument name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameKind {
    /// `--name`
    Long,
    /// `-n`
    Short,
    /// `-name`
    LongSingleDash,
}

/// One declared name form of an argument.
///
/// # Examples
///
/// ```
/// use command_info_core::{ArgumentNameInfo, NameKind};
///
/// let long = ArgumentNameInfo::long("verbose");
/// assert_eq!(long.kind, NameKind::Long);
/// assert_eq!(long.to_string(), "--verbose");
///
/// assert_eq!(ArgumentNameInfo::short('v').to_string(), "-v");
/// assert_eq!(ArgumentNameInfo::long_single_dash("rpath").to_string(), "-rpath");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgumentNameInfo {
    /// Prefix style.
    pub kind: NameKind,
    /// Name without its prefix (a single character for [`NameKind::Short`]).
    pub name: String,
}

impl ArgumentNameInfo {
    /// Creates a `--name` form.
    pub fn long(name: impl Into<String>) -> Self {
        Self {
            kind: NameKind::Long,
            name: name.into(),
        }
    }

    /// Creates a `-n` form.
    pub fn short(name: char) -> Self {
        Self {
            kind: NameKind::Short,
            name: name.to_string(),
        }
    }

    /// Creates a `-name` form.
    pub fn long_single_dash(name: impl Into<String>) -> Self {
        Self {
            kind: NameKind::LongSingleDash,
            name: name.into(),
        }
    }
}

impl fmt::Display for ArgumentNameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NameKind::Long => write!(f, "--{}", self.name),
            NameKind::Short | NameKind::LongSingleDash => write!(f, "-{}", self.name),
        }
    }
}

/// How an argument is supplied on the command line.
///
/// Derived from the underlying definition's name style crossed with its
/// update arity; never declared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArgumentKind {
    /// Bare value, no prefix.
    Positional,
    /// `--name value`, exactly one value per occurrence.
    Option,
    /// `--name` with no value; presence toggles or increments.
    Flag,
}

/// How an argument consumes tokens during real parsing.
///
/// The order of the variants is significant and matches the order used by
/// the declaration model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum ParsingStrategy {
    /// Take the very next token, failing if it looks like another option.
    #[default]
    Default,
    /// Scan forward for the first token that does not look like an option.
    ScanningForValue,
    /// Take the next token regardless of its shape.
    Unconditional,
    /// Consume tokens until the next option-looking token.
    UpToNextOption,
    /// Consume everything that remains.
    AllRemainingInput,
    /// Consume the tokens after a `--` terminator.
    PostTerminator,
    /// Collect every token no other argument claimed.
    AllUnrecognized,
}

/// One resolved, displayable argument of a command.
///
/// Constructed by the metadata walker for every declared property whose
/// argument-set yields a classifiable definition. Empty help strings are
/// normalised to `None` by the `with_*` builders.
///
/// # Examples
///
/// ```
/// use command_info_core::{ArgumentKind, ArgumentNameInfo, PropertyMetadata};
///
/// let output = PropertyMetadata::new(".output", ArgumentKind::Option)
///     .with_names(vec![ArgumentNameInfo::short('o'), ArgumentNameInfo::long("output")])
///     .with_preferred_name(ArgumentNameInfo::long("output"))
///     .with_value_name("path")
///     .with_abstract("");
///
/// assert!(output.abstract_.is_none());
/// assert_eq!(output.value_name.as_deref(), Some("path"));
/// assert!(output.matches("-o"));
/// assert!(output.matches("--output"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadata {
    /// Dot-joined key path from the command root, with a leading dot
    /// (`.group.verbose`).
    pub id: String,
    /// Flag / option / positional classification.
    pub kind: ArgumentKind,
    /// Every name form the argument is known by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<ArgumentNameInfo>>,
    /// Name used when referencing the argument in generated text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<ArgumentNameInfo>,
    /// Value placeholder, e.g. `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    /// Short help text.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<String>,
    /// Long help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion: Option<String>,
    /// Token consumption strategy.
    #[serde(default)]
    pub parsing_strategy: ParsingStrategy,
    /// Value the argument takes when nothing is supplied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
    /// Declared value type of the property.
    #[serde(rename = "type")]
    pub value_type: String,
    /// Hidden from default help output.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_hidden: bool,
}

impl PropertyMetadata {
    /// Creates a record with only an id and a kind.
    pub fn new(id: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            id: id.into(),
            kind,
            names: None,
            preferred_name: None,
            value_name: None,
            abstract_: None,
            discussion: None,
            parsing_strategy: ParsingStrategy::Default,
            initial_value: None,
            value_type: String::new(),
            is_hidden: false,
        }
    }

    /// Sets the name forms; an empty list is stored as `None`.
    pub fn with_names(mut self, names: Vec<ArgumentNameInfo>) -> Self {
        self.names = (!names.is_empty()).then_some(names);
        self
    }

    /// Sets the preferred name.
    pub fn with_preferred_name(mut self, name: ArgumentNameInfo) -> Self {
        self.preferred_name = Some(name);
        self
    }

    /// Sets the value placeholder (empty → `None`).
    pub fn with_value_name(mut self, value_name: &str) -> Self {
        self.value_name = normalized_text(value_name);
        self
    }

    /// Sets the short help text (empty → `None`).
    pub fn with_abstract(mut self, text: &str) -> Self {
        self.abstract_ = normalized_text(text);
        self
    }

    /// Sets the long help text (empty → `None`).
    pub fn with_discussion(mut self, text: &str) -> Self {
        self.discussion = normalized_text(text);
        self
    }

    /// Sets the parsing strategy.
    pub fn with_parsing_strategy(mut self, strategy: ParsingStrategy) -> Self {
        self.parsing_strategy = strategy;
        self
    }

    /// Sets the initial value.
    pub fn with_initial_value(mut self, value: Option<Value>) -> Self {
        self.initial_value = value;
        self
    }

    /// Sets the declared value type name.
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    /// Returns the last segment of the id (`.group.verbose` → `verbose`).
    pub fn property_name(&self) -> &str {
        self.id.rsplit('.').next().unwrap_or(&self.id)
    }

    /// Checks whether `name` is one of this argument's names, either with its
    /// prefix (`--verbose`) or bare (`verbose`).
    pub fn matches(&self, name: &str) -> bool {
        self.names
            .iter()
            .flatten()
            .any(|n| n.name == name || n.to_string() == name)
    }
}

/// One node of the command tree.
///
/// # Examples
///
/// ```
/// use command_info_core::CommandInfo;
///
/// let mut root = CommandInfo::new("git");
/// let mut remote = CommandInfo::new("remote");
/// remote.super_commands = vec!["git".into()];
/// root.subcommands.push(remote);
///
/// let remote = root.find_subcommand("remote").unwrap();
/// assert_eq!(remote.full_command_path(), vec!["git", "remote"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInfo {
    /// Ancestor invocation names, outermost first.
    #[serde(default)]
    pub super_commands: Vec<String>,
    /// This command's own invocation name.
    pub command_name: String,
    /// Alternative invocation names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Short help text.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<String>,
    /// Long help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion: Option<String>,
    /// Child commands in declaration order.
    #[serde(default)]
    pub subcommands: Vec<CommandInfo>,
    /// This command's directly declared arguments.
    #[serde(default)]
    pub arguments: Vec<PropertyMetadata>,
}

impl CommandInfo {
    /// Creates a leaf node with no ancestors, help text, or arguments.
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            ..Default::default()
        }
    }

    /// Finds a direct sub-command by invocation name or alias.
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandInfo> {
        self.subcommands.iter().find(|s| s.answers_to(name))
    }

    /// Returns `true` if `name` is this command's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.command_name == name || self.aliases.iter().any(|a| a == name)
    }

    /// Follows a path of sub-command names down the tree.
    ///
    /// An empty path returns `self`.
    pub fn descendant(&self, path: &[&str]) -> Option<&CommandInfo> {
        path.iter().try_fold(self, |node, name| node.find_subcommand(name))
    }

    /// Finds one of this command's own arguments by property id.
    pub fn find_argument(&self, id: &str) -> Option<&PropertyMetadata> {
        self.arguments.iter().find(|a| a.id == id)
    }

    /// Ancestors followed by this command's own name.
    pub fn full_command_path(&self) -> Vec<&str> {
        self.super_commands
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.command_name.as_str()))
            .collect()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .subcommands
            .iter()
            .map(CommandInfo::node_count)
            .sum::<usize>()
    }
}

/// Maps empty help text to `None`.
///
/// ```
/// use command_info_core::normalized_text;
///
/// assert_eq!(normalized_text(""), None);
/// assert_eq!(normalized_text("Run it"), Some("Run it".to_string()));
/// ```
pub fn normalized_text(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_info_display() {
        assert_eq!(ArgumentNameInfo::long("dry-run").to_string(), "--dry-run");
        assert_eq!(ArgumentNameInfo::short('n').to_string(), "-n");
        assert_eq!(
            ArgumentNameInfo::long_single_dash("Xlinker").to_string(),
            "-Xlinker"
        );
    }

    #[test]
    fn test_parsing_strategy_order_is_preserved() {
        let all = [
            ParsingStrategy::Default,
            ParsingStrategy::ScanningForValue,
            ParsingStrategy::Unconditional,
            ParsingStrategy::UpToNextOption,
            ParsingStrategy::AllRemainingInput,
            ParsingStrategy::PostTerminator,
            ParsingStrategy::AllUnrecognized,
        ];
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_property_metadata_normalizes_text() {
        let property = PropertyMetadata::new(".name", ArgumentKind::Option)
            .with_abstract("")
            .with_discussion("Longer explanation")
            .with_value_name("");

        assert_eq!(property.abstract_, None);
        assert_eq!(property.discussion.as_deref(), Some("Longer explanation"));
        assert_eq!(property.value_name, None);
    }

    #[test]
    fn test_property_name_is_last_path_segment() {
        let property = PropertyMetadata::new(".outer.verbose", ArgumentKind::Flag);
        assert_eq!(property.property_name(), "verbose");
    }

    #[test]
    fn test_property_metadata_serializes_with_camel_case() {
        let property = PropertyMetadata::new(".count", ArgumentKind::Option)
            .with_preferred_name(ArgumentNameInfo::long("count"))
            .with_parsing_strategy(ParsingStrategy::UpToNextOption)
            .with_initial_value(Some(Value::from(3)))
            .with_value_type("i64");

        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["preferredName"]["name"], "count");
        assert_eq!(json["parsingStrategy"], "upToNextOption");
        assert_eq!(json["initialValue"], 3);
        assert_eq!(json["type"], "i64");
        assert_eq!(json["kind"], "option");
        assert!(json.get("abstract").is_none());
        assert!(json.get("isHidden").is_none());
    }

    #[test]
    fn test_command_info_descendant() {
        let mut root = CommandInfo::new("tool");
        let mut remote = CommandInfo::new("remote");
        remote.subcommands.push(CommandInfo::new("add"));
        root.subcommands.push(remote);

        assert_eq!(root.descendant(&[]).unwrap().command_name, "tool");
        assert_eq!(
            root.descendant(&["remote", "add"]).unwrap().command_name,
            "add"
        );
        assert!(root.descendant(&["remote", "rm"]).is_none());
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn test_find_subcommand_by_alias() {
        let mut root = CommandInfo::new("tool");
        let mut list = CommandInfo::new("ls");
        list.aliases = vec!["list".to_string()];
        root.subcommands.push(list);

        assert_eq!(root.find_subcommand("list").unwrap().command_name, "ls");
        assert!(root.find_subcommand("lst").is_none());

        let json = serde_json::to_value(&root).unwrap();
        assert!(json.get("aliases").is_none());
        assert_eq!(json["subcommands"][0]["aliases"], serde_json::json!(["list"]));
    }
}
