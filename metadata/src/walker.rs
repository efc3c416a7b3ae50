//! Metadata walker.
//!
//! Turns the registered fields of an argument-bearing type into a flat list
//! of [`PropertyMetadata`], depth-first in declaration order. Group fields
//! are spliced in place, opaque fields are skipped, and a leaf whose
//! argument-set has nothing classifiable produces no record.

use command_info_core::{ArgumentKind, ArgumentNameInfo, PropertyMetadata};
use command_info_parser::{
    ArgumentDefinition, ArgumentSet, ArgumentVisibility, DefinitionKind, FieldDecl, FieldShape,
    InputKey, InputOrigin, ParsableArguments, ParsedValues, Update, coding_name,
};
use serde_json::Value;
use tracing::{debug, trace};

/// Walks `T`'s declared fields from the argument root.
pub fn metadata<T: ParsableArguments>() -> Vec<PropertyMetadata> {
    metadata_for_fields(&T::fields(), None)
}

/// Walks `fields`, keying every property under `parent`.
pub fn metadata_for_fields(
    fields: &[FieldDecl],
    parent: Option<&InputKey>,
) -> Vec<PropertyMetadata> {
    let mut properties = Vec::with_capacity(fields.len());

    for field in fields {
        let key = InputKey::new(coding_name(field.name), parent);
        match &field.shape {
            FieldShape::Group(nested) => {
                properties.extend(metadata_for_fields(&nested(), Some(&key)));
            }
            FieldShape::Leaf(decl) => {
                let set = decl.argument_set(&key);
                match property_metadata(&key, &set, decl.value_type()) {
                    Some(property) => properties.push(property),
                    None => debug!(
                        key = %key.full_path_string(),
                        definitions = set.len(),
                        "Argument-set has no classifiable definition"
                    ),
                }
            }
            FieldShape::Opaque => {
                trace!(field = field.name, "Skipping field without argument semantics");
            }
        }
    }

    properties
}

/// Classifies a definition by name style and update arity.
///
/// Default-only placeholders yield `None`.
pub fn argument_kind(definition: &ArgumentDefinition) -> Option<ArgumentKind> {
    match (&definition.kind, definition.update) {
        (DefinitionKind::Named(_), Update::Nullary) => Some(ArgumentKind::Flag),
        (DefinitionKind::Named(_), Update::Unary) => Some(ArgumentKind::Option),
        (DefinitionKind::Positional, _) => Some(ArgumentKind::Positional),
        (DefinitionKind::Default, _) => None,
    }
}

/// Builds the record for one declared property.
///
/// The first classifiable, non-private definition of the set supplies the
/// kind, help text, strategy and initial value; `names` collects the name
/// forms of every such definition (so an inversion pair lists both
/// `--color` and `--no-color`).
pub fn property_metadata(
    key: &InputKey,
    set: &ArgumentSet,
    value_type: &str,
) -> Option<PropertyMetadata> {
    let definition = set.first_classifiable()?;
    let kind = argument_kind(definition)?;

    let mut names: Vec<ArgumentNameInfo> = Vec::new();
    for name in set.classifiable().flat_map(ArgumentDefinition::names) {
        let info = ArgumentNameInfo::from(name);
        if !names.contains(&info) {
            names.push(info);
        }
    }

    let mut property = PropertyMetadata::new(key.full_path_string(), kind)
        .with_names(names)
        .with_value_name(&definition.help.value_name)
        .with_abstract(&definition.help.abstract_)
        .with_discussion(&definition.help.discussion)
        .with_parsing_strategy(definition.parsing_strategy)
        .with_initial_value(initial_value(definition))
        .with_value_type(value_type);
    if let Some(preferred) = definition.preferred_name_for_synopsis() {
        property = property.with_preferred_name(preferred.into());
    }
    property.is_hidden = definition.help.visibility == ArgumentVisibility::Hidden;

    Some(property)
}

/// Simulates parsing zero tokens and reads back the value stored under the
/// definition's key.
///
/// A failing simulation means "no default" and is never surfaced.
pub fn initial_value(definition: &ArgumentDefinition) -> Option<Value> {
    let mut values = ParsedValues::new();
    if let Err(error) = definition.apply_initial(&InputOrigin::empty(), &mut values) {
        trace!(
            key = %definition.key.full_path_string(),
            %error,
            "Default simulation failed, treating as no initial value"
        );
        return None;
    }
    values.get(&definition.key).cloned()
}

#[cfg(test)]
mod tests {
    use command_info_core::{NameKind, ParsingStrategy};
    use command_info_parser::{ArgumentDecl, FlagInversion, Name, NameSpecification};

    use super::*;

    fn leaf(name: &'static str, decl: ArgumentDecl) -> Option<PropertyMetadata> {
        let key = InputKey::root(coding_name(name));
        property_metadata(&key, &decl.argument_set(&key), decl.value_type())
    }

    #[test]
    fn test_argument_kind_derivation() {
        let key = InputKey::root("x");
        let named = |update| {
            ArgumentDefinition::new(
                key.clone(),
                DefinitionKind::Named(vec![Name::Long("x".into())]),
                update,
            )
        };

        assert_eq!(argument_kind(&named(Update::Nullary)), Some(ArgumentKind::Flag));
        assert_eq!(argument_kind(&named(Update::Unary)), Some(ArgumentKind::Option));
        assert_eq!(
            argument_kind(&ArgumentDefinition::new(
                key.clone(),
                DefinitionKind::Positional,
                Update::Unary
            )),
            Some(ArgumentKind::Positional)
        );
        assert_eq!(
            argument_kind(&ArgumentDefinition::new(
                key.clone(),
                DefinitionKind::Default,
                Update::Nullary
            )),
            None
        );
    }

    #[test]
    fn test_option_record() {
        let property = leaf(
            "_output",
            ArgumentDecl::option::<String>()
                .name(NameSpecification::short_and_long())
                .help("Where to write")
                .value_name("path")
                .parsing(ParsingStrategy::Unconditional),
        )
        .unwrap();

        assert_eq!(property.id, ".output");
        assert_eq!(property.kind, ArgumentKind::Option);
        assert_eq!(
            property.names,
            Some(vec![
                ArgumentNameInfo::short('o'),
                ArgumentNameInfo::long("output")
            ])
        );
        assert_eq!(property.preferred_name, Some(ArgumentNameInfo::long("output")));
        assert_eq!(property.value_name.as_deref(), Some("path"));
        assert_eq!(property.abstract_.as_deref(), Some("Where to write"));
        assert_eq!(property.discussion, None);
        assert_eq!(property.parsing_strategy, ParsingStrategy::Unconditional);
        assert_eq!(property.initial_value, None);
        assert_eq!(property.value_type, "String");
    }

    #[test]
    fn test_inverted_flag_lists_both_forms() {
        let property = leaf(
            "color",
            ArgumentDecl::flag()
                .inversion(FlagInversion::PrefixedNo)
                .default_value(true),
        )
        .unwrap();

        let names: Vec<String> = property
            .names
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["--color", "--no-color"]);
        assert_eq!(property.kind, ArgumentKind::Flag);
        assert_eq!(property.initial_value, Some(Value::Bool(true)));
    }

    #[test]
    fn test_short_only_inverted_flag() {
        let property = leaf(
            "quiet",
            ArgumentDecl::flag()
                .name(NameSpecification::short())
                .inversion(FlagInversion::PrefixedNo)
                .default_value(false),
        )
        .unwrap();

        let names: Vec<String> = property
            .names
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["-q", "--no-quiet"]);
        assert_eq!(property.preferred_name, Some(ArgumentNameInfo::short('q')));
        assert_eq!(property.initial_value, Some(Value::Bool(false)));
    }

    #[test]
    fn test_single_dash_preferred_over_short() {
        let property = leaf(
            "rpath",
            ArgumentDecl::option::<String>().name(
                NameSpecification::custom_short('r')
                    .with(command_info_parser::NameSpec::LongSingleDash),
            ),
        )
        .unwrap();

        let preferred = property.preferred_name.unwrap();
        assert_eq!(preferred.kind, NameKind::LongSingleDash);
        assert_eq!(preferred.name, "rpath");
    }

    #[test]
    fn test_default_only_produces_no_record() {
        assert!(leaf("cached", ArgumentDecl::default_only::<bool>(true)).is_none());
    }

    #[test]
    fn test_private_produces_no_record_and_hidden_is_marked() {
        assert!(leaf("secret", ArgumentDecl::flag().private()).is_none());

        let hidden = leaf("debug", ArgumentDecl::flag().hidden()).unwrap();
        assert!(hidden.is_hidden);
    }

    #[test]
    fn test_empty_set_produces_no_record() {
        let key = InputKey::root("nothing");
        assert!(property_metadata(&key, &ArgumentSet::default(), "bool").is_none());
    }

    #[test]
    fn test_positional_has_no_names() {
        let property = leaf("path", ArgumentDecl::argument::<String>()).unwrap();
        assert_eq!(property.kind, ArgumentKind::Positional);
        assert_eq!(property.names, None);
        assert_eq!(property.preferred_name, None);
    }

    #[test]
    fn test_initial_value_swallows_bad_default() {
        fn parse_level(text: &str) -> Result<Value, String> {
            match text {
                "low" | "high" => Ok(Value::from(text)),
                other => Err(format!("unknown level {other}")),
            }
        }

        let good = leaf(
            "level",
            ArgumentDecl::option::<String>().default_text("high", parse_level),
        )
        .unwrap();
        assert_eq!(good.initial_value, Some(Value::from("high")));

        let bad = leaf(
            "level",
            ArgumentDecl::option::<String>().default_text("medium", parse_level),
        )
        .unwrap();
        assert_eq!(bad.initial_value, None);
    }

    #[test]
    fn test_counted_flag_starts_at_zero() {
        let property = leaf("verbose", ArgumentDecl::counted_flag()).unwrap();
        assert_eq!(property.kind, ArgumentKind::Flag);
        assert_eq!(property.initial_value, Some(Value::from(0)));
        assert_eq!(property.value_type, "i64");
    }
}
