//! Argument names and name specifications.
//!
//! A declaration lists its names as a [`NameSpecification`]; the
//! specification is resolved against the property's [`InputKey`] when the
//! argument-set is materialised, so `Long` on a field called `dry_run`
//! becomes `--dry-run`.

use command_info_core::ArgumentNameInfo;

use crate::key::InputKey;

/// A resolved argument name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Name {
    /// `--name`
    Long(String),
    /// `-n`
    Short(char),
    /// `-name`
    LongWithSingleDash(String),
}

impl Name {
    /// Returns the name as it is typed on the command line.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_info_parser::Name;
    ///
    /// assert_eq!(Name::Long("verbose".into()).synopsis_string(), "--verbose");
    /// assert_eq!(Name::Short('v').synopsis_string(), "-v");
    /// assert_eq!(Name::LongWithSingleDash("rpath".into()).synopsis_string(), "-rpath");
    /// ```
    pub fn synopsis_string(&self) -> String {
        match self {
            Self::Long(name) => format!("--{name}"),
            Self::Short(c) => format!("-{c}"),
            Self::LongWithSingleDash(name) => format!("-{name}"),
        }
    }

    /// Returns `true` for `-n` forms.
    pub fn is_short(&self) -> bool {
        matches!(self, Self::Short(_))
    }
}

impl From<&Name> for ArgumentNameInfo {
    fn from(name: &Name) -> Self {
        match name {
            Name::Long(name) => ArgumentNameInfo::long(name.as_str()),
            Name::Short(c) => ArgumentNameInfo::short(*c),
            Name::LongWithSingleDash(name) => ArgumentNameInfo::long_single_dash(name.as_str()),
        }
    }
}

/// One element of a [`NameSpecification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSpec {
    /// `--` followed by the kebab-cased property name.
    Long,
    /// `--` followed by the given name.
    CustomLong(String),
    /// `-` followed by the first character of the property name.
    Short,
    /// `-` followed by the given character.
    CustomShort(char),
    /// `-` followed by the kebab-cased property name.
    LongSingleDash,
    /// `-` followed by the given multi-character name.
    CustomLongSingleDash(String),
}

/// Ordered list of name forms for a named argument.
///
/// # Examples
///
/// ```
/// use command_info_parser::{InputKey, Name, NameSpecification};
///
/// let key = InputKey::root("dry_run");
/// let names = NameSpecification::short_and_long().make_names(&key);
/// assert_eq!(names, vec![Name::Short('d'), Name::Long("dry-run".into())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSpecification(Vec<NameSpec>);

impl Default for NameSpecification {
    fn default() -> Self {
        Self::long()
    }
}

impl NameSpecification {
    /// Creates a specification from explicit elements.
    pub fn new(elements: Vec<NameSpec>) -> Self {
        Self(elements)
    }

    /// `--property-name`
    pub fn long() -> Self {
        Self(vec![NameSpec::Long])
    }

    /// `-p`
    pub fn short() -> Self {
        Self(vec![NameSpec::Short])
    }

    /// `-p, --property-name`
    pub fn short_and_long() -> Self {
        Self(vec![NameSpec::Short, NameSpec::Long])
    }

    /// `--name`
    pub fn custom_long(name: impl Into<String>) -> Self {
        Self(vec![NameSpec::CustomLong(name.into())])
    }

    /// `-c`
    pub fn custom_short(c: char) -> Self {
        Self(vec![NameSpec::CustomShort(c)])
    }

    /// Appends another element.
    pub fn with(mut self, element: NameSpec) -> Self {
        self.0.push(element);
        self
    }

    /// Returns the raw elements.
    pub fn elements(&self) -> &[NameSpec] {
        &self.0
    }

    /// Resolves the specification against a property key.
    ///
    /// Duplicate names are dropped, keeping the first occurrence. A `Short`
    /// element on a key whose name is empty yields nothing.
    pub fn make_names(&self, key: &InputKey) -> Vec<Name> {
        let kebab = to_kebab_case(key.name());
        let mut names: Vec<Name> = Vec::with_capacity(self.0.len());
        for element in &self.0 {
            let name = match element {
                NameSpec::Long => Some(Name::Long(kebab.clone())),
                NameSpec::CustomLong(name) => Some(Name::Long(name.clone())),
                NameSpec::Short => kebab.chars().next().map(Name::Short),
                NameSpec::CustomShort(c) => Some(Name::Short(*c)),
                NameSpec::LongSingleDash => Some(Name::LongWithSingleDash(kebab.clone())),
                NameSpec::CustomLongSingleDash(name) => {
                    Some(Name::LongWithSingleDash(name.clone()))
                }
            };
            if let Some(name) = name {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Converts `snake_case` and `camelCase` identifiers to `kebab-case`.
///
/// # Examples
///
/// ```
/// use command_info_parser::to_kebab_case;
///
/// assert_eq!(to_kebab_case("dry_run"), "dry-run");
/// assert_eq!(to_kebab_case("dryRun"), "dry-run");
/// assert_eq!(to_kebab_case("HTTPServer"), "http-server");
/// assert_eq!(to_kebab_case("Remote"), "remote");
/// ```
pub fn to_kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = i.checked_sub(1).and_then(|j| chars.get(j)).copied();
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out.trim_end_matches('-').to_string()
}
