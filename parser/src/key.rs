//! Property keys and the parsed-value store.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// Storage-only marker some declarations put in front of a field name.
pub const STORAGE_PREFIX: char = '_';

/// Strips the storage prefix marker (and a raw-identifier `r#`) from a
/// declared field name, recovering the argument's coding name.
///
/// # Examples
///
/// ```
/// use command_info_parser::coding_name;
///
/// assert_eq!(coding_name("_verbose"), "verbose");
/// assert_eq!(coding_name("r#type"), "type");
/// assert_eq!(coding_name("count"), "count");
/// ```
pub fn coding_name(field_name: &str) -> &str {
    let name = field_name.strip_prefix("r#").unwrap_or(field_name);
    name.strip_prefix(STORAGE_PREFIX).unwrap_or(name)
}

/// Path of coding names from a command's argument root to one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputKey {
    path: Vec<String>,
}

impl InputKey {
    /// Creates a key for `name` nested under `parent` (or at the root).
    pub fn new(name: impl Into<String>, parent: Option<&InputKey>) -> Self {
        let mut path = parent.map(|p| p.path.clone()).unwrap_or_default();
        path.push(name.into());
        Self { path }
    }

    /// Creates a top-level key.
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Every segment, outermost first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Dot-joined path with a leading dot, e.g. `.options.verbose`.
    ///
    /// The leading dot is part of the format consumers match against.
    ///
    /// ```
    /// use command_info_parser::InputKey;
    ///
    /// let outer = InputKey::root("outer");
    /// let key = InputKey::new("verbose", Some(&outer));
    /// assert_eq!(key.full_path_string(), ".outer.verbose");
    /// ```
    pub fn full_path_string(&self) -> String {
        format!(".{}", self.path.join("."))
    }
}

/// Where a parsed value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputOriginElement {
    /// Filled in from the declaration's default.
    DefaultValue,
    /// Read from the argument at this index of the input.
    ArgumentIndex(usize),
}

/// Set of input positions that contributed to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputOrigin {
    elements: BTreeSet<InputOriginElement>,
}

impl InputOrigin {
    /// An origin with no elements, used when simulating empty input.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An origin with a single element.
    pub fn from_element(element: InputOriginElement) -> Self {
        Self {
            elements: BTreeSet::from([element]),
        }
    }

    /// Adds an element.
    pub fn insert(&mut self, element: InputOriginElement) {
        self.elements.insert(element);
    }

    /// Returns `true` if nothing contributed to the value.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates the elements in order.
    pub fn elements(&self) -> impl Iterator<Item = &InputOriginElement> {
        self.elements.iter()
    }
}

/// One stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    /// The value.
    pub value: Value,
    /// Where it came from.
    pub origin: InputOrigin,
}

/// Accumulated values, keyed by property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedValues {
    elements: BTreeMap<InputKey, ParsedValue>,
}

impl ParsedValues {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any earlier value.
    pub fn set(&mut self, key: &InputKey, value: Value, origin: InputOrigin) {
        self.elements
            .insert(key.clone(), ParsedValue { value, origin });
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &InputKey) -> Option<&Value> {
        self.elements.get(key).map(|e| &e.value)
    }

    /// Returns the value and origin stored under `key`.
    pub fn element(&self, key: &InputKey) -> Option<&ParsedValue> {
        self.elements.get(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
