//! Core field types for the forms registry.
//!
//! A [`FieldDescriptor`] is the stored record for one form field. Its
//! [`RenderStrategy`] decides how it turns into markup and carries the
//! strategy-specific data (option lists for combo and radio groups).
//! Everything here serializes with serde so descriptors can be dumped and
//! inspected.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Markup attributes, attribute name to value, in insertion order.
pub type Attributes = IndexMap<String, String>;

/// Option list for combo and radio fields, option value to label.
/// Insertion order is display order.
pub type FieldOptions = IndexMap<String, String>;

/// Name of a category of field, e.g. `text`, `dropdown`, `radio`.
///
/// Kinds are open-ended: anything registered in a
/// [`KindRegistry`](crate::registry::KindRegistry) is a valid kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKind(String);

impl FieldKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the markup helper function for this kind, e.g. `form_text`.
    pub fn helper_name(&self) -> String {
        format!("form_{}", self.0)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for FieldKind {
    fn from(kind: String) -> Self {
        Self(kind)
    }
}

/// The construction and render strategy a kind is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuilderCategory {
    /// Thin adapter over the markup helper `form_<kind>(name, value, attributes)`.
    PlainInput,
    /// Serializes an `<input />` tag directly, for kinds the helper lacks.
    RawAttribute,
    /// Option list delegated to `form_<kind>(name, options, value, attributes)`.
    Combo,
    /// One labelled radio/checkbox input per option.
    RadioGroup,
}

impl fmt::Display for BuilderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuilderCategory::PlainInput => "plain-input",
            BuilderCategory::RawAttribute => "raw-attribute",
            BuilderCategory::Combo => "combo",
            BuilderCategory::RadioGroup => "radio-group",
        };
        f.write_str(name)
    }
}

/// Current value of a field: a scalar, or a set of selected values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Scalar view of the value. A multi-value yields its first entry.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Single(value) => value,
            FieldValue::Multiple(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// The value viewed as a selection set. An empty scalar is the empty set.
    pub fn selected(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(value) if value.is_empty() => Vec::new(),
            FieldValue::Single(value) => vec![value.as_str()],
            FieldValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Whether `candidate` is part of the selection set.
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            FieldValue::Single(value) => !value.is_empty() && value == candidate,
            FieldValue::Multiple(values) => values.iter().any(|v| v == candidate),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.is_empty(),
            FieldValue::Multiple(values) => values.is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Single(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multiple(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        FieldValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// How a descriptor renders, with the data only that strategy needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum RenderStrategy {
    PlainInput,
    RawAttribute,
    Combo { options: FieldOptions },
    RadioGroup { options: FieldOptions },
}

impl RenderStrategy {
    pub fn category(&self) -> BuilderCategory {
        match self {
            RenderStrategy::PlainInput => BuilderCategory::PlainInput,
            RenderStrategy::RawAttribute => BuilderCategory::RawAttribute,
            RenderStrategy::Combo { .. } => BuilderCategory::Combo,
            RenderStrategy::RadioGroup { .. } => BuilderCategory::RadioGroup,
        }
    }

    pub fn options(&self) -> Option<&FieldOptions> {
        match self {
            RenderStrategy::Combo { options } | RenderStrategy::RadioGroup { options } => {
                Some(options)
            }
            RenderStrategy::PlainInput | RenderStrategy::RawAttribute => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut FieldOptions> {
        match self {
            RenderStrategy::Combo { options } | RenderStrategy::RadioGroup { options } => {
                Some(options)
            }
            RenderStrategy::PlainInput | RenderStrategy::RawAttribute => None,
        }
    }
}

/// A stored form field.
///
/// `attributes` holds only the field's own attributes; form-wide defaults
/// are merged in at render time and never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub value: FieldValue,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: Attributes,
    #[serde(flatten)]
    pub strategy: RenderStrategy,
}

impl FieldDescriptor {
    /// Title shown next to the field; falls back to the field name.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.name,
        }
    }

    pub fn category(&self) -> BuilderCategory {
        self.strategy.category()
    }

    /// Option list, for combo and radio fields only.
    pub fn options(&self) -> Option<&FieldOptions> {
        self.strategy.options()
    }

    pub fn options_mut(&mut self) -> Option<&mut FieldOptions> {
        self.strategy.options_mut()
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_value(&mut self, value: impl Into<FieldValue>) -> &mut Self {
        self.value = value.into();
        self
    }

    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }
}

/// Construction arguments shared by every builder category.
///
/// ```rust,ignore
/// let args = FieldArgs::new("colour")
///     .title("Favourite colour")
///     .option("r", "Red")
///     .option("g", "Green")
///     .value("g");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldArgs {
    pub name: String,
    pub title: Option<String>,
    pub value: FieldValue,
    pub options: FieldOptions,
    pub attributes: Attributes,
}

impl FieldArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Append one option. Ignored by plain and raw-attribute kinds.
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.insert(value.into(), label.into());
        self
    }

    pub fn options<K, V>(mut self, options: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}
