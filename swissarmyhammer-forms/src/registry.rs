//! Kind registry: maps a field kind to the builder category that constructs it.

use indexmap::IndexMap;
use tracing::debug;

use crate::builder::build_field;
use crate::error::{FormsError, Result};
use crate::types::{BuilderCategory, FieldArgs, FieldDescriptor, FieldKind};

/// Kinds available on every new registry.
pub const BUILTIN_KINDS: &[(&str, BuilderCategory)] = &[
    ("text", BuilderCategory::PlainInput),
    ("password", BuilderCategory::PlainInput),
    ("upload", BuilderCategory::PlainInput),
    ("hidden", BuilderCategory::PlainInput),
    ("textarea", BuilderCategory::PlainInput),
    ("dropdown", BuilderCategory::Combo),
    ("multiselect", BuilderCategory::Combo),
    ("radio", BuilderCategory::RadioGroup),
    ("checkbox", BuilderCategory::RadioGroup),
    ("submit", BuilderCategory::PlainInput),
    ("button", BuilderCategory::PlainInput),
    ("reset", BuilderCategory::PlainInput),
    ("range", BuilderCategory::RawAttribute),
];

/// Lookup table from kind to builder category.
///
/// Registration is an upsert. Rebinding a kind only affects descriptors
/// built afterwards.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kinds: IndexMap<FieldKind, BuilderCategory>,
}

impl KindRegistry {
    /// An empty registry with no kinds at all.
    pub fn empty() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// A registry pre-populated with [`BUILTIN_KINDS`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (kind, category) in BUILTIN_KINDS {
            registry.register(*kind, *category);
        }
        registry
    }

    /// Bind `kind` to `category`, returning the previous binding if any.
    pub fn register(
        &mut self,
        kind: impl Into<FieldKind>,
        category: BuilderCategory,
    ) -> Option<BuilderCategory> {
        let kind = kind.into();
        debug!(%kind, %category, "registered field kind");
        self.kinds.insert(kind, category)
    }

    /// Remove a kind binding.
    pub fn unregister(&mut self, kind: &str) -> Option<BuilderCategory> {
        self.kinds.shift_remove(kind)
    }

    pub fn resolve(&self, kind: &str) -> Option<BuilderCategory> {
        self.kinds.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// All registered kinds with their categories, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = (&FieldKind, BuilderCategory)> {
        self.kinds.iter().map(|(kind, category)| (kind, *category))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Resolve `kind` and run its constructor.
    pub fn build(&self, kind: &str, args: FieldArgs) -> Result<FieldDescriptor> {
        let category = self.resolve(kind).ok_or_else(|| FormsError::UnknownKind {
            kind: kind.to_string(),
        })?;
        Ok(build_field(category, FieldKind::new(kind), args))
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
