//! Field constructors, one per builder category.
//!
//! Every constructor takes the kind it is building for plus the shared
//! [`FieldArgs`] and returns a descriptor tagged with that kind.

use tracing::trace;

use crate::types::{BuilderCategory, FieldArgs, FieldDescriptor, FieldKind, RenderStrategy};

/// Build a descriptor for `kind` using the constructor bound to `category`.
pub fn build_field(category: BuilderCategory, kind: FieldKind, args: FieldArgs) -> FieldDescriptor {
    match category {
        BuilderCategory::PlainInput => input_field(kind, args),
        BuilderCategory::RawAttribute => raw_input_field(kind, args),
        BuilderCategory::Combo => combo_field(kind, args),
        BuilderCategory::RadioGroup => radio_field(kind, args),
    }
}

/// Plain input: rendered entirely by the markup helper.
pub fn input_field(kind: FieldKind, args: FieldArgs) -> FieldDescriptor {
    scalar_field(kind, args, RenderStrategy::PlainInput)
}

/// Raw-attribute input: serialized directly as an `<input />` tag.
///
/// The value is scalar. A multi-value is stored as given but renders only
/// its first entry.
pub fn raw_input_field(kind: FieldKind, args: FieldArgs) -> FieldDescriptor {
    scalar_field(kind, args, RenderStrategy::RawAttribute)
}

/// Option list (dropdown, multiselect).
pub fn combo_field(kind: FieldKind, args: FieldArgs) -> FieldDescriptor {
    let FieldArgs {
        name,
        title,
        value,
        options,
        attributes,
    } = args;
    FieldDescriptor {
        name,
        kind,
        title,
        value,
        attributes,
        strategy: RenderStrategy::Combo { options },
    }
}

/// One labelled choice input per option (radio, checkbox).
pub fn radio_field(kind: FieldKind, args: FieldArgs) -> FieldDescriptor {
    let FieldArgs {
        name,
        title,
        value,
        options,
        attributes,
    } = args;
    FieldDescriptor {
        name,
        kind,
        title,
        value,
        attributes,
        strategy: RenderStrategy::RadioGroup { options },
    }
}

fn scalar_field(kind: FieldKind, args: FieldArgs, strategy: RenderStrategy) -> FieldDescriptor {
    if !args.options.is_empty() {
        trace!(%kind, name = %args.name, "options ignored for scalar field");
    }
    FieldDescriptor {
        name: args.name,
        kind,
        title: args.title,
        value: args.value,
        attributes: args.attributes,
        strategy,
    }
}
