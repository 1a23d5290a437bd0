//! Form field registry and rendering pipeline
//!
//! `swissarmyhammer-forms` lets callers declare named form fields by kind
//! (`text`, `dropdown`, `radio`, ...), tweak them, and render all of them
//! in one pass into markup plus the metadata a presentation layer needs.
//!
//! # Architecture
//!
//! - **Kind registry**: a lookup table from kind name to one of four builder
//!   categories. Built-in kinds are pre-registered; new kinds are one
//!   `register_kind` call away.
//! - **Field store**: insertion-ordered descriptors keyed by name, last write wins.
//! - **Default attributes**: form-wide markup attributes merged under each
//!   field's own attributes at render time. The field wins on collision.
//! - **Markup helper**: the `form_<kind>` functions that produce field HTML.
//!   [`StandardHelper`] ships with the crate; hosts can plug in their own.
//! - **One-shot render**: [`Form::render_all`] renders every field and then
//!   clears the form.

pub mod builder;
pub mod config;
pub mod error;
pub mod form;
pub mod helper;
pub mod output;
pub mod registry;
pub mod render;
pub mod store;
pub mod types;

pub use config::FormsConfig;
pub use error::{FormsError, Result};
pub use form::{Form, FormBuilder};
pub use helper::{MarkupHelper, StandardHelper};
pub use output::{RenderOutput, RenderedField};
pub use registry::{KindRegistry, BUILTIN_KINDS};
pub use render::merge_attributes;
pub use store::FieldStore;
pub use types::{
    Attributes, BuilderCategory, FieldArgs, FieldDescriptor, FieldKind, FieldOptions, FieldValue,
    RenderStrategy,
};
