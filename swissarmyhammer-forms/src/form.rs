//! Form: main API surface for building and rendering form fields.
//!
//! A `Form` owns a kind registry, the field store, the form-wide default
//! attributes and the markup helper. Fields are added by kind, tweaked
//! through the returned descriptor, and rendered in one pass by
//! [`Form::render_all`], which also resets the form.
//!
//! A `Form` is plain mutable state with no internal locking. Use one per
//! request; sharing one across threads needs an external mutex around the
//! whole add/render cycle.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::FormsConfig;
use crate::error::{FormsError, Result};
use crate::helper::{MarkupHelper, StandardHelper};
use crate::output::{RenderOutput, RenderedField};
use crate::registry::KindRegistry;
use crate::store::FieldStore;
use crate::types::{Attributes, BuilderCategory, FieldArgs, FieldDescriptor, FieldValue};

/// Builder for [`Form`]. Created by [`Form::builder`].
#[derive(Debug)]
pub struct FormBuilder {
    registry: KindRegistry,
    config: FormsConfig,
    helper: Box<dyn MarkupHelper>,
}

impl FormBuilder {
    /// Use a custom markup helper instead of [`StandardHelper`].
    pub fn helper(mut self, helper: impl MarkupHelper + 'static) -> Self {
        self.helper = Box::new(helper);
        self
    }

    /// Use `config` for the envelope and the baseline default attributes.
    pub fn config(mut self, config: FormsConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from `registry` instead of the built-in kinds.
    pub fn registry(mut self, registry: KindRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> Form {
        let defaults = self.config.default_attributes.clone();
        debug!(
            kinds = self.registry.len(),
            defaults = defaults.len(),
            "form created"
        );
        Form {
            registry: self.registry,
            store: FieldStore::new(),
            defaults,
            config: self.config,
            helper: self.helper,
        }
    }
}

/// Field registry and render pipeline for one form.
///
/// ```rust,ignore
/// let mut form = Form::new();
/// form.set_global_attribute("class", "form-control");
/// form.text(FieldArgs::new("username").attribute("maxlength", "20"))?;
/// form.radio(FieldArgs::new("plan").option("free", "Free").option("pro", "Pro"))?
///     .set_value("free");
/// let output = form.render_all();
/// ```
#[derive(Debug)]
pub struct Form {
    registry: KindRegistry,
    store: FieldStore,
    defaults: Attributes,
    config: FormsConfig,
    helper: Box<dyn MarkupHelper>,
}

#[derive(Serialize)]
struct FormDump<'a> {
    default_attributes: &'a Attributes,
    fields: Vec<&'a FieldDescriptor>,
}

macro_rules! kind_shortcuts {
    ($($(#[$doc:meta])* $method:ident => $kind:literal,)*) => {
        $(
            $(#[$doc])*
            pub fn $method(&mut self, args: FieldArgs) -> Result<&mut FieldDescriptor> {
                self.add_field($kind, args)
            }
        )*
    };
}

impl Form {
    /// A form with the built-in kinds, [`StandardHelper`] and default config.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> FormBuilder {
        FormBuilder {
            registry: KindRegistry::with_builtins(),
            config: FormsConfig::default(),
            helper: Box::new(StandardHelper),
        }
    }

    /// Shorthand for `Form::builder().config(config).build()`.
    pub fn with_config(config: FormsConfig) -> Self {
        Self::builder().config(config).build()
    }

    // --- Kinds ---

    /// Bind `kind` to a builder category. Replaces any existing binding.
    pub fn register_kind(&mut self, kind: &str, category: BuilderCategory) {
        self.registry.register(kind, category);
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    // --- Fields ---

    /// Build a field of `kind` and store it under its name, replacing any
    /// field with the same name. Returns the stored descriptor.
    ///
    /// Fails with [`FormsError::UnknownKind`] when `kind` is not registered;
    /// nothing is stored in that case.
    pub fn add_field(&mut self, kind: &str, args: FieldArgs) -> Result<&mut FieldDescriptor> {
        let field = self.registry.build(kind, args).inspect_err(|e| {
            warn!(%kind, error = %e, "cannot add field");
        })?;
        Ok(self.store.insert(field))
    }

    kind_shortcuts! {
        /// Add a `text` field.
        text => "text",
        password => "password",
        upload => "upload",
        hidden => "hidden",
        textarea => "textarea",
        submit => "submit",
        button => "button",
        reset => "reset",
        /// Add a `dropdown` field; options come from [`FieldArgs::option`].
        dropdown => "dropdown",
        multiselect => "multiselect",
        /// Add a `radio` group; one input per option.
        radio => "radio",
        checkbox => "checkbox",
        range => "range",
    }

    /// The live descriptor named `name`, for further changes.
    ///
    /// A missing field is not an error: a warning is logged and `None`
    /// returned.
    pub fn get_field(&mut self, name: &str) -> Option<&mut FieldDescriptor> {
        let field = self.store.get_mut(name);
        if field.is_none() {
            warn!(%name, "field does not exist");
        }
        field
    }

    /// Like [`Form::get_field`] but reports a missing field as an error.
    pub fn require_field(&mut self, name: &str) -> Result<&mut FieldDescriptor> {
        self.store.get_mut(name).ok_or_else(|| FormsError::FieldNotFound {
            name: name.to_string(),
        })
    }

    /// Read-only lookup without the missing-field warning.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.store.get(name)
    }

    pub fn fields(&self) -> &FieldStore {
        &self.store
    }

    /// Set the value of every listed field that exists; other names are ignored.
    pub fn set_values<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        self.store.set_values(values);
    }

    /// Remove one field. Returns it if it existed.
    pub fn unset_field(&mut self, name: &str) -> Option<FieldDescriptor> {
        self.store.remove(name)
    }

    pub fn unset_fields<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.store.remove(name.as_ref());
        }
    }

    // --- Default attributes ---

    /// Set one default attribute, replacing an existing value.
    pub fn set_global_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.defaults.insert(name.into(), value.into());
    }

    /// Add several default attributes. Keys that already have a default keep
    /// their current value.
    pub fn set_global_attributes<K, V>(&mut self, attributes: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in attributes {
            self.defaults.entry(name.into()).or_insert_with(|| value.into());
        }
    }

    pub fn unset_global_attribute(&mut self, name: &str) -> Option<String> {
        self.defaults.shift_remove(name)
    }

    pub fn unset_global_attributes<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.defaults.shift_remove(name.as_ref());
        }
    }

    pub fn global_attributes(&self) -> &Attributes {
        &self.defaults
    }

    // --- Lifecycle ---

    /// Drop every field and reset default attributes to the configured baseline.
    pub fn clear(&mut self) {
        self.store.clear();
        self.defaults = self.config.default_attributes.clone();
        debug!("form cleared");
    }

    /// Render every field in insertion order, then clear the form.
    ///
    /// A field that fails to render is logged and given empty markup; the
    /// pass always completes.
    pub fn render_all(&mut self) -> RenderOutput {
        debug!(fields = self.store.len(), "rendering form");

        let open = self.helper.form_open_multipart(
            &self.config.action,
            &self.config.form_attributes,
            &self.config.hidden,
        );
        let close = self.helper.form_close();

        let mut output = RenderOutput {
            open,
            close,
            ..RenderOutput::default()
        };
        for field in self.store.iter() {
            let html = field
                .render(&self.defaults, self.helper.as_ref())
                .unwrap_or_else(|e| {
                    warn!(
                        name = %field.name,
                        kind = %field.kind,
                        error = %e,
                        "field failed to render"
                    );
                    String::new()
                });
            output.fields.insert(
                field.name.clone(),
                RenderedField {
                    kind: field.kind.clone(),
                    name: field.name.clone(),
                    title: field.display_title().to_string(),
                    html,
                },
            );
        }

        debug!(fields = output.fields.len(), "form rendered");
        self.clear();
        output
    }

    /// YAML dump of the default attributes and every stored field.
    pub fn dump(&self) -> Result<String> {
        let dump = FormDump {
            default_attributes: &self.defaults,
            fields: self.store.iter().collect(),
        };
        Ok(serde_yaml_ng::to_string(&dump)?)
    }

    /// Log [`Form::dump`] at debug level.
    pub fn debug(&self) {
        match self.dump() {
            Ok(yaml) => debug!("form state:\n{yaml}"),
            Err(e) => warn!(error = %e, "cannot dump form state"),
        }
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;
    use tracing_test::traced_test;

    #[test]
    fn add_field_returns_live_descriptor() {
        let mut form = Form::new();
        form.text(FieldArgs::new("username"))
            .unwrap()
            .set_title("User name")
            .set_attribute("maxlength", "20");
        let field = form.field("username").unwrap();
        assert_eq!(field.display_title(), "User name");
        assert_eq!(field.attributes["maxlength"], "20");
    }

    #[test]
    #[traced_test]
    fn unknown_kind_is_reported_and_stores_nothing() {
        let mut form = Form::new();
        let err = form.add_field("colour", FieldArgs::new("c")).unwrap_err();
        assert!(matches!(err, FormsError::UnknownKind { .. }));
        assert!(form.fields().is_empty());
        assert!(logs_contain("cannot add field"));
    }

    #[test]
    #[traced_test]
    fn get_missing_field_warns_and_yields_none() {
        let mut form = Form::new();
        assert!(form.get_field("ghost").is_none());
        assert!(logs_contain("field does not exist"));
    }

    #[test]
    fn require_missing_field_errors() {
        let mut form = Form::new();
        let err = form.require_field("ghost").unwrap_err();
        assert!(matches!(err, FormsError::FieldNotFound { ref name } if name == "ghost"));
    }

    #[test]
    fn registered_kind_becomes_addable() {
        let mut form = Form::new();
        form.register_kind("email", BuilderCategory::RawAttribute);
        form.add_field("email", FieldArgs::new("contact").value("a@b.c"))
            .unwrap();
        let output = form.render_all();
        assert_eq!(
            output.field("contact").unwrap().html,
            r#"<input value="a@b.c" type="email" />"#
        );
    }

    #[test]
    fn set_global_attributes_keeps_existing() {
        let mut form = Form::new();
        form.set_global_attribute("class", "first");
        form.set_global_attributes([("class", "second"), ("dir", "ltr")]);
        assert_eq!(form.global_attributes()["class"], "first");
        assert_eq!(form.global_attributes()["dir"], "ltr");
        form.set_global_attribute("class", "third");
        assert_eq!(form.global_attributes()["class"], "third");
    }

    #[test]
    fn unset_global_attributes_removes_them() {
        let mut form = Form::new();
        form.set_global_attributes([("class", "x"), ("dir", "ltr"), ("lang", "en")]);
        assert_eq!(form.unset_global_attribute("class"), Some("x".into()));
        form.unset_global_attributes(["dir", "missing"]);
        let keys: Vec<_> = form.global_attributes().keys().cloned().collect();
        assert_eq!(keys, vec!["lang"]);
    }

    #[test]
    fn unset_fields_removes_named_fields() {
        let mut form = Form::new();
        for name in ["a", "b", "c"] {
            form.text(FieldArgs::new(name)).unwrap();
        }
        assert!(form.unset_field("a").is_some());
        form.unset_fields(vec!["c".to_string()]);
        assert_eq!(form.fields().names().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn clear_resets_fields_and_defaults() {
        let mut form = Form::new();
        form.set_global_attribute("class", "x");
        form.hidden(FieldArgs::new("token")).unwrap();
        form.clear();
        assert!(form.fields().is_empty());
        assert!(form.global_attributes().is_empty());
    }

    #[test]
    fn clear_restores_configured_defaults() {
        let config = FormsConfig {
            default_attributes: [("class".to_string(), "form-control".to_string())]
                .into_iter()
                .collect(),
            ..FormsConfig::default()
        };
        let mut form = Form::with_config(config);
        form.set_global_attribute("dir", "rtl");
        form.unset_global_attribute("class");
        form.clear();
        let keys: Vec<_> = form.global_attributes().keys().cloned().collect();
        assert_eq!(keys, vec!["class"]);
    }

    #[test]
    fn render_uses_config_envelope() {
        let config = FormsConfig {
            action: "/upload".into(),
            ..FormsConfig::default()
        };
        let mut form = Form::with_config(config);
        let output = form.render_all();
        assert!(output.open.starts_with(r#"<form action="/upload" enctype="multipart/form-data""#));
        assert_eq!(output.close, "</form>");
    }

    #[test]
    #[traced_test]
    fn unsupported_helper_renders_empty_and_continues() {
        let mut form = Form::new();
        form.register_kind("email", BuilderCategory::PlainInput);
        form.add_field("email", FieldArgs::new("contact")).unwrap();
        form.text(FieldArgs::new("after")).unwrap();
        let output = form.render_all();
        assert_eq!(output.field("contact").unwrap().html, "");
        assert!(output.field("after").unwrap().html.starts_with("<input"));
        assert!(logs_contain("field failed to render"));
    }

    #[test]
    fn custom_helper_is_used() {
        #[derive(Debug)]
        struct Upper;
        impl MarkupHelper for Upper {
            fn input(
                &self,
                kind: &FieldKind,
                name: &str,
                _value: &FieldValue,
                _attributes: &Attributes,
            ) -> Result<String> {
                Ok(format!("{}:{}", kind.helper_name(), name.to_uppercase()))
            }
            fn combo(
                &self,
                kind: &FieldKind,
                _name: &str,
                _options: &crate::types::FieldOptions,
                _value: &FieldValue,
                _attributes: &Attributes,
            ) -> Result<String> {
                Err(FormsError::UnsupportedHelper {
                    kind: kind.to_string(),
                })
            }
            fn choice(
                &self,
                _kind: &FieldKind,
                _name: &str,
                value: &str,
                checked: bool,
            ) -> Result<String> {
                Ok(format!("[{}{}]", value, if checked { "*" } else { "" }))
            }
            fn form_open_multipart(&self, _: &str, _: &Attributes, _: &Attributes) -> String {
                "<form>".into()
            }
        }

        let mut form = Form::builder().helper(Upper).build();
        form.text(FieldArgs::new("q")).unwrap();
        form.radio(FieldArgs::new("r").options([("a", "A"), ("b", "B")]).value("b"))
            .unwrap();
        let output = form.render_all();
        assert_eq!(output.open, "<form>");
        assert_eq!(output.field("q").unwrap().html, "form_text:Q");
        assert_eq!(
            output.field("r").unwrap().html,
            "<label>[a] A</label><label>[b*] B</label>"
        );
    }

    #[test]
    fn form_can_be_shared_behind_a_mutex() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Form>();
        assert_send::<FormBuilder>();
        assert_sync::<std::sync::Mutex<Form>>();

        let shared = std::sync::Arc::new(std::sync::Mutex::new(Form::new()));
        let worker = std::sync::Arc::clone(&shared);
        std::thread::spawn(move || {
            worker
                .lock()
                .unwrap()
                .text(FieldArgs::new("from_thread"))
                .map(|_| ())
        })
        .join()
        .unwrap()
        .unwrap();

        let output = shared.lock().unwrap().render_all();
        assert!(output.field("from_thread").is_some());
    }

    #[test]
    fn dump_lists_fields_and_defaults() {
        let mut form = Form::new();
        form.set_global_attribute("class", "form-control");
        form.dropdown(FieldArgs::new("size").option("s", "Small")).unwrap();
        let yaml = form.dump().unwrap();
        assert!(yaml.contains("default_attributes:"));
        assert!(yaml.contains("class: form-control"));
        assert!(yaml.contains("name: size"));
        assert!(yaml.contains("type: dropdown"));
        assert!(yaml.contains("strategy: combo"));
    }

    #[test]
    #[traced_test]
    fn debug_logs_state() {
        let mut form = Form::new();
        form.text(FieldArgs::new("probe")).unwrap();
        form.debug();
        assert!(logs_contain("form state"));
    }
}
