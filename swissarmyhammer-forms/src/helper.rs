//! Markup helpers.
//!
//! The render pipeline never assembles field HTML itself (except for
//! raw-attribute kinds). It calls a [`MarkupHelper`], the set of pure
//! `form_<kind>` functions that know how one kind serializes.
//! [`StandardHelper`] is the built-in set; hosts with their own markup
//! conventions implement the trait instead.
//!
//! All attribute values and text content written by this module are HTML
//! escaped.

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::warn;

use crate::error::{FormsError, Result};
use crate::types::{Attributes, FieldKind, FieldOptions, FieldValue};

/// The `form_<kind>` function set the renderer delegates to.
///
/// Implementations must be `Send + Sync` so a [`Form`](crate::form::Form)
/// holding one can move between threads or sit behind a mutex.
pub trait MarkupHelper: Send + Sync + std::fmt::Debug {
    /// `form_<kind>(name, value, attributes)` for plain inputs.
    fn input(
        &self,
        kind: &FieldKind,
        name: &str,
        value: &FieldValue,
        attributes: &Attributes,
    ) -> Result<String>;

    /// `form_<kind>(name, options, value, attributes)` for option lists.
    fn combo(
        &self,
        kind: &FieldKind,
        name: &str,
        options: &FieldOptions,
        value: &FieldValue,
        attributes: &Attributes,
    ) -> Result<String>;

    /// `form_<kind>(name, value, checked)` for a single radio/checkbox input.
    fn choice(&self, kind: &FieldKind, name: &str, value: &str, checked: bool) -> Result<String>;

    /// Opening `<form>` tag for a multipart form, followed by hidden inputs.
    fn form_open_multipart(
        &self,
        action: &str,
        attributes: &Attributes,
        hidden: &Attributes,
    ) -> String;

    /// Closing tag matching [`MarkupHelper::form_open_multipart`].
    fn form_close(&self) -> String {
        "</form>".to_string()
    }
}

/// Built-in helper set covering every built-in plain, combo and choice kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardHelper;

impl StandardHelper {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupHelper for StandardHelper {
    fn input(
        &self,
        kind: &FieldKind,
        name: &str,
        value: &FieldValue,
        attributes: &Attributes,
    ) -> Result<String> {
        let value = value.as_str();
        match kind.as_str() {
            "text" | "password" | "hidden" | "submit" | "reset" => {
                Ok(input_tag(kind.as_str(), name, Some(value), attributes))
            }
            "upload" => Ok(input_tag("file", name, None, attributes)),
            "textarea" => Ok(textarea(name, value, attributes)),
            "button" => Ok(button(name, value, attributes)),
            _ => Err(unsupported(kind)),
        }
    }

    fn combo(
        &self,
        kind: &FieldKind,
        name: &str,
        options: &FieldOptions,
        value: &FieldValue,
        attributes: &Attributes,
    ) -> Result<String> {
        match kind.as_str() {
            "dropdown" => Ok(select(name, options, value, attributes, false)),
            "multiselect" => Ok(select(name, options, value, attributes, true)),
            _ => Err(unsupported(kind)),
        }
    }

    fn choice(&self, kind: &FieldKind, name: &str, value: &str, checked: bool) -> Result<String> {
        match kind.as_str() {
            "radio" | "checkbox" => {
                let mut extra = Attributes::new();
                if checked {
                    extra.insert("checked".into(), "checked".into());
                }
                Ok(input_tag(kind.as_str(), name, Some(value), &extra))
            }
            _ => Err(unsupported(kind)),
        }
    }

    fn form_open_multipart(
        &self,
        action: &str,
        attributes: &Attributes,
        hidden: &Attributes,
    ) -> String {
        let mut merged = Attributes::new();
        merged.insert("action".into(), action.into());
        merged.insert("enctype".into(), "multipart/form-data".into());
        merged.insert("method".into(), "post".into());
        merged.insert("accept-charset".into(), "utf-8".into());
        merged.extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.insert("enctype".into(), "multipart/form-data".into());

        let mut html = String::from("<form");
        write_attributes(&mut html, &merged);
        html.push('>');
        for (name, value) in hidden {
            html.push_str(&input_tag("hidden", name, Some(value), &Attributes::new()));
        }
        html
    }
}

fn unsupported(kind: &FieldKind) -> FormsError {
    FormsError::UnsupportedHelper {
        kind: kind.to_string(),
    }
}

/// `<input type=.. name=.. value=.. ... />`. Extra attributes override the
/// generated ones.
fn input_tag(input_type: &str, name: &str, value: Option<&str>, extra: &Attributes) -> String {
    let mut attributes = Attributes::new();
    attributes.insert("type".into(), input_type.into());
    attributes.insert("name".into(), name.into());
    if let Some(value) = value {
        attributes.insert("value".into(), value.into());
    }
    attributes.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));

    let mut html = String::from("<input");
    write_attributes(&mut html, &attributes);
    html.push_str(" />");
    html
}

fn textarea(name: &str, value: &str, extra: &Attributes) -> String {
    let mut attributes = Attributes::new();
    attributes.insert("name".into(), name.into());
    attributes.insert("cols".into(), "40".into());
    attributes.insert("rows".into(), "10".into());
    attributes.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));

    let mut html = String::from("<textarea");
    write_attributes(&mut html, &attributes);
    html.push('>');
    html.push_str(&encode_text(value));
    html.push_str("</textarea>");
    html
}

fn button(name: &str, content: &str, extra: &Attributes) -> String {
    let mut attributes = Attributes::new();
    attributes.insert("name".into(), name.into());
    attributes.insert("type".into(), "button".into());
    attributes.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));

    let mut html = String::from("<button");
    write_attributes(&mut html, &attributes);
    html.push('>');
    html.push_str(&encode_text(content));
    html.push_str("</button>");
    html
}

fn select(
    name: &str,
    options: &FieldOptions,
    value: &FieldValue,
    extra: &Attributes,
    multiple: bool,
) -> String {
    let mut attributes = Attributes::new();
    attributes.insert("name".into(), name.into());
    if multiple {
        attributes.insert("multiple".into(), "multiple".into());
    }
    attributes.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));

    let mut html = String::from("<select");
    write_attributes(&mut html, &attributes);
    html.push_str(">\n");
    for (option_value, label) in options {
        html.push_str("<option value=\"");
        html.push_str(&encode_double_quoted_attribute(option_value));
        html.push('"');
        if value.contains(option_value) {
            html.push_str(" selected=\"selected\"");
        }
        html.push('>');
        html.push_str(&encode_text(label));
        html.push_str("</option>\n");
    }
    html.push_str("</select>");
    html
}

/// Append ` name="value"` for every attribute, in map order, escaping values.
/// Names that could break out of the tag are skipped.
pub fn write_attributes(out: &mut String, attributes: &Attributes) {
    for (name, value) in attributes {
        if !is_valid_attribute_name(name) {
            warn!(attribute = %name, "skipping invalid attribute name");
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '>' | '<' | '/' | '=')
        })
}
