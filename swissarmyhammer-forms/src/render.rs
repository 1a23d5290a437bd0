//! Rendering a descriptor to markup.
//!
//! Form-wide default attributes are merged under the field's own
//! attributes on every render; the field wins on key collision. The merge
//! produces a fresh map, so stored descriptors never change while rendering.

use tracing::debug;

use crate::error::Result;
use crate::helper::{write_attributes, MarkupHelper};
use crate::types::{Attributes, FieldDescriptor, FieldOptions, FieldValue, RenderStrategy};

/// Defaults first, then field attributes over them.
///
/// Keys keep the position of their first appearance, so default-only keys
/// come first, followed by field-only keys.
pub fn merge_attributes(defaults: &Attributes, field: &Attributes) -> Attributes {
    let mut merged = defaults.clone();
    for (name, value) in field {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

impl FieldDescriptor {
    /// Render this field with the given default attributes.
    pub fn render(&self, defaults: &Attributes, helper: &dyn MarkupHelper) -> Result<String> {
        match &self.strategy {
            RenderStrategy::PlainInput => {
                let merged = merge_attributes(defaults, &self.attributes);
                helper.input(&self.kind, &self.name, &self.value, &merged)
            }
            RenderStrategy::RawAttribute => Ok(self.render_raw_input(defaults)),
            RenderStrategy::Combo { options } => {
                let merged = merge_attributes(defaults, &self.attributes);
                helper.combo(&self.kind, &self.name, options, &self.value, &merged)
            }
            RenderStrategy::RadioGroup { options } => self.render_choices(options, helper),
        }
    }

    /// Self-closing `<input />` with every merged attribute plus `value` and
    /// `type`, which always reflect the descriptor. Only the first entry of a
    /// multi-value survives.
    fn render_raw_input(&self, defaults: &Attributes) -> String {
        if let FieldValue::Multiple(values) = &self.value {
            if values.len() > 1 {
                debug!(
                    field = %self.name,
                    kind = %self.kind,
                    dropped = values.len() - 1,
                    "raw input keeps only the first value"
                );
            }
        }

        let mut merged = merge_attributes(defaults, &self.attributes);
        merged.insert("value".into(), self.value.as_str().to_string());
        merged.insert("type".into(), self.kind.to_string());

        let mut html = String::from("<input");
        write_attributes(&mut html, &merged);
        html.push_str(" />");
        html
    }

    /// `<label>{input} {label}</label>` per option, in option order.
    fn render_choices(&self, options: &FieldOptions, helper: &dyn MarkupHelper) -> Result<String> {
        let mut html = String::new();
        for (option_value, label) in options {
            let checked = self.value.contains(option_value);
            let input = helper.choice(&self.kind, &self.name, option_value, checked)?;
            html.push_str("<label>");
            html.push_str(&input);
            html.push(' ');
            html.push_str(&html_escape::encode_text(label));
            html.push_str("</label>");
        }
        Ok(html)
    }
}
