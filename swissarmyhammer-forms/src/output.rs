//! Result of a full render pass, as handed to the presentation layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::FieldKind;

/// One rendered field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedField {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub name: String,
    pub title: String,
    pub html: String,
}

/// Form envelope plus every rendered field, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderOutput {
    pub open: String,
    pub close: String,
    pub fields: IndexMap<String, RenderedField>,
}

impl RenderOutput {
    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields.get(name)
    }

    /// Open tag, every field's markup, close tag.
    pub fn to_html(&self) -> String {
        let mut html = self.open.clone();
        for field in self.fields.values() {
            html.push_str(&field.html);
        }
        html.push_str(&self.close);
        html
    }
}
