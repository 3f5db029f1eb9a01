//! Template engine for placeholder substitution
//!
//! Substitution is literal and single-pass: each placeholder segment is replaced
//! by its bound value and the value itself is never scanned again.

use crate::templates::parser::{ParsedTemplate, Placeholder, Segment, TemplateParser};

/// Values bound to the five placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    /// `{CollectionType}`
    pub collection_type: String,
    /// `{BackingField}`
    pub backing_field: String,
    /// `{Namespace}`
    pub namespace: String,
    /// `{ClassName}`
    pub class_name: String,
    /// `{Accessor}`
    pub accessor: String,
}

impl Bindings {
    /// Value bound to a placeholder
    pub fn value(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::CollectionType => &self.collection_type,
            Placeholder::BackingField => &self.backing_field,
            Placeholder::Namespace => &self.namespace,
            Placeholder::ClassName => &self.class_name,
            Placeholder::Accessor => &self.accessor,
        }
    }
}

/// Renders parsed templates
pub struct TemplateEngine;

impl TemplateEngine {
    /// Render a parsed template with the given bindings
    pub fn render(template: &ParsedTemplate, bindings: &Bindings) -> String {
        let capacity = template
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.len(),
                Segment::Placeholder(placeholder) => bindings.value(*placeholder).len(),
            })
            .sum();

        let mut result = String::with_capacity(capacity);
        for segment in &template.segments {
            match segment {
                Segment::Text(text) => result.push_str(text),
                Segment::Placeholder(placeholder) => result.push_str(bindings.value(*placeholder)),
            }
        }
        result
    }

    /// Parse and render raw template content
    pub fn render_str(content: &str, bindings: &Bindings) -> String {
        Self::render(&TemplateParser::parse(content), bindings)
    }
}
