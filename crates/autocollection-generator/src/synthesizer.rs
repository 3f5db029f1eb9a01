//! Code synthesis for one candidate

use crate::host::Accessibility;
use crate::identity::ScopeName;
use crate::templates::{Bindings, Template, TemplateEngine};

/// Header marking a unit as generated
pub const GENERATED_HEADER: &str = "\
//------------------------------------------------------------------------------
// <auto-generated>
//     This code was generated by AutoCollection.
//
//     Changes to this file may cause incorrect behavior and will be lost if
//     the code is regenerated.
// </auto-generated>
//------------------------------------------------------------------------------

";

/// Everything the synthesizer needs about one candidate
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    /// Declaration name
    pub class_name: &'a str,
    /// Namespace or global placeholder
    pub scope: &'a ScopeName,
    /// Declared accessibility
    pub accessibility: Accessibility,
    /// Element type text
    pub element_type: &'a str,
    /// Resolved backing field name
    pub backing_field: &'a str,
}

impl SynthesisInput<'_> {
    /// Placeholder bindings for this input
    pub fn bindings(&self) -> Bindings {
        Bindings {
            collection_type: self.element_type.to_string(),
            backing_field: self.backing_field.to_string(),
            namespace: self.scope.as_str().to_string(),
            class_name: self.class_name.to_string(),
            accessor: self.accessibility.keyword().to_string(),
        }
    }
}

/// Renders companion source text
pub struct CodeSynthesizer;

impl CodeSynthesizer {
    /// Render the full unit text for one candidate
    pub fn synthesize(input: &SynthesisInput<'_>, template: &Template) -> String {
        let body = TemplateEngine::render(&template.parsed, &input.bindings());
        let mut text = String::with_capacity(GENERATED_HEADER.len() + body.len());
        text.push_str(GENERATED_HEADER);
        text.push_str(&body);
        text
    }
}
