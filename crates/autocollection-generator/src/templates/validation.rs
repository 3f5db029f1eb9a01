//! Template validation
//!
//! Templates are checked when they enter a catalog, so a body that would leave
//! a placeholder unresolved is rejected at authoring time rather than rendered.

use crate::templates::error::TemplateError;
use crate::templates::parser::{ParsedTemplate, Placeholder, TemplateParser};

/// Template validation engine
pub struct ValidationEngine;

impl ValidationEngine {
    /// Validate that a template body is usable for synthesis
    ///
    /// # Arguments
    /// * `resource` - Resource name, used in error messages
    /// * `parsed` - Parsed template body
    ///
    /// # Returns
    /// Ok if every mandatory placeholder is present
    pub fn validate_template(resource: &str, parsed: &ParsedTemplate) -> Result<(), TemplateError> {
        if parsed.segments.is_empty() {
            return Err(TemplateError::EmptyTemplate(resource.to_string()));
        }

        for placeholder in Placeholder::ALL {
            if !parsed.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder {
                    template: resource.to_string(),
                    placeholder: placeholder.token(),
                });
            }
        }

        Ok(())
    }

    /// Placeholders still present in rendered text
    pub fn find_unresolved(rendered: &str) -> Vec<Placeholder> {
        TemplateParser::extract_placeholders(rendered).into_iter().collect()
    }
}
