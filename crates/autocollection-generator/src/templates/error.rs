//! Template error types

use thiserror::Error;

/// Errors raised while loading or validating templates
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A template body lacks a mandatory placeholder
    #[error("Template {template} is missing placeholder {placeholder}")]
    MissingPlaceholder {
        /// Resource name of the template
        template: String,
        /// Placeholder token, e.g. `{ClassName}`
        placeholder: String,
    },

    /// A template body is empty
    #[error("Template {0} is empty")]
    EmptyTemplate(String),

    /// IO error while reading a template resource
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
