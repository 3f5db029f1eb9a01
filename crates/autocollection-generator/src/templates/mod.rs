//! Template store, resolution and placeholder substitution
//!
//! Template bodies are keyed by [`TemplateKey`] (contract and shape), parsed and
//! validated once when they enter a [`TemplateCatalog`], and rendered by
//! single-pass substitution in the [`TemplateEngine`].

pub mod catalog;
pub mod engine;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod validation;

pub use catalog::{CatalogStats, Template, TemplateCatalog, TemplateKey};
pub use engine::{Bindings, TemplateEngine};
pub use error::TemplateError;
pub use parser::{ParsedTemplate, Placeholder, Segment, TemplateParser};
pub use resolver::{Resolution, TemplateResolver};
pub use validation::ValidationEngine;
