#![warn(missing_docs)]

//! Declarative collection synthesis for annotated partial classes
//!
//! Classes marked with `GenerateReadOnlyList` or `GenerateList` receive a
//! companion source unit implementing `IReadOnlyList<T>` or `IList<T>`, either
//! over a generated backing store or over a field the user already declared.
//! The host compilation is abstracted as a [`CompilationSnapshot`] plus an
//! [`OutputSink`], so passes can run in-process, from the CLI, or in tests.

pub mod annotation;
pub mod config;
pub mod definition;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod identity;
pub mod models;
pub mod pipeline;
pub mod synthesizer;
pub mod templates;

// Re-export public API
pub use annotation::ParameterExtractor;
pub use config::{ConfigError, ConfigLoader, GeneratorConfig};
pub use definition::annotation_definition;
pub use diagnostics::{Diagnostic, Severity};
pub use error::GenerationError;
pub use host::{
    Accessibility, ArgumentValue, AttributeInstance, CancellationFlag, CancellationSignal,
    CompilationSnapshot, DeclarationKind, InMemorySink, NeverCancelled, OutputSink, SymbolId,
    TypeDeclaration,
};
pub use identity::{
    NamespaceTokenSource, RandomTokens, ScopeName, SequentialTokens, TokenPolicy, GLOBAL_PREFIX,
};
pub use models::{
    AnnotationSpec, Candidate, Contract, GenerationParameters, ParameterMap, RenderedUnit, Shape,
    ANNOTATION_NAMESPACE, LIST, READ_ONLY_LIST,
};
pub use pipeline::{CacheStats, ContractRun, GeneratorSet, PassReport, SourceGenerator};
pub use synthesizer::{CodeSynthesizer, SynthesisInput, GENERATED_HEADER};
pub use templates::{
    Resolution, Template, TemplateCatalog, TemplateError, TemplateKey, TemplateResolver,
};
