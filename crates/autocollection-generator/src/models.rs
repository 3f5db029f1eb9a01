//! Core data models for collection synthesis

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::{Accessibility, ArgumentValue, AttributeInstance, SymbolId, TypeDeclaration};

/// Namespace every annotation is declared in
pub const ANNOTATION_NAMESPACE: &str = "AutoCollection";

/// A supported collection contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Contract {
    /// `IReadOnlyList<T>`
    ReadOnlyList,
    /// `IList<T>`
    List,
}

impl Contract {
    /// Every supported contract
    pub const ALL: [Contract; 2] = [Contract::ReadOnlyList, Contract::List];

    /// Name used in template resource names
    pub fn name(&self) -> &'static str {
        match self {
            Contract::ReadOnlyList => "ReadOnlyList",
            Contract::List => "List",
        }
    }

    /// Interface the synthesized fragment implements
    pub fn interface(&self) -> &'static str {
        match self {
            Contract::ReadOnlyList => "IReadOnlyList",
            Contract::List => "IList",
        }
    }

    /// Annotation requesting this contract
    pub fn spec(&self) -> &'static AnnotationSpec {
        match self {
            Contract::ReadOnlyList => &READ_ONLY_LIST,
            Contract::List => &LIST,
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable descriptor of one generation contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    /// Simple name of the annotation class
    pub name: &'static str,
    /// Constructor parameter carrying the element type
    pub element_type_param_name: &'static str,
    /// Constructor parameter carrying the optional backing field name
    pub backing_field_param_name: &'static str,
    /// Contract this annotation requests
    pub contract: Contract,
}

/// `[GenerateReadOnlyList(typeof(T), backingField?)]`
pub static READ_ONLY_LIST: AnnotationSpec = AnnotationSpec {
    name: "GenerateReadOnlyList",
    element_type_param_name: "collectionType",
    backing_field_param_name: "backingField",
    contract: Contract::ReadOnlyList,
};

/// `[GenerateList(typeof(T), backingField?)]`
pub static LIST: AnnotationSpec = AnnotationSpec {
    name: "GenerateList",
    element_type_param_name: "collectionType",
    backing_field_param_name: "backingField",
    contract: Contract::List,
};

impl AnnotationSpec {
    /// Every annotation the generator understands
    pub fn all() -> [&'static AnnotationSpec; 2] {
        [&READ_ONLY_LIST, &LIST]
    }

    /// Fully-qualified metadata name within the given namespace
    pub fn metadata_name_in(&self, namespace: &str) -> String {
        if namespace.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", namespace, self.name)
        }
    }

    /// Fully-qualified metadata name within [`ANNOTATION_NAMESPACE`]
    pub fn metadata_name(&self) -> String {
        self.metadata_name_in(ANNOTATION_NAMESPACE)
    }
}

/// Which of the two code shapes applies to a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// The fragment owns a private backing store and a constructor
    AutoBacked,
    /// The fragment delegates to a field declared by the user
    UserBacked,
}

impl Shape {
    /// Suffix used in template resource names
    pub fn resource_suffix(&self) -> &'static str {
        match self {
            Shape::AutoBacked => "Default",
            Shape::UserBacked => "Backed",
        }
    }
}

/// A declaration selected for synthesis under one annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Host symbol handle
    pub symbol: SymbolId,
    /// Containing namespace, empty for the global namespace
    pub namespace: String,
    /// Declared accessibility
    pub accessibility: Accessibility,
    /// Simple type name
    pub name: String,
    /// Whether the declaration is partial
    pub is_partial: bool,
    /// Annotation instances attached to the declaration
    pub attributes: Vec<AttributeInstance>,
}

impl Candidate {
    /// Build a candidate from a resolved declaration
    pub fn from_declaration(declaration: &TypeDeclaration) -> Self {
        Self {
            symbol: declaration.symbol,
            namespace: declaration.namespace.clone().unwrap_or_default(),
            accessibility: declaration.accessibility,
            name: declaration.name.clone(),
            is_partial: declaration.is_partial,
            attributes: declaration.attributes.clone(),
        }
    }

    /// Whether the declaration lives in the global namespace
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }
}

/// Parameter name to argument value, in name order
pub type ParameterMap = BTreeMap<String, ArgumentValue>;

/// Generation parameters validated once at the annotation boundary
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Display text of the element type
    pub element_type: String,
    /// Name of the user-supplied backing field, if any
    pub backing_field: Option<String>,
}

/// Final synthesized output for one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedUnit {
    /// Identity, unique within one pass
    pub identity: String,
    /// Complete source text including the generated header
    pub text: String,
}
