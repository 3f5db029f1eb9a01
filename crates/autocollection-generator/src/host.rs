//! Host-facing model: resolved declarations in, published units out
//!
//! The host compiler owns parsing and semantic analysis. It hands the generator
//! a [`CompilationSnapshot`] of already-resolved type declarations and receives
//! generated units through an [`OutputSink`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Opaque handle the host uses to identify a resolved type symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u64);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared accessibility of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// `public`
    Public,
    /// `internal`
    Internal,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `protected internal`
    ProtectedInternal,
    /// `private protected`
    PrivateProtected,
}

impl Accessibility {
    /// Keyword text as it appears in source
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::PrivateProtected => "private protected",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Syntactic kind of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// `class`
    Class,
    /// `struct`
    Struct,
    /// `record`
    Record,
    /// `interface`
    Interface,
    /// `enum`
    Enum,
}

/// A constructor argument value as resolved by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgumentValue {
    /// Explicit or defaulted `null`
    Null,
    /// A `typeof(...)` argument, carrying the display text of the type
    Type(String),
    /// A string argument, e.g. from `nameof(...)`
    String(String),
}

impl ArgumentValue {
    /// Text of a non-null argument
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgumentValue::Null => None,
            ArgumentValue::Type(text) | ArgumentValue::String(text) => Some(text),
        }
    }

    /// Whether the argument is null
    pub fn is_null(&self) -> bool {
        matches!(self, ArgumentValue::Null)
    }
}

/// One annotation instance attached to a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInstance {
    /// Simple name of the attribute class
    pub name: String,
    /// Namespace of the attribute class, empty for the global namespace
    #[serde(default)]
    pub namespace: String,
    /// Constructor parameter names in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Constructor arguments, ordered like `parameters`
    #[serde(default)]
    pub arguments: Vec<ArgumentValue>,
}

impl AttributeInstance {
    /// Fully-qualified metadata name (`Namespace.Name`)
    pub fn metadata_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// A resolved type declaration from the host compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Host symbol handle
    pub symbol: SymbolId,
    /// Syntactic kind
    pub kind: DeclarationKind,
    /// Simple type name
    pub name: String,
    /// Containing namespace, `None` for the global namespace
    #[serde(default)]
    pub namespace: Option<String>,
    /// Declared accessibility
    pub accessibility: Accessibility,
    /// Whether the declaration carries the `partial` modifier
    #[serde(default)]
    pub is_partial: bool,
    /// Attached annotation instances in source order
    #[serde(default)]
    pub attributes: Vec<AttributeInstance>,
}

impl TypeDeclaration {
    /// Whether any attached annotation has the given metadata name
    pub fn has_attribute(&self, metadata_name: &str) -> bool {
        self.attributes
            .iter()
            .any(|attribute| attribute.metadata_name() == metadata_name)
    }
}

/// Immutable snapshot of the host compilation's declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationSnapshot {
    /// Name of the assembly being compiled
    #[serde(default)]
    pub assembly_name: String,
    /// Declarations in the stable order the host presents them
    #[serde(default)]
    pub declarations: Vec<TypeDeclaration>,
}

impl CompilationSnapshot {
    /// Create an empty snapshot
    pub fn new(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            declarations: Vec::new(),
        }
    }

    /// Add a declaration
    pub fn with_declaration(mut self, declaration: TypeDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str) -> Result<Self, GenerationError> {
        serde_json::from_str(content)
            .map_err(|e| GenerationError::InvalidSnapshot(e.to_string()))
    }

    /// Parse a snapshot from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, GenerationError> {
        serde_yaml::from_str(content)
            .map_err(|e| GenerationError::InvalidSnapshot(e.to_string()))
    }

    /// Load a snapshot file, choosing the format from the extension
    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }
}

/// Output surface exposed by the host
pub trait OutputSink {
    /// Publish one unit; identities must be unique within a pass
    fn publish(&mut self, identity: &str, text: &str) -> Result<(), GenerationError>;
}

/// Sink that keeps published units in memory, ordered by identity
#[derive(Debug, Default, Clone)]
pub struct InMemorySink {
    units: BTreeMap<String, String>,
    order: Vec<String>,
}

impl InMemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Text published under an identity
    pub fn get(&self, identity: &str) -> Option<&str> {
        self.units.get(identity).map(String::as_str)
    }

    /// Identities in publication order
    pub fn identities(&self) -> &[String] {
        &self.order
    }

    /// Number of published units
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing was published
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All units keyed by identity
    pub fn units(&self) -> &BTreeMap<String, String> {
        &self.units
    }
}

impl OutputSink for InMemorySink {
    fn publish(&mut self, identity: &str, text: &str) -> Result<(), GenerationError> {
        if self.units.contains_key(identity) {
            return Err(GenerationError::IdentityCollision(identity.to_string()));
        }
        self.units.insert(identity.to_string(), text.to_string());
        self.order.push(identity.to_string());
        Ok(())
    }
}

/// Cancellation owned by the host
pub trait CancellationSignal: Sync {
    /// Whether the host asked the pass to stop
    fn is_cancelled(&self) -> bool;
}

/// Signal that never fires
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Flag-backed signal the host can trip from another thread
#[derive(Debug, Default, Clone)]
pub struct CancellationFlag {
    flag: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Create an untripped flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl CancellationSignal for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration() -> TypeDeclaration {
        TypeDeclaration {
            symbol: SymbolId(1),
            kind: DeclarationKind::Class,
            name: "DemoClass".to_string(),
            namespace: Some("Example".to_string()),
            accessibility: Accessibility::Public,
            is_partial: true,
            attributes: vec![AttributeInstance {
                name: "GenerateReadOnlyList".to_string(),
                namespace: "AutoCollection".to_string(),
                parameters: vec!["collectionType".to_string(), "backingField".to_string()],
                arguments: vec![ArgumentValue::Type("string".to_string()), ArgumentValue::Null],
            }],
        }
    }

    #[test]
    fn test_accessibility_keywords() {
        assert_eq!(Accessibility::Public.keyword(), "public");
        assert_eq!(Accessibility::Internal.keyword(), "internal");
        assert_eq!(Accessibility::ProtectedInternal.keyword(), "protected internal");
        assert_eq!(Accessibility::PrivateProtected.to_string(), "private protected");
    }

    #[test]
    fn test_metadata_name() {
        let decl = declaration();
        assert_eq!(decl.attributes[0].metadata_name(), "AutoCollection.GenerateReadOnlyList");
        assert!(decl.has_attribute("AutoCollection.GenerateReadOnlyList"));
        assert!(!decl.has_attribute("GenerateReadOnlyList"));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "assembly_name": "Demo",
            "declarations": [{
                "symbol": 7,
                "kind": "class",
                "name": "DemoClass",
                "namespace": "Example",
                "accessibility": "internal",
                "is_partial": true,
                "attributes": [{
                    "name": "GenerateList",
                    "namespace": "AutoCollection",
                    "parameters": ["collectionType", "backingField"],
                    "arguments": [{"kind": "type", "value": "int"}, {"kind": "null"}]
                }]
            }]
        }"#;

        let snapshot = CompilationSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.declarations.len(), 1);
        let decl = &snapshot.declarations[0];
        assert_eq!(decl.symbol, SymbolId(7));
        assert_eq!(decl.accessibility, Accessibility::Internal);
        assert_eq!(decl.attributes[0].arguments[1], ArgumentValue::Null);
    }

    #[test]
    fn test_snapshot_from_yaml() {
        let yaml = r#"
assembly_name: Demo
declarations:
  - symbol: 1
    kind: class
    name: Things
    accessibility: public
    is_partial: true
"#;
        let snapshot = CompilationSnapshot::from_yaml(yaml).unwrap();
        assert_eq!(snapshot.declarations[0].namespace, None);
        assert!(snapshot.declarations[0].attributes.is_empty());
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(CompilationSnapshot::from_json("{ not json").is_err());
    }

    #[test]
    fn test_in_memory_sink_rejects_duplicates() {
        let mut sink = InMemorySink::new();
        sink.publish("Example.DemoClass.g.cs", "a").unwrap();
        let err = sink.publish("Example.DemoClass.g.cs", "b").unwrap_err();
        assert!(matches!(err, GenerationError::IdentityCollision(_)));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.get("Example.DemoClass.g.cs"), Some("a"));
    }

    #[test]
    fn test_cancellation_flag() {
        let flag = CancellationFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_cancelled());
        flag.cancel();
        assert!(observer.is_cancelled());
        assert!(!NeverCancelled.is_cancelled());
    }
}
