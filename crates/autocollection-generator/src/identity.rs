//! Output identities and the global-scope namespace placeholder
//!
//! Namespaced candidates are identified by `{namespace}.{TypeName}{suffix}`,
//! which is unique per compilation. Global-scope candidates have no namespace
//! to key on, so each one receives a fresh token that stands in for the
//! namespace in both the identity and the rendered text.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Candidate;

/// Prefix of a global-scope placeholder namespace
pub const GLOBAL_PREFIX: &str = "Global_";

/// Supplies placeholder tokens for global-scope candidates
pub trait NamespaceTokenSource: Send + Sync {
    /// A token unique within the current pass
    fn next_token(&self) -> String;
}

/// Fresh uuid v4 per call
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokens;

impl NamespaceTokenSource for RandomTokens {
    fn next_token(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Zero-padded counter, for reproducible output
#[derive(Debug, Default)]
pub struct SequentialTokens {
    next: AtomicU64,
}

impl SequentialTokens {
    /// Start counting from zero
    pub fn new() -> Self {
        Self::default()
    }
}

impl NamespaceTokenSource for SequentialTokens {
    fn next_token(&self) -> String {
        format!("{:032x}", self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// Which token source a generator uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPolicy {
    /// [`RandomTokens`]
    #[default]
    Random,
    /// [`SequentialTokens`]
    Sequential,
}

impl TokenPolicy {
    /// Build the token source for this policy
    pub fn source(&self) -> Box<dyn NamespaceTokenSource> {
        match self {
            TokenPolicy::Random => Box::new(RandomTokens),
            TokenPolicy::Sequential => Box::new(SequentialTokens::new()),
        }
    }
}

/// Namespace text a candidate is rendered and identified under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeName {
    /// The declaration's own namespace
    Namespace(String),
    /// A generated placeholder for the global namespace
    Global(String),
}

impl ScopeName {
    /// Scope for a candidate, drawing a token when it is global
    pub fn for_candidate(candidate: &Candidate, tokens: &dyn NamespaceTokenSource) -> Self {
        if candidate.is_global() {
            ScopeName::Global(format!("{}{}", GLOBAL_PREFIX, tokens.next_token()))
        } else {
            ScopeName::Namespace(candidate.namespace.clone())
        }
    }

    /// Namespace text
    pub fn as_str(&self) -> &str {
        match self {
            ScopeName::Namespace(name) | ScopeName::Global(name) => name,
        }
    }

    /// Whether this is a global-scope placeholder
    pub fn is_global(&self) -> bool {
        matches!(self, ScopeName::Global(_))
    }
}

/// Identity of a candidate unit
pub fn unit_identity(scope: &ScopeName, type_name: &str, suffix: &str) -> String {
    format!("{}.{}{}", scope.as_str(), type_name, suffix)
}

/// Identity of an annotation definition unit
pub fn definition_identity(annotation_name: &str) -> String {
    format!("{}.Attribute.g.cs", annotation_name)
}
