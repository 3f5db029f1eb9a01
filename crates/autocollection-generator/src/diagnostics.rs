//! Diagnostics reported back to the host

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::SymbolId;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Generation continued
    Warning,
    /// Something was not generated
    Error,
}

/// Stable diagnostic identifiers
pub mod ids {
    /// Annotation instance not matched by name
    pub const ANNOTATION_NOT_MATCHED: &str = "AC0001";
    /// Element-type argument absent or null
    pub const MISSING_ELEMENT_TYPE: &str = "AC0002";
    /// Target declaration is not partial
    pub const NOT_PARTIAL: &str = "AC0003";
    /// Annotation found on a declaration that is not a class
    pub const NOT_A_CLASS: &str = "AC0004";
    /// No template for a contract/shape pair
    pub const MISSING_TEMPLATE: &str = "AC0100";
}

/// A diagnostic about one declaration or one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable identifier, see [`ids`]
    pub id: String,
    /// Severity
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Declaration the diagnostic is about, if any
    pub symbol: Option<SymbolId>,
    /// Simple name of that declaration
    pub type_name: Option<String>,
}

impl Diagnostic {
    /// Error diagnostic attached to a declaration
    pub fn for_declaration(
        id: &str,
        symbol: SymbolId,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            severity: Severity::Error,
            message: message.into(),
            symbol: Some(symbol),
            type_name: Some(type_name.into()),
        }
    }

    /// Same diagnostic at another severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether this diagnostic means something was not generated
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Error diagnostic about a whole contract
    pub fn for_contract(id: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            severity: Severity::Error,
            message: message.into(),
            symbol: None,
            type_name: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match (&self.type_name, self.symbol) {
            (Some(name), Some(symbol)) => {
                write!(f, "{} {}: {} ({} {})", severity, self.id, self.message, name, symbol)
            }
            _ => write!(f, "{} {}: {}", severity, self.id, self.message),
        }
    }
}
