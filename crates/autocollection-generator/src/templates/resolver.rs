//! Shape selection and template lookup

use std::sync::Arc;

use crate::diagnostics::{ids, Diagnostic};
use crate::models::{Contract, GenerationParameters, Shape};
use crate::templates::catalog::{Template, TemplateCatalog, TemplateKey};

/// Default name of the owned backing store
pub const DEFAULT_BACKING_FIELD: &str = "_items";

/// Shape and backing field chosen for one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Selected shape
    pub shape: Shape,
    /// Backing field name, filled with the default for [`Shape::AutoBacked`]
    pub backing_field: String,
    /// Template variant to render
    pub key: TemplateKey,
}

/// Maps generation parameters to a shape and a template
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    default_backing_field: String,
}

impl TemplateResolver {
    /// Create a resolver with the given default backing field
    pub fn new(default_backing_field: impl Into<String>) -> Self {
        Self {
            default_backing_field: default_backing_field.into(),
        }
    }

    /// Default backing field name
    pub fn default_backing_field(&self) -> &str {
        &self.default_backing_field
    }

    /// Shape implied by the parameters
    pub fn shape_of(params: &GenerationParameters) -> Shape {
        if params.backing_field.is_some() {
            Shape::UserBacked
        } else {
            Shape::AutoBacked
        }
    }

    /// Resolve shape, backing field and template key
    pub fn resolve(&self, contract: Contract, params: &GenerationParameters) -> Resolution {
        let shape = Self::shape_of(params);
        let backing_field = params
            .backing_field
            .clone()
            .unwrap_or_else(|| self.default_backing_field.clone());

        Resolution {
            shape,
            backing_field,
            key: TemplateKey::new(contract, shape),
        }
    }

    /// Locate the template for a key
    ///
    /// A miss is a configuration fault for the whole contract.
    pub fn locate(catalog: &TemplateCatalog, key: &TemplateKey) -> Result<Arc<Template>, Diagnostic> {
        catalog.get(key).ok_or_else(|| {
            Diagnostic::for_contract(
                ids::MISSING_TEMPLATE,
                format!(
                    "template resource '{}' not found for contract {}",
                    key.resource_name(),
                    key.contract
                ),
            )
        })
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BACKING_FIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(backing_field: Option<&str>) -> GenerationParameters {
        GenerationParameters {
            element_type: "string".to_string(),
            backing_field: backing_field.map(str::to_string),
        }
    }

    #[test]
    fn test_absent_backing_field_is_auto_backed() {
        let resolution = TemplateResolver::default().resolve(Contract::ReadOnlyList, &params(None));
        assert_eq!(resolution.shape, Shape::AutoBacked);
        assert_eq!(resolution.backing_field, "_items");
        assert_eq!(resolution.key.resource_name(), "ReadOnlyList.Default.txt");
    }

    #[test]
    fn test_present_backing_field_is_user_backed() {
        let resolution =
            TemplateResolver::default().resolve(Contract::List, &params(Some("_specialItems")));
        assert_eq!(resolution.shape, Shape::UserBacked);
        assert_eq!(resolution.backing_field, "_specialItems");
        assert_eq!(resolution.key.resource_name(), "List.Backed.txt");
    }

    #[test]
    fn test_configured_default_backing_field() {
        let resolver = TemplateResolver::new("_store");
        let resolution = resolver.resolve(Contract::List, &params(None));
        assert_eq!(resolution.backing_field, "_store");
    }

    #[test]
    fn test_locate_missing_template_is_configuration_fault() {
        let catalog = TemplateCatalog::new();
        let key = TemplateKey::new(Contract::List, Shape::AutoBacked);
        let diagnostic = TemplateResolver::locate(&catalog, &key).unwrap_err();
        assert_eq!(diagnostic.id, ids::MISSING_TEMPLATE);
        assert!(diagnostic.message.contains("List.Default.txt"));
    }

    #[test]
    fn test_locate_builtin() {
        let key = TemplateKey::new(Contract::ReadOnlyList, Shape::UserBacked);
        assert!(TemplateResolver::locate(TemplateCatalog::builtin(), &key).is_ok());
    }
}
