//! Template catalog keyed by contract and shape
//!
//! The built-in catalog embeds the shipped template bodies and is initialized
//! once per process. A directory catalog reads `{Contract}.{Backed|Default}.txt`
//! files; a missing file is only reported when a pass needs that pair.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::models::{Contract, Shape};
use crate::templates::error::TemplateError;
use crate::templates::parser::{ParsedTemplate, TemplateParser};
use crate::templates::validation::ValidationEngine;

/// Identifies one template variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateKey {
    /// Collection contract
    pub contract: Contract,
    /// Code shape
    pub shape: Shape,
}

impl TemplateKey {
    /// Create a key
    pub fn new(contract: Contract, shape: Shape) -> Self {
        Self { contract, shape }
    }

    /// Every contract/shape pair
    pub fn all() -> impl Iterator<Item = TemplateKey> {
        Contract::ALL.into_iter().flat_map(|contract| {
            [Shape::AutoBacked, Shape::UserBacked]
                .into_iter()
                .map(move |shape| TemplateKey::new(contract, shape))
        })
    }

    /// Resource name, e.g. `ReadOnlyList.Default.txt`
    pub fn resource_name(&self) -> String {
        format!("{}.{}.txt", self.contract.name(), self.shape.resource_suffix())
    }
}

/// A validated template body
#[derive(Debug, Clone)]
pub struct Template {
    /// Variant this body implements
    pub key: TemplateKey,
    /// Raw body text
    pub content: String,
    /// Parsed body
    pub parsed: ParsedTemplate,
}

impl Template {
    /// Parse and validate a template body
    pub fn new(key: TemplateKey, content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();
        let parsed = TemplateParser::parse(&content);
        ValidationEngine::validate_template(&key.resource_name(), &parsed)?;
        Ok(Self {
            key,
            content,
            parsed,
        })
    }
}

const BUILTIN_SOURCES: [(Contract, Shape, &str); 4] = [
    (
        Contract::ReadOnlyList,
        Shape::AutoBacked,
        include_str!("../../templates/ReadOnlyList.Default.txt"),
    ),
    (
        Contract::ReadOnlyList,
        Shape::UserBacked,
        include_str!("../../templates/ReadOnlyList.Backed.txt"),
    ),
    (
        Contract::List,
        Shape::AutoBacked,
        include_str!("../../templates/List.Default.txt"),
    ),
    (
        Contract::List,
        Shape::UserBacked,
        include_str!("../../templates/List.Backed.txt"),
    ),
];

static BUILTIN: OnceLock<TemplateCatalog> = OnceLock::new();

/// Templates available to a generator
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<TemplateKey, Arc<Template>>,
}

impl TemplateCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide catalog of the shipped templates
    pub fn builtin() -> &'static TemplateCatalog {
        BUILTIN.get_or_init(|| {
            let mut catalog = TemplateCatalog::new();
            for (contract, shape, content) in BUILTIN_SOURCES {
                let template = Template::new(TemplateKey::new(contract, shape), content)
                    .expect("Invalid built-in template");
                catalog.insert(template);
            }
            catalog
        })
    }

    /// Load every known resource present in a directory
    ///
    /// A nonexistent directory yields an empty catalog.
    pub fn from_directory(dir: &Path) -> Result<Self, TemplateError> {
        let mut catalog = TemplateCatalog::new();
        catalog.load_overrides(dir)?;
        Ok(catalog)
    }

    /// Built-in templates, replaced by any resource found in `dir`
    pub fn builtin_with_overrides(dir: &Path) -> Result<Self, TemplateError> {
        let mut catalog = Self::builtin().clone();
        catalog.load_overrides(dir)?;
        Ok(catalog)
    }

    fn load_overrides(&mut self, dir: &Path) -> Result<(), TemplateError> {
        if !dir.exists() {
            debug!("Template directory {} does not exist", dir.display());
            return Ok(());
        }

        for key in TemplateKey::all() {
            let path = dir.join(key.resource_name());
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            debug!("Loaded template {}", path.display());
            self.insert(Template::new(key, content)?);
        }

        Ok(())
    }

    /// Add or replace a template
    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.key, Arc::new(template));
    }

    /// Template for a contract/shape pair
    pub fn get(&self, key: &TemplateKey) -> Option<Arc<Template>> {
        self.templates.get(key).cloned()
    }

    /// Whether a pair is available
    pub fn contains(&self, key: &TemplateKey) -> bool {
        self.templates.contains_key(key)
    }

    /// Catalog statistics
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            templates: self.templates.len(),
        }
    }
}

/// Statistics about a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of loaded templates
    pub templates: usize,
}
