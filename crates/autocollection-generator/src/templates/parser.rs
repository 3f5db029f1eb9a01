//! Template body parser
//!
//! Splits a template body into literal text and the five known placeholders.
//! Braces around anything else (`{T}` in doc comments, block braces) stay text.

use std::collections::BTreeSet;
use std::fmt;

/// A placeholder every template variant must contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// `{CollectionType}`: element type text
    CollectionType,
    /// `{BackingField}`: backing field name
    BackingField,
    /// `{Namespace}`: namespace or global placeholder
    Namespace,
    /// `{ClassName}`: declaration name
    ClassName,
    /// `{Accessor}`: accessibility keyword text
    Accessor,
}

impl Placeholder {
    /// All placeholders, in canonical order
    pub const ALL: [Placeholder; 5] = [
        Placeholder::CollectionType,
        Placeholder::BackingField,
        Placeholder::Namespace,
        Placeholder::ClassName,
        Placeholder::Accessor,
    ];

    /// Name between the braces
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::CollectionType => "CollectionType",
            Placeholder::BackingField => "BackingField",
            Placeholder::Namespace => "Namespace",
            Placeholder::ClassName => "ClassName",
            Placeholder::Accessor => "Accessor",
        }
    }

    /// Full token including braces
    pub fn token(&self) -> String {
        format!("{{{}}}", self.name())
    }

    /// Look up a placeholder by the name between the braces
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|placeholder| placeholder.name() == name)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text copied verbatim
    Text(String),
    /// A placeholder substituted at render time
    Placeholder(Placeholder),
}

/// Parsed template structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    /// Segments in source order
    pub segments: Vec<Segment>,
    /// Distinct placeholders present
    pub placeholders: BTreeSet<Placeholder>,
}

impl ParsedTemplate {
    /// Whether a placeholder occurs at least once
    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.placeholders.contains(&placeholder)
    }
}

/// Template parser
pub struct TemplateParser;

impl TemplateParser {
    /// Parse template content into segments
    pub fn parse(content: &str) -> ParsedTemplate {
        let mut segments = Vec::new();
        let mut placeholders = BTreeSet::new();
        let mut text_start = 0;
        let mut cursor = 0;

        while let Some(offset) = content[cursor..].find('{') {
            let open = cursor + offset;
            let name_start = open + 1;

            let Some(len) = content[name_start..].find('}') else {
                break;
            };

            match Placeholder::from_name(&content[name_start..name_start + len]) {
                Some(placeholder) => {
                    if open > text_start {
                        segments.push(Segment::Text(content[text_start..open].to_string()));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                    placeholders.insert(placeholder);
                    cursor = name_start + len + 1;
                    text_start = cursor;
                }
                None => cursor = name_start,
            }
        }

        if text_start < content.len() {
            segments.push(Segment::Text(content[text_start..].to_string()));
        }

        ParsedTemplate {
            segments,
            placeholders,
        }
    }

    /// Placeholders found in content
    pub fn extract_placeholders(content: &str) -> BTreeSet<Placeholder> {
        Self::parse(content).placeholders
    }
}
