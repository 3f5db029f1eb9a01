//! Parameter extraction from annotation instances
//!
//! Turns the host's positional constructor arguments into a name-keyed
//! [`ParameterMap`], then into typed [`GenerationParameters`]. Type-correctness
//! of the element type is the host's job and is not re-checked here.

use crate::diagnostics::{ids, Diagnostic};
use crate::host::AttributeInstance;
use crate::models::{AnnotationSpec, Candidate, GenerationParameters, ParameterMap};

/// Extracts generation parameters for one candidate
pub struct ParameterExtractor;

impl ParameterExtractor {
    /// Find the first annotation instance whose class name equals the annotation's name
    pub fn find_instance<'a>(
        candidate: &'a Candidate,
        spec: &AnnotationSpec,
    ) -> Result<&'a AttributeInstance, Diagnostic> {
        candidate
            .attributes
            .iter()
            .find(|attribute| attribute.name == spec.name)
            .ok_or_else(|| {
                Diagnostic::for_declaration(
                    ids::ANNOTATION_NOT_MATCHED,
                    candidate.symbol,
                    candidate.name.clone(),
                    format!("no '{}' annotation found on '{}'", spec.name, candidate.name),
                )
            })
    }

    /// Zip declared parameter names against the supplied arguments
    ///
    /// Surplus names or arguments on either side are dropped.
    pub fn parameter_map(instance: &AttributeInstance) -> ParameterMap {
        instance
            .parameters
            .iter()
            .cloned()
            .zip(instance.arguments.iter().cloned())
            .collect()
    }

    /// Produce typed parameters for a candidate
    pub fn extract(
        candidate: &Candidate,
        spec: &AnnotationSpec,
    ) -> Result<GenerationParameters, Diagnostic> {
        let instance = Self::find_instance(candidate, spec)?;
        let map = Self::parameter_map(instance);
        Self::from_map(candidate, spec, &map)
    }

    /// Validate a parameter map into typed parameters
    pub fn from_map(
        candidate: &Candidate,
        spec: &AnnotationSpec,
        map: &ParameterMap,
    ) -> Result<GenerationParameters, Diagnostic> {
        let element_type = map
            .get(spec.element_type_param_name)
            .and_then(|value| value.as_text())
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                Diagnostic::for_declaration(
                    ids::MISSING_ELEMENT_TYPE,
                    candidate.symbol,
                    candidate.name.clone(),
                    format!(
                        "'{}' on '{}' requires a '{}' argument",
                        spec.name, candidate.name, spec.element_type_param_name
                    ),
                )
            })?;

        let backing_field = map
            .get(spec.backing_field_param_name)
            .and_then(|value| value.as_text())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string);

        Ok(GenerationParameters {
            element_type: element_type.to_string(),
            backing_field,
        })
    }
}
