//! Candidate pipeline and emitter
//!
//! One [`SourceGenerator`] serves one annotation. Each pass:
//! 1. publishes the annotation definition,
//! 2. discovers annotated class declarations,
//! 3. extracts parameters and resolves shapes (faults stay per candidate),
//! 4. locates the needed templates (a miss aborts the contract),
//! 5. synthesizes units, reusing memoized ones for unchanged candidates,
//! 6. checks identities and publishes in host order.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::annotation::ParameterExtractor;
use crate::config::GeneratorConfig;
use crate::definition::annotation_definition;
use crate::diagnostics::{ids, Diagnostic, Severity};
use crate::error::GenerationError;
use crate::host::{
    Accessibility, CancellationSignal, CompilationSnapshot, DeclarationKind, InMemorySink,
    NeverCancelled, OutputSink,
};
use crate::identity::{unit_identity, NamespaceTokenSource, ScopeName};
use crate::models::{AnnotationSpec, Candidate, Contract, GenerationParameters, RenderedUnit};
use crate::synthesizer::{CodeSynthesizer, SynthesisInput};
use crate::templates::{Resolution, Template, TemplateCatalog, TemplateKey, TemplateResolver};

/// Memo key: everything a rendered unit depends on besides the template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CandidateKey {
    contract: Contract,
    namespace: String,
    name: String,
    accessibility: Accessibility,
    params: GenerationParameters,
}

/// How a prepared candidate gets its unit
enum Plan {
    /// Unchanged since an earlier pass
    Reuse(RenderedUnit),
    /// Synthesize under this scope
    Render(ScopeName),
}

/// A candidate that passed extraction and resolution
struct Prepared {
    candidate: Candidate,
    key: CandidateKey,
    params: GenerationParameters,
    resolution: Resolution,
    plan: Plan,
}

/// Reuse counts for one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Units reused from an earlier pass
    pub hits: usize,
    /// Units synthesized in this pass
    pub misses: usize,
    /// Memo entries dropped because their candidate disappeared
    pub evicted: usize,
}

/// Outcome of a successful pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Contract the pass ran for
    pub contract: Contract,
    /// Identity of the published annotation definition
    pub definition: String,
    /// Candidate identities, in host order
    pub published: Vec<String>,
    /// Candidate faults
    pub diagnostics: Vec<Diagnostic>,
    /// Memo statistics
    pub cache: CacheStats,
}

/// Synthesizes one contract over compilation snapshots
pub struct SourceGenerator {
    spec: &'static AnnotationSpec,
    config: GeneratorConfig,
    catalog: Arc<TemplateCatalog>,
    resolver: TemplateResolver,
    tokens: Box<dyn NamespaceTokenSource>,
    memo: DashMap<CandidateKey, RenderedUnit>,
}

impl SourceGenerator {
    /// Generator with default configuration and the built-in templates
    pub fn new(spec: &'static AnnotationSpec) -> Self {
        let config = GeneratorConfig::default();
        Self {
            spec,
            resolver: TemplateResolver::new(config.default_backing_field.clone()),
            tokens: config.namespace_tokens.source(),
            catalog: Arc::new(TemplateCatalog::builtin().clone()),
            config,
            memo: DashMap::new(),
        }
    }

    /// Generator with custom configuration
    ///
    /// Templates in `config.template_dir` override the built-in ones.
    pub fn with_config(
        spec: &'static AnnotationSpec,
        config: GeneratorConfig,
    ) -> Result<Self, GenerationError> {
        let catalog = match &config.template_dir {
            Some(dir) => TemplateCatalog::builtin_with_overrides(dir)?,
            None => TemplateCatalog::builtin().clone(),
        };

        Ok(Self {
            spec,
            resolver: TemplateResolver::new(config.default_backing_field.clone()),
            tokens: config.namespace_tokens.source(),
            catalog: Arc::new(catalog),
            config,
            memo: DashMap::new(),
        })
    }

    /// Replace the template catalog
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self.memo.clear();
        self
    }

    /// Replace the global-scope token source
    pub fn with_token_source(mut self, tokens: Box<dyn NamespaceTokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Annotation this generator serves
    pub fn spec(&self) -> &'static AnnotationSpec {
        self.spec
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of memoized units
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Run one pass
    pub fn execute(
        &self,
        snapshot: &CompilationSnapshot,
        sink: &mut dyn OutputSink,
    ) -> Result<PassReport, GenerationError> {
        self.execute_with_cancellation(snapshot, sink, &NeverCancelled)
    }

    /// Run one pass, stopping early if the host cancels
    ///
    /// A cancelled pass publishes no candidate unit.
    pub fn execute_with_cancellation(
        &self,
        snapshot: &CompilationSnapshot,
        sink: &mut dyn OutputSink,
        cancel: &dyn CancellationSignal,
    ) -> Result<PassReport, GenerationError> {
        let contract = self.spec.contract;
        let definition = annotation_definition(self.spec, &self.config.annotation_namespace);
        sink.publish(&definition.identity, &definition.text)?;

        let (candidates, skipped) = self.scan(snapshot);
        let mut report = PassReport {
            contract,
            definition: definition.identity.clone(),
            published: Vec::new(),
            diagnostics: skipped,
            cache: CacheStats::default(),
        };

        let mut prepared = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.prepare(candidate) {
                Ok(item) => prepared.push(item),
                Err(diagnostic) => {
                    warn!("{}", diagnostic);
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        let templates = self.locate_templates(&prepared).map_err(|diagnostic| {
            GenerationError::Configuration {
                diagnostic,
                candidate_faults: std::mem::take(&mut report.diagnostics),
            }
        })?;

        if cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }

        // Scopes are fixed in `prepare`, so rendering order cannot affect output.
        let rendered: Vec<Option<(RenderedUnit, bool)>> = if self.config.parallel {
            prepared
                .par_iter()
                .map(|item| self.render(item, &templates, cancel))
                .collect()
        } else {
            prepared
                .iter()
                .map(|item| self.render(item, &templates, cancel))
                .collect()
        };

        if cancel.is_cancelled() || rendered.iter().any(Option::is_none) {
            debug!("Pass for {} cancelled, discarding {} units", contract, rendered.len());
            return Err(GenerationError::Cancelled);
        }

        let mut identities = HashSet::with_capacity(rendered.len() + 1);
        identities.insert(definition.identity.clone());
        for (unit, _) in rendered.iter().flatten() {
            if !identities.insert(unit.identity.clone()) {
                return Err(GenerationError::IdentityCollision(unit.identity.clone()));
            }
        }

        let mut seen = HashSet::with_capacity(prepared.len());
        for (item, (unit, reused)) in prepared.iter().zip(rendered.into_iter().flatten()) {
            sink.publish(&unit.identity, &unit.text)?;
            if reused {
                report.cache.hits += 1;
            } else {
                report.cache.misses += 1;
            }
            report.published.push(unit.identity.clone());
            seen.insert(item.key.clone());
            self.memo.insert(item.key.clone(), unit);
        }

        let before = self.memo.len();
        self.memo.retain(|key, _| seen.contains(key));
        report.cache.evicted = before - self.memo.len();

        info!(
            "{} pass: {} published, {} reused, {} diagnostics",
            contract,
            report.published.len(),
            report.cache.hits,
            report.diagnostics.len()
        );

        Ok(report)
    }

    /// Class declarations carrying this generator's annotation, in host order
    pub fn discover(&self, snapshot: &CompilationSnapshot) -> Vec<Candidate> {
        self.scan(snapshot).0
    }

    /// Candidates plus a warning for every annotated non-class declaration
    fn scan(&self, snapshot: &CompilationSnapshot) -> (Vec<Candidate>, Vec<Diagnostic>) {
        let metadata_name = self.spec.metadata_name_in(&self.config.annotation_namespace);
        let mut candidates = Vec::new();
        let mut skipped = Vec::new();

        for declaration in &snapshot.declarations {
            if !declaration.has_attribute(&metadata_name) {
                continue;
            }
            if declaration.kind != DeclarationKind::Class {
                let diagnostic = Diagnostic::for_declaration(
                    ids::NOT_A_CLASS,
                    declaration.symbol,
                    declaration.name.clone(),
                    format!(
                        "{} applies to classes only; {:?} '{}' was skipped",
                        self.spec.name, declaration.kind, declaration.name
                    ),
                )
                .with_severity(Severity::Warning);
                warn!("{}", diagnostic);
                skipped.push(diagnostic);
                continue;
            }
            candidates.push(Candidate::from_declaration(declaration));
        }

        (candidates, skipped)
    }

    fn prepare(&self, candidate: Candidate) -> Result<Prepared, Diagnostic> {
        if !candidate.is_partial {
            return Err(Diagnostic::for_declaration(
                ids::NOT_PARTIAL,
                candidate.symbol,
                candidate.name.clone(),
                format!(
                    "'{}' must be declared partial to receive a generated {} implementation",
                    candidate.name,
                    self.spec.contract.interface()
                ),
            ));
        }

        let params = ParameterExtractor::extract(&candidate, self.spec)?;
        let resolution = self.resolver.resolve(self.spec.contract, &params);
        debug!(
            "Candidate {} resolved to {:?} with backing field {}",
            candidate.name, resolution.shape, resolution.backing_field
        );

        let key = CandidateKey {
            contract: self.spec.contract,
            namespace: candidate.namespace.clone(),
            name: candidate.name.clone(),
            accessibility: candidate.accessibility,
            params: params.clone(),
        };

        let plan = match self.memo.get(&key) {
            Some(unit) => Plan::Reuse(unit.value().clone()),
            None => Plan::Render(ScopeName::for_candidate(&candidate, self.tokens.as_ref())),
        };

        Ok(Prepared {
            candidate,
            key,
            params,
            resolution,
            plan,
        })
    }

    fn locate_templates(
        &self,
        prepared: &[Prepared],
    ) -> Result<HashMap<TemplateKey, Arc<Template>>, Diagnostic> {
        let needed: BTreeSet<TemplateKey> = prepared.iter().map(|item| item.resolution.key).collect();

        let mut templates = HashMap::with_capacity(needed.len());
        for key in needed {
            match TemplateResolver::locate(&self.catalog, &key) {
                Ok(template) => {
                    templates.insert(key, template);
                }
                Err(diagnostic) => {
                    warn!("{}", diagnostic);
                    return Err(diagnostic);
                }
            }
        }
        Ok(templates)
    }

    fn render(
        &self,
        item: &Prepared,
        templates: &HashMap<TemplateKey, Arc<Template>>,
        cancel: &dyn CancellationSignal,
    ) -> Option<(RenderedUnit, bool)> {
        if cancel.is_cancelled() {
            return None;
        }

        let scope = match &item.plan {
            Plan::Reuse(unit) => {
                debug!("Reusing unit {}", unit.identity);
                return Some((unit.clone(), true));
            }
            Plan::Render(scope) => scope,
        };

        let template = templates.get(&item.resolution.key)?;
        let input = SynthesisInput {
            class_name: &item.candidate.name,
            scope,
            accessibility: item.candidate.accessibility,
            element_type: &item.params.element_type,
            backing_field: &item.resolution.backing_field,
        };

        let unit = RenderedUnit {
            identity: unit_identity(scope, &item.candidate.name, &self.config.identity_suffix),
            text: CodeSynthesizer::synthesize(&input, template),
        };
        debug!("Synthesized {} from {}", unit.identity, template.key.resource_name());
        Some((unit, false))
    }
}

/// Result of one contract's pass within a [`GeneratorSet`]
#[derive(Debug)]
pub struct ContractRun {
    /// Contract that ran
    pub contract: Contract,
    /// Units published by this contract
    pub output: InMemorySink,
    /// Pass outcome
    pub result: Result<PassReport, GenerationError>,
}

/// Every supported contract, each with its own output surface
pub struct GeneratorSet {
    generators: Vec<SourceGenerator>,
}

impl GeneratorSet {
    /// One generator per supported annotation, default configuration
    pub fn new() -> Self {
        Self {
            generators: AnnotationSpec::all()
                .into_iter()
                .map(SourceGenerator::new)
                .collect(),
        }
    }

    /// One generator per supported annotation, shared configuration
    pub fn with_config(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let generators = AnnotationSpec::all()
            .into_iter()
            .map(|spec| SourceGenerator::with_config(spec, config.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { generators })
    }

    /// The generators in contract order
    pub fn generators(&self) -> &[SourceGenerator] {
        &self.generators
    }

    /// Run every contract; a fault in one does not stop the others
    pub fn execute(&self, snapshot: &CompilationSnapshot) -> Vec<ContractRun> {
        self.execute_with_cancellation(snapshot, &NeverCancelled)
    }

    /// Run every contract under a host cancellation signal
    pub fn execute_with_cancellation(
        &self,
        snapshot: &CompilationSnapshot,
        cancel: &dyn CancellationSignal,
    ) -> Vec<ContractRun> {
        self.generators
            .iter()
            .map(|generator| {
                let mut output = InMemorySink::new();
                let result = generator.execute_with_cancellation(snapshot, &mut output, cancel);
                if let Err(e) = &result {
                    warn!("{} pass failed: {}", generator.spec().contract, e);
                }
                ContractRun {
                    contract: generator.spec().contract,
                    output,
                    result,
                }
            })
            .collect()
    }

    /// Units of every successful run, keyed by contract
    pub fn collect_units(runs: &[ContractRun]) -> BTreeMap<Contract, Vec<RenderedUnit>> {
        runs.iter()
            .filter(|run| run.result.is_ok())
            .map(|run| {
                let units = run
                    .output
                    .identities()
                    .iter()
                    .filter_map(|identity| {
                        run.output.get(identity).map(|text| RenderedUnit {
                            identity: identity.clone(),
                            text: text.to_string(),
                        })
                    })
                    .collect();
                (run.contract, units)
            })
            .collect()
    }
}

impl Default for GeneratorSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ArgumentValue, AttributeInstance, CancellationFlag, SymbolId, TypeDeclaration};
    use crate::identity::{SequentialTokens, TokenPolicy};
    use crate::models::{LIST, READ_ONLY_LIST};

    fn declaration(symbol: u64, name: &str, namespace: Option<&str>, args: Vec<ArgumentValue>) -> TypeDeclaration {
        TypeDeclaration {
            symbol: SymbolId(symbol),
            kind: DeclarationKind::Class,
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            accessibility: Accessibility::Public,
            is_partial: true,
            attributes: vec![AttributeInstance {
                name: "GenerateReadOnlyList".to_string(),
                namespace: "AutoCollection".to_string(),
                parameters: vec!["collectionType".to_string(), "backingField".to_string()],
                arguments: args,
            }],
        }
    }

    fn string_args() -> Vec<ArgumentValue> {
        vec![ArgumentValue::Type("string".to_string()), ArgumentValue::Null]
    }

    #[test]
    fn test_definition_published_without_candidates() {
        let generator = SourceGenerator::new(&READ_ONLY_LIST);
        let mut sink = InMemorySink::new();
        let report = generator.execute(&CompilationSnapshot::default(), &mut sink).unwrap();

        assert_eq!(sink.identities(), &["GenerateReadOnlyList.Attribute.g.cs".to_string()]);
        assert!(report.published.is_empty());
        assert_eq!(report.definition, "GenerateReadOnlyList.Attribute.g.cs");
    }

    #[test]
    fn test_discover_skips_non_class_and_other_annotations() {
        let mut record = declaration(2, "Rec", Some("Example"), string_args());
        record.kind = DeclarationKind::Record;
        let mut other = declaration(3, "Other", Some("Example"), string_args());
        other.attributes[0].name = "GenerateList".to_string();

        let snapshot = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "DemoClass", Some("Example"), string_args()))
            .with_declaration(record)
            .with_declaration(other);

        let candidates = SourceGenerator::new(&READ_ONLY_LIST).discover(&snapshot);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "DemoClass");

        let list_candidates = SourceGenerator::new(&LIST).discover(&snapshot);
        assert_eq!(list_candidates.len(), 1);
        assert_eq!(list_candidates[0].name, "Other");
    }

    #[test]
    fn test_annotated_non_class_is_reported_as_warning() {
        let mut record = declaration(2, "Rec", Some("Example"), string_args());
        record.kind = DeclarationKind::Struct;
        let snapshot = CompilationSnapshot::new("Demo")
            .with_declaration(record)
            .with_declaration(declaration(1, "DemoClass", Some("Example"), string_args()));

        let mut sink = InMemorySink::new();
        let report = SourceGenerator::new(&READ_ONLY_LIST).execute(&snapshot, &mut sink).unwrap();

        assert_eq!(report.published, vec!["Example.DemoClass.g.cs".to_string()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].id, ids::NOT_A_CLASS);
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
        assert_eq!(report.diagnostics[0].symbol, Some(SymbolId(2)));
    }

    #[test]
    fn test_non_partial_candidate_is_isolated() {
        let mut plain = declaration(2, "Plain", Some("Example"), string_args());
        plain.is_partial = false;
        let snapshot = CompilationSnapshot::new("Demo")
            .with_declaration(plain)
            .with_declaration(declaration(1, "DemoClass", Some("Example"), string_args()));

        let mut sink = InMemorySink::new();
        let report = SourceGenerator::new(&READ_ONLY_LIST).execute(&snapshot, &mut sink).unwrap();

        assert_eq!(report.published, vec!["Example.DemoClass.g.cs".to_string()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].id, ids::NOT_PARTIAL);
        assert_eq!(report.diagnostics[0].symbol, Some(SymbolId(2)));
    }

    #[test]
    fn test_missing_template_is_single_configuration_fault() {
        let snapshot = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "A", Some("Example"), string_args()))
            .with_declaration(declaration(2, "B", Some("Example"), string_args()));

        let generator = SourceGenerator::new(&READ_ONLY_LIST).with_catalog(TemplateCatalog::new());
        let mut sink = InMemorySink::new();
        let err = generator.execute(&snapshot, &mut sink).unwrap_err();

        match err {
            GenerationError::Configuration { diagnostic, candidate_faults } => {
                assert_eq!(diagnostic.id, ids::MISSING_TEMPLATE);
                assert!(diagnostic.symbol.is_none());
                assert!(candidate_faults.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.len(), 1, "only the definition is published");
    }

    #[test]
    fn test_configuration_fault_keeps_candidate_faults() {
        let mut plain = declaration(2, "Plain", Some("Example"), string_args());
        plain.is_partial = false;
        let snapshot = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "A", Some("Example"), string_args()))
            .with_declaration(plain);

        let generator = SourceGenerator::new(&READ_ONLY_LIST).with_catalog(TemplateCatalog::new());
        let err = generator.execute(&snapshot, &mut InMemorySink::new()).unwrap_err();

        match err {
            GenerationError::Configuration { candidate_faults, .. } => {
                assert_eq!(candidate_faults.len(), 1);
                assert_eq!(candidate_faults[0].id, ids::NOT_PARTIAL);
                assert_eq!(candidate_faults[0].symbol, Some(SymbolId(2)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_memo_reuses_units_and_evicts_stale_entries() {
        let generator = SourceGenerator::new(&READ_ONLY_LIST);
        let first = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "A", Some("Example"), string_args()))
            .with_declaration(declaration(2, "B", Some("Example"), string_args()));

        let report = generator.execute(&first, &mut InMemorySink::new()).unwrap();
        assert_eq!(report.cache, CacheStats { hits: 0, misses: 2, evicted: 0 });

        let second = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "A", Some("Example"), string_args()));
        let report = generator.execute(&second, &mut InMemorySink::new()).unwrap();
        assert_eq!(report.cache, CacheStats { hits: 1, misses: 0, evicted: 1 });
        assert_eq!(generator.memo_len(), 1);
    }

    #[test]
    fn test_changed_parameters_are_resynthesized() {
        let generator = SourceGenerator::new(&READ_ONLY_LIST);
        let before = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "A", Some("Example"), string_args()));
        generator.execute(&before, &mut InMemorySink::new()).unwrap();

        let after = CompilationSnapshot::new("Demo").with_declaration(declaration(
            1,
            "A",
            Some("Example"),
            vec![ArgumentValue::Type("int".to_string()), ArgumentValue::Null],
        ));
        let mut sink = InMemorySink::new();
        let report = generator.execute(&after, &mut sink).unwrap();

        assert_eq!(report.cache.misses, 1);
        assert!(sink.get("Example.A.g.cs").unwrap().contains("IReadOnlyList<int>"));
    }

    #[test]
    fn test_cancelled_pass_publishes_no_candidate() {
        let snapshot = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "A", Some("Example"), string_args()));
        let flag = CancellationFlag::new();
        flag.cancel();

        let mut sink = InMemorySink::new();
        let err = SourceGenerator::new(&READ_ONLY_LIST)
            .execute_with_cancellation(&snapshot, &mut sink, &flag)
            .unwrap_err();

        assert!(matches!(err, GenerationError::Cancelled));
        assert_eq!(sink.identities(), &["GenerateReadOnlyList.Attribute.g.cs".to_string()]);
    }

    #[test]
    fn test_sequential_tokens_continue_across_passes() {
        let generator = SourceGenerator::new(&READ_ONLY_LIST)
            .with_token_source(Box::new(SequentialTokens::new()));

        let first = CompilationSnapshot::new("Demo")
            .with_declaration(declaration(1, "A", None, string_args()));
        generator.execute(&first, &mut InMemorySink::new()).unwrap();

        let second = first.clone().with_declaration(declaration(2, "B", None, string_args()));
        let mut sink = InMemorySink::new();
        let report = generator.execute(&second, &mut sink).unwrap();

        assert_eq!(report.published.len(), 2);
        assert_ne!(report.published[0], report.published[1]);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let snapshot = (0..16).fold(CompilationSnapshot::new("Demo"), |snapshot, i| {
            snapshot.with_declaration(declaration(i, &format!("C{i}"), Some("Example"), string_args()))
        });

        let parallel = SourceGenerator::new(&READ_ONLY_LIST);
        let sequential = SourceGenerator::with_config(
            &READ_ONLY_LIST,
            GeneratorConfig {
                parallel: false,
                ..Default::default()
            },
        )
        .unwrap();

        let mut a = InMemorySink::new();
        let mut b = InMemorySink::new();
        parallel.execute(&snapshot, &mut a).unwrap();
        sequential.execute(&snapshot, &mut b).unwrap();

        assert_eq!(a.identities(), b.identities());
        assert_eq!(a.units(), b.units());
    }

    #[test]
    fn test_sequential_tokens_follow_host_order_on_parallel_pool() {
        let snapshot = (0..64).fold(CompilationSnapshot::new("Demo"), |snapshot, i| {
            snapshot.with_declaration(declaration(i, &format!("G{i}"), None, string_args()))
        });
        let config = |parallel| GeneratorConfig {
            parallel,
            namespace_tokens: TokenPolicy::Sequential,
            ..Default::default()
        };

        let mut expected = InMemorySink::new();
        SourceGenerator::with_config(&READ_ONLY_LIST, config(false))
            .unwrap()
            .execute(&snapshot, &mut expected)
            .unwrap();
        assert_eq!(
            expected.identities()[1],
            format!("{}{:032x}.G0.g.cs", crate::identity::GLOBAL_PREFIX, 0)
        );

        let pool = rayon::ThreadPoolBuilder::new().num_threads(8).build().unwrap();
        for _ in 0..10 {
            let mut actual = InMemorySink::new();
            pool.install(|| {
                SourceGenerator::with_config(&READ_ONLY_LIST, config(true))
                    .unwrap()
                    .execute(&snapshot, &mut actual)
                    .unwrap();
            });
            assert_eq!(actual.identities(), expected.identities());
            assert_eq!(actual.units(), expected.units());
        }
    }

    #[test]
    fn test_generator_set_separates_contract_outputs() {
        let mut decl = declaration(1, "DemoClass", Some("Example"), string_args());
        let mut list = decl.attributes[0].clone();
        list.name = "GenerateList".to_string();
        decl.attributes.push(list);

        let runs = GeneratorSet::new().execute(&CompilationSnapshot::new("Demo").with_declaration(decl));
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|run| run.result.is_ok()));

        let units = GeneratorSet::collect_units(&runs);
        assert!(units[&Contract::ReadOnlyList][1].text.contains("IReadOnlyList<string>"));
        assert!(units[&Contract::List][1].text.contains("IList<string>"));
    }
}
