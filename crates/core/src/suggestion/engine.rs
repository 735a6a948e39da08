//! Suggestion engine pipeline
//!
//! Fixed stage order over one parsed document: candidate normalization,
//! deduplication, structure detection, group assembly, the fallback gate,
//! and final schema validation. Every stage is pure; the engine is the
//! only place they are wired together.

use std::sync::Arc;

use tracing::{debug, warn};

use eventsift_domain::{EngineConfig, EngineMeta, EngineOutput, ParsedDocument, Result};

use crate::suggestion::candidate_builder::CandidateBuilder;
use crate::suggestion::dedup::dedup_candidates;
use crate::suggestion::fallback::{should_use_fallback, FallbackContext, GroupFallbackStrategy};
use crate::suggestion::grouper::assemble_groups;
use crate::suggestion::schema::validate_output;
use crate::suggestion::structure::StructureDetector;

/// The assembled pipeline. Construct once, run per document.
pub struct SuggestionEngine {
    config: EngineConfig,
    detector: StructureDetector,
    fallback: Option<Arc<dyn GroupFallbackStrategy>>,
}

impl SuggestionEngine {
    /// Engine with the default structure detector and no fallback strategy
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config, detector: StructureDetector::new(), fallback: None }
    }

    /// Attach an external grouping strategy for weak deterministic results
    #[must_use]
    pub fn with_fallback(mut self, strategy: Arc<dyn GroupFallbackStrategy>) -> Self {
        self.fallback = Some(strategy);
        self
    }

    /// Replace the structure detector (custom cue lexicons)
    #[must_use]
    pub fn with_detector(mut self, detector: StructureDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Run the full pipeline over one document.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the configured reference date is
    /// malformed, and `Schema` when the final output (deterministic or
    /// fallback-provided) violates the output contract.
    pub fn run(&self, document: &ParsedDocument) -> Result<EngineOutput> {
        let mut builder = CandidateBuilder::new(&self.config.reference_date)?;
        let candidates = builder.build(document);
        self.trace(|| debug!(count = candidates.len(), "built candidates"));

        let context = &document.context;
        let deduped = dedup_candidates(&candidates, context.confidence);
        self.trace(|| {
            debug!(before = candidates.len(), after = deduped.len(), "deduplicated candidates");
        });

        let detection = self.detector.detect(&deduped);
        self.trace(|| {
            debug!(
                structures = detection.groups.len(),
                has_structure = detection.has_structure,
                "structure detection finished"
            );
        });

        let groups = assemble_groups(&deduped, &detection.groups, context);
        let best = groups.iter().map(|g| g.group_confidence).fold(0.0f64, f64::max);

        let mut output = EngineOutput {
            groups,
            meta: EngineMeta { ai_fallback_used: false, ai_fallback_reason: None },
        };

        if should_use_fallback(detection.has_structure, deduped.len(), best) {
            self.apply_fallback(&deduped, best, &mut output)?;
        }

        validate_output(&output)?;
        Ok(output)
    }

    /// Hand the weak result to the strategy. A declining or failing
    /// strategy leaves the deterministic output untouched; a malformed
    /// replacement is a schema error.
    fn apply_fallback(
        &self,
        candidates: &[eventsift_domain::Candidate],
        best: f64,
        output: &mut EngineOutput,
    ) -> Result<()> {
        let Some(strategy) = self.fallback.as_ref() else {
            return Ok(());
        };

        let reason = format!("deterministic grouping weak (best confidence {best:.2})");
        self.trace(|| debug!(%reason, "invoking fallback strategy"));

        match strategy.regroup(FallbackContext { candidates, deterministic: &output.groups }) {
            Ok(outcome) => {
                let replacement = EngineOutput {
                    groups: outcome.groups,
                    meta: EngineMeta {
                        ai_fallback_used: true,
                        ai_fallback_reason: Some(reason),
                    },
                };
                validate_output(&replacement)?;
                self.trace(|| debug!(note = %outcome.reason, "fallback grouping accepted"));
                *output = replacement;
            }
            Err(error) => {
                warn!(%error, "fallback strategy failed, keeping deterministic groups");
            }
        }
        Ok(())
    }

    fn trace<F: FnOnce()>(&self, emit: F) {
        if self.config.dev_log {
            emit();
        }
    }
}

/// One-shot convenience: run the pipeline without a fallback strategy.
///
/// # Errors
/// Same failure modes as [`SuggestionEngine::run`].
pub fn build_suggestion_groups(
    document: &ParsedDocument,
    config: EngineConfig,
) -> Result<EngineOutput> {
    SuggestionEngine::new(config).run(document)
}
