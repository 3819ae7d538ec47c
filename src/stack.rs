//! Stack assembly and synthesis
//!
//! A `Stack` owns the constructs the user assembled and turns them into a
//! deployment template in one synchronous pass. Validation runs here, after
//! all inputs are finalized, so deferred budget values resolve exactly once.

use tracing::debug;

use crate::diagnostics::DiagnosticLog;
use crate::error::GantryResult;
use crate::template::Template;

/// A construct that can render itself into a template.
///
/// Implementations must be deterministic: synthesizing twice on unchanged
/// state yields identical resources and diagnostics.
pub trait Synthesize {
    /// Logical id of the construct's primary resource
    fn logical_id(&self) -> String;

    /// Validate and render into the template, recording soft violations
    fn synthesize(
        &self,
        template: &mut Template,
        diagnostics: &mut DiagnosticLog,
    ) -> GantryResult<()>;
}

/// The assembly root: an ordered collection of constructs
pub struct Stack {
    name: String,
    constructs: Vec<Box<dyn Synthesize>>,
}

/// Template plus the diagnostics collected while producing it
#[derive(Debug)]
pub struct SynthOutput {
    pub template: Template,
    pub diagnostics: DiagnosticLog,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a construct; synthesis renders constructs in registration order
    pub fn add(&mut self, construct: impl Synthesize + 'static) {
        self.constructs.push(Box::new(construct));
    }

    pub fn construct_count(&self) -> usize {
        self.constructs.len()
    }

    /// Produce the deployment template.
    ///
    /// Soft budget violations land in the returned diagnostics; hard
    /// incompatibilities abort with an error and no template.
    pub fn synth(&self) -> GantryResult<SynthOutput> {
        debug!(stack = %self.name, constructs = self.constructs.len(), "synthesizing stack");
        let mut template = Template::new();
        let mut diagnostics = DiagnosticLog::new();
        for construct in &self.constructs {
            debug!(construct = %construct.logical_id(), "synthesizing construct");
            construct.synthesize(&mut template, &mut diagnostics)?;
        }
        debug!(
            stack = %self.name,
            resources = template.resource_count(),
            warnings = diagnostics.warning_count(),
            "synthesis complete"
        );
        Ok(SynthOutput {
            template,
            diagnostics,
        })
    }
}
