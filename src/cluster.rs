//! Cluster handle

use serde_json::json;

use crate::diagnostics::DiagnosticLog;
use crate::error::GantryResult;
use crate::stack::Synthesize;
use crate::template::{Resource, Template};

/// A named cluster that services and scheduled tasks deploy into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    name: String,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Synthesize for Cluster {
    fn logical_id(&self) -> String {
        self.name.clone()
    }

    fn synthesize(
        &self,
        template: &mut Template,
        _diagnostics: &mut DiagnosticLog,
    ) -> GantryResult<()> {
        template.add_resource(
            self.name.clone(),
            Resource::new("orchestrator/cluster", json!({ "name": self.name })),
        )
    }
}
