//! Placement constraint value object
//!
//! Placement constraints restrict which hosts a task may run on. They only
//! make sense for hosted tasks; serverless task definitions reject them.

use serde_json::{json, Value};

/// A rule restricting which hosts a task may run on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementConstraint {
    /// Place each task on a different host
    DistinctInstance,
    /// Place tasks only on hosts matching the expression
    MemberOf(String),
}

impl PlacementConstraint {
    pub fn distinct_instance() -> Self {
        Self::DistinctInstance
    }

    pub fn member_of(expression: impl Into<String>) -> Self {
        Self::MemberOf(expression.into())
    }

    pub(crate) fn render(&self) -> Value {
        match self {
            Self::DistinctInstance => json!({ "type": "distinctInstance" }),
            Self::MemberOf(expression) => json!({
                "expression": expression,
                "type": "memberOf",
            }),
        }
    }
}
