//! Error types for Gantry
//!
//! Uses `thiserror` for library errors. Soft resource-budget violations are
//! never errors; they are collected as diagnostics at synthesis time.

use thiserror::Error;

use crate::task_definition::LaunchMode;

/// Result type alias for Gantry operations
pub type GantryResult<T> = Result<T, GantryError>;

/// Main error type for Gantry operations
#[derive(Error, Debug)]
pub enum GantryError {
    /// Placement constraints require host-level scheduling, which serverless
    /// tasks do not have
    #[error("cannot set placement constraints on serverless task definition '{family}'")]
    PlacementConstraintUnsupported { family: String },

    /// Container names are unique within a task definition
    #[error("container '{name}' already exists in task definition '{family}'")]
    DuplicateContainer { family: String, name: String },

    /// A container's hard memory limit must cover its reservation
    #[error("container '{container}' declares a memory limit of {limit_mib} MiB below its reservation of {reservation_mib} MiB")]
    MemoryLimitBelowReservation {
        container: String,
        limit_mib: u64,
        reservation_mib: u64,
    },

    /// Hosted containers must declare at least one memory figure
    #[error("container '{container}' on hosted task definition '{family}' must set a memory limit or a memory reservation")]
    MissingMemorySetting { container: String, family: String },

    /// A service was bound to a task definition with a different launch mode
    #[error("service '{service}' requires a {expected} task definition, but '{family}' uses the {actual} launch mode")]
    LaunchModeMismatch {
        service: String,
        family: String,
        expected: LaunchMode,
        actual: LaunchMode,
    },

    /// Task definitions must carry at least one container by emission time
    #[error("task definition '{family}' has no containers")]
    EmptyTaskDefinition { family: String },

    /// Two constructs rendered under the same logical id
    #[error("logical id '{id}' is already taken in this template")]
    DuplicateLogicalId { id: String },

    /// Template serialization error
    #[error("template serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
