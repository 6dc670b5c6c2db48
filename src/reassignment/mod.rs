//! Drives the [`crate::planner`] with live cluster state, and tracks reassignments it starts.

mod errors;
mod orchestrator;
mod services;

pub use errors::{ReassignmentError, ReassignmentResult};
pub use orchestrator::Orchestrator;
pub use services::{
    ClusterMetadataService, ReassignmentStatus, ReassignmentStatusService, ReassignmentSubmitter,
    ReplicaQueryService,
};
