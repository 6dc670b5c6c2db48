use thiserror::Error;

use crate::cluster_status::ClusterError;
use crate::planner::PlanningFailure;

/// Possible errors from the [`super::Orchestrator`].
#[derive(Error, Debug)]
pub enum ReassignmentError {
    /// Propagated, unchanged, from one of the cluster services.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// No valid plan could be computed: nothing was submitted.
    #[error(transparent)]
    Planning(#[from] PlanningFailure),

    #[error("Stopped waiting for reassignment of Topic '{0}' to complete")]
    Cancelled(String),
}

impl ReassignmentError {
    /// `true` if the same call might succeed if retried later (with backoff).
    ///
    /// Planning failures are not: the cluster needs to change first.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReassignmentError::Cluster(e) => e.is_retryable(),
            ReassignmentError::Planning(_) | ReassignmentError::Cancelled(_) => false,
        }
    }
}

pub type ReassignmentResult<T> = Result<T, ReassignmentError>;
