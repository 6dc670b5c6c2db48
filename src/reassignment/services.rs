use std::collections::HashMap;

use async_trait::async_trait;

use crate::cluster_status::{ClusterResult, ClusterStatus};
use crate::kafka_types::BrokerId;
use crate::planner::AssignmentPlan;

/// Provides fresh snapshots of the cluster metadata.
#[async_trait]
pub trait ClusterMetadataService: Send + Sync {
    /// Fetch the current Brokers and Topic Partitions from the cluster.
    async fn refresh_metadata(&self) -> ClusterResult<ClusterStatus>;
}

/// Provides the current Replica Set of a Topic Partition.
#[async_trait]
pub trait ReplicaQueryService: Send + Sync {
    async fn get_replicas(&self, topic: &str, partition: u32) -> ClusterResult<Vec<BrokerId>>;
}

/// Hands an [`AssignmentPlan`] over to the cluster, so it can start moving replicas.
#[async_trait]
pub trait ReassignmentSubmitter: Send + Sync {
    /// Returns once the plan is accepted, not once replicas are done moving.
    async fn submit(&self, plan: &AssignmentPlan) -> ClusterResult<()>;
}

/// Reports the Partitions of a Topic that are being reassigned.
#[async_trait]
pub trait ReassignmentStatusService: Send + Sync {
    /// Status of each of the given `partitions`.
    ///
    /// Partitions without an ongoing reassignment can be omitted from the result.
    async fn get_status(
        &self,
        topic: &str,
        partitions: &[u32],
    ) -> ClusterResult<HashMap<u32, ReassignmentStatus>>;
}

/// Replicas a Partition is still gaining or losing, as part of a reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReassignmentStatus {
    pub adding_replicas: Vec<BrokerId>,
    pub removing_replicas: Vec<BrokerId>,
}

impl ReassignmentStatus {
    /// `true` while replicas are still being added or removed.
    pub fn is_in_progress(&self) -> bool {
        !self.adding_replicas.is_empty() || !self.removing_replicas.is_empty()
    }
}
