use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;

use super::errors::{ReassignmentError, ReassignmentResult};
use super::services::{
    ClusterMetadataService, ReassignmentStatus, ReassignmentStatusService, ReassignmentSubmitter,
    ReplicaQueryService,
};
use crate::cluster_status::ClusterError;
use crate::constants::MIN_STATUS_POLL_INTERVAL;
use crate::planner::{plan_assignment, AssignmentPlan};

/// Changes the replication factor of Topics, and tracks the resulting reassignments.
///
/// Every call works on a freshly fetched snapshot of the cluster: nothing is cached between calls.
/// Concurrent calls for the _same_ Topic are not coordinated: that's up to the caller.
pub struct Orchestrator {
    metadata: Arc<dyn ClusterMetadataService>,
    replicas: Arc<dyn ReplicaQueryService>,
    submitter: Arc<dyn ReassignmentSubmitter>,
    status: Arc<dyn ReassignmentStatusService>,
}

impl Orchestrator {
    pub fn new(
        metadata: Arc<dyn ClusterMetadataService>,
        replicas: Arc<dyn ReplicaQueryService>,
        submitter: Arc<dyn ReassignmentSubmitter>,
        status: Arc<dyn ReassignmentStatusService>,
    ) -> Self {
        Self {
            metadata,
            replicas,
            submitter,
            status,
        }
    }

    /// Plan and submit a reassignment that brings every Partition of `topic` to `target_rf` replicas.
    ///
    /// It returns once the plan is submitted: replicas will keep moving after that.
    /// Use [`Self::is_replication_factor_updating`] to know when they are done.
    ///
    /// # Arguments
    ///
    /// * `topic` - Topic to change the replication factor of
    /// * `target_rf` - Replication factor the Topic should have
    pub async fn update_replication_factor(
        &self,
        topic: &str,
        target_rf: i32,
    ) -> ReassignmentResult<AssignmentPlan> {
        let cluster = self.metadata.refresh_metadata().await?;
        let partitions = cluster
            .partitions_for_topic(topic)
            .ok_or_else(|| ClusterError::UnknownTopic(topic.to_string()))?;
        debug!("Topic '{topic}' has {} partitions", partitions.len());

        let mut partition_replicas = BTreeMap::new();
        for p in partitions {
            let replicas = self.replicas.get_replicas(topic, p).await?;
            trace!("Current replicas of '{topic}:{p}': {replicas:?}");
            partition_replicas.insert(p, replicas);
        }

        let pool = cluster.broker_pool();
        debug!("Broker pool: {:?}", pool.iter().collect::<Vec<_>>());

        let plan = {
            let mut rng = rand::thread_rng();
            plan_assignment(topic, &pool, &partition_replicas, target_rf, &mut rng)?
        };

        self.submitter.submit(&plan).await?;
        info!(
            "Submitted reassignment of Topic '{topic}' to replication factor {target_rf} ({} partitions)",
            plan.len()
        );

        Ok(plan)
    }

    /// `true` if any Partition of `topic` is still gaining or losing replicas.
    ///
    /// This is a point-in-time check: poll it (or use [`Self::await_replication_factor_updated`])
    /// to know when a reassignment is complete.
    pub async fn is_replication_factor_updating(&self, topic: &str) -> ReassignmentResult<bool> {
        let cluster = self.metadata.refresh_metadata().await?;
        let partitions = cluster
            .partitions_for_topic(topic)
            .ok_or_else(|| ClusterError::UnknownTopic(topic.to_string()))?;

        let statuses = self.status.get_status(topic, &partitions).await?;
        let updating = statuses.values().any(ReassignmentStatus::is_in_progress);

        debug!(
            "Topic '{topic}' is {}being reassigned ({} partition statuses)",
            if updating { "" } else { "not " },
            statuses.len()
        );
        Ok(updating)
    }

    /// Future that completes only once [`Self::is_replication_factor_updating`] returns `false`.
    ///
    /// If the given [`CancellationToken`] is cancelled, it returns [`ReassignmentError::Cancelled`].
    /// Any other error interrupts the polling and is returned as is.
    ///
    /// `poll_interval` is raised to [`MIN_STATUS_POLL_INTERVAL`] if shorter.
    pub async fn await_replication_factor_updated(
        &self,
        topic: &str,
        poll_interval: Duration,
        shutdown_token: CancellationToken,
    ) -> ReassignmentResult<()> {
        if poll_interval < MIN_STATUS_POLL_INTERVAL {
            warn!("Status poll interval {poll_interval:?} too short: using {MIN_STATUS_POLL_INTERVAL:?}");
        }
        let mut interval = interval(poll_interval.max(MIN_STATUS_POLL_INTERVAL));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !self.is_replication_factor_updating(topic).await? {
                        info!("Reassignment of Topic '{topic}' is complete");
                        return Ok(());
                    }
                },
                _ = shutdown_token.cancelled() => {
                    warn!("Received shutdown signal before reassignment of Topic '{topic}' was complete");
                    return Err(ReassignmentError::Cancelled(topic.to_string()));
                },
            }
        }
    }
}
