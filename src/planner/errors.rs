use thiserror::Error;

use crate::kafka_types::{BrokerId, TopicPartition};

use super::assignment::AssignmentPlan;

/// Possible errors from planning the Replica Set of a single Partition.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum PlannerError {
    /// There are no Brokers to place replicas on.
    #[error("Broker pool is empty")]
    EmptyBrokerPool,

    /// The current Replica Set contains a duplicate, or the unassigned (`-1`) Broker.
    #[error("Replica set {0:?} contains a duplicate or unassigned broker")]
    InvalidReplicaSet(Vec<BrokerId>),

    /// Shrinking would leave the Partition with less than 1 replica.
    #[error("Dropping {dropped} of {current} replicas would leave less than 1 replica")]
    InsufficientReplicas {
        current: usize,
        dropped: usize,
    },

    /// Growing needs more distinct Brokers than the pool has left unused.
    #[error("Adding {requested} replicas requires more than the {available} unused brokers")]
    InsufficientBrokers {
        requested: usize,
        available: usize,
    },

    /// A Topic can't be given a replication factor lower than 1.
    #[error("Replication factor must be at least 1, got {0}")]
    InvalidReplicationFactor(i32),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Planning of a whole Topic stopped at the first Partition that could not be satisfied.
///
/// Carries the [`AssignmentPlan`] built up to that point, so the caller can inspect it:
/// it must never be submitted.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("Unable to plan replicas of '{}': {cause}", describe(.topic, .partition))]
pub struct PlanningFailure {
    pub topic: String,

    /// Partition that failed, if the failure is specific to one.
    pub partition: Option<u32>,

    #[source]
    pub cause: PlannerError,

    pub partial_plan: AssignmentPlan,
}

impl PlanningFailure {
    pub fn topic_partition(&self) -> Option<TopicPartition> {
        self.partition.map(|p| TopicPartition::new(self.topic.clone(), p))
    }
}

fn describe(topic: &str, partition: &Option<u32>) -> String {
    match partition {
        Some(p) => format!("{topic}:{p}"),
        None => topic.to_string(),
    }
}
