use std::collections::BTreeMap;

use rand::Rng;

use super::errors::{PlannerError, PlanningFailure};
use super::replica_set::plan_replica_set;
use crate::kafka_types::{BrokerId, BrokerPool};

/// New Replica Set of every Partition of a Topic, indexed by Partition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentPlan {
    topic: String,
    partitions: BTreeMap<u32, Vec<BrokerId>>,
}

impl AssignmentPlan {
    pub fn new<T: Into<String>>(topic: T) -> Self {
        Self {
            topic: topic.into(),
            partitions: BTreeMap::new(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Set the Replica Set of a Partition, returning the one it replaces (if any).
    pub fn insert(&mut self, partition: u32, replicas: Vec<BrokerId>) -> Option<Vec<BrokerId>> {
        self.partitions.insert(partition, replicas)
    }

    pub fn get(&self, partition: u32) -> Option<&[BrokerId]> {
        self.partitions.get(&partition).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Partitions and their Replica Set, in ascending Partition order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[BrokerId])> + '_ {
        self.partitions.iter().map(|(p, r)| (*p, r.as_slice()))
    }

    /// The replication factor shared by all Partitions.
    ///
    /// `None` if the plan is empty, or if Partitions have Replica Sets of different length.
    pub fn replication_factor(&self) -> Option<usize> {
        let mut lengths = self.partitions.values().map(Vec::len);
        let first = lengths.next()?;
        lengths.all(|l| l == first).then_some(first)
    }
}

/// Plan the new Replica Set of every Partition of `topic`, so that each has `target_rf` replicas.
///
/// Partitions are planned in ascending order, and planning stops at the first Partition
/// that can't be satisfied: the returned [`PlanningFailure`] carries the partial plan.
/// A successful plan has exactly `target_rf` replicas for every Partition given in input.
///
/// # Arguments
///
/// * `topic` - Topic the Partitions belong to
/// * `pool` - All the Brokers currently known to the cluster
/// * `partition_replicas` - Current Replica Set of each Partition of the Topic
/// * `target_rf` - Replication factor the Topic should have
/// * `rng` - Source of randomness used to pick new replicas
pub fn plan_assignment<R: Rng + ?Sized>(
    topic: &str,
    pool: &BrokerPool,
    partition_replicas: &BTreeMap<u32, Vec<BrokerId>>,
    target_rf: i32,
    rng: &mut R,
) -> Result<AssignmentPlan, PlanningFailure> {
    let mut plan = AssignmentPlan::new(topic);

    if target_rf < 1 {
        return Err(PlanningFailure {
            topic: topic.to_string(),
            partition: None,
            cause: PlannerError::InvalidReplicationFactor(target_rf),
            partial_plan: plan,
        });
    }

    for (partition, current) in partition_replicas {
        let delta = target_rf - current.len() as i32;

        match plan_replica_set(pool, current, delta, rng) {
            Ok(planned) => {
                trace!("Planned '{topic}:{partition}': {current:?} -> {planned:?}");
                plan.insert(*partition, planned);
            },
            Err(cause) => {
                debug!("Planning of '{topic}:{partition}' failed: {cause}");
                return Err(PlanningFailure {
                    topic: topic.to_string(),
                    partition: Some(*partition),
                    cause,
                    partial_plan: plan,
                });
            },
        }
    }

    Ok(plan)
}
