use std::cmp::Ordering;
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::errors::{PlannerError, PlannerResult};
use crate::constants::NO_BROKER;
use crate::kafka_types::{BrokerId, BrokerPool};

/// Plan the new Replica Set of a single Partition.
///
/// * `delta == 0`: the `current` Replica Set is returned as is.
/// * `delta < 0`: the first `current.len() + delta` replicas are kept, in their original order,
///   so the preferred leader and the oldest replicas survive.
/// * `delta > 0`: `delta` Brokers are picked, uniformly at random and without replacement,
///   among the ones of the `pool` not already in `current`, and appended to it.
///
/// # Arguments
///
/// * `pool` - All the Brokers currently known to the cluster
/// * `current` - Current Replica Set of the Partition
/// * `delta` - Target replication factor, minus the current one
/// * `rng` - Source of randomness used to pick new replicas
pub fn plan_replica_set<R: Rng + ?Sized>(
    pool: &BrokerPool,
    current: &[BrokerId],
    delta: i32,
    rng: &mut R,
) -> PlannerResult<Vec<BrokerId>> {
    if pool.is_empty() {
        return Err(PlannerError::EmptyBrokerPool);
    }
    validate_replica_set(current)?;

    match delta.cmp(&0) {
        Ordering::Equal => Ok(current.to_vec()),
        Ordering::Less => {
            let dropped = delta.unsigned_abs() as usize;
            if dropped >= current.len() {
                return Err(PlannerError::InsufficientReplicas {
                    current: current.len(),
                    dropped,
                });
            }

            Ok(current[..current.len() - dropped].to_vec())
        },
        Ordering::Greater => {
            let requested = delta as usize;
            let unused = pool.unused_by(current);
            if unused.len() < requested {
                return Err(PlannerError::InsufficientBrokers {
                    requested,
                    available: unused.len(),
                });
            }

            let mut planned = Vec::with_capacity(current.len() + requested);
            planned.extend_from_slice(current);
            planned.extend(unused.choose_multiple(rng, requested).copied());

            trace!("Grew replica set {:?} into {:?}", current, planned);
            Ok(planned)
        },
    }
}

fn validate_replica_set(replicas: &[BrokerId]) -> PlannerResult<()> {
    let mut seen = HashSet::with_capacity(replicas.len());
    for r in replicas {
        if *r == NO_BROKER || !seen.insert(*r) {
            return Err(PlannerError::InvalidReplicaSet(replicas.to_vec()));
        }
    }

    Ok(())
}
