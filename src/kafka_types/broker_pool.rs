use std::collections::BTreeSet;

use super::broker::BrokerId;
use crate::constants::NO_BROKER;

/// Set of all the Brokers currently known to the cluster metadata.
///
/// Never contains [`NO_BROKER`]: it's dropped when the pool is built,
/// together with any duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrokerPool {
    ids: BTreeSet<BrokerId>,
}

impl BrokerPool {
    pub fn contains(&self, id: BrokerId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Broker identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = BrokerId> + '_ {
        self.ids.iter().copied()
    }

    /// Brokers of the pool that are not part of the given Replica Set, in ascending order.
    pub fn unused_by(&self, replicas: &[BrokerId]) -> Vec<BrokerId> {
        self.ids.iter().copied().filter(|id| !replicas.contains(id)).collect()
    }
}

impl FromIterator<BrokerId> for BrokerPool {
    fn from_iter<I: IntoIterator<Item = BrokerId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().filter(|id| *id != NO_BROKER).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::BrokerPool;
    use crate::kafka_types::Broker;

    #[test]
    fn drops_sentinel_and_duplicates() {
        let pool: BrokerPool = vec![3, -1, 1, 3, 2].into_iter().collect();

        assert_eq!(pool.len(), 3);
        assert!(!pool.contains(-1));
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn from_brokers() {
        let brokers = vec![
            Broker {
                id: 7,
                host: "kafka-7".to_string(),
                port: 9092,
            },
            Broker {
                id: -1,
                host: "".to_string(),
                port: 0,
            },
        ];

        let pool: BrokerPool = brokers.iter().map(|b| b.id).collect();
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn unused_by_replica_set() {
        let pool: BrokerPool = (1..=5).collect();

        assert_eq!(pool.unused_by(&[2, 4]), vec![1, 3, 5]);
        assert_eq!(pool.unused_by(&[9]), vec![1, 2, 3, 4, 5]);
        assert!(pool.unused_by(&[5, 4, 3, 2, 1]).is_empty());
    }
}
