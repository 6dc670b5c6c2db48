use rdkafka::metadata::Metadata;

use crate::kafka_types::{Broker, BrokerId, BrokerPool, TopicReplicas};

/// Point-in-time snapshot of the Kafka cluster: which Brokers are part of it,
/// and where the replicas of every Topic Partition live.
///
/// It's fetched fresh every time it's needed, and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ClusterStatus {
    /// A vector of [`TopicReplicas`].
    ///
    /// It reflects the status of Topics (and Partitions) as reported by the Kafka cluster.
    pub topics: Vec<TopicReplicas>,

    /// A vector of [`Broker`].
    ///
    /// It reflects the status of Brokers as reported by the Kafka cluster.
    pub brokers: Vec<Broker>,
}

impl From<&Metadata> for ClusterStatus {
    fn from(m: &Metadata) -> Self {
        Self {
            topics: m
                .topics()
                .iter()
                // Topics requested explicitly, but unknown to the cluster, come back with an error
                .filter(|mt| mt.error().is_none())
                .map(TopicReplicas::from)
                .collect(),
            brokers: m.brokers().iter().map(Broker::from).collect(),
        }
    }
}

impl ClusterStatus {
    /// All the Brokers currently part of the cluster.
    pub fn broker_pool(&self) -> BrokerPool {
        self.brokers.iter().map(|b| b.id).collect()
    }

    /// Partitions of a Topic, in ascending order.
    ///
    /// # Arguments
    ///
    /// * `topic` - Topics we want to know the Partitions of.
    pub fn partitions_for_topic(&self, topic: &str) -> Option<Vec<u32>> {
        self.topics.iter().find(|t| t.name == topic).map(TopicReplicas::partition_ids)
    }

    /// Current Replica Set of a Topic Partition.
    pub fn replicas(&self, topic: &str, partition: u32) -> Option<&[BrokerId]> {
        self.topics
            .iter()
            .find(|t| t.name == topic)?
            .partitions
            .iter()
            .find(|p| p.id == partition)
            .map(|p| p.replica_brokers.as_slice())
    }
}

#[cfg(test)]
mod test {
    use super::ClusterStatus;
    use crate::kafka_types::{Broker, PartitionReplicas, TopicReplicas};

    fn example_status() -> ClusterStatus {
        ClusterStatus {
            topics: vec![TopicReplicas {
                name: "orders".to_string(),
                partitions: vec![
                    PartitionReplicas {
                        id: 1,
                        leader_broker: 2,
                        replica_brokers: vec![2, 3],
                        in_sync_replica_brokers: vec![2, 3],
                    },
                    PartitionReplicas {
                        id: 0,
                        leader_broker: 1,
                        replica_brokers: vec![1, 2],
                        in_sync_replica_brokers: vec![1],
                    },
                ],
            }],
            brokers: [1, 2, 3, -1]
                .into_iter()
                .map(|id| Broker {
                    id,
                    host: format!("kafka-{id}"),
                    port: 9092,
                })
                .collect(),
        }
    }

    #[test]
    fn lookups() {
        let status = example_status();

        assert_eq!(status.partitions_for_topic("orders"), Some(vec![0, 1]));
        assert_eq!(status.partitions_for_topic("payments"), None);
        assert_eq!(status.replicas("orders", 1), Some(&[2, 3][..]));
        assert_eq!(status.replicas("orders", 2), None);
        assert_eq!(status.broker_pool().iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
