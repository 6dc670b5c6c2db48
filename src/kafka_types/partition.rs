use rdkafka::metadata::MetadataPartition;

use super::broker::BrokerId;

/// Where the replicas of a single Partition live.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PartitionReplicas {
    pub id: u32,
    pub leader_broker: BrokerId,

    /// Replica Set of the Partition: the first element is the preferred leader.
    pub replica_brokers: Vec<BrokerId>,
    pub in_sync_replica_brokers: Vec<BrokerId>,
}

impl From<&MetadataPartition> for PartitionReplicas {
    fn from(p: &MetadataPartition) -> Self {
        PartitionReplicas {
            id: p.id() as u32,
            leader_broker: p.leader(),
            replica_brokers: p.replicas().to_vec(),
            in_sync_replica_brokers: p.isr().to_vec(),
        }
    }
}
