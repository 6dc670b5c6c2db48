use rdkafka::metadata::MetadataTopic;

use super::partition::PartitionReplicas;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TopicReplicas {
    pub name: String,
    pub partitions: Vec<PartitionReplicas>,
}

impl From<&MetadataTopic> for TopicReplicas {
    fn from(t: &MetadataTopic) -> Self {
        TopicReplicas {
            name: t.name().to_owned(),
            partitions: t.partitions().iter().map(PartitionReplicas::from).collect(),
        }
    }
}

impl TopicReplicas {
    /// Indices of the Partitions of this Topic, in ascending order.
    pub fn partition_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.partitions.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids
    }
}
