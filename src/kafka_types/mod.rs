mod broker;
mod broker_pool;
mod partition;
mod topic;
mod topic_partition;

pub use broker::{Broker, BrokerId};
pub use broker_pool::BrokerPool;
pub use partition::PartitionReplicas;
pub use topic::TopicReplicas;
pub use topic_partition::TopicPartition;
