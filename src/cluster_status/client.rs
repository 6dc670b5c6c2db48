use std::sync::Arc;

use async_trait::async_trait;
use rdkafka::{admin::AdminClient, client::DefaultClientContext, ClientConfig};
use tokio::time::Duration;

use super::errors::{ClusterError, ClusterResult};
use super::status::ClusterStatus;
use crate::kafka_types::{BrokerId, TopicPartition};
use crate::reassignment::{ClusterMetadataService, ReplicaQueryService};

/// Reads the cluster metadata via an Admin Kafka Client.
///
/// Every request fetches fresh metadata from the Brokers.
/// The (blocking) client calls are run on the blocking thread pool of the runtime.
pub struct KafkaClusterClient {
    admin_client: Arc<AdminClient<DefaultClientContext>>,
    fetch_timeout: Duration,
}

impl KafkaClusterClient {
    /// Create a new [`KafkaClusterClient`]
    ///
    /// # Arguments
    ///
    /// * `client_config` - Kafka admin client configuration, used to fetch the cluster metadata
    /// * `fetch_timeout` - How long to wait for metadata, before giving up
    pub fn new(client_config: &ClientConfig, fetch_timeout: Duration) -> ClusterResult<Self> {
        let admin_client: AdminClient<DefaultClientContext> = client_config
            .create()
            .map_err(|e| ClusterError::Transport(format!("Failed to allocate Admin Client: {e}")))?;

        Ok(Self {
            admin_client: Arc::new(admin_client),
            fetch_timeout,
        })
    }

    async fn fetch_metadata(&self, topic: Option<String>) -> ClusterResult<ClusterStatus> {
        let admin_client = self.admin_client.clone();
        let timeout = self.fetch_timeout;

        tokio::task::spawn_blocking(move || {
            admin_client
                .inner()
                .fetch_metadata(topic.as_deref(), timeout)
                .map(|m| ClusterStatus::from(&m))
        })
        .await
        .map_err(|e| ClusterError::Transport(format!("Metadata fetch task failed: {e}")))?
        .map_err(|e| ClusterError::MetadataRefreshFailed(e.to_string()))
    }
}

#[async_trait]
impl ClusterMetadataService for KafkaClusterClient {
    async fn refresh_metadata(&self) -> ClusterResult<ClusterStatus> {
        let status = self.fetch_metadata(None).await?;
        debug!(
            "Fetched cluster metadata: {} topics, {} brokers",
            status.topics.len(),
            status.brokers.len()
        );

        Ok(status)
    }
}

#[async_trait]
impl ReplicaQueryService for KafkaClusterClient {
    async fn get_replicas(&self, topic: &str, partition: u32) -> ClusterResult<Vec<BrokerId>> {
        let status = self.fetch_metadata(Some(topic.to_string())).await?;

        if status.partitions_for_topic(topic).is_none() {
            return Err(ClusterError::UnknownTopic(topic.to_string()));
        }

        status
            .replicas(topic, partition)
            .map(<[BrokerId]>::to_vec)
            .ok_or_else(|| ClusterError::UnknownPartition(TopicPartition::new(topic, partition)))
    }
}
