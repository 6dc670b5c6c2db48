use std::path::PathBuf;

use thiserror::Error;

use crate::kafka_types::TopicPartition;

/// Possible errors from the services that read from, or act upon, the Kafka cluster.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Cluster metadata could not be (re)fetched.
    #[error("Failed to refresh cluster metadata: {0}")]
    MetadataRefreshFailed(String),

    /// Communication with the cluster failed.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Topic '{0}' not found")]
    UnknownTopic(String),

    #[error("Partition '{0}' not found")]
    UnknownPartition(TopicPartition),

    /// A reassignment plan for the Topic was not accepted.
    #[error("Failed to submit reassignment of Topic '{0}': {1}")]
    Submission(String, String),

    /// The reassignment JSON has no Partitions of the Topic.
    #[error("Topic '{topic}' not found in reassignment JSON '{}'", .path.display())]
    TopicNotInPlan { topic: String, path: PathBuf },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed reassignment JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClusterError {
    /// `true` if the same call might succeed if retried later (with backoff).
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClusterError::MetadataRefreshFailed(_) | ClusterError::Transport(_))
    }
}

pub type ClusterResult<T> = Result<T, ClusterError>;
