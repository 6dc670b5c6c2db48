use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::{ClusterError, ClusterResult};
use crate::constants::REASSIGNMENT_JSON_VERSION;
use crate::kafka_types::{BrokerId, TopicPartition};
use crate::planner::AssignmentPlan;
use crate::reassignment::{
    ClusterMetadataService, ReassignmentStatus, ReassignmentStatusService, ReassignmentSubmitter,
};

/// Document in the format read by `kafka-reassign-partitions.sh --execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ReassignmentJson {
    version: u32,
    partitions: Vec<PartitionReassignmentJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PartitionReassignmentJson {
    topic: String,
    partition: u32,
    replicas: Vec<BrokerId>,
}

/// Serialize an [`AssignmentPlan`] into reassignment JSON.
pub fn plan_to_json(plan: &AssignmentPlan) -> ClusterResult<String> {
    let doc = ReassignmentJson {
        version: REASSIGNMENT_JSON_VERSION,
        partitions: plan
            .iter()
            .map(|(partition, replicas)| PartitionReassignmentJson {
                topic: plan.topic().to_string(),
                partition,
                replicas: replicas.to_vec(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse the [`AssignmentPlan`] of `topic` out of reassignment JSON.
///
/// Entries for other Topics are ignored: the result is empty if `topic` is not in the document.
pub fn plan_from_json(topic: &str, json: &str) -> ClusterResult<AssignmentPlan> {
    let doc: ReassignmentJson = serde_json::from_str(json)?;

    let mut plan = AssignmentPlan::new(topic);
    for p in doc.partitions.into_iter().filter(|p| p.topic == topic) {
        plan.insert(p.partition, p.replicas);
    }

    Ok(plan)
}

/// Reassignment plans stored as a JSON file.
///
/// Submitting writes the plan to the file, ready for `kafka-reassign-partitions.sh --execute`:
/// the Admin Kafka Client has no API to alter partition reassignments.
///
/// The status of a reassignment is derived comparing the plan in the file with the live replicas:
/// while Kafka is moving them, a Partition has both its target and its original replicas.
pub struct ReassignmentFile {
    path: PathBuf,
    metadata: Arc<dyn ClusterMetadataService>,
}

impl ReassignmentFile {
    /// Create a new [`ReassignmentFile`]
    ///
    /// # Arguments
    ///
    /// * `path` - Where the reassignment JSON is written to, and read from
    /// * `metadata` - Source of the live replicas of each Partition
    pub fn new<P: Into<PathBuf>>(path: P, metadata: Arc<dyn ClusterMetadataService>) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ClusterError {
        ClusterError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl ReassignmentSubmitter for ReassignmentFile {
    async fn submit(&self, plan: &AssignmentPlan) -> ClusterResult<()> {
        let json = plan_to_json(plan)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| self.io_error(e))?;

        info!("Reassignment plan of Topic '{}' written to '{}'", plan.topic(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ReassignmentStatusService for ReassignmentFile {
    async fn get_status(
        &self,
        topic: &str,
        partitions: &[u32],
    ) -> ClusterResult<HashMap<u32, ReassignmentStatus>> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| self.io_error(e))?;
        let plan = plan_from_json(topic, &json)?;
        if plan.is_empty() && !partitions.is_empty() {
            return Err(ClusterError::TopicNotInPlan {
                topic: topic.to_string(),
                path: self.path.clone(),
            });
        }
        let cluster = self.metadata.refresh_metadata().await?;

        let mut statuses = HashMap::with_capacity(partitions.len());
        for p in partitions {
            let Some(target) = plan.get(*p) else {
                trace!("No planned replicas for '{topic}:{p}'");
                continue;
            };
            let live = cluster
                .replicas(topic, *p)
                .ok_or_else(|| ClusterError::UnknownPartition(TopicPartition::new(topic, *p)))?;

            statuses.insert(*p, diff_replicas(target, live));
        }

        Ok(statuses)
    }
}

fn diff_replicas(target: &[BrokerId], live: &[BrokerId]) -> ReassignmentStatus {
    ReassignmentStatus {
        adding_replicas: target.iter().copied().filter(|r| !live.contains(r)).collect(),
        removing_replicas: live.iter().copied().filter(|r| !target.contains(r)).collect(),
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::{diff_replicas, plan_from_json, plan_to_json, ReassignmentFile};
    use crate::cluster_status::{ClusterError, ClusterResult, ClusterStatus};
    use crate::kafka_types::{PartitionReplicas, TopicReplicas};
    use crate::planner::AssignmentPlan;
    use crate::reassignment::{
        ClusterMetadataService, ReassignmentStatus, ReassignmentStatusService, ReassignmentSubmitter,
    };

    struct StaticMetadata(ClusterStatus);

    #[async_trait]
    impl ClusterMetadataService for StaticMetadata {
        async fn refresh_metadata(&self) -> ClusterResult<ClusterStatus> {
            Ok(self.0.clone())
        }
    }

    fn live_replicas(topic: &str, partitions: &[&[i32]]) -> Arc<StaticMetadata> {
        Arc::new(StaticMetadata(ClusterStatus {
            topics: vec![TopicReplicas {
                name: topic.to_string(),
                partitions: partitions
                    .iter()
                    .enumerate()
                    .map(|(id, r)| PartitionReplicas {
                        id: id as u32,
                        replica_brokers: r.to_vec(),
                        ..Default::default()
                    })
                    .collect(),
            }],
            brokers: vec![],
        }))
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("kreassign-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn json_format() {
        let mut plan = AssignmentPlan::new("orders");
        plan.insert(1, vec![3, 1]);
        plan.insert(0, vec![1, 2]);

        let json = plan_to_json(&plan).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "version": 1,
                "partitions": [
                    { "topic": "orders", "partition": 0, "replicas": [1, 2] },
                    { "topic": "orders", "partition": 1, "replicas": [3, 1] },
                ]
            })
        );
    }

    #[test]
    fn parse_only_requested_topic() {
        let json = r#"{
            "version": 1,
            "partitions": [
                { "topic": "orders", "partition": 0, "replicas": [1, 2], "log_dirs": ["any", "any"] },
                { "topic": "payments", "partition": 0, "replicas": [3] },
                { "topic": "orders", "partition": 2, "replicas": [2, 3] }
            ]
        }"#;

        let plan = plan_from_json("orders", json).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.get(0), Some(&[1, 2][..]));
        assert_eq!(plan.get(2), Some(&[2, 3][..]));

        assert!(plan_from_json("users", json).unwrap().is_empty());
        assert!(matches!(plan_from_json("orders", "{}"), Err(ClusterError::Serialization(_))));
    }

    #[test]
    fn replicas_difference() {
        assert_eq!(diff_replicas(&[1, 2], &[1, 2]), ReassignmentStatus::default());
        assert_eq!(
            diff_replicas(&[1, 2, 3], &[1, 2]),
            ReassignmentStatus {
                adding_replicas: vec![3],
                removing_replicas: vec![],
            }
        );
        assert_eq!(
            diff_replicas(&[1], &[1, 2, 3]),
            ReassignmentStatus {
                adding_replicas: vec![],
                removing_replicas: vec![2, 3],
            }
        );
    }

    #[tokio::test]
    async fn submit_then_track() {
        let path = temp_path("track");
        let mut plan = AssignmentPlan::new("orders");
        plan.insert(0, vec![1, 2, 3]);
        plan.insert(1, vec![2]);

        ReassignmentFile::new(&path, live_replicas("orders", &[&[1, 2], &[2]]))
            .submit(&plan)
            .await
            .unwrap();

        // Partition 0 is still gaining broker 3; partition 1 is done
        let moving = ReassignmentFile::new(&path, live_replicas("orders", &[&[1, 2], &[2]]));
        let statuses = moving.get_status("orders", &[0, 1]).await.unwrap();
        assert!(statuses[&0].is_in_progress());
        assert_eq!(statuses[&0].adding_replicas, vec![3]);
        assert!(!statuses[&1].is_in_progress());

        let done = ReassignmentFile::new(&path, live_replicas("orders", &[&[1, 2, 3], &[2]]));
        let statuses = done.get_status("orders", &[0, 1]).await.unwrap();
        assert!(statuses.values().all(|s| !s.is_in_progress()));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn topic_missing_from_file() {
        let path = temp_path("other-topic");
        let mut plan = AssignmentPlan::new("payments");
        plan.insert(0, vec![1, 2]);

        let file = ReassignmentFile::new(&path, live_replicas("orders", &[&[1]]));
        file.submit(&plan).await.unwrap();

        let err = file.get_status("orders", &[0]).await.unwrap_err();
        assert!(matches!(&err, ClusterError::TopicNotInPlan { topic, .. } if topic == "orders"));
        assert!(!err.is_retryable());

        // No partitions asked about, nothing to report
        assert!(file.get_status("orders", &[]).await.unwrap().is_empty());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn missing_file() {
        let file = ReassignmentFile::new(temp_path("missing"), live_replicas("orders", &[&[1]]));

        let err = file.get_status("orders", &[0]).await.unwrap_err();
        assert!(matches!(err, ClusterError::Io { .. }));
        assert!(!err.is_retryable());
    }
}
