//! Live cluster state, and the services that read it from (or hand plans over to) Kafka.

mod client;
mod errors;
mod reassignment_file;
mod status;

pub use client::KafkaClusterClient;
pub use errors::{ClusterError, ClusterResult};
pub use reassignment_file::{plan_from_json, plan_to_json, ReassignmentFile};
pub use status::ClusterStatus;
