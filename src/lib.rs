//! Plan and track changes to the replication factor of Kafka Topics.
//!
//! The [`planner`] computes new Replica Sets, the [`reassignment::Orchestrator`] feeds it
//! with live cluster state and submits the result, [`cluster_status`] talks to Kafka.

#[macro_use]
extern crate log;

pub mod cluster_status;
pub mod constants;
pub mod kafka_types;
pub mod planner;
pub mod reassignment;
