use std::time::Duration;

/// Broker identifier used by Kafka metadata to signal "no broker" (ex. a partition without leader).
/// It is never a valid member of a Replica Set.
pub const NO_BROKER: i32 = -1;

/// Version of the `kafka-reassign-partitions` JSON format read and written by `crate::cluster_status`.
pub(crate) const REASSIGNMENT_JSON_VERSION: u32 = 1;

/// Environment variable that, if set, overrides the logging level selected via command line.
pub const LOG_ENV_VAR: &str = "KREASSIGN_LOG";

pub const DEFAULT_METADATA_TIMEOUT_SECS: &str = "10";
pub const DEFAULT_STATUS_POLL_INTERVAL_SECS: &str = "5";

/// Shortest period between two reassignment status checks.
pub const MIN_STATUS_POLL_INTERVAL: Duration = Duration::from_millis(100);
