//! Pure computation of new Replica Sets, when the replication factor of a Topic changes.

mod assignment;
mod errors;
mod replica_set;

pub use assignment::{plan_assignment, AssignmentPlan};
pub use errors::{PlannerError, PlannerResult, PlanningFailure};
pub use replica_set::plan_replica_set;
