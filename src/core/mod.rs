pub mod balancer;
pub mod inventory;
pub mod planner;
pub mod prune;
pub mod synthesis;

pub use balancer::{BalanceReport, Balancer, ClassAction, ClassOutcome};
pub use inventory::{scan, ClassRecord};
pub use planner::{plan, select_target, ClassDelta};
pub use prune::{prune, PruneOutcome};
pub use synthesis::{synthesize, VARIANTS_PER_SOURCE};
