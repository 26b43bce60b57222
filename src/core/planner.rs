//! Target selection and per-class delta planning.

use crate::config::Policy;
use crate::core::inventory::ClassRecord;
use crate::error::{BalanceError, BalanceResult};

/// How far a class is from the target count. Negative delta is a deficit
/// (images must be created), positive is a surplus (images must be deleted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDelta {
    pub name: String,
    pub delta: i64,
}

/// Pick the normalization target from a ranked (ascending) inventory.
/// Min and max read the sorted ends; mean is the integer-truncated average.
pub fn select_target(inventory: &[ClassRecord], policy: Policy) -> BalanceResult<usize> {
    let first = inventory.first().ok_or(BalanceError::EmptyDataset)?;

    let target = match policy {
        Policy::Min => first.count,
        Policy::Max => inventory[inventory.len() - 1].count,
        Policy::Mean => {
            let sum: usize = inventory.iter().map(|r| r.count).sum();
            sum / inventory.len()
        }
    };

    Ok(target)
}

/// Compute signed deltas against the target, preserving inventory order.
/// Pure function, no filesystem access.
pub fn plan(inventory: &[ClassRecord], target: usize) -> Vec<ClassDelta> {
    inventory
        .iter()
        .map(|record| ClassDelta {
            name: record.name.clone(),
            delta: record.count as i64 - target as i64,
        })
        .collect()
}
