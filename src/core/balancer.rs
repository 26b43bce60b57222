//! Balancer: ties inventory, planning, synthesis and pruning together.
//!
//! There is no transactional rollback: a run interrupted mid-class leaves
//! the images already created or deleted on disk. Dry-run mode exists to
//! preview a plan before committing to it.

use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::BalanceConfig;
use crate::core::inventory;
use crate::core::planner;
use crate::core::prune;
use crate::core::synthesis;
use crate::error::{BalanceError, BalanceResult};

/// What happened to one class during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassAction {
    /// Already at the target count
    Unchanged,
    /// Derived images written to close a deficit
    Created(usize),
    /// Files removed to trim a surplus
    Deleted { deleted: usize, warnings: Vec<String> },
    /// Dry-run only: the action that would have been taken
    Planned,
    /// The class aborted; the rest of the run continued
    Failed(String),
}

/// Per-class entry of a balance report
#[derive(Debug, Clone)]
pub struct ClassOutcome {
    pub name: String,
    pub delta: i64,
    pub action: ClassAction,
}

/// Summary of a full `balance()` run
#[derive(Debug, Clone)]
pub struct BalanceReport {
    pub target: usize,
    pub outcomes: Vec<ClassOutcome>,
}

impl BalanceReport {
    /// False when any class failed or produced deletion warnings
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| match &o.action {
            ClassAction::Failed(_) => false,
            ClassAction::Deleted { warnings, .. } => warnings.is_empty(),
            _ => true,
        })
    }

    pub fn failures(&self) -> Vec<&ClassOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.action, ClassAction::Failed(_)))
            .collect()
    }
}

/// Dataset balancer. Owns a validated configuration; all dataset state is
/// recomputed per run, nothing is cached between runs.
pub struct Balancer {
    config: BalanceConfig,
}

impl Balancer {
    pub fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    /// Run one full balancing pass: scan, pick the target, compute deltas,
    /// then synthesize or prune each class in plan order. Configuration and
    /// empty-dataset errors abort immediately; a failure inside one class
    /// aborts only that class and is recorded in the report.
    pub fn balance(&self) -> BalanceResult<BalanceReport> {
        let root = self.config.root_folder_path();

        let inventory = inventory::scan(root)?;
        if inventory.is_empty() {
            error!("Dataset root {:?} has no class subdirectories", root);
            return Err(BalanceError::EmptyDataset);
        }

        let target = planner::select_target(&inventory, self.config.mode())?;
        let plan = planner::plan(&inventory, target);

        info!(
            "Balancing {:?} with policy '{}': target is {} images per class",
            root,
            self.config.mode().as_str(),
            target
        );

        let mut outcomes = Vec::with_capacity(plan.len());
        for class in plan {
            let class_dir = root.join(&class.name);
            let action = self.process_class(&class_dir, &class.name, class.delta);
            outcomes.push(ClassOutcome {
                name: class.name,
                delta: class.delta,
                action,
            });
        }

        let report = BalanceReport { target, outcomes };
        if !report.is_clean() {
            warn!("Run finished with failures or warnings");
        }
        Ok(report)
    }

    fn process_class(&self, class_dir: &PathBuf, name: &str, delta: i64) -> ClassAction {
        if delta == 0 {
            info!("Class '{}' already at target, skipping", name);
            return ClassAction::Unchanged;
        }

        if self.config.dry_run() {
            if delta < 0 {
                info!(
                    "Dry-run: would create {} images in class '{}'",
                    delta.unsigned_abs(),
                    name
                );
            } else {
                info!("Dry-run: would delete {} images from class '{}'", delta, name);
            }
            return ClassAction::Planned;
        }

        if delta < 0 {
            match synthesis::synthesize(class_dir, delta.unsigned_abs()) {
                Ok(created) => ClassAction::Created(created),
                Err(e) => {
                    error!("Class '{}' synthesis failed: {}", name, e);
                    ClassAction::Failed(e.to_string())
                }
            }
        } else {
            match prune::prune(class_dir, delta as u64) {
                Ok(outcome) => ClassAction::Deleted {
                    deleted: outcome.deleted,
                    warnings: outcome.warnings,
                },
                Err(e) => {
                    error!("Class '{}' pruning failed: {}", name, e);
                    ClassAction::Failed(e.to_string())
                }
            }
        }
    }
}
