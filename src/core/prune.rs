//! Image pruner: trims a class surplus by deleting randomly chosen files.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use rand::seq::SliceRandom;

use crate::error::{BalanceError, BalanceResult};

/// What a prune pass actually did. Warnings cover the tolerated failure
/// modes (file already gone, fewer files than requested); they never abort
/// a run.
#[derive(Debug, Clone, Default)]
pub struct PruneOutcome {
    pub deleted: usize,
    pub warnings: Vec<String>,
}

/// Delete `surplus` files from `class_dir`, chosen by a uniform random
/// shuffle. A file that is already gone when its turn comes is logged and
/// skipped; any other I/O failure propagates.
pub fn prune(class_dir: &Path, surplus: u64) -> BalanceResult<PruneOutcome> {
    let mut files = list_files(class_dir)?;
    let mut rng = rand::thread_rng();
    files.shuffle(&mut rng);

    info!("Pruning {} of {} files in {:?}", surplus, files.len(), class_dir);

    let mut outcome = PruneOutcome::default();
    let surplus = surplus as usize;

    if surplus > files.len() {
        let warning = format!(
            "asked to delete {} files from {:?} but only {} exist",
            surplus,
            class_dir,
            files.len()
        );
        warn!("{}", warning);
        outcome.warnings.push(warning);
    }

    for path in files.iter().take(surplus) {
        match fs::remove_file(path) {
            Ok(()) => outcome.deleted += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let warning = format!("file {:?} was already gone, skipping", path);
                warn!("{}", warning);
                outcome.warnings.push(warning);
            }
            Err(e) => return Err(BalanceError::path_error(path, &e)),
        }
    }

    info!("Pruned {} files from {:?}", outcome.deleted, class_dir);
    Ok(outcome)
}

fn list_files(dir: &Path) -> BalanceResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| BalanceError::path_error(dir, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| BalanceError::path_error(dir, &e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fill_dir(dir: &Path, count: usize) {
        for i in 0..count {
            fs::write(dir.join(format!("img_{}.jpg", i)), b"x").unwrap();
        }
    }

    fn remaining(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_prune_deletes_exact_count() {
        let dir = tempfile::tempdir().unwrap();
        fill_dir(dir.path(), 10);

        let outcome = prune(dir.path(), 3).unwrap();
        assert_eq!(outcome.deleted, 3);
        assert!(outcome.warnings.is_empty());
        assert_eq!(remaining(dir.path()).len(), 7);
    }

    #[test]
    fn test_prune_surplus_beyond_available_warns_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        fill_dir(dir.path(), 2);

        let outcome = prune(dir.path(), 5).unwrap();
        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(remaining(dir.path()).is_empty());
    }

    #[test]
    fn test_prune_empty_directory_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = prune(dir.path(), 1).unwrap();
        assert_eq!(outcome.deleted, 0);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_prune_missing_directory_fails() {
        let err = prune(Path::new("/no/such/class"), 1).unwrap_err();
        assert!(matches!(err, BalanceError::Path { .. }));
    }

    #[test]
    fn test_prune_selection_is_not_position_biased() {
        // Repeated trials over a fresh 4-file directory: with a uniform
        // shuffle every file should be deleted sometimes. A position-biased
        // selection would delete the same files every trial.
        let mut deletions: HashMap<String, usize> = HashMap::new();
        for _ in 0..60 {
            let dir = tempfile::tempdir().unwrap();
            fill_dir(dir.path(), 4);
            prune(dir.path(), 1).unwrap();

            let kept = remaining(dir.path());
            for i in 0..4 {
                let name = format!("img_{}.jpg", i);
                if !kept.contains(&name) {
                    *deletions.entry(name).or_insert(0) += 1;
                }
            }
        }
        // Every position deleted at least once across 60 trials; the odds
        // of missing one with a fair shuffle are (3/4)^60, vanishingly small
        assert_eq!(deletions.len(), 4, "deletions were position-biased: {:?}", deletions);
    }
}
