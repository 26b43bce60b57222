//! Class inventory: scans the dataset root and ranks classes by image count.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{BalanceError, BalanceResult};

/// One class of the dataset: the subdirectory name and the number of files
/// directly inside it. Created fresh on every scan, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    pub count: usize,
}

/// Scan the immediate subdirectories of `root` and count the entries directly
/// inside each one (no recursion, no extension filtering). The result is
/// sorted ascending by count; ties keep scan order, so the ordering is
/// deterministic for a fixed directory state.
///
/// Fails if `root` is missing or not a directory, and if any class directory
/// contains a subdirectory of its own (only one level of nesting is
/// supported).
pub fn scan(root: &Path) -> BalanceResult<Vec<ClassRecord>> {
    if !root.is_dir() {
        return Err(BalanceError::Path {
            path: root.to_path_buf(),
            reason: "not an existing directory".to_string(),
        });
    }

    info!("Scanning dataset root {:?}", root);

    let mut inventory: Vec<ClassRecord> = Vec::new();
    let entries = fs::read_dir(root).map_err(|e| BalanceError::path_error(root, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| BalanceError::path_error(root, &e))?;
        let path = entry.path();
        if !path.is_dir() {
            // Stray files at the root level are not classes
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let count = count_class_entries(&name, &path)?;
        insert_ranked(&mut inventory, ClassRecord { name, count });
    }

    info!("Found {} classes", inventory.len());
    Ok(inventory)
}

/// Count entries directly inside a class directory, rejecting nested
/// directories so deeper nesting can never silently miscount.
fn count_class_entries(class: &str, dir: &Path) -> BalanceResult<usize> {
    let mut count = 0;
    let entries = fs::read_dir(dir).map_err(|e| BalanceError::path_error(dir, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| BalanceError::path_error(dir, &e))?;
        if entry.path().is_dir() {
            return Err(BalanceError::NestedClass {
                class: class.to_string(),
                path: entry.path(),
            });
        }
        count += 1;
    }

    Ok(count)
}

/// Insertion sort keeps the inventory ascending by count with stable
/// ordering among ties.
fn insert_ranked(inventory: &mut Vec<ClassRecord>, record: ClassRecord) {
    let position = inventory
        .iter()
        .position(|existing| record.count < existing.count)
        .unwrap_or(inventory.len());
    inventory.insert(position, record);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_class(root: &Path, name: &str, files: usize) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        for i in 0..files {
            fs::write(dir.join(format!("img_{}.jpg", i)), b"x").unwrap();
        }
    }

    #[test]
    fn test_scan_sorts_ascending_by_count() {
        let root = tempfile::tempdir().unwrap();
        make_class(root.path(), "cats", 5);
        make_class(root.path(), "dogs", 2);
        make_class(root.path(), "birds", 8);

        let inventory = scan(root.path()).unwrap();
        let counts: Vec<usize> = inventory.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![2, 5, 8]);
        assert_eq!(inventory[0].name, "dogs");
        assert_eq!(inventory[2].name, "birds");
    }

    #[test]
    fn test_scan_counts_non_image_files() {
        // The inventory counts every file, not just recognized image formats
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("mixed");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("a.jpg"), b"x").unwrap();
        fs::write(dir.join("notes.txt"), b"x").unwrap();

        let inventory = scan(root.path()).unwrap();
        assert_eq!(inventory[0].count, 2);
    }

    #[test]
    fn test_scan_ignores_stray_root_files() {
        let root = tempfile::tempdir().unwrap();
        make_class(root.path(), "cats", 1);
        fs::write(root.path().join("readme.md"), b"x").unwrap();

        let inventory = scan(root.path()).unwrap();
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let err = scan(Path::new("/no/such/dataset/root")).unwrap_err();
        assert!(matches!(err, BalanceError::Path { .. }));
    }

    #[test]
    fn test_scan_rejects_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        make_class(root.path(), "cats", 1);
        fs::create_dir(root.path().join("cats").join("deeper")).unwrap();

        let err = scan(root.path()).unwrap_err();
        match err {
            BalanceError::NestedClass { class, .. } => assert_eq!(class, "cats"),
            other => panic!("expected NestedClass, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_empty_root_returns_empty_inventory() {
        let root = tempfile::tempdir().unwrap();
        assert!(scan(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_insert_ranked_keeps_ties_stable() {
        let mut inventory = Vec::new();
        for name in ["first", "second", "third"] {
            insert_ranked(
                &mut inventory,
                ClassRecord {
                    name: name.to_string(),
                    count: 4,
                },
            );
        }
        let names: Vec<&str> = inventory.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
