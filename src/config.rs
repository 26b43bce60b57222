use crate::error::{BalanceError, BalanceResult};
use std::path::PathBuf;
use std::str::FromStr;

/// Balancing policy: which statistic of the per-class counts becomes the
/// common target count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Normalize every class up to the largest class size
    Max,
    /// Normalize to the integer-truncated mean class size
    Mean,
    /// Normalize every class down to the smallest class size
    Min,
}

impl Policy {
    pub fn as_str(&self) -> &str {
        match self {
            Policy::Max => "max",
            Policy::Mean => "mean",
            Policy::Min => "min",
        }
    }
}

impl FromStr for Policy {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(Policy::Max),
            "mean" => Ok(Policy::Mean),
            "min" => Ok(Policy::Min),
            other => Err(BalanceError::Config(format!(
                "mode must be one of 'max', 'mean' or 'min', got '{}'",
                other
            ))),
        }
    }
}

/// Validated balancing configuration. Constructed once, immutable afterwards;
/// a `BalanceConfig` that exists has already passed validation.
#[derive(Debug, Clone)]
pub struct BalanceConfig {
    mode: Policy,
    root_folder_path: PathBuf,
    dry_run: bool,
}

impl BalanceConfig {
    /// Validate and build a configuration. The mode string must be one of
    /// the three recognized policies and the root path must be an existing
    /// directory. Fails before any dataset access happens.
    pub fn new(mode: &str, root_folder_path: impl Into<PathBuf>) -> BalanceResult<Self> {
        let mode = Policy::from_str(mode)?;
        let root_folder_path = root_folder_path.into();

        if !root_folder_path.exists() {
            return Err(BalanceError::Config(format!(
                "root folder {:?} does not exist",
                root_folder_path
            )));
        }
        if !root_folder_path.is_dir() {
            return Err(BalanceError::Config(format!(
                "root folder {:?} is not a directory",
                root_folder_path
            )));
        }

        Ok(Self {
            mode,
            root_folder_path,
            dry_run: false,
        })
    }

    /// Plan only, touch nothing on disk
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn mode(&self) -> Policy {
        self.mode
    }

    pub fn root_folder_path(&self) -> &PathBuf {
        &self.root_folder_path
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("max".parse::<Policy>().unwrap(), Policy::Max);
        assert_eq!("mean".parse::<Policy>().unwrap(), Policy::Mean);
        assert_eq!("min".parse::<Policy>().unwrap(), Policy::Min);
    }

    #[test]
    fn test_policy_rejects_unknown_mode() {
        // "median" is not a supported policy; must fail before any
        // filesystem access
        let err = "median".parse::<Policy>().unwrap_err();
        assert!(matches!(err, BalanceError::Config(_)));
        assert!(err.to_string().contains("median"));
    }

    #[test]
    fn test_policy_is_case_sensitive() {
        assert!("MAX".parse::<Policy>().is_err());
        assert!("Mean".parse::<Policy>().is_err());
    }

    #[test]
    fn test_config_rejects_missing_root() {
        let err = BalanceConfig::new("mean", "/definitely/not/a/real/path").unwrap_err();
        assert!(matches!(err, BalanceError::Config(_)));
    }

    #[test]
    fn test_config_rejects_bad_mode_before_path_check() {
        // Mode validation runs first, so even a nonexistent path reports
        // the mode problem
        let err = BalanceConfig::new("median", "/definitely/not/a/real/path").unwrap_err();
        assert!(err.to_string().contains("median"));
    }

    #[test]
    fn test_config_accepts_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = BalanceConfig::new("min", dir.path()).unwrap();
        assert_eq!(config.mode(), Policy::Min);
        assert_eq!(config.root_folder_path(), &dir.path().to_path_buf());
        assert!(!config.dry_run());
    }

    #[test]
    fn test_config_rejects_file_as_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(BalanceConfig::new("max", &file).is_err());
    }
}
