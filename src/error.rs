use std::path::PathBuf;

/// Result type for balancing operations
pub type BalanceResult<T> = Result<T, BalanceError>;

/// Error types for dataset balancing
#[derive(Debug)]
pub enum BalanceError {
    /// Invalid configuration (bad mode value or bad root path).
    /// Raised at construction time, never mid-run.
    Config(String),
    /// The root directory has no class subdirectories
    EmptyDataset,
    /// A directory disappeared or became inaccessible mid-run
    Path { path: PathBuf, reason: String },
    /// A class directory contains a subdirectory; only one level of
    /// nesting is supported
    NestedClass { class: String, path: PathBuf },
    /// A source image could not be loaded or transformed
    ImageProcessing { path: PathBuf, reason: String },
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BalanceError::EmptyDataset => {
                write!(f, "Dataset contains no class subdirectories")
            }
            BalanceError::Path { path, reason } => {
                write!(f, "Path error at {:?}: {}", path, reason)
            }
            BalanceError::NestedClass { class, path } => write!(
                f,
                "Class '{}' contains nested directory {:?}; only one level of nesting is supported",
                class, path
            ),
            BalanceError::ImageProcessing { path, reason } => {
                write!(f, "Failed to process image {:?}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for BalanceError {}

impl BalanceError {
    /// Wrap an I/O error with the path it occurred on
    pub fn path_error(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        BalanceError::Path {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
