use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Persistent balancer settings, the only configuration surface of the tool.
/// No CLI flags, no environment variables (other than `RUST_LOG`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Balancing policy: "max", "mean" or "min"
    pub mode: String,

    /// Root directory of the dataset (one subdirectory per class)
    pub root_folder_path: Option<PathBuf>,

    /// Compute and log the plan without touching the filesystem
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: "mean".to_string(),
            root_folder_path: None,
            dry_run: false,
        }
    }
}

impl Settings {
    /// Settings file lives next to the executable
    pub fn get_config_path() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe_path| exe_path.parent().map(|dir| dir.to_path_buf()))
            .map(|dir| dir.join("balance_settings.json"))
    }

    /// Load settings from disk, falling back to defaults if the file is
    /// missing or corrupted
    pub fn load() -> Self {
        if let Some(config_path) = Self::get_config_path() {
            info!("Loading settings from: {:?}", config_path);

            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                    Ok(settings) => return settings,
                    Err(e) => {
                        warn!("Failed to parse settings file: {}. Using defaults.", e);
                    }
                },
                Err(e) => {
                    // Normal on first run
                    if e.kind() != std::io::ErrorKind::NotFound {
                        warn!("Failed to read settings file: {}. Using defaults.", e);
                    } else {
                        info!("No settings file found. Using defaults.");
                    }
                }
            }
        } else {
            warn!("Could not determine settings location. Using defaults.");
        }

        Self::default()
    }

    /// Save settings to disk; failures are logged, never fatal
    pub fn save(&self) {
        if let Some(config_path) = Self::get_config_path() {
            match serde_json::to_string_pretty(self) {
                Ok(json) => {
                    if let Err(e) = fs::write(&config_path, json) {
                        warn!("Failed to write settings file: {}", e);
                    } else {
                        info!("Settings saved to: {:?}", config_path);
                    }
                }
                Err(e) => {
                    warn!("Failed to serialize settings: {}", e);
                }
            }
        } else {
            warn!("Could not determine settings location. Settings not saved.");
        }
    }
}
