use std::process::ExitCode;
use tracing::{error, info, warn};

mod config;
mod core;
mod error;
mod logging;
mod settings;

use config::BalanceConfig;
use crate::core::{BalanceReport, Balancer, ClassAction};
use settings::Settings;

fn main() -> ExitCode {
    logging::setup_logging();
    info!("Starting dataset balancer");

    let settings = Settings::load();

    let root = match &settings.root_folder_path {
        Some(path) => path.clone(),
        None => {
            error!("No root_folder_path configured; edit the settings file and re-run");
            if let Some(path) = Settings::get_config_path() {
                error!("Settings file location: {:?}", path);
            }
            return ExitCode::FAILURE;
        }
    };

    let config = match BalanceConfig::new(&settings.mode, root) {
        Ok(config) => config.with_dry_run(settings.dry_run),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = match Balancer::new(config).balance() {
        Ok(report) => report,
        Err(e) => {
            error!("Balancing aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log_report(&report);
    settings.save();

    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn log_report(report: &BalanceReport) {
    info!("Target count: {} images per class", report.target);

    for outcome in &report.outcomes {
        match &outcome.action {
            ClassAction::Unchanged => {
                info!("  {}: already balanced", outcome.name);
            }
            ClassAction::Created(created) => {
                info!(
                    "  {}: deficit {}, created {} derived images",
                    outcome.name,
                    outcome.delta.unsigned_abs(),
                    created
                );
            }
            ClassAction::Deleted { deleted, warnings } => {
                info!(
                    "  {}: surplus {}, deleted {} images",
                    outcome.name, outcome.delta, deleted
                );
                for warning in warnings {
                    warn!("  {}: {}", outcome.name, warning);
                }
            }
            ClassAction::Planned => {
                info!("  {}: delta {}, dry-run only", outcome.name, outcome.delta);
            }
            ClassAction::Failed(reason) => {
                error!("  {}: failed: {}", outcome.name, reason);
            }
        }
    }
}
