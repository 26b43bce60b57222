//! Logging for the dataset balancer
//!
//! Bracketed event formatting, dual output (timestamped log file plus
//! stdout), `RUST_LOG` overrides the default filter.

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
