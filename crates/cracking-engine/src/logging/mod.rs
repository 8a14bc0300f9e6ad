//! Logging utilities.
//!
//! Logger initialization plus the status reporting used by setup code. Everything
//! goes through the `log` facade; `env_logger` is only touched in `init`.

mod init;
mod status;

#[cfg(test)]
pub(crate) mod capture;

pub use init::{init_logging, LoggingConfig};
pub use status::{report, report_detail, report_outcome, Status};
