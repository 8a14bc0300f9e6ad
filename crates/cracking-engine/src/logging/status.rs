use std::fmt;

/// Outcome tag for [`report`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    Success,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("SUCCESS"),
            Status::Error => f.write_str("ERROR"),
        }
    }
}

pub(crate) const TARGET: &str = "cracking::status";

/// Reports the outcome of a setup operation.
///
/// Purely informational: successes log at `info`, errors at `error`, under the
/// `cracking::status` target.
pub fn report(status: Status, operation: &str, message: impl fmt::Display) {
    let level = match status {
        Status::Success => log::Level::Info,
        Status::Error => log::Level::Error,
    };
    emit(level, status, operation, message);
}

/// Like [`report`] but at `trace` for both outcomes.
///
/// For per-vertex operations, where a miss is routine and volume is high.
pub fn report_detail(status: Status, operation: &str, message: impl fmt::Display) {
    emit(log::Level::Trace, status, operation, message);
}

/// [`report`]s a `Result`: `success` on `Ok`, the error's message on `Err`.
pub fn report_outcome<T, E: fmt::Display>(
    operation: &str,
    outcome: &Result<T, E>,
    success: impl fmt::Display,
) {
    match outcome {
        Ok(_) => report(Status::Success, operation, success),
        Err(e) => report(Status::Error, operation, e),
    }
}

fn emit(level: log::Level, status: Status, operation: &str, message: impl fmt::Display) {
    log::log!(target: TARGET, level, "[{status}] {operation} -> {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tags_match_log_prefix() {
        assert_eq!(Status::Success.to_string(), "SUCCESS");
        assert_eq!(Status::Error.to_string(), "ERROR");
    }

    #[test]
    fn detail_reports_log_at_trace() {
        crate::logging::capture::start();
        report(Status::Error, "read_file", "missing");
        report_detail(Status::Error, "find_vertex_index", "no vertex");

        assert_eq!(
            crate::logging::capture::lines(),
            vec![
                (log::Level::Error, "[ERROR] read_file -> missing".to_string()),
                (log::Level::Trace, "[ERROR] find_vertex_index -> no vertex".to_string()),
            ]
        );
    }

    #[test]
    fn reporting_never_panics() {
        report(Status::Success, "create_shader", "shader created");
        report_outcome::<(), _>("read_file", &Err("couldn't open shader file"), "ok");
        report_detail(Status::Error, "find_vertex_index", "no vertex at (0, 0, 0)");
    }
}
