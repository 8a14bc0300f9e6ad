//! Test logger recording status lines per thread.

use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use super::status::TARGET;

struct Capture;

static RECORDS: Mutex<Vec<(ThreadId, log::Level, String)>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

impl log::Log for Capture {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target() == TARGET
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut records) = RECORDS.lock() {
            records.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// Installs the capture logger once and forgets this thread's earlier lines.
pub(crate) fn start() {
    INSTALL.call_once(|| {
        if log::set_logger(&Capture).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    let me = thread::current().id();
    RECORDS.lock().unwrap().retain(|(id, ..)| *id != me);
}

/// Status lines logged on this thread since [`start`].
pub(crate) fn lines() -> Vec<(log::Level, String)> {
    let me = thread::current().id();
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, ..)| *id == me)
        .map(|(_, level, line)| (*level, line.clone()))
        .collect()
}
