use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `Logger` port backed by the process-wide `tracing` subscriber.
///
/// The subscriber installed in `main` serializes writes, so a single instance
/// can be shared by every request task.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }

    /// Logs at error level and terminates the process.
    pub fn fatal(&self, message: &str) -> ! {
        error!(target: "courses", "FATAL: {}", message);
        std::process::exit(1);
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "courses", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "courses", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "courses", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "courses", "{}", message);
    }
}
