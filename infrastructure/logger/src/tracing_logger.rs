use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "ticketscan", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "ticketscan", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "ticketscan", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "ticketscan", "{}", message);
    }
}
