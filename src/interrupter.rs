use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use crate::cust_errors::InterruptError;

/// Cancellation token polled by the solver core. Combines a wall-clock
/// deadline (measured from construction) with a SIGTERM flag written by the
/// signal handler registered in the binary.
#[derive(Debug, Default, Clone)]
pub struct Interrupter {
    start_time: Option<Instant>,
    time_limit: Option<u128>,
    sigterm: Option<Arc<AtomicBool>>,
}

impl Interrupter {

    /// Creates a new Interrupter.
    /// If `time_limit` is given, `self.check_interrupt()` becomes true after the `time_limit` (in
    /// ms) has passed. If `sigterm` is given, `self.check_interrupt()` becomes true as soon as the
    /// flag is set.
    /// Given neither, no interrupt ever fires.
    pub fn new(time_limit: Option<u128>, sigterm: Option<Arc<AtomicBool>>) -> Self {
        Interrupter {
            start_time: Some(Instant::now()),
            time_limit,
            sigterm,
        }
    }

    /// Returns the milliseconds elapsed since this interrupter was created, or 0 for a default
    /// interrupter.
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.map(|start| start.elapsed().as_millis()).unwrap_or(0)
    }

    /// Checks if a sigterm was received, or the allowed time has expired.
    ///
    /// On default this should always return false.
    pub fn check_interrupt(&self) -> bool {
        if let Some(flag) = &self.sigterm {
            if flag.load(Ordering::Relaxed) {
                return true
            }
        }
        if let Some(dur) = self.time_limit {
            return self.elapsed_ms() >= dur
        }
        false
    }

    /// Sends an `InterruptError` if any interrupt was set.
    pub fn send_interrupt(&self) -> Result<(), InterruptError> {
        if let Some(flag) = &self.sigterm {
            if flag.load(Ordering::Relaxed) {
                return Err(InterruptError::SigTerm);
            }
        }
        if let Some(dur) = self.time_limit {
            if self.elapsed_ms() >= dur {
                return Err(InterruptError::TimeOut);
            }
        }
        Ok(())
    }

}
