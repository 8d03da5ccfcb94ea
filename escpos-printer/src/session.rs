//! Print sessions
//!
//! A [`PrintSession`] owns one open spooler queue from `open` until `close`
//! (or drop). Submitting after close is a no-op that reports failure.

use tracing::{info, instrument, warn};

use crate::config::JobOptions;
use crate::error::{PrintError, PrintResult};
use crate::platform::{SystemQueue, SystemSpooler};
use crate::spooler::{SpoolQueue, Spooler, submit};

/// An open connection to one printer queue
pub struct PrintSession<Q: SpoolQueue = SystemQueue> {
    name: String,
    queue: Option<Q>,
}

impl PrintSession<SystemQueue> {
    /// Open a printer by name on this host with default job options
    pub fn open(name: &str) -> PrintResult<Self> {
        Self::open_with(&SystemSpooler, name, &JobOptions::default())
    }
}

impl<Q: SpoolQueue> PrintSession<Q> {
    /// Open a printer through a specific spooler backend
    #[instrument(skip_all, fields(printer = name))]
    pub fn open_with<S>(spooler: &S, name: &str, options: &JobOptions) -> PrintResult<Self>
    where
        S: Spooler<Queue = Q>,
    {
        if name.is_empty() {
            return Err(PrintError::InvalidArgument(
                "Printer name expected".to_string(),
            ));
        }

        let queue = spooler.open(name, options)?;
        info!("Printer opened");
        Ok(Self::from_queue(name, queue))
    }

    /// Wrap an already open queue
    pub fn from_queue(name: &str, queue: Q) -> Self {
        Self {
            name: name.to_string(),
            queue: Some(queue),
        }
    }

    /// Get the printer name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.queue.is_some()
    }

    /// Send raw bytes as one document
    ///
    /// Returns true only if the whole buffer was accepted by the spooler.
    #[instrument(skip(self, data), fields(printer = %self.name, data_len = data.len()))]
    pub fn print(&mut self, data: &[u8]) -> bool {
        match self.queue.as_mut() {
            Some(queue) => submit(queue, data),
            None => {
                warn!("Print on closed session");
                false
            }
        }
    }

    /// Release the queue handle. Safe to call more than once.
    pub fn close(&mut self) {
        if self.queue.take().is_some() {
            info!(printer = %self.name, "Printer closed");
        }
    }
}

impl<Q: SpoolQueue> Drop for PrintSession<Q> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<Q: SpoolQueue> std::fmt::Debug for PrintSession<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintSession")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}
