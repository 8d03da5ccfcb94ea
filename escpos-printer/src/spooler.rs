//! Spooler adapter abstraction
//!
//! [`Spooler`] enumerates queues and opens them; [`SpoolQueue`] is one open
//! queue handle. [`submit`] drives the raw document protocol over any queue,
//! so the protocol is the same for the Win32 backend, the non-Windows stub
//! and test doubles.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::JobOptions;
use crate::correlate::UsbBinding;
use crate::error::PrintResult;

/// One logical printer as reported by the spooler
///
/// USB fields are empty strings unless the correlator bound a device, in
/// which case all three are set and `is_usb` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterRecord {
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub port_name: String,
    pub vid: String,
    pub pid: String,
    pub device_id: String,
    pub is_usb: bool,
}

impl PrinterRecord {
    /// Create a record with no USB binding
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_default: bool,
        port_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            is_default,
            port_name: port_name.into(),
            vid: String::new(),
            pid: String::new(),
            device_id: String::new(),
            is_usb: false,
        }
    }

    /// Replace the USB fields with the given binding
    pub fn bind(&mut self, binding: UsbBinding) {
        match binding {
            UsbBinding::NonUsb => {
                self.vid.clear();
                self.pid.clear();
                self.device_id.clear();
                self.is_usb = false;
            }
            UsbBinding::Usb(device) => {
                self.vid = device.vid;
                self.pid = device.pid;
                self.device_id = device.device_id;
                self.is_usb = true;
            }
        }
    }
}

/// Trait for spooler backends
pub trait Spooler {
    type Queue: SpoolQueue;

    /// List local and connected printers, USB fields left empty
    fn enumerate(&self) -> PrintResult<Vec<PrinterRecord>>;

    /// Open a queue for submitting documents
    fn open(&self, name: &str, options: &JobOptions) -> PrintResult<Self::Queue>;
}

/// An open spooler queue
///
/// The implementor owns the queue handle and releases it on drop.
pub trait SpoolQueue {
    /// Start a document using the options captured at open
    fn start_doc(&mut self) -> bool;

    fn start_page(&mut self) -> bool;

    /// Write the whole buffer in one call, returning the bytes accepted,
    /// or `None` if the write failed
    fn write(&mut self, data: &[u8]) -> Option<usize>;

    fn end_page(&mut self) -> bool;

    fn end_doc(&mut self) -> bool;
}

/// Send one raw document through an open queue
///
/// StartDoc, StartPage, Write, EndPage, EndDoc. EndDoc runs whenever
/// StartDoc succeeded. Returns true iff every step up to the write succeeded
/// and the spooler accepted every byte.
#[instrument(skip_all, fields(data_len = data.len()))]
pub fn submit<Q: SpoolQueue + ?Sized>(queue: &mut Q, data: &[u8]) -> bool {
    if !queue.start_doc() {
        warn!("StartDocPrinter failed");
        return false;
    }

    let accepted = if queue.start_page() {
        let accepted = queue.write(data);
        if accepted.is_none() {
            warn!("WritePrinter failed");
        }
        if !queue.end_page() {
            warn!("EndPagePrinter failed");
        }
        accepted
    } else {
        warn!("StartPagePrinter failed");
        None
    };

    if !queue.end_doc() {
        warn!("EndDocPrinter failed");
    }

    match accepted {
        Some(n) if n == data.len() => {
            debug!("Raw document sent");
            true
        }
        Some(n) => {
            warn!(accepted = n, "Incomplete write");
            false
        }
        None => false,
    }
}
