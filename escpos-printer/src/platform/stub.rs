//! Stub backend for hosts without a Windows spooler

use tracing::debug;

use crate::config::JobOptions;
use crate::error::PrintResult;
use crate::spooler::{PrinterRecord, SpoolQueue, Spooler};
use crate::usb::{DeviceInventory, UsbInventory};

/// Spooler with no printers whose queues accept everything
#[derive(Debug, Clone, Copy, Default)]
pub struct StubSpooler;

impl Spooler for StubSpooler {
    type Queue = StubQueue;

    fn enumerate(&self) -> PrintResult<Vec<PrinterRecord>> {
        Ok(Vec::new())
    }

    fn open(&self, name: &str, _options: &JobOptions) -> PrintResult<StubQueue> {
        debug!(printer = name, "No print spooler on this platform, opening stub queue");
        Ok(StubQueue)
    }
}

/// Queue that discards data and reports every step as successful
#[derive(Debug, Default)]
pub struct StubQueue;

impl SpoolQueue for StubQueue {
    fn start_doc(&mut self) -> bool {
        true
    }

    fn start_page(&mut self) -> bool {
        true
    }

    fn write(&mut self, data: &[u8]) -> Option<usize> {
        Some(data.len())
    }

    fn end_page(&mut self) -> bool {
        true
    }

    fn end_doc(&mut self) -> bool {
        true
    }
}

/// Inventory that never finds USB devices
#[derive(Debug, Clone, Copy, Default)]
pub struct StubInventory;

impl DeviceInventory for StubInventory {
    fn usb_printers(&self) -> UsbInventory {
        UsbInventory::new()
    }
}
