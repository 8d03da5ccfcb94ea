//! Platform backends
//!
//! Windows talks to the print spooler and WMI. Every other target gets a
//! stub with the same surface: no printers, and submissions that succeed
//! without sending anything.

#[cfg(windows)]
mod win32;

#[cfg(not(windows))]
mod stub;

#[cfg(windows)]
pub use win32::{
    WinInventory as SystemInventory, WinQueue as SystemQueue, WinSpooler as SystemSpooler,
};

#[cfg(not(windows))]
pub use stub::{
    StubInventory as SystemInventory, StubQueue as SystemQueue, StubSpooler as SystemSpooler,
};
