//! Win32 backend: print spooler and WMI

mod spooler;
mod wmi;

pub use spooler::{WinQueue, WinSpooler};
pub use wmi::WinInventory;
