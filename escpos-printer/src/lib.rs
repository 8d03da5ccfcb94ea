//! # escpos-printer
//!
//! Raw printing to receipt / label printers through the Windows print spooler.
//!
//! ## Scope
//!
//! This crate handles WHERE bytes go and HOW they get there:
//! - Listing installed printers with their USB identity (VID / PID /
//!   device-instance id) where one can be established
//! - Sending a raw byte stream (usually ESC/POS) to a printer queue
//!
//! Composing the byte stream is the caller's job. On targets other than
//! Windows the same API is backed by a stub: no printers are listed and
//! every submission succeeds without sending anything.
//!
//! ## Example
//!
//! ```ignore
//! use escpos_printer::{PrintSession, list_printers, resolve_printer};
//!
//! let printers = list_printers()?;
//! for p in &printers {
//!     println!("{} on {} usb={} {}:{}", p.name, p.port_name, p.is_usb, p.vid, p.pid);
//! }
//!
//! let name = resolve_printer(&printers, None)?;
//! let mut session = PrintSession::open(&name)?;
//! let ok = session.print(b"\x1b@Hello\n\x1dV\x41\x03");
//! session.close();
//! ```

mod config;
mod correlate;
mod encoding;
mod error;
mod listing;
pub mod platform;
mod port;
mod session;
mod spooler;
mod usb;

// Re-exports
pub use config::{DEFAULT_DOCUMENT_NAME, JobOptions, RAW_DATATYPE};
pub use correlate::{UsbBinding, bind_printer, correlate, match_by_name};
pub use encoding::{from_wide, to_wide};
pub use error::{PrintError, PrintResult};
pub use listing::{default_printer, list_printers, list_printers_with, resolve_printer};
pub use platform::{SystemInventory, SystemQueue, SystemSpooler};
pub use port::is_usb_port;
pub use session::PrintSession;
pub use spooler::{PrinterRecord, SpoolQueue, Spooler, submit};
pub use usb::{
    DeviceInventory, Presence, USB_PRINTER_QUERY, UsbDevice, UsbInventory, admit_row,
    parse_vid_pid,
};
