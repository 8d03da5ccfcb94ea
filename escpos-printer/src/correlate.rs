//! Spooler ↔ USB correlation
//!
//! Binds each spooler printer with a USB-looking port to a device from the
//! USB inventory. The decision depends on how many devices are present:
//!
//! - none: the printer stays non-USB
//! - one: that device is the only candidate and is bound
//! - several: name matching, then the first device in name order

use tracing::{debug, warn};

use crate::port::is_usb_port;
use crate::spooler::PrinterRecord;
use crate::usb::{UsbDevice, UsbInventory};

/// Words too common in printer names to identify a model
const GENERIC_WORDS: &[&str] = &["printer", "print", "thermal", "receipt", "usb", "pos"];

/// USB identity of a printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsbBinding {
    NonUsb,
    Usb(UsbDevice),
}

/// Fill in the USB fields of every record, keeping spooler order
pub fn correlate(mut records: Vec<PrinterRecord>, inventory: &UsbInventory) -> Vec<PrinterRecord> {
    for record in &mut records {
        let binding = bind_printer(&record.name, &record.port_name, inventory);
        record.bind(binding);
    }
    records
}

/// Decide the USB binding of one printer
pub fn bind_printer(name: &str, port_name: &str, inventory: &UsbInventory) -> UsbBinding {
    if !is_usb_port(port_name) {
        return UsbBinding::NonUsb;
    }

    let device = match inventory.len() {
        0 => {
            debug!(printer = name, port = port_name, "USB port but no USB devices present");
            None
        }
        1 => inventory.first(),
        devices => match_by_name(name, inventory).or_else(|| {
            let fallback = inventory.first();
            if let Some(device) = fallback {
                warn!(
                    printer = name,
                    device = %device.descriptive_name,
                    devices,
                    "No USB device name matches printer, assigning first device"
                );
            }
            fallback
        }),
    };

    match device {
        Some(device) => UsbBinding::Usb(device.clone()),
        None => UsbBinding::NonUsb,
    }
}

/// Find the device whose name matches the printer name
///
/// Strategies are tried from strictest to loosest; within a strategy the
/// first device in name order wins.
pub fn match_by_name<'a>(printer_name: &str, inventory: &'a UsbInventory) -> Option<&'a UsbDevice> {
    let strategies: [fn(&str, &str) -> bool; 3] =
        [contains_either, stripped_contains_either, shares_model_token];

    strategies.iter().find_map(|matches| {
        inventory
            .iter()
            .find(|device| matches(printer_name, &device.descriptive_name))
    })
}

/// Case-insensitive substring match in either direction
fn contains_either(a: &str, b: &str) -> bool {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

/// Shortest stripped name allowed to take part in a substring match
const MIN_STRIPPED_LEN: usize = 3;

/// Substring match after dropping generic words and punctuation
fn stripped_contains_either(a: &str, b: &str) -> bool {
    let (a, b) = (strip_name(a), strip_name(b));
    let long_enough = |s: &str| s.chars().count() >= MIN_STRIPPED_LEN;
    long_enough(&a) && long_enough(&b) && (a.contains(&b) || b.contains(&a))
}

/// Lower-case alphanumeric words minus generic ones, joined (`XP-58 Printer` → `xp58`)
fn strip_name(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !GENERIC_WORDS.contains(t))
        .collect()
}

/// Both names contain the same model-like token (`rongta`, `tm-t88` → `t88`)
fn shares_model_token(a: &str, b: &str) -> bool {
    let theirs = model_tokens(b);
    model_tokens(a).iter().any(|t| theirs.contains(t))
}

fn model_tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 3 && !GENERIC_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}
