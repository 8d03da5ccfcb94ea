//! Printer listing
//!
//! Joins the spooler's printer list with the USB inventory.

use tracing::{info, instrument};

use crate::correlate::correlate;
use crate::error::{PrintError, PrintResult};
use crate::platform::{SystemInventory, SystemSpooler};
use crate::spooler::{PrinterRecord, Spooler};
use crate::usb::DeviceInventory;

/// List the printers installed on this host with their USB identity
pub fn list_printers() -> PrintResult<Vec<PrinterRecord>> {
    list_printers_with(&SystemSpooler, &SystemInventory)
}

/// List printers from the given spooler, correlated with the given inventory
///
/// The USB inventory is taken first; an unavailable inventory only means
/// no printer gets a USB binding.
#[instrument(skip_all)]
pub fn list_printers_with<S, I>(spooler: &S, inventory: &I) -> PrintResult<Vec<PrinterRecord>>
where
    S: Spooler + ?Sized,
    I: DeviceInventory + ?Sized,
{
    let devices = inventory.usb_printers();
    let records = spooler.enumerate()?;
    let records = correlate(records, &devices);

    info!(
        printers = records.len(),
        usb_devices = devices.len(),
        usb_printers = records.iter().filter(|r| r.is_usb).count(),
        "Printers listed"
    );
    Ok(records)
}

/// The printer the spooler marks as default, if any
pub fn default_printer(printers: &[PrinterRecord]) -> Option<&PrinterRecord> {
    printers.iter().find(|p| p.is_default)
}

/// Resolve a printer name - returns the name if listed, or default/first available
pub fn resolve_printer(printers: &[PrinterRecord], name: Option<&str>) -> PrintResult<String> {
    if let Some(name) = name {
        if printers.iter().any(|p| p.name == name) {
            return Ok(name.to_string());
        }
        return Err(PrintError::InvalidArgument(format!(
            "Printer not found: {}",
            name
        )));
    }

    default_printer(printers)
        .or_else(|| printers.first())
        .map(|p| p.name.clone())
        .ok_or_else(|| PrintError::InvalidArgument("No printers available".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printers() -> Vec<PrinterRecord> {
        vec![
            PrinterRecord::new("Microsoft Print to PDF", "", false, "PORTPROMPT:"),
            PrinterRecord::new("POS-80", "Front counter", true, "USB001"),
        ]
    }

    #[test]
    fn test_default_printer() {
        let list = printers();
        assert_eq!(default_printer(&list).unwrap().name, "POS-80");
        assert!(default_printer(&list[..1]).is_none());
    }

    #[test]
    fn test_resolve_explicit() {
        let list = printers();
        assert_eq!(
            resolve_printer(&list, Some("Microsoft Print to PDF")).unwrap(),
            "Microsoft Print to PDF"
        );
        assert!(resolve_printer(&list, Some("Kitchen")).is_err());
    }

    #[test]
    fn test_resolve_default_then_first() {
        let list = printers();
        assert_eq!(resolve_printer(&list, None).unwrap(), "POS-80");
        assert_eq!(
            resolve_printer(&list[..1], None).unwrap(),
            "Microsoft Print to PDF"
        );
        assert!(resolve_printer(&[], None).is_err());
    }
}
