//! USB printer inventory model
//!
//! The platform query (WMI on Windows) only produces raw rows; everything
//! that decides whether a row becomes a [`UsbDevice`] lives here so it can
//! be tested without the OS.

use std::collections::BTreeMap;

/// WQL query for present USB devices that look like printers
///
/// `ConfigManagerErrorCode = 0 AND Status = 'OK'` keeps stale or
/// disconnected devices out of the inventory. `Present` is not selected
/// explicitly because older hosts do not expose it.
pub const USB_PRINTER_QUERY: &str = "SELECT * FROM Win32_PnPEntity \
     WHERE DeviceID LIKE 'USB%VID_%' \
     AND (Name LIKE '%printer%' OR Name LIKE '%print%' OR Service = 'usbprint') \
     AND ConfigManagerErrorCode = 0 AND Status = 'OK'";

/// A present USB device with a parsed hardware identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbDevice {
    /// Human-readable name (`Name` column), the inventory key
    pub descriptive_name: String,
    /// Vendor id, 4 hex digits, case preserved
    pub vid: String,
    /// Product id, 4 hex digits, case preserved
    pub pid: String,
    /// Full device-instance id, e.g. `USB\VID_04B8&PID_0005\6&1234ABCD&0&1`
    pub device_id: String,
}

/// Value of the `Present` column of a PnP row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Yes,
    No,
    /// Column missing or empty; treated as present
    Absent,
}

impl Presence {
    pub fn is_present(self) -> bool {
        !matches!(self, Presence::No)
    }
}

/// USB devices keyed by descriptive name
///
/// Iteration is lexicographic by name, which is the order the correlator
/// uses for tie-breaks. Inserting a duplicate name replaces the earlier
/// device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsbInventory {
    devices: BTreeMap<String, UsbDevice>,
}

impl UsbInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a device, replacing any device with the same name
    pub fn insert(&mut self, device: UsbDevice) -> Option<UsbDevice> {
        self.devices.insert(device.descriptive_name.clone(), device)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&UsbDevice> {
        self.devices.get(name)
    }

    /// First device in name order
    pub fn first(&self) -> Option<&UsbDevice> {
        self.devices.values().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UsbDevice> {
        self.devices.values()
    }
}

impl FromIterator<UsbDevice> for UsbInventory {
    fn from_iter<T: IntoIterator<Item = UsbDevice>>(iter: T) -> Self {
        let mut inventory = Self::new();
        for device in iter {
            inventory.insert(device);
        }
        inventory
    }
}

/// Source of the USB printer inventory
///
/// Implementations never fail: any error downgrades to an empty inventory.
pub trait DeviceInventory {
    fn usb_printers(&self) -> UsbInventory;
}

/// Extract VID and PID from a device-instance id
///
/// Looks for `VID_`/`PID_` first and falls back to `vid_`/`pid_`, then reads
/// the four characters after the underscore. A missing anchor, a truncated
/// id or non-hex digits yield an empty string for that field.
pub fn parse_vid_pid(device_id: &str) -> (String, String) {
    (
        hex_after(device_id, "VID_", "vid_"),
        hex_after(device_id, "PID_", "pid_"),
    )
}

fn hex_after(s: &str, upper: &str, lower: &str) -> String {
    let Some(pos) = s.find(upper).or_else(|| s.find(lower)) else {
        return String::new();
    };
    let start = pos + upper.len();
    match s.get(start..start + 4) {
        Some(id) if id.chars().all(|c| c.is_ascii_hexdigit()) => id.to_string(),
        _ => String::new(),
    }
}

/// Decide whether a PnP row becomes an inventory entry
///
/// Name and device id must be non-empty, the device must be present
/// (or not report presence at all) and both VID and PID must parse.
pub fn admit_row(name: &str, device_id: &str, presence: Presence) -> Option<UsbDevice> {
    if name.is_empty() || device_id.is_empty() || !presence.is_present() {
        return None;
    }

    let (vid, pid) = parse_vid_pid(device_id);
    if vid.is_empty() || pid.is_empty() {
        return None;
    }

    Some(UsbDevice {
        descriptive_name: name.to_string(),
        vid,
        pid,
        device_id: device_id.to_string(),
    })
}
