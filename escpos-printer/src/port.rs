//! Spooler port classification
//!
//! Decides whether a spooler port string denotes a USB transport:
//! the standard `USBnnn` ports, vendor-custom ports (`RongtaUSB PORT:`),
//! or something else entirely (virtual sinks, LPT/COM, fax, XPS).

/// Ports that are never USB, matched as lower-case substrings
const NON_USB_PORTS: &[&str] = &[
    "portprompt:",
    "nul:",
    "shrfax:",
    "ad_port",
    "file:",
    "lpt",
    "com",
    "microsoft.",
    "onenoteim",
    "xpsport:",
    "faxport:",
    "webprint",
];

/// Check whether a spooler port name refers to a USB port
///
/// Rules are applied in order, first match wins:
/// 1. `usb` prefix followed by three digits (`USB001`)
/// 2. contains `usb` together with `port` or `printer` (vendor ports)
/// 3. any known virtual / non-USB port name
/// 4. anything else still containing `usb`
pub fn is_usb_port(port_name: &str) -> bool {
    if port_name.is_empty() {
        return false;
    }

    let p = port_name.to_ascii_lowercase();

    if p.starts_with("usb") && p.len() >= 6 && p.as_bytes()[3..6].iter().all(u8::is_ascii_digit)
    {
        return true;
    }

    let has_usb = p.contains("usb");

    if has_usb && (p.contains("port") || p.contains("printer")) {
        return true;
    }

    if NON_USB_PORTS.iter().any(|v| p.contains(v)) {
        return false;
    }

    has_usb
}
