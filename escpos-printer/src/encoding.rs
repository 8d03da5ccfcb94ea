//! UTF-16 <-> UTF-8 bridge for spooler strings
//!
//! Every string the spooler and the management service hand out is UTF-16;
//! everything this crate returns is UTF-8. Decoding goes through
//! `encoding_rs` so malformed input (unpaired surrogates) degrades to
//! U+FFFD instead of failing a whole listing.

use crate::error::{PrintError, PrintResult};

/// Encode a string as NUL-terminated UTF-16
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Encode a caller-supplied string, rejecting interior NULs
///
/// The spooler would silently truncate at the first NUL, so a name like
/// `"EPSON\0TM"` would address a different queue than the caller asked for.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn to_wide_checked(s: &str, what: &str) -> PrintResult<Vec<u16>> {
    if s.contains('\0') {
        return Err(PrintError::InvalidArgument(format!(
            "{} contains a NUL character",
            what
        )));
    }
    Ok(to_wide(s))
}

/// Decode UTF-16 code units, stopping at the first NUL
pub fn from_wide(units: &[u16]) -> String {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    let bytes: Vec<u8> = units[..end].iter().flat_map(|u| u.to_le_bytes()).collect();
    let (text, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(&bytes);
    text.into_owned()
}

/// Decode a NUL-terminated UTF-16 string owned by the OS
///
/// A null pointer (e.g. a printer without a comment) decodes to `""`.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated UTF-16 buffer that stays
/// valid for the duration of the call.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) unsafe fn from_wide_ptr(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe {
        let mut len = 0;
        while *ptr.add(len) != 0 {
            len += 1;
        }
        from_wide(std::slice::from_raw_parts(ptr, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wide_is_nul_terminated() {
        let wide = to_wide("RAW");
        assert_eq!(wide, vec![b'R' as u16, b'A' as u16, b'W' as u16, 0]);
    }

    #[test]
    fn test_from_wide_non_ascii() {
        let wide = to_wide("收银打印机 №1");
        assert_eq!(from_wide(&wide), "收银打印机 №1");
    }

    #[test]
    fn test_from_wide_stops_at_nul() {
        let units = [b'U' as u16, b'S' as u16, b'B' as u16, 0, b'X' as u16];
        assert_eq!(from_wide(&units), "USB");
    }

    #[test]
    fn test_from_wide_unpaired_surrogate() {
        let units = [b'A' as u16, 0xD800, b'B' as u16];
        assert_eq!(from_wide(&units), "A\u{FFFD}B");
    }

    #[test]
    fn test_from_wide_ptr_null_is_empty() {
        let text = unsafe { from_wide_ptr(std::ptr::null()) };
        assert_eq!(text, "");
    }

    #[test]
    fn test_from_wide_ptr() {
        let wide = to_wide("Kitchen");
        let text = unsafe { from_wide_ptr(wide.as_ptr()) };
        assert_eq!(text, "Kitchen");
    }

    #[test]
    fn test_to_wide_checked_rejects_nul() {
        assert!(to_wide_checked("EPSON\0TM", "Printer name").is_err());
        assert!(to_wide_checked("EPSON TM", "Printer name").is_ok());
    }
}
