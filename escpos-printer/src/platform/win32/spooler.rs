//! Print spooler backend (winspool)

use core::ffi::c_void;

use tracing::{debug, instrument, warn};
use windows::Win32::Graphics::Printing::{
    ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, EnumPrintersW, OpenPrinterW,
    PRINTER_ACCESS_USE, PRINTER_ATTRIBUTE_DEFAULT, PRINTER_DEFAULTSW, PRINTER_ENUM_CONNECTIONS,
    PRINTER_ENUM_LOCAL, PRINTER_HANDLE, PRINTER_INFO_2W, StartDocPrinterW, StartPagePrinter,
    WritePrinter,
};
use windows::core::{PCWSTR, PWSTR};

use crate::config::JobOptions;
use crate::encoding::{from_wide_ptr, to_wide_checked};
use crate::error::{PrintError, PrintResult};
use crate::spooler::{PrinterRecord, SpoolQueue, Spooler};

/// The local print spooler
#[derive(Debug, Clone, Copy, Default)]
pub struct WinSpooler;

impl Spooler for WinSpooler {
    type Queue = WinQueue;

    /// List local and connected printers (`PRINTER_INFO_2W`)
    #[instrument(skip(self))]
    fn enumerate(&self) -> PrintResult<Vec<PrinterRecord>> {
        let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
        let mut needed: u32 = 0;
        let mut returned: u32 = 0;

        unsafe {
            let _ = EnumPrintersW(flags, None, 2, None, &mut needed, &mut returned);

            if needed == 0 {
                return Ok(Vec::new());
            }

            // PRINTER_INFO_2W is full of pointers; keep the buffer pointer-aligned
            let mut buf: Vec<u64> = vec![0; (needed as usize).div_ceil(8)];
            let bytes =
                std::slice::from_raw_parts_mut(buf.as_mut_ptr() as *mut u8, needed as usize);

            EnumPrintersW(flags, None, 2, Some(bytes), &mut needed, &mut returned)
                .map_err(|e| PrintError::EnumerationFailed(e.to_string()))?;

            let ptr = buf.as_ptr() as *const PRINTER_INFO_2W;
            let infos = std::slice::from_raw_parts(ptr, returned as usize);

            let printers: Vec<PrinterRecord> = infos
                .iter()
                .map(|info| {
                    PrinterRecord::new(
                        from_wide_ptr(info.pPrinterName.0),
                        from_wide_ptr(info.pComment.0),
                        info.Attributes & PRINTER_ATTRIBUTE_DEFAULT != 0,
                        from_wide_ptr(info.pPortName.0),
                    )
                })
                .collect();

            debug!(count = printers.len(), "Spooler printers enumerated");
            Ok(printers)
        }
    }

    #[instrument(skip(self, options))]
    fn open(&self, name: &str, options: &JobOptions) -> PrintResult<WinQueue> {
        let name_w = to_wide_checked(name, "Printer name")?;
        let doc_name = to_wide_checked(options.document_name(), "Document name")?;
        let datatype = to_wide_checked(options.datatype(), "Datatype")?;

        let defaults = PRINTER_DEFAULTSW {
            DesiredAccess: PRINTER_ACCESS_USE,
            ..Default::default()
        };

        let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
        unsafe {
            OpenPrinterW(
                PCWSTR::from_raw(name_w.as_ptr()),
                &mut handle,
                Some(&defaults as *const PRINTER_DEFAULTSW),
            )
        }
        .map_err(|e| PrintError::open_failed(name, e))?;

        Ok(WinQueue {
            handle,
            doc_name,
            datatype,
        })
    }
}

/// An open spooler queue handle, closed on drop
pub struct WinQueue {
    handle: PRINTER_HANDLE,
    doc_name: Vec<u16>,
    datatype: Vec<u16>,
}

// Spooler handles are not bound to the thread that opened them.
unsafe impl Send for WinQueue {}

impl SpoolQueue for WinQueue {
    fn start_doc(&mut self) -> bool {
        let doc_info = DOC_INFO_1W {
            pDocName: PWSTR(self.doc_name.as_ptr() as *mut _),
            pOutputFile: PWSTR::null(),
            pDatatype: PWSTR(self.datatype.as_ptr() as *mut _),
        };
        unsafe { StartDocPrinterW(self.handle, 1, &doc_info as *const DOC_INFO_1W) != 0 }
    }

    fn start_page(&mut self) -> bool {
        unsafe { StartPagePrinter(self.handle).as_bool() }
    }

    fn write(&mut self, data: &[u8]) -> Option<usize> {
        let Ok(len) = u32::try_from(data.len()) else {
            warn!(data_len = data.len(), "Buffer too large for a single WritePrinter call");
            return None;
        };

        let mut written: u32 = 0;
        let ok = unsafe {
            WritePrinter(
                self.handle,
                data.as_ptr() as *const c_void,
                len,
                &mut written,
            )
        };
        ok.as_bool().then_some(written as usize)
    }

    fn end_page(&mut self) -> bool {
        unsafe { EndPagePrinter(self.handle).as_bool() }
    }

    fn end_doc(&mut self) -> bool {
        unsafe { EndDocPrinter(self.handle).as_bool() }
    }
}

impl Drop for WinQueue {
    fn drop(&mut self) {
        unsafe {
            let _ = ClosePrinter(self.handle);
        }
    }
}
