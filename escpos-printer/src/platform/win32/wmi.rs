//! USB printer inventory via WMI (`Win32_PnPEntity`)

use tracing::{debug, instrument, warn};
use windows::Win32::Foundation::RPC_E_TOO_LATE;
use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_MULTITHREADED, CoCreateInstance, CoInitializeEx,
    CoInitializeSecurity, CoSetProxyBlanket, CoUninitialize, EOAC_NONE, RPC_C_AUTHN_LEVEL_CALL,
    RPC_C_AUTHN_LEVEL_NONE, RPC_C_IMP_LEVEL_IMPERSONATE,
};
use windows::Win32::System::Rpc::{RPC_C_AUTHN_WINNT, RPC_C_AUTHZ_NONE};
use windows::Win32::System::Variant::VARIANT;
use windows::Win32::System::Wmi::{
    IWbemClassObject, IWbemLocator, IWbemServices, WBEM_FLAG_FORWARD_ONLY,
    WBEM_FLAG_RETURN_IMMEDIATELY, WBEM_INFINITE, WbemLocator,
};
use windows::core::{BSTR, PCWSTR, w};

use crate::encoding::from_wide;
use crate::error::{PrintError, PrintResult};
use crate::usb::{DeviceInventory, Presence, USB_PRINTER_QUERY, UsbInventory, admit_row};

/// USB printer inventory from the WMI PnP entity table
#[derive(Debug, Clone, Copy, Default)]
pub struct WinInventory;

impl DeviceInventory for WinInventory {
    fn usb_printers(&self) -> UsbInventory {
        match query_usb_printers() {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!(error = %e, "Continuing without USB device data");
                UsbInventory::new()
            }
        }
    }
}

/// COM runtime for the current thread, uninitialised on drop
struct ComRuntime;

impl ComRuntime {
    fn init() -> PrintResult<Self> {
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }
            .ok()
            .map_err(com_err("CoInitializeEx"))?;
        Ok(Self)
    }
}

impl Drop for ComRuntime {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

fn com_err(step: &'static str) -> impl FnOnce(windows::core::Error) -> PrintError {
    move |e| PrintError::Inventory(format!("{} failed: {}", step, e))
}

#[instrument]
fn query_usb_printers() -> PrintResult<UsbInventory> {
    // Declared first so every interface below is released before CoUninitialize
    let _com = ComRuntime::init()?;

    let security = unsafe {
        CoInitializeSecurity(
            None,
            -1,
            None,
            None,
            RPC_C_AUTHN_LEVEL_NONE,
            RPC_C_IMP_LEVEL_IMPERSONATE,
            None,
            EOAC_NONE,
            None,
        )
    };
    // The host may already have installed a security policy
    if let Err(e) = security
        && e.code() != RPC_E_TOO_LATE
    {
        return Err(com_err("CoInitializeSecurity")(e));
    }

    let services = connect()?;

    let rows = unsafe {
        services.ExecQuery(
            &BSTR::from("WQL"),
            &BSTR::from(USB_PRINTER_QUERY),
            WBEM_FLAG_FORWARD_ONLY | WBEM_FLAG_RETURN_IMMEDIATELY,
            None,
        )
    }
    .map_err(com_err("ExecQuery"))?;

    let mut inventory = UsbInventory::new();
    loop {
        let mut row: [Option<IWbemClassObject>; 1] = [None];
        let mut returned: u32 = 0;
        let hr = unsafe { rows.Next(WBEM_INFINITE, &mut row, &mut returned) };

        let Some(object) = row[0].take() else {
            hr.ok().map_err(com_err("IEnumWbemClassObject::Next"))?;
            break;
        };

        let name = string_property(&object, w!("Name"));
        let device_id = string_property(&object, w!("DeviceID"));
        let presence = presence_property(&object);

        match admit_row(&name, &device_id, presence) {
            Some(device) => {
                debug!(
                    name = %device.descriptive_name,
                    vid = %device.vid,
                    pid = %device.pid,
                    "USB printer found"
                );
                inventory.insert(device);
            }
            None => debug!(name = %name, device_id = %device_id, "Skipping PnP row"),
        }
    }

    debug!(devices = inventory.len(), "USB inventory complete");
    Ok(inventory)
}

fn connect() -> PrintResult<IWbemServices> {
    let locator: IWbemLocator =
        unsafe { CoCreateInstance(&WbemLocator, None, CLSCTX_INPROC_SERVER) }
            .map_err(com_err("CoCreateInstance(WbemLocator)"))?;

    let services = unsafe {
        locator.ConnectServer(
            &BSTR::from("ROOT\\CIMV2"),
            &BSTR::new(),
            &BSTR::new(),
            &BSTR::new(),
            0,
            &BSTR::new(),
            None,
        )
    }
    .map_err(com_err("ConnectServer"))?;

    unsafe {
        CoSetProxyBlanket(
            &services,
            RPC_C_AUTHN_WINNT,
            RPC_C_AUTHZ_NONE,
            PCWSTR::null(),
            RPC_C_AUTHN_LEVEL_CALL,
            RPC_C_IMP_LEVEL_IMPERSONATE,
            None,
            EOAC_NONE,
        )
    }
    .map_err(com_err("CoSetProxyBlanket"))?;

    Ok(services)
}

/// Read a string column; missing, null or non-string values read as `""`
fn string_property(object: &IWbemClassObject, name: PCWSTR) -> String {
    let mut value = VARIANT::default();
    if unsafe { object.Get(name, 0, &mut value, None, None) }.is_err() {
        return String::new();
    }
    BSTR::try_from(&value)
        .map(|s| from_wide(&s))
        .unwrap_or_default()
}

fn presence_property(object: &IWbemClassObject) -> Presence {
    let mut value = VARIANT::default();
    if unsafe { object.Get(w!("Present"), 0, &mut value, None, None) }.is_err() {
        return Presence::Absent;
    }
    presence_of(&value)
}

/// Map a `Present` value: empty is absent, true or non-zero is present,
/// anything else (false, zero, null) is not
fn presence_of(value: &VARIANT) -> Presence {
    if value.is_empty() {
        return Presence::Absent;
    }
    match bool::try_from(value) {
        Ok(true) => Presence::Yes,
        _ => Presence::No,
    }
}
