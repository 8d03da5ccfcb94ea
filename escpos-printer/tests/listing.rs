use escpos_printer::{
    DeviceInventory, JobOptions, PrintError, PrintResult, PrinterRecord, SpoolQueue, Spooler,
    UsbDevice, UsbInventory, list_printers_with,
};

struct FakeSpooler {
    printers: Vec<PrinterRecord>,
    fail: bool,
}

struct NullQueue;

impl SpoolQueue for NullQueue {
    fn start_doc(&mut self) -> bool {
        true
    }
    fn start_page(&mut self) -> bool {
        true
    }
    fn write(&mut self, data: &[u8]) -> Option<usize> {
        Some(data.len())
    }
    fn end_page(&mut self) -> bool {
        true
    }
    fn end_doc(&mut self) -> bool {
        true
    }
}

impl Spooler for FakeSpooler {
    type Queue = NullQueue;

    fn enumerate(&self) -> PrintResult<Vec<PrinterRecord>> {
        if self.fail {
            return Err(PrintError::EnumerationFailed("access denied".to_string()));
        }
        Ok(self.printers.clone())
    }

    fn open(&self, _name: &str, _options: &JobOptions) -> PrintResult<NullQueue> {
        Ok(NullQueue)
    }
}

struct FakeInventory(Vec<UsbDevice>);

impl DeviceInventory for FakeInventory {
    fn usb_printers(&self) -> UsbInventory {
        self.0.iter().cloned().collect()
    }
}

fn spooler(printers: &[(&str, &str)]) -> FakeSpooler {
    FakeSpooler {
        printers: printers
            .iter()
            .map(|(name, port)| PrinterRecord::new(*name, "", false, *port))
            .collect(),
        fail: false,
    }
}

fn device(name: &str, vid: &str, pid: &str) -> UsbDevice {
    UsbDevice {
        descriptive_name: name.to_string(),
        vid: vid.to_string(),
        pid: pid.to_string(),
        device_id: format!("USB\\VID_{}&PID_{}\\6&1234ABCD&0&1", vid, pid),
    }
}

fn assert_usb_invariant(records: &[PrinterRecord]) {
    for r in records {
        let all_set = !r.vid.is_empty() && !r.pid.is_empty() && !r.device_id.is_empty();
        assert_eq!(r.is_usb, all_set, "USB fields inconsistent for {}", r.name);
        if !r.is_usb {
            assert!(r.vid.is_empty() && r.pid.is_empty() && r.device_id.is_empty());
        }
        for id in [&r.vid, &r.pid] {
            assert!(id.is_empty() || (id.len() == 4 && id.chars().all(|c| c.is_ascii_hexdigit())));
        }
    }
}

#[test]
fn test_single_device_binds_usb_port_only() {
    let spooler = spooler(&[("Acme", "USB001"), ("Office", "LPT1:")]);
    let inventory = FakeInventory(vec![device("Acme POS-80", "0519", "2013")]);

    let list = list_printers_with(&spooler, &inventory).unwrap();

    assert_eq!(list.len(), 2);
    assert!(list[0].is_usb);
    assert_eq!(list[0].vid, "0519");
    assert_eq!(list[0].pid, "2013");
    assert_eq!(list[0].device_id, "USB\\VID_0519&PID_2013\\6&1234ABCD&0&1");
    assert!(!list[1].is_usb);
    assert_eq!(list[1].vid, "");
    assert_usb_invariant(&list);
}

#[test]
fn test_multiple_devices_match_by_name() {
    let spooler = spooler(&[("Rongta 80mm", "RongtaUSB PORT:")]);
    let inventory = FakeInventory(vec![
        device("Rongta RP80", "0FE6", "811E"),
        device("Epson TM-T88", "04B8", "0202"),
    ]);

    let list = list_printers_with(&spooler, &inventory).unwrap();

    assert!(list[0].is_usb);
    assert_eq!(list[0].vid, "0FE6");
    assert_eq!(list[0].pid, "811E");
    assert_usb_invariant(&list);
}

#[test]
fn test_multiple_devices_fallback_is_first_by_name() {
    let spooler = spooler(&[("Generic", "USB001")]);
    let inventory = FakeInventory(vec![
        device("Zebra ZD220", "0A5F", "0166"),
        device("Citizen CT-S310", "1D90", "2060"),
    ]);

    let list = list_printers_with(&spooler, &inventory).unwrap();

    assert!(list[0].is_usb);
    assert_eq!(list[0].vid, "1D90");
    assert_usb_invariant(&list);
}

#[test]
fn test_virtual_port_never_usb() {
    let spooler = spooler(&[("Microsoft Print to PDF", "portprompt:")]);
    let inventory = FakeInventory(vec![device("Microsoft Print", "045E", "0001")]);

    let list = list_printers_with(&spooler, &inventory).unwrap();

    assert!(!list[0].is_usb);
    assert_usb_invariant(&list);
}

#[test]
fn test_empty_inventory() {
    let spooler = spooler(&[("POS-58", "USB001")]);
    let list = list_printers_with(&spooler, &FakeInventory(Vec::new())).unwrap();
    assert!(!list[0].is_usb);
}

#[test]
fn test_enumeration_failure_propagates() {
    let spooler = FakeSpooler {
        printers: Vec::new(),
        fail: true,
    };
    let err = list_printers_with(&spooler, &FakeInventory(Vec::new())).unwrap_err();
    assert!(matches!(err, PrintError::EnumerationFailed(_)));
}

#[test]
fn test_listing_json_fields() {
    let mut spooler = spooler(&[("POS-80", "USB001")]);
    spooler.printers[0].description = "Front counter".to_string();
    spooler.printers[0].is_default = true;
    let inventory = FakeInventory(vec![device("POS-80 Printer", "0519", "2013")]);

    let list = list_printers_with(&spooler, &inventory).unwrap();
    let json = serde_json::to_value(&list).unwrap();
    let entry = json[0].as_object().unwrap();

    let mut keys: Vec<&str> = entry.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["description", "deviceId", "isDefault", "isUsb", "name", "pid", "portName", "vid"]
    );
    assert_eq!(entry["isDefault"], true);
    assert_eq!(entry["isUsb"], true);
    assert_eq!(entry["portName"], "USB001");
}
