//! List printers and optionally send a file's raw bytes to one of them.
//!
//! ```text
//! cargo run -p escpos-printer --example list_printers
//! cargo run -p escpos-printer --example list_printers -- "POS-80" ticket.bin
//! ```

use escpos_printer::{PrintSession, list_printers};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let printers = list_printers()?;
    for p in &printers {
        println!(
            "{}{} | port={} | usb={} vid={} pid={} id={}",
            if p.is_default { "* " } else { "  " },
            p.name,
            p.port_name,
            p.is_usb,
            p.vid,
            p.pid,
            p.device_id
        );
    }

    let mut args = std::env::args().skip(1);
    let (Some(name), Some(path)) = (args.next(), args.next()) else {
        return Ok(());
    };

    let data = std::fs::read(&path)?;

    let mut session = PrintSession::open(&name)?;
    let ok = session.print(&data);
    session.close();

    println!("sent {} bytes to {}: {}", data.len(), name, if ok { "ok" } else { "FAILED" });
    Ok(())
}
