//! Example: polling a KV PLC
//!
//! Run with: cargo run --example poll -- [host] [port]
//!
//! This example demonstrates:
//! - Connecting with a timeout
//! - Querying model and mode
//! - A read/write polling loop on DM100 and W05

use kv_hostlink::{Client, ClientConfig, DeviceAddress, DEFAULT_HOSTLINK_PORT, DEFAULT_PLC_HOST};
use std::thread::sleep;
use std::time::Duration;

fn main() -> kv_hostlink::Result<()> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| DEFAULT_PLC_HOST.to_string());
    let port = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_HOSTLINK_PORT);

    let config = ClientConfig::new(host)
        .with_port(port)
        .with_timeout(Duration::from_secs(2));
    let mut client = Client::new(config)?;

    println!("Model: {}", client.query_model()?);
    println!("Mode:  {}", client.confirm_mode()?);

    let dm100: DeviceAddress = "DM100".parse()?;
    let w05: DeviceAddress = "W05".parse()?;

    for counter in 0u16..10 {
        let link = client.read(w05, None)?;
        let accepted = client.write_u16(dm100, counter)?;
        println!("W05 = {:>5}  DM100 <- {} ({})", link, counter, if accepted { "OK" } else { "rejected" });
        sleep(Duration::from_millis(100));
    }

    Ok(())
}
