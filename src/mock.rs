//! Scripted PLC stand-in for transport and client tests.
//!
//! [`MockPlc`] listens on a random localhost port, accepts a single
//! connection and walks through its expectations in order: it reads exactly
//! the expected request bytes, checks them, then writes back the scripted
//! response chunks.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct Expectation {
    request: Vec<u8>,
    chunks: Vec<Vec<u8>>,
}

pub(crate) struct MockPlc {
    expectations: Vec<Expectation>,
    hold_open: bool,
    handle: Option<JoinHandle<Result<(), String>>>,
}

impl MockPlc {
    pub(crate) fn new() -> Self {
        Self {
            expectations: Vec::new(),
            hold_open: false,
            handle: None,
        }
    }

    /// Replies to `request` with `response` in one write.
    pub(crate) fn expect(&mut self, request: &[u8], response: &[u8]) {
        self.expect_chunks(request, &[response]);
    }

    /// Replies to `request` with separate writes, pausing between them.
    /// An empty slice means no reply at all.
    pub(crate) fn expect_chunks(&mut self, request: &[u8], chunks: &[&[u8]]) {
        self.expectations.push(Expectation {
            request: request.to_vec(),
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
        });
    }

    /// Keeps the connection open after the script until the client hangs up.
    pub(crate) fn hold_open(&mut self) {
        self.hold_open = true;
    }

    /// Returns a localhost port nothing is listening on.
    pub(crate) fn unused_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    }

    /// Starts serving and returns the listening address.
    pub(crate) fn start(&mut self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock PLC");
        let addr = listener.local_addr().expect("local addr");
        let expectations = std::mem::take(&mut self.expectations);
        let hold_open = self.hold_open;

        self.handle = Some(thread::spawn(move || {
            let (stream, _) = listener
                .accept()
                .map_err(|e| format!("accept failed: {}", e))?;
            serve(stream, expectations, hold_open)
        }));
        addr
    }

    /// Waits for the script to complete.
    pub(crate) fn finish(mut self) -> Result<(), String> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| "mock PLC thread panicked".to_string())?,
            None => Ok(()),
        }
    }
}

fn serve(
    mut stream: TcpStream,
    expectations: Vec<Expectation>,
    hold_open: bool,
) -> Result<(), String> {
    stream.set_nodelay(true).map_err(|e| e.to_string())?;

    for (step, expectation) in expectations.into_iter().enumerate() {
        let mut received = vec![0u8; expectation.request.len()];
        stream
            .read_exact(&mut received)
            .map_err(|e| format!("step {}: read failed: {}", step, e))?;
        if received != expectation.request {
            return Err(format!(
                "step {}: expected {:?}, got {:?}",
                step,
                String::from_utf8_lossy(&expectation.request),
                String::from_utf8_lossy(&received)
            ));
        }

        for (i, chunk) in expectation.chunks.iter().enumerate() {
            if i > 0 {
                thread::sleep(Duration::from_millis(20));
            }
            stream
                .write_all(chunk)
                .and_then(|()| stream.flush())
                .map_err(|e| format!("step {}: write failed: {}", step, e))?;
        }
    }

    if hold_open {
        let mut sink = [0u8; 64];
        while matches!(stream.read(&mut sink), Ok(n) if n > 0) {}
    }
    Ok(())
}
