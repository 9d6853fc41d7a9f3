//! Mock links, sockets and clocks shared by the integration tests

#![allow(dead_code)]

use iotfetch::network::error::Error;
use iotfetch::network::{Close, Connect, Connection, Endpoint, Read, Write};
use iotfetch::system::clock::Clock;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Clock that advances by `step` milliseconds every time it is read
#[derive(Debug)]
pub struct MockClock {
    now: u64,
    step: u64,
}

impl MockClock {
    pub fn new() -> Self {
        Self { now: 0, step: 1 }
    }

    pub fn with_step(step: u64) -> Self {
        Self { now: 0, step }
    }

    pub fn now(&self) -> u64 {
        self.now
    }
}

impl Clock for MockClock {
    fn now_ms(&mut self) -> u64 {
        self.now += self.step;
        self.now
    }
}

/// Serial link fed from a script, one byte per read
///
/// `read` returns `Ok(0)` once the script is exhausted, like a UART with
/// nothing pending. Every `gap`-th poll reports no data to mimic a slow
/// module.
#[derive(Debug, Default)]
pub struct MockLink {
    incoming: VecDeque<u8>,
    pub written: Vec<u8>,
    gap: usize,
    polls: usize,
    fail_when_drained: bool,
}

impl MockLink {
    pub fn new(script: &[u8]) -> Self {
        Self {
            incoming: script.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Every `gap`-th read returns nothing.
    pub fn with_gaps(script: &[u8], gap: usize) -> Self {
        Self {
            gap,
            ..Self::new(script)
        }
    }

    /// Reads fail once the script is used up.
    pub fn failing_when_drained(script: &[u8]) -> Self {
        Self {
            fail_when_drained: true,
            ..Self::new(script)
        }
    }

    pub fn remaining(&self) -> usize {
        self.incoming.len()
    }

    pub fn written_str(&self) -> &str {
        std::str::from_utf8(&self.written).unwrap()
    }
}

impl Read for MockLink {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.polls += 1;
        if self.gap > 0 && self.polls % self.gap == 0 {
            return Err(Error::Timeout);
        }
        match (buf.first_mut(), self.incoming.pop_front()) {
            (Some(slot), Some(byte)) => {
                *slot = byte;
                Ok(1)
            }
            (_, None) if self.fail_when_drained => Err(Error::ReadError),
            _ => Ok(0),
        }
    }
}

impl Write for MockLink {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Serial link whose reads always fail
#[derive(Debug, Default)]
pub struct BrokenLink;

impl Read for BrokenLink {
    type Error = Error;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Err(Error::ReadError)
    }
}

impl Write for BrokenLink {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// What a mock socket saw, kept after the socket is closed
#[derive(Debug, Default)]
pub struct SocketLog {
    pub endpoint: Option<(String, u16, bool)>,
    pub written: Vec<u8>,
    pub closed: bool,
}

/// Socket returning a canned response in fixed-size reads, then EOF
#[derive(Debug)]
pub struct MockSocket {
    response: VecDeque<u8>,
    chunk: usize,
    log: Rc<RefCell<SocketLog>>,
}

impl Read for MockSocket {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.chunk).min(self.response.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.response.pop_front().unwrap();
        }
        Ok(n)
    }
}

impl Write for MockSocket {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.log.borrow_mut().written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MockSocket {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.log.borrow_mut().closed = true;
        Ok(())
    }
}

impl Connection for MockSocket {}

/// Connector handing out a [`MockSocket`], or refusing when `refuse` is set
#[derive(Debug)]
pub struct MockNetwork {
    response: Vec<u8>,
    chunk: usize,
    refuse: bool,
    pub log: Rc<RefCell<SocketLog>>,
}

impl MockNetwork {
    pub fn new(response: &[u8]) -> Self {
        Self {
            response: response.to_vec(),
            chunk: 64,
            refuse: false,
            log: Rc::new(RefCell::new(SocketLog::default())),
        }
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new(b"")
        }
    }

    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk;
        self
    }
}

impl Connect for MockNetwork {
    type Connection = MockSocket;
    type Error = Error;

    fn connect(&mut self, remote: &Endpoint<'_>) -> Result<Self::Connection, Self::Error> {
        if self.refuse {
            return Err(Error::ConnectionRefused);
        }
        self.log.borrow_mut().endpoint =
            Some((remote.host.to_string(), remote.port, remote.secure));
        Ok(MockSocket {
            response: self.response.iter().copied().collect(),
            chunk: self.chunk,
            log: Rc::clone(&self.log),
        })
    }
}

/// Wraps `payload` in `+IPD` frames of at most `frame_len` bytes.
pub fn ipd_frames(payload: &[u8], frame_len: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in payload.chunks(frame_len) {
        out.extend_from_slice(format!("+IPD,{}:", chunk.len()).as_bytes());
        out.extend_from_slice(chunk);
        out.extend_from_slice(b"\r\n");
    }
    out
}
