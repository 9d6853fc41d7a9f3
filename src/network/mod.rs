//! A network abstraction layer for embedded systems
//!
//! This module provides the small set of traits a byte link has to implement
//! to carry HTTP requests: a socket opened through [`Connect`], or a serial
//! port wired to a companion radio module. On top of those traits sit the
//! two [`transport`] variants and the [`application`] layer HTTP client.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Application layer protocols
pub mod application;

/// Request transports: direct socket and serial relay
pub mod transport;

use error::Error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

// Core synchronous traits
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection
    ///
    /// For a socket `Ok(0)` means the peer closed the connection. For a
    /// serial link `Ok(0)` means no byte is available yet.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// Where a connector should open a connection to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    /// Host name or address, without port
    pub host: &'a str,
    /// TCP port
    pub port: u16,
    /// Whether the connection must be TLS wrapped
    pub secure: bool,
}

/// A synchronous connector (client)
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Open a connection
    fn connect(&mut self, remote: &Endpoint<'_>) -> Result<Self::Connection, Self::Error>;
}

/// Writes all of `buf`, retrying short writes.
pub(crate) fn write_all<W: Write>(link: &mut W, mut buf: &[u8]) -> Result<(), Error> {
    while !buf.is_empty() {
        match link.write(buf) {
            Ok(0) => return Err(Error::WriteError),
            Ok(n) => buf = &buf[n..],
            Err(_) => return Err(Error::WriteError),
        }
    }
    link.flush().map_err(|_| Error::WriteError)
}

/// Polls a serial link for a single byte.
///
/// `Ok(None)` when nothing is available yet, including a link-level
/// [`Error::Timeout`].
pub(crate) fn poll_byte<L>(link: &mut L) -> Result<Option<u8>, Error>
where
    L: Read,
    L::Error: Into<Error>,
{
    let mut byte = [0u8; 1];
    match link.read(&mut byte) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(byte[0])),
        Err(e) => match e.into() {
            Error::Timeout => Ok(None),
            _ => Err(Error::ReadError),
        },
    }
}
