use super::Transport;
use crate::network::application::http::{RawResponse, Url};
use crate::network::error::Error;
use crate::network::{Close, Connect, Endpoint, Read, write_all};
use crate::system::clock::{Clock, Deadline};

const READ_CHUNK_LEN: usize = 256;

/// Sends requests over a socket opened by a [`Connect`] implementation.
///
/// The connector decides how `Endpoint::secure` is honored (TLS stack,
/// offloaded TLS, ...). The response is everything read until the peer
/// closes the connection or the deadline passes.
#[derive(Debug)]
pub struct DirectTransport<N: Connect, C: Clock> {
    network: N,
    clock: C,
}

impl<N, C> DirectTransport<N, C>
where
    N: Connect,
    C: Clock,
    <N::Connection as Read>::Error: Into<Error>,
{
    pub fn new(network: N, clock: C) -> Self {
        Self { network, clock }
    }

    /// Gives back the connector and clock.
    pub fn release(self) -> (N, C) {
        (self.network, self.clock)
    }

    fn exchange(
        &mut self,
        conn: &mut N::Connection,
        request: &[u8],
        timeout_ms: u32,
        response: &mut RawResponse,
    ) -> Result<(), Error> {
        write_all(conn, request)?;

        let deadline = Deadline::after(&mut self.clock, timeout_ms);
        let mut chunk = [0u8; READ_CHUNK_LEN];
        loop {
            if deadline.has_elapsed(&mut self.clock) {
                debug!("read deadline reached with {} bytes", response.len());
                return Ok(());
            }
            match conn.read(&mut chunk) {
                Ok(0) => return Ok(()), // Connection closed by peer
                Ok(n) => response
                    .extend_from_slice(&chunk[..n])
                    .map_err(|_| Error::ResponseTooLarge)?,
                Err(e) => match e.into() {
                    Error::Timeout => continue,
                    _ => return Err(Error::ReadError),
                },
            }
        }
    }
}

impl<N, C> Transport for DirectTransport<N, C>
where
    N: Connect,
    C: Clock,
    <N::Connection as Read>::Error: Into<Error>,
{
    fn send(
        &mut self,
        url: &Url<'_>,
        request: &[u8],
        timeout_ms: u32,
        response: &mut RawResponse,
    ) -> Result<(), Error> {
        let endpoint = Endpoint {
            host: url.host,
            port: url.port(),
            secure: url.scheme.is_secure(),
        };
        let mut conn = self.network.connect(&endpoint).map_err(|_| {
            warn!("connection to {}:{} failed", endpoint.host, endpoint.port);
            Error::ConnectionRefused
        })?;
        info!("connected to {}:{}", endpoint.host, endpoint.port);

        let result = self.exchange(&mut conn, request, timeout_ms, response);
        if Close::close(conn).is_err() {
            debug!("close after exchange failed");
        }
        result
    }
}
