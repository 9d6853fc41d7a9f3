//! Request transports.
//!
//! A transport takes a serialized request to the host named by a URL and
//! collects the raw response bytes. Two implementations exist and a board
//! uses exactly one of them:
//!
//! - [`DirectTransport`]: the board has its own TCP/TLS stack and opens a
//!   socket through a [`Connect`](crate::network::Connect) implementation.
//! - [`RelayTransport`]: the board drives a companion radio module (ESP8266
//!   style AT firmware) over a serial link.
//!
//! ```text
//!                     ┌──────────────────┐
//!                ┌───▶│ DirectTransport  │──▶ socket write ──▶ read until close
//! Client ──send──┤    └──────────────────┘
//!                │    ┌──────────────────┐
//!                └───▶│ RelayTransport   │──▶ AT open/send ──▶ frame decoding
//!                     └──────────────────┘
//! ```

use crate::network::application::http::{RawResponse, Url};
use crate::network::error::Error;

/// Direct socket transport.
pub mod direct;

/// Keyword cursor used by the ack matcher.
pub mod matcher;

/// AT-command radio module transport.
pub mod relay;

pub use direct::DirectTransport;
pub use matcher::MatchMode;
pub use relay::{RelayOptions, RelayTransport};

/// Carries one serialized request to `url`'s host and collects the reply.
///
/// Implementations block until the exchange completes or `timeout_ms`
/// elapses. Failures to reach the host are [`Error::ConnectionRefused`].
pub trait Transport {
    /// Sends `request` and appends the raw response bytes to `response`.
    fn send(
        &mut self,
        url: &Url<'_>,
        request: &[u8],
        timeout_ms: u32,
        response: &mut RawResponse,
    ) -> Result<(), Error>;
}
