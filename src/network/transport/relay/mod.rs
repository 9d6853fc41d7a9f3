//! Transport through a companion radio module speaking AT commands.
//!
//! The board writes command lines to the module over a serial link and
//! reads back its replies. One request is:
//!
//! 1. `AT+CIPSTART="SSL","<host>",<port>` (or `"TCP"` for plain http), wait for `OK`
//! 2. `AT+CIPSEND=<len>`, wait for `OK`
//! 3. write the serialized request
//! 4. decode `+IPD,<len>:<payload>` frames until `CLOSED` or the deadline
//!
//! If anything fails after the link is open, or the deadline passes before
//! `CLOSED`, `AT+CIPCLOSE` is sent so the module is ready for the next
//! request.
//!
//! The serial link is a [`Read`] + [`Write`] implementation whose `read`
//! returns `Ok(0)` when no byte is pending.

use super::Transport;
use super::matcher::MatchMode;
use crate::network::application::http::{RawResponse, Url};
use crate::network::error::Error;
use crate::network::{Read, Write, write_all};
use crate::system::clock::{Clock, Deadline};
use core::fmt::Write as _;
use heapless::String;
use serde::Deserialize;

/// Command acknowledgment matching.
pub mod ack;

/// Length-prefixed frame decoding.
pub mod frame;

pub use ack::EchoFn;
pub use frame::{Decoded, FrameDecoder};

const MAX_COMMAND_LEN: usize = 160;

/// Keywords of the module's command protocol.
///
/// The defaults match ESP8266 AT firmware. Missing fields take their
/// defaults when loaded from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelayOptions<'a> {
    /// Prefix of the connection commands, `START`/`SEND`/`CLOSE` follow.
    pub command_prefix: &'a str,
    /// Acknowledgment keyword.
    pub ack: &'a str,
    /// Frame announcement up to the length field, comma included.
    pub frame_marker: &'a str,
    /// End of stream keyword.
    pub closed_sentinel: &'a str,
    /// Behavior on a broken partial keyword match.
    pub match_mode: MatchMode,
}

impl Default for RelayOptions<'_> {
    fn default() -> Self {
        Self {
            command_prefix: "AT+CIP",
            ack: "OK",
            frame_marker: "+IPD,",
            closed_sentinel: "CLOSED",
            match_mode: MatchMode::default(),
        }
    }
}

impl<'a> RelayOptions<'a> {
    /// Loads options from JSON.
    pub fn from_json(json: &'a str) -> Result<Self, serde_json_core::de::Error> {
        serde_json_core::from_str(json).map(|(options, _)| options)
    }
}

/// Sends requests through an AT-command radio module.
#[derive(Debug)]
pub struct RelayTransport<'a, L, C> {
    link: L,
    clock: C,
    options: RelayOptions<'a>,
    echo: Option<EchoFn>,
}

impl<'a, L, C> RelayTransport<'a, L, C>
where
    L: Read + Write,
    <L as Read>::Error: Into<Error>,
    C: Clock,
{
    /// A transport with ESP8266 keywords.
    pub fn new(link: L, clock: C) -> Self {
        Self::with_options(link, clock, RelayOptions::default())
    }

    pub fn with_options(link: L, clock: C, options: RelayOptions<'a>) -> Self {
        Self {
            link,
            clock,
            options,
            echo: None,
        }
    }

    /// Echo the module's replies to `echo` while waiting for acks.
    pub fn set_echo_function(&mut self, echo: EchoFn) {
        self.echo = Some(echo);
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Gives back the serial link and clock.
    pub fn release(self) -> (L, C) {
        (self.link, self.clock)
    }

    fn command(
        &mut self,
        args: core::fmt::Arguments<'_>,
        timeout_ms: u32,
        echo: Option<EchoFn>,
    ) -> Result<bool, Error> {
        let mut line: String<MAX_COMMAND_LEN> = String::new();
        line.write_str(self.options.command_prefix)
            .and_then(|_| line.write_fmt(args))
            .map_err(|_| Error::RequestTooLarge)?;
        ack::send_command(
            &mut self.link,
            &mut self.clock,
            &line,
            self.options.ack.as_bytes(),
            timeout_ms,
            self.options.match_mode,
            echo,
        )
    }

    /// Sends `request` over the open link and collects the reply frames.
    ///
    /// Returns whether the module reported the link closed.
    fn transfer(
        &mut self,
        request: &[u8],
        timeout_ms: u32,
        echo: Option<EchoFn>,
        response: &mut RawResponse,
    ) -> Result<bool, Error> {
        if !self.command(format_args!("SEND={}", request.len()), timeout_ms, echo)? {
            return Err(Error::AckTimeout);
        }
        write_all(&mut self.link, request)?;

        let deadline = Deadline::after(&mut self.clock, timeout_ms);
        let mut decoder = FrameDecoder::new(
            self.options.frame_marker.as_bytes(),
            self.options.closed_sentinel.as_bytes(),
            self.options.match_mode,
        );
        let decoded = decoder.decode(&mut self.link, &mut self.clock, deadline, |payload| {
            response
                .extend_from_slice(payload)
                .map_err(|_| Error::ResponseTooLarge)
        })?;
        Ok(decoded.closed)
    }
}

impl<L, C> Transport for RelayTransport<'_, L, C>
where
    L: Read + Write,
    <L as Read>::Error: Into<Error>,
    C: Clock,
{
    fn send(
        &mut self,
        url: &Url<'_>,
        request: &[u8],
        timeout_ms: u32,
        response: &mut RawResponse,
    ) -> Result<(), Error> {
        let echo = self.echo;
        let opened = self.command(
            format_args!(
                "START=\"{}\",\"{}\",{}",
                url.scheme.link_protocol(),
                url.host,
                url.port()
            ),
            timeout_ms,
            echo,
        )?;
        if !opened {
            return Err(Error::ConnectionRefused);
        }
        info!("link open to {}:{}", url.host, url.port());

        let result = self.transfer(request, timeout_ms, echo, response);
        match result {
            Ok(true) => return Ok(()),
            Ok(false) => warn!(
                "no {} before deadline, closing link",
                self.options.closed_sentinel
            ),
            Err(e) => warn!("transfer failed: {}, closing link", e),
        }
        // Best effort, the outcome of the transfer is returned either way
        let _ = self.command(format_args!("CLOSE"), timeout_ms, None);
        result.map(|_| ())
    }
}
