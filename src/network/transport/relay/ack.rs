//! Command acknowledgment matching.
//!
//! After a command line goes out, the module echoes it and eventually
//! prints a status keyword such as `OK`. These functions watch the link for
//! that keyword, anywhere in the stream, until a deadline computed when the
//! wait starts. The result is a plain success flag.

use crate::network::error::Error;
use crate::network::transport::matcher::{KeywordMatcher, MatchMode};
use crate::network::{Read, Write, poll_byte, write_all};
use crate::system::clock::{Clock, Deadline};

/// Diagnostic sink receiving every byte seen while waiting for an ack.
///
/// Usually forwards to a debug UART or a log buffer.
pub type EchoFn = fn(&[u8]);

/// Waits for `keyword`, forwarding each observed byte to `echo`.
///
/// Returns `Ok(false)` if the keyword is not seen within `timeout_ms`.
/// `Err` is reserved for a failing link.
pub fn await_ack_verbose<L, C>(
    link: &mut L,
    clock: &mut C,
    keyword: &[u8],
    timeout_ms: u32,
    mode: MatchMode,
    echo: EchoFn,
) -> Result<bool, Error>
where
    L: Read,
    L::Error: Into<Error>,
    C: Clock,
{
    await_ack(link, clock, keyword, timeout_ms, mode, Some(echo))
}

/// Waits for `keyword` without echoing.
///
/// Returns `Ok(false)` if the keyword is not seen within `timeout_ms`.
pub fn await_ack_silent<L, C>(
    link: &mut L,
    clock: &mut C,
    keyword: &[u8],
    timeout_ms: u32,
    mode: MatchMode,
) -> Result<bool, Error>
where
    L: Read,
    L::Error: Into<Error>,
    C: Clock,
{
    await_ack(link, clock, keyword, timeout_ms, mode, None)
}

fn await_ack<L, C>(
    link: &mut L,
    clock: &mut C,
    keyword: &[u8],
    timeout_ms: u32,
    mode: MatchMode,
    echo: Option<EchoFn>,
) -> Result<bool, Error>
where
    L: Read,
    L::Error: Into<Error>,
    C: Clock,
{
    let deadline = Deadline::after(clock, timeout_ms);
    let mut matcher = KeywordMatcher::new(keyword, mode);

    while !deadline.has_elapsed(clock) {
        let Some(byte) = poll_byte(link)? else {
            continue;
        };
        if let Some(echo) = echo {
            echo(&[byte]);
        }
        if matcher.feed(byte) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Sends one command line (CRLF appended) and waits for `ack`.
///
/// Echoes the reply when `echo` is set.
pub fn send_command<L, C>(
    link: &mut L,
    clock: &mut C,
    command: &str,
    ack: &[u8],
    timeout_ms: u32,
    mode: MatchMode,
    echo: Option<EchoFn>,
) -> Result<bool, Error>
where
    L: Read + Write,
    <L as Read>::Error: Into<Error>,
    C: Clock,
{
    trace!("> {}", command);
    write_all(link, command.as_bytes())?;
    write_all(link, b"\r\n")?;

    let acked = match echo {
        Some(echo) => await_ack_verbose(link, clock, ack, timeout_ms, mode, echo)?,
        None => await_ack_silent(link, clock, ack, timeout_ms, mode)?,
    };
    if !acked {
        warn!("no ack for {}", command);
    }
    Ok(acked)
}
