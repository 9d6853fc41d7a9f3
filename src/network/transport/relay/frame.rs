//! Length-prefixed frame decoding.
//!
//! Payload from the radio module arrives as `+IPD,<len>:` followed by
//! exactly `<len>` raw bytes, interleaved with whatever status text the
//! module prints. The end of the stream is the literal `CLOSED`.
//!
//! ```text
//!   noise  +IPD,5:hello  noise  +IPD,3:abc  CLOSED
//!          └─ frame ──┘         └─ frame ┘  └ end ┘
//! ```
//!
//! The decoder is a byte-at-a-time state machine:
//!
//! ```text
//!            marker[0]                marker done           ':'
//!   Idle ──────────────▶ MatchingFrame ──────────▶ ReadingLength ──▶ ReadingPayload
//!    │ ▲                      │ mismatch                                   │
//!    │ └──────────────────────┴──────────────── payload complete ◀─────────┘
//!    │ sentinel[0]
//!    └──────────────▶ MatchingClosed ── sentinel done ──▶ finished
//! ```

use crate::network::error::Error;
use crate::network::transport::matcher::MatchMode;
use crate::network::{Read, poll_byte};
use crate::system::clock::{Clock, Deadline};
use heapless::Vec;

/// Largest payload a single frame may carry.
pub const MAX_FRAME_LEN: usize = 2048;

/// Longest decimal length field accepted.
const MAX_LENGTH_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    MatchingClosed(usize),
    MatchingFrame(usize),
    ReadingLength,
    ReadingPayload(usize),
}

/// Something the decoder recognized in the stream.
#[derive(Debug, PartialEq, Eq)]
pub enum Event<'a> {
    /// A complete frame payload.
    Frame(&'a [u8]),
    /// The termination sentinel.
    Closed,
}

/// How a [`FrameDecoder::decode`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Number of complete frames handed out.
    pub frames: usize,
    /// `true` if the sentinel was seen, `false` if the deadline passed.
    pub closed: bool,
}

#[derive(Debug)]
pub struct FrameDecoder<'k> {
    frame_marker: &'k [u8],
    closed_sentinel: &'k [u8],
    mode: MatchMode,
    state: State,
    length: Vec<u8, MAX_LENGTH_DIGITS>,
    length_overflow: bool,
    payload: Vec<u8, MAX_FRAME_LEN>,
}

impl<'k> FrameDecoder<'k> {
    /// A decoder for frames announced by `frame_marker` (e.g. `+IPD,`) and
    /// a stream ended by `closed_sentinel` (e.g. `CLOSED`).
    ///
    /// When both keywords share a first byte, the frame marker is tried
    /// first.
    pub fn new(frame_marker: &'k [u8], closed_sentinel: &'k [u8], mode: MatchMode) -> Self {
        Self {
            frame_marker,
            closed_sentinel,
            mode,
            state: State::Idle,
            length: Vec::new(),
            length_overflow: false,
            payload: Vec::new(),
        }
    }

    /// Drops any partial frame and returns to idle.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.length.clear();
        self.length_overflow = false;
        self.payload.clear();
    }

    /// Feeds one byte.
    ///
    /// A length field that is empty or not a decimal number closes the
    /// frame immediately as empty. A length above [`MAX_FRAME_LEN`] is
    /// [`Error::ResponseTooLarge`].
    pub fn feed(&mut self, byte: u8) -> Result<Option<Event<'_>>, Error> {
        match self.state {
            State::Idle => Ok(self.start(byte)),
            State::MatchingFrame(cursor) => {
                if byte == self.frame_marker[cursor] {
                    self.state = self.advance_frame(cursor + 1);
                    Ok(None)
                } else {
                    Ok(self.mismatch(byte))
                }
            }
            State::MatchingClosed(cursor) => {
                if byte == self.closed_sentinel[cursor] {
                    if cursor + 1 == self.closed_sentinel.len() {
                        self.state = State::Idle;
                        return Ok(Some(Event::Closed));
                    }
                    self.state = State::MatchingClosed(cursor + 1);
                    Ok(None)
                } else {
                    Ok(self.mismatch(byte))
                }
            }
            State::ReadingLength => {
                if byte != b':' {
                    if self.length.push(byte).is_err() {
                        self.length_overflow = true;
                    }
                    return Ok(None);
                }
                let len = self.parsed_length();
                self.length.clear();
                self.length_overflow = false;
                self.payload.clear();
                if len > MAX_FRAME_LEN {
                    warn!("frame of {} bytes exceeds buffer", len);
                    self.state = State::Idle;
                    return Err(Error::ResponseTooLarge);
                }
                trace!("frame of {} bytes", len);
                if len == 0 {
                    self.state = State::Idle;
                    return Ok(Some(Event::Frame(&[])));
                }
                self.state = State::ReadingPayload(len);
                Ok(None)
            }
            State::ReadingPayload(remaining) => {
                // Capacity was checked against the announced length
                let _ = self.payload.push(byte);
                if remaining == 1 {
                    self.state = State::Idle;
                    return Ok(Some(Event::Frame(&self.payload)));
                }
                self.state = State::ReadingPayload(remaining - 1);
                Ok(None)
            }
        }
    }

    /// Runs the decoder over `link` until the sentinel or `deadline`.
    ///
    /// Each complete frame goes to `on_frame` in stream order. The decoder
    /// is reset first; a frame still incomplete at the deadline is dropped.
    pub fn decode<L, C, F>(
        &mut self,
        link: &mut L,
        clock: &mut C,
        deadline: Deadline,
        mut on_frame: F,
    ) -> Result<Decoded, Error>
    where
        L: Read,
        L::Error: Into<Error>,
        C: Clock,
        F: FnMut(&[u8]) -> Result<(), Error>,
    {
        self.reset();
        let mut frames = 0;

        while !deadline.has_elapsed(clock) {
            let Some(byte) = poll_byte(link)? else {
                continue;
            };
            match self.feed(byte)? {
                Some(Event::Frame(payload)) => {
                    on_frame(payload)?;
                    frames += 1;
                }
                Some(Event::Closed) => {
                    debug!("link closed after {} frames", frames);
                    return Ok(Decoded {
                        frames,
                        closed: true,
                    });
                }
                None => {}
            }
        }

        debug!("decode deadline reached after {} frames", frames);
        self.reset();
        Ok(Decoded {
            frames,
            closed: false,
        })
    }

    fn start(&mut self, byte: u8) -> Option<Event<'_>> {
        if self.frame_marker.first() == Some(&byte) {
            self.state = self.advance_frame(1);
            None
        } else if self.closed_sentinel.first() == Some(&byte) {
            if self.closed_sentinel.len() == 1 {
                self.state = State::Idle;
                return Some(Event::Closed);
            }
            self.state = State::MatchingClosed(1);
            None
        } else {
            self.state = State::Idle;
            None
        }
    }

    fn advance_frame(&mut self, cursor: usize) -> State {
        if cursor == self.frame_marker.len() {
            self.length.clear();
            self.length_overflow = false;
            State::ReadingLength
        } else {
            State::MatchingFrame(cursor)
        }
    }

    fn mismatch(&mut self, byte: u8) -> Option<Event<'_>> {
        self.state = State::Idle;
        match self.mode {
            MatchMode::Retest => self.start(byte),
            MatchMode::Legacy => None,
        }
    }

    fn parsed_length(&self) -> usize {
        if self.length_overflow {
            return 0;
        }
        core::str::from_utf8(&self.length)
            .ok()
            .and_then(|digits| digits.parse::<usize>().ok())
            .unwrap_or(0)
    }
}
