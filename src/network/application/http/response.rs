//! HTTP/1.1 response parsing.

use super::{
    MAX_BODY_LEN, MAX_HEADER_NAME_LEN, MAX_HEADER_VALUE_LEN, MAX_HEADERS, MAX_STATUS_CODE_LEN,
    MAX_STATUS_MESSAGE_LEN, MAX_VERSION_LEN,
};
use crate::network::error::Error;
use core::ops::Range;
use heapless::{String, Vec};
use serde::Deserialize;

/// One response header line, split at the first `": "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Text before the delimiter, or the whole line when there is none
    pub name: String<MAX_HEADER_NAME_LEN>,
    /// The header content after the delimiter
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

/// The outcome of one request.
///
/// A default `Response` is the "unusable" value: callers check `connected`
/// and whether `status_code` is empty before trusting the other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Whether the transport reached the remote host
    pub connected: bool,
    /// Protocol version, e.g. `HTTP/1.1`
    pub version: String<MAX_VERSION_LEN>,
    /// Text between the first and last space of the status line, numeric or not
    pub status_code: String<MAX_STATUS_CODE_LEN>,
    /// Text after the last space of the status line
    pub status_message: String<MAX_STATUS_MESSAGE_LEN>,
    /// Headers in wire order, duplicates kept
    pub headers: Vec<Header, MAX_HEADERS>,
    /// Everything after the first blank line, after cleanup
    pub body: Vec<u8, MAX_BODY_LEN>,
}

impl Response {
    /// The status code as a number, if it is one.
    pub fn status(&self) -> Option<u16> {
        self.status_code.parse().ok()
    }

    /// The value of the first header named `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// The body as text, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.body).ok()
    }

    /// Deserializes the body as JSON.
    ///
    /// Parsing starts at the first `{` or `[`, skipping a stray byte left in
    /// front of the document by [`BodyCleanup::BraceTrim`].
    pub fn json<'de, T: Deserialize<'de>>(&'de self) -> Result<T, Error> {
        let start = self
            .body
            .iter()
            .position(|&b| b == b'{' || b == b'[')
            .ok_or(Error::MalformedBody)?;
        serde_json_core::from_slice::<T>(&self.body[start..])
            .map(|(value, _)| value)
            .map_err(|_| Error::MalformedBody)
    }
}

/// Post-processing applied to a parsed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyCleanup {
    /// Keep the body exactly as received.
    Keep,
    /// Cut the body down to the span from one byte before the first `{`
    /// through the last `}`.
    ///
    /// Some radio modules leave stray bytes around the JSON document; this
    /// drops them. Bodies without a `{`/`}` pair are left as received.
    #[default]
    BraceTrim,
}

impl BodyCleanup {
    /// Applies the cleanup to `response.body` in place.
    pub fn apply(&self, response: &mut Response) {
        if *self == BodyCleanup::BraceTrim {
            let span = brace_span(&response.body);
            let len = span.len();
            response.body.copy_within(span, 0);
            response.body.truncate(len);
        }
    }
}

/// The byte range [`BodyCleanup::BraceTrim`] keeps.
///
/// A body with no `{`, no `}`, or a last `}` before the first `{` is kept
/// whole. When the first `{` is the very first byte the span starts there.
pub fn brace_span(body: &[u8]) -> Range<usize> {
    let open = body.iter().position(|&b| b == b'{');
    let close = body.iter().rposition(|&b| b == b'}');
    match (open, close) {
        (Some(open), Some(close)) if open <= close => open.saturating_sub(1)..close + 1,
        _ => {
            debug!("no brace pair in {} byte body, kept as is", body.len());
            0..body.len()
        }
    }
}

/// Parses a complete raw response: status line, headers, blank line, body.
///
/// Fails with [`Error::MalformedResponse`] when there is no CRLF at all or
/// the status line is not UTF-8, and with [`Error::ResponseTooLarge`] when
/// the body does not fit. Fields longer than their capacity are cut at a
/// character boundary. Header lines that are not UTF-8, and headers past
/// [`MAX_HEADERS`], are skipped. Header lines without `": "` are kept whole
/// as the name with an empty value. A response without a blank line has an
/// empty body. `connected` is left `false`; the client sets it.
pub fn parse(raw: &[u8]) -> Result<Response, Error> {
    let status_end = find(raw, b"\r\n").ok_or(Error::MalformedResponse)?;
    let status_line = text(&raw[..status_end])?;

    let mut response = Response::default();

    // Version ends at the first space, the message starts after the last
    let (version, code, message) = match (status_line.find(' '), status_line.rfind(' ')) {
        (Some(first), Some(last)) if first < last => (
            &status_line[..first],
            &status_line[first + 1..last],
            &status_line[last + 1..],
        ),
        (Some(first), Some(_)) => (&status_line[..first], "", &status_line[first + 1..]),
        _ => (status_line, "", ""),
    };
    response.version = clipped(version);
    response.status_code = clipped(code);
    response.status_message = clipped(message);

    // Header lines up to the first empty line
    let mut pos = status_end + 2;
    while let Some(len) = find(&raw[pos..], b"\r\n") {
        if len == 0 {
            break;
        }
        let line = &raw[pos..pos + len];
        pos += len + 2;
        let Ok(line) = core::str::from_utf8(line) else {
            warn!("skipping non UTF-8 header line");
            continue;
        };
        let (name, value) = line.split_once(": ").unwrap_or((line, ""));
        let header = Header {
            name: clipped(name),
            value: clipped(value),
        };
        if response.headers.push(header).is_err() {
            warn!("more than {} headers, dropping {}", MAX_HEADERS, name);
        }
    }

    if let Some(head_end) = find(raw, b"\r\n\r\n") {
        response.body =
            Vec::from_slice(&raw[head_end + 4..]).map_err(|_| Error::ResponseTooLarge)?;
    }

    Ok(response)
}

/// Like [`parse`], but returns the default (unusable) `Response` on failure.
pub fn parse_or_default(raw: &[u8]) -> Response {
    parse(raw).unwrap_or_else(|e| {
        warn!("response parse failed: {}", e);
        Response::default()
    })
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn text(bytes: &[u8]) -> Result<&str, Error> {
    core::str::from_utf8(bytes).map_err(|_| Error::MalformedResponse)
}

/// Copies at most `N` bytes of `value`, ending on a character boundary.
fn clipped<const N: usize>(value: &str) -> String<N> {
    let mut end = value.len().min(N);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    // Fits by construction
    let _ = out.push_str(&value[..end]);
    out
}
