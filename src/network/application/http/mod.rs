//! HTTP/1.1 protocol implementation for embedded systems.
//!
//! This module provides a lightweight HTTP client designed for
//! microcontrollers that talk to JSON APIs. It focuses on simplicity,
//! predictable memory usage, and working over whatever link the board has:
//! a socket, or a radio module on a UART.
//!
//! # Features
//!
//! - HTTP/1.1 request building with a fixed header set
//! - Response parsing into status, ordered headers and body
//! - Optional cleanup of stray bytes around a JSON body
//! - JSON decoding of the body via `serde-json-core`
//! - Fixed-size buffers for predictable memory usage
//!
//! # Flow
//!
//! ```text
//! Request ──▶ Url::parse ──▶ request::build ──▶ Transport::send ──▶ response::parse ──▶ Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use iotfetch::network::application::http::{Client, Request};
//! # use iotfetch::network::application::http::{Url, RawResponse};
//! # use iotfetch::network::error::Error;
//! # use iotfetch::network::transport::Transport;
//! # struct MockTransport;
//! # impl Transport for MockTransport {
//! #     fn send(&mut self, _url: &Url<'_>, _request: &[u8], _timeout_ms: u32, _response: &mut RawResponse) -> Result<(), Error> {
//! #         Ok(())
//! #     }
//! # }
//!
//! let mut client = Client::new(MockTransport);
//!
//! let request = Request::post("https://api.example.com/v1/items", r#"{"name":"probe"}"#)
//!     .with_content_type("application/json")
//!     .with_bearer_token("secret");
//!
//! let response = client.http_request(&request);
//! if response.connected && response.status() == Some(200) {
//!     // use response.body
//! }
//! ```

/// HTTP client and its configuration.
pub mod client;

/// Request description and serialization.
pub mod request;

/// Response type and parsing.
pub mod response;

/// Absolute URL splitting.
pub mod url;

pub use client::{Client, Config};
pub use request::{Method, Request, WireRequest};
pub use response::{BodyCleanup, Header, Response};
pub use url::{Scheme, Url};

/// Largest serialized request, including body.
pub const MAX_REQUEST_LEN: usize = 2048;
/// Largest raw response a transport may collect.
pub const MAX_RESPONSE_LEN: usize = 4096;
/// Largest response body.
pub const MAX_BODY_LEN: usize = 2048;
/// Most response headers kept.
pub const MAX_HEADERS: usize = 16;
/// Longest header name.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Longest header value.
pub const MAX_HEADER_VALUE_LEN: usize = 256;
/// Longest HTTP version token.
pub const MAX_VERSION_LEN: usize = 16;
/// Longest status code field.
pub const MAX_STATUS_CODE_LEN: usize = 16;
/// Longest status message.
pub const MAX_STATUS_MESSAGE_LEN: usize = 64;

/// Raw response bytes as collected by a transport.
pub type RawResponse = heapless::Vec<u8, MAX_RESPONSE_LEN>;
