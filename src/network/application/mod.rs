//! # Application Layer Network Protocols
//!
//! This module contains the application layer (OSI Layer 7) side of a
//! request: building the HTTP/1.1 message, handing it to a
//! [`Transport`](crate::network::transport::Transport), and parsing what
//! comes back.
//!
//! ## Design Principles
//!
//! - **Transport Agnostic**: The same client drives a socket or a serial
//!   radio module
//! - **No-std Compatible**: Designed for embedded systems without heap allocation
//! - **Resource Conscious**: Use fixed-size buffers and minimal memory
//! - **One request at a time**: Every call is a single blocking cycle bounded
//!   by a deadline
//!
//! ## Usage Pattern
//!
//! 1. Pick a transport for your hardware
//! 2. Wrap it with [`http::Client`]
//! 3. Call [`http::Client::http_request`] and inspect the [`http::Response`]

/// HTTP client implementation.
///
/// Provides a simple HTTP/1.1 client suitable for embedded systems,
/// supporting GET and POST requests against JSON APIs.
pub mod http;
