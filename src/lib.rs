//! # iotfetch - JSON API requests for microcontrollers
//!
//! A Rust library that lets a resource-constrained device call a remote
//! JSON API over HTTP(S) and get back a parsed response. The request can
//! travel over the board's own socket stack or through a companion radio
//! module (ESP8266 style AT firmware) on a serial link. This library is
//! designed for embedded systems and supports `no_std` environments.
//!
//! ## Features
//!
//! ### HTTP
//! - **Request building**: HTTP/1.1 messages with `Host`, `User-Agent`,
//!   `Connection: close`, content length, content type and bearer auth
//! - **Response parsing**: status line, ordered headers, body
//! - **JSON**: body cleanup for noisy links and `serde-json-core` decoding
//!
//! ### Transports
//! - **Direct**: any socket exposed through [`network::Connect`]
//! - **Relay**: an AT-command radio module, with acknowledgment matching
//!   and `+IPD` frame decoding
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! iotfetch = "0.1.0"
//! ```
//!
//! ### Relay Example
//!
//! ```rust,no_run
//! use iotfetch::network::application::http::{Client, Request};
//! use iotfetch::network::transport::RelayTransport;
//! # use iotfetch::system::clock::Clock;
//! # struct Uart;
//! # impl iotfetch::network::Read for Uart {
//! #     type Error = iotfetch::network::error::Error;
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl iotfetch::network::Write for Uart {
//! #     type Error = iotfetch::network::error::Error;
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Timer;
//! # impl Clock for Timer {
//! #     fn now_ms(&mut self) -> u64 { 0 }
//! # }
//!
//! let transport = RelayTransport::new(Uart, Timer);
//! let mut client = Client::new(transport);
//!
//! let response = client.http_request(&Request::get("https://api.example.com/v1/status"));
//! if response.connected && response.status() == Some(200) {
//!     // response.body holds the JSON document
//! }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, Xtensa, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support, including `StdClock` (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Network abstraction layer providing link traits, transports and the HTTP client.
///
/// This module contains the byte-link traits a board implements, the two
/// request transports built on them, and the HTTP/1.1 application layer.
pub mod network;

/// System utilities for embedded devices.
///
/// Contains the clock and deadline types every bounded wait relies on.
pub mod system;
