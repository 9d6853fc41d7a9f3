//! System utilities for embedded devices.
//!
//! This module provides the system-level services the network layer leans
//! on. It focuses on providing lightweight, `no_std` compatible interfaces
//! that each platform fills in with its own hardware.
//!
//! # Available Utilities
//!
//! - **[`clock`]**: Millisecond time source and deadlines for bounded waits
//!
//! # Usage
//!
//! ```rust
//! use iotfetch::system::clock::{Clock, Deadline};
//!
//! struct TickCounter(u64);
//!
//! impl Clock for TickCounter {
//!     fn now_ms(&mut self) -> u64 {
//!         self.0 += 1;
//!         self.0
//!     }
//! }
//!
//! let mut clock = TickCounter(0);
//! let deadline = Deadline::after(&mut clock, 5);
//! assert!(!deadline.has_elapsed(&mut clock));
//! ```

/// Time source and deadline tracking.
///
/// Every blocking wait in the crate polls a [`Clock`](clock::Clock) against a
/// [`Deadline`](clock::Deadline) computed once at the start of the wait.
pub mod clock;
