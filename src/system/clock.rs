//! Monotonic millisecond clock and deadlines.

/// A monotonic millisecond time source.
///
/// On a microcontroller this usually wraps a hardware timer or the HAL's
/// `Instant`. The origin is arbitrary; only differences matter.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary, fixed origin.
    fn now_ms(&mut self) -> u64;
}

/// A point in time after which a wait must give up.
///
/// Deadlines are total budgets, not inactivity timers: a link that keeps
/// producing bytes is still cut off once the deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: u64,
}

impl Deadline {
    /// A deadline `timeout_ms` after the clock's current time.
    pub fn after<C: Clock>(clock: &mut C, timeout_ms: u32) -> Self {
        Self {
            expires_at: clock.now_ms().saturating_add(u64::from(timeout_ms)),
        }
    }

    /// Whether the deadline has been reached. A zero timeout is elapsed
    /// immediately.
    pub fn has_elapsed<C: Clock>(&self, clock: &mut C) -> bool {
        clock.now_ms() >= self.expires_at
    }
}

/// A [`Clock`] backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// A clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
