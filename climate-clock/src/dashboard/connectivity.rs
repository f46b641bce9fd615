//! Sensor connectivity tracking for the transient "sensor detected" banner.

/// Tracks sensor connectivity across refresh cycles.
///
/// Timestamps are milliseconds from a free-running `u32` counter that wraps
/// after ~49.7 days. Elapsed time is always computed with
/// [`u32::wrapping_sub`], so the banner window stays correct across the wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionTracker {
    connected: bool,
    was_connected: bool,
    connected_at_ms: u32,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this cycle's connectivity result.
    ///
    /// Returns `true` on a false→true transition, which restarts the banner
    /// window at `now_ms`. A disconnected cycle re-arms the transition so the
    /// next reconnect shows the banner again.
    pub fn observe(&mut self, connected: bool, now_ms: u32) -> bool {
        self.connected = connected;

        if !connected {
            self.was_connected = false;
            return false;
        }

        if !self.was_connected {
            self.was_connected = true;
            self.connected_at_ms = now_ms;
            return true;
        }

        false
    }

    /// Whether the last observed cycle was connected.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Milliseconds since the last false→true transition.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.connected_at_ms)
    }

    /// `true` while connected and strictly less than `window_ms` has passed
    /// since the sensor connected.
    pub fn banner_visible(&self, now_ms: u32, window_ms: u32) -> bool {
        self.connected && self.elapsed_ms(now_ms) < window_ms
    }
}
