//! Traits for the three peripherals the dashboard talks to.
//!
//! All methods are `async` so implementations can sit directly on
//! `embedded-hal-async` buses. The dashboard never retries a failed call;
//! errors are consumed at the call site.

use super::config::ScrollConfig;
use super::datetime::DateTime;

/// A battery-backed real-time clock.
#[allow(async_fn_in_trait)]
pub trait ClockSource {
    type Error;

    /// Read the current calendar and wall-clock time.
    async fn now(&mut self) -> Result<DateTime, Self::Error>;

    /// Set the clock. Only used when provisioning a new board.
    async fn set(&mut self, datetime: &DateTime) -> Result<(), Self::Error>;
}

/// A combined temperature / relative humidity sensor.
///
/// A failed read (sensor missing, checksum error, timeout) is an `Err`.
#[allow(async_fn_in_trait)]
pub trait ClimateSensor {
    type Error;

    /// Temperature in °C.
    async fn read_temperature(&mut self) -> Result<f32, Self::Error>;

    /// Relative humidity in percent.
    async fn read_humidity(&mut self) -> Result<f32, Self::Error>;
}

/// A character-grid display with a text cursor and hardware scrolling.
///
/// Writes may be buffered; nothing is guaranteed to be visible until
/// [`flush`](Self::flush) returns.
#[allow(async_fn_in_trait)]
pub trait CharacterDisplay {
    type Error;

    /// Blank the whole display.
    async fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to a character cell.
    async fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error>;

    /// Write text at the cursor, advancing it. Text past the right edge is
    /// clipped.
    async fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Configure continuous horizontal scrolling over a band of rows.
    async fn set_scroll(&mut self, scroll: ScrollConfig) -> Result<(), Self::Error>;

    /// Start the scroll configured by [`set_scroll`](Self::set_scroll).
    async fn activate_scroll(&mut self) -> Result<(), Self::Error>;

    /// Push buffered writes to the panel.
    async fn flush(&mut self) -> Result<(), Self::Error>;
}
