//! Error types for the RTC driver.

use core::fmt;

/// Errors that can occur when communicating with the DS3231.
#[derive(Debug)]
pub enum RtcError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// Timestamp rejected before it was written to the chip.
    InvalidDateTime,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for RtcError<E> {
    fn from(error: E) -> Self {
        RtcError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for RtcError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RtcError::I2c(e) => write!(f, "I2C error: {:?}", e),
            RtcError::InvalidDateTime => write!(f, "Invalid date/time"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for RtcError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RtcError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            RtcError::InvalidDateTime => defmt::write!(f, "Invalid date/time"),
        }
    }
}
