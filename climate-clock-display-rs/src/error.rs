//! Error types for the OLED display driver.

use core::fmt;

/// Errors that can occur during OLED display operations.
#[derive(Debug, PartialEq, Eq)]
pub enum OledError<E> {
    /// Underlying I2C bus error.
    I2c(E),
    /// Display hardware did not respond to initialisation.
    InitializationFailed,
    /// An operation was attempted before [`OledDriver::init()`](crate::OledDriver::init)
    /// was called.
    NotInitialized,
    /// Cursor placed outside the 8 × 16 character grid.
    CursorOutOfRange,
}

impl<E> From<E> for OledError<E> {
    fn from(e: E) -> Self {
        OledError::I2c(e)
    }
}

impl<E: fmt::Debug> fmt::Display for OledError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::I2c(e) => write!(f, "I2C error: {:?}", e),
            OledError::InitializationFailed => write!(f, "Initialization failed"),
            OledError::NotInitialized => write!(f, "Not initialized"),
            OledError::CursorOutOfRange => write!(f, "Cursor out of range"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for OledError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::I2c(_e) => defmt::write!(f, "I2C error"),
            OledError::InitializationFailed => defmt::write!(f, "Initialization failed"),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
            OledError::CursorOutOfRange => defmt::write!(f, "Cursor out of range"),
        }
    }
}
