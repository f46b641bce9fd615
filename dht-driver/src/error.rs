//! Error types for the DHT driver.

use core::fmt;

/// Errors that can occur when reading a DHT sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DhtError<E> {
    /// Underlying GPIO error.
    Pin(E),

    /// The sensor did not answer, or a pulse lasted too long. Usually means
    /// the sensor is unplugged.
    Timeout,

    /// The fifth byte did not match the sum of the first four.
    Checksum,
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for DhtError<E> {
    fn from(error: E) -> Self {
        DhtError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DhtError::Pin(e) => write!(f, "GPIO error: {:?}", e),
            DhtError::Timeout => write!(f, "Sensor did not respond"),
            DhtError::Checksum => write!(f, "Checksum mismatch"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for DhtError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DhtError::Pin(e) => defmt::write!(f, "GPIO error: {}", e),
            DhtError::Timeout => defmt::write!(f, "Sensor did not respond"),
            DhtError::Checksum => defmt::write!(f, "Checksum mismatch"),
        }
    }
}
