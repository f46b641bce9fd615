//! Bit-banged driver for DHT11 / DHT22 humidity and temperature sensors.
//!
//! The DHT family talks a single-wire, pulse-width-coded protocol on an
//! open-drain line with a pull-up. [`Dht`] drives the start handshake,
//! samples the 40-bit answer and decodes it according to [`DhtKind`].
//!
//! # Quick start
//!
//! ```ignore
//! use dht_driver::{Dht, DhtKind};
//!
//! // `pin` is an open-drain GPIO implementing `InputPin + OutputPin`,
//! // `delay` any `embedded_hal::delay::DelayNs`.
//! let mut dht = Dht::new(pin, delay, DhtKind::Dht22);
//!
//! let reading = dht.measure()?;
//! ```
//!
//! [`CachedDht`] wraps a sensor as a [`climate_clock::ClimateSensor`],
//! reusing one measurement for both values within the sensor's minimum
//! sampling interval.
//!
//! The read is timing-critical and blocks for about 5 ms plus the start
//! pulse. Run it with interrupts that cannot stretch a pulse by tens of
//! microseconds.
//!
//! # Features
//!
//! - **`defmt`** - Enable [`defmt::Format`] implementations on error types
//!   for embedded logging.

#![no_std]

pub use dht::{Dht, DhtKind, Measurement};
pub use error::DhtError;
pub use sensor::CachedDht;

mod dht;
mod error;
mod sensor;
