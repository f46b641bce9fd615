//! Async driver for the DS3231 real-time clock.
//!
//! This crate provides an Embassy-compatible async I2C driver for the
//! Maxim DS3231 temperature-compensated RTC, and implements
//! [`climate_clock::ClockSource`] on top of it.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private) - register-pointer reads and writes.
//! - **[`Ds3231`]** (public) - BCD conversion, 12/24-hour decoding,
//!   validated writes and the oscillator-stop flag.
//!
//! # Quick start
//!
//! ```ignore
//! use ds3231_driver::Ds3231;
//!
//! // Construct with any `embedded-hal-async` I2C implementation
//! let mut rtc = Ds3231::new(i2c);
//!
//! let now = rtc.datetime().await?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** - Enable [`defmt::Format`] implementations on error types
//!   for embedded logging.

#![no_std]

pub use error::RtcError;
pub use registers::DEFAULT_ADDRESS;
pub use rtc::Ds3231;

mod driver;
mod error;
mod registers;
mod rtc;
