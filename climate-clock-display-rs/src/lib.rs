//! Async SSD1306 (128×64) character-grid driver using Embassy.
//!
//! This crate provides [`OledDriver`], an 8 × 16 text grid over async I2C
//! implementing [`climate_clock::CharacterDisplay`], and, with the `task`
//! feature, [`dashboard_task`], the periodic loop that drives a
//! [`climate_clock::Dashboard`] on real hardware.
//!
//! # Quick Start
//!
//! ```ignore
//! use climate_clock::DashboardConfig;
//! use climate_clock_display_rs::{dashboard_task, OledDriver};
//!
//! // In your Embassy main:
//! let oled = OledDriver::new(i2c_oled, 0x3C);
//! spawner.spawn(dashboard(oled, rtc, dht, DashboardConfig::default())).unwrap();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn dashboard(
//!     driver: OledDriver<MyI2cType>,
//!     clock: Ds3231<MyI2cType>,
//!     sensor: MySensor,
//!     config: DashboardConfig,
//! ) {
//!     dashboard_task(driver, clock, sensor, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** - structured logging via [`defmt`].
//! - **`task`** - [`dashboard_task`], which needs `embassy-time`.

#![no_std]

#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod framebuffer;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use display_task::dashboard_task;
pub use driver::OledDriver;
pub use error::OledError;
pub use framebuffer::FrameBuffer;
