//! Clock and climate dashboard with dirty-row redraws.
//!
//! This module provides the [`Dashboard`] data structure that owns all
//! state carried between refresh cycles: the per-row text cache, the sensor
//! connectivity tracker and the layout configuration.
//!
//! # Layout
//!
//! The display is an 8 row × 16 column character grid. Each logical
//! [`Row`] is pinned to a fixed grid position by [`DashboardConfig`]:
//!
//! ```text
//! row 0  [ scrolling label ]
//! row 2  Prsmb
//! row 3  08/05/2025
//! row 4  22:15:00
//! row 5  Sensor bulundu     (only for 3 s after the sensor connects)
//! row 6  Sicaklik: 23.4 C
//! row 7  Nem: 45.0%
//! ```
//!
//! # Change Tracking
//!
//! Every refresh formats each row from scratch and compares the result with
//! the text last written to that row ([`RowCache`]). Only rows whose text
//! differs are blanked and rewritten. This avoids the visible flicker of
//! full-screen redraws on a slow I2C OLED.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Row text lives in fixed-capacity
//! [`heapless::String`]s. The optional `defmt` feature enables structured
//! logging for embedded targets.

mod config;
mod connectivity;
mod datetime;
mod error;
mod format;
pub mod peripherals;
mod refresh;
mod rows;

pub use config::{DashboardConfig, RowPosition, ScrollConfig, ScrollDirection, ScrollSpeed};
pub use connectivity::ConnectionTracker;
pub use datetime::DateTime;
pub use error::DateTimeError;
pub use format::{
    banner_text, day_name, format_date, format_day, format_humidity, format_temperature,
    format_time,
};
pub use peripherals::{CharacterDisplay, ClimateSensor, ClockSource};
pub use rows::{Row, RowCache, RowText};
pub use refresh::{Dashboard, RefreshOutcome};

/// Number of character rows on the display.
pub const GRID_ROWS: u8 = 8;

/// Number of character columns on the display.
pub const GRID_COLUMNS: u8 = 16;

/// A full-width blank line, written to erase a row.
pub const BLANK_ROW: &str = "                ";

/// Day-of-week abbreviations, indexed by `weekday - 1` (1 = Monday).
pub const DAY_NAMES: [&str; 7] = ["Pzrts", "Sali", "Crsmb", "Prsmb", "Cuma", "Cmrts", "Pazar"];

/// Placeholder for a day-of-week index outside 1–7.
pub const UNKNOWN_DAY: &str = "Unknown";

/// Text shown on the banner row right after the sensor connects.
pub const SENSOR_DETECTED_TEXT: &str = "Sensor bulundu";
