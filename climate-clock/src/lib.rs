//! Dashboard state for a clock + climate character display.
//!
//! The [`dashboard`] module holds everything that decides *what* the display
//! shows and *when* a row has to be redrawn. It talks to the hardware only
//! through the traits in [`dashboard::peripherals`], so the whole refresh
//! cycle can be exercised on the host.
//!
//! # Crate Features
//!
//! - **`defmt`** - structured logging via [`defmt`].

#![no_std]

pub mod dashboard;

pub use dashboard::{
    CharacterDisplay, ClimateSensor, ClockSource, ConnectionTracker, Dashboard,
    DashboardConfig, DateTime, DateTimeError, RefreshOutcome, Row, RowCache, RowPosition,
    RowText, ScrollConfig, ScrollDirection, ScrollSpeed,
};
