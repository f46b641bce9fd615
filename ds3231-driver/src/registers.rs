//! DS3231 register map.
//!
//! Timekeeping registers hold packed BCD. The clock is read and written as
//! one burst starting at [`SECONDS`]; the chip auto-increments the register
//! pointer.

// ---------------------------------------------------------------------------
// Timekeeping registers
// ---------------------------------------------------------------------------

/// Seconds, 00–59 BCD. First register of the time burst.
pub const SECONDS: u8 = 0x00;

/// Number of timekeeping registers, seconds through year.
pub const TIME_REGISTER_COUNT: usize = 7;

/// Offsets within the time burst.
pub const OFFSET_SECONDS: usize = 0;
pub const OFFSET_MINUTES: usize = 1;
pub const OFFSET_HOURS: usize = 2;
pub const OFFSET_WEEKDAY: usize = 3;
pub const OFFSET_DATE: usize = 4;
pub const OFFSET_MONTH: usize = 5;
pub const OFFSET_YEAR: usize = 6;

// ---------------------------------------------------------------------------
// Hours register bits
// ---------------------------------------------------------------------------

/// Set when the hours register is in 12-hour mode.
pub const HOURS_12H_MODE: u8 = 0x40;

/// In 12-hour mode: set for PM.
pub const HOURS_PM: u8 = 0x20;

// ---------------------------------------------------------------------------
// Month register bits
// ---------------------------------------------------------------------------

/// Century bit, toggled when the year rolls over from 99 to 00.
pub const MONTH_CENTURY: u8 = 0x80;

// ---------------------------------------------------------------------------
// Control / status
// ---------------------------------------------------------------------------

/// Status register.
pub const STATUS: u8 = 0x0F;

/// Oscillator Stop Flag. Set when the oscillator stopped at some point,
/// e.g. the backup battery ran flat; the time is then unreliable.
pub const STATUS_OSF: u8 = 0x80;

// ---------------------------------------------------------------------------
// Bus
// ---------------------------------------------------------------------------

/// Fixed 7-bit I2C address of the DS3231.
pub const DEFAULT_ADDRESS: u8 = 0x68;
