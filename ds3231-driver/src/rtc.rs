//! High-level interface for the DS3231 real-time clock.
//!
//! [`Ds3231`] wraps the low-level register driver with BCD conversion,
//! 12/24-hour decoding, timestamp validation and the oscillator-stop flag.

use embedded_hal_async::i2c::I2c;

use climate_clock::{ClockSource, DateTime};

use crate::driver::RegisterDriver;
use crate::error::RtcError;
use crate::registers::{
    DEFAULT_ADDRESS, HOURS_12H_MODE, HOURS_PM, OFFSET_DATE, OFFSET_HOURS, OFFSET_MINUTES,
    OFFSET_MONTH, OFFSET_SECONDS, OFFSET_WEEKDAY, OFFSET_YEAR, SECONDS, STATUS, STATUS_OSF,
    TIME_REGISTER_COUNT,
};

/// High-level interface for the DS3231.
///
/// # Example
///
/// ```ignore
/// use ds3231_driver::Ds3231;
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut rtc = Ds3231::new(i2c);
///
/// if rtc.oscillator_stopped().await? {
///     // Time is stale: the backup battery ran out.
/// }
/// let now = rtc.datetime().await?;
/// ```
pub struct Ds3231<I2C> {
    driver: RegisterDriver<I2C>,
}

impl<I2C> Ds3231<I2C>
where
    I2C: I2c,
{
    /// Create a new RTC interface. No I2C traffic is generated.
    pub fn new(i2c: I2C) -> Self {
        Self {
            driver: RegisterDriver::new(i2c, DEFAULT_ADDRESS),
        }
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Timekeeping
    // -----------------------------------------------------------------------

    /// Read the current date and time in one burst.
    ///
    /// Register contents are decoded as-is; an out-of-range field (e.g. a
    /// weekday of 0 on a never-set chip) is passed through for the caller
    /// to render.
    ///
    /// # Errors
    /// * [`RtcError::I2c`] on communication failure
    pub async fn datetime(&mut self) -> Result<DateTime, RtcError<I2C::Error>> {
        let mut regs = [0u8; TIME_REGISTER_COUNT];
        self.driver.read_registers(SECONDS, &mut regs).await?;
        Ok(decode_datetime(&regs))
    }

    /// Set the date and time. Hours are always written in 24-hour mode.
    ///
    /// # Errors
    /// * [`RtcError::InvalidDateTime`] if any field is out of range
    /// * [`RtcError::I2c`] on communication failure
    pub async fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), RtcError<I2C::Error>> {
        datetime.validate().map_err(|_| RtcError::InvalidDateTime)?;
        let regs = encode_datetime(datetime);
        self.driver.write_registers(SECONDS, &regs).await
    }

    // -----------------------------------------------------------------------
    // Oscillator status
    // -----------------------------------------------------------------------

    /// Returns `true` if the oscillator has stopped since the flag was last
    /// cleared, meaning the kept time cannot be trusted.
    pub async fn oscillator_stopped(&mut self) -> Result<bool, RtcError<I2C::Error>> {
        let status = self.driver.read_u8(STATUS).await?;
        Ok(status & STATUS_OSF != 0)
    }

    /// Clear the oscillator-stop flag, typically right after setting the time.
    pub async fn clear_oscillator_flag(&mut self) -> Result<(), RtcError<I2C::Error>> {
        let status = self.driver.read_u8(STATUS).await?;
        self.driver.write_u8(STATUS, status & !STATUS_OSF).await
    }
}

impl<I2C> ClockSource for Ds3231<I2C>
where
    I2C: I2c,
{
    type Error = RtcError<I2C::Error>;

    async fn now(&mut self) -> Result<DateTime, Self::Error> {
        self.datetime().await
    }

    async fn set(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        self.set_datetime(datetime).await?;
        self.clear_oscillator_flag().await
    }
}

// ---------------------------------------------------------------------------
// Register encoding
// ---------------------------------------------------------------------------

fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}

fn decode_hours(reg: u8) -> u8 {
    if reg & HOURS_12H_MODE != 0 {
        // 12 AM is midnight, 12 PM is noon.
        let hour = bcd_to_bin(reg & 0x1F) % 12;
        if reg & HOURS_PM != 0 {
            hour + 12
        } else {
            hour
        }
    } else {
        bcd_to_bin(reg & 0x3F)
    }
}

/// Decode the seven timekeeping registers. The century bit is ignored;
/// years are always 2000–2099.
fn decode_datetime(regs: &[u8; TIME_REGISTER_COUNT]) -> DateTime {
    DateTime {
        second: bcd_to_bin(regs[OFFSET_SECONDS] & 0x7F),
        minute: bcd_to_bin(regs[OFFSET_MINUTES] & 0x7F),
        hour: decode_hours(regs[OFFSET_HOURS]),
        weekday: regs[OFFSET_WEEKDAY] & 0x07,
        day: bcd_to_bin(regs[OFFSET_DATE] & 0x3F),
        month: bcd_to_bin(regs[OFFSET_MONTH] & 0x1F),
        year_offset: bcd_to_bin(regs[OFFSET_YEAR]),
    }
}

fn encode_datetime(datetime: &DateTime) -> [u8; TIME_REGISTER_COUNT] {
    let mut regs = [0u8; TIME_REGISTER_COUNT];
    regs[OFFSET_SECONDS] = bin_to_bcd(datetime.second);
    regs[OFFSET_MINUTES] = bin_to_bcd(datetime.minute);
    regs[OFFSET_HOURS] = bin_to_bcd(datetime.hour);
    regs[OFFSET_WEEKDAY] = datetime.weekday;
    regs[OFFSET_DATE] = bin_to_bcd(datetime.day);
    regs[OFFSET_MONTH] = bin_to_bcd(datetime.month);
    regs[OFFSET_YEAR] = bin_to_bcd(datetime.year_offset);
    regs
}
