use super::error::DateTimeError;

/// Calendar and wall-clock fields as stored by the real-time clock.
///
/// Fields are public because the clock hands back whatever its registers
/// hold; a corrupted day-of-week is still a readable [`DateTime`] and is
/// rendered as a placeholder rather than rejected. Use [`DateTime::new`]
/// when building a value to *write* to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Day of month, 1–31.
    pub day: u8,
    /// Month, 1–12.
    pub month: u8,
    /// Years since 2000, 0–99.
    pub year_offset: u8,
    /// Hour, 0–23.
    pub hour: u8,
    /// Minute, 0–59.
    pub minute: u8,
    /// Second, 0–59.
    pub second: u8,
    /// Day of week, 1–7 with 1 = Monday.
    pub weekday: u8,
}

impl DateTime {
    /// Build a validated timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use climate_clock::{DateTime, DateTimeError};
    ///
    /// let dt = DateTime::new(2025, 5, 8, 22, 15, 0, 4).unwrap();
    /// assert_eq!(dt.year_offset, 25);
    /// assert_eq!(dt.year(), 2025);
    ///
    /// assert_eq!(
    ///     DateTime::new(2025, 2, 30, 0, 0, 0, 1),
    ///     Err(DateTimeError::InvalidDate)
    /// );
    /// ```
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        weekday: u8,
    ) -> Result<Self, DateTimeError> {
        if !(2000..=2099).contains(&year) {
            return Err(DateTimeError::InvalidYear);
        }
        let dt = Self {
            day,
            month,
            year_offset: (year - 2000) as u8,
            hour,
            minute,
            second,
            weekday,
        };
        dt.validate()?;
        Ok(dt)
    }

    /// Full four-digit year.
    pub fn year(&self) -> u16 {
        2000 + self.year_offset as u16
    }

    /// Check every field against its calendar range.
    pub fn validate(&self) -> Result<(), DateTimeError> {
        if self.year_offset > 99 {
            return Err(DateTimeError::InvalidYear);
        }
        if !(1..=12).contains(&self.month) || self.day == 0 || self.day > self.days_in_month() {
            return Err(DateTimeError::InvalidDate);
        }
        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return Err(DateTimeError::InvalidTime);
        }
        if !(1..=7).contains(&self.weekday) {
            return Err(DateTimeError::InvalidWeekday);
        }
        Ok(())
    }

    fn days_in_month(&self) -> u8 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            // Every year in 2000–2099 divisible by 4 is a leap year.
            2 if self.year_offset % 4 == 0 => 29,
            2 => 28,
            _ => 31,
        }
    }
}
