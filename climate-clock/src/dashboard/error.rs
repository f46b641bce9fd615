/// Errors that can occur when building a [`DateTime`](super::DateTime).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeError {
    /// Month outside 1–12, or day outside the days of that month.
    InvalidDate,
    /// Hour, minute or second out of range.
    InvalidTime,
    /// Day-of-week index outside 1–7.
    InvalidWeekday,
    /// Year offset above 99 (only 2000–2099 is representable).
    InvalidYear,
}

impl core::fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            DateTimeError::InvalidDate => write!(f, "invalid day or month"),
            DateTimeError::InvalidTime => write!(f, "invalid hour, minute or second"),
            DateTimeError::InvalidWeekday => write!(f, "invalid day of week (must be 1-7)"),
            DateTimeError::InvalidYear => write!(f, "invalid year offset (must be 0-99)"),
        }
    }
}
