//! Text formatting for each dashboard row.
//!
//! Every function returns a fresh [`RowText`] so the result can be compared
//! directly against the [`RowCache`](super::RowCache).

use core::fmt::Write;

use super::datetime::DateTime;
use super::rows::RowText;
use super::{DAY_NAMES, SENSOR_DETECTED_TEXT, UNKNOWN_DAY};

/// `DD/MM/YYYY`, zero padded, with `YYYY = 2000 + year_offset`.
///
/// ```
/// use climate_clock::{dashboard::format_date, DateTime};
///
/// let dt = DateTime { day: 8, month: 5, year_offset: 25, ..DateTime::default() };
/// assert_eq!(format_date(&dt), "08/05/2025");
/// ```
pub fn format_date(dt: &DateTime) -> RowText {
    let mut text = RowText::new();
    // 10 characters always fit in a RowText.
    let _ = write!(text, "{:02}/{:02}/{:04}", dt.day, dt.month, dt.year());
    text
}

/// `HH:MM:SS`, zero padded.
pub fn format_time(dt: &DateTime) -> RowText {
    let mut text = RowText::new();
    let _ = write!(text, "{:02}:{:02}:{:02}", dt.hour, dt.minute, dt.second);
    text
}

/// Day-of-week abbreviation for an index 1–7 (1 = Monday).
///
/// Any other index yields `"Unknown"`.
pub fn day_name(weekday: u8) -> &'static str {
    match weekday {
        1..=7 => DAY_NAMES[weekday as usize - 1],
        _ => UNKNOWN_DAY,
    }
}

/// Day row text: [`day_name`] for `weekday`.
pub fn format_day(weekday: u8) -> RowText {
    let mut text = RowText::new();
    // The longest name is 7 characters.
    let _ = text.push_str(day_name(weekday));
    text
}

/// Banner row text: the detection message while visible, otherwise empty.
pub fn banner_text(visible: bool) -> RowText {
    let mut text = RowText::new();
    if visible {
        let _ = text.push_str(SENSOR_DETECTED_TEXT);
    }
    text
}

/// `Sicaklik: X.X C` with one decimal.
pub fn format_temperature(celsius: f32) -> RowText {
    let mut text = RowText::new();
    let _ = write!(text, "Sicaklik: {:.1} C", celsius);
    text
}

/// `Nem: X.X%` with one decimal.
pub fn format_humidity(percent: f32) -> RowText {
    let mut text = RowText::new();
    let _ = write!(text, "Nem: {:.1}%", percent);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(day: u8, month: u8, year_offset: u8, hour: u8, minute: u8, second: u8) -> DateTime {
        DateTime {
            day,
            month,
            year_offset,
            hour,
            minute,
            second,
            weekday: 1,
        }
    }

    #[test]
    fn date_is_zero_padded() {
        assert_eq!(format_date(&reading(1, 2, 3, 0, 0, 0)), "01/02/2003");
        assert_eq!(format_date(&reading(31, 12, 99, 0, 0, 0)), "31/12/2099");
        assert_eq!(format_date(&reading(15, 10, 0, 0, 0, 0)), "15/10/2000");
    }

    #[test]
    fn time_is_zero_padded() {
        assert_eq!(format_time(&reading(1, 1, 0, 0, 0, 0)), "00:00:00");
        assert_eq!(format_time(&reading(1, 1, 0, 9, 5, 7)), "09:05:07");
        assert_eq!(format_time(&reading(1, 1, 0, 23, 59, 59)), "23:59:59");
    }

    #[test]
    fn every_valid_time_has_fixed_shape() {
        for hour in 0..24 {
            for minute in [0, 9, 10, 59] {
                let text = format_time(&reading(1, 1, 0, hour, minute, 30));
                let bytes = text.as_bytes();
                assert_eq!(bytes.len(), 8);
                assert_eq!(bytes[2], b':');
                assert_eq!(bytes[5], b':');
            }
        }
    }

    #[test]
    fn day_names_map_one_to_seven() {
        assert_eq!(day_name(1), "Pzrts");
        assert_eq!(day_name(2), "Sali");
        assert_eq!(day_name(3), "Crsmb");
        assert_eq!(day_name(4), "Prsmb");
        assert_eq!(day_name(5), "Cuma");
        assert_eq!(day_name(6), "Cmrts");
        assert_eq!(day_name(7), "Pazar");
    }

    #[test]
    fn out_of_range_day_is_unknown() {
        assert_eq!(day_name(0), "Unknown");
        assert_eq!(day_name(8), "Unknown");
        assert_eq!(day_name(255), "Unknown");
    }

    #[test]
    fn day_row_holds_the_name() {
        assert_eq!(format_day(4), "Prsmb");
        assert_eq!(format_day(7), "Pazar");
        assert_eq!(format_day(0), "Unknown");
    }

    #[test]
    fn end_to_end_reading() {
        let dt = DateTime {
            day: 8,
            month: 5,
            year_offset: 25,
            hour: 22,
            minute: 15,
            second: 0,
            weekday: 4,
        };
        assert_eq!(format_date(&dt), "08/05/2025");
        assert_eq!(format_time(&dt), "22:15:00");
        assert_eq!(day_name(dt.weekday), "Prsmb");
    }

    #[test]
    fn banner_text_follows_visibility() {
        assert_eq!(banner_text(true), "Sensor bulundu");
        assert!(banner_text(false).is_empty());
    }

    #[test]
    fn climate_values_have_one_decimal() {
        assert_eq!(format_temperature(23.44), "Sicaklik: 23.4 C");
        assert_eq!(format_temperature(0.0), "Sicaklik: 0.0 C");
        assert_eq!(format_humidity(45.0), "Nem: 45.0%");
        assert_eq!(format_humidity(100.0), "Nem: 100.0%");
    }

    #[test]
    fn negative_temperature_is_formatted_in_full() {
        assert_eq!(format_temperature(-10.5), "Sicaklik: -10.5 C");
    }
}
