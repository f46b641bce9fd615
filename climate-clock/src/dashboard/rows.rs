//! Logical display rows and the per-row text cache.

use heapless::String;

/// Text rendered on one row.
///
/// Sized above the 16-column grid so that an over-long reading such as
/// `Sicaklik: -10.5 C` is formatted completely; the display clips it.
pub type RowText = String<24>;

/// Number of logical rows tracked by the [`RowCache`].
pub const ROW_COUNT: usize = 6;

/// A logical dashboard row with change tracking.
///
/// The scrolling label is deliberately absent: it is redrawn every cycle
/// and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    DayOfWeek,
    Date,
    Time,
    Banner,
    Temperature,
    Humidity,
}

impl Row {
    /// Every row, in drawing order.
    pub const ALL: [Row; ROW_COUNT] = [
        Row::DayOfWeek,
        Row::Date,
        Row::Time,
        Row::Banner,
        Row::Temperature,
        Row::Humidity,
    ];

    /// Rows that only carry meaning while the sensor is connected.
    pub const SENSOR_ROWS: [Row; 3] = [Row::Banner, Row::Temperature, Row::Humidity];

    fn index(self) -> usize {
        match self {
            Row::DayOfWeek => 0,
            Row::Date => 1,
            Row::Time => 2,
            Row::Banner => 3,
            Row::Temperature => 4,
            Row::Humidity => 5,
        }
    }
}

/// Snapshot of the text last written to each logical row.
///
/// Invariant: the cached text for a row equals what is physically on that
/// row. Callers store into the cache only after the display write succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCache {
    lines: [RowText; ROW_COUNT],
}

impl RowCache {
    /// An empty cache; every row is considered blank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text last written to `row` (`""` if blank).
    pub fn get(&self, row: Row) -> &str {
        self.lines[row.index()].as_str()
    }

    /// Returns `true` if `text` differs from what `row` currently shows.
    pub fn is_stale(&self, row: Row, text: &str) -> bool {
        self.get(row) != text
    }

    /// Returns `true` if `row` currently shows nothing.
    pub fn is_blank(&self, row: Row) -> bool {
        self.lines[row.index()].is_empty()
    }

    /// Record that `row` now shows `text`.
    pub fn store(&mut self, row: Row, text: &RowText) {
        self.lines[row.index()] = text.clone();
    }

    /// Record that `row` has been blanked.
    pub fn clear(&mut self, row: Row) {
        self.lines[row.index()].clear();
    }
}
