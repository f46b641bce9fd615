use super::rows::Row;

/// Grid position of a row's text: character row and starting column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowPosition {
    pub row: u8,
    pub col: u8,
}

impl RowPosition {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Horizontal scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Scroll step interval, in display frames per one-pixel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollSpeed {
    Frames2,
    Frames3,
    Frames4,
    Frames5,
    Frames25,
    Frames64,
    Frames128,
    Frames256,
}

/// Continuous horizontal scroll over a band of character rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollConfig {
    pub direction: ScrollDirection,
    /// First character row of the band (inclusive).
    pub start_row: u8,
    /// Last character row of the band (inclusive).
    pub end_row: u8,
    pub speed: ScrollSpeed,
}

/// Configuration for the dashboard layout and refresh cycle.
///
/// All layout geometry and timing lives here. [`DashboardConfig::default()`]
/// reproduces the stock panel layout (2 s refresh, 3 s banner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Delay between refresh cycles in milliseconds. Default: 2000, the
    /// minimum safe DHT poll interval.
    pub refresh_period_ms: u32,
    /// How long the "sensor detected" banner stays up. Default: 3000.
    pub banner_duration_ms: u32,

    // ── Row placement ────────────────────────────────────────────────
    pub day_of_week: RowPosition,
    pub date: RowPosition,
    pub time: RowPosition,
    pub banner: RowPosition,
    pub temperature: RowPosition,
    pub humidity: RowPosition,

    // ── Scrolling label ──────────────────────────────────────────────
    /// Label text, redrawn every cycle.
    pub scroll_label: &'static str,
    /// Where the label is drawn. Its row is also the scroll band.
    pub scroll_position: RowPosition,
    pub scroll_direction: ScrollDirection,
    pub scroll_speed: ScrollSpeed,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_period_ms: 2000,
            banner_duration_ms: 3000,
            day_of_week: RowPosition::new(2, 0),
            date: RowPosition::new(3, 0),
            time: RowPosition::new(4, 0),
            banner: RowPosition::new(5, 0),
            temperature: RowPosition::new(6, 0),
            humidity: RowPosition::new(7, 0),
            scroll_label: "Saat & Hava",
            scroll_position: RowPosition::new(0, 2),
            scroll_direction: ScrollDirection::Right,
            scroll_speed: ScrollSpeed::Frames5,
        }
    }
}

impl DashboardConfig {
    /// Grid position assigned to a logical row.
    pub fn position(&self, row: Row) -> RowPosition {
        match row {
            Row::DayOfWeek => self.day_of_week,
            Row::Date => self.date,
            Row::Time => self.time,
            Row::Banner => self.banner,
            Row::Temperature => self.temperature,
            Row::Humidity => self.humidity,
        }
    }

    /// Scroll band covering only the label's row.
    pub fn scroll(&self) -> ScrollConfig {
        ScrollConfig {
            direction: self.scroll_direction,
            start_row: self.scroll_position.row,
            end_row: self.scroll_position.row,
            speed: self.scroll_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::GRID_ROWS;

    #[test]
    fn default_timing() {
        let c = DashboardConfig::default();
        assert_eq!(c.refresh_period_ms, 2000);
        assert_eq!(c.banner_duration_ms, 3000);
    }

    #[test]
    fn default_rows_are_distinct_and_on_grid() {
        let c = DashboardConfig::default();
        let mut used = [false; GRID_ROWS as usize];
        used[c.scroll_position.row as usize] = true;

        for row in Row::ALL {
            let pos = c.position(row);
            assert!(pos.row < GRID_ROWS);
            assert!(!used[pos.row as usize], "{:?} overlaps another row", row);
            used[pos.row as usize] = true;
        }
    }

    #[test]
    fn scroll_band_is_label_row() {
        let c = DashboardConfig::default();
        let scroll = c.scroll();
        assert_eq!(scroll.start_row, c.scroll_position.row);
        assert_eq!(scroll.end_row, c.scroll_position.row);
        assert_eq!(scroll.direction, ScrollDirection::Right);
    }
}
