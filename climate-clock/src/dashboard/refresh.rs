use super::config::DashboardConfig;
use super::connectivity::ConnectionTracker;
use super::format::{
    banner_text, format_date, format_day, format_humidity, format_temperature, format_time,
};
use super::peripherals::{CharacterDisplay, ClimateSensor, ClockSource};
use super::rows::{Row, RowCache, RowText};
use super::BLANK_ROW;

/// What one refresh cycle did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshOutcome {
    /// Sensor connectivity observed this cycle.
    pub connected: bool,
    /// `false` if the clock read failed and the time rows were left alone.
    pub clock_read: bool,
    /// Rows rewritten because their text changed (the scroll label excluded).
    pub rows_redrawn: u8,
    /// Sensor rows blanked because the sensor went away.
    pub rows_blanked: u8,
}

/// All state carried between refresh cycles.
///
/// Owns the [`RowCache`], the [`ConnectionTracker`] and the layout
/// configuration. The peripherals are borrowed per call, so the same
/// dashboard can be driven by hardware or by test fakes.
///
/// # Cycle
///
/// [`refresh()`](Self::refresh) runs one cycle:
///
/// 1. Probe the sensor (humidity, then temperature). Connected iff at
///    least one read succeeds.
/// 2. Update the connection tracker (restarts the banner window on a
///    false→true transition).
/// 3. Read the clock and redraw the day, date and time rows if changed.
/// 4. Redraw the banner row if changed.
/// 5. Connected: re-read both values (a failure shows 0) and redraw the
///    climate rows if changed. Disconnected: blank the banner and climate
///    rows that still show something.
/// 6. Redraw the scrolling label, flush, then re-arm the hardware scroll.
pub struct Dashboard {
    config: DashboardConfig,
    cache: RowCache,
    tracker: ConnectionTracker,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl Dashboard {
    /// Create a dashboard with an empty cache and a disconnected sensor.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: RowCache::new(),
            tracker: ConnectionTracker::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Text currently shown on each row.
    pub fn cache(&self) -> &RowCache {
        &self.cache
    }

    pub fn tracker(&self) -> &ConnectionTracker {
        &self.tracker
    }

    /// Blank the display and forget everything drawn so far.
    ///
    /// Call once after the display is initialised; the next
    /// [`refresh()`](Self::refresh) then draws every row.
    pub async fn reset<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: CharacterDisplay,
    {
        display.clear().await?;
        display.flush().await?;
        self.cache = RowCache::new();
        Ok(())
    }

    /// Run one refresh cycle at time `now_ms` (wrapping millisecond counter).
    ///
    /// Sensor and clock failures are absorbed here. Only display errors are
    /// returned; rows whose write failed keep their old cache entry and are
    /// retried on the next cycle.
    pub async fn refresh<C, S, D>(
        &mut self,
        clock: &mut C,
        sensor: &mut S,
        display: &mut D,
        now_ms: u32,
    ) -> Result<RefreshOutcome, D::Error>
    where
        C: ClockSource,
        S: ClimateSensor,
        D: CharacterDisplay,
    {
        let mut outcome = RefreshOutcome::default();

        // ── Step 1: connectivity probe ───────────────────────────────
        let humidity_ok = sensor.read_humidity().await.is_ok();
        let temperature_ok = sensor.read_temperature().await.is_ok();
        let connected = humidity_ok || temperature_ok;
        outcome.connected = connected;

        // ── Step 2: transition tracking ──────────────────────────────
        let was_connected = self.tracker.is_connected();
        if self.tracker.observe(connected, now_ms) {
            #[cfg(feature = "defmt")]
            defmt::info!("Sensor connected at {} ms", now_ms);
        } else if was_connected && !connected {
            #[cfg(feature = "defmt")]
            defmt::warn!("Sensor disconnected");
        }

        // ── Step 3: clock rows ───────────────────────────────────────
        match clock.now().await {
            Ok(now) => {
                outcome.clock_read = true;
                let day = format_day(now.weekday);
                self.redraw(display, Row::DayOfWeek, &day, &mut outcome).await?;
                self.redraw(display, Row::Date, &format_date(&now), &mut outcome).await?;
                self.redraw(display, Row::Time, &format_time(&now), &mut outcome).await?;
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Clock read failed; keeping previous time");
            }
        }

        // ── Step 4: banner row ───────────────────────────────────────
        let banner = banner_text(
            self.tracker
                .banner_visible(now_ms, self.config.banner_duration_ms),
        );
        self.redraw(display, Row::Banner, &banner, &mut outcome).await?;

        // ── Step 5: climate rows ─────────────────────────────────────
        if connected {
            // The second read is the displayed one; a failure here shows 0.
            let temperature = sensor.read_temperature().await.unwrap_or_else(|_| {
                #[cfg(feature = "defmt")]
                defmt::warn!("Temperature read failed");
                0.0
            });
            let humidity = sensor.read_humidity().await.unwrap_or_else(|_| {
                #[cfg(feature = "defmt")]
                defmt::warn!("Humidity read failed");
                0.0
            });

            #[cfg(feature = "defmt")]
            defmt::info!("Temperature: {} C, humidity: {} %", temperature, humidity);

            let temperature = format_temperature(temperature);
            let humidity = format_humidity(humidity);
            self.redraw(display, Row::Temperature, &temperature, &mut outcome).await?;
            self.redraw(display, Row::Humidity, &humidity, &mut outcome).await?;
        } else {
            for row in Row::SENSOR_ROWS {
                if self.blank(display, row).await? {
                    outcome.rows_blanked += 1;
                }
            }
        }

        // ── Step 6: scrolling label ──────────────────────────────────
        let label = self.config.scroll_position;
        display.set_cursor(label.row, label.col).await?;
        display.write_text(self.config.scroll_label).await?;
        display.flush().await?;
        display.set_scroll(self.config.scroll()).await?;
        display.activate_scroll().await?;

        Ok(outcome)
    }

    /// Blank and rewrite `row` if `text` differs from what it shows.
    async fn redraw<D>(
        &mut self,
        display: &mut D,
        row: Row,
        text: &RowText,
        outcome: &mut RefreshOutcome,
    ) -> Result<(), D::Error>
    where
        D: CharacterDisplay,
    {
        if !self.cache.is_stale(row, text) {
            return Ok(());
        }

        let pos = self.config.position(row);
        display.set_cursor(pos.row, 0).await?;
        display.write_text(BLANK_ROW).await?;
        if !text.is_empty() {
            display.set_cursor(pos.row, pos.col).await?;
            display.write_text(text).await?;
        }

        self.cache.store(row, text);
        outcome.rows_redrawn += 1;
        Ok(())
    }

    /// Blank `row` if it shows anything. Returns `true` if it was blanked.
    async fn blank<D>(&mut self, display: &mut D, row: Row) -> Result<bool, D::Error>
    where
        D: CharacterDisplay,
    {
        if self.cache.is_blank(row) {
            return Ok(false);
        }

        let pos = self.config.position(row);
        display.set_cursor(pos.row, 0).await?;
        display.write_text(BLANK_ROW).await?;
        self.cache.clear(row);
        Ok(true)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
