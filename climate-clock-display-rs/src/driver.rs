//! SSD1306 character-grid driver over async I2C.
//!
//! [`OledDriver`] keeps a [`FrameBuffer`] and implements
//! [`CharacterDisplay`]: text goes into the buffer at the cursor, and
//! [`flush()`](CharacterDisplay::flush) sends only the pages that changed.
//! Horizontal hardware scrolling is driven directly with SSD1306 commands.

use climate_clock::dashboard::{GRID_COLUMNS, GRID_ROWS};
use climate_clock::{CharacterDisplay, ScrollConfig, ScrollDirection, ScrollSpeed};
use embedded_hal_async::i2c::I2c;

use crate::error::OledError;
use crate::framebuffer::{FrameBuffer, PAGES, WIDTH};

/// SSD1306 commands.
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_ADDRESSING_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SCROLL_RIGHT: u8 = 0x26;
    pub const SCROLL_LEFT: u8 = 0x27;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const ACTIVATE_SCROLL: u8 = 0x2F;
}

/// Control byte: the rest of the transfer is commands.
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: the rest of the transfer is display RAM data.
const CONTROL_DATA: u8 = 0x40;

/// Longest command run sent in one I2C write.
const MAX_COMMANDS: usize = 16;

/// Power-up sequence for a 128×64 panel with the internal charge pump.
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // enable
    cmd::SET_ADDRESSING_MODE,
    0x02, // page addressing
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_FROM_RAM,
    cmd::SET_NORMAL,
    cmd::DEACTIVATE_SCROLL,
    cmd::DISPLAY_ON,
];

/// Frame-interval code for the scroll setup command.
fn interval_code(speed: ScrollSpeed) -> u8 {
    match speed {
        ScrollSpeed::Frames5 => 0b000,
        ScrollSpeed::Frames64 => 0b001,
        ScrollSpeed::Frames128 => 0b010,
        ScrollSpeed::Frames256 => 0b011,
        ScrollSpeed::Frames3 => 0b100,
        ScrollSpeed::Frames4 => 0b101,
        ScrollSpeed::Frames25 => 0b110,
        ScrollSpeed::Frames2 => 0b111,
    }
}

/// Async driver for an SSD1306 128×64 OLED used as an 8 × 16 text grid.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`] - constructs the driver without any I2C traffic.
/// 2. [`OledDriver::init()`] - sends the SSD1306 initialisation sequence
///    and blanks the panel.
/// 3. Position and write text through [`CharacterDisplay`].
/// 4. [`CharacterDisplay::flush()`] - transfers changed pages to hardware.
///
/// # Example
///
/// ```ignore
/// use climate_clock::CharacterDisplay;
/// use climate_clock_display_rs::OledDriver;
///
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().await?;
/// oled.set_cursor(4, 0).await?;
/// oled.write_text("22:15:00").await?;
/// oled.flush().await?;
/// ```
pub struct OledDriver<I2C> {
    i2c: I2C,
    address: u8,
    buffer: FrameBuffer,
    /// Next cell written by `write_text`. The column may equal
    /// `GRID_COLUMNS` once a write has reached the right edge.
    cursor: (u8, u8),
    /// Last scroll set up with `set_scroll`.
    scroll: Option<ScrollConfig>,
    /// The panel is currently scrolling.
    scrolling: bool,
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver.
    ///
    /// No I2C traffic is generated. You **must** call [`init()`](Self::init)
    /// before any display operations.
    ///
    /// # Arguments
    /// * `i2c` - I2C peripheral (takes ownership for exclusive access).
    /// * `address` - 7-bit I2C device address (typically `0x3C` or `0x3D`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: FrameBuffer::new(),
            cursor: (0, 0),
            scroll: None,
            scrolling: false,
            initialized: false,
        }
    }

    /// Initialise the SSD1306 hardware and blank every page.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::InitializationFailed`] if the panel does not
    /// acknowledge the init sequence, or [`OledError::I2c`] if blanking the
    /// panel RAM fails afterwards.
    pub async fn init(&mut self) -> Result<(), OledError<I2C::Error>> {
        self.commands(INIT_SEQUENCE)
            .await
            .map_err(|_| OledError::InitializationFailed)?;
        self.initialized = true;
        self.scrolling = false;

        // Panel RAM is undefined at power-up.
        self.buffer.clear();
        self.buffer.mark_dirty(0, PAGES - 1);
        self.write_dirty_pages().await
    }

    /// Check whether the display has been successfully initialised.
    ///
    /// No I2C traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Current cursor as `(row, col)`.
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Read-only view of the frame buffer.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn ensure_initialized(&self) -> Result<(), OledError<I2C::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(OledError::NotInitialized)
        }
    }

    /// Send a command stream, split into bounded writes.
    async fn commands(&mut self, commands: &[u8]) -> Result<(), I2C::Error> {
        let mut buf = [0u8; MAX_COMMANDS + 1];
        buf[0] = CONTROL_COMMAND;
        for chunk in commands.chunks(MAX_COMMANDS) {
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &buf[..=chunk.len()]).await?;
        }
        Ok(())
    }

    /// Stop the hardware scroll and schedule the scrolled band for rewrite.
    async fn stop_scroll(&mut self) -> Result<(), OledError<I2C::Error>> {
        if !self.scrolling {
            return Ok(());
        }
        self.commands(&[cmd::DEACTIVATE_SCROLL]).await?;
        self.scrolling = false;
        // Scrolled RAM no longer matches the buffer.
        if let Some(scroll) = self.scroll {
            self.buffer
                .mark_dirty(scroll.start_row as usize, scroll.end_row as usize);
        }
        Ok(())
    }

    /// Send every dirty page. A page stays dirty if its write fails.
    async fn write_dirty_pages(&mut self) -> Result<(), OledError<I2C::Error>> {
        for page in 0..PAGES {
            if !self.buffer.is_dirty(page) {
                continue;
            }

            self.commands(&[
                cmd::SET_PAGE_ADDR | page as u8,
                cmd::SET_LOW_COLUMN,
                cmd::SET_HIGH_COLUMN,
            ])
            .await?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(self.buffer.page(page));
            self.i2c.write(self.address, &data).await?;

            self.buffer.mark_clean(page);
        }
        Ok(())
    }
}

impl<I2C> CharacterDisplay for OledDriver<I2C>
where
    I2C: I2c,
{
    type Error = OledError<I2C::Error>;

    /// Blank the buffer and home the cursor. Takes effect on `flush`.
    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.buffer.clear();
        self.cursor = (0, 0);
        Ok(())
    }

    async fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        if row >= GRID_ROWS || col >= GRID_COLUMNS {
            return Err(OledError::CursorOutOfRange);
        }
        self.cursor = (row, col);
        Ok(())
    }

    /// Each character replaces one cell. Anything past column 15 is dropped.
    async fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        let (row, mut col) = self.cursor;
        for ch in text.chars() {
            if col >= GRID_COLUMNS {
                break;
            }
            self.buffer.draw_cell(row as usize, col as usize, ch);
            col += 1;
        }
        self.cursor = (row, col);
        Ok(())
    }

    async fn set_scroll(&mut self, scroll: ScrollConfig) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        if scroll.start_row > scroll.end_row || scroll.end_row >= GRID_ROWS {
            return Err(OledError::CursorOutOfRange);
        }

        self.stop_scroll().await?;
        let direction = match scroll.direction {
            ScrollDirection::Right => cmd::SCROLL_RIGHT,
            ScrollDirection::Left => cmd::SCROLL_LEFT,
        };
        self.commands(&[
            cmd::DEACTIVATE_SCROLL,
            direction,
            0x00,
            scroll.start_row,
            interval_code(scroll.speed),
            scroll.end_row,
            0x00,
            0xFF,
        ])
        .await?;
        self.scroll = Some(scroll);
        Ok(())
    }

    /// No-op until a scroll has been configured.
    async fn activate_scroll(&mut self) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        if self.scroll.is_none() {
            return Ok(());
        }
        self.commands(&[cmd::ACTIVATE_SCROLL]).await?;
        self.scrolling = true;
        Ok(())
    }

    /// Send the pages changed since the last flush. Nothing changed means no
    /// bus traffic, and a running scroll is left alone.
    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        if !self.buffer.has_dirty() {
            return Ok(());
        }
        self.stop_scroll().await?;
        self.write_dirty_pages().await
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use climate_clock::DashboardConfig;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, Operation};

    use super::*;

    /// Records every write; fails writes while `fail` is set.
    #[derive(Default)]
    struct FakeBus {
        writes: Vec<Vec<u8>>,
        fail: bool,
    }

    #[derive(Debug, PartialEq, Eq)]
    struct BusError;

    impl embedded_hal_async::i2c::Error for BusError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for FakeBus {
        type Error = BusError;
    }

    impl I2c for FakeBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), BusError> {
            assert_eq!(address, 0x3C);
            if self.fail {
                return Err(BusError);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push(bytes.to_vec());
                }
            }
            Ok(())
        }
    }

    impl FakeBus {
        /// Pages whose RAM was written, in order.
        fn pages_written(&self) -> Vec<u8> {
            let mut pages = Vec::new();
            for (i, w) in self.writes.iter().enumerate() {
                if w[0] == CONTROL_DATA {
                    let setup = &self.writes[i - 1];
                    pages.push(setup[1] & 0x07);
                }
            }
            pages
        }

        fn commands(&self) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|w| w[0] == CONTROL_COMMAND)
                .flat_map(|w| w[1..].iter().copied())
                .collect()
        }
    }

    fn ready() -> OledDriver<FakeBus> {
        let mut oled = OledDriver::new(FakeBus::default(), 0x3C);
        block_on(oled.init()).unwrap();
        oled.i2c.writes.clear();
        oled
    }

    #[test]
    fn new_sends_nothing() {
        let oled = OledDriver::new(FakeBus::default(), 0x3C);
        assert!(!oled.is_initialized());
        assert!(oled.release().writes.is_empty());
    }

    #[test]
    fn init_sends_sequence_then_blanks_all_pages() {
        let mut oled = OledDriver::new(FakeBus::default(), 0x3C);
        block_on(oled.init()).unwrap();

        let bus = oled.release();
        assert_eq!(&bus.commands()[..INIT_SEQUENCE.len()], INIT_SEQUENCE);
        assert_eq!(bus.pages_written(), (0..8).collect::<Vec<u8>>());
        assert!(bus
            .writes
            .iter()
            .filter(|w| w[0] == CONTROL_DATA)
            .all(|w| w.len() == WIDTH + 1 && w[1..].iter().all(|&b| b == 0)));
    }

    #[test]
    fn init_failure_is_reported() {
        let mut oled = OledDriver::new(
            FakeBus {
                fail: true,
                ..Default::default()
            },
            0x3C,
        );
        assert_eq!(block_on(oled.init()), Err(OledError::InitializationFailed));
        assert!(!oled.is_initialized());
    }

    #[test]
    fn operations_before_init_are_rejected() {
        let mut oled = OledDriver::new(FakeBus::default(), 0x3C);
        assert_eq!(block_on(oled.write_text("x")), Err(OledError::NotInitialized));
        assert_eq!(block_on(oled.flush()), Err(OledError::NotInitialized));
        assert_eq!(block_on(oled.clear()), Err(OledError::NotInitialized));
    }

    #[test]
    fn flush_sends_only_touched_pages() {
        let mut oled = ready();
        block_on(async {
            oled.set_cursor(4, 0).await.unwrap();
            oled.write_text("22:15:00").await.unwrap();
            oled.set_cursor(6, 0).await.unwrap();
            oled.write_text("Nem").await.unwrap();
            oled.flush().await.unwrap();
        });

        assert_eq!(oled.i2c.pages_written(), [4, 6]);
        assert!(!oled.buffer().has_dirty());
    }

    #[test]
    fn flush_with_nothing_changed_is_silent() {
        let mut oled = ready();
        block_on(oled.flush()).unwrap();
        assert!(oled.i2c.writes.is_empty());
    }

    #[test]
    fn page_setup_addresses_column_zero() {
        let mut oled = ready();
        block_on(async {
            oled.set_cursor(3, 5).await.unwrap();
            oled.write_text("/").await.unwrap();
            oled.flush().await.unwrap();
        });

        assert_eq!(oled.i2c.writes[0], [CONTROL_COMMAND, 0xB3, 0x00, 0x10]);
        assert_eq!(oled.i2c.writes[1].len(), WIDTH + 1);
    }

    #[test]
    fn text_is_clipped_at_last_column() {
        let mut oled = ready();
        block_on(async {
            oled.set_cursor(2, 12).await.unwrap();
            oled.write_text("Crsmb").await.unwrap();
        });

        assert_eq!(oled.cursor(), (2, 16));
        let page = oled.buffer().page(2);
        assert!(page[12 * 8..].iter().any(|&b| b != 0));

        // A further write at the edge changes nothing.
        let before = *page;
        block_on(oled.write_text("more")).unwrap();
        assert_eq!(*oled.buffer().page(2), before);
    }

    #[test]
    fn cursor_advances_across_writes() {
        let mut oled = ready();
        block_on(async {
            oled.set_cursor(7, 0).await.unwrap();
            oled.write_text("Nem: ").await.unwrap();
            oled.write_text("40.0%").await.unwrap();
        });
        assert_eq!(oled.cursor(), (7, 10));
    }

    #[test]
    fn cursor_outside_grid_is_rejected() {
        let mut oled = ready();
        assert_eq!(block_on(oled.set_cursor(8, 0)), Err(OledError::CursorOutOfRange));
        assert_eq!(block_on(oled.set_cursor(0, 16)), Err(OledError::CursorOutOfRange));
        assert_eq!(block_on(oled.set_cursor(7, 15)), Ok(()));
    }

    #[test]
    fn clear_blanks_lit_pages_and_homes_cursor() {
        let mut oled = ready();
        block_on(async {
            oled.set_cursor(5, 1).await.unwrap();
            oled.write_text("Sensor bulundu").await.unwrap();
            oled.flush().await.unwrap();
            oled.i2c.writes.clear();

            oled.clear().await.unwrap();
            oled.flush().await.unwrap();
        });

        assert_eq!(oled.cursor(), (0, 0));
        assert_eq!(oled.i2c.pages_written(), [5]);
        assert!(oled.buffer().page(5).iter().all(|&b| b == 0));
    }

    #[test]
    fn scroll_setup_bytes() {
        let mut oled = ready();
        let scroll = DashboardConfig::default().scroll();
        block_on(async {
            oled.set_scroll(scroll).await.unwrap();
            oled.activate_scroll().await.unwrap();
        });

        assert_eq!(
            oled.i2c.writes,
            [
                std::vec![CONTROL_COMMAND, 0x2E, 0x26, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF],
                std::vec![CONTROL_COMMAND, 0x2F],
            ]
        );
        assert!(oled.is_scrolling());
    }

    #[test]
    fn left_scroll_uses_interval_code() {
        let mut oled = ready();
        let scroll = ScrollConfig {
            direction: ScrollDirection::Left,
            start_row: 2,
            end_row: 4,
            speed: ScrollSpeed::Frames2,
        };
        block_on(oled.set_scroll(scroll)).unwrap();

        assert_eq!(
            oled.i2c.writes[0],
            [CONTROL_COMMAND, 0x2E, 0x27, 0x00, 0x02, 0x07, 0x04, 0x00, 0xFF]
        );
    }

    #[test]
    fn inverted_scroll_band_is_rejected() {
        let mut oled = ready();
        let scroll = ScrollConfig {
            direction: ScrollDirection::Right,
            start_row: 5,
            end_row: 2,
            speed: ScrollSpeed::Frames5,
        };
        assert_eq!(block_on(oled.set_scroll(scroll)), Err(OledError::CursorOutOfRange));
        assert!(oled.i2c.writes.is_empty());
    }

    #[test]
    fn activate_without_setup_is_noop() {
        let mut oled = ready();
        block_on(oled.activate_scroll()).unwrap();
        assert!(oled.i2c.writes.is_empty());
        assert!(!oled.is_scrolling());
    }

    #[test]
    fn flush_while_scrolling_stops_scroll_and_restores_band() {
        let mut oled = ready();
        let scroll = DashboardConfig::default().scroll();
        block_on(async {
            oled.set_cursor(0, 2).await.unwrap();
            oled.write_text("Saat & Hava").await.unwrap();
            oled.flush().await.unwrap();
            oled.set_scroll(scroll).await.unwrap();
            oled.activate_scroll().await.unwrap();
            oled.i2c.writes.clear();

            oled.set_cursor(4, 0).await.unwrap();
            oled.write_text("22:15:01").await.unwrap();
            oled.flush().await.unwrap();
        });

        assert_eq!(oled.i2c.writes[0], [CONTROL_COMMAND, 0x2E]);
        assert_eq!(oled.i2c.pages_written(), [0, 4]);
        assert!(!oled.is_scrolling());
    }

    #[test]
    fn failed_page_write_stays_dirty() {
        let mut oled = ready();
        block_on(async {
            oled.set_cursor(3, 0).await.unwrap();
            oled.write_text("08/05/2025").await.unwrap();
        });

        oled.i2c.fail = true;
        assert_eq!(block_on(oled.flush()), Err(OledError::I2c(BusError)));
        assert!(oled.buffer().is_dirty(3));

        oled.i2c.fail = false;
        block_on(oled.flush()).unwrap();
        assert_eq!(oled.i2c.pages_written(), [3]);
    }

    #[test]
    fn interval_codes_follow_datasheet() {
        assert_eq!(interval_code(ScrollSpeed::Frames5), 0x00);
        assert_eq!(interval_code(ScrollSpeed::Frames256), 0x03);
        assert_eq!(interval_code(ScrollSpeed::Frames25), 0x06);
        assert_eq!(interval_code(ScrollSpeed::Frames2), 0x07);
    }
}
