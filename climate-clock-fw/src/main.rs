//! climate-clock-fw
//!
//! Climate clock firmware for the Raspberry Pi Pico 2. Wires the library
//! crates into one refresh loop:
//!
//! 1. Every 2 s the dashboard task probes the DHT22 and reads the DS3231.
//! 2. Rows whose text changed are rewritten in the OLED frame buffer.
//! 3. Changed pages are flushed and the title row keeps scrolling.
//!
//! The DS3231 and the SSD1306 share I2C0. Build with `--features set-clock`
//! once to provision the RTC with [`PROVISION_TIME`].

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, OutputOpenDrain};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Instant};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use climate_clock::DashboardConfig;
use climate_clock_display_rs::{dashboard_task, OledDriver};
use dht_driver::{CachedDht, Dht, DhtKind};
use ds3231_driver::Ds3231;

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the I2C0 peripheral interrupt to Embassy's async handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// SSD1306 address with the SA0 pad tied low.
const OLED_ADDRESS: u8 = 0x3C;

/// Sensor fitted to the board.
const DHT_KIND: DhtKind = DhtKind::Dht22;

/// Timestamp written by the `set-clock` feature:
/// (year, month, day, hour, minute, second, weekday with 1 = Monday).
#[cfg(feature = "set-clock")]
const PROVISION_TIME: (u16, u8, u8, u8, u8, u8, u8) = (2025, 5, 8, 22, 15, 0, 4);

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Shared I2C0 bus. The RTC and the OLED display access it through
/// I2cDevice wrappers that serialise transactions.
static I2C_BUS: StaticCell<Mutex<CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>> =
    StaticCell::new();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// Concrete I2C type for each device on I2C_BUS.
type SharedI2c = I2cDevice<'static, CriticalSectionRawMutex, I2c<'static, I2C0, i2c::Async>>;

type Sensor = CachedDht<OutputOpenDrain<'static>, Delay>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic `dashboard_task` so it can be
/// spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn dashboard(
    driver: OledDriver<SharedI2c>,
    clock: Ds3231<SharedI2c>,
    sensor: Sensor,
    config: DashboardConfig,
) {
    dashboard_task(driver, clock, sensor, config).await;
}

/// Wrapping millisecond uptime.
fn uptime_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Write [`PROVISION_TIME`] to the RTC and clear its lost-power flag.
#[cfg(feature = "set-clock")]
async fn provision(rtc: &mut Ds3231<SharedI2c>) {
    use climate_clock::{ClockSource, DateTime};

    let (year, month, day, hour, minute, second, weekday) = PROVISION_TIME;
    let datetime = match DateTime::new(year, month, day, hour, minute, second, weekday) {
        Ok(dt) => dt,
        Err(e) => {
            error!("Provisioning timestamp rejected: {}", e);
            return;
        }
    };

    match rtc.set(&datetime).await {
        Ok(()) => info!("RTC set to {}", datetime),
        Err(_) => error!("RTC set failed"),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("climate-clock-fw starting");

    // ── Pin assignments ────────────────────────────────────────────────────
    // I2C_SDA → GP20  (p.PIN_20)  DS3231 + SSD1306
    // I2C_SCL → GP21  (p.PIN_21)
    // DHT_DAT → GP15  (p.PIN_15)  open-drain, 10 kΩ pull-up on the module
    // ───────────────────────────────────────────────────────────────────────

    // Initialise I2C0, shared between the RTC and the OLED display.
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    // Wrap in a mutex so both drivers can share the peripheral safely.
    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    let mut rtc = Ds3231::new(I2cDevice::new(i2c_bus));
    let oled = OledDriver::new(I2cDevice::new(i2c_bus), OLED_ADDRESS);

    // Idle high: the line is released to the pull-up.
    let dht_pin = OutputOpenDrain::new(p.PIN_15, Level::High);
    let sensor = CachedDht::new(Dht::new(dht_pin, Delay, DHT_KIND), uptime_ms);

    // ── RTC ────────────────────────────────────────────────────────────────

    #[cfg(feature = "set-clock")]
    provision(&mut rtc).await;

    match rtc.oscillator_stopped().await {
        Ok(true) => warn!("RTC lost power; the time is not valid until it is set"),
        Ok(false) => {}
        Err(_) => error!("RTC not responding"),
    }

    // ── Spawn tasks ────────────────────────────────────────────────────────

    let config = DashboardConfig::default(); // 2 s refresh, 3 s banner

    spawner.spawn(dashboard(oled, rtc, sensor, config)).unwrap();

    info!("All tasks spawned");
}
