//! Dashboard refresh task.
//!
//! [`dashboard_task`] owns the display driver and the two sensors and runs
//! [`Dashboard::refresh`] on the configured period.

use climate_clock::{ClimateSensor, ClockSource, Dashboard, DashboardConfig};
use embassy_time::{Instant, Timer};
use embedded_hal_async::i2c::I2c;

use crate::driver::OledDriver;

/// Periodic dashboard loop. Never returns.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn dashboard(
///     driver: OledDriver<OledI2c>,
///     clock: Ds3231<RtcI2c>,
///     sensor: CachedDht,
///     config: DashboardConfig,
/// ) {
///     dashboard_task(driver, clock, sensor, config).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the display. On failure, log and halt forever; there is
///    nothing to show readings on.
/// 2. Blank the panel and reset the row cache.
/// 3. Loop every `config.refresh_period_ms`: one [`Dashboard::refresh`].
///
/// # Errors
///
/// * Initialisation failure: logs the error and parks the task.
/// * Display errors during a cycle: logged; the rows that failed are
///   retried next cycle.
pub async fn dashboard_task<I2C, C, S>(
    mut driver: OledDriver<I2C>,
    mut clock: C,
    mut sensor: S,
    config: DashboardConfig,
) where
    I2C: I2c,
    C: ClockSource,
    S: ClimateSensor,
{
    // ── Initialisation ───────────────────────────────────────────────
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        core::future::pending::<()>().await;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    let period = config.refresh_period_ms;
    let mut dashboard = Dashboard::new(config);

    if let Err(_e) = dashboard.reset(&mut driver).await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED reset failed: {}", _e);
    }

    // ── Main loop ────────────────────────────────────────────────────
    loop {
        let now_ms = Instant::now().as_millis() as u32;
        match dashboard
            .refresh(&mut clock, &mut sensor, &mut driver, now_ms)
            .await
        {
            Ok(_outcome) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Refresh: {}", _outcome);
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Display update failed: {}", _e);
            }
        }

        Timer::after_millis(period as u64).await;
    }
}
