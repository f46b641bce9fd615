//! [`ClimateSensor`] adapter with a sampling-interval cache.

use climate_clock::ClimateSensor;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::dht::{Dht, Measurement};
use crate::error::DhtError;

/// A [`Dht`] exposed as a [`ClimateSensor`].
///
/// The sensor delivers temperature and humidity in one frame and must not
/// be polled faster than [`DhtKind::min_interval_ms`](crate::DhtKind::min_interval_ms).
/// The outcome of a measurement, failures included, is reused until that
/// interval has passed, so a temperature read followed by a humidity read
/// costs one bus transaction.
///
/// `now_ms` is a wrapping millisecond clock, typically the Embassy uptime.
pub struct CachedDht<P, D>
where
    P: ErrorType,
{
    dht: Dht<P, D>,
    now_ms: fn() -> u32,
    last: Option<(u32, Result<Measurement, DhtError<P::Error>>)>,
}

impl<P, D> CachedDht<P, D>
where
    P: InputPin + OutputPin,
    P::Error: Copy,
    D: DelayNs,
{
    pub fn new(dht: Dht<P, D>, now_ms: fn() -> u32) -> Self {
        Self {
            dht,
            now_ms,
            last: None,
        }
    }

    /// Give back the wrapped sensor.
    pub fn release(self) -> Dht<P, D> {
        self.dht
    }

    /// Latest measurement, taking a new one if the cached one is too old.
    pub fn measurement(&mut self) -> Result<Measurement, DhtError<P::Error>> {
        let now = (self.now_ms)();
        let max_age = self.dht.kind().min_interval_ms();

        if let Some((taken_at, result)) = self.last {
            if now.wrapping_sub(taken_at) < max_age {
                return result;
            }
        }

        let result = self.dht.measure();
        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::debug!("DHT measurement failed");
        }
        self.last = Some((now, result));
        result
    }
}

impl<P, D> ClimateSensor for CachedDht<P, D>
where
    P: InputPin + OutputPin,
    P::Error: Copy,
    D: DelayNs,
{
    type Error = DhtError<P::Error>;

    async fn read_temperature(&mut self) -> Result<f32, Self::Error> {
        self.measurement().map(|m| m.temperature)
    }

    async fn read_humidity(&mut self) -> Result<f32, Self::Error> {
        self.measurement().map(|m| m.humidity)
    }
}
