//! DHT11 / DHT22 single-wire protocol.
//!
//! ```text
//!  MCU start      sensor response     bit 0           bit 1
//! ‾‾‾\_______/‾‾‾\______/‾‾‾‾‾‾\____/‾‾‾\____/‾‾‾‾‾‾‾\ ...
//!    start_us  ~30   ~80     ~80   ~50  ~26  ~50   ~70
//! ```
//!
//! Every bit starts with a ~50 µs low phase. The length of the following
//! high phase encodes the bit: shorter than the low phase is a 0, longer
//! is a 1. Comparing the two phases instead of using a fixed threshold keeps
//! decoding independent of how fast the polling loop runs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::DhtError;

/// Any single phase longer than this means the sensor stopped answering.
const PULSE_TIMEOUT_US: u32 = 100;

/// Bits in one answer: humidity (16), temperature (16), checksum (8).
const BIT_COUNT: usize = 40;

/// Sensor variant; selects the start pulse and the data encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DhtKind {
    /// Integer + decimal byte encoding, 0–50 °C.
    Dht11,
    /// Tenths encoding with a sign bit, −40–80 °C. Also AM2302.
    Dht22,
}

impl DhtKind {
    /// How long the MCU holds the line low to wake the sensor.
    fn start_pulse_us(self) -> u32 {
        match self {
            DhtKind::Dht11 => 20_000,
            DhtKind::Dht22 => 1_100,
        }
    }

    /// Minimum time between two measurements.
    pub fn min_interval_ms(self) -> u32 {
        match self {
            DhtKind::Dht11 => 1_000,
            DhtKind::Dht22 => 2_000,
        }
    }

    fn decode(self, data: &[u8; 5]) -> Measurement {
        match self {
            DhtKind::Dht11 => {
                let humidity = data[0] as f32 + data[1] as f32 / 10.0;
                let magnitude = data[2] as f32 + (data[3] & 0x7F) as f32 / 10.0;
                let temperature = if data[3] & 0x80 != 0 { -magnitude } else { magnitude };
                Measurement {
                    temperature,
                    humidity,
                }
            }
            DhtKind::Dht22 => {
                let humidity = u16::from_be_bytes([data[0], data[1]]) as f32 / 10.0;
                let magnitude = u16::from_be_bytes([data[2] & 0x7F, data[3]]) as f32 / 10.0;
                let temperature = if data[2] & 0x80 != 0 { -magnitude } else { magnitude };
                Measurement {
                    temperature,
                    humidity,
                }
            }
        }
    }
}

/// One successful reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature in °C.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

/// DHT sensor on an open-drain GPIO.
///
/// `set_high()` must release the line to the pull-up rather than drive it,
/// so the sensor can pull it low while the MCU reads.
pub struct Dht<P, D> {
    pin: P,
    delay: D,
    kind: DhtKind,
}

impl<P, D> Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Wrap a pin. No bus activity until [`measure()`](Self::measure).
    pub fn new(pin: P, delay: D, kind: DhtKind) -> Self {
        Self { pin, delay, kind }
    }

    pub fn kind(&self) -> DhtKind {
        self.kind
    }

    /// Give back the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Run one full measurement.
    ///
    /// Callers must respect [`DhtKind::min_interval_ms`] between calls;
    /// polling faster returns stale or corrupt data.
    ///
    /// # Errors
    /// * [`DhtError::Timeout`] if the sensor does not answer
    /// * [`DhtError::Checksum`] on a corrupted frame
    /// * [`DhtError::Pin`] on a GPIO failure
    pub fn measure(&mut self) -> Result<Measurement, DhtError<P::Error>> {
        let data = self.read_frame()?;
        verify_checksum(&data)?;
        Ok(self.kind.decode(&data))
    }

    fn read_frame(&mut self) -> Result<[u8; 5], DhtError<P::Error>> {
        // Start signal: hold low, then release to the pull-up.
        self.pin.set_low()?;
        self.delay.delay_us(self.kind.start_pulse_us());
        self.pin.set_high()?;

        // Response: pull-up until the sensor takes the line, ~80 µs low,
        // ~80 µs high.
        self.pulse_length(true)?;
        self.pulse_length(false)?;
        self.pulse_length(true)?;

        let mut data = [0u8; 5];
        for bit in 0..BIT_COUNT {
            let low = self.pulse_length(false)?;
            let high = self.pulse_length(true)?;
            if high > low {
                data[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        Ok(data)
    }

    /// Microseconds the line stays at `high` from now.
    fn pulse_length(&mut self, high: bool) -> Result<u32, DhtError<P::Error>> {
        let mut elapsed = 0;
        while self.pin.is_high()? == high {
            if elapsed >= PULSE_TIMEOUT_US {
                return Err(DhtError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

fn verify_checksum<E>(data: &[u8; 5]) -> Result<(), DhtError<E>> {
    let sum = data[..4].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if sum == data[4] {
        Ok(())
    } else {
        Err(DhtError::Checksum)
    }
}
