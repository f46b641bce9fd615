//! Low-level DS3231 register access.
//!
//! The DS3231 uses a one-byte register pointer: a write sets the pointer
//! (followed by data for a register write), a read returns bytes starting
//! at the pointer. This module is crate-private; consumers interact with
//! [`Ds3231`](crate::Ds3231) instead.

use embedded_hal_async::i2c::I2c;

use crate::error::RtcError;

/// Largest register burst written in one transaction (time registers).
const MAX_WRITE: usize = 8;

/// Low-level register driver.
///
/// Owns an I2C peripheral and provides burst read/write primitives.
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    /// Create a new register driver.
    ///
    /// # Arguments
    /// * `i2c` - I2C peripheral (takes ownership for exclusive access)
    /// * `address` - 7-bit I2C device address (always 0x68 on the DS3231)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read `buffer.len()` consecutive registers starting at `register`.
    ///
    /// Uses a repeated-start `write_read`; the DS3231 latches the time
    /// registers into a shadow buffer on the START, so a burst is always
    /// consistent (no seconds rollover between fields).
    pub async fn read_registers(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), RtcError<I2C::Error>> {
        self.i2c.write_read(self.address, &[register], buffer).await?;
        Ok(())
    }

    /// Read a single register.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, RtcError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf).await?;
        Ok(buf[0])
    }

    /// Write consecutive registers starting at `register` in one transaction.
    ///
    /// `data` longer than the time burst is rejected with
    /// [`RtcError::InvalidDateTime`]; nothing in this crate writes more.
    pub async fn write_registers(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), RtcError<I2C::Error>> {
        if data.len() >= MAX_WRITE {
            return Err(RtcError::InvalidDateTime);
        }

        // Full write buffer: [register, d0, d1, ...]
        let mut buf = [0u8; MAX_WRITE];
        buf[0] = register;
        buf[1..=data.len()].copy_from_slice(data);

        self.i2c.write(self.address, &buf[..=data.len()]).await?;
        Ok(())
    }

    /// Write a single register.
    pub async fn write_u8(&mut self, register: u8, value: u8) -> Result<(), RtcError<I2C::Error>> {
        self.write_registers(register, &[value]).await
    }
}
