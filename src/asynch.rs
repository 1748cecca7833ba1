//! Async driver over [`embedded_hal_async::i2c::I2c`].
//!
//! Enable the `async` feature to use this module. [`Tca9535Async`] mirrors the
//! register, pin and port methods of [`Tca9535`](crate::Tca9535), and keeps the same
//! error contract: the bus error is returned unchanged.
//!
//! ```ignore
//! use tca9535_hal::{Direction, LogicLevel, Pin, Port, Tca9535Async};
//!
//! let mut expander = Tca9535Async::configure(i2c, 0x20).await?;
//! expander.configure_pin(Port::Port1, Pin::P7, Direction::Output).await?;
//! expander.toggle_pin(Port::Port1, Pin::P7).await?;
//! ```
use embedded_hal::i2c::SevenBitAddress;
use embedded_hal_async::i2c::I2c;

use crate::driver::transport::BusAddress;
use crate::gpio::{Direction, LogicLevel, Pin, PinMask, Port};
use crate::registers::{Register, Update};

/// Async driver for the TCA9535.
///
/// Unlike the blocking driver, this takes `&mut self`, because a bus borrow cannot be
/// held across an `.await` in a `RefCell`. There are no pin wrappers.
#[derive(Debug)]
pub struct Tca9535Async<I2C> {
    i2c: I2C,
    address: BusAddress,
}

impl<I2C: I2c> Tca9535Async<I2C> {
    /// Create the driver without touching the chip.
    ///
    /// Only the low seven bits of `address` are used. See
    /// [`Tca9535::new`](crate::Tca9535::new).
    pub fn new(i2c: I2C, address: SevenBitAddress) -> Self {
        Self {
            i2c,
            address: BusAddress::from_seven_bit(address),
        }
    }

    /// Create the driver and make every pin an input.
    ///
    /// See [`Tca9535::configure`](crate::Tca9535::configure).
    pub async fn configure(i2c: I2C, address: SevenBitAddress) -> Result<Self, I2C::Error> {
        let mut device = Self::new(i2c, address);
        device.write_register(Register::Configuration0, 0xFF).await?;
        device.write_register(Register::Configuration1, 0xFF).await?;
        Ok(device)
    }

    /// Destroy the driver and give back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// The 7-bit address given at construction.
    pub fn address(&self) -> SevenBitAddress {
        self.address.seven_bit()
    }

    /// The 8-bit bus address.
    pub fn bus_address(&self) -> u8 {
        self.address.eight_bit()
    }

    /// Read one register.
    pub async fn read_register(&mut self, register: Register) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        let address = self.address();
        let result = self
            .i2c
            .write_read(address, &[register.offset()], &mut buf)
            .await;
        match result {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("read {} = {=u8:#x}", register, buf[0]);
                Ok(buf[0])
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("read {} failed", register);
                Err(e)
            }
        }
    }

    /// Write one register.
    pub async fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), I2C::Error> {
        let address = self.address();
        let result = self.i2c.write(address, &[register.offset(), value]).await;
        #[cfg(feature = "defmt")]
        match &result {
            Ok(()) => defmt::trace!("write {} = {=u8:#x}", register, value),
            Err(_) => defmt::debug!("write {} failed", register),
        }
        result
    }

    /// Read a register, transform its value and write the result back.
    ///
    /// If the read fails, `f` is not called and nothing is written.
    pub async fn transact<F>(&mut self, register: Register, f: F) -> Result<(), I2C::Error>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.read_register(register).await?;
        self.write_register(register, f(current)).await
    }

    /// Apply an [`Update`] to a register with [`Tca9535Async::transact`].
    pub async fn modify(&mut self, register: Register, update: Update) -> Result<(), I2C::Error> {
        self.transact(register, |current| update.apply(current)).await
    }

    /// Set the direction of one pin.
    pub async fn configure_pin(
        &mut self,
        port: Port,
        pin: Pin,
        direction: Direction,
    ) -> Result<(), I2C::Error> {
        self.configure_pins(port, pin.into(), direction).await
    }

    /// Set the direction of several pins of one port.
    pub async fn configure_pins(
        &mut self,
        port: Port,
        pins: PinMask,
        direction: Direction,
    ) -> Result<(), I2C::Error> {
        let update = Update::set_if(direction.is_input(), pins.bits());
        self.modify(Register::configuration(port), update).await
    }

    /// Set the output level of one pin.
    pub async fn write_pin(
        &mut self,
        port: Port,
        pin: Pin,
        level: LogicLevel,
    ) -> Result<(), I2C::Error> {
        self.write_pins(port, pin.into(), level).await
    }

    /// Set the output level of several pins of one port.
    pub async fn write_pins(
        &mut self,
        port: Port,
        pins: PinMask,
        level: LogicLevel,
    ) -> Result<(), I2C::Error> {
        let update = Update::set_if(level.is_high(), pins.bits());
        self.modify(Register::output(port), update).await
    }

    /// Flip the output level of one pin.
    pub async fn toggle_pin(&mut self, port: Port, pin: Pin) -> Result<(), I2C::Error> {
        self.toggle_pins(port, pin.into()).await
    }

    /// Flip the output level of several pins of one port.
    pub async fn toggle_pins(&mut self, port: Port, pins: PinMask) -> Result<(), I2C::Error> {
        self.modify(Register::output(port), Update::Toggle(pins.bits())).await
    }

    /// Read the input level of one pin.
    pub async fn read_pin(&mut self, port: Port, pin: Pin) -> Result<LogicLevel, I2C::Error> {
        let value = self.read_port(port).await?;
        Ok(LogicLevel::from_port(value, pin))
    }

    /// Replace the whole output register of a port. No read is performed.
    pub async fn write_port(&mut self, port: Port, value: u8) -> Result<(), I2C::Error> {
        self.write_register(Register::output(port), value).await
    }

    /// Read the input register of a port.
    pub async fn read_port(&mut self, port: Port) -> Result<u8, I2C::Error> {
        self.read_register(Register::input(port)).await
    }

    /// Read the output register of a port.
    pub async fn read_output_port(&mut self, port: Port) -> Result<u8, I2C::Error> {
        self.read_register(Register::output(port)).await
    }

    /// Read the configuration register of a port. Set bits are inputs.
    pub async fn read_configuration(&mut self, port: Port) -> Result<u8, I2C::Error> {
        self.read_register(Register::configuration(port)).await
    }
}
