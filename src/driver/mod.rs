use core::cell::Cell;

use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::gpio::{Direction, LogicLevel, Pin, PinMask, Port};
use crate::registers::{Register, Update};

mod gpio;
pub(crate) mod transport;

use transport::Transport;

/// Driver for the TCA9535.
///
/// # Quick start
///
/// Create the driver with [`Tca9535::configure`], which puts every pin into input
/// mode, then configure and drive pins through the port-level methods:
///
/// ```ignore
/// use tca9535_hal::{Direction, LogicLevel, Pin, Port, Tca9535};
///
/// let expander = Tca9535::configure(&mut i2c, 0x20)?;
/// expander.configure_pin(Port::Port0, Pin::P3, Direction::Output)?;
/// expander.write_pin(Port::Port0, Pin::P3, LogicLevel::High)?;
/// let button = expander.read_pin(Port::Port1, Pin::P0)?;
/// ```
///
/// The driver takes the bus by value. Pass `&mut bus` to keep ownership, or a device
/// from `embedded-hal-bus` to share the bus with other drivers.
///
/// For use with other drivers expecting [`embedded_hal::digital`] pins, take the pins
/// with [`Tca9535::take_pins`].
///
/// # Errors
///
/// Every method that talks to the chip returns the bus implementation's own error
/// type unchanged. Nothing is retried.
///
/// # Concurrency
///
/// Pin-granular methods read the register, compute the new value and write it back
/// in two separate transfers. Another bus master writing the same register between
/// those transfers has its write overwritten. The driver is `!Sync`, so within one
/// program only one execution context can own a chip.
#[derive(Debug)]
pub struct Tca9535<I2C> {
    transport: Transport<I2C>,
    /// Marker for whether the pin structs have been taken from the driver.
    ///
    /// The pins share a reference to the driver, so a `Cell` is enough to fake moving
    /// them out. See [`Self::take_pins`].
    pins_taken: Cell<bool>,
}

impl<I2C: I2c> Tca9535<I2C> {
    ////////////////////////////////////////////////////////////////////////////////
    // Constructors
    ////////////////////////////////////////////////////////////////////////////////

    /// Create the driver without touching the chip.
    ///
    /// The address is the 7-bit address set by the A0 to A2 pins (0x20 to 0x27). It
    /// must not be pre-shifted: only the low seven bits are used, so passing 0x90
    /// addresses the device at 0x10.
    ///
    /// Pin directions are whatever the chip currently holds, which is all inputs after
    /// power-on. Prefer [`Tca9535::configure`] unless you manage the chip state
    /// yourself.
    pub fn new(i2c: I2C, address: SevenBitAddress) -> Self {
        Self {
            transport: Transport::new(i2c, address),
            pins_taken: Cell::new(false),
        }
    }

    /// Create the driver and make every pin an input.
    ///
    /// Writes `0xFF` to configuration register 0 and then configuration register 1.
    /// The address is taken as in [`Tca9535::new`], keeping only its low seven bits.
    ///
    /// # Errors
    ///
    /// The first failed write is returned and no driver is created. If the second
    /// write fails, port 0 has already been reconfigured.
    pub fn configure(i2c: I2C, address: SevenBitAddress) -> Result<Self, I2C::Error> {
        let device = Self::new(i2c, address);
        device.write_register(Register::Configuration0, 0xFF)?;
        device.write_register(Register::Configuration1, 0xFF)?;
        Ok(device)
    }

    /// Destroy the driver and give back the bus.
    pub fn release(self) -> I2C {
        self.transport.into_inner()
    }

    /// The 7-bit address given at construction.
    pub fn address(&self) -> SevenBitAddress {
        self.transport.address().seven_bit()
    }

    /// The 8-bit bus address (the 7-bit address shifted left by one).
    pub fn bus_address(&self) -> u8 {
        self.transport.address().eight_bit()
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Register access
    ////////////////////////////////////////////////////////////////////////////////

    /// Read one register.
    pub fn read_register(&self, register: Register) -> Result<u8, I2C::Error> {
        self.transport.read_register(register)
    }

    /// Write one register.
    ///
    /// Writes to the input registers are accepted by the chip but have no effect.
    pub fn write_register(&self, register: Register, value: u8) -> Result<(), I2C::Error> {
        self.transport.write_register(register, value)
    }

    /// Read a register, transform its value and write the result back.
    ///
    /// `f` receives the value actually on the chip. If the read fails, `f` is not
    /// called and nothing is written. Otherwise the status of the write is returned.
    ///
    /// This is not atomic: see the concurrency note on [`Tca9535`].
    pub fn transact<F>(&self, register: Register, f: F) -> Result<(), I2C::Error>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self.read_register(register)?;
        self.write_register(register, f(current))
    }

    /// Apply an [`Update`] to a register with [`Tca9535::transact`].
    pub fn modify(&self, register: Register, update: Update) -> Result<(), I2C::Error> {
        self.transact(register, |current| update.apply(current))
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Pins
    ////////////////////////////////////////////////////////////////////////////////

    /// Set the direction of one pin, leaving the rest of the port alone.
    pub fn configure_pin(
        &self,
        port: Port,
        pin: Pin,
        direction: Direction,
    ) -> Result<(), I2C::Error> {
        self.configure_pins(port, pin.into(), direction)
    }

    /// Set the direction of several pins of one port.
    pub fn configure_pins(
        &self,
        port: Port,
        pins: PinMask,
        direction: Direction,
    ) -> Result<(), I2C::Error> {
        self.modify(
            Register::configuration(port),
            Update::set_if(direction.is_input(), pins.bits()),
        )
    }

    /// Set the output level of one pin, leaving the rest of the port alone.
    ///
    /// The level only appears on the pin if it is configured as an output.
    pub fn write_pin(&self, port: Port, pin: Pin, level: LogicLevel) -> Result<(), I2C::Error> {
        self.write_pins(port, pin.into(), level)
    }

    /// Set the output level of several pins of one port.
    pub fn write_pins(
        &self,
        port: Port,
        pins: PinMask,
        level: LogicLevel,
    ) -> Result<(), I2C::Error> {
        self.modify(
            Register::output(port),
            Update::set_if(level.is_high(), pins.bits()),
        )
    }

    /// Flip the output level of one pin.
    pub fn toggle_pin(&self, port: Port, pin: Pin) -> Result<(), I2C::Error> {
        self.toggle_pins(port, pin.into())
    }

    /// Flip the output level of several pins of one port.
    pub fn toggle_pins(&self, port: Port, pins: PinMask) -> Result<(), I2C::Error> {
        self.modify(Register::output(port), Update::Toggle(pins.bits()))
    }

    /// Read the input level of one pin.
    ///
    /// This reads the whole input register for the port and picks out the pin's bit.
    pub fn read_pin(&self, port: Port, pin: Pin) -> Result<LogicLevel, I2C::Error> {
        self.read_port(port).map(|value| LogicLevel::from_port(value, pin))
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Ports
    ////////////////////////////////////////////////////////////////////////////////

    /// Replace the whole output register of a port. No read is performed.
    pub fn write_port(&self, port: Port, value: u8) -> Result<(), I2C::Error> {
        self.write_register(Register::output(port), value)
    }

    /// Read the input register of a port.
    ///
    /// Input registers reflect the levels on the pins whatever their direction, so
    /// output pins read back the level they are driving.
    pub fn read_port(&self, port: Port) -> Result<u8, I2C::Error> {
        self.read_register(Register::input(port))
    }

    /// Read the output register of a port, the levels last set for its pins.
    pub fn read_output_port(&self, port: Port) -> Result<u8, I2C::Error> {
        self.read_register(Register::output(port))
    }

    /// Read the configuration register of a port. Set bits are inputs.
    pub fn read_configuration(&self, port: Port) -> Result<u8, I2C::Error> {
        self.read_register(Register::configuration(port))
    }
}
