//! Single-byte register access over the I2C bus.
use core::cell::RefCell;

use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::registers::Register;

/// Device address held in the 8-bit bus convention.
///
/// The 7-bit address given at construction is shifted left by one so that the low
/// (read/write) bit is clear. Only the low seven bits of the given address are kept.
/// [`embedded_hal::i2c::I2c`] takes the 7-bit form, which is recovered for each
/// transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusAddress(u8);

impl BusAddress {
    pub(crate) const fn from_seven_bit(address: SevenBitAddress) -> Self {
        Self((address & 0x7F) << 1)
    }

    /// 8-bit (write) address.
    pub(crate) const fn eight_bit(self) -> u8 {
        self.0
    }

    pub(crate) const fn seven_bit(self) -> SevenBitAddress {
        self.0 >> 1
    }
}

/// Moves exactly one byte to or from a chip register.
///
/// The bus sits in a `RefCell` so the driver can hand out shared references to its
/// pin wrappers. Each transfer borrows it only for its own duration. This makes the
/// transport (and the driver) `!Sync`.
#[derive(Debug)]
pub(crate) struct Transport<I2C> {
    bus: RefCell<I2C>,
    address: BusAddress,
}

impl<I2C: I2c> Transport<I2C> {
    pub(crate) fn new(bus: I2C, address: SevenBitAddress) -> Self {
        Self {
            bus: RefCell::new(bus),
            address: BusAddress::from_seven_bit(address),
        }
    }

    pub(crate) fn address(&self) -> BusAddress {
        self.address
    }

    pub(crate) fn into_inner(self) -> I2C {
        self.bus.into_inner()
    }

    /// Write the register offset, then read one byte back after a repeated START.
    pub(crate) fn read_register(&self, register: Register) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        let result = self.bus.borrow_mut().write_read(
            self.address.seven_bit(),
            &[register.offset()],
            &mut buf,
        );
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

    /// Write the register offset followed by the new value.
    pub(crate) fn write_register(&self, register: Register, value: u8) -> Result<(), I2C::Error> {
        let result = self
            .bus
            .borrow_mut()
            .write(self.address.seven_bit(), &[register.offset(), value]);
        #[cfg(feature = "defmt")]
        match &result {
            Ok(()) => defmt::trace!("write {} = {=u8:#x}", register, value),
            Err(_) => defmt::debug!("write {} failed", register),
        }
        result
    }
}
