//! TCA9535 register map and the byte updates applied by read-modify-write transactions.

use crate::gpio::Port;

/// Registers of the TCA9535.
///
/// Each register comes in a pair, one per port, with port 0 at the even offset and
/// port 1 at the odd offset directly after it.
///
/// # Datasheet
///
/// See table 4 (command byte) in section 8.6.2 of the TCA9535 datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Input port 0. Reflects the incoming logic levels of the pins, regardless of
    /// their direction. Writes have no effect.
    Input0 = 0x00,
    /// Input port 1.
    Input1 = 0x01,
    /// Output port 0. Outgoing logic levels of pins configured as outputs.
    Output0 = 0x02,
    /// Output port 1.
    Output1 = 0x03,
    /// Polarity inversion port 0.
    ///
    /// Not used by this driver, and left at its power-on value of `0x00`.
    Polarity0 = 0x04,
    /// Polarity inversion port 1.
    Polarity1 = 0x05,
    /// Configuration port 0. A set bit makes the pin an input, a clear bit an output.
    Configuration0 = 0x06,
    /// Configuration port 1.
    Configuration1 = 0x07,
}

impl Register {
    /// Every register, in offset order.
    pub const ALL: [Register; 8] = [
        Self::Input0,
        Self::Input1,
        Self::Output0,
        Self::Output1,
        Self::Polarity0,
        Self::Polarity1,
        Self::Configuration0,
        Self::Configuration1,
    ];

    /// Input register for the given port.
    pub const fn input(port: Port) -> Self {
        match port {
            Port::Port0 => Self::Input0,
            Port::Port1 => Self::Input1,
        }
    }

    /// Output register for the given port.
    pub const fn output(port: Port) -> Self {
        match port {
            Port::Port0 => Self::Output0,
            Port::Port1 => Self::Output1,
        }
    }

    /// Polarity inversion register for the given port.
    pub const fn polarity(port: Port) -> Self {
        match port {
            Port::Port0 => Self::Polarity0,
            Port::Port1 => Self::Polarity1,
        }
    }

    /// Configuration (direction) register for the given port.
    pub const fn configuration(port: Port) -> Self {
        match port {
            Port::Port0 => Self::Configuration0,
            Port::Port1 => Self::Configuration1,
        }
    }

    /// Register offset sent as the command byte.
    pub const fn offset(self) -> u8 {
        self as u8
    }

    /// Value the register holds after power-on reset.
    ///
    /// `None` for the input registers, which follow the levels on the pins.
    pub const fn reset_value(self) -> Option<u8> {
        match self {
            // Output registers default high, and every pin starts as an input.
            Self::Output0 | Self::Output1 | Self::Configuration0 | Self::Configuration1 => {
                Some(0xFF)
            }
            Self::Polarity0 | Self::Polarity1 => Some(0x00),
            Self::Input0 | Self::Input1 => None,
        }
    }
}

impl From<Register> for u8 {
    fn from(value: Register) -> Self {
        value.offset()
    }
}

/// A pure update applied to a register byte.
///
/// These are the transformations used by the pin-granular operations of
/// [`Tca9535`](crate::Tca9535). Each variant carries a bitmask (or a whole byte, for
/// [`Update::Assign`]) and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Update {
    /// Set the masked bits.
    Set(u8),
    /// Clear the masked bits.
    Clear(u8),
    /// Flip the masked bits.
    Toggle(u8),
    /// Replace the byte entirely.
    Assign(u8),
}

impl Update {
    /// Set the masked bits if `condition` holds, otherwise clear them.
    pub const fn set_if(condition: bool, mask: u8) -> Self {
        if condition {
            Self::Set(mask)
        } else {
            Self::Clear(mask)
        }
    }

    /// Compute the new register value from the current one.
    pub const fn apply(self, current: u8) -> u8 {
        match self {
            Update::Set(mask) => current | mask,
            Update::Clear(mask) => current & !mask,
            Update::Toggle(mask) => current ^ mask,
            Update::Assign(value) => value,
        }
    }
}
