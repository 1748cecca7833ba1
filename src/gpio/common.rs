use core::ops::{BitOr, BitOrAssign};

use bit_field::BitField;
use embedded_hal::digital::PinState;

use crate::error::OutOfRange;

/// One of the two 8-bit ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Port 0, pins P00 to P07.
    Port0,
    /// Port 1, pins P10 to P17.
    Port1,
}

impl TryFrom<u8> for Port {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Port0),
            1 => Ok(Self::Port1),
            value => Err(OutOfRange { value, max: 1 }),
        }
    }
}

/// One of the eight pins of a port.
///
/// The discriminant is the pin's bit within the port registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pin {
    /// Bit 0.
    P0 = 0x01,
    /// Bit 1.
    P1 = 0x02,
    /// Bit 2.
    P2 = 0x04,
    /// Bit 3.
    P3 = 0x08,
    /// Bit 4.
    P4 = 0x10,
    /// Bit 5.
    P5 = 0x20,
    /// Bit 6.
    P6 = 0x40,
    /// Bit 7.
    P7 = 0x80,
}

impl Pin {
    /// All eight pins, lowest bit first.
    pub const ALL: [Pin; 8] = [
        Pin::P0,
        Pin::P1,
        Pin::P2,
        Pin::P3,
        Pin::P4,
        Pin::P5,
        Pin::P6,
        Pin::P7,
    ];

    /// The pin's single-bit mask.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Index of the pin's bit, 0 through 7.
    pub const fn bit(self) -> usize {
        self.mask().trailing_zeros() as usize
    }
}

impl TryFrom<u8> for Pin {
    type Error = OutOfRange;

    /// Convert a pin number (not a mask) into a pin.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Pin::ALL
            .get(value as usize)
            .copied()
            .ok_or(OutOfRange { value, max: 7 })
    }
}

impl BitOr for Pin {
    type Output = PinMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        PinMask::from(self) | rhs
    }
}

/// A set of pins within one port, for batch operations.
///
/// Build one by combining pins with `|`.
///
/// ```
/// use tca9535_hal::{Pin, PinMask};
///
/// let mask = Pin::P0 | Pin::P3 | Pin::P7;
/// assert_eq!(mask.bits(), 0b1000_1001);
/// assert!(mask.contains(Pin::P3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMask(u8);

impl PinMask {
    /// No pins.
    pub const NONE: PinMask = PinMask(0x00);
    /// All eight pins of the port.
    pub const ALL: PinMask = PinMask(0xFF);

    /// Create a mask from raw register bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw register bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the pin is part of this set.
    pub fn contains(self, pin: Pin) -> bool {
        self.0.get_bit(pin.bit())
    }

    /// Iterate over the pins in this set, lowest bit first.
    pub fn pins(self) -> impl Iterator<Item = Pin> {
        Pin::ALL.into_iter().filter(move |&pin| self.contains(pin))
    }
}

impl From<Pin> for PinMask {
    fn from(value: Pin) -> Self {
        Self(value.mask())
    }
}

impl BitOr for PinMask {
    type Output = PinMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Pin> for PinMask {
    type Output = PinMask;

    fn bitor(self, rhs: Pin) -> Self::Output {
        Self(self.0 | rhs.mask())
    }
}

impl BitOrAssign<Pin> for PinMask {
    fn bitor_assign(&mut self, rhs: Pin) {
        self.0 |= rhs.mask();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Pin direction, as stored in the configuration registers.
pub enum Direction {
    /// Bit set in the configuration register. This is the power-on state.
    Input,
    /// Bit clear in the configuration register.
    Output,
}

impl Direction {
    /// Direction of the pin as recorded in a configuration register byte.
    pub fn from_configuration(byte: u8, pin: Pin) -> Self {
        byte.get_bit(pin.bit()).into()
    }

    /// True if this is [`Direction::Input`].
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input)
    }

    /// True if this is [`Direction::Output`].
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output)
    }
}

impl From<bool> for Direction {
    fn from(value: bool) -> Self {
        if value { Self::Input } else { Self::Output }
    }
}

impl From<Direction> for bool {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Input => true,
            Direction::Output => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Logic level of a pin.
pub enum LogicLevel {
    /// Bit set in the input or output register.
    High,
    /// Bit clear.
    Low,
}

impl LogicLevel {
    /// Level of the pin as recorded in an input or output register byte.
    pub fn from_port(byte: u8, pin: Pin) -> Self {
        byte.get_bit(pin.bit()).into()
    }

    /// True if this is [`LogicLevel::High`].
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// True if this is [`LogicLevel::Low`].
    pub fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl From<bool> for LogicLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl From<LogicLevel> for bool {
    fn from(value: LogicLevel) -> Self {
        match value {
            LogicLevel::High => true,
            LogicLevel::Low => false,
        }
    }
}

impl From<PinState> for LogicLevel {
    fn from(value: PinState) -> Self {
        match value {
            PinState::High => Self::High,
            PinState::Low => Self::Low,
        }
    }
}

impl From<LogicLevel> for PinState {
    fn from(value: LogicLevel) -> Self {
        match value {
            LogicLevel::High => PinState::High,
            LogicLevel::Low => PinState::Low,
        }
    }
}
