use core::fmt;

/// Problems reported by the [`embedded_hal::digital`] pin wrappers.
///
/// The register-level methods of [`Tca9535`] return the bus error unchanged. Only the
/// pin wrappers in [`crate::gpio`] need this type, because the digital traits require an
/// error implementing [`embedded_hal::digital::Error`].
///
/// [`Tca9535`]: crate::Tca9535
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A transfer on the I2C bus failed.
    ///
    /// The enclosed value is the error returned by the bus implementation.
    Bus(E),
    /// The pin's direction was changed in the configuration register without going
    /// through the pin wrapper.
    ///
    /// This happens when the register-level API (or another bus master) reconfigures a
    /// pin that has been converted into an [`Input`] or [`Output`].
    ///
    /// [`Input`]: crate::gpio::Input
    /// [`Output`]: crate::gpio::Output
    PinModeChanged,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "I2C bus error: {e:?}"),
            Error::PinModeChanged => f.write_str("pin direction changed underneath its wrapper"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

impl<E: fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        // The digital traits only define the one kind.
        embedded_hal::digital::ErrorKind::Other
    }
}

/// A pin or port number outside the range the TCA9535 has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange {
    /// The number that was given.
    pub value: u8,
    /// The largest accepted number.
    pub max: u8,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is out of range 0..={}", self.value, self.max)
    }
}

impl core::error::Error for OutOfRange {}
