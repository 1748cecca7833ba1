use embedded_hal::i2c::I2c;

use super::{Direction, LogicLevel, Pin, Port};
use crate::{Error, Tca9535};

/// A TCA9535 pin that can be configured as a digital input or output.
#[derive(Debug)]
pub struct ExpanderPin<'a, I2C> {
    driver: &'a Tca9535<I2C>,
    port: Port,
    pin: Pin,
}

impl<'a, I2C: I2c> ExpanderPin<'a, I2C> {
    /// Port the pin belongs to.
    pub fn port(&self) -> Port {
        self.port
    }

    /// Pin within its port.
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Set up the pin as a digital input.
    ///
    /// You can retrieve the pin (for reconfiguration as an output) by calling
    /// [`Input::destroy`].
    pub fn configure_as_input(self) -> Result<Input<'a, I2C>, Error<I2C::Error>> {
        self.set_direction(Direction::Input)?;
        Ok(Input(self))
    }

    /// Set up the pin as a digital output.
    ///
    /// The pin drives whatever level its output register bit holds, which is high
    /// after power-on. Use [`ExpanderPin::configure_as_output_with_level`] to choose
    /// the level before the pin starts driving it.
    ///
    /// You can retrieve the pin (for reconfiguration as an input) by calling
    /// [`Output::destroy`].
    pub fn configure_as_output(self) -> Result<Output<'a, I2C>, Error<I2C::Error>> {
        self.set_direction(Direction::Output)?;
        Ok(Output(self))
    }

    /// Set the output level, then set up the pin as a digital output.
    pub fn configure_as_output_with_level(
        self,
        level: LogicLevel,
    ) -> Result<Output<'a, I2C>, Error<I2C::Error>> {
        self.driver
            .write_pin(self.port, self.pin, level)
            .map_err(Error::Bus)?;
        self.configure_as_output()
    }

    fn set_direction(&self, direction: Direction) -> Result<(), Error<I2C::Error>> {
        self.driver
            .configure_pin(self.port, self.pin, direction)
            .map_err(Error::Bus)
    }

    /// Check the configuration register still holds the expected direction.
    fn ensure_direction(&self, expected: Direction) -> Result<(), Error<I2C::Error>> {
        let direction = self
            .driver
            .pin_direction(self.port, self.pin)
            .map_err(Error::Bus)?;
        if direction == expected {
            Ok(())
        } else {
            Err(Error::PinModeChanged)
        }
    }
}

impl<'a, I2C: I2c> TryFrom<ExpanderPin<'a, I2C>> for Input<'a, I2C> {
    type Error = Error<I2C::Error>;
    fn try_from(pin: ExpanderPin<'a, I2C>) -> Result<Self, Self::Error> {
        pin.configure_as_input()
    }
}

impl<'a, I2C: I2c> TryFrom<ExpanderPin<'a, I2C>> for Output<'a, I2C> {
    type Error = Error<I2C::Error>;
    fn try_from(pin: ExpanderPin<'a, I2C>) -> Result<Self, Self::Error> {
        pin.configure_as_output()
    }
}

impl<'a, I2C> From<Input<'a, I2C>> for ExpanderPin<'a, I2C> {
    fn from(value: Input<'a, I2C>) -> Self {
        value.destroy()
    }
}

impl<'a, I2C> From<Output<'a, I2C>> for ExpanderPin<'a, I2C> {
    fn from(value: Output<'a, I2C>) -> Self {
        value.destroy()
    }
}

/// A TCA9535 pin in input mode.
#[derive(Debug)]
pub struct Input<'a, I2C>(ExpanderPin<'a, I2C>);

impl<'a, I2C> Input<'a, I2C> {
    /// Return the underlying pin object, so that it can be reconfigured.
    ///
    /// This method does not change any TCA9535 registers.
    pub fn destroy(self) -> ExpanderPin<'a, I2C> {
        self.0
    }
}

impl<'a, I2C: I2c> Input<'a, I2C> {
    /// Get the input level of this pin.
    pub fn get_level(&self) -> Result<LogicLevel, Error<I2C::Error>> {
        self.0.ensure_direction(Direction::Input)?;
        self.0
            .driver
            .read_pin(self.0.port, self.0.pin)
            .map_err(Error::Bus)
    }

    /// Switch the pin mode from input to output.
    pub fn try_into_output(self) -> Result<Output<'a, I2C>, Error<I2C::Error>> {
        self.0.ensure_direction(Direction::Input)?;
        self.0.configure_as_output()
    }
}

impl<I2C: I2c> embedded_hal::digital::ErrorType for Input<'_, I2C> {
    type Error = Error<I2C::Error>;
}

impl<I2C: I2c> embedded_hal::digital::InputPin for Input<'_, I2C> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.get_level().map(LogicLevel::is_high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.get_level().map(LogicLevel::is_low)
    }
}

/// A TCA9535 pin in output mode.
#[derive(Debug)]
pub struct Output<'a, I2C>(ExpanderPin<'a, I2C>);

impl<'a, I2C> Output<'a, I2C> {
    /// Return the underlying pin object, so that it can be reconfigured.
    pub fn destroy(self) -> ExpanderPin<'a, I2C> {
        self.0
    }
}

impl<'a, I2C: I2c> Output<'a, I2C> {
    /// Set the output level of this pin.
    pub fn set_level(&self, level: LogicLevel) -> Result<(), Error<I2C::Error>> {
        // Ensure the pin is still set as an output.
        self.0.ensure_direction(Direction::Output)?;
        self.0
            .driver
            .write_pin(self.0.port, self.0.pin, level)
            .map_err(Error::Bus)
    }

    /// Get the currently set output level of this pin.
    ///
    /// This is read from the output register, not from the pin itself.
    pub fn get_output_level(&self) -> Result<LogicLevel, Error<I2C::Error>> {
        self.0.ensure_direction(Direction::Output)?;
        self.0
            .driver
            .read_output_port(self.0.port)
            .map(|value| LogicLevel::from_port(value, self.0.pin))
            .map_err(Error::Bus)
    }

    /// Flip the output level of this pin.
    pub fn toggle_level(&self) -> Result<(), Error<I2C::Error>> {
        self.0.ensure_direction(Direction::Output)?;
        self.0
            .driver
            .toggle_pin(self.0.port, self.0.pin)
            .map_err(Error::Bus)
    }

    /// Switch the pin mode from output to input.
    pub fn try_into_input(self) -> Result<Input<'a, I2C>, Error<I2C::Error>> {
        self.0.ensure_direction(Direction::Output)?;
        self.0.configure_as_input()
    }
}

impl<I2C: I2c> embedded_hal::digital::ErrorType for Output<'_, I2C> {
    type Error = Error<I2C::Error>;
}

impl<I2C: I2c> embedded_hal::digital::OutputPin for Output<'_, I2C> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::High)
    }
}

impl<I2C: I2c> embedded_hal::digital::StatefulOutputPin for Output<'_, I2C> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.get_output_level().map(LogicLevel::is_high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.get_output_level().map(LogicLevel::is_low)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.toggle_level()
    }
}

impl<'a, I2C: I2c> TryFrom<Output<'a, I2C>> for Input<'a, I2C> {
    type Error = Error<I2C::Error>;

    fn try_from(value: Output<'a, I2C>) -> Result<Self, Self::Error> {
        value.try_into_input()
    }
}

impl<'a, I2C: I2c> TryFrom<Input<'a, I2C>> for Output<'a, I2C> {
    type Error = Error<I2C::Error>;

    fn try_from(value: Input<'a, I2C>) -> Result<Self, Self::Error> {
        value.try_into_output()
    }
}

/// The sixteen TCA9535 pins.
#[derive(Debug)]
pub struct Pins<'a, I2C> {
    /// Pin P00
    pub p0_0: ExpanderPin<'a, I2C>,
    /// Pin P01
    pub p0_1: ExpanderPin<'a, I2C>,
    /// Pin P02
    pub p0_2: ExpanderPin<'a, I2C>,
    /// Pin P03
    pub p0_3: ExpanderPin<'a, I2C>,
    /// Pin P04
    pub p0_4: ExpanderPin<'a, I2C>,
    /// Pin P05
    pub p0_5: ExpanderPin<'a, I2C>,
    /// Pin P06
    pub p0_6: ExpanderPin<'a, I2C>,
    /// Pin P07
    pub p0_7: ExpanderPin<'a, I2C>,
    /// Pin P10
    pub p1_0: ExpanderPin<'a, I2C>,
    /// Pin P11
    pub p1_1: ExpanderPin<'a, I2C>,
    /// Pin P12
    pub p1_2: ExpanderPin<'a, I2C>,
    /// Pin P13
    pub p1_3: ExpanderPin<'a, I2C>,
    /// Pin P14
    pub p1_4: ExpanderPin<'a, I2C>,
    /// Pin P15
    pub p1_5: ExpanderPin<'a, I2C>,
    /// Pin P16
    pub p1_6: ExpanderPin<'a, I2C>,
    /// Pin P17
    pub p1_7: ExpanderPin<'a, I2C>,
}

impl<'a, I2C> Pins<'a, I2C> {
    pub(crate) fn new(driver: &'a Tca9535<I2C>) -> Self {
        let pin = |port, pin| ExpanderPin { driver, port, pin };
        Self {
            p0_0: pin(Port::Port0, Pin::P0),
            p0_1: pin(Port::Port0, Pin::P1),
            p0_2: pin(Port::Port0, Pin::P2),
            p0_3: pin(Port::Port0, Pin::P3),
            p0_4: pin(Port::Port0, Pin::P4),
            p0_5: pin(Port::Port0, Pin::P5),
            p0_6: pin(Port::Port0, Pin::P6),
            p0_7: pin(Port::Port0, Pin::P7),
            p1_0: pin(Port::Port1, Pin::P0),
            p1_1: pin(Port::Port1, Pin::P1),
            p1_2: pin(Port::Port1, Pin::P2),
            p1_3: pin(Port::Port1, Pin::P3),
            p1_4: pin(Port::Port1, Pin::P4),
            p1_5: pin(Port::Port1, Pin::P5),
            p1_6: pin(Port::Port1, Pin::P6),
            p1_7: pin(Port::Port1, Pin::P7),
        }
    }
}
