use embedded_hal::i2c::I2c;

use super::Tca9535;
use crate::gpio::{Direction, Pin, Port, Pins};

impl<I2C: I2c> Tca9535<I2C> {
    /// Take the sixteen pin structs for individual GPIO operation.
    ///
    /// This can only be done once, and will return `None` afterwards.
    pub fn take_pins(&self) -> Option<Pins<'_, I2C>> {
        if self.pins_taken.get() {
            None
        } else {
            self.pins_taken.set(true);
            Some(Pins::new(self))
        }
    }

    /// Direction of one pin, read from the configuration register.
    pub fn pin_direction(&self, port: Port, pin: Pin) -> Result<Direction, I2C::Error> {
        self.read_configuration(port).map(|value| Direction::from_configuration(value, pin))
    }
}
