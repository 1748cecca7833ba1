//! embedded-hal digital pin wrappers, against a simulated chip.
mod common;

use common::{ADDRESS, FakeChip};
use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use embedded_hal::i2c::ErrorKind;
use tca9535_hal::gpio::Output;
use tca9535_hal::{Direction, Error, LogicLevel, Pin, Port, Tca9535};

/// Pins can only be taken once.
#[test]
fn take_pins_once() -> Result<(), ErrorKind> {
    let device = Tca9535::configure(FakeChip::new(ADDRESS), ADDRESS)?;
    let pins = device.take_pins();
    assert!(pins.is_some());
    assert!(device.take_pins().is_none());

    let pins = pins.unwrap();
    assert_eq!(pins.p0_0.port(), Port::Port0);
    assert_eq!(pins.p1_7.port(), Port::Port1);
    assert_eq!(pins.p1_7.pin(), Pin::P7);
    Ok(())
}

/// An output pin drives its bit of the output register.
#[test]
fn output_pin_sets_level() -> Result<(), Error<ErrorKind>> {
    let chip = FakeChip::new(ADDRESS);
    let device = Tca9535::configure(chip.clone(), ADDRESS).map_err(Error::Bus)?;
    let pins = device.take_pins().unwrap();

    let mut led = pins.p1_2.configure_as_output()?;
    assert_eq!(chip.register(0x07), 0b1111_1011);

    led.set_low()?;
    assert_eq!(chip.register(0x03), 0b1111_1011);
    assert!(led.is_set_low()?);

    led.set_high()?;
    assert_eq!(chip.register(0x03), 0xFF);
    assert!(led.is_set_high()?);

    led.toggle()?;
    assert_eq!(chip.register(0x03), 0b1111_1011);
    Ok(())
}

/// The level is written before the pin starts driving it.
#[test]
fn output_pin_with_initial_level() -> Result<(), Error<ErrorKind>> {
    let chip = FakeChip::new(ADDRESS);
    let device = Tca9535::configure(chip.clone(), ADDRESS).map_err(Error::Bus)?;
    let pins = device.take_pins().unwrap();

    let led: Output<'_, _> = pins.p0_4.configure_as_output_with_level(LogicLevel::Low)?;
    assert_eq!(chip.register(0x02), 0b1110_1111);
    assert_eq!(chip.register(0x06), 0b1110_1111);
    assert_eq!(led.get_output_level()?, LogicLevel::Low);
    Ok(())
}

/// An input pin reads the external level of its pin.
#[test]
fn input_pin_reads_level() -> Result<(), Error<ErrorKind>> {
    let chip = FakeChip::new(ADDRESS);
    let device = Tca9535::configure(chip.clone(), ADDRESS).map_err(Error::Bus)?;
    let pins = device.take_pins().unwrap();

    let mut button = pins.p0_6.configure_as_input()?;
    chip.state().pin_levels[0] = 0b0100_0000;
    assert!(button.is_high()?);
    chip.state().pin_levels[0] = 0b1011_1111;
    assert!(button.is_low()?);
    Ok(())
}

/// Reconfiguring through the register API is detected by the wrappers.
#[test]
fn pin_mode_changed_underneath() -> Result<(), Error<ErrorKind>> {
    let chip = FakeChip::new(ADDRESS);
    let device = Tca9535::configure(chip.clone(), ADDRESS).map_err(Error::Bus)?;
    let pins = device.take_pins().unwrap();

    let mut led = pins.p0_1.configure_as_output()?;
    device
        .configure_pin(Port::Port0, Pin::P1, Direction::Input)
        .map_err(Error::Bus)?;
    let writes = chip.writes();
    assert_eq!(led.set_high(), Err(Error::PinModeChanged));
    assert_eq!(chip.writes(), writes);

    let mut button = pins.p1_0.configure_as_input()?;
    device
        .configure_pin(Port::Port1, Pin::P0, Direction::Output)
        .map_err(Error::Bus)?;
    assert_eq!(button.is_high(), Err(Error::PinModeChanged));
    Ok(())
}

/// Pins switch direction and can be given back for reconfiguration.
#[test]
fn switch_direction() -> Result<(), Error<ErrorKind>> {
    let chip = FakeChip::new(ADDRESS);
    let device = Tca9535::configure(chip.clone(), ADDRESS).map_err(Error::Bus)?;
    let pins = device.take_pins().unwrap();

    let output = pins.p1_5.configure_as_output()?;
    assert_eq!(chip.register(0x07), 0b1101_1111);

    let input = output.try_into_input()?;
    assert_eq!(chip.register(0x07), 0xFF);

    let output = input.try_into_output()?;
    assert_eq!(chip.register(0x07), 0b1101_1111);

    let pin = output.destroy();
    let _input = pin.configure_as_input()?;
    assert_eq!(chip.register(0x07), 0xFF);
    Ok(())
}

/// Bus failures surface as the wrapped bus error.
#[test]
fn bus_error_is_wrapped() -> Result<(), Error<ErrorKind>> {
    let chip = FakeChip::new(ADDRESS);
    let device = Tca9535::configure(chip.clone(), ADDRESS).map_err(Error::Bus)?;
    let pins = device.take_pins().unwrap();
    let mut button = pins.p0_0.configure_as_input()?;

    chip.state().fail_reads = Some(ErrorKind::Other);
    assert_eq!(button.is_low(), Err(Error::Bus(ErrorKind::Other)));
    Ok(())
}
