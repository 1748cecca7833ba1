//! Async driver bus traffic, run to completion with `embassy_futures::block_on`.
#![cfg(feature = "async")]

use std::cell::Cell;

use embassy_futures::block_on;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use tca9535_hal::{Direction, LogicLevel, Pin, Port, Register, Tca9535Async};

const ADDRESS: u8 = 0x27;

fn read(register: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write_read(ADDRESS, vec![register], vec![value])
}

fn write(register: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write(ADDRESS, vec![register, value])
}

/// The factory sets every pin of both ports as an input.
#[test]
fn configure_makes_all_pins_inputs() -> Result<(), ErrorKind> {
    let expectations = [write(0x06, 0xFF), write(0x07, 0xFF)];
    let device = block_on(Tca9535Async::configure(I2cMock::new(&expectations), ADDRESS))?;
    assert_eq!(device.bus_address(), 0x4E);
    device.release().done();
    Ok(())
}

/// A failed first configuration write stops construction before the second.
#[test]
fn configure_fails_fast() {
    let expectations = [write(0x06, 0xFF).with_error(ErrorKind::Other)];
    let mut i2c = I2cMock::new(&expectations);
    let result = block_on(Tca9535Async::configure(i2c.clone(), ADDRESS));
    assert!(matches!(result, Err(ErrorKind::Other)));
    i2c.done();
}

/// Pin-granular operations read, change one bit and write back.
#[test]
fn pin_operations() -> Result<(), ErrorKind> {
    let expectations = [
        read(0x06, 0xFF),
        write(0x06, 0b1111_1110),
        read(0x02, 0b0000_0000),
        write(0x02, 0b0000_0001),
        read(0x02, 0b0000_0001),
        write(0x02, 0b0000_0000),
        read(0x01, 0b0010_0000),
    ];
    let mut device = Tca9535Async::new(I2cMock::new(&expectations), ADDRESS);
    block_on(async {
        device
            .configure_pin(Port::Port0, Pin::P0, Direction::Output)
            .await?;
        device
            .write_pin(Port::Port0, Pin::P0, LogicLevel::High)
            .await?;
        device.toggle_pin(Port::Port0, Pin::P0).await?;
        let level = device.read_pin(Port::Port1, Pin::P5).await?;
        assert_eq!(level, LogicLevel::High);
        Ok::<(), ErrorKind>(())
    })?;
    device.release().done();
    Ok(())
}

/// Port operations are single transfers.
#[test]
fn port_operations() -> Result<(), ErrorKind> {
    let expectations = [write(0x03, 0x3C), read(0x00, 0x81)];
    let mut device = Tca9535Async::new(I2cMock::new(&expectations), ADDRESS);
    block_on(device.write_port(Port::Port1, 0x3C))?;
    assert_eq!(block_on(device.read_port(Port::Port0))?, 0x81);
    device.release().done();
    Ok(())
}

/// A failed read means the transformation is never called and nothing is written.
#[test]
fn transact_stops_after_failed_read() {
    let expectations = [read(0x07, 0x00).with_error(ErrorKind::Bus)];
    let mut device = Tca9535Async::new(I2cMock::new(&expectations), ADDRESS);
    let called = Cell::new(false);
    let result = block_on(device.transact(Register::Configuration1, |value| {
        called.set(true);
        value
    }));
    assert_eq!(result, Err(ErrorKind::Bus));
    assert!(!called.get());
    device.release().done();
}

/// A failed write is returned unchanged.
#[test]
fn write_error_is_returned() {
    let expectations = [
        read(0x02, 0x00),
        write(0x02, 0x80).with_error(ErrorKind::ArbitrationLoss),
    ];
    let mut device = Tca9535Async::new(I2cMock::new(&expectations), ADDRESS);
    let result = block_on(device.write_pin(Port::Port0, Pin::P7, LogicLevel::High));
    assert_eq!(result, Err(ErrorKind::ArbitrationLoss));
    device.release().done();
}

/// The async driver keeps only the low seven bits of the address too.
#[test]
fn address_keeps_low_seven_bits() {
    let device = Tca9535Async::new(I2cMock::new(&[]), 0xA7);
    assert_eq!(device.address(), 0x27);
    assert_eq!(device.bus_address(), 0x4E);
    device.release().done();
}
