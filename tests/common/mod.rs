//! Simulated TCA9535 register file for tests that check register state rather than
//! exact bus traffic.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use tca9535_hal::Register;

pub const ADDRESS: u8 = 0x20;

#[derive(Debug)]
pub struct ChipState {
    pub address: u8,
    /// Registers 0x00 through 0x07. The input entries are unused, see `pin_levels`.
    pub registers: [u8; 8],
    /// Levels driven onto each port's pins from outside the chip.
    pub pin_levels: [u8; 2],
    pub reads: usize,
    pub writes: usize,
    pub fail_reads: Option<ErrorKind>,
    pub fail_writes: Option<ErrorKind>,
}

impl ChipState {
    fn read(&self, register: u8) -> Result<u8, ErrorKind> {
        match register {
            // Output pins read back their driven level, input pins the external level.
            0x00 | 0x01 => {
                let port = register as usize;
                let config = self.registers[0x06 + port];
                let output = self.registers[0x02 + port];
                Ok((output & !config) | (self.pin_levels[port] & config))
            }
            0x02..=0x07 => Ok(self.registers[register as usize]),
            _ => Err(ErrorKind::Other),
        }
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), ErrorKind> {
        match register {
            0x00 | 0x01 => Ok(()),
            0x02..=0x07 => {
                self.registers[register as usize] = value;
                Ok(())
            }
            _ => Err(ErrorKind::Other),
        }
    }
}

/// Cloneable handle to a simulated chip, so a test can inspect the chip while the
/// driver owns a clone of the bus.
#[derive(Debug, Clone)]
pub struct FakeChip(Rc<RefCell<ChipState>>);

impl FakeChip {
    /// A chip in its power-on state.
    pub fn new(address: u8) -> Self {
        Self(Rc::new(RefCell::new(ChipState {
            address,
            registers: Register::ALL.map(|register| register.reset_value().unwrap_or(0x00)),
            pin_levels: [0xFF, 0xFF],
            reads: 0,
            writes: 0,
            fail_reads: None,
            fail_writes: None,
        })))
    }

    pub fn state(&self) -> std::cell::RefMut<'_, ChipState> {
        self.0.borrow_mut()
    }

    pub fn register(&self, register: u8) -> u8 {
        self.0.borrow().registers[register as usize]
    }

    pub fn set_register(&self, register: u8, value: u8) {
        self.0.borrow_mut().registers[register as usize] = value;
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }
}

impl ErrorType for FakeChip {
    type Error = ErrorKind;
}

impl I2c for FakeChip {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.0.borrow_mut();
        if address != state.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        match operations {
            [Operation::Write([register]), Operation::Read([out])] => {
                state.reads += 1;
                if let Some(e) = state.fail_reads {
                    return Err(e);
                }
                *out = state.read(*register)?;
                Ok(())
            }
            [Operation::Write([register, value])] => {
                state.writes += 1;
                if let Some(e) = state.fail_writes {
                    return Err(e);
                }
                state.write(*register, *value)
            }
            _ => panic!("Unexpected I2C transaction shape: {operations:?}"),
        }
    }
}
