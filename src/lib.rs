#![doc = include_str!("../README.md")]
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "async")]
pub mod asynch;
mod driver;
mod error;
pub mod gpio;
pub mod registers;

#[cfg(feature = "async")]
pub use asynch::Tca9535Async;
pub use driver::Tca9535;
pub use error::{Error, OutOfRange};
pub use gpio::{Direction, LogicLevel, Pin, PinMask, Port};
pub use registers::{Register, Update};
