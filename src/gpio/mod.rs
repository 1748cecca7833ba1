//! Port and pin types, and [`embedded_hal::digital`] wrappers for individual pins.

mod common;
mod pins;

pub use common::{Direction, LogicLevel, Pin, PinMask, Port};
pub use pins::{ExpanderPin, Input, Output, Pins};
