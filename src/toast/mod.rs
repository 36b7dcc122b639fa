//! Transient notifications and the flash-alert sweep.

mod alerts;
mod stack;

pub use alerts::*;
pub use stack::*;
