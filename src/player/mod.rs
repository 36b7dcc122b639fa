//! Player core - transport state and control logic, free of any rendering backend.
//! The browser glue in `components` implements the ports declared here.

mod controller;
mod error;
mod ports;
mod state;
mod track;

pub use controller::*;
pub use error::*;
pub use ports::*;
pub use state::*;
pub use track::*;
