mod library;
mod track_row;

pub use library::*;
pub use track_row::*;
