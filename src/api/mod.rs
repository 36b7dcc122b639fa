pub mod models;
mod streamify;

pub use models::*;
pub use streamify::*;
