pub mod day;
pub mod macros;

pub use day::*;
