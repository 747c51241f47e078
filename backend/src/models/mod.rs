pub mod macros;
pub mod person;

pub use person::*;
