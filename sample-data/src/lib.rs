pub mod formatting;
pub mod generator;
pub mod validation;

pub use formatting::*;
pub use generator::*;
pub use validation::*;
