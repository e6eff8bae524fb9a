pub mod v1;
pub mod validation;

pub use validation::Validation;
