pub mod constraints;
pub mod message;
pub mod program;
pub mod register;

pub use constraints::Constraints;
pub use driver::Driver;

mod driver;
