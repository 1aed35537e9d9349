mod check;
pub mod color;
mod info;
pub mod interfere;
pub mod liveness;
mod spill;


pub use color::{Colorer, Coloring, Greedy, Simplify};
pub use interfere::{interference, Interference};
pub use liveness::{liveness, LiveSet, Liveness};
pub use spill::{allocate, Allocation, Failure, Spills};
