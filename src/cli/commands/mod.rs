//! CLI command implementations.

mod batch;
mod doctor;
mod single;

pub use batch::run_batch;
pub use doctor::run_doctor;
pub use single::run_single;
