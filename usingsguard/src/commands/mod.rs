//! Commands module - check and fix mode implementations.

mod check;
mod fix;

pub use check::{run_check, CheckOptions};
pub use fix::{run_fix, FixOptions};
