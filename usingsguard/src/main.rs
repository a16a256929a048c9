//! Main binary entry point for usingsguard.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so that it behaves the same as the `usingsguard-cli` crate.

use anyhow::Result;

fn main() -> Result<()> {
    let code = usingsguard::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
