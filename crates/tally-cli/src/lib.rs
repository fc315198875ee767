//! Library side of the `toolkit-tally` binary.

pub mod logging;
pub mod process;
