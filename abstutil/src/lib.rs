//! The contents of this crate need to be organized better:
//!
//! - Timer (a mix of logging and profiling)
//! - types/utils that would probably be part of the standard library if Rust didn't have such a
//!   small std
//! - JSON I/O helpers shared by the map and tensor crates

#[macro_use]
extern crate log;

mod collections;
mod io;
pub mod logger;
mod time;
mod utils;

pub use crate::collections::Counter;
pub use crate::io::{from_json, read_json, to_json, write_json};
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::utils::{basename, prettyprint_usize};
