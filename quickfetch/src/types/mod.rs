//! Value types produced by probes

mod disk;
mod tally;
mod value;

pub use disk::*;
pub use tally::*;
pub use value::*;
