#![forbid(unsafe_code)]

pub mod model;
pub mod stage;
pub mod tally;

pub use stage::{Stage, StageError, StageEvent};
pub use tally::{ReviewFilter, Tally};
