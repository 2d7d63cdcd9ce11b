//! Timing helpers
mod timeprofile;

pub use timeprofile::{TimeProfile, TimeProfileStatistics};
