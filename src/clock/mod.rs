//! Age computation and the birthdate source.

pub mod age;
pub mod source;

pub use age::{
    compute_age, format_age, total_elapsed, AgeBreakdown, ElapsedTotals, BIRTHDATE_FORMAT,
    DEFAULT_BIRTHDATE,
};
pub use source::{AgeSource, Clock, LocalClock, RunningFlag};
