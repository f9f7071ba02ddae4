//! Shared benchmark workloads used by the fixed-size benchmark binary and the
//! Criterion benches.
//!
//! Both tools pull their loops from here so a timing printed by one can be
//! compared with the other without wondering whether the bounds drifted.

pub mod workloads;
