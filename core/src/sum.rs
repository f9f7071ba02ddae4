//! Summation kernels compared by the benchmarks.
//!
//! `regular_sum` is the one-step-per-iteration baseline. The two unrolled
//! variants do not compute the same value as the baseline in general: the
//! fixed variant only visits five values out of every fifty, and the
//! parameterized variant double-counts whenever the element count exceeds the
//! unrolling factor. Both are kept exactly as measured.
//!
//! Each loop counter passes through `black_box` so the optimiser cannot fold a
//! loop into its closed form and leave nothing to time.

use anyhow::{Result, bail};
use std::hint::black_box;

/// Stride of the fixed unrolled loop.
///
/// A five-wide unroll would normally advance by five. The measured loop
/// advances by fifty, so `unrolled_fixed_sum(n)` is not `regular_sum(n)`.
pub const FIXED_UNROLL_STEP: usize = 50;

/// Sum of `0..n`. Non-positive `n` is an empty range.
pub fn regular_sum(n: i64) -> i128 {
    let mut total: i128 = 0;
    for i in 0..n {
        total += black_box(i) as i128;
    }
    total
}

/// Fixed five-wide unrolled loop over `0..bound` with a stride of [`FIXED_UNROLL_STEP`].
pub fn unrolled_fixed_sum(bound: i64) -> i128 {
    let mut total: i128 = 0;
    for i in (0..bound).step_by(FIXED_UNROLL_STEP) {
        let i = black_box(i) as i128;
        total += i;
        total += i + 1;
        total += i + 2;
        total += i + 3;
        total += i + 4;
    }
    total
}

/// Nested unrolled loop: for every `i` in `0..range` stepping by `factor`, add
/// `i + j` for each `j` in `0..elements`.
///
/// A negative factor walks downwards while `i > range`. A zero factor is
/// rejected.
pub fn unrolled_sum(factor: i64, elements: i64, range: i64) -> Result<i128> {
    let mut total: i128 = 0;
    for i in StepRange::new(0, range, factor)? {
        let base = black_box(i) as i128;
        for j in 0..elements {
            total += base + black_box(j) as i128;
        }
    }
    Ok(total)
}

/// Half-open stepped range over `i64` that accepts negative steps.
#[derive(Debug, Clone)]
pub struct StepRange {
    next: Option<i64>,
    end: i64,
    step: i64,
}

impl StepRange {
    pub fn new(start: i64, end: i64, step: i64) -> Result<Self> {
        if step == 0 {
            bail!("unrolling factor must not be zero");
        }
        Ok(Self {
            next: Some(start),
            end,
            step,
        })
    }
}

impl Iterator for StepRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        let in_range = if self.step > 0 {
            current < self.end
        } else {
            current > self.end
        };
        if !in_range {
            self.next = None;
            return None;
        }
        // Stepping past i64 bounds ends the walk.
        self.next = current.checked_add(self.step);
        Some(current)
    }
}
