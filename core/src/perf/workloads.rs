use crate::{
    sum::{regular_sum, unrolled_fixed_sum, unrolled_sum},
    timing::{Timed, time_once},
};
use anyhow::{Context, Result, anyhow};

/// Iteration bound of the fixed-size benchmark.
pub const FIXED_BOUND: i64 = 100_000_000;

/// Bound used by the Criterion benches; small enough to sample repeatedly.
pub const BENCH_BOUND: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Regular { n: i64 },
    UnrolledFixed { bound: i64 },
    Unrolled { factor: i64, elements: i64, range: i64 },
}

impl Kernel {
    pub fn run(&self) -> Result<i128> {
        match *self {
            Kernel::Regular { n } => Ok(regular_sum(n)),
            Kernel::UnrolledFixed { bound } => Ok(unrolled_fixed_sum(bound)),
            Kernel::Unrolled {
                factor,
                elements,
                range,
            } => unrolled_sum(factor, elements, range),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Workload {
    key: &'static str,
    label: &'static str,
    kernel: Kernel,
    expected: i128,
}

impl Workload {
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn bench_case_name(&self) -> String {
        format!("{}_sum", self.key)
    }

    /// Runs the kernel once without timing and checks its result.
    pub fn run(&self) -> Result<i128> {
        let value = self.kernel.run()?;
        self.verify(value)?;
        Ok(value)
    }

    /// Times one run of the kernel. Verification happens after the clock stops.
    pub fn time(&self) -> Result<Timed<i128>> {
        let timed = time_once(|| self.kernel.run())
            .transpose()
            .with_context(|| format!("workload {} failed", self.key))?;
        self.verify(timed.value)?;
        Ok(timed)
    }

    fn verify(&self, actual: i128) -> Result<()> {
        if actual == self.expected {
            Ok(())
        } else {
            Err(anyhow!(
                "workload {} expected {} but observed {}",
                self.key,
                self.expected,
                actual
            ))
        }
    }
}

// n(n-1)/2 for n = 100_000_000
const FIXED_REGULAR_EXPECTED: i128 = 4_999_999_950_000_000;
// Σ (5i + 10) for i = 0, 50, ..., 99_999_950
const FIXED_UNROLLED_EXPECTED: i128 = 499_999_770_000_000;

static FIXED_WORKLOADS: &[Workload] = &[
    Workload {
        key: "regular_loop",
        label: "Regular loop",
        kernel: Kernel::Regular { n: FIXED_BOUND },
        expected: FIXED_REGULAR_EXPECTED,
    },
    Workload {
        key: "unrolled_loop",
        label: "Unrolled loop",
        kernel: Kernel::UnrolledFixed { bound: FIXED_BOUND },
        expected: FIXED_UNROLLED_EXPECTED,
    },
];

static BENCH_WORKLOADS: &[Workload] = &[
    Workload {
        key: "regular",
        label: "Regular loop",
        kernel: Kernel::Regular { n: BENCH_BOUND },
        expected: 499_999_500_000,
    },
    Workload {
        key: "unrolled_fixed",
        label: "Fixed stride-50 unrolled loop",
        kernel: Kernel::UnrolledFixed { bound: BENCH_BOUND },
        expected: 49_997_700_000,
    },
    Workload {
        key: "unrolled_f5_e5",
        label: "Nested unrolled loop, factor 5, 5 elements",
        kernel: Kernel::Unrolled {
            factor: 5,
            elements: 5,
            range: BENCH_BOUND,
        },
        expected: 499_999_500_000,
    },
    Workload {
        key: "unrolled_f10_e2",
        label: "Nested unrolled loop, factor 10, 2 elements",
        kernel: Kernel::Unrolled {
            factor: 10,
            elements: 2,
            range: BENCH_BOUND,
        },
        expected: 99_999_100_000,
    },
];

/// The two loops timed by the fixed-size benchmark, in print order.
pub fn fixed_workloads() -> &'static [Workload] {
    FIXED_WORKLOADS
}

pub fn bench_workloads() -> &'static [Workload] {
    BENCH_WORKLOADS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_workloads_verify() -> Result<()> {
        for workload in bench_workloads() {
            workload.run()?;
        }
        Ok(())
    }

    #[test]
    fn timed_run_verifies_after_measuring() -> Result<()> {
        let timed = bench_workloads()[1].time()?;
        assert_eq!(timed.value, 49_997_700_000);
        Ok(())
    }

    #[test]
    fn fixed_expectations_match_closed_forms() {
        let n = FIXED_BOUND as i128;
        assert_eq!(FIXED_REGULAR_EXPECTED, n * (n - 1) / 2);

        // i = 50k for k in 0..steps; each step adds 5i + 10.
        let steps = n / 50;
        assert_eq!(FIXED_UNROLLED_EXPECTED, 250 * (steps * (steps - 1) / 2) + 10 * steps);
    }

    #[test]
    fn fixed_workloads_print_regular_then_unrolled() {
        let labels: Vec<&str> = fixed_workloads().iter().map(|w| w.label()).collect();
        assert_eq!(labels, ["Regular loop", "Unrolled loop"]);
        assert_eq!(
            fixed_workloads()[1].kernel(),
            Kernel::UnrolledFixed { bound: FIXED_BOUND }
        );
    }

    #[test]
    fn mismatched_result_is_reported() {
        let broken = Workload {
            key: "broken",
            label: "broken",
            kernel: Kernel::Regular { n: 10 },
            expected: 0,
        };
        let err = broken.run().unwrap_err();
        assert!(err.to_string().contains("expected 0 but observed 45"));
    }

    #[test]
    fn bench_case_names_are_unique() {
        let mut names: Vec<String> = bench_workloads().iter().map(Workload::bench_case_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), bench_workloads().len());
    }
}
