//! Fixed-size benchmark: times the regular loop and the stride-50 unrolled
//! loop once each over the same bound and prints both durations.

use anyhow::Result;
use unroll_core::{perf::workloads::fixed_workloads, trace};

const FIXED_TRACE_FILTER: &str = "unroll::fixed=debug,unroll::timing=trace";

fn main() -> Result<()> {
    trace::init_from_env(trace::TRACE_ENV, FIXED_TRACE_FILTER);

    for workload in fixed_workloads() {
        let timed = workload.time()?;
        tracing::debug!(target: "unroll::fixed", workload = workload.key(), result = %timed.value, "fixed workload timed");
        println!("{} time: {} seconds", workload.label(), timed.secs());
    }
    Ok(())
}
