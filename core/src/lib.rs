pub mod plot;
pub mod prompt;
pub mod scenario;
pub mod sum;
pub mod timing;
pub mod trace;

// Workloads shared by the fixed benchmark and Criterion
pub mod perf;
