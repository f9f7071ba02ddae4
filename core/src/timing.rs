use std::hint::black_box;
use std::time::{Duration, Instant};

/// Result of a single timed call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Lifts a fallible measurement so callers can `?` the kernel error and keep the timing.
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Runs `f` exactly once under a monotonic clock. No warm-up, no averaging.
pub fn time_once<T, F>(f: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = black_box(f());
    let elapsed = start.elapsed();
    tracing::trace!(target: "unroll::timing", elapsed_ns = elapsed.as_nanos() as u64, "timed call finished");
    Timed { value, elapsed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn runs_closure_exactly_once() {
        let calls = Cell::new(0);
        let timed = time_once(|| {
            calls.set(calls.get() + 1);
            42
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(timed.value, 42);
    }

    #[test]
    fn measures_at_least_the_work_duration() {
        let timed = time_once(|| std::thread::sleep(Duration::from_millis(5)));
        assert!(timed.elapsed >= Duration::from_millis(5));
        assert!(timed.secs() >= 0.005);
    }

    #[test]
    fn transpose_keeps_elapsed_and_surfaces_errors() {
        let ok: Timed<Result<i32, String>> = Timed {
            value: Ok(7),
            elapsed: Duration::from_micros(3),
        };
        let lifted = ok.transpose().expect("ok value");
        assert_eq!(lifted.value, 7);
        assert_eq!(lifted.elapsed, Duration::from_micros(3));

        let failed: Timed<Result<i32, String>> = Timed {
            value: Err("boom".to_string()),
            elapsed: Duration::ZERO,
        };
        assert_eq!(failed.transpose().unwrap_err(), "boom");
    }
}
