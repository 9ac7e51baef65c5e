//! CPU-time measurement.

use std::time::Duration;

/// Monotonic time source used to measure each phase.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;

    /// Run `f` and return its result with the time it took.
    fn measure<T>(&self, f: impl FnOnce() -> T) -> (T, Duration) {
        let start = self.now();
        let value = f();
        // A clock stepping backwards must not produce a negative duration.
        let elapsed = self.now().saturating_sub(start);
        (value, elapsed)
    }
}

/// CPU time consumed by this process.
///
/// Uses `CLOCK_PROCESS_CPUTIME_ID` on Unix so measurements ignore time spent
/// waiting on other processes. Other platforms, or a failing `clock_gettime`,
/// fall back to a monotonic wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCpuClock;

impl ProcessCpuClock {
    fn fallback() -> Duration {
        use std::sync::OnceLock;
        use std::time::Instant;

        static ORIGIN: OnceLock<Instant> = OnceLock::new();
        ORIGIN.get_or_init(Instant::now).elapsed()
    }
}

impl Clock for ProcessCpuClock {
    #[cfg(unix)]
    fn now(&self) -> Duration {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
        let ret = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
        if ret != 0 {
            return Self::fallback();
        }
        Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
    }

    #[cfg(not(unix))]
    fn now(&self) -> Duration {
        Self::fallback()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::cell::Cell;
    use std::time::Duration;

    /// Clock advancing by a fixed step on every reading.
    #[derive(Debug)]
    pub struct SteppingClock {
        current: Cell<Duration>,
        step: Duration,
    }

    impl SteppingClock {
        pub fn new(step: Duration) -> Self {
            Self {
                current: Cell::new(Duration::ZERO),
                step,
            }
        }

        /// A clock that never advances.
        pub fn frozen() -> Self {
            Self::new(Duration::ZERO)
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> Duration {
            let now = self.current.get();
            self.current.set(now + self.step);
            now
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::SteppingClock;
    use super::*;

    #[test]
    fn test_cpu_clock_is_monotonic() {
        let clock = ProcessCpuClock;
        let first = clock.now();
        let mut acc = 0u64;
        for i in 0..100_000u64 {
            acc = acc.wrapping_add(i * i);
        }
        std::hint::black_box(acc);
        assert!(clock.now() >= first);
    }

    #[test]
    fn test_measure_returns_value_and_elapsed() {
        let clock = SteppingClock::new(Duration::from_millis(5));
        let (value, elapsed) = clock.measure(|| 42);
        assert_eq!(value, 42);
        assert_eq!(elapsed, Duration::from_millis(5));
    }

    #[test]
    fn test_frozen_clock_measures_zero() {
        let (_, elapsed) = SteppingClock::frozen().measure(|| ());
        assert_eq!(elapsed, Duration::ZERO);
    }
}
