//! Wall-clock measurement returned alongside engine results.

use std::time::{Duration, Instant};

/// A value paired with the time it took to compute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timed<T> {
    value: T,
    elapsed: Duration,
}

impl<T> Timed<T> {
    /// Wraps an already measured value.
    #[must_use]
    pub const fn new(value: T, elapsed: Duration) -> Self {
        Self { value, elapsed }
    }

    /// The computed value.
    #[must_use]
    #[rustfmt::skip]
    pub const fn value(&self) -> &T { &self.value }

    /// Time spent computing the value.
    #[must_use]
    #[rustfmt::skip]
    pub const fn elapsed(&self) -> Duration { self.elapsed }

    /// Splits into the value and its elapsed time.
    #[must_use]
    pub fn into_parts(self) -> (T, Duration) {
        (self.value, self.elapsed)
    }

    /// Transforms the value, keeping the measurement.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Moves the measurement inside a successful result.
    ///
    /// # Errors
    /// Returns the wrapped error unchanged.
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Runs `f` and records how long it took.
///
/// # Examples
/// ```
/// use opsuite_core::timing::timed;
///
/// let measured = timed(|| 2 + 2);
/// assert_eq!(*measured.value(), 4);
/// ```
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let started = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_keeps_elapsed_on_success() {
        let measured = Timed::new(Ok::<_, ()>(7), Duration::from_millis(3));
        let inner = measured.transpose().expect("ok value");
        assert_eq!(*inner.value(), 7);
        assert_eq!(inner.elapsed(), Duration::from_millis(3));
    }

    #[test]
    fn transpose_surfaces_errors() {
        let measured = Timed::new(Err::<u8, _>("boom"), Duration::ZERO);
        assert_eq!(measured.transpose(), Err("boom"));
    }
}
