//! Deferred numeric values
//!
//! Task-level resource budgets may not be known when a task definition is
//! created (for example, when the figure comes from a lookup that settles
//! later in assembly). `LazyNumber` holds either a fixed value or a
//! zero-argument producer that is forced exactly once, at the
//! validation/emission boundary.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// A `u64` that is either fixed or produced on first resolution.
///
/// Deferred values are memoized: the producer runs at most once, so repeated
/// synthesis of the same construct sees the same number.
#[derive(Clone)]
pub struct LazyNumber {
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    Fixed(u64),
    Deferred {
        producer: Rc<dyn Fn() -> u64>,
        resolved: Rc<OnceCell<u64>>,
    },
}

impl LazyNumber {
    /// A value known up front
    pub fn fixed(value: u64) -> Self {
        Self {
            inner: Inner::Fixed(value),
        }
    }

    /// A value produced on demand at emission time
    pub fn deferred(produce: impl Fn() -> u64 + 'static) -> Self {
        Self {
            inner: Inner::Deferred {
                producer: Rc::new(produce),
                resolved: Rc::new(OnceCell::new()),
            },
        }
    }

    /// Whether resolution will run a producer (that has not run yet)
    pub fn is_deferred(&self) -> bool {
        match &self.inner {
            Inner::Fixed(_) => false,
            Inner::Deferred { resolved, .. } => resolved.get().is_none(),
        }
    }

    /// Force the value, running the producer at most once
    pub fn resolve(&self) -> u64 {
        match &self.inner {
            Inner::Fixed(value) => *value,
            Inner::Deferred { producer, resolved } => *resolved.get_or_init(|| producer()),
        }
    }
}

impl From<u64> for LazyNumber {
    fn from(value: u64) -> Self {
        Self::fixed(value)
    }
}

impl fmt::Debug for LazyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Fixed(value) => write!(f, "LazyNumber({value})"),
            Inner::Deferred { resolved, .. } => match resolved.get() {
                Some(value) => write!(f, "LazyNumber({value})"),
                None => write!(f, "LazyNumber(<deferred>)"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fixed_resolves_to_itself() {
        let value = LazyNumber::fixed(256);
        assert!(!value.is_deferred());
        assert_eq!(value.resolve(), 256);
    }

    #[test]
    fn test_from_u64() {
        let value: LazyNumber = 512.into();
        assert_eq!(value.resolve(), 512);
    }

    #[test]
    fn test_deferred_resolves_via_producer() {
        let value = LazyNumber::deferred(|| 128);
        assert!(value.is_deferred());
        assert_eq!(value.resolve(), 128);
        assert!(!value.is_deferred());
    }

    #[test]
    fn test_producer_runs_exactly_once() {
        let calls = Rc::new(Cell::new(0u32));
        let counted = Rc::clone(&calls);
        let value = LazyNumber::deferred(move || {
            counted.set(counted.get() + 1);
            1024
        });

        assert_eq!(value.resolve(), 1024);
        assert_eq!(value.resolve(), 1024);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_clones_share_resolution() {
        let calls = Rc::new(Cell::new(0u32));
        let counted = Rc::clone(&calls);
        let value = LazyNumber::deferred(move || {
            counted.set(counted.get() + 1);
            64
        });
        let clone = value.clone();

        assert_eq!(value.resolve(), 64);
        assert_eq!(clone.resolve(), 64);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_debug_formats() {
        assert_eq!(format!("{:?}", LazyNumber::fixed(7)), "LazyNumber(7)");

        let deferred = LazyNumber::deferred(|| 9);
        assert_eq!(format!("{deferred:?}"), "LazyNumber(<deferred>)");
        deferred.resolve();
        assert_eq!(format!("{deferred:?}"), "LazyNumber(9)");
    }
}
