//! Callback and predicate slots shared between the calendar and its surfaces.
//!
//! ## Usage
//!
//! Store caller closures in [`CallbackWith`] or [`Predicate`] so calendar args
//! stay `Clone + PartialEq` without comparing closures deeply.

use std::sync::Arc;

/// Stable, comparable slot handle for any shared callable trait object.
///
/// `Slot` compares by identity (`Arc::ptr_eq`).
pub struct Slot<F: ?Sized> {
    inner: Arc<F>,
}

impl<F: ?Sized> Slot<F> {
    /// Create a slot from a shared callable trait object.
    pub fn from_shared(handler: Arc<F>) -> Self {
        Self { inner: handler }
    }

    /// Read the current callable.
    pub fn shared(&self) -> Arc<F> {
        Arc::clone(&self.inner)
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<F: ?Sized> Eq for Slot<F> {}

/// Stable, comparable callback handle for `Fn(T) -> R`.
///
/// Used for every notification the calendar emits: page changes, dropdown
/// toggles, selection and pointer movement.
pub struct CallbackWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        let handler = self.slot.shared();
        handler(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> std::fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CallbackWith(..)")
    }
}

/// Total boolean predicate over `T`.
///
/// A predicate is always callable. [`Predicate::never`] (also the `Default`)
/// answers `false` for every input, which is how an absent caller rule is
/// represented.
pub struct Predicate<T> {
    slot: Slot<dyn Fn(T) -> bool + Send + Sync>,
}

impl<T> Predicate<T> {
    /// Create a predicate from a closure.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(T) -> bool + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(test)),
        }
    }

    /// A predicate that rejects nothing.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Evaluate the predicate.
    pub fn test(&self, value: T) -> bool {
        let test = self.slot.shared();
        test(value)
    }
}

impl<T> Default for Predicate<T> {
    fn default() -> Self {
        Self::never()
    }
}

impl<T, F> From<F> for Predicate<T>
where
    F: Fn(T) -> bool + Send + Sync + 'static,
{
    fn from(test: F) -> Self {
        Self::new(test)
    }
}

impl<T> From<Option<Predicate<T>>> for Predicate<T> {
    fn from(value: Option<Predicate<T>>) -> Self {
        value.unwrap_or_default()
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> PartialEq for Predicate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T> Eq for Predicate<T> {}

impl<T> std::fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_compare_by_identity() {
        let a = CallbackWith::<u8>::new(|_| {});
        let b = CallbackWith::<u8>::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn default_predicate_rejects_nothing() {
        let predicate = Predicate::<u32>::default();
        assert!(!predicate.test(0));
        assert!(!predicate.test(u32::MAX));
    }

    #[test]
    fn absent_predicate_normalizes_to_never() {
        let predicate: Predicate<u32> = None.into();
        assert!(!predicate.test(3));

        let present: Predicate<u32> = Some(Predicate::new(|value| value > 2)).into();
        assert!(present.test(3));
    }
}
