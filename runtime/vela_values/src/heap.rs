//! Shared heap allocation for runtime values.
//!
//! All heap-backed value payloads go through `Heap<T>`, which wraps `Arc`
//! behind factory methods on `Value`. Sharing a `Heap` never deep-copies the
//! payload; an ephemeral reference to a value is another handle to the same
//! allocation.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted, immutable heap allocation.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    /// Allocate a payload. Crate-internal: external code goes through the
    /// `Value` factory methods.
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_the_allocation() {
        let a = Heap::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(Heap::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn distinct_allocations_are_not_ptr_eq() {
        let a = Heap::new(1);
        let b = Heap::new(1);
        assert!(!Heap::ptr_eq(&a, &b));
    }
}
