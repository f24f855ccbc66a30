//! Per-frame and per-resize callback lists.

use std::fmt;
use std::rc::Rc;

/// Frame callback, called with the elapsed-time multiplier.
pub type FrameFn = dyn Fn(f32);
/// Resize callback.
pub type ResizeFn = dyn Fn();

/// Ordered collection of callbacks with identity-based removal.
///
/// Duplicates are allowed; [`remove`](Self::remove) drops one occurrence.
/// Iterate through [`snapshot`](Self::snapshot) so callbacks may add or
/// remove entries while the set is being driven.
pub struct CallbackSet<F: ?Sized> {
    callbacks: Vec<Rc<F>>,
}

impl<F: ?Sized> CallbackSet<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub fn push(&mut self, callback: Rc<F>) {
        self.callbacks.push(callback);
    }

    /// Removes the first entry identical to `callback`.
    pub fn remove(&mut self, callback: &Rc<F>) -> bool {
        match self.callbacks.iter().position(|c| Rc::ptr_eq(c, callback)) {
            Some(index) => {
                self.callbacks.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, callback: &Rc<F>) -> bool {
        self.callbacks.iter().any(|c| Rc::ptr_eq(c, callback))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Copy of the entries in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.callbacks.clone()
    }
}

impl<F: ?Sized> Default for CallbackSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for CallbackSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSet")
            .field("len", &self.callbacks.len())
            .finish()
    }
}
