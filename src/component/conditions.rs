//! AND-reduced predicate sets gating load and active transitions.

use std::fmt;
use std::rc::Rc;

/// A side-effect-free readiness check.
pub type Predicate = Rc<dyn Fn() -> bool>;

/// Ordered collection of predicates reduced with logical AND.
#[derive(Clone, Default)]
pub struct ConditionSet {
    predicates: Vec<Predicate>,
}

impl ConditionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate and returns the handle used to remove it later.
    pub fn push(&mut self, predicate: impl Fn() -> bool + 'static) -> Predicate {
        let predicate: Predicate = Rc::new(predicate);
        self.predicates.push(Rc::clone(&predicate));
        predicate
    }

    /// Removes the first occurrence of `predicate` by identity.
    pub fn remove(&mut self, predicate: &Predicate) -> bool {
        match self.predicates.iter().position(|p| Rc::ptr_eq(p, predicate)) {
            Some(index) => {
                self.predicates.remove(index);
                true
            }
            None => false,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Copy of the predicate list, safe to evaluate while the set is borrowed
    /// elsewhere.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Predicate> {
        self.predicates.clone()
    }

    /// True iff every predicate holds. Every predicate is evaluated, even
    /// after a false one. The empty set reduces to true.
    #[must_use]
    pub fn reduce_and(&self) -> bool {
        reduce_and(&self.predicates)
    }
}

pub(crate) fn reduce_and(predicates: &[Predicate]) -> bool {
    predicates.iter().fold(true, |acc, p| p() && acc)
}

impl fmt::Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionSet")
            .field("len", &self.predicates.len())
            .finish()
    }
}
