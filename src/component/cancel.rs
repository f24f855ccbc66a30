use std::cell::Cell;
use std::rc::Rc;

/// Cooperative cancellation flag for one in-flight evaluation.
///
/// Best-effort: setting the flag does not interrupt anything. The evaluation
/// checks it at its suspension points and skips its remaining effects.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    canceled: Rc<Cell<bool>>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.set(true);
    }

    #[inline]
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled.get()
    }

    #[must_use]
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Rc::ptr_eq(&self.canceled, &other.canceled)
    }
}
