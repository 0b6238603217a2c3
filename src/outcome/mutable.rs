use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::Outcome;

/// Success or failure whose success payload lives in a shared, mutable cell.
///
/// Instead of producing a new value at every step, `in_place_bind` edits the
/// payload where it sits. Clones share the cell: a mutation made through one
/// clone is visible through all of them. Use [`MutableOutcome::detached`]
/// when an independent copy is wanted.
///
/// The cell is an `Rc<RefCell<_>>`, so a `MutableOutcome` cannot cross
/// threads:
///
/// ```compile_fail
/// use folio_lib::outcome::MutableOutcome;
///
/// fn assert_send<T: Send>() {}
/// assert_send::<MutableOutcome<i32, String>>();
/// ```
///
/// ```compile_fail
/// use folio_lib::outcome::MutableOutcome;
///
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<MutableOutcome<i32, String>>();
/// ```
///
/// # Example
/// ```
/// use folio_lib::outcome::MutableOutcome;
///
/// let mut total = MutableOutcome::<i32, String>::success(0);
/// total.in_place_bind(|v| *v += 5).in_place_bind(|v| *v *= 2);
///
/// assert_eq!(total.value().map(|v| *v), Some(10));
/// ```
#[derive(Debug)]
#[must_use = "a MutableOutcome may hold a failure that should be handled"]
pub enum MutableOutcome<V, E> {
    Success(Rc<RefCell<V>>),
    Failure(E),
}

impl<V, E> MutableOutcome<V, E> {
    pub fn success(value: V) -> Self {
        MutableOutcome::Success(Rc::new(RefCell::new(value)))
    }

    pub fn failure(error: E) -> Self {
        MutableOutcome::Failure(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MutableOutcome::Success(_))
    }

    /// Mutate the shared payload. No-op on a failure.
    ///
    /// # Panics
    /// If the payload is already borrowed, e.g. a [`Ref`] returned by
    /// [`MutableOutcome::value`] on a clone is still alive.
    pub fn in_place_bind<F>(&mut self, func: F) -> &mut Self
    where
        F: FnOnce(&mut V),
    {
        if let MutableOutcome::Success(cell) = self {
            func(&mut *cell.borrow_mut());
        }
        self
    }

    /// Inspect the shared payload without changing it. No-op on a failure.
    pub fn read_only_bind<F>(&self, func: F) -> &Self
    where
        F: FnOnce(&V),
    {
        if let MutableOutcome::Success(cell) = self {
            func(&*cell.borrow());
        }
        self
    }

    /// Borrow of the current payload, or `None` for a failure
    pub fn value(&self) -> Option<Ref<'_, V>> {
        match self {
            MutableOutcome::Success(cell) => Some(cell.borrow()),
            MutableOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            MutableOutcome::Success(_) => None,
            MutableOutcome::Failure(error) => Some(error),
        }
    }

    /// True when both are successes backed by the same cell
    pub fn shares_value_with(&self, other: &Self) -> bool {
        match (self, other) {
            (MutableOutcome::Success(a), MutableOutcome::Success(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<V: Clone, E> MutableOutcome<V, E> {
    pub fn snapshot(&self) -> Option<V> {
        self.value().map(|value| value.clone())
    }

    /// Convert into an immutable [`Outcome`], cloning the payload only if
    /// another clone still holds the cell.
    pub fn into_outcome(self) -> Outcome<V, E> {
        match self {
            MutableOutcome::Success(cell) => match Rc::try_unwrap(cell) {
                Ok(unique) => Outcome::Success(unique.into_inner()),
                Err(shared) => {
                    let value = shared.borrow().clone();
                    Outcome::Success(value)
                }
            },
            MutableOutcome::Failure(error) => Outcome::Failure(error),
        }
    }
}

impl<V: Clone, E: Clone> MutableOutcome<V, E> {
    /// Copy with its own cell; later mutations do not leak between the two.
    pub fn detached(&self) -> Self {
        match self {
            MutableOutcome::Success(cell) => MutableOutcome::success(cell.borrow().clone()),
            MutableOutcome::Failure(error) => MutableOutcome::Failure(error.clone()),
        }
    }
}

// Clones alias the success cell rather than copying the payload
impl<V, E: Clone> Clone for MutableOutcome<V, E> {
    fn clone(&self) -> Self {
        match self {
            MutableOutcome::Success(cell) => MutableOutcome::Success(Rc::clone(cell)),
            MutableOutcome::Failure(error) => MutableOutcome::Failure(error.clone()),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for MutableOutcome<V, E> {
    fn from(outcome: Outcome<V, E>) -> Self {
        match outcome {
            Outcome::Success(value) => MutableOutcome::success(value),
            Outcome::Failure(error) => MutableOutcome::Failure(error),
        }
    }
}
