/// Success or failure of a fallible step.
///
/// `bind` sequences steps: each one runs only if everything before it
/// succeeded, and the first failure flows to the end of the chain untouched.
/// The success type may change at every step while the error type stays
/// fixed for the whole chain.
///
/// # Example
/// ```
/// use folio_lib::outcome::Outcome;
///
/// let len = Outcome::<i32, String>::success(5)
///     .bind(|n| Outcome::success(n.to_string()))
///     .bind(|s| Outcome::success(s.len()));
///
/// assert_eq!(len, Outcome::success(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Outcome may hold a failure that should be handled"]
pub enum Outcome<V, E> {
    Success(V),
    Failure(E),
}

impl<V, E> Outcome<V, E> {
    pub fn success(value: V) -> Self {
        Outcome::Success(value)
    }

    pub fn failure(error: E) -> Self {
        Outcome::Failure(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The success payload, or `None` for a failure
    pub fn value(&self) -> Option<&V> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The error payload, or `None` for a success
    pub fn error(&self) -> Option<&E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Apply the next step to the success payload.
    ///
    /// On a failure `func` is never called and the same error is carried
    /// into the new success type.
    pub fn bind<U, F>(self, func: F) -> Outcome<U, E>
    where
        F: FnOnce(V) -> Outcome<U, E>,
    {
        match self {
            Outcome::Success(value) => func(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transform the success payload with an infallible function
    pub fn map<U, F>(self, func: F) -> Outcome<U, E>
    where
        F: FnOnce(V) -> U,
    {
        self.bind(|value| Outcome::Success(func(value)))
    }

    pub fn map_error<G, F>(self, func: F) -> Outcome<V, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(func(error)),
        }
    }

    pub fn as_ref(&self) -> Outcome<&V, &E> {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(error) => Outcome::Failure(error),
        }
    }

    pub fn into_result(self) -> Result<V, E> {
        self.into()
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V, E> {
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(error),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for Result<V, E> {
    fn from(outcome: Outcome<V, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}
