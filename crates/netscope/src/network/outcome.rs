//! Tagged result of a best-effort probe

use common::NetworkError;

/// Result of a probe whose failure is absorbed rather than propagated
#[derive(Debug)]
pub enum ProbeOutcome<T> {
    /// The probe ran and observed a value
    Observed(T),
    /// The probe could not produce a value
    Unavailable(NetworkError),
}

impl<T> ProbeOutcome<T> {
    /// Observed value, or `default` when unavailable
    pub fn value_or(self, default: T) -> T {
        match self {
            ProbeOutcome::Observed(value) => value,
            ProbeOutcome::Unavailable(_) => default,
        }
    }

    /// Observed value, or `T::default()` when unavailable
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or(T::default())
    }

    /// Failure reason, if any
    pub fn failure(&self) -> Option<&NetworkError> {
        match self {
            ProbeOutcome::Observed(_) => None,
            ProbeOutcome::Unavailable(err) => Some(err),
        }
    }
}
