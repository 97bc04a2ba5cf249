//! Two-tier result for page operations
//!
//! Page operations never fail outright against an unreliable site. They either
//! complete, or degrade to a safe default while keeping the cause, so callers
//! can tell "zero results" apart from "the query failed and was treated as zero".

use crate::Error;

/// Result of a page operation
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation observed what it reports
    Complete(T),
    /// The operation failed; `value` is the safe default it fell back to
    Degraded { value: T, cause: Error },
}

impl<T> Outcome<T> {
    /// Degraded outcome
    pub fn degraded(value: T, cause: Error) -> Self {
        Outcome::Degraded { value, cause }
    }

    /// Complete on `Ok`, otherwise degrade to `fallback`
    pub fn from_result(result: crate::Result<T>, fallback: T) -> Self {
        match result {
            Ok(value) => Outcome::Complete(value),
            Err(cause) => Outcome::Degraded { value: fallback, cause },
        }
    }

    /// Borrow the reported value
    pub fn value(&self) -> &T {
        match self {
            Outcome::Complete(value) => value,
            Outcome::Degraded { value, .. } => value,
        }
    }

    /// Take the reported value, discarding any cause
    pub fn into_value(self) -> T {
        match self {
            Outcome::Complete(value) => value,
            Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    /// Why the operation degraded
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Outcome::Complete(_) => None,
            Outcome::Degraded { cause, .. } => Some(cause),
        }
    }

    /// Transform the value, keeping the tier
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Complete(value) => Outcome::Complete(f(value)),
            Outcome::Degraded { value, cause } => Outcome::Degraded {
                value: f(value),
                cause,
            },
        }
    }

    /// Split into value and optional cause
    pub fn into_parts(self) -> (T, Option<Error>) {
        match self {
            Outcome::Complete(value) => (value, None),
            Outcome::Degraded { value, cause } => (value, Some(cause)),
        }
    }
}
