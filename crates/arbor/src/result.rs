//! Success/failure algebra of a read.

use core::ops::Add;

use arbor_value::Location;

use crate::env::ReaderEnv;
use crate::error::ErrorBuilders;
use crate::validate::Validator;

/// One error attached to the location where it was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct Cause<E> {
    pub location: Location,
    pub error: E,
}

/// Non-empty list of causes, in the order they were encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<E> {
    causes: Vec<Cause<E>>,
}

impl<E> Failure<E> {
    pub fn new(location: Location, error: E) -> Self {
        Self::from_cause(Cause { location, error })
    }

    pub fn from_cause(cause: Cause<E>) -> Self {
        Self {
            causes: vec![cause],
        }
    }

    pub fn causes(&self) -> &[Cause<E>] {
        &self.causes
    }

    pub fn into_causes(self) -> Vec<Cause<E>> {
        self.causes
    }

    pub fn first(&self) -> &Cause<E> {
        // Construction always pushes at least one cause.
        &self.causes[0]
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Concatenate, `self`'s causes first.
    pub fn merge(mut self, other: Failure<E>) -> Self {
        self.causes.extend(other.causes);
        self
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Cause<E>> {
        self.causes.iter()
    }
}

impl<E> Add for Failure<E> {
    type Output = Failure<E>;

    fn add(self, rhs: Failure<E>) -> Failure<E> {
        self.merge(rhs)
    }
}

impl<'a, E> IntoIterator for &'a Failure<E> {
    type Item = &'a Cause<E>;
    type IntoIter = core::slice::Iter<'a, Cause<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.causes.iter()
    }
}

/// Append `failure` to the failures collected so far.
pub(crate) fn accumulate<E>(collected: &mut Option<Failure<E>>, failure: Failure<E>) {
    *collected = Some(match collected.take() {
        Some(previous) => previous + failure,
        None => failure,
    });
}

// ============================================================================
// ReaderResult
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Success<T> {
    pub location: Location,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReaderResult<T, E> {
    Success(Success<T>),
    Failure(Failure<E>),
}

impl<T, E> ReaderResult<T, E> {
    pub fn success(location: Location, value: T) -> Self {
        ReaderResult::Success(Success { location, value })
    }

    pub fn failure(location: Location, error: E) -> Self {
        ReaderResult::Failure(Failure::new(location, error))
    }

    pub fn fold<R>(
        self,
        on_success: impl FnOnce(Success<T>) -> R,
        on_failure: impl FnOnce(Failure<E>) -> R,
    ) -> R {
        match self {
            ReaderResult::Success(success) => on_success(success),
            ReaderResult::Failure(failure) => on_failure(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReaderResult<U, E> {
        self.fold(
            |Success { location, value }| ReaderResult::success(location, f(value)),
            ReaderResult::Failure,
        )
    }

    pub fn flat_map<U>(
        self,
        f: impl FnOnce(Success<T>) -> ReaderResult<U, E>,
    ) -> ReaderResult<U, E> {
        self.fold(f, ReaderResult::Failure)
    }

    pub fn recover(self, f: impl FnOnce(Failure<E>) -> ReaderResult<T, E>) -> Self {
        self.fold(ReaderResult::Success, f)
    }

    /// Run `validator` on a success; an invalid value turns into a failure.
    pub fn validation<EB, V>(self, env: &ReaderEnv<EB>, validator: &V) -> Self
    where
        EB: ErrorBuilders<Error = E>,
        V: Validator<EB, T> + ?Sized,
    {
        self.flat_map(|success| {
            match validator.validate(env, &success.location, &success.value) {
                ValidationResult::Valid => ReaderResult::Success(success),
                ValidationResult::Invalid(failure) => ReaderResult::Failure(failure),
            }
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReaderResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReaderResult::Failure(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ReaderResult::Success(success) => Some(&success.value),
            ReaderResult::Failure(_) => None,
        }
    }

    pub fn failure_ref(&self) -> Option<&Failure<E>> {
        match self {
            ReaderResult::Success(_) => None,
            ReaderResult::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<T, Failure<E>> {
        self.fold(|success| Ok(success.value), Err)
    }
}

impl<T, E> ReaderResult<Option<T>, E> {
    /// Soft filter: a rejected value becomes `None` instead of failing.
    pub fn filter<EB, P>(self, env: &ReaderEnv<EB>, predicate: P) -> Self
    where
        P: Fn(&ReaderEnv<EB>, &Location, &T) -> bool,
    {
        match self {
            ReaderResult::Success(Success {
                location,
                value: Some(value),
            }) => {
                let keep = predicate(env, &location, &value);
                ReaderResult::success(location, keep.then_some(value))
            }
            other => other,
        }
    }
}

/// A success is absorbed by a failure; two failures concatenate.
impl<T, E> Add<Failure<E>> for ReaderResult<T, E> {
    type Output = Failure<E>;

    fn add(self, rhs: Failure<E>) -> Failure<E> {
        match self {
            ReaderResult::Success(_) => rhs,
            ReaderResult::Failure(failure) => failure + rhs,
        }
    }
}

// ============================================================================
// ValidationResult
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<E> {
    Valid,
    Invalid(Failure<E>),
}

impl<E> ValidationResult<E> {
    pub fn invalid(location: Location, error: E) -> Self {
        ValidationResult::Invalid(Failure::new(location, error))
    }

    /// `Valid` when `condition` holds, otherwise an error built lazily.
    pub fn check(condition: bool, location: &Location, error: impl FnOnce() -> E) -> Self {
        if condition {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(location.clone(), error())
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two outcomes; both invalid concatenates their causes.
    pub fn and(self, other: ValidationResult<E>) -> Self {
        match (self, other) {
            (ValidationResult::Valid, other) => other,
            (invalid, ValidationResult::Valid) => invalid,
            (ValidationResult::Invalid(a), ValidationResult::Invalid(b)) => {
                ValidationResult::Invalid(a + b)
            }
        }
    }

    pub fn into_failure(self) -> Option<Failure<E>> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(failure) => Some(failure),
        }
    }
}

impl<E> From<ValidationResult<E>> for Result<(), Failure<E>> {
    fn from(result: ValidationResult<E>) -> Self {
        match result {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(failure) => Err(failure),
        }
    }
}
