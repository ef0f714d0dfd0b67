//! Validators: checks on a read value that never produce a value.
//!
//! Attach them to a reader with [`ReaderExt::validation`](crate::read::ReaderExt::validation),
//! or to a struct reader through its before/after hooks (see [`structure`]).

pub mod collection;
pub mod comparable;
pub mod string;
pub mod structure;

pub use collection::{
    MaxItems, MinItems, UniqueItems, UniqueItemsBy, max_items, min_items, unique_items,
    unique_items_by,
};
pub use comparable::{Equal, Gt, Lt, Max, Min, NotEqual, eq, ge, gt, le, lt, max, min, ne};
pub use string::{
    IsA, IsNotBlank, IsNotEmpty, MaxLength, MinLength, Pattern, is_a, is_not_blank, is_not_empty,
    max_length, min_length, pattern,
};
pub use structure::{
    AdditionalProperties, MaxPopulated, MaxProperties, MinPopulated, MinProperties,
    NotEmptyStruct, additional_properties, max_populated, max_properties, min_populated,
    min_properties, struct_is_not_empty,
};

use core::marker::PhantomData;

use arbor_value::Location;

use crate::env::ReaderEnv;
use crate::error::ErrorBuilders;
use crate::result::ValidationResult;

pub trait Validator<EB: ErrorBuilders, T: ?Sized> {
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error>;
}

impl<EB, T, F> Validator<EB, T> for F
where
    EB: ErrorBuilders,
    T: ?Sized,
    F: Fn(&ReaderEnv<EB>, &Location, &T) -> ValidationResult<EB::Error>,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        self(env, location, value)
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Both validators. Under fail-fast the second is skipped once the first
/// fails.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<EB, T, A, B> Validator<EB, T> for And<A, B>
where
    EB: ErrorBuilders,
    T: ?Sized,
    A: Validator<EB, T>,
    B: Validator<EB, T>,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        let first = self.first.validate(env, location, value);
        if !first.is_valid() && env.is_fail_fast() {
            return first;
        }
        first.and(self.second.validate(env, location, value))
    }
}

/// Lifts a validator of `T` to `Option<T>`; `None` is always valid.
#[derive(Debug, Clone)]
pub struct IfNotNull<V> {
    validator: V,
}

pub fn apply_if_not_null<V>(validator: V) -> IfNotNull<V> {
    IfNotNull { validator }
}

impl<EB, T, V> Validator<EB, Option<T>> for IfNotNull<V>
where
    EB: ErrorBuilders,
    V: Validator<EB, T>,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &Option<T>,
    ) -> ValidationResult<EB::Error> {
        match value {
            Some(value) => self.validator.validate(env, location, value),
            None => ValidationResult::Valid,
        }
    }
}

/// Runs the validator only where the predicate holds.
pub struct ApplyIf<EB, T: ?Sized, P, V> {
    predicate: P,
    validator: V,
    _marker: PhantomData<fn(&ReaderEnv<EB>, &T)>,
}

pub fn apply_if<EB, T, P, V>(predicate: P, validator: V) -> ApplyIf<EB, T, P, V>
where
    EB: ErrorBuilders,
    T: ?Sized,
    P: Fn(&ReaderEnv<EB>, &Location, &T) -> bool,
    V: Validator<EB, T>,
{
    ApplyIf {
        predicate,
        validator,
        _marker: PhantomData,
    }
}

impl<EB, T, P, V> Validator<EB, T> for ApplyIf<EB, T, P, V>
where
    EB: ErrorBuilders,
    T: ?Sized,
    P: Fn(&ReaderEnv<EB>, &Location, &T) -> bool,
    V: Validator<EB, T>,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        if (self.predicate)(env, location, value) {
            self.validator.validate(env, location, value)
        } else {
            ValidationResult::Valid
        }
    }
}

/// Combinators shared by the validators of this crate.
pub trait ValidatorExt: Sized {
    fn and<B>(self, second: B) -> And<Self, B> {
        And {
            first: self,
            second,
        }
    }

    fn if_not_null(self) -> IfNotNull<Self> {
        apply_if_not_null(self)
    }
}

impl<A, B> ValidatorExt for And<A, B> {}
impl<V> ValidatorExt for IfNotNull<V> {}
impl<EB, T: ?Sized, P, V> ValidatorExt for ApplyIf<EB, T, P, V> {}
