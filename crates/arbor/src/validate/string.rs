//! Rules over text. Lengths count Unicode scalar values, not bytes.

use arbor_value::Location;
use regex::Regex;

use crate::env::ReaderEnv;
use crate::error::{
    IsAErrorBuilder, IsNotBlankErrorBuilder, IsNotEmptyErrorBuilder, MaxLengthErrorBuilder,
    MinLengthErrorBuilder, PatternErrorBuilder,
};
use crate::result::ValidationResult;
use crate::validate::{Validator, ValidatorExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLength(usize);

pub fn min_length(expected: usize) -> MinLength {
    MinLength(expected)
}

impl ValidatorExt for MinLength {}

impl<EB, T> Validator<EB, T> for MinLength
where
    EB: MinLengthErrorBuilder,
    T: AsRef<str> + ?Sized,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        let actual = value.as_ref().chars().count();
        ValidationResult::check(actual >= self.0, location, || {
            env.error_builders.min_length_error(self.0, actual)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLength(usize);

pub fn max_length(expected: usize) -> MaxLength {
    MaxLength(expected)
}

impl ValidatorExt for MaxLength {}

impl<EB, T> Validator<EB, T> for MaxLength
where
    EB: MaxLengthErrorBuilder,
    T: AsRef<str> + ?Sized,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        let actual = value.as_ref().chars().count();
        ValidationResult::check(actual <= self.0, location, || {
            env.error_builders.max_length_error(self.0, actual)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsNotEmpty;

pub fn is_not_empty() -> IsNotEmpty {
    IsNotEmpty
}

impl ValidatorExt for IsNotEmpty {}

impl<EB, T> Validator<EB, T> for IsNotEmpty
where
    EB: IsNotEmptyErrorBuilder,
    T: AsRef<str> + ?Sized,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        ValidationResult::check(!value.as_ref().is_empty(), location, || {
            env.error_builders.is_not_empty_error()
        })
    }
}

/// Rejects text made only of whitespace, including the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsNotBlank;

pub fn is_not_blank() -> IsNotBlank {
    IsNotBlank
}

impl ValidatorExt for IsNotBlank {}

impl<EB, T> Validator<EB, T> for IsNotBlank
where
    EB: IsNotBlankErrorBuilder,
    T: AsRef<str> + ?Sized,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        ValidationResult::check(!value.as_ref().trim().is_empty(), location, || {
            env.error_builders.is_not_blank_error()
        })
    }
}

/// The regex must match somewhere in the text; anchor it for a full match.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

pub fn pattern(regex: Regex) -> Pattern {
    Pattern(regex)
}

impl ValidatorExt for Pattern {}

impl<EB, T> Validator<EB, T> for Pattern
where
    EB: PatternErrorBuilder,
    T: AsRef<str> + ?Sized,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        let text = value.as_ref();
        ValidationResult::check(self.0.is_match(text), location, || {
            env.error_builders.pattern_error(text, self.0.as_str())
        })
    }
}

#[derive(Debug, Clone)]
pub struct IsA<P>(P);

/// Accept text for which `predicate` holds.
pub fn is_a<P: Fn(&str) -> bool>(predicate: P) -> IsA<P> {
    IsA(predicate)
}

impl<P> ValidatorExt for IsA<P> {}

impl<EB, T, P> Validator<EB, T> for IsA<P>
where
    EB: IsAErrorBuilder,
    T: AsRef<str> + ?Sized,
    P: Fn(&str) -> bool,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &T,
    ) -> ValidationResult<EB::Error> {
        let text = value.as_ref();
        ValidationResult::check((self.0)(text), location, || {
            env.error_builders.is_a_error(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DefaultErrorBuilders, ReadError};

    fn check<V: Validator<DefaultErrorBuilders, str>>(v: V, value: &str) -> ValidationResult<ReadError> {
        v.validate(&ReaderEnv::default(), &Location::root(), value)
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(check(min_length(3), "日本語").is_valid());
        assert!(check(max_length(3), "日本語").is_valid());
        assert_eq!(
            check(min_length(4), "日本語"),
            ValidationResult::invalid(
                Location::root(),
                ReadError::MinLength {
                    expected: 4,
                    actual: 3
                }
            )
        );
        assert!(!check(max_length(2), "abc").is_valid());
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(check(is_not_empty(), " ").is_valid());
        assert!(!check(is_not_empty(), "").is_valid());
        assert!(!check(is_not_blank(), " \t\n").is_valid());
        assert!(check(is_not_blank(), " a ").is_valid());
    }

    #[test]
    fn test_pattern() {
        let digits = pattern(Regex::new("^[0-9]+$").unwrap());
        assert!(check(digits.clone(), "0123").is_valid());
        assert_eq!(
            check(digits, "12a"),
            ValidationResult::invalid(
                Location::root(),
                ReadError::PatternMismatch {
                    value: "12a".into(),
                    pattern: "^[0-9]+$".into(),
                }
            )
        );
    }

    #[test]
    fn test_is_a() {
        let lowercase = is_a(|s: &str| s.chars().all(|c| c.is_lowercase()));
        assert!(check(lowercase.clone(), "abc").is_valid());
        assert_eq!(
            check(lowercase, "Abc"),
            ValidationResult::invalid(Location::root(), ReadError::IsA("Abc".into()))
        );
    }
}
