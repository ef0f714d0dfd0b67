//! Rules over read arrays.

use core::hash::Hash;

use ahash::AHashMap;
use arbor_value::Location;

use crate::env::ReaderEnv;
use crate::error::{MaxItemsErrorBuilder, MinItemsErrorBuilder, UniqueItemsErrorBuilder};
use crate::result::{Failure, ValidationResult, accumulate};
use crate::validate::{Validator, ValidatorExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinItems(usize);

pub fn min_items(expected: usize) -> MinItems {
    MinItems(expected)
}

impl ValidatorExt for MinItems {}

impl<EB, T> Validator<EB, Vec<T>> for MinItems
where
    EB: MinItemsErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &Vec<T>,
    ) -> ValidationResult<EB::Error> {
        ValidationResult::check(value.len() >= self.0, location, || {
            env.error_builders.min_items_error(self.0, value.len())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxItems(usize);

pub fn max_items(expected: usize) -> MaxItems {
    MaxItems(expected)
}

impl ValidatorExt for MaxItems {}

impl<EB, T> Validator<EB, Vec<T>> for MaxItems
where
    EB: MaxItemsErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &Vec<T>,
    ) -> ValidationResult<EB::Error> {
        ValidationResult::check(value.len() <= self.0, location, || {
            env.error_builders.max_items_error(self.0, value.len())
        })
    }
}

/// Reports repeated keys at the repeating element. Under fail-fast only the
/// first repetition is reported.
fn check_unique<EB, K>(
    env: &ReaderEnv<EB>,
    location: &Location,
    keys: impl Iterator<Item = K>,
) -> ValidationResult<EB::Error>
where
    EB: UniqueItemsErrorBuilder,
    K: Hash + Eq,
{
    let mut seen = AHashMap::new();
    let mut failure: Option<Failure<EB::Error>> = None;
    for (index, key) in keys.enumerate() {
        if let Some(&first_index) = seen.get(&key) {
            let duplicate = Failure::new(
                location.append(index),
                env.error_builders.unique_items_error(index, first_index),
            );
            if env.is_fail_fast() {
                return ValidationResult::Invalid(duplicate);
            }
            accumulate(&mut failure, duplicate);
        } else {
            seen.insert(key, index);
        }
    }
    match failure {
        Some(failure) => ValidationResult::Invalid(failure),
        None => ValidationResult::Valid,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueItems;

pub fn unique_items() -> UniqueItems {
    UniqueItems
}

impl ValidatorExt for UniqueItems {}

impl<EB, T> Validator<EB, Vec<T>> for UniqueItems
where
    EB: UniqueItemsErrorBuilder,
    T: Hash + Eq,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &Vec<T>,
    ) -> ValidationResult<EB::Error> {
        check_unique(env, location, value.iter())
    }
}

#[derive(Debug, Clone)]
pub struct UniqueItemsBy<F>(F);

/// Items are duplicates when `key` maps them to equal keys.
pub fn unique_items_by<F>(key: F) -> UniqueItemsBy<F> {
    UniqueItemsBy(key)
}

impl<F> ValidatorExt for UniqueItemsBy<F> {}

impl<EB, T, K, F> Validator<EB, Vec<T>> for UniqueItemsBy<F>
where
    EB: UniqueItemsErrorBuilder,
    F: Fn(&T) -> K,
    K: Hash + Eq,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        value: &Vec<T>,
    ) -> ValidationResult<EB::Error> {
        check_unique(env, location, value.iter().map(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Options;
    use crate::error::{DefaultErrorBuilders, ReadError};

    type Env = ReaderEnv<DefaultErrorBuilders>;

    fn base() -> Location {
        Location::root().append("tags")
    }

    #[test]
    fn test_item_counts() {
        let env = Env::default();
        let items = vec![1, 2, 3];
        assert!(min_items(3).validate(&env, &base(), &items).is_valid());
        assert!(max_items(3).validate(&env, &base(), &items).is_valid());
        assert_eq!(
            min_items(4).validate(&env, &base(), &items),
            ValidationResult::invalid(
                base(),
                ReadError::MinItems {
                    expected: 4,
                    actual: 3
                }
            )
        );
        assert!(!max_items(2).validate(&env, &base(), &items).is_valid());
    }

    #[test]
    fn test_unique_items_reports_at_element() {
        let items = vec!["a", "b", "a", "b", "a"];
        let fail_fast = unique_items().validate(&Env::default(), &base(), &items);
        assert_eq!(
            fail_fast,
            ValidationResult::invalid(
                base().append(2usize),
                ReadError::DuplicateItem {
                    index: 2,
                    first_index: 0
                }
            )
        );

        let env = Env::new(DefaultErrorBuilders, Options::accumulate());
        let all = unique_items().validate(&env, &base(), &items);
        let indexes: Vec<String> = all
            .into_failure()
            .unwrap()
            .iter()
            .map(|c| c.location.to_string())
            .collect();
        assert_eq!(indexes, vec!["tags/2", "tags/3", "tags/4"]);
    }

    #[test]
    fn test_unique_items_by_key() {
        let people = vec![("alice", 30), ("bob", 30), ("ALICE", 31)];
        let by_name = unique_items_by(|p: &(&str, i32)| p.0.to_lowercase());
        let result = by_name.validate(&Env::default(), &base(), &people);
        assert_eq!(
            result,
            ValidationResult::invalid(
                base().append(2usize),
                ReadError::DuplicateItem {
                    index: 2,
                    first_index: 0
                }
            )
        );
        let by_age = unique_items_by(|p: &(&str, i32)| p.1);
        assert!(!by_age.validate(&Env::default(), &base(), &people).is_valid());
        let by_pair = unique_items_by(|p: &(&str, i32)| (p.0.to_string(), p.1));
        assert!(by_pair.validate(&Env::default(), &base(), &people).is_valid());
    }
}
