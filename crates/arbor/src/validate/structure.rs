//! Struct-level rules, registered on a
//! [`StructReaderBuilder`](crate::read::StructReaderBuilder) through
//! `before` (raw struct) or `after` (read values).

use arbor_value::{Location, PathElement, Struct};

use crate::env::ReaderEnv;
use crate::error::{
    AdditionalPropertiesErrorBuilder, IsNotEmptyErrorBuilder, MaxPropertiesErrorBuilder,
    MinPropertiesErrorBuilder,
};
use crate::read::{AfterValidator, BeforeValidator, PropertyDescriptor, PropertyValues};
use crate::result::{Failure, ValidationResult, accumulate};

// ============================================================================
// Before reading
// ============================================================================

/// Rejects fields that no declared property reads. A property claims the
/// field named by the first step of each of its paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditionalProperties;

pub fn additional_properties() -> AdditionalProperties {
    AdditionalProperties
}

fn is_declared(properties: &[PropertyDescriptor], key: &str) -> bool {
    properties.iter().any(|descriptor| {
        descriptor.paths.iter().any(|path| {
            matches!(path.first(), Some(PathElement::Key(name)) if name == key)
        })
    })
}

impl<EB> BeforeValidator<EB> for AdditionalProperties
where
    EB: AdditionalPropertiesErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        properties: &[PropertyDescriptor],
        source: &Struct,
    ) -> ValidationResult<EB::Error> {
        let mut failure: Option<Failure<EB::Error>> = None;
        for key in source.keys().filter(|key| !is_declared(properties, key)) {
            let extra = Failure::new(
                location.append(key),
                env.error_builders.additional_properties_error(),
            );
            if env.is_fail_fast() {
                return ValidationResult::Invalid(extra);
            }
            accumulate(&mut failure, extra);
        }
        match failure {
            Some(failure) => ValidationResult::Invalid(failure),
            None => ValidationResult::Valid,
        }
    }
}

/// Lower bound on the number of fields present in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinProperties(usize);

pub fn min_properties(expected: usize) -> MinProperties {
    MinProperties(expected)
}

impl<EB> BeforeValidator<EB> for MinProperties
where
    EB: MinPropertiesErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        _properties: &[PropertyDescriptor],
        source: &Struct,
    ) -> ValidationResult<EB::Error> {
        ValidationResult::check(source.len() >= self.0, location, || {
            env.error_builders.min_properties_error(self.0, source.len())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxProperties(usize);

pub fn max_properties(expected: usize) -> MaxProperties {
    MaxProperties(expected)
}

impl<EB> BeforeValidator<EB> for MaxProperties
where
    EB: MaxPropertiesErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        _properties: &[PropertyDescriptor],
        source: &Struct,
    ) -> ValidationResult<EB::Error> {
        ValidationResult::check(source.len() <= self.0, location, || {
            env.error_builders.max_properties_error(self.0, source.len())
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotEmptyStruct;

pub fn struct_is_not_empty() -> NotEmptyStruct {
    NotEmptyStruct
}

impl<EB> BeforeValidator<EB> for NotEmptyStruct
where
    EB: IsNotEmptyErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        _properties: &[PropertyDescriptor],
        source: &Struct,
    ) -> ValidationResult<EB::Error> {
        ValidationResult::check(!source.is_empty(), location, || {
            env.error_builders.is_not_empty_error()
        })
    }
}

// ============================================================================
// After reading
// ============================================================================

/// Lower bound on how many properties produced a value. Absent optional
/// properties and `null` nullable ones do not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinPopulated(usize);

pub fn min_populated(expected: usize) -> MinPopulated {
    MinPopulated(expected)
}

impl<EB> AfterValidator<EB> for MinPopulated
where
    EB: MinPropertiesErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        _properties: &[PropertyDescriptor],
        values: &PropertyValues,
    ) -> ValidationResult<EB::Error> {
        let actual = values.populated_count();
        ValidationResult::check(actual >= self.0, location, || {
            env.error_builders.min_properties_error(self.0, actual)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPopulated(usize);

pub fn max_populated(expected: usize) -> MaxPopulated {
    MaxPopulated(expected)
}

impl<EB> AfterValidator<EB> for MaxPopulated
where
    EB: MaxPropertiesErrorBuilder,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        _properties: &[PropertyDescriptor],
        values: &PropertyValues,
    ) -> ValidationResult<EB::Error> {
        let actual = values.populated_count();
        ValidationResult::check(actual <= self.0, location, || {
            env.error_builders.max_properties_error(self.0, actual)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Options;
    use crate::error::{DefaultErrorBuilders, ReadError};
    use crate::read::{PropertyKind, Reader, StructReaderBuilder, number, string};
    use crate::result::ReaderResult;
    use arbor_value::{Path, Paths, Value};

    type Env = ReaderEnv<DefaultErrorBuilders>;

    fn declared() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor {
                paths: Paths::new("name"),
                kind: PropertyKind::Required,
            },
            PropertyDescriptor {
                paths: Paths::new(Path::key("contact").append("email")).or("email"),
                kind: PropertyKind::Optional,
            },
        ]
    }

    fn source(keys: &[&str]) -> Struct {
        Struct::from_iter(keys.iter().map(|key| (*key, Value::from(1))))
    }

    #[test]
    fn test_additional_properties() {
        let check = |env: &Env, keys: &[&str]| {
            additional_properties().validate(env, &Location::root(), &declared(), &source(keys))
        };
        assert!(check(&Env::default(), &["name", "contact", "email"]).is_valid());
        assert_eq!(
            check(&Env::default(), &["name", "age", "extra"]),
            ValidationResult::invalid(
                Location::root().append("age"),
                ReadError::AdditionalProperty
            )
        );
        let env = Env::new(DefaultErrorBuilders, Options::accumulate());
        let all = check(&env, &["name", "age", "extra"]).into_failure().unwrap();
        let locations: Vec<String> = all.iter().map(|c| c.location.to_string()).collect();
        assert_eq!(locations, vec!["age", "extra"]);
    }

    #[test]
    fn test_property_counts() {
        let env = Env::default();
        let two = source(&["a", "b"]);
        let check = |v: &dyn BeforeValidator<DefaultErrorBuilders>, s: &Struct| {
            v.validate(&env, &Location::root(), &[], s).is_valid()
        };
        assert!(check(&min_properties(2), &two));
        assert!(!check(&min_properties(3), &two));
        assert!(check(&max_properties(2), &two));
        assert!(!check(&max_properties(1), &two));
        assert!(check(&struct_is_not_empty(), &two));
        assert!(!check(&struct_is_not_empty(), &Struct::new()));
    }

    #[test]
    fn test_populated_counts_skip_absent() {
        let mut builder = StructReaderBuilder::<DefaultErrorBuilders>::new();
        let name = builder.optional("name", string());
        let age = builder.optional("age", number::<u32>());
        builder.after(min_populated(1)).after(max_populated(1));
        let reader = builder.build(move |_, location, values| {
            ReaderResult::success(location.clone(), (values.get(&name).clone(), *values.get(&age)))
        });
        let env = Env::default();

        let one = Value::from(Struct::from_iter([("name", Value::from("x"))]));
        assert!(reader.read(&env, &Location::root(), &one).is_success());

        let none = Value::from(Struct::new());
        assert_eq!(
            reader.read(&env, &Location::root(), &none).into_result().unwrap_err(),
            Failure::new(
                Location::root(),
                ReadError::MinProperties {
                    expected: 1,
                    actual: 0
                }
            )
        );

        let both = Value::from(Struct::from_iter([
            ("name", Value::from("x")),
            ("age", Value::from(3)),
        ]));
        assert!(matches!(
            reader.read(&env, &Location::root(), &both).into_result().unwrap_err().first().error,
            ReadError::MaxProperties {
                expected: 1,
                actual: 2
            }
        ));
    }
}
