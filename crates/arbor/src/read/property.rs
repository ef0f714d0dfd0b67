//! Readers that look a value up by path before reading it.
//!
//! | reader              | found, non-null | found `null`  | not found   |
//! |---------------------|-----------------|---------------|-------------|
//! | `required`          | read            | read          | error       |
//! | `optional`          | read            | read          | `None`      |
//! | `nullable`          | read            | `None`        | error       |
//! | `optional_nullable` | read            | `None`        | `None`      |
//! | `with_default`      | read            | default       | default     |
//!
//! "Not found" covers both kinds of undefined lookup. Where it is an error,
//! a missing entry reports path-missing at the missing element and a wrong
//! container reports invalid-type at the node that could not be entered.
//!
//! With several candidate paths the first one that resolves is read; if none
//! resolves, the last candidate's lookup result decides.

use arbor_value::{Location, LookupResult, Paths, Undefined, Value, lookup};

use crate::env::ReaderEnv;
use crate::error::{InvalidTypeErrorBuilder, PathMissingErrorBuilder};
use crate::read::{ReadOutput, Reader};
use crate::result::ReaderResult;

/// Resolve the first candidate path that is defined.
pub fn lookup_paths<'v>(source: &'v Value, location: &Location, paths: &Paths) -> LookupResult<'v> {
    let mut result = lookup(source, location, paths.head());
    for path in paths.iter().skip(1) {
        if result.is_defined() {
            break;
        }
        result = lookup(source, location, path);
    }
    result
}

fn undefined_failure<T, EB>(env: &ReaderEnv<EB>, undefined: Undefined) -> ReaderResult<T, EB::Error>
where
    EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder,
{
    match undefined {
        Undefined::PathMissing { location } => {
            ReaderResult::failure(location, env.error_builders.path_missing_error())
        }
        Undefined::InvalidType {
            location,
            expected,
            actual,
        } => ReaderResult::failure(
            location,
            env.error_builders.invalid_type_error(expected, actual),
        ),
    }
}

// ============================================================================
// Required
// ============================================================================

#[derive(Debug, Clone)]
pub struct Required<R> {
    paths: Paths,
    reader: R,
}

pub fn required<R>(paths: impl Into<Paths>, reader: R) -> Required<R> {
    Required {
        paths: paths.into(),
        reader,
    }
}

impl<R: ReadOutput> ReadOutput for Required<R> {
    type Output = R::Output;
}

impl<EB, R> Reader<EB> for Required<R>
where
    EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder,
    R: Reader<EB>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<R::Output, EB::Error> {
        match lookup_paths(source, location, &self.paths) {
            LookupResult::Defined { location, value } => self.reader.read(env, &location, value),
            LookupResult::Undefined(undefined) => undefined_failure(env, undefined),
        }
    }
}

// ============================================================================
// Optional
// ============================================================================

#[derive(Debug, Clone)]
pub struct Optional<R> {
    paths: Paths,
    reader: R,
}

pub fn optional<R>(paths: impl Into<Paths>, reader: R) -> Optional<R> {
    Optional {
        paths: paths.into(),
        reader,
    }
}

impl<R: ReadOutput> ReadOutput for Optional<R> {
    type Output = Option<R::Output>;
}

impl<EB, R> Reader<EB> for Optional<R>
where
    EB: crate::error::ErrorBuilders,
    R: Reader<EB>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Option<R::Output>, EB::Error> {
        match lookup_paths(source, location, &self.paths) {
            LookupResult::Defined { location, value } => {
                self.reader.read(env, &location, value).map(Some)
            }
            LookupResult::Undefined(undefined) => {
                ReaderResult::success(undefined.location().clone(), None)
            }
        }
    }
}

// ============================================================================
// Nullable
// ============================================================================

#[derive(Debug, Clone)]
pub struct Nullable<R> {
    paths: Paths,
    reader: R,
}

/// The entry must exist, but may be `null`.
pub fn nullable<R>(paths: impl Into<Paths>, reader: R) -> Nullable<R> {
    Nullable {
        paths: paths.into(),
        reader,
    }
}

impl<R: ReadOutput> ReadOutput for Nullable<R> {
    type Output = Option<R::Output>;
}

impl<EB, R> Reader<EB> for Nullable<R>
where
    EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder,
    R: Reader<EB>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Option<R::Output>, EB::Error> {
        match lookup_paths(source, location, &self.paths) {
            LookupResult::Defined {
                location,
                value: Value::Null,
            } => ReaderResult::success(location, None),
            LookupResult::Defined { location, value } => {
                self.reader.read(env, &location, value).map(Some)
            }
            LookupResult::Undefined(undefined) => undefined_failure(env, undefined),
        }
    }
}

// ============================================================================
// OptionalNullable
// ============================================================================

#[derive(Debug, Clone)]
pub struct OptionalNullable<R> {
    paths: Paths,
    reader: R,
}

/// Absent and `null` entries both read as `None`.
pub fn optional_nullable<R>(paths: impl Into<Paths>, reader: R) -> OptionalNullable<R> {
    OptionalNullable {
        paths: paths.into(),
        reader,
    }
}

impl<R: ReadOutput> ReadOutput for OptionalNullable<R> {
    type Output = Option<R::Output>;
}

impl<EB, R> Reader<EB> for OptionalNullable<R>
where
    EB: crate::error::ErrorBuilders,
    R: Reader<EB>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Option<R::Output>, EB::Error> {
        match lookup_paths(source, location, &self.paths) {
            LookupResult::Defined {
                location,
                value: Value::Null,
            } => ReaderResult::success(location, None),
            LookupResult::Defined { location, value } => {
                self.reader.read(env, &location, value).map(Some)
            }
            LookupResult::Undefined(undefined) => {
                ReaderResult::success(undefined.location().clone(), None)
            }
        }
    }
}

// ============================================================================
// WithDefault
// ============================================================================

#[derive(Debug, Clone)]
pub struct WithDefault<R, D> {
    paths: Paths,
    reader: R,
    default: D,
}

/// Absent and `null` entries read as `default()`.
pub fn with_default<R, D>(paths: impl Into<Paths>, reader: R, default: D) -> WithDefault<R, D>
where
    R: ReadOutput,
    D: Fn() -> R::Output,
{
    WithDefault {
        paths: paths.into(),
        reader,
        default,
    }
}

impl<R: ReadOutput, D> ReadOutput for WithDefault<R, D> {
    type Output = R::Output;
}

impl<EB, R, D> Reader<EB> for WithDefault<R, D>
where
    EB: crate::error::ErrorBuilders,
    R: Reader<EB>,
    D: Fn() -> R::Output,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<R::Output, EB::Error> {
        match lookup_paths(source, location, &self.paths) {
            LookupResult::Defined {
                location,
                value: Value::Null,
            } => ReaderResult::success(location, (self.default)()),
            LookupResult::Defined { location, value } => self.reader.read(env, &location, value),
            LookupResult::Undefined(undefined) => {
                ReaderResult::success(undefined.location().clone(), (self.default)())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DefaultErrorBuilders, ReadError};
    use crate::read::{number, string};
    use arbor_value::{Path, Struct, ValueKind};

    fn env() -> ReaderEnv<DefaultErrorBuilders> {
        ReaderEnv::default()
    }

    fn document() -> Value {
        Value::Struct(Struct::from_iter([
            ("name", Value::from("Alice")),
            ("nickname", Value::Null),
            ("tags", Value::from(vec!["a", "b"])),
        ]))
    }

    fn root() -> Location {
        Location::root()
    }

    #[test]
    fn test_required_found() {
        let result = required("name", string()).read(&env(), &root(), &document());
        assert_eq!(result, ReaderResult::success(root().append("name"), "Alice".into()));
    }

    #[test]
    fn test_required_missing_reports_at_missing_element() {
        let result = required("age", number::<u32>()).read(&env(), &root(), &document());
        assert_eq!(result, ReaderResult::failure(root().append("age"), ReadError::PathMissing));
    }

    #[test]
    fn test_required_wrong_container_reports_at_breakpoint() {
        let path = Path::key("name").append("first");
        let result = required(path, string()).read(&env(), &root(), &document());
        assert_eq!(
            result,
            ReaderResult::failure(
                root().append("name"),
                ReadError::InvalidType {
                    expected: ValueKind::Struct,
                    actual: ValueKind::String,
                }
            )
        );
    }

    #[test]
    fn test_required_null_goes_to_reader() {
        let result = required("nickname", string()).read(&env(), &root(), &document());
        assert!(matches!(
            result.failure_ref().map(|f| &f.first().error),
            Some(ReadError::InvalidType {
                expected: ValueKind::String,
                actual: ValueKind::Null,
            })
        ));
    }

    #[test]
    fn test_required_first_defined_path_wins() {
        let paths = Paths::new("full_name").or("name").or("nickname");
        let result = required(paths, string()).read(&env(), &root(), &document());
        assert_eq!(result.value(), Some(&"Alice".to_string()));
    }

    #[test]
    fn test_required_last_path_decides_error() {
        let paths = Paths::new("missing").or(Path::key("tags").append("x"));
        let result = required(paths, string()).read(&env(), &root(), &document());
        assert_eq!(
            result,
            ReaderResult::failure(
                root().append("tags"),
                ReadError::InvalidType {
                    expected: ValueKind::Struct,
                    actual: ValueKind::Array,
                }
            )
        );

        let paths = Paths::new(Path::key("tags").append("x")).or("missing");
        let result = required(paths, string()).read(&env(), &root(), &document());
        assert_eq!(
            result,
            ReaderResult::failure(root().append("missing"), ReadError::PathMissing)
        );
    }

    #[test]
    fn test_optional() {
        let doc = document();
        assert_eq!(
            optional("name", string()).read(&env(), &root(), &doc).value(),
            Some(&Some("Alice".to_string()))
        );
        assert_eq!(
            optional("age", string()).read(&env(), &root(), &doc).value(),
            Some(&None)
        );
        // Both kinds of undefined collapse to absent.
        let deep = Path::key("name").append("first");
        assert_eq!(
            optional(deep, string()).read(&env(), &root(), &doc).value(),
            Some(&None)
        );
        // A present null is still handed to the reader.
        assert!(optional("nickname", string()).read(&env(), &root(), &doc).is_failure());
    }

    #[test]
    fn test_nullable() {
        let doc = document();
        assert_eq!(
            nullable("nickname", string()).read(&env(), &root(), &doc).value(),
            Some(&None)
        );
        assert_eq!(
            nullable("name", string()).read(&env(), &root(), &doc).value(),
            Some(&Some("Alice".to_string()))
        );
        assert_eq!(
            nullable("age", string()).read(&env(), &root(), &doc),
            ReaderResult::failure(root().append("age"), ReadError::PathMissing)
        );
    }

    #[test]
    fn test_optional_nullable() {
        let doc = document();
        for key in ["nickname", "age"] {
            assert_eq!(
                optional_nullable(key, string()).read(&env(), &root(), &doc).value(),
                Some(&None)
            );
        }
        assert!(optional_nullable("tags", string()).read(&env(), &root(), &doc).is_failure());
    }

    #[test]
    fn test_with_default() {
        let doc = document();
        let anonymous = || "anonymous".to_string();
        assert_eq!(
            with_default("nickname", string(), anonymous).read(&env(), &root(), &doc).value(),
            Some(&"anonymous".to_string())
        );
        assert_eq!(
            with_default("missing", string(), anonymous).read(&env(), &root(), &doc).value(),
            Some(&"anonymous".to_string())
        );
        assert_eq!(
            with_default("name", string(), anonymous).read(&env(), &root(), &doc).value(),
            Some(&"Alice".to_string())
        );
        assert!(
            with_default("tags", string(), anonymous)
                .read(&env(), &root(), &doc)
                .is_failure()
        );
    }

    #[test]
    fn test_reads_relative_to_location() {
        let inner = Value::Struct(Struct::from_iter([("id", Value::from(7))]));
        let base = root().append("items").append(3usize);
        let result = required("id", number::<u64>()).read(&env(), &base, &inner);
        assert_eq!(result, ReaderResult::success(base.append("id"), 7));
    }
}
