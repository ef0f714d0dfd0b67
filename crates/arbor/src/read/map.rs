use arbor_value::{Location, Value, ValueKind};
use indexmap::IndexMap;

use crate::env::ReaderEnv;
use crate::error::InvalidTypeErrorBuilder;
use crate::read::{ReadOutput, Reader};
use crate::result::{ReaderResult, accumulate};

/// Reads every field of a struct with the same reader, keeping field order.
#[derive(Debug, Clone)]
pub struct MapOf<R> {
    values: R,
}

pub fn map_of<R>(values: R) -> MapOf<R> {
    MapOf { values }
}

impl<R: ReadOutput> ReadOutput for MapOf<R> {
    type Output = IndexMap<String, R::Output>;
}

impl<EB, R> Reader<EB> for MapOf<R>
where
    EB: InvalidTypeErrorBuilder,
    R: Reader<EB>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<IndexMap<String, R::Output>, EB::Error> {
        let Value::Struct(fields) = source else {
            return ReaderResult::failure(
                location.clone(),
                env.error_builders
                    .invalid_type_error(ValueKind::Struct, source.kind()),
            );
        };
        let mut values = IndexMap::with_capacity(fields.len());
        let mut failure = None;
        for (key, value) in fields.iter() {
            match self.values.read(env, &location.append(key), value) {
                ReaderResult::Success(success) => {
                    values.insert(key.to_string(), success.value);
                }
                ReaderResult::Failure(invalid) => {
                    if env.is_fail_fast() {
                        return ReaderResult::Failure(invalid);
                    }
                    accumulate(&mut failure, invalid);
                }
            }
        }
        match failure {
            Some(failure) => ReaderResult::Failure(failure),
            None => ReaderResult::success(location.clone(), values),
        }
    }
}
