//! Array readers.
//!
//! Elements are read in index order, each at `location/<index>`. Under
//! fail-fast the first failing element ends the read; otherwise every
//! element is read and all failures are returned together.

use arbor_value::{Array, Location, Value, ValueKind};

use crate::env::ReaderEnv;
use crate::error::{AdditionalItemsErrorBuilder, ErrorBuilders, InvalidTypeErrorBuilder};
use crate::read::{BoxedReader, ReadOutput, Reader};
use crate::result::{Failure, ReaderResult, accumulate};

fn expect_array<'v, T, EB: InvalidTypeErrorBuilder>(
    env: &ReaderEnv<EB>,
    location: &Location,
    source: &'v Value,
) -> Result<&'v Array, ReaderResult<T, EB::Error>> {
    match source {
        Value::Array(items) => Ok(items),
        other => Err(ReaderResult::failure(
            location.clone(),
            env.error_builders
                .invalid_type_error(ValueKind::Array, other.kind()),
        )),
    }
}

/// Collects element results, honoring the failure policy.
struct Elements<T, E> {
    fail_fast: bool,
    values: Vec<T>,
    failure: Option<Failure<E>>,
}

impl<T, E> Elements<T, E> {
    fn new(fail_fast: bool, capacity: usize) -> Self {
        Self {
            fail_fast,
            values: Vec::with_capacity(capacity),
            failure: None,
        }
    }

    /// Returns `false` when reading must stop.
    fn push(&mut self, result: ReaderResult<T, E>) -> bool {
        match result {
            ReaderResult::Success(success) => {
                self.values.push(success.value);
                true
            }
            ReaderResult::Failure(failure) => {
                accumulate(&mut self.failure, failure);
                !self.fail_fast
            }
        }
    }

    fn finish(self, location: &Location) -> ReaderResult<Vec<T>, E> {
        match self.failure {
            Some(failure) => ReaderResult::Failure(failure),
            None => ReaderResult::success(location.clone(), self.values),
        }
    }
}

// ============================================================================
// Homogeneous arrays
// ============================================================================

/// Every element read with the same reader.
#[derive(Debug, Clone)]
pub struct ArrayOf<R> {
    items: R,
}

pub fn read_array<R>(items: R) -> ArrayOf<R> {
    ArrayOf { items }
}

impl<R: ReadOutput> ReadOutput for ArrayOf<R> {
    type Output = Vec<R::Output>;
}

impl<EB, R> Reader<EB> for ArrayOf<R>
where
    EB: InvalidTypeErrorBuilder,
    R: Reader<EB>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Vec<R::Output>, EB::Error> {
        let items = match expect_array(env, location, source) {
            Ok(items) => items,
            Err(failure) => return failure,
        };
        let mut elements = Elements::new(env.is_fail_fast(), items.len());
        for (index, item) in items.iter().enumerate() {
            let result = self.items.read(env, &location.append(index), item);
            if !elements.push(result) {
                tracing::trace!(%location, index, "element failed, skipping the rest of the array");
                break;
            }
        }
        elements.finish(location)
    }
}

// ============================================================================
// Prefix items
// ============================================================================

/// Policy for elements beyond the prefix items when no items reader is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdditionalItems {
    /// Surplus elements are skipped.
    #[default]
    Ignore,
    /// Each surplus element is an additional-items error at its location.
    Reject,
}

/// Positional readers for the first elements, then an optional reader for
/// the rest.
pub struct ArrayReader<EB: ErrorBuilders, T> {
    prefix_items: Vec<BoxedReader<EB, T>>,
    items: Option<BoxedReader<EB, T>>,
    additional_items: AdditionalItems,
}

impl<EB: ErrorBuilders, T> Clone for ArrayReader<EB, T> {
    fn clone(&self) -> Self {
        Self {
            prefix_items: self.prefix_items.clone(),
            items: self.items.clone(),
            additional_items: self.additional_items,
        }
    }
}

impl<EB: ErrorBuilders, T> Default for ArrayReader<EB, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<EB: ErrorBuilders, T> ArrayReader<EB, T> {
    pub fn new() -> Self {
        Self {
            prefix_items: Vec::new(),
            items: None,
            additional_items: AdditionalItems::default(),
        }
    }

    pub fn prefix_item<R>(mut self, reader: R) -> Self
    where
        R: Reader<EB, Output = T> + Send + Sync + 'static,
    {
        self.prefix_items.push(BoxedReader::new(reader));
        self
    }

    pub fn items<R>(mut self, reader: R) -> Self
    where
        R: Reader<EB, Output = T> + Send + Sync + 'static,
    {
        self.items = Some(BoxedReader::new(reader));
        self
    }

    pub fn additional_items(mut self, policy: AdditionalItems) -> Self {
        self.additional_items = policy;
        self
    }

    fn reader_for(&self, index: usize) -> Option<&BoxedReader<EB, T>> {
        self.prefix_items.get(index).or(self.items.as_ref())
    }
}

impl<EB: ErrorBuilders, T> ReadOutput for ArrayReader<EB, T> {
    type Output = Vec<T>;
}

impl<EB, T> Reader<EB> for ArrayReader<EB, T>
where
    EB: InvalidTypeErrorBuilder + AdditionalItemsErrorBuilder,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Vec<T>, EB::Error> {
        let items = match expect_array(env, location, source) {
            Ok(items) => items,
            Err(failure) => return failure,
        };
        let max_items = self.prefix_items.len();
        let mut elements = Elements::new(env.is_fail_fast(), items.len());
        for (index, item) in items.iter().enumerate() {
            let element_location = location.append(index);
            let result = match (self.reader_for(index), self.additional_items) {
                (Some(reader), _) => reader.read(env, &element_location, item),
                (None, AdditionalItems::Reject) => ReaderResult::failure(
                    element_location,
                    env.error_builders
                        .additional_items_error(max_items, items.len()),
                ),
                (None, AdditionalItems::Ignore) => {
                    tracing::trace!(%location, surplus = items.len() - index, "ignoring surplus elements");
                    break;
                }
            };
            if !elements.push(result) {
                tracing::trace!(%location, index, "element failed, skipping the rest of the array");
                break;
            }
        }
        elements.finish(location)
    }
}
