//! Struct readers.
//!
//! A struct reader is assembled from properties. Declaring a property on the
//! builder returns a typed handle; the type builder later uses the handle to
//! fetch the value that was read for it:
//!
//! ```ignore
//! let mut builder = StructReaderBuilder::new();
//! let name = builder.required("name", string());
//! let age = builder.optional("age", number::<u32>());
//! let reader = builder.build(move |_env, location, values| {
//!     ReaderResult::success(location.clone(), User {
//!         name: values.get(&name).clone(),
//!         age: *values.get(&age),
//!     })
//! });
//! ```
//!
//! Values are keyed by handle, not by name, so two properties may read the
//! same path or alias each other through alternative paths.
//!
//! # Phases
//!
//! 1. The source must be a struct, otherwise an invalid-type error.
//! 2. [`BeforeValidator`]s see the raw struct. Under fail-fast the first
//!    failure is returned and no property is read.
//! 3. Properties are read in declaration order. Under fail-fast the first
//!    failing property ends the read.
//! 4. [`AfterValidator`]s see the read values; they run only when every
//!    property was read successfully.
//! 5. Without any failure the type builder produces the result. Otherwise
//!    every collected failure is returned in encounter order.

use core::any::Any;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arbor_value::{Location, Paths, Struct, Value, ValueKind};

use crate::env::ReaderEnv;
use crate::error::{ErrorBuilders, InvalidTypeErrorBuilder, PathMissingErrorBuilder};
use crate::read::property;
use crate::read::{ReadOutput, Reader};
use crate::result::{ReaderResult, ValidationResult, accumulate};

static NEXT_READER_ID: AtomicUsize = AtomicUsize::new(0);

/// How a property treats absent and `null` entries. See
/// [`crate::read::property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Required,
    Optional,
    Nullable,
    OptionalNullable,
    WithDefault,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub paths: Paths,
    pub kind: PropertyKind,
}

/// Handle to a declared property. Only valid with the reader built from the
/// builder that issued it.
pub struct StructProperty<T> {
    owner: usize,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StructProperty<T> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for StructProperty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StructProperty<T> {}

impl<T> core::fmt::Debug for StructProperty<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StructProperty")
            .field("owner", &self.owner)
            .field("index", &self.index)
            .finish()
    }
}

// ============================================================================
// PropertyValues
// ============================================================================

struct Erased {
    value: Box<dyn Any>,
    populated: bool,
}

/// Values read for the properties of one struct.
pub struct PropertyValues {
    owner: usize,
    values: Vec<Option<Box<dyn Any>>>,
    populated: Vec<bool>,
}

impl PropertyValues {
    fn new(owner: usize, len: usize) -> Self {
        Self {
            owner,
            values: (0..len).map(|_| None).collect(),
            populated: vec![false; len],
        }
    }

    fn set(&mut self, index: usize, erased: Erased) {
        self.values[index] = Some(erased.value);
        self.populated[index] = erased.populated;
    }

    fn check_owner<T>(&self, property: &StructProperty<T>) {
        assert_eq!(
            property.owner, self.owner,
            "property handle used with a foreign struct reader"
        );
    }

    /// # Panics
    ///
    /// If `property` was issued by another builder, or was already taken.
    pub fn get<T: 'static>(&self, property: &StructProperty<T>) -> &T {
        self.check_owner(property);
        self.values[property.index]
            .as_ref()
            .and_then(|value| value.downcast_ref::<T>())
            .unwrap_or_else(|| panic!("property {} has no value", property.index))
    }

    /// Move the value out, leaving the property empty.
    ///
    /// # Panics
    ///
    /// Same as [`PropertyValues::get`].
    pub fn take<T: 'static>(&mut self, property: &StructProperty<T>) -> T {
        self.check_owner(property);
        match self.values[property.index].take().map(|value| value.downcast::<T>()) {
            Some(Ok(value)) => *value,
            _ => panic!("property {} has no value", property.index),
        }
    }

    /// Whether the property produced a value other than "absent": every
    /// required or defaulted property, and optional ones that read `Some`.
    pub fn is_populated<T>(&self, property: &StructProperty<T>) -> bool {
        self.check_owner(property);
        self.populated[property.index]
    }

    pub fn populated_count(&self) -> usize {
        self.populated.iter().filter(|populated| **populated).count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Struct-level validators
// ============================================================================

/// Runs on the raw struct before any property is read.
pub trait BeforeValidator<EB: ErrorBuilders> {
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        properties: &[PropertyDescriptor],
        source: &Struct,
    ) -> ValidationResult<EB::Error>;
}

impl<EB, F> BeforeValidator<EB> for F
where
    EB: ErrorBuilders,
    F: Fn(&ReaderEnv<EB>, &Location, &[PropertyDescriptor], &Struct) -> ValidationResult<EB::Error>,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        properties: &[PropertyDescriptor],
        source: &Struct,
    ) -> ValidationResult<EB::Error> {
        self(env, location, properties, source)
    }
}

/// Runs on the read values once every property succeeded.
pub trait AfterValidator<EB: ErrorBuilders> {
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        properties: &[PropertyDescriptor],
        values: &PropertyValues,
    ) -> ValidationResult<EB::Error>;
}

impl<EB, F> AfterValidator<EB> for F
where
    EB: ErrorBuilders,
    F: Fn(&ReaderEnv<EB>, &Location, &[PropertyDescriptor], &PropertyValues) -> ValidationResult<EB::Error>,
{
    fn validate(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        properties: &[PropertyDescriptor],
        values: &PropertyValues,
    ) -> ValidationResult<EB::Error> {
        self(env, location, properties, values)
    }
}

// ============================================================================
// Builder
// ============================================================================

type ErasedRead<EB> = Arc<
    dyn Fn(&ReaderEnv<EB>, &Location, &Value) -> ReaderResult<Erased, <EB as ErrorBuilders>::Error>
        + Send
        + Sync,
>;

type TypeBuilder<EB, T> = Arc<
    dyn Fn(&ReaderEnv<EB>, &Location, PropertyValues) -> ReaderResult<T, <EB as ErrorBuilders>::Error>
        + Send
        + Sync,
>;

pub struct StructReaderBuilder<EB: ErrorBuilders> {
    id: usize,
    descriptors: Vec<PropertyDescriptor>,
    reads: Vec<ErasedRead<EB>>,
    before: Vec<Arc<dyn BeforeValidator<EB> + Send + Sync>>,
    after: Vec<Arc<dyn AfterValidator<EB> + Send + Sync>>,
}

impl<EB: ErrorBuilders + 'static> Default for StructReaderBuilder<EB> {
    fn default() -> Self {
        Self::new()
    }
}

impl<EB: ErrorBuilders + 'static> StructReaderBuilder<EB> {
    pub fn new() -> Self {
        Self {
            id: NEXT_READER_ID.fetch_add(1, Ordering::Relaxed),
            descriptors: Vec::new(),
            reads: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    fn push<R>(
        &mut self,
        paths: Paths,
        kind: PropertyKind,
        reader: R,
        populated: fn(&R::Output) -> bool,
    ) -> StructProperty<R::Output>
    where
        R: Reader<EB> + Send + Sync + 'static,
        R::Output: 'static,
    {
        let index = self.reads.len();
        let read: ErasedRead<EB> = Arc::new(
            move |env: &ReaderEnv<EB>, location: &Location, source: &Value| {
                reader.read(env, location, source).map(|value| Erased {
                    populated: populated(&value),
                    value: Box::new(value),
                })
            },
        );
        self.descriptors.push(PropertyDescriptor { paths, kind });
        self.reads.push(read);
        StructProperty {
            owner: self.id,
            index,
            _marker: PhantomData,
        }
    }

    pub fn required<R>(&mut self, paths: impl Into<Paths>, reader: R) -> StructProperty<R::Output>
    where
        EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder,
        R: Reader<EB> + Send + Sync + 'static,
        R::Output: 'static,
    {
        let paths = paths.into();
        let reader = property::required(paths.clone(), reader);
        self.push(paths, PropertyKind::Required, reader, |_| true)
    }

    pub fn optional<R>(
        &mut self,
        paths: impl Into<Paths>,
        reader: R,
    ) -> StructProperty<Option<R::Output>>
    where
        R: Reader<EB> + Send + Sync + 'static,
        R::Output: 'static,
    {
        let paths = paths.into();
        let reader = property::optional(paths.clone(), reader);
        self.push(paths, PropertyKind::Optional, reader, |value| value.is_some())
    }

    pub fn nullable<R>(
        &mut self,
        paths: impl Into<Paths>,
        reader: R,
    ) -> StructProperty<Option<R::Output>>
    where
        EB: PathMissingErrorBuilder + InvalidTypeErrorBuilder,
        R: Reader<EB> + Send + Sync + 'static,
        R::Output: 'static,
    {
        let paths = paths.into();
        let reader = property::nullable(paths.clone(), reader);
        self.push(paths, PropertyKind::Nullable, reader, |value| value.is_some())
    }

    pub fn optional_nullable<R>(
        &mut self,
        paths: impl Into<Paths>,
        reader: R,
    ) -> StructProperty<Option<R::Output>>
    where
        R: Reader<EB> + Send + Sync + 'static,
        R::Output: 'static,
    {
        let paths = paths.into();
        let reader = property::optional_nullable(paths.clone(), reader);
        self.push(paths, PropertyKind::OptionalNullable, reader, |value| {
            value.is_some()
        })
    }

    pub fn with_default<R, D>(
        &mut self,
        paths: impl Into<Paths>,
        reader: R,
        default: D,
    ) -> StructProperty<R::Output>
    where
        R: Reader<EB> + Send + Sync + 'static,
        R::Output: 'static,
        D: Fn() -> R::Output + Send + Sync + 'static,
    {
        let paths = paths.into();
        let reader = property::with_default(paths.clone(), reader, default);
        self.push(paths, PropertyKind::WithDefault, reader, |_| true)
    }

    pub fn before<V>(&mut self, validator: V) -> &mut Self
    where
        V: BeforeValidator<EB> + Send + Sync + 'static,
    {
        self.before.push(Arc::new(validator));
        self
    }

    pub fn after<V>(&mut self, validator: V) -> &mut Self
    where
        V: AfterValidator<EB> + Send + Sync + 'static,
    {
        self.after.push(Arc::new(validator));
        self
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    pub fn build<T, F>(self, builder: F) -> StructReader<EB, T>
    where
        F: Fn(&ReaderEnv<EB>, &Location, PropertyValues) -> ReaderResult<T, EB::Error>
            + Send
            + Sync
            + 'static,
    {
        StructReader {
            id: self.id,
            descriptors: self.descriptors,
            reads: self.reads,
            before: self.before,
            after: self.after,
            builder: Arc::new(builder),
        }
    }
}

// ============================================================================
// Reader
// ============================================================================

pub struct StructReader<EB: ErrorBuilders, T> {
    id: usize,
    descriptors: Vec<PropertyDescriptor>,
    reads: Vec<ErasedRead<EB>>,
    before: Vec<Arc<dyn BeforeValidator<EB> + Send + Sync>>,
    after: Vec<Arc<dyn AfterValidator<EB> + Send + Sync>>,
    builder: TypeBuilder<EB, T>,
}

impl<EB: ErrorBuilders, T> StructReader<EB, T> {
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }
}

impl<EB: ErrorBuilders, T> ReadOutput for StructReader<EB, T> {
    type Output = T;
}

impl<EB, T> Reader<EB> for StructReader<EB, T>
where
    EB: InvalidTypeErrorBuilder,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<T, EB::Error> {
        let Value::Struct(fields) = source else {
            return ReaderResult::failure(
                location.clone(),
                env.error_builders
                    .invalid_type_error(ValueKind::Struct, source.kind()),
            );
        };
        let fail_fast = env.is_fail_fast();
        let mut failure = None;

        for validator in &self.before {
            if let ValidationResult::Invalid(invalid) =
                validator.validate(env, location, &self.descriptors, fields)
            {
                if fail_fast {
                    tracing::trace!(%location, "struct rejected before reading properties");
                    return ReaderResult::Failure(invalid);
                }
                accumulate(&mut failure, invalid);
            }
        }

        let mut values = PropertyValues::new(self.id, self.reads.len());
        let mut properties_read = true;
        for (index, read) in self.reads.iter().enumerate() {
            match read(env, location, source) {
                ReaderResult::Success(success) => values.set(index, success.value),
                ReaderResult::Failure(invalid) => {
                    if fail_fast {
                        tracing::trace!(
                            %location,
                            property = %self.descriptors[index].paths,
                            "property failed, skipping the rest of the struct"
                        );
                        return ReaderResult::Failure(invalid);
                    }
                    properties_read = false;
                    accumulate(&mut failure, invalid);
                }
            }
        }

        if properties_read {
            for validator in &self.after {
                if let ValidationResult::Invalid(invalid) =
                    validator.validate(env, location, &self.descriptors, &values)
                {
                    if fail_fast {
                        return ReaderResult::Failure(invalid);
                    }
                    accumulate(&mut failure, invalid);
                }
            }
        }

        match failure {
            Some(failure) => ReaderResult::Failure(failure),
            None => (self.builder)(env, location, values),
        }
    }
}
