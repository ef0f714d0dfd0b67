//! Reader trait and its combinators.
//!
//! A reader turns the node at a location into a typed value:
//!
//! ```ignore
//! let env = ReaderEnv::<DefaultErrorBuilders>::default();
//! let phone = required(Path::key("user").append("phones").append(0usize), string());
//! let result = phone.read(&env, &Location::root(), &document);
//! ```
//!
//! The output type of a reader is declared by [`ReadOutput`], separately
//! from [`Reader`], so combinators can be built before the error-builder type
//! is known.

pub mod array;
pub mod map;
pub mod primitive;
pub mod property;
pub mod structure;

pub use array::{AdditionalItems, ArrayOf, ArrayReader, read_array};
pub use map::{MapOf, map_of};
pub use primitive::{
    BigIntReader, BoolReader, FromNumber, LiteralReader, NullReader, NumberReader, OrNull,
    StringReader, ValueReader, big_int, boolean, literal, null, number, string, value,
};
pub use property::{
    Nullable, Optional, OptionalNullable, Required, WithDefault, nullable, optional,
    optional_nullable, required, with_default,
};
pub use structure::{
    AfterValidator, BeforeValidator, PropertyDescriptor, PropertyKind, PropertyValues,
    StructProperty, StructReader, StructReaderBuilder,
};

use core::marker::PhantomData;
use std::sync::Arc;

use arbor_value::{Location, Value};

use crate::env::ReaderEnv;
use crate::error::ErrorBuilders;
use crate::result::ReaderResult;

/// Declares what a reader produces.
pub trait ReadOutput {
    type Output;
}

pub trait Reader<EB: ErrorBuilders>: ReadOutput {
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Self::Output, EB::Error>;
}

// ============================================================================
// Closures and boxed readers
// ============================================================================

/// Reader backed by a closure. Build it with [`reader`].
pub struct FnReader<EB, T, F> {
    f: F,
    _marker: PhantomData<fn(&ReaderEnv<EB>) -> T>,
}

/// Lift a closure into a reader.
pub fn reader<EB, T, F>(f: F) -> FnReader<EB, T, F>
where
    EB: ErrorBuilders,
    F: Fn(&ReaderEnv<EB>, &Location, &Value) -> ReaderResult<T, EB::Error>,
{
    FnReader {
        f,
        _marker: PhantomData,
    }
}

impl<EB, T, F> ReadOutput for FnReader<EB, T, F> {
    type Output = T;
}

impl<EB, T, F> Reader<EB> for FnReader<EB, T, F>
where
    EB: ErrorBuilders,
    F: Fn(&ReaderEnv<EB>, &Location, &Value) -> ReaderResult<T, EB::Error>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<T, EB::Error> {
        (self.f)(env, location, source)
    }
}

/// Shared, type-erased reader.
pub struct BoxedReader<EB: ErrorBuilders, T>(Arc<dyn Reader<EB, Output = T> + Send + Sync>);

impl<EB: ErrorBuilders, T> BoxedReader<EB, T> {
    pub fn new<R>(reader: R) -> Self
    where
        R: Reader<EB, Output = T> + Send + Sync + 'static,
    {
        BoxedReader(Arc::new(reader))
    }
}

impl<EB: ErrorBuilders, T> Clone for BoxedReader<EB, T> {
    fn clone(&self) -> Self {
        BoxedReader(self.0.clone())
    }
}

impl<EB: ErrorBuilders, T> ReadOutput for BoxedReader<EB, T> {
    type Output = T;
}

impl<EB: ErrorBuilders, T> Reader<EB> for BoxedReader<EB, T> {
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<T, EB::Error> {
        self.0.read(env, location, source)
    }
}

// ============================================================================
// Combinators
// ============================================================================

pub struct OrReader<A, B> {
    primary: A,
    alternative: B,
}

impl<A: ReadOutput, B> ReadOutput for OrReader<A, B> {
    type Output = A::Output;
}

impl<EB, A, B> Reader<EB> for OrReader<A, B>
where
    EB: ErrorBuilders,
    A: Reader<EB>,
    B: Reader<EB, Output = A::Output>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<A::Output, EB::Error> {
        let primary = match self.primary.read(env, location, source) {
            ReaderResult::Failure(failure) => failure,
            success => return success,
        };
        tracing::trace!(%location, "primary reader failed, trying alternative");
        match self.alternative.read(env, location, source) {
            ReaderResult::Failure(alternative) => ReaderResult::Failure(primary + alternative),
            success => success,
        }
    }
}

pub struct ValidatedReader<R, V> {
    reader: R,
    validator: V,
}

impl<R: ReadOutput, V> ReadOutput for ValidatedReader<R, V> {
    type Output = R::Output;
}

impl<EB, R, V> Reader<EB> for ValidatedReader<R, V>
where
    EB: ErrorBuilders,
    R: Reader<EB>,
    V: crate::validate::Validator<EB, R::Output>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<R::Output, EB::Error> {
        self.reader
            .read(env, location, source)
            .validation(env, &self.validator)
    }
}

pub struct FilteredReader<EB, R, P> {
    reader: R,
    predicate: P,
    _marker: PhantomData<fn(&ReaderEnv<EB>)>,
}

impl<EB, T, R, P> ReadOutput for FilteredReader<EB, R, P>
where
    R: ReadOutput<Output = Option<T>>,
{
    type Output = Option<T>;
}

impl<EB, T, R, P> Reader<EB> for FilteredReader<EB, R, P>
where
    EB: ErrorBuilders,
    R: Reader<EB, Output = Option<T>>,
    P: Fn(&ReaderEnv<EB>, &Location, &T) -> bool,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Option<T>, EB::Error> {
        self.reader
            .read(env, location, source)
            .filter(env, &self.predicate)
    }
}

pub struct MapReader<R, F> {
    reader: R,
    mapper: F,
}

impl<R, O, F> ReadOutput for MapReader<R, F>
where
    R: ReadOutput,
    F: Fn(R::Output) -> O,
{
    type Output = O;
}

impl<EB, R, O, F> Reader<EB> for MapReader<R, F>
where
    EB: ErrorBuilders,
    R: Reader<EB>,
    F: Fn(R::Output) -> O,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<O, EB::Error> {
        self.reader.read(env, location, source).map(&self.mapper)
    }
}

pub struct AndThenReader<EB, R, F> {
    reader: R,
    mapper: F,
    _marker: PhantomData<fn(&ReaderEnv<EB>)>,
}

impl<EB, R, O, F> ReadOutput for AndThenReader<EB, R, F>
where
    EB: ErrorBuilders,
    R: ReadOutput,
    F: Fn(&ReaderEnv<EB>, &Location, R::Output) -> ReaderResult<O, EB::Error>,
{
    type Output = O;
}

impl<EB, R, O, F> Reader<EB> for AndThenReader<EB, R, F>
where
    EB: ErrorBuilders,
    R: Reader<EB>,
    F: Fn(&ReaderEnv<EB>, &Location, R::Output) -> ReaderResult<O, EB::Error>,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<O, EB::Error> {
        self.reader
            .read(env, location, source)
            .flat_map(|success| (self.mapper)(env, &success.location, success.value))
    }
}

pub trait ReaderExt: ReadOutput + Sized {
    /// Fall back to `alternative` when this reader fails. If both fail, the
    /// causes of both are reported, this reader's first.
    fn or<B>(self, alternative: B) -> OrReader<Self, B>
    where
        B: ReadOutput<Output = Self::Output>,
    {
        OrReader {
            primary: self,
            alternative,
        }
    }

    fn validation<V>(self, validator: V) -> ValidatedReader<Self, V> {
        ValidatedReader {
            reader: self,
            validator,
        }
    }

    /// Replace rejected values by `None`. Only for readers of optional values.
    fn filter<EB, T, P>(self, predicate: P) -> FilteredReader<EB, Self, P>
    where
        Self: ReadOutput<Output = Option<T>>,
        P: Fn(&ReaderEnv<EB>, &Location, &T) -> bool,
    {
        FilteredReader {
            reader: self,
            predicate,
            _marker: PhantomData,
        }
    }

    fn map<O, F>(self, mapper: F) -> MapReader<Self, F>
    where
        F: Fn(Self::Output) -> O,
    {
        MapReader {
            reader: self,
            mapper,
        }
    }

    /// Continue with a fallible conversion of the read value.
    fn and_then<EB, O, F>(self, mapper: F) -> AndThenReader<EB, Self, F>
    where
        EB: ErrorBuilders,
        F: Fn(&ReaderEnv<EB>, &Location, Self::Output) -> ReaderResult<O, EB::Error>,
    {
        AndThenReader {
            reader: self,
            mapper,
            _marker: PhantomData,
        }
    }

    /// Treat `null` as `None`, reading any other node with this reader.
    fn or_null(self) -> OrNull<Self> {
        OrNull::new(self)
    }

    fn boxed<EB>(self) -> BoxedReader<EB, Self::Output>
    where
        EB: ErrorBuilders,
        Self: Reader<EB> + Send + Sync + 'static,
    {
        BoxedReader::new(self)
    }
}

impl<R: ReadOutput> ReaderExt for R {}
