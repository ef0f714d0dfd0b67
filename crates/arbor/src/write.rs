//! Writer trait for turning typed values back into a value tree.
//!
//! A writer returns `None` to omit the node. The enclosing struct, array or
//! map writer then leaves the entry out entirely, which is how `optional`
//! differs from `nullable`:
//!
//! ```ignore
//! let writer = StructWriterBuilder::new()
//!     .property("name", |u: &User| &u.name, string())
//!     .property("nickname", |u: &User| &u.nickname, string().optional())
//!     .property("email", |u: &User| &u.email, string().nullable())
//!     .build();
//! ```
//!
//! Writers cannot fail.

pub mod array;
pub mod map;
pub mod structure;

pub use array::{ArrayWriter, array_writer};
pub use map::{MapWriter, map_writer};
pub use structure::{StructWriter, StructWriterBuilder};

use core::marker::PhantomData;
use std::sync::Arc;

use arbor_value::{Location, Number, Value};
use num_bigint::BigInt;

use crate::env::WriterEnv;

pub trait Writer<T: ?Sized> {
    fn write(&self, env: &WriterEnv, location: &Location, value: &T) -> Option<Value>;
}

impl<T, F> Writer<T> for F
where
    T: ?Sized,
    F: Fn(&WriterEnv, &Location, &T) -> Option<Value>,
{
    fn write(&self, env: &WriterEnv, location: &Location, value: &T) -> Option<Value> {
        self(env, location, value)
    }
}

pub struct FnWriter<T: ?Sized, F> {
    f: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F: Clone> Clone for FnWriter<T, F> {
    fn clone(&self) -> Self {
        FnWriter {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

/// Lift a closure into a writer that has the [`WriterExt`] combinators.
pub fn writer<T, F>(f: F) -> FnWriter<T, F>
where
    T: ?Sized,
    F: Fn(&WriterEnv, &Location, &T) -> Option<Value>,
{
    FnWriter {
        f,
        _marker: PhantomData,
    }
}

impl<T, F> Writer<T> for FnWriter<T, F>
where
    T: ?Sized,
    F: Fn(&WriterEnv, &Location, &T) -> Option<Value>,
{
    fn write(&self, env: &WriterEnv, location: &Location, value: &T) -> Option<Value> {
        (self.f)(env, location, value)
    }
}

// ============================================================================
// Base writers
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringWriter;

pub fn string() -> StringWriter {
    StringWriter
}

impl<T: AsRef<str> + ?Sized> Writer<T> for StringWriter {
    fn write(&self, _env: &WriterEnv, _location: &Location, value: &T) -> Option<Value> {
        Some(Value::String(value.as_ref().to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolWriter;

pub fn boolean() -> BoolWriter {
    BoolWriter
}

impl Writer<bool> for BoolWriter {
    fn write(&self, _env: &WriterEnv, _location: &Location, value: &bool) -> Option<Value> {
        Some(Value::Bool(*value))
    }
}

/// Writes any primitive number. Non-finite floats become `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberWriter;

pub fn number() -> NumberWriter {
    NumberWriter
}

macro_rules! write_number {
    ($($ty:ty),*) => {
        $(
            impl Writer<$ty> for NumberWriter {
                fn write(&self, _env: &WriterEnv, _location: &Location, value: &$ty) -> Option<Value> {
                    Some(Value::from(*value))
                }
            }
        )*
    };
}

write_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Writer<BigInt> for NumberWriter {
    fn write(&self, _env: &WriterEnv, _location: &Location, value: &BigInt) -> Option<Value> {
        Some(Value::Number(Number::from(value)))
    }
}

impl Writer<Number> for NumberWriter {
    fn write(&self, _env: &WriterEnv, _location: &Location, value: &Number) -> Option<Value> {
        Some(Value::Number(value.clone()))
    }
}

/// Writes a value tree as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueWriter;

pub fn value() -> ValueWriter {
    ValueWriter
}

impl Writer<Value> for ValueWriter {
    fn write(&self, _env: &WriterEnv, _location: &Location, value: &Value) -> Option<Value> {
        Some(value.clone())
    }
}

// ============================================================================
// Combinators
// ============================================================================

/// `None` becomes an explicit `null`.
#[derive(Debug, Clone)]
pub struct NullableWriter<W> {
    writer: W,
}

impl<T, W: Writer<T>> Writer<Option<T>> for NullableWriter<W> {
    fn write(&self, env: &WriterEnv, location: &Location, value: &Option<T>) -> Option<Value> {
        match value {
            Some(value) => self.writer.write(env, location, value),
            None => Some(Value::Null),
        }
    }
}

/// `None` is omitted.
#[derive(Debug, Clone)]
pub struct OptionalWriter<W> {
    writer: W,
}

impl<T, W: Writer<T>> Writer<Option<T>> for OptionalWriter<W> {
    fn write(&self, env: &WriterEnv, location: &Location, value: &Option<T>) -> Option<Value> {
        value
            .as_ref()
            .and_then(|value| self.writer.write(env, location, value))
    }
}

#[derive(Debug, Clone)]
pub struct ContramapWriter<W, F> {
    writer: W,
    mapper: F,
}

impl<T, P, W, F> Writer<T> for ContramapWriter<W, F>
where
    T: ?Sized,
    W: Writer<P>,
    F: Fn(&T) -> P,
{
    fn write(&self, env: &WriterEnv, location: &Location, value: &T) -> Option<Value> {
        self.writer.write(env, location, &(self.mapper)(value))
    }
}

/// Drops the produced node when the predicate rejects it.
///
/// The predicate judges the node the inner writer produced, not the source
/// value. An omitted node stays omitted and a `null` node is written as is,
/// so the predicate never runs for either. This covers `None` under
/// `nullable` as well as a non-finite float that `number()` writes as `null`.
#[derive(Debug, Clone)]
pub struct FilterWriter<W, P> {
    writer: W,
    predicate: P,
}

impl<T, W, P> Writer<T> for FilterWriter<W, P>
where
    T: ?Sized,
    W: Writer<T>,
    P: Fn(&WriterEnv, &Location, &T, &Value) -> bool,
{
    fn write(&self, env: &WriterEnv, location: &Location, value: &T) -> Option<Value> {
        match self.writer.write(env, location, value)? {
            Value::Null => Some(Value::Null),
            node if (self.predicate)(env, location, value, &node) => Some(node),
            _ => None,
        }
    }
}

pub struct BoxedWriter<T: ?Sized>(Arc<dyn Writer<T> + Send + Sync>);

impl<T: ?Sized> Clone for BoxedWriter<T> {
    fn clone(&self) -> Self {
        BoxedWriter(self.0.clone())
    }
}

impl<T: ?Sized> core::fmt::Debug for BoxedWriter<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BoxedWriter")
    }
}

impl<T: ?Sized> Writer<T> for BoxedWriter<T> {
    fn write(&self, env: &WriterEnv, location: &Location, value: &T) -> Option<Value> {
        self.0.write(env, location, value)
    }
}

/// Combinators shared by the writers of this crate.
///
/// Closures are writers too; lift one with [`writer`] to reach these methods.
pub trait WriterExt: Sized {
    fn nullable(self) -> NullableWriter<Self> {
        NullableWriter { writer: self }
    }

    fn optional(self) -> OptionalWriter<Self> {
        OptionalWriter { writer: self }
    }

    /// Write a `T` by first projecting it to what this writer accepts.
    fn contramap<F>(self, mapper: F) -> ContramapWriter<Self, F> {
        ContramapWriter {
            writer: self,
            mapper,
        }
    }

    fn filter<P>(self, predicate: P) -> FilterWriter<Self, P> {
        FilterWriter {
            writer: self,
            predicate,
        }
    }

    fn boxed<T: ?Sized>(self) -> BoxedWriter<T>
    where
        Self: Writer<T> + Send + Sync + 'static,
    {
        BoxedWriter(Arc::new(self))
    }
}

impl WriterExt for StringWriter {}
impl WriterExt for BoolWriter {}
impl WriterExt for NumberWriter {}
impl WriterExt for ValueWriter {}
impl<T: ?Sized, F> WriterExt for FnWriter<T, F> {}
impl<W> WriterExt for NullableWriter<W> {}
impl<W> WriterExt for OptionalWriter<W> {}
impl<W, F> WriterExt for ContramapWriter<W, F> {}
impl<W, P> WriterExt for FilterWriter<W, P> {}
impl<T: ?Sized> WriterExt for BoxedWriter<T> {}
