//! Readers of single nodes.

use core::any::type_name;
use core::marker::PhantomData;

use arbor_value::{Location, Number, Value, ValueKind};
use num_bigint::BigInt;

use crate::env::ReaderEnv;
use crate::error::{ErrorBuilders, InvalidTypeErrorBuilder, ValueCastErrorBuilder};
use crate::read::{ReadOutput, Reader};
use crate::result::ReaderResult;

fn invalid_type<T, EB: InvalidTypeErrorBuilder>(
    env: &ReaderEnv<EB>,
    location: &Location,
    expected: ValueKind,
    source: &Value,
) -> ReaderResult<T, EB::Error> {
    ReaderResult::failure(
        location.clone(),
        env.error_builders
            .invalid_type_error(expected, source.kind()),
    )
}

// ============================================================================
// Scalars
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct StringReader;

pub fn string() -> StringReader {
    StringReader
}

impl ReadOutput for StringReader {
    type Output = String;
}

impl<EB: InvalidTypeErrorBuilder> Reader<EB> for StringReader {
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<String, EB::Error> {
        match source {
            Value::String(s) => ReaderResult::success(location.clone(), s.clone()),
            other => invalid_type(env, location, ValueKind::String, other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolReader;

pub fn boolean() -> BoolReader {
    BoolReader
}

impl ReadOutput for BoolReader {
    type Output = bool;
}

impl<EB: InvalidTypeErrorBuilder> Reader<EB> for BoolReader {
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<bool, EB::Error> {
        match source {
            Value::Bool(b) => ReaderResult::success(location.clone(), *b),
            other => invalid_type(env, location, ValueKind::Bool, other),
        }
    }
}

/// Types a number node can be cast into.
pub trait FromNumber: Sized {
    /// `None` when the text does not fit `Self`.
    fn from_number(number: &Number) -> Option<Self>;
}

macro_rules! from_number_integer {
    ($($ty:ty),*) => {
        $(
            impl FromNumber for $ty {
                fn from_number(number: &Number) -> Option<Self> {
                    number.to()
                }
            }
        )*
    };
}

from_number_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Text past the float range parses to an infinity, which no number node
// stands for.
macro_rules! from_number_float {
    ($($ty:ty),*) => {
        $(
            impl FromNumber for $ty {
                fn from_number(number: &Number) -> Option<Self> {
                    number.to::<$ty>().filter(|value| value.is_finite())
                }
            }
        )*
    };
}

from_number_float!(f32, f64);

impl FromNumber for BigInt {
    fn from_number(number: &Number) -> Option<Self> {
        number.to_big_int()
    }
}

/// Reads a number node into a primitive number type.
///
/// Text the target type rejects, such as `300` for `u8`, `1.5` for `i32` or
/// `1e400` for `f64`, is a value-cast error.
pub struct NumberReader<T>(PhantomData<fn() -> T>);

pub fn number<T: FromNumber>() -> NumberReader<T> {
    NumberReader(PhantomData)
}

impl<T> Clone for NumberReader<T> {
    fn clone(&self) -> Self {
        NumberReader(PhantomData)
    }
}

impl<T> ReadOutput for NumberReader<T> {
    type Output = T;
}

impl<EB, T> Reader<EB> for NumberReader<T>
where
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder,
    T: FromNumber,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<T, EB::Error> {
        let Value::Number(number) = source else {
            return invalid_type(env, location, ValueKind::Number, source);
        };
        match T::from_number(number) {
            Some(value) => ReaderResult::success(location.clone(), value),
            None => ReaderResult::failure(
                location.clone(),
                env.error_builders
                    .value_cast_error(number.as_str(), type_name::<T>()),
            ),
        }
    }
}

/// Reads integral number nodes of any size. Numbers with a fraction or an
/// exponent are a value-cast error.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntReader;

pub fn big_int() -> BigIntReader {
    BigIntReader
}

impl ReadOutput for BigIntReader {
    type Output = BigInt;
}

impl<EB> Reader<EB> for BigIntReader
where
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<BigInt, EB::Error> {
        let Value::Number(number) = source else {
            return invalid_type(env, location, ValueKind::Number, source);
        };
        match number.to_big_int() {
            Some(value) => ReaderResult::success(location.clone(), value),
            None => ReaderResult::failure(
                location.clone(),
                env.error_builders
                    .value_cast_error(number.as_str(), "integer"),
            ),
        }
    }
}

/// Accepts only `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReader;

pub fn null() -> NullReader {
    NullReader
}

impl ReadOutput for NullReader {
    type Output = ();
}

impl<EB: InvalidTypeErrorBuilder> Reader<EB> for NullReader {
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<(), EB::Error> {
        match source {
            Value::Null => ReaderResult::success(location.clone(), ()),
            other => invalid_type(env, location, ValueKind::Null, other),
        }
    }
}

/// Returns the node itself. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueReader;

pub fn value() -> ValueReader {
    ValueReader
}

impl ReadOutput for ValueReader {
    type Output = Value;
}

impl<EB: ErrorBuilders> Reader<EB> for ValueReader {
    fn read(
        &self,
        _env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Value, EB::Error> {
        ReaderResult::success(location.clone(), source.clone())
    }
}

/// A string restricted to a fixed set of spellings.
#[derive(Debug, Clone)]
pub struct LiteralReader {
    allowed: Vec<String>,
    description: String,
}

pub fn literal<I, S>(allowed: I) -> LiteralReader
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    let description = format!("one of {}", allowed.join(", "));
    LiteralReader {
        allowed,
        description,
    }
}

impl ReadOutput for LiteralReader {
    type Output = String;
}

impl<EB> Reader<EB> for LiteralReader
where
    EB: InvalidTypeErrorBuilder + ValueCastErrorBuilder,
{
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<String, EB::Error> {
        let Value::String(text) = source else {
            return invalid_type(env, location, ValueKind::String, source);
        };
        if self.allowed.iter().any(|allowed| allowed == text) {
            ReaderResult::success(location.clone(), text.clone())
        } else {
            ReaderResult::failure(
                location.clone(),
                env.error_builders
                    .value_cast_error(text, &self.description),
            )
        }
    }
}

/// Value-level nullable: `null` reads as `None`, anything else goes to the
/// inner reader.
#[derive(Debug, Clone)]
pub struct OrNull<R> {
    reader: R,
}

impl<R> OrNull<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: ReadOutput> ReadOutput for OrNull<R> {
    type Output = Option<R::Output>;
}

impl<EB: ErrorBuilders, R: Reader<EB>> Reader<EB> for OrNull<R> {
    fn read(
        &self,
        env: &ReaderEnv<EB>,
        location: &Location,
        source: &Value,
    ) -> ReaderResult<Option<R::Output>, EB::Error> {
        match source {
            Value::Null => ReaderResult::success(location.clone(), None),
            other => self.reader.read(env, location, other).map(Some),
        }
    }
}
