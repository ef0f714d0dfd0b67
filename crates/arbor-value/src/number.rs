use core::fmt::{self, Display};
use core::str::FromStr;
use std::sync::LazyLock;

use num_bigint::BigInt;
use regex::Regex;
use thiserror::Error;

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:0|[1-9][0-9]*)$").unwrap());

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// A JSON number kept in its canonical textual form.
///
/// The text is never reinterpreted on construction, so integers wider than
/// any machine type and decimals that would lose precision as `f64` survive
/// the trip through the value tree unchanged. Readers convert on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid number literal: {0:?}")]
pub struct NumberParseError(pub String);

impl Number {
    /// Parse a JSON number literal.
    pub fn parse(text: impl Into<String>) -> Result<Self, NumberParseError> {
        let text = text.into();
        if NUMBER_PATTERN.is_match(&text) {
            Ok(Number(text))
        } else {
            Err(NumberParseError(text))
        }
    }

    /// Build a number from a float. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then(|| Number(format_float(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the text has neither a fraction nor an exponent.
    pub fn is_integer(&self) -> bool {
        INTEGER_PATTERN.is_match(&self.0)
    }

    /// True when the text carries a fraction or an exponent.
    pub fn is_real(&self) -> bool {
        !self.is_integer()
    }

    /// Convert the text into any `FromStr` numeric type.
    ///
    /// Returns `None` when the text does not fit the target, e.g. a real
    /// number read as an integer or an integer out of range.
    pub fn to<T: FromStr>(&self) -> Option<T> {
        self.0.parse().ok()
    }

    pub fn to_big_int(&self) -> Option<BigInt> {
        if self.is_integer() {
            self.0.parse().ok()
        } else {
            None
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// `f64`'s `Display` never uses exponents and drops the fraction of whole
/// values; both outputs are valid JSON number literals.
fn format_float(value: f64) -> String {
    let text = value.to_string();
    if text == "-0" { "0".to_string() } else { text }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Number {
    type Err = NumberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::parse(s)
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number(n.to_string())
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        Number(n.to_string())
    }
}

impl From<&BigInt> for Number {
    fn from(n: &BigInt) -> Self {
        Number(n.to_string())
    }
}
