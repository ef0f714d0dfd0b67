//! Error-builder capabilities.
//!
//! The engine decides *when* an error happens and *where*; the embedding
//! application decides what the error value looks like. Each failure the
//! engine can detect has its own capability trait, and every reader or
//! validator lists the capabilities it needs as generic bounds on the
//! environment's error-builder type. A reader whose capability is not
//! implemented does not compile.
//!
//! [`DefaultErrorBuilders`] implements every capability with [`ReadError`].

use arbor_value::{Value, ValueKind};

/// Base trait of every error-builder set: names the produced error type.
pub trait ErrorBuilders {
    type Error: Clone + core::fmt::Debug;
}

// ============================================================================
// Lookup and conversion
// ============================================================================

pub trait PathMissingErrorBuilder: ErrorBuilders {
    fn path_missing_error(&self) -> Self::Error;
}

pub trait InvalidTypeErrorBuilder: ErrorBuilders {
    fn invalid_type_error(&self, expected: ValueKind, actual: ValueKind) -> Self::Error;
}

pub trait ValueCastErrorBuilder: ErrorBuilders {
    /// `value` is the textual form of the node, `target` names the type it
    /// could not be converted to.
    fn value_cast_error(&self, value: &str, target: &str) -> Self::Error;
}

// ============================================================================
// Structural surplus
// ============================================================================

pub trait AdditionalItemsErrorBuilder: ErrorBuilders {
    fn additional_items_error(&self, max_items: usize, actual: usize) -> Self::Error;
}

/// Reported once per unknown key, at the key's location.
pub trait AdditionalPropertiesErrorBuilder: ErrorBuilders {
    fn additional_properties_error(&self) -> Self::Error;
}

// ============================================================================
// Comparable rules
// ============================================================================

pub trait MinimumErrorBuilder: ErrorBuilders {
    fn minimum_error(&self, expected: Value, actual: Value) -> Self::Error;
}

pub trait MaximumErrorBuilder: ErrorBuilders {
    fn maximum_error(&self, expected: Value, actual: Value) -> Self::Error;
}

pub trait ExclusiveMinimumErrorBuilder: ErrorBuilders {
    fn exclusive_minimum_error(&self, expected: Value, actual: Value) -> Self::Error;
}

pub trait ExclusiveMaximumErrorBuilder: ErrorBuilders {
    fn exclusive_maximum_error(&self, expected: Value, actual: Value) -> Self::Error;
}

pub trait EqErrorBuilder: ErrorBuilders {
    fn eq_error(&self, expected: Value, actual: Value) -> Self::Error;
}

pub trait NeErrorBuilder: ErrorBuilders {
    fn ne_error(&self, expected: Value) -> Self::Error;
}

// ============================================================================
// String rules
// ============================================================================

pub trait MinLengthErrorBuilder: ErrorBuilders {
    fn min_length_error(&self, expected: usize, actual: usize) -> Self::Error;
}

pub trait MaxLengthErrorBuilder: ErrorBuilders {
    fn max_length_error(&self, expected: usize, actual: usize) -> Self::Error;
}

pub trait IsNotEmptyErrorBuilder: ErrorBuilders {
    fn is_not_empty_error(&self) -> Self::Error;
}

pub trait IsNotBlankErrorBuilder: ErrorBuilders {
    fn is_not_blank_error(&self) -> Self::Error;
}

pub trait PatternErrorBuilder: ErrorBuilders {
    fn pattern_error(&self, value: &str, pattern: &str) -> Self::Error;
}

pub trait IsAErrorBuilder: ErrorBuilders {
    fn is_a_error(&self, value: &str) -> Self::Error;
}

// ============================================================================
// Collection and struct rules
// ============================================================================

pub trait MinItemsErrorBuilder: ErrorBuilders {
    fn min_items_error(&self, expected: usize, actual: usize) -> Self::Error;
}

pub trait MaxItemsErrorBuilder: ErrorBuilders {
    fn max_items_error(&self, expected: usize, actual: usize) -> Self::Error;
}

/// `index` is the duplicate element, `first_index` the element it repeats.
pub trait UniqueItemsErrorBuilder: ErrorBuilders {
    fn unique_items_error(&self, index: usize, first_index: usize) -> Self::Error;
}

pub trait MinPropertiesErrorBuilder: ErrorBuilders {
    fn min_properties_error(&self, expected: usize, actual: usize) -> Self::Error;
}

pub trait MaxPropertiesErrorBuilder: ErrorBuilders {
    fn max_properties_error(&self, expected: usize, actual: usize) -> Self::Error;
}

// ============================================================================
// Default error type
// ============================================================================

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ReadError {
    #[error("path missing")]
    PathMissing,

    #[error("type mismatch: expected {expected}, got {actual}")]
    InvalidType {
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("cannot convert {value} to {target}")]
    ValueCast { value: String, target: String },

    #[error("too many items: expected at most {max_items}, got {actual}")]
    AdditionalItems { max_items: usize, actual: usize },

    #[error("unknown property")]
    AdditionalProperty,

    #[error("value {actual} is less than {expected}")]
    Minimum { expected: Value, actual: Value },

    #[error("value {actual} is greater than {expected}")]
    Maximum { expected: Value, actual: Value },

    #[error("value {actual} is not greater than {expected}")]
    ExclusiveMinimum { expected: Value, actual: Value },

    #[error("value {actual} is not less than {expected}")]
    ExclusiveMaximum { expected: Value, actual: Value },

    #[error("expected {expected}, got {actual}")]
    NotEqual { expected: Value, actual: Value },

    #[error("value must not be {0}")]
    Equal(Value),

    #[error("length {actual} is less than {expected}")]
    MinLength { expected: usize, actual: usize },

    #[error("length {actual} is greater than {expected}")]
    MaxLength { expected: usize, actual: usize },

    #[error("value is empty")]
    Empty,

    #[error("value is blank")]
    Blank,

    #[error("{value:?} does not match pattern {pattern}")]
    PatternMismatch { value: String, pattern: String },

    #[error("{0:?} is not accepted")]
    IsA(String),

    #[error("expected at least {expected} items, got {actual}")]
    MinItems { expected: usize, actual: usize },

    #[error("expected at most {expected} items, got {actual}")]
    MaxItems { expected: usize, actual: usize },

    #[error("item {index} duplicates item {first_index}")]
    DuplicateItem { index: usize, first_index: usize },

    #[error("expected at least {expected} properties, got {actual}")]
    MinProperties { expected: usize, actual: usize },

    #[error("expected at most {expected} properties, got {actual}")]
    MaxProperties { expected: usize, actual: usize },
}

/// Error-builder set producing [`ReadError`] for every capability.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultErrorBuilders;

impl ErrorBuilders for DefaultErrorBuilders {
    type Error = ReadError;
}

impl PathMissingErrorBuilder for DefaultErrorBuilders {
    fn path_missing_error(&self) -> ReadError {
        ReadError::PathMissing
    }
}

impl InvalidTypeErrorBuilder for DefaultErrorBuilders {
    fn invalid_type_error(&self, expected: ValueKind, actual: ValueKind) -> ReadError {
        ReadError::InvalidType { expected, actual }
    }
}

impl ValueCastErrorBuilder for DefaultErrorBuilders {
    fn value_cast_error(&self, value: &str, target: &str) -> ReadError {
        ReadError::ValueCast {
            value: value.to_string(),
            target: target.to_string(),
        }
    }
}

impl AdditionalItemsErrorBuilder for DefaultErrorBuilders {
    fn additional_items_error(&self, max_items: usize, actual: usize) -> ReadError {
        ReadError::AdditionalItems { max_items, actual }
    }
}

impl AdditionalPropertiesErrorBuilder for DefaultErrorBuilders {
    fn additional_properties_error(&self) -> ReadError {
        ReadError::AdditionalProperty
    }
}

impl MinimumErrorBuilder for DefaultErrorBuilders {
    fn minimum_error(&self, expected: Value, actual: Value) -> ReadError {
        ReadError::Minimum { expected, actual }
    }
}

impl MaximumErrorBuilder for DefaultErrorBuilders {
    fn maximum_error(&self, expected: Value, actual: Value) -> ReadError {
        ReadError::Maximum { expected, actual }
    }
}

impl ExclusiveMinimumErrorBuilder for DefaultErrorBuilders {
    fn exclusive_minimum_error(&self, expected: Value, actual: Value) -> ReadError {
        ReadError::ExclusiveMinimum { expected, actual }
    }
}

impl ExclusiveMaximumErrorBuilder for DefaultErrorBuilders {
    fn exclusive_maximum_error(&self, expected: Value, actual: Value) -> ReadError {
        ReadError::ExclusiveMaximum { expected, actual }
    }
}

impl EqErrorBuilder for DefaultErrorBuilders {
    fn eq_error(&self, expected: Value, actual: Value) -> ReadError {
        ReadError::NotEqual { expected, actual }
    }
}

impl NeErrorBuilder for DefaultErrorBuilders {
    fn ne_error(&self, expected: Value) -> ReadError {
        ReadError::Equal(expected)
    }
}

impl MinLengthErrorBuilder for DefaultErrorBuilders {
    fn min_length_error(&self, expected: usize, actual: usize) -> ReadError {
        ReadError::MinLength { expected, actual }
    }
}

impl MaxLengthErrorBuilder for DefaultErrorBuilders {
    fn max_length_error(&self, expected: usize, actual: usize) -> ReadError {
        ReadError::MaxLength { expected, actual }
    }
}

impl IsNotEmptyErrorBuilder for DefaultErrorBuilders {
    fn is_not_empty_error(&self) -> ReadError {
        ReadError::Empty
    }
}

impl IsNotBlankErrorBuilder for DefaultErrorBuilders {
    fn is_not_blank_error(&self) -> ReadError {
        ReadError::Blank
    }
}

impl PatternErrorBuilder for DefaultErrorBuilders {
    fn pattern_error(&self, value: &str, pattern: &str) -> ReadError {
        ReadError::PatternMismatch {
            value: value.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

impl IsAErrorBuilder for DefaultErrorBuilders {
    fn is_a_error(&self, value: &str) -> ReadError {
        ReadError::IsA(value.to_string())
    }
}

impl MinItemsErrorBuilder for DefaultErrorBuilders {
    fn min_items_error(&self, expected: usize, actual: usize) -> ReadError {
        ReadError::MinItems { expected, actual }
    }
}

impl MaxItemsErrorBuilder for DefaultErrorBuilders {
    fn max_items_error(&self, expected: usize, actual: usize) -> ReadError {
        ReadError::MaxItems { expected, actual }
    }
}

impl UniqueItemsErrorBuilder for DefaultErrorBuilders {
    fn unique_items_error(&self, index: usize, first_index: usize) -> ReadError {
        ReadError::DuplicateItem { index, first_index }
    }
}

impl MinPropertiesErrorBuilder for DefaultErrorBuilders {
    fn min_properties_error(&self, expected: usize, actual: usize) -> ReadError {
        ReadError::MinProperties { expected, actual }
    }
}

impl MaxPropertiesErrorBuilder for DefaultErrorBuilders {
    fn max_properties_error(&self, expected: usize, actual: usize) -> ReadError {
        ReadError::MaxProperties { expected, actual }
    }
}
