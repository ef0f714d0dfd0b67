//! Reader, writer and validator combinators over the arbor value tree.
//!
//! Readers turn a [`Value`] into typed data and report every failure with
//! the [`Location`] where it was detected. Writers go the other way.
//! Validators check read values and plug into readers through
//! [`ReaderExt::validation`] or the struct reader's before/after hooks.

/// Per-call environments and options.
pub mod env;

/// Error-builder capabilities and the ready-made [`ReadError`](error::ReadError).
pub mod error;

/// Read results and their failure algebra.
pub mod result;

/// Reader trait, combinators, property/struct/array/map readers.
pub mod read;

/// Writer trait, combinators, struct/array/map writers.
pub mod write;

/// Validator trait and the built-in rules.
pub mod validate;

pub use arbor_value::{Location, Path, PathElement, Paths, Value, ValueKind};
pub use env::{EmptyResultAction, Options, ReaderEnv, WriterEnv, WriterOptions};
pub use error::{DefaultErrorBuilders, ErrorBuilders, ReadError};
pub use read::{ReadOutput, Reader, ReaderExt};
pub use result::{Cause, Failure, ReaderResult, Success, ValidationResult};
pub use validate::{Validator, ValidatorExt};
pub use write::{Writer, WriterExt};
