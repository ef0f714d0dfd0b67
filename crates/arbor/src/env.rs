//! Per-call environments threaded through readers, validators and writers.

use arbor_value::{Struct, Value};

use crate::error::DefaultErrorBuilders;

/// Failure policy of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Stop at the first failure instead of collecting every failure of a
    /// struct, array or map.
    pub fail_fast: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { fail_fast: true }
    }
}

impl Options {
    pub fn fail_fast() -> Self {
        Self { fail_fast: true }
    }

    pub fn accumulate() -> Self {
        Self { fail_fast: false }
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Environment of readers and validators: the application's error builders
/// plus the read options.
#[derive(Debug, Clone, Default)]
pub struct ReaderEnv<EB> {
    pub error_builders: EB,
    pub options: Options,
}

impl<EB> ReaderEnv<EB> {
    pub fn new(error_builders: EB, options: Options) -> Self {
        Self {
            error_builders,
            options,
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn is_fail_fast(&self) -> bool {
        self.options.fail_fast
    }
}

impl ReaderEnv<DefaultErrorBuilders> {
    pub fn accumulate() -> Self {
        Self::new(DefaultErrorBuilders, Options::accumulate())
    }
}

// ============================================================================
// Writer side
// ============================================================================

/// What a struct, array or map writer produces when nothing was written
/// into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EmptyResultAction {
    /// Emit the empty container.
    #[default]
    ReturnEmptyValue,
    /// Emit nothing; the enclosing writer omits the entry.
    ReturnNothing,
    /// Emit an explicit `null`.
    ReturnNullValue,
}

impl EmptyResultAction {
    pub fn apply(self, empty: Value) -> Option<Value> {
        match self {
            EmptyResultAction::ReturnEmptyValue => Some(empty),
            EmptyResultAction::ReturnNothing => None,
            EmptyResultAction::ReturnNullValue => Some(Value::Null),
        }
    }

    pub(crate) fn finish_struct(self, fields: Struct) -> Option<Value> {
        if fields.is_empty() {
            self.apply(Value::Struct(fields))
        } else {
            Some(Value::Struct(fields))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Used by container writers without their own action.
    pub empty_result_action: EmptyResultAction,
}

impl WriterOptions {
    pub fn with_empty_result_action(mut self, action: EmptyResultAction) -> Self {
        self.empty_result_action = action;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct WriterEnv {
    pub options: WriterOptions,
}

impl WriterEnv {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_fail_fast() {
        assert!(Options::default().fail_fast);
        assert!(!Options::accumulate().fail_fast);
        assert!(ReaderEnv::<DefaultErrorBuilders>::default().is_fail_fast());
        assert!(!ReaderEnv::accumulate().is_fail_fast());
    }

    #[test]
    fn test_empty_result_action_apply() {
        let empty = Value::Struct(Struct::new());
        assert_eq!(
            EmptyResultAction::ReturnEmptyValue.apply(empty.clone()),
            Some(empty.clone())
        );
        assert_eq!(EmptyResultAction::ReturnNothing.apply(empty.clone()), None);
        assert_eq!(
            EmptyResultAction::ReturnNullValue.apply(empty),
            Some(Value::Null)
        );
    }

    #[test]
    fn test_non_empty_struct_ignores_action() {
        let fields = Struct::from_iter([("a", Value::from(1))]);
        assert_eq!(
            EmptyResultAction::ReturnNothing.finish_struct(fields.clone()),
            Some(Value::Struct(fields))
        );
    }
}
