use arbor_value::{Array, Location, Value};

use crate::env::{EmptyResultAction, WriterEnv};
use crate::write::{Writer, WriterExt};

/// Writes every element with the same writer. Omitted elements are dropped,
/// so later elements shift down.
#[derive(Debug, Clone)]
pub struct ArrayWriter<W> {
    items: W,
    empty_result: Option<EmptyResultAction>,
}

pub fn array_writer<W>(items: W) -> ArrayWriter<W> {
    ArrayWriter {
        items,
        empty_result: None,
    }
}

impl<W> ArrayWriter<W> {
    /// Overrides the environment's action for this writer.
    pub fn empty_result(mut self, action: EmptyResultAction) -> Self {
        self.empty_result = Some(action);
        self
    }

    fn write_items<'a, T: 'a>(
        &self,
        env: &WriterEnv,
        location: &Location,
        values: impl Iterator<Item = &'a T>,
    ) -> Option<Value>
    where
        W: Writer<T>,
    {
        let elements: Vec<Value> = values
            .enumerate()
            .filter_map(|(index, value)| self.items.write(env, &location.append(index), value))
            .collect();
        if elements.is_empty() {
            self.empty_result
                .unwrap_or(env.options.empty_result_action)
                .apply(Value::Array(Array::default()))
        } else {
            Some(Value::Array(Array::from(elements)))
        }
    }
}

impl<W> WriterExt for ArrayWriter<W> {}

impl<T, W: Writer<T>> Writer<[T]> for ArrayWriter<W> {
    fn write(&self, env: &WriterEnv, location: &Location, value: &[T]) -> Option<Value> {
        self.write_items(env, location, value.iter())
    }
}

impl<T, W: Writer<T>> Writer<Vec<T>> for ArrayWriter<W> {
    fn write(&self, env: &WriterEnv, location: &Location, value: &Vec<T>) -> Option<Value> {
        self.write_items(env, location, value.iter())
    }
}
