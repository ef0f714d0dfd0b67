use arbor_value::{Location, Struct, Value};
use indexmap::IndexMap;

use crate::env::{EmptyResultAction, WriterEnv};
use crate::write::{Writer, WriterExt};

/// Writes a string-keyed map as a struct, in map order. Omitted entries are
/// left out.
#[derive(Debug, Clone)]
pub struct MapWriter<W> {
    values: W,
    empty_result: Option<EmptyResultAction>,
}

pub fn map_writer<W>(values: W) -> MapWriter<W> {
    MapWriter {
        values,
        empty_result: None,
    }
}

impl<W> MapWriter<W> {
    /// Overrides the environment's action for this writer.
    pub fn empty_result(mut self, action: EmptyResultAction) -> Self {
        self.empty_result = Some(action);
        self
    }
}

impl<W> WriterExt for MapWriter<W> {}

impl<T, W: Writer<T>> Writer<IndexMap<String, T>> for MapWriter<W> {
    fn write(
        &self,
        env: &WriterEnv,
        location: &Location,
        value: &IndexMap<String, T>,
    ) -> Option<Value> {
        let fields: Struct = value
            .iter()
            .filter_map(|(key, value)| {
                self.values
                    .write(env, &location.append(key.as_str()), value)
                    .map(|node| (key.as_str(), node))
            })
            .collect();
        self.empty_result
            .unwrap_or(env.options.empty_result_action)
            .finish_struct(fields)
    }
}
