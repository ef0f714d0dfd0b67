use std::sync::Arc;

use arbor_value::{Location, Struct, Value};

use crate::env::{EmptyResultAction, WriterEnv};
use crate::write::{Writer, WriterExt};

type PropertyWrite<T> = Arc<dyn Fn(&WriterEnv, &Location, &T) -> Option<Value> + Send + Sync>;

/// Builds a [`StructWriter`] from named properties, written in declaration
/// order.
pub struct StructWriterBuilder<T: ?Sized> {
    properties: Vec<(String, PropertyWrite<T>)>,
    empty_result: Option<EmptyResultAction>,
}

impl<T: ?Sized + 'static> Default for StructWriterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> StructWriterBuilder<T> {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            empty_result: None,
        }
    }

    /// Write the field `name` from a part borrowed out of the value.
    pub fn property<P, G, W>(mut self, name: impl Into<String>, getter: G, writer: W) -> Self
    where
        P: ?Sized + 'static,
        G: Fn(&T) -> &P + Send + Sync + 'static,
        W: Writer<P> + Send + Sync + 'static,
    {
        let write: PropertyWrite<T> =
            Arc::new(move |env: &WriterEnv, location: &Location, value: &T| {
                writer.write(env, location, getter(value))
            });
        self.properties.push((name.into(), write));
        self
    }

    /// Write the field `name` from a value computed out of the value.
    pub fn property_value<P, G, W>(mut self, name: impl Into<String>, getter: G, writer: W) -> Self
    where
        P: 'static,
        G: Fn(&T) -> P + Send + Sync + 'static,
        W: Writer<P> + Send + Sync + 'static,
    {
        let write: PropertyWrite<T> =
            Arc::new(move |env: &WriterEnv, location: &Location, value: &T| {
                writer.write(env, location, &getter(value))
            });
        self.properties.push((name.into(), write));
        self
    }

    /// Overrides the environment's action for this writer.
    pub fn empty_result(mut self, action: EmptyResultAction) -> Self {
        self.empty_result = Some(action);
        self
    }

    pub fn build(self) -> StructWriter<T> {
        StructWriter {
            properties: self.properties.into(),
            empty_result: self.empty_result,
        }
    }
}

pub struct StructWriter<T: ?Sized> {
    properties: Arc<[(String, PropertyWrite<T>)]>,
    empty_result: Option<EmptyResultAction>,
}

impl<T: ?Sized> Clone for StructWriter<T> {
    fn clone(&self) -> Self {
        Self {
            properties: self.properties.clone(),
            empty_result: self.empty_result,
        }
    }
}

impl<T: ?Sized> StructWriter<T> {
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }
}

impl<T: ?Sized> WriterExt for StructWriter<T> {}

impl<T: ?Sized> Writer<T> for StructWriter<T> {
    fn write(&self, env: &WriterEnv, location: &Location, value: &T) -> Option<Value> {
        let mut fields = Struct::new();
        for (name, write) in self.properties.iter() {
            if let Some(node) = write(env, &location.append(name.as_str()), value) {
                fields.insert(name.clone(), node);
            }
        }
        self.empty_result
            .unwrap_or(env.options.empty_result_action)
            .finish_struct(fields)
    }
}
