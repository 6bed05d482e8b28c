use crate::{
    edge_data::{Value, ValueKind},
    endpoint::{Direction, Endpoint},
};

/// Collects the endpoints a node declares. Declaration order is the
/// endpoint index.
pub struct SpecContext<'a> {
    inputs: &'a mut Vec<Endpoint>,
    outputs: &'a mut Vec<Endpoint>,
}

impl<'a> SpecContext<'a> {
    pub fn new(inputs: &'a mut Vec<Endpoint>, outputs: &'a mut Vec<Endpoint>) -> Self {
        Self { inputs, outputs }
    }

    /// Adds an input whose kind and default come from `default`.
    pub fn add_input(&mut self, name: impl Into<String>, default: impl Into<Value>) -> &mut Self {
        self.register_endpoint(Direction::Input, name, default);
        self
    }

    pub fn add_input_kind(&mut self, name: impl Into<String>, kind: ValueKind) -> &mut Self {
        self.add_input(name, Value::default_for(kind))
    }

    pub fn add_output(&mut self, name: impl Into<String>, kind: ValueKind) -> &mut Self {
        self.register_endpoint(Direction::Output, name, Value::default_for(kind));
        self
    }

    /// Appends an endpoint and returns its index.
    pub fn register_endpoint(
        &mut self,
        direction: Direction,
        name: impl Into<String>,
        default: impl Into<Value>,
    ) -> usize {
        let endpoints = match direction {
            Direction::Input => &mut *self.inputs,
            Direction::Output => &mut *self.outputs,
        };
        endpoints.push(Endpoint::new(name, direction, default));
        endpoints.len() - 1
    }
}
