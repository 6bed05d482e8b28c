use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use serde::{Deserialize, Serialize};

use crate::{
    edge_data::{Value, ValueKind},
    errors::{GraphError, GraphResult},
};

#[derive(Reflect, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[reflect(Default)]
pub enum Direction {
    #[default]
    Input,
    Output,
}

/// Named, typed slot on a node.
///
/// The kind is decided when the endpoint is registered and never changes;
/// both the current and the default value always hold a payload of that kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    name: String,
    direction: Direction,
    kind: ValueKind,
    current: Value,
    default: Value,
}

impl Endpoint {
    /// Endpoint whose kind is taken from `default`.
    pub fn new(name: impl Into<String>, direction: Direction, default: impl Into<Value>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            direction,
            kind: default.kind(),
            current: default.clone(),
            default,
        }
    }

    pub fn with_kind(name: impl Into<String>, direction: Direction, kind: ValueKind) -> Self {
        Self::new(name, direction, Value::default_for(kind))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn current(&self) -> &Value {
        &self.current
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn set_current(&mut self, value: impl Into<Value>) -> GraphResult<()> {
        self.current = self.checked(value.into())?;
        Ok(())
    }

    pub fn set_default(&mut self, value: impl Into<Value>) -> GraphResult<()> {
        self.default = self.checked(value.into())?;
        Ok(())
    }

    /// Restores the current value to the default one.
    pub fn reset(&mut self) {
        self.current.clone_from(&self.default);
    }

    /// Whether both stored values agree with the declared kind. Always true for
    /// endpoints built through the API, but not for deserialized ones.
    pub fn is_consistent(&self) -> bool {
        self.current.kind() == self.kind && self.default.kind() == self.kind
    }

    fn checked(&self, value: Value) -> GraphResult<Value> {
        if value.kind() == self.kind {
            Ok(value)
        } else {
            Err(GraphError::MismatchedDataType(
                format!("{:?}", self.kind),
                value.variant_name().into(),
            ))
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Direction, Endpoint};
    use crate::edge_data::{Value, ValueKind};

    #[test]
    fn writing_other_kind_is_rejected() {
        let mut endpoint = Endpoint::new("weight", Direction::Input, 0.5_f32);
        assert_eq!(endpoint.kind(), ValueKind::F32);

        assert!(endpoint.set_current(true).is_err());
        assert!(endpoint.set_default(Value::Undefined).is_err());
        assert_eq!(endpoint.current(), &Value::F32(0.5));

        endpoint.set_current(0.75_f32).unwrap();
        assert_eq!(endpoint.current(), &Value::F32(0.75));
        assert_eq!(endpoint.kind(), ValueKind::F32);
    }

    #[test]
    fn reset_restores_default() {
        let mut endpoint = Endpoint::with_kind("in", Direction::Input, ValueKind::I32);
        endpoint.set_current(12_i32).unwrap();
        endpoint.reset();
        assert_eq!(endpoint.current(), &Value::I32(0));
    }
}
