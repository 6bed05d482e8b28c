pub mod bone_mask;

use bevy_math::{Mat3, Mat4, Vec2, Vec3, Vec4};
use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use pose_graph_proc_macros::ValueWrapper;
use serde::{Deserialize, Serialize};

use crate::{
    edge_data::bone_mask::BoneMask,
    pose::{Pose, PoseRef},
};

/// The closed set of kinds an endpoint can carry.
#[derive(Reflect, Default, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[reflect(Default)]
pub enum ValueKind {
    #[default]
    Undefined,
    I8,
    I32,
    U8,
    U32,
    Bool,
    F32,
    F64,
    String,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
    BoneMask,
    Pose,
}

/// Runtime value flowing through endpoints.
///
/// Each variant is the only payload allowed for the [`ValueKind`] of the same
/// name. Reading a value through any other kind fails with
/// [`GraphError::MismatchedDataType`](crate::errors::GraphError::MismatchedDataType).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ValueWrapper)]
#[unwrap_error(error(crate::errors::GraphError), variant(MismatchedDataType))]
pub enum Value {
    #[default]
    Undefined,
    #[trivial_copy]
    I8(i8),
    #[trivial_copy]
    I32(i32),
    #[trivial_copy]
    U8(u8),
    #[trivial_copy]
    U32(u32),
    #[trivial_copy]
    Bool(bool),
    #[trivial_copy]
    F32(f32),
    #[trivial_copy]
    F64(f64),
    String(String),
    #[trivial_copy]
    Vec2(Vec2),
    #[trivial_copy]
    Vec3(Vec3),
    #[trivial_copy]
    Vec4(Vec4),
    #[trivial_copy]
    Mat3(Mat3),
    #[trivial_copy]
    Mat4(Mat4),
    BoneMask(BoneMask),
    Pose(PoseRef),
}

impl Value {
    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Undefined => Value::Undefined,
            ValueKind::I8 => Value::I8(Default::default()),
            ValueKind::I32 => Value::I32(Default::default()),
            ValueKind::U8 => Value::U8(Default::default()),
            ValueKind::U32 => Value::U32(Default::default()),
            ValueKind::Bool => Value::Bool(Default::default()),
            ValueKind::F32 => Value::F32(Default::default()),
            ValueKind::F64 => Value::F64(Default::default()),
            ValueKind::String => Value::String(Default::default()),
            ValueKind::Vec2 => Value::Vec2(Default::default()),
            ValueKind::Vec3 => Value::Vec3(Default::default()),
            ValueKind::Vec4 => Value::Vec4(Default::default()),
            ValueKind::Mat3 => Value::Mat3(Default::default()),
            ValueKind::Mat4 => Value::Mat4(Default::default()),
            ValueKind::BoneMask => Value::BoneMask(Default::default()),
            ValueKind::Pose => Value::Pose(Default::default()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::from(self)
    }
}

impl From<Pose> for Value {
    fn from(value: Pose) -> Self {
        Value::Pose(PoseRef::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<&Value> for ValueKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Undefined => ValueKind::Undefined,
            Value::I8(_) => ValueKind::I8,
            Value::I32(_) => ValueKind::I32,
            Value::U8(_) => ValueKind::U8,
            Value::U32(_) => ValueKind::U32,
            Value::Bool(_) => ValueKind::Bool,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::String(_) => ValueKind::String,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Mat3(_) => ValueKind::Mat3,
            Value::Mat4(_) => ValueKind::Mat4,
            Value::BoneMask(_) => ValueKind::BoneMask,
            Value::Pose(_) => ValueKind::Pose,
        }
    }
}
