use bevy_reflect::{Reflect, std_traits::ReflectDefault};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-bone blend weights, keyed by bone name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneMask {
    weights: IndexMap<String, f32>,
    base: BoneMaskType,
}

impl BoneMask {
    pub fn bone_weight(&self, bone: &str) -> f32 {
        let default = match self.base {
            BoneMaskType::Positive => 0.,
            BoneMaskType::Negative => 1.,
        };
        self.weights.get(bone).copied().unwrap_or(default)
    }

    /// Every bone gets full weight.
    pub fn all() -> Self {
        Self {
            weights: IndexMap::new(),
            base: BoneMaskType::Negative,
        }
    }

    /// No bone gets any weight unless listed.
    pub fn none() -> Self {
        Self {
            weights: IndexMap::new(),
            base: BoneMaskType::Positive,
        }
    }

    pub fn with_weight(mut self, bone: impl Into<String>, weight: f32) -> Self {
        self.set_weight(bone, weight);
        self
    }

    pub fn set_weight(&mut self, bone: impl Into<String>, weight: f32) {
        self.weights.insert(bone.into(), weight);
    }

    pub fn base(&self) -> BoneMaskType {
        self.base
    }
}

#[derive(Reflect, Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[reflect(Default)]
pub enum BoneMaskType {
    /// If a bone is in the weights map, weight is given. Otherwise, weight is zero
    #[default]
    Positive,
    /// If a bone is not in the weights map, weight is 1. Otherwise, weight is as given
    Negative,
}

#[cfg(test)]
mod test {
    use super::BoneMask;

    #[test]
    fn base_decides_weight_of_unlisted_bones() {
        let all = BoneMask::all().with_weight("spine", 0.25);
        assert_eq!(all.bone_weight("spine"), 0.25);
        assert_eq!(all.bone_weight("head"), 1.);

        let none = BoneMask::none().with_weight("spine", 0.25);
        assert_eq!(none.bone_weight("spine"), 0.25);
        assert_eq!(none.bone_weight("head"), 0.);
    }
}
