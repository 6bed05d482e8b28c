mod build_vec2;
mod const_vec2;

pub use build_vec2::BuildVec2;
pub use const_vec2::ConstVec2;
