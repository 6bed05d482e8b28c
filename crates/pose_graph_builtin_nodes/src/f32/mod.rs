mod add_f32;
mod clamp_f32;
mod const_f32;
mod mul_f32;
mod select_f32;

pub use add_f32::AddF32;
pub use clamp_f32::ClampF32;
pub use const_f32::ConstF32;
pub use mul_f32::MulF32;
pub use select_f32::SelectF32;
