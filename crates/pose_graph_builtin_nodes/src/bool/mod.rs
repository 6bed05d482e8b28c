mod const_bool;
mod not_bool;

pub use const_bool::ConstBool;
pub use not_bool::NotBool;
