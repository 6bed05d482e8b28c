mod groups;
mod transition;

pub use groups::*;
pub use transition::*;
