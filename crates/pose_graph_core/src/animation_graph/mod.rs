mod core;
mod evaluation;
mod pin;
pub mod serial;

pub use core::*;
pub use evaluation::VisitState;
pub use pin::*;
