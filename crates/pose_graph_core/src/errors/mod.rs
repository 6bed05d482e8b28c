mod graph_error;
mod load_error;
mod saving_error;
mod validation_error;

pub use graph_error::*;
pub use load_error::*;
pub use saving_error::*;
pub use validation_error::*;
