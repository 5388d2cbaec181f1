mod canvas;
mod context;
mod frame;
mod runtime;
mod state;

pub use canvas::*;
pub use context::*;
pub use runtime::*;
pub use state::*;
