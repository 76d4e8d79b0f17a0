mod game;
mod registry;

pub use game::*;
pub use registry::*;
