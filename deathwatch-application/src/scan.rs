pub mod engine;
pub mod reader;

pub use engine::*;
pub use reader::*;
