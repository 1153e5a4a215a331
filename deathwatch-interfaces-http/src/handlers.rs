pub mod death_handlers;
pub mod ops_handlers;

pub use death_handlers::*;
pub use ops_handlers::*;
