pub mod context;
pub mod lifecycle;

pub use lifecycle::{build_router_with_layers, run_standalone};
