// Domain entities

pub mod config;
pub mod death_event;
pub mod query;
pub mod scan;

pub use config::*;
pub use death_event::*;
pub use query::*;
pub use scan::*;
