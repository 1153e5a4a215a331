pub mod config;
pub mod services;
pub mod stores;
pub mod utils;

pub use config::*;
pub use services::*;
pub use stores::*;
pub use utils::*;
