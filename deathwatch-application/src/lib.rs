// Deathwatch Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod scan;
pub mod state;

#[cfg(test)]
mod testing;

pub use error::{AppError, ScanError};
pub use metrics::Metrics;
pub use scan::ScanEngine;
pub use state::AppState;
