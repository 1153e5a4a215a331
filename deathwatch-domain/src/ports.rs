// Store Port Traits (Interfaces)
// Define what the scan engine needs from infrastructure

pub mod stores;

pub use stores::*;
