// Domain services

pub mod death_parser;

pub use death_parser::*;
