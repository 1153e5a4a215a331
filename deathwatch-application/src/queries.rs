pub mod death_queries;
pub mod health_queries;
