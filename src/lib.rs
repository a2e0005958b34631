pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod storage;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;
pub mod observability;
