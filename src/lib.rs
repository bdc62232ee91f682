pub mod cli;
pub mod config;
pub mod enrich;
pub mod error;
pub mod exit;
pub mod export;
pub mod matcher;
pub mod pipeline;
pub mod segment;
pub mod store;
pub mod structure;
pub mod tree;
pub mod types;
