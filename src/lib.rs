//! Promotion and site traffic reporting
//!

pub mod analysis;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod processor;
pub mod types;
pub mod utils;
