pub mod cli;
pub mod compare;
pub mod config;
pub mod dialect;
pub mod errors;
pub mod services;
pub mod session;
pub mod types;
pub mod utils;
