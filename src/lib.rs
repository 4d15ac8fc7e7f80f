//! Tank-mix compatibility checks and treatment analytics for farm records.

pub mod cli;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod store;

pub use error::{FarmLogError, Result};
