pub mod body;
pub mod config;
pub mod error;
pub mod initial_parameters;
pub mod system;
pub mod units;
pub mod vector;
