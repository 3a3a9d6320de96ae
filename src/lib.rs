pub mod affirmation;
pub mod config;
pub mod core;
