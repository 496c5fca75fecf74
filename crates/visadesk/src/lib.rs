pub mod access;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod portal;
pub mod progress;
pub mod records;
pub mod telemetry;
