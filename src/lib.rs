/// Basic application code
pub mod app;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Database records
pub mod model;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
